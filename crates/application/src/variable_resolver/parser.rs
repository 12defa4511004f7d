//! Parser for `{{variable}}` syntax.
//!
//! Extracts variable references together with their byte spans so the
//! engine can stitch substituted and verbatim segments back together.

use std::ops::Range;

/// A parsed variable reference in a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableReference {
    /// The variable name, trimmed, without the surrounding braces.
    pub name: String,

    /// Byte range of the whole `{{...}}` token in the original string.
    pub span: Range<usize>,
}

impl VariableReference {
    /// Creates a new variable reference.
    #[must_use]
    pub fn new(name: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// Parses a string and extracts all `{{ name }}` references in order.
///
/// Names are trimmed; empty or whitespace-only names yield no reference,
/// and an opener without a matching `}}` ends the scan.
#[must_use]
pub fn parse_variables(input: &str) -> Vec<VariableReference> {
    let mut references = Vec::new();
    let mut cursor = 0;

    while let Some(open) = input[cursor..].find("{{") {
        let start = cursor + open;
        let Some(close) = input[start + 2..].find("}}") else {
            break;
        };
        let end = start + 2 + close + 2;

        let name = input[start + 2..end - 2].trim();
        if !name.is_empty() {
            references.push(VariableReference::new(name, start..end));
        }
        cursor = end;
    }

    references
}
