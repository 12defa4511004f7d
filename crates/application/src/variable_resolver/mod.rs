//! Variable resolution
//!
//! Substitutes `{{variable}}` references from the active environment.
//! Resolution is best-effort by design: unknown names are left verbatim so
//! an unresolved placeholder stays visible instead of silently vanishing.

mod engine;
mod parser;

pub use engine::{replace_variables, resolve_request_variables};
pub use parser::{VariableReference, parse_variables};
