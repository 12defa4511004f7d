//! ID generation utilities.

use uuid::Uuid;

/// Generates a new UUID v7 as a string.
///
/// This is the standard id format for every Quiver entity. UUID v7 embeds a
/// timestamp, so ids created later sort later.
#[must_use]
pub fn generate_id() -> String {
    Uuid::now_v7().to_string()
}
