//! Group name sanitization

use regex::Regex;
use std::sync::LazyLock;

/// Matches every character the host runtime does not accept in group names
static INVALID_GROUP_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\-]").unwrap());

/// Sanitize a raw group name for the inventory
///
/// Replaces anything outside `[A-Za-z0-9_-]` with `_`, lower-cases the
/// result, then turns `-` into `_`. The output only contains `[a-z0-9_]`
/// and sanitizing twice gives the same result as once.
pub fn sanitize_group_name(name: &str) -> String {
    INVALID_GROUP_CHARS
        .replace_all(name, "_")
        .to_lowercase()
        .replace('-', "_")
}
