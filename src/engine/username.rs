// ==========================================
// PIAR Portal - username generation
// ==========================================
// "Maria Fernanda Lopez" -> "mlopez", then "mlopez2", "mlopez3", ...
// Deterministic for a given set of existing usernames; depends on
// registration order.
// ==========================================

use std::collections::HashSet;

/// Base handle for a display name: lowercase, first initial + last word
/// when there are several words, the single word otherwise.
///
/// Returns `None` for a blank name.
pub fn base_username(display_name: &str) -> Option<String> {
    let lowered = display_name.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();

    match words.as_slice() {
        [] => None,
        [single] => Some((*single).to_string()),
        [first, .., last] => {
            let initial = first.chars().next()?;
            Some(format!("{}{}", initial, last))
        }
    }
}

/// Unique handle for `display_name` given the usernames already taken.
///
/// Collisions get an integer suffix starting at 2.
pub fn generate_username(display_name: &str, existing: &HashSet<String>) -> Option<String> {
    let base = base_username(display_name)?;
    if !existing.contains(&base) {
        return Some(base);
    }

    (2u32..)
        .map(|n| format!("{}{}", base, n))
        .find(|candidate| !existing.contains(candidate))
}
