//! Brand/model name rules.
//!
//! Names are trimmed before storage and compared case-insensitively;
//! the database backs this with unique indexes on `LOWER(name)`.

use crate::error::CoreError;

/// Maximum stored length for brand and model names.
pub const MAX_NAME_LEN: usize = 50;

/// Trim and validate a brand or model name, returning the canonical
/// form to store.
pub fn normalize_name(raw: &str) -> Result<String, CoreError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(CoreError::Validation("Name must not be blank".into()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(name.to_string())
}

/// Case-insensitive name equality, matching the database collation rule.
pub fn names_equal(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}
