//! Request and response bodies of the JSON API.

pub mod chat;
pub mod file;
pub mod message;
pub mod project;
pub mod prompt;

use validator::ValidationError;

/// Rejects strings that are empty after trimming.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}
