pub mod category;
pub mod comment;
pub mod post;
pub mod user;
pub mod vote;

pub use category::*;
pub use comment::*;
pub use post::*;
pub use user::*;
pub use vote::*;

use validator::ValidationError;

/// Rejects strings that are empty once surrounding whitespace is removed.
pub(crate) fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank").with_message("must not be blank".into()))
    } else {
        Ok(())
    }
}
