//! Input validation helpers shared by the create/update DTOs.

use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::CoreError;

/// Reject strings that are empty or whitespace only.
///
/// Used as `#[validate(custom(function = "atlas_core::validation::non_blank"))]`.
pub fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

/// Run `validator` checks and convert failures into [`CoreError::InvalidInput`].
pub fn validate_input<T: Validate>(input: &T) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|errors| CoreError::InvalidInput(describe(&errors)))
}

fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|k| k.to_string())
        .collect();
    fields.sort();
    format!("Invalid or missing field(s): {}", fields.join(", "))
}
