use validator::{Validate, ValidationErrors};

use crate::core::error::AppError;

/// Pick the first human-readable message out of a validation failure.
///
/// Field errors are visited in field-name order so the reported message is
/// stable across runs.
pub fn first_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(_, errs)| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| errors.to_string())
}

/// Run derive-based validation and map failures onto `AppError::Validation`
pub fn validate_dto<T: Validate>(dto: &T) -> Result<(), AppError> {
    dto.validate()
        .map_err(|e| AppError::Validation(first_message(&e)))
}
