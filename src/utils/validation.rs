//! Numeric validation for user-supplied dimensions
//!
//! Width and height come from free-form user input (text fields, CLI
//! arguments); everything here rejects bad values before any pixels move.

use crate::error::{EditorError, Result};

/// Validator for user-supplied image dimensions
pub struct DimensionValidator;

impl DimensionValidator {
    /// Validate a single dimension: positive and within the upper bound
    ///
    /// # Errors
    /// - `EditorError::Validation` for zero or oversized values
    pub fn validate_dimension(value: u32, name: &str, max: u32) -> Result<u32> {
        if value == 0 {
            return Err(EditorError::validation(format!(
                "{name} must be positive, got 0"
            )));
        }
        if value > max {
            return Err(EditorError::validation(format!(
                "{name} must be at most {max}, got {value}"
            )));
        }
        Ok(value)
    }

    /// Validate a resize target
    ///
    /// # Errors
    /// - `EditorError::Validation` when either dimension is zero or oversized
    pub fn validate_target(width: u32, height: u32, max: u32) -> Result<(u32, u32)> {
        Ok((
            Self::validate_dimension(width, "width", max)?,
            Self::validate_dimension(height, "height", max)?,
        ))
    }

    /// Parse a dimension from text input
    ///
    /// Non-numeric input is a validation error, not a panic; fields stay
    /// editable and state untouched.
    ///
    /// # Errors
    /// - `EditorError::Validation` for non-numeric, zero, or oversized input
    pub fn parse_dimension(text: &str, name: &str, max: u32) -> Result<u32> {
        let value: u32 = text.trim().parse().map_err(|_| {
            EditorError::validation(format!("{name} must be a whole number, got '{text}'"))
        })?;
        Self::validate_dimension(value, name, max)
    }
}
