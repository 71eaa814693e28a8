//! Shared utilities: parameter validation.

pub mod validation;

pub use validation::{validate_parameters, validate_unit_interval};
