//! Configuration validation utilities.
//!
//! This module provides range checks for simulation parameters. The core
//! calls these before touching any state, so a rejected configuration never
//! leaves a half-applied turn behind.

use crate::config::{ConfigError, Parameters};

/// Validate simulation parameters against their permitted ranges
///
/// Checks for:
/// - `county_size` of at least 1 (an empty county has nowhere to graze)
/// - Finite, non-negative `glen_growth_rate` (below 1 is allowed but logged)
/// - `sheep_greed` and `sheep_reproduction_rate` within [0, 1]
///
/// Integer fields are non-negative by type. Strategy names are resolved
/// separately by `Strategy::from_name`.
///
/// # Examples
/// ```
/// use grazesim::config::Parameters;
/// use grazesim::utils::validation::validate_parameters;
///
/// assert!(validate_parameters(&Parameters::default()).is_ok());
///
/// let greedy = Parameters { sheep_greed: 1.5, ..Parameters::default() };
/// assert!(validate_parameters(&greedy).is_err());
/// ```
pub fn validate_parameters(params: &Parameters) -> Result<(), ConfigError> {
    if params.county_size < 1 {
        return Err(ConfigError::OutOfRange {
            field: "county_size",
            value: params.county_size.to_string(),
            expected: ">= 1",
        });
    }

    validate_finite("glen_growth_rate", params.glen_growth_rate)?;
    if params.glen_growth_rate < 0.0 {
        return Err(ConfigError::OutOfRange {
            field: "glen_growth_rate",
            value: params.glen_growth_rate.to_string(),
            expected: ">= 0",
        });
    }
    if params.glen_growth_rate < 1.0 {
        log::warn!(
            "glen_growth_rate {} is below 1: glens will wither even when ungrazed",
            params.glen_growth_rate
        );
    }

    validate_unit_interval("sheep_greed", params.sheep_greed)?;
    validate_unit_interval("sheep_reproduction_rate", params.sheep_reproduction_rate)?;

    Ok(())
}

/// Validate that a probability-like value lies in [0, 1]
pub fn validate_unit_interval(field: &'static str, value: f64) -> Result<(), ConfigError> {
    validate_finite(field, value)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::OutOfRange {
            field,
            value: value.to_string(),
            expected: "between 0 and 1",
        });
    }
    Ok(())
}

fn validate_finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_nan() {
        return Err(ConfigError::NotANumber { field });
    }
    if value.is_infinite() {
        return Err(ConfigError::OutOfRange {
            field,
            value: value.to_string(),
            expected: "a finite number",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parameters_are_valid() {
        assert!(validate_parameters(&Parameters::default()).is_ok());
    }

    #[test]
    fn test_empty_county_rejected() {
        let params = Parameters { county_size: 0, ..Parameters::default() };
        assert!(matches!(
            validate_parameters(&params),
            Err(ConfigError::OutOfRange { field: "county_size", .. })
        ));
    }

    #[test]
    fn test_nan_rejected() {
        let params = Parameters { sheep_greed: f64::NAN, ..Parameters::default() };
        assert_eq!(
            validate_parameters(&params),
            Err(ConfigError::NotANumber { field: "sheep_greed" })
        );
    }

    #[test]
    fn test_probability_bounds() {
        assert!(validate_unit_interval("p", 0.0).is_ok());
        assert!(validate_unit_interval("p", 1.0).is_ok());
        assert!(validate_unit_interval("p", -0.01).is_err());
        assert!(validate_unit_interval("p", 1.01).is_err());
        assert!(validate_unit_interval("p", f64::INFINITY).is_err());
    }

    #[test]
    fn test_growth_rate_bounds() {
        let withering = Parameters { glen_growth_rate: 0.5, ..Parameters::default() };
        assert!(validate_parameters(&withering).is_ok());

        let negative = Parameters { glen_growth_rate: -1.0, ..Parameters::default() };
        assert!(validate_parameters(&negative).is_err());
    }
}
