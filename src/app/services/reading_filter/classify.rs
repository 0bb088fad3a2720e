//! Classification of single raw odometer values

use crate::app::models::ValidityVerdict;
use crate::config::ReadingFilterConfig;

/// Parse an odometer string into a finite number
///
/// Surrounding whitespace is ignored. `NaN` and infinities are not numbers
/// for our purposes.
pub fn parse_odometer(raw_value: &str) -> Option<f64> {
    raw_value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Classify a raw odometer value against the configured bounds
///
/// # Returns
///
/// The verdict plus the parsed value when the string was numeric
pub fn classify_raw_value(
    raw_value: &str,
    config: &ReadingFilterConfig,
) -> (ValidityVerdict, Option<f64>) {
    let trimmed = raw_value.trim();
    if trimmed.is_empty() {
        return (ValidityVerdict::ZeroOrEmpty, None);
    }

    let Some(value) = parse_odometer(trimmed) else {
        return (ValidityVerdict::NonNumeric, None);
    };

    // "0", "0.0" and "000" all mean nobody read the odometer
    let verdict = if value == 0.0 {
        ValidityVerdict::ZeroOrEmpty
    } else if value < config.min_valid_km {
        ValidityVerdict::TooLow
    } else if value > config.max_valid_km {
        ValidityVerdict::TooHigh
    } else {
        ValidityVerdict::Valid
    };

    (verdict, Some(value))
}
