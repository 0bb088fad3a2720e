//! Tests for raw value classification

use crate::app::models::ValidityVerdict;
use crate::app::services::reading_filter::classify::{classify_raw_value, parse_odometer};
use crate::config::ReadingFilterConfig;

#[test]
fn test_classify_empty_and_zero() {
    let config = ReadingFilterConfig::default();

    assert_eq!(classify_raw_value("", &config).0, ValidityVerdict::ZeroOrEmpty);
    assert_eq!(classify_raw_value("   ", &config).0, ValidityVerdict::ZeroOrEmpty);
    assert_eq!(classify_raw_value("0", &config).0, ValidityVerdict::ZeroOrEmpty);
    assert_eq!(classify_raw_value(" 0 ", &config).0, ValidityVerdict::ZeroOrEmpty);
    assert_eq!(classify_raw_value("0.0", &config).0, ValidityVerdict::ZeroOrEmpty);
}

#[test]
fn test_classify_non_numeric() {
    let config = ReadingFilterConfig::default();

    for raw in ["N/A", "abc", "65O000", "655,000", "NaN", "inf", "-"] {
        let (verdict, value) = classify_raw_value(raw, &config);
        assert_eq!(verdict, ValidityVerdict::NonNumeric, "raw value {raw:?}");
        assert!(value.is_none());
    }
}

#[test]
fn test_classify_bounds() {
    let config = ReadingFilterConfig::default();

    assert_eq!(classify_raw_value("999", &config).0, ValidityVerdict::TooLow);
    assert_eq!(classify_raw_value("999.9", &config).0, ValidityVerdict::TooLow);
    assert_eq!(classify_raw_value("-5000", &config).0, ValidityVerdict::TooLow);
    assert_eq!(classify_raw_value("1000", &config).0, ValidityVerdict::Valid);
    assert_eq!(classify_raw_value("2000000", &config).0, ValidityVerdict::Valid);
    assert_eq!(classify_raw_value("2000001", &config).0, ValidityVerdict::TooHigh);
}

#[test]
fn test_classify_keeps_parsed_value() {
    let config = ReadingFilterConfig::default();

    let (verdict, value) = classify_raw_value("  655000 ", &config);
    assert_eq!(verdict, ValidityVerdict::Valid);
    assert_eq!(value, Some(655_000.0));

    // Out-of-range values still report what they parsed to
    let (verdict, value) = classify_raw_value("5000000", &config);
    assert_eq!(verdict, ValidityVerdict::TooHigh);
    assert_eq!(value, Some(5_000_000.0));
}

#[test]
fn test_classify_respects_custom_bounds() {
    let config = ReadingFilterConfig {
        min_valid_km: 10.0,
        max_valid_km: 500.0,
    };

    assert_eq!(classify_raw_value("50", &config).0, ValidityVerdict::Valid);
    assert_eq!(classify_raw_value("600", &config).0, ValidityVerdict::TooHigh);
}

#[test]
fn test_parse_odometer() {
    assert_eq!(parse_odometer("12345"), Some(12_345.0));
    assert_eq!(parse_odometer(" 12345.5 "), Some(12_345.5));
    assert_eq!(parse_odometer("0"), Some(0.0));
    assert_eq!(parse_odometer("twelve"), None);
    assert_eq!(parse_odometer("inf"), None);
}
