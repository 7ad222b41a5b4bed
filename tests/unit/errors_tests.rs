/*!
 * Tests for error types
 */

use stylecast::errors::{AppError, ConversionError, ParseFailure, ProviderError};

#[test]
fn test_providerError_display_shouldIncludeDetails() {
    let err = ProviderError::ApiError {
        status_code: 429,
        message: "Too many requests".to_string(),
    };
    assert_eq!(err.to_string(), "API responded with error: 429 - Too many requests");
    assert_eq!(
        ProviderError::EmptyResponse.to_string(),
        "API response contained no completion"
    );
}

#[test]
fn test_conversionError_fromProvider_shouldBeTransport() {
    let err: ConversionError = ProviderError::ConnectionError("refused".to_string()).into();

    assert!(matches!(err, ConversionError::Transport(_)));
    assert_eq!(err.to_string(), "Connection error: refused");
}

#[test]
fn test_conversionError_validation_shouldDisplayMessageOnly() {
    let err = ConversionError::validation("Missing required fields: text");
    assert_eq!(err.to_string(), "Missing required fields: text");
}

#[test]
fn test_appError_configMissing_shouldNameSetting() {
    let missing = AppError::ConfigMissing("OPENAI_API_KEY".to_string());
    assert_eq!(missing.to_string(), "Configuration missing: OPENAI_API_KEY");
}

#[test]
fn test_parseFailure_display_shouldNameProblem() {
    assert!(ParseFailure::MissingClosingSentinel.to_string().contains("closing sentinel"));
}
