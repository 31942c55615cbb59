//! Tests for error construction, display and kind access.

use coursewright_error::{
    AccessError, AccessErrorKind, BackendError, ConfigError, CourseError, CourseErrorKind,
    GenerationError, GenerationErrorKind, HttpError, ShapeMismatch, ValidationError,
};

#[test]
fn test_location_is_recorded() {
    let err = BackendError::new("boom");
    assert!(err.file.ends_with("error_test.rs"));
    assert!(err.line > 0);
}

#[test]
fn test_message_errors_are_labelled() {
    assert!(
        ConfigError::new("OPENAI_API_KEY not set")
            .to_string()
            .starts_with("Configuration Error: OPENAI_API_KEY not set at line")
    );
    assert!(
        ValidationError::new("course title is empty")
            .to_string()
            .starts_with("Validation Error: course title is empty")
    );

    let err: CourseError = ConfigError::new("bad model").into();
    assert!(matches!(err.kind(), CourseErrorKind::Config(_)));
}

#[test]
fn test_generation_kind_accessor() {
    let err: CourseError = GenerationError::new(ShapeMismatch::NotAnArray.into()).into();
    assert_eq!(
        err.generation_kind(),
        Some(&GenerationErrorKind::ShapeMismatch(ShapeMismatch::NotAnArray))
    );

    let other: CourseError = HttpError::with_status(503, "unavailable").into();
    assert!(other.generation_kind().is_none());
    assert!(other.to_string().contains("503"));
}

#[test]
fn test_exhausted_retries_names_last_error() {
    let kind = GenerationErrorKind::ExhaustedRetries {
        attempts: 3,
        last_error: "summary not in json output".to_string(),
    };
    let message = kind.to_string();
    assert!(message.contains("3 attempt(s)"));
    assert!(message.contains("summary not in json output"));
}

#[test]
fn test_type_mismatch_names_target() {
    let kind = GenerationErrorKind::TypeMismatch {
        target: "alloc::vec::Vec<GeneratedUnit>".to_string(),
        message: "invalid type: string, expected a sequence".to_string(),
    };
    assert_eq!(
        kind.to_string(),
        "Output does not deserialize into alloc::vec::Vec<GeneratedUnit>: invalid type: string, expected a sequence"
    );
}

#[test]
fn test_access_messages() {
    let err: CourseError = AccessError::new(AccessErrorKind::NoCredits).into();
    assert!(err.to_string().contains("no credits"));
}
