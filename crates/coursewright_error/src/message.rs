//! Errors that carry only a message and the place they were raised.

macro_rules! message_error {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            /// Error message
            pub message: String,
            /// Line number where the error occurred
            pub line: u32,
            /// File where the error occurred
            pub file: &'static str,
        }

        impl $name {
            #[doc = concat!("Create a new ", stringify!($name), " at the caller's location.")]
            #[track_caller]
            pub fn new(message: impl Into<String>) -> Self {
                let location = std::panic::Location::caller();
                Self {
                    message: message.into(),
                    line: location.line(),
                    file: location.file(),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(
                    f,
                    concat!($label, ": {} at line {} in {}"),
                    self.message, self.line, self.file
                )
            }
        }

        impl std::error::Error for $name {}
    };
}

message_error!(
    /// Failure reported by a text-generation backend.
    ///
    /// Transport failures and malformed response bodies surface as this type.
    /// The structured generator never retries them.
    ///
    /// ```
    /// use coursewright_error::BackendError;
    ///
    /// let err = BackendError::new("Backend service unavailable");
    /// assert!(err.to_string().starts_with("Backend Error: Backend service unavailable"));
    /// ```
    BackendError,
    "Backend Error"
);

message_error!(
    /// Missing or malformed configuration, including unset API keys.
    ConfigError,
    "Configuration Error"
);

message_error!(
    /// Workflow input rejected before any backend call.
    ValidationError,
    "Validation Error"
);
