//! Errors that carry only a message and a source location.

macro_rules! message_error {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
        #[display("{}: {} at line {} in {}", $label, message, line, file)]
        pub struct $name {
            /// Human-readable description of the failure
            pub message: String,
            /// Line number where the error was created
            pub line: u32,
            /// File where the error was created
            pub file: &'static str,
        }

        impl $name {
            /// Create the error at the caller's location.
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
    };
}

message_error!(
    /// Malformed or missing required input. The job never starts.
    ///
    /// # Examples
    ///
    /// ```
    /// use fresco_error::ValidationError;
    ///
    /// let err = ValidationError::new("script has no narration segments");
    /// assert!(err.message.contains("narration"));
    /// assert!(format!("{}", err).starts_with("Validation Error"));
    /// ```
    ValidationError,
    "Validation Error"
);

message_error!(
    /// Configuration could not be loaded or is out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// use fresco_error::ConfigError;
    ///
    /// let err = ConfigError::new("Missing required field: paths.publish_dir");
    /// assert!(err.message.contains("Missing required"));
    /// ```
    ConfigError,
    "Configuration Error"
);

message_error!(
    /// Transport failure talking to a provider or downloading media.
    HttpError,
    "HTTP Error"
);

message_error!(
    /// JSON could not be serialized or parsed.
    ///
    /// # Examples
    ///
    /// ```
    /// use fresco_error::JsonError;
    ///
    /// let err = JsonError::new("invalid script.json: expected value at line 1");
    /// assert!(format!("{}", err).contains("JSON Error"));
    /// ```
    JsonError,
    "JSON Error"
);
