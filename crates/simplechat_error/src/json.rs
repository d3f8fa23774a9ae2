//! JSON input-shape error types.

/// Specific JSON failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum JsonErrorKind {
    /// Text could not be parsed even after repair attempts
    #[display("JSON parse failed: {}", _0)]
    Parse(String),
    /// A JSON object was required at top level
    #[display("Expected a JSON object at top-level, got {}", _0)]
    NotAnObject(String),
    /// Value could not be serialized back to text
    #[display("JSON serialization failed: {}", _0)]
    Serialize(String),
    /// An internal repair pattern failed to compile
    #[display("Invalid repair pattern: {}", _0)]
    Pattern(String),
}

/// JSON error with source location.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON Error: {} at line {} in {}", kind, line, file)]
pub struct JsonError {
    /// The kind of error that occurred
    pub kind: JsonErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl JsonError {
    /// Create a new JsonError at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use simplechat_error::{JsonError, JsonErrorKind};
    ///
    /// let err = JsonError::new(JsonErrorKind::NotAnObject("array".to_string()));
    /// assert!(format!("{}", err).contains("array"));
    /// ```
    #[track_caller]
    pub fn new(kind: JsonErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &JsonErrorKind {
        &self.kind
    }
}
