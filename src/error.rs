//! Error types for inferir operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;

/// Main error type for inferir operations.
///
/// Covers the three fatal failure classes of the analysis pipeline
/// (unreadable input, malformed input shape, mismatched draw/table
/// dimensions) plus invalid model configuration. Convergence problems
/// reported by the fitting backend are not errors; see
/// [`crate::model::ConvergenceWarning`].
///
/// # Examples
///
/// ```
/// use inferir::error::InferirError;
///
/// let err = InferirError::Shape {
///     expected: "4 draw columns".to_string(),
///     actual: "5".to_string(),
/// };
/// assert!(err.to_string().contains("Shape mismatch"));
/// ```
#[derive(Debug)]
pub enum InferirError {
    /// Input file unreadable or missing.
    Io(std::io::Error),

    /// Malformed source data: wrong class columns, ragged region tables,
    /// or a region index outside the fixed 1..=26 vocabulary.
    Schema {
        /// Description of the malformation
        message: String,
    },

    /// Mismatched dimensions between a posterior-draw matrix and the
    /// observation table it was fitted on.
    Shape {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// Invalid model configuration (formula, prior, or sampler settings).
    InvalidConfig {
        /// Setting name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for InferirError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferirError::Io(e) => write!(f, "I/O error: {e}"),
            InferirError::Schema { message } => {
                write!(f, "Malformed source: {message}")
            }
            InferirError::Shape { expected, actual } => {
                write!(f, "Shape mismatch: expected {expected}, got {actual}")
            }
            InferirError::InvalidConfig {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid configuration: {param} = {value}, expected {constraint}"
                )
            }
            InferirError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for InferirError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InferirError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for InferirError {
    fn from(err: std::io::Error) -> Self {
        InferirError::Io(err)
    }
}

impl From<&str> for InferirError {
    fn from(msg: &str) -> Self {
        InferirError::Other(msg.to_string())
    }
}

impl From<String> for InferirError {
    fn from(msg: String) -> Self {
        InferirError::Other(msg)
    }
}

impl InferirError {
    /// Create a schema error with descriptive context.
    #[must_use]
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }

    /// Create a shape mismatch error with descriptive context.
    #[must_use]
    pub fn shape(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::Shape {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create an empty input error.
    #[must_use]
    pub fn empty_input(context: &str) -> Self {
        Self::Other(format!("empty input: {context}"))
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, InferirError>;
