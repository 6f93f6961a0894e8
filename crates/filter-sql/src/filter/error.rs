use thiserror::Error;

/// Reasons a filter expression cannot be compiled.
///
/// Every variant is a client error: the same input always fails the same
/// way, so callers reject the filter string instead of retrying.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// The identifier is not in the active catalog.
    #[error("Unknown identifier: {0}")]
    UnknownIdentifier(String),

    /// The identifier exists but does not support the operator.
    #[error("Operator '{operator}' is not allowed on '{identifier}'")]
    DisallowedOperator {
        identifier: String,
        operator: String,
    },

    #[error("Invalid number of arguments for {function}: expected {expected}, got {actual}")]
    ArityMismatch {
        function: String,
        expected: usize,
        actual: usize,
    },

    /// A constant's runtime type does not match the identifier's type.
    #[error("Type mismatch for '{identifier}': expected {expected}, got {actual}")]
    TypeMismatch {
        identifier: String,
        expected: String,
        actual: String,
    },

    #[error("Unsupported function: {0}")]
    UnsupportedFunction(String),

    /// `in` or `size` applied to something that is not an allowed collection.
    #[error("Invalid collection identifier for {function}: {identifier}")]
    InvalidCollectionTarget {
        function: String,
        identifier: String,
    },

    /// An operand has the wrong shape, e.g. a list where an identifier belongs.
    #[error("Invalid operand for {function}: expected {expected}")]
    InvalidOperand {
        function: String,
        expected: &'static str,
    },

    #[error("Invalid timestamp for '{identifier}': {reason}")]
    InvalidTimestamp { identifier: String, reason: String },
}

impl FilterError {
    /// All compile failures are caused by the filter text itself.
    pub fn is_client_error(&self) -> bool {
        true
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;
