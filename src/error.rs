use thiserror::Error;

pub type Result<T> = std::result::Result<T, OptionsError>;

/// Stable error class reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    NotSupported,
}

/// Failure of a tokenize or apply call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not supported: {0}")]
    NotSupported(String),
}

impl OptionsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OptionsError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            OptionsError::NotSupported(_) => ErrorKind::NotSupported,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            OptionsError::InvalidArgument(msg) | OptionsError::NotSupported(msg) => msg,
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        self.kind() == ErrorKind::InvalidArgument
    }

    pub fn is_not_supported(&self) -> bool {
        self.kind() == ErrorKind::NotSupported
    }
}

/// Fault raised while converting a single raw value. Appliers catch it at
/// the key boundary and turn it into an [`OptionsError`] naming the key.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("invalid boolean for {field}: {value}")]
    InvalidBool { field: String, value: String },

    #[error("invalid number: {0}")]
    InvalidNumber(String),

    #[error("out of range: {0}")]
    OutOfRange(String),

    #[error("unknown {kind}: {literal}")]
    UnknownEnum { kind: &'static str, literal: String },

    #[error("expected {expected} ':'-separated fields, got {value}")]
    InvalidArity { expected: usize, value: String },

    #[error("invalid type: {0}")]
    InvalidType(String),

    #[error("not supported")]
    NotSupported,

    #[error("{0}")]
    Nested(OptionsError),
}

impl ConvertError {
    /// Wraps this fault into the caller-facing error for `key`.
    pub fn for_key(self, key: &str) -> OptionsError {
        match self {
            ConvertError::NotSupported => OptionsError::NotSupported(key.to_string()),
            ConvertError::Nested(inner) => match inner {
                OptionsError::InvalidArgument(msg) => {
                    OptionsError::InvalidArgument(format!("error parsing {}: {}", key, msg))
                }
                OptionsError::NotSupported(msg) => {
                    OptionsError::NotSupported(format!("{} in {}", msg, key))
                }
            },
            other => OptionsError::InvalidArgument(format!("error parsing {}: {}", key, other)),
        }
    }
}
