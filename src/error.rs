//! Error types for property validation

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Grammar mismatch without a more specific diagnostic.
    #[error("invalid or unsupported values for a known CSS property")]
    InvalidValue,

    #[error("{message}")]
    Invalid { message: String },

    #[error("unknown property")]
    UnknownProperty,

    #[error("property {name} not supported yet")]
    UnsupportedProperty { name: String },

    #[error("no value")]
    NoValue,

    #[error("{message}")]
    Expansion { message: String },

    #[error("descriptor not supported")]
    DescriptorNotSupported,

    #[error("value of kind {found} stored for {property}, expected {expected}")]
    KindMismatch {
        property: String,
        expected: String,
        found: String,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },
}

pub type Result<T> = std::result::Result<T, ValidationError>;

impl ValidationError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    pub fn expansion(message: impl Into<String>) -> Self {
        Self::Expansion {
            message: message.into(),
        }
    }

    pub fn unsupported(name: impl Into<String>) -> Self {
        Self::UnsupportedProperty { name: name.into() }
    }

    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    /// True for plain grammar mismatches, as opposed to structural errors.
    pub fn is_grammar_mismatch(&self) -> bool {
        matches!(self, Self::InvalidValue)
    }
}

/// Turns a validator's `Option` into the generic invalid-value error.
pub trait OrInvalid<T> {
    fn or_invalid(self) -> Result<T>;
}

impl<T> OrInvalid<T> for Option<T> {
    fn or_invalid(self) -> Result<T> {
        self.ok_or(ValidationError::InvalidValue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValidationError::InvalidValue.to_string(),
            "invalid or unsupported values for a known CSS property"
        );
        assert_eq!(
            ValidationError::unsupported("cursor").to_string(),
            "property cursor not supported yet"
        );
        assert_eq!(
            ValidationError::expansion("expected 1 to 4 token components got 5").to_string(),
            "expected 1 to 4 token components got 5"
        );
    }

    #[test]
    fn test_or_invalid() {
        let missing: Option<u8> = None;
        assert!(missing.or_invalid().unwrap_err().is_grammar_mismatch());
        assert_eq!(Some(3).or_invalid().unwrap(), 3);
    }
}
