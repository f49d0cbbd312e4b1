use thiserror::Error;

// Errors surfaced by a shipping call. Every variant is terminal for that call.
#[derive(Error, Debug)]
pub enum ShippingError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failure ({severity}): {description}")]
    Vendor {
        code: i64,
        severity: String,
        description: String,
    },

    #[error("Failure (0): Unknown error")]
    Unknown,

    #[error("HTTP error: {status} - {body}")]
    Http { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ShippingError {
    /// Vendor error code, `0` for every locally raised error.
    pub fn code(&self) -> i64 {
        match self {
            ShippingError::Vendor { code, .. } => *code,
            _ => 0,
        }
    }
}

// Raised by entity constructors and setters when a vendor constraint is violated
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} value too long: {len} characters, at most {max} allowed")]
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("{field} is invalid: {reason}")]
    Invalid { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, ShippingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_error_message() {
        let err = ShippingError::Vendor {
            code: 120100,
            severity: "Hard".to_string(),
            description: "Missing or invalid shipper number".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failure (Hard): Missing or invalid shipper number"
        );
        assert_eq!(err.code(), 120100);
    }

    #[test]
    fn test_unknown_error_message() {
        assert_eq!(ShippingError::Unknown.to_string(), "Failure (0): Unknown error");
        assert_eq!(ShippingError::Unknown.code(), 0);
    }

    #[test]
    fn test_validation_error_converts() {
        let err: ShippingError = ValidationError::TooLong {
            field: "MonetaryValue",
            len: 16,
            max: 15,
        }
        .into();
        assert!(matches!(err, ShippingError::Validation(_)));
        assert!(err.to_string().contains("MonetaryValue value too long"));
    }
}
