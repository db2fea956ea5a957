use thiserror::Error;

/// Core error types for the helpers
#[derive(Debug, Error)]
pub enum Error {
    /// Substring request ran past the end of the string
    #[error("Range error: {location}+{length} exceeds length {len}")]
    Range {
        location: usize,
        length: usize,
        len: usize,
    },

    /// Decimal division with a zero divisor
    #[error("Division by zero")]
    DivideByZero,

    /// Decimal arithmetic left the representable range
    #[error("Decimal overflow in {0}")]
    Overflow(&'static str),

    /// Text could not be read as a decimal number
    #[error("Invalid decimal: {0}")]
    InvalidDecimal(String),

    /// Offscreen canvas could not be created
    #[error("Render failure: {0}")]
    Render(String),

    /// Image decode/encode failed
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Screen hierarchy is deeper than the walk allows (most likely a cycle)
    #[error("Screen hierarchy exceeds {limit} levels")]
    RecursionLimitExceeded { limit: usize },

    /// Nothing on screen to present from
    #[error("No visible screen to present from")]
    NoVisibleScreen,

    /// Host refused a present/dismiss transition
    #[error("Presentation error: {0}")]
    Presentation(String),

    /// The main queue's loop is gone
    #[error("Main queue closed")]
    MainQueueClosed,

    /// Record has no to-many relationship with this name
    #[error("Unknown relationship: {0}")]
    UnknownRelationship(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<nix::errno::Errno> for Error {
    fn from(errno: nix::errno::Errno) -> Self {
        Self::Io(std::io::Error::from(errno))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_message_names_bounds() {
        let err = Error::Range {
            location: 3,
            length: 4,
            len: 5,
        };
        assert_eq!(err.to_string(), "Range error: 3+4 exceeds length 5");
    }

    #[test]
    fn test_errno_becomes_io() {
        let err = Error::from(nix::errno::Errno::ENOENT);
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_recursion_limit_message() {
        let err = Error::RecursionLimitExceeded { limit: 64 };
        assert!(err.to_string().contains("64"));
    }
}
