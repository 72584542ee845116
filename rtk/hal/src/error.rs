//! Common error types for HAL operations

use core::fmt;

/// HAL operation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalError {
    /// Invalid parameter provided
    InvalidParameter,
    /// Configuration error
    ConfigurationError,
}

impl fmt::Display for HalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter => write!(f, "invalid parameter"),
            Self::ConfigurationError => write!(f, "configuration error"),
        }
    }
}

impl core::error::Error for HalError {}

#[cfg(feature = "defmt")]
impl defmt::Format for HalError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InvalidParameter => defmt::write!(fmt, "InvalidParameter"),
            Self::ConfigurationError => defmt::write!(fmt, "ConfigurationError"),
        }
    }
}

/// Result type for HAL operations
pub type HalResult<T> = Result<T, HalError>;
