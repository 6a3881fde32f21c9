//! Generation errors

use thiserror::Error;

/// Errors surfaced by map generation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// A dimension or the room count is out of range, or a region ended up
    /// too small to hold a room
    #[error("invalid parameter {name}={value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: i64,
        reason: String,
    },

    /// The grid cannot be split into the requested number of regions
    #[error("cannot split a {width}x{height} grid into {room_num} regions: {reason}")]
    ConfigurationExhausted {
        room_num: i32,
        width: i32,
        height: i32,
        reason: String,
    },
}

impl GenerateError {
    pub(crate) fn invalid(name: &'static str, value: impl Into<i64>, reason: impl Into<String>) -> Self {
        GenerateError::InvalidParameter {
            name,
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error reports a bad input value
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, GenerateError::InvalidParameter { .. })
    }

    /// Check if this error reports a failed partition
    pub fn is_exhausted(&self) -> bool {
        matches!(self, GenerateError::ConfigurationExhausted { .. })
    }
}
