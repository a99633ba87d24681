#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

//! # SPS Core
//!
//! Foundation types for the SPS synchronous SPI slave engine: bus line
//! levels and samples, construction-time configuration, and the common
//! error type shared by every crate in the workspace.

use core::fmt;

pub mod config;
pub mod line;

pub use config::*;
pub use line::*;

/// SPS crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type used throughout the SPS workspace
pub type SlaveResult<T> = Result<T, SlaveError>;

/// Error types for SPS operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlaveError {
    /// Word width outside the supported range
    InvalidWordBits,
    /// A bus pin could not be read or driven
    Pin,
}

impl fmt::Display for SlaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlaveError::InvalidWordBits => write!(f, "word width outside the supported range"),
            SlaveError::Pin => write!(f, "bus pin access failed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SlaveError {}

#[cfg(feature = "defmt")]
impl defmt::Format for SlaveError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            SlaveError::InvalidWordBits => defmt::write!(fmt, "InvalidWordBits"),
            SlaveError::Pin => defmt::write!(fmt, "Pin"),
        }
    }
}
