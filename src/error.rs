//! # Error Types
//!
//! This module defines error types used throughout the recap crate.

use thiserror::Error;

/// Main error type for recap operations
#[derive(Debug, Error)]
pub enum RecapError {
    /// A pasted order dump could not be parsed or was empty
    #[error("Order dump error: {0}")]
    OrderDump(String),

    /// Report rendering or persistence error
    #[error("Report error: {0}")]
    Report(String),

    /// Server-level errors (bind, serve)
    #[error("Server error: {0}")]
    Server(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
