//! Domain error types
//!
//! This module defines error types specific to domain values: identifier
//! parsing, title validation and filter names.

use thiserror::Error;

/// Errors that can occur in domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// ID parsing error or a reserved/non-positive identifier
    #[error("Invalid ID format: {0}")]
    InvalidId(String),

    /// A title that is empty after trimming whitespace
    #[error("Title must not be empty")]
    EmptyTitle,

    /// Unknown filter name
    #[error("Invalid filter: {0} (expected all, active or completed)")]
    InvalidFilter(String),
}
