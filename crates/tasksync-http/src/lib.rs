//! TaskSync HTTP - REST client for the todo service
//!
//! Provides:
//! - A thin JSON client over the `/todos` resource
//! - An [`IRemoteStore`](tasksync_core::ports::IRemoteStore) adapter for the engine
//!
//! ## Modules
//!
//! - [`client`] - HTTP client with endpoint construction and status mapping
//! - [`store`] - Remote store adapter wrapping the client

pub mod client;
pub mod store;

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to the todo service
#[derive(Debug, Error)]
pub enum HttpError {
    /// The requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// A server-side error occurred (5xx)
    #[error("Server error {status}: {body}")]
    ServerError {
        /// HTTP status code
        status: u16,
        /// Response body, possibly empty
        body: String,
    },

    /// Any other non-success status
    #[error("Unexpected status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, possibly empty
        body: String,
    },

    /// A network-level error occurred
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl HttpError {
    /// Maps a non-success status and its body to an error
    pub fn from_status(status: StatusCode, body: String) -> Self {
        if status == StatusCode::NOT_FOUND {
            HttpError::NotFound(body)
        } else if status.is_server_error() {
            HttpError::ServerError {
                status: status.as_u16(),
                body,
            }
        } else {
            HttpError::Status {
                status: status.as_u16(),
                body,
            }
        }
    }
}
