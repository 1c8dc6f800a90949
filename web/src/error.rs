use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::*;

/// Errors surfaced to HTTP clients.
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// The connection cannot carry a body that is flushed frame by frame,
    /// so an event stream cannot be served over it.
    UnsupportedTransport,
}

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        match self {
            Error::UnsupportedTransport => write!(fmt, "Streaming unsupported!"),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::UnsupportedTransport => {
                warn!("Rejecting event stream request: {self}");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
            }
        }
    }
}
