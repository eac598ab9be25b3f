//! Transport abstraction
//!
//! The client core never talks HTTP itself: every operation goes through the
//! [`Connection`] trait so the transport (auth scheme, TLS, timeouts) can be
//! swapped or mocked without touching the orchestration layer.

use forgelink_core::Result;

/// Injected transport capability
///
/// Paths are relative to the service's API root (e.g. `artifacts/42`).
/// Bodies are UTF-8 JSON text in both directions.
///
/// Thread safety: implementations must be safe to share across threads
/// (requires Send + Sync).
pub trait Connection: Send + Sync {
    /// Issue a GET request and return the response body
    ///
    /// # Errors
    ///
    /// Returns an error when the transport fails or the service responds
    /// with a non-success status.
    fn get(&self, path: &str) -> Result<String>;

    /// Issue a POST request with a JSON body and return the response body
    ///
    /// # Errors
    ///
    /// Returns an error when the transport fails or the service responds
    /// with a non-success status.
    fn post(&self, path: &str, body: &str) -> Result<String>;

    /// Issue a PUT request with a JSON body and return the response body
    ///
    /// # Errors
    ///
    /// Returns an error when the transport fails or the service responds
    /// with a non-success status.
    fn put(&self, path: &str, body: &str) -> Result<String>;

    /// Issue a DELETE request, returning whether the service acknowledged it
    ///
    /// The body is part of the wire contract but transports may ignore it;
    /// the service accepts empty delete bodies.
    ///
    /// # Errors
    ///
    /// Returns an error when the transport fails or the service responds
    /// with a non-success status.
    fn delete(&self, path: &str, body: &str) -> Result<bool>;
}
