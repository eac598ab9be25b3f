//! HTTP transport over ureq

use crate::connection::Connection;
use forgelink_core::{Error, Result};
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Blocking REST transport authenticated with an access key header
///
/// One agent is constructed per connection; requests reuse its configuration
/// (global timeout included). No retries, no pooling tuning.
pub struct RestConnection {
    agent: ureq::Agent,
    base_url: String,
    access_key: String,
}

impl RestConnection {
    /// Connect to an API root with the default 60 second timeout
    ///
    /// `base_url` is the API root (e.g. `https://forge.example.test/api/`);
    /// a trailing slash is appended when missing.
    pub fn new(base_url: impl Into<String>, access_key: impl Into<String>) -> Self {
        Self::with_timeout(base_url, access_key, DEFAULT_TIMEOUT)
    }

    /// Connect with an explicit global timeout
    pub fn with_timeout(
        base_url: impl Into<String>,
        access_key: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            agent: ureq::Agent::new_with_config(config),
            base_url,
            access_key: access_key.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    fn read_body(
        response: &mut ureq::http::Response<ureq::Body>,
    ) -> Result<String> {
        response
            .body_mut()
            .read_to_string()
            .map_err(|e| Error::Transport(format!("failed to read response: {e}")))
    }
}

fn map_transport_error(error: ureq::Error, path: &str) -> Error {
    match error {
        ureq::Error::StatusCode(status) => Error::Http {
            status,
            path: path.to_string(),
        },
        other => Error::Transport(other.to_string()),
    }
}

impl Connection for RestConnection {
    fn get(&self, path: &str) -> Result<String> {
        tracing::debug!(target: "forgelink::rest", method = "GET", path, "request");
        let mut response = self
            .agent
            .get(&self.url(path))
            .header("X-Auth-AccessKey", &self.access_key)
            .header("Content-Type", "application/json; charset=UTF-8")
            .call()
            .map_err(|e| map_transport_error(e, path))?;
        Self::read_body(&mut response)
    }

    fn post(&self, path: &str, body: &str) -> Result<String> {
        tracing::debug!(target: "forgelink::rest", method = "POST", path, bytes = body.len(), "request");
        let mut response = self
            .agent
            .post(&self.url(path))
            .header("X-Auth-AccessKey", &self.access_key)
            .header("Accept", "application/json")
            .header("Content-Type", "application/json; charset=UTF-8")
            .send(body.as_bytes())
            .map_err(|e| map_transport_error(e, path))?;
        Self::read_body(&mut response)
    }

    fn put(&self, path: &str, body: &str) -> Result<String> {
        tracing::debug!(target: "forgelink::rest", method = "PUT", path, bytes = body.len(), "request");
        let mut response = self
            .agent
            .put(&self.url(path))
            .header("X-Auth-AccessKey", &self.access_key)
            .header("Content-Type", "application/json; charset=UTF-8")
            .send(body.as_bytes())
            .map_err(|e| map_transport_error(e, path))?;
        Self::read_body(&mut response)
    }

    fn delete(&self, path: &str, _body: &str) -> Result<bool> {
        tracing::debug!(target: "forgelink::rest", method = "DELETE", path, "request");
        self.agent
            .delete(&self.url(path))
            .header("X-Auth-AccessKey", &self.access_key)
            .header("Content-Type", "application/json; charset=UTF-8")
            .call()
            .map_err(|e| map_transport_error(e, path))?;
        Ok(true)
    }
}
