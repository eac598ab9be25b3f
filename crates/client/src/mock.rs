//! In-memory connection double for unit tests

use crate::connection::Connection;
use forgelink_core::{Error, Result};
use parking_lot::Mutex;
use std::collections::VecDeque;

enum Scripted {
    Body(String),
    Failure(String),
}

/// Scripted connection: queued responses, recorded requests
#[derive(Default)]
pub struct MockConnection {
    responses: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<String>>,
    bodies_store: Mutex<Vec<String>>,
}

impl MockConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response body for the next request
    pub fn push_response(&self, body: &str) {
        self.responses
            .lock()
            .push_back(Scripted::Body(body.to_string()));
    }

    /// Queue a transport failure for the next request
    pub fn push_error(&self, message: &str) {
        self.responses
            .lock()
            .push_back(Scripted::Failure(message.to_string()));
    }

    /// Requests seen so far, as "METHOD path" (bodies recorded separately)
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    /// Bodies sent with POST/PUT requests, in order
    pub fn bodies(&self) -> Vec<String> {
        self.bodies_store.lock().clone()
    }

    fn next(&self, method: &str, path: &str) -> Result<String> {
        self.requests.lock().push(format!("{method} {path}"));
        match self.responses.lock().pop_front() {
            Some(Scripted::Body(body)) => Ok(body),
            Some(Scripted::Failure(message)) => Err(Error::Transport(message)),
            None => Ok(String::new()),
        }
    }
}

impl Connection for MockConnection {
    fn get(&self, path: &str) -> Result<String> {
        self.next("GET", path)
    }

    fn post(&self, path: &str, body: &str) -> Result<String> {
        self.bodies_store.lock().push(body.to_string());
        self.next("POST", path)
    }

    fn put(&self, path: &str, body: &str) -> Result<String> {
        self.bodies_store.lock().push(body.to_string());
        self.next("PUT", path)
    }

    fn delete(&self, path: &str, _body: &str) -> Result<bool> {
        self.next("DELETE", path).map(|_| true)
    }
}
