//! HTTP request handlers for the Axum web server.
//!
//! Each submodule contains handlers for one API area. Handlers are thin
//! wrappers that delegate to `PortalCore`.

pub mod admin;
pub mod auth;
pub mod client;
pub mod files;
pub mod service;

use serde::Serialize;

/// `{"message": ...}` acknowledgement body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
