//! Common test utilities for comment-expander integration tests

#[allow(dead_code)]
pub mod fixtures;

#[allow(unused_imports)]
pub use fixtures::*;

use std::sync::Arc;

use comment_expander::{ClientConfig, ExpansionLimits, HttpClient, MoreExpander};
use wiremock::MockServer;

/// Expander talking to `server` with the given endpoint limits
pub fn expander_for(server: &MockServer, limits: ExpansionLimits) -> MoreExpander<HttpClient> {
    let config = ClientConfig {
        base_url: server.uri(),
        limits,
        ..ClientConfig::default()
    };
    let client = HttpClient::new(&config).expect("failed to build client");
    MoreExpander::new(Arc::new(client), config.limits)
}
