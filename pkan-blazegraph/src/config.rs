//! Client configuration
//!
//! [`BlazegraphConfig`] is plain serde data so host applications can embed
//! it in their own config files; every field has a default.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{BlazegraphError, Result};
use crate::namespace::NamespaceProperties;

/// Default Blazegraph service root
pub const BLAZEGRAPH_BASE: &str = "http://localhost:9999/blazegraph";

/// Named graph that [`SparqlEndpoint::insert`](crate::SparqlEndpoint::insert) writes into
pub const DEFAULT_INSERT_GRAPH: &str = "http://example.com/";

/// Settings for a [`Tripelstore`](crate::Tripelstore) and the endpoint
/// clients it hands out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlazegraphConfig {
    /// Service root, e.g. `http://localhost:9999/blazegraph`
    pub base_url: String,
    /// TCP connect timeout; unset leaves the transport default
    pub connect_timeout_ms: Option<u64>,
    /// Whole-request timeout; unset means no timeout
    pub request_timeout_ms: Option<u64>,
    pub user_agent: String,
    pub insert_graph: String,
    /// Validate terms before `insert` substitutes them into an update
    pub strict_terms: bool,
    pub namespace_properties: NamespaceProperties,
}

impl Default for BlazegraphConfig {
    fn default() -> Self {
        Self {
            base_url: BLAZEGRAPH_BASE.to_string(),
            connect_timeout_ms: None,
            request_timeout_ms: None,
            user_agent: format!("pkan-blazegraph/{}", env!("CARGO_PKG_VERSION")),
            insert_graph: DEFAULT_INSERT_GRAPH.to_string(),
            strict_terms: false,
            namespace_properties: NamespaceProperties::default(),
        }
    }
}

impl BlazegraphConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::default().with_base_url(base_url)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout_ms = Some(duration_ms(timeout));
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_ms = Some(duration_ms(timeout));
        self
    }

    pub fn with_insert_graph(mut self, graph: impl Into<String>) -> Self {
        self.insert_graph = graph.into();
        self
    }

    pub fn with_strict_terms(mut self, strict: bool) -> Self {
        self.strict_terms = strict;
        self
    }

    pub fn with_namespace_properties(mut self, properties: NamespaceProperties) -> Self {
        self.namespace_properties = properties;
        self
    }

    /// Base URL without trailing slashes.
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Build the HTTP client described by this configuration.
    pub fn build_client(&self) -> Result<Client> {
        let mut builder = Client::builder().user_agent(&self.user_agent);
        if let Some(ms) = self.connect_timeout_ms {
            builder = builder.connect_timeout(Duration::from_millis(ms));
        }
        if let Some(ms) = self.request_timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        builder
            .build()
            .map_err(|e| BlazegraphError::Config(format!("Failed to create HTTP client: {e}")))
    }
}

fn duration_ms(timeout: Duration) -> u64 {
    u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX)
}
