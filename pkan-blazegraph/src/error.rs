//! Error types for triplestore operations

use bytes::Bytes;
use thiserror::Error;

use crate::response::HttpResponse;

/// Result type for triplestore operations
pub type Result<T> = std::result::Result<T, BlazegraphError>;

/// Errors raised by [`Tripelstore`](crate::Tripelstore) and
/// [`SparqlEndpoint`](crate::SparqlEndpoint).
///
/// Nothing is retried or recovered locally; every variant reaches the caller
/// with the remote response body attached where there is one.
#[derive(Debug, Error)]
pub enum BlazegraphError {
    /// Connection, DNS, timeout or body read failure
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The harvest source answered with something other than 200
    #[error("Harvest source unreachable: {}", lossy(.body))]
    HarvestSourceUnreachable { body: Bytes },

    /// Namespace creation answered with a status outside 200/201/409
    #[error("Namespace creation failed with status {status}: {}", lossy(.body))]
    NamespaceCreation { status: u16, body: Bytes },

    /// The bulk load POST answered with something other than 200
    #[error("Bulk load failed: {}", lossy(.body))]
    BulkLoad { body: Bytes },

    /// A query or update was rejected by the SPARQL endpoint
    #[error("SPARQL endpoint returned {status}: {}", lossy(.body))]
    Query { status: u16, body: Bytes },

    /// The endpoint answered, but not with SPARQL JSON results
    #[error("Invalid SPARQL results: {0}")]
    InvalidResults(#[from] serde_json::Error),

    /// An RDF term failed validation before being sent
    #[error("Invalid RDF term: {0}")]
    InvalidTerm(String),

    /// HTTP client could not be built from the configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BlazegraphError {
    /// Create an invalid term error
    pub fn invalid_term(msg: impl Into<String>) -> Self {
        Self::InvalidTerm(msg.into())
    }

    /// Build a `Query` error from a rejected endpoint response.
    pub(crate) fn query(resp: HttpResponse) -> Self {
        Self::Query {
            status: resp.status,
            body: resp.body,
        }
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NamespaceCreation { status, .. } | Self::Query { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Remote response body carried by the error, if any.
    pub fn body(&self) -> Option<&Bytes> {
        match self {
            Self::HarvestSourceUnreachable { body }
            | Self::NamespaceCreation { body, .. }
            | Self::BulkLoad { body }
            | Self::Query { body, .. } => Some(body),
            _ => None,
        }
    }
}

fn lossy(body: &Bytes) -> std::borrow::Cow<'_, str> {
    String::from_utf8_lossy(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_creation_display() {
        let err = BlazegraphError::NamespaceCreation {
            status: 500,
            body: Bytes::from_static(b"journal is read-only"),
        };
        assert_eq!(
            err.to_string(),
            "Namespace creation failed with status 500: journal is read-only"
        );
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.body().unwrap().as_ref(), b"journal is read-only");
    }

    #[test]
    fn test_harvest_error_keeps_body() {
        let err = BlazegraphError::HarvestSourceUnreachable {
            body: Bytes::from_static(b"Not Found"),
        };
        assert!(err.to_string().contains("Not Found"));
        assert_eq!(err.status(), None);
        assert_eq!(err.body().unwrap().as_ref(), b"Not Found");
    }

    #[test]
    fn test_invalid_term_has_no_body() {
        let err = BlazegraphError::invalid_term("unterminated literal");
        assert_eq!(err.to_string(), "Invalid RDF term: unterminated literal");
        assert!(err.body().is_none());
    }
}
