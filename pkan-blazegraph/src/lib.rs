//! Client for the Blazegraph RDF triplestore
//!
//! Manages namespaces on a remote Blazegraph service, bulk-loads harvested
//! RDF documents into them, copies data between them and runs SPARQL
//! queries and updates.
//!
//! # Architecture
//!
//! - [`tripelstore`]: [`Tripelstore`], the entry point; owns the namespace URI registry
//! - [`sparql`]: [`SparqlEndpoint`], query/update client for one namespace
//! - [`results`]: SPARQL JSON results
//! - [`term`]: statements and term validation for inserts
//! - [`namespace`]: properties sent when creating a namespace
//! - [`config`]: client configuration
//! - [`response`]: raw HTTP responses
//! - [`error`]: error types
//!
//! # Example
//!
//! ```no_run
//! use pkan_blazegraph::{Tripelstore, TURTLE};
//!
//! # async fn run() -> pkan_blazegraph::Result<()> {
//! let mut store = Tripelstore::with_base_url("http://localhost:9999/blazegraph");
//! let (sparql, _resp) = store
//!     .graph_from_uri("catalog", "https://example.org/catalog.ttl", TURTLE)
//!     .await?;
//! let results = sparql.query("SELECT ?s WHERE { ?s ?p ?o } LIMIT 10").await?;
//! println!("{} subjects", results.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod namespace;
pub mod response;
pub mod results;
pub mod sparql;
pub mod term;
pub mod tripelstore;

pub use config::{BlazegraphConfig, BLAZEGRAPH_BASE, DEFAULT_INSERT_GRAPH};
pub use error::{BlazegraphError, Result};
pub use namespace::NamespaceProperties;
pub use response::HttpResponse;
pub use results::{RdfTerm, SparqlResults, SPARQL_RESULTS_JSON};
pub use sparql::SparqlEndpoint;
pub use term::{TermKind, Tripel};
pub use tripelstore::{Tripelstore, RDF_XML, TURTLE};
