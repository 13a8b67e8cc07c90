//! Namespace-scoped operations against a Blazegraph service
//!
//! [`Tripelstore`] creates namespaces, bulk-loads harvested documents into
//! them, copies data between them and runs queries. It keeps an in-memory
//! registry of namespace name to endpoint URI; entries are derived from the
//! base URL and the name alone, so the registry can always be rebuilt.
//!
//! Every remote call is made exactly once. Status codes are interpreted only
//! where an operation says so; everything else hands back the raw
//! [`HttpResponse`].

use std::collections::HashMap;

use bytes::Bytes;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use tracing::debug;

use crate::config::{BlazegraphConfig, BLAZEGRAPH_BASE};
use crate::error::{BlazegraphError, Result};
use crate::response::HttpResponse;
use crate::sparql::SparqlEndpoint;

/// Query exporting a namespace's whole graph
const CONSTRUCT_ALL: &str = "CONSTRUCT  WHERE { ?s ?p ?o }";

/// Serialization used to copy data between namespaces
pub const RDF_XML: &str = "application/rdf+xml";

pub const TURTLE: &str = "text/turtle";

/// Statuses accepted from namespace creation: created (200, 201) or
/// already present (409).
const NAMESPACE_READY: [u16; 3] = [200, 201, 409];

/// Client facade over one Blazegraph service.
#[derive(Debug, Clone)]
pub struct Tripelstore {
    config: BlazegraphConfig,
    http: Client,
    namespace_uris: HashMap<String, String>,
}

impl Default for Tripelstore {
    fn default() -> Self {
        Self::new()
    }
}

impl Tripelstore {
    /// Store at [`BLAZEGRAPH_BASE`] with default settings.
    pub fn new() -> Self {
        Self::with_base_url(BLAZEGRAPH_BASE)
    }

    /// Store at `base_url` with default settings.
    ///
    /// Falls back to a plain `reqwest` client if the configured one cannot
    /// be built; use [`from_config`](Self::from_config) to see that error.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let config = BlazegraphConfig::new(base_url);
        let http = config.build_client().unwrap_or_else(|_| Client::new());
        Self::with_client(config, http)
    }

    /// Store built from `config`, including its timeouts and user agent.
    pub fn from_config(config: BlazegraphConfig) -> Result<Self> {
        let http = config.build_client()?;
        Ok(Self::with_client(config, http))
    }

    /// Store using an existing HTTP client; the client settings in `config`
    /// are ignored.
    pub fn with_client(mut config: BlazegraphConfig, http: Client) -> Self {
        config.base_url = config.normalized_base_url().to_string();
        Self {
            config,
            http,
            namespace_uris: HashMap::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn config(&self) -> &BlazegraphConfig {
        &self.config
    }

    /// Registered endpoint URI for `namespace`, if it has been referenced.
    pub fn namespace_uri(&self, namespace: &str) -> Option<&str> {
        self.namespace_uris.get(namespace).map(String::as_str)
    }

    pub fn namespace_uris(&self) -> &HashMap<String, String> {
        &self.namespace_uris
    }

    /// Compute `{base}/namespace/{namespace}/sparql` and record it in the
    /// registry, replacing any previous entry.
    pub fn generate_namespace_uri(&mut self, namespace: &str) -> String {
        let uri = format!("{}/namespace/{}/sparql", self.config.base_url, namespace);
        self.namespace_uris
            .insert(namespace.to_string(), uri.clone());
        uri
    }

    /// Endpoint client for `namespace`, registering its URI if needed.
    ///
    /// Does not check that the namespace exists on the server.
    pub fn sparql_for_namespace(&mut self, namespace: &str) -> SparqlEndpoint {
        let uri = match self.namespace_uris.get(namespace) {
            Some(uri) => uri.clone(),
            None => self.generate_namespace_uri(namespace),
        };
        SparqlEndpoint::new(uri, self.http.clone(), &self.config)
    }

    /// POST the namespace property list to `{base}/namespace`.
    ///
    /// The response is returned whatever its status; the namespace URI is
    /// registered once a response has arrived.
    pub async fn rest_create_namespace(&mut self, namespace: &str) -> Result<HttpResponse> {
        let url = format!("{}/namespace", self.config.base_url);
        let properties = self.config.namespace_properties.to_property_list(namespace);

        debug!(url = %url, namespace, "creating namespace");
        let resp = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "text/plain")
            .body(properties)
            .send()
            .await?;
        let resp = HttpResponse::read(resp).await?;

        self.generate_namespace_uri(namespace);
        Ok(resp)
    }

    /// Create `namespace` unless it already exists, and return its endpoint.
    ///
    /// # Errors
    ///
    /// [`BlazegraphError::NamespaceCreation`] when the service answers with
    /// anything but 200, 201 or 409.
    pub async fn create_namespace(&mut self, namespace: &str) -> Result<SparqlEndpoint> {
        let resp = self.rest_create_namespace(namespace).await?;
        if NAMESPACE_READY.contains(&resp.status) {
            debug!(namespace, status = resp.status, "namespace ready");
            Ok(self.sparql_for_namespace(namespace))
        } else {
            Err(BlazegraphError::NamespaceCreation {
                status: resp.status,
                body: resp.body,
            })
        }
    }

    /// Fetch `source_uri` and POST its bytes into `namespace` as
    /// `content_type`.
    ///
    /// The load response is returned uninterpreted.
    ///
    /// # Errors
    ///
    /// [`BlazegraphError::HarvestSourceUnreachable`] when the source does not
    /// answer 200; nothing is posted to the store in that case.
    pub async fn rest_bulk_load_from_uri(
        &mut self,
        namespace: &str,
        source_uri: &str,
        content_type: &str,
    ) -> Result<HttpResponse> {
        debug!(source = %source_uri, "fetching harvest source");
        let source = HttpResponse::read(self.http.get(source_uri).send().await?).await?;
        if !source.is_ok() {
            return Err(BlazegraphError::HarvestSourceUnreachable { body: source.body });
        }

        let uri = self.generate_namespace_uri(namespace);
        debug!(
            uri = %uri,
            content_type,
            bytes = source.body.len(),
            "bulk loading harvested data"
        );
        let resp = self
            .http
            .post(&uri)
            .header(CONTENT_TYPE, content_type)
            .body(source.body)
            .send()
            .await?;
        HttpResponse::read(resp).await
    }

    /// Ensure `namespace` exists, then bulk-load `source_uri` into it.
    ///
    /// # Errors
    ///
    /// Anything from [`create_namespace`](Self::create_namespace) or
    /// [`rest_bulk_load_from_uri`](Self::rest_bulk_load_from_uri), and
    /// [`BlazegraphError::BulkLoad`] when the load does not answer 200.
    pub async fn graph_from_uri(
        &mut self,
        namespace: &str,
        source_uri: &str,
        content_type: &str,
    ) -> Result<(SparqlEndpoint, HttpResponse)> {
        self.create_namespace(namespace).await?;
        let resp = self
            .rest_bulk_load_from_uri(namespace, source_uri, content_type)
            .await?;
        if !resp.is_ok() {
            return Err(BlazegraphError::BulkLoad { body: resp.body });
        }
        Ok((self.sparql_for_namespace(namespace), resp))
    }

    /// Append every triple of `source` to `target`.
    ///
    /// Both namespaces are created if needed. The source graph is exported
    /// once as RDF/XML and posted to the target unchanged; triples already
    /// in `target` stay. The export status is not checked, the load response
    /// is returned as-is.
    pub async fn move_data_between_namespaces(
        &mut self,
        target: &str,
        source: &str,
    ) -> Result<HttpResponse> {
        self.create_namespace(source).await?;
        self.create_namespace(target).await?;
        let source_uri = self.generate_namespace_uri(source);
        let target_uri = self.generate_namespace_uri(target);

        let export = self.post_query(&source_uri, CONSTRUCT_ALL, RDF_XML).await?;

        debug!(
            source = %source_uri,
            target = %target_uri,
            bytes = export.body.len(),
            "copying graph between namespaces"
        );
        let resp = self
            .http
            .post(&target_uri)
            .header(CONTENT_TYPE, RDF_XML)
            .body(export.body)
            .send()
            .await?;
        HttpResponse::read(resp).await
    }

    /// Ensure `namespace` exists, run `query` against it asking for
    /// `mime_type`, and return the raw response body.
    pub async fn get_triple_data_from_query(
        &mut self,
        namespace: &str,
        query: &str,
        mime_type: &str,
    ) -> Result<Bytes> {
        self.create_namespace(namespace).await?;
        let uri = self.generate_namespace_uri(namespace);
        let resp = self.post_query(&uri, query, mime_type).await?;
        Ok(resp.into_body())
    }

    /// [`get_triple_data_from_query`](Self::get_triple_data_from_query) as Turtle.
    pub async fn get_turtle_from_query(&mut self, namespace: &str, query: &str) -> Result<Bytes> {
        self.get_triple_data_from_query(namespace, query, TURTLE)
            .await
    }

    async fn post_query(&self, uri: &str, query: &str, accept: &str) -> Result<HttpResponse> {
        debug!(uri = %uri, accept, "posting SPARQL query");
        let resp = self
            .http
            .post(uri)
            .header(ACCEPT, accept)
            .form(&[("query", query)])
            .send()
            .await?;
        HttpResponse::read(resp).await
    }
}
