//! Per-namespace SPARQL endpoint client

use reqwest::header::ACCEPT;
use reqwest::Client;
use tracing::debug;

use crate::config::BlazegraphConfig;
use crate::error::{BlazegraphError, Result};
use crate::response::HttpResponse;
use crate::results::{SparqlResults, SPARQL_RESULTS_JSON};
use crate::term::Tripel;

/// Query used by [`SparqlEndpoint::exists`]: any subject at all.
const EXISTS_QUERY: &str = "PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>
SELECT ?s
WHERE { ?s ?p ?o }
LIMIT 1";

/// Query/update client bound to one namespace's `/sparql` endpoint.
///
/// Obtained from [`Tripelstore`](crate::Tripelstore); cheap to clone, the
/// HTTP client is shared with the store that created it.
#[derive(Debug, Clone)]
pub struct SparqlEndpoint {
    uri: String,
    http: Client,
    insert_graph: String,
    strict_terms: bool,
}

impl SparqlEndpoint {
    pub(crate) fn new(uri: impl Into<String>, http: Client, config: &BlazegraphConfig) -> Self {
        Self {
            uri: uri.into(),
            http,
            insert_graph: config.insert_graph.clone(),
            strict_terms: config.strict_terms,
        }
    }

    /// Endpoint URI, `{base}/namespace/{namespace}/sparql`.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Whether the namespace holds any triple at all.
    ///
    /// `subject_uri` is accepted but not used: the query asks for any
    /// subject, not this one.
    pub async fn exists(&self, _subject_uri: &str) -> Result<bool> {
        let results = self.query(EXISTS_QUERY).await?;
        Ok(!results.is_empty())
    }

    /// Insert one statement into the configured graph.
    ///
    /// The terms are substituted verbatim, so a term containing `}` can
    /// rewrite the update. Use [`insert_checked`](Self::insert_checked), or
    /// set `strict_terms` in the config, when terms come from outside.
    pub async fn insert(&self, tripel: &Tripel) -> Result<()> {
        if self.strict_terms {
            return self.insert_checked(tripel).await;
        }
        self.update(&insert_data(&self.insert_graph, tripel)).await
    }

    /// [`insert`](Self::insert) after validating every term; nothing is sent
    /// if a term is malformed.
    pub async fn insert_checked(&self, tripel: &Tripel) -> Result<()> {
        tripel.validate()?;
        self.update(&insert_data(&self.insert_graph, tripel)).await
    }

    /// Run a SELECT or ASK query and parse the JSON results.
    pub async fn query(&self, query: &str) -> Result<SparqlResults> {
        debug!(uri = %self.uri, "running SPARQL query");
        let resp = self
            .http
            .get(&self.uri)
            .query(&[("query", query)])
            .header(ACCEPT, SPARQL_RESULTS_JSON)
            .send()
            .await?;
        let resp = HttpResponse::read(resp).await?;

        if !resp.is_success() {
            return Err(BlazegraphError::query(resp));
        }
        SparqlResults::from_slice(&resp.body)
    }

    /// Send a SPARQL update (form-encoded `update=` POST).
    pub async fn update(&self, update: &str) -> Result<()> {
        debug!(uri = %self.uri, "sending SPARQL update");
        let resp = self
            .http
            .post(&self.uri)
            .form(&[("update", update)])
            .send()
            .await?;
        let resp = HttpResponse::read(resp).await?;

        if !resp.is_success() {
            return Err(BlazegraphError::query(resp));
        }
        Ok(())
    }
}

fn insert_data(graph: &str, tripel: &Tripel) -> String {
    format!(
        "INSERT DATA\n{{ GRAPH <{graph}> {{ {} {} {} }} }}",
        tripel.s, tripel.p, tripel.o
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_data_is_verbatim() {
        let tripel = Tripel::new(
            "<http://example.com/s>",
            "<http://purl.org/dc/terms/title>",
            r#""Title""#,
        );
        assert_eq!(
            insert_data("http://example.com/", &tripel),
            "INSERT DATA\n{ GRAPH <http://example.com/> { <http://example.com/s> <http://purl.org/dc/terms/title> \"Title\" } }"
        );
    }

    #[test]
    fn test_endpoint_takes_graph_from_config() {
        let config = BlazegraphConfig::default()
            .with_insert_graph("http://pkan.example/g")
            .with_strict_terms(true);
        let endpoint = SparqlEndpoint::new("http://bg.local/namespace/x/sparql", Client::new(), &config);

        assert_eq!(endpoint.uri(), "http://bg.local/namespace/x/sparql");
        assert_eq!(endpoint.insert_graph, "http://pkan.example/g");
        assert!(endpoint.strict_terms);
    }
}
