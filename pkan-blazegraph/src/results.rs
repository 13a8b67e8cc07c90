//! SPARQL 1.1 Query Results JSON format
//!
//! ```json
//! {
//!   "head": {"vars": ["s"]},
//!   "results": {"bindings": [{
//!     "s": {"type": "uri", "value": "http://example.org/alice"}
//!   }]}
//! }
//! ```
//!
//! ASK queries answer with `{"head": {}, "boolean": true}` instead of
//! `results`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Media type requested for SELECT/ASK results
pub const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// One solution: variable name (without `?`) to bound term.
pub type Row = HashMap<String, RdfTerm>;

/// Parsed result document of a SELECT or ASK query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparqlResults {
    #[serde(default)]
    pub head: Head,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Bindings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boolean: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Head {
    #[serde(default)]
    pub vars: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub link: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bindings {
    #[serde(default)]
    pub bindings: Vec<Row>,
}

/// A bound RDF term as it appears in the JSON results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum RdfTerm {
    Uri {
        value: String,
    },
    Literal {
        value: String,
        #[serde(rename = "xml:lang", default, skip_serializing_if = "Option::is_none")]
        lang: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        datatype: Option<String>,
    },
    /// Pre-1.1 servers (Blazegraph included) still emit this form
    TypedLiteral {
        value: String,
        datatype: String,
    },
    Bnode {
        value: String,
    },
}

impl RdfTerm {
    /// Lexical value regardless of term type.
    pub fn value(&self) -> &str {
        match self {
            RdfTerm::Uri { value }
            | RdfTerm::Literal { value, .. }
            | RdfTerm::TypedLiteral { value, .. }
            | RdfTerm::Bnode { value } => value,
        }
    }

    pub fn is_uri(&self) -> bool {
        matches!(self, RdfTerm::Uri { .. })
    }
}

impl SparqlResults {
    /// Parse a response body.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Projected variable names.
    pub fn vars(&self) -> &[String] {
        &self.head.vars
    }

    /// Solutions, empty for ASK results.
    pub fn bindings(&self) -> &[Row] {
        self.results
            .as_ref()
            .map(|r| r.bindings.as_slice())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.bindings().len()
    }

    /// No solutions, and no `true` ASK answer.
    pub fn is_empty(&self) -> bool {
        self.bindings().is_empty() && !self.boolean.unwrap_or(false)
    }

    /// Values bound to `var` across all solutions, skipping unbound rows.
    pub fn values<'a>(&'a self, var: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.bindings()
            .iter()
            .filter_map(move |row| row.get(var).map(RdfTerm::value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_select_results() {
        let body = br#"{
            "head": {"vars": ["s", "label"]},
            "results": {"bindings": [
                {
                    "s": {"type": "uri", "value": "http://example.org/alice"},
                    "label": {"type": "literal", "value": "Alice", "xml:lang": "en"}
                },
                {
                    "s": {"type": "bnode", "value": "t42"},
                    "label": {"type": "typed-literal", "value": "7",
                              "datatype": "http://www.w3.org/2001/XMLSchema#integer"}
                },
                {
                    "s": {"type": "uri", "value": "http://example.org/bob"}
                }
            ]}
        }"#;

        let results = SparqlResults::from_slice(body).unwrap();
        assert_eq!(results.vars(), ["s", "label"]);
        assert_eq!(results.len(), 3);
        assert!(!results.is_empty());

        let first = &results.bindings()[0];
        assert!(first["s"].is_uri());
        assert_eq!(
            first["label"],
            RdfTerm::Literal {
                value: "Alice".to_string(),
                lang: Some("en".to_string()),
                datatype: None,
            }
        );

        let labels: Vec<&str> = results.values("label").collect();
        assert_eq!(labels, vec!["Alice", "7"]);
    }

    #[test]
    fn test_empty_select_is_empty() {
        let body = br#"{"head": {"vars": ["s"]}, "results": {"bindings": []}}"#;
        let results = SparqlResults::from_slice(body).unwrap();
        assert!(results.is_empty());
        assert_eq!(results.len(), 0);
    }

    #[test]
    fn test_ask_results() {
        let yes = SparqlResults::from_slice(br#"{"head": {}, "boolean": true}"#).unwrap();
        assert_eq!(yes.boolean, Some(true));
        assert!(!yes.is_empty());
        assert!(yes.bindings().is_empty());

        let no = SparqlResults::from_slice(br#"{"head": {}, "boolean": false}"#).unwrap();
        assert!(no.is_empty());
    }

    #[test]
    fn test_non_json_body_is_an_error() {
        let err = SparqlResults::from_slice(b"<html>500</html>").unwrap_err();
        assert!(matches!(err, crate::BlazegraphError::InvalidResults(_)));
    }
}
