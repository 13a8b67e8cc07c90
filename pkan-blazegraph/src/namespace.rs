//! Namespace creation properties
//!
//! Blazegraph creates a namespace from a Java properties document posted to
//! `{base}/namespace`. [`NamespaceProperties`] is the typed form of that
//! document; [`NamespaceProperties::to_property_list`] renders it for one
//! namespace name.

use serde::{Deserialize, Serialize};

/// Axioms class used when none is configured
pub const NO_AXIOMS: &str = "com.bigdata.rdf.axioms.NoAxioms";

/// Store layout sent with every namespace creation request.
///
/// The defaults describe a plain triple store: text index on, no quads, no
/// inference, no statement identifiers, no isolation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamespaceProperties {
    pub truth_maintenance: bool,
    /// B+Tree branching factor of the SPO index
    pub spo_branching_factor: u32,
    /// B+Tree branching factor of the lexicon indices
    pub lex_branching_factor: u32,
    pub text_index: bool,
    pub justify: bool,
    pub statement_identifiers: bool,
    pub axioms_class: String,
    pub quads: bool,
    pub geo_spatial: bool,
    pub group_commit: bool,
    pub isolatable_indices: bool,
}

impl Default for NamespaceProperties {
    fn default() -> Self {
        Self {
            truth_maintenance: false,
            spo_branching_factor: 1024,
            lex_branching_factor: 400,
            text_index: true,
            justify: false,
            statement_identifiers: false,
            axioms_class: NO_AXIOMS.to_string(),
            quads: false,
            geo_spatial: false,
            group_commit: false,
            isolatable_indices: false,
        }
    }
}

impl NamespaceProperties {
    /// Render the properties document for `namespace`, one `key=value` per line.
    pub fn to_property_list(&self, namespace: &str) -> String {
        let entries = [
            ("com.bigdata.rdf.sail.namespace".to_string(), namespace.to_string()),
            (
                "com.bigdata.rdf.sail.truthMaintenance".to_string(),
                self.truth_maintenance.to_string(),
            ),
            (
                format!("com.bigdata.namespace.{namespace}.spo.com.bigdata.btree.BTree.branchingFactor"),
                self.spo_branching_factor.to_string(),
            ),
            (
                "com.bigdata.rdf.store.AbstractTripleStore.textIndex".to_string(),
                self.text_index.to_string(),
            ),
            (
                "com.bigdata.rdf.store.AbstractTripleStore.justify".to_string(),
                self.justify.to_string(),
            ),
            (
                "com.bigdata.rdf.store.AbstractTripleStore.statementIdentifiers".to_string(),
                self.statement_identifiers.to_string(),
            ),
            (
                "com.bigdata.rdf.store.AbstractTripleStore.axiomsClass".to_string(),
                self.axioms_class.clone(),
            ),
            (
                "com.bigdata.rdf.store.AbstractTripleStore.quads".to_string(),
                self.quads.to_string(),
            ),
            (
                format!("com.bigdata.namespace.{namespace}.lex.com.bigdata.btree.BTree.branchingFactor"),
                self.lex_branching_factor.to_string(),
            ),
            (
                "com.bigdata.rdf.store.AbstractTripleStore.geoSpatial".to_string(),
                self.geo_spatial.to_string(),
            ),
            (
                "com.bigdata.journal.Journal.groupCommit".to_string(),
                self.group_commit.to_string(),
            ),
            (
                "com.bigdata.rdf.sail.isolatableIndices".to_string(),
                self.isolatable_indices.to_string(),
            ),
        ];

        let mut out = String::new();
        for (key, value) in entries {
            out.push_str(&key);
            out.push('=');
            out.push_str(&value);
            out.push('\n');
        }
        out
    }
}
