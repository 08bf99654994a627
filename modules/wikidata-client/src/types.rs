use std::collections::HashMap;

use serde::Deserialize;

/// Top-level envelope of a `application/sparql-results+json` response.
#[derive(Debug, Deserialize)]
pub struct SparqlResponse {
    #[serde(default)]
    pub results: SparqlResults,
}

#[derive(Debug, Default, Deserialize)]
pub struct SparqlResults {
    #[serde(default)]
    pub bindings: Vec<SparqlRow>,
}

/// One result row: a sparse mapping of selected variable name → binding.
/// Variables that did not match (OPTIONAL clauses) are simply absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct SparqlRow(pub HashMap<String, SparqlBinding>);

#[derive(Debug, Clone, Deserialize)]
pub struct SparqlBinding {
    pub value: String,
}

impl SparqlRow {
    /// Bound value for a variable, or None if the variable is absent or empty.
    pub fn value(&self, var: &str) -> Option<&str> {
        self.0
            .get(var)
            .map(|b| b.value.as_str())
            .filter(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_row_roundtrip() {
        let json = r#"{
            "person": {"type": "uri", "value": "http://www.wikidata.org/entity/Q42"},
            "personLabel": {"type": "literal", "value": "Douglas Adams"}
        }"#;
        let row: SparqlRow = serde_json::from_str(json).unwrap();
        assert_eq!(
            row.value("person"),
            Some("http://www.wikidata.org/entity/Q42")
        );
        assert_eq!(row.value("personLabel"), Some("Douglas Adams"));
        assert_eq!(row.value("twitterHandle"), None);
    }

    #[test]
    fn empty_binding_reads_as_absent() {
        let json = r#"{"personLabel": {"type": "literal", "value": ""}}"#;
        let row: SparqlRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.value("personLabel"), None);
    }
}
