//! Persisted JSON document for a material base.
//!
//! Atoms travel as their display strings and are re-parsed into structured
//! atoms on load. Deserializing a serialized base yields a base that is
//! axiom-equivalent to the original.

use crate::base::{AtomSet, BaseError, MaterialBase};
use crate::schema::{Schema, SchemaKind};
use nmms_core::{parse_atom, SyntaxError};
use serde::{Deserialize, Serialize};

/// Errors raised while reading a persisted document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("malformed atom in document: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("unknown schema kind `{0}`")]
    UnknownKind(String),
    #[error(transparent)]
    Base(#[from] BaseError),
    #[error("malformed document: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-disk record for one atom of the language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtomEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
}

/// On-disk record for one ground consequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsequenceEntry {
    pub antecedent: Vec<String>,
    pub consequent: Vec<String>,
}

/// On-disk record for one registered schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaEntry {
    pub kind: String,
    pub params: [String; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// The complete persisted base document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BaseDocument {
    #[serde(default)]
    pub language: Vec<AtomEntry>,
    #[serde(default)]
    pub consequences: Vec<ConsequenceEntry>,
    #[serde(default)]
    pub schemas: Vec<SchemaEntry>,
}

impl BaseDocument {
    pub fn from_json(text: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json_pretty(&self) -> String {
        // BaseDocument contains only maps, vectors and strings; this cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

impl MaterialBase {
    /// Render the base into its persisted document form.
    pub fn to_document(&self) -> BaseDocument {
        let language = self
            .language()
            .iter()
            .map(|atom| AtomEntry {
                name: atom.to_string(),
                annotation: self.annotation(atom).map(str::to_string),
            })
            .collect();

        let consequences = self
            .consequences()
            .iter()
            .map(|(antecedent, consequent)| ConsequenceEntry {
                antecedent: antecedent.iter().map(|a| a.to_string()).collect(),
                consequent: consequent.iter().map(|a| a.to_string()).collect(),
            })
            .collect();

        let schemas = self
            .schemas()
            .iter()
            .map(|schema| {
                let (first, second) = schema.kind.params();
                SchemaEntry {
                    kind: schema.kind.name().to_string(),
                    params: [first.to_string(), second.to_string()],
                    annotation: schema.annotation.clone(),
                    source: schema.source.clone(),
                }
            })
            .collect();

        BaseDocument {
            language,
            consequences,
            schemas,
        }
    }

    /// Rebuild a base from its persisted document form.
    pub fn from_document(document: &BaseDocument) -> Result<Self, DocumentError> {
        let mut base = MaterialBase::new();

        for entry in &document.language {
            let atom = parse_atom(&entry.name)?;
            base.add_atom(atom.clone());
            if let Some(annotation) = &entry.annotation {
                base.annotate(&atom, annotation.clone());
            }
        }

        for entry in &document.consequences {
            let antecedent = entry
                .antecedent
                .iter()
                .map(|s| parse_atom(s))
                .collect::<Result<AtomSet, _>>()?;
            let consequent = entry
                .consequent
                .iter()
                .map(|s| parse_atom(s))
                .collect::<Result<AtomSet, _>>()?;
            // Tolerate documents that omit consequence atoms from the
            // language section: declare them before inserting.
            for atom in antecedent.iter().chain(consequent.iter()) {
                base.add_atom(atom.clone());
            }
            base.add_consequence(antecedent, consequent)?;
        }

        for entry in &document.schemas {
            let [first, second] = entry.params.clone();
            let kind = SchemaKind::from_parts(&entry.kind, first, second)
                .ok_or_else(|| DocumentError::UnknownKind(entry.kind.clone()))?;
            let mut schema = Schema::new(kind);
            schema.annotation = entry.annotation.clone();
            schema.source = entry.source.clone();
            base.register_schema(schema);
        }

        Ok(base)
    }
}
