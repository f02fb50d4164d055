//! Resolved model: declaration validated and flattened for runtime use.
//!
//! Resolution runs once when routes are generated; per-request code
//! never re-inspects field descriptors.

use crate::error::SchemaError;
use crate::pluralize::pluralize;
use crate::schema::types::{FieldKind, ModelDefinition};
use serde_json::Value;
use std::collections::HashSet;

/// Primary-key type for coercing path/filter ids, detected from the
/// declared sample value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PkKind {
    Number,
    Text,
}

#[derive(Clone, Debug)]
pub struct ResolvedModel {
    /// Singular model name, used in error messages.
    pub name: String,
    /// Pluralized collection segment for the public URL path.
    pub path_segment: String,
    pub primary_key: String,
    pub pk_kind: PkKind,
    /// All declared field names, primary key included.
    pub fields: HashSet<String>,
}

impl ResolvedModel {
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains(name)
    }

    /// Coerce a URL path segment into a primary-key value.
    /// Numeric keys parse the segment as a number; anything that does
    /// not parse stays a string, mirroring loose-typed lookups where a
    /// non-numeric id simply never matches.
    pub fn coerce_id(&self, raw: &str) -> Value {
        match self.pk_kind {
            PkKind::Number => raw
                .parse::<i64>()
                .map(|n| Value::Number(n.into()))
                .unwrap_or_else(|_| Value::String(raw.to_string())),
            PkKind::Text => Value::String(raw.to_string()),
        }
    }
}

/// Build the resolved model from a declaration. Fails if the model
/// declares no primary key, or more than one.
pub fn resolve(name: &str, definition: &ModelDefinition) -> Result<ResolvedModel, SchemaError> {
    let mut primary: Option<(String, PkKind)> = None;
    for (field_name, descriptor) in definition.iter() {
        if let FieldKind::PrimaryKey { sample } = &descriptor.kind {
            if let Some((existing, _)) = &primary {
                return Err(SchemaError::MultiplePrimaryKeys(
                    name.to_string(),
                    existing.clone(),
                    field_name.to_string(),
                ));
            }
            let kind = if sample.is_number() {
                PkKind::Number
            } else {
                PkKind::Text
            };
            primary = Some((field_name.to_string(), kind));
        }
    }
    let (primary_key, pk_kind) =
        primary.ok_or_else(|| SchemaError::NoPrimaryKey(name.to_string()))?;

    Ok(ResolvedModel {
        name: name.to_string(),
        path_segment: pluralize(name),
        primary_key,
        pk_kind,
        fields: definition.field_names().map(str::to_string).collect(),
    })
}
