//! In-memory database: one ordered collection per registered model.
//!
//! All state lives on the `Database` instance, so concurrent servers in
//! tests stay isolated. Collections preserve insertion order, which is
//! what cursor pagination pages over.

use crate::error::{OperationError, SchemaError};
use crate::model::{Comparator, ModelAccess, QueryOptions, StrictQuery, UpdateQuery, Where};
use crate::schema::{resolve, ModelDefinition, ResolvedModel};
use async_trait::async_trait;
use axum::Router;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

pub struct Database {
    models: RwLock<HashMap<String, Arc<ModelStore>>>,
}

impl Database {
    pub fn new() -> Self {
        Self {
            models: RwLock::new(HashMap::new()),
        }
    }

    /// Register a model. Resolves the declaration once; the resulting
    /// store starts empty.
    pub fn register(
        &self,
        name: &str,
        definition: &ModelDefinition,
    ) -> Result<Arc<ModelStore>, SchemaError> {
        let resolved = resolve(name, definition)?;
        let store = Arc::new(ModelStore {
            resolved,
            records: RwLock::new(Vec::new()),
        });
        self.models
            .write()
            .expect("model registry lock poisoned")
            .insert(name.to_string(), store.clone());
        Ok(store)
    }

    pub fn model(&self, name: &str) -> Option<Arc<ModelStore>> {
        self.models
            .read()
            .expect("model registry lock poisoned")
            .get(name)
            .cloned()
    }

    /// Synthesized CRUD routes for a registered model, optionally under
    /// a base path prefix.
    pub fn rest_routes(&self, name: &str, base_url: Option<&str>) -> Result<Router, SchemaError> {
        let store = self
            .model(name)
            .ok_or_else(|| SchemaError::UnknownModel(name.to_string()))?;
        let resolved = store.resolved().clone();
        Ok(crate::routes::entity_routes(resolved, store, base_url))
    }
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}

/// One model's collection plus its resolved declaration.
pub struct ModelStore {
    resolved: ResolvedModel,
    records: RwLock<Vec<Value>>,
}

impl ModelStore {
    pub fn resolved(&self) -> &ResolvedModel {
        &self.resolved
    }

    fn name(&self) -> &str {
        &self.resolved.name
    }

    fn pk(&self) -> &str {
        &self.resolved.primary_key
    }

    fn matches(entity: &Value, clause: &Where) -> bool {
        clause.iter().all(|(field, comparator)| match comparator {
            Comparator::Equals(expected) => entity.get(field) == Some(expected),
        })
    }

    fn no_match(&self, op: &str) -> OperationError {
        OperationError::EntityNotFound(format!(
            "Failed to execute \"{}\" on the \"{}\" model: no entity found matching the query.",
            op,
            self.name()
        ))
    }
}

#[async_trait]
impl ModelAccess for ModelStore {
    async fn find_many(&self, options: QueryOptions) -> Result<Vec<Value>, OperationError> {
        let records = self.records.read().expect("collection lock poisoned");
        let mut matched: Vec<Value> = records
            .iter()
            .filter(|e| Self::matches(e, &options.where_))
            .cloned()
            .collect();
        drop(records);
        tracing::debug!(model = %self.name(), matched = matched.len(), "find_many");

        // Cursor pagination wins over offset when both styles were
        // attached to the options.
        if let Some(cursor) = &options.cursor {
            let cursor_id = self.resolved.coerce_id(cursor);
            matched = match matched
                .iter()
                .position(|e| e.get(self.pk()) == Some(&cursor_id))
            {
                Some(pos) => matched.split_off(pos + 1),
                // An unknown cursor references no position; the page is empty.
                None => Vec::new(),
            };
        } else if let Some(skip) = options.skip {
            let skip = skip.max(0) as usize;
            matched = if skip < matched.len() {
                matched.split_off(skip)
            } else {
                Vec::new()
            };
        }
        if let Some(take) = options.take {
            matched.truncate(take.max(0) as usize);
        }
        Ok(matched)
    }

    async fn find_first(&self, query: StrictQuery) -> Result<Option<Value>, OperationError> {
        let records = self.records.read().expect("collection lock poisoned");
        let found = records
            .iter()
            .find(|e| Self::matches(e, &query.where_))
            .cloned();
        match (found, query.strict) {
            (Some(entity), _) => Ok(Some(entity)),
            (None, true) => Err(self.no_match("findFirst")),
            (None, false) => Ok(None),
        }
    }

    async fn create(&self, fields: Value) -> Result<Value, OperationError> {
        let entity = match fields {
            Value::Object(_) => fields,
            _ => {
                return Err(OperationError::BadRequest(format!(
                    "Failed to create a \"{}\" entity: the request body must be a JSON object.",
                    self.name()
                )))
            }
        };
        let pk_value = entity.get(self.pk()).cloned().ok_or_else(|| {
            OperationError::BadRequest(format!(
                "Failed to create a \"{}\" entity: the primary key \"{}\" is missing.",
                self.name(),
                self.pk()
            ))
        })?;

        let mut records = self.records.write().expect("collection lock poisoned");
        if records.iter().any(|e| e.get(self.pk()) == Some(&pk_value)) {
            return Err(OperationError::DuplicatePrimaryKey(format!(
                "Failed to create a \"{}\" entity: an entity with the same primary key \"{}\" (\"{}\") already exists.",
                self.name(),
                display_key(&pk_value),
                self.pk()
            )));
        }
        tracing::debug!(model = %self.name(), key = %display_key(&pk_value), "create");
        records.push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, query: UpdateQuery) -> Result<Option<Value>, OperationError> {
        let mut next = match query.data {
            Value::Object(map) => map,
            _ => {
                return Err(OperationError::BadRequest(format!(
                    "Failed to update a \"{}\" entity: the request body must be a JSON object.",
                    self.name()
                )))
            }
        };

        let mut records = self.records.write().expect("collection lock poisoned");
        let position = records.iter().position(|e| Self::matches(e, &query.where_));
        let position = match (position, query.strict) {
            (Some(p), _) => p,
            (None, true) => return Err(self.no_match("update")),
            (None, false) => return Ok(None),
        };

        // Full replacement; a body without the key keeps the old one.
        if !next.contains_key(self.pk()) {
            if let Some(old_key) = records[position].get(self.pk()).cloned() {
                next.insert(self.pk().to_string(), old_key);
            }
        }
        if let Some(next_key) = next.get(self.pk()) {
            let taken = records
                .iter()
                .enumerate()
                .any(|(i, e)| i != position && e.get(self.pk()) == Some(next_key));
            if taken {
                return Err(OperationError::DuplicatePrimaryKey(format!(
                    "Failed to update a \"{}\" entity: an entity with the same primary key \"{}\" (\"{}\") already exists.",
                    self.name(),
                    display_key(next_key),
                    self.pk()
                )));
            }
        }
        tracing::debug!(model = %self.name(), "update");
        let next = Value::Object(next);
        records[position] = next.clone();
        Ok(Some(next))
    }

    async fn delete(&self, query: StrictQuery) -> Result<Option<Value>, OperationError> {
        let mut records = self.records.write().expect("collection lock poisoned");
        let position = records.iter().position(|e| Self::matches(e, &query.where_));
        match (position, query.strict) {
            (Some(p), _) => {
                tracing::debug!(model = %self.name(), "delete");
                Ok(Some(records.remove(p)))
            }
            (None, true) => Err(self.no_match("delete")),
            (None, false) => Ok(None),
        }
    }
}

fn display_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
