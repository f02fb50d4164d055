//! Model access interface: the contract route handlers operate through.
//!
//! Handlers are pure consumers of this trait; the in-memory [`crate::store::Database`]
//! is one implementation, tests substitute their own.

use crate::error::OperationError;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

/// Query predicate for one field. Only exact matching exists at this
/// layer; ranges and logical operators are out of scope.
#[derive(Clone, Debug, PartialEq)]
pub enum Comparator {
    Equals(Value),
}

/// Filter clause: field name -> predicate.
pub type Where = HashMap<String, Comparator>;

/// Builds a single-field equals clause, the shape every id lookup uses.
pub fn where_equals(field: &str, value: Value) -> Where {
    let mut clause = Where::new();
    clause.insert(field.to_string(), Comparator::Equals(value));
    clause
}

/// Options for a list query. `where_` is always present. Offset-style
/// (`take`/`skip`) and cursor-style (`take`/`cursor`) pagination fields
/// are attached independently and may coexist; the access layer decides
/// precedence between the two styles.
#[derive(Clone, Debug, Default)]
pub struct QueryOptions {
    pub where_: Where,
    pub take: Option<i64>,
    pub skip: Option<i64>,
    pub cursor: Option<String>,
}

/// A lookup that either must match (`strict`, miss is an
/// `EntityNotFound` error) or may come back empty.
#[derive(Clone, Debug)]
pub struct StrictQuery {
    pub strict: bool,
    pub where_: Where,
}

/// Strict lookup plus the replacement field values.
#[derive(Clone, Debug)]
pub struct UpdateQuery {
    pub strict: bool,
    pub where_: Where,
    pub data: Value,
}

/// CRUD operations over one model's collection.
#[async_trait]
pub trait ModelAccess: Send + Sync {
    async fn find_many(&self, options: QueryOptions) -> Result<Vec<Value>, OperationError>;

    /// First entity matching the clause. In strict mode a miss is an
    /// `EntityNotFound` error, never a silent `None`.
    async fn find_first(&self, query: StrictQuery) -> Result<Option<Value>, OperationError>;

    /// Insert a new entity from its field values. A primary-key value
    /// already present in the collection is a `DuplicatePrimaryKey` error.
    async fn create(&self, fields: Value) -> Result<Value, OperationError>;

    /// Replace the matched entity's fields with `data`. Returns the
    /// updated entity.
    async fn update(&self, query: UpdateQuery) -> Result<Option<Value>, OperationError>;

    /// Remove the matched entity. Returns its prior representation.
    async fn delete(&self, query: StrictQuery) -> Result<Option<Value>, OperationError>;
}
