//! Mockrest SDK: model-driven mock REST API library.
//!
//! Declare a model once, get an in-memory collection and a synthesized
//! set of CRUD routes (list, read, create, update, delete) for it.

pub mod error;
pub mod handlers;
pub mod model;
pub mod pluralize;
pub mod query;
pub mod routes;
pub mod schema;
pub mod state;
pub mod store;
pub mod url;

pub use error::{OperationError, SchemaError};
pub use model::{where_equals, Comparator, ModelAccess, QueryOptions, StrictQuery, UpdateQuery, Where};
pub use pluralize::pluralize;
pub use query::{parse_query_params, ParsedQuery};
pub use routes::{common_routes, entity_routes, rest_routes};
pub use schema::{resolve, FieldDescriptor, FieldKind, ModelDefinition, PkKind, ResolvedModel};
pub use state::ModelState;
pub use store::Database;
pub use url::UrlBuilder;
