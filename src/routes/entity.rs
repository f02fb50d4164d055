//! Entity CRUD routes synthesized from a model declaration.
//!
//! The primary key and collection path are resolved once here, never
//! per request.

use crate::error::SchemaError;
use crate::handlers::entity::{create, delete as delete_handler, list, read, update};
use crate::model::ModelAccess;
use crate::schema::{resolve, ModelDefinition, ResolvedModel};
use crate::state::ModelState;
use crate::url::UrlBuilder;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;

/// Cap on create/update request bodies.
const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Five routes for an already-resolved model:
/// `GET`/`POST /{plural}` and `GET`/`PUT`/`DELETE /{plural}/:id`,
/// optionally under a base path prefix.
pub fn entity_routes(
    resolved: ResolvedModel,
    model: Arc<dyn ModelAccess>,
    base_url: Option<&str>,
) -> Router {
    let build = UrlBuilder::new(base_url);
    let collection = build.join(&resolved.path_segment);
    let item = build.join(&format!("{}/:id", resolved.path_segment));
    tracing::debug!(model = %resolved.name, %collection, "mounting entity routes");

    let state = ModelState {
        resolved: Arc::new(resolved),
        model,
    };
    Router::new()
        .route(&collection, get(list).post(create))
        .route(&item, get(read).put(update).delete(delete_handler))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .with_state(state)
}

/// Resolve a model declaration and synthesize its CRUD routes. Fails if
/// the declaration has no primary key, or more than one.
pub fn rest_routes(
    name: &str,
    definition: &ModelDefinition,
    model: Arc<dyn ModelAccess>,
    base_url: Option<&str>,
) -> Result<Router, SchemaError> {
    Ok(entity_routes(resolve(name, definition)?, model, base_url))
}
