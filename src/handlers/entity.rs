//! Entity CRUD handlers: list, read, create, update, delete.
//!
//! Every failure surfaces through `OperationError`'s `IntoResponse`;
//! nothing is recovered or retried here.

use crate::error::OperationError;
use crate::model::{where_equals, QueryOptions, StrictQuery, UpdateQuery};
use crate::query::parse_query_params;
use crate::state::ModelState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

fn strict_miss(state: &ModelState, op: &str) -> OperationError {
    OperationError::Internal(format!(
        "strict \"{}\" on the \"{}\" model returned no entity",
        op, state.resolved.name
    ))
}

/// `GET /{plural}`: filtered, optionally paginated listing.
pub async fn list(
    State(state): State<ModelState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Value>>, OperationError> {
    let parsed = parse_query_params(&state.resolved.name, &state.resolved, &pairs)?;

    let mut options = QueryOptions {
        where_: parsed.filters,
        ..Default::default()
    };
    // Offset-style fields attach when take or skip showed up;
    // cursor-style fields attach when take or cursor showed up.
    // Both styles may end up attached at once.
    if parsed.take.is_some() || parsed.skip.is_some() {
        options.take = parsed.take;
        options.skip = parsed.skip;
    }
    if parsed.take.is_some() || parsed.cursor.is_some() {
        options.take = parsed.take;
        options.cursor = parsed.cursor;
    }

    let records = state.model.find_many(options).await?;
    Ok(Json(records))
}

/// `GET /{plural}/:id`: strict lookup by primary key.
pub async fn read(
    State(state): State<ModelState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, OperationError> {
    let id = state.resolved.coerce_id(&id);
    let entity = state
        .model
        .find_first(StrictQuery {
            strict: true,
            where_: where_equals(&state.resolved.primary_key, id),
        })
        .await?
        .ok_or_else(|| strict_miss(&state, "findFirst"))?;
    Ok(Json(entity))
}

/// `POST /{plural}`: create from the request body. 201 on success;
/// duplicate keys surface from the access layer, not here.
pub async fn create(
    State(state): State<ModelState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), OperationError> {
    let created = state.model.create(body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /{plural}/:id`: strict full replacement by primary key.
pub async fn update(
    State(state): State<ModelState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, OperationError> {
    let id = state.resolved.coerce_id(&id);
    let updated = state
        .model
        .update(UpdateQuery {
            strict: true,
            where_: where_equals(&state.resolved.primary_key, id),
            data: body,
        })
        .await?
        .ok_or_else(|| strict_miss(&state, "update"))?;
    Ok(Json(updated))
}

/// `DELETE /{plural}/:id`: strict removal by primary key. Responds with
/// the entity's prior representation.
pub async fn delete(
    State(state): State<ModelState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, OperationError> {
    let id = state.resolved.coerce_id(&id);
    let deleted = state
        .model
        .delete(StrictQuery {
            strict: true,
            where_: where_equals(&state.resolved.primary_key, id),
        })
        .await?
        .ok_or_else(|| strict_miss(&state, "delete"))?;
    Ok(Json(deleted))
}
