//! End-to-end tests for the synthesized CRUD routes, driven through the
//! router in-process with `tower::ServiceExt::oneshot`.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use mockrest_sdk::{
    rest_routes, Comparator, Database, ModelAccess, ModelDefinition, OperationError, QueryOptions,
    StrictQuery, UpdateQuery, Where,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

fn widget_definition() -> ModelDefinition {
    ModelDefinition::new()
        .primary_key("id", json!(0))
        .field("name")
}

async fn widget_router(seed: &[Value]) -> Router {
    let db = Database::new();
    let store = db.register("widget", &widget_definition()).unwrap();
    for entity in seed {
        store.create(entity.clone()).await.unwrap();
    }
    db.rest_routes("widget", None).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn with_body(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn full_crud_lifecycle() {
    let app = widget_router(&[]).await;

    let response = app
        .clone()
        .oneshot(with_body("POST", "/widgets", &json!({ "id": 1, "name": "gizmo" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(json_body(response).await, json!({ "id": 1, "name": "gizmo" }));

    let response = app.clone().oneshot(get("/widgets")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!([{ "id": 1, "name": "gizmo" }]));

    let response = app.clone().oneshot(get("/widgets/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "id": 1, "name": "gizmo" }));

    let response = app
        .clone()
        .oneshot(with_body("PUT", "/widgets/1", &json!({ "name": "gadget" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "id": 1, "name": "gadget" }));

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/widgets/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "id": 1, "name": "gadget" }));

    let response = app.clone().oneshot(get("/widgets/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_entity_is_404_with_message_body() {
    let app = widget_router(&[]).await;
    let response = app.oneshot(get("/widgets/7")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert!(body["message"].as_str().unwrap().contains("\"widget\""));
}

#[tokio::test]
async fn duplicate_create_is_409_with_the_thrown_message() {
    let app = widget_router(&[json!({ "id": 1, "name": "gizmo" })]).await;
    let response = app
        .oneshot(with_body("POST", "/widgets", &json!({ "id": 1, "name": "again" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = json_body(response).await;
    assert_eq!(
        body,
        json!({
            "message":
                "Failed to create a \"widget\" entity: an entity with the same primary key \"1\" (\"id\") already exists."
        })
    );
}

#[tokio::test]
async fn unknown_query_property_is_400() {
    let app = widget_router(&[]).await;
    let response = app.oneshot(get("/widgets?bogus=1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(
        body["message"],
        json!("Failed to query the \"widget\" model: unknown property \"bogus\".")
    );
}

#[tokio::test]
async fn list_filters_and_paginates() {
    let seed: Vec<Value> = (1..=5)
        .map(|i| json!({ "id": i, "name": if i % 2 == 0 { "even" } else { "odd" } }))
        .collect();
    let app = widget_router(&seed).await;

    let response = app.clone().oneshot(get("/widgets?name=even")).await.unwrap();
    let body = json_body(response).await;
    assert_eq!(body, json!([{ "id": 2, "name": "even" }, { "id": 4, "name": "even" }]));

    let response = app.clone().oneshot(get("/widgets?skip=3&take=1")).await.unwrap();
    let body = json_body(response).await;
    assert_eq!(body, json!([{ "id": 4, "name": "even" }]));

    let response = app.clone().oneshot(get("/widgets?cursor=2&take=2")).await.unwrap();
    let body = json_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[0]["id"], json!(3));
}

#[tokio::test]
async fn list_is_idempotent_without_mutations() {
    let app = widget_router(&[json!({ "id": 1, "name": "gizmo" }), json!({ "id": 2, "name": "gadget" })]).await;
    let first = json_body(app.clone().oneshot(get("/widgets?take=5")).await.unwrap()).await;
    let second = json_body(app.clone().oneshot(get("/widgets?take=5")).await.unwrap()).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn routes_mount_under_a_base_path() {
    let db = Database::new();
    let store = db.register("widget", &widget_definition()).unwrap();
    store.create(json!({ "id": 1, "name": "gizmo" })).await.unwrap();

    // Trailing slash on the base must not double up in the path.
    let app = db.rest_routes("widget", Some("/api/")).unwrap();
    let response = app.oneshot(get("/api/widgets/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn irregular_model_names_pluralize() {
    let db = Database::new();
    let store = db
        .register(
            "person",
            &ModelDefinition::new().primary_key("id", json!("a")).field("name"),
        )
        .unwrap();
    store.create(json!({ "id": "p1", "name": "Joe" })).await.unwrap();

    let app = db.rest_routes("person", None).unwrap();
    let response = app.oneshot(get("/people/p1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "id": "p1", "name": "Joe" }));
}

/// Records the clause each lookup receives, so tests can observe how
/// path ids were coerced before reaching the access layer.
#[derive(Default)]
struct RecordingModel {
    last_where: Mutex<Option<Where>>,
}

#[async_trait::async_trait]
impl ModelAccess for RecordingModel {
    async fn find_many(&self, _options: QueryOptions) -> Result<Vec<Value>, OperationError> {
        Ok(Vec::new())
    }

    async fn find_first(&self, query: StrictQuery) -> Result<Option<Value>, OperationError> {
        *self.last_where.lock().unwrap() = Some(query.where_);
        Ok(Some(json!({})))
    }

    async fn create(&self, fields: Value) -> Result<Value, OperationError> {
        Ok(fields)
    }

    async fn update(&self, query: UpdateQuery) -> Result<Option<Value>, OperationError> {
        *self.last_where.lock().unwrap() = Some(query.where_);
        Ok(Some(json!({})))
    }

    async fn delete(&self, query: StrictQuery) -> Result<Option<Value>, OperationError> {
        *self.last_where.lock().unwrap() = Some(query.where_);
        Ok(Some(json!({})))
    }
}

#[tokio::test]
async fn numeric_primary_keys_reach_the_access_layer_as_numbers() {
    let model = Arc::new(RecordingModel::default());
    let app = rest_routes("widget", &widget_definition(), model.clone(), None).unwrap();

    let response = app.oneshot(get("/widgets/42")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let clause = model.last_where.lock().unwrap().clone().unwrap();
    assert_eq!(clause.get("id"), Some(&Comparator::Equals(json!(42))));
}

#[tokio::test]
async fn text_primary_keys_stay_strings() {
    let definition = ModelDefinition::new().primary_key("id", json!("a")).field("name");
    let model = Arc::new(RecordingModel::default());
    let app = rest_routes("widget", &definition, model.clone(), None).unwrap();

    app.oneshot(get("/widgets/42")).await.unwrap();
    let clause = model.last_where.lock().unwrap().clone().unwrap();
    assert_eq!(clause.get("id"), Some(&Comparator::Equals(json!("42"))));
}
