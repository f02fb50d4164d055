//! Example consumer: a mock REST server for two declared models.
//!
//! Run from repo root: `cargo run -p example-consumer`
//! Then e.g. `curl localhost:3000/api/users` or `curl localhost:3000/api/people/p1`.

use axum::Router;
use mockrest_sdk::{common_routes, Database, ModelAccess, ModelDefinition};
use serde_json::json;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("mockrest_sdk=debug")),
        )
        .init();

    let db = Database::new();

    // Numeric primary key: /api/users and /api/users/:id.
    let users = db.register(
        "user",
        &ModelDefinition::new()
            .primary_key("id", json!(0))
            .field("name")
            .field("email"),
    )?;
    users
        .create(json!({ "id": 1, "name": "Joe", "email": "joe@example.com" }))
        .await?;
    users
        .create(json!({ "id": 2, "name": "Kate", "email": "kate@example.com" }))
        .await?;

    // String primary key and an irregular plural: /api/people/:id.
    let people = db.register(
        "person",
        &ModelDefinition::new()
            .primary_key("id", json!(""))
            .field("name"),
    )?;
    people.create(json!({ "id": "p1", "name": "Frank" })).await?;

    let app = Router::new()
        .merge(common_routes())
        .merge(db.rest_routes("user", Some("/api"))?)
        .merge(db.rest_routes("person", Some("/api"))?);

    let listener = TcpListener::bind("127.0.0.1:3000").await?;
    tracing::info!("mock API listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
