#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use cultural_registry::{config::ListLimits, context::CallerContext, router, AppState};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use serde_json::{json, Map, Value};
use std::env;
use tower::ServiceExt;
use uuid::Uuid;

pub const A1: Uuid = Uuid::from_u128(0x6d3d5c33_6e1a_4b1b_9e7e_1f5c2b3a4d01);
pub const A2: Uuid = Uuid::from_u128(0x6d3d5c33_6e1a_4b1b_9e7e_1f5c2b3a4d02);
pub const S1: Uuid = Uuid::from_u128(0x0e6a1f2b_3c4d_4e5f_8a9b_0c1d2e3f4a01);
pub const I1: Uuid = Uuid::from_u128(0x1e6a1f2b_3c4d_4e5f_8a9b_0c1d2e3f4a01);
pub const E1: Uuid = Uuid::from_u128(0x2e6a1f2b_3c4d_4e5f_8a9b_0c1d2e3f4a01);

/// Set up a migrated test database
/// Uses TEST_DATABASE_URL environment variable or falls back to in-memory SQLite
pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let database_url =
        env::var("TEST_DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string());

    let mut options = ConnectOptions::new(database_url);
    // Every connection to sqlite::memory: is its own database
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    Migrator::fresh(&db).await?;

    Ok(db)
}

/// Fresh database with agents A1 and A2, space S1, initiative I1 and event E1
pub async fn seeded_state() -> AppState {
    let db = setup_test_db().await.expect("Failed to set up test DB");
    let state = AppState::new(db, ListLimits::default());
    let ctx = CallerContext::for_agents([A1]);

    state
        .agents
        .create(&ctx, &payload(json!({ "id": A1, "name": "Agente Um" })))
        .await
        .expect("seed agent A1");
    state
        .agents
        .create(&ctx, &payload(json!({ "id": A2, "name": "Agente Dois", "culture": true })))
        .await
        .expect("seed agent A2");
    state
        .spaces
        .create(&ctx, &payload(json!({ "id": S1, "name": "Casa de Cultura", "createdBy": A1 })))
        .await
        .expect("seed space S1");
    state
        .initiatives
        .create(
            &ctx,
            &payload(json!({
                "id": I1,
                "name": "Circuito Cultural",
                "space": S1,
                "createdBy": A1,
            })),
        )
        .await
        .expect("seed initiative I1");
    state
        .events
        .create(
            &ctx,
            &payload(json!({
                "id": E1,
                "name": "Festival de Cordel",
                "space": S1,
                "initiative": I1,
                "createdBy": A1,
            })),
        )
        .await
        .expect("seed event E1");

    state
}

pub fn payload(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("payload must be a JSON object, got {}", other),
    }
}

pub fn as_agent(agent: Uuid) -> CallerContext {
    CallerContext::for_agents([agent])
}

/// Field names of a validation failure, in reported order
pub fn violations(
    err: cultural_registry::error::ServiceError,
) -> Vec<(String, String)> {
    match err {
        cultural_registry::error::ServiceError::ValidationFailed(v) => {
            v.into_iter().map(|v| (v.field, v.message)).collect()
        }
        other => panic!("expected a validation failure, got {:?}", other),
    }
}

pub fn test_router(state: AppState) -> Router {
    router(state)
}

/// Send one request and decode the JSON answer (`Null` for empty bodies)
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    agent: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(agent) = agent {
        builder = builder.header("X-Agent-Id", agent);
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    (status, json)
}
