mod common;

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::{seeded_state, send, test_router, A1, A2, S1};

const U1: &str = "3f1c9a7e-2b4d-4c6e-8f10-a2b3c4d5e6f7";

async fn app() -> axum::Router {
    test_router(seeded_state().await)
}

fn a1() -> String {
    A1.to_string()
}

async fn create_edital_x(app: &axum::Router) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/opportunities",
        Some(&a1()),
        Some(json!({ "id": U1, "name": "Edital X", "createdBy": A1 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body {}", body);
    body
}

#[tokio::test]
async fn test_health() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("ok"));
}

#[tokio::test]
async fn test_create_opportunity_item_view() {
    let app = app().await;
    let body = create_edital_x(&app).await;

    assert_eq!(body["id"], json!(U1));
    assert_eq!(body["name"], json!("Edital X"));
    assert_eq!(body["parent"], Value::Null);
    assert_eq!(body["space"], Value::Null);
    assert_eq!(body["initiative"], Value::Null);
    assert_eq!(body["event"], Value::Null);
    assert_eq!(body["createdBy"], json!({ "id": A1 }));
    assert_eq!(body["phases"], json!([]));
    assert_eq!(body["updatedAt"], Value::Null);
    assert_eq!(body["deletedAt"], Value::Null);

    // ATOM, e.g. 2024-09-06T10:00:00+00:00
    let created_at = body["createdAt"].as_str().unwrap();
    assert_eq!(created_at.len(), 25);
    assert!(created_at.ends_with("+00:00"));
}

#[tokio::test]
async fn test_update_opportunity_space() {
    let app = app().await;
    create_edital_x(&app).await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/opportunities/{}", U1),
        Some(&a1()),
        Some(json!({ "space": S1 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "unexpected body {}", body);
    assert_eq!(body["space"], json!({ "id": S1 }));
    assert_eq!(body["name"], json!("Edital X"));
    assert_eq!(body["createdBy"], json!({ "id": A1 }));
    assert!(body["updatedAt"].is_string());
}

#[tokio::test]
async fn test_remove_then_get_is_not_found() {
    let app = app().await;
    create_edital_x(&app).await;
    let uri = format!("/api/opportunities/{}", U1);

    let (status, body) = send(&app, Method::DELETE, &uri, Some(&a1()), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({
            "error_message": "not_found",
            "error_details": { "description": "The requested Opportunity was not found." },
        })
    );

    let (status, body) = send(&app, Method::GET, "/api/opportunities", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_remove_by_non_owner_is_not_found() {
    let app = app().await;
    create_edital_x(&app).await;
    let uri = format!("/api/opportunities/{}", U1);

    let (status, body) = send(&app, Method::DELETE, &uri, Some(&A2.to_string()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_message"], json!("not_found"));

    let (status, _) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_validation_failure_shape() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/opportunities",
        Some(&a1()),
        Some(json!({ "name": "Edital X", "space": Uuid::new_v4() })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "error_message": "not_valid",
            "error_details": [
                { "field": "id", "message": "This value should not be blank." },
                { "field": "space", "message": "This id does not exist." },
                { "field": "createdBy", "message": "This value should not be blank." },
            ],
        })
    );
}

#[tokio::test]
async fn test_unreadable_body_is_not_valid() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/opportunities",
        Some(&a1()),
        Some(json!(["not", "an", "object"])),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_message"], json!("not_valid"));
    assert_eq!(body["error_details"][0]["field"], json!("body"));
}

#[tokio::test]
async fn test_malformed_agent_header_is_unauthorized() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/api/opportunities", Some("nobody"), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error_message"], json!("unauthorized"));
}

#[tokio::test]
async fn test_list_limit_validation() {
    let app = app().await;

    for limit in ["0", "101", "abc"] {
        let (status, body) = send(
            &app,
            Method::GET,
            &format!("/api/opportunities?limit={}", limit),
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "limit={}", limit);
        assert_eq!(body["error_details"][0]["field"], json!("limit"));
    }

    let (status, body) = send(&app, Method::GET, "/api/spaces?limit=1", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_non_uuid_path_is_not_found() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/api/spaces/not-a-uuid", None, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["error_details"]["description"],
        json!("The requested Space was not found.")
    );
}

#[tokio::test]
async fn test_opportunity_views_and_phases() {
    let app = app().await;
    create_edital_x(&app).await;

    let child = Uuid::new_v4();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/opportunities",
        Some(&a1()),
        Some(json!({
            "id": child,
            "name": "Edital X - Etapa 2",
            "parent": U1,
            "createdBy": A1,
            "extraFields": { "type": "Cultural" },
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body {}", body);
    assert_eq!(body["parent"]["id"], json!(U1));
    assert_eq!(body["parent"]["name"], json!("Edital X"));
    assert_eq!(body["parent"]["parent"], Value::Null);

    for (name, sequence) in [("Inscrição", 1), ("Seleção", 2)] {
        let (status, phase) = send(
            &app,
            Method::POST,
            "/api/phases",
            Some(&a1()),
            Some(json!({
                "id": Uuid::new_v4(),
                "name": name,
                "startDate": "2024-08-15",
                "endDate": "2024-09-06T10:00:00-03:00",
                "sequence": sequence,
                "createdBy": A1,
                "opportunity": child,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "unexpected body {}", phase);
        assert_eq!(phase["status"], json!(false));
        assert_eq!(phase["startDate"], json!("2024-08-15T00:00:00+00:00"));
    }

    let uri = format!("/api/opportunities/{}", child);
    let (status, item) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item["extraFields"], json!({ "type": "Cultural" }));
    let names: Vec<&str> = item["phases"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Inscrição", "Seleção"]);
    assert_eq!(item["phases"][0].as_object().unwrap().len(), 2);

    let (status, phases) = send(
        &app,
        Method::GET,
        &format!("/api/opportunities/{}/phases", child),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(phases.as_array().unwrap().len(), 2);
    assert_eq!(phases[0]["sequence"], json!(1));
    assert_eq!(phases[0]["opportunity"], json!({ "id": child }));

    let (status, list) = send(&app, Method::GET, "/api/opportunities", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let entry = list
        .as_array()
        .unwrap()
        .iter()
        .find(|o| o["id"] == json!(child))
        .unwrap();
    assert_eq!(entry["parent"], json!({ "id": U1 }));
    assert!(entry.get("extraFields").is_none());
    assert!(entry.get("phases").is_none());
}
