mod common;

use axum::http::{Method, StatusCode};
use cultural_registry::context::CallerContext;
use cultural_registry::error::ServiceError;
use cultural_registry::validation::messages;
use serde_json::json;
use uuid::Uuid;

use crate::common::{as_agent, payload, seeded_state, send, test_router, violations, A1, A2, I1, S1};

#[tokio::test]
async fn test_agent_defaults_and_views() {
    let state = seeded_state().await;
    let id = Uuid::new_v4();

    let agent = state
        .agents
        .create(
            &CallerContext::anonymous(),
            &payload(json!({ "id": id, "name": "Mestre Vitalino", "longBio": "Ceramista" })),
        )
        .await
        .unwrap();
    assert!(!agent.culture);
    assert_eq!(agent.long_bio.as_deref(), Some("Ceramista"));

    let app = test_router(state);
    let (status, list) = send(&app, Method::GET, "/api/agents", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let entry = list
        .as_array()
        .unwrap()
        .iter()
        .find(|a| a["id"] == json!(id))
        .unwrap();
    assert!(entry.get("longBio").is_none());
    assert!(entry.get("extraFields").is_none());

    let (status, item) = send(&app, Method::GET, &format!("/api/agents/{}", id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item["longBio"], json!("Ceramista"));
    assert_eq!(item["culture"], json!(false));
}

#[tokio::test]
async fn test_agent_field_rules() {
    let state = seeded_state().await;

    let err = state
        .agents
        .create(
            &CallerContext::anonymous(),
            &payload(json!({
                "id": Uuid::new_v4(),
                "name": "Agente",
                "shortBio": "b".repeat(101),
                "culture": "yes",
            })),
        )
        .await
        .unwrap_err();

    assert_eq!(
        violations(err),
        vec![
            ("shortBio".to_string(), messages::too_long(100)),
            ("culture".to_string(), messages::NOT_BOOL.to_string()),
        ]
    );
}

#[tokio::test]
async fn test_agent_is_owned_by_itself() {
    let state = seeded_state().await;

    let err = state.agents.remove(&as_agent(A1), A2).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound("Agent")));

    state.agents.remove(&as_agent(A2), A2).await.unwrap();
    assert!(state.agents.get(&as_agent(A1), A2).await.is_err());

    // A removed agent can no longer be referenced
    let err = state
        .spaces
        .create(
            &as_agent(A1),
            &payload(json!({ "id": Uuid::new_v4(), "name": "Galpão", "createdBy": A2 })),
        )
        .await
        .unwrap_err();
    assert_eq!(
        violations(err),
        vec![("createdBy".to_string(), messages::ID_NOT_EXIST.to_string())]
    );
}

#[tokio::test]
async fn test_space_hierarchy_rejects_cycles() {
    let state = seeded_state().await;
    let ctx = as_agent(A1);
    let child = Uuid::new_v4();

    state
        .spaces
        .create(
            &ctx,
            &payload(json!({ "id": child, "name": "Sala 1", "parent": S1, "createdBy": A1 })),
        )
        .await
        .unwrap();

    let err = state
        .spaces
        .update(&ctx, S1, &payload(json!({ "parent": child })))
        .await
        .unwrap_err();
    assert_eq!(
        violations(err),
        vec![("parent".to_string(), messages::CIRCULAR_REFERENCE.to_string())]
    );

    let unchanged = state.spaces.get(&ctx, S1).await.unwrap();
    assert!(unchanged.parent_id.is_none());
    assert!(unchanged.updated_at.is_none());
}

#[tokio::test]
async fn test_initiative_update_keeps_omitted_fields() {
    let state = seeded_state().await;
    let ctx = as_agent(A1);

    let updated = state
        .initiatives
        .update(&ctx, I1, &payload(json!({ "extraFields": { "period": "2024" } })))
        .await
        .unwrap();

    assert_eq!(updated.name, "Circuito Cultural");
    assert_eq!(updated.space_id, Some(S1));
    assert_eq!(updated.extra_fields, Some(json!({ "period": "2024" })));
    assert!(updated.updated_at.is_some());
}

#[tokio::test]
async fn test_organization_owned_by_owner_or_creator() {
    let state = seeded_state().await;
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();

    for id in [first, second] {
        state
            .organizations
            .create(
                &as_agent(A1),
                &payload(json!({
                    "id": id,
                    "name": "Associação Cultural",
                    "description": "Grupo de teatro",
                    "owner": A2,
                    "createdBy": A1,
                })),
            )
            .await
            .unwrap();
    }

    let outsider = Uuid::new_v4();
    state
        .agents
        .create(&as_agent(outsider), &payload(json!({ "id": outsider, "name": "Visitante" })))
        .await
        .unwrap();

    let err = state.organizations.remove(&as_agent(outsider), first).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound("Organization")));

    state.organizations.remove(&as_agent(A2), first).await.unwrap();
    state.organizations.remove(&as_agent(A1), second).await.unwrap();
    assert_eq!(state.organizations.count(&as_agent(A1)).await.unwrap(), 0);
}

#[tokio::test]
async fn test_organization_requires_owner() {
    let state = seeded_state().await;

    let err = state
        .organizations
        .create(
            &as_agent(A1),
            &payload(json!({ "id": Uuid::new_v4(), "name": "Coletivo", "createdBy": A1 })),
        )
        .await
        .unwrap_err();

    assert_eq!(
        violations(err),
        vec![("owner".to_string(), messages::NOT_BLANK.to_string())]
    );
}

#[tokio::test]
async fn test_phase_field_rules() {
    let state = seeded_state().await;
    let ctx = as_agent(A1);
    let opportunity = Uuid::new_v4();

    state
        .opportunities
        .create(&ctx, &payload(json!({ "id": opportunity, "name": "Edital", "createdBy": A1 })))
        .await
        .unwrap();

    let err = state
        .phases
        .create(
            &ctx,
            &payload(json!({
                "id": Uuid::new_v4(),
                "name": "Fase",
                "startDate": "15/08/2024",
                "sequence": "1",
                "createdBy": A1,
                "opportunity": Uuid::new_v4(),
            })),
        )
        .await
        .unwrap_err();
    assert_eq!(
        violations(err),
        vec![
            ("startDate".to_string(), messages::INVALID_DATETIME.to_string()),
            ("sequence".to_string(), messages::NOT_INT.to_string()),
            ("opportunity".to_string(), messages::ID_NOT_EXIST.to_string()),
        ]
    );

    let id = Uuid::new_v4();
    let phase = state
        .phases
        .create(
            &ctx,
            &payload(json!({
                "id": id,
                "name": "Fase",
                "createdBy": A1,
                "opportunity": opportunity,
            })),
        )
        .await
        .unwrap();
    assert!(!phase.status);

    let err = state
        .phases
        .update(&ctx, id, &payload(json!({ "status": null, "name": "" })))
        .await
        .unwrap_err();
    assert_eq!(
        violations(err),
        vec![
            ("name".to_string(), messages::too_short(1)),
            ("status".to_string(), messages::NOT_NULL.to_string()),
        ]
    );

    let updated = state
        .phases
        .update(&ctx, id, &payload(json!({ "status": true, "sequence": 3 })))
        .await
        .unwrap();
    assert!(updated.status);
    assert_eq!(updated.sequence, Some(3));
    assert_eq!(updated.name, "Fase");
}

#[tokio::test]
async fn test_faq_lifecycle_over_http() {
    let app = test_router(seeded_state().await);
    let id = Uuid::new_v4();

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/faqs",
        None,
        Some(json!({
            "id": id,
            "question": "Quem pode se inscrever?",
            "answer": "Agentes culturais.",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body {}", created);
    assert_eq!(created["active"], json!(true));

    let (status, updated) = send(
        &app,
        Method::PATCH,
        &format!("/api/faqs/{}", id),
        None,
        Some(json!({ "active": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["active"], json!(false));
    assert_eq!(updated["question"], json!("Quem pode se inscrever?"));

    // No owner: even an anonymous caller may remove it
    let (status, _) = send(&app, Method::DELETE, &format!("/api/faqs/{}", id), None, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, &format!("/api/faqs/{}", id), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_faq_question_bounds() {
    let state = seeded_state().await;

    let err = state
        .faqs
        .create(
            &CallerContext::anonymous(),
            &payload(json!({ "id": Uuid::new_v4(), "question": "q".repeat(256), "answer": "A" })),
        )
        .await
        .unwrap_err();

    assert_eq!(
        violations(err),
        vec![
            ("question".to_string(), messages::too_long(255)),
            ("answer".to_string(), messages::too_short(2)),
        ]
    );
}
