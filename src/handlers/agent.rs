use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::{parse_id, JsonPayload};
use crate::context::CallerContext;
use crate::entities::agents;
use crate::error::ServiceError;
use crate::models::agent::{AgentItemView, AgentListView};
use crate::models::ListQuery;
use crate::AppState;

pub async fn create_agent(
    State(state): State<AppState>,
    ctx: CallerContext,
    JsonPayload(payload): JsonPayload,
) -> Result<(StatusCode, Json<AgentItemView>), ServiceError> {
    let agent = state.agents.create(&ctx, &payload).await?;
    Ok((StatusCode::CREATED, Json(agent.into())))
}

pub async fn list_agents(
    State(state): State<AppState>,
    ctx: CallerContext,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<AgentListView>>, ServiceError> {
    let limit = query.resolve(&state.list_limits)?;
    let agents = state.agents.list(&ctx, limit).await?;

    Ok(Json(agents.iter().map(AgentListView::from).collect()))
}

pub async fn get_agent(
    State(state): State<AppState>,
    ctx: CallerContext,
    Path(id): Path<String>,
) -> Result<Json<AgentItemView>, ServiceError> {
    let id = parse_id::<agents::Entity>(&id)?;
    let agent = state.agents.get(&ctx, id).await?;

    Ok(Json(agent.into()))
}

pub async fn update_agent(
    State(state): State<AppState>,
    ctx: CallerContext,
    Path(id): Path<String>,
    JsonPayload(payload): JsonPayload,
) -> Result<Json<AgentItemView>, ServiceError> {
    let id = parse_id::<agents::Entity>(&id)?;
    let agent = state.agents.update(&ctx, id, &payload).await?;

    Ok(Json(agent.into()))
}

pub async fn remove_agent(
    State(state): State<AppState>,
    ctx: CallerContext,
    Path(id): Path<String>,
) -> Result<StatusCode, ServiceError> {
    let id = parse_id::<agents::Entity>(&id)?;
    state.agents.remove(&ctx, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
