use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::{parse_id, JsonPayload};
use crate::context::CallerContext;
use crate::entities::phases;
use crate::error::ServiceError;
use crate::models::phase::{PhaseItemView, PhaseListView};
use crate::models::ListQuery;
use crate::AppState;

pub async fn create_phase(
    State(state): State<AppState>,
    ctx: CallerContext,
    JsonPayload(payload): JsonPayload,
) -> Result<(StatusCode, Json<PhaseItemView>), ServiceError> {
    let phase = state.phases.create(&ctx, &payload).await?;
    Ok((StatusCode::CREATED, Json(phase.into())))
}

pub async fn list_phases(
    State(state): State<AppState>,
    ctx: CallerContext,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<PhaseListView>>, ServiceError> {
    let limit = query.resolve(&state.list_limits)?;
    let phases = state.phases.list(&ctx, limit).await?;

    Ok(Json(phases.iter().map(PhaseListView::from).collect()))
}

pub async fn get_phase(
    State(state): State<AppState>,
    ctx: CallerContext,
    Path(id): Path<String>,
) -> Result<Json<PhaseItemView>, ServiceError> {
    let id = parse_id::<phases::Entity>(&id)?;
    let phase = state.phases.get(&ctx, id).await?;

    Ok(Json(phase.into()))
}

pub async fn update_phase(
    State(state): State<AppState>,
    ctx: CallerContext,
    Path(id): Path<String>,
    JsonPayload(payload): JsonPayload,
) -> Result<Json<PhaseItemView>, ServiceError> {
    let id = parse_id::<phases::Entity>(&id)?;
    let phase = state.phases.update(&ctx, id, &payload).await?;

    Ok(Json(phase.into()))
}

pub async fn remove_phase(
    State(state): State<AppState>,
    ctx: CallerContext,
    Path(id): Path<String>,
) -> Result<StatusCode, ServiceError> {
    let id = parse_id::<phases::Entity>(&id)?;
    state.phases.remove(&ctx, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
