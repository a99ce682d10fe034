use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::{parse_id, JsonPayload};
use crate::context::CallerContext;
use crate::entities::initiatives;
use crate::error::ServiceError;
use crate::models::initiative::{InitiativeItemView, InitiativeListView};
use crate::models::ListQuery;
use crate::AppState;

pub async fn create_initiative(
    State(state): State<AppState>,
    ctx: CallerContext,
    JsonPayload(payload): JsonPayload,
) -> Result<(StatusCode, Json<InitiativeItemView>), ServiceError> {
    let initiative = state.initiatives.create(&ctx, &payload).await?;
    Ok((StatusCode::CREATED, Json(initiative.into())))
}

pub async fn list_initiatives(
    State(state): State<AppState>,
    ctx: CallerContext,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<InitiativeListView>>, ServiceError> {
    let limit = query.resolve(&state.list_limits)?;
    let initiatives = state.initiatives.list(&ctx, limit).await?;

    Ok(Json(initiatives.iter().map(InitiativeListView::from).collect()))
}

pub async fn get_initiative(
    State(state): State<AppState>,
    ctx: CallerContext,
    Path(id): Path<String>,
) -> Result<Json<InitiativeItemView>, ServiceError> {
    let id = parse_id::<initiatives::Entity>(&id)?;
    let initiative = state.initiatives.get(&ctx, id).await?;

    Ok(Json(initiative.into()))
}

pub async fn update_initiative(
    State(state): State<AppState>,
    ctx: CallerContext,
    Path(id): Path<String>,
    JsonPayload(payload): JsonPayload,
) -> Result<Json<InitiativeItemView>, ServiceError> {
    let id = parse_id::<initiatives::Entity>(&id)?;
    let initiative = state.initiatives.update(&ctx, id, &payload).await?;

    Ok(Json(initiative.into()))
}

pub async fn remove_initiative(
    State(state): State<AppState>,
    ctx: CallerContext,
    Path(id): Path<String>,
) -> Result<StatusCode, ServiceError> {
    let id = parse_id::<initiatives::Entity>(&id)?;
    state.initiatives.remove(&ctx, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
