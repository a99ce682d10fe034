use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::{parse_id, JsonPayload};
use crate::context::CallerContext;
use crate::entities::spaces;
use crate::error::ServiceError;
use crate::models::space::{SpaceItemView, SpaceListView};
use crate::models::ListQuery;
use crate::AppState;

pub async fn create_space(
    State(state): State<AppState>,
    ctx: CallerContext,
    JsonPayload(payload): JsonPayload,
) -> Result<(StatusCode, Json<SpaceItemView>), ServiceError> {
    let space = state.spaces.create(&ctx, &payload).await?;
    Ok((StatusCode::CREATED, Json(space.into())))
}

pub async fn list_spaces(
    State(state): State<AppState>,
    ctx: CallerContext,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<SpaceListView>>, ServiceError> {
    let limit = query.resolve(&state.list_limits)?;
    let spaces = state.spaces.list(&ctx, limit).await?;

    Ok(Json(spaces.iter().map(SpaceListView::from).collect()))
}

pub async fn get_space(
    State(state): State<AppState>,
    ctx: CallerContext,
    Path(id): Path<String>,
) -> Result<Json<SpaceItemView>, ServiceError> {
    let id = parse_id::<spaces::Entity>(&id)?;
    let space = state.spaces.get(&ctx, id).await?;

    Ok(Json(space.into()))
}

pub async fn update_space(
    State(state): State<AppState>,
    ctx: CallerContext,
    Path(id): Path<String>,
    JsonPayload(payload): JsonPayload,
) -> Result<Json<SpaceItemView>, ServiceError> {
    let id = parse_id::<spaces::Entity>(&id)?;
    let space = state.spaces.update(&ctx, id, &payload).await?;

    Ok(Json(space.into()))
}

pub async fn remove_space(
    State(state): State<AppState>,
    ctx: CallerContext,
    Path(id): Path<String>,
) -> Result<StatusCode, ServiceError> {
    let id = parse_id::<spaces::Entity>(&id)?;
    state.spaces.remove(&ctx, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
