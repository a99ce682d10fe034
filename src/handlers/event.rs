use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::{parse_id, JsonPayload};
use crate::context::CallerContext;
use crate::entities::events;
use crate::error::ServiceError;
use crate::models::event::{EventItemView, EventListView};
use crate::models::ListQuery;
use crate::AppState;

pub async fn create_event(
    State(state): State<AppState>,
    ctx: CallerContext,
    JsonPayload(payload): JsonPayload,
) -> Result<(StatusCode, Json<EventItemView>), ServiceError> {
    let event = state.events.create(&ctx, &payload).await?;
    Ok((StatusCode::CREATED, Json(event.into())))
}

pub async fn list_events(
    State(state): State<AppState>,
    ctx: CallerContext,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<EventListView>>, ServiceError> {
    let limit = query.resolve(&state.list_limits)?;
    let events = state.events.list(&ctx, limit).await?;

    Ok(Json(events.iter().map(EventListView::from).collect()))
}

pub async fn get_event(
    State(state): State<AppState>,
    ctx: CallerContext,
    Path(id): Path<String>,
) -> Result<Json<EventItemView>, ServiceError> {
    let id = parse_id::<events::Entity>(&id)?;
    let event = state.events.get(&ctx, id).await?;

    Ok(Json(event.into()))
}

pub async fn update_event(
    State(state): State<AppState>,
    ctx: CallerContext,
    Path(id): Path<String>,
    JsonPayload(payload): JsonPayload,
) -> Result<Json<EventItemView>, ServiceError> {
    let id = parse_id::<events::Entity>(&id)?;
    let event = state.events.update(&ctx, id, &payload).await?;

    Ok(Json(event.into()))
}

pub async fn remove_event(
    State(state): State<AppState>,
    ctx: CallerContext,
    Path(id): Path<String>,
) -> Result<StatusCode, ServiceError> {
    let id = parse_id::<events::Entity>(&id)?;
    state.events.remove(&ctx, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
