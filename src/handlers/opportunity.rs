use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::{parse_id, JsonPayload};
use crate::context::CallerContext;
use crate::entities::opportunities;
use crate::error::ServiceError;
use crate::models::opportunity::{OpportunityItemView, OpportunityListView};
use crate::models::phase::PhaseListView;
use crate::models::ListQuery;
use crate::AppState;

pub async fn create_opportunity(
    State(state): State<AppState>,
    ctx: CallerContext,
    JsonPayload(payload): JsonPayload,
) -> Result<(StatusCode, Json<OpportunityItemView>), ServiceError> {
    let service = &state.opportunities;
    let created = service.create(&ctx, &payload).await?;
    let detail = service.detail_of(&ctx, created).await?;

    Ok((StatusCode::CREATED, Json(detail.into())))
}

pub async fn list_opportunities(
    State(state): State<AppState>,
    ctx: CallerContext,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<OpportunityListView>>, ServiceError> {
    let limit = query.resolve(&state.list_limits)?;
    let opportunities = state.opportunities.list(&ctx, limit).await?;

    Ok(Json(opportunities.iter().map(OpportunityListView::from).collect()))
}

pub async fn get_opportunity(
    State(state): State<AppState>,
    ctx: CallerContext,
    Path(id): Path<String>,
) -> Result<Json<OpportunityItemView>, ServiceError> {
    let id = parse_id::<opportunities::Entity>(&id)?;
    let detail = state.opportunities.detail(&ctx, id).await?;

    Ok(Json(detail.into()))
}

pub async fn update_opportunity(
    State(state): State<AppState>,
    ctx: CallerContext,
    Path(id): Path<String>,
    JsonPayload(payload): JsonPayload,
) -> Result<Json<OpportunityItemView>, ServiceError> {
    let id = parse_id::<opportunities::Entity>(&id)?;
    let service = &state.opportunities;
    let updated = service.update(&ctx, id, &payload).await?;
    let detail = service.detail_of(&ctx, updated).await?;

    Ok(Json(detail.into()))
}

pub async fn remove_opportunity(
    State(state): State<AppState>,
    ctx: CallerContext,
    Path(id): Path<String>,
) -> Result<StatusCode, ServiceError> {
    let id = parse_id::<opportunities::Entity>(&id)?;
    state.opportunities.remove(&ctx, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Ordered phases of one opportunity
pub async fn list_opportunity_phases(
    State(state): State<AppState>,
    ctx: CallerContext,
    Path(id): Path<String>,
) -> Result<Json<Vec<PhaseListView>>, ServiceError> {
    let id = parse_id::<opportunities::Entity>(&id)?;
    let phases = state.opportunities.phases(&ctx, id).await?;

    Ok(Json(phases.iter().map(PhaseListView::from).collect()))
}
