use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::{parse_id, JsonPayload};
use crate::context::CallerContext;
use crate::entities::organizations;
use crate::error::ServiceError;
use crate::models::organization::{OrganizationItemView, OrganizationListView};
use crate::models::ListQuery;
use crate::AppState;

pub async fn create_organization(
    State(state): State<AppState>,
    ctx: CallerContext,
    JsonPayload(payload): JsonPayload,
) -> Result<(StatusCode, Json<OrganizationItemView>), ServiceError> {
    let organization = state.organizations.create(&ctx, &payload).await?;
    Ok((StatusCode::CREATED, Json(organization.into())))
}

pub async fn list_organizations(
    State(state): State<AppState>,
    ctx: CallerContext,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<OrganizationListView>>, ServiceError> {
    let limit = query.resolve(&state.list_limits)?;
    let organizations = state.organizations.list(&ctx, limit).await?;

    Ok(Json(organizations.iter().map(OrganizationListView::from).collect()))
}

pub async fn get_organization(
    State(state): State<AppState>,
    ctx: CallerContext,
    Path(id): Path<String>,
) -> Result<Json<OrganizationItemView>, ServiceError> {
    let id = parse_id::<organizations::Entity>(&id)?;
    let organization = state.organizations.get(&ctx, id).await?;

    Ok(Json(organization.into()))
}

pub async fn update_organization(
    State(state): State<AppState>,
    ctx: CallerContext,
    Path(id): Path<String>,
    JsonPayload(payload): JsonPayload,
) -> Result<Json<OrganizationItemView>, ServiceError> {
    let id = parse_id::<organizations::Entity>(&id)?;
    let organization = state.organizations.update(&ctx, id, &payload).await?;

    Ok(Json(organization.into()))
}

pub async fn remove_organization(
    State(state): State<AppState>,
    ctx: CallerContext,
    Path(id): Path<String>,
) -> Result<StatusCode, ServiceError> {
    let id = parse_id::<organizations::Entity>(&id)?;
    state.organizations.remove(&ctx, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
