use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::{parse_id, JsonPayload};
use crate::context::CallerContext;
use crate::entities::faqs;
use crate::error::ServiceError;
use crate::models::faq::{FaqItemView, FaqListView};
use crate::models::ListQuery;
use crate::AppState;

pub async fn create_faq(
    State(state): State<AppState>,
    ctx: CallerContext,
    JsonPayload(payload): JsonPayload,
) -> Result<(StatusCode, Json<FaqItemView>), ServiceError> {
    let faq = state.faqs.create(&ctx, &payload).await?;
    Ok((StatusCode::CREATED, Json(faq.into())))
}

pub async fn list_faqs(
    State(state): State<AppState>,
    ctx: CallerContext,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<FaqListView>>, ServiceError> {
    let limit = query.resolve(&state.list_limits)?;
    let faqs = state.faqs.list(&ctx, limit).await?;

    Ok(Json(faqs.iter().map(FaqListView::from).collect()))
}

pub async fn get_faq(
    State(state): State<AppState>,
    ctx: CallerContext,
    Path(id): Path<String>,
) -> Result<Json<FaqItemView>, ServiceError> {
    let id = parse_id::<faqs::Entity>(&id)?;
    let faq = state.faqs.get(&ctx, id).await?;

    Ok(Json(faq.into()))
}

pub async fn update_faq(
    State(state): State<AppState>,
    ctx: CallerContext,
    Path(id): Path<String>,
    JsonPayload(payload): JsonPayload,
) -> Result<Json<FaqItemView>, ServiceError> {
    let id = parse_id::<faqs::Entity>(&id)?;
    let faq = state.faqs.update(&ctx, id, &payload).await?;

    Ok(Json(faq.into()))
}

pub async fn remove_faq(
    State(state): State<AppState>,
    ctx: CallerContext,
    Path(id): Path<String>,
) -> Result<StatusCode, ServiceError> {
    let id = parse_id::<faqs::Entity>(&id)?;
    state.faqs.remove(&ctx, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
