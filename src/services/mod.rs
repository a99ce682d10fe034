//! Resource services
//!
//! [`ResourceService`] owns the create / get / list / update / remove flow:
//! validation through the resource DTO, ownership scoping through the
//! repository, the explicit merge on update and the soft delete on remove.
//! Opportunities add their phase and detail reads on top.

pub mod opportunity;

use chrono::Utc;
use sea_orm::{
    prelude::DateTimeWithTimeZone, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection,
    DbErr, EntityTrait, IntoActiveModel, Order, SqlErr,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::context::CallerContext;
use crate::error::ServiceError;
use crate::models::{
    agent::AgentDto, event::EventDto, faq::FaqDto, initiative::InitiativeDto,
    opportunity::OpportunityDto, organization::OrganizationDto, phase::PhaseDto, space::SpaceDto,
    ResourceDto,
};
use crate::repositories::{Filter, Repository, SoftDeleteEntity};
use crate::validation::{messages, Field, Payload, ValidationMode};

pub type AgentService = ResourceService<AgentDto>;
pub type SpaceService = ResourceService<SpaceDto>;
pub type InitiativeService = ResourceService<InitiativeDto>;
pub type EventService = ResourceService<EventDto>;
pub type OrganizationService = ResourceService<OrganizationDto>;
pub type OpportunityService = ResourceService<OpportunityDto>;
pub type PhaseService = ResourceService<PhaseDto>;
pub type FaqService = ResourceService<FaqDto>;

type ModelOf<D> = <<D as ResourceDto>::Entity as EntityTrait>::Model;

pub fn now() -> DateTimeWithTimeZone {
    Utc::now().into()
}

pub struct ResourceService<D: ResourceDto> {
    repo: Repository<D::Entity>,
}

impl<D: ResourceDto> Clone for ResourceService<D> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

impl<D> ResourceService<D>
where
    D: ResourceDto,
    ModelOf<D>: Send + Sync + 'static + IntoActiveModel<D::ActiveModel>,
{
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            repo: Repository::new(db),
        }
    }

    pub async fn create(
        &self,
        ctx: &CallerContext,
        payload: &Payload,
    ) -> Result<ModelOf<D>, ServiceError> {
        let resource = <D::Entity as SoftDeleteEntity>::RESOURCE;

        let dto = D::validate(self.repo.db(), ctx, payload, ValidationMode::Create)
            .await
            .inspect_err(|e| warn!(resource, error = %e, "Rejected payload"))?;

        let created = self
            .repo
            .insert(dto.into_new_model(now())?)
            .await
            .map_err(id_taken)?;
        info!(resource, id = ?D::Entity::id_of(&created), "Created record");

        Ok(created)
    }

    pub async fn get(&self, ctx: &CallerContext, id: Uuid) -> Result<ModelOf<D>, ServiceError> {
        find_visible(&self.repo, ctx, id).await
    }

    pub async fn list(
        &self,
        ctx: &CallerContext,
        limit: u64,
    ) -> Result<Vec<ModelOf<D>>, ServiceError> {
        newest_first(&self.repo, ctx, Filter::visible(), limit).await
    }

    /// Explicit caller filter under the owned scope
    pub async fn find_by(
        &self,
        ctx: &CallerContext,
        condition: Condition,
        limit: u64,
    ) -> Result<Vec<ModelOf<D>>, ServiceError> {
        newest_first(&self.repo, ctx, Filter::owned().and(condition), limit).await
    }

    /// Explicit caller filter under the visible scope
    pub async fn find_one_by(
        &self,
        ctx: &CallerContext,
        condition: Condition,
    ) -> Result<Option<ModelOf<D>>, ServiceError> {
        Ok(self
            .repo
            .find_one_by(ctx, Filter::visible().and(condition))
            .await?)
    }

    pub async fn count(&self, ctx: &CallerContext) -> Result<u64, ServiceError> {
        Ok(self.repo.count(ctx, Filter::visible()).await?)
    }

    pub async fn update(
        &self,
        ctx: &CallerContext,
        id: Uuid,
        payload: &Payload,
    ) -> Result<ModelOf<D>, ServiceError> {
        let resource = <D::Entity as SoftDeleteEntity>::RESOURCE;
        let existing = self.get(ctx, id).await?;

        let dto = D::validate(self.repo.db(), ctx, payload, ValidationMode::Update)
            .await
            .inspect_err(|e| warn!(resource, %id, error = %e, "Rejected update"))?;
        if let Some(parent) = dto.parent() {
            reject_cycle(&self.repo, ctx, id, parent).await?;
        }

        let mut active: D::ActiveModel = existing.into_active_model();
        dto.merge(&mut active);
        touch(&mut active);

        let updated = self.repo.update(active).await?;
        info!(resource, %id, "Updated record");

        Ok(updated)
    }

    /// Soft delete, restricted to the caller's own records
    pub async fn remove(&self, ctx: &CallerContext, id: Uuid) -> Result<(), ServiceError> {
        let owned = self
            .repo
            .find_one_by(ctx, Filter::owned().and(D::Entity::id_column().eq(id)))
            .await?
            .ok_or(ServiceError::NotFound(<D::Entity as SoftDeleteEntity>::RESOURCE))?;

        let mut active: D::ActiveModel = owned.into_active_model();
        active.set(D::Entity::deleted_at_column(), Some(now()).into());
        self.repo.update(active).await?;
        info!(resource = <D::Entity as SoftDeleteEntity>::RESOURCE, %id, "Removed record");

        Ok(())
    }
}

/// Non-deleted record by id, visible to every caller
async fn find_visible<E>(
    repo: &Repository<E>,
    ctx: &CallerContext,
    id: Uuid,
) -> Result<E::Model, ServiceError>
where
    E: SoftDeleteEntity,
    E::Model: Send + Sync + 'static,
{
    repo.find_one_by(ctx, Filter::visible().and(E::id_column().eq(id)))
        .await?
        .ok_or(ServiceError::NotFound(E::RESOURCE))
}

/// Newest first, ties broken by id so pages are stable
async fn newest_first<E>(
    repo: &Repository<E>,
    ctx: &CallerContext,
    filter: Filter,
    limit: u64,
) -> Result<Vec<E::Model>, ServiceError>
where
    E: SoftDeleteEntity,
    E::Model: Send + Sync + 'static,
{
    let order = [
        (E::created_at_column(), Order::Desc),
        (E::id_column(), Order::Asc),
    ];

    Ok(repo.find_by(ctx, filter, &order, limit).await?)
}

/// Rejects a parent that is the record itself or one of its descendants
async fn reject_cycle<E>(
    repo: &Repository<E>,
    ctx: &CallerContext,
    id: Uuid,
    parent: &Field<Uuid>,
) -> Result<(), ServiceError>
where
    E: SoftDeleteEntity,
    E::Model: Send + Sync + 'static,
{
    if let Some(parent) = parent.present() {
        if repo.ancestors_include(ctx, *parent, id).await? {
            return Err(ServiceError::violation("parent", messages::CIRCULAR_REFERENCE));
        }
    }

    Ok(())
}

/// Stamp `updatedAt`
fn touch<A>(active: &mut A)
where
    A: ActiveModelTrait,
    A::Entity: SoftDeleteEntity,
{
    active.set(
        <A::Entity as SoftDeleteEntity>::updated_at_column(),
        Some(now()).into(),
    );
}

/// The id check in validation runs before the insert, so a concurrent create
/// can still take the id first. The primary key catches that case.
fn id_taken(err: DbErr) -> ServiceError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            ServiceError::violation("id", messages::ALREADY_USED)
        }
        _ => err.into(),
    }
}
