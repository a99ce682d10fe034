//! Persistence boundary shared by every resource
//!
//! Services never build queries against an entity directly: they go through
//! [`Repository`], which ANDs the caller's ownership scope and the
//! soft-delete predicate into whatever filter the service supplies.

use std::marker::PhantomData;

use sea_orm::{
    sea_query::{IntoCondition, ValueType},
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, IntoActiveModel, ModelTrait, Order, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use tracing::debug;
use uuid::Uuid;

use crate::context::CallerContext;

/// Longest parent chain walked when looking for cycles
const MAX_ANCESTOR_DEPTH: usize = 64;

/// An entity with a UUID identity and created/updated/deleted audit columns
pub trait SoftDeleteEntity: EntityTrait {
    /// Resource name used in logs and "not found" messages
    const RESOURCE: &'static str;

    fn id_column() -> Self::Column;

    fn created_at_column() -> Self::Column;

    fn updated_at_column() -> Self::Column;

    fn deleted_at_column() -> Self::Column;

    fn id_of(model: &Self::Model) -> Option<Uuid> {
        <Uuid as ValueType>::try_from(model.get(Self::id_column())).ok()
    }

    /// Columns holding the agent(s) that own a record. Empty means every
    /// caller owns every record.
    fn owner_columns() -> Vec<Self::Column> {
        Vec::new()
    }

    /// Self-referencing parent column, if the entity forms a hierarchy
    fn parent_column() -> Option<Self::Column> {
        None
    }
}

/// Implicit restriction applied on top of an explicit filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    /// Every record that is not soft-deleted
    #[default]
    Visible,
    /// Records owned by one of the caller's agents
    Owned,
}

/// Explicit query filter. The scope and the soft-delete flag are always
/// applied; an explicit condition can only narrow the result.
#[derive(Debug, Clone)]
pub struct Filter {
    condition: Condition,
    scope: Scope,
    include_deleted: bool,
}

impl Default for Filter {
    fn default() -> Self {
        Self::visible()
    }
}

impl Filter {
    pub fn visible() -> Self {
        Self {
            condition: Condition::all(),
            scope: Scope::Visible,
            include_deleted: false,
        }
    }

    pub fn owned() -> Self {
        Self {
            scope: Scope::Owned,
            ..Self::visible()
        }
    }

    /// Narrow the filter with an extra condition
    pub fn and<C: IntoCondition>(mut self, condition: C) -> Self {
        self.condition = self.condition.add(condition.into_condition());
        self
    }

    /// Soft-deleted rows are excluded unless this is set
    pub fn include_deleted(mut self, include: bool) -> Self {
        self.include_deleted = include;
        self
    }
}

/// Repository over one soft-deletable entity
pub struct Repository<E> {
    db: DatabaseConnection,
    entity: PhantomData<E>,
}

impl<E> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            entity: PhantomData,
        }
    }
}

impl<E> Repository<E>
where
    E: SoftDeleteEntity,
    E::Model: Send + Sync + 'static,
{
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            entity: PhantomData,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// An owned scope for a caller with no agents can never match
    fn matches_nothing(ctx: &CallerContext, filter: &Filter) -> bool {
        filter.scope == Scope::Owned
            && !E::owner_columns().is_empty()
            && ctx.is_anonymous()
    }

    fn scoped(ctx: &CallerContext, filter: Filter) -> Condition {
        let mut condition = Condition::all().add(filter.condition);

        if !filter.include_deleted {
            condition = condition.add(E::deleted_at_column().is_null());
        }

        if filter.scope == Scope::Owned {
            let owners = E::owner_columns();
            if !owners.is_empty() {
                let agents = ctx.agent_ids().to_vec();
                let mut any_owner = Condition::any();
                for column in owners {
                    any_owner = any_owner.add(column.is_in(agents.clone()));
                }
                condition = condition.add(any_owner);
            }
        }

        condition
    }

    /// Ordered, limited query. Soft-deleted rows never show up unless the
    /// filter asks for them.
    pub async fn find_by(
        &self,
        ctx: &CallerContext,
        filter: Filter,
        order: &[(E::Column, Order)],
        limit: u64,
    ) -> Result<Vec<E::Model>, DbErr> {
        if Self::matches_nothing(ctx, &filter) {
            return Ok(Vec::new());
        }

        let mut select = E::find().filter(Self::scoped(ctx, filter));
        for (column, direction) in order {
            select = select.order_by(*column, direction.clone());
        }

        select.limit(limit).all(&self.db).await
    }

    pub async fn find_one_by(
        &self,
        ctx: &CallerContext,
        filter: Filter,
    ) -> Result<Option<E::Model>, DbErr> {
        if Self::matches_nothing(ctx, &filter) {
            return Ok(None);
        }

        E::find()
            .filter(Self::scoped(ctx, filter))
            .one(&self.db)
            .await
    }

    pub async fn count(&self, ctx: &CallerContext, filter: Filter) -> Result<u64, DbErr> {
        if Self::matches_nothing(ctx, &filter) {
            return Ok(0);
        }

        E::find()
            .filter(Self::scoped(ctx, filter))
            .count(&self.db)
            .await
    }

    pub async fn exists(
        &self,
        ctx: &CallerContext,
        id: Uuid,
        include_deleted: bool,
    ) -> Result<bool, DbErr> {
        let filter = Filter::visible()
            .and(E::id_column().eq(id))
            .include_deleted(include_deleted);

        Ok(self.find_one_by(ctx, filter).await?.is_some())
    }

    pub async fn insert<A>(&self, active: A) -> Result<E::Model, DbErr>
    where
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
    {
        debug!(resource = E::RESOURCE, id = ?active.get(E::id_column()), "Inserting record");
        active.insert(&self.db).await
    }

    pub async fn update<A>(&self, active: A) -> Result<E::Model, DbErr>
    where
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
    {
        debug!(resource = E::RESOURCE, id = ?active.get(E::id_column()), "Updating record");
        active.update(&self.db).await
    }

    /// True when `id` appears on the parent chain that starts at `start`
    /// (`start` itself included). Soft-deleted ancestors still count.
    pub async fn ancestors_include(
        &self,
        ctx: &CallerContext,
        start: Uuid,
        id: Uuid,
    ) -> Result<bool, DbErr> {
        let Some(parent_column) = E::parent_column() else {
            return Ok(false);
        };

        let mut cursor = Some(start);
        let mut depth = 0;

        while let Some(current) = cursor {
            if current == id {
                return Ok(true);
            }
            if depth >= MAX_ANCESTOR_DEPTH {
                break;
            }

            let filter = Filter::visible()
                .and(E::id_column().eq(current))
                .include_deleted(true);

            cursor = self.find_one_by(ctx, filter).await?.and_then(|model| {
                <Option<Uuid> as ValueType>::try_from(model.get(parent_column))
                    .ok()
                    .flatten()
            });
            depth += 1;
        }

        Ok(false)
    }
}
