//! Opportunity reads beyond the shared flow
//!
//! An opportunity knows its phases (ordered by `sequence`, nulls last, then
//! by creation time) and can assemble the detail its item view renders.

use sea_orm::{ColumnTrait, Order};
use uuid::Uuid;

use super::OpportunityService;
use crate::context::CallerContext;
use crate::entities::{opportunities, phases};
use crate::error::ServiceError;
use crate::models::opportunity::OpportunityDetail;
use crate::repositories::{Filter, Repository};

/// Upper bound on phases loaded for one opportunity
pub const MAX_PHASES: u64 = 500;

impl OpportunityService {
    /// Non-deleted phases of a visible opportunity
    pub async fn phases(
        &self,
        ctx: &CallerContext,
        id: Uuid,
    ) -> Result<Vec<phases::Model>, ServiceError> {
        let opportunity = self.get(ctx, id).await?;
        self.load_phases(ctx, opportunity.id).await
    }

    pub async fn detail(
        &self,
        ctx: &CallerContext,
        id: Uuid,
    ) -> Result<OpportunityDetail, ServiceError> {
        let opportunity = self.get(ctx, id).await?;
        self.detail_of(ctx, opportunity).await
    }

    /// Phases plus the parent one level up. A parent that is gone stays a
    /// bare reference.
    pub async fn detail_of(
        &self,
        ctx: &CallerContext,
        opportunity: opportunities::Model,
    ) -> Result<OpportunityDetail, ServiceError> {
        let phases = self.load_phases(ctx, opportunity.id).await?;

        let parent = match opportunity.parent_id {
            Some(parent_id) => {
                let filter = Filter::visible().and(opportunities::Column::Id.eq(parent_id));
                match self.repo.find_one_by(ctx, filter).await? {
                    Some(parent) => {
                        let parent_phases = self.load_phases(ctx, parent.id).await?;
                        Some(Box::new(OpportunityDetail {
                            opportunity: parent,
                            phases: parent_phases,
                            parent: None,
                        }))
                    }
                    None => None,
                }
            }
            None => None,
        };

        Ok(OpportunityDetail {
            opportunity,
            phases,
            parent,
        })
    }

    async fn load_phases(
        &self,
        ctx: &CallerContext,
        opportunity_id: Uuid,
    ) -> Result<Vec<phases::Model>, ServiceError> {
        let filter = Filter::visible().and(phases::Column::OpportunityId.eq(opportunity_id));
        let order = [
            (phases::Column::CreatedAt, Order::Asc),
            (phases::Column::Id, Order::Asc),
        ];

        let mut phases = Repository::<phases::Entity>::new(self.repo.db().clone())
            .find_by(ctx, filter, &order, MAX_PHASES)
            .await?;
        // Stable, so equal sequences keep creation order
        phases.sort_by_key(|phase| (phase.sequence.is_none(), phase.sequence));

        Ok(phases)
    }
}
