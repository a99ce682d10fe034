// src/lib.rs

use axum::{routing::get, Router};
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use config::ListLimits;
use services::{
    AgentService, EventService, FaqService, InitiativeService, OpportunityService,
    OrganizationService, PhaseService, SpaceService,
};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub list_limits: ListLimits,
    pub agents: AgentService,
    pub spaces: SpaceService,
    pub initiatives: InitiativeService,
    pub events: EventService,
    pub organizations: OrganizationService,
    pub opportunities: OpportunityService,
    pub phases: PhaseService,
    pub faqs: FaqService,
}

impl AppState {
    pub fn new(db: DatabaseConnection, list_limits: ListLimits) -> Self {
        Self {
            agents: AgentService::new(db.clone()),
            spaces: SpaceService::new(db.clone()),
            initiatives: InitiativeService::new(db.clone()),
            events: EventService::new(db.clone()),
            organizations: OrganizationService::new(db.clone()),
            opportunities: OpportunityService::new(db.clone()),
            phases: PhaseService::new(db.clone()),
            faqs: FaqService::new(db.clone()),
            list_limits,
            db,
        }
    }
}

pub mod entities {
    pub mod prelude;
    pub mod agents;
    pub mod events;
    pub mod faqs;
    pub mod initiatives;
    pub mod opportunities;
    pub mod organizations;
    pub mod phases;
    pub mod spaces;
}

pub mod config;
pub mod context;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod services;
pub mod validation;

/// Full API router with tracing and permissive CORS
pub fn router(state: AppState) -> Router {
    use handlers::{agent, event, faq, initiative, opportunity, organization, phase, space};

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/agents",
            get(agent::list_agents).post(agent::create_agent),
        )
        .route(
            "/api/agents/{id}",
            get(agent::get_agent)
                .patch(agent::update_agent)
                .delete(agent::remove_agent),
        )
        .route(
            "/api/spaces",
            get(space::list_spaces).post(space::create_space),
        )
        .route(
            "/api/spaces/{id}",
            get(space::get_space)
                .patch(space::update_space)
                .delete(space::remove_space),
        )
        .route(
            "/api/initiatives",
            get(initiative::list_initiatives).post(initiative::create_initiative),
        )
        .route(
            "/api/initiatives/{id}",
            get(initiative::get_initiative)
                .patch(initiative::update_initiative)
                .delete(initiative::remove_initiative),
        )
        .route(
            "/api/events",
            get(event::list_events).post(event::create_event),
        )
        .route(
            "/api/events/{id}",
            get(event::get_event)
                .patch(event::update_event)
                .delete(event::remove_event),
        )
        .route(
            "/api/organizations",
            get(organization::list_organizations).post(organization::create_organization),
        )
        .route(
            "/api/organizations/{id}",
            get(organization::get_organization)
                .patch(organization::update_organization)
                .delete(organization::remove_organization),
        )
        .route(
            "/api/opportunities",
            get(opportunity::list_opportunities).post(opportunity::create_opportunity),
        )
        .route(
            "/api/opportunities/{id}",
            get(opportunity::get_opportunity)
                .patch(opportunity::update_opportunity)
                .delete(opportunity::remove_opportunity),
        )
        .route(
            "/api/opportunities/{id}/phases",
            get(opportunity::list_opportunity_phases),
        )
        .route(
            "/api/phases",
            get(phase::list_phases).post(phase::create_phase),
        )
        .route(
            "/api/phases/{id}",
            get(phase::get_phase)
                .patch(phase::update_phase)
                .delete(phase::remove_phase),
        )
        .route("/api/faqs", get(faq::list_faqs).post(faq::create_faq))
        .route(
            "/api/faqs/{id}",
            get(faq::get_faq)
                .patch(faq::update_faq)
                .delete(faq::remove_faq),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
