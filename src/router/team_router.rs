use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::handler::team_handler::{
    create_team_handler, delete_team_handler, get_team_handler, list_teams_handler,
    seed_teams_handler, update_team_handler,
};
use crate::middlewares::agent_middleware::{admin_auth, agent_auth, AgentAuthState};
use crate::service::team_service::TeamServiceImpl;

pub fn team_router(service: Arc<TeamServiceImpl>, auth_state: Arc<AgentAuthState>) -> Router {
    let agent = Router::new()
        .route("/equipos", get(list_teams_handler))
        .route("/equipos", post(create_team_handler))
        .route("/equipos/{id}", get(get_team_handler))
        .route("/equipos/{id}", put(update_team_handler))
        .route("/equipos/{id}", delete(delete_team_handler))
        .route_layer(middleware::from_fn_with_state(
            auth_state.clone(),
            agent_auth,
        ));

    let admin = Router::new()
        .route("/equipos/sembrar", post(seed_teams_handler))
        .route_layer(middleware::from_fn_with_state(auth_state, admin_auth));

    agent.merge(admin).with_state(service)
}
