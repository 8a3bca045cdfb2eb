use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::handler::quote_handler::{
    create_quote_handler, get_quote_handler, list_all_quotes_handler, list_my_quotes_handler,
    update_quote_handler, update_quote_status_handler,
};
use crate::middlewares::agent_middleware::{admin_auth, agent_auth, AgentAuthState};
use crate::service::quote_service::QuoteServiceImpl;

pub fn quote_router(service: Arc<QuoteServiceImpl>, auth_state: Arc<AgentAuthState>) -> Router {
    let agent = Router::new()
        .route("/cotizaciones", post(create_quote_handler))
        .route("/cotizaciones", get(list_my_quotes_handler))
        .route("/cotizaciones/{id}", get(get_quote_handler))
        .route("/cotizaciones/{id}", put(update_quote_handler))
        .route("/cotizaciones/{id}/estado", put(update_quote_status_handler))
        .route_layer(middleware::from_fn_with_state(
            auth_state.clone(),
            agent_auth,
        ));

    let admin = Router::new()
        .route("/cotizaciones/todas", get(list_all_quotes_handler))
        .route_layer(middleware::from_fn_with_state(auth_state, admin_auth));

    agent.merge(admin).with_state(service)
}
