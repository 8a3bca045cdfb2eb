use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::handler::property_handler::{
    create_property_handler, get_property_handler, list_properties_handler,
    seed_properties_handler, update_property_handler,
};
use crate::middlewares::agent_middleware::{admin_auth, agent_auth, AgentAuthState};
use crate::service::property_service::PropertyServiceImpl;

pub fn property_router(
    service: Arc<PropertyServiceImpl>,
    auth_state: Arc<AgentAuthState>,
) -> Router {
    // Catalog browsing and editing is available to any authenticated agent
    let agent = Router::new()
        .route("/propiedades", get(list_properties_handler))
        .route("/propiedades", post(create_property_handler))
        .route("/propiedades/{id}", get(get_property_handler))
        .route("/propiedades/{id}", put(update_property_handler))
        .route_layer(middleware::from_fn_with_state(
            auth_state.clone(),
            agent_auth,
        ));

    let admin = Router::new()
        .route("/propiedades/sembrar", post(seed_properties_handler))
        .route_layer(middleware::from_fn_with_state(auth_state, admin_auth));

    agent.merge(admin).with_state(service)
}
