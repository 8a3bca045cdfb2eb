use axum::{
    body::Body, extract::State, http::Request, http::StatusCode, middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::model::quote::AgentRef;
use crate::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl};

pub struct AgentAuthState {
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
}

/// Validates the identity provider's bearer token and attaches the acting
/// agent to the request. Handlers read the agent from the extension instead
/// of any ambient state.
pub async fn agent_auth(
    State(state): State<Arc<AgentAuthState>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = state
        .jwt_utils
        .extract_token_from_header(auth_header)
        .map_err(|_| StatusCode::UNAUTHORIZED)?;
    let claims = state
        .jwt_utils
        .validate_access_token(&token)
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    let agente = AgentRef {
        uid: claims.sub.clone(),
        email: claims.email.clone(),
    };
    req.extensions_mut().insert(claims);
    req.extensions_mut().insert(agente);

    Ok(next.run(req).await)
}

/// Same as [`agent_auth`], plus an admin-role requirement for management
/// routes (seeding, list-all).
pub async fn admin_auth(
    State(state): State<Arc<AgentAuthState>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = state
        .jwt_utils
        .extract_token_from_header(auth_header)
        .map_err(|_| StatusCode::UNAUTHORIZED)?;
    let claims = state
        .jwt_utils
        .validate_access_token(&token)
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    if claims.role != "admin" {
        return Err(StatusCode::FORBIDDEN);
    }

    let agente = AgentRef {
        uid: claims.sub.clone(),
        email: claims.email.clone(),
    };
    req.extensions_mut().insert(claims);
    req.extensions_mut().insert(agente);

    Ok(next.run(req).await)
}
