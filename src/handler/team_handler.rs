use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use bson::oid::ObjectId;
use std::sync::Arc;
use validator::Validate;

use crate::dto::team_dto::SaveTeamRequest;
use crate::service::team_service::{TeamService, TeamServiceImpl};
use crate::util::error::HandlerError;

pub async fn list_teams_handler(
    State(service): State<Arc<TeamServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let teams = service.list_teams().await.map_err(HandlerError::from)?;
    Ok(Json(teams))
}

pub async fn get_team_handler(
    State(service): State<Arc<TeamServiceImpl>>,
    Path((id,)): Path<(String,)>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = ObjectId::parse_str(&id).map_err(|_| HandlerError::bad_request("Invalid team id"))?;
    let team = service.get_team(id).await.map_err(HandlerError::from)?;
    Ok(Json(team))
}

pub async fn create_team_handler(
    State(service): State<Arc<TeamServiceImpl>>,
    Json(payload): Json<SaveTeamRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Err(e) = payload.validate() {
        return Err(HandlerError::validation(format!("Validation error: {}", e)));
    }
    let created = service
        .register_team(payload)
        .await
        .map_err(HandlerError::from)?;
    Ok(Json(created))
}

pub async fn update_team_handler(
    State(service): State<Arc<TeamServiceImpl>>,
    Path((id,)): Path<(String,)>,
    Json(payload): Json<SaveTeamRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = ObjectId::parse_str(&id).map_err(|_| HandlerError::bad_request("Invalid team id"))?;
    if let Err(e) = payload.validate() {
        return Err(HandlerError::validation(format!("Validation error: {}", e)));
    }
    let updated = service
        .update_team(id, payload)
        .await
        .map_err(HandlerError::from)?;
    Ok(Json(updated))
}

pub async fn delete_team_handler(
    State(service): State<Arc<TeamServiceImpl>>,
    Path((id,)): Path<(String,)>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = ObjectId::parse_str(&id).map_err(|_| HandlerError::bad_request("Invalid team id"))?;
    service.delete_team(id).await.map_err(HandlerError::from)?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

// Handler: seed demo roster (admin only)
pub async fn seed_teams_handler(
    State(service): State<Arc<TeamServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let created = service.seed_teams().await.map_err(HandlerError::from)?;
    Ok(Json(created))
}
