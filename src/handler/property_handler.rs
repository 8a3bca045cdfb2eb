use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use bson::oid::ObjectId;
use std::sync::Arc;
use validator::Validate;

use crate::dto::property_dto::SavePropertyRequest;
use crate::service::property_service::{PropertyService, PropertyServiceImpl};
use crate::util::error::HandlerError;

pub async fn list_properties_handler(
    State(service): State<Arc<PropertyServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let properties = service.list_properties().await.map_err(HandlerError::from)?;
    Ok(Json(properties))
}

pub async fn get_property_handler(
    State(service): State<Arc<PropertyServiceImpl>>,
    Path((id,)): Path<(String,)>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = ObjectId::parse_str(&id)
        .map_err(|_| HandlerError::bad_request("Invalid property id"))?;
    let property = service.get_property(id).await.map_err(HandlerError::from)?;
    Ok(Json(property))
}

pub async fn create_property_handler(
    State(service): State<Arc<PropertyServiceImpl>>,
    Json(payload): Json<SavePropertyRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Err(e) = payload.validate() {
        return Err(HandlerError::validation(format!("Validation error: {}", e)));
    }
    let created = service
        .register_property(payload)
        .await
        .map_err(HandlerError::from)?;
    Ok(Json(created))
}

pub async fn update_property_handler(
    State(service): State<Arc<PropertyServiceImpl>>,
    Path((id,)): Path<(String,)>,
    Json(payload): Json<SavePropertyRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = ObjectId::parse_str(&id)
        .map_err(|_| HandlerError::bad_request("Invalid property id"))?;
    if let Err(e) = payload.validate() {
        return Err(HandlerError::validation(format!("Validation error: {}", e)));
    }
    let updated = service
        .update_property(id, payload)
        .await
        .map_err(HandlerError::from)?;
    Ok(Json(updated))
}

// Handler: seed demo catalog (admin only)
pub async fn seed_properties_handler(
    State(service): State<Arc<PropertyServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let created = service.seed_properties().await.map_err(HandlerError::from)?;
    Ok(Json(created))
}
