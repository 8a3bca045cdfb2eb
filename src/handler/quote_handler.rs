use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Extension, Json,
};
use bson::oid::ObjectId;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::dto::quote_dto::{CreateQuoteRequest, UpdateQuoteRequest, UpdateQuoteStatusRequest};
use crate::model::quote::AgentRef;
use crate::service::quote_service::{QuoteService, QuoteServiceImpl};
use crate::util::error::HandlerError;

pub async fn create_quote_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    Extension(agente): Extension<AgentRef>,
    Json(payload): Json<CreateQuoteRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    info!(agente = %agente.uid, "Create quote requested");
    if let Err(e) = payload.validate() {
        return Err(HandlerError::validation(format!("Validation error: {}", e)));
    }
    let created = service
        .register_quote(payload, agente)
        .await
        .map_err(HandlerError::from)?;
    Ok(Json(created))
}

/// Quotes created by the authenticated agent, newest first.
pub async fn list_my_quotes_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    Extension(agente): Extension<AgentRef>,
) -> Result<impl IntoResponse, HandlerError> {
    let quotes = service
        .list_quotes_for_agent(&agente.uid)
        .await
        .map_err(HandlerError::from)?;
    Ok(Json(quotes))
}

// Handler: list every quote (admin only)
pub async fn list_all_quotes_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let quotes = service.list_quotes_all().await.map_err(HandlerError::from)?;
    Ok(Json(quotes))
}

pub async fn get_quote_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    Path((id,)): Path<(String,)>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = ObjectId::parse_str(&id).map_err(|_| HandlerError::bad_request("Invalid quote id"))?;
    let quote = service.get_quote(id).await.map_err(HandlerError::from)?;
    Ok(Json(quote))
}

pub async fn update_quote_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    Path((id,)): Path<(String,)>,
    Json(payload): Json<UpdateQuoteRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = ObjectId::parse_str(&id).map_err(|_| HandlerError::bad_request("Invalid quote id"))?;
    let updated = service
        .update_quote(id, payload)
        .await
        .map_err(HandlerError::from)?;
    Ok(Json(updated))
}

pub async fn update_quote_status_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    Path((id,)): Path<(String,)>,
    Json(payload): Json<UpdateQuoteStatusRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = ObjectId::parse_str(&id).map_err(|_| HandlerError::bad_request("Invalid quote id"))?;
    let updated = service
        .update_quote_status(id, payload.estado)
        .await
        .map_err(HandlerError::from)?;
    Ok(Json(updated))
}
