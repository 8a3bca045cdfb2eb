use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::model::quote::{ClientInfo, QuoteStatus};
use crate::model::team::ServiceTeam;

/// Initial save of a quote draft.
///
/// The team travels as a full snapshot object, exactly as the roster card
/// the operator tapped; it is not re-validated against the `equipos`
/// collection. Whether it is present at all is decided by the draft's own
/// validation, not here.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateQuoteRequest {
    #[validate(length(equal = 24))] // MongoDB ObjectId hex string
    pub propiedad_id: String,

    /// Ids pre-selected in the extras picker before the summary screen
    #[serde(default)]
    pub items_seleccionados: Vec<String>,

    pub equipo: Option<ServiceTeam>,

    pub cliente: ClientInfo,
}

/// Revision of a saved quote. Trusted in-place edit: the draft enforces no
/// required fields here, and the property/agent snapshots cannot be part of
/// the payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateQuoteRequest {
    pub cliente: ClientInfo,

    pub equipo: Option<ServiceTeam>,

    pub estado: QuoteStatus,

    #[serde(default)]
    pub items_seleccionados: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateQuoteStatusRequest {
    pub estado: QuoteStatus,
}
