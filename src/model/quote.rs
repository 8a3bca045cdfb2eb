use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::property::ExtraItem;
use crate::model::team::ServiceTeam;

/// Identity of the agent that created a quote. Captured from the session at
/// save time and never rewritten afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRef {
    pub uid: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub nombre: String,
    pub telefono: String,
    pub correo: String,
}

/// Copy of the originating property taken when the quote is first saved.
/// Later edits to the catalog entry do not retroactively change it.
#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySnapshot {
    pub id: String,
    pub titulo: String,
    pub direccion: String,
    pub precioBase: f64,
    pub imagen: Option<String>,
}

/// Lifecycle state of a quote. Flat enumeration: any state may move to any
/// other by explicit operator choice, and nothing is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteStatus {
    #[serde(rename = "pendiente")]
    Pendiente,
    #[serde(rename = "confirmada")]
    Confirmada,
    #[serde(rename = "construcción")]
    Construccion,
    #[serde(rename = "pagada")]
    Pagada,
}

impl QuoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteStatus::Pendiente => "pendiente",
            QuoteStatus::Confirmada => "confirmada",
            QuoteStatus::Construccion => "construcción",
            QuoteStatus::Pagada => "pagada",
        }
    }
}

impl fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted quote, stored in the `cotizaciones` collection.
///
/// `total` is computed at save/update time, never recomputed lazily on read,
/// and must always equal `propiedad.precioBase` plus the sum of the selected
/// extra-item costs. The selected team's weekly cost is deliberately
/// excluded.
#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub agente: AgentRef,
    pub cliente: ClientInfo,
    pub propiedad: PropertySnapshot,
    pub itemsAdicionales: Vec<ExtraItem>,
    pub equipoDesarrollo: Option<ServiceTeam>,
    pub total: f64,
    pub estado: QuoteStatus,
    pub fecha: Option<String>,
}

/// Fields a revision is allowed to touch. The property and agent snapshots
/// are structurally absent so an update can never rewrite them.
#[allow(non_snake_case)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteUpdate {
    pub cliente: ClientInfo,
    pub equipoDesarrollo: Option<ServiceTeam>,
    pub estado: QuoteStatus,
    pub itemsAdicionales: Vec<ExtraItem>,
    pub total: f64,
}
