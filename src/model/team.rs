use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Construction crew assignable to a quote, stored in the `equipos`
/// collection.
///
/// The weekly cost is informational only: it is shown on the team card but
/// never added into a quote's total.
#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceTeam {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub nombre: String,
    pub lider: String,
    pub duracionEstimada: String,
    pub costoSemanal: f64,
    pub imagen: Option<String>,
    pub createdAt: Option<String>,
}
