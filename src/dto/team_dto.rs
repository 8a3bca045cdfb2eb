use serde::{Deserialize, Serialize};
use validator::Validate;

/// Payload of the create/edit team form. The weekly cost arrives as the raw
/// input string and is coerced by the service.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SaveTeamRequest {
    #[validate(length(min = 1, max = 100))]
    pub nombre: String,

    #[validate(length(min = 1, max = 100))]
    pub lider: String,

    pub duracion_estimada: String,

    pub costo_semanal: String,

    pub imagen: Option<String>,
}
