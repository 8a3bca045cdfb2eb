use serde::{Deserialize, Serialize};
use validator::Validate;

/// One extra-item row from the property form. The id is present when an
/// existing item is being edited and absent for newly added rows; the cost
/// arrives as the raw input string and is coerced by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtraItemInput {
    pub id: Option<String>,
    pub nombre: String,
    pub costo: String,
}

/// Payload of the create/edit property form. Numeric fields arrive as the
/// raw strings the form captured; parse failures coerce to zero rather than
/// rejecting the submission.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SavePropertyRequest {
    #[validate(length(min = 1, max = 200))]
    pub titulo: String,

    pub descripcion: Option<String>,

    pub direccion: String,

    #[validate(length(min = 1, max = 30))]
    pub precio: String,

    pub habitaciones: String,

    pub banos: String,

    pub metros_terreno: String,

    /// Single cover-image URL from the form; lifted into `imagenes`
    pub imagen: Option<String>,

    #[serde(default)]
    pub imagenes: Vec<String>,

    #[serde(default)]
    pub items: Vec<ExtraItemInput>,
}
