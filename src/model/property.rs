use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Fallback cover image shown for catalog entries created without one.
pub const DEFAULT_IMAGE: &str =
    "https://images.unsplash.com/photo-1580587771525-78b9dba3b91d?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80";

/// Optional add-on priced separately from the property's base price.
///
/// Ids are unique within the owning property only; they are generated by the
/// property service when the item is first saved (`item_{millis}_{index}`),
/// there is no central sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraItem {
    pub id: String,
    pub nombre: String,
    pub costo: f64,
}

/// Catalog listing, stored in the `propiedades` collection.
///
/// Field names mirror the documents the historical mobile client wrote, which
/// is why they are Spanish and camelCased.
#[allow(non_snake_case)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub titulo: String,
    pub descripcion: Option<String>,
    pub precio: f64,
    pub direccion: String,
    pub habitaciones: u32,
    pub banos: f64,
    pub metrosTerreno: f64,
    /// Current multi-image shape. Older documents may not carry it at all.
    #[serde(default)]
    pub imagenes: Vec<String>,
    /// Legacy single-image field, lifted into `imagenes` by [`Property::normalize`]
    /// and nulled out whenever the document is written back.
    pub imagen: Option<String>,
    #[serde(default)]
    pub items: Vec<ExtraItem>,
    pub createdAt: Option<String>,
}

impl Property {
    /// Presents a uniform multi-image shape regardless of which legacy or
    /// current shape the stored record used.
    ///
    /// A non-empty `imagenes` list wins and the legacy field is ignored.
    /// Otherwise a non-empty legacy `imagen` is lifted into a one-element
    /// list and not re-read afterwards. A record with neither keeps an empty
    /// list; the display layer substitutes a placeholder.
    pub fn normalize(mut self) -> Self {
        if self.imagenes.is_empty() {
            if let Some(imagen) = self.imagen.take().filter(|url| !url.is_empty()) {
                self.imagenes = vec![imagen];
            }
        }
        self
    }

    /// Cover image used by quote snapshots and list cards.
    pub fn cover_image(&self) -> Option<String> {
        self.imagenes
            .first()
            .cloned()
            .or_else(|| self.imagen.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn property_from(value: serde_json::Value) -> Property {
        serde_json::from_value(value).expect("valid property document")
    }

    fn base_document() -> serde_json::Value {
        json!({
            "_id": null,
            "titulo": "Residencia Villa Magna",
            "descripcion": null,
            "precio": 4_500_000.0,
            "direccion": "Av. de las Lomas 123, Zona Real",
            "habitaciones": 4,
            "banos": 3.5,
            "metrosTerreno": 350.0,
            "imagen": null,
            "createdAt": null
        })
    }

    #[test]
    fn test_normalize_lifts_legacy_image() {
        let mut doc = base_document();
        doc["imagen"] = json!("X");
        doc["imagenes"] = json!([]);
        let property = property_from(doc).normalize();
        assert_eq!(property.imagenes, vec!["X".to_string()]);
        // Once lifted, the legacy field is never re-read
        assert_eq!(property.imagen, None);
    }

    #[test]
    fn test_normalize_current_list_wins() {
        let mut doc = base_document();
        doc["imagen"] = json!("X");
        doc["imagenes"] = json!(["Y"]);
        let property = property_from(doc).normalize();
        assert_eq!(property.imagenes, vec!["Y".to_string()]);
    }

    #[test]
    fn test_normalize_missing_both_yields_empty_list() {
        let property = property_from(base_document()).normalize();
        assert!(property.imagenes.is_empty());
    }

    #[test]
    fn test_normalize_ignores_blank_legacy_value() {
        let mut doc = base_document();
        doc["imagen"] = json!("");
        let property = property_from(doc).normalize();
        assert!(property.imagenes.is_empty());
    }

    #[test]
    fn test_cover_image_prefers_normalized_list() {
        let mut doc = base_document();
        doc["imagenes"] = json!(["primera", "segunda"]);
        let property = property_from(doc);
        assert_eq!(property.cover_image(), Some("primera".to_string()));
    }
}
