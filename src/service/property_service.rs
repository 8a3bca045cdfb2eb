use async_trait::async_trait;
use bson::oid::ObjectId;
use tracing::{error, info, instrument};

use crate::config::mongo_conf::MongoConfig;
use crate::dto::property_dto::{ExtraItemInput, SavePropertyRequest};
use crate::model::property::{ExtraItem, Property, DEFAULT_IMAGE};
use crate::repository::property_repo::{MongoPropertyRepository, PropertyRepository};
use crate::util::error::ServiceError;
use crate::util::numeric::{parse_count_or_zero, parse_non_negative_or_zero};

#[async_trait]
pub trait PropertyService: Send + Sync {
    async fn register_property(&self, request: SavePropertyRequest)
        -> Result<Property, ServiceError>;
    async fn update_property(
        &self,
        id: ObjectId,
        request: SavePropertyRequest,
    ) -> Result<Property, ServiceError>;
    async fn get_property(&self, id: ObjectId) -> Result<Property, ServiceError>;
    async fn list_properties(&self) -> Result<Vec<Property>, ServiceError>;
    async fn seed_properties(&self) -> Result<Vec<Property>, ServiceError>;
}

pub struct PropertyServiceImpl {
    pub property_repo: MongoPropertyRepository,
}

impl PropertyServiceImpl {
    pub async fn new(mongo_config: &MongoConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let property_repo = MongoPropertyRepository::new(mongo_config).await?;
        Ok(PropertyServiceImpl { property_repo })
    }

    /// Turns form rows into extra items. Existing items keep their id; new
    /// rows get one derived from the save timestamp and their index, since
    /// there is no central sequence to draw from.
    fn process_items(items: &[ExtraItemInput]) -> Vec<ExtraItem> {
        let millis = chrono::Utc::now().timestamp_millis();
        items
            .iter()
            .enumerate()
            .map(|(index, item)| ExtraItem {
                id: item
                    .id
                    .clone()
                    .filter(|id| !id.is_empty())
                    .unwrap_or_else(|| format!("item_{}_{}", millis, index)),
                nombre: if item.nombre.trim().is_empty() {
                    "Item sin nombre".to_string()
                } else {
                    item.nombre.clone()
                },
                costo: parse_non_negative_or_zero(&item.costo),
            })
            .collect()
    }

    fn property_from_request(request: SavePropertyRequest) -> Property {
        let cover = request
            .imagen
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_IMAGE.to_string());

        Property {
            id: None,
            titulo: request.titulo,
            descripcion: request.descripcion,
            precio: parse_non_negative_or_zero(&request.precio),
            direccion: request.direccion,
            habitaciones: parse_count_or_zero(&request.habitaciones),
            banos: parse_non_negative_or_zero(&request.banos),
            metrosTerreno: parse_non_negative_or_zero(&request.metros_terreno),
            imagenes: request.imagenes,
            imagen: Some(cover),
            items: Self::process_items(&request.items),
            createdAt: None,
        }
    }
}

#[async_trait]
impl PropertyService for PropertyServiceImpl {
    #[instrument(skip(self, request), fields(titulo = %request.titulo))]
    async fn register_property(
        &self,
        request: SavePropertyRequest,
    ) -> Result<Property, ServiceError> {
        info!("Registering new property");
        let property = Self::property_from_request(request);
        let res = self.property_repo.create(property).await;
        match &res {
            Ok(_) => info!("Property registered successfully"),
            Err(e) => error!("Failed to register property: {e}"),
        }
        res.map_err(ServiceError::from)
    }

    #[instrument(skip(self, request), fields(id = %id))]
    async fn update_property(
        &self,
        id: ObjectId,
        request: SavePropertyRequest,
    ) -> Result<Property, ServiceError> {
        info!("Updating property");
        // Carry over the original creation timestamp; the form never sends it
        let existing = self.property_repo.get_by_id(id).await?;
        let mut property = Self::property_from_request(request);
        property.createdAt = existing.createdAt;

        let res = self.property_repo.update(id, property).await;
        match &res {
            Ok(_) => info!("Property updated successfully"),
            Err(e) => error!("Failed to update property: {e}"),
        }
        res.map_err(ServiceError::from)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get_property(&self, id: ObjectId) -> Result<Property, ServiceError> {
        self.property_repo
            .get_by_id(id)
            .await
            .map_err(ServiceError::from)
    }

    #[instrument(skip(self))]
    async fn list_properties(&self) -> Result<Vec<Property>, ServiceError> {
        let res = self.property_repo.list().await;
        match &res {
            Ok(properties) => info!("Fetched {} properties", properties.len()),
            Err(e) => error!("Failed to list properties: {e}"),
        }
        res.map_err(ServiceError::from)
    }

    /// Inserts the demo catalog used to bootstrap an empty database.
    #[instrument(skip(self))]
    async fn seed_properties(&self) -> Result<Vec<Property>, ServiceError> {
        info!("Seeding demo properties");
        let mut created = Vec::new();
        for property in demo_properties() {
            let inserted = self
                .property_repo
                .create(property)
                .await
                .map_err(ServiceError::from)?;
            created.push(inserted);
        }
        info!("Seeded {} properties", created.len());
        Ok(created)
    }
}

fn demo_extra(id: &str, nombre: &str, costo: f64) -> ExtraItem {
    ExtraItem {
        id: id.to_string(),
        nombre: nombre.to_string(),
        costo,
    }
}

/// Demo catalog with image carousels and per-property extras.
fn demo_properties() -> Vec<Property> {
    vec![
        Property {
            id: None,
            titulo: "Residencia Villa Magna".to_string(),
            descripcion: Some("Hermosa casa con acabados de lujo y jardín amplio.".to_string()),
            precio: 4_500_000.0,
            direccion: "Av. de las Lomas 123, Zona Real".to_string(),
            habitaciones: 4,
            banos: 3.5,
            metrosTerreno: 350.0,
            imagenes: vec![
                "https://images.unsplash.com/photo-1600596542815-22b489997b6d?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80".to_string(),
                "https://images.unsplash.com/photo-1600585154340-be6161a56a0c?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80".to_string(),
                "https://images.unsplash.com/photo-1600607687939-ce8a6c25118c?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80".to_string(),
            ],
            imagen: None,
            items: vec![
                demo_extra("i1", "Muebles de Lujo", 250_000.0),
                demo_extra("i2", "Portón Eléctrico", 20_000.0),
                demo_extra("i3", "Jacuzzi Exterior", 150_000.0),
            ],
            createdAt: None,
        },
        Property {
            id: None,
            titulo: "Departamento Loft Urbano".to_string(),
            descripcion: Some(
                "Moderno loft en el centro de la ciudad con vista panorámica.".to_string(),
            ),
            precio: 2_800_000.0,
            direccion: "Calle Reforma 45, Centro".to_string(),
            habitaciones: 2,
            banos: 2.0,
            metrosTerreno: 120.0,
            imagenes: vec![
                "https://images.unsplash.com/photo-1512917774080-9991f1c4c750?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80".to_string(),
                "https://images.unsplash.com/photo-1622866306950-81d17097d458?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80".to_string(),
                "https://images.unsplash.com/photo-1583847268964-b28dc8f51f92?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80".to_string(),
            ],
            imagen: None,
            items: vec![
                demo_extra("i1", "Muebles de Diseñador", 250_000.0),
                demo_extra("i2", "Persianas Eléctricas", 20_000.0),
                demo_extra("i3", "Jacuzzi en Terraza", 150_000.0),
            ],
            createdAt: None,
        },
        Property {
            id: None,
            titulo: "Casa de Campo Los Robles".to_string(),
            descripcion: Some(
                "Alejada del ruido, ideal para descanso con acabados en madera.".to_string(),
            ),
            precio: 3_200_000.0,
            direccion: "Carretera Nacional km 20".to_string(),
            habitaciones: 3,
            banos: 3.0,
            metrosTerreno: 500.0,
            imagenes: vec![
                "https://images.unsplash.com/photo-1564013799919-ab600027ffc6?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80".to_string(),
                "https://images.unsplash.com/photo-1568605114967-8130f3a36994?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80".to_string(),
                "https://images.unsplash.com/photo-1570129477492-45c003edd2be?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80".to_string(),
            ],
            imagen: None,
            items: vec![
                demo_extra("i1", "Muebles Rústicos", 250_000.0),
                demo_extra("i2", "Portón de Seguridad", 20_000.0),
                demo_extra("i3", "Jacuzzi con Calefacción", 150_000.0),
            ],
            createdAt: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_items_generates_ids_and_coerces_costs() {
        let inputs = vec![
            ExtraItemInput {
                id: Some("i1".to_string()),
                nombre: "Muebles de Lujo".to_string(),
                costo: "250000".to_string(),
            },
            ExtraItemInput {
                id: None,
                nombre: "".to_string(),
                costo: "no-numérico".to_string(),
            },
        ];

        let items = PropertyServiceImpl::process_items(&inputs);
        assert_eq!(items[0].id, "i1");
        assert_eq!(items[0].costo, 250_000.0);
        assert!(items[1].id.starts_with("item_"));
        assert!(items[1].id.ends_with("_1"));
        assert_eq!(items[1].nombre, "Item sin nombre");
        assert_eq!(items[1].costo, 0.0);
    }

    #[test]
    fn test_property_from_request_defaults_cover_image() {
        let request = SavePropertyRequest {
            titulo: "Casa Moderna".to_string(),
            descripcion: None,
            direccion: "Calle 1".to_string(),
            precio: "1000000".to_string(),
            habitaciones: "3".to_string(),
            banos: "2".to_string(),
            metros_terreno: "abc".to_string(),
            imagen: Some("   ".to_string()),
            imagenes: vec![],
            items: vec![],
        };

        let property = PropertyServiceImpl::property_from_request(request);
        assert_eq!(property.imagen.as_deref(), Some(DEFAULT_IMAGE));
        assert_eq!(property.precio, 1_000_000.0);
        assert_eq!(property.habitaciones, 3);
        assert_eq!(property.metrosTerreno, 0.0);
    }

    #[test]
    fn test_demo_catalog_shape() {
        let properties = demo_properties();
        assert_eq!(properties.len(), 3);
        for property in properties {
            assert_eq!(property.imagenes.len(), 3);
            assert_eq!(property.items.len(), 3);
        }
    }
}
