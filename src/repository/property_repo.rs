use crate::config::mongo_conf::MongoConfig;
use crate::model::property::Property;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::stream::StreamExt;
use tracing::{error, info};

#[async_trait]
pub trait PropertyRepository: Send + Sync {
    async fn create(&self, property: Property) -> RepositoryResult<Property>;
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Property>;
    async fn update(&self, id: ObjectId, property: Property) -> RepositoryResult<Property>;
    async fn list(&self) -> RepositoryResult<Vec<Property>>;
    async fn count(&self) -> RepositoryResult<u64>;
}

pub struct MongoPropertyRepository {
    collection: mongodb::Collection<Property>,
}

impl MongoPropertyRepository {
    pub async fn new(config: &MongoConfig) -> Result<Self, mongodb::error::Error> {
        let collection =
            super::open_collection(config, config.property_collection_name()).await?;
        Ok(MongoPropertyRepository { collection })
    }
}

#[async_trait]
impl PropertyRepository for MongoPropertyRepository {
    #[tracing::instrument(skip(self, property), fields(titulo = %property.titulo))]
    async fn create(&self, property: Property) -> RepositoryResult<Property> {
        info!("Creating new property");
        // Documents are always written in the multi-image shape; the legacy
        // field is nulled to clean the collection over time.
        let mut new_property = property.normalize();
        new_property.imagen = None;
        new_property.id = Some(ObjectId::new());
        new_property.createdAt = Some(chrono::Utc::now().to_rfc3339());

        match self.collection.insert_one(new_property.clone(), None).await {
            Ok(_) => {
                info!("Property created successfully");
                Ok(new_property)
            }
            Err(e) => {
                error!("Failed to create property: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to create property: {}",
                    e
                )))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Property> {
        let filter = doc! { "_id": id };
        match self.collection.find_one(filter, None).await {
            Ok(Some(property)) => Ok(property.normalize()),
            Ok(None) => {
                error!("Property not found for ID: {}", id);
                Err(RepositoryError::not_found(format!(
                    "Property not found for ID: {}",
                    id
                )))
            }
            Err(e) => {
                error!("Failed to fetch property by ID: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to fetch property by ID: {}",
                    e
                )))
            }
        }
    }

    #[tracing::instrument(skip(self, property), fields(id = %id))]
    async fn update(&self, id: ObjectId, property: Property) -> RepositoryResult<Property> {
        info!("Updating property with ID: {}", id);
        let mut updated = property.normalize();
        updated.imagen = None;
        updated.id = Some(id);

        let filter = doc! { "_id": id };
        let mut document = bson::to_document(&updated).map_err(|e| {
            RepositoryError::serialization(format!("Failed to serialize property: {}", e))
        })?;
        document.remove("_id");
        let update = doc! { "$set": document };

        match self.collection.update_one(filter, update, None).await {
            Ok(update_result) if update_result.matched_count > 0 => {
                info!("Property updated successfully for ID: {}", id);
                Ok(updated)
            }
            Ok(_) => {
                error!("No property found to update for ID: {}", id);
                Err(RepositoryError::not_found(format!(
                    "No property found to update for ID: {}",
                    id
                )))
            }
            Err(e) => {
                error!("Failed to update property: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to update property: {}",
                    e
                )))
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self) -> RepositoryResult<Vec<Property>> {
        info!("Listing properties");
        let cursor = self.collection.find(None, None).await;
        match cursor {
            Ok(mut cursor) => {
                let mut properties = Vec::new();
                while let Some(property) = cursor.next().await {
                    match property {
                        Ok(p) => properties.push(p.normalize()),
                        Err(e) => {
                            error!("Failed to deserialize property: {}", e);
                            return Err(RepositoryError::serialization(format!(
                                "Failed to deserialize property: {}",
                                e
                            )));
                        }
                    }
                }
                // Newest first; RFC3339 strings sort chronologically
                properties.sort_by(|a, b| b.createdAt.cmp(&a.createdAt));
                info!("Fetched {} properties", properties.len());
                Ok(properties)
            }
            Err(e) => {
                error!("Failed to list properties: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to list properties: {}",
                    e
                )))
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn count(&self) -> RepositoryResult<u64> {
        match self.collection.count_documents(None, None).await {
            Ok(count) => Ok(count),
            Err(e) => {
                error!("Failed to count properties: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to count properties: {}",
                    e
                )))
            }
        }
    }
}
