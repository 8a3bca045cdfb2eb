use crate::config::mongo_conf::MongoConfig;
use crate::model::team::ServiceTeam;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::stream::StreamExt;
use tracing::{error, info};

#[async_trait]
pub trait TeamRepository: Send + Sync {
    async fn create(&self, team: ServiceTeam) -> RepositoryResult<ServiceTeam>;
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<ServiceTeam>;
    async fn update(&self, id: ObjectId, team: ServiceTeam) -> RepositoryResult<ServiceTeam>;
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()>;
    async fn list(&self) -> RepositoryResult<Vec<ServiceTeam>>;
    async fn count(&self) -> RepositoryResult<u64>;
}

pub struct MongoTeamRepository {
    collection: mongodb::Collection<ServiceTeam>,
}

impl MongoTeamRepository {
    pub async fn new(config: &MongoConfig) -> Result<Self, mongodb::error::Error> {
        let collection = super::open_collection(config, config.team_collection_name()).await?;
        Ok(MongoTeamRepository { collection })
    }
}

#[async_trait]
impl TeamRepository for MongoTeamRepository {
    #[tracing::instrument(skip(self, team), fields(nombre = %team.nombre))]
    async fn create(&self, team: ServiceTeam) -> RepositoryResult<ServiceTeam> {
        info!("Creating new team");
        let mut new_team = team;
        new_team.id = Some(ObjectId::new());
        new_team.createdAt = Some(chrono::Utc::now().to_rfc3339());

        match self.collection.insert_one(new_team.clone(), None).await {
            Ok(_) => {
                info!("Team created successfully");
                Ok(new_team)
            }
            Err(e) => {
                error!("Failed to create team: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to create team: {}",
                    e
                )))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<ServiceTeam> {
        let filter = doc! { "_id": id };
        match self.collection.find_one(filter, None).await {
            Ok(Some(team)) => Ok(team),
            Ok(None) => Err(RepositoryError::not_found(format!(
                "Team not found for ID: {}",
                id
            ))),
            Err(e) => {
                error!("Failed to fetch team by ID: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to fetch team by ID: {}",
                    e
                )))
            }
        }
    }

    #[tracing::instrument(skip(self, team), fields(id = %id))]
    async fn update(&self, id: ObjectId, team: ServiceTeam) -> RepositoryResult<ServiceTeam> {
        info!("Updating team with ID: {}", id);
        let mut updated = team;
        updated.id = Some(id);

        let filter = doc! { "_id": id };
        let mut document = bson::to_document(&updated).map_err(|e| {
            RepositoryError::serialization(format!("Failed to serialize team: {}", e))
        })?;
        document.remove("_id");
        let update = doc! { "$set": document };

        match self.collection.update_one(filter, update, None).await {
            Ok(update_result) if update_result.matched_count > 0 => {
                info!("Team updated successfully for ID: {}", id);
                Ok(updated)
            }
            Ok(_) => Err(RepositoryError::not_found(format!(
                "No team found to update for ID: {}",
                id
            ))),
            Err(e) => {
                error!("Failed to update team: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to update team: {}",
                    e
                )))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        info!("Deleting team with ID: {}", id);
        let filter = doc! { "_id": id };
        match self.collection.delete_one(filter, None).await {
            Ok(delete_result) if delete_result.deleted_count > 0 => {
                info!("Team deleted successfully for ID: {}", id);
                Ok(())
            }
            Ok(_) => Err(RepositoryError::not_found(format!(
                "No team found to delete for ID: {}",
                id
            ))),
            Err(e) => {
                error!("Failed to delete team: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to delete team: {}",
                    e
                )))
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self) -> RepositoryResult<Vec<ServiceTeam>> {
        let cursor = self.collection.find(None, None).await;
        match cursor {
            Ok(mut cursor) => {
                let mut teams = Vec::new();
                while let Some(team) = cursor.next().await {
                    match team {
                        Ok(t) => teams.push(t),
                        Err(e) => {
                            error!("Failed to deserialize team: {}", e);
                            return Err(RepositoryError::serialization(format!(
                                "Failed to deserialize team: {}",
                                e
                            )));
                        }
                    }
                }
                info!("Fetched {} teams", teams.len());
                Ok(teams)
            }
            Err(e) => {
                error!("Failed to list teams: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to list teams: {}",
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
                error!("Failed to count teams: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to count teams: {}",
                    e
                )))
            }
        }
    }
}
