use crate::config::mongo_conf::MongoConfig;
use crate::model::quote::{Quote, QuoteStatus, QuoteUpdate};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::stream::StreamExt;
use tracing::{error, info};

#[async_trait]
pub trait QuoteRepository: Send + Sync {
    async fn create(&self, quote: Quote) -> RepositoryResult<Quote>;
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Quote>;
    /// Applies a revision. `QuoteUpdate` carries only the mutable fields, so
    /// the agent and property snapshots written at creation stay untouched.
    async fn update(&self, id: ObjectId, update: QuoteUpdate) -> RepositoryResult<Quote>;
    async fn update_status(&self, id: ObjectId, estado: QuoteStatus) -> RepositoryResult<Quote>;
    async fn list_for_agent(&self, agent_uid: &str) -> RepositoryResult<Vec<Quote>>;
    async fn list_all(&self) -> RepositoryResult<Vec<Quote>>;
}

pub struct MongoQuoteRepository {
    collection: mongodb::Collection<Quote>,
}

impl MongoQuoteRepository {
    pub async fn new(config: &MongoConfig) -> Result<Self, mongodb::error::Error> {
        let collection = super::open_collection(config, config.quote_collection_name()).await?;
        Ok(MongoQuoteRepository { collection })
    }

    async fn drain(
        &self,
        cursor: mongodb::Cursor<Quote>,
    ) -> RepositoryResult<Vec<Quote>> {
        let mut cursor = cursor;
        let mut quotes = Vec::new();
        while let Some(quote) = cursor.next().await {
            match quote {
                Ok(q) => quotes.push(q),
                Err(e) => {
                    error!("Failed to deserialize quote: {}", e);
                    return Err(RepositoryError::serialization(format!(
                        "Failed to deserialize quote: {}",
                        e
                    )));
                }
            }
        }
        // Newest first, matching how agents review their pipeline
        quotes.sort_by(|a, b| b.fecha.cmp(&a.fecha));
        Ok(quotes)
    }
}

#[async_trait]
impl QuoteRepository for MongoQuoteRepository {
    #[tracing::instrument(skip(self, quote), fields(agente = %quote.agente.uid))]
    async fn create(&self, quote: Quote) -> RepositoryResult<Quote> {
        info!("Creating new quote");
        let mut new_quote = quote;
        new_quote.id = Some(ObjectId::new());
        new_quote.estado = QuoteStatus::Pendiente;
        new_quote.fecha = Some(chrono::Utc::now().to_rfc3339());

        match self.collection.insert_one(new_quote.clone(), None).await {
            Ok(_) => {
                info!("Quote created successfully");
                Ok(new_quote)
            }
            Err(e) => {
                error!("Failed to create quote: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to create quote: {}",
                    e
                )))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Quote> {
        let filter = doc! { "_id": id };
        match self.collection.find_one(filter, None).await {
            Ok(Some(quote)) => Ok(quote),
            Ok(None) => {
                error!("Quote not found for ID: {}", id);
                Err(RepositoryError::not_found(format!(
                    "Quote not found for ID: {}",
                    id
                )))
            }
            Err(e) => {
                error!("Failed to fetch quote by ID: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to fetch quote by ID: {}",
                    e
                )))
            }
        }
    }

    #[tracing::instrument(skip(self, update), fields(id = %id, total = update.total))]
    async fn update(&self, id: ObjectId, update: QuoteUpdate) -> RepositoryResult<Quote> {
        info!("Updating quote with ID: {}", id);
        let filter = doc! { "_id": id };
        let document = bson::to_document(&update).map_err(|e| {
            RepositoryError::serialization(format!("Failed to serialize quote update: {}", e))
        })?;
        let update_doc = doc! { "$set": document };

        match self.collection.update_one(filter, update_doc, None).await {
            Ok(update_result) if update_result.matched_count > 0 => {
                info!("Quote updated successfully for ID: {}", id);
                self.get_by_id(id).await
            }
            Ok(_) => {
                error!("No quote found to update for ID: {}", id);
                Err(RepositoryError::not_found(format!(
                    "No quote found to update for ID: {}",
                    id
                )))
            }
            Err(e) => {
                error!("Failed to update quote: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to update quote: {}",
                    e
                )))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id, estado = %estado))]
    async fn update_status(&self, id: ObjectId, estado: QuoteStatus) -> RepositoryResult<Quote> {
        info!(quote_id = %id, estado = %estado, "Updating quote status");
        let filter = doc! { "_id": id };
        let update = doc! { "$set": { "estado": estado.as_str() } };

        match self.collection.update_one(filter, update, None).await {
            Ok(update_result) if update_result.matched_count > 0 => {
                info!("Quote status updated successfully for ID: {}", id);
                let mut updated_quote = self.get_by_id(id).await?;
                updated_quote.estado = estado;
                Ok(updated_quote)
            }
            Ok(_) => Err(RepositoryError::not_found(format!(
                "No quote found to update status for ID: {}",
                id
            ))),
            Err(e) => {
                error!("Failed to update quote status: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to update quote status: {}",
                    e
                )))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(agent_uid = %agent_uid))]
    async fn list_for_agent(&self, agent_uid: &str) -> RepositoryResult<Vec<Quote>> {
        info!("Listing quotes for agent");
        let filter = doc! { "agente.uid": agent_uid };
        match self.collection.find(filter, None).await {
            Ok(cursor) => {
                let quotes = self.drain(cursor).await?;
                info!("Fetched {} quotes for agent", quotes.len());
                Ok(quotes)
            }
            Err(e) => {
                error!("Failed to list quotes for agent: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to list quotes for agent: {}",
                    e
                )))
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn list_all(&self) -> RepositoryResult<Vec<Quote>> {
        info!("Listing all quotes");
        match self.collection.find(None, None).await {
            Ok(cursor) => {
                let quotes = self.drain(cursor).await?;
                info!("Fetched {} quotes", quotes.len());
                Ok(quotes)
            }
            Err(e) => {
                error!("Failed to list quotes: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to list quotes: {}",
                    e
                )))
            }
        }
    }
}
