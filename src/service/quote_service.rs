use async_trait::async_trait;
use bson::oid::ObjectId;
use tracing::{error, info, instrument};

use crate::config::mongo_conf::MongoConfig;
use crate::dto::quote_dto::{CreateQuoteRequest, UpdateQuoteRequest};
use crate::model::draft::QuoteDraft;
use crate::model::quote::{AgentRef, Quote, QuoteStatus};
use crate::repository::property_repo::{MongoPropertyRepository, PropertyRepository};
use crate::repository::quote_repo::{MongoQuoteRepository, QuoteRepository};
use crate::util::error::ServiceError;

#[async_trait]
pub trait QuoteService: Send + Sync {
    async fn register_quote(
        &self,
        request: CreateQuoteRequest,
        agente: AgentRef,
    ) -> Result<Quote, ServiceError>;
    async fn get_quote(&self, id: ObjectId) -> Result<Quote, ServiceError>;
    async fn update_quote(
        &self,
        id: ObjectId,
        request: UpdateQuoteRequest,
    ) -> Result<Quote, ServiceError>;
    async fn update_quote_status(
        &self,
        id: ObjectId,
        estado: QuoteStatus,
    ) -> Result<Quote, ServiceError>;
    async fn list_quotes_for_agent(&self, agent_uid: &str) -> Result<Vec<Quote>, ServiceError>;
    async fn list_quotes_all(&self) -> Result<Vec<Quote>, ServiceError>;
}

/// Both the creation and the revision flow run through [`QuoteDraft`], so
/// the totals an operator saw on either screen come from the same
/// computation.
pub struct QuoteServiceImpl {
    pub quote_repo: MongoQuoteRepository,
    pub property_repo: MongoPropertyRepository,
}

impl QuoteServiceImpl {
    pub async fn new(mongo_config: &MongoConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let quote_repo = MongoQuoteRepository::new(mongo_config).await?;
        let property_repo = MongoPropertyRepository::new(mongo_config).await?;
        Ok(QuoteServiceImpl {
            quote_repo,
            property_repo,
        })
    }
}

#[async_trait]
impl QuoteService for QuoteServiceImpl {
    #[instrument(skip(self, request, agente), fields(agente = %agente.uid))]
    async fn register_quote(
        &self,
        request: CreateQuoteRequest,
        agente: AgentRef,
    ) -> Result<Quote, ServiceError> {
        info!("Registering new quote");

        let property_id = ObjectId::parse_str(&request.propiedad_id)
            .map_err(|_| ServiceError::InvalidInput("Invalid property id".to_string()))?;
        let property = self.property_repo.get_by_id(property_id).await?;

        let mut draft = QuoteDraft::from_property(&property);
        draft.set_selection(request.items_seleccionados);
        draft.select_team(request.equipo);
        draft.cliente = request.cliente;

        // Validation failures leave nothing persisted; the operator corrects
        // the payload and retries
        let quote = draft.build_quote_record(&agente)?;

        let res = self.quote_repo.create(quote).await;
        match &res {
            Ok(created) => info!(total = created.total, "Quote registered successfully"),
            Err(e) => error!("Failed to register quote: {e}"),
        }
        res.map_err(ServiceError::from)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get_quote(&self, id: ObjectId) -> Result<Quote, ServiceError> {
        let res = self.quote_repo.get_by_id(id).await;
        match &res {
            Ok(_) => info!("Quote fetched successfully"),
            Err(e) => error!("Failed to fetch quote: {e}"),
        }
        res.map_err(ServiceError::from)
    }

    #[instrument(skip(self, request), fields(id = %id))]
    async fn update_quote(
        &self,
        id: ObjectId,
        request: UpdateQuoteRequest,
    ) -> Result<Quote, ServiceError> {
        info!("Updating quote");

        let existing = self.quote_repo.get_by_id(id).await?;

        // Re-open the saved quote as a draft; its extras snapshot is the
        // candidate list, so the recomputed total resolves against it
        let mut draft = QuoteDraft::from_quote(&existing);
        draft.cliente = request.cliente;
        draft.select_team(request.equipo);
        draft.estado = request.estado;
        draft.set_selection(request.items_seleccionados);

        let update = draft.build_quote_update();

        let res = self.quote_repo.update(id, update).await;
        match &res {
            Ok(updated) => info!(total = updated.total, "Quote updated successfully"),
            Err(e) => error!("Failed to update quote: {e}"),
        }
        res.map_err(ServiceError::from)
    }

    #[instrument(skip(self), fields(id = %id, estado = %estado))]
    async fn update_quote_status(
        &self,
        id: ObjectId,
        estado: QuoteStatus,
    ) -> Result<Quote, ServiceError> {
        info!("Updating quote status");
        let res = self.quote_repo.update_status(id, estado).await;
        match &res {
            Ok(_) => info!("Quote status updated successfully"),
            Err(e) => error!("Failed to update quote status: {e}"),
        }
        res.map_err(ServiceError::from)
    }

    #[instrument(skip(self), fields(agent_uid = %agent_uid))]
    async fn list_quotes_for_agent(&self, agent_uid: &str) -> Result<Vec<Quote>, ServiceError> {
        let res = self.quote_repo.list_for_agent(agent_uid).await;
        match &res {
            Ok(quotes) => info!("Fetched {} quotes", quotes.len()),
            Err(e) => error!("Failed to list quotes: {e}"),
        }
        res.map_err(ServiceError::from)
    }

    #[instrument(skip(self))]
    async fn list_quotes_all(&self) -> Result<Vec<Quote>, ServiceError> {
        let res = self.quote_repo.list_all().await;
        match &res {
            Ok(quotes) => info!("Fetched {} quotes", quotes.len()),
            Err(e) => error!("Failed to list quotes: {e}"),
        }
        res.map_err(ServiceError::from)
    }
}
