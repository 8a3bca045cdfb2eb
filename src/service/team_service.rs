use async_trait::async_trait;
use bson::oid::ObjectId;
use tracing::{error, info, instrument};

use crate::config::mongo_conf::MongoConfig;
use crate::dto::team_dto::SaveTeamRequest;
use crate::model::team::ServiceTeam;
use crate::repository::team_repo::{MongoTeamRepository, TeamRepository};
use crate::util::error::ServiceError;
use crate::util::numeric::parse_non_negative_or_zero;

#[async_trait]
pub trait TeamService: Send + Sync {
    async fn register_team(&self, request: SaveTeamRequest) -> Result<ServiceTeam, ServiceError>;
    async fn update_team(
        &self,
        id: ObjectId,
        request: SaveTeamRequest,
    ) -> Result<ServiceTeam, ServiceError>;
    async fn get_team(&self, id: ObjectId) -> Result<ServiceTeam, ServiceError>;
    async fn delete_team(&self, id: ObjectId) -> Result<(), ServiceError>;
    async fn list_teams(&self) -> Result<Vec<ServiceTeam>, ServiceError>;
    async fn seed_teams(&self) -> Result<Vec<ServiceTeam>, ServiceError>;
}

pub struct TeamServiceImpl {
    pub team_repo: MongoTeamRepository,
}

impl TeamServiceImpl {
    pub async fn new(mongo_config: &MongoConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let team_repo = MongoTeamRepository::new(mongo_config).await?;
        Ok(TeamServiceImpl { team_repo })
    }

    fn team_from_request(request: SaveTeamRequest) -> ServiceTeam {
        ServiceTeam {
            id: None,
            nombre: request.nombre,
            lider: request.lider,
            duracionEstimada: request.duracion_estimada,
            costoSemanal: parse_non_negative_or_zero(&request.costo_semanal),
            imagen: request.imagen.filter(|url| !url.trim().is_empty()),
            createdAt: None,
        }
    }
}

#[async_trait]
impl TeamService for TeamServiceImpl {
    #[instrument(skip(self, request), fields(nombre = %request.nombre))]
    async fn register_team(&self, request: SaveTeamRequest) -> Result<ServiceTeam, ServiceError> {
        info!("Registering new team");
        let team = Self::team_from_request(request);
        let res = self.team_repo.create(team).await;
        match &res {
            Ok(_) => info!("Team registered successfully"),
            Err(e) => error!("Failed to register team: {e}"),
        }
        res.map_err(ServiceError::from)
    }

    #[instrument(skip(self, request), fields(id = %id))]
    async fn update_team(
        &self,
        id: ObjectId,
        request: SaveTeamRequest,
    ) -> Result<ServiceTeam, ServiceError> {
        info!("Updating team");
        let existing = self.team_repo.get_by_id(id).await?;
        let mut team = Self::team_from_request(request);
        team.createdAt = existing.createdAt;

        let res = self.team_repo.update(id, team).await;
        match &res {
            Ok(_) => info!("Team updated successfully"),
            Err(e) => error!("Failed to update team: {e}"),
        }
        res.map_err(ServiceError::from)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get_team(&self, id: ObjectId) -> Result<ServiceTeam, ServiceError> {
        self.team_repo.get_by_id(id).await.map_err(ServiceError::from)
    }

    /// Removes the team from the roster. Open drafts that still point at it
    /// clear their selection on their side; saved quotes keep their snapshot.
    #[instrument(skip(self), fields(id = %id))]
    async fn delete_team(&self, id: ObjectId) -> Result<(), ServiceError> {
        info!("Deleting team");
        let res = self.team_repo.delete(id).await;
        match &res {
            Ok(_) => info!("Team deleted successfully"),
            Err(e) => error!("Failed to delete team: {e}"),
        }
        res.map_err(ServiceError::from)
    }

    #[instrument(skip(self))]
    async fn list_teams(&self) -> Result<Vec<ServiceTeam>, ServiceError> {
        let res = self.team_repo.list().await;
        match &res {
            Ok(teams) => info!("Fetched {} teams", teams.len()),
            Err(e) => error!("Failed to list teams: {e}"),
        }
        res.map_err(ServiceError::from)
    }

    /// Inserts the demo roster used to bootstrap an empty database.
    #[instrument(skip(self))]
    async fn seed_teams(&self) -> Result<Vec<ServiceTeam>, ServiceError> {
        info!("Seeding demo teams");
        let mut created = Vec::new();
        for team in demo_teams() {
            let inserted = self.team_repo.create(team).await.map_err(ServiceError::from)?;
            created.push(inserted);
        }
        info!("Seeded {} teams", created.len());
        Ok(created)
    }
}

fn demo_team(
    nombre: &str,
    lider: &str,
    duracion: &str,
    costo_semanal: f64,
    imagen: &str,
) -> ServiceTeam {
    ServiceTeam {
        id: None,
        nombre: nombre.to_string(),
        lider: lider.to_string(),
        duracionEstimada: duracion.to_string(),
        costoSemanal: costo_semanal,
        imagen: Some(imagen.to_string()),
        createdAt: None,
    }
}

fn demo_teams() -> Vec<ServiceTeam> {
    vec![
        demo_team(
            "Constructora Alfa",
            "Ing. Mariana Solís",
            "6 meses",
            45_000.0,
            "https://images.unsplash.com/photo-1504307651254-35680f356dfd?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80",
        ),
        demo_team(
            "Equipo Roble",
            "Arq. Tomás Herrera",
            "4 meses",
            38_000.0,
            "https://images.unsplash.com/photo-1541888946425-d81bb19240f5?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80",
        ),
        demo_team(
            "Grupo Cimientos",
            "Ing. Paola Rivas",
            "8 meses",
            52_000.0,
            "https://images.unsplash.com/photo-1503387762-592deb58ef4e?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_from_request_coerces_weekly_cost() {
        let request = SaveTeamRequest {
            nombre: "Constructora Alfa".to_string(),
            lider: "Ing. Mariana Solís".to_string(),
            duracion_estimada: "6 meses".to_string(),
            costo_semanal: "45000".to_string(),
            imagen: None,
        };
        let team = TeamServiceImpl::team_from_request(request.clone());
        assert_eq!(team.costoSemanal, 45_000.0);

        let mut bad = request;
        bad.costo_semanal = "sin costo".to_string();
        let team = TeamServiceImpl::team_from_request(bad);
        assert_eq!(team.costoSemanal, 0.0);
    }

    #[test]
    fn test_demo_roster_shape() {
        let teams = demo_teams();
        assert_eq!(teams.len(), 3);
        assert!(teams.iter().all(|team| team.costoSemanal > 0.0));
    }
}
