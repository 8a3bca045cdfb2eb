use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use crate::config::app_conf::AppConfig;
use crate::config::jwt_conf::JwtConfig;
use crate::config::mongo_conf::MongoConfig;
use crate::middlewares::agent_middleware::AgentAuthState;
use crate::router::property_router::property_router;
use crate::router::quote_router::quote_router;
use crate::router::team_router::team_router;
use crate::service::property_service::PropertyServiceImpl;
use crate::service::quote_service::QuoteServiceImpl;
use crate::service::team_service::TeamServiceImpl;
use crate::util::jwt::JwtTokenUtilsImpl;

pub struct App {
    config: AppConfig,
    router: Router,
    pub property_service: Arc<PropertyServiceImpl>,
    pub team_service: Arc<TeamServiceImpl>,
    pub quote_service: Arc<QuoteServiceImpl>,
}

impl App {
    pub async fn new() -> Self {
        let config = AppConfig::from_env();
        let jwt_config = JwtConfig::from_env().expect("JWT config error");
        let mongo_config = MongoConfig::from_env().expect("Mongo config error");

        let jwt_utils = Arc::new(JwtTokenUtilsImpl::new(jwt_config));
        let auth_state = Arc::new(AgentAuthState {
            jwt_utils: jwt_utils.clone(),
        });

        let property_service = Arc::new(
            PropertyServiceImpl::new(&mongo_config)
                .await
                .expect("Property service error"),
        );
        let team_service = Arc::new(
            TeamServiceImpl::new(&mongo_config)
                .await
                .expect("Team service error"),
        );
        let quote_service = Arc::new(
            QuoteServiceImpl::new(&mongo_config)
                .await
                .expect("Quote service error"),
        );

        let router = Router::new()
            .merge(property_router(property_service.clone(), auth_state.clone()))
            .merge(team_router(team_service.clone(), auth_state.clone()))
            .merge(quote_router(quote_service.clone(), auth_state))
            .route("/health", get(|| async { "OK" }));

        App {
            config,
            router,
            property_service,
            team_service,
            quote_service,
        }
    }

    pub async fn start(self) {
        let addr = SocketAddr::new(
            self.config.host.parse().expect("Invalid host"),
            self.config.port,
        );
        info!("Server running at http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .expect("Failed to bind address");
        axum::serve(listener, self.router)
            .await
            .expect("Failed to start server");
    }
}
