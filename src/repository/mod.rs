pub mod property_repo;
pub mod quote_repo;
pub mod repository_error;
pub mod team_repo;

use crate::config::mongo_conf::MongoConfig;
use mongodb::{
    options::{ClientOptions, Credential, ResolverConfig},
    Client, Collection,
};

/// Opens one of the backend's collections using the shared MongoDB
/// configuration.
pub(crate) async fn open_collection<T>(
    config: &MongoConfig,
    name: &str,
) -> Result<Collection<T>, mongodb::error::Error> {
    let mut client_options =
        ClientOptions::parse_with_resolver_config(&config.uri, ResolverConfig::cloudflare())
            .await?;
    client_options.app_name = Some("CotizadorBackend".to_string());
    client_options.max_pool_size = Some(config.pool_size);
    client_options.connect_timeout = Some(std::time::Duration::from_secs(
        config.connection_timeout_secs,
    ));

    if let (Some(username), Some(password)) = (&config.username, &config.password) {
        client_options.credential = Some(
            Credential::builder()
                .username(username.clone())
                .password(password.clone())
                .build(),
        );
    }

    let client = Client::with_options(client_options)?;
    Ok(client.database(&config.database).collection::<T>(name))
}
