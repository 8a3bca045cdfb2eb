use cotizador_backend::app::app::App;
use cotizador_backend::util::logger::Logger;
use dotenv::dotenv;
use tracing::{info, warn};

#[tokio::main]
async fn main() {
    // Load environment variables before anything reads them
    match dotenv() {
        Ok(_) => {}
        Err(e) => eprintln!("No .env file loaded: {e} (using system env vars)"),
    }

    // Keep the guards alive for the lifetime of the process so the
    // non-blocking file writers flush on shutdown.
    let _logger = Logger::new().expect("Failed to initialize logging");

    info!("Starting cotizador backend");

    if std::env::var("JWT_SECRET").is_err() {
        warn!("JWT_SECRET not set, agent authentication will fail to start");
    }

    let app = App::new().await;
    app.start().await;
}
