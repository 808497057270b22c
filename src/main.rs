#![allow(clippy::result_large_err)]

use bookflow::cache::DonationLedger;
use bookflow::core::model::RequestStatus;
use bookflow::{config, core, errors::Result};
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Make it non-fatal, env vars can be set externally
    info!("Attempted to load .env file.");

    // 3. Load the application settings
    let settings = config::settings::load_default_settings()?;
    info!(
        country_code = %settings.messaging.country_code,
        "Settings loaded."
    );

    // 4. Initialize database
    let db = config::database::create_connection()
        .await
        .inspect(|_| info!("Database connection opened."))
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    config::database::create_tables(&db).await?;
    info!("Database tables ready.");

    // 5. Load this device's donation ledger
    let ledger = DonationLedger::load(&settings.donations.ledger_path)?;
    info!(commitments = ledger.ids().len(), "Donation ledger loaded.");

    // 6. Summarize the request board
    let requests = core::request::get_all_requests_or_samples(&db).await;
    let open = requests
        .iter()
        .filter(|r| RequestStatus::parse(&r.status).is_some_and(RequestStatus::is_open))
        .count();
    info!(
        total = requests.len(),
        open, "Request board ready."
    );

    Ok(())
}
