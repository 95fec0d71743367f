use frostbite::{bot, config::Settings, db, services::store::SettingsStore};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Frostbite Discord Bot");

    // Load settings
    let settings = match Settings::from_env() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to load settings: {}", e);
            std::process::exit(1);
        }
    };

    // Open the storage file
    let pool = match db::pool::create_pool(&settings.database_url).await {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to create database pool: {}", e);
            std::process::exit(1);
        }
    };

    // Create every table, then load every mirror
    let store = match SettingsStore::open(pool).await {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to load settings tables: {}", e);
            std::process::exit(1);
        }
    };

    info!("Database initialized successfully");

    // Start the bot
    if let Err(e) = bot::framework::run(settings, store).await {
        error!("Bot error: {}", e);
        std::process::exit(1);
    }
}
