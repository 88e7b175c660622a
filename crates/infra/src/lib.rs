mod config;
mod repos;
mod services;
mod system;

pub use config::Config;
pub use repos::{IEventRepo, Repos, SaveGuardOutcome};
pub use services::*;
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;
use tracing::info;

#[derive(Clone)]
pub struct ParleyContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub notifier: Arc<dyn INotificationDispatcher>,
    pub calendar_provider: Arc<dyn ICalendarProvider>,
}

impl ParleyContext {
    async fn create_postgres(connection_string: &str) -> Self {
        let repos = Repos::create_postgres(connection_string)
            .await
            .expect("Postgres credentials must be set and valid");
        let config = Config::new();
        let notifier = Arc::new(WebhookNotifier::new(config.notifier_webhook_url.clone()));
        let calendar_provider = Arc::new(ExternalCalendarProvider::from_config(&config));
        Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            notifier,
            calendar_provider,
        }
    }

    fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            notifier: Arc::new(InMemoryNotifier::new()),
            calendar_provider: Arc::new(InMemoryCalendarProvider::new()),
        }
    }
}

/// Will setup the infrastructure context given the environment.
/// Without a `DATABASE_URL` the context is backed by in-memory
/// repositories, which is what the tests run on.
pub async fn setup_context() -> ParleyContext {
    match std::env::var(PSQL_CONNECTION_STRING) {
        Ok(connection_string) => ParleyContext::create_postgres(&connection_string).await,
        Err(_) => {
            info!("DATABASE_URL not set, using in-memory repositories");
            ParleyContext::create_inmemory()
        }
    }
}

const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

pub async fn run_migration() -> Result<(), MigrateError> {
    let connection_string = std::env::var(PSQL_CONNECTION_STRING)
        .unwrap_or_else(|_| panic!("{} env var to be present.", PSQL_CONNECTION_STRING));
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&connection_string)
        .await
        .expect("TO CONNECT TO POSTGRES");

    sqlx::migrate!().run(&pool).await
}
