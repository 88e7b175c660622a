mod availability;
mod calendar_grant;
mod coaching_record;
mod event;
mod reminder_job;
mod shared;
mod user;

use availability::{
    IAvailabilitySettingsRepo, InMemoryAvailabilitySettingsRepo, PostgresAvailabilitySettingsRepo,
};
use calendar_grant::{ICalendarGrantRepo, InMemoryCalendarGrantRepo, PostgresCalendarGrantRepo};
use coaching_record::{ICoachingRecordRepo, InMemoryCoachingRecordRepo, PostgresCoachingRecordRepo};
use event::{InMemoryEventRepo, PostgresEventRepo};
use reminder_job::{IReminderJobRepo, InMemoryReminderJobRepo, PostgresReminderJobRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use user::{IUserRepo, InMemoryUserRepo, PostgresUserRepo};

pub use event::{IEventRepo, SaveGuardOutcome};

#[derive(Clone)]
pub struct Repos {
    pub events: Arc<dyn IEventRepo>,
    pub reminder_jobs: Arc<dyn IReminderJobRepo>,
    pub availability_settings: Arc<dyn IAvailabilitySettingsRepo>,
    pub calendar_grants: Arc<dyn ICalendarGrantRepo>,
    pub coaching_records: Arc<dyn ICoachingRecordRepo>,
    pub users: Arc<dyn IUserRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(connection_string)
            .await?;

        Ok(Self {
            events: Arc::new(PostgresEventRepo::new(pool.clone())),
            reminder_jobs: Arc::new(PostgresReminderJobRepo::new(pool.clone())),
            availability_settings: Arc::new(PostgresAvailabilitySettingsRepo::new(pool.clone())),
            calendar_grants: Arc::new(PostgresCalendarGrantRepo::new(pool.clone())),
            coaching_records: Arc::new(PostgresCoachingRecordRepo::new(pool.clone())),
            users: Arc::new(PostgresUserRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            events: Arc::new(InMemoryEventRepo::new()),
            reminder_jobs: Arc::new(InMemoryReminderJobRepo::new()),
            availability_settings: Arc::new(InMemoryAvailabilitySettingsRepo::new()),
            calendar_grants: Arc::new(InMemoryCalendarGrantRepo::new()),
            coaching_records: Arc::new(InMemoryCoachingRecordRepo::new()),
            users: Arc::new(InMemoryUserRepo::new()),
        }
    }
}
