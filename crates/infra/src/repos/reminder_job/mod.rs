mod inmemory;
mod postgres;

pub use inmemory::InMemoryReminderJobRepo;
use parley_domain::{ReminderJob, ID};
pub use postgres::PostgresReminderJobRepo;

#[async_trait::async_trait]
pub trait IReminderJobRepo: Send + Sync {
    /// Writes the whole batch atomically. Job ids are deterministic, so
    /// a second materialization for the same event overwrites rather
    /// than duplicates.
    async fn bulk_upsert(&self, jobs: &[ReminderJob]) -> anyhow::Result<()>;
    async fn find(&self, job_id: &str) -> Option<ReminderJob>;
    async fn find_by_event(&self, event_id: &ID) -> Vec<ReminderJob>;
}
