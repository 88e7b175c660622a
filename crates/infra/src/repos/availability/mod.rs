mod inmemory;
mod postgres;

pub use inmemory::InMemoryAvailabilitySettingsRepo;
use parley_domain::{CoachAvailabilitySettings, ID};
pub use postgres::PostgresAvailabilitySettingsRepo;

/// Read-only from the negotiation engine's perspective; `insert` exists
/// for the settings flow and for test fixtures.
#[async_trait::async_trait]
pub trait IAvailabilitySettingsRepo: Send + Sync {
    async fn insert(&self, settings: &CoachAvailabilitySettings) -> anyhow::Result<()>;
    async fn find(&self, organization_id: &ID) -> Option<CoachAvailabilitySettings>;
}
