mod inmemory;
mod postgres;

pub use inmemory::InMemoryEventRepo;
use parley_domain::{SchedulableEvent, SchedulingStatus, ID};
pub use postgres::PostgresEventRepo;

/// Outcome of a conditional save. `StaleStatus` means another writer
/// resolved the event between this request's read and write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveGuardOutcome {
    Saved,
    StaleStatus,
}

#[async_trait::async_trait]
pub trait IEventRepo: Send + Sync {
    async fn insert(&self, e: &SchedulableEvent) -> anyhow::Result<()>;
    async fn save(&self, e: &SchedulableEvent) -> anyhow::Result<()>;
    /// Saves only if the stored event still has `expected_status`. This
    /// is the write-serialization point for negotiation transitions: of
    /// two concurrent responders only the first writer wins, the second
    /// observes `StaleStatus`.
    async fn save_with_status_guard(
        &self,
        e: &SchedulableEvent,
        expected_status: SchedulingStatus,
    ) -> anyhow::Result<SaveGuardOutcome>;
    async fn find(&self, event_id: &ID) -> Option<SchedulableEvent>;
}
