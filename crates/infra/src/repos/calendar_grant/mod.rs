mod inmemory;
mod postgres;

pub use inmemory::InMemoryCalendarGrantRepo;
use parley_domain::CalendarGrant;
pub use postgres::PostgresCalendarGrantRepo;

/// Grants are maintained by the OAuth flow; the negotiation engine only
/// resolves active ones.
#[async_trait::async_trait]
pub trait ICalendarGrantRepo: Send + Sync {
    async fn insert(&self, grant: &CalendarGrant) -> anyhow::Result<()>;
    async fn find_active(&self, grant_id: &str) -> Option<CalendarGrant>;
}
