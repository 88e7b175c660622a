mod inmemory;
mod postgres;

pub use inmemory::InMemoryCoachingRecordRepo;
use parley_domain::{ClientCoachingRecord, ID};
pub use postgres::PostgresCoachingRecordRepo;

#[async_trait::async_trait]
pub trait ICoachingRecordRepo: Send + Sync {
    async fn insert(&self, record: &ClientCoachingRecord) -> anyhow::Result<()>;
    async fn save(&self, record: &ClientCoachingRecord) -> anyhow::Result<()>;
    async fn find(&self, record_id: &str) -> Option<ClientCoachingRecord>;

    /// Single lookup strategy for the dual-schema read model: the
    /// namespaced record wins, the legacy unnamespaced one is the
    /// fallback. Callers never branch on the storage schema.
    async fn find_for_client(
        &self,
        organization_id: &ID,
        client_id: &ID,
    ) -> Option<ClientCoachingRecord> {
        let namespaced = ClientCoachingRecord::namespaced_id(organization_id, client_id);
        if let Some(record) = self.find(&namespaced).await {
            return Some(record);
        }
        self.find(&ClientCoachingRecord::legacy_id(client_id)).await
    }
}
