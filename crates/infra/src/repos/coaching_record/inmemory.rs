use super::ICoachingRecordRepo;
use crate::repos::shared::inmemory_repo::*;
use parley_domain::ClientCoachingRecord;

pub struct InMemoryCoachingRecordRepo {
    records: std::sync::Mutex<Vec<ClientCoachingRecord>>,
}

impl InMemoryCoachingRecordRepo {
    pub fn new() -> Self {
        Self {
            records: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ICoachingRecordRepo for InMemoryCoachingRecordRepo {
    async fn insert(&self, record: &ClientCoachingRecord) -> anyhow::Result<()> {
        insert(record, &self.records);
        Ok(())
    }

    async fn save(&self, record: &ClientCoachingRecord) -> anyhow::Result<()> {
        save(record, &self.records);
        Ok(())
    }

    async fn find(&self, record_id: &str) -> Option<ClientCoachingRecord> {
        find(&record_id.to_string(), &self.records)
    }
}
