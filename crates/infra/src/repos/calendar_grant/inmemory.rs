use super::ICalendarGrantRepo;
use crate::repos::shared::inmemory_repo::*;
use parley_domain::{CalendarGrant, CalendarGrantStatus};

pub struct InMemoryCalendarGrantRepo {
    grants: std::sync::Mutex<Vec<CalendarGrant>>,
}

impl InMemoryCalendarGrantRepo {
    pub fn new() -> Self {
        Self {
            grants: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ICalendarGrantRepo for InMemoryCalendarGrantRepo {
    async fn insert(&self, grant: &CalendarGrant) -> anyhow::Result<()> {
        insert(grant, &self.grants);
        Ok(())
    }

    async fn find_active(&self, grant_id: &str) -> Option<CalendarGrant> {
        find_by(&self.grants, |grant| {
            grant.id == grant_id && grant.status == CalendarGrantStatus::Active
        })
        .into_iter()
        .next()
    }
}
