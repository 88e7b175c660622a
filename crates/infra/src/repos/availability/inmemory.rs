use super::IAvailabilitySettingsRepo;
use crate::repos::shared::inmemory_repo::*;
use parley_domain::{CoachAvailabilitySettings, ID};

pub struct InMemoryAvailabilitySettingsRepo {
    settings: std::sync::Mutex<Vec<CoachAvailabilitySettings>>,
}

impl InMemoryAvailabilitySettingsRepo {
    pub fn new() -> Self {
        Self {
            settings: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IAvailabilitySettingsRepo for InMemoryAvailabilitySettingsRepo {
    async fn insert(&self, settings: &CoachAvailabilitySettings) -> anyhow::Result<()> {
        insert(settings, &self.settings);
        Ok(())
    }

    async fn find(&self, organization_id: &ID) -> Option<CoachAvailabilitySettings> {
        find(organization_id, &self.settings)
    }
}
