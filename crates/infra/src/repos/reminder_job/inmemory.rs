use super::IReminderJobRepo;
use crate::repos::shared::inmemory_repo::*;
use parley_domain::{ReminderJob, ID};

pub struct InMemoryReminderJobRepo {
    jobs: std::sync::Mutex<Vec<ReminderJob>>,
}

impl InMemoryReminderJobRepo {
    pub fn new() -> Self {
        Self {
            jobs: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IReminderJobRepo for InMemoryReminderJobRepo {
    async fn bulk_upsert(&self, jobs: &[ReminderJob]) -> anyhow::Result<()> {
        // Single lock acquisition keeps the batch atomic
        let mut collection = self.jobs.lock().unwrap();
        for job in jobs {
            match collection.iter().position(|j| j.id == job.id) {
                Some(i) => {
                    collection.splice(i..i + 1, vec![job.clone()]);
                }
                None => collection.push(job.clone()),
            }
        }
        Ok(())
    }

    async fn find(&self, job_id: &str) -> Option<ReminderJob> {
        find(&job_id.to_string(), &self.jobs)
    }

    async fn find_by_event(&self, event_id: &ID) -> Vec<ReminderJob> {
        find_by(&self.jobs, |job| job.event_id == *event_id)
    }
}
