use super::{IEventRepo, SaveGuardOutcome};
use crate::repos::shared::inmemory_repo::*;
use parley_domain::{SchedulableEvent, SchedulingStatus, ID};

pub struct InMemoryEventRepo {
    events: std::sync::Mutex<Vec<SchedulableEvent>>,
}

impl InMemoryEventRepo {
    pub fn new() -> Self {
        Self {
            events: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IEventRepo for InMemoryEventRepo {
    async fn insert(&self, e: &SchedulableEvent) -> anyhow::Result<()> {
        insert(e, &self.events);
        Ok(())
    }

    async fn save(&self, e: &SchedulableEvent) -> anyhow::Result<()> {
        save(e, &self.events);
        Ok(())
    }

    async fn save_with_status_guard(
        &self,
        e: &SchedulableEvent,
        expected_status: SchedulingStatus,
    ) -> anyhow::Result<SaveGuardOutcome> {
        let mut events = self.events.lock().unwrap();
        for i in 0..events.len() {
            if events[i].id == e.id {
                if events[i].scheduling_status != expected_status {
                    return Ok(SaveGuardOutcome::StaleStatus);
                }
                events.splice(i..i + 1, vec![e.clone()]);
                return Ok(SaveGuardOutcome::Saved);
            }
        }
        Ok(SaveGuardOutcome::StaleStatus)
    }

    async fn find(&self, event_id: &ID) -> Option<SchedulableEvent> {
        find(event_id, &self.events)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use parley_domain::{EventStatus, EventType};

    fn proposed_event() -> SchedulableEvent {
        SchedulableEvent {
            id: Default::default(),
            title: "Kickoff".into(),
            event_type: EventType::Coaching1on1,
            host_user_id: Default::default(),
            attendee_ids: Vec::new(),
            proposed_by: Default::default(),
            scheduling_status: SchedulingStatus::Proposed,
            status: EventStatus::Draft,
            proposed_times: Vec::new(),
            start_ts: None,
            end_ts: None,
            confirmed_at: None,
            organization_id: None,
            program_id: None,
            cohort_id: None,
            timezone: None,
            location_label: None,
            meeting_link: None,
            scheduling_notes: Vec::new(),
            external_event_id: None,
            external_calendar_id: None,
            synced_to_calendar: false,
            created: 0,
            updated: 0,
        }
    }

    #[tokio::test]
    async fn status_guard_rejects_stale_writers() {
        let repo = InMemoryEventRepo::new();
        let event = proposed_event();
        repo.insert(&event).await.unwrap();

        // First writer confirms the event
        let mut confirmed = event.clone();
        confirmed.scheduling_status = SchedulingStatus::Confirmed;
        assert_eq!(
            repo.save_with_status_guard(&confirmed, SchedulingStatus::Proposed)
                .await
                .unwrap(),
            SaveGuardOutcome::Saved
        );

        // Second writer still believes the event is proposed
        let mut declined = event.clone();
        declined.scheduling_status = SchedulingStatus::Declined;
        assert_eq!(
            repo.save_with_status_guard(&declined, SchedulingStatus::Proposed)
                .await
                .unwrap(),
            SaveGuardOutcome::StaleStatus
        );

        let stored = repo.find(&event.id).await.unwrap();
        assert_eq!(stored.scheduling_status, SchedulingStatus::Confirmed);
    }
}
