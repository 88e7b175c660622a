use crate::shared::usecase::UseCase;
use parley_domain::{ReminderJob, ReminderJobType, SchedulableEvent, SchedulingStatus};
use parley_infra::ParleyContext;

/// Derives the fixed set of reminder jobs for a confirmed event and
/// writes them as one batch. Job ids are deterministic per event and
/// job type, so running this twice for the same event overwrites the
/// previous batch instead of duplicating it.
#[derive(Debug)]
pub struct MaterializeRemindersUseCase {
    pub event: SchedulableEvent,
}

#[derive(Debug)]
pub enum UseCaseError {
    EventNotConfirmed,
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for MaterializeRemindersUseCase {
    type Response = Vec<ReminderJob>;

    type Error = UseCaseError;

    async fn execute(&mut self, ctx: &ParleyContext) -> Result<Self::Response, Self::Error> {
        let event = &self.event;
        let start_ts = match (event.scheduling_status, event.start_ts) {
            (SchedulingStatus::Confirmed, Some(start_ts)) => start_ts,
            _ => return Err(UseCaseError::EventNotConfirmed),
        };

        let host_name = match ctx.repos.users.find(&event.host_user_id).await {
            Some(host) => host.name,
            None => None,
        };
        let event_location = event
            .meeting_link
            .clone()
            .or_else(|| event.location_label.clone());

        let now = ctx.sys.get_timestamp_millis();
        let jobs = ReminderJobType::all()
            .iter()
            .filter_map(|&job_type| {
                let scheduled_time = start_ts - job_type.offset_millis();
                // A reminder whose slot is already in the past would fire
                // immediately, which is worse than not firing at all.
                if scheduled_time <= now {
                    return None;
                }
                Some(ReminderJob {
                    id: ReminderJob::id_for(&event.id, job_type),
                    event_id: event.id.clone(),
                    job_type,
                    scheduled_time,
                    event_title: event.title.clone(),
                    event_start_ts: start_ts,
                    event_timezone: event.timezone,
                    event_location: event_location.clone(),
                    host_user_id: event.host_user_id.clone(),
                    host_name: host_name.clone(),
                    client_user_id: event.client_attendee().cloned(),
                    organization_id: event.organization_id.clone(),
                    executed: false,
                })
            })
            .collect::<Vec<_>>();

        ctx.repos
            .reminder_jobs
            .bulk_upsert(&jobs)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(jobs)
    }
}
