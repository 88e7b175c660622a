use crate::shared::usecase::UseCase;
use chrono_tz::Tz;
use parley_domain::{ClientCoachingRecord, NextCall, SchedulableEvent, SchedulingStatus};
use parley_infra::ParleyContext;

const FALLBACK_TIMEZONE: Tz = chrono_tz::America::New_York;
const FALLBACK_LOCATION: &str = "Virtual";

/// Refreshes the `next_call` summary on the legacy coaching record of
/// the client of a confirmed 1:1 call. The record is owned by an older
/// flow: if the coach never set one up there is nothing to update and
/// this use case will not create one.
#[derive(Debug)]
pub struct SyncClientRecordUseCase {
    pub event: SchedulableEvent,
}

#[derive(Debug)]
pub enum RecordSync {
    Updated(ClientCoachingRecord),
    Skipped(&'static str),
}

#[derive(Debug)]
pub enum UseCaseError {
    EventNotConfirmed,
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SyncClientRecordUseCase {
    type Response = RecordSync;

    type Error = UseCaseError;

    async fn execute(&mut self, ctx: &ParleyContext) -> Result<Self::Response, Self::Error> {
        let event = &self.event;
        let start_ts = match (event.scheduling_status, event.start_ts) {
            (SchedulingStatus::Confirmed, Some(start_ts)) => start_ts,
            _ => return Err(UseCaseError::EventNotConfirmed),
        };

        if event.event_type != parley_domain::EventType::Coaching1on1 {
            return Ok(RecordSync::Skipped("only 1:1 calls feed the coaching record"));
        }
        let organization_id = match &event.organization_id {
            Some(organization_id) => organization_id,
            None => return Ok(RecordSync::Skipped("event has no organization")),
        };
        let client_id = match event.client_attendee() {
            Some(client_id) => client_id,
            None => return Ok(RecordSync::Skipped("event has no client attendee")),
        };

        let mut record = match ctx
            .repos
            .coaching_records
            .find_for_client(organization_id, client_id)
            .await
        {
            Some(record) => record,
            None => return Ok(RecordSync::Skipped("client has no coaching record")),
        };

        record.next_call = Some(NextCall {
            datetime: start_ts,
            timezone: event.timezone.unwrap_or(FALLBACK_TIMEZONE),
            location: event
                .meeting_link
                .clone()
                .or_else(|| event.location_label.clone())
                .unwrap_or_else(|| FALLBACK_LOCATION.into()),
            title: event.title.clone(),
        });

        ctx.repos
            .coaching_records
            .save(&record)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(RecordSync::Updated(record))
    }
}
