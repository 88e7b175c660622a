use chrono_tz::Tz;
use parley_domain::{
    EventStatus, EventType, ProposedTime, ProposedTimeStatus, SchedulableEvent, SchedulingStatus,
    ID,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProposedTimeDTO {
    pub id: String,
    pub start_ts: i64,
    pub end_ts: i64,
    pub proposed_by: ID,
    pub proposed_at: i64,
    pub status: ProposedTimeStatus,
}

impl ProposedTimeDTO {
    pub fn new(time: ProposedTime) -> Self {
        Self {
            id: time.id,
            start_ts: time.start_ts,
            end_ts: time.end_ts,
            proposed_by: time.proposed_by,
            proposed_at: time.proposed_at,
            status: time.status,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SchedulableEventDTO {
    pub id: ID,
    pub title: String,
    pub event_type: EventType,
    pub host_user_id: ID,
    pub attendee_ids: Vec<ID>,
    pub proposed_by: ID,
    pub scheduling_status: SchedulingStatus,
    pub status: EventStatus,
    pub proposed_times: Vec<ProposedTimeDTO>,
    pub start_ts: Option<i64>,
    pub end_ts: Option<i64>,
    pub confirmed_at: Option<i64>,
    pub organization_id: Option<ID>,
    pub program_id: Option<ID>,
    pub cohort_id: Option<ID>,
    pub timezone: Option<Tz>,
    pub location_label: Option<String>,
    pub meeting_link: Option<String>,
    pub scheduling_notes: Vec<String>,
    pub synced_to_calendar: bool,
    pub created: i64,
    pub updated: i64,
}

impl SchedulableEventDTO {
    pub fn new(event: SchedulableEvent) -> Self {
        Self {
            id: event.id,
            title: event.title,
            event_type: event.event_type,
            host_user_id: event.host_user_id,
            attendee_ids: event.attendee_ids,
            proposed_by: event.proposed_by,
            scheduling_status: event.scheduling_status,
            status: event.status,
            proposed_times: event
                .proposed_times
                .into_iter()
                .map(ProposedTimeDTO::new)
                .collect(),
            start_ts: event.start_ts,
            end_ts: event.end_ts,
            confirmed_at: event.confirmed_at,
            organization_id: event.organization_id,
            program_id: event.program_id,
            cohort_id: event.cohort_id,
            timezone: event.timezone,
            location_label: event.location_label,
            meeting_link: event.meeting_link,
            scheduling_notes: event.scheduling_notes,
            synced_to_calendar: event.synced_to_calendar,
            created: event.created,
            updated: event.updated,
        }
    }
}
