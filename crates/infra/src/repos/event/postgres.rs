use super::{IEventRepo, SaveGuardOutcome};
use chrono_tz::Tz;
use parley_domain::{SchedulableEvent, SchedulingStatus, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::str::FromStr;

pub struct PostgresEventRepo {
    pool: PgPool,
}

impl PostgresEventRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct EventRaw {
    event_uid: Uuid,
    title: String,
    event_type: String,
    host_uid: Uuid,
    attendee_uids: Vec<Uuid>,
    proposed_by_uid: Uuid,
    scheduling_status: String,
    status: String,
    proposed_times: serde_json::Value,
    start_ts: Option<i64>,
    end_ts: Option<i64>,
    confirmed_at: Option<i64>,
    organization_uid: Option<Uuid>,
    program_uid: Option<Uuid>,
    cohort_uid: Option<Uuid>,
    timezone: Option<String>,
    location_label: Option<String>,
    meeting_link: Option<String>,
    scheduling_notes: Vec<String>,
    external_event_id: Option<String>,
    external_calendar_id: Option<String>,
    synced_to_calendar: bool,
    created: i64,
    updated: i64,
}

impl From<EventRaw> for SchedulableEvent {
    fn from(e: EventRaw) -> Self {
        Self {
            id: e.event_uid.into(),
            title: e.title,
            event_type: e.event_type.parse().unwrap(),
            host_user_id: e.host_uid.into(),
            attendee_ids: e.attendee_uids.into_iter().map(ID::from).collect(),
            proposed_by: e.proposed_by_uid.into(),
            scheduling_status: e.scheduling_status.parse().unwrap(),
            status: e.status.parse().unwrap(),
            proposed_times: serde_json::from_value(e.proposed_times).unwrap(),
            start_ts: e.start_ts,
            end_ts: e.end_ts,
            confirmed_at: e.confirmed_at,
            organization_id: e.organization_uid.map(ID::from),
            program_id: e.program_uid.map(ID::from),
            cohort_id: e.cohort_uid.map(ID::from),
            timezone: e.timezone.and_then(|tz| Tz::from_str(&tz).ok()),
            location_label: e.location_label,
            meeting_link: e.meeting_link,
            scheduling_notes: e.scheduling_notes,
            external_event_id: e.external_event_id,
            external_calendar_id: e.external_calendar_id,
            synced_to_calendar: e.synced_to_calendar,
            created: e.created,
            updated: e.updated,
        }
    }
}

fn attendee_uids(e: &SchedulableEvent) -> Vec<Uuid> {
    e.attendee_ids.iter().map(|id| *id.inner_ref()).collect()
}

#[async_trait::async_trait]
impl IEventRepo for PostgresEventRepo {
    async fn insert(&self, e: &SchedulableEvent) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO schedulable_events(
                event_uid,
                title,
                event_type,
                host_uid,
                attendee_uids,
                proposed_by_uid,
                scheduling_status,
                status,
                proposed_times,
                start_ts,
                end_ts,
                confirmed_at,
                organization_uid,
                program_uid,
                cohort_uid,
                timezone,
                location_label,
                meeting_link,
                scheduling_notes,
                external_event_id,
                external_calendar_id,
                synced_to_calendar,
                created,
                updated
            )
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $24)
            "#,
        )
        .bind(e.id.inner_ref())
        .bind(&e.title)
        .bind(e.event_type.as_str())
        .bind(e.host_user_id.inner_ref())
        .bind(attendee_uids(e))
        .bind(e.proposed_by.inner_ref())
        .bind(e.scheduling_status.as_str())
        .bind(e.status.as_str())
        .bind(serde_json::to_value(&e.proposed_times)?)
        .bind(e.start_ts)
        .bind(e.end_ts)
        .bind(e.confirmed_at)
        .bind(e.organization_id.as_ref().map(|id| *id.inner_ref()))
        .bind(e.program_id.as_ref().map(|id| *id.inner_ref()))
        .bind(e.cohort_id.as_ref().map(|id| *id.inner_ref()))
        .bind(e.timezone.map(|tz| tz.name().to_string()))
        .bind(&e.location_label)
        .bind(&e.meeting_link)
        .bind(&e.scheduling_notes)
        .bind(&e.external_event_id)
        .bind(&e.external_calendar_id)
        .bind(e.synced_to_calendar)
        .bind(e.created)
        .bind(e.updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save(&self, e: &SchedulableEvent) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE schedulable_events SET
                scheduling_status = $2,
                status = $3,
                proposed_by_uid = $4,
                proposed_times = $5,
                start_ts = $6,
                end_ts = $7,
                confirmed_at = $8,
                meeting_link = $9,
                scheduling_notes = $10,
                external_event_id = $11,
                external_calendar_id = $12,
                synced_to_calendar = $13,
                updated = $14
            WHERE event_uid = $1
            "#,
        )
        .bind(e.id.inner_ref())
        .bind(e.scheduling_status.as_str())
        .bind(e.status.as_str())
        .bind(e.proposed_by.inner_ref())
        .bind(serde_json::to_value(&e.proposed_times)?)
        .bind(e.start_ts)
        .bind(e.end_ts)
        .bind(e.confirmed_at)
        .bind(&e.meeting_link)
        .bind(&e.scheduling_notes)
        .bind(&e.external_event_id)
        .bind(&e.external_calendar_id)
        .bind(e.synced_to_calendar)
        .bind(e.updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save_with_status_guard(
        &self,
        e: &SchedulableEvent,
        expected_status: SchedulingStatus,
    ) -> anyhow::Result<SaveGuardOutcome> {
        let res = sqlx::query(
            r#"
            UPDATE schedulable_events SET
                scheduling_status = $3,
                status = $4,
                proposed_by_uid = $5,
                proposed_times = $6,
                start_ts = $7,
                end_ts = $8,
                confirmed_at = $9,
                scheduling_notes = $10,
                updated = $11
            WHERE event_uid = $1 AND scheduling_status = $2
            "#,
        )
        .bind(e.id.inner_ref())
        .bind(expected_status.as_str())
        .bind(e.scheduling_status.as_str())
        .bind(e.status.as_str())
        .bind(e.proposed_by.inner_ref())
        .bind(serde_json::to_value(&e.proposed_times)?)
        .bind(e.start_ts)
        .bind(e.end_ts)
        .bind(e.confirmed_at)
        .bind(&e.scheduling_notes)
        .bind(e.updated)
        .execute(&self.pool)
        .await?;

        if res.rows_affected() == 1 {
            Ok(SaveGuardOutcome::Saved)
        } else {
            Ok(SaveGuardOutcome::StaleStatus)
        }
    }

    async fn find(&self, event_id: &ID) -> Option<SchedulableEvent> {
        let res: Option<EventRaw> = sqlx::query_as(
            r#"
            SELECT * FROM schedulable_events
            WHERE event_uid = $1
            "#,
        )
        .bind(event_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()?;
        res.map(|e| e.into())
    }
}
