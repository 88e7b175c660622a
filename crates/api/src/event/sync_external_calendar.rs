use crate::shared::usecase::UseCase;
use parley_domain::{SchedulableEvent, SchedulingStatus};
use parley_infra::{CalendarEventAttributes, CalendarEventParticipant, ParleyContext};
use tracing::warn;

/// Pushes a confirmed event to the host organization's external
/// calendar. Sync is opt-in at several levels (deployment config,
/// organization settings, grant state), and every missing prerequisite
/// is a silent skip rather than an error: the call happens whether or
/// not it makes it onto the calendar.
#[derive(Debug)]
pub struct SyncExternalCalendarUseCase {
    pub event: SchedulableEvent,
}

#[derive(Debug)]
pub enum SyncReport {
    Pushed(SchedulableEvent),
    Skipped(&'static str),
}

#[derive(Debug)]
pub enum UseCaseError {
    EventNotConfirmed,
    CalendarApiError,
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SyncExternalCalendarUseCase {
    type Response = SyncReport;

    type Error = UseCaseError;

    async fn execute(&mut self, ctx: &ParleyContext) -> Result<Self::Response, Self::Error> {
        let event = &self.event;
        let start_ts = match (event.scheduling_status, event.start_ts) {
            (SchedulingStatus::Confirmed, Some(start_ts)) => start_ts,
            _ => return Err(UseCaseError::EventNotConfirmed),
        };

        if !ctx.calendar_provider.is_enabled() {
            return Ok(SyncReport::Skipped("calendar sync disabled for deployment"));
        }
        let organization_id = match &event.organization_id {
            Some(organization_id) => organization_id,
            None => return Ok(SyncReport::Skipped("event has no organization")),
        };
        let settings = match ctx
            .repos
            .availability_settings
            .find(organization_id)
            .await
        {
            Some(settings) => settings,
            None => return Ok(SyncReport::Skipped("organization has no settings")),
        };
        if !settings.push_events_to_calendar {
            return Ok(SyncReport::Skipped("organization opted out of calendar push"));
        }
        let grant_id = match &settings.calendar_grant_id {
            Some(grant_id) => grant_id,
            None => return Ok(SyncReport::Skipped("organization has no calendar grant")),
        };
        let grant = match ctx.repos.calendar_grants.find_active(grant_id).await {
            Some(grant) => grant,
            None => return Ok(SyncReport::Skipped("calendar grant missing or revoked")),
        };
        let calendar_id = match &grant.calendar_id {
            Some(calendar_id) => calendar_id.clone(),
            None => return Ok(SyncReport::Skipped("grant has no target calendar")),
        };

        let end_ts = event.end_ts.unwrap_or_else(|| {
            let duration_minutes = settings
                .default_duration_minutes
                .unwrap_or(ctx.config.event_duration_minutes_fallback);
            start_ts + duration_minutes * 60 * 1000
        });

        let mut participants = Vec::new();
        for attendee_id in &event.attendee_ids {
            if *attendee_id == event.host_user_id {
                continue;
            }
            match ctx.repos.users.find(attendee_id).await {
                Some(user) => match user.email {
                    Some(email) => participants.push(CalendarEventParticipant { email }),
                    None => warn!(
                        "Attendee: {} has no email, leaving them off the calendar event",
                        attendee_id
                    ),
                },
                None => warn!(
                    "Attendee: {} not found, leaving them off the calendar event",
                    attendee_id
                ),
            }
        }

        let attributes = CalendarEventAttributes {
            title: event.title.clone(),
            description: format!("Confirmed call: {}", event.title),
            location: event
                .meeting_link
                .clone()
                .or_else(|| event.location_label.clone()),
            start_time: start_ts / 1000,
            end_time: end_ts / 1000,
            participants,
        };
        let external_event = ctx
            .calendar_provider
            .create_event(&grant, &calendar_id, &attributes)
            .await
            .map_err(|_| UseCaseError::CalendarApiError)?;

        let mut event = self.event.clone();
        event.external_event_id = Some(external_event.id);
        event.external_calendar_id = Some(calendar_id);
        event.synced_to_calendar = true;
        if event.meeting_link.is_none() {
            event.meeting_link = external_event.conference_url;
        }
        event.updated = ctx.sys.get_timestamp_millis();

        ctx.repos
            .events
            .save(&event)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(SyncReport::Pushed(event))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use parley_domain::{
        CalendarGrant, CalendarGrantStatus, CoachAvailabilitySettings, EventStatus, EventType,
        User, ID,
    };
    use parley_infra::{setup_context, InMemoryCalendarProvider};
    use std::sync::Arc;

    fn confirmed_event(host: &User, organization_id: Option<ID>) -> SchedulableEvent {
        SchedulableEvent {
            id: Default::default(),
            title: "Strategy call".into(),
            event_type: EventType::Coaching1on1,
            host_user_id: host.id.clone(),
            attendee_ids: vec![host.id.clone()],
            proposed_by: host.id.clone(),
            scheduling_status: SchedulingStatus::Confirmed,
            status: EventStatus::Confirmed,
            proposed_times: Vec::new(),
            start_ts: Some(10_000_000),
            end_ts: None,
            confirmed_at: Some(0),
            organization_id,
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

    async fn insert_sync_fixtures(ctx: &ParleyContext, organization_id: &ID) {
        ctx.repos
            .availability_settings
            .insert(&CoachAvailabilitySettings {
                organization_id: organization_id.clone(),
                push_events_to_calendar: true,
                calendar_grant_id: Some("grant-1".into()),
                default_duration_minutes: None,
            })
            .await
            .unwrap();
        ctx.repos
            .calendar_grants
            .insert(&CalendarGrant {
                id: "grant-1".into(),
                calendar_id: Some("primary".into()),
                status: CalendarGrantStatus::Active,
            })
            .await
            .unwrap();
    }

    #[actix_web::main]
    #[test]
    async fn skips_when_deployment_has_no_calendar_config() {
        let ctx = setup_context().await;
        let host = User::new();
        let event = confirmed_event(&host, Some(Default::default()));

        let mut usecase = SyncExternalCalendarUseCase { event };
        let report = usecase.execute(&ctx).await.unwrap();
        assert!(matches!(report, SyncReport::Skipped(_)));
    }

    #[actix_web::main]
    #[test]
    async fn skips_when_the_organization_opted_out() {
        let mut ctx = setup_context().await;
        ctx.calendar_provider = Arc::new(InMemoryCalendarProvider::enabled(None));

        let host = User::new();
        let organization_id = ID::new();
        ctx.repos
            .availability_settings
            .insert(&CoachAvailabilitySettings {
                organization_id: organization_id.clone(),
                push_events_to_calendar: false,
                calendar_grant_id: Some("grant-1".into()),
                default_duration_minutes: None,
            })
            .await
            .unwrap();
        let event = confirmed_event(&host, Some(organization_id));

        let mut usecase = SyncExternalCalendarUseCase { event };
        let report = usecase.execute(&ctx).await.unwrap();
        assert!(matches!(
            report,
            SyncReport::Skipped("organization opted out of calendar push")
        ));
    }

    #[actix_web::main]
    #[test]
    async fn skips_when_the_grant_is_revoked() {
        let mut ctx = setup_context().await;
        ctx.calendar_provider = Arc::new(InMemoryCalendarProvider::enabled(None));

        let host = User::new();
        let organization_id = ID::new();
        ctx.repos
            .availability_settings
            .insert(&CoachAvailabilitySettings {
                organization_id: organization_id.clone(),
                push_events_to_calendar: true,
                calendar_grant_id: Some("grant-1".into()),
                default_duration_minutes: None,
            })
            .await
            .unwrap();
        ctx.repos
            .calendar_grants
            .insert(&CalendarGrant {
                id: "grant-1".into(),
                calendar_id: Some("primary".into()),
                status: CalendarGrantStatus::Revoked,
            })
            .await
            .unwrap();
        let event = confirmed_event(&host, Some(organization_id));

        let mut usecase = SyncExternalCalendarUseCase { event };
        let report = usecase.execute(&ctx).await.unwrap();
        assert!(matches!(
            report,
            SyncReport::Skipped("calendar grant missing or revoked")
        ));
    }

    #[actix_web::main]
    #[test]
    async fn pushes_the_event_and_persists_the_external_markers() {
        let mut ctx = setup_context().await;
        let provider = Arc::new(InMemoryCalendarProvider::enabled(Some(
            "https://conf.example.org/xyz".into(),
        )));
        ctx.calendar_provider = provider.clone();

        let host = User::new();
        let client = User {
            id: Default::default(),
            name: None,
            email: Some("client@example.org".into()),
        };
        ctx.repos.users.insert(&host).await.unwrap();
        ctx.repos.users.insert(&client).await.unwrap();
        let organization_id = ID::new();
        insert_sync_fixtures(&ctx, &organization_id).await;

        let mut event = confirmed_event(&host, Some(organization_id));
        event.attendee_ids.push(client.id.clone());
        ctx.repos.events.insert(&event).await.unwrap();

        let mut usecase = SyncExternalCalendarUseCase {
            event: event.clone(),
        };
        let report = usecase.execute(&ctx).await.unwrap();

        let pushed = match report {
            SyncReport::Pushed(event) => event,
            SyncReport::Skipped(reason) => panic!("unexpected skip: {}", reason),
        };
        assert!(pushed.synced_to_calendar);
        assert_eq!(pushed.external_event_id, Some("external_1".into()));
        assert_eq!(pushed.external_calendar_id, Some("primary".into()));
        // No meeting link on the event, so the conference url is adopted
        assert_eq!(
            pushed.meeting_link,
            Some("https://conf.example.org/xyz".into())
        );

        let stored = ctx.repos.events.find(&event.id).await.unwrap();
        assert!(stored.synced_to_calendar);
        assert_eq!(stored.external_event_id, Some("external_1".into()));

        let created = provider.created.lock().unwrap();
        assert_eq!(created.len(), 1);
        // Epoch seconds, end derived from the 60 minute fallback
        assert_eq!(created[0].start_time, 10_000);
        assert_eq!(created[0].end_time, 10_000 + 60 * 60);
        assert_eq!(created[0].participants.len(), 1);
        assert_eq!(created[0].participants[0].email, "client@example.org");
    }

    #[actix_web::main]
    #[test]
    async fn an_existing_meeting_link_is_never_overwritten() {
        let mut ctx = setup_context().await;
        ctx.calendar_provider = Arc::new(InMemoryCalendarProvider::enabled(Some(
            "https://conf.example.org/other".into(),
        )));

        let host = User::new();
        ctx.repos.users.insert(&host).await.unwrap();
        let organization_id = ID::new();
        insert_sync_fixtures(&ctx, &organization_id).await;

        let mut event = confirmed_event(&host, Some(organization_id));
        event.meeting_link = Some("https://meet.example.org/original".into());
        ctx.repos.events.insert(&event).await.unwrap();

        let mut usecase = SyncExternalCalendarUseCase {
            event: event.clone(),
        };
        let report = usecase.execute(&ctx).await.unwrap();

        let pushed = match report {
            SyncReport::Pushed(event) => event,
            SyncReport::Skipped(reason) => panic!("unexpected skip: {}", reason),
        };
        assert!(pushed.synced_to_calendar);
        assert_eq!(
            pushed.meeting_link,
            Some("https://meet.example.org/original".into())
        );
    }

    #[actix_web::main]
    #[test]
    async fn an_unconfirmed_event_is_rejected() {
        let ctx = setup_context().await;
        let host = User::new();
        let mut event = confirmed_event(&host, None);
        event.scheduling_status = SchedulingStatus::CounterProposed;

        let mut usecase = SyncExternalCalendarUseCase { event };
        let err = usecase.execute(&ctx).await.unwrap_err();
        assert!(matches!(err, UseCaseError::EventNotConfirmed));
    }
}
