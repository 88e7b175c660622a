use crate::error::ParleyError;
use crate::event::subscribers::{
    CreateRemindersOnEventConfirmed, NotifyCounterpartyOnResponse, SyncClientRecordOnEventConfirmed,
    SyncExternalCalendarOnEventConfirmed,
};
use crate::shared::auth::protect_route;
use crate::shared::usecase::{execute, Subscriber, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use parley_api_structs::respond_to_event::{APIResponse, PathParams, RequestBody};
use parley_domain::{
    EventStatus, NegotiationAction, SchedulableEvent, SchedulingStatus, TimeSlot, User, ID,
};
use parley_infra::{ParleyContext, SaveGuardOutcome};

pub async fn respond_to_event_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<ParleyContext>,
) -> Result<HttpResponse, ParleyError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = RespondToEventUseCase {
        event_id: path_params.event_id.clone(),
        responder: user,
        action: body.action,
        selected_time_id: body.selected_time_id,
        counter_times: body.counter_times.unwrap_or_default(),
        message: body.message,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.event, res.action)))
        .map_err(ParleyError::from)
}

#[derive(Debug)]
pub struct RespondToEventUseCase {
    pub event_id: ID,
    pub responder: User,
    pub action: NegotiationAction,
    pub selected_time_id: Option<String>,
    pub counter_times: Vec<TimeSlot>,
    pub message: Option<String>,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub event: SchedulableEvent,
    pub action: NegotiationAction,
    pub responder_id: ID,
    /// The party that proposed the round being answered, captured
    /// before a counter flips the proposer role on the event.
    pub counterparty_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    NotAParticipant,
    OwnProposal,
    NotRespondable(SchedulingStatus),
    SelectedTimeRequired,
    UnknownSelectedTime(String),
    EmptyCounterTimes,
    StaleStatus,
    StorageError,
}

impl From<UseCaseError> for ParleyError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(event_id) => Self::NotFound(format!(
                "The event with id: {}, was not found.",
                event_id
            )),
            UseCaseError::NotAParticipant => {
                Self::Forbidden("Only a participant of the event can respond to it".into())
            }
            UseCaseError::OwnProposal => {
                Self::BadClientData("Cannot respond to your own proposal".into())
            }
            UseCaseError::NotRespondable(status) => Self::Conflict(format!(
                "The event is already resolved with scheduling status: {}",
                status
            )),
            UseCaseError::SelectedTimeRequired => Self::BadClientData(
                "A selectedTimeId is required when more than one time has been proposed".into(),
            ),
            UseCaseError::UnknownSelectedTime(time_id) => Self::BadClientData(format!(
                "The selected time with id: {}, is not among the proposed times",
                time_id
            )),
            UseCaseError::EmptyCounterTimes => {
                Self::BadClientData("A counter-proposal must contain at least one time".into())
            }
            UseCaseError::StaleStatus => Self::Conflict(
                "The event was resolved by another response while this one was processed".into(),
            ),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for RespondToEventUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    async fn execute(&mut self, ctx: &ParleyContext) -> Result<Self::Response, Self::Error> {
        let mut event = match ctx.repos.events.find(&self.event_id).await {
            Some(event) => event,
            None => return Err(UseCaseError::NotFound(self.event_id.clone())),
        };

        if !event.is_participant(&self.responder.id) {
            return Err(UseCaseError::NotAParticipant);
        }
        if event.proposed_by == self.responder.id {
            return Err(UseCaseError::OwnProposal);
        }
        if !event.is_respondable() {
            return Err(UseCaseError::NotRespondable(event.scheduling_status));
        }

        let expected_status = event.scheduling_status;
        let counterparty_id = event.proposed_by.clone();
        let now = ctx.sys.get_timestamp_millis();

        match self.action {
            NegotiationAction::Accept => {
                let time_id = match (&self.selected_time_id, event.proposed_times.len()) {
                    (Some(time_id), _) => time_id.clone(),
                    (None, 1) => event.proposed_times[0].id.clone(),
                    (None, _) => return Err(UseCaseError::SelectedTimeRequired),
                };
                if !event.accept_time(&time_id, now) {
                    return Err(UseCaseError::UnknownSelectedTime(time_id));
                }
                if let Some(message) = &self.message {
                    event.append_note(message.clone());
                }
            }
            NegotiationAction::Decline => {
                event.decline_all_times();
                event.scheduling_status = SchedulingStatus::Declined;
                event.status = EventStatus::Draft;
                if let Some(message) = &self.message {
                    event.append_note(format!("Declined: {}", message));
                }
            }
            NegotiationAction::Counter => {
                if self.counter_times.is_empty() {
                    return Err(UseCaseError::EmptyCounterTimes);
                }
                event.add_counter_times(&self.counter_times, &self.responder.id, now);
                if let Some(message) = &self.message {
                    event.append_note(format!("Counter-proposal: {}", message));
                }
            }
        }
        event.updated = now;

        match ctx
            .repos
            .events
            .save_with_status_guard(&event, expected_status)
            .await
        {
            Ok(SaveGuardOutcome::Saved) => Ok(UseCaseRes {
                event,
                action: self.action,
                responder_id: self.responder.id.clone(),
                counterparty_id,
            }),
            Ok(SaveGuardOutcome::StaleStatus) => Err(UseCaseError::StaleStatus),
            Err(_) => Err(UseCaseError::StorageError),
        }
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![
            Box::new(CreateRemindersOnEventConfirmed {}),
            Box::new(SyncExternalCalendarOnEventConfirmed {}),
            Box::new(SyncClientRecordOnEventConfirmed {}),
            Box::new(NotifyCounterpartyOnResponse {}),
        ]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use parley_domain::{
        EventStatus, EventType, ProposedTime, ProposedTimeStatus, ReminderJob, ReminderJobType,
    };
    use parley_infra::{setup_context, InMemoryNotifier};
    use std::sync::Arc;

    struct TestApp {
        ctx: ParleyContext,
        host: User,
        client: User,
        notifier: Arc<InMemoryNotifier>,
    }

    async fn setup() -> TestApp {
        let mut ctx = setup_context().await;
        let notifier = Arc::new(InMemoryNotifier::new());
        ctx.notifier = notifier.clone();
        let host = User {
            id: Default::default(),
            name: Some("Coach Ada".into()),
            email: Some("ada@example.org".into()),
        };
        let client = User {
            id: Default::default(),
            name: Some("Client Bob".into()),
            email: Some("bob@example.org".into()),
        };
        ctx.repos.users.insert(&host).await.unwrap();
        ctx.repos.users.insert(&client).await.unwrap();
        TestApp {
            ctx,
            host,
            client,
            notifier,
        }
    }

    fn proposed_event(host: &User, client: &User, times: Vec<ProposedTime>) -> SchedulableEvent {
        SchedulableEvent {
            id: Default::default(),
            title: "Weekly coaching call".into(),
            event_type: EventType::Coaching1on1,
            host_user_id: host.id.clone(),
            attendee_ids: vec![host.id.clone(), client.id.clone()],
            proposed_by: host.id.clone(),
            scheduling_status: SchedulingStatus::Proposed,
            status: EventStatus::Draft,
            proposed_times: times,
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

    fn times(host: &User, count: usize) -> Vec<ProposedTime> {
        (0..count)
            .map(|i| ProposedTime {
                id: format!("t{}", i + 1),
                start_ts: 100_000 * (i as i64 + 1),
                end_ts: 100_000 * (i as i64 + 1) + 3_600_000,
                proposed_by: host.id.clone(),
                proposed_at: 0,
                status: ProposedTimeStatus::Pending,
            })
            .collect()
    }

    fn accept(app: &TestApp, event: &SchedulableEvent) -> RespondToEventUseCase {
        RespondToEventUseCase {
            event_id: event.id.clone(),
            responder: app.client.clone(),
            action: NegotiationAction::Accept,
            selected_time_id: None,
            counter_times: Vec::new(),
            message: None,
        }
    }

    #[actix_web::main]
    #[test]
    async fn accepts_the_only_proposed_time_without_a_selection() {
        let app = setup().await;
        let event = proposed_event(&app.host, &app.client, times(&app.host, 1));
        app.ctx.repos.events.insert(&event).await.unwrap();

        let mut usecase = accept(&app, &event);
        let res = usecase.execute(&app.ctx).await.unwrap();

        assert_eq!(res.event.scheduling_status, SchedulingStatus::Confirmed);
        assert_eq!(res.event.status, EventStatus::Confirmed);
        assert_eq!(res.event.start_ts, Some(100_000));
        assert!(res.event.confirmed_at.is_some());

        let stored = app.ctx.repos.events.find(&event.id).await.unwrap();
        assert_eq!(stored.scheduling_status, SchedulingStatus::Confirmed);
    }

    #[actix_web::main]
    #[test]
    async fn accepting_among_multiple_times_requires_a_selection() {
        let app = setup().await;
        let event = proposed_event(&app.host, &app.client, times(&app.host, 3));
        app.ctx.repos.events.insert(&event).await.unwrap();

        let mut usecase = accept(&app, &event);
        let err = usecase.execute(&app.ctx).await.unwrap_err();
        assert!(matches!(err, UseCaseError::SelectedTimeRequired));

        // The event is untouched and still respondable
        let stored = app.ctx.repos.events.find(&event.id).await.unwrap();
        assert_eq!(stored.scheduling_status, SchedulingStatus::Proposed);
    }

    #[actix_web::main]
    #[test]
    async fn accepts_an_explicitly_selected_time() {
        let app = setup().await;
        let event = proposed_event(&app.host, &app.client, times(&app.host, 3));
        app.ctx.repos.events.insert(&event).await.unwrap();

        let mut usecase = accept(&app, &event);
        usecase.selected_time_id = Some("t2".into());
        let res = usecase.execute(&app.ctx).await.unwrap();

        assert_eq!(res.event.accepted_time().unwrap().id, "t2");
        assert_eq!(res.event.start_ts, Some(200_000));
        assert_eq!(
            res.event
                .proposed_times
                .iter()
                .filter(|t| t.status == ProposedTimeStatus::Declined)
                .count(),
            2
        );
    }

    #[actix_web::main]
    #[test]
    async fn rejects_an_unknown_selected_time() {
        let app = setup().await;
        let event = proposed_event(&app.host, &app.client, times(&app.host, 2));
        app.ctx.repos.events.insert(&event).await.unwrap();

        let mut usecase = accept(&app, &event);
        usecase.selected_time_id = Some("nosuchtime".into());
        let err = usecase.execute(&app.ctx).await.unwrap_err();
        assert!(matches!(err, UseCaseError::UnknownSelectedTime(_)));
    }

    #[actix_web::main]
    #[test]
    async fn the_proposer_cannot_respond_to_their_own_proposal() {
        let app = setup().await;
        let event = proposed_event(&app.host, &app.client, times(&app.host, 1));
        app.ctx.repos.events.insert(&event).await.unwrap();

        let mut usecase = accept(&app, &event);
        usecase.responder = app.host.clone();
        let err = usecase.execute(&app.ctx).await.unwrap_err();
        assert!(matches!(err, UseCaseError::OwnProposal));
    }

    #[actix_web::main]
    #[test]
    async fn a_non_participant_is_rejected() {
        let app = setup().await;
        let outsider = User::new();
        app.ctx.repos.users.insert(&outsider).await.unwrap();
        let event = proposed_event(&app.host, &app.client, times(&app.host, 1));
        app.ctx.repos.events.insert(&event).await.unwrap();

        let mut usecase = accept(&app, &event);
        usecase.responder = outsider;
        let err = usecase.execute(&app.ctx).await.unwrap_err();
        assert!(matches!(err, UseCaseError::NotAParticipant));
    }

    #[actix_web::main]
    #[test]
    async fn responding_to_an_unknown_event_is_not_found() {
        let app = setup().await;
        let event = proposed_event(&app.host, &app.client, times(&app.host, 1));

        let mut usecase = accept(&app, &event);
        let err = usecase.execute(&app.ctx).await.unwrap_err();
        assert!(matches!(err, UseCaseError::NotFound(_)));
    }

    #[actix_web::main]
    #[test]
    async fn declining_resolves_the_event_and_records_the_message() {
        let app = setup().await;
        let event = proposed_event(&app.host, &app.client, times(&app.host, 2));
        app.ctx.repos.events.insert(&event).await.unwrap();

        let mut usecase = accept(&app, &event);
        usecase.action = NegotiationAction::Decline;
        usecase.message = Some("That week does not work for me".into());
        let res = usecase.execute(&app.ctx).await.unwrap();

        assert_eq!(res.event.scheduling_status, SchedulingStatus::Declined);
        assert_eq!(res.event.status, EventStatus::Draft);
        assert!(res
            .event
            .proposed_times
            .iter()
            .all(|t| t.status == ProposedTimeStatus::Declined));
        assert_eq!(
            res.event.scheduling_notes,
            vec!["Declined: That week does not work for me".to_string()]
        );
        assert!(res.event.confirmed_at.is_none());
    }

    #[actix_web::main]
    #[test]
    async fn counter_proposal_opens_a_new_round_for_the_other_side() {
        let app = setup().await;
        let event = proposed_event(&app.host, &app.client, times(&app.host, 2));
        app.ctx.repos.events.insert(&event).await.unwrap();

        let mut usecase = accept(&app, &event);
        usecase.action = NegotiationAction::Counter;
        usecase.counter_times = vec![TimeSlot {
            start_ts: 900_000,
            end_ts: 903_600_000,
        }];
        let res = usecase.execute(&app.ctx).await.unwrap();

        assert_eq!(
            res.event.scheduling_status,
            SchedulingStatus::CounterProposed
        );
        assert_eq!(res.event.proposed_by, app.client.id);
        assert_eq!(res.event.proposed_times.len(), 3);
        assert!(res.event.confirmed_at.is_none());

        // The client now holds the proposer role and must wait
        let mut impatient = accept(&app, &event);
        let err = impatient.execute(&app.ctx).await.unwrap_err();
        assert!(matches!(err, UseCaseError::OwnProposal));

        // The host can accept the countered time
        let counter_time_id = res.event.proposed_times[2].id.clone();
        let mut host_accept = RespondToEventUseCase {
            event_id: event.id.clone(),
            responder: app.host.clone(),
            action: NegotiationAction::Accept,
            selected_time_id: Some(counter_time_id),
            counter_times: Vec::new(),
            message: None,
        };
        let res = host_accept.execute(&app.ctx).await.unwrap();
        assert_eq!(res.event.scheduling_status, SchedulingStatus::Confirmed);
        assert_eq!(res.event.start_ts, Some(900_000));
    }

    #[actix_web::main]
    #[test]
    async fn countering_with_no_times_is_rejected() {
        let app = setup().await;
        let event = proposed_event(&app.host, &app.client, times(&app.host, 1));
        app.ctx.repos.events.insert(&event).await.unwrap();

        let mut usecase = accept(&app, &event);
        usecase.action = NegotiationAction::Counter;
        let err = usecase.execute(&app.ctx).await.unwrap_err();
        assert!(matches!(err, UseCaseError::EmptyCounterTimes));
    }

    #[actix_web::main]
    #[test]
    async fn a_resolved_event_accepts_no_further_responses() {
        let app = setup().await;
        let event = proposed_event(&app.host, &app.client, times(&app.host, 1));
        app.ctx.repos.events.insert(&event).await.unwrap();

        let mut usecase = accept(&app, &event);
        usecase.execute(&app.ctx).await.unwrap();

        let mut again = accept(&app, &event);
        let err = again.execute(&app.ctx).await.unwrap_err();
        assert!(matches!(
            err,
            UseCaseError::NotRespondable(SchedulingStatus::Confirmed)
        ));
    }

    #[actix_web::main]
    #[test]
    async fn confirming_through_the_executor_materializes_reminder_jobs() {
        let app = setup().await;
        let in_48h = app.ctx.sys.get_timestamp_millis() + 48 * 60 * 60 * 1000;
        let mut time = times(&app.host, 1);
        time[0].start_ts = in_48h;
        time[0].end_ts = in_48h + 3_600_000;
        let event = proposed_event(&app.host, &app.client, time);
        app.ctx.repos.events.insert(&event).await.unwrap();

        let usecase = accept(&app, &event);
        let res = execute(usecase, &app.ctx).await.unwrap();
        assert_eq!(res.event.scheduling_status, SchedulingStatus::Confirmed);

        let jobs = app.ctx.repos.reminder_jobs.find_by_event(&event.id).await;
        assert_eq!(jobs.len(), 3);
        for job_type in ReminderJobType::all() {
            let job = app
                .ctx
                .repos
                .reminder_jobs
                .find(&ReminderJob::id_for(&event.id, job_type))
                .await
                .unwrap();
            assert_eq!(job.scheduled_time, in_48h - job_type.offset_millis());
            assert_eq!(job.client_user_id, Some(app.client.id.clone()));
            assert!(!job.executed);
        }

        // The proposer is told their time was accepted
        let sent = app.notifier.sent.lock().unwrap();
        assert_eq!(
            *sent,
            vec![("accepted".to_string(), event.id, app.host.id.clone())]
        );
    }

    #[actix_web::main]
    #[test]
    async fn declining_through_the_executor_notifies_the_proposer() {
        let app = setup().await;
        let event = proposed_event(&app.host, &app.client, times(&app.host, 1));
        app.ctx.repos.events.insert(&event).await.unwrap();

        let mut usecase = accept(&app, &event);
        usecase.action = NegotiationAction::Decline;
        execute(usecase, &app.ctx).await.unwrap();

        let sent = app.notifier.sent.lock().unwrap();
        assert_eq!(
            *sent,
            vec![("declined".to_string(), event.id, app.host.id.clone())]
        );
    }

    #[actix_web::main]
    #[test]
    async fn countering_notifies_the_original_proposer_not_another_attendee() {
        let app = setup().await;
        let bystander = User::new();
        app.ctx.repos.users.insert(&bystander).await.unwrap();
        let mut event = proposed_event(&app.host, &app.client, times(&app.host, 1));
        // Group event where the bystander sorts before the host
        event.event_type = EventType::Group;
        event.attendee_ids = vec![
            bystander.id.clone(),
            app.host.id.clone(),
            app.client.id.clone(),
        ];
        app.ctx.repos.events.insert(&event).await.unwrap();

        let mut usecase = accept(&app, &event);
        usecase.action = NegotiationAction::Counter;
        usecase.counter_times = vec![TimeSlot {
            start_ts: 900_000,
            end_ts: 903_600_000,
        }];
        execute(usecase, &app.ctx).await.unwrap();

        let sent = app.notifier.sent.lock().unwrap();
        assert_eq!(
            *sent,
            vec![(
                "counter_proposed".to_string(),
                event.id,
                app.host.id.clone()
            )]
        );
    }

    #[actix_web::main]
    #[test]
    async fn confirming_without_calendar_config_leaves_the_event_unsynced() {
        let app = setup().await;
        let in_48h = app.ctx.sys.get_timestamp_millis() + 48 * 60 * 60 * 1000;
        let mut time = times(&app.host, 1);
        time[0].start_ts = in_48h;
        time[0].end_ts = in_48h + 3_600_000;
        let event = proposed_event(&app.host, &app.client, time);
        app.ctx.repos.events.insert(&event).await.unwrap();

        let usecase = accept(&app, &event);
        execute(usecase, &app.ctx).await.unwrap();

        let stored = app.ctx.repos.events.find(&event.id).await.unwrap();
        assert!(!stored.synced_to_calendar);
        assert!(stored.external_event_id.is_none());
    }
}
