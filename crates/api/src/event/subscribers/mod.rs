use crate::event::materialize_reminders::MaterializeRemindersUseCase;
use crate::event::respond_to_event::{RespondToEventUseCase, UseCaseRes};
use crate::event::sync_client_record::SyncClientRecordUseCase;
use crate::event::sync_external_calendar::SyncExternalCalendarUseCase;
use crate::shared::usecase::{execute, Subscriber};
use parley_domain::{EventType, NegotiationAction, SchedulingStatus};
use parley_infra::ParleyContext;

/// Materializes the reminder jobs once a negotiation ends in a
/// confirmed call.
pub struct CreateRemindersOnEventConfirmed {}

#[async_trait::async_trait(?Send)]
impl Subscriber<RespondToEventUseCase> for CreateRemindersOnEventConfirmed {
    async fn notify(&self, res: &UseCaseRes, ctx: &ParleyContext) {
        if res.event.scheduling_status != SchedulingStatus::Confirmed {
            return;
        }
        let usecase = MaterializeRemindersUseCase {
            event: res.event.clone(),
        };
        // Sideeffect, ignore result
        let _ = execute(usecase, ctx).await;
    }
}

pub struct SyncExternalCalendarOnEventConfirmed {}

#[async_trait::async_trait(?Send)]
impl Subscriber<RespondToEventUseCase> for SyncExternalCalendarOnEventConfirmed {
    async fn notify(&self, res: &UseCaseRes, ctx: &ParleyContext) {
        if res.event.scheduling_status != SchedulingStatus::Confirmed
            || res.event.organization_id.is_none()
        {
            return;
        }
        let usecase = SyncExternalCalendarUseCase {
            event: res.event.clone(),
        };
        // Sideeffect, ignore result
        let _ = execute(usecase, ctx).await;
    }
}

pub struct SyncClientRecordOnEventConfirmed {}

#[async_trait::async_trait(?Send)]
impl Subscriber<RespondToEventUseCase> for SyncClientRecordOnEventConfirmed {
    async fn notify(&self, res: &UseCaseRes, ctx: &ParleyContext) {
        if res.event.scheduling_status != SchedulingStatus::Confirmed
            || res.event.event_type != EventType::Coaching1on1
            || res.event.organization_id.is_none()
        {
            return;
        }
        let usecase = SyncClientRecordUseCase {
            event: res.event.clone(),
        };
        // Sideeffect, ignore result
        let _ = execute(usecase, ctx).await;
    }
}

/// Tells the other side of the negotiation what just happened.
pub struct NotifyCounterpartyOnResponse {}

#[async_trait::async_trait(?Send)]
impl Subscriber<RespondToEventUseCase> for NotifyCounterpartyOnResponse {
    async fn notify(&self, res: &UseCaseRes, ctx: &ParleyContext) {
        match res.action {
            NegotiationAction::Accept => {
                ctx.notifier
                    .notify_accepted(&res.event, &res.responder_id, &res.counterparty_id)
                    .await
            }
            NegotiationAction::Decline => {
                ctx.notifier
                    .notify_declined(&res.event, &res.responder_id, &res.counterparty_id)
                    .await
            }
            NegotiationAction::Counter => {
                ctx.notifier
                    .notify_counter_proposed(&res.event, &res.responder_id, &res.counterparty_id)
                    .await
            }
        }
    }
}
