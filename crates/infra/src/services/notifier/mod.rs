use parley_domain::{SchedulableEvent, ID};
use reqwest::Client;
use serde::Serialize;
use std::sync::Mutex;
use tracing::{debug, warn};

/// Best-effort delivery of a human-readable response notification to
/// the counterparty. Failures are logged, never surfaced.
///
/// The counterparty is resolved by the caller: it is the party that
/// proposed the round being answered, which the event itself no longer
/// knows once a counter has flipped the proposer role.
#[async_trait::async_trait]
pub trait INotificationDispatcher: Send + Sync {
    async fn notify_accepted(
        &self,
        event: &SchedulableEvent,
        responder_id: &ID,
        counterparty_id: &ID,
    );
    async fn notify_declined(
        &self,
        event: &SchedulableEvent,
        responder_id: &ID,
        counterparty_id: &ID,
    );
    async fn notify_counter_proposed(
        &self,
        event: &SchedulableEvent,
        responder_id: &ID,
        counterparty_id: &ID,
    );
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NotificationPayload {
    kind: &'static str,
    event_id: ID,
    event_title: String,
    responder_id: ID,
    counterparty_id: ID,
}

impl NotificationPayload {
    fn new(
        kind: &'static str,
        event: &SchedulableEvent,
        responder_id: &ID,
        counterparty_id: &ID,
    ) -> Self {
        Self {
            kind,
            event_id: event.id.clone(),
            event_title: event.title.clone(),
            responder_id: responder_id.clone(),
            counterparty_id: counterparty_id.clone(),
        }
    }
}

/// Posts notifications to the webhook the deployment is configured
/// with.
pub struct WebhookNotifier {
    client: Client,
    url: Option<String>,
}

impl WebhookNotifier {
    pub fn new(url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }

    async fn deliver(&self, payload: NotificationPayload) {
        let url = match &self.url {
            Some(url) => url,
            None => {
                debug!(
                    "No notifier webhook configured, dropping {} notification for event: {}",
                    payload.kind, payload.event_id
                );
                return;
            }
        };
        if let Err(e) = self.client.post(url).json(&payload).send().await {
            warn!(
                "Unable to deliver {} notification for event: {}. Error: {:?}",
                payload.kind, payload.event_id, e
            );
        }
    }
}

#[async_trait::async_trait]
impl INotificationDispatcher for WebhookNotifier {
    async fn notify_accepted(
        &self,
        event: &SchedulableEvent,
        responder_id: &ID,
        counterparty_id: &ID,
    ) {
        self.deliver(NotificationPayload::new(
            "accepted",
            event,
            responder_id,
            counterparty_id,
        ))
        .await;
    }

    async fn notify_declined(
        &self,
        event: &SchedulableEvent,
        responder_id: &ID,
        counterparty_id: &ID,
    ) {
        self.deliver(NotificationPayload::new(
            "declined",
            event,
            responder_id,
            counterparty_id,
        ))
        .await;
    }

    async fn notify_counter_proposed(
        &self,
        event: &SchedulableEvent,
        responder_id: &ID,
        counterparty_id: &ID,
    ) {
        self.deliver(NotificationPayload::new(
            "counter_proposed",
            event,
            responder_id,
            counterparty_id,
        ))
        .await;
    }
}

/// Captures notifications instead of sending them. Used by the
/// in-memory context. Each entry is (kind, event id, counterparty id).
pub struct InMemoryNotifier {
    pub sent: Mutex<Vec<(String, ID, ID)>>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
        }
    }

    fn record(&self, kind: &str, event: &SchedulableEvent, counterparty_id: &ID) {
        self.sent
            .lock()
            .unwrap()
            .push((kind.to_string(), event.id.clone(), counterparty_id.clone()));
    }
}

#[async_trait::async_trait]
impl INotificationDispatcher for InMemoryNotifier {
    async fn notify_accepted(
        &self,
        event: &SchedulableEvent,
        _responder_id: &ID,
        counterparty_id: &ID,
    ) {
        self.record("accepted", event, counterparty_id);
    }

    async fn notify_declined(
        &self,
        event: &SchedulableEvent,
        _responder_id: &ID,
        counterparty_id: &ID,
    ) {
        self.record("declined", event, counterparty_id);
    }

    async fn notify_counter_proposed(
        &self,
        event: &SchedulableEvent,
        _responder_id: &ID,
        counterparty_id: &ID,
    ) {
        self.record("counter_proposed", event, counterparty_id);
    }
}
