mod calendar_api;

use crate::config::Config;
use calendar_api::CalendarRestApi;
pub use calendar_api::{CalendarEventAttributes, CalendarEventParticipant, ExternalCalendarEvent};
use parley_domain::CalendarGrant;
use std::sync::Mutex;

/// Push-only view of the external calendar service. Lives on the
/// context like the notifier so use cases never construct clients.
#[async_trait::async_trait]
pub trait ICalendarProvider: Send + Sync {
    /// Deployment-level short circuit: `false` disables calendar sync
    /// everywhere, regardless of organization settings.
    fn is_enabled(&self) -> bool;
    async fn create_event(
        &self,
        grant: &CalendarGrant,
        calendar_id: &str,
        attributes: &CalendarEventAttributes,
    ) -> Result<ExternalCalendarEvent, ()>;
}

/// Talks to the external calendar REST API, when the deployment is
/// configured with one.
pub struct ExternalCalendarProvider {
    api: Option<CalendarRestApi>,
}

impl ExternalCalendarProvider {
    pub fn from_config(config: &Config) -> Self {
        let api = match (&config.calendar_api_base_url, &config.calendar_api_secret) {
            (Some(base_url), Some(secret)) => {
                Some(CalendarRestApi::new(base_url.clone(), secret.clone()))
            }
            _ => None,
        };
        Self { api }
    }
}

#[async_trait::async_trait]
impl ICalendarProvider for ExternalCalendarProvider {
    fn is_enabled(&self) -> bool {
        self.api.is_some()
    }

    async fn create_event(
        &self,
        grant: &CalendarGrant,
        calendar_id: &str,
        attributes: &CalendarEventAttributes,
    ) -> Result<ExternalCalendarEvent, ()> {
        match &self.api {
            Some(api) => api.create_event(&grant.id, calendar_id, attributes).await,
            None => Err(()),
        }
    }
}

/// Records pushed events instead of calling out. Used by the in-memory
/// context; disabled by default, which matches an unconfigured
/// deployment.
pub struct InMemoryCalendarProvider {
    enabled: bool,
    conference_url: Option<String>,
    pub created: Mutex<Vec<CalendarEventAttributes>>,
}

impl InMemoryCalendarProvider {
    pub fn new() -> Self {
        Self {
            enabled: false,
            conference_url: None,
            created: Mutex::new(Vec::new()),
        }
    }

    pub fn enabled(conference_url: Option<String>) -> Self {
        Self {
            enabled: true,
            conference_url,
            created: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ICalendarProvider for InMemoryCalendarProvider {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    async fn create_event(
        &self,
        _grant: &CalendarGrant,
        _calendar_id: &str,
        attributes: &CalendarEventAttributes,
    ) -> Result<ExternalCalendarEvent, ()> {
        let mut created = self.created.lock().unwrap();
        created.push(attributes.clone());
        Ok(ExternalCalendarEvent {
            id: format!("external_{}", created.len()),
            conference_url: self.conference_url.clone(),
        })
    }
}
