use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::error;

/// Attributes for an event to be created on the external calendar.
/// Times are integer epoch seconds, which is what the external API
/// expects.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventAttributes {
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub start_time: i64,
    pub end_time: i64,
    pub participants: Vec<CalendarEventParticipant>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventParticipant {
    pub email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalCalendarEvent {
    pub id: String,
    #[serde(default)]
    pub conference_url: Option<String>,
}

pub struct CalendarRestApi {
    client: Client,
    base_url: String,
    api_secret: String,
}

impl CalendarRestApi {
    pub fn new(base_url: String, api_secret: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            api_secret,
        }
    }

    pub async fn create_event(
        &self,
        grant_id: &str,
        calendar_id: &str,
        body: &CalendarEventAttributes,
    ) -> Result<ExternalCalendarEvent, ()> {
        let url = format!(
            "{}/grants/{}/calendars/{}/events",
            self.base_url, grant_id, calendar_id
        );
        match self
            .client
            .post(&url)
            .bearer_auth(&self.api_secret)
            .json(body)
            .send()
            .await
        {
            Ok(res) => res.json().await.map_err(|e| {
                error!(
                    "External calendar create event response malformed: {:?}",
                    e
                );
            }),
            Err(e) => {
                error!("External calendar create event request failed: {:?}", e);
                Err(())
            }
        }
    }
}
