use crate::dtos::SchedulableEventDTO;
use parley_domain::{NegotiationAction, SchedulableEvent, TimeSlot, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulableEventResponse {
    pub event: SchedulableEventDTO,
}

impl SchedulableEventResponse {
    pub fn new(event: SchedulableEvent) -> Self {
        Self {
            event: SchedulableEventDTO::new(event),
        }
    }
}

pub mod respond_to_event {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub action: NegotiationAction,
        pub selected_time_id: Option<String>,
        pub counter_times: Option<Vec<TimeSlot>>,
        pub message: Option<String>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub event: SchedulableEventDTO,
        pub message: String,
    }

    impl APIResponse {
        pub fn new(event: SchedulableEvent, action: NegotiationAction) -> Self {
            let message = match action {
                NegotiationAction::Accept => "Call confirmed!",
                NegotiationAction::Decline => "Call declined",
                NegotiationAction::Counter => "Counter-proposal sent",
            };
            Self {
                event: SchedulableEventDTO::new(event),
                message: message.into(),
            }
        }
    }
}

pub mod get_event {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    pub type APIResponse = SchedulableEventResponse;
}
