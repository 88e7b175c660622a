use crate::shared::entity::{Entity, ID};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Where the negotiation over a `SchedulableEvent` currently stands.
///
/// `Proposed` and `CounterProposed` are the only states that accept a
/// response. `Confirmed` and `Declined` are terminal: a new negotiation
/// round is a new event, not a reopening of this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulingStatus {
    None,
    Proposed,
    CounterProposed,
    Confirmed,
    Declined,
}

impl SchedulingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Proposed => "proposed",
            Self::CounterProposed => "counter_proposed",
            Self::Confirmed => "confirmed",
            Self::Declined => "declined",
        }
    }
}

impl Display for SchedulingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SchedulingStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "proposed" => Ok(Self::Proposed),
            "counter_proposed" => Ok(Self::CounterProposed),
            "confirmed" => Ok(Self::Confirmed),
            "declined" => Ok(Self::Declined),
            _ => Err(anyhow::Error::msg(format!(
                "Invalid scheduling status: {}",
                s
            ))),
        }
    }
}

/// Lifecycle flag consumed by downstream views, independent of the
/// negotiation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Draft,
    Confirmed,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Confirmed => "confirmed",
        }
    }
}

impl FromStr for EventStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "confirmed" => Ok(Self::Confirmed),
            _ => Err(anyhow::Error::msg(format!("Invalid event status: {}", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    #[serde(rename = "coaching_1on1")]
    Coaching1on1,
    Group,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Coaching1on1 => "coaching_1on1",
            Self::Group => "group",
        }
    }
}

impl FromStr for EventType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "coaching_1on1" => Ok(Self::Coaching1on1),
            "group" => Ok(Self::Group),
            _ => Err(anyhow::Error::msg(format!("Invalid event type: {}", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposedTimeStatus {
    Pending,
    Accepted,
    Declined,
}

/// A time slot offered by one party during negotiation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposedTime {
    pub id: String,
    pub start_ts: i64,
    pub end_ts: i64,
    pub proposed_by: ID,
    pub proposed_at: i64,
    pub status: ProposedTimeStatus,
}

/// A bare start/end pair, as submitted in a counter-proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub start_ts: i64,
    pub end_ts: i64,
}

/// The three responses a counterparty can give to a pending proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NegotiationAction {
    Accept,
    Decline,
    Counter,
}

/// A meeting whose time is negotiated between a host and one or more
/// attendees. Created by the scheduling-initiation flow in state
/// `Proposed` and mutated only by the negotiation engine thereafter.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulableEvent {
    pub id: ID,
    pub title: String,
    pub event_type: EventType,
    pub host_user_id: ID,
    /// All participants, host included.
    pub attendee_ids: Vec<ID>,
    /// The party that offered the current round of times. Flips on
    /// every counter-proposal; the other side is the one expected to
    /// respond.
    pub proposed_by: ID,
    pub scheduling_status: SchedulingStatus,
    pub status: EventStatus,
    /// Full negotiation history. Earlier rounds are kept with status
    /// `Declined` rather than discarded.
    pub proposed_times: Vec<ProposedTime>,
    /// Denormalized display times. Only authoritative once
    /// `scheduling_status` is `Confirmed`; after a counter they hold the
    /// first slot of the newest round as a display convenience.
    pub start_ts: Option<i64>,
    pub end_ts: Option<i64>,
    pub confirmed_at: Option<i64>,
    pub organization_id: Option<ID>,
    pub program_id: Option<ID>,
    pub cohort_id: Option<ID>,
    pub timezone: Option<Tz>,
    pub location_label: Option<String>,
    pub meeting_link: Option<String>,
    /// Append-only log of response messages.
    pub scheduling_notes: Vec<String>,
    pub external_event_id: Option<String>,
    pub external_calendar_id: Option<String>,
    pub synced_to_calendar: bool,
    pub created: i64,
    pub updated: i64,
}

impl Entity<ID> for SchedulableEvent {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

impl SchedulableEvent {
    pub fn is_participant(&self, user_id: &ID) -> bool {
        self.attendee_ids.contains(user_id)
    }

    pub fn is_respondable(&self) -> bool {
        matches!(
            self.scheduling_status,
            SchedulingStatus::Proposed | SchedulingStatus::CounterProposed
        )
    }

    pub fn accepted_time(&self) -> Option<&ProposedTime> {
        self.proposed_times
            .iter()
            .find(|t| t.status == ProposedTimeStatus::Accepted)
    }

    /// The single non-host attendee of a 1:1 event.
    pub fn client_attendee(&self) -> Option<&ID> {
        self.attendee_ids.iter().find(|id| **id != self.host_user_id)
    }

    /// Confirms the slot with id `time_id` and resolves the event.
    /// Every other slot is marked declined so that at most one slot is
    /// ever accepted. Returns `false` when no such slot exists.
    pub fn accept_time(&mut self, time_id: &str, now: i64) -> bool {
        if !self.proposed_times.iter().any(|t| t.id == time_id) {
            return false;
        }

        let mut start_ts = 0;
        let mut end_ts = 0;
        for time in self.proposed_times.iter_mut() {
            if time.id == time_id {
                time.status = ProposedTimeStatus::Accepted;
                start_ts = time.start_ts;
                end_ts = time.end_ts;
            } else {
                time.status = ProposedTimeStatus::Declined;
            }
        }

        self.scheduling_status = SchedulingStatus::Confirmed;
        self.status = EventStatus::Confirmed;
        self.start_ts = Some(start_ts);
        self.end_ts = Some(end_ts);
        self.confirmed_at = Some(now);
        true
    }

    pub fn decline_all_times(&mut self) {
        for time in self.proposed_times.iter_mut() {
            time.status = ProposedTimeStatus::Declined;
        }
    }

    /// Opens a new negotiation round: the current round is declined, the
    /// new slots are appended as pending and the proposer role flips to
    /// the responder. The event's display times point at the first new
    /// slot; nothing is confirmed yet.
    pub fn add_counter_times(&mut self, slots: &[TimeSlot], responder_id: &ID, now: i64) {
        self.decline_all_times();

        for (index, slot) in slots.iter().enumerate() {
            self.proposed_times.push(ProposedTime {
                id: format!("counter_{}_{}", now, index),
                start_ts: slot.start_ts,
                end_ts: slot.end_ts,
                proposed_by: responder_id.clone(),
                proposed_at: now,
                status: ProposedTimeStatus::Pending,
            });
        }

        self.scheduling_status = SchedulingStatus::CounterProposed;
        self.proposed_by = responder_id.clone();
        if let Some(first) = slots.first() {
            self.start_ts = Some(first.start_ts);
            self.end_ts = Some(first.end_ts);
        }
    }

    pub fn append_note(&mut self, note: String) {
        self.scheduling_notes.push(note);
    }
}
