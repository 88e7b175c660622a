use crate::shared::entity::{Entity, ID};
use chrono_tz::Tz;
use std::fmt::Display;
use std::str::FromStr;

/// The fixed set of one-shot notifications derived from a confirmed
/// event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderJobType {
    Notification24h,
    Notification1h,
    Email24h,
}

impl ReminderJobType {
    pub fn all() -> [ReminderJobType; 3] {
        [
            Self::Notification24h,
            Self::Notification1h,
            Self::Email24h,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Notification24h => "notification_24h",
            Self::Notification1h => "notification_1h",
            Self::Email24h => "email_24h",
        }
    }

    /// How long before the event start the job should fire.
    pub fn offset_millis(&self) -> i64 {
        match self {
            Self::Notification24h | Self::Email24h => 24 * 60 * 60 * 1000,
            Self::Notification1h => 60 * 60 * 1000,
        }
    }
}

impl Display for ReminderJobType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReminderJobType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "notification_24h" => Ok(Self::Notification24h),
            "notification_1h" => Ok(Self::Notification1h),
            "email_24h" => Ok(Self::Email24h),
            _ => Err(anyhow::Error::msg(format!(
                "Invalid reminder job type: {}",
                s
            ))),
        }
    }
}

/// A scheduled one-shot notification for a confirmed event.
///
/// The id is deterministic (`"{event_id}_{job_type}"`) so that
/// re-materializing jobs for the same event overwrites identical content
/// instead of duplicating jobs. The event fields needed for delivery are
/// denormalized so the dispatch worker never has to re-fetch the event.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderJob {
    pub id: String,
    pub event_id: ID,
    pub job_type: ReminderJobType,
    pub scheduled_time: i64,
    pub event_title: String,
    pub event_start_ts: i64,
    pub event_timezone: Option<Tz>,
    pub event_location: Option<String>,
    pub host_user_id: ID,
    pub host_name: Option<String>,
    pub client_user_id: Option<ID>,
    pub organization_id: Option<ID>,
    /// Flipped by the external dispatch worker once delivered.
    pub executed: bool,
}

impl ReminderJob {
    pub fn id_for(event_id: &ID, job_type: ReminderJobType) -> String {
        format!("{}_{}", event_id, job_type)
    }
}

impl Entity<String> for ReminderJob {
    fn id(&self) -> String {
        self.id.clone()
    }
}
