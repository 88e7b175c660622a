use crate::shared::entity::{Entity, ID};

/// Per-organization scheduling configuration, owned by the organization
/// settings flow. Read-only for the negotiation engine.
#[derive(Debug, Clone, PartialEq)]
pub struct CoachAvailabilitySettings {
    pub organization_id: ID,
    /// Whether confirmed events should be pushed to the coach's external
    /// calendar.
    pub push_events_to_calendar: bool,
    pub calendar_grant_id: Option<String>,
    pub default_duration_minutes: Option<i64>,
}

impl Entity<ID> for CoachAvailabilitySettings {
    fn id(&self) -> ID {
        self.organization_id.clone()
    }
}
