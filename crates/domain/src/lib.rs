mod availability;
mod calendar_grant;
mod coaching_record;
mod event;
mod reminder;
mod shared;
mod user;

pub use availability::CoachAvailabilitySettings;
pub use calendar_grant::{CalendarGrant, CalendarGrantStatus};
pub use coaching_record::{ClientCoachingRecord, NextCall};
pub use event::{
    EventStatus, EventType, NegotiationAction, ProposedTime, ProposedTimeStatus, SchedulableEvent,
    SchedulingStatus, TimeSlot,
};
pub use reminder::{ReminderJob, ReminderJobType};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use user::User;
