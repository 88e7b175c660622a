mod calendar;
mod notifier;

pub use calendar::{
    CalendarEventAttributes, CalendarEventParticipant, ExternalCalendarEvent,
    ExternalCalendarProvider, ICalendarProvider, InMemoryCalendarProvider,
};
pub use notifier::{INotificationDispatcher, InMemoryNotifier, WebhookNotifier};
