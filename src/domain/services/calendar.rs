use chrono::{DateTime, Utc};
use icalendar::{Calendar, Component, Event as IcalEvent, EventLike};
use crate::domain::models::{booking::Booking, tour::Tour};

/// Generates an iCalendar (.ics) string for a specific booking
pub fn generate_ics(tour: &Tour, booking: &Booking, start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    let mut calendar = Calendar::new();

    let ical_event = IcalEvent::new()
        .summary(&tour.name)
        .description(&tour.description)
        .location(&tour.location)
        .starts(start)
        .ends(end)
        .uid(&booking.id)
        .done();

    calendar.push(ical_event);
    calendar.to_string()
}
