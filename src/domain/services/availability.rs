use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use crate::domain::models::blackout::BlackoutDate;
use crate::domain::models::pricing_tier::PricingTier;
use crate::domain::models::schedule::Schedule;
use crate::domain::models::tour::{DepartureTime, Tour};
use crate::domain::services::pricing::ParticipantCounts;

pub const ALMOST_FULL_THRESHOLD: i32 = 5;

#[derive(Debug, Serialize, Clone)]
pub struct SlotAvailability {
    pub time: String,
    pub label: String,
    pub max_capacity: i32,
    pub spots_remaining: i32,
    pub available: bool,
    pub almost_full: bool,
}

#[derive(Debug, Serialize, Clone)]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub is_blacked_out: bool,
    pub selectable: bool,
    pub slots: Vec<SlotAvailability>,
}

/// Month grid of bookable days for a tour. Pure over its inputs: the
/// caller supplies the month's schedule rows, the blackout dates and
/// "now" already shifted into the tour's timezone.
pub fn calculate_month(
    year: i32,
    month: u32,
    schedules: &[Schedule],
    blackouts: &[BlackoutDate],
    departure_times: &[DepartureTime],
    now_local: NaiveDateTime,
) -> Vec<DayAvailability> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };

    let today = now_local.date();
    let mut days = Vec::new();
    let mut date = first;

    while date.month() == month {
        let is_blacked_out = blackouts.iter().any(|b| b.date == date);

        let mut day_schedules: Vec<&Schedule> = schedules.iter().filter(|s| s.date == date).collect();
        day_schedules.sort_by(|a, b| a.time.cmp(&b.time));

        let slots: Vec<SlotAvailability> = day_schedules.iter()
            .map(|s| build_slot(s, date, today, now_local.time(), is_blacked_out, departure_times))
            .collect();

        let selectable = !is_blacked_out && slots.iter().any(|s| s.available);

        days.push(DayAvailability {
            date,
            is_blacked_out,
            selectable,
            slots,
        });

        date += Duration::days(1);
    }

    days
}

fn build_slot(
    schedule: &Schedule,
    date: NaiveDate,
    today: NaiveDate,
    now_time: NaiveTime,
    is_blacked_out: bool,
    departure_times: &[DepartureTime],
) -> SlotAvailability {
    let spots_remaining = schedule.spots_remaining();

    let departed = date < today
        || (date == today
            && NaiveTime::parse_from_str(&schedule.time, "%H:%M")
                .map(|t| t <= now_time)
                .unwrap_or(false));

    let label = departure_times.iter()
        .find(|dt| dt.time == schedule.time)
        .and_then(|dt| dt.label.clone())
        .unwrap_or_else(|| schedule.time.clone());

    SlotAvailability {
        time: schedule.time.clone(),
        label,
        max_capacity: schedule.max_participants,
        spots_remaining,
        available: !is_blacked_out && !departed && spots_remaining > 0,
        almost_full: spots_remaining <= ALMOST_FULL_THRESHOLD,
    }
}

/// Seats a party occupies on a schedule. Categories follow their tier's
/// counts_toward_capacity flag; without a tier, adults and children count
/// and infants do not.
pub fn seats_required(counts: &ParticipantCounts, tiers: &[PricingTier]) -> i32 {
    let counted = |name: &str, default: bool| -> bool {
        tiers.iter()
            .find(|t| t.active && t.name.eq_ignore_ascii_case(name))
            .map(|t| t.counts_toward_capacity)
            .unwrap_or(default)
    };

    let mut seats = 0;
    if counted("adult", true) {
        seats += counts.adults;
    }
    if counted("child", true) {
        seats += counts.children;
    }
    if counted("infant", false) {
        seats += counts.infants;
    }
    seats
}

/// (date, time) pairs a schedule generation run should materialize:
/// every configured departure time on every available weekday in the
/// range, skipping blacked-out dates. Existing rows are skipped by the
/// repository's insert.
pub fn generate_slots(tour: &Tour, start: NaiveDate, end: NaiveDate, blackouts: &[BlackoutDate]) -> Vec<(NaiveDate, String)> {
    let weekdays: Vec<u8> = serde_json::from_str(&tour.available_weekdays).unwrap_or_default();
    let departures: Vec<DepartureTime> = serde_json::from_str(&tour.departure_times).unwrap_or_default();

    let mut slots = Vec::new();
    let mut date = start;

    while date <= end {
        let weekday = date.weekday().num_days_from_monday() as u8;
        if weekdays.contains(&weekday) && !blackouts.iter().any(|b| b.date == date) {
            for dt in &departures {
                slots.push((date, dt.time.clone()));
            }
        }
        date += Duration::days(1);
    }

    slots
}

/// UTC instant a departure happens, resolved through the tour's timezone.
/// None for unparseable times or local times skipped by a DST jump.
pub fn departure_instant(date: NaiveDate, time: &str, timezone: &str) -> Option<DateTime<Utc>> {
    let tz: Tz = timezone.parse().unwrap_or(chrono_tz::UTC);
    let naive_time = NaiveTime::parse_from_str(time, "%H:%M").ok()?;

    tz.from_local_datetime(&date.and_time(naive_time))
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}
