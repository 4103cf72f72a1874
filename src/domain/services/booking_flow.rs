use chrono::NaiveDate;
use rust_decimal::Decimal;
use crate::domain::services::pricing::{parse_amount, ParticipantCounts};
use crate::error::AppError;

/// Step-by-step slot selection for a booking in progress. Later steps
/// depend on earlier ones, so changing a tour drops the chosen date and
/// time and changing a date drops the time.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BookingDraft {
    tour_id: Option<String>,
    date: Option<NaiveDate>,
    time: Option<String>,
}

impl BookingDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_tour(&mut self, tour_id: &str) {
        if self.tour_id.as_deref() != Some(tour_id) {
            self.date = None;
            self.time = None;
        }
        self.tour_id = Some(tour_id.to_string());
    }

    pub fn select_date(&mut self, date: NaiveDate) -> Result<(), AppError> {
        if self.tour_id.is_none() {
            return Err(AppError::Validation("Select a tour before a date".to_string()));
        }
        if self.date != Some(date) {
            self.time = None;
        }
        self.date = Some(date);
        Ok(())
    }

    pub fn select_time(&mut self, time: &str) -> Result<(), AppError> {
        if self.date.is_none() {
            return Err(AppError::Validation("Select a date before a time".to_string()));
        }
        self.time = Some(time.to_string());
        Ok(())
    }

    pub fn tour_id(&self) -> Option<&str> {
        self.tour_id.as_deref()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// The fully chosen slot, once tour, date and time are all set.
    pub fn slot(&self) -> Option<(&str, NaiveDate, &str)> {
        match (&self.tour_id, self.date, &self.time) {
            (Some(tour), Some(date), Some(time)) => Some((tour, date, time)),
            _ => None,
        }
    }

    /// Runs the submission checks against the chosen slot and returns the
    /// validated payload. Handlers apply the same checks to stateless
    /// requests via `validate_counts`, `parse_adjustment` and
    /// `ensure_capacity`.
    pub fn payload(
        &self,
        customer_id: &str,
        counts: &ParticipantCounts,
        discount: &str,
        tax: &str,
        seats: i32,
        spots_remaining: i32,
    ) -> Result<DraftPayload, AppError> {
        let Some((tour_id, date, time)) = self.slot() else {
            return Err(AppError::Validation("Pick a tour, date and time first".to_string()));
        };
        if customer_id.trim().is_empty() {
            return Err(AppError::Validation("Customer is required".to_string()));
        }
        validate_counts(counts)?;
        let discount = parse_adjustment("discount", discount)?;
        let tax = parse_adjustment("tax", tax)?;
        ensure_capacity(seats, spots_remaining)?;

        Ok(DraftPayload {
            tour_id: tour_id.to_string(),
            date,
            time: time.to_string(),
            customer_id: customer_id.to_string(),
            counts: *counts,
            discount,
            tax,
        })
    }
}

/// Everything a validated draft submission carries into the booking
/// transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftPayload {
    pub tour_id: String,
    pub date: NaiveDate,
    pub time: String,
    pub customer_id: String,
    pub counts: ParticipantCounts,
    pub discount: Decimal,
    pub tax: Decimal,
}

/// Party composition rules for a submitted booking: at least one adult,
/// no negative counts anywhere.
pub fn validate_counts(counts: &ParticipantCounts) -> Result<(), AppError> {
    if counts.adults < 1 {
        return Err(AppError::Validation("At least one adult is required".to_string()));
    }
    if counts.children < 0 || counts.infants < 0 {
        return Err(AppError::Validation("Participant counts cannot be negative".to_string()));
    }
    Ok(())
}

/// Strict monetary parse for submitted adjustments. Quotes tolerate
/// anything and fall back to zero, a submission does not: blank still
/// means zero, but garbage or negative amounts are rejected with the
/// offending field named.
pub fn parse_adjustment(field: &str, raw: &str) -> Result<Decimal, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }
    let value = parse_amount(trimmed)
        .ok_or_else(|| AppError::Validation(format!("Invalid {field} amount: {raw}")))?;
    if value < Decimal::ZERO {
        return Err(AppError::Validation(format!("The {field} amount cannot be negative")));
    }
    Ok(value)
}

/// Capacity gate shared by the draft machine and the booking handler.
pub fn ensure_capacity(seats: i32, spots_remaining: i32) -> Result<(), AppError> {
    if seats > spots_remaining {
        return Err(AppError::Conflict(format!(
            "Not enough spots remaining: requested {seats}, available {spots_remaining}"
        )));
    }
    Ok(())
}
