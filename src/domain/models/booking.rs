use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use rand::{distributions::Alphanumeric, Rng};

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Booking {
    pub id: String,
    pub tenant_id: String,
    pub tour_id: String,
    pub customer_id: String,
    pub variant_id: Option<String>,
    pub reference: String,
    pub booking_date: NaiveDate,
    pub booking_time: String,
    pub adult_count: i32,
    pub child_count: i32,
    pub infant_count: i32,
    pub subtotal: String,
    pub discount: String,
    pub tax: String,
    pub total: String,
    pub special_requests: Option<String>,
    pub source: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

pub struct NewBookingParams {
    pub tenant_id: String,
    pub tour_id: String,
    pub customer_id: String,
    pub variant_id: Option<String>,
    pub booking_date: NaiveDate,
    pub booking_time: String,
    pub adult_count: i32,
    pub child_count: i32,
    pub infant_count: i32,
    pub subtotal: String,
    pub discount: String,
    pub tax: String,
    pub total: String,
    pub special_requests: Option<String>,
    pub source: String,
}

impl Booking {
    pub fn new(params: NewBookingParams) -> Self {
        let code: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(8)
            .map(|c| (c as char).to_ascii_uppercase())
            .collect();

        Self {
            id: Uuid::new_v4().to_string(),
            tenant_id: params.tenant_id,
            tour_id: params.tour_id,
            customer_id: params.customer_id,
            variant_id: params.variant_id,
            reference: format!("BK-{}", code),
            booking_date: params.booking_date,
            booking_time: params.booking_time,
            adult_count: params.adult_count,
            child_count: params.child_count,
            infant_count: params.infant_count,
            subtotal: params.subtotal,
            discount: params.discount,
            tax: params.tax,
            total: params.total,
            special_requests: params.special_requests,
            source: params.source,
            status: "confirmed".to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn party_size(&self) -> i32 {
        self.adult_count + self.child_count + self.infant_count
    }
}

/// Seat movement against a schedule slot, applied inside the booking
/// repository transaction.
#[derive(Debug, Clone)]
pub struct SlotSeats {
    pub tour_id: String,
    pub date: NaiveDate,
    pub time: String,
    pub seats: i32,
}
