use crate::domain::models::tour::DepartureTime;
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct CreateTenantRequest {
    pub name: String,
    pub slug: String,
    pub contact_email: Option<String>,
    pub logo_url: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateTenantRequest {
    pub name: Option<String>,
    pub contact_email: Option<String>,
    pub logo_url: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateTourRequest {
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub timezone: String,
    pub base_price: String,
    pub duration_min: i32,
    pub max_participants: i32,
    pub available_weekdays: Vec<u8>,
    pub departure_times: Vec<DepartureTime>,
    pub active: Option<bool>,
    pub image_url: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateTourRequest {
    pub slug: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub timezone: Option<String>,
    pub base_price: Option<String>,
    pub duration_min: Option<i32>,
    pub max_participants: Option<i32>,
    pub available_weekdays: Option<Vec<u8>>,
    pub departure_times: Option<Vec<DepartureTime>>,
    pub active: Option<bool>,
    pub image_url: Option<String>,
}

#[derive(Deserialize)]
pub struct CreatePricingTierRequest {
    pub name: String,
    pub label: Option<String>,
    pub price: Option<String>,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
    pub min_quantity: Option<i32>,
    pub max_quantity: Option<i32>,
    pub counts_toward_capacity: Option<bool>,
    pub is_default: Option<bool>,
    pub active: Option<bool>,
}

#[derive(Deserialize)]
pub struct UpdatePricingTierRequest {
    pub name: Option<String>,
    pub label: Option<String>,
    pub price: Option<String>,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
    pub min_quantity: Option<i32>,
    pub max_quantity: Option<i32>,
    pub counts_toward_capacity: Option<bool>,
    pub is_default: Option<bool>,
    pub active: Option<bool>,
}

#[derive(Deserialize)]
pub struct CreateVariantRequest {
    pub name: String,
    pub description: Option<String>,
    pub modifier_kind: String,
    pub modifier_value: String,
    pub duration_min: Option<i32>,
    pub max_participants: Option<i32>,
    pub available_weekdays: Option<Vec<u8>>,
    pub active: Option<bool>,
}

#[derive(Deserialize)]
pub struct UpdateVariantRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub modifier_kind: Option<String>,
    pub modifier_value: Option<String>,
    pub duration_min: Option<i32>,
    pub max_participants: Option<i32>,
    pub available_weekdays: Option<Vec<u8>>,
    pub active: Option<bool>,
}

#[derive(Deserialize)]
pub struct CreateScheduleRequest {
    pub date: NaiveDate,
    pub time: String,
    pub max_participants: Option<i32>,
}

#[derive(Deserialize)]
pub struct UpdateScheduleRequest {
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub max_participants: Option<i32>,
}

#[derive(Deserialize)]
pub struct GenerateSchedulesRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Deserialize)]
pub struct CreateBlackoutRequest {
    pub date: NaiveDate,
    pub reason: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateCustomerRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateCustomerRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub customer_id: String,
    pub tour_id: String,
    pub variant_id: Option<String>,
    pub booking_date: String,
    pub booking_time: String,
    pub adult_count: i32,
    pub child_count: Option<i32>,
    pub infant_count: Option<i32>,
    pub discount: Option<String>,
    pub tax: Option<String>,
    pub special_requests: Option<String>,
    pub source: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateBookingRequest {
    pub variant_id: Option<String>,
    pub booking_date: Option<String>,
    pub booking_time: Option<String>,
    pub adult_count: Option<i32>,
    pub child_count: Option<i32>,
    pub infant_count: Option<i32>,
    pub discount: Option<String>,
    pub tax: Option<String>,
    pub special_requests: Option<String>,
    pub source: Option<String>,
}

#[derive(Deserialize)]
pub struct QuoteRequest {
    pub tour_id: String,
    pub variant_id: Option<String>,
    #[serde(default)]
    pub adult_count: i32,
    #[serde(default)]
    pub child_count: i32,
    #[serde(default)]
    pub infant_count: i32,
    pub discount: Option<String>,
    pub tax: Option<String>,
}

#[derive(Deserialize)]
pub struct CreatePaymentRequest {
    pub amount: String,
    pub method: String,
    pub reference: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateSettingsRequest {
    pub payment_methods: Option<Vec<String>>,
    pub allow_online_payment: Option<bool>,
    pub allow_partial_payment: Option<bool>,
    pub payment_link_expiry_hours: Option<i32>,
    pub payment_reminder_hours: Option<i32>,
    pub refund_deadline_hours: Option<i32>,
    pub auto_refund: Option<bool>,
    pub tax_enabled: Option<bool>,
    pub tax_name: Option<String>,
    pub tax_rate: Option<String>,
    pub prices_include_tax: Option<bool>,
    pub deposit_enabled: Option<bool>,
    pub deposit_type: Option<String>,
    pub deposit_amount: Option<String>,
    pub deposit_due_days: Option<i32>,
}

#[derive(Deserialize)]
pub struct TaxPreviewRequest {
    pub price: String,
    pub tax_rate: Option<String>,
    pub prices_include_tax: Option<bool>,
}
