use crate::domain::models::payment::Payment;
use crate::domain::services::availability::DayAvailability;
use serde::Serialize;

#[derive(Serialize)]
pub struct MonthAvailabilityResponse {
    pub year: i32,
    pub month: u32,
    pub days: Vec<DayAvailability>,
}

#[derive(Serialize)]
pub struct UnitPriceBreakdown {
    pub adult: String,
    pub child: String,
    pub infant: String,
}

#[derive(Serialize)]
pub struct DepositLine {
    pub deposit: String,
    pub balance: String,
    pub due_days: i32,
}

#[derive(Serialize)]
pub struct QuoteResponse {
    pub unit_prices: UnitPriceBreakdown,
    pub subtotal: String,
    pub discount: String,
    pub tax: String,
    pub tax_name: Option<String>,
    pub total: String,
    pub deposit: Option<DepositLine>,
}

#[derive(Serialize)]
pub struct PaymentListResponse {
    pub payments: Vec<Payment>,
    pub paid: String,
    pub balance: String,
}

#[derive(Serialize)]
pub struct SchedulesGeneratedResponse {
    pub created: i64,
}

#[derive(Serialize)]
pub struct TaxPreviewResponse {
    pub subtotal: String,
    pub tax: String,
    pub total: String,
}
