use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::CreatePaymentRequest;
use crate::api::dtos::responses::PaymentListResponse;
use crate::api::extractors::tenant::TenantId;
use crate::domain::models::payment::Payment;
use crate::domain::services::pricing::{amount_or_zero, format_amount, parse_amount};
use crate::error::AppError;
use std::sync::Arc;
use rust_decimal::Decimal;
use tracing::info;

pub async fn create_payment(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, booking_id)): Path<(String, String)>,
    Json(payload): Json<CreatePaymentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_repo.find_by_id(&tenant_id, &booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    if booking.status == "cancelled" {
        return Err(AppError::Conflict("Cannot record a payment on a cancelled booking".into()));
    }

    let amount = match parse_amount(&payload.amount) {
        Some(a) if a > Decimal::ZERO => a,
        _ => return Err(AppError::Validation("Payment amount must be a positive number".into())),
    };

    let settings = state.settings_repo.get_or_create(&tenant_id).await?;
    let accepted: Vec<String> = serde_json::from_str(&settings.payment_methods).unwrap_or_default();
    if !accepted.iter().any(|m| m == &payload.method) {
        return Err(AppError::Validation(format!("Unknown payment method: {}", payload.method)));
    }

    let payment = Payment::new(
        tenant_id.clone(),
        booking.id.clone(),
        format_amount(amount),
        payload.method,
        payload.reference,
    );

    let created = state.payment_repo.create(&payment).await?;
    info!("Payment recorded: {} for booking {}", created.id, booking.reference);
    Ok(Json(created))
}

pub async fn list_payments(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, booking_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_repo.find_by_id(&tenant_id, &booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    let payments = state.payment_repo.list_by_booking(&tenant_id, &booking.id).await?;

    let paid: Decimal = payments.iter().map(|p| amount_or_zero(&p.amount)).sum();
    let balance = amount_or_zero(&booking.total) - paid;

    Ok(Json(PaymentListResponse {
        payments,
        paid: format_amount(paid),
        balance: format_amount(balance),
    }))
}
