use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{TaxPreviewRequest, UpdateSettingsRequest};
use crate::api::dtos::responses::TaxPreviewResponse;
use crate::api::extractors::tenant::TenantId;
use crate::domain::services::pricing::{amount_or_zero, format_amount, parse_amount};
use crate::domain::services::tax::apply_tax;
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;

fn validate_rate(raw: &str, field: &str) -> Result<(), AppError> {
    match parse_amount(raw) {
        Some(r) if r >= Decimal::ZERO => Ok(()),
        _ => Err(AppError::Validation(format!("Invalid {field}"))),
    }
}

pub async fn get_settings(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
) -> Result<impl IntoResponse, AppError> {
    let settings = state.settings_repo.get_or_create(&tenant_id).await?;
    Ok(Json(settings))
}

pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Json(payload): Json<UpdateSettingsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut settings = state.settings_repo.get_or_create(&tenant_id).await?;

    if let Some(methods) = payload.payment_methods {
        if methods.is_empty() {
            return Err(AppError::Validation("At least one payment method is required".into()));
        }
        settings.payment_methods = serde_json::to_string(&methods)
            .map_err(|_| AppError::Validation("Invalid payment_methods".into()))?;
    }
    if let Some(val) = payload.allow_online_payment { settings.allow_online_payment = val; }
    if let Some(val) = payload.allow_partial_payment { settings.allow_partial_payment = val; }
    if let Some(val) = payload.payment_link_expiry_hours {
        if val < 0 {
            return Err(AppError::Validation("payment_link_expiry_hours cannot be negative".into()));
        }
        settings.payment_link_expiry_hours = val;
    }
    if let Some(val) = payload.payment_reminder_hours {
        if val < 0 {
            return Err(AppError::Validation("payment_reminder_hours cannot be negative".into()));
        }
        settings.payment_reminder_hours = val;
    }
    if let Some(val) = payload.refund_deadline_hours {
        if val < 0 {
            return Err(AppError::Validation("refund_deadline_hours cannot be negative".into()));
        }
        settings.refund_deadline_hours = val;
    }
    if let Some(val) = payload.auto_refund { settings.auto_refund = val; }
    if let Some(val) = payload.tax_enabled { settings.tax_enabled = val; }
    if let Some(val) = payload.tax_name { settings.tax_name = val; }
    if let Some(val) = payload.tax_rate {
        validate_rate(&val, "tax_rate")?;
        settings.tax_rate = val;
    }
    if let Some(val) = payload.prices_include_tax { settings.prices_include_tax = val; }
    if let Some(val) = payload.deposit_enabled { settings.deposit_enabled = val; }
    if let Some(val) = payload.deposit_type {
        match val.as_str() {
            "percentage" | "fixed" => {}
            _ => return Err(AppError::Validation("Invalid deposit_type (percentage or fixed)".into())),
        }
        settings.deposit_type = val;
    }
    if let Some(val) = payload.deposit_amount {
        validate_rate(&val, "deposit_amount")?;
        settings.deposit_amount = val;
    }
    if let Some(val) = payload.deposit_due_days {
        if val < 0 {
            return Err(AppError::Validation("deposit_due_days cannot be negative".into()));
        }
        settings.deposit_due_days = val;
    }

    settings.updated_at = Utc::now();
    let updated = state.settings_repo.update(&settings).await?;
    info!("Settings updated for tenant {}", tenant_id);
    Ok(Json(updated))
}

/// What-if tax split. Omitted fields fall back to the saved settings,
/// so the form can preview unsaved rate changes.
pub async fn tax_preview(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Json(payload): Json<TaxPreviewRequest>,
) -> Result<impl IntoResponse, AppError> {
    let settings = state.settings_repo.get_or_create(&tenant_id).await?;

    let price = parse_amount(&payload.price)
        .ok_or(AppError::Validation("Invalid price".into()))?;

    let rate = match payload.tax_rate {
        Some(raw) => {
            validate_rate(&raw, "tax_rate")?;
            amount_or_zero(&raw)
        }
        None => amount_or_zero(&settings.tax_rate),
    };
    let inclusive = payload.prices_include_tax.unwrap_or(settings.prices_include_tax);

    let breakdown = apply_tax(price, rate, inclusive);

    Ok(Json(TaxPreviewResponse {
        subtotal: format_amount(breakdown.subtotal),
        tax: format_amount(breakdown.tax),
        total: format_amount(breakdown.total),
    }))
}
