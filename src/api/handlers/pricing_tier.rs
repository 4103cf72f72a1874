use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{CreatePricingTierRequest, UpdatePricingTierRequest};
use crate::api::extractors::tenant::TenantId;
use crate::domain::models::pricing_tier::PricingTier;
use crate::domain::services::pricing::parse_amount;
use crate::error::AppError;
use std::sync::Arc;
use rust_decimal::Decimal;
use tracing::info;

fn validate_tier_price(price: &Option<String>) -> Result<(), AppError> {
    if let Some(raw) = price {
        if raw.trim().is_empty() {
            return Ok(());
        }
        match parse_amount(raw) {
            Some(p) if p >= Decimal::ZERO => {}
            _ => return Err(AppError::Validation("Invalid tier price".into())),
        }
    }
    Ok(())
}

/// Active tier names are unique per tour so the price resolver's
/// first-match lookup is deterministic.
async fn check_duplicate_name(
    state: &AppState,
    tour_id: &str,
    name: &str,
    exclude_id: Option<&str>,
) -> Result<(), AppError> {
    let tiers = state.pricing_tier_repo.list_by_tour(tour_id).await?;
    let clash = tiers.iter().any(|t| {
        t.active && t.name.eq_ignore_ascii_case(name) && Some(t.id.as_str()) != exclude_id
    });
    if clash {
        return Err(AppError::Conflict(format!("An active tier named '{}' already exists for this tour", name)));
    }
    Ok(())
}

pub async fn create_pricing_tier(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, slug)): Path<(String, String)>,
    Json(payload): Json<CreatePricingTierRequest>,
) -> Result<impl IntoResponse, AppError> {
    let tour = state.tour_repo.find_by_slug(&tenant_id, &slug).await?
        .ok_or(AppError::NotFound("Tour not found".into()))?;

    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Tier name is required".into()));
    }
    validate_tier_price(&payload.price)?;

    let active = payload.active.unwrap_or(true);
    if active {
        check_duplicate_name(&state, &tour.id, &payload.name, None).await?;
    }

    let label = payload.label.unwrap_or_else(|| payload.name.clone());
    let mut tier = PricingTier::new(tenant_id.clone(), tour.id.clone(), payload.name, label, payload.price);
    tier.min_age = payload.min_age;
    tier.max_age = payload.max_age;
    tier.min_quantity = payload.min_quantity;
    tier.max_quantity = payload.max_quantity;
    if let Some(val) = payload.counts_toward_capacity {
        tier.counts_toward_capacity = val;
    }
    tier.is_default = payload.is_default.unwrap_or(false);
    tier.active = active;

    let created = state.pricing_tier_repo.create(&tier).await?;
    info!("Pricing tier created: {} for tour {}", created.id, slug);
    Ok(Json(created))
}

pub async fn list_pricing_tiers(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, slug)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let tour = state.tour_repo.find_by_slug(&tenant_id, &slug).await?
        .ok_or(AppError::NotFound("Tour not found".into()))?;

    let tiers = state.pricing_tier_repo.list_by_tour(&tour.id).await?;
    Ok(Json(tiers))
}

pub async fn update_pricing_tier(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, tier_id)): Path<(String, String)>,
    Json(payload): Json<UpdatePricingTierRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut tier = state.pricing_tier_repo.find_by_id(&tenant_id, &tier_id).await?
        .ok_or(AppError::NotFound("Pricing tier not found".into()))?;

    if let Some(val) = payload.name {
        if val.trim().is_empty() {
            return Err(AppError::Validation("Tier name is required".into()));
        }
        tier.name = val;
    }
    if let Some(val) = payload.label { tier.label = val; }
    if let Some(val) = payload.price {
        validate_tier_price(&Some(val.clone()))?;
        tier.price = Some(val);
    }
    if let Some(val) = payload.min_age { tier.min_age = Some(val); }
    if let Some(val) = payload.max_age { tier.max_age = Some(val); }
    if let Some(val) = payload.min_quantity { tier.min_quantity = Some(val); }
    if let Some(val) = payload.max_quantity { tier.max_quantity = Some(val); }
    if let Some(val) = payload.counts_toward_capacity { tier.counts_toward_capacity = val; }
    if let Some(val) = payload.is_default { tier.is_default = val; }
    if let Some(val) = payload.active { tier.active = val; }

    if tier.active {
        check_duplicate_name(&state, &tier.tour_id, &tier.name, Some(&tier.id)).await?;
    }

    let updated = state.pricing_tier_repo.update(&tier).await?;
    info!("Pricing tier updated: {}", tier_id);
    Ok(Json(updated))
}

pub async fn delete_pricing_tier(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, tier_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    state.pricing_tier_repo.delete(&tenant_id, &tier_id).await?;
    info!("Pricing tier deleted: {}", tier_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
