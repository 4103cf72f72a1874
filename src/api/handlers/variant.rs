use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{CreateVariantRequest, UpdateVariantRequest};
use crate::api::extractors::tenant::TenantId;
use crate::domain::models::variant::TourVariant;
use crate::domain::services::pricing::parse_amount;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

fn validate_modifier(kind: &str, value: &str) -> Result<(), AppError> {
    match kind {
        "absolute" | "percentage" | "addition" => {}
        _ => return Err(AppError::Validation("Invalid modifier_kind (absolute, percentage or addition)".into())),
    }
    if parse_amount(value).is_none() {
        return Err(AppError::Validation("Invalid modifier_value".into()));
    }
    Ok(())
}

fn weekdays_to_json(days: &[u8]) -> Result<String, AppError> {
    if days.iter().any(|d| *d > 6) {
        return Err(AppError::Validation("Weekdays must be between 0 (Monday) and 6 (Sunday)".into()));
    }
    serde_json::to_string(days).map_err(|_| AppError::Validation("Invalid weekdays".into()))
}

pub async fn create_variant(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, slug)): Path<(String, String)>,
    Json(payload): Json<CreateVariantRequest>,
) -> Result<impl IntoResponse, AppError> {
    let tour = state.tour_repo.find_by_slug(&tenant_id, &slug).await?
        .ok_or(AppError::NotFound("Tour not found".into()))?;

    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Variant name is required".into()));
    }
    validate_modifier(&payload.modifier_kind, &payload.modifier_value)?;

    let mut variant = TourVariant::new(
        tenant_id.clone(),
        tour.id.clone(),
        payload.name,
        payload.modifier_kind,
        payload.modifier_value,
    );
    if let Some(val) = payload.description { variant.description = val; }
    variant.duration_min = payload.duration_min;
    variant.max_participants = payload.max_participants;
    if let Some(days) = payload.available_weekdays {
        variant.available_weekdays = Some(weekdays_to_json(&days)?);
    }
    if let Some(val) = payload.active { variant.active = val; }

    let created = state.variant_repo.create(&variant).await?;
    info!("Variant created: {} for tour {}", created.id, slug);
    Ok(Json(created))
}

pub async fn list_variants(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, slug)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let tour = state.tour_repo.find_by_slug(&tenant_id, &slug).await?
        .ok_or(AppError::NotFound("Tour not found".into()))?;

    let variants = state.variant_repo.list_by_tour(&tour.id).await?;
    Ok(Json(variants))
}

pub async fn update_variant(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, variant_id)): Path<(String, String)>,
    Json(payload): Json<UpdateVariantRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut variant = state.variant_repo.find_by_id(&tenant_id, &variant_id).await?
        .ok_or(AppError::NotFound("Variant not found".into()))?;

    if let Some(val) = payload.name { variant.name = val; }
    if let Some(val) = payload.description { variant.description = val; }
    if let Some(val) = payload.modifier_kind { variant.modifier_kind = val; }
    if let Some(val) = payload.modifier_value { variant.modifier_value = val; }
    validate_modifier(&variant.modifier_kind, &variant.modifier_value)?;

    if let Some(val) = payload.duration_min { variant.duration_min = Some(val); }
    if let Some(val) = payload.max_participants { variant.max_participants = Some(val); }
    if let Some(days) = payload.available_weekdays {
        variant.available_weekdays = Some(weekdays_to_json(&days)?);
    }
    if let Some(val) = payload.active { variant.active = val; }

    let updated = state.variant_repo.update(&variant).await?;
    info!("Variant updated: {}", variant_id);
    Ok(Json(updated))
}

pub async fn delete_variant(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, variant_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    state.variant_repo.delete(&tenant_id, &variant_id).await?;
    info!("Variant deleted: {}", variant_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
