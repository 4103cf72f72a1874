use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{CreateTourRequest, UpdateTourRequest};
use crate::api::extractors::tenant::TenantId;
use crate::domain::models::tour::{DepartureTime, Tour};
use crate::domain::services::pricing::parse_amount;
use crate::error::AppError;
use std::collections::HashMap;
use std::sync::Arc;
use chrono::{NaiveTime, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

fn weekdays_to_json(days: &[u8]) -> Result<String, AppError> {
    if days.iter().any(|d| *d > 6) {
        return Err(AppError::Validation("Weekdays must be between 0 (Monday) and 6 (Sunday)".into()));
    }
    serde_json::to_string(days).map_err(|_| AppError::Validation("Invalid weekdays".into()))
}

fn departures_to_json(times: &[DepartureTime]) -> Result<String, AppError> {
    for dt in times {
        if NaiveTime::parse_from_str(&dt.time, "%H:%M").is_err() {
            return Err(AppError::Validation(format!("Invalid departure time '{}' (expected HH:MM)", dt.time)));
        }
    }
    serde_json::to_string(times).map_err(|_| AppError::Validation("Invalid departure times".into()))
}

fn validate_price(raw: &str) -> Result<(), AppError> {
    match parse_amount(raw) {
        Some(p) if p >= Decimal::ZERO => Ok(()),
        _ => Err(AppError::Validation("Invalid base_price".into())),
    }
}

pub async fn create_tour(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Json(payload): Json<CreateTourRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!("Creating tour: {} for tenant: {}", payload.slug, tenant_id);

    if payload.slug.trim().is_empty() {
        return Err(AppError::Validation("Tour slug is required".into()));
    }
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Tour name is required".into()));
    }
    if payload.timezone.parse::<Tz>().is_err() {
        return Err(AppError::Validation("Invalid timezone".into()));
    }
    validate_price(&payload.base_price)?;
    if payload.duration_min <= 0 {
        return Err(AppError::Validation("duration_min must be positive".into()));
    }
    if payload.max_participants <= 0 {
        return Err(AppError::Validation("max_participants must be positive".into()));
    }

    let available_weekdays = weekdays_to_json(&payload.available_weekdays)?;
    let departure_times = departures_to_json(&payload.departure_times)?;

    let tour = Tour {
        id: Uuid::new_v4().to_string(),
        tenant_id: tenant_id.clone(),
        slug: payload.slug,
        name: payload.name,
        description: payload.description.unwrap_or_default(),
        location: payload.location.unwrap_or_default(),
        timezone: payload.timezone,
        base_price: payload.base_price,
        duration_min: payload.duration_min,
        max_participants: payload.max_participants,
        available_weekdays,
        departure_times,
        active: payload.active.unwrap_or(true),
        image_url: payload.image_url.unwrap_or_default(),
        created_at: Utc::now(),
    };

    let created = state.tour_repo.create(&tour).await?;
    Ok(Json(created))
}

pub async fn list_tours(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let mut tours = state.tour_repo.list(&tenant_id).await?;

    if let Some(active) = params.get("active") {
        let want = active == "true" || active == "1";
        tours.retain(|t| t.active == want);
    }
    if let Some(q) = params.get("q") {
        let needle = q.to_lowercase();
        tours.retain(|t| {
            t.name.to_lowercase().contains(&needle) || t.location.to_lowercase().contains(&needle)
        });
    }

    Ok(Json(tours))
}

pub async fn get_tour(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, slug)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let tour = state.tour_repo.find_by_slug(&tenant_id, &slug).await?
        .ok_or_else(|| AppError::NotFound(format!("Tour '{}' not found", slug)))?;

    Ok(Json(tour))
}

pub async fn update_tour(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, slug)): Path<(String, String)>,
    Json(payload): Json<UpdateTourRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut tour = state.tour_repo.find_by_slug(&tenant_id, &slug).await?
        .ok_or(AppError::NotFound("Tour not found".into()))?;

    if let Some(val) = payload.slug { tour.slug = val; }
    if let Some(val) = payload.name { tour.name = val; }
    if let Some(val) = payload.description { tour.description = val; }
    if let Some(val) = payload.location { tour.location = val; }
    if let Some(val) = payload.timezone {
        if val.parse::<Tz>().is_err() {
            return Err(AppError::Validation("Invalid timezone".into()));
        }
        tour.timezone = val;
    }
    if let Some(val) = payload.base_price {
        validate_price(&val)?;
        tour.base_price = val;
    }
    if let Some(val) = payload.duration_min {
        if val <= 0 {
            return Err(AppError::Validation("duration_min must be positive".into()));
        }
        tour.duration_min = val;
    }
    if let Some(val) = payload.max_participants {
        if val <= 0 {
            return Err(AppError::Validation("max_participants must be positive".into()));
        }
        tour.max_participants = val;
    }
    if let Some(val) = payload.available_weekdays {
        tour.available_weekdays = weekdays_to_json(&val)?;
    }
    if let Some(val) = payload.departure_times {
        tour.departure_times = departures_to_json(&val)?;
    }
    if let Some(val) = payload.active { tour.active = val; }
    if let Some(val) = payload.image_url { tour.image_url = val; }

    let updated = state.tour_repo.update(&tour).await?;
    info!("Tour updated: {}", slug);
    Ok(Json(updated))
}

pub async fn delete_tour(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, slug)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let tour = state.tour_repo.find_by_slug(&tenant_id, &slug).await?
        .ok_or(AppError::NotFound("Tour not found".into()))?;

    state.tour_repo.delete(&tenant_id, &tour.id).await?;
    info!("Tour deleted: {}", slug);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
