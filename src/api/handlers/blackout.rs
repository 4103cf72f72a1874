use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::CreateBlackoutRequest;
use crate::api::extractors::tenant::TenantId;
use crate::domain::models::blackout::BlackoutDate;
use crate::error::AppError;
use std::sync::Arc;
use chrono::NaiveDate;
use tracing::info;

pub async fn create_blackout(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, slug)): Path<(String, String)>,
    Json(payload): Json<CreateBlackoutRequest>,
) -> Result<impl IntoResponse, AppError> {
    let tour = state.tour_repo.find_by_slug(&tenant_id, &slug).await?
        .ok_or(AppError::NotFound("Tour not found".into()))?;

    let blackout = BlackoutDate::new(tenant_id.clone(), tour.id.clone(), payload.date, payload.reason);
    let saved = state.blackout_repo.upsert(&blackout).await?;

    info!("Blackout set: {} for tour {}", saved.date, slug);
    Ok(Json(saved))
}

pub async fn list_blackouts(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, slug)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let tour = state.tour_repo.find_by_slug(&tenant_id, &slug).await?
        .ok_or(AppError::NotFound("Tour not found".into()))?;

    let blackouts = state.blackout_repo.list_by_tour(&tour.id).await?;
    Ok(Json(blackouts))
}

pub async fn delete_blackout(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, slug, date)): Path<(String, String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let tour = state.tour_repo.find_by_slug(&tenant_id, &slug).await?
        .ok_or(AppError::NotFound("Tour not found".into()))?;

    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format".into()))?;

    state.blackout_repo.delete(&tour.id, date).await?;
    info!("Blackout removed: {} for tour {}", date, slug);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
