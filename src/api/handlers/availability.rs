use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::responses::MonthAvailabilityResponse;
use crate::api::extractors::tenant::TenantId;
use crate::domain::models::tour::DepartureTime;
use crate::domain::services::availability::calculate_month;
use crate::error::AppError;
use std::collections::HashMap;
use std::sync::Arc;
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;

pub async fn get_month_availability(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, slug)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let tour = state.tour_repo.find_by_slug(&tenant_id, &slug).await?
        .ok_or_else(|| AppError::NotFound(format!("Tour '{}' not found", slug)))?;

    let year: i32 = params.get("year")
        .ok_or(AppError::Validation("year required".into()))?
        .parse()
        .map_err(|_| AppError::Validation("Invalid year".into()))?;
    let month: u32 = params.get("month")
        .ok_or(AppError::Validation("month required".into()))?
        .parse()
        .map_err(|_| AppError::Validation("Invalid month".into()))?;

    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(AppError::Validation("Invalid month".into()))?;
    let last = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .map(|d| d.pred_opt().unwrap_or(d))
    .ok_or(AppError::Validation("Invalid month".into()))?;

    let schedules = state.schedule_repo.list_by_range(&tour.id, first, last).await?;
    let blackouts = state.blackout_repo.list_by_range(&tour.id, first, last).await?;
    let departures: Vec<DepartureTime> = serde_json::from_str(&tour.departure_times).unwrap_or_default();

    let tz: Tz = tour.timezone.parse().unwrap_or(chrono_tz::UTC);
    let now_local = Utc::now().with_timezone(&tz).naive_local();

    let days = calculate_month(year, month, &schedules, &blackouts, &departures, now_local);

    Ok(Json(MonthAvailabilityResponse { year, month, days }))
}

pub async fn get_departure_times(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, slug)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let tour = state.tour_repo.find_by_slug(&tenant_id, &slug).await?
        .ok_or_else(|| AppError::NotFound(format!("Tour '{}' not found", slug)))?;

    let departures: Vec<DepartureTime> = serde_json::from_str(&tour.departure_times).unwrap_or_default();
    Ok(Json(departures))
}
