use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{CreateScheduleRequest, GenerateSchedulesRequest, UpdateScheduleRequest};
use crate::api::dtos::responses::SchedulesGeneratedResponse;
use crate::api::extractors::tenant::TenantId;
use crate::domain::models::schedule::Schedule;
use crate::domain::services::availability::generate_slots;
use crate::error::AppError;
use std::collections::HashMap;
use std::sync::Arc;
use chrono::{NaiveDate, NaiveTime};
use tracing::info;

fn parse_time(raw: &str) -> Result<(), AppError> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .map(|_| ())
        .map_err(|_| AppError::Validation("Invalid time format (HH:MM)".into()))
}

pub async fn create_schedule(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, slug)): Path<(String, String)>,
    Json(payload): Json<CreateScheduleRequest>,
) -> Result<impl IntoResponse, AppError> {
    let tour = state.tour_repo.find_by_slug(&tenant_id, &slug).await?
        .ok_or(AppError::NotFound("Tour not found".into()))?;

    parse_time(&payload.time)?;

    let max_participants = payload.max_participants.unwrap_or(tour.max_participants);
    if max_participants <= 0 {
        return Err(AppError::Validation("max_participants must be positive".into()));
    }

    let schedule = Schedule::new(tenant_id.clone(), tour.id.clone(), payload.date, payload.time, max_participants);
    let created = state.schedule_repo.create(&schedule).await?;

    info!("Schedule created: {} {} for tour {}", created.date, created.time, slug);
    Ok(Json(created))
}

pub async fn list_schedules(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, slug)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let tour = state.tour_repo.find_by_slug(&tenant_id, &slug).await?
        .ok_or(AppError::NotFound("Tour not found".into()))?;

    let from_str = params.get("from").ok_or(AppError::Validation("from required".into()))?;
    let to_str = params.get("to").ok_or(AppError::Validation("to required".into()))?;

    let from = NaiveDate::parse_from_str(from_str, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid from date".into()))?;
    let to = NaiveDate::parse_from_str(to_str, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid to date".into()))?;

    let schedules = state.schedule_repo.list_by_range(&tour.id, from, to).await?;
    Ok(Json(schedules))
}

/// Materializes schedule rows from the tour's weekday/departure-time
/// configuration. Existing slots and blacked-out days are skipped, so
/// the operation can be re-run over an already generated range.
pub async fn generate_schedules(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, slug)): Path<(String, String)>,
    Json(payload): Json<GenerateSchedulesRequest>,
) -> Result<impl IntoResponse, AppError> {
    let tour = state.tour_repo.find_by_slug(&tenant_id, &slug).await?
        .ok_or(AppError::NotFound("Tour not found".into()))?;

    if payload.end_date < payload.start_date {
        return Err(AppError::Validation("end_date must be on or after start_date".into()));
    }
    if (payload.end_date - payload.start_date).num_days() > 366 {
        return Err(AppError::Validation("Date range cannot exceed one year".into()));
    }

    let blackouts = state.blackout_repo
        .list_by_range(&tour.id, payload.start_date, payload.end_date)
        .await?;

    let slots = generate_slots(&tour, payload.start_date, payload.end_date, &blackouts);
    let schedules: Vec<Schedule> = slots
        .into_iter()
        .map(|(date, time)| Schedule::new(tenant_id.clone(), tour.id.clone(), date, time, tour.max_participants))
        .collect();

    let created = state.schedule_repo.create_many(&schedules).await?;
    info!("Generated {} schedules for tour {} ({} to {})", created, slug, payload.start_date, payload.end_date);

    Ok(Json(SchedulesGeneratedResponse { created }))
}

pub async fn update_schedule(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, schedule_id)): Path<(String, String)>,
    Json(payload): Json<UpdateScheduleRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut schedule = state.schedule_repo.find_by_id(&tenant_id, &schedule_id).await?
        .ok_or(AppError::NotFound("Schedule not found".into()))?;

    if let Some(val) = payload.date { schedule.date = val; }
    if let Some(val) = payload.time {
        parse_time(&val)?;
        schedule.time = val;
    }
    if let Some(val) = payload.max_participants {
        if val <= 0 {
            return Err(AppError::Validation("max_participants must be positive".into()));
        }
        if val < schedule.booked_count {
            return Err(AppError::Conflict(format!(
                "Cannot reduce capacity below booked seats ({})",
                schedule.booked_count
            )));
        }
        schedule.max_participants = val;
    }

    let updated = state.schedule_repo.update(&schedule).await?;
    info!("Schedule updated: {}", schedule_id);
    Ok(Json(updated))
}

pub async fn delete_schedule(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, schedule_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let schedule = state.schedule_repo.find_by_id(&tenant_id, &schedule_id).await?
        .ok_or(AppError::NotFound("Schedule not found".into()))?;

    if schedule.booked_count > 0 {
        return Err(AppError::Conflict("Schedule has bookings and cannot be deleted".into()));
    }

    state.schedule_repo.delete(&tenant_id, &schedule_id).await?;
    info!("Schedule deleted: {}", schedule_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
