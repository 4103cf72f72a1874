use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{CreateBookingRequest, QuoteRequest, UpdateBookingRequest};
use crate::api::dtos::responses::{DepositLine, QuoteResponse, UnitPriceBreakdown};
use crate::api::extractors::tenant::TenantId;
use crate::domain::models::booking::{Booking, NewBookingParams, SlotSeats};
use crate::domain::models::job::Job;
use crate::domain::models::tour::Tour;
use crate::domain::models::variant::TourVariant;
use crate::domain::services::availability::{departure_instant, seats_required};
use crate::domain::services::booking_flow::{ensure_capacity, parse_adjustment, validate_counts};
use crate::domain::services::deposit::split_deposit;
use crate::domain::services::pricing::{amount_or_zero, format_amount, round_money, ParticipantCounts, PricingEngine};
use crate::domain::services::tax::apply_tax;
use crate::error::AppError;
use std::collections::HashMap;
use std::sync::Arc;
use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use tracing::info;

fn parse_booking_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid booking_date format (YYYY-MM-DD)".into()))
}

fn parse_booking_time(raw: &str) -> Result<(), AppError> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .map(|_| ())
        .map_err(|_| AppError::Validation("Invalid booking_time format (HH:MM)".into()))
}

async fn resolve_variant(
    state: &AppState,
    tenant_id: &str,
    tour_id: &str,
    variant_id: Option<&str>,
) -> Result<Option<TourVariant>, AppError> {
    let Some(id) = variant_id else {
        return Ok(None);
    };
    let variant = state.variant_repo.find_by_id(tenant_id, id).await?
        .ok_or(AppError::NotFound("Variant not found".into()))?;
    if variant.tour_id != tour_id {
        return Err(AppError::Validation("Variant does not belong to this tour".into()));
    }
    Ok(Some(variant))
}

/// Confirmation goes out immediately; the reminder only when the
/// departure is still more than a day away.
fn notification_jobs(booking: &Booking, tour: &Tour) -> Vec<Job> {
    let mut jobs = vec![Job::new("CONFIRMATION", booking.id.clone(), booking.tenant_id.clone(), Utc::now())];

    if let Some(departure) = departure_instant(booking.booking_date, &booking.booking_time, &tour.timezone) {
        let remind_at = departure - Duration::hours(24);
        if remind_at > Utc::now() {
            jobs.push(Job::new("REMINDER", booking.id.clone(), booking.tenant_id.clone(), remind_at));
        }
    }

    jobs
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!("Creating booking for tour {} (tenant {})", payload.tour_id, tenant_id);

    let date = parse_booking_date(&payload.booking_date)?;
    parse_booking_time(&payload.booking_time)?;

    let counts = ParticipantCounts {
        adults: payload.adult_count,
        children: payload.child_count.unwrap_or(0),
        infants: payload.infant_count.unwrap_or(0),
    };
    validate_counts(&counts)?;
    let discount = parse_adjustment("discount", payload.discount.as_deref().unwrap_or(""))?;
    let tax = parse_adjustment("tax", payload.tax.as_deref().unwrap_or(""))?;

    let tour = state.tour_repo.find_by_id(&tenant_id, &payload.tour_id).await?
        .ok_or(AppError::NotFound("Tour not found".into()))?;
    if !tour.active {
        return Err(AppError::Conflict("Tour is not accepting bookings".into()));
    }

    state.customer_repo.find_by_id(&tenant_id, &payload.customer_id).await?
        .ok_or(AppError::NotFound("Customer not found".into()))?;

    let variant = resolve_variant(&state, &tenant_id, &tour.id, payload.variant_id.as_deref()).await?;

    if let Some(instant) = departure_instant(date, &payload.booking_time, &tour.timezone) {
        if instant < Utc::now() {
            return Err(AppError::Validation("Cannot book a departure in the past".into()));
        }
    }

    let schedule = state.schedule_repo.find_by_slot(&tour.id, date, &payload.booking_time).await?
        .ok_or(AppError::Conflict("No departure scheduled at the selected date and time".into()))?;

    let tiers = state.pricing_tier_repo.list_by_tour(&tour.id).await?;
    let seats = seats_required(&counts, &tiers);
    ensure_capacity(seats, schedule.spots_remaining())?;

    // Client-supplied totals are ignored; the engine is the only source.
    let totals = PricingEngine::new(amount_or_zero(&tour.base_price))
        .for_variant(variant.as_ref())
        .totals(&counts, &tiers, discount, tax);

    let booking = Booking::new(NewBookingParams {
        tenant_id: tenant_id.clone(),
        tour_id: tour.id.clone(),
        customer_id: payload.customer_id,
        variant_id: variant.map(|v| v.id),
        booking_date: date,
        booking_time: payload.booking_time.clone(),
        adult_count: counts.adults,
        child_count: counts.children,
        infant_count: counts.infants,
        subtotal: format_amount(totals.subtotal),
        discount: format_amount(totals.discount),
        tax: format_amount(totals.tax),
        total: format_amount(totals.total),
        special_requests: payload.special_requests,
        source: payload.source.unwrap_or_else(|| "manual".to_string()),
    });

    let jobs = notification_jobs(&booking, &tour);
    let slot = SlotSeats { tour_id: tour.id.clone(), date, time: payload.booking_time, seats };

    let created = state.booking_repo.create_with_jobs(&booking, &slot, jobs).await?;
    info!("Booking confirmed: {} ({})", created.id, created.reference);
    Ok(Json(created))
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let mut bookings = state.booking_repo.list_by_tenant(&tenant_id).await?;

    if let Some(tour_id) = params.get("tour_id") {
        bookings.retain(|b| &b.tour_id == tour_id);
    }
    if let Some(customer_id) = params.get("customer_id") {
        bookings.retain(|b| &b.customer_id == customer_id);
    }
    if let Some(status) = params.get("status") {
        bookings.retain(|b| &b.status == status);
    }
    if let Some(from) = params.get("from") {
        let from = NaiveDate::parse_from_str(from, "%Y-%m-%d")
            .map_err(|_| AppError::Validation("Invalid from date".into()))?;
        bookings.retain(|b| b.booking_date >= from);
    }
    if let Some(to) = params.get("to") {
        let to = NaiveDate::parse_from_str(to, "%Y-%m-%d")
            .map_err(|_| AppError::Validation("Invalid to date".into()))?;
        bookings.retain(|b| b.booking_date <= to);
    }

    Ok(Json(bookings))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, booking_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    // Accepts the internal id or the customer-facing reference code.
    let booking = match state.booking_repo.find_by_id(&tenant_id, &booking_id).await? {
        Some(b) => b,
        None => state.booking_repo.find_by_reference(&tenant_id, &booking_id).await?
            .ok_or(AppError::NotFound("Booking not found".into()))?,
    };
    Ok(Json(booking))
}

pub async fn update_booking(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, booking_id)): Path<(String, String)>,
    Json(payload): Json<UpdateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut booking = state.booking_repo.find_by_id(&tenant_id, &booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    if booking.status == "cancelled" {
        return Err(AppError::Conflict("Cannot edit a cancelled booking".into()));
    }

    let tour = state.tour_repo.find_by_id(&tenant_id, &booking.tour_id).await?
        .ok_or(AppError::NotFound("Tour not found".into()))?;
    let tiers = state.pricing_tier_repo.list_by_tour(&tour.id).await?;

    // Both sides of a seat move are counted with the current tier rules.
    let old_counts = ParticipantCounts {
        adults: booking.adult_count,
        children: booking.child_count,
        infants: booking.infant_count,
    };
    let old_seats = seats_required(&old_counts, &tiers);
    let old_slot = SlotSeats {
        tour_id: tour.id.clone(),
        date: booking.booking_date,
        time: booking.booking_time.clone(),
        seats: old_seats,
    };

    if let Some(val) = payload.adult_count { booking.adult_count = val; }
    if let Some(val) = payload.child_count { booking.child_count = val; }
    if let Some(val) = payload.infant_count { booking.infant_count = val; }

    let counts = ParticipantCounts {
        adults: booking.adult_count,
        children: booking.child_count,
        infants: booking.infant_count,
    };
    validate_counts(&counts)?;

    if let Some(val) = payload.booking_date {
        booking.booking_date = parse_booking_date(&val)?;
    }
    if let Some(val) = payload.booking_time {
        parse_booking_time(&val)?;
        booking.booking_time = val;
    }

    if let Some(variant_id) = payload.variant_id {
        if variant_id.is_empty() {
            booking.variant_id = None;
        } else {
            booking.variant_id = Some(variant_id);
        }
    }
    let variant = resolve_variant(&state, &tenant_id, &tour.id, booking.variant_id.as_deref()).await?;

    let discount = match payload.discount {
        Some(raw) => parse_adjustment("discount", &raw)?,
        None => amount_or_zero(&booking.discount),
    };
    let tax = match payload.tax {
        Some(raw) => parse_adjustment("tax", &raw)?,
        None => amount_or_zero(&booking.tax),
    };

    if let Some(val) = payload.special_requests { booking.special_requests = Some(val); }
    if let Some(val) = payload.source { booking.source = val; }

    let seats = seats_required(&counts, &tiers);
    let moved = booking.booking_date != old_slot.date || booking.booking_time != old_slot.time;

    if moved {
        if let Some(instant) = departure_instant(booking.booking_date, &booking.booking_time, &tour.timezone) {
            if instant < Utc::now() {
                return Err(AppError::Validation("Cannot move a booking into the past".into()));
            }
        }
    }

    let (release, reserve) = if moved || seats != old_seats {
        let schedule = state.schedule_repo
            .find_by_slot(&tour.id, booking.booking_date, &booking.booking_time)
            .await?
            .ok_or(AppError::Conflict("No departure scheduled at the selected date and time".into()))?;

        // On the same slot the booking's own seats come back first.
        let available = if moved {
            schedule.spots_remaining()
        } else {
            schedule.spots_remaining() + old_seats
        };
        ensure_capacity(seats, available)?;

        let new_slot = SlotSeats {
            tour_id: tour.id.clone(),
            date: booking.booking_date,
            time: booking.booking_time.clone(),
            seats,
        };
        (Some(old_slot), Some(new_slot))
    } else {
        (None, None)
    };

    let totals = PricingEngine::new(amount_or_zero(&tour.base_price))
        .for_variant(variant.as_ref())
        .totals(&counts, &tiers, discount, tax);
    booking.subtotal = format_amount(totals.subtotal);
    booking.discount = format_amount(totals.discount);
    booking.tax = format_amount(totals.tax);
    booking.total = format_amount(totals.total);

    let updated = state.booking_repo.update(&booking, release.as_ref(), reserve.as_ref()).await?;
    info!("Booking updated: {}", updated.id);
    Ok(Json(updated))
}

pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, booking_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_repo.find_by_id(&tenant_id, &booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    // Cancelling twice is a no-op.
    if booking.status == "cancelled" {
        return Ok(Json(booking));
    }

    let tour = state.tour_repo.find_by_id(&tenant_id, &booking.tour_id).await?
        .ok_or(AppError::NotFound("Tour not found".into()))?;
    let tiers = state.pricing_tier_repo.list_by_tour(&tour.id).await?;

    let counts = ParticipantCounts {
        adults: booking.adult_count,
        children: booking.child_count,
        infants: booking.infant_count,
    };
    let slot = SlotSeats {
        tour_id: tour.id.clone(),
        date: booking.booking_date,
        time: booking.booking_time.clone(),
        seats: seats_required(&counts, &tiers),
    };

    // Pending reminders die before the cancellation notice is queued, so
    // the queue never holds both.
    state.job_repo.cancel_pending_for_booking(&booking.id).await?;

    let jobs = vec![Job::new("CANCELLATION", booking.id.clone(), tenant_id.clone(), Utc::now())];
    let cancelled = state.booking_repo.cancel(&booking, &slot, jobs).await?;

    info!("Booking cancelled: {} ({})", cancelled.id, cancelled.reference);
    Ok(Json(cancelled))
}

pub async fn quote_booking(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Json(payload): Json<QuoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    let tour = state.tour_repo.find_by_id(&tenant_id, &payload.tour_id).await?
        .ok_or(AppError::NotFound("Tour not found".into()))?;
    let variant = resolve_variant(&state, &tenant_id, &tour.id, payload.variant_id.as_deref()).await?;
    let tiers = state.pricing_tier_repo.list_by_tour(&tour.id).await?;
    let settings = state.settings_repo.get_or_create(&tenant_id).await?;

    // Previews are forgiving: partial forms price as zero instead of
    // erroring.
    let counts = ParticipantCounts {
        adults: payload.adult_count.max(0),
        children: payload.child_count.max(0),
        infants: payload.infant_count.max(0),
    };
    let discount = round_money(amount_or_zero(payload.discount.as_deref().unwrap_or("")));
    let explicit_tax = payload.tax.as_deref().map(str::trim).filter(|s| !s.is_empty());

    let engine = PricingEngine::new(amount_or_zero(&tour.base_price)).for_variant(variant.as_ref());
    let unit = engine.unit_prices(&tiers);
    let subtotal = engine.subtotal(&counts, &tiers);
    let base = subtotal - discount;

    // An operator-entered tax amount wins; otherwise the configured rate
    // produces an informational line.
    let (tax, total, tax_name) = if let Some(raw) = explicit_tax {
        let tax = round_money(amount_or_zero(raw));
        (tax, base + tax, None)
    } else if settings.tax_enabled {
        let rate = amount_or_zero(&settings.tax_rate);
        let breakdown = apply_tax(base, rate, settings.prices_include_tax);
        (breakdown.tax, breakdown.total, Some(settings.tax_name.clone()))
    } else {
        (Decimal::ZERO, base, None)
    };

    let deposit = if settings.deposit_enabled {
        let split = split_deposit(total, true, &settings.deposit_type, amount_or_zero(&settings.deposit_amount));
        Some(DepositLine {
            deposit: format_amount(split.deposit),
            balance: format_amount(split.balance),
            due_days: settings.deposit_due_days,
        })
    } else {
        None
    };

    Ok(Json(QuoteResponse {
        unit_prices: UnitPriceBreakdown {
            adult: format_amount(unit.adult),
            child: format_amount(unit.child),
            infant: format_amount(unit.infant),
        },
        subtotal: format_amount(subtotal),
        discount: format_amount(discount),
        tax: format_amount(tax),
        tax_name,
        total: format_amount(total),
        deposit,
    }))
}
