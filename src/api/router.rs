use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put, delete},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{
    availability, blackout, booking, customer, health, payment, pricing_tier, schedule,
    settings, tenant, tour, variant,
};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Tenants
        .route("/api/v1/tenants", post(tenant::create_tenant))
        .route("/api/v1/tenants/by-slug/{slug}", get(tenant::get_tenant_by_slug))
        .route("/api/v1/{tenant_id}/tenant", put(tenant::update_tenant))

        // Tours
        .route("/api/v1/{tenant_id}/tours", post(tour::create_tour).get(tour::list_tours))
        .route("/api/v1/{tenant_id}/tours/{slug}", get(tour::get_tour).put(tour::update_tour).delete(tour::delete_tour))

        // Pricing tiers & variants
        .route("/api/v1/{tenant_id}/tours/{slug}/pricing-tiers", get(pricing_tier::list_pricing_tiers).post(pricing_tier::create_pricing_tier))
        .route("/api/v1/{tenant_id}/pricing-tiers/{tier_id}", put(pricing_tier::update_pricing_tier).delete(pricing_tier::delete_pricing_tier))
        .route("/api/v1/{tenant_id}/tours/{slug}/variants", get(variant::list_variants).post(variant::create_variant))
        .route("/api/v1/{tenant_id}/variants/{variant_id}", put(variant::update_variant).delete(variant::delete_variant))

        // Schedules & blackouts
        .route("/api/v1/{tenant_id}/tours/{slug}/schedules", get(schedule::list_schedules).post(schedule::create_schedule))
        .route("/api/v1/{tenant_id}/tours/{slug}/schedules/generate", post(schedule::generate_schedules))
        .route("/api/v1/{tenant_id}/schedules/{schedule_id}", put(schedule::update_schedule).delete(schedule::delete_schedule))
        .route("/api/v1/{tenant_id}/tours/{slug}/blackouts", get(blackout::list_blackouts).post(blackout::create_blackout))
        .route("/api/v1/{tenant_id}/tours/{slug}/blackouts/{date}", delete(blackout::delete_blackout))

        // Availability
        .route("/api/v1/{tenant_id}/tours/{slug}/availability", get(availability::get_month_availability))
        .route("/api/v1/{tenant_id}/tours/{slug}/departure-times", get(availability::get_departure_times))

        // Customers
        .route("/api/v1/{tenant_id}/customers", get(customer::list_customers).post(customer::create_customer))
        .route("/api/v1/{tenant_id}/customers/{customer_id}", get(customer::get_customer).put(customer::update_customer).delete(customer::delete_customer))

        // Bookings
        .route("/api/v1/{tenant_id}/bookings", post(booking::create_booking).get(booking::list_bookings))
        .route("/api/v1/{tenant_id}/bookings/quote", post(booking::quote_booking))
        .route("/api/v1/{tenant_id}/bookings/{booking_id}", get(booking::get_booking).put(booking::update_booking))
        .route("/api/v1/{tenant_id}/bookings/{booking_id}/cancel", post(booking::cancel_booking))

        // Payments
        .route("/api/v1/{tenant_id}/bookings/{booking_id}/payments", post(payment::create_payment).get(payment::list_payments))

        // Settings
        .route("/api/v1/{tenant_id}/settings", get(settings::get_settings).put(settings::update_settings))
        .route("/api/v1/{tenant_id}/settings/tax-preview", post(settings::tax_preview))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        tenant_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
