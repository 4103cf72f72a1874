mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::TestApp;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Tenant plus a tour at the given base price. Returns (tenant_id, tour).
async fn seed(app: &TestApp, suffix: &str, base_price: &str) -> (String, Value) {
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/tenants")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    json!({
                        "name": format!("Quotes {}", suffix),
                        "slug": format!("quotes-{}", suffix)
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    let tenant_id = parse_body(response).await["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/v1/{}/tours", tenant_id))
                .header("Content-Type", "application/json")
                .body(Body::from(
                    json!({
                        "slug": format!("walk-{}", suffix),
                        "name": "Guided Walk",
                        "timezone": "UTC",
                        "base_price": base_price,
                        "duration_min": 120,
                        "max_participants": 10,
                        "available_weekdays": [0, 1, 2, 3, 4, 5, 6],
                        "departure_times": [{"time": "09:00"}]
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let tour = parse_body(response).await;

    (tenant_id, tour)
}

async fn quote(app: &TestApp, tenant_id: &str, payload: Value) -> Value {
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/v1/{}/bookings/quote", tenant_id))
                .header("Content-Type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    parse_body(response).await
}

async fn put_settings(app: &TestApp, tenant_id: &str, payload: Value) {
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/v1/{}/settings", tenant_id))
                .header("Content-Type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_quote_fallback_unit_prices() {
    let app = TestApp::new().await;
    let (tenant_id, tour) = seed(&app, "fallback", "100.00").await;

    let body = quote(
        &app,
        &tenant_id,
        json!({
            "tour_id": tour["id"],
            "adult_count": 2,
            "child_count": 1
        }),
    )
    .await;

    // Without tiers: children half price, infants free.
    assert_eq!(body["unit_prices"]["adult"], "100.00");
    assert_eq!(body["unit_prices"]["child"], "50.00");
    assert_eq!(body["unit_prices"]["infant"], "0.00");
    assert_eq!(body["subtotal"], "250.00");
    assert_eq!(body["discount"], "0.00");
    assert_eq!(body["tax"], "0.00");
    assert!(body["tax_name"].is_null());
    assert_eq!(body["total"], "250.00");
    assert!(body["deposit"].is_null());
}

#[tokio::test]
async fn test_quote_uses_tier_prices() {
    let app = TestApp::new().await;
    let (tenant_id, tour) = seed(&app, "tiers", "100.00").await;
    let slug = tour["slug"].as_str().unwrap();

    for (name, price) in [("adult", "80.00"), ("child", "60.00")] {
        let response = app
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("/api/v1/{}/tours/{}/pricing-tiers", tenant_id, slug))
                    .header("Content-Type", "application/json")
                    .body(Body::from(json!({"name": name, "price": price}).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let body = quote(
        &app,
        &tenant_id,
        json!({
            "tour_id": tour["id"],
            "adult_count": 2,
            "child_count": 1
        }),
    )
    .await;

    assert_eq!(body["unit_prices"]["adult"], "80.00");
    assert_eq!(body["unit_prices"]["child"], "60.00");
    assert_eq!(body["subtotal"], "220.00");
    assert_eq!(body["total"], "220.00");
}

#[tokio::test]
async fn test_quote_with_variant_modifier() {
    let app = TestApp::new().await;
    let (tenant_id, tour) = seed(&app, "variant", "100.00").await;
    let slug = tour["slug"].as_str().unwrap();

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/v1/{}/tours/{}/variants", tenant_id, slug))
                .header("Content-Type", "application/json")
                .body(Body::from(
                    json!({
                        "name": "Extended",
                        "modifier_kind": "percentage",
                        "modifier_value": "20"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    let variant = parse_body(response).await;

    let body = quote(
        &app,
        &tenant_id,
        json!({
            "tour_id": tour["id"],
            "variant_id": variant["id"],
            "adult_count": 1
        }),
    )
    .await;

    // Base 100 raised 20 percent; the child fallback follows the new base.
    assert_eq!(body["unit_prices"]["adult"], "120.00");
    assert_eq!(body["unit_prices"]["child"], "60.00");
    assert_eq!(body["subtotal"], "120.00");
    assert_eq!(body["total"], "120.00");
}

#[tokio::test]
async fn test_quote_discount_and_explicit_tax() {
    let app = TestApp::new().await;
    let (tenant_id, tour) = seed(&app, "adjust", "100.00").await;

    // The configured rate exists but the operator typed an amount.
    put_settings(
        &app,
        &tenant_id,
        json!({"tax_enabled": true, "tax_rate": "10", "tax_name": "VAT"}),
    )
    .await;

    let body = quote(
        &app,
        &tenant_id,
        json!({
            "tour_id": tour["id"],
            "adult_count": 2,
            "discount": "25",
            "tax": "5"
        }),
    )
    .await;

    assert_eq!(body["subtotal"], "200.00");
    assert_eq!(body["discount"], "25.00");
    assert_eq!(body["tax"], "5.00");
    assert!(body["tax_name"].is_null());
    assert_eq!(body["total"], "180.00");
}

#[tokio::test]
async fn test_quote_applies_configured_tax_rate() {
    let app = TestApp::new().await;
    let (tenant_id, tour) = seed(&app, "tax-rate", "100.00").await;

    put_settings(
        &app,
        &tenant_id,
        json!({"tax_enabled": true, "tax_rate": "10", "tax_name": "VAT"}),
    )
    .await;

    let body = quote(
        &app,
        &tenant_id,
        json!({"tour_id": tour["id"], "adult_count": 2}),
    )
    .await;

    assert_eq!(body["subtotal"], "200.00");
    assert_eq!(body["tax"], "20.00");
    assert_eq!(body["tax_name"], "VAT");
    assert_eq!(body["total"], "220.00");
}

#[tokio::test]
async fn test_quote_inclusive_tax_extracts_share() {
    let app = TestApp::new().await;
    let (tenant_id, tour) = seed(&app, "tax-incl", "119.00").await;

    put_settings(
        &app,
        &tenant_id,
        json!({
            "tax_enabled": true,
            "tax_rate": "19",
            "prices_include_tax": true
        }),
    )
    .await;

    let body = quote(
        &app,
        &tenant_id,
        json!({"tour_id": tour["id"], "adult_count": 1}),
    )
    .await;

    // The displayed price already contains the tax share.
    assert_eq!(body["subtotal"], "119.00");
    assert_eq!(body["tax"], "19.00");
    assert_eq!(body["tax_name"], "Tax");
    assert_eq!(body["total"], "119.00");
}

#[tokio::test]
async fn test_quote_deposit_lines() {
    let app = TestApp::new().await;
    let (tenant_id, tour) = seed(&app, "deposit", "100.00").await;

    put_settings(
        &app,
        &tenant_id,
        json!({
            "deposit_enabled": true,
            "deposit_type": "percentage",
            "deposit_amount": "25"
        }),
    )
    .await;

    let body = quote(
        &app,
        &tenant_id,
        json!({
            "tour_id": tour["id"],
            "adult_count": 2,
            "child_count": 1
        }),
    )
    .await;

    assert_eq!(body["total"], "250.00");
    assert_eq!(body["deposit"]["deposit"], "62.50");
    assert_eq!(body["deposit"]["balance"], "187.50");
    assert_eq!(body["deposit"]["due_days"], 7);

    // A fixed amount larger than the total is clamped to it.
    put_settings(
        &app,
        &tenant_id,
        json!({"deposit_type": "fixed", "deposit_amount": "400"}),
    )
    .await;

    let body = quote(
        &app,
        &tenant_id,
        json!({
            "tour_id": tour["id"],
            "adult_count": 2,
            "child_count": 1
        }),
    )
    .await;

    assert_eq!(body["deposit"]["deposit"], "250.00");
    assert_eq!(body["deposit"]["balance"], "0.00");
}

#[tokio::test]
async fn test_quote_clamps_negative_counts() {
    let app = TestApp::new().await;
    let (tenant_id, tour) = seed(&app, "clamp", "100.00").await;

    let body = quote(
        &app,
        &tenant_id,
        json!({
            "tour_id": tour["id"],
            "adult_count": -1,
            "child_count": 1
        }),
    )
    .await;

    assert_eq!(body["subtotal"], "50.00");
    assert_eq!(body["total"], "50.00");
}

#[tokio::test]
async fn test_quote_unknown_tour() {
    let app = TestApp::new().await;
    let (tenant_id, _) = seed(&app, "missing", "100.00").await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/v1/{}/bookings/quote", tenant_id))
                .header("Content-Type", "application/json")
                .body(Body::from(
                    json!({"tour_id": "does-not-exist", "adult_count": 1}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
