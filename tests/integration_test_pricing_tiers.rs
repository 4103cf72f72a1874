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

/// Creates a tenant plus one tour and returns (tenant_id, tour_slug).
async fn seed_tour(app: &TestApp, suffix: &str) -> (String, String) {
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
                        "name": format!("Tiers {}", suffix),
                        "slug": format!("tiers-{}", suffix)
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

    let slug = format!("kayak-{}", suffix);
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
                        "slug": slug,
                        "name": "Kayak Trip",
                        "timezone": "UTC",
                        "base_price": "80.00",
                        "duration_min": 180,
                        "max_participants": 8,
                        "available_weekdays": [0, 1, 2, 3, 4, 5, 6],
                        "departure_times": [{"time": "10:00", "label": "Late morning"}]
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    (tenant_id, slug)
}

async fn create_tier(app: &TestApp, tenant_id: &str, slug: &str, payload: Value) -> axum::response::Response {
    app.router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/v1/{}/tours/{}/pricing-tiers", tenant_id, slug))
                .header("Content-Type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn test_create_tier_defaults() {
    let app = TestApp::new().await;
    let (tenant_id, slug) = seed_tour(&app, "defaults").await;

    let response = create_tier(&app, &tenant_id, &slug, json!({"name": "adult"})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let tier = parse_body(response).await;

    assert_eq!(tier["name"], "adult");
    // Label falls back to the name when omitted.
    assert_eq!(tier["label"], "adult");
    assert!(tier["price"].is_null());
    assert_eq!(tier["counts_toward_capacity"], true);
    assert_eq!(tier["is_default"], false);
    assert_eq!(tier["active"], true);
}

#[tokio::test]
async fn test_tier_validation() {
    let app = TestApp::new().await;
    let (tenant_id, slug) = seed_tour(&app, "valid").await;

    let response = create_tier(&app, &tenant_id, &slug, json!({"name": "   "})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(response).await;
    assert_eq!(body["error"], "Tier name is required");

    let response = create_tier(
        &app,
        &tenant_id,
        &slug,
        json!({"name": "adult", "price": "free"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(response).await;
    assert_eq!(body["error"], "Invalid tier price");
}

#[tokio::test]
async fn test_active_tier_names_are_unique_per_tour() {
    let app = TestApp::new().await;
    let (tenant_id, slug) = seed_tour(&app, "unique").await;

    let response = create_tier(&app, &tenant_id, &slug, json!({"name": "Adult", "price": "80"})).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Case-insensitive clash with the active tier.
    let response = create_tier(&app, &tenant_id, &slug, json!({"name": "ADULT"})).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = parse_body(response).await;
    assert_eq!(
        body["error"],
        "An active tier named 'ADULT' already exists for this tour"
    );

    // An inactive duplicate is allowed.
    let response = create_tier(
        &app,
        &tenant_id,
        &slug,
        json!({"name": "Adult", "active": false}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let dormant = parse_body(response).await;

    // Reactivating it clashes again.
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!(
                    "/api/v1/{}/pricing-tiers/{}",
                    tenant_id,
                    dormant["id"].as_str().unwrap()
                ))
                .header("Content-Type", "application/json")
                .body(Body::from(json!({"active": true}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_update_tier_keeps_own_name() {
    let app = TestApp::new().await;
    let (tenant_id, slug) = seed_tour(&app, "own-name").await;

    let response = create_tier(&app, &tenant_id, &slug, json!({"name": "Child", "price": "40"})).await;
    let tier = parse_body(response).await;

    // Updating a tier without renaming it must not clash with itself.
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!(
                    "/api/v1/{}/pricing-tiers/{}",
                    tenant_id,
                    tier["id"].as_str().unwrap()
                ))
                .header("Content-Type", "application/json")
                .body(Body::from(json!({"price": "45.50", "max_age": 12}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_body(response).await;
    assert_eq!(body["price"], "45.50");
    assert_eq!(body["max_age"], 12);
    assert_eq!(body["name"], "Child");
}

#[tokio::test]
async fn test_only_one_default_tier() {
    let app = TestApp::new().await;
    let (tenant_id, slug) = seed_tour(&app, "default-flag").await;

    let response = create_tier(
        &app,
        &tenant_id,
        &slug,
        json!({"name": "Adult", "is_default": true}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = create_tier(
        &app,
        &tenant_id,
        &slug,
        json!({"name": "Senior", "is_default": true}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/{}/tours/{}/pricing-tiers", tenant_id, slug))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let tiers = parse_body(response).await;
    let defaults: Vec<&Value> = tiers
        .as_array()
        .unwrap()
        .iter()
        .filter(|t| t["is_default"] == true)
        .collect();
    assert_eq!(defaults.len(), 1);
    assert_eq!(defaults[0]["name"], "Senior");
}

#[tokio::test]
async fn test_delete_tier() {
    let app = TestApp::new().await;
    let (tenant_id, slug) = seed_tour(&app, "delete").await;

    let response = create_tier(&app, &tenant_id, &slug, json!({"name": "Infant"})).await;
    let tier = parse_body(response).await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!(
                    "/api/v1/{}/pricing-tiers/{}",
                    tenant_id,
                    tier["id"].as_str().unwrap()
                ))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/{}/tours/{}/pricing-tiers", tenant_id, slug))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let tiers = parse_body(response).await;
    assert_eq!(tiers.as_array().unwrap().len(), 0);
}
