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

async fn create_tenant(app: &TestApp, suffix: &str) -> String {
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
                        "name": format!("Settings {}", suffix),
                        "slug": format!("settings-{}", suffix)
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    parse_body(response).await["id"].as_str().unwrap().to_string()
}

async fn get_settings(app: &TestApp, tenant_id: &str) -> Value {
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/{}/settings", tenant_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    parse_body(response).await
}

async fn put_settings(app: &TestApp, tenant_id: &str, payload: Value) -> axum::response::Response {
    app.router
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
        .unwrap()
}

#[tokio::test]
async fn test_first_read_creates_defaults() {
    let app = TestApp::new().await;
    let tenant_id = create_tenant(&app, "defaults").await;

    let settings = get_settings(&app, &tenant_id).await;

    let methods: Vec<String> =
        serde_json::from_str(settings["payment_methods"].as_str().unwrap()).unwrap();
    assert_eq!(methods, vec!["cash", "card", "bank_transfer"]);
    assert_eq!(settings["allow_online_payment"], false);
    assert_eq!(settings["allow_partial_payment"], true);
    assert_eq!(settings["payment_link_expiry_hours"], 48);
    assert_eq!(settings["payment_reminder_hours"], 24);
    assert_eq!(settings["refund_deadline_hours"], 48);
    assert_eq!(settings["tax_enabled"], false);
    assert_eq!(settings["tax_name"], "Tax");
    assert_eq!(settings["tax_rate"], "0");
    assert_eq!(settings["prices_include_tax"], false);
    assert_eq!(settings["deposit_enabled"], false);
    assert_eq!(settings["deposit_type"], "percentage");
    assert_eq!(settings["deposit_due_days"], 7);

    // The same row comes back on the next read.
    let again = get_settings(&app, &tenant_id).await;
    assert_eq!(again["id"], settings["id"]);
}

#[tokio::test]
async fn test_partial_update_round_trips() {
    let app = TestApp::new().await;
    let tenant_id = create_tenant(&app, "partial").await;

    let response = put_settings(
        &app,
        &tenant_id,
        json!({
            "tax_enabled": true,
            "tax_name": "VAT",
            "tax_rate": "19",
            "deposit_enabled": true,
            "deposit_amount": "30",
            "deposit_due_days": 14
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = parse_body(response).await;
    assert_eq!(updated["tax_enabled"], true);
    assert_eq!(updated["tax_name"], "VAT");
    assert_eq!(updated["tax_rate"], "19");
    assert_eq!(updated["deposit_due_days"], 14);
    // Untouched fields keep their defaults.
    assert_eq!(updated["allow_partial_payment"], true);
    assert_eq!(updated["deposit_type"], "percentage");

    let persisted = get_settings(&app, &tenant_id).await;
    assert_eq!(persisted["tax_name"], "VAT");
    assert_eq!(persisted["deposit_amount"], "30");
}

#[tokio::test]
async fn test_settings_validation() {
    let app = TestApp::new().await;
    let tenant_id = create_tenant(&app, "valid").await;

    let cases = vec![
        (json!({"payment_methods": []}), "At least one payment method is required"),
        (json!({"payment_link_expiry_hours": -1}), "payment_link_expiry_hours cannot be negative"),
        (json!({"payment_reminder_hours": -2}), "payment_reminder_hours cannot be negative"),
        (json!({"refund_deadline_hours": -3}), "refund_deadline_hours cannot be negative"),
        (json!({"tax_rate": "many"}), "Invalid tax_rate"),
        (json!({"tax_rate": "-5"}), "Invalid tax_rate"),
        (json!({"deposit_type": "upfront"}), "Invalid deposit_type (percentage or fixed)"),
        (json!({"deposit_amount": "??"}), "Invalid deposit_amount"),
        (json!({"deposit_due_days": -1}), "deposit_due_days cannot be negative"),
    ];

    for (payload, message) in cases {
        let response = put_settings(&app, &tenant_id, payload).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = parse_body(response).await;
        assert_eq!(body["error"], message);
    }
}

#[tokio::test]
async fn test_tax_preview_exclusive_and_inclusive() {
    let app = TestApp::new().await;
    let tenant_id = create_tenant(&app, "preview").await;

    let response = put_settings(&app, &tenant_id, json!({"tax_rate": "19"})).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Saved rate, exclusive prices: tax goes on top.
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/v1/{}/settings/tax-preview", tenant_id))
                .header("Content-Type", "application/json")
                .body(Body::from(json!({"price": "100.00"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_body(response).await;
    assert_eq!(body["subtotal"], "100.00");
    assert_eq!(body["tax"], "19.00");
    assert_eq!(body["total"], "119.00");

    // Overrides preview an unsaved inclusive configuration.
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/v1/{}/settings/tax-preview", tenant_id))
                .header("Content-Type", "application/json")
                .body(Body::from(
                    json!({
                        "price": "119.00",
                        "tax_rate": "19",
                        "prices_include_tax": true
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    let body = parse_body(response).await;
    assert_eq!(body["subtotal"], "100.00");
    assert_eq!(body["tax"], "19.00");
    assert_eq!(body["total"], "119.00");

    // A zero rate passes the price through untouched.
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/v1/{}/settings/tax-preview", tenant_id))
                .header("Content-Type", "application/json")
                .body(Body::from(
                    json!({"price": "80.00", "tax_rate": "0"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    let body = parse_body(response).await;
    assert_eq!(body["subtotal"], "80.00");
    assert_eq!(body["tax"], "0.00");
    assert_eq!(body["total"], "80.00");

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/v1/{}/settings/tax-preview", tenant_id))
                .header("Content-Type", "application/json")
                .body(Body::from(json!({"price": "a lot"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(response).await;
    assert_eq!(body["error"], "Invalid price");
}
