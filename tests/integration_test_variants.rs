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
                        "name": format!("Variants {}", suffix),
                        "slug": format!("variants-{}", suffix)
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

    let slug = format!("boat-{}", suffix);
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
                        "name": "Boat Cruise",
                        "timezone": "UTC",
                        "base_price": "100.00",
                        "duration_min": 90,
                        "max_participants": 20,
                        "available_weekdays": [0, 1, 2, 3, 4, 5, 6],
                        "departure_times": [{"time": "11:00"}]
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

async fn create_variant(
    app: &TestApp,
    tenant_id: &str,
    slug: &str,
    payload: Value,
) -> axum::response::Response {
    app.router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/v1/{}/tours/{}/variants", tenant_id, slug))
                .header("Content-Type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn test_create_variant_kinds() {
    let app = TestApp::new().await;
    let (tenant_id, slug) = seed_tour(&app, "kinds").await;

    for (kind, value) in [("absolute", "150"), ("percentage", "20"), ("addition", "25.50")] {
        let response = create_variant(
            &app,
            &tenant_id,
            &slug,
            json!({
                "name": format!("{} option", kind),
                "modifier_kind": kind,
                "modifier_value": value
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = parse_body(response).await;
        assert_eq!(body["modifier_kind"], kind);
        assert_eq!(body["modifier_value"], value);
        assert_eq!(body["active"], true);
    }

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/{}/tours/{}/variants", tenant_id, slug))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let variants = parse_body(response).await;
    assert_eq!(variants.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_variant_validation() {
    let app = TestApp::new().await;
    let (tenant_id, slug) = seed_tour(&app, "valid").await;

    let response = create_variant(
        &app,
        &tenant_id,
        &slug,
        json!({"name": "Sunset", "modifier_kind": "discount", "modifier_value": "10"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(response).await;
    assert_eq!(
        body["error"],
        "Invalid modifier_kind (absolute, percentage or addition)"
    );

    let response = create_variant(
        &app,
        &tenant_id,
        &slug,
        json!({"name": "Sunset", "modifier_kind": "percentage", "modifier_value": "soon"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(response).await;
    assert_eq!(body["error"], "Invalid modifier_value");

    let response = create_variant(
        &app,
        &tenant_id,
        &slug,
        json!({"name": "", "modifier_kind": "percentage", "modifier_value": "10"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_variant_revalidates_modifier() {
    let app = TestApp::new().await;
    let (tenant_id, slug) = seed_tour(&app, "update").await;

    let response = create_variant(
        &app,
        &tenant_id,
        &slug,
        json!({"name": "Private", "modifier_kind": "percentage", "modifier_value": "50"}),
    )
    .await;
    let variant = parse_body(response).await;
    let variant_id = variant["id"].as_str().unwrap();

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/v1/{}/variants/{}", tenant_id, variant_id))
                .header("Content-Type", "application/json")
                .body(Body::from(
                    json!({"modifier_kind": "absolute", "modifier_value": "240"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_body(response).await;
    assert_eq!(body["modifier_kind"], "absolute");
    assert_eq!(body["modifier_value"], "240");

    // A kind swap that leaves a bad value behind is rejected.
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/v1/{}/variants/{}", tenant_id, variant_id))
                .header("Content-Type", "application/json")
                .body(Body::from(json!({"modifier_value": "n/a"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_variant() {
    let app = TestApp::new().await;
    let (tenant_id, slug) = seed_tour(&app, "delete").await;

    let response = create_variant(
        &app,
        &tenant_id,
        &slug,
        json!({"name": "Evening", "modifier_kind": "addition", "modifier_value": "15"}),
    )
    .await;
    let variant = parse_body(response).await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!(
                    "/api/v1/{}/variants/{}",
                    tenant_id,
                    variant["id"].as_str().unwrap()
                ))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_body(response).await;
    assert_eq!(body["status"], "deleted");

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!(
                    "/api/v1/{}/variants/{}",
                    tenant_id,
                    variant["id"].as_str().unwrap()
                ))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
