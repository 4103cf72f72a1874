mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Datelike, Duration, NaiveDate, Utc};
use common::TestApp;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// A month far enough ahead that none of its slots can have departed.
fn target_month() -> (i32, u32) {
    let base = Utc::now() + Duration::days(60);
    (base.year(), base.month())
}

fn day_of(year: i32, month: u32, day: u32) -> String {
    format!("{:04}-{:02}-{:02}", year, month, day)
}

async fn seed_tour(app: &TestApp, suffix: &str) -> (String, String, Value) {
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
                        "name": format!("Availability {}", suffix),
                        "slug": format!("availability-{}", suffix)
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

    let slug = format!("cave-{}", suffix);
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
                        "name": "Cave Expedition",
                        "timezone": "UTC",
                        "base_price": "75.00",
                        "duration_min": 180,
                        "max_participants": 8,
                        "available_weekdays": [0, 1, 2, 3, 4, 5, 6],
                        "departure_times": [
                            {"time": "09:00", "label": "Morning"},
                            {"time": "14:00"}
                        ]
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    let tour = parse_body(response).await;

    (tenant_id, slug, tour)
}

async fn create_schedule(app: &TestApp, tenant_id: &str, slug: &str, date: &str, time: &str, max: i32) {
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/v1/{}/tours/{}/schedules", tenant_id, slug))
                .header("Content-Type", "application/json")
                .body(Body::from(
                    json!({"date": date, "time": time, "max_participants": max}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

async fn fetch_month(app: &TestApp, tenant_id: &str, slug: &str, year: i32, month: u32) -> Value {
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!(
                    "/api/v1/{}/tours/{}/availability?year={}&month={}",
                    tenant_id, slug, year, month
                ))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    parse_body(response).await
}

fn find_day<'a>(body: &'a Value, date: &str) -> &'a Value {
    body["days"]
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["date"] == date)
        .unwrap()
}

#[tokio::test]
async fn test_month_view_slots_and_blackouts() {
    let app = TestApp::new().await;
    let (tenant_id, slug, _) = seed_tour(&app, "month").await;
    let (year, month) = target_month();

    let open_day = day_of(year, month, 10);
    let dark_day = day_of(year, month, 11);

    create_schedule(&app, &tenant_id, &slug, &open_day, "14:00", 8).await;
    create_schedule(&app, &tenant_id, &slug, &open_day, "09:00", 3).await;
    create_schedule(&app, &tenant_id, &slug, &dark_day, "09:00", 8).await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/v1/{}/tours/{}/blackouts", tenant_id, slug))
                .header("Content-Type", "application/json")
                .body(Body::from(
                    json!({"date": dark_day, "reason": "Flooded"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = fetch_month(&app, &tenant_id, &slug, year, month).await;
    assert_eq!(body["year"], year);
    assert_eq!(body["month"], month);

    let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
    let days_in_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1).unwrap()
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1).unwrap()
    }
    .signed_duration_since(first)
    .num_days();
    assert_eq!(body["days"].as_array().unwrap().len() as i64, days_in_month);

    // Slots come back sorted by time with their configured labels.
    let open = find_day(&body, &open_day);
    assert_eq!(open["selectable"], true);
    assert_eq!(open["is_blacked_out"], false);
    let slots = open["slots"].as_array().unwrap();
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0]["time"], "09:00");
    assert_eq!(slots[0]["label"], "Morning");
    assert_eq!(slots[0]["max_capacity"], 3);
    assert_eq!(slots[0]["spots_remaining"], 3);
    assert_eq!(slots[0]["available"], true);
    assert_eq!(slots[0]["almost_full"], true);
    assert_eq!(slots[1]["time"], "14:00");
    assert_eq!(slots[1]["label"], "14:00");
    assert_eq!(slots[1]["almost_full"], false);

    // A blackout suppresses the day even though a slot exists.
    let dark = find_day(&body, &dark_day);
    assert_eq!(dark["is_blacked_out"], true);
    assert_eq!(dark["selectable"], false);
    assert_eq!(dark["slots"][0]["available"], false);

    // A day with no schedule rows is simply not selectable.
    let empty = find_day(&body, &day_of(year, month, 12));
    assert_eq!(empty["selectable"], false);
    assert_eq!(empty["slots"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_bookings_consume_month_view_capacity() {
    let app = TestApp::new().await;
    let (tenant_id, slug, tour) = seed_tour(&app, "capacity").await;
    let (year, month) = target_month();
    let date = day_of(year, month, 15);

    create_schedule(&app, &tenant_id, &slug, &date, "09:00", 2).await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/v1/{}/customers", tenant_id))
                .header("Content-Type", "application/json")
                .body(Body::from(
                    json!({"name": "Jonas Beck", "email": "jonas@example.com"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    let customer = parse_body(response).await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/v1/{}/bookings", tenant_id))
                .header("Content-Type", "application/json")
                .body(Body::from(
                    json!({
                        "customer_id": customer["id"],
                        "tour_id": tour["id"],
                        "booking_date": date,
                        "booking_time": "09:00",
                        "adult_count": 2
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = fetch_month(&app, &tenant_id, &slug, year, month).await;
    let slot = &find_day(&body, &date)["slots"][0];
    assert_eq!(slot["spots_remaining"], 0);
    assert_eq!(slot["available"], false);
    assert_eq!(find_day(&body, &date)["selectable"], false);
}

#[tokio::test]
async fn test_month_view_validation() {
    let app = TestApp::new().await;
    let (tenant_id, slug, _) = seed_tour(&app, "valid").await;

    let cases = vec![
        (format!("/api/v1/{}/tours/{}/availability", tenant_id, slug), "year required"),
        (
            format!("/api/v1/{}/tours/{}/availability?year=2030", tenant_id, slug),
            "month required",
        ),
        (
            format!("/api/v1/{}/tours/{}/availability?year=soon&month=1", tenant_id, slug),
            "Invalid year",
        ),
        (
            format!("/api/v1/{}/tours/{}/availability?year=2030&month=13", tenant_id, slug),
            "Invalid month",
        ),
    ];

    for (uri, message) in cases {
        let response = app
            .router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = parse_body(response).await;
        assert_eq!(body["error"], message);
    }

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/{}/tours/nope/availability?year=2030&month=1", tenant_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_departure_times_endpoint() {
    let app = TestApp::new().await;
    let (tenant_id, slug, _) = seed_tour(&app, "departures").await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/{}/tours/{}/departure-times", tenant_id, slug))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_body(response).await;

    let times = body.as_array().unwrap();
    assert_eq!(times.len(), 2);
    assert_eq!(times[0]["time"], "09:00");
    assert_eq!(times[0]["label"], "Morning");
    assert_eq!(times[1]["time"], "14:00");
    assert!(times[1]["label"].is_null());
}
