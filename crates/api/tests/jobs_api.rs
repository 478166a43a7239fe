mod common;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use sitepulse_api::config::ViewMode;

#[tokio::test]
async fn list_returns_the_whole_table() {
    let (app, _) = common::build_test_app(ViewMode::Month).await;

    let response = common::get(&app, "/api/v1/jobs").await;
    let body = common::expect_json(response, StatusCode::OK).await;

    let jobs = body["data"].as_array().unwrap();
    assert_eq!(jobs.len(), 15);
    assert!(jobs.iter().all(|j| j["id"].is_string()));
}

#[tokio::test]
async fn search_filter_is_case_insensitive_contains() {
    let (app, _) = common::build_test_app(ViewMode::Month).await;

    let response = common::get(&app, "/api/v1/jobs?search=roof").await;
    let body = common::expect_json(response, StatusCode::OK).await;

    let jobs = body["data"].as_array().unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0]["name"], "Roofing");
}

#[tokio::test]
async fn status_filter_rejects_unknown_labels() {
    let (app, _) = common::build_test_app(ViewMode::Month).await;

    let response = common::get(&app, "/api/v1/jobs?status=Planned").await;
    let body = common::expect_json(response, StatusCode::OK).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 15);

    let response = common::get(&app, "/api/v1/jobs?status=Paused").await;
    let body = common::expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn create_appends_and_reads_back() {
    let (app, _) = common::build_test_app(ViewMode::Month).await;

    let response = common::post_json(
        &app,
        "/api/v1/jobs",
        json!({
            "name": "Retaining Wall",
            "start_date": "2024-10-01",
            "end_date": "2024-11-15",
            "estimated_cost": 32000.0,
            "status": "Planned",
            "project": "City Park Pavilion"
        }),
    )
    .await;
    let body = common::expect_json(response, StatusCode::CREATED).await;
    assert!(body["data"]["id"].is_string());
    assert_eq!(body["data"]["name"], "Retaining Wall");

    let response = common::get(&app, "/api/v1/jobs").await;
    let body = common::expect_json(response, StatusCode::OK).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 16);
}

#[tokio::test]
async fn rejected_submission_writes_nothing() {
    let (app, worksheet) = common::build_test_app(ViewMode::Month).await;

    // Same start and end date: a one-day job still needs end > start.
    let response = common::post_json(
        &app,
        "/api/v1/jobs",
        json!({
            "name": "Retaining Wall",
            "start_date": "2024-10-01",
            "end_date": "2024-10-01",
            "estimated_cost": 32000.0
        }),
    )
    .await;
    let body = common::expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["details"][0]["field"], "end_date");
    assert_eq!(worksheet.write_count(), 0);
}

#[tokio::test]
async fn every_violation_is_reported_at_once() {
    let (app, _) = common::build_test_app(ViewMode::Month).await;

    let response = common::post_json(
        &app,
        "/api/v1/jobs",
        json!({
            "name": "  ",
            "start_date": "2024-10-01",
            "end_date": "2024-10-01",
            "estimated_cost": -5.0,
            "estimated_duration": 0
        }),
    )
    .await;
    let body = common::expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(body["details"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn update_replaces_the_row_when_the_snapshot_matches() {
    let (app, _) = common::build_test_app(ViewMode::Month).await;

    let body = common::expect_json(
        common::get(&app, "/api/v1/jobs?search=Framing").await,
        StatusCode::OK,
    )
    .await;
    let record = body["data"][0].clone();
    let id = record["id"].as_str().unwrap().to_string();

    let response = common::put_json(
        &app,
        &format!("/api/v1/jobs/{id}"),
        json!({
            "expected": record,
            "draft": {
                "name": "Framing",
                "start_date": "2024-03-01",
                "end_date": "2024-04-15",
                "estimated_cost": 80000.0,
                "status": "In Progress",
                "project": "Residential Complex A"
            }
        }),
    )
    .await;
    let body = common::expect_json(response, StatusCode::OK).await;
    assert_eq!(body["data"]["estimated_cost"], 80000.0);
    assert_eq!(body["data"]["status"], "In Progress");
    assert_eq!(body["data"]["id"], id.as_str());

    let body = common::expect_json(
        common::get(&app, "/api/v1/jobs?search=Framing").await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(body["data"][0]["estimated_cost"], 80000.0);
}

#[tokio::test]
async fn update_with_a_stale_snapshot_conflicts() {
    let (app, _) = common::build_test_app(ViewMode::Month).await;

    let body = common::expect_json(
        common::get(&app, "/api/v1/jobs?search=Framing").await,
        StatusCode::OK,
    )
    .await;
    let mut record = body["data"][0].clone();
    let id = record["id"].as_str().unwrap().to_string();

    // The snapshot no longer matches what the sheet holds.
    record["estimated_cost"] = serde_json::json!(1.0);

    let response = common::put_json(
        &app,
        &format!("/api/v1/jobs/{id}"),
        json!({
            "expected": record,
            "draft": {
                "name": "Framing",
                "start_date": "2024-03-01",
                "end_date": "2024-04-15",
                "estimated_cost": 80000.0
            }
        }),
    )
    .await;
    let body = common::expect_json(response, StatusCode::CONFLICT).await;
    assert_eq!(body["code"], "STALE_WRITE");
}

#[tokio::test]
async fn delete_removes_the_row_once() {
    let (app, _) = common::build_test_app(ViewMode::Month).await;

    let body = common::expect_json(
        common::get(&app, "/api/v1/jobs?search=Landscaping").await,
        StatusCode::OK,
    )
    .await;
    let id = body["data"][0]["id"].as_str().unwrap().to_string();

    let response = common::delete(&app, &format!("/api/v1/jobs/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = common::delete(&app, &format!("/api/v1/jobs/{id}")).await;
    let body = common::expect_json(response, StatusCode::NOT_FOUND).await;
    assert_eq!(body["code"], "NOT_FOUND");

    let body = common::expect_json(common::get(&app, "/api/v1/jobs").await, StatusCode::OK).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 14);
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let (app, _) = common::build_test_app(ViewMode::Month).await;

    let response = common::delete(&app, &format!("/api/v1/jobs/{}", Uuid::new_v4())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
