//! HTTP-level integration tests for the review queue endpoints.

mod common;

use axum::http::StatusCode;
use common::{assert_error, body_json, get, post, post_json, put_json};
use sqlx::PgPool;

/// Create a source that feeds the review queue: in the aggregate, not
/// auto-approving.
async fn create_review_source(pool: &PgPool, name: &str) -> i64 {
    let id = common::create_source(common::build_test_app(pool.clone()), name).await;
    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/sources/{id}/flags/aggregate"),
        serde_json::json!({"value": true}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    id
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_review_queue_membership(pool: PgPool) {
    let review_id = create_review_source(&pool, "needs-review").await;
    let trusted_id = create_review_source(&pool, "trusted").await;
    put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/sources/{trusted_id}/flags/auto_approve"),
        serde_json::json!({"value": true}),
    )
    .await;

    common::insert_item(&pool, review_id, "reviewable", "complete").await;
    common::insert_item(&pool, trusted_id, "auto-approved", "complete").await;

    let response = get(common::build_test_app(pool), "/api/v1/review").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "reviewable");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_approve_removes_item_from_queue(pool: PgPool) {
    let source_id = create_review_source(&pool, "needs-review").await;
    let item_id = common::insert_item(&pool, source_id, "one", "complete").await;

    let response = post(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/review/{item_id}/approve"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["approved"], true);

    let response = get(common::build_test_app(pool), "/api/v1/review").await;
    let json = body_json(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_reject_marks_item_skipped(pool: PgPool) {
    let source_id = create_review_source(&pool, "needs-review").await;
    let item_id = common::insert_item(&pool, source_id, "one", "complete").await;

    let response = post(
        common::build_test_app(pool),
        &format!("/api/v1/review/{item_id}/reject"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "skipped");
    assert_eq!(json["data"]["approved"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_bulk_approve_reports_actual_count(pool: PgPool) {
    let source_id = create_review_source(&pool, "needs-review").await;
    let a = common::insert_item(&pool, source_id, "a", "complete").await;
    let b = common::insert_item(&pool, source_id, "b", "complete").await;

    // One real pair plus an ID that does not exist.
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/review/bulk-approve",
        serde_json::json!({"ids": [a, b, 999999]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["approved"], 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_bulk_approve_empty_ids_returns_400(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/review/bulk-approve",
        serde_json::json!({"ids": []}),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "BAD_REQUEST").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_review_queue_content_type_filter(pool: PgPool) {
    let source_id = create_review_source(&pool, "needs-review").await;
    let video = common::insert_item(&pool, source_id, "video", "complete").await;
    let article = common::insert_item(&pool, source_id, "article", "complete").await;
    for (id, content_type) in [(video, "video"), (article, "article")] {
        sqlx::query("UPDATE content_items SET content_type = $2 WHERE id = $1")
            .bind(id)
            .bind(content_type)
            .execute(&pool)
            .await
            .unwrap();
    }

    let response = get(
        common::build_test_app(pool),
        "/api/v1/review?content_type=video",
    )
    .await;
    let json = body_json(response).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "video");
}
