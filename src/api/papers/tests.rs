use axum::http::{Method, StatusCode};
use tower::ServiceExt;

use crate::domain::types::UserRole;
use crate::test_support;

#[tokio::test]
async fn students_list_their_own_papers() {
    let ctx = test_support::setup_test_context().await;
    let token = test_support::bearer_for_role(UserRole::Student, ctx.state.settings());

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::GET, "/api/v1/papers", Some(&token), None))
        .await
        .expect("list");

    assert_eq!(response.status(), StatusCode::OK);
    let body = test_support::read_json(response).await;
    assert_eq!(body["total"], 2);
    let items = body["items"].as_array().expect("items");
    assert!(items.iter().all(|paper| paper["student_id"] == "demo-student"));
}

#[tokio::test]
async fn marking_status_filter_narrows_the_list() {
    let ctx = test_support::setup_test_context().await;
    let token = test_support::bearer_for_role(UserRole::TeacherExaminer, ctx.state.settings());

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/v1/papers?marking_status=completed",
            Some(&token),
            None,
        ))
        .await
        .expect("list");

    let body = test_support::read_json(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["id"], "paper-2026-002");

    let bad = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/v1/papers?marking_status=lost",
            Some(&token),
            None,
        ))
        .await
        .expect("bad filter");
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn paper_detail_derives_risk_bands_from_confidence() {
    let ctx = test_support::setup_test_context().await;
    let token = test_support::bearer_for_role(UserRole::TeacherExaminer, ctx.state.settings());

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/v1/papers/paper-2026-001",
            Some(&token),
            None,
        ))
        .await
        .expect("paper");

    assert_eq!(response.status(), StatusCode::OK);
    let body = test_support::read_json(response).await;
    let responses = body["responses"].as_array().expect("responses");

    let confidence = |question: &str| {
        responses
            .iter()
            .find(|item| item["question_number"] == question)
            .and_then(|item| item["marking_decision"]["confidence"].as_object())
            .unwrap_or_else(|| panic!("confidence for {question}"))
            .clone()
    };

    let low = confidence("1a");
    assert_eq!(low["risk_level"], "low");
    assert_eq!(low["badge_variant"], "success");
    assert_eq!(low["review_required"], false);

    let medium = confidence("2a");
    assert_eq!(medium["risk_level"], "medium");
    assert_eq!(medium["badge_variant"], "warning");
    assert_eq!(medium["review_required"], true);

    let high = confidence("2b");
    assert_eq!(high["risk_level"], "high");
    assert_eq!(high["badge_variant"], "danger");
    assert_eq!(high["review_required"], true);

    let overridden = responses
        .iter()
        .find(|item| item["question_number"] == "1b")
        .expect("overridden response");
    assert_eq!(overridden["human_override"]["new_marks"], 5.0);
}

#[tokio::test]
async fn policy_makers_cannot_read_individual_papers() {
    let ctx = test_support::setup_test_context().await;
    let token = test_support::bearer_for_role(UserRole::PolicyMaker, ctx.state.settings());

    let list = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::GET, "/api/v1/papers", Some(&token), None))
        .await
        .expect("list");
    assert_eq!(list.status(), StatusCode::FORBIDDEN);

    let detail = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/v1/papers/paper-2026-001",
            Some(&token),
            None,
        ))
        .await
        .expect("detail");
    assert_eq!(detail.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn missing_paper_returns_404() {
    let ctx = test_support::setup_test_context().await;
    let token = test_support::bearer_for_role(UserRole::TeacherExaminer, ctx.state.settings());

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/v1/papers/paper-1999-404",
            Some(&token),
            None,
        ))
        .await
        .expect("paper");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
