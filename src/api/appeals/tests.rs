use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::domain::types::UserRole;
use crate::test_support::{self, TestContext};

async fn create_draft(ctx: &TestContext, token: &str, paper_id: Option<&str>) -> String {
    let body = paper_id.map(|id| json!({ "paper_id": id }));
    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/appeals/drafts",
            Some(token),
            body,
        ))
        .await
        .expect("create draft");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::CREATED, "response: {body}");
    body["id"].as_str().expect("draft id").to_string()
}

async fn post_ok(ctx: &TestContext, token: &str, uri: &str) -> serde_json::Value {
    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::POST, uri, Some(token), None))
        .await
        .expect("post");
    let status = response.status();
    let body = test_support::read_json(response).await;
    assert!(status.is_success(), "POST {uri}: {status} {body}");
    body
}

#[tokio::test]
async fn wizard_flow_submits_an_appeal() {
    let ctx = test_support::setup_test_context().await;
    let token = test_support::bearer_for_role(UserRole::Student, ctx.state.settings());

    let draft_id = create_draft(&ctx, &token, Some("paper-2026-001")).await;
    let base = format!("/api/v1/appeals/drafts/{draft_id}");

    post_ok(&ctx, &token, &format!("{base}/questions/1a")).await;
    let after_questions = post_ok(&ctx, &token, &format!("{base}/questions/2a")).await;
    assert_eq!(after_questions["question_ids"], json!(["1a", "2a"]));
    assert_eq!(after_questions["fee_quote"]["amount"], 40);

    let on_grounds = post_ok(&ctx, &token, &format!("{base}/advance")).await;
    assert_eq!(on_grounds["step"], "select_grounds");

    post_ok(&ctx, &token, &format!("{base}/grounds/marking_error")).await;

    let evidence = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::PUT,
            &format!("{base}/evidence"),
            Some(&token),
            Some(json!({ "evidence_text": "The substitution in 2a follows the scheme." })),
        ))
        .await
        .expect("evidence");
    assert_eq!(evidence.status(), StatusCode::OK);

    let on_review = post_ok(&ctx, &token, &format!("{base}/advance")).await;
    assert_eq!(on_review["step"], "review_and_submit");
    assert_eq!(on_review["fee_quote"]["amount"], 40);
    assert_eq!(on_review["fee_quote"]["currency"], "EUR");

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            &format!("{base}/submit"),
            Some(&token),
            None,
        ))
        .await
        .expect("submit");

    let status = response.status();
    let appeal = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::CREATED, "response: {appeal}");
    assert_eq!(appeal["status"], "submitted");
    assert_eq!(appeal["student_id"], "demo-student");
    assert_eq!(appeal["question_ids"], json!(["1a", "2a"]));
    assert_eq!(appeal["grounds"], json!(["marking_error"]));
    assert_eq!(appeal["fees"]["amount"], 40);
    assert_eq!(appeal["fees"]["paid"], true);
    assert_eq!(appeal["version"], 1);

    // The frozen draft points at the appeal it became.
    let draft = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::GET, &base, Some(&token), None))
        .await
        .expect("draft");
    let draft_body = test_support::read_json(draft).await;
    assert_eq!(draft_body["submitted_appeal_id"], appeal["id"]);
}

#[tokio::test]
async fn advance_requires_a_selection() {
    let ctx = test_support::setup_test_context().await;
    let token = test_support::bearer_for_role(UserRole::Student, ctx.state.settings());

    let draft_id = create_draft(&ctx, &token, None).await;
    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            &format!("/api/v1/appeals/drafts/{draft_id}/advance"),
            Some(&token),
            None,
        ))
        .await
        .expect("advance");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = test_support::read_json(response).await;
    assert!(body["detail"].as_str().unwrap_or("").contains("at least one question"));
}

#[tokio::test]
async fn going_back_preserves_selections() {
    let ctx = test_support::setup_test_context().await;
    let token = test_support::bearer_for_role(UserRole::Student, ctx.state.settings());

    let draft_id = create_draft(&ctx, &token, None).await;
    let base = format!("/api/v1/appeals/drafts/{draft_id}");

    post_ok(&ctx, &token, &format!("{base}/questions/1b")).await;
    post_ok(&ctx, &token, &format!("{base}/advance")).await;
    post_ok(&ctx, &token, &format!("{base}/grounds/alternative_method")).await;

    let back = post_ok(&ctx, &token, &format!("{base}/back")).await;
    assert_eq!(back["step"], "select_questions");
    assert_eq!(back["question_ids"], json!(["1b"]));

    let forward = post_ok(&ctx, &token, &format!("{base}/advance")).await;
    assert_eq!(forward["grounds"], json!(["alternative_method"]));
}

#[tokio::test]
async fn double_toggle_deselects() {
    let ctx = test_support::setup_test_context().await;
    let token = test_support::bearer_for_role(UserRole::Student, ctx.state.settings());

    let draft_id = create_draft(&ctx, &token, None).await;
    let base = format!("/api/v1/appeals/drafts/{draft_id}");

    post_ok(&ctx, &token, &format!("{base}/questions/1a")).await;
    let deselected = post_ok(&ctx, &token, &format!("{base}/questions/1a")).await;
    assert_eq!(deselected["question_ids"], json!([]));
}

#[tokio::test]
async fn unknown_question_and_ground_are_rejected() {
    let ctx = test_support::setup_test_context().await;
    let token = test_support::bearer_for_role(UserRole::Student, ctx.state.settings());

    let draft_id = create_draft(&ctx, &token, None).await;
    let base = format!("/api/v1/appeals/drafts/{draft_id}");

    let question = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            &format!("{base}/questions/9z"),
            Some(&token),
            None,
        ))
        .await
        .expect("toggle");
    assert_eq!(question.status(), StatusCode::BAD_REQUEST);

    post_ok(&ctx, &token, &format!("{base}/questions/1a")).await;
    post_ok(&ctx, &token, &format!("{base}/advance")).await;

    let ground = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            &format!("{base}/grounds/bribery"),
            Some(&token),
            None,
        ))
        .await
        .expect("toggle ground");
    assert_eq!(ground.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn submitted_draft_is_frozen() {
    let ctx = test_support::setup_test_context().await;
    let token = test_support::bearer_for_role(UserRole::Student, ctx.state.settings());

    let draft_id = create_draft(&ctx, &token, None).await;
    let base = format!("/api/v1/appeals/drafts/{draft_id}");

    post_ok(&ctx, &token, &format!("{base}/questions/2b")).await;
    post_ok(&ctx, &token, &format!("{base}/advance")).await;
    post_ok(&ctx, &token, &format!("{base}/grounds/unclear_question")).await;
    post_ok(&ctx, &token, &format!("{base}/advance")).await;
    post_ok(&ctx, &token, &format!("{base}/submit")).await;

    let again = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            &format!("{base}/submit"),
            Some(&token),
            None,
        ))
        .await
        .expect("second submit");
    assert_eq!(again.status(), StatusCode::CONFLICT);

    let back = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            &format!("{base}/back"),
            Some(&token),
            None,
        ))
        .await
        .expect("back after submit");
    assert_eq!(back.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn fee_is_flat_regardless_of_question_count() {
    let ctx = test_support::setup_test_context().await;
    let token = test_support::bearer_for_role(UserRole::Student, ctx.state.settings());

    let draft_id = create_draft(&ctx, &token, None).await;
    let base = format!("/api/v1/appeals/drafts/{draft_id}");

    let one = post_ok(&ctx, &token, &format!("{base}/questions/1a")).await;
    post_ok(&ctx, &token, &format!("{base}/questions/1b")).await;
    post_ok(&ctx, &token, &format!("{base}/questions/2a")).await;
    let four = post_ok(&ctx, &token, &format!("{base}/questions/2b")).await;

    assert_eq!(one["fee_quote"]["amount"], 40);
    assert_eq!(four["fee_quote"]["amount"], 40);
    assert_eq!(four["fee_quote"]["question_count"], 4);
}

#[tokio::test]
async fn document_upload_enforces_the_allowlist() {
    let ctx = test_support::setup_test_context().await;
    let token = test_support::bearer_for_role(UserRole::Student, ctx.state.settings());

    let draft_id = create_draft(&ctx, &token, None).await;
    let base = format!("/api/v1/appeals/drafts/{draft_id}");

    post_ok(&ctx, &token, &format!("{base}/questions/1a")).await;
    post_ok(&ctx, &token, &format!("{base}/advance")).await;

    let rejected = ctx
        .app
        .clone()
        .oneshot(test_support::multipart_request(
            Method::POST,
            &format!("{base}/documents"),
            Some(&token),
            "macro.exe",
            "application/octet-stream",
            b"MZ",
        ))
        .await
        .expect("upload exe");
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);

    let accepted = ctx
        .app
        .clone()
        .oneshot(test_support::multipart_request(
            Method::POST,
            &format!("{base}/documents"),
            Some(&token),
            "workings.pdf",
            "application/pdf",
            b"%PDF-1.7 demo",
        ))
        .await
        .expect("upload pdf");

    let status = accepted.status();
    let body = test_support::read_json(accepted).await;
    assert_eq!(status, StatusCode::CREATED, "response: {body}");
    let documents = body["documents"].as_array().expect("documents");
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0]["filename"], "workings.pdf");
    assert_eq!(documents[0]["sha256"].as_str().map(str::len), Some(64));
}

#[tokio::test]
async fn documents_belong_to_the_grounds_step() {
    let ctx = test_support::setup_test_context().await;
    let token = test_support::bearer_for_role(UserRole::Student, ctx.state.settings());

    let draft_id = create_draft(&ctx, &token, None).await;
    let response = ctx
        .app
        .clone()
        .oneshot(test_support::multipart_request(
            Method::POST,
            &format!("/api/v1/appeals/drafts/{draft_id}/documents"),
            Some(&token),
            "workings.pdf",
            "application/pdf",
            b"%PDF-1.7 demo",
        ))
        .await
        .expect("upload on wrong step");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn roles_without_initiate_permission_cannot_start_a_draft() {
    let ctx = test_support::setup_test_context().await;
    let token = test_support::bearer_for_role(UserRole::TeacherExaminer, ctx.state.settings());

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/appeals/drafts",
            Some(&token),
            None,
        ))
        .await
        .expect("create draft");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn drafts_are_private_to_their_owner() {
    let ctx = test_support::setup_test_context().await;
    let student = test_support::bearer_for_role(UserRole::Student, ctx.state.settings());
    let parent = test_support::bearer_for_role(UserRole::Parent, ctx.state.settings());

    let draft_id = create_draft(&ctx, &student, None).await;
    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            &format!("/api/v1/appeals/drafts/{draft_id}"),
            Some(&parent),
            None,
        ))
        .await
        .expect("foreign draft");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn catalogs_list_questions_and_grounds() {
    let ctx = test_support::setup_test_context().await;
    let token = test_support::bearer_for_role(UserRole::Student, ctx.state.settings());

    let questions = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/v1/appeals/catalog/questions",
            Some(&token),
            None,
        ))
        .await
        .expect("questions");
    assert_eq!(questions.status(), StatusCode::OK);
    let questions = test_support::read_json(questions).await;
    assert_eq!(questions.as_array().map(Vec::len), Some(4));

    let grounds = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/v1/appeals/catalog/grounds",
            Some(&token),
            None,
        ))
        .await
        .expect("grounds");
    assert_eq!(grounds.status(), StatusCode::OK);
    let grounds = test_support::read_json(grounds).await;
    let grounds = grounds.as_array().expect("ground list");
    assert_eq!(grounds.len(), 5);
    assert!(grounds.iter().any(|ground| ground["code"] == "marking_error"));
}
