//! Integration tests for the continuity detection and review endpoints.
//!
//! Every test runs the full router against a fresh database.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get, post_empty, post_json};
use kino_core::continuity::{ConflictFinding, ConflictType, DetectionScope, Severity};
use kino_core::types::FilmId;
use kino_db::models::conflict::ConflictFilter;
use kino_db::models::film::CreateFilm;
use kino_db::models::identity_token::CreateIdentityToken;
use kino_db::models::shot::CreateShot;
use kino_db::models::style_contract::CreateStyleContract;
use kino_db::models::wardrobe_assignment::CreateWardrobeAssignment;
use kino_db::repositories::{
    ConflictRepo, FilmRepo, IdentityTokenRepo, ShotRepo, StyleContractRepo,
    WardrobeAssignmentRepo,
};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

const DETECT: &str = "/api/v1/continuity/detect";

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

async fn new_film(pool: &PgPool) -> FilmId {
    FilmRepo::create(
        pool,
        &CreateFilm {
            title: "Night Ferry".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

async fn publish_contracts(pool: &PgPool, film_id: FilmId, count: usize) {
    for _ in 0..count {
        StyleContractRepo::create(
            pool,
            &CreateStyleContract {
                film_id,
                rules: None,
            },
        )
        .await
        .unwrap();
    }
}

async fn new_shot(
    pool: &PgPool,
    film_id: FilmId,
    scene_number: i32,
    prompt: &str,
    version: i32,
) -> i64 {
    ShotRepo::create(
        pool,
        &CreateShot {
            film_id,
            scene_number,
            prompt: Some(prompt.to_string()),
            style_contract_version: Some(version),
        },
    )
    .await
    .unwrap()
    .id
}

async fn new_wardrobe(pool: &PgPool, film_id: FilmId, scene_number: i32, who: &str, item: &str) {
    WardrobeAssignmentRepo::create(
        pool,
        &CreateWardrobeAssignment {
            film_id,
            scene_number,
            character_name: who.to_string(),
            clothing_item: item.to_string(),
        },
    )
    .await
    .unwrap();
}

/// Seed a stale unresolved conflict left over from an earlier pass.
async fn seed_stale_conflict(pool: &PgPool, film_id: FilmId, scene_number: i32) -> i64 {
    let stale = ConflictFinding {
        scene_number,
        shot_id: None,
        conflict_type: ConflictType::WardrobeMismatch,
        severity: Severity::Warning,
        description: "stale finding from an earlier pass".to_string(),
    };
    let result = ConflictRepo::replace_in_scope(
        pool,
        &DetectionScope::scene(film_id, scene_number),
        &[stale],
    )
    .await
    .unwrap();
    result.inserted[0].id
}

/// The scene-3 production state: one shot on contract v2 while v3 is
/// current, a dirty CHAR_A referenced by that shot, and LARA in two coats.
async fn seed_scene_three(pool: &PgPool, film_id: FilmId) -> i64 {
    publish_contracts(pool, film_id, 3).await;
    let shot_id = new_shot(pool, film_id, 3, "{{CHAR_A}} boards the ferry at dusk", 2).await;
    IdentityTokenRepo::create(
        pool,
        &CreateIdentityToken {
            film_id,
            reference_code: "CHAR_A".to_string(),
            display_name: "Lara".to_string(),
            asset_type: "character".to_string(),
            dirty: Some(true),
        },
    )
    .await
    .unwrap();
    new_wardrobe(pool, film_id, 3, "LARA", "red coat").await;
    new_wardrobe(pool, film_id, 3, "LARA", "blue coat").await;
    shot_id
}

fn conflict_types(json: &serde_json::Value) -> Vec<String> {
    json["conflicts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["conflict_type"].as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Request validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_film_id_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, DETECT, json!({ "scene_number": 3 })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "film_id is required");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn empty_film_id_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, DETECT, json!({ "film_id": "" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "film_id is required");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn request_without_body_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_empty(app, DETECT).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "film_id is required");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn empty_json_body_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let request = Request::builder()
        .method(Method::POST)
        .uri(DETECT)
        .header("content-type", "application/json")
        .header("authorization", common::bearer(1))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "film_id is required");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn null_body_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, DETECT, serde_json::Value::Null).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "film_id is required");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_film_id_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, DETECT, json!({ "film_id": "reel-7" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn detect_without_token_returns_401(pool: PgPool) {
    let film_id = new_film(&pool).await;
    let app = common::build_test_app(pool);
    let request = Request::builder()
        .method(Method::POST)
        .uri(DETECT)
        .header("content-type", "application/json")
        .body(Body::from(json!({ "film_id": film_id }).to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Detection passes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn scope_without_shots_reports_nothing_and_writes_nothing(pool: PgPool) {
    let film_id = new_film(&pool).await;
    let stale_id = seed_stale_conflict(&pool, film_id, 3).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, DETECT, json!({ "film_id": film_id, "scene_number": 3 })).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["conflicts"], json!([]));
    assert_eq!(json["summary"], "No shots to analyze");

    // The stale conflict is untouched since nothing was evaluated.
    let stale = ConflictRepo::find_by_id(&pool, stale_id).await.unwrap();
    assert!(stale.is_some());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn scene_pass_reports_all_three_rules_and_replaces_stale(pool: PgPool) {
    let film_id = new_film(&pool).await;
    let shot_id = seed_scene_three(&pool, film_id).await;
    let stale_id = seed_stale_conflict(&pool, film_id, 3).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, DETECT, json!({ "film_id": film_id, "scene_number": 3 })).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        conflict_types(&json),
        vec!["style_drift", "character_drift", "wardrobe_mismatch"]
    );
    assert_eq!(
        json["summary"],
        "Found 3 continuity conflicts (1 style_drift, 1 character_drift, 1 wardrobe_mismatch)"
    );

    let conflicts = json["conflicts"].as_array().unwrap();
    assert_eq!(conflicts[0]["shot_id"], shot_id);
    assert_eq!(conflicts[0]["severity"], "warning");
    assert!(conflicts[0]["description"].as_str().unwrap().contains("v2"));
    assert!(conflicts[0]["description"].as_str().unwrap().contains("v3"));
    assert_eq!(conflicts[1]["shot_id"], shot_id);
    assert_eq!(conflicts[1]["severity"], "error");
    assert!(conflicts[1]["description"].as_str().unwrap().contains("Lara"));
    assert_eq!(conflicts[2]["shot_id"], serde_json::Value::Null);
    assert!(conflicts[2]["description"].as_str().unwrap().contains("LARA"));
    for c in conflicts {
        assert_eq!(c["scene_number"], 3);
        assert_eq!(c["resolved"], false);
    }

    assert!(ConflictRepo::find_by_id(&pool, stale_id).await.unwrap().is_none());

    let stored = ConflictRepo::list_by_film(&pool, film_id, &ConflictFilter::default())
        .await
        .unwrap();
    assert_eq!(stored.len(), 3);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn repeated_pass_yields_same_conflicts(pool: PgPool) {
    let film_id = new_film(&pool).await;
    seed_scene_three(&pool, film_id).await;
    let body = json!({ "film_id": film_id, "scene_number": 3 });

    let first = body_json(
        post_json(common::build_test_app(pool.clone()), DETECT, body.clone()).await,
    )
    .await;
    let second = body_json(
        post_json(common::build_test_app(pool.clone()), DETECT, body).await,
    )
    .await;

    assert_eq!(conflict_types(&first), conflict_types(&second));
    assert_eq!(first["summary"], second["summary"]);

    let stored = ConflictRepo::list_by_film(&pool, film_id, &ConflictFilter::default())
        .await
        .unwrap();
    assert_eq!(stored.len(), 3);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn scene_pass_leaves_other_scenes_alone(pool: PgPool) {
    let film_id = new_film(&pool).await;
    seed_scene_three(&pool, film_id).await;
    let scene_four = seed_stale_conflict(&pool, film_id, 4).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, DETECT, json!({ "film_id": film_id, "scene_number": 3 })).await;
    assert_eq!(response.status(), StatusCode::OK);

    assert!(ConflictRepo::find_by_id(&pool, scene_four).await.unwrap().is_some());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn clean_scope_clears_prior_conflicts(pool: PgPool) {
    let film_id = new_film(&pool).await;
    publish_contracts(&pool, film_id, 1).await;
    new_shot(&pool, film_id, 5, "An empty harbour", 1).await;
    let stale_id = seed_stale_conflict(&pool, film_id, 5).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, DETECT, json!({ "film_id": film_id, "scene_number": 5 })).await;

    let json = body_json(response).await;
    assert_eq!(json["conflicts"], json!([]));
    assert_eq!(json["summary"], "No continuity conflicts detected");
    assert!(ConflictRepo::find_by_id(&pool, stale_id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn resolved_conflict_is_kept_and_not_raised_again(pool: PgPool) {
    let film_id = new_film(&pool).await;
    seed_scene_three(&pool, film_id).await;
    let body = json!({ "film_id": film_id, "scene_number": 3 });

    let first = body_json(
        post_json(common::build_test_app(pool.clone()), DETECT, body.clone()).await,
    )
    .await;
    let wardrobe_id = first["conflicts"][2]["id"].as_i64().unwrap();
    let response = post_empty(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/conflicts/{wardrobe_id}/resolve"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let second = body_json(
        post_json(common::build_test_app(pool.clone()), DETECT, body).await,
    )
    .await;

    assert_eq!(conflict_types(&second), vec!["style_drift", "character_drift"]);
    let resolved = ConflictRepo::find_by_id(&pool, wardrobe_id).await.unwrap().unwrap();
    assert!(resolved.resolved);
    assert_eq!(resolved.resolved_by, Some(1));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn resolving_one_repeated_reference_keeps_the_other(pool: PgPool) {
    let film_id = new_film(&pool).await;
    publish_contracts(&pool, film_id, 1).await;
    new_shot(&pool, film_id, 6, "{{CHAR_A}} looks at {{CHAR_A}}", 1).await;
    IdentityTokenRepo::create(
        &pool,
        &CreateIdentityToken {
            film_id,
            reference_code: "CHAR_A".to_string(),
            display_name: "Lara".to_string(),
            asset_type: "character".to_string(),
            dirty: Some(true),
        },
    )
    .await
    .unwrap();
    let body = json!({ "film_id": film_id, "scene_number": 6 });

    let first = body_json(
        post_json(common::build_test_app(pool.clone()), DETECT, body.clone()).await,
    )
    .await;
    assert_eq!(conflict_types(&first), vec!["character_drift", "character_drift"]);
    let resolved_id = first["conflicts"][0]["id"].as_i64().unwrap();
    ConflictRepo::resolve(&pool, resolved_id, 1).await.unwrap().unwrap();

    for _ in 0..2 {
        let next = body_json(
            post_json(common::build_test_app(pool.clone()), DETECT, body.clone()).await,
        )
        .await;
        assert_eq!(conflict_types(&next), vec!["character_drift"]);
        assert_ne!(next["conflicts"][0]["id"].as_i64().unwrap(), resolved_id);
    }

    let all = ConflictRepo::list_by_film(
        &pool,
        film_id,
        &ConflictFilter {
            include_resolved: true,
            ..ConflictFilter::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all.iter().filter(|c| c.resolved).count(), 1);
}

// ---------------------------------------------------------------------------
// Review endpoints
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn list_filters_by_type(pool: PgPool) {
    let film_id = new_film(&pool).await;
    seed_scene_three(&pool, film_id).await;
    post_json(
        common::build_test_app(pool.clone()),
        DETECT,
        json!({ "film_id": film_id }),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = get(
        app,
        &format!("/api/v1/films/{film_id}/conflicts?conflict_type=character_drift"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["conflict_type"], "character_drift");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_rejects_unknown_type(pool: PgPool) {
    let film_id = new_film(&pool).await;
    let app = common::build_test_app(pool);
    let response = get(
        app,
        &format!("/api/v1/films/{film_id}/conflicts?conflict_type=lighting"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn resolving_twice_returns_409(pool: PgPool) {
    let film_id = new_film(&pool).await;
    let id = seed_stale_conflict(&pool, film_id, 2).await;
    let uri = format!("/api/v1/conflicts/{id}/resolve");

    let first = post_empty(common::build_test_app(pool.clone()), &uri).await;
    assert_eq!(first.status(), StatusCode::OK);
    let json = body_json(first).await;
    assert_eq!(json["data"]["resolved"], true);

    let second = post_empty(common::build_test_app(pool), &uri).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn resolving_missing_conflict_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_empty(app, "/api/v1/conflicts/999999/resolve").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
