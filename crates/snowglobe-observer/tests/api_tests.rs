//! Integration tests for the Observer API endpoints.
//!
//! Requests go straight into the Axum `Router` through
//! `tower::ServiceExt::oneshot`, with no TCP listener. No archive or
//! studio is attached, so routes that need them exercise the `503` path.

#![allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::arithmetic_side_effects)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde_json::{Value, json};
use snowglobe_core::config::SimulationConfig;
use snowglobe_core::tick::VillageState;
use snowglobe_observer::router::build_router;
use snowglobe_observer::state::AppState;
use snowglobe_world::{StartingVillageIds, create_starting_village};
use tokio::sync::RwLock;
use tower::ServiceExt;

fn make_test_state() -> (Arc<AppState>, StartingVillageIds) {
    let config = SimulationConfig::default();
    let mut rng = SmallRng::seed_from_u64(12);
    let (store, ids) =
        create_starting_village(config.world.bounds(), &config.placement, &mut rng).unwrap();
    let village = VillageState::new(&config, store).unwrap();
    let state = AppState::new(Arc::new(RwLock::new(village)), Arc::new(config));
    (Arc::new(state), ids)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(state: &Arc<AppState>, request: Request<Body>) -> Response {
    build_router(Arc::clone(state)).oneshot(request).await.unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::delete(uri).body(Body::empty()).unwrap()
}

async fn entity_count(state: &Arc<AppState>) -> usize {
    state.village.read().await.store.len()
}

// =========================================================================
// Status and rendering
// =========================================================================

#[tokio::test]
async fn test_index_returns_html() {
    let (state, _) = make_test_state();
    let response = send(&state, get("/")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.contains("text/html"));
}

#[tokio::test]
async fn test_get_village_renders_frame() {
    let (state, ids) = make_test_state();
    let response = send(&state, get("/api/village")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["tick"], 0);
    assert_eq!(json["year"], 2024);
    assert_eq!(json["width"], 800.0);
    let sprites = json["sprites"].as_array().unwrap();
    let house = sprites
        .iter()
        .find(|s| s["id"] == json!(ids.house))
        .unwrap();
    assert_eq!(house["icon"], "house");
}

#[tokio::test]
async fn test_list_entities() {
    let (state, _) = make_test_state();
    let expected = entity_count(&state).await;
    let response = send(&state, get("/api/village/entities")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["count"], expected);
    assert_eq!(json["entities"].as_array().unwrap().len(), expected);
}

// =========================================================================
// Placement
// =========================================================================

#[tokio::test]
async fn test_place_item_creates_entities() {
    let (state, _) = make_test_state();
    let before = entity_count(&state).await;

    let response = send(
        &state,
        post_json("/api/village/items", &json!({"item": "Family", "x": 400.0, "y": 250.0})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["ids"].as_array().unwrap().len(), 3);
    assert_eq!(entity_count(&state).await, before + 3);
}

#[tokio::test]
async fn test_tree_cap_rejects_eleventh_tree() {
    let (state, _) = make_test_state();
    let trees = |s: &VillageState| {
        s.store
            .count_where(|e| e.decoration_kind() == Some(snowglobe_types::DecorationKind::Tree))
    };
    loop {
        let present = trees(&*state.village.read().await);
        if present == 10 {
            break;
        }
        let response = send(
            &state,
            post_json("/api/village/items", &json!({"item": "Tree", "x": 100.0, "y": 100.0})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }
    let before = entity_count(&state).await;

    let response = send(
        &state,
        post_json("/api/village/items", &json!({"item": "Tree", "x": 100.0, "y": 100.0})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["error"], "Maximum of 10 Trees reached!");
    assert_eq!(json["status"], 409);
    assert_eq!(entity_count(&state).await, before);
}

#[tokio::test]
async fn test_unknown_palette_item_is_rejected() {
    let (state, _) = make_test_state();
    let response = send(
        &state,
        post_json("/api/village/items", &json!({"item": "Reindeer", "x": 1.0, "y": 1.0})),
    )
    .await;
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_remove_item_evicts_occupants() {
    let (state, ids) = make_test_state();
    let before = entity_count(&state).await;

    let response = send(&state, delete(&format!("/api/village/items/{}", ids.house))).await;

    assert_eq!(response.status(), StatusCode::OK);
    let village = state.village.read().await;
    assert_eq!(village.store.len(), before - 1);
    assert!(
        village
            .store
            .iter()
            .filter_map(|e| e.as_living())
            .all(|l| l.whereabouts.structure() != Some(ids.house))
    );
}

#[tokio::test]
async fn test_remove_item_invalid_uuid() {
    let (state, _) = make_test_state();
    let response = send(&state, delete("/api/village/items/not-a-uuid")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_remove_item_not_found() {
    let (state, _) = make_test_state();
    let uri = format!("/api/village/items/{}", uuid::Uuid::new_v4());
    let response = send(&state, delete(&uri)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_clear_village() {
    let (state, _) = make_test_state();
    let response = send(&state, Request::post("/api/village/clear").body(Body::empty()).unwrap()).await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(entity_count(&state).await, 0);
}

// =========================================================================
// Interiors
// =========================================================================

#[tokio::test]
async fn test_structure_interior_round_trip() {
    let (state, ids) = make_test_state();
    let base = format!("/api/village/structures/{}", ids.house);

    let response = send(
        &state,
        post_json(&format!("{base}/items"), &json!({"kind": "Fireplace", "x": 300.0, "y": 200.0})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let item_id = body_to_json(response.into_body()).await["id"]
        .as_str()
        .unwrap()
        .to_owned();

    let response = send(&state, get(&base)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["kind"], "House");
    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["icon"], "fireplace");

    let response = send(&state, delete(&format!("{base}/items/{item_id}"))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(send(&state, get(&base)).await.into_body()).await;
    assert!(json["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_entering_a_non_structure_is_rejected() {
    let (state, ids) = make_test_state();
    let person = ids.family[0];
    let response = send(&state, get(&format!("/api/village/structures/{person}"))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =========================================================================
// Archive
// =========================================================================

#[tokio::test]
async fn test_save_empty_village_is_rejected_before_archive() {
    let (state, _) = make_test_state();
    send(&state, Request::post("/api/village/clear").body(Body::empty()).unwrap()).await;

    let response = send(
        &state,
        Request::post("/api/village/save?title=Frosty")
            .body(Body::from(vec![0x89, b'P', b'N', b'G']))
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["error"], "Add something to your village before saving!");
}

#[tokio::test]
async fn test_save_without_title_is_rejected() {
    let (state, _) = make_test_state();
    let response = send(
        &state,
        Request::post("/api/village/save")
            .body(Body::from(vec![0x89, b'P', b'N', b'G']))
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["error"], "Please give your village a title!");
}

#[tokio::test]
async fn test_save_without_archive_is_unavailable() {
    let (state, _) = make_test_state();
    let response = send(
        &state,
        Request::post("/api/village/save?title=Frosty")
            .body(Body::from(vec![0x89, b'P', b'N', b'G']))
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_list_villages_without_archive_is_unavailable() {
    let (state, _) = make_test_state();
    let response = send(&state, get("/api/villages")).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], 503);
}

// =========================================================================
// Studio
// =========================================================================

#[tokio::test]
async fn test_generate_requires_description() {
    let (state, _) = make_test_state();
    let response = send(
        &state,
        post_json("/api/studio/generate", &json!({"description": "  ", "type": "song"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["error"], "Description is required");
}

#[tokio::test]
async fn test_generate_without_studio_is_unavailable() {
    let (state, _) = make_test_state();
    let response = send(
        &state,
        post_json("/api/studio/generate", &json!({"description": "a snowy owl"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
