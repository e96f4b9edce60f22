//! Integration tests for the Observer API endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. This validates handler logic and routing
//! without needing a live network connection.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use lakesim_core::config::SimulationBoundsConfig;
use lakesim_core::fisherman::Fisherman;
use lakesim_core::lake::Lake;
use lakesim_core::operator::OperatorState;
use lakesim_core::runner::Simulation;
use lakesim_observer::router::build_router;
use lakesim_observer::state::{AppState, TickBroadcast};
use lakesim_world::{CaptureArea, LakeBounds, Plant};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde_json::Value;
use tower::ServiceExt;

const TICKS: u64 = 5;

fn make_simulation() -> Simulation {
    let mut rng = SmallRng::seed_from_u64(11);
    let mut lake = Lake::new(LakeBounds::new(800.0, 600.0).unwrap(), 50, 10, 500.0).unwrap();
    for _ in 0..6 {
        let position = lake.bounds().random_point(&mut rng);
        lake.spawn_fish(position, 100, &mut rng);
    }
    for _ in 0..4 {
        let position = lake.bounds().random_point(&mut rng);
        lake.add_plant(Plant::new(position));
    }
    let area = CaptureArea::from_origin_size(200.0, 150.0, 400.0, 350.0).unwrap();
    let fisherman = Fisherman::new(0.0, area).unwrap();
    Simulation::with_seed(lake, Some(fisherman), 11)
}

/// State after a few real ticks, copied the way the engine callback does.
async fn make_test_state(operator: Option<Arc<OperatorState>>) -> Arc<AppState> {
    let state = Arc::new(operator.map_or_else(AppState::new, AppState::with_operator));
    let mut sim = make_simulation();

    for _ in 0..TICKS {
        let _ = sim.step();
    }

    {
        let mut snap = state.snapshot.write().await;
        snap.lake = Some(sim.snapshot());
        snap.seasons = sim.lake().season_counters().clone();
        snap.series = sim.lake().time_series().clone();
        snap.current_tick = sim.lake().tick();
    }

    state
}

fn operator() -> Arc<OperatorState> {
    Arc::new(OperatorState::new(16, &SimulationBoundsConfig::default()))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// =========================================================================
// Read-only API
// =========================================================================

#[tokio::test]
async fn test_index_returns_html() {
    let state = make_test_state(None).await;
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

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
async fn test_get_snapshot() {
    let state = make_test_state(None).await;
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/api/snapshot").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["tick"], TICKS);
    assert_eq!(json["width"], 800.0);
    assert_eq!(json["fish"].as_array().unwrap().len(), 6);
    assert_eq!(json["capture_area"]["x2"], 600.0);
    assert_eq!(json["stats"]["fish_count"], 6);
}

#[tokio::test]
async fn test_get_snapshot_before_first_tick_is_404() {
    let router = build_router(Arc::new(AppState::new()));

    let response = router
        .oneshot(Request::get("/api/snapshot").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], 404);
}

#[tokio::test]
async fn test_get_stats() {
    let state = make_test_state(None).await;
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/api/stats").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["tick"], TICKS);
    assert_eq!(json["phase"], "Day");
    assert_eq!(json["stats"]["season"], "Spring");
    assert!(json["stats"]["oxygen_level"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn test_get_seasons_lists_all_four() {
    let state = make_test_state(None).await;
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/api/seasons").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    let seasons = json["seasons"].as_object().unwrap();
    assert_eq!(seasons.len(), 4);
    assert_eq!(json["total_caught"], 0);
}

#[tokio::test]
async fn test_get_series() {
    let state = make_test_state(None).await;
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/api/series").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["count"], TICKS);
    assert_eq!(json["points"][0]["tick"], 1);
}

#[tokio::test]
async fn test_get_series_since() {
    let state = make_test_state(None).await;
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/api/series?since=3").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["count"], 2);
    assert_eq!(json["points"][0]["tick"], 4);
}

#[tokio::test]
async fn test_get_series_bad_since_is_400() {
    let state = make_test_state(None).await;
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/api/series?since=soon").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_broadcast_channel() {
    let state = AppState::new();
    let mut rx = state.subscribe();
    let mut sim = make_simulation();

    let outcome = sim.step();
    let summary = TickBroadcast::from_step(&outcome, sim.lake().fish_count());

    let receivers = state.broadcast(&summary);
    assert_eq!(receivers, 1);

    let received = rx.recv().await.unwrap();
    assert_eq!(received.tick, 1);
    assert_eq!(received.fish_alive, 6);
    assert!(received.caught.is_none());
}

#[tokio::test]
async fn test_nonexistent_route_returns_404() {
    let state = make_test_state(None).await;
    let router = build_router(state);

    let response = router
        .oneshot(
            Request::get("/api/nonexistent")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =========================================================================
// Operator API
// =========================================================================

#[tokio::test]
async fn test_operator_without_state_is_500() {
    let state = make_test_state(None).await;
    let router = build_router(state);

    let response = router
        .oneshot(
            Request::post("/api/operator/pause")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_operator_pause_and_resume() {
    let operator = operator();
    let state = make_test_state(Some(Arc::clone(&operator))).await;

    let response = build_router(Arc::clone(&state))
        .oneshot(
            Request::post("/api/operator/pause")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(operator.is_paused());

    let response = build_router(state)
        .oneshot(
            Request::post("/api/operator/resume")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!operator.is_paused());
}

#[tokio::test]
async fn test_operator_speed() {
    let operator = operator();
    let state = make_test_state(Some(Arc::clone(&operator))).await;

    let response = build_router(state)
        .oneshot(
            Request::post("/api/operator/speed")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"tick_interval_ms": 250}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["previous_interval_ms"], 16);
    assert_eq!(json["new_interval_ms"], 250);
    assert_eq!(operator.tick_interval_ms(), 250);
}

#[tokio::test]
async fn test_operator_speed_rejects_zero() {
    let operator = operator();
    let state = make_test_state(Some(Arc::clone(&operator))).await;

    let response = build_router(state)
        .oneshot(
            Request::post("/api/operator/speed")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"tick_interval_ms": 0}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(operator.tick_interval_ms(), 16);
}

#[tokio::test]
async fn test_operator_status() {
    let state = make_test_state(Some(operator())).await;

    let response = build_router(state)
        .oneshot(
            Request::get("/api/operator/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["tick"], TICKS);
    assert_eq!(json["fish_alive"], 6);
    assert_eq!(json["paused"], false);
    assert!(json["end_reason"].is_null());
}

#[tokio::test]
async fn test_operator_stop() {
    let operator = operator();
    let state = make_test_state(Some(Arc::clone(&operator))).await;

    let response = build_router(state)
        .oneshot(
            Request::post("/api/operator/stop")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(operator.is_stop_requested());
}
