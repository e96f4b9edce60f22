//! REST API endpoint handlers for the Observer server.
//!
//! All handlers read from the in-memory [`SimulationSnapshot`] via the
//! shared [`AppState`].
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/api/snapshot` | Latest lake snapshot |
//! | `GET` | `/api/stats` | Headline stats plus tick |
//! | `GET` | `/api/seasons` | Births and catches per season |
//! | `GET` | `/api/series` | Time series (`?since=N` for ticks after N) |
//!
//! [`SimulationSnapshot`]: crate::state::SimulationSnapshot

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse};

use crate::error::ObserverError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameter structs
// ---------------------------------------------------------------------------

/// Query parameters for the `GET /api/series` endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct SeriesQuery {
    /// Only return points with a tick strictly greater than this.
    pub since: Option<u64>,
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing server status and API links.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.snapshot.read().await;
    let tick = snapshot.current_tick;
    let (season, fish, food, oxygen) = snapshot.lake.as_ref().map_or_else(
        || (String::from("-"), 0, 0.0, 0.0),
        |lake| {
            (
                lake.stats.season.to_string(),
                lake.stats.fish_count,
                lake.stats.food_amount,
                lake.stats.oxygen_level,
            )
        },
    );

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Lake Observer</title>
    <style>
        body {{
            background: #0b1a24;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #4fb3d9; margin-bottom: 0.25rem; }}
        .metric {{
            display: inline-block;
            background: #122633;
            border: 1px solid #24475c;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 120px;
        }}
        .metric .label {{ color: #8b949e; font-size: 0.85rem; }}
        .metric .value {{ color: #4fb3d9; font-size: 1.5rem; font-weight: bold; }}
        a {{ color: #4fb3d9; text-decoration: none; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
        hr {{ border: none; border-top: 1px solid #24475c; margin: 1.5rem 0; }}
    </style>
</head>
<body>
    <h1>Lake Observer</h1>

    <div>
        <div class="metric">
            <div class="label">Tick</div>
            <div class="value">{tick}</div>
        </div>
        <div class="metric">
            <div class="label">Season</div>
            <div class="value">{season}</div>
        </div>
        <div class="metric">
            <div class="label">Fish</div>
            <div class="value">{fish}</div>
        </div>
        <div class="metric">
            <div class="label">Food</div>
            <div class="value">{food:.1}</div>
        </div>
        <div class="metric">
            <div class="label">Oxygen</div>
            <div class="value">{oxygen:.1}</div>
        </div>
    </div>

    <hr>

    <h2>API Endpoints</h2>
    <ul>
        <li><a href="/api/snapshot">/api/snapshot</a> -- Latest lake snapshot</li>
        <li><a href="/api/stats">/api/stats</a> -- Fish, food, oxygen, season</li>
        <li><a href="/api/seasons">/api/seasons</a> -- Births and catches per season</li>
        <li><a href="/api/series">/api/series</a> -- Time series (?since=N)</li>
        <li><a href="/api/operator/status">/api/operator/status</a> -- Run status</li>
    </ul>

    <h2>WebSocket</h2>
    <ul>
        <li><code>ws://host:port/ws/ticks</code> -- Live tick summary stream</li>
    </ul>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// GET /api/snapshot -- latest lake snapshot
// ---------------------------------------------------------------------------

/// Return the latest lake snapshot: fish, plants, markers, capture area,
/// and stats.
pub async fn get_snapshot(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    let snapshot = state.snapshot.read().await;
    let lake = snapshot
        .lake
        .as_ref()
        .ok_or(ObserverError::NotFound { what: "lake snapshot" })?;
    Ok(Json(serde_json::to_value(lake)?))
}

// ---------------------------------------------------------------------------
// GET /api/stats -- headline stats
// ---------------------------------------------------------------------------

/// Return the headline stats (fish count, food, oxygen, season) and the
/// tick they belong to.
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    let snapshot = state.snapshot.read().await;
    let lake = snapshot
        .lake
        .as_ref()
        .ok_or(ObserverError::NotFound { what: "lake snapshot" })?;

    Ok(Json(serde_json::json!({
        "tick": lake.tick,
        "phase": lake.phase,
        "stats": lake.stats,
    })))
}

// ---------------------------------------------------------------------------
// GET /api/seasons -- season tallies
// ---------------------------------------------------------------------------

/// Return births and catches keyed by season, plus lifetime totals.
pub async fn get_seasons(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.snapshot.read().await;
    let seasons = &snapshot.seasons;

    Json(serde_json::json!({
        "seasons": seasons,
        "total_born": seasons.total_born(),
        "total_caught": seasons.total_caught(),
    }))
}

// ---------------------------------------------------------------------------
// GET /api/series -- time series
// ---------------------------------------------------------------------------

/// Return recent time-series points.
///
/// The observer keeps only the last [`SERIES_WINDOW`] points, so pollers
/// should pass the last tick they saw.
///
/// # Query Parameters
///
/// - `since`: return only points with a tick strictly greater than this
///   (default: the whole window).
///
/// [`SERIES_WINDOW`]: crate::state::SERIES_WINDOW
pub async fn get_series(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SeriesQuery>,
) -> impl IntoResponse {
    let snapshot = state.snapshot.read().await;
    let points = params
        .since
        .map_or(snapshot.series.points(), |since| snapshot.series.since(since));

    Json(serde_json::json!({
        "count": points.len(),
        "points": points,
    }))
}
