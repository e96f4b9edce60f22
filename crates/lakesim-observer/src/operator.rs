//! Operator endpoints: the only routes that change a running lake.
//!
//! | Method | Path | Effect |
//! |--------|------|--------|
//! | `POST` | `/api/operator/pause` | Hold the loop between ticks |
//! | `POST` | `/api/operator/resume` | Release a held loop |
//! | `POST` | `/api/operator/speed` | Set the sleep between ticks |
//! | `GET` | `/api/operator/status` | Report tick, speed, limits, fish |
//! | `POST` | `/api/operator/stop` | Finish after the current tick |
//!
//! All of them answer 500 when the server was started without
//! [`OperatorState`].

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use lakesim_core::operator::{MIN_TICK_INTERVAL_MS, OperatorState};
use serde::{Deserialize, Serialize};

use crate::error::ObserverError;
use crate::state::AppState;

/// Body of `POST /api/operator/speed`.
#[derive(Debug, Deserialize)]
pub struct SetSpeedRequest {
    /// Milliseconds between ticks, at least [`MIN_TICK_INTERVAL_MS`].
    pub tick_interval_ms: u64,
}

/// Reply to the pause, resume, and stop commands.
#[derive(Debug, Serialize)]
struct Ack {
    ok: bool,
    message: &'static str,
}

impl Ack {
    const fn new(message: &'static str) -> Json<Self> {
        Json(Self { ok: true, message })
    }
}

/// Reply to a speed change.
#[derive(Debug, Serialize)]
struct SpeedChanged {
    ok: bool,
    previous_interval_ms: u64,
    new_interval_ms: u64,
}

fn operator_of(state: &AppState) -> Result<&Arc<OperatorState>, ObserverError> {
    state
        .operator_state
        .as_ref()
        .ok_or(ObserverError::OperatorUnavailable)
}

/// `POST /api/operator/pause`
pub async fn pause(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ObserverError> {
    operator_of(&state)?.pause();
    Ok(Ack::new("paused"))
}

/// `POST /api/operator/resume`
pub async fn resume(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    operator_of(&state)?.resume();
    Ok(Ack::new("resumed"))
}

/// `POST /api/operator/speed`
///
/// Applies from the next sleep. Intervals under [`MIN_TICK_INTERVAL_MS`]
/// get a 400 and leave the speed unchanged.
pub async fn set_speed(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SetSpeedRequest>,
) -> Result<impl IntoResponse, ObserverError> {
    let requested = body.tick_interval_ms;
    let previous = operator_of(&state)?
        .set_tick_interval_ms(requested)
        .ok_or_else(|| ObserverError::BadRequest {
            reason: format!("tick_interval_ms must be at least {MIN_TICK_INTERVAL_MS}"),
        })?;

    Ok(Json(SpeedChanged {
        ok: true,
        previous_interval_ms: previous,
        new_interval_ms: requested,
    }))
}

/// `GET /api/operator/status`
///
/// Tick and fish count come from the last snapshot the engine published.
pub async fn status(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    let operator = operator_of(&state)?;
    let (tick, fish_alive) = {
        let snapshot = state.snapshot.read().await;
        let fish = snapshot
            .lake
            .as_ref()
            .map_or(0, |lake| lake.stats.fish_count);
        (snapshot.current_tick, fish)
    };
    Ok(Json(operator.status(tick, fish_alive).await))
}

/// `POST /api/operator/stop`
///
/// The run loop finishes after its current tick and the engine writes the
/// summary. The server keeps answering until the process exits.
pub async fn stop(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ObserverError> {
    operator_of(&state)?.request_stop();
    Ok(Ack::new("stop requested"))
}
