//! REST endpoints serving the planned tour and the dismissal flag to the
//! host page.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use super::buttons::buttons_for;
use super::dismissal::{DismissalFlag, settings_keys};
use super::model::{ButtonSet, Role, Step};
use super::steps::build_sequence;
use crate::store::SettingsStore;

/// Shared state for tour routes.
#[derive(Clone)]
pub struct TourRouteState {
    pub store: Arc<dyn SettingsStore>,
    /// How long the page waits after loading the engine before auto-launching.
    pub auto_launch_delay: Duration,
}

impl TourRouteState {
    fn flag(&self, user: Option<String>) -> DismissalFlag {
        let user = user
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| settings_keys::DEFAULT_USER.to_string());
        DismissalFlag::new(Arc::clone(&self.store), user)
    }
}

/// One step as the host page renders it.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedStep {
    pub index: usize,
    #[serde(flatten)]
    pub step: Step,
    #[serde(flatten)]
    pub buttons: ButtonSet,
}

/// The full tour for one page load.
#[derive(Debug, Clone, Serialize)]
pub struct TourPlan {
    pub role: Role,
    pub auto_launch: bool,
    pub auto_launch_delay_ms: u64,
    pub steps: Vec<PlannedStep>,
}

impl TourPlan {
    pub fn new(role: Role, dismissed: bool, auto_launch_delay: Duration) -> Self {
        let sequence = build_sequence(role);
        let total = sequence.len();
        let steps = sequence
            .steps()
            .iter()
            .enumerate()
            .map(|(index, step)| PlannedStep {
                index,
                step: step.clone(),
                buttons: buttons_for(index, total),
            })
            .collect();
        let auto_launch_delay_ms = u64::try_from(auto_launch_delay.as_millis()).unwrap_or(u64::MAX);
        Self {
            role,
            auto_launch: !dismissed,
            auto_launch_delay_ms,
            steps,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TourQuery {
    user: Option<String>,
    role: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserQuery {
    user: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FinishRequest {
    user: Option<String>,
    #[serde(default)]
    opt_out: bool,
}

#[derive(Debug, Serialize)]
struct DismissalStatus {
    user: String,
    dismissed: bool,
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "clinic-tour"
    }))
}

/// GET /api/tour?user=<id>&role=<role>
///
/// Returns every step with its buttons, and whether the page should start the
/// tour on its own.
async fn get_tour(
    State(state): State<TourRouteState>,
    Query(query): Query<TourQuery>,
) -> impl IntoResponse {
    let role = Role::from_context(query.role.as_deref());
    let flag = state.flag(query.user);
    let dismissed = flag.is_set().await;
    Json(TourPlan::new(role, dismissed, state.auto_launch_delay))
}

/// GET /api/tour/dismissal?user=<id>
async fn get_dismissal(
    State(state): State<TourRouteState>,
    Query(query): Query<UserQuery>,
) -> impl IntoResponse {
    let flag = state.flag(query.user);
    Json(DismissalStatus {
        dismissed: flag.is_set().await,
        user: flag.user_id().to_string(),
    })
}

/// POST /api/tour/finish
///
/// Latches the dismissal flag when the opt-out box was ticked.
async fn finish_tour(
    State(state): State<TourRouteState>,
    Json(req): Json<FinishRequest>,
) -> impl IntoResponse {
    let flag = state.flag(req.user);

    if req.opt_out {
        if let Err(e) = flag.latch().await {
            tracing::warn!(user = %flag.user_id(), "Failed to persist tutorial dismissal: {}", e);
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({"error": e.to_string()})),
            )
                .into_response();
        }
    }

    Json(DismissalStatus {
        dismissed: flag.is_set().await,
        user: flag.user_id().to_string(),
    })
    .into_response()
}

/// Build the tour REST routes.
pub fn tour_routes(state: TourRouteState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/tour", get(get_tour))
        .route("/api/tour/dismissal", get(get_dismissal))
        .route("/api/tour/finish", post(finish_tour))
        .with_state(state)
}
