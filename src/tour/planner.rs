//! TourPlanner: decides what the tour shows and drives one session at a time.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::dismissal::DismissalFlag;
use super::engine::{Anchor, CloseReason, ElementLocator, StepView, TourEngine, resolve_anchor};
use super::model::{Role, TourAction};
use super::session::{TourSession, Transition};
use super::steps::build_sequence;
use crate::error::TourError;

/// Delay between the engine becoming ready and a queued launch firing.
pub const DEFAULT_AUTO_LAUNCH_DELAY: Duration = Duration::from_secs(1);

/// Lifecycle of the external tour engine.
///
/// Loading → Ready, or Loading → Unavailable when its assets never load.
enum EngineState {
    Loading { pending: Option<QueuedLaunch> },
    Ready(Arc<dyn TourEngine>),
    Unavailable,
}

/// Who asked for a launch that arrived before the engine was ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QueuedLaunch {
    /// Page-load auto-launch; waits out the auto-launch delay.
    Auto,
    /// The help button; fires as soon as the engine is ready.
    Manual,
}

struct PlannerState {
    engine: EngineState,
    session: Option<TourSession>,
    /// Cached dismissal flag. `None` until first read from the store.
    dismissed: Option<bool>,
}

/// What a launch request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// A fresh session is on screen at step 0.
    Started { session_id: Uuid },
    /// The engine isn't ready yet; the launch will fire once it is.
    Deferred,
}

/// What a navigation action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Moved { index: usize },
    /// The session ended. `dismissed` is the flag after the finish was applied.
    Finished { dismissed: bool },
}

/// Builds step sequences for a role and runs them through the tour engine.
pub struct TourPlanner {
    role: Role,
    flag: DismissalFlag,
    locator: Arc<dyn ElementLocator>,
    auto_launch_delay: Duration,
    state: RwLock<PlannerState>,
}

impl TourPlanner {
    pub fn new(role: Role, flag: DismissalFlag, locator: Arc<dyn ElementLocator>) -> Self {
        Self {
            role,
            flag,
            locator,
            auto_launch_delay: DEFAULT_AUTO_LAUNCH_DELAY,
            state: RwLock::new(PlannerState {
                engine: EngineState::Loading { pending: None },
                session: None,
                dismissed: None,
            }),
        }
    }

    pub fn with_auto_launch_delay(mut self, delay: Duration) -> Self {
        self.auto_launch_delay = delay;
        self
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Read the persisted flag once and request the automatic launch if the
    /// user hasn't opted out. Returns whether a launch was requested.
    pub async fn initialize(&self) -> bool {
        let dismissed = self.flag.is_set().await;
        self.state.write().await.dismissed = Some(dismissed);

        if dismissed {
            info!(user = %self.flag.user_id(), "Tutorial dismissed, skipping auto-launch");
            return false;
        }

        if let Err(e) = self.request_launch(QueuedLaunch::Auto).await {
            debug!("Auto-launch unavailable: {}", e);
        }
        true
    }

    /// Whether the tour should present itself without being asked.
    pub async fn should_auto_launch(&self) -> bool {
        let mut state = self.state.write().await;
        !self.dismissed(&mut state).await
    }

    /// Record the opt-out checkbox. Only `true` has any effect; the flag is
    /// never cleared from here.
    pub async fn record_dismissal_choice(&self, checked: bool) {
        let mut state = self.state.write().await;
        self.latch_if_checked(&mut state, checked).await;
    }

    /// Start the tour from the first step.
    ///
    /// Works regardless of the dismissal flag. Any session already on screen
    /// is discarded in favour of the new one. Before the engine is ready the
    /// launch is queued and fires without the auto-launch delay.
    pub async fn launch(&self) -> Result<LaunchOutcome, TourError> {
        self.request_launch(QueuedLaunch::Manual).await
    }

    async fn request_launch(&self, origin: QueuedLaunch) -> Result<LaunchOutcome, TourError> {
        let mut state = self.state.write().await;

        let engine = match &mut state.engine {
            EngineState::Loading { pending } => {
                // A manual request outranks a queued auto-launch.
                if *pending != Some(QueuedLaunch::Manual) {
                    *pending = Some(origin);
                }
                debug!(?origin, "Tour engine not ready, launch queued");
                return Ok(LaunchOutcome::Deferred);
            }
            EngineState::Unavailable => return Err(TourError::EngineUnavailable),
            EngineState::Ready(engine) => Arc::clone(engine),
        };

        if let Some(previous) = state.session.take() {
            info!(session_id = %previous.id(), index = previous.index(), "Superseding active tour");
            engine.close(CloseReason::Superseded);
        }

        let session = TourSession::start(build_sequence(self.role));
        let session_id = session.id();
        info!(
            session_id = %session_id,
            role = %self.role,
            steps = session.total(),
            "Tour started"
        );
        self.present(engine.as_ref(), &session);
        state.session = Some(session);

        Ok(LaunchOutcome::Started { session_id })
    }

    /// The engine's assets finished loading.
    ///
    /// Fires a queued launch. A queued auto-launch first waits out the
    /// auto-launch delay and is dropped if a session started in the meantime.
    pub async fn engine_ready(
        &self,
        engine: Arc<dyn TourEngine>,
    ) -> Result<Option<LaunchOutcome>, TourError> {
        let pending = {
            let mut state = self.state.write().await;
            let pending = match state.engine {
                EngineState::Loading { pending } => pending,
                _ => {
                    warn!("Tour engine readiness reported twice, ignoring");
                    return Ok(None);
                }
            };
            state.engine = EngineState::Ready(engine);
            pending
        };

        let Some(origin) = pending else {
            return Ok(None);
        };

        if origin == QueuedLaunch::Auto && !self.auto_launch_delay.is_zero() {
            tokio::time::sleep(self.auto_launch_delay).await;
        }

        if self.state.read().await.session.is_some() {
            debug!("Tour already running, dropping queued launch");
            return Ok(None);
        }

        self.launch().await.map(Some)
    }

    /// The engine's assets failed to load. The tour stays off for this page.
    pub async fn engine_failed(&self) {
        let mut state = self.state.write().await;
        if let EngineState::Loading { pending } = state.engine {
            warn!(
                pending_launch = pending.is_some(),
                "Tour engine failed to load, tutorial disabled"
            );
            state.engine = EngineState::Unavailable;
        }
    }

    /// Apply a button press from the engine to the active session.
    pub async fn handle(&self, action: TourAction) -> Result<ActionOutcome, TourError> {
        let mut state = self.state.write().await;

        let engine = match &state.engine {
            EngineState::Ready(engine) => Arc::clone(engine),
            _ => return Err(TourError::NoActiveSession),
        };
        let session = state.session.as_mut().ok_or(TourError::NoActiveSession)?;

        match session.apply(action)? {
            Transition::Moved(index) => {
                debug!(session_id = %session.id(), index, "Tour step changed");
                self.present(engine.as_ref(), session);
                Ok(ActionOutcome::Moved { index })
            }
            Transition::Finished { opt_out } => {
                // The flag is written before the session goes away.
                self.latch_if_checked(&mut state, opt_out).await;
                if let Some(finished) = state.session.take() {
                    let elapsed_ms = (Utc::now() - finished.started_at()).num_milliseconds();
                    info!(session_id = %finished.id(), opt_out, elapsed_ms, "Tour completed");
                }
                engine.close(CloseReason::Completed);
                Ok(ActionOutcome::Finished {
                    dismissed: state.dismissed.unwrap_or(false),
                })
            }
        }
    }

    /// The user closed the overlay mid-tour. The dismissal flag is left alone.
    pub async fn cancel(&self) -> bool {
        let mut state = self.state.write().await;
        let Some(session) = state.session.take() else {
            return false;
        };
        info!(session_id = %session.id(), index = session.index(), "Tour cancelled");
        if let EngineState::Ready(engine) = &state.engine {
            engine.close(CloseReason::Cancelled);
        }
        true
    }

    /// Index of the step on screen, if a session is active.
    pub async fn current_index(&self) -> Option<usize> {
        self.state.read().await.session.as_ref().map(|s| s.index())
    }

    pub async fn active_session_id(&self) -> Option<Uuid> {
        self.state.read().await.session.as_ref().map(|s| s.id())
    }

    /// The dismissal flag, read through from the store on first use.
    async fn dismissed(&self, state: &mut PlannerState) -> bool {
        match state.dismissed {
            Some(dismissed) => dismissed,
            None => {
                let dismissed = self.flag.is_set().await;
                state.dismissed = Some(dismissed);
                dismissed
            }
        }
    }

    async fn latch_if_checked(&self, state: &mut PlannerState, checked: bool) {
        if !checked || self.dismissed(state).await {
            return;
        }
        match self.flag.latch().await {
            Ok(()) => state.dismissed = Some(true),
            Err(e) => warn!(user = %self.flag.user_id(), "Failed to persist tutorial dismissal: {}", e),
        }
    }

    fn present(&self, engine: &dyn TourEngine, session: &TourSession) {
        let Some(step) = session.current_step() else {
            return;
        };

        let anchor = match resolve_anchor(self.locator.as_ref(), step) {
            Ok((anchor, element)) => {
                engine.scroll_into_view(&element);
                anchor
            }
            Err(e) => {
                debug!(index = session.index(), "{}, showing step centered", e);
                Anchor::Centered
            }
        };

        engine.show(&StepView {
            index: session.index(),
            total: session.total(),
            step: step.clone(),
            buttons: session.buttons(),
            anchor,
        });
    }
}
