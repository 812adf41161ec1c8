//! Guided onboarding tour: role-branched step sequences, per-step controls,
//! and the persisted opt-out.

pub mod buttons;
pub mod dismissal;
pub mod engine;
pub mod model;
pub mod planner;
pub mod routes;
pub mod session;
pub mod steps;

pub use buttons::buttons_for;
pub use dismissal::DismissalFlag;
pub use engine::{Anchor, CloseReason, ElementHandle, ElementLocator, StepView, TourEngine};
pub use model::{AnchorPosition, ButtonKind, ButtonSet, Role, Step, StepSequence, TourAction};
pub use planner::{ActionOutcome, LaunchOutcome, TourPlanner};
pub use session::TourSession;
pub use steps::build_sequence;
