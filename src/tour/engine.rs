//! Seams to the page: the overlay engine and the element locator.
//!
//! The planner never renders or scrolls anything itself. It describes each
//! step to a `TourEngine` and asks an `ElementLocator` where targets are.

use super::model::{AnchorPosition, ButtonSet, Step};
use crate::error::TourError;

/// Opaque handle to a live page element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementHandle(pub String);

/// Resolves a step's target reference to a live element.
pub trait ElementLocator: Send + Sync {
    /// `None` when nothing on the page matches.
    fn locate(&self, target: &str) -> Option<ElementHandle>;
}

/// How a step is placed on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anchor {
    /// Attached to an element at the step's preferred side.
    Element {
        element: ElementHandle,
        position: AnchorPosition,
    },
    /// Floating in the middle of the viewport.
    Centered,
}

/// Everything the engine needs to draw one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepView {
    pub index: usize,
    pub total: usize,
    pub step: Step,
    pub buttons: ButtonSet,
    pub anchor: Anchor,
}

/// Why the engine is being asked to close the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Completed,
    Cancelled,
    /// A fresh launch replaced the session on screen.
    Superseded,
}

/// The guided-tour renderer.
pub trait TourEngine: Send + Sync {
    /// Bring an element into the viewport before its step is shown.
    fn scroll_into_view(&self, element: &ElementHandle);

    /// Display a step.
    fn show(&self, view: &StepView);

    /// Tear down the overlay.
    fn close(&self, reason: CloseReason);
}

/// Resolve where a step should be anchored.
pub(crate) fn resolve_anchor(
    locator: &dyn ElementLocator,
    step: &Step,
) -> Result<(Anchor, ElementHandle), TourError> {
    let element = locator
        .locate(&step.target)
        .ok_or_else(|| TourError::UnresolvedTarget {
            target: step.target.clone(),
        })?;
    let anchor = Anchor::Element {
        element: element.clone(),
        position: step.position,
    };
    Ok((anchor, element))
}
