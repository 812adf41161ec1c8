//! Tour data model: roles, steps, sequences, and step buttons.

use serde::{Deserialize, Serialize};

/// The category of portal user viewing the page.
///
/// Selects the two role-specific steps in the middle of the tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Mother,
    Doctor,
    Admin,
}

impl Role {
    /// Map the role string rendered into the page context.
    ///
    /// Matching is exact; missing, unrecognised or differently-cased values
    /// fall back to `Mother`.
    pub fn from_context(value: Option<&str>) -> Self {
        match value {
            Some("doctor") => Self::Doctor,
            Some("admin") => Self::Admin,
            _ => Self::Mother,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mother => write!(f, "mother"),
            Self::Doctor => write!(f, "doctor"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// Where the overlay sits relative to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorPosition {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
    Center,
}

/// One unit of the guided walkthrough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub title: String,
    pub body: String,
    /// Selector handed to the element locator.
    pub target: String,
    pub position: AnchorPosition,
}

impl Step {
    pub fn new(title: &str, body: &str, target: &str, position: AnchorPosition) -> Self {
        Self {
            title: title.to_string(),
            body: body.to_string(),
            target: target.to_string(),
            position,
        }
    }
}

/// The ordered steps for one tour presentation.
///
/// Built once per launch; there is no way to mutate it afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepSequence {
    role: Role,
    steps: Vec<Step>,
}

impl StepSequence {
    pub(crate) fn new(role: Role, steps: Vec<Step>) -> Self {
        Self { role, steps }
    }

    /// The role this sequence was built for.
    pub fn role(&self) -> Role {
        self.role
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

/// The kinds of control a step can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonKind {
    Back,
    Next,
    Finish,
}

impl std::fmt::Display for ButtonKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Back => write!(f, "back"),
            Self::Next => write!(f, "next"),
            Self::Finish => write!(f, "finish"),
        }
    }
}

/// A single button in a step's footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Button {
    pub kind: ButtonKind,
    pub label: &'static str,
    /// Rendered with the outlined (secondary) style.
    pub secondary: bool,
}

/// Buttons offered at one step index, plus the opt-out checkbox on the last step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ButtonSet {
    pub buttons: Vec<Button>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opt_out_label: Option<&'static str>,
}

impl ButtonSet {
    pub fn contains(&self, kind: ButtonKind) -> bool {
        self.buttons.iter().any(|b| b.kind == kind)
    }

    /// Whether this step carries the "don't show again" checkbox.
    pub fn offers_opt_out(&self) -> bool {
        self.opt_out_label.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }
}

/// A navigation request reported by the tour engine.
///
/// `Finish` carries the opt-out checkbox state at the moment it was clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TourAction {
    Next,
    Back,
    Finish { opt_out: bool },
}

impl TourAction {
    /// The button that has to be offered for this action to apply.
    pub fn button(&self) -> ButtonKind {
        match self {
            Self::Next => ButtonKind::Next,
            Self::Back => ButtonKind::Back,
            Self::Finish { .. } => ButtonKind::Finish,
        }
    }
}
