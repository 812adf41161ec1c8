//! Tour session: the transient state of one presentation.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::buttons::buttons_for;
use super::model::{ButtonSet, Step, StepSequence, TourAction};
use crate::error::TourError;

/// Where a session ended up after an action was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Moved to this step index.
    Moved(usize),
    /// The session is finished and should be torn down.
    Finished { opt_out: bool },
}

/// One active walkthrough.
///
/// The index only changes through `apply`, and only by actions the current
/// step offers, so it always points at a valid step.
#[derive(Debug, Clone)]
pub struct TourSession {
    id: Uuid,
    sequence: StepSequence,
    index: usize,
    started_at: DateTime<Utc>,
}

impl TourSession {
    /// Start a session at the first step.
    pub fn start(sequence: StepSequence) -> Self {
        Self {
            id: Uuid::new_v4(),
            sequence,
            index: 0,
            started_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn sequence(&self) -> &StepSequence {
        &self.sequence
    }

    pub fn total(&self) -> usize {
        self.sequence.len()
    }

    /// The step currently on screen.
    pub fn current_step(&self) -> Option<&Step> {
        self.sequence.get(self.index)
    }

    /// Buttons offered at the current step.
    pub fn buttons(&self) -> ButtonSet {
        buttons_for(self.index, self.total())
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.total()
    }

    /// Apply a navigation action.
    ///
    /// Actions the current step doesn't offer are rejected and leave the
    /// index untouched.
    pub fn apply(&mut self, action: TourAction) -> Result<Transition, TourError> {
        if !self.buttons().contains(action.button()) {
            return Err(TourError::ActionNotOffered {
                action: action.button().to_string(),
                index: self.index,
            });
        }

        match action {
            TourAction::Next => {
                self.index += 1;
                Ok(Transition::Moved(self.index))
            }
            TourAction::Back => {
                self.index -= 1;
                Ok(Transition::Moved(self.index))
            }
            TourAction::Finish { opt_out } => Ok(Transition::Finished { opt_out }),
        }
    }
}
