//! Per-step button configuration.

use super::model::{Button, ButtonKind, ButtonSet};

pub const BACK_LABEL: &str = "← Back";
pub const NEXT_LABEL: &str = "Next →";
pub const FINISH_LABEL: &str = "Finish";
pub const OPT_OUT_LABEL: &str = "Don't show this tutorial again";

/// Buttons for the step at `index` in a sequence of `total` steps.
///
/// The first step only goes forward, middle steps go both ways, and the last
/// step offers Back (when there is somewhere to go back to) plus Finish with
/// the opt-out checkbox. Indices past the end get an empty set.
pub fn buttons_for(index: usize, total: usize) -> ButtonSet {
    if index >= total {
        return ButtonSet::default();
    }

    let is_last = index == total - 1;
    let mut buttons = Vec::with_capacity(2);

    if index > 0 {
        buttons.push(Button {
            kind: ButtonKind::Back,
            label: BACK_LABEL,
            secondary: true,
        });
    }

    if is_last {
        buttons.push(Button {
            kind: ButtonKind::Finish,
            label: FINISH_LABEL,
            secondary: false,
        });
    } else {
        buttons.push(Button {
            kind: ButtonKind::Next,
            label: NEXT_LABEL,
            secondary: false,
        });
    }

    ButtonSet {
        buttons,
        opt_out_label: is_last.then_some(OPT_OUT_LABEL),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_step_only_goes_forward() {
        let set = buttons_for(0, 8);
        assert!(set.contains(ButtonKind::Next));
        assert!(!set.contains(ButtonKind::Back));
        assert!(!set.contains(ButtonKind::Finish));
        assert!(!set.offers_opt_out());
    }

    #[test]
    fn middle_step_goes_both_ways() {
        let set = buttons_for(3, 8);
        assert!(set.contains(ButtonKind::Back));
        assert!(set.contains(ButtonKind::Next));
        assert!(!set.contains(ButtonKind::Finish));
        // Back renders first, as the secondary button
        assert_eq!(set.buttons[0].kind, ButtonKind::Back);
        assert!(set.buttons[0].secondary);
    }

    #[test]
    fn last_step_finishes_with_opt_out() {
        let set = buttons_for(7, 8);
        assert!(set.contains(ButtonKind::Finish));
        assert!(set.contains(ButtonKind::Back));
        assert!(!set.contains(ButtonKind::Next));
        assert_eq!(set.opt_out_label, Some(OPT_OUT_LABEL));
    }

    #[test]
    fn single_step_sequence_has_only_finish() {
        let set = buttons_for(0, 1);
        assert_eq!(set.buttons.len(), 1);
        assert_eq!(set.buttons[0].kind, ButtonKind::Finish);
        assert!(set.offers_opt_out());
    }

    #[test]
    fn out_of_range_is_empty() {
        assert!(buttons_for(8, 8).is_empty());
        assert!(buttons_for(0, 0).is_empty());
    }
}
