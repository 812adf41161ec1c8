//! Step catalog: the orientation prefix, role segments, and closing step.

use super::model::{AnchorPosition, Role, Step, StepSequence};

/// Number of orientation steps every role sees first.
pub const PREFIX_LEN: usize = 5;
/// Number of role-specific steps in the middle of the tour.
pub const ROLE_SEGMENT_LEN: usize = 2;
/// Total steps in every sequence.
pub const SEQUENCE_LEN: usize = PREFIX_LEN + ROLE_SEGMENT_LEN + 1;

fn prefix_steps() -> [Step; PREFIX_LEN] {
    use AnchorPosition::Bottom;
    [
        Step::new(
            "👋 Welcome to Baby Moms Care Clinic!",
            "Let me show you around! This quick tour will help you navigate the platform and discover all the features available to you.",
            "nav",
            Bottom,
        ),
        Step::new(
            "🏠 Home Dashboard",
            "Click here anytime to return to your main dashboard where you can see your overview and quick stats.",
            r#"a[href*="dashboard"]"#,
            Bottom,
        ),
        Step::new(
            "📅 Appointments",
            "Manage all your appointments here. Book new appointments, view upcoming visits, and track your appointment history.",
            r#"a[href*="appointments"]"#,
            Bottom,
        ),
        Step::new(
            "🔔 Notifications",
            "Stay updated with important alerts, appointment reminders, and system notifications. The red dot indicates unread notifications.",
            r#"a[href*="notifications"]"#,
            Bottom,
        ),
        Step::new(
            "👤 Your Profile",
            "Access your profile settings, update personal information, change your password, and manage your account preferences.",
            ".group button",
            Bottom,
        ),
    ]
}

fn role_steps(role: Role) -> [Step; ROLE_SEGMENT_LEN] {
    use AnchorPosition::Top;
    match role {
        Role::Mother => [
            Step::new(
                "🤰 Quick Actions",
                "These cards provide quick access to your most-used features. Click any card to jump directly to that section.",
                ".feature-card",
                Top,
            ),
            Step::new(
                "📊 Your Statistics",
                "View your important stats at a glance - upcoming appointments, health records, and notifications all in one place.",
                ".clinic-stat-card",
                Top,
            ),
        ],
        Role::Doctor => [
            Step::new(
                "👥 Patient Management",
                "Access your patient list, review medical records, and manage consultations from these quick action cards.",
                ".feature-card",
                Top,
            ),
            Step::new(
                "📊 Today's Overview",
                "Monitor today's appointments, upcoming schedules, and patient notifications at a glance.",
                ".clinic-stat-card",
                Top,
            ),
        ],
        Role::Admin => [
            Step::new(
                "⚙️ Admin Controls",
                "Manage users, monitor appointments, view reports, and configure system settings from these admin panels.",
                ".feature-card",
                Top,
            ),
            Step::new(
                "📊 System Statistics",
                "Track total users, pending appointments, and system activity with these real-time statistics.",
                ".clinic-stat-card",
                Top,
            ),
        ],
    }
}

fn closing_step() -> Step {
    Step::new(
        "🎉 You're All Set!",
        "You've completed the tour! You can restart this tutorial anytime by clicking the \"Start Tutorial\" button. Enjoy using Baby Moms Care Clinic!",
        "body",
        AnchorPosition::Center,
    )
}

/// Build the full step sequence for a role.
///
/// Pure and deterministic: the prefix, then the role's two steps, then the
/// closing step.
pub fn build_sequence(role: Role) -> StepSequence {
    let mut steps = Vec::with_capacity(SEQUENCE_LEN);
    steps.extend(prefix_steps());
    steps.extend(role_steps(role));
    steps.push(closing_step());
    StepSequence::new(role, steps)
}
