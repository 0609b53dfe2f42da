//! Access decisions for pages and task actions.
//!
//! These checks decide what the dashboard renders and which redirects it
//! issues. They are not a security boundary: the backend authorizes every
//! request on its own.

use crate::types::{Task, User};

/// Where unauthenticated visitors are sent.
pub const LOGIN_PATH: &str = "/login";

/// Where authenticated users land (and where non-admins are sent from admin pages).
pub const LANDING_PATH: &str = "/dashboard";

/// Access level a page requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Any logged-in user.
    Authenticated,
    /// Logged-in users with the admin role.
    AdminOnly,
}

/// Outcome of checking a session against a page's [`Access`] level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the page.
    Allow,
    /// No session: go to the login page.
    RedirectToLogin,
    /// Session present but the role is insufficient: go to the landing page.
    RedirectToLanding,
}

impl GuardDecision {
    /// Redirect target, if the decision is a redirect.
    #[must_use]
    pub const fn redirect_path(&self) -> Option<&'static str> {
        match self {
            Self::Allow => None,
            Self::RedirectToLogin => Some(LOGIN_PATH),
            Self::RedirectToLanding => Some(LANDING_PATH),
        }
    }
}

/// Decide whether `user` (the cached session user, if any) may see a page.
///
/// The role is taken from the session as-is; there is no round-trip to the
/// backend.
#[must_use]
pub fn decide(user: Option<&User>, access: Access) -> GuardDecision {
    match (user, access) {
        (None, _) => GuardDecision::RedirectToLogin,
        (Some(user), Access::AdminOnly) if !user.is_admin() => GuardDecision::RedirectToLanding,
        (Some(_), _) => GuardDecision::Allow,
    }
}

/// What a viewer may do with one task row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskPermissions {
    /// Edit title, description, assignee, deadline.
    pub can_edit: bool,
    pub can_delete: bool,
    /// Use the status selector.
    pub can_change_status: bool,
    /// The viewer is a member and the task is assigned to them.
    pub is_own_task: bool,
}

impl TaskPermissions {
    /// Permissions of `viewer` on `task`.
    ///
    /// Admins may do everything. Members may only change the status of
    /// tasks assigned to them, whatever that status currently is.
    #[must_use]
    pub fn for_task(viewer: &User, task: &Task) -> Self {
        if viewer.is_admin() {
            return Self {
                can_edit: true,
                can_delete: true,
                can_change_status: true,
                is_own_task: false,
            };
        }

        let own = task.is_assigned_to(&viewer.id);
        Self {
            can_edit: false,
            can_delete: false,
            can_change_status: own,
            is_own_task: own,
        }
    }
}
