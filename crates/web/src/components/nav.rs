//! Navigation bar.

use crate::models::UserSession;

/// Logged-in user as shown in the navigation bar.
#[derive(Debug, Clone)]
pub struct NavView {
    pub name: String,
    pub role: String,
    pub is_admin: bool,
    /// Path of the page being rendered, for highlighting the active link.
    pub current_path: String,
}

impl NavView {
    #[must_use]
    pub fn new(current: &UserSession, current_path: &str) -> Self {
        Self {
            name: current.user.name.clone(),
            role: current.user.role.to_string(),
            is_admin: current.is_admin(),
            current_path: current_path.to_string(),
        }
    }

    /// Whether `path` is the page being rendered (or a page below it).
    #[must_use]
    pub fn is_active(&self, path: &str) -> bool {
        self.current_path == path || self.current_path.starts_with(&format!("{path}/"))
    }
}
