//! Session-related types for dashboard authentication.
//!
//! The session holds the `{user, token}` pair returned by the backend at
//! login, stored under two keys and always written and cleared together.

use secrecy::SecretString;

use taskboard_core::User;

/// The logged-in user and their backend bearer token.
///
/// Produced by the auth extractors and passed explicitly to handlers; there
/// is no ambient "current user".
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct UserSession {
    /// Profile cached at login. The role is trusted as-is.
    pub user: User,
    /// Bearer token for backend calls.
    pub token: SecretString,
}

impl UserSession {
    #[must_use]
    pub fn new(user: User, token: SecretString) -> Self {
        Self { user, token }
    }

    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.user.is_admin()
    }
}

impl std::fmt::Debug for UserSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserSession")
            .field("user", &self.user)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for the JSON-serialized user profile.
    pub const USER: &str = "user";

    /// Key for the backend bearer token.
    pub const TOKEN: &str = "token";

    /// Key for a one-shot error message shown on the next page render.
    pub const FLASH_ERROR: &str = "flash_error";
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_core::{Role, UserId};

    fn session(role: Role) -> UserSession {
        UserSession::new(
            User {
                id: UserId::new("u1"),
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                role,
            },
            SecretString::from("very-secret-token"),
        )
    }

    #[test]
    fn test_is_admin_follows_role() {
        assert!(session(Role::Admin).is_admin());
        assert!(!session(Role::Member).is_admin());
    }

    #[test]
    fn test_debug_redacts_token() {
        let debug_output = format!("{:?}", session(Role::Member));
        assert!(debug_output.contains("Ada"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("very-secret-token"));
    }
}
