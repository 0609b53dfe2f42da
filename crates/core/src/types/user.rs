//! User accounts as served by the backend.

use serde::{Deserialize, Serialize};

use super::{Role, UserId};

/// A user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

impl User {
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Body for creating or updating a user.
///
/// `password` is required by the backend on create and optional on update;
/// it is omitted from the JSON when `None`.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl std::fmt::Debug for UserDraft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserDraft")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_accepts_underscore_id() {
        let user: User = serde_json::from_value(json!({
            "_id": "u1",
            "name": "Grace",
            "email": "grace@example.com",
            "role": "admin"
        }))
        .unwrap();
        assert_eq!(user.id, UserId::new("u1"));
        assert!(user.is_admin());
    }

    #[test]
    fn test_user_role_defaults_to_member() {
        let user: User = serde_json::from_value(json!({
            "id": "u2",
            "name": "Linus",
            "email": "linus@example.com"
        }))
        .unwrap();
        assert_eq!(user.role, Role::Member);
    }

    #[test]
    fn test_draft_omits_missing_password() {
        let draft = UserDraft {
            name: "Ken".to_string(),
            email: "ken@example.com".to_string(),
            role: Role::Member,
            password: None,
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["role"], "member");
    }

    #[test]
    fn test_draft_debug_redacts_password() {
        let draft = UserDraft {
            name: "Ken".to_string(),
            email: "ken@example.com".to_string(),
            role: Role::Admin,
            password: Some("hunter2-but-longer".to_string()),
        };
        let debug_output = format!("{draft:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("hunter2"));
    }
}
