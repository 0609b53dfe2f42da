//! User management table and form.

use taskboard_core::{Role, User, UserId};

/// A user account as one table row.
#[derive(Debug, Clone)]
pub struct UserRowView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: &'static str,
    pub is_admin: bool,
    /// The row is the logged-in admin.
    pub is_self: bool,
    pub edit_href: String,
    pub delete_href: String,
}

impl UserRowView {
    #[must_use]
    pub fn new(user: &User, viewer_id: &UserId) -> Self {
        let id = urlencoding::encode(user.id.as_str()).into_owned();
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.as_str(),
            is_admin: user.is_admin(),
            is_self: &user.id == viewer_id,
            edit_href: format!("/admin/users/{id}/edit"),
            delete_href: format!("/admin/users/{id}/delete"),
            id,
        }
    }
}

/// One `<option>` of the role select.
#[derive(Debug, Clone)]
pub struct RoleOption {
    pub value: &'static str,
    pub selected: bool,
}

/// Values for the create/edit user form.
#[derive(Debug, Clone)]
pub struct UserFormView {
    pub heading: &'static str,
    pub submit_label: &'static str,
    pub action: String,
    pub name: String,
    pub email: String,
    pub role_options: Vec<RoleOption>,
    /// Creating requires a password; editing leaves it unchanged when blank.
    pub password_required: bool,
}

impl UserFormView {
    #[must_use]
    pub fn create() -> Self {
        Self {
            heading: "Create User",
            submit_label: "Create User",
            action: "/admin/users".to_string(),
            name: String::new(),
            email: String::new(),
            role_options: role_options(Role::Member.as_str()),
            password_required: true,
        }
    }

    #[must_use]
    pub fn edit(user: &User) -> Self {
        Self {
            heading: "Edit User",
            submit_label: "Update User",
            action: format!("/admin/users/{}", urlencoding::encode(user.id.as_str())),
            name: user.name.clone(),
            email: user.email.clone(),
            role_options: role_options(user.role.as_str()),
            password_required: false,
        }
    }

    /// Replace the values with a submission. The password is never echoed.
    #[must_use]
    pub fn with_values(mut self, name: &str, email: &str, role: &str) -> Self {
        self.name = name.to_string();
        self.email = email.to_string();
        self.role_options = role_options(role);
        self
    }
}

fn role_options(selected: &str) -> Vec<RoleOption> {
    Role::ALL
        .iter()
        .map(|role| RoleOption {
            value: role.as_str(),
            selected: role.as_str() == selected,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, role: Role) -> User {
        User {
            id: UserId::new(id),
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            role,
        }
    }

    #[test]
    fn test_row_marks_self() {
        let me = UserId::new("u1");
        assert!(UserRowView::new(&user("u1", Role::Admin), &me).is_self);
        let other = UserRowView::new(&user("u2", Role::Member), &me);
        assert!(!other.is_self);
        assert_eq!(other.role, "member");
        assert_eq!(other.delete_href, "/admin/users/u2/delete");
    }

    #[test]
    fn test_edit_form_selects_role() {
        let form = UserFormView::edit(&user("u3", Role::Admin));
        assert!(!form.password_required);
        let selected: Vec<_> = form
            .role_options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.value)
            .collect();
        assert_eq!(selected, ["admin"]);
    }
}
