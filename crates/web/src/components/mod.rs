//! View models for templates.
//!
//! Handlers turn backend documents into these flat structs so templates only
//! deal with strings and booleans.

pub mod filter_controls;
pub mod nav;
pub mod task_form;
pub mod task_table;
pub mod user_table;

pub use filter_controls::{FilterOptionView, dashboard_href, filter_options};
pub use nav::NavView;
pub use task_form::{AssigneeOption, StatusOption, TaskFormView};
pub use task_table::{TaskRowView, badge_class};
pub use user_table::{RoleOption, UserFormView, UserRowView};
