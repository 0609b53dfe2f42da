//! Core types for Taskboard.
//!
//! These mirror the JSON documents served by the task backend.

pub mod deadline;
pub mod id;
pub mod role;
pub mod status;
pub mod task;
pub mod user;

pub use deadline::{Deadline, DeadlineError};
pub use id::*;
pub use role::Role;
pub use status::*;
pub use task::{Task, TaskDraft, UserRef};
pub use user::{User, UserDraft};
