//! Taskboard Core - Shared domain types.
//!
//! This crate provides the types and pure logic shared by the dashboard
//! components:
//! - `web` - Server-rendered dashboard over the task backend
//! - `integration-tests` - End-to-end tests against a mocked backend
//!
//! # Architecture
//!
//! The core crate contains only types and decisions - no I/O, no sessions,
//! no HTTP clients. Everything here can be tested without a runtime.
//!
//! # Modules
//!
//! - [`types`] - IDs, roles, task statuses, tasks and users as the backend sends them
//! - [`access`] - Route guard decisions and per-task permissions
//! - [`list`] - Fetch/refresh state for a page-level list

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod access;
pub mod list;
pub mod types;

pub use access::*;
pub use list::*;
pub use types::*;
