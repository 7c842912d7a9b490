//! Paperfolio server library: router assembly, application state, auth,
//! and configuration. The binary in `main.rs` and the integration tests
//! both build the app through this crate.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod main_lib;
pub mod models;

pub use main_lib::{build_state, build_state_with_provider, init_tracing, AppState};
