// ABOUTME: Library root for moorage - exposes the compose model and resolution.
// ABOUTME: The main binary is in main.rs.

pub mod compose;
pub mod config;
pub mod deploy;
pub mod diagnostics;
pub mod error;
pub mod output;
pub mod resolve;
