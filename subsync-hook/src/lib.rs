//! Webhook receiver that keeps parent issues in line with their subtasks.
//!
//! The binary in `main.rs` owns process lifecycle (config, logging, client,
//! signals); this library exposes the router so tests can drive it in-process.

pub mod routes;
pub mod state;
