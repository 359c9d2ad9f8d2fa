//! Side-effecting collaborators: configuration files and the tracker REST API.

pub mod config;
pub mod http_tracker;
pub mod tracker;
