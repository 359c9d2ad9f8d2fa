//! Stable exit codes for the `subsync` CLI.

/// Command succeeded (including absorbed outcomes such as "transition not needed").
pub const OK: i32 = 0;
/// Invalid configuration, missing token, or other local errors.
pub const INVALID: i32 = 1;
/// A tracker call failed (transport error, non-2xx, unreadable body).
pub const TRACKER: i32 = 2;
