//! Keeps a parent issue's status in line with the statuses of its subtasks.
//!
//! The crate separates:
//!
//! - **[`core`]**: Pure, deterministic logic (category aggregation, the
//!   bidirectional target table, transition decisions). No I/O.
//! - **[`io`]**: Configuration and the issue tracker REST client, behind the
//!   [`io::tracker::IssueTracker`] trait so tests can substitute a transport.
//!
//! [`sync`] coordinates the two to handle one webhook [`event`] at a time.

pub mod core;
pub mod event;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod sync;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
