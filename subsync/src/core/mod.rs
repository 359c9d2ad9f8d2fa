//! Deterministic, pure logic for parent status synchronisation.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and return deterministic outputs suitable for tests.

pub mod aggregator;
pub mod categories;
pub mod decision;
pub mod target_map;
pub mod types;
