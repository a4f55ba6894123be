//! Deterministic, pure catalog logic.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! records and return deterministic outputs suitable for tests.

pub mod error;
pub mod invariants;
pub mod record;
pub mod title;
