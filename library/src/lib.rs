//! Book inventory and loan tracking for a small set of libraries.
//!
//! Each library keeps an ordered list of titles and a map of loans, persisted
//! as one JSON record file. Titles are matched case-insensitively with
//! surrounding whitespace ignored. The architecture keeps a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (normalization, validated
//!   mutations, record invariants). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (record files, configuration).
//!
//! [`catalog`] binds a record to its file and persists every successful
//! mutation; [`session`] drives the interactive menus on top of it.

pub mod catalog;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod menu;
pub mod session;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
