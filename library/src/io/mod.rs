//! I/O helpers for catalog records and configuration.

pub mod config;
pub mod record_store;
