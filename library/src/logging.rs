//! Diagnostics for the `library` binary.
//!
//! Menus, listings and one-shot results go to stdout. Tracing events (library
//! opened, book lent, mutation rejected, config resolved) go to stderr, so a
//! piped session or a `books` listing stays clean.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the stderr subscriber. Called once at the top of `main`.
///
/// Only warnings show by default. `RUST_LOG` widens that, e.g.
/// `RUST_LOG=library=info` logs each persisted add, delete, lend and return,
/// and `library=debug` adds rejected mutations and which records were read.
/// Malformed directives in `RUST_LOG` are skipped rather than aborting.
pub fn init() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}
