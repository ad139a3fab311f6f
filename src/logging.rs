//! Logging setup (spec.md OUT-OF-SCOPE "logging setup" — carried anyway as
//! ambient stack per the host's own convention).
//!
//! Copied in spirit from the teacher's `main.rs::init_logging`: an
//! `EnvFilter` seeded from `RUST_LOG`, falling back to a crate-scoped
//! default, feeding a `fmt` subscriber.

use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber. Safe to call more than once;
/// later calls are no-ops (matches `tracing`'s own set-once semantics).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("blockpath=debug,info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
