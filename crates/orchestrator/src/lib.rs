//! Application layer for the order lifecycle engine.
//!
//! The [`OrderService`] orchestrates every lifecycle operation as an
//! explicit two-step sequence: persist the aggregate's new state, then
//! drain its recorded events and hand them to the [`EventSink`]. There
//! is no implicit publish-after-commit machinery; the ordering is
//! visible and testable. Collaborators (repository, sink) are passed
//! in at construction, never ambient.

mod config;
mod error;
mod service;
mod sink;

pub use config::Config;
pub use error::OrchestratorError;
pub use service::OrderService;
pub use sink::{EventSink, InMemoryEventSink, SinkError};

/// Initializes the global tracing subscriber with an env-filter,
/// falling back to the given directive when `RUST_LOG` is unset.
pub fn init_tracing(default_filter: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter.to_string()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
