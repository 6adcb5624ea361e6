//! Tablekeep Engine library.
//!
//! Runs the pure rules in `tablekeep-domain` as versioned, atomic
//! transitions over character snapshots and notifies session participants
//! after each commit.
//!
//! ## Structure
//!
//! - `use_cases/` - Transition runner plus resource, rest, check and shop use cases
//! - `infrastructure/` - Ports, in-memory adapters, configuration, tracing
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

/// Test fixtures module shared by use case tests.
#[cfg(test)]
pub mod test_fixtures;

pub use app::App;
pub use infrastructure::config::EngineConfig;
pub use infrastructure::telemetry::init_tracing;
pub use use_cases::EngineError;
