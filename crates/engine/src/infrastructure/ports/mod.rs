//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Snapshot persistence (in-memory today, any versioned store tomorrow)
//! - Session broadcast (tokio channels, or an external pub/sub)
//! - Clock/Random (for testing)

mod error;
mod external;
mod repos;
mod testing;
mod types;

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::CharacterSnapshotRepo;

// =============================================================================
// Types
// =============================================================================
pub use types::{CharacterBroadcast, SnapshotVersion, Versioned};

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::BroadcastPort;

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use external::MockBroadcastPort;
#[cfg(test)]
pub use repos::MockCharacterSnapshotRepo;
#[cfg(test)]
pub use testing::{MockClockPort, MockRandomPort};

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::{ClockPort, RandomPort};

// =============================================================================
// Error Types
// =============================================================================
pub use error::{BroadcastError, RepoError};
