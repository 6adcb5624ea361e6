//! Outbound notification port.

use async_trait::async_trait;
use tablekeep_domain::SessionId;

use super::error::BroadcastError;
use super::types::CharacterBroadcast;

/// Realtime sink for committed transitions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BroadcastPort: Send + Sync {
    /// Deliver to every current participant of `session`. Returns how many
    /// receivers were reached; zero is not an error.
    async fn publish(
        &self,
        session: SessionId,
        message: CharacterBroadcast,
    ) -> Result<usize, BroadcastError>;
}
