//! Per-session realtime fan-out over tokio broadcast channels.
//!
//! A subscription is a [`SessionHandle`] owned by whoever subscribed. Drop
//! the handle to unsubscribe; close the session to end every handle.

use async_trait::async_trait;
use dashmap::DashMap;
use tablekeep_domain::SessionId;
use tokio::sync::broadcast;

use crate::infrastructure::ports::{BroadcastError, BroadcastPort, CharacterBroadcast};

pub const DEFAULT_BROADCAST_CAPACITY: usize = 64;

#[derive(Debug)]
pub struct SessionBroadcaster {
    channels: DashMap<SessionId, broadcast::Sender<CharacterBroadcast>>,
    capacity: usize,
}

impl Default for SessionBroadcaster {
    fn default() -> Self {
        Self::new(DEFAULT_BROADCAST_CAPACITY)
    }
}

impl SessionBroadcaster {
    /// `capacity` is the per-session backlog; zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        Self {
            channels: DashMap::new(),
            capacity: capacity.max(1),
        }
    }

    /// Join `session`, creating its channel on first use. Only messages
    /// published after this call are received.
    pub fn subscribe(&self, session: SessionId) -> SessionHandle {
        let receiver = self
            .channels
            .entry(session)
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .subscribe();
        tracing::debug!(session_id = %session, "Session subscriber added");
        SessionHandle { session, receiver }
    }

    /// Live receivers for `session`; zero when it has no channel.
    pub fn subscriber_count(&self, session: SessionId) -> usize {
        self.channels
            .get(&session)
            .map(|sender| sender.receiver_count())
            .unwrap_or(0)
    }

    /// Drop the session's channel. Existing handles drain their backlog and
    /// then report the end of the stream.
    pub fn close(&self, session: SessionId) -> bool {
        let removed = self.channels.remove(&session).is_some();
        if removed {
            tracing::debug!(session_id = %session, "Session channel closed");
        }
        removed
    }
}

#[async_trait]
impl BroadcastPort for SessionBroadcaster {
    async fn publish(
        &self,
        session: SessionId,
        message: CharacterBroadcast,
    ) -> Result<usize, BroadcastError> {
        let Some(sender) = self.channels.get(&session) else {
            tracing::trace!(session_id = %session, "No channel for session");
            return Ok(0);
        };
        match sender.send(message) {
            Ok(delivered) => Ok(delivered),
            Err(_) => {
                // No live receivers - normal between subscriptions
                tracing::trace!(session_id = %session, "No subscribers for session");
                Ok(0)
            }
        }
    }
}

/// One participant's subscription to a session.
#[derive(Debug)]
pub struct SessionHandle {
    session: SessionId,
    receiver: broadcast::Receiver<CharacterBroadcast>,
}

impl SessionHandle {
    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Next message, or `None` once the session is closed. A subscriber
    /// that falls behind skips the overwritten messages.
    pub async fn recv(&mut self) -> Option<CharacterBroadcast> {
        loop {
            match self.receiver.recv().await {
                Ok(message) => return Some(message),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(session_id = %self.session, skipped, "Session subscriber lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Non-blocking variant of [`SessionHandle::recv`].
    pub fn try_recv(&mut self) -> Option<CharacterBroadcast> {
        loop {
            match self.receiver.try_recv() {
                Ok(message) => return Some(message),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(session_id = %self.session, skipped, "Session subscriber lagged");
                }
                Err(_) => return None,
            }
        }
    }
}
