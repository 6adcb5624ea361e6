//! Domain Events
//!
//! Coarse-grained records of what a transition did to a character. The
//! engine pairs each one with the committed snapshot when notifying other
//! session participants.

pub mod character_events;

pub use character_events::*;
