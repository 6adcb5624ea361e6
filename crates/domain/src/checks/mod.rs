//! Contested skill checks: stealth, pilfering and passive awareness.

mod keywords;
mod outcome;
mod perception;
mod resolver;

pub use keywords::action_breaks_stealth;
pub use outcome::{CheckKind, CheckOutcome, CheckRoll};
pub use perception::{NpcPerceptionTable, DEFAULT_NPC_PASSIVE_PERCEPTION};
pub use resolver::{CheckResolver, ARMOR_STEALTH_PENALTY, STEAL_MARGIN};
