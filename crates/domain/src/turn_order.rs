//! Deterministic party ordering for turns and display.

use std::cmp::Ordering;

use crate::entities::{Character, PartyMember};
use crate::value_objects::Ability;

/// Abilities compared in priority order, highest score first.
const PRIORITY: [Ability; 3] = [Ability::Wisdom, Ability::Intelligence, Ability::Charisma];

/// Order party members.
///
/// Members with a resolved character come first, by final WIS, INT and CHA
/// (descending), then character id. Members without one follow, by display
/// name then player id. The result does not depend on input order.
pub fn order(members: &[PartyMember]) -> Vec<PartyMember> {
    let mut ordered = members.to_vec();
    ordered.sort_by(compare_members);
    ordered
}

/// Total order used by [`order`]. Members with a character come first.
pub fn compare_members(a: &PartyMember, b: &PartyMember) -> Ordering {
    match (&a.character, &b.character) {
        (Some(left), Some(right)) => compare_characters(left, right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a
            .display_name
            .cmp(&b.display_name)
            .then_with(|| a.player_id.cmp(&b.player_id)),
    }
}

fn compare_characters(a: &Character, b: &Character) -> Ordering {
    PRIORITY
        .iter()
        .map(|ability| b.ability_score(*ability).cmp(&a.ability_score(*ability)))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.id.cmp(&b.id))
}
