//! Game system rules for derived statistics.
//!
//! `dnd5e` carries the canonical calculations; `traits` defines the seam the
//! check resolver depends on.

mod dnd5e;
mod traits;

pub use dnd5e::{ability_modifier, attack_bonus, final_ability_score, proficiency_bonus, Dnd5eSystem};
pub use traits::{CalculationEngine, RestType};
