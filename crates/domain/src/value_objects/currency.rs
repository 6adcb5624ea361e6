//! Three-denomination currency and the ledger arithmetic over it.
//!
//! Every amount is normalized through copper pieces ("minor units"):
//! 1 gp = 100 cp, 1 sp = 10 cp. Decomposition always yields the unique
//! minimal-coin representation, so no value is lost across a round trip.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

pub const COPPER_PER_GOLD: u64 = 100;
pub const COPPER_PER_SILVER: u64 = 10;

/// Coin holdings or a price, in gold/silver/copper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    #[serde(default)]
    pub gold: u64,
    #[serde(default)]
    pub silver: u64,
    #[serde(default)]
    pub copper: u64,
}

impl Currency {
    /// Coins as given, not normalized.
    pub fn new(gold: u64, silver: u64, copper: u64) -> Self {
        Self {
            gold,
            silver,
            copper,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn gold(gold: u64) -> Self {
        Self::new(gold, 0, 0)
    }

    /// Total value in copper pieces. Exact for any coin counts.
    pub fn to_minor_units(&self) -> u128 {
        to_minor_units(self.gold, self.silver, self.copper)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} gp {} sp {} cp", self.gold, self.silver, self.copper)
    }
}

/// `gold*100 + silver*10 + copper`
///
/// Widened to `u128` so that no combination of `u64` coin counts can
/// overflow.
pub fn to_minor_units(gold: u64, silver: u64, copper: u64) -> u128 {
    u128::from(gold) * u128::from(COPPER_PER_GOLD)
        + u128::from(silver) * u128::from(COPPER_PER_SILVER)
        + u128::from(copper)
}

/// Canonical decomposition of a copper total into the fewest coins.
///
/// Fails when the gold count would not fit a `u64`; the value is never
/// truncated.
pub fn from_minor_units(total: u128) -> Result<Currency, DomainError> {
    let per_gold = u128::from(COPPER_PER_GOLD);
    let per_silver = u128::from(COPPER_PER_SILVER);
    let gold = u64::try_from(total / per_gold).map_err(|_| DomainError::currency_overflow(total))?;
    // both remainders are below 10
    let silver = ((total % per_gold) / per_silver) as u64;
    let copper = (total % per_silver) as u64;
    Ok(Currency {
        gold,
        silver,
        copper,
    })
}

/// Compares total value, so change can be made from any denomination.
pub fn can_afford(holdings: &Currency, cost: &Currency) -> bool {
    holdings.to_minor_units() >= cost.to_minor_units()
}

/// Deduct `cost` from `holdings`, making change as needed.
pub fn purchase(holdings: &Currency, cost: &Currency) -> Result<Currency, DomainError> {
    let available = holdings.to_minor_units();
    let required = cost.to_minor_units();
    if available < required {
        return Err(DomainError::insufficient_funds(required, available));
    }
    from_minor_units(available - required)
}

/// Credit `cost` back to `holdings`. Fails only when the credited total
/// has more gold than a `u64` holds.
pub fn refund(holdings: &Currency, cost: &Currency) -> Result<Currency, DomainError> {
    from_minor_units(holdings.to_minor_units() + cost.to_minor_units())
}
