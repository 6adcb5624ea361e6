//! Unified error types for the domain layer
//!
//! Every engine operation either applies its whole transition or returns one of
//! these errors with the input snapshot untouched. All variants are recoverable.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input failed a defensive check (e.g. a pool arriving with used > max)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A pool is already at capacity
    #[error("Pool exhausted: {pool} ({used}/{max} used)")]
    PoolExhausted { pool: String, used: u8, max: u8 },

    /// Manual restore on a pool that has nothing spent
    #[error("Nothing to restore: {pool} has no spent uses")]
    NothingToRestore { pool: String },

    /// Purchase exceeds current holdings (amounts in copper pieces)
    #[error("Insufficient funds: need {required} cp, have {available} cp")]
    InsufficientFunds { required: u128, available: u128 },

    /// No pool data exists for the referenced key
    #[error("Untracked ability: {0}")]
    UntrackedAbility(String),
}

impl DomainError {
    /// Creates a validation error for invariant violations on input.
    ///
    /// # Example
    /// ```ignore
    /// if pool.used > pool.max {
    ///     return Err(DomainError::validation("used exceeds max"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a pool exhausted error
    pub fn pool_exhausted(pool: impl ToString, used: u8, max: u8) -> Self {
        Self::PoolExhausted {
            pool: pool.to_string(),
            used,
            max,
        }
    }

    /// Create a nothing to restore error
    pub fn nothing_to_restore(pool: impl ToString) -> Self {
        Self::NothingToRestore {
            pool: pool.to_string(),
        }
    }

    /// Create an insufficient funds error
    pub fn insufficient_funds(required: u128, available: u128) -> Self {
        Self::InsufficientFunds {
            required,
            available,
        }
    }

    /// A currency total whose gold count does not fit the coin purse.
    pub fn currency_overflow(minor_units: u128) -> Self {
        Self::Validation(format!(
            "currency total of {minor_units} cp exceeds the largest representable purse"
        ))
    }

    /// Create an untracked ability signal
    pub fn untracked(pool: impl ToString) -> Self {
        Self::UntrackedAbility(pool.to_string())
    }

    /// Whether this is an informational no-op rather than a rejected action.
    ///
    /// Callers probe abilities speculatively, so an untracked key is reported
    /// but should not surface as a failure.
    pub fn is_informational(&self) -> bool {
        matches!(self, Self::UntrackedAbility(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_formats_message() {
        let err = DomainError::validation("used exceeds max");
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(err.to_string(), "Validation failed: used exceeds max");
    }

    #[test]
    fn pool_exhausted_names_the_pool() {
        let err = DomainError::pool_exhausted("feature:rage", 2, 2);
        assert_eq!(err.to_string(), "Pool exhausted: feature:rage (2/2 used)");
        assert!(!err.is_informational());
    }

    #[test]
    fn insufficient_funds_reports_copper() {
        let err = DomainError::insufficient_funds(1250, 900);
        assert_eq!(
            err.to_string(),
            "Insufficient funds: need 1250 cp, have 900 cp"
        );
    }

    #[test]
    fn untracked_is_informational() {
        let err = DomainError::untracked("trait:breath_weapon");
        assert!(err.is_informational());
        assert!(!DomainError::nothing_to_restore("slot:1").is_informational());
    }
}
