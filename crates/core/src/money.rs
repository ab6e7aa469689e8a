//! Money amounts in the smallest currency unit.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// Non-negative amount in the smallest unit of the store's base currency.
///
/// All arithmetic is checked; an overflow is reported as an invariant
/// violation rather than wrapping.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    pub const fn amount(self) -> u64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Money) -> DomainResult<Money> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or_else(|| DomainError::invariant("money overflow on add"))
    }

    pub fn checked_sub(self, other: Money) -> DomainResult<Money> {
        self.0
            .checked_sub(other.0)
            .map(Money)
            .ok_or_else(|| DomainError::invariant("money underflow on subtract"))
    }

    pub fn checked_mul(self, factor: u64) -> DomainResult<Money> {
        self.0
            .checked_mul(factor)
            .map(Money)
            .ok_or_else(|| DomainError::invariant("money overflow on multiply"))
    }

    /// `floor(self * percent / 100)`.
    pub fn percent_floor(self, percent: u8) -> DomainResult<Money> {
        let scaled = u128::from(self.0) * u128::from(percent) / 100;
        u64::try_from(scaled)
            .map(Money)
            .map_err(|_| DomainError::invariant("money overflow on percentage"))
    }
}

impl From<u64> for Money {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}
