use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A price of the base asset quoted in the quote asset (e.g. ETH in USDC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Price {
    pub value: Decimal,
}

impl Price {
    pub fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Returns true when the price is strictly above zero.
    pub fn is_positive(&self) -> bool {
        self.value > Decimal::ZERO
    }
}

impl From<Decimal> for Price {
    fn from(value: Decimal) -> Self {
        Self { value }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
