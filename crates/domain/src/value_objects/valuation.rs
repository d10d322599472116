use crate::value_objects::price::Price;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// HODL and LP valuation of a deposit at one price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationSample {
    pub price: Price,
    pub hodl_value: Decimal,
    pub lp_value: Decimal,
    /// `1 - lp / hodl`; zero means no loss, positive means the LP trails HODL.
    pub impermanent_loss: Decimal,
}

impl ValuationSample {
    /// Impermanent loss scaled to percent.
    pub fn impermanent_loss_pct(&self) -> Decimal {
        self.impermanent_loss * Decimal::ONE_HUNDRED
    }

    /// Absolute shortfall of the LP position, in quote units.
    pub fn value_gap(&self) -> Decimal {
        self.hodl_value - self.lp_value
    }
}
