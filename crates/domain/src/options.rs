//! European put options held (or written) against an LP position.

use crate::enums::OptionSide;
use crate::error::{ModelError, Result};
use crate::value_objects::Price;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Terms of a put option position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PutOption {
    /// Exercise price, in quote units.
    pub strike: Decimal,
    /// Premium per contract, paid when buying and received when selling.
    pub premium: Decimal,
    /// Number of contracts.
    pub quantity: Decimal,
    pub side: OptionSide,
}

impl PutOption {
    /// Creates validated option terms.
    ///
    /// # Errors
    ///
    /// [`ModelError::InvalidParameter`] if the strike or quantity is not
    /// positive or the premium is negative.
    pub fn new(
        strike: Decimal,
        premium: Decimal,
        quantity: Decimal,
        side: OptionSide,
    ) -> Result<Self> {
        if strike <= Decimal::ZERO {
            return Err(ModelError::invalid(format!("strike must be positive, got {strike}")));
        }
        if premium < Decimal::ZERO {
            return Err(ModelError::invalid(format!(
                "premium must not be negative, got {premium}"
            )));
        }
        if quantity <= Decimal::ZERO {
            return Err(ModelError::invalid(format!(
                "quantity must be positive, got {quantity}"
            )));
        }
        Ok(Self {
            strike,
            premium,
            quantity,
            side,
        })
    }

    /// Intrinsic value per contract: `max(strike - price, 0)`.
    pub fn intrinsic_value(&self, price: Price) -> Decimal {
        (self.strike - price.value).max(Decimal::ZERO)
    }

    /// Profit or loss of the whole position at expiry, premium included.
    ///
    /// * Buy: `(intrinsic - premium) * quantity`
    /// * Sell: `(premium - intrinsic) * quantity`
    pub fn payoff_at_expiry(&self, price: Price) -> Result<Decimal> {
        let intrinsic = self.intrinsic_value(price);
        let per_contract = match self.side {
            OptionSide::Buy => intrinsic - self.premium,
            OptionSide::Sell => self.premium - intrinsic,
        };
        per_contract
            .checked_mul(self.quantity)
            .ok_or(ModelError::Overflow("put payoff"))
    }

    /// Price at which a long put breaks even.
    pub fn breakeven(&self) -> Price {
        Price::new(self.strike - self.premium)
    }
}
