use crate::error::{ModelError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Deposit-time inputs of one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositParameters {
    /// Price of the base asset at deposit, in quote units. Must be positive.
    pub initial_price: Decimal,
    /// Capital deposited, in quote units. Must not be negative.
    pub total_capital: Decimal,
}

impl DepositParameters {
    /// Creates validated deposit parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidParameter`] if `initial_price <= 0` or
    /// `total_capital < 0`.
    pub fn new(initial_price: Decimal, total_capital: Decimal) -> Result<Self> {
        let params = Self {
            initial_price,
            total_capital,
        };
        params.validate()?;
        Ok(params)
    }

    /// Checks the field invariants.
    pub fn validate(&self) -> Result<()> {
        if self.initial_price <= Decimal::ZERO {
            return Err(ModelError::invalid(format!(
                "initial price must be positive, got {}",
                self.initial_price
            )));
        }
        if self.total_capital < Decimal::ZERO {
            return Err(ModelError::invalid(format!(
                "total capital must not be negative, got {}",
                self.total_capital
            )));
        }
        Ok(())
    }
}
