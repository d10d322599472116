use crate::error::{ModelError, Result};
use crate::value_objects::price::Price;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A linearly spaced, endpoint-inclusive set of prices to sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceDomain {
    pub min: Decimal,
    pub max: Decimal,
    pub count: usize,
}

impl PriceDomain {
    /// Creates a validated domain.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidParameter`] if `min > max` or `count == 0`.
    pub fn new(min: Decimal, max: Decimal, count: usize) -> Result<Self> {
        let domain = Self { min, max, count };
        domain.validate()?;
        Ok(domain)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min > self.max {
            return Err(ModelError::invalid(format!(
                "price domain min {} exceeds max {}",
                self.min, self.max
            )));
        }
        if self.count == 0 {
            return Err(ModelError::invalid("price domain needs at least one point"));
        }
        Ok(())
    }

    /// Width of the domain (`max - min`).
    pub fn span(&self) -> Decimal {
        self.max - self.min
    }

    /// Domain covering both `self` and `other`, sampled at `count` points.
    pub fn merged_with(&self, other: &PriceDomain, count: usize) -> Result<Self> {
        Self::new(self.min.min(other.min), self.max.max(other.max), count)
    }

    /// The sampled prices, ascending, first == `min` and last == `max`.
    ///
    /// A single-point domain yields `[min]`.
    pub fn points(&self) -> Result<Vec<Price>> {
        self.validate()?;
        if self.count == 1 {
            return Ok(vec![Price::new(self.min)]);
        }

        let span = self.span();
        let intervals = Decimal::from(self.count - 1);
        (0..self.count)
            .map(|i| {
                // Multiplying before dividing keeps the last point exactly `max`.
                let offset = span
                    .checked_mul(Decimal::from(i))
                    .and_then(|scaled| scaled.checked_div(intervals))
                    .ok_or(ModelError::Overflow("price domain spacing"))?;
                Ok(Price::new(self.min + offset))
            })
            .collect()
    }
}

impl Default for PriceDomain {
    fn default() -> Self {
        Self {
            min: Decimal::from(800),
            max: Decimal::from(3200),
            count: 200,
        }
    }
}
