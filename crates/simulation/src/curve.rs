//! Valuation curves over a linear price domain.
//!
//! The generator samples a [`PositionModel`] at every point of a
//! [`PriceDomain`] and materialises the result, so callers get random access
//! to the HODL, LP and impermanent loss series at once.

use amm_il_domain::Result;
use amm_il_domain::model::PositionModel;
use amm_il_domain::value_objects::{Price, PriceDomain, ValuationSample};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Samples a position model over a price domain.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurveGenerator;

impl CurveGenerator {
    /// Prices the curve is evaluated at, ascending and endpoint-inclusive.
    pub fn sample_prices(domain: &PriceDomain) -> Result<Vec<Price>> {
        domain.points()
    }

    /// Values `model` at each of the `domain.count` points.
    ///
    /// Exactly one sample per point is produced, in ascending price order.
    ///
    /// # Errors
    ///
    /// * `InvalidParameter` if the domain is malformed
    /// * `Domain` if any sampled price is not positive; nothing is skipped
    pub fn generate(model: &PositionModel, domain: &PriceDomain) -> Result<ValuationCurve> {
        let samples = Self::sample_prices(domain)?
            .into_iter()
            .map(|price| model.value_at(price))
            .collect::<Result<Vec<_>>>()?;

        Ok(ValuationCurve { samples })
    }
}

/// Aligned HODL / LP / impermanent loss series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationCurve {
    pub samples: Vec<ValuationSample>,
}

impl ValuationCurve {
    /// Number of samples, equal to the domain's point count.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True only for a curve built from no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<&ValuationSample> {
        self.samples.get(index)
    }

    /// Samples in ascending price order.
    pub fn iter(&self) -> std::slice::Iter<'_, ValuationSample> {
        self.samples.iter()
    }

    /// Sampled prices, aligned with the value series.
    pub fn prices(&self) -> Vec<Price> {
        self.samples.iter().map(|s| s.price).collect()
    }

    /// Value of holding the initial deposit, per sample.
    pub fn hodl_values(&self) -> Vec<Decimal> {
        self.samples.iter().map(|s| s.hodl_value).collect()
    }

    /// Value of the pool position, per sample.
    pub fn lp_values(&self) -> Vec<Decimal> {
        self.samples.iter().map(|s| s.lp_value).collect()
    }

    /// Impermanent loss ratios (not scaled to percent).
    pub fn impermanent_losses(&self) -> Vec<Decimal> {
        self.samples.iter().map(|s| s.impermanent_loss).collect()
    }

    /// Sample with the largest impermanent loss.
    pub fn worst_loss(&self) -> Option<&ValuationSample> {
        self.samples.iter().max_by_key(|s| s.impermanent_loss)
    }
}

impl Index<usize> for ValuationCurve {
    type Output = ValuationSample;

    fn index(&self, index: usize) -> &Self::Output {
        &self.samples[index]
    }
}

impl IntoIterator for ValuationCurve {
    type Item = ValuationSample;
    type IntoIter = std::vec::IntoIter<ValuationSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValuationCurve {
    type Item = &'a ValuationSample;
    type IntoIter = std::slice::Iter<'a, ValuationSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
