use amm_il_domain::{ModelError, Result};
use amm_il_domain::model::PositionModel;
use amm_il_domain::value_objects::{Price, ValuationSample};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use rust_decimal::Decimal;
use rust_decimal::prelude::*;

pub trait PricePathGenerator {
    fn generate(&mut self, steps: usize) -> Result<Vec<Price>>;
}

/// Geometric Brownian motion price model.
#[derive(Debug, Clone)]
pub struct GeometricBrownianMotion {
    pub initial_price: Decimal,
    pub drift: f64,      // annualized drift (mu)
    pub volatility: f64, // annualized volatility (sigma)
    pub time_step: f64,  // time step in years (dt) e.g. 1/365 for daily
    rng: StdRng,
}

impl GeometricBrownianMotion {
    pub fn new(initial_price: Decimal, drift: f64, volatility: f64, time_step: f64) -> Self {
        Self {
            initial_price,
            drift,
            volatility,
            time_step,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Same model with a reproducible random stream.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }
}

impl PricePathGenerator for GeometricBrownianMotion {
    /// Returns `steps + 1` prices, the first being the initial price.
    ///
    /// Fails with [`ModelError::Overflow`] when a step leaves the range a
    /// positive `Decimal` can hold (infinite or underflowed to zero).
    fn generate(&mut self, steps: usize) -> Result<Vec<Price>> {
        let mut prices = Vec::with_capacity(steps + 1);
        prices.push(Price::new(self.initial_price));

        let dt = self.time_step;
        let drift_term = (self.drift - 0.5 * self.volatility.powi(2)) * dt;
        let vol_term = self.volatility * dt.sqrt();

        let mut current_price = self
            .initial_price
            .to_f64()
            .ok_or(ModelError::Overflow("gbm initial price"))?;

        for _ in 0..steps {
            let z: f64 = self.rng.sample(StandardNormal);
            current_price *= (drift_term + vol_term * z).exp();

            // f64 drift from Decimal is accepted here; the domain object stays Decimal.
            let p = Decimal::from_f64(current_price)
                .filter(|p| *p > Decimal::ZERO)
                .ok_or(ModelError::Overflow("gbm price step"))?;
            prices.push(Price::new(p));
        }

        Ok(prices)
    }
}

/// Replays a fixed list of prices.
#[derive(Debug, Clone)]
pub struct DeterministicPricePath {
    pub prices: Vec<Price>,
}

impl DeterministicPricePath {
    pub fn new(prices: Vec<Decimal>) -> Self {
        Self {
            prices: prices.into_iter().map(Price::new).collect(),
        }
    }
}

impl PricePathGenerator for DeterministicPricePath {
    fn generate(&mut self, _steps: usize) -> Result<Vec<Price>> {
        Ok(self.prices.clone())
    }
}

/// Values the position at every price of a path, in path order.
pub fn value_along_path(model: &PositionModel, prices: &[Price]) -> Result<Vec<ValuationSample>> {
    prices.iter().map(|p| model.value_at(*p)).collect()
}
