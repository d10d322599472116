use crate::price_path::{GeometricBrownianMotion, PricePathGenerator};
use amm_il_domain::model::PositionModel;
use amm_il_domain::value_objects::DepositParameters;
use amm_il_domain::{ModelError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Runs many GBM paths and records the impermanent loss at each path's end.
#[derive(Debug, Clone)]
pub struct MonteCarloRunner {
    pub params: DepositParameters,
    pub drift: f64,
    pub volatility: f64,
    pub time_step: f64,
    pub steps: usize,
    pub iterations: usize,
    pub seed: Option<u64>,
}

/// Distribution of impermanent loss at the horizon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IlDistribution {
    pub mean: Decimal,
    pub median: Decimal,
    pub percentile_95: Decimal, // 95% of paths lose no more than this
    pub worst: Decimal,
    pub iterations: usize,
}

impl MonteCarloRunner {
    pub fn run(&self) -> Result<IlDistribution> {
        if self.iterations == 0 {
            return Err(ModelError::InvalidParameter(
                "monte carlo needs at least one iteration".to_string(),
            ));
        }

        let model = PositionModel::create(self.params)?;
        let mut gbm = GeometricBrownianMotion::new(
            self.params.initial_price,
            self.drift,
            self.volatility,
            self.time_step,
        );
        if let Some(seed) = self.seed {
            gbm = gbm.with_seed(seed);
        }

        let mut losses: Vec<Decimal> = Vec::with_capacity(self.iterations);
        for _ in 0..self.iterations {
            let path = gbm.generate(self.steps)?;
            let final_price = *path
                .last()
                .ok_or_else(|| ModelError::InvalidParameter("empty price path".to_string()))?;
            losses.push(model.impermanent_loss(final_price)?);
        }

        Ok(Self::aggregate(losses))
    }

    fn aggregate(mut losses: Vec<Decimal>) -> IlDistribution {
        let count = losses.len();
        let total: Decimal = losses.iter().sum();
        let mean = total / Decimal::from(count);

        // Sort for percentiles
        losses.sort();

        // Even counts average the two middle values.
        let median = if count % 2 == 0 {
            (losses[count / 2 - 1] + losses[count / 2]) / Decimal::TWO
        } else {
            losses[count / 2]
        };
        let p95_idx = (count * 95).div_ceil(100).saturating_sub(1);
        let percentile_95 = losses[p95_idx.min(count - 1)];
        let worst = losses[count - 1];

        IlDistribution {
            mean,
            median,
            percentile_95,
            worst,
            iterations: count,
        }
    }
}
