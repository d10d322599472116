use crate::value_objects::ValuationSample;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Impermanent loss expressed both in quote units and as a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpermanentLoss {
    pub absolute_loss: Decimal,
    pub percentage_loss: Decimal,
}

impl From<&ValuationSample> for ImpermanentLoss {
    fn from(sample: &ValuationSample) -> Self {
        Self {
            absolute_loss: sample.value_gap(),
            percentage_loss: sample.impermanent_loss_pct(),
        }
    }
}
