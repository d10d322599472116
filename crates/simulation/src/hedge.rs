//! LP value overlaid with a put option payoff at expiry.

use crate::curve::CurveGenerator;
use amm_il_domain::Result;
use amm_il_domain::model::PositionModel;
use amm_il_domain::options::PutOption;
use amm_il_domain::value_objects::{Price, PriceDomain};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// LP value, put payoff and their sum at one price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HedgedSample {
    pub price: Price,
    pub lp_value: Decimal,
    pub put_value: Decimal,
    pub combined_value: Decimal,
}

/// Samples an LP position together with a put option.
#[derive(Debug, Clone, Copy, Default)]
pub struct HedgedCurveGenerator;

impl HedgedCurveGenerator {
    /// Values the LP share and the put at each point of `domain`.
    ///
    /// Spacing follows [`CurveGenerator::sample_prices`]. Put ranges usually
    /// start at zero, so the LP leg takes its limit value of zero there;
    /// negative prices are still rejected.
    pub fn generate(
        model: &PositionModel,
        put: &PutOption,
        domain: &PriceDomain,
    ) -> Result<Vec<HedgedSample>> {
        CurveGenerator::sample_prices(domain)?
            .into_iter()
            .map(|price| Self::sample(model, put, price))
            .collect()
    }

    fn sample(model: &PositionModel, put: &PutOption, price: Price) -> Result<HedgedSample> {
        let lp_value = model.lp_value_or_limit(price)?;
        let put_value = put.payoff_at_expiry(price)?;
        Ok(HedgedSample {
            price,
            lp_value,
            put_value,
            combined_value: lp_value + put_value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amm_il_domain::enums::OptionSide;
    use amm_il_domain::value_objects::DepositParameters;
    use rust_decimal_macros::dec;

    fn model() -> PositionModel {
        PositionModel::create(DepositParameters::new(dec!(1600), dec!(10000)).unwrap()).unwrap()
    }

    #[test]
    fn test_combined_is_sum() {
        let put = PutOption::new(dec!(1400), dec!(50), dec!(3), OptionSide::Buy).unwrap();
        let domain = PriceDomain::new(dec!(800), dec!(3200), 25).unwrap();

        let samples = HedgedCurveGenerator::generate(&model(), &put, &domain).unwrap();

        assert_eq!(samples.len(), 25);
        for s in &samples {
            assert_eq!(s.combined_value, s.lp_value + s.put_value);
            assert_eq!(s.put_value, put.payoff_at_expiry(s.price).unwrap());
        }
    }

    #[test]
    fn test_long_put_cushions_downside() {
        let m = model();
        let put = PutOption::new(dec!(1600), dec!(100), dec!(3.125), OptionSide::Buy).unwrap();
        let domain = PriceDomain::new(dec!(800), dec!(1600), 2).unwrap();

        let samples = HedgedCurveGenerator::generate(&m, &put, &domain).unwrap();
        let low = samples[0];

        // (1600 - 800 - 100) * 3.125
        assert_eq!(low.put_value, dec!(2187.5));
        assert!(low.combined_value > low.lp_value);

        // At the strike only the premium is lost
        assert_eq!(samples[1].put_value, dec!(-312.5));
    }

    #[test]
    fn test_hedge_over_merged_domain() {
        let put = PutOption::new(dec!(1600), dec!(80), dec!(1), OptionSide::Sell).unwrap();
        let lp_domain = PriceDomain::new(dec!(800), dec!(2400), 200).unwrap();
        let put_domain = PriceDomain::new(dec!(400), dec!(3200), 300).unwrap();
        let domain = lp_domain.merged_with(&put_domain, 300).unwrap();

        let samples = HedgedCurveGenerator::generate(&model(), &put, &domain).unwrap();

        assert_eq!(samples.len(), 300);
        assert_eq!(samples[0].price.value, dec!(400));
        assert_eq!(samples[299].price.value, dec!(3200));
        // A written put keeps the full premium above the strike
        assert_eq!(samples[299].put_value, dec!(80));
    }

    #[test]
    fn test_put_range_starting_at_zero() {
        let put = PutOption::new(dec!(1600), dec!(5), dec!(1), OptionSide::Buy).unwrap();
        let lp_domain = PriceDomain::new(dec!(800), dec!(2400), 200).unwrap();
        let put_domain = PriceDomain::new(dec!(0), dec!(3200), 300).unwrap();
        let domain = lp_domain.merged_with(&put_domain, 300).unwrap();

        let samples = HedgedCurveGenerator::generate(&model(), &put, &domain).unwrap();

        assert_eq!(samples.len(), 300);
        let first = samples[0];
        assert_eq!(first.price.value, Decimal::ZERO);
        assert_eq!(first.lp_value, Decimal::ZERO);
        // (1600 - 0 - 5) * 1
        assert_eq!(first.put_value, dec!(1595));
        assert_eq!(first.combined_value, dec!(1595));
        assert!(samples[1].lp_value > Decimal::ZERO);
    }

    #[test]
    fn test_negative_price_rejected_by_lp_leg() {
        let put = PutOption::new(dec!(100), dec!(5), dec!(1), OptionSide::Buy).unwrap();
        let domain = PriceDomain::new(dec!(-10), dec!(200), 300).unwrap();
        assert!(HedgedCurveGenerator::generate(&model(), &put, &domain).is_err());
    }
}
