//! HODL and LP valuation of a 50/50 deposit.
//!
//! A [`PositionModel`] fixes the deposit split and the pool invariant once,
//! then values the position at any number of prices without further state.

use crate::error::{ModelError, Result};
use crate::math::constant_product;
use crate::value_objects::{DepositParameters, Price, ValuationSample};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The two legs of a 50/50 deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionSplit {
    /// Half the capital, in quote units (e.g. USDC).
    pub base_amount: Decimal,
    /// Half the capital converted at the initial price, in base units (e.g. ETH).
    pub quote_amount: Decimal,
}

/// Values a deposit as held assets and as a constant-product LP share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PositionModel {
    params: DepositParameters,
    position: PositionSplit,
    k: Decimal,
}

impl PositionModel {
    /// Builds the model and its invariant constant `k = base_amount * quote_amount`.
    ///
    /// # Errors
    ///
    /// * [`ModelError::InvalidParameter`] if `initial_price <= 0` or `total_capital < 0`
    /// * [`ModelError::Overflow`] if a derived quantity does not fit a `Decimal`
    pub fn create(params: DepositParameters) -> Result<Self> {
        params.validate()?;

        let (base_amount, quote_amount) = constant_product::split_deposit(&params)?;
        let k = constant_product::calculate_k(base_amount, quote_amount)?;

        Ok(Self {
            params,
            position: PositionSplit {
                base_amount,
                quote_amount,
            },
            k,
        })
    }

    /// The deposit the model was built from.
    pub fn params(&self) -> &DepositParameters {
        &self.params
    }

    /// The 50/50 split of the deposit.
    pub fn position(&self) -> &PositionSplit {
        &self.position
    }

    /// The invariant constant `k`.
    pub fn invariant(&self) -> Decimal {
        self.k
    }

    /// Value of the untouched deposit: `base_amount + quote_amount * price`.
    ///
    /// Negative prices are not rejected; the result is propagated as is.
    pub fn hodl_value(&self, price: Price) -> Result<Decimal> {
        self.position
            .quote_amount
            .checked_mul(price.value)
            .and_then(|quote_value| quote_value.checked_add(self.position.base_amount))
            .ok_or(ModelError::Overflow("hodl value"))
    }

    /// Pool reserves `(x, y)` after arbitrage has moved the pool to `price`.
    ///
    /// # Errors
    ///
    /// [`ModelError::Domain`] if `price <= 0`.
    pub fn reserves_at(&self, price: Price) -> Result<(Decimal, Decimal)> {
        constant_product::reserves_at_price(self.k, price)
    }

    /// Value of the LP share: `x + y * price` with `x = sqrt(k * price)` and
    /// `y = sqrt(k / price)`.
    ///
    /// # Errors
    ///
    /// [`ModelError::Domain`] if `price <= 0`.
    pub fn lp_value(&self, price: Price) -> Result<Decimal> {
        let (x, y) = self.reserves_at(price)?;
        y.checked_mul(price.value)
            .and_then(|y_value| y_value.checked_add(x))
            .ok_or(ModelError::Overflow("lp value"))
    }

    /// LP value with the `price -> 0` limit filled in.
    ///
    /// Both `sqrt(k * price)` and `sqrt(k / price) * price` tend to zero, so a
    /// price of exactly zero is valued at zero. Negative prices still fail.
    ///
    /// # Errors
    ///
    /// [`ModelError::Domain`] if `price < 0`.
    pub fn lp_value_or_limit(&self, price: Price) -> Result<Decimal> {
        if price.value.is_zero() {
            return Ok(Decimal::ZERO);
        }
        self.lp_value(price)
    }

    /// Relative shortfall `1 - lp / hodl`.
    ///
    /// Returns zero whenever the HODL value is not positive (zero capital or
    /// a negative price). The guard is checked before the LP value is
    /// computed, so those inputs never surface a domain error.
    ///
    /// # Errors
    ///
    /// [`ModelError::Domain`] if the HODL value is positive and `price <= 0`.
    pub fn impermanent_loss(&self, price: Price) -> Result<Decimal> {
        let hodl = self.hodl_value(price)?;
        if hodl <= Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }
        let lp = self.lp_value(price)?;
        Self::loss_ratio(hodl, lp)
    }

    /// All three valuations at `price`.
    ///
    /// A sample always carries a real LP value, so unlike
    /// [`impermanent_loss`](Self::impermanent_loss) this rejects every
    /// `price <= 0`, zero capital included.
    ///
    /// # Errors
    ///
    /// [`ModelError::Domain`] if `price <= 0`.
    pub fn value_at(&self, price: Price) -> Result<ValuationSample> {
        let hodl_value = self.hodl_value(price)?;
        let lp_value = self.lp_value(price)?;
        let impermanent_loss = Self::loss_ratio(hodl_value, lp_value)?;

        Ok(ValuationSample {
            price,
            hodl_value,
            lp_value,
            impermanent_loss,
        })
    }

    fn loss_ratio(hodl: Decimal, lp: Decimal) -> Result<Decimal> {
        if hodl <= Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }
        lp.checked_div(hodl)
            .map(|ratio| Decimal::ONE - ratio)
            .ok_or(ModelError::Overflow("impermanent loss"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rust_decimal::prelude::FromPrimitive;
    use rust_decimal_macros::dec;

    fn model(initial_price: Decimal, capital: Decimal) -> PositionModel {
        PositionModel::create(DepositParameters::new(initial_price, capital).unwrap()).unwrap()
    }

    fn assert_close(actual: Decimal, expected: Decimal, tolerance: Decimal) {
        let diff = (actual - expected).abs();
        assert!(diff <= tolerance, "{actual} vs {expected} (tolerance {tolerance})");
    }

    #[test]
    fn test_create_derives_split_and_invariant() {
        let m = model(dec!(1600), dec!(10000));
        assert_eq!(m.position().base_amount, dec!(5000));
        assert_eq!(m.position().quote_amount, dec!(3.125));
        assert_eq!(m.invariant(), dec!(15625));
        assert_eq!(m.params().initial_price, dec!(1600));
    }

    #[test]
    fn test_create_rejects_bad_params() {
        let zero_price = DepositParameters {
            initial_price: Decimal::ZERO,
            total_capital: dec!(10000),
        };
        assert!(matches!(
            PositionModel::create(zero_price),
            Err(ModelError::InvalidParameter(_))
        ));

        let negative_capital = DepositParameters {
            initial_price: dec!(1600),
            total_capital: dec!(-1),
        };
        assert!(PositionModel::create(negative_capital).is_err());
    }

    #[test]
    fn test_values_at_initial_price() {
        let m = model(dec!(1600), dec!(10000));
        let p = Price::new(dec!(1600));

        assert_eq!(m.hodl_value(p).unwrap(), dec!(10000));
        assert_close(m.lp_value(p).unwrap(), dec!(10000), dec!(0.0000001));
        assert_close(m.impermanent_loss(p).unwrap(), Decimal::ZERO, dec!(0.0000000001));
    }

    #[test]
    fn test_values_when_price_doubles() {
        let m = model(dec!(1600), dec!(10000));
        let p = Price::new(dec!(3200));

        let (x, y) = m.reserves_at(p).unwrap();
        assert_close(x, dec!(7071.07), dec!(0.01));
        assert_close(y, dec!(2.2097), dec!(0.0001));

        assert_eq!(m.hodl_value(p).unwrap(), dec!(15000));
        assert_close(m.lp_value(p).unwrap(), dec!(14142.14), dec!(0.01));
        assert_close(m.impermanent_loss(p).unwrap(), dec!(0.0572), dec!(0.0001));
    }

    #[test]
    fn test_values_when_price_halves() {
        let m = model(dec!(1600), dec!(10000));
        let p = Price::new(dec!(800));

        let (x, y) = m.reserves_at(p).unwrap();
        assert_close(x, dec!(3535.53), dec!(0.01));
        assert_close(y, dec!(4.4194), dec!(0.0001));

        assert_eq!(m.hodl_value(p).unwrap(), dec!(7500));
        assert_close(m.lp_value(p).unwrap(), dec!(7071.07), dec!(0.01));

        let halved = m.impermanent_loss(p).unwrap();
        let doubled = m.impermanent_loss(Price::new(dec!(3200))).unwrap();
        assert_close(halved, doubled, dec!(0.000000001));
    }

    #[test]
    fn test_zero_capital_collapses_to_zero() {
        let m = model(dec!(1600), Decimal::ZERO);
        assert_eq!(m.position().base_amount, Decimal::ZERO);
        assert_eq!(m.position().quote_amount, Decimal::ZERO);
        assert_eq!(m.invariant(), Decimal::ZERO);

        for p in [dec!(0.01), dec!(800), dec!(1600), dec!(3200), dec!(1000000)] {
            let price = Price::new(p);
            assert_eq!(m.hodl_value(price).unwrap(), Decimal::ZERO);
            assert_eq!(m.lp_value(price).unwrap(), Decimal::ZERO);
            assert_eq!(m.impermanent_loss(price).unwrap(), Decimal::ZERO);
        }
    }

    #[test]
    fn test_non_positive_price_is_domain_error() {
        let m = model(dec!(1600), dec!(10000));

        assert_eq!(
            m.lp_value(Price::new(Decimal::ZERO)),
            Err(ModelError::Domain {
                price: Decimal::ZERO
            })
        );
        // -100 still leaves a positive HODL value, so the LP leg is needed
        assert!(m.impermanent_loss(Price::new(dec!(-100))).is_err());
        assert!(m.impermanent_loss(Price::new(Decimal::ZERO)).is_err());
        assert!(m.value_at(Price::new(dec!(-100))).is_err());

        // HODL is still defined below zero, just meaningless
        assert_eq!(m.hodl_value(Price::new(dec!(-1600))).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_zero_capital_loss_guard_at_zero_price() {
        let m = model(dec!(1600), Decimal::ZERO);
        let p = Price::new(Decimal::ZERO);

        assert_eq!(m.hodl_value(p).unwrap(), Decimal::ZERO);
        assert!(m.lp_value(p).is_err());
        assert_eq!(m.impermanent_loss(p).unwrap(), Decimal::ZERO);
        assert!(m.value_at(p).is_err());
    }

    #[test]
    fn test_loss_guard_when_hodl_goes_negative() {
        let m = model(dec!(1600), dec!(10000));
        let p = Price::new(dec!(-2000));

        assert_eq!(m.hodl_value(p).unwrap(), dec!(-1250));
        assert!(m.lp_value(p).is_err());
        assert_eq!(m.impermanent_loss(p).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_lp_value_or_limit() {
        let m = model(dec!(1600), dec!(10000));

        assert_eq!(m.lp_value_or_limit(Price::new(Decimal::ZERO)).unwrap(), Decimal::ZERO);
        assert_eq!(
            m.lp_value_or_limit(Price::new(dec!(3200))).unwrap(),
            m.lp_value(Price::new(dec!(3200))).unwrap()
        );
        assert!(m.lp_value_or_limit(Price::new(dec!(-1))).is_err());
    }

    #[test]
    fn test_value_at_matches_individual_operations() {
        let m = model(dec!(1600), dec!(10000));
        let p = Price::new(dec!(2000));
        let sample = m.value_at(p).unwrap();

        assert_eq!(sample.price, p);
        assert_eq!(sample.hodl_value, m.hodl_value(p).unwrap());
        assert_eq!(sample.lp_value, m.lp_value(p).unwrap());
        assert_eq!(sample.impermanent_loss, m.impermanent_loss(p).unwrap());
        assert!(sample.value_gap() > Decimal::ZERO);
    }

    #[test]
    fn test_lp_equals_hodl_at_deposit_price() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let price = Decimal::from_f64(rng.random_range(0.001..100_000.0)).unwrap();
            let capital = Decimal::from_f64(rng.random_range(1.0..10_000_000.0)).unwrap();
            let m = model(price, capital);
            let p = Price::new(price);

            let hodl = m.hodl_value(p).unwrap();
            let lp = m.lp_value(p).unwrap();
            assert_close(lp, hodl, hodl * dec!(0.000000001));
        }
    }

    #[test]
    fn test_log_price_symmetry() {
        let mut rng = StdRng::seed_from_u64(11);
        let m = model(dec!(1600), dec!(10000));
        for _ in 0..200 {
            let r = Decimal::from_f64(rng.random_range(1.0001..50.0)).unwrap();
            let up = m.impermanent_loss(Price::new(dec!(1600) * r)).unwrap();
            let down = m.impermanent_loss(Price::new(dec!(1600) / r)).unwrap();
            assert_close(up, down, dec!(0.000000001));
        }
    }

    #[test]
    fn test_loss_is_non_negative_away_from_deposit_price() {
        let m = model(dec!(1600), dec!(10000));
        for p in (1..=64).map(|i| Decimal::from(i * 100)) {
            let il = m.impermanent_loss(Price::new(p)).unwrap();
            assert!(il >= Decimal::ZERO, "negative loss {il} at {p}");
        }
    }

    #[test]
    fn test_loss_independent_of_capital() {
        let small = model(dec!(1600), dec!(10));
        let large = model(dec!(1600), dec!(10000000));
        for p in [dec!(100), dec!(900), dec!(2500), dec!(12800)] {
            let a = small.impermanent_loss(Price::new(p)).unwrap();
            let b = large.impermanent_loss(Price::new(p)).unwrap();
            assert_close(a, b, dec!(0.000000001));
        }
    }

    #[test]
    fn test_loss_matches_closed_form() {
        let m = model(dec!(1600), dec!(10000));
        for p in [dec!(400), dec!(1200), dec!(1600), dec!(4000)] {
            let from_model = m.impermanent_loss(Price::new(p)).unwrap();
            // 1 - 2 * sqrt(r) / (1 + r)
            let r = p / dec!(1600);
            let sqrt_r = constant_product::sqrt(r).unwrap();
            let closed_form = Decimal::ONE - Decimal::TWO * sqrt_r / (Decimal::ONE + r);
            assert_close(from_model, closed_form, dec!(0.000000001));
        }
    }
}
