use crate::error::{ModelError, Result};
use crate::value_objects::{DepositParameters, Price};
use rust_decimal::Decimal;
use rust_decimal::prelude::*;

/// Splits a deposit 50/50 into its two legs.
/// returns (base_amount, quote_amount)
///
/// `base_amount` is half the capital, held in quote units (e.g. USDC).
/// `quote_amount` is the other half converted at the initial price, held in
/// base units (e.g. ETH).
pub fn split_deposit(params: &DepositParameters) -> Result<(Decimal, Decimal)> {
    if params.initial_price <= Decimal::ZERO {
        return Err(ModelError::invalid("initial price must be positive"));
    }
    let base_amount = params.total_capital / Decimal::TWO;
    let quote_amount = base_amount
        .checked_div(params.initial_price)
        .ok_or(ModelError::Overflow("quote amount"))?;
    Ok((base_amount, quote_amount))
}

/// Calculates the constant product K
pub fn calculate_k(reserve0: Decimal, reserve1: Decimal) -> Result<Decimal> {
    reserve0
        .checked_mul(reserve1)
        .ok_or(ModelError::Overflow("invariant constant"))
}

/// Square root through f64. Good to roughly fifteen significant digits.
pub fn sqrt(value: Decimal) -> Result<Decimal> {
    if value < Decimal::ZERO {
        return Err(ModelError::invalid(format!("square root of negative {value}")));
    }
    let f = value.to_f64().ok_or(ModelError::Overflow("sqrt input"))?;
    Decimal::from_f64(f.sqrt()).ok_or(ModelError::Overflow("sqrt result"))
}

/// Solves `x * y = k` together with `x / y = price` for the pool reserves.
/// returns (x, y) with x in quote units and y in base units
///
/// formula: x = sqrt(k * price), y = sqrt(k / price)
pub fn reserves_at_price(k: Decimal, price: Price) -> Result<(Decimal, Decimal)> {
    if !price.is_positive() {
        return Err(ModelError::Domain { price: price.value });
    }
    let k_times_p = k
        .checked_mul(price.value)
        .ok_or(ModelError::Overflow("k * price"))?;
    let k_over_p = k
        .checked_div(price.value)
        .ok_or(ModelError::Overflow("k / price"))?;
    Ok((sqrt(k_times_p)?, sqrt(k_over_p)?))
}
