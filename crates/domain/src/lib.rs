//! Domain model for constant-product liquidity positions.
//!
//! The crate values a 50/50 deposit two ways at any price: held outright
//! (HODL) and deposited into an `x * y = k` pool (LP). The relative shortfall
//! of the LP value is the impermanent loss.
//!
//! # Example
//!
//! ```rust
//! use amm_il_domain::model::PositionModel;
//! use amm_il_domain::value_objects::{DepositParameters, Price};
//! use rust_decimal::Decimal;
//!
//! let params = DepositParameters::new(Decimal::from(1600), Decimal::from(10000)).unwrap();
//! let model = PositionModel::create(params).unwrap();
//! let il = model.impermanent_loss(Price::new(Decimal::from(3200))).unwrap();
//! assert!(il > Decimal::ZERO);
//! ```

/// Error types.
pub mod error;
/// Enumerations shared across the domain.
pub mod enums;
/// Constant-product math primitives.
pub mod math;
/// Loss metrics.
pub mod metrics;
/// HODL and LP valuation of a deposit.
pub mod model;
/// Option payoffs used to hedge an LP position.
pub mod options;
/// Value objects.
pub mod value_objects;

pub use error::{ModelError, Result};
