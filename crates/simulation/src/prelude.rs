//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use amm_il_simulation::prelude::*;
//! ```

// Curves
pub use crate::curve::{CurveGenerator, ValuationCurve};

// Hedging
pub use crate::hedge::{HedgedCurveGenerator, HedgedSample};

// Monte Carlo
pub use crate::monte_carlo::{IlDistribution, MonteCarloRunner};

// Price path generators
pub use crate::price_path::{
    DeterministicPricePath, GeometricBrownianMotion, PricePathGenerator, value_along_path,
};

// Domain types used in every call
pub use amm_il_domain::model::PositionModel;
pub use amm_il_domain::value_objects::{DepositParameters, Price, PriceDomain, ValuationSample};
pub use amm_il_domain::ModelError;
