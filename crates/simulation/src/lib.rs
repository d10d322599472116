//! Sampling of the constant-product valuation model.
//!
//! This crate turns a [`PositionModel`](amm_il_domain::model::PositionModel)
//! into series a presentation layer can draw:
//! - Valuation curves over a linear price domain
//! - LP value overlaid with a put option payoff
//! - Valuations along deterministic or simulated price paths
//! - Monte Carlo distribution of impermanent loss at a horizon

/// Prelude module for convenient imports.
pub mod prelude;

/// Valuation curves over a price domain.
pub mod curve;
/// LP position hedged with a put option.
pub mod hedge;
/// Monte Carlo impermanent loss distribution.
pub mod monte_carlo;
/// Price path generators.
pub mod price_path;
