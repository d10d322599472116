pub mod deposit;
pub mod price;
pub mod price_domain;
pub mod valuation;

pub use deposit::DepositParameters;
pub use price::Price;
pub use price_domain::PriceDomain;
pub use valuation::ValuationSample;
