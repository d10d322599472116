use rust_decimal::Decimal;

/// Errors produced by the valuation model.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// A construction parameter is outside its valid range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A valuation was requested at a price where it is undefined.
    #[error("Price {price} is outside the valuation domain (must be positive)")]
    Domain {
        /// The offending price.
        price: Decimal,
    },

    /// Decimal arithmetic or a float round-trip overflowed.
    #[error("Overflow in {0}")]
    Overflow(&'static str),
}

impl ModelError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }
}

/// Result alias for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
