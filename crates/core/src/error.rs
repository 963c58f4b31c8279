//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is a recoverable business condition. Operations that return
/// one of these leave ledger and registry state exactly as it was before the
/// call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. blank product name or batch number).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Intake or sale requested a non-positive quantity.
    #[error("invalid quantity: {quantity} (must be positive)")]
    InvalidQuantity { quantity: i64 },

    /// A sale asked for more units than the product can supply.
    #[error("insufficient stock for {product}: requested {requested}, available {available}")]
    InsufficientStock {
        product: String,
        requested: u64,
        available: u64,
    },

    /// The referenced product is not in the registry.
    #[error("unknown product: {0}")]
    UnknownProduct(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_quantity(quantity: i64) -> Self {
        Self::InvalidQuantity { quantity }
    }

    pub fn insufficient_stock(product: impl Into<String>, requested: u64, available: u64) -> Self {
        Self::InsufficientStock {
            product: product.into(),
            requested,
            available,
        }
    }

    pub fn unknown_product(name: impl Into<String>) -> Self {
        Self::UnknownProduct(name.into())
    }
}

/// Validate a requested quantity and convert it to an unsigned unit count.
pub fn positive_quantity(quantity: i64) -> DomainResult<u64> {
    if quantity <= 0 {
        return Err(DomainError::invalid_quantity(quantity));
    }
    Ok(quantity as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_quantity_accepts_positive_values() {
        assert_eq!(positive_quantity(1).unwrap(), 1);
        assert_eq!(positive_quantity(i64::MAX).unwrap(), i64::MAX as u64);
    }

    #[test]
    fn positive_quantity_rejects_zero_and_negative() {
        assert_eq!(
            positive_quantity(0).unwrap_err(),
            DomainError::InvalidQuantity { quantity: 0 }
        );
        assert_eq!(
            positive_quantity(-3).unwrap_err(),
            DomainError::InvalidQuantity { quantity: -3 }
        );
    }

    #[test]
    fn insufficient_stock_message_names_product_and_amounts() {
        let err = DomainError::insufficient_stock("milk", 7, 5);
        assert_eq!(
            err.to_string(),
            "insufficient stock for milk: requested 7, available 5"
        );
    }
}
