//! Error types for cart and coupon operations.
//!
//! The `Display` text of every variant is the message shown to the user.

use thiserror::Error;

use crate::model::{Notification, ProductId};

/// Top-level error returned by [`Storefront`](super::Storefront) operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("{0}")]
    Coupon(#[from] CouponError),

    #[error("{0}")]
    Capacity(#[from] CapacityError),

    #[error("Product {0} is not available")]
    UnknownProduct(ProductId),
}

/// Error while applying a coupon.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CouponError {
    #[error("Please enter a coupon code")]
    MissingCode,
    #[error("Invalid coupon code")]
    InvalidCode,
    #[error("Coupon already applied")]
    AlreadyApplied,
}

/// A quantity change that would exceed a product's stock.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CapacityError {
    /// Adding one more unit to a line already at stock.
    #[error("Maximum stock limit reached")]
    StockLimitReached { product: ProductId, stock: u32 },
    /// Setting a quantity above stock.
    #[error("Cannot exceed available stock")]
    ExceedsStock {
        product: ProductId,
        requested: u32,
        stock: u32,
    },
}

/// Broad class of a rejected operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    StateConflict,
    Capacity,
    NotFound,
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Coupon(CouponError::MissingCode | CouponError::InvalidCode) => {
                ErrorKind::Validation
            }
            StoreError::Coupon(CouponError::AlreadyApplied) => ErrorKind::StateConflict,
            StoreError::Capacity(_) => ErrorKind::Capacity,
            StoreError::UnknownProduct(_) => ErrorKind::NotFound,
        }
    }
}

impl From<&StoreError> for Notification {
    fn from(err: &StoreError) -> Self {
        Notification::error(err.to_string())
    }
}
