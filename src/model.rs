//! Core domain types for the storefront.

use std::fmt;

use serde::Deserialize;

use crate::Amount;

/// Product identifier.
pub type ProductId = u32;

/// A purchasable product, as supplied by the catalog fixture.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Amount,
    pub category: String,
    #[serde(default)]
    pub image: String,
    /// Maximum purchasable quantity.
    pub stock: u32,
}

/// One product in the cart together with its quantity.
///
/// `quantity` is always between 1 and `product.stock`.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    pub fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    pub fn id(&self) -> ProductId {
        self.product.id
    }

    pub fn line_total(&self) -> Amount {
        self.product.price * self.quantity
    }
}

/// A user interaction forwarded by the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Add one unit of a product to the cart.
    AddItem { product: ProductId },
    /// Set a line's quantity; anything below 1 removes the line.
    UpdateQuantity { product: ProductId, quantity: i64 },
    /// Drop a line from the cart.
    RemoveItem { product: ProductId },
    /// Validate and activate a coupon code.
    ApplyCoupon { code: String },
    /// Deactivate the coupon and clear its code.
    RemoveCoupon,
    /// Change the catalog filter.
    SelectCategory { category: String },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::AddItem { .. } => "add item",
            Action::UpdateQuantity { .. } => "update quantity",
            Action::RemoveItem { .. } => "remove item",
            Action::ApplyCoupon { .. } => "apply coupon",
            Action::RemoveCoupon => "remove coupon",
            Action::SelectCategory { .. } => "select category",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// User-facing feedback for a single action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.kind {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
        };
        write!(f, "{label}: {}", self.message)
    }
}
