pub mod amount;
pub mod catalog;
pub mod csv;
pub mod engine;
pub mod model;

pub use amount::{Amount, AmountError};
pub use catalog::{ALL_CATEGORIES, Catalog};
pub use engine::{PricingConfig, Storefront};
pub use model::{Action, CartLine, Notification, NotificationKind, Product, ProductId};
