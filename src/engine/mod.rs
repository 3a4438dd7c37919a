//! Cart and pricing engine.
//!
//! The engine owns the cart and coupon state for one storefront session
//! and applies user actions to it, one at a time. Every rejected action
//! leaves the state untouched. Also supports an async stream of actions.

use tokio_stream::{Stream, StreamExt};
use tracing::{debug, info};

use crate::Amount;
use crate::catalog::{ALL_CATEGORIES, Catalog};
use crate::model::{Action, CartLine, Notification, Product, ProductId};

mod state;
pub use state::{Cart, CouponState};

mod pricing;
pub use pricing::PricingConfig;

mod error;
pub use error::{CapacityError, CouponError, ErrorKind, StoreError};

/// A storefront session: static catalog plus the mutable cart, coupon
/// and category filter.
pub struct Storefront {
    catalog: Catalog,
    cart: Cart,
    coupon: CouponState,
    pricing: PricingConfig,
    selected_category: String,
}

/// Public API
impl Storefront {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_pricing(catalog, PricingConfig::default())
    }

    pub fn with_pricing(catalog: Catalog, pricing: PricingConfig) -> Self {
        Self {
            catalog,
            cart: Cart::default(),
            coupon: CouponState::default(),
            pricing,
            selected_category: ALL_CATEGORIES.to_string(),
        }
    }

    /// Run the storefront over a stream of user actions, handing every
    /// notification to `sink`.
    pub async fn run(
        &mut self,
        mut actions: impl Stream<Item = Action> + Unpin,
        mut sink: impl FnMut(Notification),
    ) {
        while let Some(action) = actions.next().await {
            // a rejected action only produces an error notification
            match self.apply(action) {
                Ok(Some(notification)) => sink(notification),
                Ok(None) => {}
                Err(e) => sink(Notification::from(&e)),
            }
        }
    }

    /// Apply a single action on top of the current state
    pub fn apply(&mut self, action: Action) -> Result<Option<Notification>, StoreError> {
        let result = match &action {
            Action::AddItem { product } => self.add_item(*product).map(Some),
            Action::UpdateQuantity { product, quantity } => {
                self.update_quantity(*product, *quantity)
            }
            Action::RemoveItem { product } => Ok(Some(self.remove_item(*product))),
            Action::ApplyCoupon { code } => self.apply_coupon(code).map(Some),
            Action::RemoveCoupon => Ok(Some(self.remove_coupon())),
            Action::SelectCategory { category } => {
                self.select_category(category.as_str());
                Ok(None)
            }
        };
        Self::log_result(&action, &result);
        result
    }

    /// Add one unit of product `id`, creating its line on first add.
    pub fn add_item(&mut self, id: ProductId) -> Result<Notification, StoreError> {
        let product = self
            .catalog
            .find(id)
            .ok_or(StoreError::UnknownProduct(id))?;

        match self.cart.get_mut(product.id) {
            Some(line) => {
                if line.quantity >= product.stock {
                    return Err(CapacityError::StockLimitReached {
                        product: product.id,
                        stock: product.stock,
                    }
                    .into());
                }
                line.quantity += 1;
            }
            None => {
                // out-of-stock products can never hold a line
                if product.stock == 0 {
                    return Err(CapacityError::StockLimitReached {
                        product: product.id,
                        stock: 0,
                    }
                    .into());
                }
                self.cart.push(CartLine::new(product.clone()));
            }
        }

        let message = format!("{} added to cart", product.name);
        self.recompute_discount();
        Ok(Notification::success(message))
    }

    /// Set the quantity of `product`'s line. Quantities below 1 remove the line.
    ///
    /// Succeeds silently; updating a product that is not in the cart is a no-op.
    pub fn update_quantity(
        &mut self,
        product: ProductId,
        quantity: i64,
    ) -> Result<Option<Notification>, StoreError> {
        if quantity < 1 {
            return Ok(Some(self.remove_item(product)));
        }

        let stock = self.product(product)?.stock;
        let requested = u32::try_from(quantity).unwrap_or(u32::MAX);
        if requested > stock {
            return Err(CapacityError::ExceedsStock {
                product,
                requested,
                stock,
            }
            .into());
        }

        match self.cart.get_mut(product) {
            Some(line) => {
                line.quantity = requested;
                self.recompute_discount();
            }
            None => debug!(product, "quantity update for product not in cart"),
        }
        Ok(None)
    }

    /// Drop `product`'s line. Always reports a removal, even when no line matched.
    pub fn remove_item(&mut self, product: ProductId) -> Notification {
        if self.cart.remove(product) {
            self.recompute_discount();
        } else {
            debug!(product, "removed product was not in cart");
        }
        Notification::success("Item removed from cart")
    }

    /// Validate `code` and activate the coupon against the current subtotal.
    pub fn apply_coupon(&mut self, code: &str) -> Result<Notification, StoreError> {
        if code.trim().is_empty() {
            return Err(CouponError::MissingCode.into());
        }
        if !self.pricing.is_valid_coupon(code) {
            return Err(CouponError::InvalidCode.into());
        }
        if self.coupon.applied {
            return Err(CouponError::AlreadyApplied.into());
        }

        self.coupon = CouponState {
            code: code.to_string(),
            applied: true,
            discount: self.pricing.discount_for(self.cart.subtotal()),
        };

        Ok(Notification::success(format!(
            "Coupon applied successfully! {} discount added",
            self.pricing.discount_label()
        )))
    }

    /// Deactivate the coupon, clearing its code and discount.
    pub fn remove_coupon(&mut self) -> Notification {
        self.coupon.reset();
        Notification::success("Coupon removed")
    }

    pub fn select_category(&mut self, category: impl Into<String>) {
        self.selected_category = category.into();
    }

    /// Catalog products matching the selected category.
    pub fn visible_products(&self) -> impl Iterator<Item = &Product> + '_ {
        self.catalog.filter_by_category(&self.selected_category)
    }

    pub fn selected_category(&self) -> &str {
        &self.selected_category
    }

    pub fn categories(&self) -> &[String] {
        self.catalog.categories()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn coupon(&self) -> &CouponState {
        &self.coupon
    }

    pub fn pricing(&self) -> &PricingConfig {
        &self.pricing
    }

    pub fn subtotal(&self) -> Amount {
        self.cart.subtotal()
    }

    pub fn discount(&self) -> Amount {
        self.coupon.discount
    }

    /// Subtotal minus discount, never below zero.
    pub fn total(&self) -> Amount {
        (self.subtotal() - self.discount()).max(Amount::ZERO)
    }

    /// Units across all cart lines.
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }
}

/// Private API
impl Storefront {
    /// Small helper to log `apply` results
    fn log_result(action: &Action, result: &Result<Option<Notification>, StoreError>) {
        let name = action.name();
        match result {
            Ok(_) => info!(?action, "{name} applied"),
            Err(e) => info!(
                ?action,
                kind = ?e.kind(),
                reason = %e,
                "{name} skipped"
            ),
        }
    }

    fn product(&self, id: ProductId) -> Result<&Product, StoreError> {
        self.catalog.find(id).ok_or(StoreError::UnknownProduct(id))
    }

    /// Keep an applied coupon's discount in step with the cart.
    /// Must run after every cart mutation.
    fn recompute_discount(&mut self) {
        if !self.coupon.applied {
            return;
        }
        let discount = self.pricing.discount_for(self.cart.subtotal());
        debug!(
            previous = %self.coupon.discount,
            discount = %discount,
            "discount recomputed"
        );
        self.coupon.discount = discount;
    }
}
