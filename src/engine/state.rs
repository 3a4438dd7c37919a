use crate::Amount;
use crate::model::{CartLine, ProductId};

/// Cart lines in insertion order, at most one per product.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn get(&self, product: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id() == product)
    }

    pub(crate) fn get_mut(&mut self, product: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.id() == product)
    }

    pub(crate) fn push(&mut self, line: CartLine) {
        debug_assert!(self.get(line.id()).is_none());
        self.lines.push(line);
    }

    /// Returns whether a line was dropped.
    pub(crate) fn remove(&mut self, product: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.id() != product);
        self.lines.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of `price * quantity` over all lines. Lines hold at most the
    /// catalog stock, so this never exceeds the catalog's validated value.
    pub fn subtotal(&self) -> Amount {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| line.quantity as u64).sum()
    }
}

/// Coupon status. `discount` is only non-zero while `applied`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CouponState {
    pub code: String,
    pub applied: bool,
    pub discount: Amount,
}

impl CouponState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
