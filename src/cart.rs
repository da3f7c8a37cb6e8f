//! Cart
//!
//! The working cart owned by an open booking wizard. Lines are keyed by
//! `(service id, cloth type)`: adding a selection that matches an existing
//! line increments it instead of appending a duplicate row.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::money::Rupees;

/// Errors related to cart mutation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// The line index does not address an existing line.
    #[error("Line {0} not found")]
    IndexOutOfRange(usize),
}

/// Direction of a single-step quantity adjustment.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum QuantityDelta {
    /// Increase the quantity by one.
    Increment,

    /// Decrease the quantity by one, never below one.
    Decrement,
}

/// One `(service, cloth)` pairing with a quantity and computed line total.
///
/// Serializes with the persisted ledger's field names (`id`, `name`,
/// `cloth`, `qty`, `price`, `lineTotal`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Catalog id of the selected service.
    #[serde(rename = "id")]
    pub service_id: String,

    /// Human-readable service name, denormalized for display.
    #[serde(rename = "name")]
    pub service_name: String,

    /// Selected cloth type.
    pub cloth: String,

    /// Number of units, always at least one.
    pub qty: u32,

    /// Price per unit.
    #[serde(rename = "price")]
    pub unit_price: Rupees,

    /// `qty * unit_price`, recomputed on every mutation.
    #[serde(rename = "lineTotal")]
    pub line_total: Rupees,
}

impl LineItem {
    /// Creates a line item with its total computed from quantity and price.
    #[must_use]
    pub fn new(
        service_id: impl Into<String>,
        service_name: impl Into<String>,
        cloth: impl Into<String>,
        qty: u32,
        unit_price: Rupees,
    ) -> Self {
        LineItem {
            service_id: service_id.into(),
            service_name: service_name.into(),
            cloth: cloth.into(),
            qty,
            unit_price,
            line_total: unit_price.times(qty),
        }
    }

    /// True when the other line addresses the same `(service, cloth)` pair.
    #[must_use]
    pub fn same_line(&self, other: &Self) -> bool {
        self.service_id == other.service_id && self.cloth == other.cloth
    }

    fn recompute(&mut self) {
        self.line_total = self.unit_price.times(self.qty);
    }
}

/// The in-progress cart: an ordered sequence of line items.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<LineItem>,
}

impl Cart {
    /// Creates an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Cart::default()
    }

    /// Merge-or-append a line item.
    ///
    /// A line matching the incoming `(service, cloth)` pair absorbs the
    /// incoming quantity; otherwise the item is appended in UI order.
    pub fn add(&mut self, item: LineItem) {
        if let Some(line) = self.lines.iter_mut().find(|line| line.same_line(&item)) {
            line.qty = line.qty.saturating_add(item.qty);
            line.recompute();
        } else {
            self.lines.push(item);
        }
    }

    /// Adjust one line's quantity by a single step.
    ///
    /// Decrementing a quantity of one is a no-op: the floor is one.
    ///
    /// # Errors
    ///
    /// Returns `CartError::IndexOutOfRange` if the index does not address an
    /// existing line.
    pub fn adjust_quantity(&mut self, index: usize, delta: QuantityDelta) -> Result<(), CartError> {
        let line = self
            .lines
            .get_mut(index)
            .ok_or(CartError::IndexOutOfRange(index))?;

        match delta {
            QuantityDelta::Increment => line.qty = line.qty.saturating_add(1),
            QuantityDelta::Decrement if line.qty > 1 => line.qty -= 1,
            QuantityDelta::Decrement => {}
        }

        line.recompute();

        Ok(())
    }

    /// Remove and return one line.
    ///
    /// # Errors
    ///
    /// Returns `CartError::IndexOutOfRange` if the index does not address an
    /// existing line.
    pub fn remove_line(&mut self, index: usize) -> Result<LineItem, CartError> {
        if index < self.lines.len() {
            Ok(self.lines.remove(index))
        } else {
            Err(CartError::IndexOutOfRange(index))
        }
    }

    /// Sum of all line totals.
    #[must_use]
    pub fn subtotal(&self) -> Rupees {
        self.lines.iter().map(|line| line.line_total).sum()
    }

    /// Tax is fixed at zero.
    #[must_use]
    pub fn tax(&self) -> Rupees {
        Rupees::new(0)
    }

    /// `subtotal + tax`.
    #[must_use]
    pub fn total(&self) -> Rupees {
        self.subtotal().plus(self.tax())
    }

    /// The lines in UI order.
    #[must_use]
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    /// Deep copy of the current lines, detached from the live cart.
    #[must_use]
    pub fn snapshot(&self) -> Vec<LineItem> {
        self.lines.clone()
    }

    /// Iterate over the lines in UI order.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.lines.iter()
    }

    /// Number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
