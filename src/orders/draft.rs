//! Client-side order draft (the cart)

use std::collections::BTreeMap;

use super::models::{NewOrder, NewOrderItem, OrderStatus};
use crate::common::{ClientError, ValidationResult};
use crate::inventory::models::ProductId;

/// Pending order lines keyed by product, plus the status selector.
/// Only strictly positive quantities are ever stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderDraft {
    lines: BTreeMap<ProductId, i64>,
    status: OrderStatus,
}

impl OrderDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the requested quantity; zero or less removes the line
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) {
        if quantity <= 0 {
            self.lines.remove(&product_id);
        } else {
            self.lines.insert(product_id, quantity);
        }
    }

    pub fn quantity(&self, product_id: ProductId) -> Option<i64> {
        self.lines.get(&product_id).copied()
    }

    pub fn lines(&self) -> impl Iterator<Item = (ProductId, i64)> + '_ {
        self.lines.iter().map(|(id, qty)| (*id, *qty))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
    }

    /// Request body for submission, or a validation error when the draft
    /// cannot be submitted
    pub fn to_request(&self) -> Result<NewOrder, ClientError> {
        let mut result = ValidationResult::new();
        if self.lines.is_empty() {
            result.add_error("items", "add at least one product");
        }
        if self.status == OrderStatus::Unknown {
            result.add_error("status", "unknown order status");
        }
        result.into_result()?;

        Ok(NewOrder {
            status: self.status,
            items: self
                .lines()
                .map(|(product_id, quantity)| NewOrderItem {
                    product_id,
                    quantity,
                })
                .collect(),
        })
    }

    /// Empty the draft and put the status selector back to pending
    pub fn reset(&mut self) {
        self.lines.clear();
        self.status = OrderStatus::Pending;
    }
}
