//! Cart value types.

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// One product's presence in a session's cart.
///
/// `price` and `name` are captured when the line is first added and are not
/// refreshed from the catalog afterwards. The price keeps the exact JSON number
/// the client sent, so `500` is echoed back as `500`, not `500.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: i64,
    pub quantity: i64,
    pub price: Number,
    pub name: String,
}

impl CartLine {
    pub fn new(
        product_id: i64,
        quantity: i64,
        price: impl Into<Number>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            product_id,
            quantity,
            price: price.into(),
            name: name.into(),
        }
    }

    /// Line subtotal (unit price times quantity).
    pub fn subtotal(&self) -> f64 {
        self.price.as_f64().unwrap_or_default() * self.quantity as f64
    }
}

/// Snapshot of a session's cart, in insertion order.
///
/// Serializes as a bare JSON array of lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<CartLine> {
        self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, product_id: i64) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary {
            lines: self.lines.len(),
            item_count: self
                .lines
                .iter()
                .fold(0i64, |acc, l| acc.saturating_add(l.quantity)),
            total_amount: self.lines.iter().map(CartLine::subtotal).sum(),
        }
    }
}

/// Aggregate figures shown in the cart badge and checkout page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub lines: usize,
    pub item_count: i64,
    pub total_amount: f64,
}
