//! Price arithmetic shared by the menu, cart, checkout and order views.
//!
//! Amounts are kept at full precision; only response bodies round them with
//! [`round2`].

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::CartLine;

/// Fixed tax rate applied to every cart subtotal.
pub const TAX_RATE: f64 = 0.05;

/// Unit price after an optional percentage discount, clamped at zero.
pub fn effective_price(price: f64, discount: Option<f64>) -> f64 {
    match discount {
        Some(discount) if discount > 0.0 => (price * (1.0 - discount / 100.0)).max(0.0),
        _ => price,
    }
}

pub fn round2(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, ToSchema)]
pub struct CartTotals {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

impl CartTotals {
    pub fn from_lines(lines: &[CartLine]) -> Self {
        let subtotal: f64 = lines.iter().map(CartLine::line_total).sum();
        let tax = subtotal * TAX_RATE;
        Self {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }

    pub fn rounded(&self) -> Self {
        Self {
            subtotal: round2(self.subtotal),
            tax: round2(self.tax),
            total: round2(self.total),
        }
    }
}
