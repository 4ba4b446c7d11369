//! Display price derivation for books
//!
//! A book is on sale when the catalog knows an original price and the discount is positive.
//! The sale amount is computed here for display only; it is never sent back to the catalog.

use serde::{Deserialize, Serialize};

use crate::CURRENCY_SYMBOL;

/// What to show where a price is rendered
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PriceTag {
    /// The catalog price, shown as is
    Regular { price: f64 },
    /// `original` struck through, `sale` highlighted
    Sale { original: f64, sale: f64, discount: u8 },
}

impl PriceTag {
    /// Derive the tag from the catalog fields
    ///
    /// The discount is clamped to 0..=100 first. With a discount of 0 the catalog price is shown
    /// even when an original price is present.
    pub fn derive(price: f64, original_price: Option<f64>, discount: i32) -> Self {
        let discount = clamp_discount(discount);
        match original_price {
            Some(original) if original > 0.0 && discount > 0 => Self::Sale {
                original,
                sale: sale_amount(original, discount),
                discount,
            },
            _ => Self::Regular { price },
        }
    }

    pub fn is_sale(&self) -> bool {
        matches!(self, Self::Sale { .. })
    }

    /// The highlighted amount, without currency symbol
    pub fn displayed(&self) -> String {
        match self {
            Self::Regular { price } => format_plain(*price),
            Self::Sale { sale, .. } => format!("{sale:.2}"),
        }
    }

    /// The struck-through amount, if any
    pub fn struck(&self) -> Option<String> {
        match self {
            Self::Regular { .. } => None,
            Self::Sale { original, .. } => Some(format_plain(*original)),
        }
    }

    pub fn sale_badge(&self) -> Option<String> {
        match self {
            Self::Regular { .. } => None,
            Self::Sale { discount, .. } => Some(format!("-{discount}%")),
        }
    }
}

pub fn clamp_discount(discount: i32) -> u8 {
    // in range after the clamp
    discount.clamp(0, 100) as u8
}

/// `original × (1 − discount/100)`, unrounded
pub fn sale_amount(original: f64, discount: u8) -> f64 {
    original * (1.0 - f64::from(discount) / 100.0)
}

/// Shortest decimal form: `500`, `12.5`
pub fn format_plain(amount: f64) -> String {
    format!("{amount}")
}

pub fn with_currency(amount: &str) -> String {
    format!("{CURRENCY_SYMBOL}{amount}")
}
