//! GST computation for invoice line items.
//!
//! Intra-state supplies (billing state equals shipping state) are taxed as CGST + SGST at 9%
//! each; inter-state supplies are taxed as IGST at 18%. Amounts stay exact [`BigDecimal`]s per
//! item and are only rounded to paise once, at the aggregate stage.

use bigdecimal::{BigDecimal, RoundingMode, Zero};

use crate::{
    error::{AddContext, Error},
    invoice::LineItem,
    words::amount_in_words,
};

/// CGST and SGST rate, each, for intra-state supplies
pub const CGST_SGST_PERCENT: i64 = 9;
/// IGST rate for inter-state supplies
pub const IGST_PERCENT: i64 = 18;

fn rate(percent: i64) -> BigDecimal {
    BigDecimal::new(percent.into(), 2)
}

/// Round half-up to paise and render with exactly two decimal places.
///
/// ```rust
/// use std::str::FromStr;
/// use bigdecimal::BigDecimal;
/// use gst_invoice::tax::format_amount;
///
/// assert_eq!(format_amount(&BigDecimal::from(200)), "200.00");
/// assert_eq!(format_amount(&BigDecimal::from_str("17.995").unwrap()), "18.00");
/// ```
pub fn format_amount(amount: &BigDecimal) -> String {
    format!("{:.2}", amount.with_scale_round(2, RoundingMode::HalfUp))
}

/// Line subtotal after discount, before tax: `unit_price * quantity - discount`.
///
/// The result is not floored at zero; a discount larger than the subtotal yields a negative net.
pub fn net_amount(unit_price: &BigDecimal, quantity: i32, discount: &BigDecimal) -> BigDecimal {
    unit_price * BigDecimal::from(quantity) - discount
}

pub fn item_total(net_amount: &BigDecimal, tax_amount: &BigDecimal) -> BigDecimal {
    net_amount + tax_amount
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxKind {
    CgstSgst,
    Igst,
}

impl TaxKind {
    pub fn label(&self) -> &'static str {
        match self {
            TaxKind::CgstSgst => "CGST + SGST",
            TaxKind::Igst => "IGST",
        }
    }

    /// Rate as printed in the tax rate column.
    pub fn rate_label(&self) -> String {
        match self {
            TaxKind::CgstSgst => format!("{CGST_SGST_PERCENT}%"),
            TaxKind::Igst => format!("{IGST_PERCENT}%"),
        }
    }
}

/// The three GST components of a single net amount. Only one side is ever non-zero.
#[derive(Debug, Clone, PartialEq)]
pub struct TaxSplit {
    pub cgst: BigDecimal,
    pub sgst: BigDecimal,
    pub igst: BigDecimal,
}

impl TaxSplit {
    /// Sum of all three components.
    pub fn amount(&self) -> BigDecimal {
        &self.cgst + &self.sgst + &self.igst
    }

    /// "CGST + SGST" whenever the CGST component is non-zero, "IGST" otherwise.
    pub fn kind(&self) -> TaxKind {
        if self.cgst.is_zero() {
            TaxKind::Igst
        } else {
            TaxKind::CgstSgst
        }
    }
}

/// Split the tax on `net_amount` by comparing the billing and shipping states exactly
/// (case-sensitive).
pub fn tax_split(net_amount: &BigDecimal, billing_state: &str, shipping_state: &str) -> TaxSplit {
    if billing_state == shipping_state {
        let half = net_amount * rate(CGST_SGST_PERCENT);
        TaxSplit {
            cgst: half.clone(),
            sgst: half,
            igst: BigDecimal::zero(),
        }
    } else {
        TaxSplit {
            cgst: BigDecimal::zero(),
            sgst: BigDecimal::zero(),
            igst: net_amount * rate(IGST_PERCENT),
        }
    }
}

/// Per-item tax breakdown, derived fresh for each rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct TaxBreakdown {
    pub net_amount: BigDecimal,
    pub split: TaxSplit,
}

impl TaxBreakdown {
    pub fn for_item(item: &LineItem, billing_state: &str, shipping_state: &str) -> TaxBreakdown {
        let net_amount = net_amount(item.unit_price(), item.quantity(), item.discount());
        let split = tax_split(&net_amount, billing_state, shipping_state);
        TaxBreakdown { net_amount, split }
    }

    pub fn kind(&self) -> TaxKind {
        self.split.kind()
    }

    pub fn tax_amount(&self) -> BigDecimal {
        self.split.amount()
    }

    pub fn total(&self) -> BigDecimal {
        item_total(&self.net_amount, &self.tax_amount())
    }
}

/// Invoice-level sums. `rounded_total` is the value both printed and spelled out.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceTotals {
    pub net_total: BigDecimal,
    pub tax_total: BigDecimal,
    pub grand_total: BigDecimal,
    pub rounded_total: BigDecimal,
    pub words: String,
}

/// Fold every item into invoice totals.
///
/// Nets and taxes are summed independently and the grand total is their sum; rounding to two
/// decimal places is applied only to that grand total.
///
/// # Errors
/// Returns an `InvalidAmount` [`Error`] when the grand total cannot be spelled out.
pub fn aggregate(
    items: &[LineItem],
    billing_state: &str,
    shipping_state: &str,
) -> Result<InvoiceTotals, Error> {
    let (net_total, tax_total) = items
        .iter()
        .map(|item| TaxBreakdown::for_item(item, billing_state, shipping_state))
        .fold(
            (BigDecimal::zero(), BigDecimal::zero()),
            |(net, tax), b| (net + &b.net_amount, tax + b.tax_amount()),
        );
    let grand_total = &net_total + &tax_total;
    let rounded_total = grand_total.with_scale_round(2, RoundingMode::HalfUp);
    let words = amount_in_words(&rounded_total).add_context("aggregating invoice totals")?;
    Ok(InvoiceTotals {
        net_total,
        tax_total,
        grand_total,
        rounded_total,
        words,
    })
}
