//! Fixed-position layout of a single-page tax invoice.
//!
//! The layout engine turns an [`Invoice`] and its computed totals into an ordered sequence of
//! draw calls against a [`Surface`]. All coordinates are PDF points measured from the bottom
//! left corner of the page and come from an immutable [`LayoutConfig`]. Two presets exist:
//!
//! * [`LayoutConfig::compact`] (canonical): A4 portrait, 595 x 842, font 10, ten table columns
//!   spaced 50pt apart starting at x = 40, including a discount column.
//! * [`LayoutConfig::wide`]: A4 landscape, 842 x 595, font 9, nine table columns without a
//!   discount column and a wider description column.
//!
//! The footer (totals, amount in words, signatory) is anchored at
//! `header_y - row_height * item_count`, so it moves down as rows are added. There is no
//! pagination; the page is assumed to be tall enough.

use std::str::FromStr;

use crate::{
    assets::{Assets, ImageAsset},
    error::{AddContext, Error},
    invoice::{Invoice, InvoiceInfo, LineItem, OrderInfo, Party, Seller},
    tax::{InvoiceTotals, TaxBreakdown, aggregate, format_amount},
};

pub const DOCUMENT_TITLE: &str = "Tax Invoice/Bill of Supply/Cash Memo";
pub const DOCUMENT_SUBTITLE: &str = "(Original for Recipient)";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// An axis-aligned box; `y` is the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

const fn at(x: f32, y: f32) -> Point {
    Point { x, y }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    SerialNo,
    Description,
    UnitPrice,
    Quantity,
    Discount,
    NetAmount,
    TaxRate,
    TaxType,
    TaxAmount,
    TotalAmount,
}

impl Column {
    pub fn header(&self) -> &'static str {
        match self {
            Column::SerialNo => "Sl. No",
            Column::Description => "Description",
            Column::UnitPrice => "Unit Price",
            Column::Quantity => "Qty",
            Column::Discount => "Discount",
            Column::NetAmount => "Net Amount",
            Column::TaxRate => "Tax Rate",
            Column::TaxType => "Tax Type",
            Column::TaxAmount => "Tax Amount",
            Column::TotalAmount => "Total Amount",
        }
    }

    fn cell(&self, index: usize, item: &LineItem, breakdown: &TaxBreakdown) -> String {
        match self {
            Column::SerialNo => (index + 1).to_string(),
            Column::Description => item.description().to_string(),
            Column::UnitPrice => format_amount(item.unit_price()),
            Column::Quantity => item.quantity().to_string(),
            Column::Discount => format_amount(item.discount()),
            Column::NetAmount => format_amount(&breakdown.net_amount),
            Column::TaxRate => breakdown.kind().rate_label(),
            Column::TaxType => breakdown.kind().label().to_string(),
            Column::TaxAmount => format_amount(&breakdown.tax_amount()),
            Column::TotalAmount => format_amount(&breakdown.total()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSpec {
    pub column: Column,
    pub x: f32,
}

/// Distances below the footer anchor. The signature image hangs below `signature_top`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FooterOffsets {
    pub net_total: f32,
    pub tax_total: f32,
    pub grand_total: f32,
    pub words: f32,
    pub signatory_label: f32,
    pub signature_top: f32,
    pub signature_width: f32,
    pub signature_height: f32,
    pub caption: f32,
}

/// Page geometry and every fixed coordinate used to lay out an invoice.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub preset: LayoutPreset,
    pub page_width: f32,
    pub page_height: f32,
    pub font_size: f32,
    pub line_spacing: f32,
    pub title_size: f32,
    pub subtitle_size: f32,
    pub logo: Rect,
    pub title: Point,
    pub subtitle: Point,
    pub seller_label: Point,
    pub seller_block: Point,
    pub order_block: Point,
    pub invoice_block: Point,
    pub billing_label: Point,
    pub billing_block: Point,
    pub shipping_label: Point,
    pub shipping_block: Point,
    pub header_y: f32,
    pub row_height: f32,
    pub columns: Vec<ColumnSpec>,
    pub footer_x: f32,
    pub footer: FooterOffsets,
}

fn columns(specs: &[(Column, f32)]) -> Vec<ColumnSpec> {
    specs
        .iter()
        .map(|&(column, x)| ColumnSpec { column, x })
        .collect()
}

impl LayoutConfig {
    /// A4 portrait with a discount column.
    pub fn compact() -> LayoutConfig {
        let h = 842.0;
        let table = [
            Column::SerialNo,
            Column::Description,
            Column::UnitPrice,
            Column::Quantity,
            Column::Discount,
            Column::NetAmount,
            Column::TaxRate,
            Column::TaxType,
            Column::TaxAmount,
            Column::TotalAmount,
        ];
        LayoutConfig {
            preset: LayoutPreset::Compact,
            page_width: 595.0,
            page_height: h,
            font_size: 10.0,
            line_spacing: 2.0,
            title_size: 14.0,
            subtitle_size: 10.0,
            logo: Rect {
                x: 40.0,
                y: h - 80.0,
                width: 100.0,
                height: 50.0,
            },
            title: at(180.0, h - 40.0),
            subtitle: at(180.0, h - 55.0),
            seller_label: at(40.0, h - 100.0),
            seller_block: at(40.0, h - 110.0),
            order_block: at(320.0, h - 100.0),
            invoice_block: at(320.0, h - 140.0),
            billing_label: at(40.0, h - 180.0),
            billing_block: at(40.0, h - 190.0),
            shipping_label: at(320.0, h - 180.0),
            shipping_block: at(320.0, h - 190.0),
            header_y: h - 250.0,
            row_height: 20.0,
            columns: table
                .iter()
                .enumerate()
                .map(|(i, &column)| ColumnSpec {
                    column,
                    x: 40.0 + i as f32 * 50.0,
                })
                .collect(),
            footer_x: 40.0,
            footer: FooterOffsets {
                net_total: 40.0,
                tax_total: 60.0,
                grand_total: 80.0,
                words: 100.0,
                signatory_label: 130.0,
                signature_top: 140.0,
                signature_width: 100.0,
                signature_height: 30.0,
                caption: 180.0,
            },
        }
    }

    /// A4 landscape without a discount column.
    pub fn wide() -> LayoutConfig {
        let h = 595.0;
        LayoutConfig {
            preset: LayoutPreset::Wide,
            page_width: 842.0,
            page_height: h,
            font_size: 9.0,
            line_spacing: 2.0,
            title_size: 16.0,
            subtitle_size: 10.0,
            logo: Rect {
                x: 30.0,
                y: h - 70.0,
                width: 120.0,
                height: 50.0,
            },
            title: at(330.0, h - 35.0),
            subtitle: at(330.0, h - 52.0),
            seller_label: at(30.0, h - 95.0),
            seller_block: at(30.0, h - 106.0),
            order_block: at(600.0, h - 95.0),
            invoice_block: at(600.0, h - 130.0),
            billing_label: at(30.0, h - 170.0),
            billing_block: at(30.0, h - 181.0),
            shipping_label: at(330.0, h - 170.0),
            shipping_block: at(330.0, h - 181.0),
            header_y: h - 245.0,
            row_height: 18.0,
            columns: columns(&[
                (Column::SerialNo, 30.0),
                (Column::Description, 70.0),
                (Column::UnitPrice, 300.0),
                (Column::Quantity, 370.0),
                (Column::NetAmount, 420.0),
                (Column::TaxRate, 500.0),
                (Column::TaxType, 560.0),
                (Column::TaxAmount, 650.0),
                (Column::TotalAmount, 740.0),
            ]),
            footer_x: 30.0,
            footer: FooterOffsets {
                net_total: 36.0,
                tax_total: 54.0,
                grand_total: 72.0,
                words: 90.0,
                signatory_label: 116.0,
                signature_top: 126.0,
                signature_width: 100.0,
                signature_height: 30.0,
                caption: 166.0,
            },
        }
    }

    /// Baseline of the `index`-th (0-based) table row.
    pub fn row_y(&self, index: usize) -> f32 {
        self.header_y - self.row_height * (index as f32 + 1.0)
    }

    /// Where the footer hangs from, given the number of table rows.
    pub fn footer_anchor(&self, item_count: usize) -> f32 {
        self.header_y - self.row_height * item_count as f32
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig::compact()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutPreset {
    #[default]
    Compact,
    Wide,
}

impl LayoutPreset {
    pub fn config(&self) -> LayoutConfig {
        match self {
            LayoutPreset::Compact => LayoutConfig::compact(),
            LayoutPreset::Wide => LayoutConfig::wide(),
        }
    }
}

impl FromStr for LayoutPreset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(LayoutPreset::Compact),
            "wide" => Ok(LayoutPreset::Wide),
            other => Err(Error::invalid_input(format!(
                "unknown layout '{other}', expected 'compact' or 'wide'"
            ))),
        }
    }
}

/// Anything an invoice can be drawn onto.
pub trait Surface {
    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32);
    fn draw_image(&mut self, image: &ImageAsset, rect: Rect);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
    },
    Image {
        name: String,
        rect: Rect,
    },
}

/// A [`Surface`] that records every draw call in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    ops: Vec<DrawOp>,
}

impl DrawList {
    pub fn new() -> DrawList {
        DrawList::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// The text of every text operation, in drawing order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                DrawOp::Image { .. } => None,
            })
            .collect()
    }

    /// Find the first text operation with exactly this text.
    pub fn find_text(&self, needle: &str) -> Option<&DrawOp> {
        self.ops
            .iter()
            .find(|op| matches!(op, DrawOp::Text { text, .. } if text == needle))
    }
}

impl Surface for DrawList {
    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            size,
        });
    }

    fn draw_image(&mut self, image: &ImageAsset, rect: Rect) {
        self.ops.push(DrawOp::Image {
            name: image.name().to_string(),
            rect,
        });
    }
}

/// Draw `text` one line per `\n`, each line `size + line_spacing` below the previous one.
pub fn draw_multiline_text<S: Surface>(
    surface: &mut S,
    text: &str,
    origin: Point,
    size: f32,
    line_spacing: f32,
) {
    for (index, line) in text.split('\n').enumerate() {
        let y = origin.y - index as f32 * (size + line_spacing);
        surface.draw_text(line, origin.x, y, size);
    }
}

pub fn seller_block(seller: &Seller) -> String {
    format!(
        "{}\n{}\n{}, {}, {}\nPAN No: {}\nGST Registration No: {}",
        seller.name(),
        seller.address(),
        seller.city(),
        seller.state(),
        seller.pincode(),
        seller.pan_no(),
        seller.gst_no()
    )
}

/// Used for both the billing and the shipping address.
pub fn party_block(party: &Party) -> String {
    format!(
        "{}\n{}\n{}, {}, {}\nState/UT Code: {}",
        party.name(),
        party.address(),
        party.city(),
        party.state(),
        party.pincode(),
        party.state_code()
    )
}

pub fn order_block(order: &OrderInfo) -> String {
    format!(
        "Order Number: {}\nOrder Date: {}",
        order.order_no(),
        order.order_date()
    )
}

pub fn invoice_block(info: &InvoiceInfo) -> String {
    format!(
        "Invoice Number: {}\nInvoice Details: {}\nInvoice Date: {}",
        info.invoice_no(),
        info.invoice_details(),
        info.invoice_date()
    )
}

/// Lays an invoice out according to a [`LayoutConfig`].
pub struct InvoiceLayout<'a> {
    config: &'a LayoutConfig,
}

impl<'a> InvoiceLayout<'a> {
    pub fn new(config: &'a LayoutConfig) -> Self {
        Self { config }
    }

    /// Draw the whole invoice onto `surface` and return the totals that were printed.
    ///
    /// Totals are computed before the first draw call, so a failure leaves the surface untouched.
    ///
    /// # Errors
    /// Returns an `InvalidAmount` [`Error`] if the grand total cannot be represented.
    pub fn draw<S: Surface>(
        &self,
        invoice: &Invoice,
        assets: &Assets,
        surface: &mut S,
    ) -> Result<InvoiceTotals, Error> {
        let billing_state = invoice.billing().state();
        let shipping_state = invoice.shipping().state();
        let breakdowns: Vec<TaxBreakdown> = invoice
            .items()
            .iter()
            .map(|item| TaxBreakdown::for_item(item, billing_state, shipping_state))
            .collect();
        let totals = aggregate(invoice.items(), billing_state, shipping_state)
            .add_context("laying out invoice")?;

        self.draw_heading(assets, surface);
        self.draw_parties(invoice, surface);
        self.draw_table(invoice.items(), &breakdowns, surface);
        self.draw_footer(invoice, &totals, assets, surface);
        Ok(totals)
    }

    fn text<S: Surface>(&self, surface: &mut S, text: &str, at: Point) {
        surface.draw_text(text, at.x, at.y, self.config.font_size);
    }

    fn block<S: Surface>(&self, surface: &mut S, text: &str, at: Point) {
        draw_multiline_text(
            surface,
            text,
            at,
            self.config.font_size,
            self.config.line_spacing,
        );
    }

    fn draw_heading<S: Surface>(&self, assets: &Assets, surface: &mut S) {
        let c = self.config;
        surface.draw_image(&assets.logo, c.logo);
        surface.draw_text(DOCUMENT_TITLE, c.title.x, c.title.y, c.title_size);
        surface.draw_text(
            DOCUMENT_SUBTITLE,
            c.subtitle.x,
            c.subtitle.y,
            c.subtitle_size,
        );
    }

    fn draw_parties<S: Surface>(&self, invoice: &Invoice, surface: &mut S) {
        let c = self.config;
        self.text(surface, "Sold By:", c.seller_label);
        self.block(surface, &seller_block(invoice.seller()), c.seller_block);

        self.block(surface, &order_block(invoice.order()), c.order_block);
        self.block(surface, &invoice_block(invoice.info()), c.invoice_block);

        self.text(surface, "Billing Address:", c.billing_label);
        self.block(surface, &party_block(invoice.billing()), c.billing_block);

        self.text(surface, "Shipping Address:", c.shipping_label);
        self.block(surface, &party_block(invoice.shipping()), c.shipping_block);
    }

    fn draw_table<S: Surface>(
        &self,
        items: &[LineItem],
        breakdowns: &[TaxBreakdown],
        surface: &mut S,
    ) {
        let c = self.config;
        for spec in &c.columns {
            self.text(surface, spec.column.header(), at(spec.x, c.header_y));
        }
        for (index, (item, breakdown)) in items.iter().zip(breakdowns).enumerate() {
            let y = c.row_y(index);
            for spec in &c.columns {
                let cell = spec.column.cell(index, item, breakdown);
                self.text(surface, &cell, at(spec.x, y));
            }
        }
    }

    fn draw_footer<S: Surface>(
        &self,
        invoice: &Invoice,
        totals: &InvoiceTotals,
        assets: &Assets,
        surface: &mut S,
    ) {
        let c = self.config;
        let f = &c.footer;
        let anchor = c.footer_anchor(invoice.items().len());
        let line = |offset: f32| at(c.footer_x, anchor - offset);

        self.text(
            surface,
            &format!("Total Net Amount: {}", format_amount(&totals.net_total)),
            line(f.net_total),
        );
        self.text(
            surface,
            &format!("Total Tax Amount: {}", format_amount(&totals.tax_total)),
            line(f.tax_total),
        );
        self.text(
            surface,
            &format!("Total Amount: {}", format_amount(&totals.rounded_total)),
            line(f.grand_total),
        );
        self.text(
            surface,
            &format!("Amount in Words: {}", totals.words),
            line(f.words),
        );
        self.text(
            surface,
            &format!("For {}:", invoice.seller().name()),
            line(f.signatory_label),
        );
        surface.draw_image(
            &assets.signature,
            Rect {
                x: c.footer_x,
                y: anchor - f.signature_top - f.signature_height,
                width: f.signature_width,
                height: f.signature_height,
            },
        );
        self.text(surface, "Authorized Signatory", line(f.caption));
    }
}
