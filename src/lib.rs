//! Utilities for generating Indian GST tax invoices as PDFs
//!
//! This crate computes per-item GST (CGST + SGST for intra-state supplies, IGST otherwise),
//! aggregates invoice totals, spells the total in words, and lays everything out on a single
//! fixed-size page rendered with `printpdf`. It exposes the invoice model types, the pure
//! calculation functions, and a high-level function to generate a PDF from an [`Invoice`].
//! The `gst-invoice` binary serves the same pipeline over HTTP.
//!
//! # Example
//!
//! ```rust,no_run
//! use gst_invoice::{Invoice, RenderOptions, generate_pdf};
//!
//! let body = std::fs::read("invoice.json").unwrap();
//! let invoice = Invoice::from_json(&body).unwrap();
//! let pdf = generate_pdf(&invoice, &RenderOptions::new("static")).unwrap();
//! std::fs::write("invoice.pdf", pdf).unwrap();
//! ```

pub mod assets;
pub mod error;
pub mod invoice;
pub mod layout;
pub mod render;
pub mod server;
pub mod tax;
pub mod words;

use std::path::PathBuf;

pub use error::{Error, ErrorKind};
pub use invoice::{
    Invoice, InvoiceBuilder, InvoiceBuilderError, InvoiceInfo, InvoiceInfoBuilder,
    InvoiceInfoBuilderError, LineItem, LineItemBuilder, LineItemBuilderError, OrderInfo,
    OrderInfoBuilder, OrderInfoBuilderError, Party, PartyBuilder, PartyBuilderError, Seller,
    SellerBuilder, SellerBuilderError,
};
pub use layout::{DrawList, DrawOp, LayoutConfig, LayoutPreset, Surface};
pub use tax::{InvoiceTotals, TaxBreakdown};

use assets::Assets;
use error::AddContext;
use layout::{DOCUMENT_TITLE, InvoiceLayout};
use render::PdfSurface;

/// Everything needed to render an invoice besides the invoice itself.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub layout: LayoutConfig,
    /// Directory holding `logo.png` and `signature.png`
    pub assets_dir: PathBuf,
}

impl RenderOptions {
    /// Compact layout with assets read from `assets_dir`.
    pub fn new(assets_dir: impl Into<PathBuf>) -> Self {
        RenderOptions {
            layout: LayoutConfig::compact(),
            assets_dir: assets_dir.into(),
        }
    }

    pub fn with_layout(self, layout: LayoutConfig) -> Self {
        RenderOptions { layout, ..self }
    }
}

/// Load the static assets and draw `invoice` onto `surface`.
///
/// Assets are loaded before anything is drawn, so a missing logo or signature leaves the
/// surface untouched.
///
/// # Errors
/// - `AssetMissing` if either image is absent from [`RenderOptions::assets_dir`]
/// - `InvalidAmount` if the grand total cannot be represented
/// - I/O or image decoding errors while loading the assets
pub fn render_invoice<S: Surface>(
    invoice: &Invoice,
    options: &RenderOptions,
    surface: &mut S,
) -> Result<InvoiceTotals, Error> {
    let assets = Assets::load(&options.assets_dir).add_context("loading static assets")?;
    let totals = InvoiceLayout::new(&options.layout)
        .draw(invoice, &assets, surface)
        .add_context(&format!(
            "drawing invoice '{}'",
            invoice.info().invoice_no()
        ))?;
    log::debug!(
        "laid out invoice '{}' with {} item(s), total {}",
        invoice.info().invoice_no(),
        invoice.items().len(),
        totals.rounded_total
    );
    Ok(totals)
}

/// Generate a PDF byte array from an [`Invoice`]
///
/// Either the whole document is produced or an error is returned; no partial PDF is ever
/// handed back.
///
/// # Errors
/// Everything [`render_invoice`] can return, plus PDF serialization failures.
pub fn generate_pdf(invoice: &Invoice, options: &RenderOptions) -> Result<Vec<u8>, Error> {
    let mut surface = PdfSurface::new(DOCUMENT_TITLE, &options.layout)
        .add_context("creating pdf document")
        .add_context("generating pdf")?;
    render_invoice(invoice, options, &mut surface).add_context("generating pdf")?;
    surface.finish().add_context("generating pdf")
}

/// Lay out an [`Invoice`] without producing a PDF, returning the recorded draw calls.
pub fn generate_draw_list(invoice: &Invoice, options: &RenderOptions) -> Result<DrawList, Error> {
    let mut list = DrawList::new();
    render_invoice(invoice, options, &mut list).add_context("recording draw list")?;
    Ok(list)
}
