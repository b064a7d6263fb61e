use std::{
    collections::HashSet,
    fs,
    io::{self, Read},
    path::PathBuf,
};

use clap::{Parser, ValueEnum};
use gst_invoice::{Invoice, LayoutPreset, RenderOptions, error::AddContext};

fn read_until_eof() -> io::Result<String> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    Ok(input)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Layout {
    /// A4 portrait with a discount column
    Compact,
    /// A4 landscape without a discount column
    Wide,
}

impl From<Layout> for LayoutPreset {
    fn from(value: Layout) -> Self {
        match value {
            Layout::Compact => LayoutPreset::Compact,
            Layout::Wide => LayoutPreset::Wide,
        }
    }
}

#[derive(Debug, Parser)]
pub struct Cli {
    /// Path to the JSON file with invoice data to print. Either one invoice object or an array
    /// of them. Read from stdin when omitted
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Path to the directory where PDF outputs should be saved. PDFs go to stdout when omitted
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Directory containing logo.png and signature.png
    #[arg(short, long, default_value = "static")]
    pub assets: PathBuf,

    /// Page layout to render with
    #[arg(short, long, value_enum, default_value_t = Layout::Compact)]
    pub layout: Layout,
}

impl Cli {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::new(&self.assets).with_layout(LayoutPreset::from(self.layout).config())
    }

    pub fn get_invoices(&self) -> Result<Vec<Invoice>, gst_invoice::Error> {
        let raw = match &self.data {
            Some(path) => fs::read_to_string(path)
                .map_err(gst_invoice::Error::from)
                .add_context(&format!(
                    "reading invoice data from file '{}'",
                    path.to_str().unwrap_or("UNKNOWN")
                ))?,
            None => read_until_eof()
                .map_err(gst_invoice::Error::from)
                .add_context("reading invoice data from stdin")?,
        };

        parse_invoices(&raw).add_context("parsing invoice JSON")
    }
}

/// Accept either a single invoice object or an array of invoices.
pub fn parse_invoices(raw: &str) -> Result<Vec<Invoice>, gst_invoice::Error> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    if value.is_array() {
        Ok(serde_json::from_value(value)?)
    } else {
        Ok(vec![serde_json::from_value(value)?])
    }
}

/// File name for an invoice's PDF, derived from its invoice number.
pub fn pdf_file_name(invoice: &Invoice) -> String {
    let mut name = String::new();
    let mut last_dash = false;
    for ch in invoice.info().invoice_no().trim().chars() {
        if ch.is_ascii_alphanumeric() {
            name.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash && !name.is_empty() {
            name.push('-');
            last_dash = true;
        }
    }
    let name = name.trim_matches('-');
    if name.is_empty() {
        String::from("invoice.pdf")
    } else {
        format!("{name}.pdf")
    }
}

/// Claim `name` in `taken`, appending `-2`, `-3`, ... before the extension while it collides.
pub fn claim_file_name(name: &str, taken: &mut HashSet<String>) -> String {
    if taken.insert(name.to_string()) {
        return name.to_string();
    }
    let stem = name.strip_suffix(".pdf").unwrap_or(name);
    let mut n = 2;
    loop {
        let candidate = format!("{stem}-{n}.pdf");
        if taken.insert(candidate.clone()) {
            log::warn!("'{name}' is already used by another invoice, writing '{candidate}' instead");
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE: &str = r#"{
        "sellerDetails": {"name": "Acme", "address": "1 MG Road", "city": "Bengaluru",
            "state": "Karnataka", "pincode": "560001", "panNo": "P", "gstNo": "G"},
        "billingDetails": {"name": "B", "address": "A", "city": "C", "state": "Goa",
            "pincode": "1", "stateCode": "30"},
        "shippingDetails": {"name": "B", "address": "A", "city": "C", "state": "Goa",
            "pincode": "1", "stateCode": "30"},
        "orderDetails": {"orderNo": "O-1", "orderDate": "01.01.2026"},
        "invoiceDetails": {"invoiceNo": "INV/2026 #7", "invoiceDate": "02.01.2026"},
        "items": [{"description": "Widget", "unitPrice": "10.50", "quantity": 3}]
    }"#;

    #[test]
    fn parses_single_invoice_and_arrays() {
        assert_eq!(parse_invoices(ONE).unwrap().len(), 1);
        let many = format!("[{ONE}, {ONE}]");
        assert_eq!(parse_invoices(&many).unwrap().len(), 2);
    }

    #[test]
    fn rejects_malformed_json() {
        let err = parse_invoices("{ not json").unwrap_err();
        assert!(matches!(err.kind(), gst_invoice::ErrorKind::InvalidInput(_)));
    }

    #[test]
    fn file_names_are_sanitized() {
        let invoice = parse_invoices(ONE).unwrap().remove(0);
        assert_eq!(pdf_file_name(&invoice), "inv-2026-7.pdf");
    }

    #[test]
    fn colliding_file_names_get_a_suffix() {
        let mut taken = HashSet::new();
        let mut names = Vec::new();
        for no in ["INV/7", "INV-7", "inv 7", "INV-8"] {
            let value = ONE.replace("INV/2026 #7", no);
            let invoice = parse_invoices(&value).unwrap().remove(0);
            names.push(claim_file_name(&pdf_file_name(&invoice), &mut taken));
        }
        assert_eq!(names, ["inv-7.pdf", "inv-7-2.pdf", "inv-7-3.pdf", "inv-8.pdf"]);
    }

    #[test]
    fn layout_flag_maps_to_preset() {
        let cli = Cli::parse_from(["gst-invoice-cli", "--layout", "wide", "--assets", "img"]);
        let options = cli.render_options();
        assert_eq!(options.layout.preset, LayoutPreset::Wide);
        assert_eq!(options.assets_dir, PathBuf::from("img"));
    }
}
