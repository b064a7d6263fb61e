//! Invoice domain types and serialization helpers.
//!
//! This module defines the typed schema of a GST invoice request: the seller, the billing and
//! shipping parties, order and invoice metadata, and the line items. Incoming JSON is validated
//! against this schema once, at the boundary, so the layout code can rely on well-typed input.
//! Monetary values are [`BigDecimal`] and accept either a JSON number or a decimal string.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::Local;
use derive_builder::Builder;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{AddContext, Error};

fn serialize_bigdecimal<S>(value: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_string())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Text(String),
    Number(serde_json::Number),
}

impl RawScalar {
    fn into_text(self) -> String {
        match self {
            RawScalar::Text(s) => s,
            RawScalar::Number(n) => n.to_string(),
        }
    }

    fn parse<E: serde::de::Error>(self) -> Result<BigDecimal, E> {
        BigDecimal::from_str(self.into_text().trim()).map_err(E::custom)
    }
}

/// Postal and state codes are often sent as bare JSON numbers.
fn deserialize_code<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(RawScalar::deserialize(deserializer)?.into_text())
}

fn deserialize_bigdecimal<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
where
    D: Deserializer<'de>,
{
    RawScalar::deserialize(deserializer)?.parse()
}

fn deserialize_discount<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawScalar>::deserialize(deserializer)? {
        Some(raw) => raw.parse(),
        None => Ok(BigDecimal::from(0)),
    }
}

fn zero() -> BigDecimal {
    BigDecimal::from(0)
}

fn today() -> String {
    Local::now().format("%d.%m.%Y").to_string()
}

fn no_reverse_charge() -> String {
    String::from("No")
}

/// The selling business, including its tax registration identifiers.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), pattern = "owned")]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    name: String,
    address: String,
    city: String,
    state: String,
    #[serde(deserialize_with = "deserialize_code")]
    pincode: String,
    pan_no: String,
    gst_no: String,
}

/// A billing or shipping party.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), pattern = "owned")]
#[serde(rename_all = "camelCase")]
pub struct Party {
    name: String,
    address: String,
    city: String,
    state: String,
    #[serde(deserialize_with = "deserialize_code")]
    pincode: String,
    #[serde(deserialize_with = "deserialize_code")]
    state_code: String,
}

#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), pattern = "owned")]
#[serde(rename_all = "camelCase")]
pub struct OrderInfo {
    order_no: String,
    order_date: String,
}

#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), pattern = "owned")]
#[serde(rename_all = "camelCase")]
pub struct InvoiceInfo {
    invoice_no: String,
    #[builder(default)]
    #[serde(default)]
    invoice_details: String,
    /// Defaults to today's local date when omitted
    #[builder(default = today())]
    #[serde(default = "today")]
    invoice_date: String,
}

/// A single invoice line: what was sold, at what unit price, how many, and any flat discount.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), pattern = "owned")]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    description: String,
    #[serde(
        serialize_with = "serialize_bigdecimal",
        deserialize_with = "deserialize_bigdecimal"
    )]
    unit_price: BigDecimal,
    quantity: i32,
    #[serde(
        default = "zero",
        serialize_with = "serialize_bigdecimal",
        deserialize_with = "deserialize_discount"
    )]
    #[builder(default = BigDecimal::from(0))]
    discount: BigDecimal,
}

/// Invoice top level model
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), pattern = "owned")]
pub struct Invoice {
    #[serde(rename = "sellerDetails")]
    seller: Seller,
    #[serde(rename = "billingDetails")]
    billing: Party,
    #[serde(rename = "shippingDetails")]
    shipping: Party,
    #[serde(rename = "orderDetails")]
    order: OrderInfo,
    #[serde(rename = "invoiceDetails")]
    info: InvoiceInfo,
    #[serde(default)]
    #[builder(default = Vec::new())]
    items: Vec<LineItem>,
    /// Informational only; never used in tax computation
    #[serde(rename = "reverseCharge", default = "no_reverse_charge")]
    #[builder(default = no_reverse_charge())]
    reverse_charge: String,
}

impl Seller {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn pincode(&self) -> &str {
        &self.pincode
    }

    pub fn pan_no(&self) -> &str {
        &self.pan_no
    }

    pub fn gst_no(&self) -> &str {
        &self.gst_no
    }
}

impl Party {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    /// The state name used to decide between CGST + SGST and IGST.
    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn pincode(&self) -> &str {
        &self.pincode
    }

    pub fn state_code(&self) -> &str {
        &self.state_code
    }
}

impl OrderInfo {
    pub fn order_no(&self) -> &str {
        &self.order_no
    }

    pub fn order_date(&self) -> &str {
        &self.order_date
    }
}

impl InvoiceInfo {
    pub fn invoice_no(&self) -> &str {
        &self.invoice_no
    }

    pub fn invoice_details(&self) -> &str {
        &self.invoice_details
    }

    pub fn invoice_date(&self) -> &str {
        &self.invoice_date
    }
}

impl LineItem {
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Return the unit price for this line item.
    pub fn unit_price(&self) -> &BigDecimal {
        &self.unit_price
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    /// Return the flat discount subtracted from `unit_price * quantity`, zero when none was given.
    pub fn discount(&self) -> &BigDecimal {
        &self.discount
    }
}

impl Invoice {
    /// Parse an invoice from a JSON request body.
    ///
    /// # Errors
    /// Returns an [`Error`] of kind `InvalidInput` if the payload is not valid JSON or any field
    /// does not have the expected shape, e.g. a number where text is expected.
    ///
    /// # Example
    /// ```rust
    /// use gst_invoice::Invoice;
    ///
    /// let json = br#"{
    ///     "sellerDetails": {"name": "Acme", "address": "1 MG Road", "city": "Bengaluru",
    ///         "state": "Karnataka", "pincode": "560001", "panNo": "AAAAA0000A",
    ///         "gstNo": "29AAAAA0000A1Z5"},
    ///     "billingDetails": {"name": "B", "address": "2 Main St", "city": "Mysuru",
    ///         "state": "Karnataka", "pincode": "570001", "stateCode": "29"},
    ///     "shippingDetails": {"name": "B", "address": "2 Main St", "city": "Mysuru",
    ///         "state": "Karnataka", "pincode": "570001", "stateCode": "29"},
    ///     "orderDetails": {"orderNo": "O-1", "orderDate": "01.01.2026"},
    ///     "invoiceDetails": {"invoiceNo": "I-1", "invoiceDetails": "KA-1", "invoiceDate": "02.01.2026"},
    ///     "items": [{"description": "Widget", "unitPrice": 100, "quantity": 2}],
    ///     "reverseCharge": "No"
    /// }"#;
    /// let invoice = Invoice::from_json(json).unwrap();
    /// assert_eq!(invoice.items().len(), 1);
    /// ```
    pub fn from_json(bytes: &[u8]) -> Result<Invoice, Error> {
        serde_json::from_slice(bytes)
            .map_err(Error::from)
            .add_context("parsing invoice JSON")
    }

    pub fn seller(&self) -> &Seller {
        &self.seller
    }

    pub fn billing(&self) -> &Party {
        &self.billing
    }

    pub fn shipping(&self) -> &Party {
        &self.shipping
    }

    pub fn order(&self) -> &OrderInfo {
        &self.order
    }

    pub fn info(&self) -> &InvoiceInfo {
        &self.info
    }

    /// Return the invoice's line items in the order they were supplied.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn reverse_charge(&self) -> &str {
        &self.reverse_charge
    }
}

impl InvoiceBuilder {
    /// Add a [`LineItem`] to the builder's internal list.
    ///
    /// # Example
    /// ```rust
    /// use gst_invoice::{InvoiceBuilder, LineItemBuilder};
    ///
    /// let item = LineItemBuilder::default()
    ///     .description("Widget")
    ///     .unit_price(100)
    ///     .quantity(2)
    ///     .build().unwrap();
    /// let builder = InvoiceBuilder::default().add_item(item);
    /// ```
    pub fn add_item(self, item: LineItem) -> Self {
        match self.items {
            Some(mut items) => {
                items.push(item);
                Self {
                    items: Some(items),
                    ..self
                }
            }
            None => Self {
                items: Some(vec![item]),
                ..self
            },
        }
    }
}
