//! Core types and data structures for the invoice engine

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Units a catalog product is sold in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Unit {
    Pcs,
    Kg,
    Gm,
    Ltr,
    Ml,
    Mtr,
    Box,
    Dozen,
    Set,
    Hour,
}

/// Catalog product as supplied by the persistence layer
///
/// Reference data only; the engine never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRef {
    /// Unique identifier for the product
    pub id: String,
    /// Display name printed on the invoice
    pub name: String,
    /// Default unit price before tax
    pub selling_price: BigDecimal,
    /// GST percentage (one of 0, 5, 12, 18, 28, 40)
    pub tax_percentage: BigDecimal,
    /// Unit the quantity is measured in
    pub primary_units: Unit,
    /// HSN/SAC classification code
    pub hsn_sac_code: Option<String>,
}

impl ProductRef {
    /// Create a new product reference
    pub fn new(
        id: String,
        name: String,
        selling_price: BigDecimal,
        tax_percentage: BigDecimal,
        primary_units: Unit,
    ) -> Self {
        Self {
            id,
            name,
            selling_price,
            tax_percentage,
            primary_units,
            hsn_sac_code: None,
        }
    }

    /// Attach an HSN/SAC code
    pub fn with_hsn_sac_code(mut self, code: String) -> Self {
        self.hsn_sac_code = Some(code);
        self
    }
}

/// Which of the two price fields on a line was edited last
///
/// The other one is always re-derived from it through the tax rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceDriver {
    /// `unit_price` drives, `price_with_tax` is derived
    UnitPrice,
    /// `price_with_tax` drives, `unit_price` is derived
    PriceWithTax,
}

/// A single line on an invoice being edited
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: String,
    pub name: String,
    pub hsn_sac_code: Option<String>,
    pub unit: Unit,
    /// Always greater than zero while the line is part of a draft
    pub quantity: BigDecimal,
    /// Price per unit before tax
    pub unit_price: BigDecimal,
    /// Discount percentage in `[0, 100]`
    pub discount_percent: BigDecimal,
    /// Copied from the product, not editable per line
    pub tax_percentage: BigDecimal,
    /// Price per unit including tax
    pub price_with_tax: BigDecimal,
    /// Line amount including tax
    pub total: BigDecimal,
    /// Which price field is currently authoritative
    pub driver: PriceDriver,
    /// Whether `total` was typed in by the user rather than computed
    pub total_overridden: bool,
}

/// Aggregate amounts for a list of line items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    /// Sum of pre-tax amounts after discount
    pub taxable_value: BigDecimal,
    /// Sum of tax across all lines
    pub tax_amount: BigDecimal,
    /// Sum of discounts across all lines
    pub total_discount: BigDecimal,
    /// `taxable_value + tax_amount`
    pub total_amount: BigDecimal,
    /// Half of `tax_amount`
    pub cgst_amount: BigDecimal,
    /// Half of `tax_amount`
    pub sgst_amount: BigDecimal,
}

impl InvoiceTotals {
    /// All-zero totals, the result for an empty invoice
    pub fn zero() -> Self {
        Self {
            taxable_value: BigDecimal::from(0),
            tax_amount: BigDecimal::from(0),
            total_discount: BigDecimal::from(0),
            total_amount: BigDecimal::from(0),
            cgst_amount: BigDecimal::from(0),
            sgst_amount: BigDecimal::from(0),
        }
    }
}

impl Default for InvoiceTotals {
    fn default() -> Self {
        Self::zero()
    }
}

/// Taxable value and tax grouped under one GST rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlabSummary {
    pub tax_percentage: BigDecimal,
    pub taxable_value: BigDecimal,
    pub tax_amount: BigDecimal,
}

/// Payment state of a stored invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Unpaid,
    PartiallyPaid,
    Paid,
}

impl InvoiceStatus {
    /// Derive the status from the amount already paid and the remaining balance
    pub fn from_amounts(paid: &BigDecimal, balance: &BigDecimal) -> Self {
        let zero = BigDecimal::from(0);
        if *balance <= zero {
            InvoiceStatus::Paid
        } else if *paid > zero {
            InvoiceStatus::PartiallyPaid
        } else {
            InvoiceStatus::Unpaid
        }
    }
}

/// Persisted line of a finished invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub product_id: String,
    pub name: String,
    pub hsn_sac_code: Option<String>,
    pub unit: Unit,
    pub quantity: BigDecimal,
    pub unit_price: BigDecimal,
    pub discount_percent: BigDecimal,
    pub tax_percentage: BigDecimal,
    /// Tax charged on this line
    pub tax_amount: BigDecimal,
    /// Line amount including tax
    pub total_amount: BigDecimal,
}

/// Payment recorded against an invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub date: NaiveDate,
    pub amount: BigDecimal,
}

/// Finished invoice as handed to the persistence layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier for the invoice
    pub id: Uuid,
    /// Human-facing invoice number, unique per store
    pub number: String,
    /// Client the invoice is billed to
    pub client_id: String,
    pub issue_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub items: Vec<InvoiceItem>,
    /// Taxable value of all lines
    pub subtotal: BigDecimal,
    pub tax_amount: BigDecimal,
    pub discount_amount: BigDecimal,
    pub cgst_amount: BigDecimal,
    pub sgst_amount: BigDecimal,
    /// Grand total including tax
    pub total_amount: BigDecimal,
    /// Sum of all payments, including the upfront one
    pub paid_amount: BigDecimal,
    /// `total_amount - paid_amount`
    pub balance_amount: BigDecimal,
    pub status: InvoiceStatus,
    /// Grand total spelled out for the printed document
    pub amount_in_words: String,
    pub payments: Vec<Payment>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Errors that can occur in the invoice engine
#[derive(Debug, thiserror::Error)]
pub enum InvoiceError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Invalid tax rate: {0}")]
    InvalidTaxRate(String),
    #[error("Line item not found: {0}")]
    ItemNotFound(String),
    #[error("Product not found: {0}")]
    ProductNotFound(String),
    #[error("Invoice not found: {0}")]
    InvoiceNotFound(String),
    #[error("Duplicate invoice number: {0}")]
    DuplicateInvoice(String),
    #[error("Payment error: {0}")]
    Payment(String),
    #[error("Amount out of range: {0}")]
    AmountOutOfRange(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type for invoice operations
pub type InvoiceResult<T> = Result<T, InvoiceError>;

/// Parameters for turning a draft into a stored invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateInvoiceParams {
    pub number: String,
    pub client_id: String,
    pub issue_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    /// Amount received when the invoice is raised
    pub upfront_payment: Option<BigDecimal>,
}
