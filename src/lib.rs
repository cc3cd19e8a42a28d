//! # Invoice Core
//!
//! The monetary side of a GST invoicing application: line-item pricing,
//! invoice totals, and the "amount in words" line of a printed invoice.
//!
//! ## Features
//!
//! - **Line-item pricing**: unit price and tax-inclusive price kept consistent, discounts, line totals
//! - **Invoice totals**: taxable value, tax, discount and grand total with the CGST/SGST split
//! - **Amount in words**: Indian numbering (Thousand, Lakh, Crore) with optional paisa
//! - **Drafts**: edit policy for an invoice being composed, including dropping invalid lines
//! - **Storage abstraction**: database-agnostic invoice creation and payment tracking
//!
//! ## Quick Start
//!
//! ```rust
//! use invoice_core::{amount_to_words, InvoiceDraft, PaisaMode, ProductRef, Unit};
//! use bigdecimal::BigDecimal;
//!
//! let pen = ProductRef::new(
//!     "pen".to_string(),
//!     "Gel Pen".to_string(),
//!     BigDecimal::from(100),
//!     BigDecimal::from(18),
//!     Unit::Pcs,
//! );
//!
//! let mut draft = InvoiceDraft::new();
//! draft.add_product(&pen, BigDecimal::from(2)).unwrap();
//! draft.set_discount("pen", BigDecimal::from(10)).unwrap();
//!
//! let totals = draft.totals().rounded(2);
//! assert_eq!(totals.total_amount, "212.40".parse::<BigDecimal>().unwrap());
//! assert_eq!(
//!     amount_to_words(&totals.total_amount, PaisaMode::Words).unwrap(),
//!     "Two Hundred Twelve and Forty Paisa"
//! );
//! ```

pub mod config;
pub mod invoice;
pub mod pricing;
pub mod tax;
pub mod traits;
pub mod types;
pub mod utils;
pub mod words;

// Re-export commonly used types
pub use config::*;
pub use invoice::*;
pub use pricing::*;
pub use tax::gst::*;
pub use traits::*;
pub use types::*;
pub use words::*;
