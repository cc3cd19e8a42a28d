//! GST slabs and the CGST/SGST presentation split

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::types::{InvoiceError, InvoiceResult};

/// GST rate slabs a product can be classified under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GstSlab {
    /// Exempt and nil-rated goods - 0%
    Nil,
    /// Essentials - 5%
    Five,
    /// Standard goods - 12%
    Twelve,
    /// Most goods and services - 18%
    Eighteen,
    /// Luxury goods - 28%
    TwentyEight,
    /// Sin and demerit goods - 40%
    Forty,
}

impl GstSlab {
    /// Every slab, lowest rate first
    pub const ALL: [GstSlab; 6] = [
        GstSlab::Nil,
        GstSlab::Five,
        GstSlab::Twelve,
        GstSlab::Eighteen,
        GstSlab::TwentyEight,
        GstSlab::Forty,
    ];

    /// Get the GST percentage for this slab
    pub fn rate(&self) -> BigDecimal {
        match self {
            GstSlab::Nil => BigDecimal::from(0),
            GstSlab::Five => BigDecimal::from(5),
            GstSlab::Twelve => BigDecimal::from(12),
            GstSlab::Eighteen => BigDecimal::from(18),
            GstSlab::TwentyEight => BigDecimal::from(28),
            GstSlab::Forty => BigDecimal::from(40),
        }
    }

    /// Look up the slab for a percentage, rejecting anything off the schedule
    pub fn from_percentage(percentage: &BigDecimal) -> InvoiceResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|slab| slab.rate() == *percentage)
            .ok_or_else(|| {
                InvoiceError::InvalidTaxRate(format!(
                    "{}% is not a GST slab (expected one of 0, 5, 12, 18, 28, 40)",
                    percentage
                ))
            })
    }
}

/// Central/State halves of a tax amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxSplit {
    pub cgst_amount: BigDecimal,
    pub sgst_amount: BigDecimal,
}

impl TaxSplit {
    /// Split a tax amount 50/50 between CGST and SGST
    ///
    /// Applied to the invoice-wide tax regardless of how many different rates
    /// the lines carry. Use [`crate::pricing::tax_by_slab`] for the per-rate view.
    pub fn even(tax_amount: &BigDecimal) -> Self {
        let half = tax_amount / BigDecimal::from(2);
        Self {
            cgst_amount: half.clone(),
            sgst_amount: half,
        }
    }
}
