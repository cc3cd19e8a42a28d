//! Turning drafts into stored invoices and tracking their balance

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::invoice::InvoiceDraft;
use crate::pricing::{line_contribution, round_amount};
use crate::traits::*;
use crate::types::*;
use crate::words::amount_to_words;

/// Invoice manager for creating invoices and recording payments
pub struct InvoiceManager<S: InvoiceStorage> {
    storage: S,
    validator: Box<dyn InvoiceValidator>,
    config: EngineConfig,
}

impl<S: InvoiceStorage> InvoiceManager<S> {
    /// Create a new invoice manager
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            validator: Box::new(DefaultInvoiceValidator),
            config: EngineConfig::default(),
        }
    }

    /// Create a new invoice manager with custom configuration
    pub fn with_config(storage: S, config: EngineConfig) -> Self {
        Self {
            storage,
            validator: Box::new(DefaultInvoiceValidator),
            config,
        }
    }

    /// Replace the validator
    pub fn with_validator(mut self, validator: Box<dyn InvoiceValidator>) -> Self {
        self.validator = validator;
        self
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Look up a catalog product and add it to a draft
    pub async fn add_catalog_product(
        &self,
        draft: &mut InvoiceDraft,
        product_id: &str,
        quantity: BigDecimal,
    ) -> InvoiceResult<()> {
        let product = self
            .storage
            .get_product(product_id)
            .await?
            .ok_or_else(|| InvoiceError::ProductNotFound(product_id.to_string()))?;

        draft.add_product(&product, quantity)
    }

    /// Create and store an invoice from a draft
    pub async fn create_invoice(
        &mut self,
        params: CreateInvoiceParams,
        draft: &InvoiceDraft,
    ) -> InvoiceResult<Invoice> {
        self.validator.validate_new_invoice(&params, draft.items())?;

        if self
            .storage
            .find_invoice_by_number(&params.number)
            .await?
            .is_some()
        {
            return Err(InvoiceError::DuplicateInvoice(params.number));
        }

        let scale = self.config.scale;
        let totals = draft.totals().rounded(scale);

        let upfront = params
            .upfront_payment
            .as_ref()
            .map(|amount| round_amount(amount, scale))
            .unwrap_or_else(|| BigDecimal::from(0));

        if upfront > totals.total_amount {
            return Err(InvoiceError::Payment(format!(
                "Upfront payment {} exceeds invoice total {}",
                upfront, totals.total_amount
            )));
        }

        let items = draft
            .items()
            .iter()
            .map(|item| {
                let contribution = line_contribution(item);
                // An overridden total carries no discount; price the row off its taxable base
                let (unit_price, discount_percent) = if item.total_overridden {
                    (
                        round_amount(&(&contribution.taxable / &item.quantity), scale),
                        BigDecimal::from(0),
                    )
                } else {
                    (item.unit_price.clone(), item.discount_percent.clone())
                };
                InvoiceItem {
                    product_id: item.product_id.clone(),
                    name: item.name.clone(),
                    hsn_sac_code: item.hsn_sac_code.clone(),
                    unit: item.unit,
                    quantity: item.quantity.clone(),
                    unit_price,
                    discount_percent,
                    tax_percentage: item.tax_percentage.clone(),
                    tax_amount: round_amount(&contribution.tax, scale),
                    total_amount: round_amount(&contribution.total(), scale),
                }
            })
            .collect();

        let mut payments = Vec::new();
        if upfront > BigDecimal::from(0) {
            payments.push(Payment {
                id: Uuid::new_v4(),
                date: params.issue_date,
                amount: upfront.clone(),
            });
        }

        let balance_amount = &totals.total_amount - &upfront;
        let now = chrono::Utc::now().naive_utc();
        let invoice = Invoice {
            id: Uuid::new_v4(),
            number: params.number,
            client_id: params.client_id,
            issue_date: params.issue_date,
            due_date: params.due_date,
            items,
            subtotal: totals.taxable_value,
            tax_amount: totals.tax_amount,
            discount_amount: totals.total_discount,
            cgst_amount: totals.cgst_amount,
            sgst_amount: totals.sgst_amount,
            amount_in_words: amount_to_words(&totals.total_amount, self.config.paisa)?,
            total_amount: totals.total_amount,
            status: InvoiceStatus::from_amounts(&upfront, &balance_amount),
            paid_amount: upfront,
            balance_amount,
            payments,
            created_at: now,
            updated_at: now,
        };

        self.storage.save_invoice(&invoice).await?;

        info!(
            invoice_id = %invoice.id,
            number = %invoice.number,
            total = %invoice.total_amount,
            balance = %invoice.balance_amount,
            "created invoice"
        );

        Ok(invoice)
    }

    /// Get an invoice by ID
    pub async fn get_invoice(&self, invoice_id: &Uuid) -> InvoiceResult<Option<Invoice>> {
        self.storage.get_invoice(invoice_id).await
    }

    /// Get an invoice by ID, returning an error if not found
    pub async fn get_invoice_required(&self, invoice_id: &Uuid) -> InvoiceResult<Invoice> {
        self.storage
            .get_invoice(invoice_id)
            .await?
            .ok_or_else(|| InvoiceError::InvoiceNotFound(invoice_id.to_string()))
    }

    /// List invoices, optionally for a single client
    pub async fn list_invoices(&self, client_id: Option<&str>) -> InvoiceResult<Vec<Invoice>> {
        self.storage.list_invoices(client_id).await
    }

    /// Record a payment and update the outstanding balance
    pub async fn record_payment(
        &mut self,
        invoice_id: &Uuid,
        amount: BigDecimal,
        date: NaiveDate,
    ) -> InvoiceResult<Invoice> {
        let mut invoice = self.get_invoice_required(invoice_id).await?;
        let amount = round_amount(&amount, self.config.scale);

        if let Err(e) = self.validator.validate_payment(&invoice, &amount) {
            warn!(invoice_id = %invoice.id, %amount, error = %e, "rejected payment");
            return Err(e);
        }

        invoice.paid_amount += &amount;
        invoice.balance_amount = &invoice.total_amount - &invoice.paid_amount;
        invoice.status = InvoiceStatus::from_amounts(&invoice.paid_amount, &invoice.balance_amount);
        invoice.payments.push(Payment {
            id: Uuid::new_v4(),
            date,
            amount: amount.clone(),
        });
        invoice.updated_at = chrono::Utc::now().naive_utc();

        self.storage.update_invoice(&invoice).await?;

        info!(
            invoice_id = %invoice.id,
            %amount,
            balance = %invoice.balance_amount,
            status = ?invoice.status,
            "recorded payment"
        );

        Ok(invoice)
    }

    /// Delete an invoice
    pub async fn delete_invoice(&mut self, invoice_id: &Uuid) -> InvoiceResult<()> {
        self.storage.delete_invoice(invoice_id).await?;
        info!(%invoice_id, "deleted invoice");
        Ok(())
    }
}
