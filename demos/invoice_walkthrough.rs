//! Composing a draft, creating an invoice and recording a payment

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use invoice_core::{
    utils::MemoryStorage, CreateInvoiceParams, GstSlab, InvoiceDraft, InvoiceManager, ProductRef,
    Unit,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("🧾 Invoice Core - Walkthrough\n");

    let catalog = vec![
        ProductRef::new(
            "rice".to_string(),
            "Basmati Rice".to_string(),
            BigDecimal::from(150),
            GstSlab::Five.rate(),
            Unit::Kg,
        )
        .with_hsn_sac_code("1006".to_string()),
        ProductRef::new(
            "oil".to_string(),
            "Cooking Oil 1L".to_string(),
            BigDecimal::from(120),
            GstSlab::Twelve.rate(),
            Unit::Ltr,
        ),
        ProductRef::new(
            "consulting".to_string(),
            "Consultation".to_string(),
            BigDecimal::from(2000),
            GstSlab::Eighteen.rate(),
            Unit::Hour,
        )
        .with_hsn_sac_code("998311".to_string()),
    ];

    let mut manager = InvoiceManager::new(MemoryStorage::with_products(catalog));

    // 1. Build up a draft the way an invoice form would
    let mut draft = InvoiceDraft::new();
    manager
        .add_catalog_product(&mut draft, "rice", BigDecimal::from(2))
        .await?;
    manager
        .add_catalog_product(&mut draft, "oil", BigDecimal::from(3))
        .await?;
    manager
        .add_catalog_product(&mut draft, "consulting", BigDecimal::from(1))
        .await?;

    draft.set_discount("consulting", BigDecimal::from(10))?;
    draft.set_price_with_tax("oil", BigDecimal::from(130))?;

    println!("✏️  Draft Lines:");
    for (i, item) in draft.items().iter().enumerate() {
        println!(
            "    {}. {} × {} @ ₹{} (₹{} incl. {}% GST, {}% off) = ₹{}",
            i + 1,
            item.name,
            item.quantity,
            item.unit_price,
            item.price_with_tax,
            item.tax_percentage,
            item.discount_percent,
            item.total.with_scale(2)
        );
    }
    println!();

    // 2. An invalid quantity drops the line
    draft.commit_quantity("rice", "0")?;
    println!(
        "🗑️  Rice removed after entering quantity 0, {} lines left\n",
        draft.items().len()
    );

    println!("📊 Tax by Rate:");
    for slab in draft.tax_by_slab() {
        println!(
            "    {}%: taxable ₹{} tax ₹{}",
            slab.tax_percentage,
            slab.taxable_value.with_scale(2),
            slab.tax_amount.with_scale(2)
        );
    }
    println!();

    // 3. Turn the draft into a stored invoice
    let invoice = manager
        .create_invoice(
            CreateInvoiceParams {
                number: "INV/2024/001".to_string(),
                client_id: "acme-traders".to_string(),
                issue_date: NaiveDate::from_ymd_opt(2024, 4, 1).ok_or("bad date")?,
                due_date: NaiveDate::from_ymd_opt(2024, 4, 30),
                upfront_payment: Some(BigDecimal::from(500)),
            },
            &draft,
        )
        .await?;

    println!("🧾 Invoice {}:", invoice.number);
    println!("    Taxable Value: ₹{}", invoice.subtotal);
    println!("    Discount:      ₹{}", invoice.discount_amount);
    println!("    CGST:          ₹{}", invoice.cgst_amount);
    println!("    SGST:          ₹{}", invoice.sgst_amount);
    println!("    Grand Total:   ₹{}", invoice.total_amount);
    println!("    In Words:      {}", invoice.amount_in_words);
    println!("    Balance:       ₹{} ({:?})", invoice.balance_amount, invoice.status);
    println!();

    // 4. Settle the rest
    let settled = manager
        .record_payment(
            &invoice.id,
            invoice.balance_amount.clone(),
            NaiveDate::from_ymd_opt(2024, 4, 15).ok_or("bad date")?,
        )
        .await?;

    println!(
        "💰 Paid ₹{} over {} payments, status {:?}",
        settled.paid_amount,
        settled.payments.len(),
        settled.status
    );

    Ok(())
}
