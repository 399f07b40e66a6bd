use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceRecord {
    pub organisation: String,
    pub company: String,
    pub project_number: String,
    pub project: String,
    pub invoice_number: Option<String>,
    pub reference: String,
    pub email_recipients: String,
    pub invoice_date: String,
    pub account_manager_current: String,
    pub project_manager_current: String,
    pub project_manager_original: String,
    pub status: String,
    pub due_date: String,
    pub payment_date: String,
    pub invoiced_amount: Option<Decimal>,
    pub currency: String,
    pub tax_amount: String,
    pub invoiced_amount_with_tax: String,
    pub converted_amount: String,
    pub converted_currency: String,
}

impl InvoiceRecord {
    /// An invoice line only counts as issued when it carries an invoice number.
    pub fn is_issued(&self) -> bool {
        self.invoice_number.is_some()
    }
}
