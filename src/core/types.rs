use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::InvoiceError;

/// Output format understood by the rendering API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvoiceFormat {
    /// Rendered PDF document.
    Pdf,
    /// UBL e-invoice XML.
    Ubl,
}

impl InvoiceFormat {
    /// File extension (without dot) for documents in this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Ubl => "xml",
        }
    }

    /// Path suffix appended to the service base URL.
    pub fn endpoint_suffix(&self) -> &'static str {
        match self {
            Self::Pdf => "",
            Self::Ubl => "/ubl",
        }
    }
}

/// How the tax line is displayed on the rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaxDisplay {
    /// Tax line is not shown.
    Hidden,
    /// Tax shown as a raw amount.
    Amount,
    /// Tax shown as a percentage.
    #[default]
    Percentage,
}

/// Rendering hints controlling which subtotal lines appear on the document.
///
/// Purely presentational — passed through to the API unchanged, no
/// cross-field invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayFields {
    pub tax: TaxDisplay,
    pub discounts: bool,
    pub shipping: bool,
}

impl Default for DisplayFields {
    fn default() -> Self {
        Self {
            tax: TaxDisplay::Percentage,
            discounts: false,
            shipping: false,
        }
    }
}

/// Free-form name/value pair rendered in the invoice header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomField {
    pub name: String,
    pub value: String,
}

/// A single billable line on an invoice.
///
/// Construction is validated fail-fast: a blank name, zero quantity,
/// negative unit cost, or negative discount is rejected before the item
/// can exist. Use [`InvoiceItemBuilder`](super::InvoiceItemBuilder) or
/// [`InvoiceItem::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceItem {
    pub(crate) name: String,
    pub(crate) quantity: u32,
    pub(crate) unit_cost: Decimal,
    pub(crate) description: Option<String>,
    pub(crate) discount: Option<Decimal>,
}

impl InvoiceItem {
    /// Create an item with no description or discount.
    pub fn new(
        name: impl Into<String>,
        quantity: u32,
        unit_cost: Decimal,
    ) -> Result<Self, InvoiceError> {
        super::InvoiceItemBuilder::new(name, quantity, unit_cost).build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_cost(&self) -> Decimal {
        self.unit_cost
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Flat discount subtracted from the line total (not a rate).
    pub fn discount(&self) -> Option<Decimal> {
        self.discount
    }

    /// Line total: `quantity × unit_cost − discount`, clamped at zero.
    ///
    /// Pure function of the item's numeric fields.
    pub fn total_cost(&self) -> Decimal {
        let subtotal = Decimal::from(self.quantity) * self.unit_cost
            - self.discount.unwrap_or(Decimal::ZERO);
        subtotal.max(Decimal::ZERO)
    }
}

/// Aggregate describing one billable transaction between a sender and a
/// recipient.
///
/// An invoice is transient: it is rebuilt from current form state before
/// every render request and never persisted directly. Item and custom-field
/// collections are append-only. Optional scalars are public and carry their
/// wire defaults; the inclusion rules live in [`Invoice::to_wire`].
#[derive(Debug, Clone)]
pub struct Invoice {
    pub(crate) sender: String,
    pub(crate) recipient: String,
    pub(crate) items: Vec<InvoiceItem>,
    pub(crate) custom_fields: Vec<CustomField>,
    /// Invoice number, e.g. "INV-2024-001".
    pub number: Option<String>,
    /// Invoice issue date.
    pub date: Option<NaiveDate>,
    /// Payment due date.
    pub due_date: Option<NaiveDate>,
    /// ISO 4217 currency code. The API default is "USD".
    pub currency: String,
    /// Document-level tax amount.
    pub tax: Decimal,
    /// Document-level discount amount (flat, not a rate).
    pub discounts: Decimal,
    /// Shipping cost.
    pub shipping: Decimal,
    /// Amount already paid against this invoice.
    pub amount_paid: Decimal,
    /// Shipping destination, when different from the recipient address.
    pub ship_to: Option<String>,
    /// Payment terms free text, e.g. "NET 30".
    pub payment_terms: Option<String>,
    /// Logo URL rendered in the document header.
    pub logo: Option<String>,
    /// Notes free text.
    pub notes: Option<String>,
    /// Terms and conditions free text.
    pub terms: Option<String>,
    /// Rendering hints for subtotal lines.
    pub display_fields: DisplayFields,
}

impl Invoice {
    /// Create an invoice with the two required parties.
    ///
    /// Both strings are trimmed before the blank check; a whitespace-only
    /// sender or recipient is rejected.
    pub fn new(
        sender: impl Into<String>,
        recipient: impl Into<String>,
    ) -> Result<Self, InvoiceError> {
        let sender = sender.into();
        let recipient = recipient.into();
        if sender.trim().is_empty() {
            return Err(InvoiceError::Validation("sender is required".into()));
        }
        if recipient.trim().is_empty() {
            return Err(InvoiceError::Validation("recipient is required".into()));
        }
        Ok(Self {
            sender,
            recipient,
            items: Vec::new(),
            custom_fields: Vec::new(),
            number: None,
            date: None,
            due_date: None,
            currency: "USD".to_string(),
            tax: Decimal::ZERO,
            discounts: Decimal::ZERO,
            shipping: Decimal::ZERO,
            amount_paid: Decimal::ZERO,
            ship_to: None,
            payment_terms: None,
            logo: None,
            notes: None,
            terms: None,
            display_fields: DisplayFields::default(),
        })
    }

    /// Sender ("from" on the wire).
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Recipient ("to" on the wire).
    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[InvoiceItem] {
        &self.items
    }

    /// Custom fields in insertion order.
    pub fn custom_fields(&self) -> &[CustomField] {
        &self.custom_fields
    }

    /// Append an item. The item was already validated at construction.
    pub fn add_item(&mut self, item: InvoiceItem) {
        self.items.push(item);
    }

    /// Append a custom name/value field.
    pub fn add_custom_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.custom_fields.push(CustomField {
            name: name.into(),
            value: value.into(),
        });
    }

    /// Sum of all item line totals. Recomputed on every call.
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(InvoiceItem::total_cost).sum()
    }

    /// `subtotal + tax + shipping − discounts`, clamped at zero.
    pub fn total(&self) -> Decimal {
        (self.subtotal() + self.tax + self.shipping - self.discounts).max(Decimal::ZERO)
    }

    /// Remaining balance after payments: `total − amount_paid`, clamped at zero.
    ///
    /// `amount_paid > total` is legal here (partial form state may overshoot
    /// transiently); it is flagged by the client's validate step instead.
    pub fn balance_due(&self) -> Decimal {
        (self.total() - self.amount_paid).max(Decimal::ZERO)
    }
}
