use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::InvoiceError;
use super::types::*;

/// Builder for [`InvoiceItem`].
///
/// `build()` runs the construction invariants: non-blank name, positive
/// quantity, non-negative unit cost and discount.
///
/// ```
/// use invoice_gen::core::InvoiceItemBuilder;
/// use rust_decimal_macros::dec;
///
/// let item = InvoiceItemBuilder::new("Hosting Setup", 1, dec!(200))
///     .description("Initial hosting configuration")
///     .build()
///     .unwrap();
/// assert_eq!(item.total_cost(), dec!(200));
/// ```
pub struct InvoiceItemBuilder {
    name: String,
    quantity: u32,
    unit_cost: Decimal,
    description: Option<String>,
    discount: Option<Decimal>,
}

impl InvoiceItemBuilder {
    pub fn new(name: impl Into<String>, quantity: u32, unit_cost: Decimal) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit_cost,
            description: None,
            discount: None,
        }
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Flat amount subtracted from the line total (not a rate).
    pub fn discount(mut self, discount: Decimal) -> Self {
        self.discount = Some(discount);
        self
    }

    pub fn build(self) -> Result<InvoiceItem, InvoiceError> {
        if self.name.trim().is_empty() {
            return Err(InvoiceError::Validation("item name cannot be empty".into()));
        }
        if self.quantity == 0 {
            return Err(InvoiceError::Validation("quantity must be positive".into()));
        }
        if self.unit_cost < Decimal::ZERO {
            return Err(InvoiceError::Validation(
                "unit cost cannot be negative".into(),
            ));
        }
        if self.discount.is_some_and(|d| d < Decimal::ZERO) {
            return Err(InvoiceError::Validation(
                "discount cannot be negative".into(),
            ));
        }
        Ok(InvoiceItem {
            name: self.name,
            quantity: self.quantity,
            unit_cost: self.unit_cost,
            description: self.description,
            discount: self.discount,
        })
    }
}

/// Builder for [`Invoice`].
///
/// Enumerates every optional field with its wire default, so the payload
/// inclusion rules in [`Invoice::to_wire`] have one authoritative table to
/// work against.
///
/// An empty item list is allowed at build time; only the client's
/// `validate` step rejects it, so partially filled forms can round-trip
/// through an `Invoice`.
///
/// ```
/// use invoice_gen::core::*;
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// let invoice = InvoiceBuilder::new("ACME Corp", "Client Company")
///     .number("INV-2024-001")
///     .date(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
///     .tax(dec!(150))
///     .add_item(InvoiceItemBuilder::new("Web Design", 1, dec!(1500)).build().unwrap())
///     .build()
///     .unwrap();
/// assert_eq!(invoice.total(), dec!(1650));
/// ```
pub struct InvoiceBuilder {
    sender: String,
    recipient: String,
    items: Vec<InvoiceItem>,
    custom_fields: Vec<CustomField>,
    number: Option<String>,
    date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
    currency: String,
    tax: Decimal,
    discounts: Decimal,
    shipping: Decimal,
    amount_paid: Decimal,
    ship_to: Option<String>,
    payment_terms: Option<String>,
    logo: Option<String>,
    notes: Option<String>,
    terms: Option<String>,
    display_fields: DisplayFields,
}

impl InvoiceBuilder {
    pub fn new(sender: impl Into<String>, recipient: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
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
        }
    }

    pub fn add_item(mut self, item: InvoiceItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn add_custom_field(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.custom_fields.push(CustomField {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    /// ISO 4217 currency code. "USD" is the API default and is omitted
    /// from the wire payload.
    pub fn currency(mut self, code: impl Into<String>) -> Self {
        self.currency = code.into();
        self
    }

    pub fn tax(mut self, amount: Decimal) -> Self {
        self.tax = amount;
        self
    }

    pub fn discounts(mut self, amount: Decimal) -> Self {
        self.discounts = amount;
        self
    }

    pub fn shipping(mut self, amount: Decimal) -> Self {
        self.shipping = amount;
        self
    }

    pub fn amount_paid(mut self, amount: Decimal) -> Self {
        self.amount_paid = amount;
        self
    }

    pub fn ship_to(mut self, address: impl Into<String>) -> Self {
        self.ship_to = Some(address.into());
        self
    }

    pub fn payment_terms(mut self, terms: impl Into<String>) -> Self {
        self.payment_terms = Some(terms.into());
        self
    }

    pub fn logo(mut self, url: impl Into<String>) -> Self {
        self.logo = Some(url.into());
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn terms(mut self, terms: impl Into<String>) -> Self {
        self.terms = Some(terms.into());
        self
    }

    pub fn display_fields(mut self, fields: DisplayFields) -> Self {
        self.display_fields = fields;
        self
    }

    /// Build the invoice, enforcing the non-blank sender/recipient
    /// invariant.
    pub fn build(self) -> Result<Invoice, InvoiceError> {
        let mut invoice = Invoice::new(self.sender, self.recipient)?;
        invoice.items = self.items;
        invoice.custom_fields = self.custom_fields;
        invoice.number = self.number;
        invoice.date = self.date;
        invoice.due_date = self.due_date;
        invoice.currency = self.currency;
        invoice.tax = self.tax;
        invoice.discounts = self.discounts;
        invoice.shipping = self.shipping;
        invoice.amount_paid = self.amount_paid;
        invoice.ship_to = self.ship_to;
        invoice.payment_terms = self.payment_terms;
        invoice.logo = self.logo;
        invoice.notes = self.notes;
        invoice.terms = self.terms;
        invoice.display_fields = self.display_fields;
        Ok(invoice)
    }
}
