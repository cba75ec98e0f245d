//! Wire payload for the rendering API.
//!
//! The remote service expects a minimal JSON body: defaults, zeros, and
//! blanks are omitted rather than sent explicitly. The inclusion rules
//! are encoded here, field by field, and must not drift — the service
//! treats a present-but-zero amount differently from an absent one.

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use super::types::*;

/// Serialized form of one invoice item.
#[derive(Debug, Clone, Serialize)]
pub struct WireItem {
    pub name: String,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_cost: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Present whenever the item has a discount set, including an
    /// explicit zero.
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub discount: Option<Decimal>,
}

/// Serialized display flags. `tax` is encoded as `false`, `true`, or `"%"`.
#[derive(Debug, Clone, Serialize)]
pub struct WireDisplayFields {
    #[serde(serialize_with = "serialize_tax_display")]
    pub tax: TaxDisplay,
    pub discounts: bool,
    pub shipping: bool,
}

fn serialize_tax_display<S: Serializer>(tax: &TaxDisplay, s: S) -> Result<S::Ok, S::Error> {
    match tax {
        TaxDisplay::Hidden => s.serialize_bool(false),
        TaxDisplay::Amount => s.serialize_bool(true),
        TaxDisplay::Percentage => s.serialize_str("%"),
    }
}

/// Serialized custom field.
#[derive(Debug, Clone, Serialize)]
pub struct WireCustomField {
    pub name: String,
    pub value: String,
}

/// The complete request body for a render call.
///
/// Constructing this from an [`Invoice`] is total — every invariant that
/// could make serialization fail is already enforced at construction time.
#[derive(Debug, Clone, Serialize)]
pub struct WirePayload {
    #[serde(rename = "from")]
    pub sender: String,
    #[serde(rename = "to")]
    pub recipient: String,
    pub items: Vec<WireItem>,
    pub fields: WireDisplayFields,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub tax: Option<Decimal>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub discounts: Option<Decimal>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub shipping: Option<Decimal>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub amount_paid: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_terms: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ship_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Vec<WireCustomField>>,
}

/// Amounts are sent only when strictly positive.
fn positive(amount: Decimal) -> Option<Decimal> {
    (amount > Decimal::ZERO).then_some(amount)
}

/// Text fields are sent only when non-blank after trimming.
fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(str::to_owned)
}

const DATE_FORMAT: &str = "%Y-%m-%d";

impl Invoice {
    /// Build the minimal JSON payload for this invoice.
    ///
    /// Inclusion rules: `from`, `to`, `items`, and `fields` are always
    /// present. `number` only when non-blank; `currency` only when it
    /// differs from the "USD" default; each amount only when strictly
    /// positive; dates only when set (as `YYYY-MM-DD`); free-text fields
    /// only when non-blank; `custom_fields` only when non-empty.
    pub fn to_wire(&self) -> WirePayload {
        WirePayload {
            sender: self.sender.clone(),
            recipient: self.recipient.clone(),
            items: self
                .items
                .iter()
                .map(|item| WireItem {
                    name: item.name.clone(),
                    quantity: item.quantity,
                    unit_cost: item.unit_cost,
                    description: item
                        .description
                        .as_ref()
                        .filter(|d| !d.is_empty())
                        .cloned(),
                    discount: item.discount,
                })
                .collect(),
            fields: WireDisplayFields {
                tax: self.display_fields.tax,
                discounts: self.display_fields.discounts,
                shipping: self.display_fields.shipping,
            },
            tax: positive(self.tax),
            discounts: positive(self.discounts),
            shipping: positive(self.shipping),
            amount_paid: positive(self.amount_paid),
            date: self.date.map(|d| d.format(DATE_FORMAT).to_string()),
            due_date: self.due_date.map(|d| d.format(DATE_FORMAT).to_string()),
            number: non_blank(&self.number),
            currency: (self.currency != "USD").then(|| self.currency.clone()),
            payment_terms: non_blank(&self.payment_terms),
            logo: non_blank(&self.logo),
            notes: non_blank(&self.notes),
            terms: non_blank(&self.terms),
            ship_to: non_blank(&self.ship_to),
            custom_fields: if self.custom_fields.is_empty() {
                None
            } else {
                Some(
                    self.custom_fields
                        .iter()
                        .map(|f| WireCustomField {
                            name: f.name.clone(),
                            value: f.value.clone(),
                        })
                        .collect(),
                )
            },
        }
    }
}
