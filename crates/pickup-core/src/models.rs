//! Order payload model and the update sent back to Shopify.
//!
//! Only the fields the router reads are modelled. Unknown fields are ignored,
//! and missing or `null` fields fall back to empty values instead of failing
//! the parse, so a sparse webhook still classifies as "not pickup" rather than
//! erroring out.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{PickupError, Result};

/// Shopify order identifier.
///
/// Shopify emits order ids as 64-bit integers; the newtype keeps them from
/// being confused with line item or customer ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// The parts of an `orders/create` payload the router consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Order {
    /// Order identifier, used to address the update request.
    #[serde(default)]
    pub id: Option<OrderId>,
    /// Shipping lines in the order they were selected at checkout.
    #[serde(default, deserialize_with = "null_as_default")]
    pub shipping_lines: Vec<ShippingLine>,
    /// Free-form cart attributes attached to the order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub note_attributes: Vec<NoteAttribute>,
    /// Address the customer entered at checkout.
    #[serde(default)]
    pub shipping_address: Option<ShippingAddress>,
}

impl Order {
    /// Parses an order from the raw webhook body.
    ///
    /// # Errors
    ///
    /// Returns [`PickupError::MalformedPayload`] when the body is not JSON or
    /// does not have the shape of an order object.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(PickupError::from)
    }
}

/// A shipping method line on the order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingLine {
    /// Display title of the shipping method, e.g. "Retrait en magasin".
    #[serde(default)]
    pub title: Option<String>,
}

impl ShippingLine {
    /// Creates a shipping line with the given title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self { title: Some(title.into()) }
    }
}

/// A name/value pair attached to the order at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteAttribute {
    /// Attribute name. Not guaranteed unique on input.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Attribute value, passed through untouched when `null`.
    #[serde(default)]
    pub value: Option<String>,
}

impl NoteAttribute {
    /// Creates a note attribute with a string value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: Some(value.into()) }
    }
}

/// Shipping address, both as read from the webhook and as written back.
///
/// Absent fields are omitted when serialized so the update never sends
/// explicit `null`s for data the customer did not provide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    /// Recipient first name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Recipient last name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Company line; carries the boutique display name after a rewrite.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Street address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    /// City.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Postal code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    /// Country name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// ISO 3166-1 alpha-2 country code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    /// Recipient phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Fields pushed back to Shopify for a rewritten pickup order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderUpdate {
    /// Order being updated.
    pub id: OrderId,
    /// Replacement shipping address pointing at the boutique.
    pub shipping_address: ShippingAddress,
    /// Replacement note attributes including the original address record.
    pub note_attributes: Vec<NoteAttribute>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
