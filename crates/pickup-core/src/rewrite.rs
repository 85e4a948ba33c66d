//! Rewrites a pickup order's shipping address to its boutique.
//!
//! The customer's own address is not lost: it is flattened into a single
//! `adresse_client_originale` note. Any earlier note under that key is dropped
//! first, so replaying the same webhook never stacks history entries.

use crate::{
    error::{PickupError, Result},
    models::{NoteAttribute, Order, OrderUpdate, ShippingAddress},
    stores::StoreRecord,
    ORIGINAL_ADDRESS_KEY,
};

const PICKUP_COUNTRY: &str = "France";
const PICKUP_COUNTRY_CODE: &str = "FR";

/// Builds the boutique shipping address, keeping the recipient's name and
/// phone from the customer's address.
pub fn store_address(customer: &ShippingAddress, store: &StoreRecord) -> ShippingAddress {
    ShippingAddress {
        first_name: customer.first_name.clone(),
        last_name: customer.last_name.clone(),
        company: Some(store.name.clone()),
        address1: Some(store.address1.clone()),
        city: Some(store.city.clone()),
        zip: Some(store.zip.clone()),
        country: Some(PICKUP_COUNTRY.to_string()),
        country_code: Some(PICKUP_COUNTRY_CODE.to_string()),
        phone: customer.phone.clone(),
    }
}

/// Formats the customer's address as `"{address1}, {zip} {city}"`.
///
/// Fields are concatenated verbatim; a missing field renders as empty text.
pub fn original_address_note(customer: &ShippingAddress) -> String {
    format!(
        "{}, {} {}",
        customer.address1.as_deref().unwrap_or_default(),
        customer.zip.as_deref().unwrap_or_default(),
        customer.city.as_deref().unwrap_or_default(),
    )
}

/// Returns `notes` without any previous original-address entry, followed by
/// a fresh one for `customer`.
pub fn rewrite_notes(notes: &[NoteAttribute], customer: &ShippingAddress) -> Vec<NoteAttribute> {
    notes
        .iter()
        .filter(|note| note.name != ORIGINAL_ADDRESS_KEY)
        .cloned()
        .chain(std::iter::once(NoteAttribute::new(
            ORIGINAL_ADDRESS_KEY,
            original_address_note(customer),
        )))
        .collect()
}

/// Produces the update that points `order` at `store`.
///
/// # Errors
///
/// Returns [`PickupError::MissingOrderId`] if the order has no id.
pub fn rewrite_order(order: &Order, store: &StoreRecord) -> Result<OrderUpdate> {
    let id = order.id.ok_or(PickupError::MissingOrderId)?;
    let customer = order.shipping_address.clone().unwrap_or_default();

    Ok(OrderUpdate {
        id,
        shipping_address: store_address(&customer, store),
        note_attributes: rewrite_notes(&order.note_attributes, &customer),
    })
}
