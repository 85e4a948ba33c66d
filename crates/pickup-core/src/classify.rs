//! Pickup detection and boutique resolution.

use crate::{
    models::{NoteAttribute, Order},
    stores::{StoreDirectory, StoreRecord},
    PICKUP_MARKER, STORE_SELECTION_KEY,
};

/// How an incoming order relates to in-store pickup.
///
/// Only [`Classification::Pickup`] leads to an update; the other variants are
/// valid deliveries the router acknowledges and otherwise leaves alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification<'a> {
    /// The first shipping line is not a pickup method.
    NotPickup,
    /// Pickup order without a `boutique_retrait` note.
    NoStoreSelected,
    /// Pickup order naming a boutique the directory does not contain. `None`
    /// when the selection note is present with a `null` value.
    UnknownStore(Option<&'a str>),
    /// Pickup order with a resolved boutique.
    Pickup(&'a StoreRecord),
}

/// Returns whether the order's first shipping line is an in-store pickup.
///
/// Later shipping lines are never consulted.
pub fn is_pickup(order: &Order) -> bool {
    order
        .shipping_lines
        .first()
        .and_then(|line| line.title.as_deref())
        .is_some_and(|title| title.to_lowercase().contains(PICKUP_MARKER))
}

/// Returns the first `boutique_retrait` note, if any.
///
/// A note that is present but carries no value still counts as a selection;
/// it simply names no boutique the directory can resolve.
pub fn store_selection(order: &Order) -> Option<&NoteAttribute> {
    order.note_attributes.iter().find(|note| note.name == STORE_SELECTION_KEY)
}

/// Classifies an order against the boutique directory.
pub fn classify<'a>(order: &'a Order, stores: &'a StoreDirectory) -> Classification<'a> {
    if !is_pickup(order) {
        return Classification::NotPickup;
    }

    let Some(selection) = store_selection(order) else {
        return Classification::NoStoreSelected;
    };

    let key = selection.value.as_deref();
    match key.and_then(|key| stores.get(key)) {
        Some(store) => Classification::Pickup(store),
        None => Classification::UnknownStore(key),
    }
}
