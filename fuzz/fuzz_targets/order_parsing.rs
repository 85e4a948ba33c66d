#![no_main]

//! Fuzz target for order payload handling.
//!
//! Feeds arbitrary bytes through parsing, classification and rewriting. None
//! of these steps may panic, and any rewrite produced must leave exactly one
//! original-address note behind.

use libfuzzer_sys::fuzz_target;
use pickup_core::{classify, rewrite_order, Classification, Order, StoreDirectory, ORIGINAL_ADDRESS_KEY};

fuzz_target!(|data: &[u8]| {
    let Ok(order) = Order::from_slice(data) else {
        return;
    };

    let stores = StoreDirectory::seeded();
    if let Classification::Pickup(store) = classify(&order, &stores) {
        if let Ok(update) = rewrite_order(&order, store) {
            let records =
                update.note_attributes.iter().filter(|n| n.name == ORIGINAL_ADDRESS_KEY).count();
            assert_eq!(records, 1);

            let encoded = serde_json::to_vec(&update).unwrap_or_default();
            assert!(!encoded.is_empty());
        }
    }
});
