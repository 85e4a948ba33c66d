//! Boutique directory.
//!
//! A read-only map from the store key customers pick at checkout to the
//! boutique's postal address. Built once at startup from the seeded records
//! plus any extra records in configuration, then shared behind an `Arc`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A boutique that accepts in-store pickups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreRecord {
    /// Key submitted in the `boutique_retrait` note attribute.
    pub key: String,
    /// Display name written to the address company line.
    pub name: String,
    /// Street address.
    pub address1: String,
    /// City.
    pub city: String,
    /// Postal code.
    pub zip: String,
    /// ISO 3166-1 alpha-2 country code.
    #[serde(default = "default_country")]
    pub country: String,
}

fn default_country() -> String {
    "FR".to_string()
}

/// Immutable lookup table of boutiques keyed by store key.
#[derive(Debug, Clone, Default)]
pub struct StoreDirectory {
    records: HashMap<String, StoreRecord>,
}

impl StoreDirectory {
    /// Builds a directory from records. Later records replace earlier ones
    /// sharing the same key.
    pub fn from_records(records: impl IntoIterator<Item = StoreRecord>) -> Self {
        let records = records.into_iter().map(|record| (record.key.clone(), record)).collect();
        Self { records }
    }

    /// The boutiques the router ships with.
    pub fn seeded() -> Self {
        Self::from_records(seed_records())
    }

    /// Returns a directory with `records` layered over this one.
    #[must_use]
    pub fn with_records(mut self, records: impl IntoIterator<Item = StoreRecord>) -> Self {
        for record in records {
            self.records.insert(record.key.clone(), record);
        }
        self
    }

    /// Looks up a boutique. `None` means the customer picked a key the
    /// directory does not know about.
    pub fn get(&self, key: &str) -> Option<&StoreRecord> {
        self.records.get(key)
    }

    /// Number of boutiques.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the directory has no boutiques.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over the boutiques in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &StoreRecord> {
        self.records.values()
    }
}

fn seed_records() -> Vec<StoreRecord> {
    vec![StoreRecord {
        key: "Aix-en-Provence".to_string(),
        name: "MINELLI Aix-en-Provence".to_string(),
        address1: "7 rue des Bagniers".to_string(),
        city: "Aix-en-Provence".to_string(),
        zip: "13100".to_string(),
        country: "FR".to_string(),
    }]
}
