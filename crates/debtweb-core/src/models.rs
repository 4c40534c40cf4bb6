//! Core data models exchanged with the backend

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::types::RecordType;

/// One payment or transaction entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Backend row id, unique per record type
    pub id: i64,
    /// Entry date (YYYY-MM-DD format)
    pub date: String,
    /// Payment or transaction
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Description; payments fall back to their notes on the backend
    #[serde(default)]
    pub description: Option<String>,
    /// Signed amount: payments positive, transactions negative
    pub amount: Decimal,
    /// Payment method, e.g. "Cash" or "Card"
    pub payment_method: String,
    #[serde(default)]
    pub person_name: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Record {
    /// Get the entry date as NaiveDate
    pub fn date_naive(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    pub fn is_payment(&self) -> bool {
        self.record_type == RecordType::Payment
    }
}

/// Response of `GET /api/records`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub records: Vec<Record>,
    pub balance: Decimal,
}

/// Response of `GET /api/summary`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub balance: Decimal,
}

/// Reply to a successful entry POST
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EntryCreated {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Flat key/value body built from a form's fields
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormPayload(BTreeMap<String, String>);

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field; a later field with the same name wins
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormPayload {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut payload = FormPayload::new();
        for (name, value) in iter {
            payload.insert(name, value);
        }
        payload
    }
}
