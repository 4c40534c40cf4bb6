//! Basic types for the ledger client

use serde::{Deserialize, Serialize};

/// Kind of ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    /// Money paid back by the tracked person
    Payment,
    /// Money lent to or spent on behalf of the tracked person
    Transaction,
}

impl RecordType {
    /// Wire name, also used as the `data-type` attribute and URL segment
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::Payment => "payment",
            RecordType::Transaction => "transaction",
        }
    }

    /// Column label in the activity table
    pub fn label(&self) -> &'static str {
        match self {
            RecordType::Payment => "Payment",
            RecordType::Transaction => "Transaction",
        }
    }
}

impl std::str::FromStr for RecordType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "payment" => Ok(RecordType::Payment),
            "transaction" => Ok(RecordType::Transaction),
            _ => Err(format!("Invalid record type: {}", s)),
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Style class applied to a rendered amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmountClass {
    Positive,
    Negative,
}

impl AmountClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            AmountClass::Positive => "positive",
            AmountClass::Negative => "negative",
        }
    }
}

impl std::fmt::Display for AmountClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome shown in a form's status region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Success,
    Error,
}

impl StatusKind {
    /// Full class attribute of the status element
    pub fn class_name(&self) -> &'static str {
        match self {
            StatusKind::Success => "form-status success",
            StatusKind::Error => "form-status error",
        }
    }
}

/// HTTP methods the client issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Delete => write!(f, "DELETE"),
        }
    }
}
