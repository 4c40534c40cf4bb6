//! Entry form model
//!
//! A form mirrors `form[data-endpoint]`: named inputs, a `.form-status`
//! region and a submit button whose enabled state tracks the submit cycle.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::format_date;
use crate::models::FormPayload;
use crate::types::StatusKind;

/// Input kinds that matter to the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Number,
    Date,
    Select,
    Textarea,
}

/// One named form control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    pub kind: FieldKind,
    /// Current value
    pub value: String,
    /// Value restored on reset
    #[serde(default)]
    pub default_value: String,
    #[serde(default)]
    pub disabled: bool,
}

impl FormField {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            value: String::new(),
            default_value: String::new(),
            disabled: false,
        }
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        self.value = value.clone();
        self.default_value = value;
        self
    }
}

/// `.form-status` region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormStatus {
    pub text: String,
    pub kind: Option<StatusKind>,
    pub hidden: bool,
}

impl Default for FormStatus {
    fn default() -> Self {
        Self {
            text: String::new(),
            kind: None,
            hidden: true,
        }
    }
}

impl FormStatus {
    pub fn class_name(&self) -> &'static str {
        self.kind.map(|k| k.class_name()).unwrap_or("form-status")
    }
}

/// A form that posts entries to the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryForm {
    /// Form name, used to address it from front ends
    pub name: String,
    /// `data-endpoint`; forms without one are never submitted by the client
    pub endpoint: Option<String>,
    pub fields: Vec<FormField>,
    pub status: FormStatus,
    pub submit_enabled: bool,
}

impl EntryForm {
    pub fn new(name: impl Into<String>, endpoint: Option<String>) -> Self {
        Self {
            name: name.into(),
            endpoint,
            fields: Vec::new(),
            status: FormStatus::default(),
            submit_enabled: true,
        }
    }

    pub fn with_field(mut self, field: FormField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Set the value of every field with this name; false if none matched
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> bool {
        let value = value.into();
        let mut found = false;
        for field in self.fields.iter_mut().filter(|f| f.name == name) {
            field.value = value.clone();
            found = true;
        }
        found
    }

    /// Serialize enabled named fields; later fields with the same name win
    pub fn payload(&self) -> FormPayload {
        self.fields
            .iter()
            .filter(|f| !f.disabled && !f.name.is_empty())
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect()
    }

    /// Restore every field to its default value
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value = field.default_value.clone();
        }
    }

    /// Fill empty date inputs with `today`; returns how many were filled
    pub fn apply_default_dates(&mut self, today: NaiveDate) -> usize {
        let today = format_date(today);
        let mut filled = 0;
        for field in self
            .fields
            .iter_mut()
            .filter(|f| f.kind == FieldKind::Date && f.value.is_empty())
        {
            field.value = today.clone();
            filled += 1;
        }
        filled
    }

    pub fn clear_status(&mut self) {
        self.status = FormStatus::default();
    }

    pub fn show_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = FormStatus {
            text: text.into(),
            kind: Some(kind),
            hidden: false,
        };
    }
}

/// Form posting a lent amount to `/api/transactions`
pub fn transaction_form() -> EntryForm {
    EntryForm::new("transaction", Some("/api/transactions".to_string()))
        .with_field(FormField::new("date", FieldKind::Date))
        .with_field(FormField::new("transaction_name", FieldKind::Text))
        .with_field(FormField::new("amount", FieldKind::Number))
        .with_field(FormField::new("payment_method", FieldKind::Select).with_default("Cash"))
        .with_field(FormField::new("notes", FieldKind::Textarea))
}

/// Form posting a repayment to `/api/payments`
pub fn payment_form() -> EntryForm {
    EntryForm::new("payment", Some("/api/payments".to_string()))
        .with_field(FormField::new("date", FieldKind::Date))
        .with_field(FormField::new("amount", FieldKind::Number))
        .with_field(FormField::new("payment_method", FieldKind::Select).with_default("Cash"))
        .with_field(FormField::new("notes", FieldKind::Textarea))
}
