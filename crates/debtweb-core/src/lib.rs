//! Core ledger client logic
//!
//! - models / types: records, snapshots and summaries as sent by the backend
//! - url: base-path aware URL normalization
//! - render: activity table and amount/balance formatting
//! - form: entry forms, payload serialization, reset and default dates
//! - sequence: refresh tokens that let stale responses be discarded
//! - error: `ClientError` with codes, severities and details

pub mod dates;
pub mod error;
pub mod form;
pub mod models;
pub mod render;
pub mod sequence;
pub mod types;
pub mod url;

pub use error::{ClientError, ClientResult, ErrorCode, ErrorDetails, ErrorSeverity};
pub use form::{EntryForm, FieldKind, FormField, FormStatus};
pub use models::{EntryCreated, FormPayload, LedgerSnapshot, Record, Summary};
pub use render::{format_balance, format_signed_amount, ActivityRow, ActivityTable, DeleteControl};
pub use sequence::{RefreshSequencer, RefreshToken};
pub use types::{AmountClass, Method, RecordType, StatusKind};
pub use url::UrlNormalizer;

pub use rust_decimal::Decimal;
