//! Ledger page controller
//!
//! - document: in-memory page model (activity table, balances, forms)
//! - events: click targets for delegated handling
//! - dialogs: alert / confirm / console seam
//! - page: bootstrap, refreshes, form submission, delete handling

pub mod dialogs;
pub mod document;
pub mod events;
pub mod page;

pub use dialogs::Dialogs;
pub use document::{PageDocument, PageDocumentBuilder};
pub use events::{delete_button, ElementRef};
pub use page::{DeleteOutcome, LedgerPage, RefreshOutcome, SubmitOutcome};
