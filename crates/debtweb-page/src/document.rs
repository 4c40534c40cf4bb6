//! In-memory page model
//!
//! `PageDocument` holds the elements the client reads and writes:
//! `body[data-base-path]`, `#activity-body`, `#person-balance`,
//! `#current-balance` and the entry forms. Elements that were not added to
//! the document are absent, the same way a page can omit them.

use chrono::NaiveDate;
use debtweb_core::{ActivityTable, ClientError, ClientResult, EntryForm};
use std::sync::{Mutex, MutexGuard};

pub const ACTIVITY_BODY: &str = "#activity-body";
pub const PERSON_BALANCE: &str = "#person-balance";
pub const CURRENT_BALANCE: &str = "#current-balance";

#[derive(Debug, Clone, Default)]
struct PageState {
    base_path: Option<String>,
    activity_body: Option<ActivityTable>,
    person_balance: Option<String>,
    current_balance: Option<String>,
    forms: Vec<EntryForm>,
}

/// The page the client renders into
#[derive(Debug, Default)]
pub struct PageDocument {
    state: Mutex<PageState>,
}

impl PageDocument {
    pub fn builder() -> PageDocumentBuilder {
        PageDocumentBuilder::default()
    }

    fn state(&self) -> MutexGuard<'_, PageState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// `body[data-base-path]`
    pub fn base_path(&self) -> Option<String> {
        self.state().base_path.clone()
    }

    pub fn has_activity_body(&self) -> bool {
        self.state().activity_body.is_some()
    }

    /// Current contents of `#activity-body`
    pub fn activity(&self) -> Option<ActivityTable> {
        self.state().activity_body.clone()
    }

    /// Replace the contents of `#activity-body`
    pub fn render_activity(&self, table: ActivityTable) -> ClientResult<()> {
        match self.state().activity_body.as_mut() {
            Some(body) => {
                *body = table;
                Ok(())
            }
            None => Err(ClientError::MissingElement {
                selector: ACTIVITY_BODY.to_string(),
            }),
        }
    }

    pub fn person_balance(&self) -> Option<String> {
        self.state().person_balance.clone()
    }

    pub fn set_person_balance(&self, text: impl Into<String>) -> ClientResult<()> {
        match self.state().person_balance.as_mut() {
            Some(slot) => {
                *slot = text.into();
                Ok(())
            }
            None => Err(ClientError::MissingElement {
                selector: PERSON_BALANCE.to_string(),
            }),
        }
    }

    pub fn current_balance(&self) -> Option<String> {
        self.state().current_balance.clone()
    }

    /// Set `#current-balance` if the page has one; returns whether it did
    pub fn set_current_balance(&self, text: impl Into<String>) -> bool {
        match self.state().current_balance.as_mut() {
            Some(slot) => {
                *slot = text.into();
                true
            }
            None => false,
        }
    }

    pub fn form_names(&self) -> Vec<String> {
        self.state().forms.iter().map(|f| f.name.clone()).collect()
    }

    /// Snapshot of a form
    pub fn form(&self, name: &str) -> Option<EntryForm> {
        self.state().forms.iter().find(|f| f.name == name).cloned()
    }

    /// Run `update` against a form while holding the page lock
    pub fn update_form<R>(&self, name: &str, update: impl FnOnce(&mut EntryForm) -> R) -> Option<R> {
        self.state().forms.iter_mut().find(|f| f.name == name).map(update)
    }

    /// Fill every empty date input on the page with `today`
    pub fn apply_default_dates(&self, today: NaiveDate) -> usize {
        self.state()
            .forms
            .iter_mut()
            .map(|form| form.apply_default_dates(today))
            .sum()
    }
}

/// Builds a `PageDocument` with the elements a page provides
#[derive(Debug, Default)]
pub struct PageDocumentBuilder {
    state: PageState,
}

impl PageDocumentBuilder {
    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.state.base_path = Some(base_path.into());
        self
    }

    pub fn activity_body(mut self) -> Self {
        self.state.activity_body = Some(ActivityTable::default());
        self
    }

    pub fn person_balance(mut self) -> Self {
        self.state.person_balance = Some(String::new());
        self
    }

    pub fn current_balance(mut self) -> Self {
        self.state.current_balance = Some(String::new());
        self
    }

    pub fn form(mut self, form: EntryForm) -> Self {
        self.state.forms.push(form);
        self
    }

    /// The stock dashboard: every element plus the transaction and payment forms
    pub fn dashboard(self) -> Self {
        self.activity_body()
            .person_balance()
            .current_balance()
            .form(debtweb_core::form::transaction_form())
            .form(debtweb_core::form::payment_form())
    }

    pub fn build(self) -> PageDocument {
        PageDocument {
            state: Mutex::new(self.state),
        }
    }
}
