//! Ledger page controller
//!
//! `LedgerPage::bootstrap` is the page-ready entry point. It takes the page,
//! dialogs, transport and configuration as explicit handles, wires the entry
//! forms and the delete handler, then performs the first ledger load and
//! summary refresh.

use debtweb_client::{LedgerApi, Transport};
use debtweb_config::Config;
use debtweb_core::render::DELETE_CLASS;
use debtweb_core::{
    dates, format_balance, ActivityTable, ClientError, EntryCreated, RefreshSequencer, StatusKind,
};
use std::sync::Arc;

use crate::dialogs::Dialogs;
use crate::document::PageDocument;
use crate::events::ElementRef;

/// Status text shown after a successful submit
pub const SAVED: &str = "Saved!";

/// Question asked before deleting an entry
pub const CONFIRM_DELETE: &str = "Delete this entry?";

/// What happened to a ledger or summary refresh
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// The response was rendered
    Applied,
    /// A newer refresh was started while this one was in flight
    Stale,
    Failed(ClientError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The form does not exist or has no endpoint
    NotWired,
    /// The submit control is disabled while an earlier submit is in flight
    Busy,
    Saved(Option<EntryCreated>),
    Failed(ClientError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    /// Not a delete control, or its data attributes are missing
    Ignored,
    /// The user declined the confirmation
    Declined,
    Deleted,
    Failed(ClientError),
}

/// A bootstrapped ledger page
pub struct LedgerPage {
    document: Arc<PageDocument>,
    dialogs: Arc<dyn Dialogs>,
    api: LedgerApi,
    confirm_delete: bool,
    wired_forms: Vec<String>,
    delete_wired: bool,
    ledger_seq: RefreshSequencer,
    summary_seq: RefreshSequencer,
}

impl LedgerPage {
    /// Set default dates, wire handlers and load the ledger and summary.
    ///
    /// The base path comes from the page when it declares one, otherwise
    /// from `server.base_path`.
    pub async fn bootstrap(
        document: Arc<PageDocument>,
        dialogs: Arc<dyn Dialogs>,
        transport: Arc<dyn Transport>,
        config: &Config,
    ) -> Self {
        let base_path = document
            .base_path()
            .unwrap_or_else(|| config.server.base_path.clone());
        let api = LedgerApi::from_transport(transport, &base_path);
        let page = Self::wire(document, dialogs, api, config);

        tokio::join!(page.load_ledger(), page.refresh_summary());
        page
    }

    /// Set default dates and wire handlers without loading anything
    pub fn wire(
        document: Arc<PageDocument>,
        dialogs: Arc<dyn Dialogs>,
        api: LedgerApi,
        config: &Config,
    ) -> Self {
        document.apply_default_dates(dates::today());

        let wired_forms: Vec<String> = document
            .form_names()
            .into_iter()
            .filter(|name| {
                document
                    .form(name)
                    .map(|f| f.endpoint.is_some())
                    .unwrap_or(false)
            })
            .collect();
        let delete_wired = document.has_activity_body();
        log::debug!(
            target: "debtweb::page",
            "wired forms {:?}, delete handler {}",
            wired_forms,
            if delete_wired { "on" } else { "off" }
        );

        Self {
            document,
            dialogs,
            api,
            confirm_delete: config.page.confirm_delete,
            wired_forms,
            delete_wired,
            ledger_seq: RefreshSequencer::new(),
            summary_seq: RefreshSequencer::new(),
        }
    }

    pub fn document(&self) -> &PageDocument {
        &self.document
    }

    pub fn api(&self) -> &LedgerApi {
        &self.api
    }

    pub fn is_form_wired(&self, name: &str) -> bool {
        self.wired_forms.iter().any(|f| f == name)
    }

    pub fn is_delete_wired(&self) -> bool {
        self.delete_wired
    }

    /// Fetch `/api/records`, render the table and the person balance.
    ///
    /// Failures are alerted. A response older than one already rendered is
    /// discarded.
    pub async fn load_ledger(&self) -> RefreshOutcome {
        let token = self.ledger_seq.begin();
        let snapshot = match self.api.records().await {
            Ok(snapshot) => snapshot,
            Err(e) => return self.ledger_failed(e),
        };

        let rendered = self.ledger_seq.apply_if_newer(token, || {
            self.document
                .render_activity(ActivityTable::from_records(&snapshot.records))?;
            self.document
                .set_person_balance(format_balance(snapshot.balance))
        });

        match rendered {
            Some(Ok(())) => {
                log::debug!(target: "debtweb::page", "rendered {} records", snapshot.records.len());
                RefreshOutcome::Applied
            }
            Some(Err(e)) => self.ledger_failed(e),
            None => {
                log::debug!(
                    target: "debtweb::page",
                    "discarding ledger response {} (applied {})",
                    token.value(),
                    self.ledger_seq.last_applied()
                );
                RefreshOutcome::Stale
            }
        }
    }

    fn ledger_failed(&self, e: ClientError) -> RefreshOutcome {
        debtweb_core::error::log_error("load ledger", &e);
        self.dialogs.alert(&e.to_string());
        RefreshOutcome::Failed(e)
    }

    /// Fetch `/api/summary` into `#current-balance`. Failures are only logged.
    pub async fn refresh_summary(&self) -> RefreshOutcome {
        let token = self.summary_seq.begin();
        let summary = match self.api.summary().await {
            Ok(summary) => summary,
            Err(e) => {
                self.dialogs.console_error("Unable to refresh summary", &e);
                return RefreshOutcome::Failed(e);
            }
        };

        let applied = self.summary_seq.apply_if_newer(token, || {
            self.document
                .set_current_balance(format_balance(summary.balance));
            Ok::<(), ClientError>(())
        });

        match applied {
            Some(_) => RefreshOutcome::Applied,
            None => {
                log::debug!(
                    target: "debtweb::page",
                    "discarding summary response {} (applied {})",
                    token.value(),
                    self.summary_seq.last_applied()
                );
                RefreshOutcome::Stale
            }
        }
    }

    /// Submit a wired form.
    ///
    /// The submit control is disabled for the duration of the request and
    /// re-enabled once it settles, whatever the outcome. A submit while the
    /// control is disabled sends nothing. On success the form is reset,
    /// dates re-defaulted, then summary and ledger are refreshed.
    pub async fn submit(&self, form_name: &str) -> SubmitOutcome {
        if !self.is_form_wired(form_name) {
            return SubmitOutcome::NotWired;
        }

        let prepared = self.document.update_form(form_name, |form| {
            if !form.submit_enabled {
                return Err(SubmitOutcome::Busy);
            }
            let endpoint = form.endpoint.clone().ok_or(SubmitOutcome::NotWired)?;
            form.clear_status();
            form.submit_enabled = false;
            Ok((endpoint, form.payload()))
        });
        let (endpoint, payload) = match prepared {
            Some(Ok(prepared)) => prepared,
            Some(Err(outcome)) => {
                log::debug!(target: "debtweb::page", "submit of {} skipped: {:?}", form_name, outcome);
                return outcome;
            }
            None => return SubmitOutcome::NotWired,
        };

        log::info!(target: "debtweb::page", "submitting {} to {}", form_name, endpoint);
        let result = self.api.submit_entry(&endpoint, &payload).await;

        self.document.update_form(form_name, |form| {
            match &result {
                Ok(_) => {
                    form.show_status(StatusKind::Success, SAVED);
                    form.reset();
                }
                Err(e) => form.show_status(StatusKind::Error, e.to_string()),
            }
            form.submit_enabled = true;
        });

        match result {
            Ok(created) => {
                self.document.apply_default_dates(dates::today());
                tokio::join!(self.refresh_summary(), self.load_ledger());
                SubmitOutcome::Saved(created)
            }
            Err(e) => {
                debtweb_core::error::log_error("submit entry", &e);
                SubmitOutcome::Failed(e)
            }
        }
    }

    /// Delegated click handler for `#activity-body`
    pub async fn handle_activity_click(&self, target: &ElementRef) -> DeleteOutcome {
        if !self.delete_wired {
            return DeleteOutcome::Ignored;
        }
        let button = match target.closest(DELETE_CLASS) {
            Some(button) => button,
            None => return DeleteOutcome::Ignored,
        };
        let (record_type, id) = match (button.data("type"), button.data("id")) {
            (Some(t), Some(i)) if !t.is_empty() && !i.is_empty() => (t.to_string(), i.to_string()),
            _ => return DeleteOutcome::Ignored,
        };

        if self.confirm_delete && !self.dialogs.confirm(CONFIRM_DELETE).await {
            return DeleteOutcome::Declined;
        }

        log::info!(target: "debtweb::page", "deleting {} {}", record_type, id);
        if let Err(e) = self.api.delete_record(&record_type, &id).await {
            debtweb_core::error::log_error("delete entry", &e);
            self.dialogs.alert(&e.to_string());
            return DeleteOutcome::Failed(e);
        }

        self.load_ledger().await;
        self.refresh_summary().await;
        DeleteOutcome::Deleted
    }
}
