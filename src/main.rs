//! debtweb main entry point
//!
//! Drives the ledger page headlessly from the terminal: the same bootstrap,
//! form submission and delete handling the dashboard page runs.

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use debtweb_client::{LedgerApi, ReqwestTransport};
use debtweb_config::Config;
use debtweb_core::{ClientError, DeleteControl, RecordType};
use debtweb_page::{
    delete_button, DeleteOutcome, Dialogs, LedgerPage, PageDocument, SubmitOutcome,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "debtweb")]
#[command(author = "debtweb Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Client for the debt tracking dashboard", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print the activity table as HTML
    #[arg(long)]
    html: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the activity table and balance
    Ledger,
    /// Show the current balance
    Summary,
    /// Record money lent or spent on the tracked person's behalf
    AddTransaction {
        #[arg(long)]
        description: String,
        #[arg(long)]
        amount: String,
        /// Cash or Card
        #[arg(long, default_value = "Cash")]
        method: String,
        /// YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Record a repayment
    AddPayment {
        #[arg(long)]
        amount: String,
        #[arg(long, default_value = "Cash")]
        method: String,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete an entry
    Delete {
        /// payment or transaction
        record_type: RecordType,
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Alerts go to stderr, confirmations are read from stdin
struct TerminalDialogs {
    assume_yes: bool,
}

#[async_trait]
impl Dialogs for TerminalDialogs {
    fn alert(&self, message: &str) {
        eprintln!("Error: {}", message);
    }

    async fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        let prompt = format!("{} [y/N] ", message);
        tokio::task::spawn_blocking(move || {
            eprint!("{}", prompt);
            let _ = io::stderr().flush();
            let mut line = String::new();
            match io::stdin().read_line(&mut line) {
                Ok(_) => matches!(line.trim().to_lowercase().as_str(), "y" | "yes"),
                Err(_) => false,
            }
        })
        .await
        .unwrap_or(false)
    }

    fn console_error(&self, message: &str, error: &ClientError) {
        log::error!("{}: {}", message, error);
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (config, found) = Config::load_or_default(args.config.clone())
        .map_err(|e| anyhow::anyhow!("{}", e.to_details()))?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    if found {
        log::info!("Config loaded: server={}{}", config.server.url, config.server.base_path);
    } else {
        log::warn!("Config file {} not found, using defaults", args.config.display());
    }

    let rt = Runtime::new()?;
    rt.block_on(run(args, config))
}

async fn run(args: Args, config: Config) -> anyhow::Result<()> {
    let transport = Arc::new(ReqwestTransport::from_config(&config)?);

    if let Some(password) = config.auth.password.as_deref() {
        LedgerApi::from_transport(transport.clone(), &config.server.base_path)
            .login(password)
            .await?;
    }

    let document = Arc::new(
        PageDocument::builder()
            .base_path(config.server.base_path.clone())
            .dashboard()
            .build(),
    );
    let assume_yes = matches!(args.command, Command::Delete { yes: true, .. });
    let dialogs = Arc::new(TerminalDialogs { assume_yes });
    let page = LedgerPage::bootstrap(document, dialogs, transport, &config).await;

    match args.command {
        Command::Ledger => print_ledger(&page, args.html),
        Command::Summary => {
            println!(
                "Current balance: {}",
                page.document().current_balance().unwrap_or_default()
            );
        }
        Command::AddTransaction {
            description,
            amount,
            method,
            date,
            notes,
        } => {
            page.document().update_form("transaction", |form| {
                form.set_value("transaction_name", description);
                form.set_value("amount", amount);
                form.set_value("payment_method", method);
                form.set_value("notes", notes.unwrap_or_default());
                if let Some(date) = date {
                    form.set_value("date", date);
                }
            });
            submit(&page, "transaction").await?;
            print_ledger(&page, args.html);
        }
        Command::AddPayment {
            amount,
            method,
            date,
            notes,
        } => {
            page.document().update_form("payment", |form| {
                form.set_value("amount", amount);
                form.set_value("payment_method", method);
                form.set_value("notes", notes.unwrap_or_default());
                if let Some(date) = date {
                    form.set_value("date", date);
                }
            });
            submit(&page, "payment").await?;
            print_ledger(&page, args.html);
        }
        Command::Delete { record_type, id, .. } => {
            let control = DeleteControl {
                record_type,
                id: id.to_string(),
            };
            match page.handle_activity_click(&delete_button(&control)).await {
                DeleteOutcome::Deleted => {
                    println!("Deleted {} {}", record_type, id);
                    print_ledger(&page, args.html);
                }
                DeleteOutcome::Declined => println!("Cancelled"),
                DeleteOutcome::Ignored => {}
                DeleteOutcome::Failed(e) => return Err(e.into()),
            }
        }
    }

    Ok(())
}

async fn submit(page: &LedgerPage, form_name: &str) -> anyhow::Result<()> {
    let outcome = page.submit(form_name).await;
    let status = page
        .document()
        .form(form_name)
        .map(|form| form.status.text)
        .unwrap_or_default();

    match outcome {
        SubmitOutcome::Saved(created) => {
            match created.and_then(|c| c.message) {
                Some(message) => println!("{} {}", status, message),
                None => println!("{}", status),
            }
            Ok(())
        }
        SubmitOutcome::Failed(_) => Err(anyhow::anyhow!(status)),
        SubmitOutcome::Busy => Err(anyhow::anyhow!("form {} is already submitting", form_name)),
        SubmitOutcome::NotWired => Err(anyhow::anyhow!("form {} is not available", form_name)),
    }
}

fn print_ledger(page: &LedgerPage, html: bool) {
    let document = page.document();
    if let Some(table) = document.activity() {
        if html {
            println!("{}", table.to_html());
        } else {
            println!("{}", table.to_text());
        }
    }
    println!();
    println!("Balance: {}", document.person_balance().unwrap_or_default());
}
