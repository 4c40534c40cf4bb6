//! Host dialogs: alerts, confirmations and the error console

use async_trait::async_trait;
use debtweb_core::ClientError;

/// Where the page reports to and asks the user
#[async_trait]
pub trait Dialogs: Send + Sync {
    /// Blocking notice for failures the user must see
    fn alert(&self, message: &str);

    /// Yes/no question; `false` means the action is abandoned
    async fn confirm(&self, message: &str) -> bool;

    /// Failures that are only logged
    fn console_error(&self, message: &str, error: &ClientError);
}
