//! Typed endpoints of the debt tracking backend

use debtweb_core::{
    ClientError, ClientResult, EntryCreated, FormPayload, LedgerSnapshot, Method, Summary,
};
use std::sync::Arc;

use crate::executor::{decode, RequestExecutor};
use crate::transport::{RequestBody, Transport};

pub const RECORDS_PATH: &str = "/api/records";
pub const SUMMARY_PATH: &str = "/api/summary";
pub const LOGIN_PATH: &str = "/login";

/// Path of the delete endpoint for one record
pub fn record_path(record_type: &str, id: &str) -> String {
    format!(
        "{}/{}/{}",
        RECORDS_PATH,
        urlencoding::encode(record_type),
        urlencoding::encode(id)
    )
}

/// Backend API used by the page
#[derive(Clone)]
pub struct LedgerApi {
    executor: RequestExecutor,
}

impl LedgerApi {
    pub fn new(executor: RequestExecutor) -> Self {
        Self { executor }
    }

    pub fn from_transport(transport: Arc<dyn Transport>, base_path: &str) -> Self {
        Self::new(RequestExecutor::new(
            transport,
            debtweb_core::UrlNormalizer::new(base_path),
        ))
    }

    pub fn executor(&self) -> &RequestExecutor {
        &self.executor
    }

    /// `GET /api/records`
    pub async fn records(&self) -> ClientResult<LedgerSnapshot> {
        self.executor.get_json(RECORDS_PATH, "ledger").await
    }

    /// `GET /api/summary`
    pub async fn summary(&self) -> ClientResult<Summary> {
        self.executor.get_json(SUMMARY_PATH, "summary").await
    }

    /// POST a form payload to its endpoint.
    ///
    /// The entry is saved once the backend answers with success, so a reply
    /// body that is not an `EntryCreated` is logged and ignored.
    pub async fn submit_entry(
        &self,
        endpoint: &str,
        payload: &FormPayload,
    ) -> ClientResult<Option<EntryCreated>> {
        let reply = self.executor.post_json(endpoint, payload).await?;
        Ok(reply.and_then(|value| match decode::<EntryCreated>(value, "entry") {
            Ok(created) => Some(created),
            Err(e) => {
                log::debug!(target: "debtweb::client", "ignoring reply from {}: {}", endpoint, e);
                None
            }
        }))
    }

    /// `DELETE /api/records/{type}/{id}`
    pub async fn delete_record(&self, record_type: &str, id: &str) -> ClientResult<()> {
        self.executor.delete(&record_path(record_type, id)).await?;
        Ok(())
    }

    /// Sign in with the dashboard password.
    ///
    /// The backend redirects away from the login page on success and
    /// re-renders it on failure; the session cookie lives in the transport.
    pub async fn login(&self, password: &str) -> ClientResult<()> {
        let response = self
            .executor
            .send(
                Method::Post,
                LOGIN_PATH,
                RequestBody::Form(vec![("password".to_string(), password.to_string())]),
            )
            .await?;

        if !response.is_success() {
            return Err(ClientError::request(response.status, &response.body));
        }

        let landed_on_login = response
            .url
            .split(|c: char| c == '?' || c == '#')
            .next()
            .map(|path| path.trim_end_matches('/').ends_with(LOGIN_PATH))
            .unwrap_or(false);
        if landed_on_login {
            return Err(ClientError::Unauthorized);
        }

        log::info!(target: "debtweb::client", "signed in to dashboard");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_path_encodes_segments() {
        assert_eq!(record_path("payment", "3"), "/api/records/payment/3");
        assert_eq!(record_path("pay ment", "3/4"), "/api/records/pay%20ment/3%2F4");
    }
}
