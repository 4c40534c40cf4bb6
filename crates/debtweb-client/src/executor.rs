//! JSON request executor
//!
//! Every backend call goes through `RequestExecutor::execute`, which applies
//! the response contract: body read as text first, non-success statuses
//! become `ClientError::Request`, empty bodies are `None`, anything else must
//! be JSON.

use debtweb_core::{ClientError, ClientResult, Method, UrlNormalizer};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::transport::{HttpRequest, HttpResponse, RequestBody, Transport};

/// Apply the response contract to a raw response
pub fn interpret(response: HttpResponse) -> ClientResult<Option<Value>> {
    if !response.is_success() {
        return Err(ClientError::request(response.status, &response.body));
    }
    if response.body.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(&response.body)
        .map(Some)
        .map_err(|_| ClientError::invalid_response())
}

/// Decode a JSON value into a typed model
pub fn decode<T: DeserializeOwned>(value: Value, expected: &str) -> ClientResult<T> {
    serde_json::from_value(value).map_err(|e| ClientError::UnexpectedPayload {
        expected: expected.to_string(),
        message: e.to_string(),
    })
}

/// Sends JSON requests relative to the dashboard base path
#[derive(Clone)]
pub struct RequestExecutor {
    transport: Arc<dyn Transport>,
    urls: UrlNormalizer,
}

impl RequestExecutor {
    pub fn new(transport: Arc<dyn Transport>, urls: UrlNormalizer) -> Self {
        Self { transport, urls }
    }

    pub fn urls(&self) -> &UrlNormalizer {
        &self.urls
    }

    /// Send a request and apply the response contract
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> ClientResult<Option<Value>> {
        let response = self.send(method, path, body).await?;
        let result = interpret(response);
        if let Err(ref e) = result {
            log::warn!(target: "debtweb::client", "{} {} failed: {}", method, path, e);
        }
        result
    }

    /// Send a request and return the raw response, without interpretation
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> ClientResult<HttpResponse> {
        let url = self.urls.normalize(path);
        self.transport
            .send(HttpRequest::new(method, url).with_body(body))
            .await
    }

    /// GET a JSON document and decode it; an empty body is an error here
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, expected: &str) -> ClientResult<T> {
        match self.execute(Method::Get, path, RequestBody::Empty).await? {
            Some(value) => decode(value, expected),
            None => Err(ClientError::UnexpectedPayload {
                expected: expected.to_string(),
                message: "empty response".to_string(),
            }),
        }
    }

    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<Option<Value>> {
        let body = serde_json::to_string(body).map_err(|e| ClientError::UnexpectedPayload {
            expected: "request body".to_string(),
            message: e.to_string(),
        })?;
        self.execute(Method::Post, path, RequestBody::Json(body)).await
    }

    pub async fn delete(&self, path: &str) -> ClientResult<Option<Value>> {
        self.execute(Method::Delete, path, RequestBody::Empty).await
    }
}
