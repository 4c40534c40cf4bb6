//! HTTP transport seam
//!
//! `Transport` sends one request and hands back status, final URL and body
//! text. Interpreting the response is the executor's job.

use async_trait::async_trait;
use debtweb_config::Config;
use debtweb_core::url::is_absolute_url;
use debtweb_core::{ClientError, ClientResult, Method};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use std::time::Duration;

/// Request body variants the client sends
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    /// Serialized JSON document
    Json(String),
    /// `application/x-www-form-urlencoded` fields
    Form(Vec<(String, String)>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    /// Normalized path, or an absolute URL
    pub url: String,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: RequestBody::Empty,
        }
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    /// URL the response came from, after redirects
    pub url: String,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests to the backend
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> ClientResult<HttpResponse>;
}

/// `reqwest` transport with JSON negotiation and a cookie store
///
/// The cookie store keeps the dashboard session cookie, scoped by reqwest to
/// the origin that set it.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    origin: String,
}

impl ReqwestTransport {
    pub fn new(origin: impl Into<String>, timeout: Option<Duration>) -> ClientResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .cookie_store(true);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(transport_error)?;

        Ok(Self {
            client,
            origin: origin.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> ClientResult<Self> {
        Self::new(config.server.url.clone(), config.timeout())
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Full URL for a normalized path
    pub fn resolve(&self, url: &str) -> String {
        if let Some(rest) = url.strip_prefix("//") {
            let scheme = self.origin.split("://").next().unwrap_or("http");
            return format!("{}://{}", scheme, rest);
        }
        if is_absolute_url(url) {
            return url.to_string();
        }
        if url.starts_with('/') {
            format!("{}{}", self.origin, url)
        } else {
            format!("{}/{}", self.origin, url)
        }
    }
}

fn transport_error(e: reqwest::Error) -> ClientError {
    ClientError::Transport {
        message: e.to_string(),
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> ClientResult<HttpResponse> {
        let url = self.resolve(&request.url);
        log::debug!(target: "debtweb::client", "{} {}", request.method, url);

        let builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Delete => self.client.delete(&url),
        };
        let builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.body(body),
            RequestBody::Form(fields) => builder.form(&fields),
        };

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let body = response.text().await.map_err(transport_error)?;
        log::debug!(target: "debtweb::client", "{} {} -> {}", request.method, url, status);

        Ok(HttpResponse {
            status,
            url: final_url,
            body,
        })
    }
}
