//! HTTP transport abstraction.
//!
//! The client only talks to the network through [`Transport`], so tests can
//! substitute an in-memory implementation and callers can bring their own
//! HTTP stack. [`ReqwestTransport`] is the production implementation.

use crate::constants::USER_AGENT;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, StatusCode};
use std::time::Duration;
use thiserror::Error;

/// A single file carried as one multipart form part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    Multipart(FilePart),
}

#[derive(Debug, Clone)]
pub struct OutgoingRequest {
    pub method: Method,
    pub url: String,
    pub user_agent: String,
    pub body: Option<RequestBody>,
}

impl OutgoingRequest {
    pub fn post(url: impl Into<String>, body: Option<RequestBody>) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            user_agent: USER_AGENT.to_string(),
            body,
        }
    }
}

/// A fully buffered HTTP response
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: Vec::new(),
        }
    }

    /// First value of a header that may be repeated, `None` when absent
    pub fn first_header(&self, name: &HeaderName) -> Option<String> {
        self.headers
            .get(name)
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
    }

    /// Every value of a repeated header, in the order received
    pub fn all_headers(&self, name: &HeaderName) -> Vec<String> {
        self.headers
            .get_all(name)
            .iter()
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
            .collect()
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    #[error("{0}")]
    Connection(String),
}

/// Executes one HTTP request. Implementations must not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        request: OutgoingRequest,
    ) -> std::result::Result<TransportResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for &T {
    async fn send(
        &self,
        request: OutgoingRequest,
    ) -> std::result::Result<TransportResponse, TransportError> {
        (**self).send(request).await
    }
}

/// [`Transport`] backed by a shared `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds a client that follows redirects and enforces `timeout` as its deadline
    pub fn new(timeout: Duration) -> std::result::Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(
        &self,
        request: OutgoingRequest,
    ) -> std::result::Result<TransportResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .header(reqwest::header::USER_AGENT, request.user_agent);

        if let Some(RequestBody::Multipart(file)) = request.body {
            let part = Part::bytes(file.bytes)
                .file_name(file.file_name)
                .mime_str(&file.content_type)?;
            builder = builder.multipart(Form::new().part(file.field, part));
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}
