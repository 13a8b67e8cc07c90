//! Raw HTTP responses from the triplestore
//!
//! The REST-level operations hand back the status and body as-is; callers
//! (and the composite operations) decide what a status means.

use std::borrow::Cow;

use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;

use crate::error::Result;

/// Status code and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Bytes,
    /// `Content-Type` reported by the server, if it sent one
    pub content_type: Option<String>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
            content_type: None,
        }
    }

    /// Drain a `reqwest` response into memory.
    pub(crate) async fn read(resp: reqwest::Response) -> Result<Self> {
        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = resp.bytes().await?;
        Ok(Self {
            status,
            body,
            content_type,
        })
    }

    /// Exactly 200, the only status the load and harvest paths accept.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    pub fn into_body(self) -> Bytes {
        self.body
    }
}
