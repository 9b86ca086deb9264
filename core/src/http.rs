//! HTTP request and response values exchanged with a [`Transport`].
//!
//! # Design
//! Requests are plain data: the client builds an `HttpRequest` without
//! touching the network and hands it to a transport. Responses carry their
//! body as a boxed reader so the decoder can stream it. The reader is owned by
//! the `HttpResponse`, so dropping the response releases the body, once, on
//! every path.
//!
//! [`Transport`]: crate::transport::Transport

use std::fmt;
use std::io::{Cursor, Read};

/// Streamed response body.
pub type Body = Box<dyn Read + Send>;

/// HTTP method for a request.
///
/// The API surface is read-only, so GET is the only method the client emits.
/// Transports must honor whatever method the request names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum HttpMethod {
    Get,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// Built by `TypeformClient::build_*` methods. `url` is absolute.
#[derive(Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// First value of the header `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

// Authorization is redacted so requests can be logged or printed safely.
impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|(k, v)| {
                if k.eq_ignore_ascii_case("authorization") {
                    (k.as_str(), "<redacted>")
                } else {
                    (k.as_str(), v.as_str())
                }
            })
            .collect();
        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &headers)
            .finish()
    }
}

/// An HTTP response whose body has not been read yet.
///
/// Produced by a transport and consumed by `TypeformClient::parse_*`.
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Body,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Read + Send + 'static) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Box::new(body),
        }
    }

    /// Response with an in-memory body, handy for canned payloads.
    pub fn from_string(status: u16, body: impl Into<String>) -> Self {
        Self::new(status, Cursor::new(body.into().into_bytes()))
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}
