//! Typeform API client.
//!
//! # Design
//! `TypeformClient` holds its configuration and a transport and carries no
//! mutable state between calls. Each operation is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that consumes
//! an `HttpResponse`; the public operations (`list_forms`, `get_form`,
//! `list_responses`) glue the two together through the transport. Callers who
//! want to run the round trip themselves can use the halves directly.

use std::io::Read;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::{ClientConfig, StatusPolicy, BASE_URL};
use crate::error::ApiError;
use crate::http::{Body, HttpMethod, HttpRequest, HttpResponse};
use crate::query::QueryFilter;
use crate::transport::{Transport, UreqTransport};
use crate::types::{Form, FormsListResult, ResponsesListResult};

/// Synchronous client for the Typeform forms and responses API.
#[derive(Debug, Clone)]
pub struct TypeformClient<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl TypeformClient<UreqTransport> {
    /// Client using the default ureq-backed transport.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_transport(api_key, UreqTransport::default())
    }
}

impl<T> TypeformClient<T> {
    pub fn with_transport(api_key: impl Into<String>, transport: T) -> Self {
        Self::from_config(ClientConfig::new(api_key), transport)
    }

    pub fn from_config(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn build_list_forms(&self) -> Result<HttpRequest, ApiError> {
        self.build_get(&["forms"], "")
    }

    /// `form_id` is sent as a single, percent-encoded path segment.
    pub fn build_get_form(&self, form_id: &str) -> Result<HttpRequest, ApiError> {
        self.build_get(&["forms", form_id], "")
    }

    /// `None` behaves like `QueryFilter::default()`.
    pub fn build_list_responses(
        &self,
        form_id: &str,
        filter: Option<&QueryFilter>,
    ) -> Result<HttpRequest, ApiError> {
        let query = filter.map(QueryFilter::encode).unwrap_or_default();
        self.build_get(&["forms", form_id, "responses"], &query)
    }

    pub fn parse_list_forms(&self, response: HttpResponse) -> Result<FormsListResult, ApiError> {
        self.decode(response)
    }

    pub fn parse_get_form(&self, response: HttpResponse) -> Result<Form, ApiError> {
        self.decode(response)
    }

    pub fn parse_list_responses(
        &self,
        response: HttpResponse,
    ) -> Result<ResponsesListResult, ApiError> {
        self.decode(response)
    }

    fn build_get(&self, segments: &[&str], query: &str) -> Result<HttpRequest, ApiError> {
        self.config.validate()?;
        Ok(HttpRequest {
            method: HttpMethod::Get,
            url: endpoint(segments, query),
            headers: vec![
                (
                    "Authorization".to_string(),
                    format!("Bearer {}", self.config.api_key),
                ),
                ("User-Agent".to_string(), self.config.user_agent.clone()),
                ("Accept".to_string(), "application/json".to_string()),
            ],
        })
    }

    /// Streams the body into the JSON decoder. The body is dropped, and so
    /// released, before this returns on every path.
    fn decode<R: DeserializeOwned>(&self, response: HttpResponse) -> Result<R, ApiError> {
        let success = response.is_success();
        let HttpResponse { status, body, .. } = response;
        let body = check_status(self.config.status_policy, status, success, body)?;
        serde_json::from_reader(body).map_err(|e| {
            warn!(status, error = %e, "failed to decode response body");
            ApiError::Decode(e)
        })
    }
}

impl<T: Transport> TypeformClient<T> {
    /// Retrieves the forms visible to the token's account.
    pub fn list_forms(&self) -> Result<FormsListResult, ApiError> {
        let request = self.build_list_forms()?;
        let response = self.execute(&request)?;
        self.parse_list_forms(response)
    }

    /// Retrieves one form definition with its fields.
    pub fn get_form(&self, form_id: &str) -> Result<Form, ApiError> {
        let request = self.build_get_form(form_id)?;
        let response = self.execute(&request)?;
        self.parse_get_form(response)
    }

    /// Retrieves submissions for `form_id`, narrowed by `filter`.
    pub fn list_responses(
        &self,
        form_id: &str,
        filter: Option<&QueryFilter>,
    ) -> Result<ResponsesListResult, ApiError> {
        let request = self.build_list_responses(form_id, filter)?;
        let response = self.execute(&request)?;
        self.parse_list_responses(response)
    }

    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, url = %request.url, "executing request");
        let response = self.transport.execute(request).map_err(|e| {
            warn!(url = %request.url, error = %e, "request failed");
            e
        })?;
        debug!(url = %request.url, status = response.status, "received response");
        Ok(response)
    }
}

/// Absolute URL under `BASE_URL` with each segment percent-encoded.
///
/// Built by hand rather than through `Url`, which collapses `.` and `..`
/// even when they arrive as `%2E`.
fn endpoint(segments: &[&str], query: &str) -> String {
    let mut url = String::from(BASE_URL);
    for segment in segments {
        url.push('/');
        url.push_str(&encode_segment(segment));
    }
    if !query.is_empty() {
        url.push('?');
        url.push_str(query);
    }
    url
}

/// Percent-encodes one path segment; dot segments are escaped so they name
/// a resource instead of navigating the path.
fn encode_segment(segment: &str) -> String {
    match segment {
        "." => "%2E".to_string(),
        ".." => "%2E%2E".to_string(),
        other => urlencoding::encode(other).into_owned(),
    }
}

/// Under `Strict`, turn non-2xx responses into errors. The body is consumed
/// for the error message and dropped.
fn check_status(
    policy: StatusPolicy,
    status: u16,
    success: bool,
    mut body: Body,
) -> Result<Body, ApiError> {
    if policy == StatusPolicy::Ignore || success {
        return Ok(body);
    }

    let mut raw = Vec::new();
    if let Err(e) = body.read_to_end(&mut raw) {
        debug!(status, error = %e, "could not read error body");
    }
    drop(body);
    let body = String::from_utf8_lossy(&raw).into_owned();

    if status == 404 {
        return Err(ApiError::NotFound(body));
    }
    Err(ApiError::Remote { status, body })
}
