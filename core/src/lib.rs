//! Synchronous client for the Typeform forms and responses API.
//!
//! # Overview
//! Three read-only operations, each a single authenticated GET:
//! [`TypeformClient::list_forms`], [`TypeformClient::get_form`] and
//! [`TypeformClient::list_responses`]. Responses are streamed into typed
//! DTOs with `serde_json`.
//!
//! # Design
//! - `TypeformClient` holds its config and a [`Transport`]; no mutable state.
//! - Each operation is also available as a `build_*` / `parse_*` pair so the
//!   I/O boundary stays explicit and testable.
//! - [`UreqTransport`] is the default transport; any other can be supplied
//!   with [`TypeformClient::with_transport`].
//! - HTTP status is not inspected unless [`StatusPolicy::Strict`] is chosen.
//!
//! ```no_run
//! use typeform_core::{QueryFilter, TypeformClient};
//!
//! let client = TypeformClient::new("tfp_personal_token");
//! let forms = client.list_forms()?;
//! for form in &forms.items {
//!     let filter = QueryFilter::new().completed("true");
//!     let responses = client.list_responses(&form.id, Some(&filter))?;
//!     println!("{}: {} responses", form.title, responses.total_items);
//! }
//! # Ok::<(), typeform_core::ApiError>(())
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod query;
pub mod transport;
pub mod types;

pub use client::TypeformClient;
pub use config::{ClientConfig, StatusPolicy, BASE_URL};
pub use error::{ApiError, TransportError};
pub use http::{Body, HttpMethod, HttpRequest, HttpResponse};
pub use query::QueryFilter;
pub use transport::{Transport, UreqTransport};
pub use types::{
    Answer, AnswerChoice, AnswerChoices, AnswerField, AnswerValue, Field, FieldChoice,
    FieldProperties, FieldValidations, Form, FormLinks, FormSummary, FormsListResult, Href,
    Metadata, ResponseItem, ResponsesListResult, Settings,
};
