//! End-to-end tests against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port and drives every client operation
//! over real HTTP through `UreqTransport`. The base URL is fixed, so a small
//! transport wrapper rewrites the host before delegating.

use std::net::SocketAddr;
use std::sync::OnceLock;

use chrono::{TimeZone, Utc};
use typeform_core::{
    AnswerValue, ApiError, ClientConfig, HttpRequest, HttpResponse, QueryFilter, StatusPolicy,
    Transport, TransportError, TypeformClient, UreqTransport, BASE_URL,
};

const API_KEY: &str = mock_server::DEFAULT_API_KEY;

/// Sends requests meant for `BASE_URL` to a local address instead.
struct LocalTransport {
    addr: SocketAddr,
    inner: UreqTransport,
}

impl Transport for LocalTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut local = request.clone();
        local.url = request
            .url
            .replacen(BASE_URL, &format!("http://{}", self.addr), 1);
        self.inner.execute(&local)
    }
}

/// Start the mock server once for the whole test binary.
fn server() -> SocketAddr {
    static ADDR: OnceLock<SocketAddr> = OnceLock::new();
    *ADDR.get_or_init(|| {
        let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = std_listener.local_addr().unwrap();
        std_listener.set_nonblocking(true).unwrap();

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async {
                let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
                mock_server::run(listener).await
            })
            .unwrap();
        });
        addr
    })
}

fn local(addr: SocketAddr) -> LocalTransport {
    LocalTransport {
        addr,
        inner: UreqTransport::new(),
    }
}

fn client(api_key: &str, policy: StatusPolicy) -> TypeformClient<LocalTransport> {
    let config = ClientConfig::new(api_key).with_status_policy(policy);
    TypeformClient::from_config(config, local(server()))
}

#[test]
fn list_forms_over_http() {
    let forms = client(API_KEY, StatusPolicy::Ignore).list_forms().unwrap();
    assert_eq!(forms.total_items, 2);
    assert_eq!(forms.page_count, 1);
    assert_eq!(forms.items.len(), 2);
    assert_eq!(forms.items[0].id, "frm_customer");
    assert_eq!(forms.items[0].settings.progress_bar, "proportion");
    assert_eq!(forms.items[1].id, "frm_event");
    assert_eq!(forms.items[1].settings.language, "de");
}

#[test]
fn get_form_over_http() {
    let form = client(API_KEY, StatusPolicy::Ignore)
        .get_form("frm_customer")
        .unwrap();
    assert_eq!(form.title, "Customer survey");
    assert_eq!(form.fields.len(), 4);

    let colours = form.field("fld_colour").unwrap();
    assert_eq!(colours.field_type, "multiple_choice");
    assert_eq!(colours.reference, "colours");
    assert!(colours.properties.allow_other_choice);
    assert_eq!(colours.properties.choices[0].label, "Red");

    let score = form.field("fld_score").unwrap();
    assert_eq!(score.validations.max_value, 10);
    assert!(score.validations.required);
}

#[test]
fn list_responses_over_http() {
    let c = client(API_KEY, StatusPolicy::Ignore);

    let all = c.list_responses("frm_customer", None).unwrap();
    assert_eq!(all.total_items, 3);
    let first = &all.items[0];
    assert_eq!(first.metadata.network_id, "net_a");
    assert_eq!(
        first.answer_for("fld_score").map(|a| &a.value),
        Some(&AnswerValue::Number { number: 9 })
    );

    let completed = QueryFilter::new().completed("true");
    let done = c.list_responses("frm_customer", Some(&completed)).unwrap();
    assert_eq!(done.total_items, 2);

    let since = QueryFilter::new()
        .since(Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 0).unwrap())
        .completed("true");
    let recent = c.list_responses("frm_customer", Some(&since)).unwrap();
    assert_eq!(recent.total_items, 1);
    assert_eq!(recent.items[0].token, "lnd_2");
    match &recent.items[0].answer_for("fld_colour").unwrap().value {
        AnswerValue::Choices { choices } => assert_eq!(choices.other, "Teal"),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn bad_token_decodes_to_empty_result_by_default() {
    let forms = client("wrong", StatusPolicy::Ignore).list_forms().unwrap();
    assert_eq!(forms.total_items, 0);
    assert!(forms.items.is_empty());
}

#[test]
fn bad_token_is_remote_error_when_strict() {
    let err = client("wrong", StatusPolicy::Strict).list_forms().unwrap_err();
    match err {
        ApiError::Remote { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("AUTHENTICATION_FAILED"));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn unknown_form_when_strict() {
    let c = client(API_KEY, StatusPolicy::Strict);
    let err = c.get_form("does not/exist").unwrap_err();
    assert!(matches!(err, ApiError::NotFound(ref body) if body.contains("FORM_NOT_FOUND")));
}

#[test]
fn closed_port_is_transport_error() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let c = TypeformClient::with_transport(API_KEY, local(addr));
    assert!(c.list_forms().unwrap_err().is_transport());
    assert!(c.get_form("frm_customer").unwrap_err().is_transport());
    assert!(c.list_responses("frm_customer", None).unwrap_err().is_transport());
}
