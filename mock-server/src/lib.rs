use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const DEFAULT_API_KEY: &str = "test-key";

/// Canned submission plus the fields the filters look at.
#[derive(Clone, Debug)]
pub struct Submission {
    pub form_id: String,
    pub submitted_unix: i64,
    pub completed: bool,
    pub body: Value,
}

#[derive(Clone, Debug)]
pub struct Fixtures {
    pub forms: Vec<Value>,
    pub submissions: Vec<Submission>,
}

#[derive(Clone)]
struct AppState {
    api_key: Arc<str>,
    fixtures: Arc<Fixtures>,
}

#[derive(Deserialize)]
pub struct ResponsesQuery {
    pub since: Option<i64>,
    pub completed: Option<String>,
}

type ApiResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

pub fn app() -> Router {
    app_with_key(DEFAULT_API_KEY)
}

pub fn app_with_key(api_key: &str) -> Router {
    let state = AppState {
        api_key: Arc::from(api_key),
        fixtures: Arc::new(fixtures()),
    };
    Router::new()
        .route("/forms", get(list_forms))
        .route("/forms/{id}", get(get_form))
        .route("/forms/{id}/responses", get(list_responses))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_key(listener, DEFAULT_API_KEY).await
}

pub async fn run_with_key(listener: TcpListener, api_key: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_key(api_key)).await
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, Json<Value>)> {
    let expected = format!("Bearer {}", state.api_key);
    let given = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    if given == Some(expected.as_str()) {
        return Ok(());
    }
    tracing::info!("rejecting request without valid bearer token");
    Err((
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "code": "AUTHENTICATION_FAILED",
            "description": "Authentication credentials not found on the Request Headers",
        })),
    ))
}

fn form_not_found(id: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "code": "FORM_NOT_FOUND",
            "description": format!("Non existing form with uid {id}"),
        })),
    )
}

fn find_form<'a>(fixtures: &'a Fixtures, id: &str) -> Option<&'a Value> {
    fixtures.forms.iter().find(|f| f["id"] == id)
}

async fn list_forms(State(state): State<AppState>, headers: HeaderMap) -> ApiResult {
    authorize(&state, &headers)?;
    let items: Vec<Value> = state
        .fixtures
        .forms
        .iter()
        .map(|form| {
            let id = form["id"].as_str().unwrap_or_default();
            json!({
                "id": id,
                "title": form["title"],
                "last_updated_at": form["last_updated_at"],
                "settings": form["settings"],
                "self": {"href": format!("https://api.typeform.com/forms/{id}")},
                "theme": form["theme"],
                "_links": {"display": format!("https://mock.typeform.com/to/{id}")},
            })
        })
        .collect();
    Ok(Json(json!({
        "total_items": items.len(),
        "page_count": 1,
        "items": items,
    })))
}

async fn get_form(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult {
    authorize(&state, &headers)?;
    let form = find_form(&state.fixtures, &id).ok_or_else(|| form_not_found(&id))?;
    let mut body = form.clone();
    if let Some(obj) = body.as_object_mut() {
        obj.remove("last_updated_at");
    }
    Ok(Json(body))
}

async fn list_responses(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(query): Query<ResponsesQuery>,
) -> ApiResult {
    authorize(&state, &headers)?;
    find_form(&state.fixtures, &id).ok_or_else(|| form_not_found(&id))?;

    let completed = match query.completed.as_deref() {
        None | Some("") => None,
        Some("true") => Some(true),
        Some("false") => Some(false),
        Some(other) => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "code": "VALIDATION_ERROR",
                    "description": format!("completed must be true or false, got {other}"),
                })),
            ))
        }
    };

    let items: Vec<Value> = state
        .fixtures
        .submissions
        .iter()
        .filter(|s| s.form_id == id)
        .filter(|s| query.since.is_none_or(|since| s.submitted_unix >= since))
        .filter(|s| completed.is_none_or(|c| s.completed == c))
        .map(|s| s.body.clone())
        .collect();
    tracing::debug!(form = %id, count = items.len(), "serving responses");

    Ok(Json(json!({
        "total_items": items.len(),
        "page_count": 1,
        "items": items,
    })))
}

/// Two forms, three submissions to the first.
pub fn fixtures() -> Fixtures {
    let settings = json!({
        "is_public": true,
        "is_trial": false,
        "language": "en",
        "progress_bar": "proportion",
        "show_progress_bar": true,
    });
    let forms = vec![
        json!({
            "id": "frm_customer",
            "title": "Customer survey",
            "last_updated_at": "2024-04-30T09:00:00Z",
            "theme": {"href": "https://api.typeform.com/themes/qHWOQ7"},
            "settings": settings,
            "fields": [
                {
                    "id": "fld_name",
                    "title": "What is your name?",
                    "ref": "name",
                    "type": "short_text",
                    "properties": {"description": "First name is fine"},
                    "validations": {"required": true, "max_length": 80},
                },
                {
                    "id": "fld_colour",
                    "title": "Favourite colours?",
                    "ref": "colours",
                    "type": "multiple_choice",
                    "properties": {
                        "randomize": false,
                        "allow_multiple_selection": true,
                        "allow_other_choice": true,
                        "vertical_alignment": true,
                        "choices": [
                            {"id": "ch_red", "label": "Red"},
                            {"id": "ch_blue", "label": "Blue"},
                        ],
                    },
                    "validations": {"required": false},
                },
                {
                    "id": "fld_score",
                    "title": "How likely are you to recommend us?",
                    "ref": "nps",
                    "type": "number",
                    "validations": {"required": true, "min_value": 0, "max_value": 10},
                },
                {
                    "id": "fld_contact",
                    "title": "May we contact you?",
                    "ref": "contact",
                    "type": "yes_no",
                },
            ],
        }),
        json!({
            "id": "frm_event",
            "title": "Event feedback",
            "last_updated_at": "2024-05-02T15:30:00Z",
            "theme": {"href": "https://api.typeform.com/themes/default"},
            "settings": {"is_public": false, "language": "de"},
            "fields": [
                {
                    "id": "fld_day",
                    "title": "Which day did you attend?",
                    "ref": "day",
                    "type": "dropdown",
                    "properties": {
                        "alphabetical_order": true,
                        "choices": [
                            {"id": "ch_mon", "label": "Monday"},
                            {"id": "ch_tue", "label": "Tuesday"},
                        ],
                    },
                },
            ],
        }),
    ];

    let submissions = vec![
        Submission {
            form_id: "frm_customer".to_string(),
            submitted_unix: 1_714_521_600,
            completed: true,
            body: json!({
                "landing_id": "lnd_1",
                "token": "lnd_1",
                "submitted_at": "2024-05-01T00:00:00Z",
                "metadata": {
                    "user_agent": "Mozilla/5.0",
                    "platform": "other",
                    "referer": "https://mock.typeform.com/to/frm_customer",
                    "network_id": "net_a",
                    "browser": "default",
                },
                "answers": [
                    {"field": {"id": "fld_name", "type": "short_text"}, "type": "text", "text": "Ada"},
                    {"field": {"id": "fld_colour", "type": "multiple_choice"}, "type": "choices",
                     "choices": {"labels": ["Red", "Blue"]}},
                    {"field": {"id": "fld_score", "type": "number"}, "type": "number", "number": 9},
                    {"field": {"id": "fld_contact", "type": "yes_no"}, "type": "boolean", "boolean": true},
                ],
            }),
        },
        Submission {
            form_id: "frm_customer".to_string(),
            submitted_unix: 1_714_608_000,
            completed: true,
            body: json!({
                "landing_id": "lnd_2",
                "token": "lnd_2",
                "submitted_at": "2024-05-02T00:00:00Z",
                "metadata": {"platform": "mobile", "browser": "touch"},
                "answers": [
                    {"field": {"id": "fld_name", "type": "short_text"}, "type": "text", "text": "Grace"},
                    {"field": {"id": "fld_colour", "type": "multiple_choice"}, "type": "choices",
                     "choices": {"labels": ["Blue"], "other": "Teal"}},
                    {"field": {"id": "fld_contact", "type": "yes_no"}, "type": "boolean", "boolean": false},
                ],
            }),
        },
        Submission {
            form_id: "frm_customer".to_string(),
            submitted_unix: 1_714_694_400,
            completed: false,
            body: json!({
                "landing_id": "lnd_3",
                "token": "lnd_3",
                "submitted_at": "2024-05-03T00:00:00Z",
                "metadata": {"platform": "other"},
                "answers": [
                    {"field": {"id": "fld_name", "type": "short_text"}, "type": "text", "text": "Linus"},
                ],
            }),
        },
    ];

    Fixtures { forms, submissions }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_form_ids_are_unique() {
        let f = fixtures();
        let mut ids: Vec<&str> = f.forms.iter().filter_map(|f| f["id"].as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), f.forms.len());
    }

    #[test]
    fn every_submission_belongs_to_a_form() {
        let f = fixtures();
        for s in &f.submissions {
            assert!(find_form(&f, &s.form_id).is_some(), "{}", s.form_id);
        }
    }

    #[test]
    fn responses_query_fields_are_optional() {
        let q: ResponsesQuery = serde_json::from_str("{}").unwrap();
        assert!(q.since.is_none());
        assert!(q.completed.is_none());
    }
}
