//! DTOs for the Typeform forms and responses endpoints.
//!
//! # Design
//! Field names match the wire schema verbatim. Every field is
//! `#[serde(default)]`: the API omits attributes that do not apply to a given
//! field type or answer, and an absent attribute means "not set". Unknown
//! fields are ignored so additions on the API side do not break decoding.

use serde::{Deserialize, Deserializer, Serialize};

/// A `{"href": "..."}` link object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Href {
    pub href: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub is_public: bool,
    pub is_trial: bool,
    pub language: String,
    pub progress_bar: String,
    pub show_progress_bar: bool,
}

/// Response of `GET /forms`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormsListResult {
    pub total_items: i64,
    pub page_count: i64,
    pub items: Vec<FormSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormLinks {
    /// Public URL respondents open.
    pub display: String,
}

/// One entry of the forms list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSummary {
    pub id: String,
    pub title: String,
    pub last_updated_at: String,
    pub settings: Settings,
    #[serde(rename = "self")]
    pub self_link: Href,
    pub theme: Href,
    #[serde(rename = "_links")]
    pub links: FormLinks,
}

/// Response of `GET /forms/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Form {
    pub id: String,
    pub title: String,
    pub theme: Href,
    pub settings: Settings,
    pub fields: Vec<Field>,
}

impl Form {
    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }
}

/// A single question of a form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Field {
    pub id: String,
    pub title: String,
    #[serde(rename = "ref")]
    pub reference: String,
    /// Field type tag, e.g. `multiple_choice`, `dropdown`, `short_text`.
    #[serde(rename = "type")]
    pub field_type: String,
    pub properties: FieldProperties,
    pub validations: FieldValidations,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldChoice {
    pub id: String,
    pub label: String,
}

/// Properties shared by all field types.
///
/// Several attributes only apply to some types; the API leaves them unset on
/// the others.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldProperties {
    pub description: String,
    pub randomize: bool,
    /// `multiple_choice` and `picture_choice` only.
    pub allow_multiple_selection: bool,
    /// `multiple_choice` and `picture_choice` only.
    pub allow_other_choice: bool,
    /// `dropdown`, `multiple_choice` and `picture_choice` only.
    pub choices: Vec<FieldChoice>,
    /// `multiple_choice` only.
    pub vertical_alignment: bool,
    pub alphabetical_order: bool,
    pub structure: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldValidations {
    pub required: bool,
    pub max_length: i64,
    pub min_length: i64,
    pub max_value: i64,
    pub min_value: i64,
}

/// Response of `GET /forms/{id}/responses`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponsesListResult {
    pub total_items: i64,
    pub page_count: i64,
    pub items: Vec<ResponseItem>,
}

/// One respondent's submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseItem {
    pub landing_id: String,
    pub token: String,
    pub submitted_at: String,
    pub metadata: Metadata,
    pub answers: Vec<Answer>,
}

impl ResponseItem {
    /// The answer given to field `field_id`, if any.
    pub fn answer_for(&self, field_id: &str) -> Option<&Answer> {
        self.answers.iter().find(|a| a.field.id == field_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    pub user_agent: String,
    pub platform: String,
    pub referer: String,
    pub network_id: String,
    pub browser: String,
}

/// The field an answer belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswerField {
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: String,
}

/// One respondent's value for one field.
///
/// On the wire the value sits next to `field` under a key named by `type`:
/// `{"field": {...}, "type": "text", "text": "hello"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    #[serde(default)]
    pub field: AnswerField,
    #[serde(flatten)]
    pub value: AnswerValue,
}

/// Answer payload, keyed by the answer's `type` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnswerValue {
    Choices {
        #[serde(default, deserialize_with = "null_as_default")]
        choices: AnswerChoices,
    },
    Choice {
        #[serde(default, deserialize_with = "null_as_default")]
        choice: AnswerChoice,
    },
    /// ISO-8601 date as sent by the API.
    Date {
        #[serde(default, deserialize_with = "null_as_default")]
        date: String,
    },
    Text {
        #[serde(default, deserialize_with = "null_as_default")]
        text: String,
    },
    Email {
        #[serde(default, deserialize_with = "null_as_default")]
        email: String,
    },
    Boolean {
        #[serde(default, deserialize_with = "null_as_default")]
        boolean: bool,
    },
    Number {
        #[serde(default, deserialize_with = "null_as_default")]
        number: i64,
    },
    Url {
        #[serde(default, deserialize_with = "null_as_default")]
        url: String,
    },
    FileUrl {
        #[serde(default, deserialize_with = "null_as_default")]
        file_url: String,
    },
    PhoneNumber {
        #[serde(default, deserialize_with = "null_as_default")]
        phone_number: String,
    },
    /// A type tag this client does not know about.
    #[serde(other)]
    Unknown,
}

impl AnswerValue {
    /// The wire `type` tag, or `None` for [`AnswerValue::Unknown`].
    pub fn type_tag(&self) -> Option<&'static str> {
        Some(match self {
            AnswerValue::Choices { .. } => "choices",
            AnswerValue::Choice { .. } => "choice",
            AnswerValue::Date { .. } => "date",
            AnswerValue::Text { .. } => "text",
            AnswerValue::Email { .. } => "email",
            AnswerValue::Boolean { .. } => "boolean",
            AnswerValue::Number { .. } => "number",
            AnswerValue::Url { .. } => "url",
            AnswerValue::FileUrl { .. } => "file_url",
            AnswerValue::PhoneNumber { .. } => "phone_number",
            AnswerValue::Unknown => return None,
        })
    }

    /// Text-like payloads as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AnswerValue::Date { date } => Some(date),
            AnswerValue::Text { text } => Some(text),
            AnswerValue::Email { email } => Some(email),
            AnswerValue::Url { url } => Some(url),
            AnswerValue::FileUrl { file_url } => Some(file_url),
            AnswerValue::PhoneNumber { phone_number } => Some(phone_number),
            AnswerValue::Choice { choice } => Some(&choice.label),
            _ => None,
        }
    }
}

/// A missing or `null` payload decodes to the zero value of its type.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Selected labels of a multi-select answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswerChoices {
    pub labels: Vec<String>,
    pub label: String,
    /// Free text typed into the "Other" option.
    pub other: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswerChoice {
    pub label: String,
}
