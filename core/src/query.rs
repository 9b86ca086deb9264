//! Query filter for `GET /forms/{id}/responses`.

use chrono::{DateTime, Utc};
use url::form_urlencoded;

/// Filter for listing responses.
///
/// Only `since` and `completed` reach the query string. `page_size`, `until`,
/// `after` and `before` are accepted and carried but not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFilter {
    pub page_size: String,
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
    pub after: String,
    pub before: String,
    /// Passed through verbatim; the API understands `true` and `false`.
    pub completed: String,
}

impl QueryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    #[must_use]
    pub fn until(mut self, until: DateTime<Utc>) -> Self {
        self.until = Some(until);
        self
    }

    #[must_use]
    pub fn completed(mut self, completed: impl Into<String>) -> Self {
        self.completed = completed.into();
        self
    }

    #[must_use]
    pub fn page_size(mut self, page_size: impl Into<String>) -> Self {
        self.page_size = page_size.into();
        self
    }

    #[must_use]
    pub fn after(mut self, after: impl Into<String>) -> Self {
        self.after = after.into();
        self
    }

    #[must_use]
    pub fn before(mut self, before: impl Into<String>) -> Self {
        self.before = before.into();
        self
    }

    /// Form-urlencoded query string, keys sorted, without a leading `?`.
    ///
    /// `since` is emitted as unix seconds when set; `completed` when
    /// non-empty. A default filter encodes to the empty string.
    pub fn encode(&self) -> String {
        let mut pairs: Vec<(&str, String)> = Vec::new();
        if !self.completed.is_empty() {
            pairs.push(("completed", self.completed.clone()));
        }
        if let Some(since) = self.since {
            pairs.push(("since", since.timestamp().to_string()));
        }

        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &pairs {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn default_filter_encodes_empty() {
        assert_eq!(QueryFilter::default().encode(), "");
    }

    #[test]
    fn since_is_unix_seconds() {
        let since = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let q = QueryFilter::new().since(since);
        assert_eq!(q.encode(), "since=1714521600");
    }

    #[test]
    fn completed_passes_through() {
        assert_eq!(QueryFilter::new().completed("true").encode(), "completed=true");
        assert_eq!(QueryFilter::new().completed("false").encode(), "completed=false");
    }

    #[test]
    fn completed_value_is_escaped() {
        assert_eq!(
            QueryFilter::new().completed("a b&c").encode(),
            "completed=a+b%26c"
        );
    }

    #[test]
    fn keys_are_sorted() {
        let since = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let q = QueryFilter::new().since(since).completed("true");
        assert_eq!(q.encode(), "completed=true&since=1700000000");
    }

    #[test]
    fn inert_fields_are_not_encoded() {
        let q = QueryFilter::new()
            .page_size("25")
            .until(Utc.timestamp_opt(1_700_000_000, 0).unwrap())
            .after("tok_a")
            .before("tok_b");
        assert_eq!(q.encode(), "");
    }
}
