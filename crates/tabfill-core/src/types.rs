//! Wire and value types shared by the client and the TUI.
//!
//! [`Query`] is the trimmed text sent to the completion service and
//! [`CompletionResponse`] is the JSON body it answers with.

use serde::{Deserialize, Serialize};

/// Trimmed, non-empty text taken from a field at the moment of a trigger key
/// press.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query(String);

impl Query {
    /// Trim `raw` and wrap it. Returns `None` when nothing but whitespace is
    /// left, in which case no lookup should be issued.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body returned by the completion endpoint, e.g. `{"match": "The Doors"}`.
///
/// `match` may be missing, `null` or an empty string; all three mean "no
/// suggestion". Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResponse {
    #[serde(rename = "match", default, skip_serializing_if = "Option::is_none")]
    pub matched: Option<String>,
}

impl CompletionResponse {
    /// The suggested replacement, if present and non-empty.
    pub fn into_suggestion(self) -> Option<String> {
        self.matched.filter(|m| !m.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn query_is_trimmed() {
        let q = Query::new("  Doors \t").unwrap();
        assert_eq!(q.as_str(), "Doors");
        assert_eq!(q.to_string(), "Doors");
    }

    #[test]
    fn whitespace_only_query_is_none() {
        assert_eq!(Query::new(""), None);
        assert_eq!(Query::new("   \t\n"), None);
    }

    #[test]
    fn response_with_match() {
        let r: CompletionResponse = serde_json::from_str(r#"{"match": "The Doors"}"#).unwrap();
        assert_eq!(r.into_suggestion().as_deref(), Some("The Doors"));
    }

    #[test]
    fn response_without_usable_match() {
        for body in [r#"{}"#, r#"{"match": null}"#, r#"{"match": ""}"#, r#"{"other": 1}"#] {
            let r: CompletionResponse = serde_json::from_str(body).unwrap();
            assert_eq!(r.into_suggestion(), None, "body: {body}");
        }
    }

    #[test]
    fn non_string_match_is_rejected() {
        assert!(serde_json::from_str::<CompletionResponse>(r#"{"match": 3}"#).is_err());
    }
}
