//! Submission, filter clause and page types.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Question type tags whose answers hold dates.
const DATE_KINDS: &[&str] = &["DatePicker", "DateTimePicker"];

/// One form response returned by the forms API.
///
/// Only `submissionId` and the questions are typed. Everything else
/// (`submissionTime`, `calculations`, `urlParameters`, `quiz`, ...) is kept in
/// `extra` and serialized back unchanged, nulls included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub submission_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<Question>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Submission {
    /// First question answer with the given id.
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().flatten().find(|q| q.id == id)
    }
}

/// One answered field within a submission.
///
/// `type` and `value` distinguish an explicit `null` from an absent key so a
/// question serializes back exactly as it arrived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,

    #[serde(
        rename = "type",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<Value>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

static UNANSWERED: Value = Value::Null;

impl Question {
    /// The answer; numeric, textual, or null when unanswered or absent.
    pub fn answer(&self) -> &Value {
        self.value.as_ref().unwrap_or(&UNANSWERED)
    }

    /// Whether ordering comparisons on this answer use time values.
    pub fn is_date(&self) -> bool {
        self.kind
            .as_ref()
            .and_then(Value::as_str)
            .is_some_and(|kind| DATE_KINDS.contains(&kind))
    }
}

/// Wraps any present value, `null` included, in `Some`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Comparison requested by a filter clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Equals,
    DoesNotEqual,
    GreaterThan,
    LessThan,
    /// Any other tag. Never matches.
    #[serde(other)]
    Unknown,
}

impl From<&str> for Condition {
    fn from(tag: &str) -> Self {
        match tag {
            "equals" => Condition::Equals,
            "does_not_equal" => Condition::DoesNotEqual,
            "greater_than" => Condition::GreaterThan,
            "less_than" => Condition::LessThan,
            _ => Condition::Unknown,
        }
    }
}

/// A client-supplied predicate on one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterClause {
    /// Target question id.
    pub id: String,
    pub condition: Condition,
    /// Number or string.
    pub value: Value,
}

/// Page window over the filtered submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Page size, always at least 1.
    pub limit: usize,
    pub offset: usize,
}

/// Response envelope of the filtered endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    pub responses: Vec<Submission>,
    /// Number of submissions on this page.
    pub total_responses: usize,
    /// `ceil(filtered / limit)`.
    pub page_count: usize,
}

/// Errors raised while evaluating filter clauses.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    /// Exactly one side of an ordering comparison could be coerced.
    #[error("Invalid filter type for question '{question_id}': cannot compare {answer} with {filter}")]
    TypeMismatch {
        question_id: String,
        answer: Value,
        filter: Value,
    },
}
