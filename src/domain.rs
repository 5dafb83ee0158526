//! Domain models used by the backend: questions and their embedded test cases.
//!
//! Every field except `id` is optional and may be null. A field is stored and
//! returned exactly as posted: absent stays absent, `null` stays `null`.

use serde::{Deserialize, Deserializer, Serialize};

/// Outer `None`: field absent. `Some(None)`: field sent as `null`.
pub type Field<T> = Option<Option<T>>;

/// Keeps an explicit `null` apart from a missing field (plain `Option` folds both into `None`).
fn present<'de, T, D>(d: D) -> Result<Field<T>, D::Error>
where
  T: Deserialize<'de>,
  D: Deserializer<'de>,
{
  Option::<T>::deserialize(d).map(Some)
}

/// An input / expected-output pair. Owned by its question, no own lifecycle.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
  #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
  pub input: Field<String>,
  #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
  pub expected_output: Field<String>,
  /// Hidden cases are not meant to be shown to end users. Stored verbatim.
  #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
  pub is_hidden: Field<bool>,
}

/// Question payload before it has been persisted (no id yet).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuestion {
  #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
  pub title: Field<String>,
  #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
  pub description: Field<String>,
  #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
  pub difficulty: Field<String>, // free-form (e.g., "Easy", "hard", "2/5")
  #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
  pub test_cases: Field<Vec<TestCase>>,
}

/// A persisted question. `id` is assigned once on insert and never changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
  pub id: String,
  #[serde(flatten)]
  pub body: NewQuestion,
}

impl NewQuestion {
  /// Attach an id, turning the payload into a stored document.
  pub fn with_id(self, id: impl Into<String>) -> Question {
    Question { id: id.into(), body: self }
  }

  /// Number of test cases; absent or null counts as none.
  pub fn test_case_count(&self) -> usize {
    self.test_cases.as_ref().and_then(Option::as_ref).map_or(0, Vec::len)
  }
}
