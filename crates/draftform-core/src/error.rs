use crate::collection::SlotFieldError;
use derive_more::Deref;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};
use thiserror::Error as ThisError;

///
/// FieldErrorKind
///
/// Classification of a per-field validation failure.
/// `Required` always wins when a required field is empty; the other kinds
/// come from option membership and attached validators.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum FieldErrorKind {
    LengthMismatch,
    PatternMismatch,
    Required,
}

impl fmt::Display for FieldErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::LengthMismatch => "length_mismatch",
            Self::PatternMismatch => "pattern_mismatch",
            Self::Required => "required",
        };
        write!(f, "{label}")
    }
}

///
/// FieldIssue
///
/// One validation failure for one field, with a host-displayable message.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FieldIssue {
    pub kind: FieldErrorKind,
    pub message: String,
}

impl FieldIssue {
    #[must_use]
    pub fn new(kind: FieldErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn required(message: impl Into<String>) -> Self {
        Self::new(FieldErrorKind::Required, message)
    }

    #[must_use]
    pub fn pattern(message: impl Into<String>) -> Self {
        Self::new(FieldErrorKind::PatternMismatch, message)
    }

    #[must_use]
    pub fn length(message: impl Into<String>) -> Self {
        Self::new(FieldErrorKind::LengthMismatch, message)
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

///
/// IssueMap
///
/// Deterministic key-ordered map of issue keys to field issues.
/// Plain field keys address top-level fields; slot issues use the composed
/// `{section}.{slot_id}.{part}` key form.
///

#[derive(Clone, Debug, Default, Deref, Deserialize, Eq, PartialEq, Serialize)]
pub struct IssueMap(BTreeMap<String, FieldIssue>);

impl IssueMap {
    /// Create an empty issue map.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Insert or replace the issue for `key`.
    pub fn insert(&mut self, key: impl Into<String>, issue: FieldIssue) -> Option<FieldIssue> {
        self.0.insert(key.into(), issue)
    }

    /// The failure kind recorded for `key`, if any.
    #[must_use]
    pub fn kind_of(&self, key: &str) -> Option<FieldErrorKind> {
        self.0.get(key).map(|issue| issue.kind)
    }
}

impl IntoIterator for IssueMap {
    type Item = (String, FieldIssue);
    type IntoIter = std::collections::btree_map::IntoIter<String, FieldIssue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a IssueMap {
    type Item = (&'a String, &'a FieldIssue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, FieldIssue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for IssueMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&str> = self.0.keys().map(String::as_str).collect();
        write!(f, "{} issue(s): {}", self.0.len(), keys.join(", "))
    }
}

///
/// SessionError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum SessionError {
    /// A write was attempted while the session is not in an editing state.
    #[error("edit is not active: {key}")]
    EditLocked { key: String },

    /// The field exists but is declared immutable by the schema.
    #[error("field is immutable: {key}")]
    FieldImmutable { key: String },

    /// The schema declares no slot section.
    #[error("schema has no slot section")]
    NoSlotSection,

    /// Reset applies only to sessions opened for a new record.
    #[error("session is not editing a new record")]
    NotNew,

    /// The session was closed and accepts no further operations.
    #[error("session is closed")]
    SessionClosed,

    #[error(transparent)]
    SlotField(#[from] SlotFieldError),

    /// The key does not name a schema field.
    #[error("unknown field: {key}")]
    UnknownField { key: String },

    /// Commit was rejected; the draft is retained for correction.
    #[error("validation failed: {issues}")]
    ValidationFailed { issues: IssueMap },
}

///
/// TESTS
///
