use crate::value::{Value, ValueMap};
use derive_more::Deref;
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// RecordPath
///
/// Dot-separated path into a nested record, e.g. `contactInfo.email`.
/// Paths address the backing record shape; they are distinct from the
/// snake_case field keys a schema uses for drafts and issues.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordPath(String);

impl RecordPath {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate the path segments in order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }
}

impl From<&str> for RecordPath {
    fn from(path: &str) -> Self {
        Self(path.to_owned())
    }
}

impl From<String> for RecordPath {
    fn from(path: String) -> Self {
        Self(path)
    }
}

impl fmt::Display for RecordPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

///
/// Record
///
/// A nested entity record, as loaded from a backing store.
/// Sessions read fields out of a record at populate time and write the
/// committed draft back through the same paths.
///

#[derive(Clone, Debug, Default, Deref, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record(ValueMap);

impl Record {
    /// Create an empty record.
    #[must_use]
    pub const fn new() -> Self {
        Self(ValueMap::new())
    }

    /// Resolve `path` against the record, descending through nested maps.
    #[must_use]
    pub fn get(&self, path: &RecordPath) -> Option<&Value> {
        let mut segments = path.segments();
        let mut value = self.0.get(segments.next()?)?;
        for segment in segments {
            value = value.as_map()?.get(segment)?;
        }

        Some(value)
    }

    /// Convenience text accessor for `path`.
    #[must_use]
    pub fn text(&self, path: &RecordPath) -> Option<&str> {
        self.get(path)?.as_text()
    }

    /// Write `value` at `path`, creating intermediate maps as needed.
    /// A non-map value standing in the way is replaced by a map.
    pub fn set(&mut self, path: &RecordPath, value: Value) {
        let segments: Vec<&str> = path.segments().collect();
        set_in(&mut self.0, &segments, value);
    }

    /// The record's `id` field, when present as text.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.0.get("id")?.as_text()
    }
}

impl From<ValueMap> for Record {
    fn from(map: ValueMap) -> Self {
        Self(map)
    }
}

fn set_in(map: &mut ValueMap, segments: &[&str], value: Value) {
    let Some((head, rest)) = segments.split_first() else {
        return;
    };

    if rest.is_empty() {
        map.insert(*head, value);
        return;
    }

    if !matches!(map.get(head), Some(Value::Map(_))) {
        map.insert(*head, Value::Map(ValueMap::new()));
    }
    if let Some(Value::Map(inner)) = map.get_mut(head) {
        set_in(inner, rest, value);
    }
}

///
/// TESTS
///
