use crate::{
    types::{EntityId, now_millis},
    value::{Value, ValueMap},
};
use std::{fmt, str::FromStr};
use thiserror::Error as ThisError;

///
/// SlotFieldError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SlotFieldError {
    #[error("unknown day: '{value}'")]
    UnknownDay { value: String },
}

///
/// Weekday
///
/// Days in week order, rendered and parsed by their full English names,
/// which is how slot entries store them.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub const ALL: [Self; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sunday => "Sunday",
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
        }
    }

    /// Parse a full day name; returns `None` for anything else.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|day| day.label() == value)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Weekday {
    type Err = SlotFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| SlotFieldError::UnknownDay {
            value: s.to_owned(),
        })
    }
}

///
/// SlotId
///
/// Stable identity of one schedule slot, of the form `{owner}_{millis}`.
/// The id survives edits so issue keys and removals stay addressable.
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SlotId(String);

impl SlotId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

///
/// SlotField
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SlotField {
    Day,
    Time,
}

impl fmt::Display for SlotField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Day => "day",
            Self::Time => "time",
        };
        write!(f, "{label}")
    }
}

///
/// ScheduleSlot
///
/// One availability entry: a day of week plus a time range label drawn from
/// the section's offered options.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScheduleSlot {
    pub id: SlotId,
    pub day: Option<Weekday>,
    pub time: String,
}

impl ScheduleSlot {
    /// A slot is complete when both day and time are filled in.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.day.is_some() && !self.time.trim().is_empty()
    }

    /// Record projection: `{ id, day, time }` with an empty day for `None`.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut map = ValueMap::new();
        map.insert("id", Value::Text(self.id.as_str().to_owned()));
        map.insert(
            "day",
            Value::Text(self.day.map_or("", Weekday::label).to_owned()),
        );
        map.insert("time", Value::Text(self.time.clone()));

        Value::Map(map)
    }
}

///
/// SlotIdGenerator
///
/// Wall-clock slot ids with a monotonic bump, so two adds inside the same
/// millisecond still get distinct ids.
///

#[derive(Clone, Debug, Default)]
struct SlotIdGenerator {
    last_millis: u64,
}

impl SlotIdGenerator {
    fn next(&mut self, owner: &EntityId) -> SlotId {
        let now = now_millis();
        let millis = if now <= self.last_millis {
            self.last_millis + 1
        } else {
            now
        };
        self.last_millis = millis;

        SlotId::new(format!("{owner}_{millis}"))
    }
}

///
/// SlotEditor
///
/// Ordered, identity-keyed editor for a record's slot list. All operations
/// address slots by id; unknown ids are ignored rather than failed, since a
/// stale id only means the row is already gone.
///

#[derive(Clone, Debug)]
pub struct SlotEditor {
    owner: EntityId,
    slots: Vec<ScheduleSlot>,
    generator: SlotIdGenerator,
}

impl SlotEditor {
    #[must_use]
    pub fn new(owner: EntityId) -> Self {
        Self {
            owner,
            slots: Vec::new(),
            generator: SlotIdGenerator::default(),
        }
    }

    /// Re-key generated ids to a new owning entity.
    pub fn set_owner(&mut self, owner: EntityId) {
        self.owner = owner;
    }

    /// Replace the slot list from a record value, tolerating malformed
    /// entries: non-map items are skipped, missing ids are regenerated,
    /// and unknown day names load as unset.
    pub fn load(&mut self, value: Option<&Value>) {
        self.slots.clear();

        let Some(Value::List(items)) = value else {
            return;
        };

        for item in items {
            let Value::Map(map) = item else {
                continue;
            };

            let id = match map.get("id").and_then(Value::as_text) {
                Some(id) if !id.is_empty() => SlotId::new(id),
                _ => self.generator.next(&self.owner),
            };
            let day = map
                .get("day")
                .and_then(Value::as_text)
                .and_then(Weekday::parse);
            let time = map
                .get("time")
                .and_then(Value::as_text)
                .unwrap_or_default()
                .to_owned();

            self.slots.push(ScheduleSlot { id, day, time });
        }
    }

    /// Append an empty slot and return its generated id.
    pub fn add(&mut self) -> SlotId {
        let id = self.generator.next(&self.owner);
        self.slots.push(ScheduleSlot {
            id: id.clone(),
            day: None,
            time: String::new(),
        });

        id
    }

    /// Update one part of the slot with the given id.
    /// Unknown ids are a no-op; an unknown day name is an error.
    pub fn update(
        &mut self,
        id: &SlotId,
        field: SlotField,
        value: &str,
    ) -> Result<(), SlotFieldError> {
        let Some(slot) = self.slots.iter_mut().find(|slot| slot.id == *id) else {
            return Ok(());
        };

        match field {
            SlotField::Day => slot.day = parse_day(value)?,
            SlotField::Time => slot.time = value.to_owned(),
        }

        Ok(())
    }

    /// Remove the slot with the given id; returns whether a slot was removed.
    pub fn remove(&mut self, id: &SlotId) -> bool {
        let before = self.slots.len();
        self.slots.retain(|slot| slot.id != *id);

        self.slots.len() != before
    }

    /// Drop every incomplete slot.
    pub fn retain_complete(&mut self) {
        self.slots.retain(ScheduleSlot::is_complete);
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    #[must_use]
    pub fn slots(&self) -> &[ScheduleSlot] {
        &self.slots
    }

    #[must_use]
    pub fn get(&self, id: &SlotId) -> Option<&ScheduleSlot> {
        self.slots.iter().find(|slot| slot.id == *id)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Record projection of the current slot list.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::List(self.slots.iter().map(ScheduleSlot::to_value).collect())
    }
}

fn parse_day(value: &str) -> Result<Option<Weekday>, SlotFieldError> {
    if value.is_empty() {
        return Ok(None);
    }

    Weekday::parse(value)
        .map(Some)
        .ok_or_else(|| SlotFieldError::UnknownDay {
            value: value.to_owned(),
        })
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn editor() -> SlotEditor {
        SlotEditor::new(EntityId::new("DOC_X7K9P2M5N3L8Q4R"))
    }

    #[test]
    fn test_add_generates_owner_prefixed_ids() {
        let mut editor = editor();
        let id = editor.add();

        assert!(id.as_str().starts_with("DOC_X7K9P2M5N3L8Q4R_"));
        assert_eq!(editor.len(), 1);
        assert_eq!(editor.get(&id).unwrap().day, None);
    }

    #[test]
    fn test_rapid_adds_stay_distinct() {
        let mut editor = editor();
        let ids: BTreeSet<SlotId> = (0..64).map(|_| editor.add()).collect();

        assert_eq!(ids.len(), 64);
    }

    #[test]
    fn test_update_day_and_time() {
        let mut editor = editor();
        let id = editor.add();

        editor.update(&id, SlotField::Day, "Monday").unwrap();
        editor
            .update(&id, SlotField::Time, "09:00 AM - 05:00 PM")
            .unwrap();

        let slot = editor.get(&id).unwrap();
        assert_eq!(slot.day, Some(Weekday::Monday));
        assert_eq!(slot.time, "09:00 AM - 05:00 PM");
        assert!(slot.is_complete());
    }

    #[test]
    fn test_update_clears_day_on_empty() {
        let mut editor = editor();
        let id = editor.add();
        editor.update(&id, SlotField::Day, "Friday").unwrap();

        editor.update(&id, SlotField::Day, "").unwrap();
        assert_eq!(editor.get(&id).unwrap().day, None);
    }

    #[test]
    fn test_update_rejects_unknown_day() {
        let mut editor = editor();
        let id = editor.add();

        let err = editor.update(&id, SlotField::Day, "Caturday").unwrap_err();
        assert_eq!(
            err,
            SlotFieldError::UnknownDay {
                value: "Caturday".to_owned()
            }
        );
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut editor = editor();
        editor.add();

        let ghost = SlotId::new("DOC_X_0");
        editor.update(&ghost, SlotField::Time, "whenever").unwrap();
        assert!(editor.slots().iter().all(|slot| slot.time.is_empty()));
    }

    #[test]
    fn test_remove_is_noop_for_unknown_id() {
        let mut editor = editor();
        let id = editor.add();

        assert!(!editor.remove(&SlotId::new("DOC_X_0")));
        assert_eq!(editor.len(), 1);
        assert!(editor.remove(&id));
        assert!(editor.is_empty());
    }

    #[test]
    fn test_retain_complete() {
        let mut editor = editor();
        let keep = editor.add();
        editor.update(&keep, SlotField::Day, "Monday").unwrap();
        editor
            .update(&keep, SlotField::Time, "09:00 AM - 05:00 PM")
            .unwrap();
        editor.add();

        editor.retain_complete();
        assert_eq!(editor.len(), 1);
        assert_eq!(editor.slots()[0].id, keep);
    }

    #[test]
    fn test_load_preserves_existing_ids() {
        let value: Value = serde_json::from_str(
            r#"[
                { "id": "DOC_A_1731400517773", "day": "Monday", "time": "09:00 AM - 05:00 PM" },
                { "id": "DOC_A_1731400517774", "day": "Wednesday", "time": "10:00 AM - 06:00 PM" }
            ]"#,
        )
        .unwrap();

        let mut editor = editor();
        editor.load(Some(&value));

        assert_eq!(editor.len(), 2);
        assert_eq!(editor.slots()[0].id.as_str(), "DOC_A_1731400517773");
        assert_eq!(editor.slots()[1].day, Some(Weekday::Wednesday));
    }

    #[test]
    fn test_load_tolerates_malformed_entries() {
        let value: Value = serde_json::from_str(
            r#"[
                "not a slot",
                { "day": "Funday", "time": "later" },
                { "id": "", "day": "Friday", "time": "09:00 AM - 04:00 PM" }
            ]"#,
        )
        .unwrap();

        let mut editor = editor();
        editor.load(Some(&value));

        assert_eq!(editor.len(), 2);
        assert_eq!(editor.slots()[0].day, None);
        assert_eq!(editor.slots()[1].day, Some(Weekday::Friday));
        assert!(
            editor
                .slots()
                .iter()
                .all(|slot| slot.id.as_str().starts_with("DOC_X7K9P2M5N3L8Q4R_"))
        );
    }

    #[test]
    fn test_load_absent_value_clears() {
        let mut editor = editor();
        editor.add();

        editor.load(None);
        assert!(editor.is_empty());
    }

    #[test]
    fn test_to_value_round_trip() {
        let mut source = editor();
        let id = source.add();
        source.update(&id, SlotField::Day, "Tuesday").unwrap();
        source
            .update(&id, SlotField::Time, "08:00 AM - 04:00 PM")
            .unwrap();

        let value = source.to_value();
        let mut reloaded = editor();
        reloaded.load(Some(&value));

        assert_eq!(reloaded.slots(), source.slots());
    }

    #[test]
    fn test_weekday_labels() {
        assert_eq!(Weekday::parse("Sunday"), Some(Weekday::Sunday));
        assert_eq!(Weekday::parse("sunday"), None);
        assert_eq!("Saturday".parse::<Weekday>(), Ok(Weekday::Saturday));
        assert_eq!(Weekday::ALL.len(), 7);
    }
}
