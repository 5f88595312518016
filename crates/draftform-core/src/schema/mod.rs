mod field;

pub use field::{FieldKind, FieldSpec};

use crate::{record::RecordPath, types::EntityTag};
use convert_case::{Case, Casing};
use std::collections::BTreeSet;
use thiserror::Error as ThisError;

///
/// SchemaError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum SchemaError {
    #[error("duplicate field key: {key}")]
    DuplicateFieldKey { key: String },

    /// Field keys must be non-empty snake_case identifiers.
    #[error("invalid field key: '{key}'")]
    InvalidFieldKey { key: String },

    #[error("select field has no options: {key}")]
    MissingSelectOptions { key: String },

    #[error("slot section has no time options: {path}")]
    MissingSlotOptions { path: String },

    #[error("schema declares no fields")]
    NoFields,
}

///
/// SlotSectionSpec
///
/// Declaration of a repeating day/time slot section, bound to one record
/// path holding a list of slot entries.
///

#[derive(Clone, Debug)]
pub struct SlotSectionSpec {
    path: RecordPath,
    day_label: String,
    time_label: String,
    time_options: Vec<String>,
}

impl SlotSectionSpec {
    #[must_use]
    pub fn new(
        path: impl Into<RecordPath>,
        time_options: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            path: path.into(),
            day_label: "Day".to_owned(),
            time_label: "Time".to_owned(),
            time_options: time_options.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn with_labels(mut self, day: impl Into<String>, time: impl Into<String>) -> Self {
        self.day_label = day.into();
        self.time_label = time.into();
        self
    }

    #[must_use]
    pub const fn path(&self) -> &RecordPath {
        &self.path
    }

    #[must_use]
    pub fn day_label(&self) -> &str {
        &self.day_label
    }

    #[must_use]
    pub fn time_label(&self) -> &str {
        &self.time_label
    }

    #[must_use]
    pub fn time_options(&self) -> &[String] {
        &self.time_options
    }

    /// Returns `true` if `value` is one of the offered time options.
    #[must_use]
    pub fn allows_time(&self, value: &str) -> bool {
        self.time_options.iter().any(|option| option == value)
    }
}

///
/// FormSchema
///
/// Validated, immutable description of one profile form: its entity tag,
/// field specs in display order, and an optional slot section.
///

#[derive(Clone, Debug)]
pub struct FormSchema {
    name: String,
    tag: EntityTag,
    fields: Vec<FieldSpec>,
    slots: Option<SlotSectionSpec>,
}

impl FormSchema {
    #[must_use]
    pub fn builder(name: impl Into<String>, tag: EntityTag) -> FormSchemaBuilder {
        FormSchemaBuilder {
            name: name.into(),
            tag,
            fields: Vec::new(),
            slots: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn tag(&self) -> EntityTag {
        self.tag
    }

    /// Field specs in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Look up a field spec by key.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.key() == key)
    }

    #[must_use]
    pub const fn slots(&self) -> Option<&SlotSectionSpec> {
        self.slots.as_ref()
    }
}

///
/// FormSchemaBuilder
///

#[derive(Debug)]
pub struct FormSchemaBuilder {
    name: String,
    tag: EntityTag,
    fields: Vec<FieldSpec>,
    slots: Option<SlotSectionSpec>,
}

impl FormSchemaBuilder {
    #[must_use]
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    #[must_use]
    pub fn slots(mut self, section: SlotSectionSpec) -> Self {
        self.slots = Some(section);
        self
    }

    pub fn build(self) -> Result<FormSchema, SchemaError> {
        if self.fields.is_empty() {
            return Err(SchemaError::NoFields);
        }

        let mut seen = BTreeSet::new();
        for spec in &self.fields {
            let key = spec.key();
            if key.is_empty() || !key.is_case(Case::Snake) {
                return Err(SchemaError::InvalidFieldKey {
                    key: key.to_owned(),
                });
            }
            if !seen.insert(key) {
                return Err(SchemaError::DuplicateFieldKey {
                    key: key.to_owned(),
                });
            }
            if spec.kind().is_select() && spec.options().is_empty() {
                return Err(SchemaError::MissingSelectOptions {
                    key: key.to_owned(),
                });
            }
        }

        if let Some(section) = &self.slots {
            if section.time_options().is_empty() {
                return Err(SchemaError::MissingSlotOptions {
                    path: section.path().to_string(),
                });
            }
        }

        Ok(FormSchema {
            name: self.name,
            tag: self.tag,
            fields: self.fields,
            slots: self.slots,
        })
    }
}

///
/// TESTS
///
