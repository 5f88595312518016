use crate::{
    error::FieldIssue,
    record::RecordPath,
    traits::{Sanitizer, Validator},
};
use std::{fmt, sync::Arc};

///
/// FieldKind
///
/// Widget-facing classification of a field. The kind selects the control a
/// host renders; validation rules come from the spec's flags and validator.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[remain::sorted]
pub enum FieldKind {
    Date,
    Email,
    Select,
    Tel,
    Text,
}

impl FieldKind {
    #[must_use]
    pub const fn is_select(self) -> bool {
        matches!(self, Self::Select)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Date => "date",
            Self::Email => "email",
            Self::Select => "select",
            Self::Tel => "tel",
            Self::Text => "text",
        };
        write!(f, "{label}")
    }
}

///
/// FieldSpec
///
/// Declaration of one form field: identity, widget kind, record binding,
/// and the rules applied at validation time. The key is the draft and issue
/// identifier; the path addresses the backing record and defaults to the key.
///

#[derive(Clone)]
pub struct FieldSpec {
    key: String,
    label: String,
    kind: FieldKind,
    required: bool,
    locked: bool,
    path: RecordPath,
    options: Vec<String>,
    validator: Option<Arc<dyn Validator<str>>>,
    sanitizers: Vec<Arc<dyn Sanitizer<String>>>,
}

impl FieldSpec {
    #[must_use]
    pub fn new(key: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        let key = key.into();
        let path = RecordPath::from(key.clone());

        Self {
            key,
            label: label.into(),
            kind,
            required: false,
            locked: false,
            path,
            options: Vec::new(),
            validator: None,
            sanitizers: Vec::new(),
        }
    }

    #[must_use]
    pub fn text(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::Text)
    }

    #[must_use]
    pub fn email(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::Email)
    }

    #[must_use]
    pub fn tel(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::Tel)
    }

    #[must_use]
    pub fn date(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::Date)
    }

    #[must_use]
    pub fn select(
        key: impl Into<String>,
        label: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let mut spec = Self::new(key, label, FieldKind::Select);
        spec.options = options.into_iter().map(Into::into).collect();

        spec
    }

    /// Mark the field as required; empty values fail validation.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark the field as immutable; `set_field` rejects writes to it.
    #[must_use]
    pub const fn locked(mut self) -> Self {
        self.locked = true;
        self
    }

    /// Bind the field to a record path other than its key.
    #[must_use]
    pub fn at(mut self, path: impl Into<RecordPath>) -> Self {
        self.path = path.into();
        self
    }

    /// Attach the validation rule run after required and membership checks.
    #[must_use]
    pub fn with_validator<V>(mut self, validator: V) -> Self
    where
        V: Validator<str> + 'static,
    {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Append a sanitizer; sanitizers run in attachment order.
    #[must_use]
    pub fn with_sanitizer<S>(mut self, sanitizer: S) -> Self
    where
        S: Sanitizer<String> + 'static,
    {
        self.sanitizers.push(Arc::new(sanitizer));
        self
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    #[must_use]
    pub const fn path(&self) -> &RecordPath {
        &self.path
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub(crate) fn run_sanitizers(&self, value: &mut String) {
        for sanitizer in &self.sanitizers {
            sanitizer.sanitize(value);
        }
    }

    pub(crate) fn run_validator(&self, value: &str) -> Result<(), FieldIssue> {
        match &self.validator {
            Some(validator) => validator.validate(value),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("required", &self.required)
            .field("locked", &self.locked)
            .field("path", &self.path)
            .field("options", &self.options)
            .field("validator", &self.validator.is_some())
            .field("sanitizers", &self.sanitizers.len())
            .finish()
    }
}

///
/// TESTS
///
