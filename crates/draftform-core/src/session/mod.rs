#[cfg(test)]
mod tests;

use crate::{
    collection::{SlotEditor, SlotField, SlotId},
    error::{IssueMap, SessionError},
    policy::SessionPolicy,
    record::{Record, RecordPath},
    schema::FormSchema,
    trace::{self, SessionTraceEvent, SessionTraceSink},
    types::EntityId,
    validate,
    value::Value,
};
use std::{collections::BTreeMap, fmt, sync::Arc};

///
/// SessionState
///
/// The per-session state machine. `New` is an editing state with no source
/// record to revert to; `Closed` accepts no further operations.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[remain::sorted]
pub enum SessionState {
    Closed,
    Editing,
    New,
    Viewing,
}

impl SessionState {
    #[must_use]
    pub const fn is_editing(self) -> bool {
        matches!(self, Self::Editing | Self::New)
    }

    #[must_use]
    pub const fn is_new(self) -> bool {
        matches!(self, Self::New)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Closed => "closed",
            Self::Editing => "editing",
            Self::New => "new",
            Self::Viewing => "viewing",
        };
        write!(f, "{label}")
    }
}

///
/// CancelOutcome
///
/// What a cancel did: `Reverted` put the session back into view mode;
/// `Closed` means there was nothing to revert to and the host should
/// dismiss the form.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[remain::sorted]
pub enum CancelOutcome {
    Closed,
    Reverted,
}

///
/// AttachmentRef
///
/// Opaque handle to a locally picked file, held only for preview. The
/// session releases it on close and whenever the record is re-populated.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AttachmentRef(String);

impl AttachmentRef {
    #[must_use]
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

///
/// EditSession
///
/// Coordinates one record's edit workflow: draft state, the view/edit state
/// machine, slot editing, and the sanitize-then-validate commit pipeline.
/// Whenever the session is not editing, the draft equals the last populated
/// or committed snapshot.
///

pub struct EditSession {
    schema: Arc<FormSchema>,
    policy: SessionPolicy,
    source: Record,
    draft: BTreeMap<String, String>,
    slots: SlotEditor,
    state: SessionState,
    last_issues: Option<IssueMap>,
    attachment: Option<AttachmentRef>,
    trace: Option<&'static dyn SessionTraceSink>,
}

impl EditSession {
    /// Open a session over an existing record, starting in view mode.
    #[must_use]
    pub fn open(schema: Arc<FormSchema>, record: Record) -> Self {
        let owner = record
            .id()
            .map_or_else(|| EntityId::generate(schema.tag()), EntityId::new);

        let mut session = Self {
            slots: SlotEditor::new(owner),
            schema,
            policy: SessionPolicy::default(),
            source: Record::new(),
            draft: BTreeMap::new(),
            state: SessionState::Viewing,
            last_issues: None,
            attachment: None,
            trace: None,
        };
        session.populate(record);

        session
    }

    /// Open a session for a record that does not exist yet. A fresh entity
    /// id is generated and every schema field starts empty.
    #[must_use]
    pub fn open_new(schema: Arc<FormSchema>) -> Self {
        let id = EntityId::generate(schema.tag());
        let mut source = Record::new();
        source.set(&RecordPath::from("id"), Value::Text(id.to_string()));

        let draft = empty_draft(&schema);
        let session = Self {
            slots: SlotEditor::new(id),
            schema,
            policy: SessionPolicy::default(),
            source,
            state: SessionState::New,
            last_issues: None,
            attachment: None,
            trace: None,
            draft,
        };
        trace::emit(
            session.trace,
            SessionTraceEvent::Populated {
                fields: session.draft.len(),
            },
        );

        session
    }

    #[must_use]
    pub const fn with_policy(mut self, policy: SessionPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub const fn with_trace(mut self, sink: &'static dyn SessionTraceSink) -> Self {
        self.trace = Some(sink);
        self
    }

    //
    // accessors
    //

    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.state.is_editing()
    }

    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.state.is_new()
    }

    #[must_use]
    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    #[must_use]
    pub const fn policy(&self) -> SessionPolicy {
        self.policy
    }

    #[must_use]
    pub const fn source(&self) -> &Record {
        &self.source
    }

    /// The current draft value for `key`; empty for unknown keys.
    #[must_use]
    pub fn field_value(&self, key: &str) -> &str {
        self.draft.get(key).map_or("", String::as_str)
    }

    #[must_use]
    pub const fn slots(&self) -> &SlotEditor {
        &self.slots
    }

    /// Issues recorded by the most recent rejected commit, if any.
    #[must_use]
    pub const fn last_issues(&self) -> Option<&IssueMap> {
        self.last_issues.as_ref()
    }

    #[must_use]
    pub const fn attachment(&self) -> Option<&AttachmentRef> {
        self.attachment.as_ref()
    }

    //
    // lifecycle
    //

    /// Replace the draft wholesale from `record`, field by schema field.
    /// Clears recorded issues and any pending attachment; idempotent for
    /// the same record. A closed session ignores the call.
    pub fn populate(&mut self, record: Record) {
        if self.state == SessionState::Closed {
            return;
        }

        self.attachment = None;
        self.last_issues = None;

        if let Some(id) = record.id() {
            self.slots.set_owner(EntityId::new(id));
        }
        match self.schema.slots() {
            Some(section) => self.slots.load(record.get(section.path())),
            None => self.slots.clear(),
        }

        self.draft = seed_draft(&self.schema, &record);
        self.source = record;
        if self.state != SessionState::New {
            self.state = SessionState::Viewing;
        }

        trace::emit(
            self.trace,
            SessionTraceEvent::Populated {
                fields: self.draft.len(),
            },
        );
    }

    /// Re-populate iff `record` differs from the current source.
    /// Returns whether a populate happened.
    pub fn sync_record(&mut self, record: &Record) -> bool {
        if self.state == SessionState::Closed || *record == self.source {
            return false;
        }

        self.populate(record.clone());

        true
    }

    /// Enter edit mode; a no-op when already editing.
    pub fn enter_edit(&mut self) -> Result<(), SessionError> {
        self.ensure_open()?;
        if self.state == SessionState::Viewing {
            self.state = SessionState::Editing;
            trace::emit(self.trace, SessionTraceEvent::EditEntered);
        }

        Ok(())
    }

    /// Discard draft mutations. Editing sessions revert to the populated
    /// snapshot; new sessions close, since there is no record to revert to.
    pub fn cancel_edit(&mut self) -> CancelOutcome {
        let outcome = match self.state {
            SessionState::Closed => return CancelOutcome::Closed,
            SessionState::New => {
                self.close();
                CancelOutcome::Closed
            }
            SessionState::Editing => {
                let source = self.source.clone();
                self.populate(source);
                CancelOutcome::Reverted
            }
            SessionState::Viewing => CancelOutcome::Reverted,
        };
        trace::emit(self.trace, SessionTraceEvent::Cancelled { outcome });

        outcome
    }

    /// Re-seed a new session back to empty defaults (the Reset button).
    pub fn reset_new(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::New {
            return Err(SessionError::NotNew);
        }

        self.draft = empty_draft(&self.schema);
        self.slots.clear();
        self.last_issues = None;
        self.attachment = None;
        trace::emit(
            self.trace,
            SessionTraceEvent::Populated {
                fields: self.draft.len(),
            },
        );

        Ok(())
    }

    /// Close the session; every later operation is rejected.
    pub fn close(&mut self) {
        if self.state == SessionState::Closed {
            return;
        }

        self.attachment = None;
        self.state = SessionState::Closed;
        trace::emit(self.trace, SessionTraceEvent::Closed);
    }

    //
    // draft mutation
    //

    /// Write one draft field. Rejected while not editing, for keys outside
    /// the schema, and for fields the schema declares immutable.
    pub fn set_field(&mut self, key: &str, value: impl Into<String>) -> Result<(), SessionError> {
        self.ensure_editing(key)?;

        let spec = self
            .schema
            .field(key)
            .ok_or_else(|| SessionError::UnknownField {
                key: key.to_owned(),
            })?;
        if spec.is_locked() {
            return Err(SessionError::FieldImmutable {
                key: key.to_owned(),
            });
        }

        self.draft.insert(key.to_owned(), value.into());
        trace::emit(
            self.trace,
            SessionTraceEvent::FieldChanged {
                key: key.to_owned(),
            },
        );

        Ok(())
    }

    /// Keep a preview handle for a locally picked file.
    pub fn attach_preview(&mut self, attachment: AttachmentRef) -> Result<(), SessionError> {
        self.ensure_editing("attachment")?;
        self.attachment = Some(attachment);

        Ok(())
    }

    //
    // slot mutation
    //

    /// Append an empty availability slot and return its id.
    pub fn add_slot(&mut self) -> Result<SlotId, SessionError> {
        self.ensure_slot_edit()?;

        let id = self.slots.add();
        trace::emit(self.trace, SessionTraceEvent::SlotAdded { id: id.clone() });

        Ok(id)
    }

    /// Update one part of one slot; unknown ids are tolerated as no-ops.
    pub fn update_slot(
        &mut self,
        id: &SlotId,
        field: SlotField,
        value: &str,
    ) -> Result<(), SessionError> {
        self.ensure_slot_edit()?;
        self.slots.update(id, field, value)?;

        Ok(())
    }

    /// Remove the slot with the given id; returns whether one was removed.
    pub fn remove_slot(&mut self, id: &SlotId) -> Result<bool, SessionError> {
        self.ensure_slot_edit()?;

        let removed = self.slots.remove(id);
        if removed {
            trace::emit(
                self.trace,
                SessionTraceEvent::SlotRemoved { id: id.clone() },
            );
        }

        Ok(removed)
    }

    //
    // validation and commit
    //

    /// Run the full validation pass over the sanitized working copy of the
    /// draft. Pure: records nothing, mutates nothing.
    #[must_use]
    pub fn validate_all(&self) -> IssueMap {
        let working = validate::sanitize_draft(&self.schema, &self.draft);
        let mut issues = validate::validate_fields(&self.schema, &working);
        if let Some(section) = self.schema.slots() {
            validate::validate_slots(section, self.slots.slots(), self.policy.slots, &mut issues);
        }

        issues
    }

    /// Finalize the draft into a record.
    ///
    /// In view mode this is a no-op returning the committed snapshot. While
    /// editing, the draft is sanitized and validated in full; on issues the
    /// commit is rejected with `ValidationFailed`, the issues are recorded
    /// for the view, and draft and state stay untouched.
    pub fn commit(&mut self) -> Result<Record, SessionError> {
        self.ensure_open()?;
        if self.state == SessionState::Viewing {
            return Ok(self.source.clone());
        }

        let working = validate::sanitize_draft(&self.schema, &self.draft);
        let mut issues = validate::validate_fields(&self.schema, &working);
        if let Some(section) = self.schema.slots() {
            validate::validate_slots(section, self.slots.slots(), self.policy.slots, &mut issues);
        }
        if !issues.is_empty() {
            self.last_issues = Some(issues.clone());
            trace::emit(
                self.trace,
                SessionTraceEvent::CommitRejected {
                    issues: issues.len(),
                },
            );

            return Err(SessionError::ValidationFailed { issues });
        }

        if !self.policy.slots.is_blocking() {
            self.slots.retain_complete();
        }

        let mut finalized = self.source.clone();
        for spec in self.schema.fields() {
            let value = working.get(spec.key()).cloned().unwrap_or_default();
            finalized.set(spec.path(), Value::Text(value));
        }
        if let Some(section) = self.schema.slots() {
            finalized.set(section.path(), self.slots.to_value());
        }

        self.draft = working;
        self.source = finalized.clone();
        self.state = SessionState::Viewing;
        self.last_issues = None;
        trace::emit(
            self.trace,
            SessionTraceEvent::CommitAccepted {
                fields: self.draft.len(),
            },
        );

        Ok(finalized)
    }

    //
    // guards
    //

    const fn ensure_open(&self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Closed => Err(SessionError::SessionClosed),
            _ => Ok(()),
        }
    }

    fn ensure_editing(&self, key: &str) -> Result<(), SessionError> {
        self.ensure_open()?;
        if !self.state.is_editing() {
            return Err(SessionError::EditLocked {
                key: key.to_owned(),
            });
        }

        Ok(())
    }

    fn ensure_slot_edit(&self) -> Result<(), SessionError> {
        let section = self.schema.slots().ok_or(SessionError::NoSlotSection)?;
        self.ensure_editing(section.path().as_str())
    }
}

impl fmt::Debug for EditSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditSession")
            .field("schema", &self.schema.name())
            .field("state", &self.state)
            .field("fields", &self.draft.len())
            .field("slots", &self.slots.len())
            .field("issues", &self.last_issues.is_some())
            .finish()
    }
}

fn seed_draft(schema: &FormSchema, record: &Record) -> BTreeMap<String, String> {
    schema
        .fields()
        .iter()
        .map(|spec| {
            let value = record
                .get(spec.path())
                .map(Value::to_field_text)
                .unwrap_or_default();

            (spec.key().to_owned(), value)
        })
        .collect()
}

fn empty_draft(schema: &FormSchema) -> BTreeMap<String, String> {
    schema
        .fields()
        .iter()
        .map(|spec| (spec.key().to_owned(), String::new()))
        .collect()
}
