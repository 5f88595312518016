//! ## Crate layout
//! - `base`: builtin validators and sanitizers for field specs.
//! - `core`: schemas, records, edit sessions, slot editing, and view models.
//! - `error`: the public error taxonomy flattening the core error types.
//!
//! The `prelude` module mirrors the surface a form host uses.

pub use draftform_base as base;
pub use draftform_core as core;

mod error;

pub use error::{Error, ErrorKind, ErrorOrigin, SchemaErrorKind, SessionErrorKind};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Host Prelude
///

pub mod prelude {
    pub use crate::{
        Error,
        core::{
            collection::{ScheduleSlot, SlotEditor, SlotField, SlotId, Weekday},
            error::{FieldErrorKind, FieldIssue, IssueMap},
            policy::{SessionPolicy, SlotPolicy},
            record::{Record, RecordPath},
            schema::{FieldKind, FieldSpec, FormSchema, SlotSectionSpec},
            session::{AttachmentRef, CancelOutcome, EditSession, SessionState},
            trace::{SessionTraceEvent, SessionTraceSink},
            types::{Date, DateStyle, EntityId, EntityTag},
            value::{Value, ValueMap},
            view::{
                Action, FieldBinding, FormViewModel, ModalHost, PageChrome, SlotRowBinding,
                SlotSectionView, actions, notify_cancel, notify_mount, view_model,
            },
        },
    };
    pub use serde::{Deserialize, Serialize};
}
