//! Session tracing boundary.
//!
//! Tracing is optional, injected by the caller, and must not affect session
//! semantics.

use crate::{collection::SlotId, session::CancelOutcome};

///
/// SessionTraceSink
///

pub trait SessionTraceSink: Send + Sync {
    fn on_event(&self, event: SessionTraceEvent);
}

///
/// SessionTraceEvent
///
/// One observable step of a session's lifecycle. Field counts are reported
/// instead of values so a sink never sees draft content.
///

#[derive(Clone, Debug, Eq, PartialEq)]
#[remain::sorted]
pub enum SessionTraceEvent {
    Cancelled { outcome: CancelOutcome },
    Closed,
    CommitAccepted { fields: usize },
    CommitRejected { issues: usize },
    EditEntered,
    FieldChanged { key: String },
    Populated { fields: usize },
    SlotAdded { id: SlotId },
    SlotRemoved { id: SlotId },
}

pub(crate) fn emit(sink: Option<&'static dyn SessionTraceSink>, event: SessionTraceEvent) {
    if let Some(sink) = sink {
        sink.on_event(event);
    }
}
