
use super::*;
use crate::{
    collection::SlotField,
    error::{FieldErrorKind, SessionError},
    policy::SessionPolicy,
    test_fixtures::{CaptureSink, doctor_record, doctor_schema},
    trace::SessionTraceEvent,
};

fn session() -> EditSession {
    EditSession::open(doctor_schema(), doctor_record())
}

#[test]
fn test_open_populates_from_record() {
    let session = session();

    assert_eq!(session.state(), SessionState::Viewing);
    assert!(!session.is_editing());
    assert_eq!(session.field_value("name"), "John Doe");
    assert_eq!(session.field_value("email"), "john.doe@doctors-portal.com");
    assert_eq!(session.field_value("join_date"), "15 Jan 2024");
    assert_eq!(session.slots().len(), 2);
}

#[test]
fn test_view_only_commit_is_noop() {
    let mut session = session();
    let committed = session.commit().unwrap();

    assert_eq!(committed, doctor_record());
    assert_eq!(session.state(), SessionState::Viewing);
}

#[test]
fn test_populate_is_idempotent() {
    let mut session = session();
    let before = session.source().clone();

    session.populate(doctor_record());
    session.populate(doctor_record());

    assert_eq!(session.source(), &before);
    assert_eq!(session.field_value("name"), "John Doe");
    assert_eq!(session.slots().len(), 2);
}

#[test]
fn test_set_field_rejected_in_view_mode() {
    let mut session = session();

    let err = session.set_field("name", "Jane Doe").unwrap_err();
    assert_eq!(
        err,
        SessionError::EditLocked {
            key: "name".to_owned()
        }
    );
    assert_eq!(session.field_value("name"), "John Doe");
}

#[test]
fn test_set_field_rejects_unknown_and_locked_keys() {
    let mut session = session();
    session.enter_edit().unwrap();

    assert_eq!(
        session.set_field("favourite_color", "teal").unwrap_err(),
        SessionError::UnknownField {
            key: "favourite_color".to_owned()
        }
    );
    assert_eq!(
        session.set_field("join_date", "today").unwrap_err(),
        SessionError::FieldImmutable {
            key: "join_date".to_owned()
        }
    );
}

#[test]
fn test_enter_edit_is_idempotent() {
    let mut session = session();
    session.enter_edit().unwrap();
    session.enter_edit().unwrap();

    assert_eq!(session.state(), SessionState::Editing);
}

#[test]
fn test_cancel_restores_populated_draft() {
    let mut session = session();
    session.enter_edit().unwrap();
    session.set_field("name", "Jane Doe").unwrap();
    session.set_field("speciality", "Endodontist").unwrap();
    let slot = session.add_slot().unwrap();
    session.update_slot(&slot, SlotField::Day, "Friday").unwrap();

    assert_eq!(session.cancel_edit(), CancelOutcome::Reverted);
    assert_eq!(session.state(), SessionState::Viewing);
    assert_eq!(session.field_value("name"), "John Doe");
    assert_eq!(session.field_value("speciality"), "Orthodontist");
    assert_eq!(session.slots().len(), 2);
}

#[test]
fn test_commit_writes_through_field_paths() {
    let mut session = session();
    session.enter_edit().unwrap();
    session.set_field("name", "  Jane   Doe ").unwrap();

    let committed = session.commit().unwrap();

    assert_eq!(
        committed.text(&RecordPath::from("personalInfo.name")),
        Some("Jane Doe")
    );
    // untouched nested fields survive the write-through
    assert_eq!(
        committed.text(&RecordPath::from("contactInfo.phone")),
        Some("+1234567890")
    );
    assert_eq!(session.state(), SessionState::Viewing);
    assert_eq!(session.field_value("name"), "Jane Doe");
    assert_eq!(session.source(), &committed);
}

#[test]
fn test_commit_rejection_keeps_draft_and_state() {
    let mut session = session();
    session.enter_edit().unwrap();
    session.set_field("name", "").unwrap();
    session.set_field("email", "not-an-address").unwrap();
    session.set_field("phone", "12345").unwrap();

    let err = session.commit().unwrap_err();
    let SessionError::ValidationFailed { issues } = err else {
        panic!("expected ValidationFailed");
    };

    assert_eq!(issues.kind_of("name"), Some(FieldErrorKind::Required));
    assert_eq!(issues.kind_of("email"), Some(FieldErrorKind::PatternMismatch));
    assert_eq!(issues.kind_of("phone"), Some(FieldErrorKind::LengthMismatch));

    assert_eq!(session.state(), SessionState::Editing);
    assert_eq!(session.field_value("email"), "not-an-address");
    assert_eq!(session.last_issues(), Some(&issues));
}

#[test]
fn test_commit_clears_recorded_issues() {
    let mut session = session();
    session.enter_edit().unwrap();
    session.set_field("name", "").unwrap();
    session.commit().unwrap_err();
    assert!(session.last_issues().is_some());

    session.set_field("name", "Jane Doe").unwrap();
    session.commit().unwrap();
    assert!(session.last_issues().is_none());
}

#[test]
fn test_incomplete_slot_blocks_commit_by_default() {
    let mut session = session();
    session.enter_edit().unwrap();
    let slot = session.add_slot().unwrap();

    let err = session.commit().unwrap_err();
    let SessionError::ValidationFailed { issues } = err else {
        panic!("expected ValidationFailed");
    };

    let day_key = format!("availability.{slot}.day");
    assert_eq!(issues.kind_of(&day_key), Some(FieldErrorKind::Required));
    assert_eq!(session.slots().len(), 3);
}

#[test]
fn test_drop_incomplete_policy_omits_unfinished_slots() {
    let mut session = EditSession::open(doctor_schema(), doctor_record())
        .with_policy(SessionPolicy::new().drop_incomplete_slots());
    session.enter_edit().unwrap();
    session.add_slot().unwrap();

    let committed = session.commit().unwrap();

    assert_eq!(session.slots().len(), 2);
    let slots = committed
        .get(&RecordPath::from("availability"))
        .and_then(crate::value::Value::as_list)
        .unwrap();
    assert_eq!(slots.len(), 2);
}

#[test]
fn test_sync_record_repopulates_only_on_change() {
    let mut session = session();
    assert!(!session.sync_record(&doctor_record()));

    let mut swapped = doctor_record();
    swapped.set(&RecordPath::from("personalInfo.name"), "Sarah Wilson".into());
    assert!(session.sync_record(&swapped));
    assert_eq!(session.field_value("name"), "Sarah Wilson");
}

#[test]
fn test_populate_releases_attachment() {
    let mut session = session();
    session.enter_edit().unwrap();
    session
        .attach_preview(AttachmentRef::new("blob:preview-1"))
        .unwrap();
    assert!(session.attachment().is_some());

    session.populate(doctor_record());
    assert!(session.attachment().is_none());
}

#[test]
fn test_new_session_starts_editing_with_empty_defaults() {
    let session = EditSession::open_new(doctor_schema());

    assert_eq!(session.state(), SessionState::New);
    assert!(session.is_editing());
    assert!(session.is_new());
    for spec in doctor_schema().fields() {
        assert_eq!(session.field_value(spec.key()), "");
    }
    assert!(session.source().id().unwrap().starts_with("DOC_"));
    assert!(session.slots().is_empty());
}

#[test]
fn test_new_session_cancel_closes() {
    let mut session = EditSession::open_new(doctor_schema());

    assert_eq!(session.cancel_edit(), CancelOutcome::Closed);
    assert_eq!(session.state(), SessionState::Closed);
    assert_eq!(session.commit().unwrap_err(), SessionError::SessionClosed);
}

#[test]
fn test_new_session_commit_transitions_to_viewing() {
    let mut session = EditSession::open_new(doctor_schema());
    session.set_field("name", "Amelia Hart").unwrap();
    session.set_field("speciality", "Periodontist").unwrap();
    session.set_field("email", "amelia@doctors-portal.com").unwrap();
    session.set_field("phone", "01234567890").unwrap();

    let committed = session.commit().unwrap();

    assert_eq!(session.state(), SessionState::Viewing);
    assert_eq!(
        committed.text(&RecordPath::from("personalInfo.name")),
        Some("Amelia Hart")
    );
    assert_eq!(committed.id(), session.source().id());
}

#[test]
fn test_reset_new_reseeds_defaults() {
    let mut session = EditSession::open_new(doctor_schema());
    session.set_field("name", "Amelia Hart").unwrap();
    session.add_slot().unwrap();

    session.reset_new().unwrap();

    assert_eq!(session.field_value("name"), "");
    assert!(session.slots().is_empty());
    assert_eq!(session.state(), SessionState::New);
}

#[test]
fn test_reset_new_rejected_for_existing_records() {
    let mut session = session();

    assert_eq!(session.reset_new().unwrap_err(), SessionError::NotNew);
}

#[test]
fn test_new_session_slot_add_add_remove_first() {
    let mut session = EditSession::open_new(doctor_schema());
    let first = session.add_slot().unwrap();
    let second = session.add_slot().unwrap();

    assert!(session.remove_slot(&first).unwrap());
    assert_eq!(session.slots().len(), 1);
    assert_eq!(session.slots().slots()[0].id, second);
}

#[test]
fn test_closed_session_rejects_everything() {
    let mut session = session();
    session.close();

    assert_eq!(session.enter_edit().unwrap_err(), SessionError::SessionClosed);
    assert_eq!(
        session.set_field("name", "x").unwrap_err(),
        SessionError::SessionClosed
    );
    assert_eq!(session.commit().unwrap_err(), SessionError::SessionClosed);
    assert!(!session.sync_record(&Record::new()));
    assert_eq!(session.cancel_edit(), CancelOutcome::Closed);
}

#[test]
fn test_trace_events_follow_the_workflow() {
    let sink = CaptureSink::leaked();
    let mut session = EditSession::open(doctor_schema(), doctor_record()).with_trace(sink);

    session.enter_edit().unwrap();
    session.set_field("name", "Jane Doe").unwrap();
    session.commit().unwrap();
    session.close();

    let events = sink.events();
    assert_eq!(
        events,
        vec![
            SessionTraceEvent::EditEntered,
            SessionTraceEvent::FieldChanged {
                key: "name".to_owned()
            },
            SessionTraceEvent::CommitAccepted { fields: 5 },
            SessionTraceEvent::Closed,
        ]
    );
}

#[test]
fn test_trace_records_rejection_and_cancel() {
    let sink = CaptureSink::leaked();
    let mut session = EditSession::open(doctor_schema(), doctor_record()).with_trace(sink);

    session.enter_edit().unwrap();
    session.set_field("name", "").unwrap();
    session.commit().unwrap_err();
    session.cancel_edit();

    let events = sink.events();
    assert!(events.contains(&SessionTraceEvent::CommitRejected { issues: 1 }));
    assert!(events.contains(&SessionTraceEvent::Cancelled {
        outcome: CancelOutcome::Reverted
    }));
}
