//! Render models binding a session to whatever toolkit hosts the form.
//!
//! Everything here is a pure projection of session state; the host owns the
//! widgets, the overlay, and the page chrome.

use crate::{
    collection::{SlotId, Weekday},
    error::FieldIssue,
    schema::FieldKind,
    session::{CancelOutcome, EditSession, SessionState},
};

///
/// Action
///
/// The footer buttons a form offers in a given state.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[remain::sorted]
pub enum Action {
    Cancel,
    Edit,
    Reset,
    Save,
    Submit,
}

/// The action set is a pure function of the session state: view mode offers
/// Edit, editing an existing record offers Save and Cancel, and a new
/// record offers Submit, Reset, and Cancel.
#[must_use]
pub const fn actions(state: SessionState) -> &'static [Action] {
    match state {
        SessionState::Closed => &[],
        SessionState::Editing => &[Action::Save, Action::Cancel],
        SessionState::New => &[Action::Submit, Action::Reset, Action::Cancel],
        SessionState::Viewing => &[Action::Edit],
    }
}

///
/// FieldBinding
///
/// One field as a widget sees it. Errors come only from the last rejected
/// commit, so typing never produces noise before a submit attempt.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldBinding {
    pub key: String,
    pub label: String,
    pub kind: FieldKind,
    pub value: String,
    pub options: Vec<String>,
    pub disabled: bool,
    pub error: Option<FieldIssue>,
}

///
/// SlotRowBinding
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SlotRowBinding {
    pub id: SlotId,
    pub day: String,
    pub time: String,
    pub day_error: Option<FieldIssue>,
    pub time_error: Option<FieldIssue>,
    pub removable: bool,
}

///
/// SlotSectionView
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SlotSectionView {
    pub day_label: String,
    pub time_label: String,
    pub day_options: Vec<String>,
    pub time_options: Vec<String>,
    pub rows: Vec<SlotRowBinding>,
    pub can_add: bool,
}

///
/// FormViewModel
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FormViewModel {
    pub title: String,
    pub fields: Vec<FieldBinding>,
    pub slot_section: Option<SlotSectionView>,
    pub actions: &'static [Action],
}

/// Project the session into a complete render model.
#[must_use]
pub fn view_model(session: &EditSession) -> FormViewModel {
    let schema = session.schema();
    let editing = session.is_editing();
    let issues = session.last_issues();

    let fields = schema
        .fields()
        .iter()
        .map(|spec| FieldBinding {
            key: spec.key().to_owned(),
            label: spec.label().to_owned(),
            kind: spec.kind(),
            value: session.field_value(spec.key()).to_owned(),
            options: spec.options().to_vec(),
            disabled: !editing || spec.is_locked(),
            error: issues
                .and_then(|map| map.get(spec.key()))
                .cloned(),
        })
        .collect();

    let slot_section = schema.slots().map(|section| SlotSectionView {
        day_label: section.day_label().to_owned(),
        time_label: section.time_label().to_owned(),
        day_options: Weekday::ALL.iter().map(|day| day.label().to_owned()).collect(),
        time_options: section.time_options().to_vec(),
        rows: session
            .slots()
            .slots()
            .iter()
            .map(|slot| SlotRowBinding {
                id: slot.id.clone(),
                day: slot.day.map_or_else(String::new, |day| day.label().to_owned()),
                time: slot.time.clone(),
                day_error: issues
                    .and_then(|map| map.get(&slot_issue_key(section.path().as_str(), &slot.id, "day")))
                    .cloned(),
                time_error: issues
                    .and_then(|map| map.get(&slot_issue_key(section.path().as_str(), &slot.id, "time")))
                    .cloned(),
                removable: editing,
            })
            .collect(),
        can_add: editing,
    });

    FormViewModel {
        title: schema.name().to_owned(),
        fields,
        slot_section,
        actions: actions(session.state()),
    }
}

fn slot_issue_key(section_path: &str, id: &SlotId, part: &str) -> String {
    format!("{section_path}.{id}.{part}")
}

///
/// ModalHost
///
/// Overlay collaborator contract. Rendering chrome, focus trapping, and
/// escape-to-close stay on the host's side of this boundary.
///

pub trait ModalHost {
    fn is_open(&self) -> bool;
    fn request_close(&self);
}

///
/// PageChrome
///
/// Page-level side effects the view issues on mount, kept behind a trait so
/// no core logic touches the host document directly.
///

pub trait PageChrome {
    fn set_page_title(&self, title: &str);
}

/// Forward a cancel outcome to the host: a session that closed itself asks
/// the overlay to dismiss.
pub fn notify_cancel(host: &dyn ModalHost, outcome: CancelOutcome) {
    if outcome == CancelOutcome::Closed && host.is_open() {
        host.request_close();
    }
}

/// Push mount-time chrome to the host: the page title follows the form's
/// name.
pub fn notify_mount(chrome: &dyn PageChrome, model: &FormViewModel) {
    chrome.set_page_title(&model.title);
}

///
/// TESTS
///
