//! Full-pass draft validation.
//!
//! Every field and every slot is checked on each pass so a host can surface
//! all failures at once; nothing here short-circuits on the first issue.

use crate::{
    collection::ScheduleSlot,
    error::{FieldIssue, IssueMap},
    policy::SlotPolicy,
    schema::{FieldSpec, FormSchema, SlotSectionSpec},
};
use std::collections::BTreeMap;

/// Validate every schema field against its draft value.
///
/// Values are expected to be sanitized already; rule order per field is
/// required, then select membership, then the attached validator.
#[must_use]
pub fn validate_fields(schema: &FormSchema, draft: &BTreeMap<String, String>) -> IssueMap {
    let mut issues = IssueMap::new();

    for spec in schema.fields() {
        let value = draft.get(spec.key()).map_or("", String::as_str);
        if let Err(issue) = validate_field(spec, value) {
            issues.insert(spec.key(), issue);
        }
    }

    issues
}

/// Validate the slot list under the given policy, appending issues keyed as
/// `{section_path}.{slot_id}.{day|time}`.
///
/// Under `DropIncomplete` unfinished slots are skipped entirely; complete
/// slots are always checked against the section's offered times.
pub fn validate_slots(
    section: &SlotSectionSpec,
    slots: &[ScheduleSlot],
    policy: SlotPolicy,
    issues: &mut IssueMap,
) {
    for slot in slots {
        let incomplete = !slot.is_complete();
        if incomplete && !policy.is_blocking() {
            continue;
        }

        if slot.day.is_none() {
            issues.insert(
                slot_issue_key(section, slot, "day"),
                FieldIssue::required("Please select a day"),
            );
        }

        if slot.time.is_empty() {
            issues.insert(
                slot_issue_key(section, slot, "time"),
                FieldIssue::required("Please select a time"),
            );
        } else if !section.allows_time(&slot.time) {
            issues.insert(
                slot_issue_key(section, slot, "time"),
                FieldIssue::pattern(format!("'{}' is not an offered time", slot.time)),
            );
        }
    }
}

/// Produce the sanitized working copy of a draft, field by field.
#[must_use]
pub fn sanitize_draft(
    schema: &FormSchema,
    draft: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    let mut working = BTreeMap::new();

    for spec in schema.fields() {
        let mut value = draft.get(spec.key()).cloned().unwrap_or_default();
        spec.run_sanitizers(&mut value);
        working.insert(spec.key().to_owned(), value);
    }

    working
}

fn validate_field(spec: &FieldSpec, value: &str) -> Result<(), FieldIssue> {
    let label = spec.label();
    if value.is_empty() {
        if spec.is_required() {
            return Err(FieldIssue::required(format!("{label} is required")));
        }

        // optional and empty: membership and validator do not apply
        return Ok(());
    }

    if spec.kind().is_select() && !spec.options().iter().any(|option| option == value) {
        return Err(FieldIssue::pattern(format!(
            "'{value}' is not an offered {label}"
        )));
    }

    spec.run_validator(value)
}

fn slot_issue_key(section: &SlotSectionSpec, slot: &ScheduleSlot, part: &str) -> String {
    format!("{}.{}.{part}", section.path(), slot.id)
}

///
/// TESTS
///
