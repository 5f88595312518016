//! Shared fixtures for in-crate tests: tiny validators and sanitizers, a
//! capturing trace sink, and the doctor-profile schema and record used by
//! the session and view tests.

use crate::{
    error::FieldIssue,
    record::Record,
    schema::{FieldSpec, FormSchema, SlotSectionSpec},
    trace::{SessionTraceEvent, SessionTraceSink},
    traits::{Sanitizer, Validator},
    types::EntityTag,
};
use std::sync::{Arc, Mutex};

///
/// ContainsAt
///
/// Toy email check: the value must contain an `@`.
///

pub(crate) struct ContainsAt;

impl Validator<str> for ContainsAt {
    fn validate(&self, value: &str) -> Result<(), FieldIssue> {
        if value.contains('@') {
            Ok(())
        } else {
            Err(FieldIssue::pattern(format!("'{value}' is missing an @")))
        }
    }
}

///
/// ExactLen
///

pub(crate) struct ExactLen(pub usize);

impl Validator<str> for ExactLen {
    fn validate(&self, value: &str) -> Result<(), FieldIssue> {
        if value.len() == self.0 {
            Ok(())
        } else {
            Err(FieldIssue::length(format!(
                "expected exactly {} characters",
                self.0
            )))
        }
    }
}

///
/// Squash
///
/// Collapse runs of whitespace to single spaces and trim the ends.
///

pub(crate) struct Squash;

impl Sanitizer<String> for Squash {
    fn sanitize(&self, value: &mut String) {
        let squashed: Vec<&str> = value.split_whitespace().collect();
        let squashed = squashed.join(" ");
        if squashed != *value {
            *value = squashed;
        }
    }
}

///
/// CaptureSink
///
/// Trace sink that records every event for later assertion. Leaked to get
/// the `'static` lifetime the injection point requires.
///

#[derive(Default)]
pub(crate) struct CaptureSink {
    events: Mutex<Vec<SessionTraceEvent>>,
}

impl CaptureSink {
    pub(crate) fn leaked() -> &'static Self {
        Box::leak(Box::default())
    }

    pub(crate) fn events(&self) -> Vec<SessionTraceEvent> {
        self.events.lock().expect("capture sink mutex poisoned").clone()
    }
}

impl SessionTraceSink for CaptureSink {
    fn on_event(&self, event: SessionTraceEvent) {
        self.events
            .lock()
            .expect("capture sink mutex poisoned")
            .push(event);
    }
}

/// The doctor-profile schema the session and view tests run against.
pub(crate) fn doctor_schema() -> Arc<FormSchema> {
    let schema = FormSchema::builder("doctor_profile", EntityTag::Doctor)
        .field(
            FieldSpec::text("name", "Name")
                .required()
                .at("personalInfo.name")
                .with_sanitizer(Squash),
        )
        .field(FieldSpec::text("speciality", "Speciality").required())
        .field(
            FieldSpec::email("email", "Email")
                .required()
                .at("contactInfo.email")
                .with_validator(ContainsAt),
        )
        .field(
            FieldSpec::tel("phone", "Phone")
                .at("contactInfo.phone")
                .with_validator(ExactLen(11)),
        )
        .field(FieldSpec::text("join_date", "Join Date").locked().at("joinDate"))
        .slots(
            SlotSectionSpec::new(
                "availability",
                [
                    "09:00 AM - 05:00 PM",
                    "10:00 AM - 06:00 PM",
                    "09:00 AM - 04:00 PM",
                    "08:00 AM - 04:00 PM",
                    "09:00 AM - 02:00 PM",
                ],
            )
            .with_labels("Day", "Time"),
        )
        .build()
        .expect("doctor schema is valid");

    Arc::new(schema)
}

/// A doctor record in the backing-store shape.
pub(crate) fn doctor_record() -> Record {
    serde_json::from_str(
        r#"{
            "id": "DOC_X7K9P2M5N3L8Q4R",
            "personalInfo": { "name": "John Doe" },
            "speciality": "Orthodontist",
            "contactInfo": {
                "email": "john.doe@doctors-portal.com",
                "phone": "+1234567890"
            },
            "joinDate": "15 Jan 2024",
            "availability": [
                {
                    "id": "DOC_X7K9P2M5N3L8Q4R_1731400517773",
                    "day": "Monday",
                    "time": "09:00 AM - 05:00 PM"
                },
                {
                    "id": "DOC_X7K9P2M5N3L8Q4R_1731400517774",
                    "day": "Wednesday",
                    "time": "10:00 AM - 06:00 PM"
                }
            ]
        }"#,
    )
    .expect("doctor record parses")
}
