//! Doctors Portal demo fixtures: the doctor, patient, and booking schemas
//! plus sample records in the backing-store shape, shared by the
//! integration tests.

use draftform::{
    base::{
        sanitizer::text::{Squeeze, Trim},
        validator::{
            date::IsoDate,
            text::{Digits, Email},
        },
    },
    prelude::*,
};
use std::sync::Arc;

/// Time ranges a doctor can offer for an availability slot.
pub const TIME_OPTIONS: [&str; 5] = [
    "09:00 AM - 05:00 PM",
    "10:00 AM - 06:00 PM",
    "09:00 AM - 04:00 PM",
    "08:00 AM - 04:00 PM",
    "09:00 AM - 02:00 PM",
];

/// The doctor profile form: personal and contact details plus the weekly
/// availability section.
#[must_use]
pub fn doctor_schema() -> Arc<FormSchema> {
    let schema = FormSchema::builder("doctor_profile", EntityTag::Doctor)
        .field(
            FieldSpec::text("name", "Name")
                .required()
                .at("personalInfo.name")
                .with_sanitizer(Squeeze),
        )
        .field(FieldSpec::text("speciality", "Speciality").required())
        .field(
            FieldSpec::text("degree", "Degree")
                .at("qualifications.degree")
                .with_sanitizer(Trim),
        )
        .field(
            FieldSpec::email("email", "Email")
                .required()
                .at("contactInfo.email")
                .with_sanitizer(Trim)
                .with_validator(Email),
        )
        .field(
            FieldSpec::tel("phone", "Phone")
                .required()
                .at("contactInfo.phone")
                .with_sanitizer(Trim),
        )
        .field(FieldSpec::text("join_date", "Join Date").locked().at("joinDate"))
        .slots(SlotSectionSpec::new("availability", TIME_OPTIONS).with_labels("Day", "Time"))
        .build()
        .expect("doctor schema is valid");

    Arc::new(schema)
}

/// The patient profile form: demographics, contact details, and the
/// emergency contact block. No slot section.
#[must_use]
pub fn patient_schema() -> Arc<FormSchema> {
    let schema = FormSchema::builder("patient_profile", EntityTag::Patient)
        .field(
            FieldSpec::text("name", "Name")
                .required()
                .at("personalInfo.name")
                .with_sanitizer(Squeeze),
        )
        .field(
            FieldSpec::date("date_of_birth", "Date of Birth")
                .required()
                .at("demographics.dateOfBirth")
                .with_validator(IsoDate),
        )
        .field(FieldSpec::select("gender", "Gender", ["Male", "Female", "Other"]).at("demographics.gender"))
        .field(FieldSpec::select(
            "blood_group",
            "Blood Group",
            ["A+", "A-", "B+", "B-", "O+", "O-", "AB+", "AB-"],
        )
        .at("demographics.bloodGroup"))
        .field(
            FieldSpec::email("email", "Email")
                .required()
                .at("contactInfo.email")
                .with_sanitizer(Trim)
                .with_validator(Email),
        )
        .field(
            FieldSpec::tel("phone", "Phone")
                .required()
                .at("contactInfo.phone")
                .with_sanitizer(Trim),
        )
        .field(FieldSpec::text("address", "Address").at("contactInfo.address"))
        .field(
            FieldSpec::text("emergency_name", "Emergency Contact Name").at("emergencyContact.name"),
        )
        .field(
            FieldSpec::tel("emergency_phone", "Emergency Contact Phone")
                .at("emergencyContact.phone"),
        )
        .build()
        .expect("patient schema is valid");

    Arc::new(schema)
}

/// The appointment booking form. Date and time come prefilled from the
/// picked calendar slot and stay locked while the visitor fills in the
/// contact fields; the phone number must be exactly 11 digits.
#[must_use]
pub fn booking_schema() -> Arc<FormSchema> {
    let schema = FormSchema::builder("book_appointment", EntityTag::Appointment)
        .field(FieldSpec::text("treatment", "Treatment").locked())
        .field(FieldSpec::date("date", "Date").locked())
        .field(FieldSpec::text("time", "Time").locked())
        .field(
            FieldSpec::text("name", "Full Name")
                .required()
                .with_sanitizer(Squeeze),
        )
        .field(
            FieldSpec::tel("phone", "Phone Number")
                .required()
                .with_sanitizer(Trim)
                .with_validator(Digits::new(11)),
        )
        .field(
            FieldSpec::email("email", "Email Address")
                .required()
                .with_sanitizer(Trim)
                .with_validator(Email),
        )
        .build()
        .expect("booking schema is valid");

    Arc::new(schema)
}

/// A doctor record as the portal's backing store shapes it.
#[must_use]
pub fn doctor_record() -> Record {
    parse(
        r#"{
            "id": "DOC_X7K9P2M5N3L8Q4R",
            "personalInfo": { "name": "John Doe" },
            "speciality": "Orthodontist",
            "qualifications": {
                "degree": "DDS, MSD",
                "abbreviation": "Doctor of Dental Surgery, Master of Science in Dentistry"
            },
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
                },
                {
                    "id": "DOC_X7K9P2M5N3L8Q4R_1731400517775",
                    "day": "Friday",
                    "time": "09:00 AM - 04:00 PM"
                }
            ],
            "appointments": { "total": 45, "status": { "paid": 38, "unpaid": 7 } }
        }"#,
    )
}

/// A patient record with demographics and an emergency contact.
#[must_use]
pub fn patient_record() -> Record {
    parse(
        r#"{
            "id": "PAT2024A001",
            "personalInfo": { "name": "John Doe" },
            "demographics": {
                "age": 30,
                "gender": "Male",
                "dateOfBirth": "1994-03-15",
                "bloodGroup": "A+"
            },
            "contactInfo": {
                "email": "john.doe@example.com",
                "phone": "+1234567890",
                "address": "456 Oak Avenue, Springfield, USA"
            },
            "joinDate": "15 Jan 2024",
            "emergencyContact": {
                "name": "Mary Doe",
                "relationship": "Sister",
                "phone": "+1987654321",
                "address": "789 Pine Road, Springfield, USA"
            },
            "appointments": { "total": 2, "status": { "paid": 1, "unpaid": 1 } }
        }"#,
    )
}

/// A booking record for a picked calendar slot, before the visitor fills
/// in their contact details.
#[must_use]
pub fn booking_record() -> Record {
    parse(
        r#"{
            "id": "APP_B7N2W5X8K3M6P9R",
            "treatment": "Teeth Orthodontics",
            "date": "2026-09-14",
            "time": "09:00 AM - 05:00 PM",
            "name": "",
            "phone": "",
            "email": ""
        }"#,
    )
}

fn parse(json: &str) -> Record {
    serde_json::from_str(json).expect("fixture record parses")
}

///
/// TESTS
///
