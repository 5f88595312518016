use draftform_core::{error::FieldIssue, traits::Validator, types::Date};

///
/// IsoDate
///
/// The value must parse as a real `YYYY-MM-DD` calendar date.
///

pub struct IsoDate;

impl Validator<str> for IsoDate {
    fn validate(&self, value: &str) -> Result<(), FieldIssue> {
        match Date::parse(value) {
            Ok(_) => Ok(()),
            Err(_) => Err(FieldIssue::pattern(format!(
                "'{value}' is not a YYYY-MM-DD date"
            ))),
        }
    }
}

///
/// TESTS
///
