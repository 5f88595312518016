use draftform_core::{error::FieldIssue, traits::Validator};

///
/// Digits
///
/// Exact digit-count rule, e.g. the 11-digit booking phone number.
/// Non-digit characters are a pattern failure; a wrong count is a length
/// failure, so the host can word the two messages differently.
///

pub struct Digits {
    count: usize,
}

impl Digits {
    #[must_use]
    pub const fn new(count: usize) -> Self {
        Self { count }
    }
}

impl Validator<str> for Digits {
    fn validate(&self, value: &str) -> Result<(), FieldIssue> {
        if !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FieldIssue::pattern(format!(
                "'{value}' may contain only digits"
            )));
        }

        if value.len() == self.count {
            Ok(())
        } else {
            Err(FieldIssue::length(format!(
                "expected exactly {} digits",
                self.count
            )))
        }
    }
}

///
/// TESTS
///
