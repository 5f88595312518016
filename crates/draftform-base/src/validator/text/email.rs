use draftform_core::{error::FieldIssue, traits::Validator};

///
/// Email
///
/// Pragmatic address check: a local part of the usual unescaped characters,
/// one `@`, and a dotted domain ending in an alphabetic label of at least
/// two characters. Not an RFC parser; it matches what booking forms accept.
///

pub struct Email;

impl Validator<str> for Email {
    fn validate(&self, value: &str) -> Result<(), FieldIssue> {
        if is_valid_email(value) {
            Ok(())
        } else {
            Err(FieldIssue::pattern(format!(
                "'{value}' is not a valid email address"
            )))
        }
    }
}

fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    if local.is_empty() || !local.bytes().all(is_local_byte) {
        return false;
    }

    if domain.is_empty() || !domain.bytes().all(is_domain_byte) {
        return false;
    }
    let mut labels = domain.split('.');
    let Some(tld) = labels.next_back() else {
        return false;
    };

    // at least one dot, no empty labels, and an alphabetic tld of 2+
    domain.contains('.')
        && labels.clone().all(|label| !label.is_empty())
        && tld.len() >= 2
        && tld.bytes().all(|b| b.is_ascii_alphabetic())
}

const fn is_local_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'%' | b'+' | b'-')
}

const fn is_domain_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'.' | b'-')
}

///
/// TESTS
///
