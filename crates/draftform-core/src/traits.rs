use crate::error::FieldIssue;

///
/// Validator
///
/// A reusable rule attached to a field spec. Validators see the sanitized
/// working value and never the draft itself.
///

pub trait Validator<T: ?Sized>: Send + Sync {
    fn validate(&self, value: &T) -> Result<(), FieldIssue>;
}

///
/// Sanitizer
///
/// A normalization step applied to a working copy of a field value before
/// validation and commit. Sanitizers must be idempotent.
///

pub trait Sanitizer<T: ?Sized>: Send + Sync {
    fn sanitize(&self, value: &mut T);
}
