use draftform_core::{error::FieldIssue, traits::Validator};

///
/// HasLen
///

#[allow(clippy::len_without_is_empty)]
pub trait HasLen {
    fn len(&self) -> usize;
}

impl HasLen for str {
    fn len(&self) -> usize {
        Self::len(self)
    }
}

impl HasLen for String {
    fn len(&self) -> usize {
        Self::len(self)
    }
}

impl<T> HasLen for [T] {
    fn len(&self) -> usize {
        <[T]>::len(self)
    }
}

impl<T> HasLen for Vec<T> {
    fn len(&self) -> usize {
        Self::len(self)
    }
}

///
/// Equal
///

pub struct Equal {
    target: usize,
}

impl Equal {
    #[must_use]
    pub const fn new(target: usize) -> Self {
        Self { target }
    }
}

impl<T: HasLen + ?Sized> Validator<T> for Equal {
    fn validate(&self, value: &T) -> Result<(), FieldIssue> {
        let len = value.len();
        if len == self.target {
            Ok(())
        } else {
            Err(FieldIssue::length(format!(
                "length ({len}) is not equal to {}",
                self.target
            )))
        }
    }
}

///
/// Min
///

pub struct Min {
    target: usize,
}

impl Min {
    #[must_use]
    pub const fn new(target: usize) -> Self {
        Self { target }
    }
}

impl<T: HasLen + ?Sized> Validator<T> for Min {
    fn validate(&self, value: &T) -> Result<(), FieldIssue> {
        let len = value.len();
        if len >= self.target {
            Ok(())
        } else {
            Err(FieldIssue::length(format!(
                "length ({len}) is below the minimum of {}",
                self.target
            )))
        }
    }
}

///
/// Max
///

pub struct Max {
    target: usize,
}

impl Max {
    #[must_use]
    pub const fn new(target: usize) -> Self {
        Self { target }
    }
}

impl<T: HasLen + ?Sized> Validator<T> for Max {
    fn validate(&self, value: &T) -> Result<(), FieldIssue> {
        let len = value.len();
        if len <= self.target {
            Ok(())
        } else {
            Err(FieldIssue::length(format!(
                "length ({len}) is above the maximum of {}",
                self.target
            )))
        }
    }
}

///
/// Range
///

pub struct Range {
    min: usize,
    max: usize,
}

impl Range {
    #[must_use]
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }
}

impl<T: HasLen + ?Sized> Validator<T> for Range {
    fn validate(&self, value: &T) -> Result<(), FieldIssue> {
        let len = value.len();
        if len >= self.min && len <= self.max {
            Ok(())
        } else {
            Err(FieldIssue::length(format!(
                "length ({len}) is outside {}..={}",
                self.min, self.max
            )))
        }
    }
}

///
/// TESTS
///
