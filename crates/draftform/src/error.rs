use draftform_core::{
    collection::SlotFieldError,
    error::{IssueMap, SessionError},
    schema::SchemaError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }

    /// The issue map carried by a validation failure, if this is one.
    #[must_use]
    pub const fn issues(&self) -> Option<&IssueMap> {
        match &self.kind {
            ErrorKind::Validation { issues } => Some(issues),
            _ => None,
        }
    }
}

impl From<SchemaError> for Error {
    fn from(err: SchemaError) -> Self {
        let kind = match &err {
            SchemaError::DuplicateFieldKey { .. } => SchemaErrorKind::DuplicateFieldKey,
            SchemaError::InvalidFieldKey { .. } => SchemaErrorKind::InvalidFieldKey,
            SchemaError::MissingSelectOptions { .. } => SchemaErrorKind::MissingSelectOptions,
            SchemaError::MissingSlotOptions { .. } => SchemaErrorKind::MissingSlotOptions,
            SchemaError::NoFields => SchemaErrorKind::NoFields,
        };

        Self::new(ErrorKind::Schema(kind), ErrorOrigin::Schema, err.to_string())
    }
}

impl From<SessionError> for Error {
    fn from(err: SessionError) -> Self {
        let message = err.to_string();
        match err {
            SessionError::ValidationFailed { issues } => Self::new(
                ErrorKind::Validation { issues },
                ErrorOrigin::Session,
                message,
            ),

            SessionError::SlotField(_) => Self::new(
                ErrorKind::Session(SessionErrorKind::SlotField),
                ErrorOrigin::Collection,
                message,
            ),

            SessionError::EditLocked { .. } => Self::new(
                ErrorKind::Session(SessionErrorKind::EditLocked),
                ErrorOrigin::Session,
                message,
            ),

            SessionError::FieldImmutable { .. } => Self::new(
                ErrorKind::Session(SessionErrorKind::FieldImmutable),
                ErrorOrigin::Session,
                message,
            ),

            SessionError::NoSlotSection => Self::new(
                ErrorKind::Session(SessionErrorKind::NoSlotSection),
                ErrorOrigin::Collection,
                message,
            ),

            SessionError::NotNew => Self::new(
                ErrorKind::Session(SessionErrorKind::NotNew),
                ErrorOrigin::Session,
                message,
            ),

            SessionError::SessionClosed => Self::new(
                ErrorKind::Session(SessionErrorKind::Closed),
                ErrorOrigin::Session,
                message,
            ),

            SessionError::UnknownField { .. } => Self::new(
                ErrorKind::Session(SessionErrorKind::UnknownField),
                ErrorOrigin::Session,
                message,
            ),
        }
    }
}

impl From<SlotFieldError> for Error {
    fn from(err: SlotFieldError) -> Self {
        Self::new(
            ErrorKind::Session(SessionErrorKind::SlotField),
            ErrorOrigin::Collection,
            err.to_string(),
        )
    }
}

///
/// ErrorKind
/// Public error taxonomy for form hosts.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    Schema(SchemaErrorKind),
    Session(SessionErrorKind),

    /// Commit-time validation failed; the issues stay field-addressable.
    Validation { issues: IssueMap },
}

///
/// SchemaErrorKind
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum SchemaErrorKind {
    DuplicateFieldKey,
    InvalidFieldKey,
    MissingSelectOptions,
    MissingSlotOptions,
    NoFields,
}

///
/// SessionErrorKind
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum SessionErrorKind {
    /// The session was closed and accepts no further operations.
    Closed,

    /// A write arrived while the session was in view mode.
    EditLocked,

    /// The field is declared immutable by its schema.
    FieldImmutable,

    /// A slot operation on a schema without a slot section.
    NoSlotSection,

    /// Reset applies only to new-record sessions.
    NotNew,

    /// A slot part rejected its value.
    SlotField,

    /// The key names no schema field.
    UnknownField,
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum ErrorOrigin {
    Collection,
    Schema,
    Session,
}

///
/// TESTS
///
