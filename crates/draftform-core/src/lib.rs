//! Core runtime for DraftForm: field schemas, record values, edit sessions,
//! slot collections, and the view models exported via the `prelude`.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod collection;
pub mod error;
pub mod policy;
pub mod record;
pub mod schema;
pub mod session;
pub mod trace;
pub mod traits;
pub mod types;
pub mod validate;
pub mod value;
pub mod view;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, sinks, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        record::{Record, RecordPath},
        schema::{FieldKind, FieldSpec, FormSchema},
        session::{EditSession, SessionState},
        value::Value,
    };
}
