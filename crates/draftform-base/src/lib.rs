//! Built-in validators and sanitizers for DraftForm field specs.
//!
//! Everything here is a small stateless (or parameter-only) struct
//! implementing the core `Validator` or `Sanitizer` trait; schemas attach
//! them per field.
#![warn(unreachable_pub)]

pub mod sanitizer;
pub mod validator;
