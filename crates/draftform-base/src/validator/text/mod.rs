pub mod digits;
pub mod email;

pub use digits::Digits;
pub use email::Email;
