pub mod date;
pub mod len;
pub mod text;
