pub mod cursor;
pub mod microml;
pub mod term;

pub use cursor::Cursor;
