pub mod ast;
pub mod error;
pub mod microml_syntax;
pub mod term_syntax;

pub use ast::{Expr, FunctionDefinition, TypeCell};
pub use error::ParseError;
pub use microml_syntax::parse_program;
pub use term_syntax::{parse_term, parse_term_list};
