pub mod diagnostics;
pub mod span;
pub mod term;
pub mod ty;

pub use diagnostics::Diagnostic;
pub use span::{LineIndex, Span};
pub use term::{Term, TermKind};
pub use ty::Type;
