//! Term unification (Robinson, equation-list, multiequation) and
//! Hindley-Milner-style type inference for Micro-ML.

pub mod eqlist;
pub mod error;
pub mod generator;
pub mod infer;
pub mod multieq;
pub mod robinson;
pub mod scope;
pub mod subst;
pub mod term_eqlist;
pub mod uf;

pub use error::{InferError, ScopeError, TypeError, UnifyError};
pub use infer::{infer_definition, infer_program};
pub use multieq::Multiequation;
pub use scope::Scope;
