//! Lexically nested symbol table.
//!
//! Grounded on `original_source/type-inference/scope.py`'s `Scope`: a
//! linked chain of frames, each a name -> type-symbol map. `create` only
//! ever touches the innermost frame; `lookup` walks outward through
//! `parent`. The parent link is a shared, non-owning `Rc`, so a
//! child scope can outlive the statement that created it without an
//! arena.

use std::rc::Rc;

use rustc_hash::FxHashMap;

use mml_parser::TypeCell;

use crate::error::ScopeError;

pub struct Scope {
    parent: Option<Rc<Scope>>,
    symbols: std::cell::RefCell<FxHashMap<String, TypeCell>>,
}

impl Scope {
    /// A fresh, parentless (global) scope.
    pub fn root() -> Rc<Scope> {
        Rc::new(Scope {
            parent: None,
            symbols: std::cell::RefCell::new(FxHashMap::default()),
        })
    }

    /// A child scope nested directly inside `parent`.
    pub fn child(parent: &Rc<Scope>) -> Rc<Scope> {
        Rc::new(Scope {
            parent: Some(Rc::clone(parent)),
            symbols: std::cell::RefCell::new(FxHashMap::default()),
        })
    }

    /// Binds `name` to `cell` in this frame only. Fails if `name` already
    /// exists here; shadowing an outer frame's binding is
    /// allowed.
    pub fn create(&self, name: impl Into<String>, cell: TypeCell) -> Result<(), ScopeError> {
        let name = name.into();
        let mut symbols = self.symbols.borrow_mut();
        if symbols.contains_key(&name) {
            return Err(ScopeError::AlreadyExists(name));
        }
        symbols.insert(name, cell);
        Ok(())
    }

    /// Searches this frame, then each parent in turn, for `name`.
    pub fn lookup(&self, name: &str) -> Result<TypeCell, ScopeError> {
        if let Some(cell) = self.symbols.borrow().get(name) {
            return Ok(Rc::clone(cell));
        }
        match &self.parent {
            Some(parent) => parent.lookup(name),
            None => Err(ScopeError::NotFound(name.to_string())),
        }
    }
}
