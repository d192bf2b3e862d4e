//! The Micro-ML type language: type variables, nullary
//! constants, a binary curried function constructor, and a unary list
//! constructor.
//!
//! Grounded on `original_source/type-inference/constructs.py`
//! (`TypeVariable` / `TypeConstant` / `TypeApplication` / `TypeList`),
//! adapted to Rust's boxed-recursive-enum idiom the way this workspace's
//! `ty.rs` modules represent their own type languages.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Var(String),
    Con(String),
    /// `arg -> ret`, curried: `a -> b -> c` is `App(a, App(b, c))`.
    App(Box<Type>, Box<Type>),
    List(Box<Type>),
}

impl Type {
    pub fn var(name: impl Into<String>) -> Self {
        Type::Var(name.into())
    }

    pub fn con(name: impl Into<String>) -> Self {
        Type::Con(name.into())
    }

    pub fn app(arg: Type, ret: Type) -> Self {
        Type::App(Box::new(arg), Box::new(ret))
    }

    pub fn list(el: Type) -> Self {
        Type::List(Box::new(el))
    }

    pub fn int() -> Self {
        Type::con("int")
    }

    pub fn real() -> Self {
        Type::con("real")
    }

    pub fn bool() -> Self {
        Type::con("bool")
    }

    pub fn unit() -> Self {
        Type::con("unit")
    }

    pub fn is_app(&self) -> bool {
        matches!(self, Type::App(_, _))
    }

    /// Curries `params -> ... -> ret`, right-associatively, defaulting to
    /// `unit -> ret` for a nullary parameter list.
    pub fn curried_fn(params: &[Type], ret: Type) -> Self {
        if params.is_empty() {
            return Type::app(Type::unit(), ret);
        }
        let mut result = ret;
        for param in params.iter().rev() {
            result = Type::app(param.clone(), result);
        }
        result
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_with(f, &mut PolyVarNamer::default())
    }
}

impl Type {
    fn write_with(&self, f: &mut fmt::Formatter<'_>, namer: &mut PolyVarNamer) -> fmt::Result {
        match self {
            Type::Var(name) => write!(f, "{}", namer.name_for(name)),
            Type::Con(name) => write!(f, "{name}"),
            Type::App(arg, ret) => {
                if arg.is_app() {
                    write!(f, "(")?;
                    arg.write_with(f, namer)?;
                    write!(f, ")")?;
                } else {
                    arg.write_with(f, namer)?;
                }
                write!(f, " -> ")?;
                ret.write_with(f, namer)
            }
            Type::List(el) => {
                if el.is_app() {
                    write!(f, "(")?;
                    el.write_with(f, namer)?;
                    write!(f, ")[]")
                } else {
                    el.write_with(f, namer)?;
                    write!(f, "[]")
                }
            }
        }
    }

    /// Render with explicit `'a, 'b, ...` polymorphic-variable renaming by
    /// first appearance, rather than printing raw variable
    /// names.
    pub fn to_principal_string(&self) -> String {
        let mut namer = PolyVarNamer::default();
        let mut buf = PrincipalBuf(String::new());
        self.write_principal(&mut buf, &mut namer);
        buf.0
    }

    fn write_principal(&self, buf: &mut PrincipalBuf, namer: &mut PolyVarNamer) {
        match self {
            Type::Var(name) => buf.0.push_str(namer.name_for(name)),
            Type::Con(name) => buf.0.push_str(name),
            Type::App(arg, ret) => {
                if arg.is_app() {
                    buf.0.push('(');
                    arg.write_principal(buf, namer);
                    buf.0.push(')');
                } else {
                    arg.write_principal(buf, namer);
                }
                buf.0.push_str(" -> ");
                ret.write_principal(buf, namer);
            }
            Type::List(el) => {
                if el.is_app() {
                    buf.0.push('(');
                    el.write_principal(buf, namer);
                    buf.0.push_str(")[]");
                } else {
                    el.write_principal(buf, namer);
                    buf.0.push_str("[]");
                }
            }
        }
    }
}

struct PrincipalBuf(String);

/// Allocates `'a, 'b, 'c, ...` names to type-variable names, in order of
/// first appearance. Grounded on `constructs.py`'s `PolymorphicTypeVar`.
#[derive(Default)]
struct PolyVarNamer {
    next: usize,
    names: Vec<(String, String)>,
}

impl PolyVarNamer {
    fn name_for(&mut self, var_name: &str) -> &str {
        if let Some(idx) = self.names.iter().position(|(k, _)| k == var_name) {
            return &self.names[idx].1;
        }
        let letter = (b'a' + (self.next % 26) as u8) as char;
        let suffix = self.next / 26;
        let rendered = if suffix == 0 {
            format!("'{letter}")
        } else {
            format!("'{letter}{suffix}")
        };
        self.next += 1;
        self.names.push((var_name.to_string(), rendered));
        &self.names.last().unwrap().1
    }
}
