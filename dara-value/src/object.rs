use std::fmt;
use std::rc::Rc;

use crate::env::Environment;
use crate::error::RuntimeError;
use crate::Value;

use dara_parser::ast::Stmt;

/// A host function exposed to dara programs.
///
/// Native functions validate their own arity and may fail with the same
/// [`RuntimeError`] type the evaluator uses.
#[derive(Clone)]
pub struct NativeFn {
    pub ident: String,
    pub func: &'static (dyn Fn(&[Value]) -> Result<Value, RuntimeError>),
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFn").field("ident", &self.ident).finish()
    }
}

#[derive(Clone)]
pub enum ObjKind {
    Str(String),
    Array(Vec<Value>),
    Fn {
        params: Vec<String>,
        body: Vec<Stmt>,
        /// The environment captured when the literal was evaluated; this is
        /// what makes the function a closure.
        env: Rc<Environment>,
    },
    NativeFn(NativeFn),
}

impl PartialEq for ObjKind {
    fn eq(&self, other: &ObjKind) -> bool {
        match (self, other) {
            (Self::Str(l), Self::Str(r)) => l == r,
            (Self::Array(l), Self::Array(r)) => l == r,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Obj {
    pub kind: ObjKind,
}

impl Obj {
    pub fn new_string(str: String) -> Self {
        Self {
            kind: ObjKind::Str(str),
        }
    }

    pub fn new_array(elements: Vec<Value>) -> Self {
        Self {
            kind: ObjKind::Array(elements),
        }
    }

    pub fn new_fn(params: Vec<String>, body: Vec<Stmt>, env: Rc<Environment>) -> Self {
        Self {
            kind: ObjKind::Fn { params, body, env },
        }
    }
}

impl fmt::Display for Obj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ObjKind::Str(str) => write!(f, "\"{}\"", str),
            ObjKind::Array(elements) => {
                write!(f, "[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                write!(f, "]")
            }
            ObjKind::Fn { params, body, .. } => {
                write!(f, "fn (")?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", param)?;
                }
                write!(f, ") {{\n")?;
                for stmt in body {
                    write!(f, "{}", stmt)?;
                }
                write!(f, "\n}}")
            }
            ObjKind::NativeFn(NativeFn { ident, .. }) => write!(f, "<native fn {}>", ident),
        }
    }
}

impl fmt::Debug for ObjKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(str) => f.debug_tuple("Str").field(str).finish(),
            Self::Array(elements) => f.debug_tuple("Array").field(elements).finish(),
            Self::Fn { params, .. } => f.debug_struct("Fn").field("params", params).finish(),
            Self::NativeFn(native) => native.fmt(f),
        }
    }
}
