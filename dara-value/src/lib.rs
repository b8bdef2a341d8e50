//! Runtime value model for the dara language.
//!
//! Numbers, booleans and `nil` are inline [`Value`] variants; strings,
//! arrays, functions and native functions live on the heap behind
//! `Rc<Obj>`, so cloning a value is cheap and `==`/`!=` on heap values can
//! compare identity via [`std::rc::Rc::ptr_eq`].

pub mod env;
pub mod error;
pub mod object;

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::object::{NativeFn, Obj, ObjKind};

#[derive(Clone)]
pub enum Value {
    Number(f64),
    Bool(bool),
    Nil,
    Object(Rc<Obj>),
}

impl Value {
    /// The type tag used in runtime error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Bool(_) => "boolean",
            Self::Nil => "nil",
            Self::Object(obj) => match &obj.kind {
                ObjKind::Str(_) => "string",
                ObjKind::Array(_) => "array",
                ObjKind::Fn { .. } => "fn",
                ObjKind::NativeFn(_) => "builtin",
            },
        }
    }

    /// Attempts to cast the `Value` into a `&str` or `None` if wrong type.
    pub fn cast_to_str(&self) -> Option<&str> {
        match self {
            Self::Object(obj) => match &obj.kind {
                ObjKind::Str(string) => Some(string),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn cast_to_number(&self) -> Option<f64> {
        match self {
            Self::Number(val) => Some(*val),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(l), Self::Number(r)) => l == r,
            (Self::Bool(l), Self::Bool(r)) => l == r,
            (Self::Nil, Self::Nil) => true,
            (Self::Object(l), Self::Object(r)) => Rc::ptr_eq(l, r) || l.kind == r.kind,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(val) => write!(f, "{}", val),
            Value::Bool(val) => write!(f, "{}", val),
            Value::Nil => write!(f, "nil"),
            Value::Object(val) => write!(f, "{}", val),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Registry of host functions, consulted by the evaluator when an
/// identifier resolves in no environment frame.
///
/// Values are wrapped once at registration so that every lookup hands out
/// the same `Rc`, keeping identity comparison stable.
pub struct BuiltinVars {
    values: HashMap<String, Value>,
}

impl BuiltinVars {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    pub fn add_native_fn(
        &mut self,
        ident: &str,
        func: &'static (dyn Fn(&[Value]) -> Result<Value, RuntimeError>),
    ) {
        let obj = Obj {
            kind: ObjKind::NativeFn(NativeFn {
                ident: ident.to_string(),
                func,
            }),
        };
        self.values.insert(ident.to_string(), Value::Object(Rc::new(obj)));
    }

    pub fn get(&self, ident: &str) -> Option<Value> {
        self.values.get(ident).cloned()
    }
}

impl Default for BuiltinVars {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BuiltinVars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuiltinVars")
            .field("idents", &self.values.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::Environment;
    use dara_parser::ast::{Expr, Stmt};

    #[test]
    fn test_inspect_forms() {
        assert_eq!(Value::Number(5.0).to_string(), "5");
        assert_eq!(Value::Number(10.5).to_string(), "10.5");
        assert_eq!(Value::Number(2.2).to_string(), "2.2");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Nil.to_string(), "nil");
        assert_eq!(
            Value::Object(Rc::new(Obj::new_string("hi".to_string()))).to_string(),
            "\"hi\""
        );
        assert_eq!(
            Value::Object(Rc::new(Obj::new_array(vec![
                Value::Number(1.0),
                Value::Nil,
            ])))
            .to_string(),
            "[1, nil]"
        );
    }

    #[test]
    fn test_function_inspect() {
        let env = Environment::new();
        let body = vec![Stmt::Expr(Expr::Infix {
            lhs: Box::new(Expr::Identifier("x".to_string())),
            op: dara_parser::lexer::Token::Plus,
            rhs: Box::new(Expr::Identifier("y".to_string())),
        })];
        let func = Value::Object(Rc::new(Obj::new_fn(
            vec!["x".to_string(), "y".to_string()],
            body,
            env,
        )));

        assert_eq!(func.to_string(), "fn (x, y) {\n(x + y)\n}");
        assert_eq!(func.type_name(), "fn");
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Number(1.0).type_name(), "number");
        assert_eq!(Value::Bool(false).type_name(), "boolean");
        assert_eq!(Value::Nil.type_name(), "nil");
        assert_eq!(
            Value::Object(Rc::new(Obj::new_string(String::new()))).type_name(),
            "string"
        );
        assert_eq!(
            Value::Object(Rc::new(Obj::new_array(Vec::new()))).type_name(),
            "array"
        );
    }

    #[test]
    fn test_equality() {
        assert_eq!(Value::Number(2.0), Value::Number(2.0));
        assert_ne!(Value::Number(2.0), Value::Bool(true));
        assert_eq!(Value::Nil, Value::Nil);

        let a = Value::Object(Rc::new(Obj::new_array(vec![Value::Number(1.0)])));
        let same = a.clone();
        assert_eq!(a, same); // identity
        let structural = Value::Object(Rc::new(Obj::new_array(vec![Value::Number(1.0)])));
        assert_eq!(a, structural); // arrays also compare element-wise

        let s1 = Value::Object(Rc::new(Obj::new_string("a".to_string())));
        let s2 = Value::Object(Rc::new(Obj::new_string("a".to_string())));
        assert_eq!(s1, s2);
    }

    #[test]
    fn test_builtin_vars_hand_out_the_same_object() {
        fn noop(_args: &[Value]) -> Result<Value, RuntimeError> {
            Ok(Value::Nil)
        }

        let mut builtins = BuiltinVars::new();
        builtins.add_native_fn("noop", &noop);

        let first = builtins.get("noop").unwrap();
        let second = builtins.get("noop").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.type_name(), "builtin");
        assert!(builtins.get("missing").is_none());
    }
}
