use std::rc::Rc;

use dara_parser::ast::{Expr, Program, Stmt};
use dara_parser::lexer::Token;
use dara_value::env::Environment;
use dara_value::error::RuntimeError;
use dara_value::object::{NativeFn, Obj, ObjKind};
use dara_value::{BuiltinVars, Value};

use crate::builtins;

/// Result type used by the evaluator.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Outcome of a statement: a plain value, or a `return` travelling towards
/// its function-call boundary.
///
/// Blocks propagate `Return` untouched so that every enclosing block stops
/// too; only the program loop and the call boundary unwrap it. Keeping the
/// two layers distinct is what makes a bare `return` work at the top level
/// while a `return` nested in `if` blocks still exits the whole function.
enum Flow {
    Normal(Value),
    Return(Value),
}

/// Evaluates dara programs against an environment chain.
///
/// The evaluator itself is stateless apart from the builtin registry, which
/// is consulted whenever an identifier resolves in no environment frame.
pub struct Evaluator {
    builtins: BuiltinVars,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    /// An evaluator with the registry every host gets ([`builtins::builtin_vars`]).
    pub fn new() -> Self {
        Self {
            builtins: builtins::builtin_vars(),
        }
    }

    /// An evaluator with a caller-assembled registry.
    pub fn with_builtins(builtins: BuiltinVars) -> Self {
        Self { builtins }
    }

    /// Evaluates a program in `env`, which becomes the outermost scope.
    ///
    /// The result is the value of the last statement (`Nil` for an empty
    /// program), or the unwrapped value of the first top-level `return`.
    /// The first runtime error aborts the remaining walk.
    pub fn eval_program(&self, program: &Program, env: &Rc<Environment>) -> EvalResult<Value> {
        let mut result = Value::Nil;

        for statement in &program.statements {
            match self.eval_stmt(statement, env)? {
                Flow::Return(value) => return Ok(value),
                Flow::Normal(value) => result = value,
            }
        }

        Ok(result)
    }

    /// Like [`Self::eval_program`], but a `Return` is *not* unwrapped; it
    /// propagates so enclosing blocks stop as well.
    fn eval_block(&self, statements: &[Stmt], env: &Rc<Environment>) -> EvalResult<Flow> {
        let mut result = Value::Nil;

        for statement in statements {
            match self.eval_stmt(statement, env)? {
                flow @ Flow::Return(_) => return Ok(flow),
                Flow::Normal(value) => result = value,
            }
        }

        Ok(Flow::Normal(result))
    }

    fn eval_stmt(&self, statement: &Stmt, env: &Rc<Environment>) -> EvalResult<Flow> {
        match statement {
            Stmt::Expr(expr) => Ok(Flow::Normal(self.eval_expr(expr, env)?)),
            Stmt::Block(statements) => self.eval_block(statements, env),
            Stmt::Return(expr) => Ok(Flow::Return(self.eval_expr(expr, env)?)),
            Stmt::If {
                condition,
                consequence,
                alternative,
            } => match self.eval_expr(condition, env)? {
                Value::Bool(true) => self.eval_block(consequence, env),
                Value::Bool(false) => match alternative {
                    // an `else if` is itself an if statement; recurse
                    Some(statement) => self.eval_stmt(statement, env),
                    None => Ok(Flow::Normal(Value::Nil)),
                },
                condition => Err(RuntimeError::new(format!(
                    "type mismatch: non-boolean condition {} ({}) in if statement",
                    condition,
                    condition.type_name()
                ))),
            },
            Stmt::Error => Err(malformed_syntax()),
        }
    }

    fn eval_expr(&self, expr: &Expr, env: &Rc<Environment>) -> EvalResult<Value> {
        match expr {
            Expr::NumberLit(value) => Ok(Value::Number(*value)),
            Expr::BoolLit(value) => Ok(Value::Bool(*value)),
            Expr::StringLit(text) => Ok(Value::Object(Rc::new(Obj::new_string(text.clone())))),
            Expr::NilLit => Ok(Value::Nil),
            Expr::Identifier(name) => self.eval_identifier(name, env),
            Expr::Array(elements) => {
                let elements = elements
                    .iter()
                    .map(|element| self.eval_expr(element, env))
                    .collect::<EvalResult<Vec<_>>>()?;
                Ok(Value::Object(Rc::new(Obj::new_array(elements))))
            }
            Expr::Index { left, index } => {
                let left = self.eval_expr(left, env)?;
                let index = self.eval_expr(index, env)?;
                eval_index_expr(&left, &index)
            }
            Expr::Prefix { op, right } => {
                let right = self.eval_expr(right, env)?;
                eval_prefix_expr(op, &right)
            }
            Expr::Infix { lhs, op, rhs } => {
                let left = self.eval_expr(lhs, env)?;
                let right = self.eval_expr(rhs, env)?;
                eval_infix_expr(op, &left, &right)
            }
            Expr::Declare { name, value } => {
                if env.contains(name) {
                    return Err(RuntimeError::new(format!(
                        "invalid operation: can not redeclare {}",
                        name
                    )));
                }
                let value = self.eval_expr(value, env)?;
                env.set(name.clone(), value.clone());
                Ok(value)
            }
            Expr::Assign { name, value } => {
                if !env.contains(name) {
                    return Err(RuntimeError::new(format!("undeclared name: {}", name)));
                }
                let value = self.eval_expr(value, env)?;
                // writes land in the current frame: assigning to an outer
                // name from inside a call shadows it for the rest of the
                // call instead of mutating the outer binding
                env.set(name.clone(), value.clone());
                Ok(value)
            }
            Expr::Function { params, body } => Ok(Value::Object(Rc::new(Obj::new_fn(
                params.clone(),
                body.clone(),
                env.clone(),
            )))),
            Expr::Call { callee, args } => {
                let callee = self.eval_expr(callee, env)?;
                let mut arguments = Vec::with_capacity(args.len());
                for arg in args {
                    arguments.push(self.eval_expr(arg, env)?);
                }
                self.apply(&callee, arguments)
            }
            Expr::Error => Err(malformed_syntax()),
        }
    }

    fn eval_identifier(&self, name: &str, env: &Rc<Environment>) -> EvalResult<Value> {
        if let Some(value) = env.get(name) {
            return Ok(value);
        }
        if let Some(value) = self.builtins.get(name) {
            return Ok(value);
        }
        Err(RuntimeError::new(format!("undeclared name: {}", name)))
    }

    fn apply(&self, callee: &Value, arguments: Vec<Value>) -> EvalResult<Value> {
        let obj = match callee {
            Value::Object(obj) => obj,
            _ => return Err(not_a_function(callee)),
        };

        match &obj.kind {
            ObjKind::Fn { params, body, env } => {
                if arguments.len() != params.len() {
                    return Err(RuntimeError::new(format!(
                        "invalid operation: wrong number of arguments (expected {}, found {})",
                        params.len(),
                        arguments.len()
                    )));
                }

                // the new frame encloses the *captured* environment, not the
                // caller's
                let call_env = Environment::enclosed(env.clone());
                for (param, value) in params.iter().zip(arguments) {
                    call_env.set(param.clone(), value);
                }

                match self.eval_block(body, &call_env)? {
                    Flow::Return(value) | Flow::Normal(value) => Ok(value),
                }
            }
            ObjKind::NativeFn(NativeFn { func, .. }) => (func)(&arguments),
            _ => Err(not_a_function(callee)),
        }
    }
}

fn eval_prefix_expr(op: &Token, right: &Value) -> EvalResult<Value> {
    match (op, right) {
        (Token::Bang, Value::Bool(value)) => Ok(Value::Bool(!value)),
        (Token::Minus, Value::Number(value)) => Ok(Value::Number(-value)),
        _ => Err(op_not_defined(op, right)),
    }
}

fn eval_infix_expr(op: &Token, left: &Value, right: &Value) -> EvalResult<Value> {
    if let (Value::Number(l), Value::Number(r)) = (left, right) {
        return eval_arithmetic_infix_expr(op, *l, *r, right);
    }
    if let (Some(l), Some(r)) = (left.cast_to_str(), right.cast_to_str()) {
        return eval_string_infix_expr(op, l, r, left);
    }
    if left.type_name() != right.type_name() {
        return Err(RuntimeError::new(format!(
            "type mismatch: {} {} {}",
            left.type_name(),
            op,
            right.type_name()
        )));
    }
    match op {
        Token::Eq => Ok(Value::Bool(values_identical(left, right))),
        Token::NotEq => Ok(Value::Bool(!values_identical(left, right))),
        _ => Err(op_not_defined(op, left)),
    }
}

/// Identity comparison for the operand shapes the number and string tables
/// do not cover: booleans compare as the two singleton truth values, `nil`
/// equals `nil`, and heap values (arrays, functions) compare by reference.
fn values_identical(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Bool(l), Value::Bool(r)) => l == r,
        (Value::Nil, Value::Nil) => true,
        (Value::Object(l), Value::Object(r)) => Rc::ptr_eq(l, r),
        _ => false,
    }
}

fn eval_arithmetic_infix_expr(op: &Token, l: f64, r: f64, right: &Value) -> EvalResult<Value> {
    match op {
        Token::Plus => Ok(Value::Number(l + r)),
        Token::Minus => Ok(Value::Number(l - r)),
        Token::Asterisk => Ok(Value::Number(l * r)),
        // division by zero follows IEEE-754: ±∞ or NaN, never an error
        Token::Slash => Ok(Value::Number(l / r)),
        Token::Percent => Ok(Value::Number(l % r)),
        Token::LessThan => Ok(Value::Bool(l < r)),
        Token::GreaterThan => Ok(Value::Bool(l > r)),
        Token::LessThanEq => Ok(Value::Bool(l <= r)),
        Token::GreaterThanEq => Ok(Value::Bool(l >= r)),
        Token::Eq => Ok(Value::Bool(l == r)),
        Token::NotEq => Ok(Value::Bool(l != r)),
        _ => Err(op_not_defined(op, right)),
    }
}

fn eval_string_infix_expr(op: &Token, l: &str, r: &str, left: &Value) -> EvalResult<Value> {
    match op {
        Token::Plus => Ok(Value::Object(Rc::new(Obj::new_string(format!(
            "{}{}",
            l, r
        ))))),
        Token::LessThan => Ok(Value::Bool(l < r)),
        Token::GreaterThan => Ok(Value::Bool(l > r)),
        Token::LessThanEq => Ok(Value::Bool(l <= r)),
        Token::GreaterThanEq => Ok(Value::Bool(l >= r)),
        Token::Eq => Ok(Value::Bool(l == r)),
        Token::NotEq => Ok(Value::Bool(l != r)),
        _ => Err(op_not_defined(op, left)),
    }
}

fn eval_index_expr(left: &Value, index: &Value) -> EvalResult<Value> {
    if let (Value::Object(obj), Some(idx)) = (left, index.cast_to_number()) {
        if let ObjKind::Array(elements) = &obj.kind {
            let idx = idx as i64; // truncates toward zero
            if idx < 0 || idx as usize >= elements.len() {
                return Ok(Value::Nil); // out of bounds is nil, not an error
            }
            return Ok(elements[idx as usize].clone());
        }
    }

    Err(RuntimeError::new(format!(
        "type mismatch: non-number {} ({}) can not index an array",
        index,
        index.type_name()
    )))
}

fn op_not_defined(op: &Token, value: &Value) -> RuntimeError {
    RuntimeError::new(format!(
        "invalid operation: operator {} is not defined for {} ({})",
        op,
        value,
        value.type_name()
    ))
}

fn not_a_function(value: &Value) -> RuntimeError {
    RuntimeError::new(format!(
        "invalid operation: can not call non-function ({})",
        value.type_name()
    ))
}

fn malformed_syntax() -> RuntimeError {
    // only reachable when a caller evaluates despite recorded parser errors
    RuntimeError::new("invalid operation: can not evaluate malformed syntax")
}
