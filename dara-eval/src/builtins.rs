use dara_value::error::RuntimeError;
use dara_value::object::ObjKind;
use dara_value::{BuiltinVars, Value};

/// The registry every evaluator starts from: name → host function,
/// consulted when an identifier misses the whole environment chain.
///
/// Hosts can extend the returned registry with their own native functions
/// before handing it to [`crate::evaluator::Evaluator::with_builtins`].
pub fn builtin_vars() -> BuiltinVars {
    let mut builtin_vars = BuiltinVars::new();
    builtin_vars.add_native_fn("len", &len);
    builtin_vars
}

/// `len(x)`: the byte length of a string, or the element count of an array.
pub fn len(args: &[Value]) -> Result<Value, RuntimeError> {
    if args.len() != 1 {
        return Err(RuntimeError::new(format!(
            "invalid operation: too many arguments for len (expected {}, found {})",
            1,
            args.len()
        )));
    }

    if let Value::Object(obj) = &args[0] {
        match &obj.kind {
            ObjKind::Str(text) => return Ok(Value::Number(text.len() as f64)),
            ObjKind::Array(elements) => return Ok(Value::Number(elements.len() as f64)),
            _ => {}
        }
    }

    let arg = &args[0];
    Err(RuntimeError::new(format!(
        "invalid argument: {} ({}) for len",
        arg,
        arg.type_name()
    )))
}
