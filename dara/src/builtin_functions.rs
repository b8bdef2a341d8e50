use dara_eval::builtins;
use dara_value::error::RuntimeError;
use dara_value::{BuiltinVars, Value};

/// Returns the default [`BuiltinVars`] that the repl and the test harness
/// use: the evaluator's own registry (`len`) plus the host functions below.
pub fn default_builtin_vars() -> BuiltinVars {
    let mut builtin_vars = builtins::builtin_vars();
    builtin_vars.add_native_fn("print", &print);
    builtin_vars.add_native_fn("println", &println);
    builtin_vars.add_native_fn("assert_eq", &assert_eq);
    builtin_vars.add_native_fn("assert", &assert);
    builtin_vars
}

pub fn print(args: &[Value]) -> Result<Value, RuntimeError> {
    let arg = single_argument("print", args)?;
    print!("{}", arg);

    Ok(arg.clone())
}

pub fn println(args: &[Value]) -> Result<Value, RuntimeError> {
    let arg = single_argument("println", args)?;
    println!("{}", arg);

    Ok(arg.clone())
}

/// Host-level assertion; a failure is fatal to the harness, not a dara
/// error. Integration tests rely on the panic.
pub fn assert(args: &[Value]) -> Result<Value, RuntimeError> {
    let arg = single_argument("assert", args)?;

    match arg {
        Value::Bool(val) => assert!(*val, "assertion failed"),
        _ => {
            return Err(RuntimeError::new(format!(
                "invalid argument: {} ({}) for assert",
                arg,
                arg.type_name()
            )))
        }
    }
    Ok(Value::Bool(true))
}

pub fn assert_eq(args: &[Value]) -> Result<Value, RuntimeError> {
    if args.len() != 2 {
        return Err(RuntimeError::new(format!(
            "invalid operation: too many arguments for assert_eq (expected {}, found {})",
            2,
            args.len()
        )));
    }

    let left = &args[0];
    let right = &args[1];

    assert_eq!(left, right);
    Ok(Value::Bool(true))
}

fn single_argument<'a>(ident: &str, args: &'a [Value]) -> Result<&'a Value, RuntimeError> {
    if args.len() != 1 {
        return Err(RuntimeError::new(format!(
            "invalid operation: too many arguments for {} (expected {}, found {})",
            ident,
            1,
            args.len()
        )));
    }
    Ok(&args[0])
}
