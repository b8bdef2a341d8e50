pub mod builtin_functions;
pub mod repl;

use dara_eval::evaluator::Evaluator;
use dara_parser::parser::Parser;
use dara_value::env::Environment;

/// For testing purposes only: runs `source` with the default builtins and
/// panics on parse or runtime errors, so dara-level `assert`/`assert_eq`
/// calls drive the test outcome.
pub fn interpret(source: &str) {
    let source = source.into();
    let mut parser = Parser::new(&source);
    let program = parser.parse_program();

    eprintln!("{}", source.errors);
    assert!(source.has_no_errors());

    let evaluator = Evaluator::with_builtins(builtin_functions::default_builtin_vars());
    let env = Environment::new();
    if let Err(error) = evaluator.eval_program(&program, &env) {
        panic!("{}", error);
    }
}
