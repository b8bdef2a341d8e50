use std::io::{self, BufRead, Write};

use dara_eval::evaluator::Evaluator;
use dara_parser::parser::Parser;
use dara_value::env::Environment;

use crate::builtin_functions;

const PROMPT: &str = "→ ";

/// Runs the read-eval-print loop until `input` is exhausted.
///
/// Declarations persist between lines: the whole session shares a single
/// global environment. Parser errors are printed and block evaluation of
/// the offending line; runtime errors are printed like any other result.
pub fn run(input: impl BufRead, mut output: impl Write) -> io::Result<()> {
    let evaluator = Evaluator::with_builtins(builtin_functions::default_builtin_vars());
    let env = Environment::new();

    write!(output, "{}", PROMPT)?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        let source = line.as_str().into();
        let mut parser = Parser::new(&source);
        let program = parser.parse_program();

        if !source.has_no_errors() {
            print_parser_errors(&mut output, &source.errors.messages())?;
        } else if !program.statements.is_empty() {
            match evaluator.eval_program(&program, &env) {
                Ok(value) => writeln!(output, "{}", value)?,
                Err(error) => writeln!(output, "{}", error)?,
            }
        }

        write!(output, "{}", PROMPT)?;
        output.flush()?;
    }

    Ok(())
}

fn print_parser_errors(output: &mut impl Write, errors: &[String]) -> io::Result<()> {
    writeln!(output, "  parser errors:")?;
    for message in errors {
        writeln!(output, "\t{}", message)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_session(input: &str) -> String {
        let mut output: Vec<u8> = Vec::new();
        run(input.as_bytes(), &mut output).expect("repl I/O failed");
        String::from_utf8(output).expect("repl output is not utf-8")
    }

    #[test]
    fn test_session_prints_inspected_values() {
        let output = run_session("5 + 5 * 2\nlen(\"hello\")\n");
        assert_eq!(output, "→ 15\n→ 5\n→ ");
    }

    #[test]
    fn test_declarations_persist_between_lines() {
        let output = run_session("a := 5\na = a + 10\na\n");
        assert_eq!(output, "→ 5\n→ 15\n→ 15\n→ ");
    }

    #[test]
    fn test_runtime_errors_are_printed() {
        let output = run_session("foobar\n");
        assert_eq!(output, "→ undeclared name: foobar\n→ ");
    }

    #[test]
    fn test_parser_errors_block_evaluation() {
        let output = run_session("1 +\n");
        assert_eq!(
            output,
            "→   parser errors:\n\tno prefix parse function for EOF\n→ "
        );
    }

    #[test]
    fn test_blank_and_comment_lines_print_nothing() {
        let output = run_session("\n// nothing here\n");
        assert_eq!(output, "→ → → ");
    }

    #[test]
    fn test_nil_result_is_printed() {
        let output = run_session("if false { 10 }\n");
        assert_eq!(output, "→ nil\n→ ");
    }
}
