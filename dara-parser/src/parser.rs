use crate::ast::{Program, Stmt};
use crate::lexer::{Lexer, Token};
use dara_source::{Source, SyntaxError};
use std::mem;

mod expr;
mod stmt;

/// A Pratt parser over [`Lexer`].
///
/// Errors are collected on the shared [`Source`], never thrown; the parser
/// recovers as best it can and keeps going, so a single pass reports as many
/// problems as possible. Callers check [`Source::has_no_errors`] before
/// evaluating the produced [`Program`].
pub struct Parser<'a> {
    /// Cached token for peeking.
    current_token: Token,
    lexer: Lexer<'a>,
    /// Source code
    source: &'a Source<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a Source<'a>) -> Self {
        let mut lexer = Lexer::new(source);
        Self {
            current_token: lexer.next_token(),
            lexer,
            source,
        }
    }

    pub fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();

        while self.current_token != Token::Eof {
            if let Token::Comment(_) = self.current_token {
                self.next(); // comments are skipped at statement boundaries
                continue;
            }
            statements.push(self.parse_statement());
        }

        Program { statements }
    }
}

/// Parse utilities
impl<'a> Parser<'a> {
    fn next(&mut self) -> Token {
        let token = self.lexer.next_token();
        mem::replace(&mut self.current_token, token)
    }

    /// Predicate that tests whether the current token has the same
    /// discriminant and eats it if yes as a side effect.
    fn eat(&mut self, tok: Token) -> bool {
        if mem::discriminant(&self.current_token) == mem::discriminant(&tok) {
            self.next(); // eat token
            true
        } else {
            false
        }
    }

    /// Like [`Self::eat`], but records an error when the current token does
    /// not match.
    fn expect(&mut self, tok: Token) -> bool {
        if self.eat(tok.clone()) {
            true
        } else {
            self.error(format!(
                "expected next token to be {}, got {}",
                tok.kind(),
                self.current_token.kind()
            ));
            false
        }
    }

    fn error(&self, message: impl ToString) {
        self.source
            .errors
            .add_error(SyntaxError::new(message, self.lexer.span()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &Source<'_>) -> Program {
        Parser::new(source).parse_program()
    }

    #[test]
    fn test_errors_are_collected_not_thrown() {
        let source: Source<'_> = "a := ; 1 + 2;".into();
        let program = parse(&source);

        assert_eq!(
            source.errors.messages(),
            vec!["no prefix parse function for ;"]
        );
        // the parser recovered and still produced the second statement
        assert_eq!(program.statements.len(), 2);
        assert_eq!(program.statements[1].to_string(), "(1 + 2)");
    }

    #[test]
    fn test_expected_token_error() {
        let source: Source<'_> = "add(1, 2".into();
        parse(&source);

        assert_eq!(
            source.errors.messages(),
            vec!["expected next token to be ), got EOF"]
        );
    }

    #[test]
    fn test_missing_block_error() {
        let source: Source<'_> = "if x < y x".into();
        parse(&source);

        assert_eq!(
            source.errors.messages()[0],
            "expected next token to be {, got IDENT"
        );
    }

    #[test]
    fn test_non_identifier_binding_target() {
        let source: Source<'_> = "5 := 3;".into();
        parse(&source);

        assert_eq!(
            source.errors.messages(),
            vec!["expected identifier on left of :=/="]
        );

        let source: Source<'_> = "a + b = 3;".into();
        parse(&source);

        assert_eq!(
            source.errors.messages(),
            vec!["expected identifier on left of :=/="]
        );
    }

    #[test]
    fn test_print_then_reparse_is_idempotent() {
        let inputs = [
            "a := 5; if a > 2 { return a; } else { a = 3; } add(a, [1, 2][0])",
            "adder := fn(x) { fn(y) { x + y } }; adder(1)(2);",
            "if x { 1 } else if y { 2 } else { 3 }",
            "!-a",
            "b % 2 == 0;",
        ];

        for input in inputs {
            let source: Source<'_> = input.into();
            let program = parse(&source);
            assert!(source.has_no_errors(), "unexpected errors for {:?}", input);

            let printed = program.to_string();
            let reparsed_source: Source<'_> = printed.as_str().into();
            let reparsed = parse(&reparsed_source);
            assert!(reparsed_source.has_no_errors(), "reprinted {:?}", printed);
            assert_eq!(reparsed.to_string(), printed);
        }
    }

    #[test]
    fn test_illegal_token_reports_no_prefix_fn() {
        let source: Source<'_> = "1 + & 2;".into();
        parse(&source);

        assert_eq!(
            source.errors.messages(),
            vec!["no prefix parse function for ILLEGAL"]
        );
    }
}
