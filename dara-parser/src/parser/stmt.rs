use super::*;

impl<'a> Parser<'a> {
    /// Parses a statement.
    pub fn parse_statement(&mut self) -> Stmt {
        match self.current_token {
            Token::Return => self.parse_return_stmt(),
            Token::If => self.parse_if_stmt(),
            _ => {
                // expression statement; the trailing `;` is optional
                let expr = self.parse_expr();
                let stmt = Stmt::Expr(expr);
                self.eat(Token::Semi);
                stmt
            }
        }
    }

    /// Parses a brace-delimited statement list.
    /// The surrounding construct (an `if` arm or a function body) owns the
    /// braces; the returned statements do not include them.
    pub fn parse_block(&mut self) -> Vec<Stmt> {
        self.expect(Token::OpenBrace);

        let mut body = Vec::new();
        loop {
            if self.eat(Token::CloseBrace) {
                break;
            }
            if self.current_token == Token::Eof {
                self.error(format!(
                    "expected next token to be {}, got {}",
                    Token::CloseBrace.kind(),
                    Token::Eof.kind()
                ));
                break;
            }
            if let Token::Comment(_) = self.current_token {
                self.next();
                continue;
            }
            body.push(self.parse_statement());
        }

        body
    }

    fn parse_return_stmt(&mut self) -> Stmt {
        self.next(); // eat `return`
        let expr = self.parse_expr();
        self.eat(Token::Semi);
        Stmt::Return(expr)
    }

    /// Parses `if <expr> { … }` with an optional `else` arm, which is either
    /// another `if` (an `else if` chain) or a block.
    fn parse_if_stmt(&mut self) -> Stmt {
        self.next(); // eat `if`
        let condition = self.parse_expr();
        let consequence = self.parse_block();

        let alternative = if self.eat(Token::Else) {
            if self.current_token == Token::If {
                Some(Box::new(self.parse_if_stmt()))
            } else {
                Some(Box::new(Stmt::Block(self.parse_block())))
            }
        } else {
            None
        };

        Stmt::If {
            condition,
            consequence,
            alternative,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Expr;
    use dara_source::Source;

    fn parse(input: &str) -> Program {
        let source: Source<'_> = input.into();
        let program = Parser::new(&source).parse_program();
        assert!(
            source.has_no_errors(),
            "unexpected parse errors: {:?}",
            source.errors.messages()
        );
        program
    }

    fn single_statement(input: &str) -> Stmt {
        let mut program = parse(input);
        assert_eq!(program.statements.len(), 1, "for {:?}", input);
        program.statements.pop().unwrap()
    }

    #[test]
    fn test_return_stmt() {
        assert_eq!(
            single_statement("return 5;"),
            Stmt::Return(Expr::NumberLit(5.0))
        );
        assert_eq!(
            single_statement("return true;"),
            Stmt::Return(Expr::BoolLit(true))
        );
        assert_eq!(
            single_statement("return y;"),
            Stmt::Return(Expr::Identifier("y".to_string()))
        );
        // the trailing semicolon is optional
        assert_eq!(
            single_statement("return 1 + 2"),
            Stmt::Return(Expr::Infix {
                lhs: Box::new(Expr::NumberLit(1.0)),
                op: Token::Plus,
                rhs: Box::new(Expr::NumberLit(2.0)),
            })
        );
    }

    #[test]
    fn test_if_stmt() {
        match single_statement("if x < y { x; }") {
            Stmt::If {
                condition,
                consequence,
                alternative,
            } => {
                assert_eq!(condition.to_string(), "(x < y)");
                assert_eq!(
                    consequence,
                    vec![Stmt::Expr(Expr::Identifier("x".to_string()))]
                );
                assert_eq!(alternative, None);
            }
            other => panic!("not an if statement: {:?}", other),
        }
    }

    #[test]
    fn test_if_else_stmt() {
        match single_statement("if x < y { x } else { y }") {
            Stmt::If { alternative, .. } => {
                assert_eq!(
                    alternative.as_deref(),
                    Some(&Stmt::Block(vec![Stmt::Expr(Expr::Identifier(
                        "y".to_string()
                    ))]))
                );
            }
            other => panic!("not an if statement: {:?}", other),
        }
    }

    #[test]
    fn test_if_else_if_else_stmt() {
        match single_statement("if x < y { x } else if x > y { y } else { z }") {
            Stmt::If { alternative, .. } => match alternative.as_deref() {
                Some(Stmt::If {
                    condition,
                    consequence,
                    alternative,
                }) => {
                    assert_eq!(condition.to_string(), "(x > y)");
                    assert_eq!(
                        *consequence,
                        vec![Stmt::Expr(Expr::Identifier("y".to_string()))]
                    );
                    assert_eq!(
                        alternative.as_deref(),
                        Some(&Stmt::Block(vec![Stmt::Expr(Expr::Identifier(
                            "z".to_string()
                        ))]))
                    );
                }
                other => panic!("alternative is not an else-if: {:?}", other),
            },
            other => panic!("not an if statement: {:?}", other),
        }
    }

    #[test]
    fn test_comments_skipped_at_statement_boundaries() {
        let program = parse("// leading\n1 + 1;\n// trailing");
        assert_eq!(program.statements.len(), 1);
        assert_eq!(program.to_string(), "(1 + 1)");

        let program = parse("if true { // inside\n 1; }");
        assert_eq!(program.to_string(), "if true { 1 }");
    }

    #[test]
    fn test_expression_statements_with_and_without_semicolons() {
        let program = parse("1 + 1\n2 * 2;");
        assert_eq!(program.statements.len(), 2);
        assert_eq!(program.to_string(), "(1 + 1)(2 * 2)");
    }
}
