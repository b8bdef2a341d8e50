use crate::ast::Expr;

use super::*;

impl<'a> Parser<'a> {
    /* Expressions */
    /// Parses any expression.
    /// This is equivalent to calling [`Self::parse_expr_bp`] with `min_bp = 0`.
    pub fn parse_expr(&mut self) -> Expr {
        self.parse_expr_bp(0) // 0 to accept any expression
    }

    /// Parses a primary (atom) expression.
    fn parse_primary_expr(&mut self) -> Expr {
        // NOTE: prefix operators are handled here
        match self.current_token.clone() {
            Token::Number(value) => {
                self.next();
                Expr::NumberLit(value)
            }
            Token::Str(text) => {
                self.next();
                Expr::StringLit(text)
            }
            Token::True => {
                self.next();
                Expr::BoolLit(true)
            }
            Token::False => {
                self.next();
                Expr::BoolLit(false)
            }
            Token::Nil => {
                self.next();
                Expr::NilLit
            }
            Token::Identifier(name) => {
                self.next();
                Expr::Identifier(name)
            }
            Token::Bang | Token::Minus => self.parse_prefix_expr(),
            Token::OpenParen => self.parse_grouped_expr(),
            Token::OpenBracket => self.parse_array_literal(),
            Token::Fn => self.parse_fn_literal(),
            token => {
                self.error(format!("no prefix parse function for {}", token.kind()));
                self.next(); // skip the unusable token so parsing always makes progress
                Expr::Error
            }
        }
    }

    /// Parses an expression with the specified `min_bp`.
    /// To parse any expression, use [`Self::parse_expr`].
    fn parse_expr_bp(&mut self, min_bp: u8) -> Expr {
        let mut lhs = self.parse_primary_expr();

        loop {
            let (l_bp, r_bp) = match self.current_token.binop_bp() {
                Some(bp) => bp,
                None => break, // not a valid binop, stop parsing
            };
            if l_bp < min_bp {
                break; // less than the min_bp, stop parsing
            }

            // self.current_token is a valid binop (or postfix `(` / `[`)
            match self.current_token.clone() {
                Token::OpenParen => {
                    self.next();
                    let args = self.parse_expr_list(Token::CloseParen);
                    lhs = Expr::Call {
                        callee: Box::new(lhs),
                        args,
                    };
                }
                Token::OpenBracket => {
                    self.next();
                    let index = self.parse_expr();
                    self.expect(Token::CloseBracket);
                    lhs = Expr::Index {
                        left: Box::new(lhs),
                        index: Box::new(index),
                    };
                }
                Token::Declare => {
                    self.next();
                    let value = self.parse_expr_bp(r_bp);
                    lhs = self.make_binding(lhs, value, true);
                }
                Token::Assign => {
                    self.next();
                    let value = self.parse_expr_bp(r_bp);
                    lhs = self.make_binding(lhs, value, false);
                }
                op => {
                    self.next();
                    let rhs = self.parse_expr_bp(r_bp);
                    lhs = Expr::Infix {
                        lhs: Box::new(lhs),
                        op,
                        rhs: Box::new(rhs),
                    };
                }
            }
        }

        lhs
    }

    /// Folds `lhs (:=|=) value`; the left-hand side must be an identifier.
    fn make_binding(&mut self, lhs: Expr, value: Expr, declare: bool) -> Expr {
        let name = match lhs {
            Expr::Identifier(name) => name,
            _ => {
                self.error("expected identifier on left of :=/=");
                return Expr::Error;
            }
        };
        let value = Box::new(value);
        if declare {
            Expr::Declare { name, value }
        } else {
            Expr::Assign { name, value }
        }
    }

    fn parse_prefix_expr(&mut self) -> Expr {
        let op = self.next();
        let right = self.parse_expr_bp(Token::PREFIX_BP);
        Expr::Prefix {
            op,
            right: Box::new(right),
        }
    }

    fn parse_grouped_expr(&mut self) -> Expr {
        self.next(); // eat `(`
        let expr = self.parse_expr();
        self.expect(Token::CloseParen);
        expr
    }

    fn parse_array_literal(&mut self) -> Expr {
        self.next(); // eat `[`
        Expr::Array(self.parse_expr_list(Token::CloseBracket))
    }

    fn parse_fn_literal(&mut self) -> Expr {
        self.next(); // eat `fn`
        self.expect(Token::OpenParen);

        let mut params = Vec::new();
        if !self.eat(Token::CloseParen) {
            loop {
                if let Token::Identifier(name) = self.current_token.clone() {
                    self.next();
                    params.push(name);
                } else {
                    self.error(format!(
                        "expected next token to be IDENT, got {}",
                        self.current_token.kind()
                    ));
                    return Expr::Error;
                }

                if self.eat(Token::CloseParen) {
                    break;
                } else if !self.eat(Token::Comma) {
                    self.expect(Token::CloseParen);
                    break;
                }
            }
        }

        let body = self.parse_block();
        Expr::Function { params, body }
    }

    /// Parses a comma-separated expression list terminated by `end`.
    fn parse_expr_list(&mut self, end: Token) -> Vec<Expr> {
        let mut items = Vec::new();

        if !self.eat(end.clone()) {
            loop {
                items.push(self.parse_expr());

                if self.eat(end.clone()) {
                    break;
                } else if !self.eat(Token::Comma) {
                    self.expect(end);
                    break;
                }
            }
        }

        items
    }
}
