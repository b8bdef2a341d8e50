use dara_source::{Source, SyntaxError};
use logos::Logos;
use std::fmt;
use std::ops::Range;

#[derive(Debug, Logos, Clone, PartialEq)]
#[logos(extras = LexerExtras)]
#[logos(skip r"[ \t\r\f]+")]
pub enum Token {
    // literals
    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse().ok())]
    Number(f64),
    #[regex(r#""[^"]*""#, quoted_string)]
    #[regex(r"'[^']*'", quoted_string)]
    Str(String),

    // identifiers
    #[regex(r"[A-Za-z_][A-Za-z_0-9]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // comments, carrying the trimmed inner text
    #[regex(r"//[^\n]*", line_comment)]
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/", block_comment)]
    Comment(String),

    // unary operators
    #[token("!")]
    Bang,

    // binary operators
    // - arithmetics
    #[token("+")]
    Plus,
    #[token("-")]
    Minus, // can also be unary
    #[token("*")]
    Asterisk,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    // - declaration and assignment
    #[token(":=")]
    Declare,
    #[token("=")]
    Assign,
    // - equality
    #[token("==")]
    Eq,
    #[token("!=")]
    NotEq,
    // - ordering
    #[token(">")]
    GreaterThan,
    #[token(">=")]
    GreaterThanEq,
    #[token("<")]
    LessThan,
    #[token("<=")]
    LessThanEq,
    // - logical
    #[token("&&")]
    And,
    #[token("||")]
    Or,

    // punctuation
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,
    #[token("[")]
    OpenBracket,
    #[token("]")]
    CloseBracket,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,

    // keywords
    #[token("fn")]
    Fn,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("return")]
    Return,
    #[token("nil")]
    Nil,

    /// Characters the grammar has no use for (e.g. a lone `&` or `|`).
    /// Only generated by [`Lexer::next_token`], never by logos itself.
    Illegal(String),
    /// Only generated in the wrapper when the inner lexer is exhausted.
    Eof,

    // Intermediate variants for unterminated literals; [`Lexer::next_token`]
    // converts them into `Str`/`Comment` and records a diagnostic.
    #[doc(hidden)]
    #[regex(r#""[^"]*"#, unterminated_string)]
    #[regex(r"'[^']*", unterminated_string)]
    UnterminatedStr(String),
    #[doc(hidden)]
    #[regex(r"/\*([^*]|\*+[^*/])*\**", unterminated_comment)]
    UnterminatedComment(String),

    // misc
    #[token("\n", newline)]
    Newline,
}

/// State threaded through the logos lexer: the 1-based current line.
pub struct LexerExtras {
    pub line: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line: 1 }
    }
}

fn newline(lex: &mut logos::Lexer<'_, Token>) -> logos::Skip {
    lex.extras.line += 1;
    logos::Skip
}

fn count_lines(lex: &mut logos::Lexer<'_, Token>) {
    lex.extras.line += lex.slice().chars().filter(|&c| c == '\n').count();
}

fn quoted_string(lex: &mut logos::Lexer<'_, Token>) -> String {
    count_lines(lex);
    let slice = lex.slice();
    slice[1..slice.len() - 1].to_string()
}

fn unterminated_string(lex: &mut logos::Lexer<'_, Token>) -> String {
    count_lines(lex);
    lex.slice()[1..].to_string()
}

fn line_comment(lex: &mut logos::Lexer<'_, Token>) -> String {
    lex.slice()[2..].trim().to_string()
}

fn block_comment(lex: &mut logos::Lexer<'_, Token>) -> String {
    count_lines(lex);
    let slice = lex.slice();
    slice[2..slice.len() - 2].trim().to_string()
}

fn unterminated_comment(lex: &mut logos::Lexer<'_, Token>) -> String {
    count_lines(lex);
    lex.slice()[2..].trim().to_string()
}

impl Token {
    /// Returns the binary binding power or `None` if invalid binop token.
    /// Binding power `0` and `1` is reserved for accepting any expression.
    /// Declaration and assignment have the lowest precedence and are
    /// right-associative with `(3, 2)`; `(` and `[` bind tightest so that
    /// calls and indexing fold before any operator.
    pub fn binop_bp(&self) -> Option<(u8, u8)> {
        match self {
            /* Declare / assign */
            Token::Declare | Token::Assign => Some((3, 2)),
            /* Logical */
            Token::Or => Some((4, 5)),
            Token::And => Some((6, 7)),
            /* Equality */
            Token::Eq | Token::NotEq => Some((8, 9)),
            /* Ordering */
            Token::LessThan
            | Token::LessThanEq
            | Token::GreaterThan
            | Token::GreaterThanEq => Some((10, 11)),
            /* Additive */
            Token::Plus | Token::Minus => Some((12, 13)),
            /* Multiplicative */
            Token::Asterisk | Token::Slash | Token::Percent => Some((14, 15)),
            /* Call and index (postfix) */
            Token::OpenParen | Token::OpenBracket => Some((17, 18)),
            _ => None,
        }
    }

    /// Binding power of a prefix operator's operand; between the
    /// multiplicative and the call/index levels, so `-a * b` parses as
    /// `((-a) * b)` while `-f(x)` parses as `(-f(x))`.
    pub const PREFIX_BP: u8 = 16;

    /// The token kind name used in parser diagnostics: the canonical
    /// spelling for operators, delimiters and keywords, an upper-case tag
    /// for everything carrying a literal.
    pub fn kind(&self) -> &'static str {
        match self {
            Token::Number(_) => "NUMBER",
            Token::Str(_) | Token::UnterminatedStr(_) => "STRING",
            Token::Identifier(_) => "IDENT",
            Token::Comment(_) | Token::UnterminatedComment(_) => "COMMENT",
            Token::Illegal(_) => "ILLEGAL",
            Token::Eof => "EOF",
            Token::Newline => "EOF", // never escapes the lexer
            Token::Bang => "!",
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Asterisk => "*",
            Token::Slash => "/",
            Token::Percent => "%",
            Token::Declare => ":=",
            Token::Assign => "=",
            Token::Eq => "==",
            Token::NotEq => "!=",
            Token::GreaterThan => ">",
            Token::GreaterThanEq => ">=",
            Token::LessThan => "<",
            Token::LessThanEq => "<=",
            Token::And => "&&",
            Token::Or => "||",
            Token::OpenParen => "(",
            Token::CloseParen => ")",
            Token::OpenBrace => "{",
            Token::CloseBrace => "}",
            Token::OpenBracket => "[",
            Token::CloseBracket => "]",
            Token::Comma => ",",
            Token::Semi => ";",
            Token::Fn => "fn",
            Token::True => "true",
            Token::False => "false",
            Token::If => "if",
            Token::Else => "else",
            Token::Return => "return",
            Token::Nil => "nil",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(value) => write!(f, "{}", value),
            Token::Str(text) | Token::UnterminatedStr(text) => write!(f, "{}", text),
            Token::Identifier(name) => write!(f, "{}", name),
            Token::Comment(text) | Token::UnterminatedComment(text) => write!(f, "{}", text),
            Token::Illegal(text) => write!(f, "{}", text),
            _ => write!(f, "{}", self.kind()),
        }
    }
}

/// Produces [`Token`]s from a [`Source`], reporting lexical diagnostics
/// (unterminated strings and block comments) to the source's error list.
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, Token>,
    source: &'a Source<'a>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a Source<'a>) -> Self {
        Self {
            inner: Token::lexer(source.content),
            source,
        }
    }

    /// The 1-based line the lexer has advanced to.
    pub fn line(&self) -> usize {
        self.inner.extras.line
    }

    /// Byte span of the most recently produced token.
    pub fn span(&self) -> Range<usize> {
        self.inner.span()
    }

    /// Returns the next token, or `Token::Eof` (repeatedly) at end of input.
    pub fn next_token(&mut self) -> Token {
        match self.inner.next() {
            None => Token::Eof,
            Some(Ok(Token::UnterminatedStr(text))) => {
                self.source
                    .errors
                    .add_error(SyntaxError::new("unterminated string", self.inner.span()));
                Token::Str(text)
            }
            Some(Ok(Token::UnterminatedComment(text))) => {
                self.source.errors.add_error(SyntaxError::new(
                    "unterminated block comment",
                    self.inner.span(),
                ));
                Token::Comment(text)
            }
            Some(Ok(token)) => token,
            Some(Err(())) => Token::Illegal(self.inner.slice().to_string()),
        }
    }

    /// Drains the input, returning every token followed by a final `Eof`.
    pub fn scan(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token == Token::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }
        tokens
    }
}
