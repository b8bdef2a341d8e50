use std::error::Error;
use std::fmt;

/// A runtime failure produced while evaluating a dara program.
///
/// The message is the exact user-visible text; the REPL prints it verbatim
/// and tests assert on it. Runtime errors short-circuit the remaining walk
/// but are never fatal to the interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeError {
    message: String,
}

impl RuntimeError {
    pub fn new(message: impl ToString) -> Self {
        Self {
            message: message.to_string(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for RuntimeError {}
