//! Front-end for the dara language: token model, lexer, AST and parser.
//!
//! The pipeline is strictly linear: source text is tokenised by
//! [`lexer::Lexer`], folded into an [`ast::Program`] by [`parser::Parser`],
//! and handed to the evaluator. Diagnostics from both phases accumulate on
//! the shared [`dara_source::Source`] instead of aborting the pass.

#![warn(rust_2018_idioms)]

pub mod ast;
pub mod lexer;
pub mod parser;
