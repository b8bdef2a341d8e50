//! Tree-walking evaluator for the dara language.
//!
//! [`evaluator::Evaluator`] walks an [`dara_parser::ast::Program`] against a
//! lexically scoped [`dara_value::env::Environment`] and produces a
//! [`dara_value::Value`]. There is no bytecode stage: the AST is the only
//! program representation.

#![warn(rust_2018_idioms)]

pub mod builtins;
pub mod evaluator;
