//! Math expression parsing and canonical forms.
//!
//! This crate turns learner-entered math text into expression trees and offers two
//! comparison forms on top of them:
//! - [`ComparableOperation`] for equality up to reordering and regrouping
//! - [`Polynomial`] for full mathematical equivalence

pub mod ast;
pub mod comparable;
pub mod error;
pub mod parser;
pub mod polynomial;
mod tokenizer;

pub use ast::{BinaryOperator, MathEquation, MathExpression, MathFunction, UnaryOperator};
pub use comparable::{ComparableOperation, OperationKind};
pub use error::{MathParsingError, Result};
pub use parser::{
    parse_algebraic_equation, parse_algebraic_expression, parse_numeric_expression,
    ErrorCheckingMode, ExpressionParser, MathExpressionParser,
};
pub use polynomial::{Polynomial, Term, MAX_POLYNOMIAL_EXPONENT, MAX_POLYNOMIAL_TERMS};

/// Absolute tolerance for real-number equality. The interval is open.
pub const FLOAT_EQUALITY_EPSILON: f64 = 1e-5;

/// Whether `a` and `b` differ by strictly less than [`FLOAT_EQUALITY_EPSILON`].
pub fn approximately_equals(a: f64, b: f64) -> bool {
    (a - b).abs() < FLOAT_EQUALITY_EPSILON
}
