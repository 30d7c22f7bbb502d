//! Error types for math-expression.

use thiserror::Error;

/// Result type alias using MathParsingError.
pub type Result<T> = std::result::Result<T, MathParsingError>;

/// Errors that can occur while parsing a raw math expression or equation.
///
/// Each variant corresponds to a learner-facing mistake. Variants marked as
/// optional are only raised when parsing with [`ErrorCheckingMode::AllErrors`].
///
/// [`ErrorCheckingMode::AllErrors`]: crate::ErrorCheckingMode::AllErrors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MathParsingError {
    #[error("invalid expression")]
    GenericError,

    #[error("unbalanced parentheses")]
    UnbalancedParentheses,

    #[error("numbers must not be separated by spaces")]
    SpacesBetweenNumbers,

    #[error("unnecessary symbol: {0}")]
    UnnecessarySymbol(String),

    #[error("number {number} must come before variable {variable}")]
    NumberAfterVariable { number: String, variable: String },

    #[error("variables are not allowed in numeric expressions")]
    VariableInNumericExpression,

    #[error("variables not allowed here: {}", .0.join(", "))]
    DisabledVariablesInUse(Vec<String>),

    #[error("unsupported function: {0}")]
    InvalidFunctionInUse(String),

    #[error("function name is incomplete")]
    FunctionNameIncomplete,

    #[error("square root is missing an argument")]
    HangingSquareRoot,

    #[error("operator {0} has nothing before it")]
    NoVariableOrNumberBeforeBinaryOperator(char),

    #[error("operator {0} has nothing after it")]
    NoVariableOrNumberAfterBinaryOperator(char),

    #[error("equation is missing an equals sign")]
    EquationIsMissingEquals,

    #[error("equation has more than one equals sign")]
    EquationHasTooManyEquals,

    #[error("equation is missing a side")]
    EquationMissingLhsOrRhs,

    // Optional errors.
    #[error("redundant parentheses around the whole expression: {0}")]
    SingleRedundantParentheses(String),

    #[error("multiple redundant parentheses: {0}")]
    MultipleRedundantParentheses(String),

    #[error("redundant parentheses around an individual term: {0}")]
    RedundantParenthesesForIndividualTerms(String),

    #[error("operators {first} and {second} must not follow each other")]
    SubsequentBinaryOperators { first: char, second: char },

    #[error("repeated unary operators")]
    SubsequentUnaryOperators,

    #[error("term divided by zero")]
    TermDividedByZero,

    #[error("exponents must not contain variables")]
    ExponentIsVariableExpression,

    #[error("exponent is too large")]
    ExponentTooLarge,

    #[error("nested exponents are not allowed")]
    NestedExponents,
}

impl MathParsingError {
    /// Whether this error is only reported in [`ErrorCheckingMode::AllErrors`].
    ///
    /// [`ErrorCheckingMode::AllErrors`]: crate::ErrorCheckingMode::AllErrors
    pub fn is_optional(&self) -> bool {
        matches!(
            self,
            Self::SingleRedundantParentheses(_)
                | Self::MultipleRedundantParentheses(_)
                | Self::RedundantParenthesesForIndividualTerms(_)
                | Self::SubsequentBinaryOperators { .. }
                | Self::SubsequentUnaryOperators
                | Self::TermDividedByZero
                | Self::ExponentIsVariableExpression
                | Self::ExponentTooLarge
                | Self::NestedExponents
        )
    }
}
