//! Recursive-descent parser for numeric expressions, algebraic expressions and
//! algebraic equations.

use crate::ast::{BinaryOperator, MathEquation, MathExpression, UnaryOperator};
use crate::error::{MathParsingError, Result};
use crate::tokenizer::{LetterMode, Token, Tokenizer, KNOWN_FUNCTIONS};
use serde::{Deserialize, Serialize};

/// Largest constant exponent accepted when checking all errors.
const MAX_CHECKED_EXPONENT: f64 = 5.0;

/// Which parse errors are raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCheckingMode {
    /// Only errors that make the input unparseable.
    RequiredOnly,
    /// Required errors plus stylistic ones such as redundant parentheses.
    AllErrors,
}

impl ErrorCheckingMode {
    pub fn includes_optional_errors(self) -> bool {
        self == Self::AllErrors
    }
}

/// Converts raw text into expression trees.
pub trait ExpressionParser: Send + Sync {
    fn parse_numeric_expression(
        &self,
        raw: &str,
        mode: ErrorCheckingMode,
    ) -> Result<MathExpression>;

    fn parse_algebraic_expression(
        &self,
        raw: &str,
        allowed_variables: &[String],
        mode: ErrorCheckingMode,
    ) -> Result<MathExpression>;

    fn parse_algebraic_equation(
        &self,
        raw: &str,
        allowed_variables: &[String],
        mode: ErrorCheckingMode,
    ) -> Result<MathEquation>;
}

/// The default [`ExpressionParser`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MathExpressionParser;

impl MathExpressionParser {
    pub fn new() -> Self {
        Self
    }
}

impl ExpressionParser for MathExpressionParser {
    fn parse_numeric_expression(
        &self,
        raw: &str,
        mode: ErrorCheckingMode,
    ) -> Result<MathExpression> {
        parse_numeric_expression(raw, mode)
    }

    fn parse_algebraic_expression(
        &self,
        raw: &str,
        allowed_variables: &[String],
        mode: ErrorCheckingMode,
    ) -> Result<MathExpression> {
        parse_algebraic_expression(raw, allowed_variables, mode)
    }

    fn parse_algebraic_equation(
        &self,
        raw: &str,
        allowed_variables: &[String],
        mode: ErrorCheckingMode,
    ) -> Result<MathEquation> {
        parse_algebraic_equation(raw, allowed_variables, mode)
    }
}

/// Parses an expression that may only contain numbers.
pub fn parse_numeric_expression(raw: &str, mode: ErrorCheckingMode) -> Result<MathExpression> {
    let tokens = Tokenizer::new(raw, LetterMode::Numeric).tokenize()?;
    check_balanced(&tokens)?;
    if tokens.iter().any(|t| matches!(t, Token::Variable(_))) {
        return Err(MathParsingError::VariableInNumericExpression);
    }
    parse_side(&tokens, false, mode)
}

/// Parses an expression over `allowed_variables`. Any other variable is rejected.
pub fn parse_algebraic_expression(
    raw: &str,
    allowed_variables: &[String],
    mode: ErrorCheckingMode,
) -> Result<MathExpression> {
    let tokens = Tokenizer::new(raw, LetterMode::Algebraic(allowed_variables)).tokenize()?;
    check_balanced(&tokens)?;
    check_allowed_variables(&tokens, allowed_variables)?;
    parse_side(&tokens, true, mode)
}

/// Parses `lhs = rhs` where both sides are algebraic expressions.
pub fn parse_algebraic_equation(
    raw: &str,
    allowed_variables: &[String],
    mode: ErrorCheckingMode,
) -> Result<MathEquation> {
    let tokens = Tokenizer::new(raw, LetterMode::Algebraic(allowed_variables)).tokenize()?;
    let equals: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| **t == Token::Equals)
        .map(|(i, _)| i)
        .collect();
    let split = match equals.as_slice() {
        [] => return Err(MathParsingError::EquationIsMissingEquals),
        [index] => *index,
        _ => return Err(MathParsingError::EquationHasTooManyEquals),
    };
    let (lhs_tokens, rhs_tokens) = (&tokens[..split], &tokens[split + 1..]);
    if lhs_tokens.is_empty() || rhs_tokens.is_empty() {
        return Err(MathParsingError::EquationMissingLhsOrRhs);
    }
    check_balanced(lhs_tokens)?;
    check_balanced(rhs_tokens)?;
    check_allowed_variables(&tokens, allowed_variables)?;
    Ok(MathEquation {
        lhs: parse_side(lhs_tokens, true, mode)?,
        rhs: parse_side(rhs_tokens, true, mode)?,
    })
}

fn check_balanced(tokens: &[Token]) -> Result<()> {
    let mut depth = 0usize;
    for token in tokens {
        match token {
            Token::LeftParen => depth += 1,
            Token::RightParen => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(MathParsingError::UnbalancedParentheses)?;
            }
            _ => {}
        }
    }
    if depth == 0 {
        Ok(())
    } else {
        Err(MathParsingError::UnbalancedParentheses)
    }
}

fn check_allowed_variables(tokens: &[Token], allowed: &[String]) -> Result<()> {
    let mut disallowed: Vec<String> = Vec::new();
    for token in tokens {
        if let Token::Variable(name) = token {
            if !allowed.contains(name) && !disallowed.contains(name) {
                disallowed.push(name.clone());
            }
        }
    }
    if disallowed.is_empty() {
        Ok(())
    } else {
        Err(MathParsingError::DisabledVariablesInUse(disallowed))
    }
}

fn parse_side(tokens: &[Token], algebraic: bool, mode: ErrorCheckingMode) -> Result<MathExpression> {
    if tokens.is_empty() {
        return Err(MathParsingError::GenericError);
    }
    let mut parser = Parser {
        tokens,
        index: 0,
        algebraic,
        mode,
    };
    let expression = parser.parse_expression()?;
    if let Some(leftover) = parser.peek() {
        return Err(parser.unexpected(leftover));
    }
    if mode.includes_optional_errors() {
        check_optional_errors(&expression)?;
    }
    Ok(expression)
}

struct Parser<'a> {
    tokens: &'a [Token],
    index: usize,
    algebraic: bool,
    mode: ErrorCheckingMode,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.index)
    }

    fn previous(&self) -> Option<&'a Token> {
        self.index.checked_sub(1).and_then(|i| self.tokens.get(i))
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.index);
        if token.is_some() {
            self.index += 1;
        }
        token
    }

    /// expression = mult_div { ("+" | "-") mult_div }
    fn parse_expression(&mut self) -> Result<MathExpression> {
        let mut lhs = self.parse_mult_div()?;
        loop {
            let operator = match self.peek() {
                Some(Token::Plus) => BinaryOperator::Add,
                Some(Token::Minus) => BinaryOperator::Subtract,
                _ => break,
            };
            self.advance();
            self.check_subsequent_binary(operator.symbol())?;
            let rhs = self.parse_mult_div()?;
            lhs = MathExpression::binary(operator, lhs, rhs);
        }
        Ok(lhs)
    }

    /// mult_div = exp { ("*" | "/") exp | implicit_rhs }
    fn parse_mult_div(&mut self) -> Result<MathExpression> {
        let mut lhs = self.parse_exponentiation()?;
        loop {
            let rhs = match self.peek() {
                Some(Token::Multiply) | Some(Token::Divide) => {
                    let operator = if self.peek() == Some(&Token::Multiply) {
                        BinaryOperator::Multiply
                    } else {
                        BinaryOperator::Divide
                    };
                    self.advance();
                    self.check_subsequent_binary(operator.symbol())?;
                    let rhs = self.parse_exponentiation()?;
                    lhs = MathExpression::binary(operator, lhs, rhs);
                    continue;
                }
                Some(Token::LeftParen)
                | Some(Token::SquareRoot)
                | Some(Token::Function(_))
                | Some(Token::IncompleteFunction) => self.parse_implicit_rhs()?,
                Some(Token::Variable(_)) if self.algebraic => self.parse_implicit_rhs()?,
                Some(Token::Number { text, .. }) => {
                    return Err(match self.previous() {
                        Some(Token::Number { .. }) => MathParsingError::SpacesBetweenNumbers,
                        Some(Token::Variable(variable)) => MathParsingError::NumberAfterVariable {
                            number: text.clone(),
                            variable: variable.clone(),
                        },
                        _ => MathParsingError::GenericError,
                    });
                }
                _ => break,
            };
            lhs = MathExpression::binary(BinaryOperator::Multiply, lhs, rhs);
        }
        Ok(lhs)
    }

    /// implicit_rhs = term_no_unary_no_number [ "^" exp ]
    fn parse_implicit_rhs(&mut self) -> Result<MathExpression> {
        let base = self.parse_term_without_unary_or_number()?;
        self.parse_optional_exponent(base)
    }

    /// exp = term_with_unary [ "^" exp ]
    fn parse_exponentiation(&mut self) -> Result<MathExpression> {
        let base = self.parse_term_with_unary()?;
        self.parse_optional_exponent(base)
    }

    fn parse_optional_exponent(&mut self, base: MathExpression) -> Result<MathExpression> {
        if self.peek() != Some(&Token::Exponentiate) {
            return Ok(base);
        }
        self.advance();
        self.check_subsequent_binary('^')?;
        let exponent = self.parse_exponentiation()?;
        Ok(MathExpression::binary(
            BinaryOperator::Exponentiate,
            base,
            exponent,
        ))
    }

    /// term_with_unary = ("-" | "+") mult_div | number | term_no_unary_no_number
    fn parse_term_with_unary(&mut self) -> Result<MathExpression> {
        match self.peek() {
            Some(Token::Minus) | Some(Token::Plus) => {
                let operator = if self.peek() == Some(&Token::Minus) {
                    UnaryOperator::Negate
                } else {
                    UnaryOperator::Positive
                };
                self.advance();
                if self.mode.includes_optional_errors()
                    && matches!(self.peek(), Some(Token::Minus) | Some(Token::Plus))
                {
                    return Err(MathParsingError::SubsequentUnaryOperators);
                }
                let operand = self.parse_mult_div()?;
                Ok(MathExpression::unary(operator, operand))
            }
            Some(Token::Number { value, .. }) => {
                self.advance();
                Ok(MathExpression::Constant(*value))
            }
            _ => self.parse_term_without_unary_or_number(),
        }
    }

    /// term_no_unary_no_number = function "(" expression ")" | "(" expression ")"
    ///                         | "√" term_with_unary | variable
    fn parse_term_without_unary_or_number(&mut self) -> Result<MathExpression> {
        let Some(token) = self.peek() else {
            return Err(self.missing_operand());
        };
        match token {
            Token::LeftParen => {
                self.advance();
                let inner = self.parse_parenthesized()?;
                Ok(MathExpression::group(inner))
            }
            Token::Function(name) => {
                self.advance();
                if name != "sqrt" {
                    return Err(MathParsingError::InvalidFunctionInUse(name.clone()));
                }
                if self.advance() != Some(&Token::LeftParen) {
                    return Err(MathParsingError::GenericError);
                }
                let argument = self.parse_parenthesized()?;
                Ok(MathExpression::square_root(argument))
            }
            Token::IncompleteFunction => Err(MathParsingError::FunctionNameIncomplete),
            Token::SquareRoot => {
                self.advance();
                match self.peek() {
                    None | Some(Token::RightParen) | Some(Token::Equals) => {
                        Err(MathParsingError::HangingSquareRoot)
                    }
                    Some(t) if t.operator_symbol().is_some() && !is_unary_capable(t) => {
                        Err(MathParsingError::HangingSquareRoot)
                    }
                    _ => {
                        let argument = self.parse_term_with_unary()?;
                        Ok(MathExpression::square_root(argument))
                    }
                }
            }
            Token::Variable(name) => {
                if !self.algebraic {
                    return Err(MathParsingError::VariableInNumericExpression);
                }
                self.advance();
                Ok(MathExpression::Variable(name.clone()))
            }
            other => Err(self.unexpected(other)),
        }
    }

    /// Parses `expression ")"` after an opening parenthesis was consumed.
    fn parse_parenthesized(&mut self) -> Result<MathExpression> {
        if self.peek() == Some(&Token::RightParen) {
            return Err(MathParsingError::GenericError);
        }
        let inner = self.parse_expression()?;
        match self.advance() {
            Some(Token::RightParen) => Ok(inner),
            _ => Err(MathParsingError::UnbalancedParentheses),
        }
    }

    fn check_subsequent_binary(&self, first: char) -> Result<()> {
        let Some(next) = self.peek() else {
            return Err(MathParsingError::NoVariableOrNumberAfterBinaryOperator(first));
        };
        // A following `+` or `-` is unary and parsed as part of the operand.
        match next {
            Token::Multiply | Token::Divide | Token::Exponentiate
                if self.mode.includes_optional_errors() =>
            {
                Err(MathParsingError::SubsequentBinaryOperators {
                    first,
                    second: next.operator_symbol().unwrap_or('*'),
                })
            }
            Token::Multiply
            | Token::Divide
            | Token::Exponentiate
            | Token::Equals
            | Token::RightParen => Err(MathParsingError::NoVariableOrNumberAfterBinaryOperator(first)),
            _ => Ok(()),
        }
    }

    /// Error for a term position with no tokens left.
    fn missing_operand(&self) -> MathParsingError {
        match self.previous().and_then(Token::operator_symbol) {
            Some(symbol) => MathParsingError::NoVariableOrNumberAfterBinaryOperator(symbol),
            None => MathParsingError::GenericError,
        }
    }

    /// Error for a token that cannot start or continue a term.
    fn unexpected(&self, token: &Token) -> MathParsingError {
        match token {
            Token::RightParen | Token::LeftParen => MathParsingError::UnbalancedParentheses,
            Token::Multiply | Token::Divide | Token::Exponentiate | Token::Equals => {
                let symbol = token.operator_symbol().unwrap_or('=');
                match self.previous().and_then(Token::operator_symbol) {
                    Some(previous) => MathParsingError::NoVariableOrNumberAfterBinaryOperator(previous),
                    None => MathParsingError::NoVariableOrNumberBeforeBinaryOperator(symbol),
                }
            }
            Token::Function(name) if !KNOWN_FUNCTIONS.contains(&name.as_str()) => {
                MathParsingError::InvalidFunctionInUse(name.clone())
            }
            _ => MathParsingError::GenericError,
        }
    }
}

fn is_unary_capable(token: &Token) -> bool {
    matches!(token, Token::Plus | Token::Minus)
}

/// Stylistic checks run on a successfully parsed tree.
fn check_optional_errors(expression: &MathExpression) -> Result<()> {
    if expression.is_group() {
        return Err(MathParsingError::SingleRedundantParentheses(
            expression.to_string(),
        ));
    }
    if let Some(group) = expression.find_first_multi_redundant_group() {
        return Err(MathParsingError::MultipleRedundantParentheses(
            group.to_string(),
        ));
    }
    if let Some(group) = expression.find_next_redundant_group() {
        return Err(MathParsingError::RedundantParenthesesForIndividualTerms(
            group.to_string(),
        ));
    }
    check_operator_errors(expression)
}

fn check_operator_errors(expression: &MathExpression) -> Result<()> {
    match expression {
        MathExpression::Constant(_) | MathExpression::Variable(_) => Ok(()),
        MathExpression::Binary { operator, lhs, rhs } => {
            match operator {
                BinaryOperator::Divide if rhs.evaluate_constant() == Some(0.0) => {
                    return Err(MathParsingError::TermDividedByZero);
                }
                BinaryOperator::Exponentiate => {
                    if rhs.contains_variable() {
                        return Err(MathParsingError::ExponentIsVariableExpression);
                    }
                    if rhs.contains_exponentiation() {
                        return Err(MathParsingError::NestedExponents);
                    }
                    if rhs
                        .evaluate_constant()
                        .is_some_and(|value| value > MAX_CHECKED_EXPONENT)
                    {
                        return Err(MathParsingError::ExponentTooLarge);
                    }
                }
                _ => {}
            }
            check_operator_errors(lhs)?;
            check_operator_errors(rhs)
        }
        MathExpression::Unary { operand, .. } => check_operator_errors(operand),
        MathExpression::FunctionCall { argument, .. } => check_operator_errors(argument),
        MathExpression::Group(inner) => check_operator_errors(inner),
    }
}
