//! Expression trees produced by the parser.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary operators, in the order they appear in the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Exponentiate,
}

impl BinaryOperator {
    /// Canonical ASCII symbol for the operator.
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
            Self::Exponentiate => '^',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOperator {
    Negate,
    Positive,
}

/// Functions the grammar accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MathFunction {
    SquareRoot,
}

/// A parsed math expression.
///
/// Groups are kept as explicit nodes so that callers can distinguish `(x+y)` from
/// `x+y`; use [`MathExpression::strip_groups`] when grouping is irrelevant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MathExpression {
    Constant(f64),
    Variable(String),
    Binary {
        operator: BinaryOperator,
        lhs: Box<MathExpression>,
        rhs: Box<MathExpression>,
    },
    Unary {
        operator: UnaryOperator,
        operand: Box<MathExpression>,
    },
    FunctionCall {
        function: MathFunction,
        argument: Box<MathExpression>,
    },
    Group(Box<MathExpression>),
}

/// A parsed `lhs = rhs` equation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MathEquation {
    pub lhs: MathExpression,
    pub rhs: MathExpression,
}

impl MathExpression {
    pub fn binary(operator: BinaryOperator, lhs: MathExpression, rhs: MathExpression) -> Self {
        Self::Binary {
            operator,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn unary(operator: UnaryOperator, operand: MathExpression) -> Self {
        Self::Unary {
            operator,
            operand: Box::new(operand),
        }
    }

    pub fn square_root(argument: MathExpression) -> Self {
        Self::FunctionCall {
            function: MathFunction::SquareRoot,
            argument: Box::new(argument),
        }
    }

    pub fn group(inner: MathExpression) -> Self {
        Self::Group(Box::new(inner))
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }

    /// Whether this node is a lone constant or variable.
    pub fn is_single_term(&self) -> bool {
        matches!(self, Self::Constant(_) | Self::Variable(_))
    }

    /// Returns a copy of this expression with every group node removed.
    pub fn strip_groups(&self) -> MathExpression {
        self.map_children(&|child| child.strip_groups(), true)
    }

    /// Returns a copy of this expression with only the redundant groups removed.
    ///
    /// A group is redundant when it wraps the whole expression, directly wraps another
    /// group, or wraps a lone constant or variable.
    pub fn strip_redundant_groups(&self) -> MathExpression {
        let mut root = self;
        while let Self::Group(inner) = root {
            root = inner;
        }
        root.strip_nested_redundant_groups()
    }

    fn strip_nested_redundant_groups(&self) -> MathExpression {
        match self {
            Self::Group(inner) => {
                let mut innermost = inner.as_ref();
                while let Self::Group(next) = innermost {
                    innermost = next;
                }
                if innermost.is_single_term() {
                    innermost.clone()
                } else {
                    Self::group(innermost.strip_nested_redundant_groups())
                }
            }
            _ => self.map_children(&|child| child.strip_nested_redundant_groups(), false),
        }
    }

    /// Returns a copy of this expression with `sqrt(e)` rewritten as `e ^ 0.5`.
    pub fn replace_square_roots(&self) -> MathExpression {
        match self {
            Self::FunctionCall {
                function: MathFunction::SquareRoot,
                argument,
            } => Self::binary(
                BinaryOperator::Exponentiate,
                argument.replace_square_roots(),
                Self::Constant(0.5),
            ),
            _ => self.map_children(&|child| child.replace_square_roots(), false),
        }
    }

    /// Whether any variable appears in this expression.
    pub fn contains_variable(&self) -> bool {
        match self {
            Self::Constant(_) => false,
            Self::Variable(_) => true,
            Self::Binary { lhs, rhs, .. } => lhs.contains_variable() || rhs.contains_variable(),
            Self::Unary { operand, .. } => operand.contains_variable(),
            Self::FunctionCall { argument, .. } => argument.contains_variable(),
            Self::Group(inner) => inner.contains_variable(),
        }
    }

    /// Whether any exponentiation appears in this expression.
    pub fn contains_exponentiation(&self) -> bool {
        match self {
            Self::Constant(_) | Self::Variable(_) => false,
            Self::Binary { operator, lhs, rhs } => {
                *operator == BinaryOperator::Exponentiate
                    || lhs.contains_exponentiation()
                    || rhs.contains_exponentiation()
            }
            Self::Unary { operand, .. } => operand.contains_exponentiation(),
            Self::FunctionCall { argument, .. } => argument.contains_exponentiation(),
            Self::Group(inner) => inner.contains_exponentiation(),
        }
    }

    /// Evaluates a variable-free expression, or `None` if it contains variables or is
    /// not a finite real number.
    pub fn evaluate_constant(&self) -> Option<f64> {
        let value = match self {
            Self::Constant(value) => *value,
            Self::Variable(_) => return None,
            Self::Binary { operator, lhs, rhs } => {
                let lhs = lhs.evaluate_constant()?;
                let rhs = rhs.evaluate_constant()?;
                match operator {
                    BinaryOperator::Add => lhs + rhs,
                    BinaryOperator::Subtract => lhs - rhs,
                    BinaryOperator::Multiply => lhs * rhs,
                    BinaryOperator::Divide => lhs / rhs,
                    BinaryOperator::Exponentiate => lhs.powf(rhs),
                }
            }
            Self::Unary { operator, operand } => match operator {
                UnaryOperator::Negate => -operand.evaluate_constant()?,
                UnaryOperator::Positive => operand.evaluate_constant()?,
            },
            Self::FunctionCall {
                function: MathFunction::SquareRoot,
                argument,
            } => argument.evaluate_constant()?.sqrt(),
            Self::Group(inner) => inner.evaluate_constant()?,
        };
        value.is_finite().then_some(value)
    }

    /// Depth-first search for the first group that directly wraps another group.
    pub(crate) fn find_first_multi_redundant_group(&self) -> Option<&MathExpression> {
        match self {
            Self::Group(inner) if inner.is_group() => Some(self),
            _ => self.find_in_children(&|child| child.find_first_multi_redundant_group()),
        }
    }

    /// Depth-first search for the first group around a lone constant or variable.
    pub(crate) fn find_next_redundant_group(&self) -> Option<&MathExpression> {
        match self {
            Self::Group(inner) if inner.is_single_term() => Some(self),
            _ => self.find_in_children(&|child| child.find_next_redundant_group()),
        }
    }

    fn find_in_children<'a>(
        &'a self,
        search: &dyn Fn(&'a MathExpression) -> Option<&'a MathExpression>,
    ) -> Option<&'a MathExpression> {
        match self {
            Self::Constant(_) | Self::Variable(_) => None,
            Self::Binary { lhs, rhs, .. } => search(lhs).or_else(|| search(rhs)),
            Self::Unary { operand, .. } => search(operand),
            Self::FunctionCall { argument, .. } => search(argument),
            Self::Group(inner) => search(inner),
        }
    }

    /// Rebuilds this node with `transform` applied to each child. When `unwrap_groups` is
    /// set, a group node is replaced by its transformed contents.
    fn map_children(
        &self,
        transform: &dyn Fn(&MathExpression) -> MathExpression,
        unwrap_groups: bool,
    ) -> MathExpression {
        match self {
            Self::Constant(_) | Self::Variable(_) => self.clone(),
            Self::Binary { operator, lhs, rhs } => {
                Self::binary(*operator, transform(lhs), transform(rhs))
            }
            Self::Unary { operator, operand } => Self::unary(*operator, transform(operand)),
            Self::FunctionCall { function, argument } => Self::FunctionCall {
                function: *function,
                argument: Box::new(transform(argument)),
            },
            Self::Group(inner) if unwrap_groups => transform(inner),
            Self::Group(inner) => Self::group(transform(inner)),
        }
    }
}

/// Formats a real number without a trailing `.0` for whole values.
pub(crate) fn format_real(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

impl fmt::Display for MathExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(value) => write!(f, "{}", format_real(*value)),
            Self::Variable(name) => write!(f, "{name}"),
            Self::Binary { operator, lhs, rhs } => {
                write!(f, "{lhs} {} {rhs}", operator.symbol())
            }
            Self::Unary {
                operator: UnaryOperator::Negate,
                operand,
            } => write!(f, "-{operand}"),
            Self::Unary {
                operator: UnaryOperator::Positive,
                operand,
            } => write!(f, "+{operand}"),
            Self::FunctionCall {
                function: MathFunction::SquareRoot,
                argument,
            } => write!(f, "sqrt({argument})"),
            Self::Group(inner) => write!(f, "({inner})"),
        }
    }
}

impl fmt::Display for MathEquation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.lhs, self.rhs)
    }
}
