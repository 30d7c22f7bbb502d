//! Comparable operation trees: expressions normalised for comparison up to trivial
//! manipulations (reordering, regrouping, double negation).

use crate::ast::{BinaryOperator, MathExpression, MathFunction, UnaryOperator};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One node of a comparable operation tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparableOperation {
    pub is_negated: bool,
    pub is_inverted: bool,
    pub kind: OperationKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Summation(Vec<ComparableOperation>),
    Product(Vec<ComparableOperation>),
    Exponentiation {
        base: Box<ComparableOperation>,
        exponent: Box<ComparableOperation>,
    },
    SquareRoot(Box<ComparableOperation>),
    Constant(f64),
    Variable(String),
}

impl OperationKind {
    fn rank(&self) -> u8 {
        match self {
            Self::Constant(_) => 0,
            Self::Variable(_) => 1,
            Self::Exponentiation { .. } => 2,
            Self::SquareRoot(_) => 3,
            Self::Product(_) => 4,
            Self::Summation(_) => 5,
        }
    }
}

impl ComparableOperation {
    fn new(kind: OperationKind) -> Self {
        Self {
            is_negated: false,
            is_inverted: false,
            kind,
        }
    }

    /// Builds the canonical comparable form of `expression`. Groups are ignored.
    pub fn from_expression(expression: &MathExpression) -> Self {
        convert(&expression.strip_groups()).canonicalize()
    }

    /// Returns the canonical form of this tree: factor negations hoisted onto their
    /// product, same-kind children flattened and every operand list sorted.
    pub fn canonicalize(&self) -> Self {
        let kind = match &self.kind {
            OperationKind::Summation(operands) => {
                let mut flattened = Vec::with_capacity(operands.len());
                for operand in operands.iter().map(Self::canonicalize) {
                    let plain = !operand.is_negated && !operand.is_inverted;
                    match operand.kind {
                        OperationKind::Summation(inner) if plain => flattened.extend(inner),
                        kind => flattened.push(Self { kind, ..operand }),
                    }
                }
                flattened.sort_by(canonical_order);
                OperationKind::Summation(flattened)
            }
            OperationKind::Product(operands) => {
                let mut negations = 0usize;
                let mut flattened = Vec::with_capacity(operands.len());
                for mut operand in operands.iter().map(Self::canonicalize) {
                    if operand.is_negated {
                        negations += 1;
                        operand.is_negated = false;
                    }
                    let plain = !operand.is_inverted;
                    match operand.kind {
                        OperationKind::Product(inner) if plain => flattened.extend(inner),
                        kind => flattened.push(Self { kind, ..operand }),
                    }
                }
                flattened.sort_by(canonical_order);
                return Self {
                    is_negated: self.is_negated ^ (negations % 2 == 1),
                    is_inverted: self.is_inverted,
                    kind: OperationKind::Product(flattened),
                };
            }
            OperationKind::Exponentiation { base, exponent } => OperationKind::Exponentiation {
                base: Box::new(base.canonicalize()),
                exponent: Box::new(exponent.canonicalize()),
            },
            OperationKind::SquareRoot(operand) => {
                OperationKind::SquareRoot(Box::new(operand.canonicalize()))
            }
            OperationKind::Constant(_) | OperationKind::Variable(_) => self.kind.clone(),
        };
        Self {
            is_negated: self.is_negated,
            is_inverted: self.is_inverted,
            kind,
        }
    }

    fn toggle_negation(mut self) -> Self {
        self.is_negated = !self.is_negated;
        self
    }
}

fn convert(expression: &MathExpression) -> ComparableOperation {
    match expression {
        MathExpression::Constant(value) => ComparableOperation::new(OperationKind::Constant(*value)),
        MathExpression::Variable(name) => {
            ComparableOperation::new(OperationKind::Variable(name.clone()))
        }
        MathExpression::Binary { operator, lhs, rhs } => match operator {
            BinaryOperator::Add | BinaryOperator::Subtract => {
                let mut operands = Vec::new();
                push_sum(expression, false, &mut operands);
                ComparableOperation::new(OperationKind::Summation(operands))
            }
            BinaryOperator::Multiply | BinaryOperator::Divide => {
                let mut operands = Vec::new();
                let mut negations = 0usize;
                push_product(expression, false, &mut operands, &mut negations);
                let mut product = ComparableOperation::new(OperationKind::Product(operands));
                product.is_negated = negations % 2 == 1;
                product
            }
            BinaryOperator::Exponentiate => {
                ComparableOperation::new(OperationKind::Exponentiation {
                    base: Box::new(convert(lhs)),
                    exponent: Box::new(convert(rhs)),
                })
            }
        },
        MathExpression::Unary {
            operator: UnaryOperator::Negate,
            operand,
        } => convert(operand).toggle_negation(),
        MathExpression::Unary {
            operator: UnaryOperator::Positive,
            operand,
        } => convert(operand),
        MathExpression::FunctionCall {
            function: MathFunction::SquareRoot,
            argument,
        } => ComparableOperation::new(OperationKind::SquareRoot(Box::new(convert(argument)))),
        MathExpression::Group(inner) => convert(inner),
    }
}

/// Flattens an addition/subtraction chain. Subtraction negates its right operand and
/// distributes that negation over a nested chain.
fn push_sum(expression: &MathExpression, negated: bool, operands: &mut Vec<ComparableOperation>) {
    match expression {
        MathExpression::Binary {
            operator: BinaryOperator::Add,
            lhs,
            rhs,
        } => {
            push_sum(lhs, negated, operands);
            push_sum(rhs, negated, operands);
        }
        MathExpression::Binary {
            operator: BinaryOperator::Subtract,
            lhs,
            rhs,
        } => {
            push_sum(lhs, negated, operands);
            push_sum(rhs, !negated, operands);
        }
        MathExpression::Group(inner) => push_sum(inner, negated, operands),
        _ => {
            let operand = convert(expression);
            operands.push(if negated {
                operand.toggle_negation()
            } else {
                operand
            });
        }
    }
}

/// Flattens a multiplication/division chain. Division inverts its right operand and
/// distributes the inversion over a nested chain; factor negations are counted.
fn push_product(
    expression: &MathExpression,
    inverted: bool,
    operands: &mut Vec<ComparableOperation>,
    negations: &mut usize,
) {
    match expression {
        MathExpression::Binary {
            operator: BinaryOperator::Multiply,
            lhs,
            rhs,
        } => {
            push_product(lhs, inverted, operands, negations);
            push_product(rhs, inverted, operands, negations);
        }
        MathExpression::Binary {
            operator: BinaryOperator::Divide,
            lhs,
            rhs,
        } => {
            push_product(lhs, inverted, operands, negations);
            push_product(rhs, !inverted, operands, negations);
        }
        MathExpression::Group(inner) => push_product(inner, inverted, operands, negations),
        _ => {
            let mut operand = convert(expression);
            if operand.is_negated {
                *negations += 1;
                operand.is_negated = false;
            }
            if inverted {
                operand.is_inverted = !operand.is_inverted;
            }
            operands.push(operand);
        }
    }
}

/// Total order used to sort commutative operand lists.
pub fn canonical_order(a: &ComparableOperation, b: &ComparableOperation) -> Ordering {
    a.kind
        .rank()
        .cmp(&b.kind.rank())
        .then(a.is_negated.cmp(&b.is_negated))
        .then(a.is_inverted.cmp(&b.is_inverted))
        .then_with(|| compare_kinds(&a.kind, &b.kind))
}

fn compare_kinds(a: &OperationKind, b: &OperationKind) -> Ordering {
    match (a, b) {
        (OperationKind::Constant(a), OperationKind::Constant(b)) => a.total_cmp(b),
        (OperationKind::Variable(a), OperationKind::Variable(b)) => a.cmp(b),
        (
            OperationKind::Exponentiation {
                base: a_base,
                exponent: a_exponent,
            },
            OperationKind::Exponentiation {
                base: b_base,
                exponent: b_exponent,
            },
        ) => canonical_order(a_base, b_base).then_with(|| canonical_order(a_exponent, b_exponent)),
        (OperationKind::SquareRoot(a), OperationKind::SquareRoot(b)) => canonical_order(a, b),
        (OperationKind::Summation(a), OperationKind::Summation(b))
        | (OperationKind::Product(a), OperationKind::Product(b)) => compare_lists(a, b),
        _ => a.rank().cmp(&b.rank()),
    }
}

fn compare_lists(a: &[ComparableOperation], b: &[ComparableOperation]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(a, b)| canonical_order(a, b))
        .find(|ordering| ordering.is_ne())
        .unwrap_or_else(|| a.len().cmp(&b.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_algebraic_expression, parse_numeric_expression};
    use crate::ErrorCheckingMode;

    fn algebraic(raw: &str) -> ComparableOperation {
        let allowed: Vec<String> = ["x", "y", "z", "A", "C"].iter().map(|s| s.to_string()).collect();
        let expression =
            parse_algebraic_expression(raw, &allowed, ErrorCheckingMode::RequiredOnly).unwrap();
        ComparableOperation::from_expression(&expression)
    }

    fn numeric(raw: &str) -> ComparableOperation {
        let expression = parse_numeric_expression(raw, ErrorCheckingMode::RequiredOnly).unwrap();
        ComparableOperation::from_expression(&expression)
    }

    #[test]
    fn test_commutative_reordering_matches() {
        assert_eq!(algebraic("x + y"), algebraic("y + x"));
        assert_eq!(algebraic("yx"), algebraic("xy"));
        assert_eq!(algebraic("x*2"), algebraic("2x"));
    }

    #[test]
    fn test_regrouping_matches() {
        assert_eq!(algebraic("x + (y + z)"), algebraic("(x + y) + z"));
        assert_eq!(algebraic("x + (y + z)"), algebraic("x + y + z"));
    }

    #[test]
    fn test_negation_distribution() {
        assert_eq!(numeric("1 + 2"), numeric("1 - (-2)"));
        assert_eq!(algebraic("1 + x"), algebraic("1 - (-x)"));
        assert_eq!(algebraic("6C - (5A + 1)"), algebraic("6C - 5A - 1"));
        assert_eq!(numeric("−(−4) + 6"), numeric("6 − (−4)"));
    }

    #[test]
    fn test_non_trivial_manipulations_differ() {
        assert_ne!(algebraic("x - y"), algebraic("-(y - x)"));
        assert_ne!(numeric("1 - (2 - 3)"), numeric("(1 - 2) - 3"));
        assert_ne!(numeric("2 / (3 / 4)"), numeric("(2 / 3) / 4"));
        assert_ne!(algebraic("x / (y / z)"), algebraic("(x / y) / z"));
        assert_ne!(algebraic("x / 4"), algebraic("x / 2 / 2"));
        assert_ne!(algebraic("x^(2 + 1)"), algebraic("x^3"));
        assert_ne!(algebraic("x * (2^(-1))"), algebraic("x / 2"));
        assert_ne!(numeric("2 + 3"), numeric("5"));
    }

    #[test]
    fn test_negated_factors_hoist_to_product() {
        assert_eq!(algebraic("(-x)(-y)"), algebraic("xy"));
        assert_eq!(algebraic("-x * y"), algebraic("x * (-y)"));
        assert!(algebraic("-x * y").is_negated);
    }

    #[test]
    fn test_canonicalize_is_idempotent() {
        for raw in ["x + (y + z) * 2", "-(x - y) / z", "x^2 + √(y) - 3xy", "(-x)(-y)(-z)"] {
            let canonical = algebraic(raw);
            assert_eq!(canonical.canonicalize(), canonical, "{raw}");
        }
    }

    #[test]
    fn test_canonical_order_sorts_constants_first() {
        let OperationKind::Summation(operands) = algebraic("x + 2").kind else {
            panic!("expected summation");
        };
        assert_eq!(operands[0].kind, OperationKind::Constant(2.0));
        assert_eq!(operands[1].kind, OperationKind::Variable("x".into()));
    }
}
