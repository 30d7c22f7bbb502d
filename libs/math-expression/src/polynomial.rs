//! Polynomial form of an expression, used to decide mathematical equivalence.

use crate::ast::{format_real, BinaryOperator, MathExpression, UnaryOperator};
use crate::{approximately_equals, FLOAT_EQUALITY_EPSILON};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Largest whole exponent expanded by repeated multiplication.
pub const MAX_POLYNOMIAL_EXPONENT: u32 = 64;

/// Largest number of terms a reduced polynomial may hold.
pub const MAX_POLYNOMIAL_TERMS: usize = 4096;

/// Largest number of term products computed by one multiplication.
const MAX_TERM_PRODUCTS: usize = 65_536;

/// Upper bound on long-division steps.
const MAX_DIVISION_STEPS: usize = 1024;

/// A coefficient times a product of variables raised to whole powers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    pub coefficient: f64,
    pub variables: BTreeMap<String, u32>,
}

impl Term {
    pub fn constant(coefficient: f64) -> Self {
        Self {
            coefficient,
            variables: BTreeMap::new(),
        }
    }

    pub fn degree(&self) -> u32 {
        self.variables.values().sum()
    }

    pub fn is_constant(&self) -> bool {
        self.variables.is_empty()
    }

    fn multiply(&self, other: &Term) -> Term {
        let mut variables = self.variables.clone();
        for (name, power) in &other.variables {
            *variables.entry(name.clone()).or_insert(0) += power;
        }
        Term {
            coefficient: self.coefficient * other.coefficient,
            variables,
        }
    }

    /// Divides by `divisor`, or `None` when a variable power would go negative.
    fn divide(&self, divisor: &Term) -> Option<Term> {
        let mut variables = self.variables.clone();
        for (name, power) in &divisor.variables {
            let remaining = variables.get(name).copied().unwrap_or(0).checked_sub(*power)?;
            if remaining == 0 {
                variables.remove(name);
            } else {
                variables.insert(name.clone(), remaining);
            }
        }
        Some(Term {
            coefficient: self.coefficient / divisor.coefficient,
            variables,
        })
    }
}

/// Graded lexicographic monomial order: higher total degree first, then higher powers of
/// alphabetically earlier variables.
fn monomial_order(a: &Term, b: &Term) -> Ordering {
    b.degree().cmp(&a.degree()).then_with(|| {
        let names: BTreeSet<&String> = a.variables.keys().chain(b.variables.keys()).collect();
        names
            .into_iter()
            .map(|name| {
                let a_power = a.variables.get(name).copied().unwrap_or(0);
                let b_power = b.variables.get(name).copied().unwrap_or(0);
                b_power.cmp(&a_power)
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    })
}

/// A sum of [`Term`]s with like terms combined and terms in graded lexicographic order.
/// The zero polynomial holds a single zero constant term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polynomial {
    terms: Vec<Term>,
}

impl Polynomial {
    pub fn new(terms: Vec<Term>) -> Self {
        let mut coefficients: BTreeMap<BTreeMap<String, u32>, f64> = BTreeMap::new();
        for term in terms {
            *coefficients.entry(term.variables).or_insert(0.0) += term.coefficient;
        }
        let mut combined: Vec<Term> = coefficients
            .into_iter()
            .filter(|(_, coefficient)| coefficient.abs() >= FLOAT_EQUALITY_EPSILON)
            .map(|(variables, coefficient)| Term {
                coefficient,
                variables,
            })
            .collect();
        if combined.is_empty() {
            combined.push(Term::constant(0.0));
        }
        combined.sort_by(monomial_order);
        Self { terms: combined }
    }

    pub fn constant(value: f64) -> Self {
        Self::new(vec![Term::constant(value)])
    }

    pub fn variable(name: &str) -> Self {
        Self::new(vec![Term {
            coefficient: 1.0,
            variables: BTreeMap::from([(name.to_string(), 1)]),
        }])
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn is_constant(&self) -> bool {
        self.terms.iter().all(Term::is_constant)
    }

    pub fn constant_value(&self) -> Option<f64> {
        match self.terms.as_slice() {
            [term] if term.is_constant() => Some(term.coefficient),
            _ => None,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.constant_value() == Some(0.0)
    }

    /// Product of two polynomials, or `None` when the expansion exceeds
    /// [`MAX_POLYNOMIAL_TERMS`] or would compute too many term products.
    pub fn checked_mul(&self, rhs: &Polynomial) -> Option<Polynomial> {
        if self.terms.len() * rhs.terms.len() > MAX_TERM_PRODUCTS {
            return None;
        }
        let product = self * rhs;
        (product.terms.len() <= MAX_POLYNOMIAL_TERMS).then_some(product)
    }

    fn leading_term(&self) -> &Term {
        &self.terms[0]
    }

    /// Exact polynomial division. `None` on division by zero or a non-zero remainder.
    pub fn checked_div(&self, divisor: &Polynomial) -> Option<Polynomial> {
        if divisor.is_zero() {
            return None;
        }
        if let Some(value) = divisor.constant_value() {
            return Some(self * &Polynomial::constant(1.0 / value));
        }
        let divisor_lead = divisor.leading_term();
        let mut remainder = self.clone();
        let mut quotient = Polynomial::constant(0.0);
        for _ in 0..MAX_DIVISION_STEPS {
            if remainder.is_zero() {
                return Some(quotient);
            }
            let factor = Polynomial::new(vec![remainder.leading_term().divide(divisor_lead)?]);
            remainder = &remainder - &(divisor * &factor);
            quotient = &quotient + &factor;
        }
        None
    }

    /// Raises this polynomial to a constant power, or `None` if the result is not a
    /// polynomial.
    pub fn checked_pow(&self, exponent: &Polynomial) -> Option<Polynomial> {
        let power = exponent.constant_value()?;
        if let Some(base) = self.constant_value() {
            let value = base.powf(power);
            return value.is_finite().then(|| Polynomial::constant(value));
        }
        if power.fract() == 0.0 {
            let magnitude = power.abs();
            if magnitude > MAX_POLYNOMIAL_EXPONENT as f64 {
                return None;
            }
            let mut result = Polynomial::constant(1.0);
            for _ in 0..magnitude as u32 {
                result = result.checked_mul(self)?;
            }
            return if power < 0.0 {
                Polynomial::constant(1.0).checked_div(&result)
            } else {
                Some(result)
            };
        }
        let [term] = self.terms.as_slice() else {
            return None;
        };
        let coefficient = term.coefficient.powf(power);
        if !coefficient.is_finite() {
            return None;
        }
        let mut variables = BTreeMap::new();
        for (name, exponent) in &term.variables {
            let scaled = *exponent as f64 * power;
            if scaled.fract() != 0.0 || scaled < 0.0 {
                return None;
            }
            if scaled > 0.0 {
                variables.insert(name.clone(), scaled as u32);
            }
        }
        Some(Polynomial::new(vec![Term {
            coefficient,
            variables,
        }]))
    }

    /// Term-wise comparison within [`FLOAT_EQUALITY_EPSILON`].
    pub fn approximately_equals(&self, other: &Polynomial) -> bool {
        self.terms.len() == other.terms.len()
            && self.terms.iter().zip(&other.terms).all(|(a, b)| {
                a.variables == b.variables && approximately_equals(a.coefficient, b.coefficient)
            })
    }

    /// Whether `self == k * other` for some non-zero `k`.
    pub fn is_scalar_multiple_of(&self, other: &Polynomial) -> bool {
        if self.is_zero() || other.is_zero() || self.terms.len() != other.terms.len() {
            return false;
        }
        let ratio = self.leading_term().coefficient / other.leading_term().coefficient;
        self.terms.iter().zip(&other.terms).all(|(a, b)| {
            a.variables == b.variables && approximately_equals(a.coefficient, ratio * b.coefficient)
        })
    }

    /// Converts an expression into a polynomial, or `None` for non-polynomial shapes
    /// such as division by a variable or variable exponents, and for expansions past
    /// [`MAX_POLYNOMIAL_TERMS`].
    pub fn from_expression(expression: &MathExpression) -> Option<Polynomial> {
        reduce(&expression.strip_groups().replace_square_roots())
    }
}

fn reduce(expression: &MathExpression) -> Option<Polynomial> {
    reduce_unbounded(expression).filter(|polynomial| polynomial.terms.len() <= MAX_POLYNOMIAL_TERMS)
}

fn reduce_unbounded(expression: &MathExpression) -> Option<Polynomial> {
    match expression {
        MathExpression::Constant(value) => Some(Polynomial::constant(*value)),
        MathExpression::Variable(name) => Some(Polynomial::variable(name)),
        MathExpression::Binary { operator, lhs, rhs } => {
            let lhs = reduce(lhs)?;
            let rhs = reduce(rhs)?;
            match operator {
                BinaryOperator::Add => Some(&lhs + &rhs),
                BinaryOperator::Subtract => Some(&lhs - &rhs),
                BinaryOperator::Multiply => lhs.checked_mul(&rhs),
                BinaryOperator::Divide => lhs.checked_div(&rhs),
                BinaryOperator::Exponentiate => lhs.checked_pow(&rhs),
            }
        }
        MathExpression::Unary {
            operator: UnaryOperator::Negate,
            operand,
        } => Some(-&reduce(operand)?),
        MathExpression::Unary {
            operator: UnaryOperator::Positive,
            operand,
        } => reduce(operand),
        MathExpression::FunctionCall { argument, .. } => {
            reduce(argument)?.checked_pow(&Polynomial::constant(0.5))
        }
        MathExpression::Group(inner) => reduce(inner),
    }
}

impl Add for &Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: &Polynomial) -> Polynomial {
        Polynomial::new(self.terms.iter().chain(&rhs.terms).cloned().collect())
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        Polynomial::new(
            self.terms
                .iter()
                .map(|term| Term {
                    coefficient: -term.coefficient,
                    variables: term.variables.clone(),
                })
                .collect(),
        )
    }
}

impl Sub for &Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: &Polynomial) -> Polynomial {
        self + &(-rhs)
    }
}

impl Mul for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: &Polynomial) -> Polynomial {
        let mut terms = Vec::with_capacity(self.terms.len() * rhs.terms.len());
        for a in &self.terms {
            for b in &rhs.terms {
                terms.push(a.multiply(b));
            }
        }
        Polynomial::new(terms)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.coefficient.abs();
        if self.variables.is_empty() || magnitude != 1.0 {
            write!(f, "{}", format_real(magnitude))?;
        }
        for (name, power) in &self.variables {
            if *power == 1 {
                write!(f, "{name}")?;
            } else {
                write!(f, "{name}^{power}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, term) in self.terms.iter().enumerate() {
            let negative = term.coefficient < 0.0;
            match (index, negative) {
                (0, true) => write!(f, "-")?,
                (0, false) => {}
                (_, true) => write!(f, " - ")?,
                (_, false) => write!(f, " + ")?,
            }
            write!(f, "{term}")?;
        }
        Ok(())
    }
}
