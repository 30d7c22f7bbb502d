//! Rules for numeric expressions, algebraic expressions and math equations.
//!
//! Answers and references that fail to parse, or that have no polynomial form when one
//! is needed, are reported to diagnostics and never match.

use super::{math_answer, math_input, RuleClassifier, RuleInputs};
use crate::diagnostics::DiagnosticsSink;
use crate::error::Result;
use crate::settings::ClassifierSettings;
use crate::types::{ClassificationContext, InteractionObject};
use math_expression::{
    ComparableOperation, ErrorCheckingMode, ExpressionParser, MathEquation, MathExpression,
    Polynomial,
};
use std::sync::Arc;

/// Which grammar answers are parsed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpressionMode {
    Numeric,
    Algebraic,
    Equation,
}

impl ExpressionMode {
    pub fn interaction_id(self) -> &'static str {
        match self {
            Self::Numeric => "NumericExpressionInput",
            Self::Algebraic => "AlgebraicExpressionInput",
            Self::Equation => "MathEquationInput",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathRule {
    MatchesExactlyWith,
    MatchesUpToTrivialManipulations,
    IsEquivalentTo,
}

impl MathRule {
    pub fn rule_type(self) -> &'static str {
        match self {
            Self::MatchesExactlyWith => "MatchesExactlyWith",
            Self::MatchesUpToTrivialManipulations => "MatchesUpToTrivialManipulations",
            Self::IsEquivalentTo => "IsEquivalentTo",
        }
    }

    pub fn all() -> [MathRule; 3] {
        [
            Self::MatchesExactlyWith,
            Self::MatchesUpToTrivialManipulations,
            Self::IsEquivalentTo,
        ]
    }
}

enum Parsed {
    Expression(MathExpression),
    Equation(MathEquation),
}

/// One math rule bound to one interaction's grammar.
pub struct MathRuleClassifier {
    rule: MathRule,
    mode: ExpressionMode,
    tag: String,
    parser: Arc<dyn ExpressionParser>,
    diagnostics: Arc<dyn DiagnosticsSink>,
    settings: ClassifierSettings,
}

impl MathRuleClassifier {
    pub fn new(
        rule: MathRule,
        mode: ExpressionMode,
        parser: Arc<dyn ExpressionParser>,
        diagnostics: Arc<dyn DiagnosticsSink>,
        settings: ClassifierSettings,
    ) -> Self {
        Self {
            rule,
            mode,
            tag: format!("{}.{}", mode.interaction_id(), rule.rule_type()),
            parser,
            diagnostics,
            settings,
        }
    }

    fn parse(
        &self,
        raw: &str,
        allowed_variables: &[String],
        checking: ErrorCheckingMode,
        role: &str,
    ) -> Option<Parsed> {
        let parsed = match self.mode {
            ExpressionMode::Numeric => self
                .parser
                .parse_numeric_expression(raw, checking)
                .map(Parsed::Expression),
            ExpressionMode::Algebraic => self
                .parser
                .parse_algebraic_expression(raw, allowed_variables, checking)
                .map(Parsed::Expression),
            ExpressionMode::Equation => self
                .parser
                .parse_algebraic_equation(raw, allowed_variables, checking)
                .map(Parsed::Equation),
        };
        match parsed {
            Ok(parsed) => Some(parsed),
            Err(error) => {
                self.diagnostics
                    .report(&self.tag, &format!("failed to parse {role} '{raw}': {error}"));
                None
            }
        }
    }

    fn polynomial(&self, expression: &MathExpression) -> Option<Polynomial> {
        let polynomial = Polynomial::from_expression(expression);
        if polynomial.is_none() {
            self.diagnostics.report(
                &self.tag,
                &format!("expression '{expression}' has no polynomial form"),
            );
        }
        polynomial
    }

    fn compare_expressions(&self, answer: &MathExpression, reference: &MathExpression) -> bool {
        match self.rule {
            MathRule::MatchesExactlyWith => *answer == reference.strip_redundant_groups(),
            MathRule::MatchesUpToTrivialManipulations => {
                ComparableOperation::from_expression(answer)
                    == ComparableOperation::from_expression(reference)
            }
            MathRule::IsEquivalentTo => match (self.polynomial(answer), self.polynomial(reference)) {
                (Some(answer), Some(reference)) => answer.approximately_equals(&reference),
                _ => false,
            },
        }
    }

    fn compare_equations(&self, answer: &MathEquation, reference: &MathEquation) -> bool {
        match self.rule {
            MathRule::MatchesExactlyWith => {
                answer.lhs == reference.lhs.strip_redundant_groups()
                    && answer.rhs == reference.rhs.strip_redundant_groups()
            }
            MathRule::MatchesUpToTrivialManipulations => {
                let answer_lhs = ComparableOperation::from_expression(&answer.lhs);
                let answer_rhs = ComparableOperation::from_expression(&answer.rhs);
                let reference_lhs = ComparableOperation::from_expression(&reference.lhs);
                let reference_rhs = ComparableOperation::from_expression(&reference.rhs);
                (answer_lhs == reference_lhs && answer_rhs == reference_rhs)
                    || (answer_lhs == reference_rhs && answer_rhs == reference_lhs)
            }
            MathRule::IsEquivalentTo => {
                match (self.equation_polynomial(answer), self.equation_polynomial(reference)) {
                    (Some(answer), Some(reference)) => answer.is_scalar_multiple_of(&reference),
                    _ => false,
                }
            }
        }
    }

    /// `lhs - rhs` as a polynomial.
    fn equation_polynomial(&self, equation: &MathEquation) -> Option<Polynomial> {
        let lhs = self.polynomial(&equation.lhs)?;
        let rhs = self.polynomial(&equation.rhs)?;
        Some(&lhs - &rhs)
    }
}

impl RuleClassifier for MathRuleClassifier {
    fn matches(
        &self,
        answer: &InteractionObject,
        inputs: &RuleInputs,
        context: &ClassificationContext,
    ) -> Result<bool> {
        let answer_raw = math_answer(answer)?;
        let reference_raw = math_input(inputs, "x")?;
        let allowed_variables = context.allowed_variables(&self.settings.allowed_variables_arg);

        let Some(answer) = self.parse(
            answer_raw,
            &allowed_variables,
            self.settings.answer_error_checking,
            "answer",
        ) else {
            return Ok(false);
        };
        let Some(reference) = self.parse(
            reference_raw,
            &allowed_variables,
            self.settings.reference_error_checking,
            "reference",
        ) else {
            return Ok(false);
        };

        Ok(match (&answer, &reference) {
            (Parsed::Expression(answer), Parsed::Expression(reference)) => {
                self.compare_expressions(answer, reference)
            }
            (Parsed::Equation(answer), Parsed::Equation(reference)) => {
                self.compare_equations(answer, reference)
            }
            _ => false,
        })
    }
}
