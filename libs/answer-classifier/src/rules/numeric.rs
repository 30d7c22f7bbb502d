//! `NumericInput` rules.

use super::{real_answer, real_input, RuleClassifier, RuleInputs};
use crate::error::Result;
use crate::types::{ClassificationContext, InteractionObject};
use math_expression::approximately_equals;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericRule {
    Equals,
    IsLessThan,
    IsGreaterThan,
    IsLessThanOrEqualTo,
    IsGreaterThanOrEqualTo,
    IsInclusivelyBetween,
    IsWithinTolerance,
}

impl NumericRule {
    pub fn rule_type(self) -> &'static str {
        match self {
            Self::Equals => "Equals",
            Self::IsLessThan => "IsLessThan",
            Self::IsGreaterThan => "IsGreaterThan",
            Self::IsLessThanOrEqualTo => "IsLessThanOrEqualTo",
            Self::IsGreaterThanOrEqualTo => "IsGreaterThanOrEqualTo",
            Self::IsInclusivelyBetween => "IsInclusivelyBetween",
            Self::IsWithinTolerance => "IsWithinTolerance",
        }
    }

    pub fn all() -> [NumericRule; 7] {
        [
            Self::Equals,
            Self::IsLessThan,
            Self::IsGreaterThan,
            Self::IsLessThanOrEqualTo,
            Self::IsGreaterThanOrEqualTo,
            Self::IsInclusivelyBetween,
            Self::IsWithinTolerance,
        ]
    }
}

impl RuleClassifier for NumericRule {
    fn matches(
        &self,
        answer: &InteractionObject,
        inputs: &RuleInputs,
        _context: &ClassificationContext,
    ) -> Result<bool> {
        let answer = real_answer(answer)?;
        let matched = match self {
            Self::Equals => approximately_equals(answer, real_input(inputs, "x")?),
            Self::IsLessThan => answer < real_input(inputs, "x")?,
            Self::IsGreaterThan => answer > real_input(inputs, "x")?,
            Self::IsLessThanOrEqualTo => answer <= real_input(inputs, "x")?,
            Self::IsGreaterThanOrEqualTo => answer >= real_input(inputs, "x")?,
            Self::IsInclusivelyBetween => {
                let lower = real_input(inputs, "a")?;
                let upper = real_input(inputs, "b")?;
                lower <= answer && answer <= upper
            }
            Self::IsWithinTolerance => {
                let reference = real_input(inputs, "x")?;
                let tolerance = real_input(inputs, "tol")?;
                (answer - reference).abs() <= tolerance
            }
        };
        Ok(matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use math_expression::FLOAT_EQUALITY_EPSILON;

    fn real_inputs(values: &[(&str, f64)]) -> RuleInputs {
        values
            .iter()
            .map(|(slot, value)| (slot.to_string(), InteractionObject::Real(*value)))
            .collect()
    }

    fn matches(rule: NumericRule, answer: f64, inputs: &[(&str, f64)]) -> bool {
        rule.matches(
            &InteractionObject::Real(answer),
            &real_inputs(inputs),
            &ClassificationContext::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_equals_boundary_is_open() {
        assert!(matches(NumericRule::Equals, 2.0, &[("x", 2.0)]));
        assert!(matches(NumericRule::Equals, 0.5e-5, &[("x", 0.0)]));
        assert!(!matches(NumericRule::Equals, FLOAT_EQUALITY_EPSILON, &[("x", 0.0)]));
    }

    #[test]
    fn test_ordering_rules() {
        assert!(matches(NumericRule::IsLessThan, 1.0, &[("x", 2.0)]));
        assert!(!matches(NumericRule::IsLessThan, 2.0, &[("x", 2.0)]));
        assert!(matches(NumericRule::IsLessThanOrEqualTo, 2.0, &[("x", 2.0)]));
        assert!(matches(NumericRule::IsGreaterThan, 3.0, &[("x", 2.0)]));
        assert!(matches(NumericRule::IsGreaterThanOrEqualTo, 2.0, &[("x", 2.0)]));
    }

    #[test]
    fn test_inclusively_between() {
        let bounds = [("a", 1.0), ("b", 3.0)];
        assert!(matches(NumericRule::IsInclusivelyBetween, 1.0, &bounds));
        assert!(matches(NumericRule::IsInclusivelyBetween, 3.0, &bounds));
        assert!(!matches(NumericRule::IsInclusivelyBetween, 3.5, &bounds));
    }

    #[test]
    fn test_within_tolerance_is_closed() {
        let inputs = [("x", 10.0), ("tol", 0.5)];
        assert!(matches(NumericRule::IsWithinTolerance, 10.5, &inputs));
        assert!(matches(NumericRule::IsWithinTolerance, 9.5, &inputs));
        assert!(!matches(NumericRule::IsWithinTolerance, 10.6, &inputs));
        assert!(!matches(
            NumericRule::IsWithinTolerance,
            10.0,
            &[("x", 10.0), ("tol", -1.0)]
        ));
    }

    #[test]
    fn test_integer_answers_are_accepted() {
        let result = NumericRule::Equals.matches(
            &InteractionObject::SignedInt(-4),
            &real_inputs(&[("x", -4.0)]),
            &ClassificationContext::default(),
        );
        assert!(result.unwrap());
    }

    #[test]
    fn test_missing_tolerance_is_error() {
        let result = NumericRule::IsWithinTolerance.matches(
            &InteractionObject::Real(1.0),
            &real_inputs(&[("x", 1.0)]),
            &ClassificationContext::default(),
        );
        assert!(result.is_err());
    }
}
