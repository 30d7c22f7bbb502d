//! `FractionInput` rules. Reference slot is `f`.

use super::{fraction_answer, fraction_input, RuleClassifier, RuleInputs};
use crate::error::Result;
use crate::types::{ClassificationContext, InteractionObject};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FractionRule {
    IsExactlyEqualTo,
    IsEquivalentTo,
    IsLessThan,
    IsGreaterThan,
}

impl FractionRule {
    pub fn rule_type(self) -> &'static str {
        match self {
            Self::IsExactlyEqualTo => "IsExactlyEqualTo",
            Self::IsEquivalentTo => "IsEquivalentTo",
            Self::IsLessThan => "IsLessThan",
            Self::IsGreaterThan => "IsGreaterThan",
        }
    }

    pub fn all() -> [FractionRule; 4] {
        [
            Self::IsExactlyEqualTo,
            Self::IsEquivalentTo,
            Self::IsLessThan,
            Self::IsGreaterThan,
        ]
    }
}

impl RuleClassifier for FractionRule {
    fn matches(
        &self,
        answer: &InteractionObject,
        inputs: &RuleInputs,
        _context: &ClassificationContext,
    ) -> Result<bool> {
        let answer = fraction_answer(answer)?;
        let reference = fraction_input(inputs, "f")?;
        Ok(match self {
            Self::IsExactlyEqualTo => answer == reference,
            Self::IsEquivalentTo => answer.is_equivalent_to(reference),
            Self::IsLessThan => answer.to_f64() < reference.to_f64(),
            Self::IsGreaterThan => answer.to_f64() > reference.to_f64(),
        })
    }
}
