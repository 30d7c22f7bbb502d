//! `MultipleChoiceInput` and `ItemSelectionInput` rules.

use super::{
    html_set_answer, html_set_input, non_negative_int_answer, non_negative_int_input,
    RuleClassifier, RuleInputs,
};
use crate::error::Result;
use crate::types::{ClassificationContext, InteractionObject};
use std::collections::BTreeSet;

/// `MultipleChoiceInput.Equals`: the chosen index equals `x`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChoiceEquals;

impl RuleClassifier for ChoiceEquals {
    fn matches(
        &self,
        answer: &InteractionObject,
        inputs: &RuleInputs,
        _context: &ClassificationContext,
    ) -> Result<bool> {
        Ok(non_negative_int_answer(answer)? == non_negative_int_input(inputs, "x")?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemSelectionRule {
    Equals,
    ContainsAtLeastOneOf,
    DoesNotContainAtLeastOneOf,
}

impl ItemSelectionRule {
    pub fn rule_type(self) -> &'static str {
        match self {
            Self::Equals => "Equals",
            Self::ContainsAtLeastOneOf => "ContainsAtLeastOneOf",
            Self::DoesNotContainAtLeastOneOf => "DoesNotContainAtLeastOneOf",
        }
    }

    pub fn all() -> [ItemSelectionRule; 3] {
        [
            Self::Equals,
            Self::ContainsAtLeastOneOf,
            Self::DoesNotContainAtLeastOneOf,
        ]
    }
}

impl RuleClassifier for ItemSelectionRule {
    fn matches(
        &self,
        answer: &InteractionObject,
        inputs: &RuleInputs,
        _context: &ClassificationContext,
    ) -> Result<bool> {
        let answer: BTreeSet<&String> = html_set_answer(answer)?.iter().collect();
        let reference: BTreeSet<&String> = html_set_input(inputs, "x")?.iter().collect();
        let overlaps = !answer.is_disjoint(&reference);
        Ok(match self {
            Self::Equals => answer == reference,
            Self::ContainsAtLeastOneOf => overlaps,
            Self::DoesNotContainAtLeastOneOf => !overlaps,
        })
    }
}
