//! `TextInput` rules.

use super::{string_answer, translatable_input, RuleClassifier, RuleInputs};
use crate::error::Result;
use crate::matching::{fuzzy_equals, normalize_text};
use crate::types::{ClassificationContext, InteractionObject};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRule {
    Equals,
    Contains,
    StartsWith,
    FuzzyEquals,
}

impl TextRule {
    pub fn rule_type(self) -> &'static str {
        match self {
            Self::Equals => "Equals",
            Self::Contains => "Contains",
            Self::StartsWith => "StartsWith",
            Self::FuzzyEquals => "FuzzyEquals",
        }
    }

    pub fn all() -> [TextRule; 4] {
        [Self::Equals, Self::Contains, Self::StartsWith, Self::FuzzyEquals]
    }

    fn compare(self, answer: &str, reference: &str) -> bool {
        match self {
            Self::Equals => answer == reference,
            Self::Contains => answer.contains(reference),
            Self::StartsWith => answer.starts_with(reference),
            Self::FuzzyEquals => fuzzy_equals(answer, reference),
        }
    }
}

/// Compares a normalised answer against every reference string in slot `x`; any hit
/// matches.
impl RuleClassifier for TextRule {
    fn matches(
        &self,
        answer: &InteractionObject,
        inputs: &RuleInputs,
        context: &ClassificationContext,
    ) -> Result<bool> {
        let answer = normalize_text(string_answer(answer)?);
        let references = translatable_input(inputs, "x", context)?;
        Ok(references
            .iter()
            .any(|reference| self.compare(&answer, &normalize_text(reference))))
    }
}
