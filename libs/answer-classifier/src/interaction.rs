//! Interaction classifiers: resolve a rule type to its rule classifier.

use crate::error::{ClassificationError, Result};
use crate::rules::RuleClassifier;
use std::collections::BTreeMap;

/// The rule classifiers available for one interaction type.
pub trait InteractionClassifier: Send + Sync {
    /// Supported rule types, sorted.
    fn rule_types(&self) -> Vec<String>;

    fn rule_classifier(&self, rule_type: &str) -> Option<&dyn RuleClassifier>;
}

/// An [`InteractionClassifier`] backed by a plain rule-type map.
#[derive(Default)]
pub struct GenericInteractionClassifier {
    rules: BTreeMap<String, Box<dyn RuleClassifier>>,
}

impl GenericInteractionClassifier {
    /// Builds the classifier, rejecting duplicate rule types.
    pub fn new(rules: Vec<(String, Box<dyn RuleClassifier>)>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for (rule_type, classifier) in rules {
            if map.contains_key(&rule_type) {
                return Err(ClassificationError::DuplicateRuleType { rule_type });
            }
            map.insert(rule_type, classifier);
        }
        Ok(Self { rules: map })
    }
}

impl InteractionClassifier for GenericInteractionClassifier {
    fn rule_types(&self) -> Vec<String> {
        self.rules.keys().cloned().collect()
    }

    fn rule_classifier(&self, rule_type: &str) -> Option<&dyn RuleClassifier> {
        self.rules.get(rule_type).map(|classifier| classifier.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::text::TextRule;

    #[test]
    fn test_resolves_rule_types() {
        let classifier = GenericInteractionClassifier::new(vec![
            ("Equals".to_string(), Box::new(TextRule::Equals) as Box<dyn RuleClassifier>),
            ("Contains".to_string(), Box::new(TextRule::Contains) as Box<dyn RuleClassifier>),
        ])
        .unwrap();
        assert_eq!(classifier.rule_types(), vec!["Contains", "Equals"]);
        assert!(classifier.rule_classifier("Equals").is_some());
        assert!(classifier.rule_classifier("StartsWith").is_none());
    }

    #[test]
    fn test_duplicate_rule_type() {
        let result = GenericInteractionClassifier::new(vec![
            ("Equals".to_string(), Box::new(TextRule::Equals) as Box<dyn RuleClassifier>),
            ("Equals".to_string(), Box::new(TextRule::FuzzyEquals) as Box<dyn RuleClassifier>),
        ]);
        assert!(matches!(
            result,
            Err(ClassificationError::DuplicateRuleType { rule_type }) if rule_type == "Equals"
        ));
    }
}
