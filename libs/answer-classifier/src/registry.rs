//! Classifier registry: interaction id to interaction classifier.

use crate::diagnostics::DiagnosticsSink;
use crate::error::{ClassificationError, Result};
use crate::interaction::{GenericInteractionClassifier, InteractionClassifier};
use crate::rules::fraction::FractionRule;
use crate::rules::math::{ExpressionMode, MathRule, MathRuleClassifier};
use crate::rules::numeric::NumericRule;
use crate::rules::selection::{ChoiceEquals, ItemSelectionRule};
use crate::rules::text::TextRule;
use crate::rules::RuleClassifier;
use crate::settings::ClassifierSettings;
use math_expression::ExpressionParser;
use std::collections::BTreeMap;
use std::sync::Arc;

type RuleEntry = (String, Box<dyn RuleClassifier>);

/// Immutable map of interaction ids to their classifiers.
pub struct ClassifierRegistry {
    classifiers: BTreeMap<String, Box<dyn InteractionClassifier>>,
}

impl ClassifierRegistry {
    /// Builds a registry from `(interaction id, classifier)` pairs. Registering the same
    /// interaction id twice is an error.
    pub fn new(classifiers: Vec<(String, Box<dyn InteractionClassifier>)>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for (interaction_id, classifier) in classifiers {
            if map.contains_key(&interaction_id) {
                return Err(ClassificationError::DuplicateInteraction { interaction_id });
            }
            map.insert(interaction_id, classifier);
        }
        Ok(Self { classifiers: map })
    }

    /// Registry with every built-in interaction.
    pub fn with_defaults(
        settings: ClassifierSettings,
        parser: Arc<dyn ExpressionParser>,
        diagnostics: Arc<dyn DiagnosticsSink>,
    ) -> Result<Self> {
        fn entries<R: RuleClassifier + 'static>(
            rules: impl IntoIterator<Item = R>,
            rule_type: impl Fn(&R) -> &'static str,
        ) -> Vec<RuleEntry> {
            rules
                .into_iter()
                .map(|rule| (rule_type(&rule).to_string(), Box::new(rule) as Box<dyn RuleClassifier>))
                .collect()
        }

        let math_entries = |mode: ExpressionMode| -> Vec<RuleEntry> {
            MathRule::all()
                .into_iter()
                .map(|rule| {
                    let classifier = MathRuleClassifier::new(
                        rule,
                        mode,
                        parser.clone(),
                        diagnostics.clone(),
                        settings.clone(),
                    );
                    (
                        rule.rule_type().to_string(),
                        Box::new(classifier) as Box<dyn RuleClassifier>,
                    )
                })
                .collect()
        };

        let interactions: Vec<(&str, Vec<RuleEntry>)> = vec![
            ("Continue", Vec::new()),
            ("TextInput", entries(TextRule::all(), |r| r.rule_type())),
            ("NumericInput", entries(NumericRule::all(), |r| r.rule_type())),
            ("FractionInput", entries(FractionRule::all(), |r| r.rule_type())),
            ("MultipleChoiceInput", entries([ChoiceEquals], |_| "Equals")),
            (
                "ItemSelectionInput",
                entries(ItemSelectionRule::all(), |r| r.rule_type()),
            ),
            (
                ExpressionMode::Numeric.interaction_id(),
                math_entries(ExpressionMode::Numeric),
            ),
            (
                ExpressionMode::Algebraic.interaction_id(),
                math_entries(ExpressionMode::Algebraic),
            ),
            (
                ExpressionMode::Equation.interaction_id(),
                math_entries(ExpressionMode::Equation),
            ),
        ];

        let mut classifiers: Vec<(String, Box<dyn InteractionClassifier>)> = Vec::new();
        for (interaction_id, rules) in interactions {
            let classifier = GenericInteractionClassifier::new(rules)?;
            classifiers.push((
                interaction_id.to_string(),
                Box::new(classifier) as Box<dyn InteractionClassifier>,
            ));
        }
        Self::new(classifiers)
    }

    pub fn interaction_classifier(&self, interaction_id: &str) -> Option<&dyn InteractionClassifier> {
        self.classifiers
            .get(interaction_id)
            .map(|classifier| classifier.as_ref())
    }

    /// Registered interaction ids, sorted.
    pub fn interaction_ids(&self) -> Vec<&str> {
        self.classifiers.keys().map(String::as_str).collect()
    }
}
