//! Answer classification entry point.

use crate::error::{ClassificationError, Result};
use crate::registry::ClassifierRegistry;
use crate::types::{ClassificationContext, ClassificationResult, Interaction, InteractionObject};
use std::sync::Arc;

/// Grades submitted answers against an interaction's answer groups.
///
/// The controller holds no mutable state, so one instance can be shared by any number
/// of threads.
#[derive(Clone)]
pub struct AnswerClassificationController {
    registry: Arc<ClassifierRegistry>,
}

impl AnswerClassificationController {
    pub fn new(registry: Arc<ClassifierRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ClassifierRegistry {
        &self.registry
    }

    /// Returns the outcome of the first answer group with a matching rule, or the
    /// default outcome when nothing matches.
    ///
    /// Fails for an unregistered interaction, an unsupported rule type, or a rule that
    /// raises an error (wrapped with the interaction id, rule type and answer).
    pub fn classify(
        &self,
        interaction: &Interaction,
        answer: &InteractionObject,
        context: &ClassificationContext,
    ) -> Result<ClassificationResult> {
        let interaction_classifier = self
            .registry
            .interaction_classifier(&interaction.id)
            .ok_or_else(|| ClassificationError::UnknownInteraction {
                interaction_id: interaction.id.clone(),
            })?;

        for (group_index, answer_group) in interaction.answer_groups.iter().enumerate() {
            for rule_spec in &answer_group.rule_specs {
                let rule_classifier = interaction_classifier
                    .rule_classifier(&rule_spec.rule_type)
                    .ok_or_else(|| ClassificationError::UnknownRuleType {
                        interaction_id: interaction.id.clone(),
                        rule_type: rule_spec.rule_type.clone(),
                        supported: interaction_classifier.rule_types(),
                    })?;

                let matched = rule_classifier
                    .matches(answer, &rule_spec.inputs, context)
                    .map_err(|source| ClassificationError::RuleEvaluation {
                        interaction_id: interaction.id.clone(),
                        rule_type: rule_spec.rule_type.clone(),
                        answer: format!("{answer:?}"),
                        source: Box::new(source),
                    })?;

                if matched {
                    tracing::debug!(
                        interaction_id = %interaction.id,
                        group_index,
                        rule_type = %rule_spec.rule_type,
                        "answer matched"
                    );
                    let outcome = answer_group.outcome.clone();
                    return Ok(match &answer_group.tagged_skill_misconception {
                        Some(misconception) => ClassificationResult::OutcomeWithMisconception {
                            outcome,
                            skill_id: misconception.skill_id.clone(),
                            misconception_id: misconception.misconception_id.clone(),
                        },
                        None => ClassificationResult::OutcomeOnly(outcome),
                    });
                }
            }
        }

        tracing::debug!(
            interaction_id = %interaction.id,
            "no answer group matched, using default outcome"
        );
        Ok(ClassificationResult::OutcomeOnly(
            interaction.default_outcome.clone(),
        ))
    }
}
