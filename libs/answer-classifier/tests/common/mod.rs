//! Common test utilities for integration tests.
//!
//! Provides a TestContext wiring the default registry to a recording diagnostics
//! sink, plus lesson-content fixtures.

#![allow(dead_code)]

pub mod fixtures;

use std::sync::Arc;

use answer_classifier::{
    AnswerClassificationController, ClassificationContext, ClassificationResult,
    ClassifierRegistry, ClassifierSettings, Interaction, InteractionObject, RecordingDiagnostics,
    Result,
};
use math_expression::MathExpressionParser;

/// Controller over the built-in interactions with diagnostics captured in memory.
pub struct TestContext {
    pub controller: AnswerClassificationController,
    pub diagnostics: Arc<RecordingDiagnostics>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_settings(ClassifierSettings::default())
    }

    pub fn with_settings(settings: ClassifierSettings) -> Self {
        let diagnostics = Arc::new(RecordingDiagnostics::new());
        let registry = ClassifierRegistry::with_defaults(
            settings,
            Arc::new(MathExpressionParser::new()),
            diagnostics.clone(),
        )
        .expect("default registry is valid");
        Self {
            controller: AnswerClassificationController::new(Arc::new(registry)),
            diagnostics,
        }
    }

    /// Classify with a context carrying the interaction's customization args.
    pub fn classify(
        &self,
        interaction: &Interaction,
        answer: InteractionObject,
    ) -> Result<ClassificationResult> {
        let context = ClassificationContext {
            customization_args: interaction.customization_args.clone(),
            ..Default::default()
        };
        self.controller.classify(interaction, &answer, &context)
    }

    /// Feedback html of the chosen outcome.
    pub fn feedback(&self, interaction: &Interaction, answer: InteractionObject) -> String {
        self.classify(interaction, answer)
            .expect("classification succeeds")
            .outcome()
            .feedback
            .html
            .clone()
    }
}
