//! Error types for answer-classifier.

use thiserror::Error;

/// Result type alias using ClassificationError.
pub type Result<T> = std::result::Result<T, ClassificationError>;

/// Errors raised while classifying an answer.
///
/// All of these indicate broken lesson content or engine misconfiguration. Malformed
/// math answers are not errors: they are reported to diagnostics and simply fail to
/// match.
#[derive(Debug, Error)]
pub enum ClassificationError {
    #[error("no classifier registered for interaction {interaction_id}")]
    UnknownInteraction { interaction_id: String },

    #[error(
        "interaction {interaction_id} does not support rule type {rule_type}; supported: {}",
        .supported.join(", ")
    )]
    UnknownRuleType {
        interaction_id: String,
        rule_type: String,
        supported: Vec<String>,
    },

    #[error("rule is missing input {slot}")]
    MissingInput { slot: String },

    #[error("input {slot} has type {actual}, expected {expected}")]
    InvalidInputType {
        slot: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("answer has type {actual}, expected {expected}")]
    InvalidAnswerType {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("interaction {interaction_id} is registered more than once")]
    DuplicateInteraction { interaction_id: String },

    #[error("rule type {rule_type} is registered more than once")]
    DuplicateRuleType { rule_type: String },

    #[error("rule {rule_type} of interaction {interaction_id} failed on answer {answer}: {source}")]
    RuleEvaluation {
        interaction_id: String,
        rule_type: String,
        answer: String,
        #[source]
        source: Box<ClassificationError>,
    },

    #[error("invalid settings: {0}")]
    InvalidSettings(#[from] serde_json::Error),
}
