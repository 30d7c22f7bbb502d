//! Classifier settings.

use crate::error::Result;
use math_expression::ErrorCheckingMode;
use serde::{Deserialize, Serialize};

/// Customization argument holding the variables an algebraic interaction allows.
pub const DEFAULT_ALLOWED_VARIABLES_ARG: &str = "customOskLetters";

/// Settings for the built-in math rule classifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierSettings {
    /// Error checking applied to learner answers.
    pub answer_error_checking: ErrorCheckingMode,
    /// Error checking applied to author reference expressions.
    pub reference_error_checking: ErrorCheckingMode,
    pub allowed_variables_arg: String,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            answer_error_checking: ErrorCheckingMode::AllErrors,
            reference_error_checking: ErrorCheckingMode::RequiredOnly,
            allowed_variables_arg: DEFAULT_ALLOWED_VARIABLES_ARG.to_string(),
        }
    }
}

impl ClassifierSettings {
    /// Parses settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
