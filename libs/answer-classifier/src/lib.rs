//! Answer classification engine.
//!
//! Grades a learner's answer against an interaction's ordered answer groups and
//! returns the outcome of the first matching rule, falling back to the interaction's
//! default outcome.

pub mod controller;
pub mod diagnostics;
pub mod error;
pub mod interaction;
pub mod matching;
pub mod registry;
pub mod rules;
pub mod settings;
pub mod types;

pub use controller::AnswerClassificationController;
pub use diagnostics::{DiagnosticsSink, RecordingDiagnostics, TracingDiagnostics};
pub use error::{ClassificationError, Result};
pub use interaction::{GenericInteractionClassifier, InteractionClassifier};
pub use registry::ClassifierRegistry;
pub use rules::{RuleClassifier, RuleInputs};
pub use settings::ClassifierSettings;
pub use types::*;
