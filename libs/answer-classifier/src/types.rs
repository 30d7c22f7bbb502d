//! Lesson content and classification types.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Type names of [`InteractionObject`] variants, used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    NormalizedString,
    NonNegativeInt,
    SignedInt,
    Real,
    Fraction,
    SetOfHtmlString,
    TranslatableSetOfNormalizedString,
    MathExpression,
}

impl ObjectKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::NormalizedString => "NormalizedString",
            Self::NonNegativeInt => "NonNegativeInt",
            Self::SignedInt => "SignedInt",
            Self::Real => "Real",
            Self::Fraction => "Fraction",
            Self::SetOfHtmlString => "SetOfHtmlString",
            Self::TranslatableSetOfNormalizedString => "TranslatableSetOfNormalizedString",
            Self::MathExpression => "MathExpression",
        }
    }
}

/// A submitted answer or a rule input value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionObject {
    NormalizedString(String),
    NonNegativeInt(u32),
    SignedInt(i64),
    Real(f64),
    Fraction(Fraction),
    SetOfHtmlString(Vec<String>),
    TranslatableSetOfNormalizedString {
        content_id: String,
        normalized_strings: Vec<String>,
    },
    MathExpression(String),
}

impl InteractionObject {
    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::NormalizedString(_) => ObjectKind::NormalizedString,
            Self::NonNegativeInt(_) => ObjectKind::NonNegativeInt,
            Self::SignedInt(_) => ObjectKind::SignedInt,
            Self::Real(_) => ObjectKind::Real,
            Self::Fraction(_) => ObjectKind::Fraction,
            Self::SetOfHtmlString(_) => ObjectKind::SetOfHtmlString,
            Self::TranslatableSetOfNormalizedString { .. } => {
                ObjectKind::TranslatableSetOfNormalizedString
            }
            Self::MathExpression(_) => ObjectKind::MathExpression,
        }
    }
}

/// A mixed number such as `-1 2/3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Fraction {
    pub is_negative: bool,
    pub whole_number: u32,
    pub numerator: u32,
    pub denominator: u32,
}

impl Fraction {
    pub fn new(is_negative: bool, whole_number: u32, numerator: u32, denominator: u32) -> Self {
        Self {
            is_negative,
            whole_number,
            numerator,
            denominator,
        }
    }

    /// Signed numerator and denominator of the improper form, wide enough for
    /// cross-multiplication of any two fractions.
    pub fn to_improper(self) -> (i128, i128) {
        let numerator =
            i128::from(self.whole_number) * i128::from(self.denominator) + i128::from(self.numerator);
        let sign = if self.is_negative { -1 } else { 1 };
        (sign * numerator, i128::from(self.denominator))
    }

    pub fn to_f64(self) -> f64 {
        let (numerator, denominator) = self.to_improper();
        numerator as f64 / denominator as f64
    }

    /// Value equality via cross-multiplication, so `1/2` is equivalent to `2/4`.
    pub fn is_equivalent_to(self, other: Fraction) -> bool {
        let (a_num, a_den) = self.to_improper();
        let (b_num, b_den) = other.to_improper();
        a_num * b_den == b_num * a_den
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative {
            write!(f, "-")?;
        }
        match (self.whole_number, self.numerator) {
            (whole, 0) => write!(f, "{whole}"),
            (0, numerator) => write!(f, "{numerator}/{}", self.denominator),
            (whole, numerator) => write!(f, "{whole} {numerator}/{}", self.denominator),
        }
    }
}

/// HTML content with a translation id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SubtitledHtml {
    pub content_id: String,
    pub html: String,
}

/// Feedback and destination shown to the learner.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Outcome {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_state_name: Option<String>,
    #[serde(default)]
    pub feedback: SubtitledHtml,
    #[serde(default)]
    pub labelled_as_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedSkillMisconception {
    pub skill_id: String,
    pub misconception_id: String,
}

/// One rule type plus its named inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSpec {
    pub rule_type: String,
    #[serde(default)]
    pub inputs: BTreeMap<String, InteractionObject>,
}

impl RuleSpec {
    pub fn new(rule_type: impl Into<String>) -> Self {
        Self {
            rule_type: rule_type.into(),
            inputs: BTreeMap::new(),
        }
    }

    pub fn with_input(mut self, slot: impl Into<String>, value: InteractionObject) -> Self {
        self.inputs.insert(slot.into(), value);
        self
    }
}

/// Rules sharing one outcome. Rules are evaluated in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerGroup {
    pub rule_specs: Vec<RuleSpec>,
    pub outcome: Outcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagged_skill_misconception: Option<TaggedSkillMisconception>,
}

/// Customization argument values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaObject {
    NormalizedString(String),
    Int(i64),
    Bool(bool),
    List(Vec<SchemaObject>),
}

/// A question with its answer groups and fallback outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub id: String,
    #[serde(default)]
    pub answer_groups: Vec<AnswerGroup>,
    pub default_outcome: Outcome,
    #[serde(default)]
    pub customization_args: BTreeMap<String, SchemaObject>,
}

/// Translations of translatable rule inputs, keyed by content id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WrittenTranslationContext {
    #[serde(default)]
    pub translations: HashMap<String, Vec<String>>,
}

impl WrittenTranslationContext {
    /// Returns the translated strings for `content_id`, or `source` if there are none.
    pub fn translate<'a>(&'a self, content_id: &str, source: &'a [String]) -> &'a [String] {
        match self.translations.get(content_id) {
            Some(translated) if !translated.is_empty() => translated,
            _ => source,
        }
    }
}

/// Per-call data handed to every rule classifier.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClassificationContext {
    #[serde(default)]
    pub written_translation_context: WrittenTranslationContext,
    #[serde(default)]
    pub customization_args: BTreeMap<String, SchemaObject>,
}

impl ClassificationContext {
    pub fn new(
        written_translation_context: WrittenTranslationContext,
        customization_args: BTreeMap<String, SchemaObject>,
    ) -> Self {
        Self {
            written_translation_context,
            customization_args,
        }
    }

    /// The ordered variable names stored in customization argument `key`.
    pub fn allowed_variables(&self, key: &str) -> Vec<String> {
        match self.customization_args.get(key) {
            Some(SchemaObject::List(values)) => values
                .iter()
                .filter_map(|value| match value {
                    SchemaObject::NormalizedString(name) => Some(name.clone()),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// The outcome chosen for an answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationResult {
    OutcomeOnly(Outcome),
    OutcomeWithMisconception {
        outcome: Outcome,
        skill_id: String,
        misconception_id: String,
    },
}

impl ClassificationResult {
    pub fn outcome(&self) -> &Outcome {
        match self {
            Self::OutcomeOnly(outcome) => outcome,
            Self::OutcomeWithMisconception { outcome, .. } => outcome,
        }
    }
}
