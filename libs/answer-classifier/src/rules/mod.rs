//! Rule classifiers: one predicate per (interaction, rule type) pair.

pub mod fraction;
pub mod math;
pub mod numeric;
pub mod selection;
pub mod text;

use crate::error::{ClassificationError, Result};
use crate::types::{ClassificationContext, Fraction, InteractionObject, ObjectKind};
use std::collections::BTreeMap;

/// Named rule inputs of a rule spec.
pub type RuleInputs = BTreeMap<String, InteractionObject>;

/// Decides whether an answer satisfies one rule.
///
/// Returns an error only for broken lesson content, such as a missing input slot or
/// an answer of the wrong type.
pub trait RuleClassifier: Send + Sync {
    fn matches(
        &self,
        answer: &InteractionObject,
        inputs: &RuleInputs,
        context: &ClassificationContext,
    ) -> Result<bool>;
}

pub(crate) fn input<'a>(inputs: &'a RuleInputs, slot: &str) -> Result<&'a InteractionObject> {
    inputs.get(slot).ok_or_else(|| ClassificationError::MissingInput {
        slot: slot.to_string(),
    })
}

fn invalid_input(slot: &str, expected: ObjectKind, actual: &InteractionObject) -> ClassificationError {
    ClassificationError::InvalidInputType {
        slot: slot.to_string(),
        expected: expected.name(),
        actual: actual.kind().name(),
    }
}

fn invalid_answer(expected: ObjectKind, actual: &InteractionObject) -> ClassificationError {
    ClassificationError::InvalidAnswerType {
        expected: expected.name(),
        actual: actual.kind().name(),
    }
}

fn as_real(value: &InteractionObject) -> Option<f64> {
    match value {
        InteractionObject::Real(value) => Some(*value),
        InteractionObject::SignedInt(value) => Some(*value as f64),
        InteractionObject::NonNegativeInt(value) => Some(f64::from(*value)),
        _ => None,
    }
}

/// A real-valued input; integer inputs are widened.
pub(crate) fn real_input(inputs: &RuleInputs, slot: &str) -> Result<f64> {
    let value = input(inputs, slot)?;
    as_real(value).ok_or_else(|| invalid_input(slot, ObjectKind::Real, value))
}

pub(crate) fn real_answer(answer: &InteractionObject) -> Result<f64> {
    as_real(answer).ok_or_else(|| invalid_answer(ObjectKind::Real, answer))
}

pub(crate) fn string_answer(answer: &InteractionObject) -> Result<&str> {
    match answer {
        InteractionObject::NormalizedString(value) => Ok(value),
        _ => Err(invalid_answer(ObjectKind::NormalizedString, answer)),
    }
}

/// Reference strings of a text input, translated through the context when possible.
pub(crate) fn translatable_input(
    inputs: &RuleInputs,
    slot: &str,
    context: &ClassificationContext,
) -> Result<Vec<String>> {
    match input(inputs, slot)? {
        InteractionObject::TranslatableSetOfNormalizedString {
            content_id,
            normalized_strings,
        } => Ok(context
            .written_translation_context
            .translate(content_id, normalized_strings)
            .to_vec()),
        InteractionObject::NormalizedString(value) => Ok(vec![value.clone()]),
        other => Err(invalid_input(
            slot,
            ObjectKind::TranslatableSetOfNormalizedString,
            other,
        )),
    }
}

pub(crate) fn fraction_input(inputs: &RuleInputs, slot: &str) -> Result<Fraction> {
    match input(inputs, slot)? {
        InteractionObject::Fraction(fraction) => Ok(*fraction),
        other => Err(invalid_input(slot, ObjectKind::Fraction, other)),
    }
}

pub(crate) fn fraction_answer(answer: &InteractionObject) -> Result<Fraction> {
    match answer {
        InteractionObject::Fraction(fraction) => Ok(*fraction),
        _ => Err(invalid_answer(ObjectKind::Fraction, answer)),
    }
}

pub(crate) fn non_negative_int_input(inputs: &RuleInputs, slot: &str) -> Result<u32> {
    match input(inputs, slot)? {
        InteractionObject::NonNegativeInt(value) => Ok(*value),
        other => Err(invalid_input(slot, ObjectKind::NonNegativeInt, other)),
    }
}

pub(crate) fn non_negative_int_answer(answer: &InteractionObject) -> Result<u32> {
    match answer {
        InteractionObject::NonNegativeInt(value) => Ok(*value),
        _ => Err(invalid_answer(ObjectKind::NonNegativeInt, answer)),
    }
}

pub(crate) fn html_set_input<'a>(inputs: &'a RuleInputs, slot: &str) -> Result<&'a [String]> {
    match input(inputs, slot)? {
        InteractionObject::SetOfHtmlString(values) => Ok(values),
        other => Err(invalid_input(slot, ObjectKind::SetOfHtmlString, other)),
    }
}

pub(crate) fn html_set_answer(answer: &InteractionObject) -> Result<&[String]> {
    match answer {
        InteractionObject::SetOfHtmlString(values) => Ok(values),
        _ => Err(invalid_answer(ObjectKind::SetOfHtmlString, answer)),
    }
}

pub(crate) fn math_input<'a>(inputs: &'a RuleInputs, slot: &str) -> Result<&'a str> {
    match input(inputs, slot)? {
        InteractionObject::MathExpression(raw) => Ok(raw),
        other => Err(invalid_input(slot, ObjectKind::MathExpression, other)),
    }
}

pub(crate) fn math_answer(answer: &InteractionObject) -> Result<&str> {
    match answer {
        InteractionObject::MathExpression(raw) => Ok(raw),
        _ => Err(invalid_answer(ObjectKind::MathExpression, answer)),
    }
}
