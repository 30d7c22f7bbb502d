//! Lesson-content fixtures built from JSON.

use serde_json::{json, Value};

use answer_classifier::{Interaction, InteractionObject};

/// An outcome whose feedback html is `feedback`.
pub fn outcome(feedback: &str) -> Value {
    json!({
        "feedback": { "content_id": format!("feedback_{feedback}"), "html": feedback },
        "labelled_as_correct": feedback == "correct"
    })
}

/// A rule spec with a single `x` input.
pub fn rule(rule_type: &str, x: Value) -> Value {
    json!({ "rule_type": rule_type, "inputs": { "x": x } })
}

/// A translatable text input.
pub fn text_input(content_id: &str, strings: &[&str]) -> Value {
    json!({
        "translatable_set_of_normalized_string": {
            "content_id": content_id,
            "normalized_strings": strings
        }
    })
}

pub fn math_input(raw: &str) -> Value {
    json!({ "math_expression": raw })
}

/// An answer group with the given rules and feedback.
pub fn answer_group(rules: Vec<Value>, feedback: &str) -> Value {
    json!({ "rule_specs": rules, "outcome": outcome(feedback) })
}

/// Deserializes an interaction with a "default" fallback outcome.
pub fn interaction(id: &str, answer_groups: Vec<Value>) -> Interaction {
    interaction_with_args(id, answer_groups, json!({}))
}

pub fn interaction_with_args(id: &str, answer_groups: Vec<Value>, args: Value) -> Interaction {
    serde_json::from_value(json!({
        "id": id,
        "answer_groups": answer_groups,
        "default_outcome": outcome("default"),
        "customization_args": args
    }))
    .expect("fixture is valid lesson content")
}

/// Customization args allowing `letters` in algebraic interactions.
pub fn osk_letters(letters: &[&str]) -> Value {
    let letters: Vec<Value> = letters
        .iter()
        .map(|letter| json!({ "normalized_string": letter }))
        .collect();
    json!({ "customOskLetters": { "list": letters } })
}

pub fn text(answer: &str) -> InteractionObject {
    InteractionObject::NormalizedString(answer.to_string())
}

pub fn math(answer: &str) -> InteractionObject {
    InteractionObject::MathExpression(answer.to_string())
}
