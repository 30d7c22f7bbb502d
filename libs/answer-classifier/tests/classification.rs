//! End-to-end classification tests over JSON lesson content.

mod common;

use pretty_assertions::assert_eq;
use serde_json::json;

use answer_classifier::{
    ClassificationError, ClassificationResult, ClassifierSettings, InteractionObject,
};
use common::fixtures::{answer_group, interaction, outcome, rule, text, text_input};
use common::TestContext;

#[test]
fn test_no_answer_groups_returns_default() {
    let ctx = TestContext::new();
    let continue_interaction = interaction("Continue", vec![]);
    for answer in [text("anything"), InteractionObject::Real(3.0)] {
        assert_eq!(ctx.feedback(&continue_interaction, answer), "default");
    }
}

#[test]
fn test_first_matching_group_wins() {
    let ctx = TestContext::new();
    let text_interaction = interaction(
        "TextInput",
        vec![
            answer_group(
                vec![rule("Contains", text_input("ca_1", &["cat"]))],
                "first",
            ),
            answer_group(vec![rule("Equals", text_input("ca_2", &["cat"]))], "second"),
        ],
    );
    assert_eq!(ctx.feedback(&text_interaction, text("cat")), "first");
}

#[test]
fn test_rule_order_within_group() {
    let ctx = TestContext::new();
    let text_interaction = interaction(
        "TextInput",
        vec![
            answer_group(
                vec![
                    rule("Equals", text_input("ca_1", &["dog"])),
                    rule("StartsWith", text_input("ca_2", &["ca"])),
                ],
                "animal",
            ),
            answer_group(vec![rule("FuzzyEquals", text_input("ca_3", &["cat"]))], "fuzzy"),
        ],
    );
    assert_eq!(ctx.feedback(&text_interaction, text("cats")), "animal");
    assert_eq!(ctx.feedback(&text_interaction, text("bat")), "fuzzy");
    assert_eq!(ctx.feedback(&text_interaction, text("bird")), "default");
}

#[test]
fn test_misconception_is_attached() {
    let ctx = TestContext::new();
    let numeric_interaction: answer_classifier::Interaction = serde_json::from_value(json!({
        "id": "NumericInput",
        "answer_groups": [{
            "rule_specs": [{ "rule_type": "IsLessThan", "inputs": { "x": { "real": 0.0 } } }],
            "outcome": outcome("negative"),
            "tagged_skill_misconception": { "skill_id": "skill_1", "misconception_id": "m_2" }
        }],
        "default_outcome": outcome("default")
    }))
    .unwrap();

    let result = ctx
        .classify(&numeric_interaction, InteractionObject::Real(-2.0))
        .unwrap();
    match result {
        ClassificationResult::OutcomeWithMisconception {
            outcome,
            skill_id,
            misconception_id,
        } => {
            assert_eq!(outcome.feedback.html, "negative");
            assert_eq!(skill_id, "skill_1");
            assert_eq!(misconception_id, "m_2");
        }
        other => panic!("expected misconception, got {other:?}"),
    }

    let fallback = ctx
        .classify(&numeric_interaction, InteractionObject::Real(2.0))
        .unwrap();
    assert!(matches!(fallback, ClassificationResult::OutcomeOnly(_)));
}

#[test]
fn test_numeric_equals_boundary() {
    let ctx = TestContext::new();
    let numeric_interaction = interaction(
        "NumericInput",
        vec![answer_group(vec![rule("Equals", json!({ "real": 1.0 }))], "correct")],
    );
    assert_eq!(
        ctx.feedback(&numeric_interaction, InteractionObject::Real(1.000001)),
        "correct"
    );
    assert_eq!(
        ctx.feedback(&numeric_interaction, InteractionObject::Real(1.0 + 2e-5)),
        "default"
    );
}

#[test]
fn test_within_tolerance_boundary_inclusive() {
    let ctx = TestContext::new();
    let numeric_interaction = interaction(
        "NumericInput",
        vec![answer_group(
            vec![json!({
                "rule_type": "IsWithinTolerance",
                "inputs": { "x": { "real": 5.0 }, "tol": { "real": 0.25 } }
            })],
            "close",
        )],
    );
    assert_eq!(
        ctx.feedback(&numeric_interaction, InteractionObject::Real(5.25)),
        "close"
    );
    assert_eq!(
        ctx.feedback(&numeric_interaction, InteractionObject::Real(5.5)),
        "default"
    );
}

#[test]
fn test_fraction_and_selection_interactions() {
    let ctx = TestContext::new();
    let fraction_interaction: answer_classifier::Interaction = serde_json::from_value(json!({
        "id": "FractionInput",
        "answer_groups": [{
            "rule_specs": [{
                "rule_type": "IsEquivalentTo",
                "inputs": { "f": { "fraction": {
                    "is_negative": false, "whole_number": 0, "numerator": 1, "denominator": 2
                } } }
            }],
            "outcome": outcome("half")
        }],
        "default_outcome": outcome("default")
    }))
    .unwrap();
    let two_quarters = InteractionObject::Fraction(answer_classifier::Fraction::new(false, 0, 2, 4));
    assert_eq!(ctx.feedback(&fraction_interaction, two_quarters), "half");

    let selection_interaction = interaction(
        "ItemSelectionInput",
        vec![answer_group(
            vec![rule("Equals", json!({ "set_of_html_string": ["<p>a</p>", "<p>b</p>"] }))],
            "both",
        )],
    );
    let answer = InteractionObject::SetOfHtmlString(vec!["<p>b</p>".into(), "<p>a</p>".into()]);
    assert_eq!(ctx.feedback(&selection_interaction, answer), "both");

    let choice_interaction = interaction(
        "MultipleChoiceInput",
        vec![answer_group(
            vec![rule("Equals", json!({ "non_negative_int": 1 }))],
            "second",
        )],
    );
    assert_eq!(
        ctx.feedback(&choice_interaction, InteractionObject::NonNegativeInt(1)),
        "second"
    );
}

#[test]
fn test_unknown_rule_type_names_supported_rules() {
    let ctx = TestContext::new();
    let text_interaction = interaction(
        "TextInput",
        vec![answer_group(vec![rule("IsLessThan", json!({ "real": 1.0 }))], "never")],
    );
    let error = ctx.classify(&text_interaction, text("a")).unwrap_err();
    match &error {
        ClassificationError::UnknownRuleType {
            interaction_id,
            rule_type,
            supported,
        } => {
            assert_eq!(interaction_id, "TextInput");
            assert_eq!(rule_type, "IsLessThan");
            assert_eq!(supported, &vec!["Contains", "Equals", "FuzzyEquals", "StartsWith"]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(error.to_string().contains("TextInput"));
}

#[test]
fn test_unknown_interaction_is_fatal() {
    let ctx = TestContext::new();
    let unknown = interaction("ImageClickInput", vec![]);
    let result = ctx.classify(&unknown, text("a"));
    assert!(matches!(
        result,
        Err(ClassificationError::UnknownInteraction { .. })
    ));
}

#[test]
fn test_missing_input_is_wrapped_with_context() {
    let ctx = TestContext::new();
    let text_interaction = interaction(
        "TextInput",
        vec![answer_group(
            vec![json!({ "rule_type": "Equals", "inputs": {} })],
            "never",
        )],
    );
    let error = ctx.classify(&text_interaction, text("a")).unwrap_err();
    match error {
        ClassificationError::RuleEvaluation {
            interaction_id,
            rule_type,
            source,
            ..
        } => {
            assert_eq!(interaction_id, "TextInput");
            assert_eq!(rule_type, "Equals");
            assert!(matches!(*source, ClassificationError::MissingInput { ref slot } if slot == "x"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_wrong_answer_type_is_wrapped() {
    let ctx = TestContext::new();
    let numeric_interaction = interaction(
        "NumericInput",
        vec![answer_group(vec![rule("Equals", json!({ "real": 1.0 }))], "never")],
    );
    let error = ctx.classify(&numeric_interaction, text("one")).unwrap_err();
    assert!(matches!(error, ClassificationError::RuleEvaluation { .. }));
    assert!(error.to_string().contains("answer has type NormalizedString, expected Real"));
}

#[test]
fn test_result_serializes_as_tagged_union() {
    let ctx = TestContext::new();
    let result = ctx
        .classify(&interaction("Continue", vec![]), text("a"))
        .unwrap();
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["outcome_only"]["feedback"]["html"], "default");
}

#[test]
fn test_settings_from_json_drive_math_rules() {
    let settings = ClassifierSettings::from_json(r#"{"answer_error_checking": "required_only"}"#)
        .unwrap();
    let strict = TestContext::new();
    let lenient = TestContext::with_settings(settings);
    let numeric_interaction = interaction(
        "NumericExpressionInput",
        vec![answer_group(
            vec![rule("IsEquivalentTo", json!({ "math_expression": "3" }))],
            "correct",
        )],
    );
    let answer = || common::fixtures::math("(1 + 2)");
    assert_eq!(strict.feedback(&numeric_interaction, answer()), "default");
    assert_eq!(lenient.feedback(&numeric_interaction, answer()), "correct");
}

#[test]
fn test_translated_rule_inputs() {
    let ctx = TestContext::new();
    let text_interaction = interaction(
        "TextInput",
        vec![answer_group(
            vec![rule("Equals", text_input("ca_equals", &["dog"]))],
            "correct",
        )],
    );
    let context: answer_classifier::ClassificationContext = serde_json::from_value(json!({
        "written_translation_context": { "translations": { "ca_equals": ["perro"] } }
    }))
    .unwrap();

    let classify = |answer: &str| {
        ctx.controller
            .classify(&text_interaction, &text(answer), &context)
            .unwrap()
            .outcome()
            .feedback
            .html
            .clone()
    };
    assert_eq!(classify("Perro"), "correct");
    assert_eq!(classify("dog"), "default");
}
