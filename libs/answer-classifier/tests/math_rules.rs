//! Math interaction tests: exact, trivial-manipulation and equivalence rules.

mod common;

use common::fixtures::{answer_group, interaction, interaction_with_args, math, math_input, osk_letters, rule};
use common::TestContext;

fn algebraic(rule_type: &str, reference: &str) -> answer_classifier::Interaction {
    interaction_with_args(
        "AlgebraicExpressionInput",
        vec![answer_group(vec![rule(rule_type, math_input(reference))], "correct")],
        osk_letters(&["x", "y", "z", "a", "b", "c"]),
    )
}

fn numeric(rule_type: &str, reference: &str) -> answer_classifier::Interaction {
    interaction(
        "NumericExpressionInput",
        vec![answer_group(vec![rule(rule_type, math_input(reference))], "correct")],
    )
}

fn equation(rule_type: &str, reference: &str) -> answer_classifier::Interaction {
    interaction_with_args(
        "MathEquationInput",
        vec![answer_group(vec![rule(rule_type, math_input(reference))], "correct")],
        osk_letters(&["x", "y"]),
    )
}

fn is_correct(ctx: &TestContext, interaction: &answer_classifier::Interaction, answer: &str) -> bool {
    ctx.feedback(interaction, math(answer)) == "correct"
}

#[test]
fn test_matches_exactly_with() {
    let ctx = TestContext::new();
    let exact = algebraic("MatchesExactlyWith", "x+y");
    assert!(is_correct(&ctx, &exact, "x+y"));
    assert!(is_correct(&ctx, &exact, "x + y"));
    assert!(!is_correct(&ctx, &exact, "y+x"));

    let grouped_reference = algebraic("MatchesExactlyWith", "(x+y)");
    assert!(is_correct(&ctx, &grouped_reference, "x+y"));
}

#[test]
fn test_matches_up_to_trivial_manipulations() {
    let ctx = TestContext::new();
    let cases = [
        ("x+y", "y+x"),
        ("x+(y+z)", "x+y+z"),
        ("x+(y+z)", "(x+y)+z"),
        ("yx", "xy"),
        ("x*2", "2x"),
        ("1+x", "1-(-x)"),
        ("6c-(5a+1)", "6c-5a-1"),
    ];
    for (reference, answer) in cases {
        let trivial = algebraic("MatchesUpToTrivialManipulations", reference);
        assert!(is_correct(&ctx, &trivial, answer), "{answer} ~ {reference}");
    }

    let rejected = [
        ("x-y", "-(y-x)"),
        ("x/(y/z)", "(x/y)/z"),
        ("x/4", "x/2/2"),
        ("x^3", "x^(2+1)"),
        ("x/2", "x*(2^(-1))"),
    ];
    for (reference, answer) in rejected {
        let trivial = algebraic("MatchesUpToTrivialManipulations", reference);
        assert!(!is_correct(&ctx, &trivial, answer), "{answer} !~ {reference}");
    }
}

#[test]
fn test_numeric_trivial_manipulations() {
    let ctx = TestContext::new();
    assert!(is_correct(&ctx, &numeric("MatchesUpToTrivialManipulations", "1+2"), "2+1"));
    assert!(is_correct(&ctx, &numeric("MatchesUpToTrivialManipulations", "6−(−4)"), "−(−4)+6"));
    assert!(!is_correct(&ctx, &numeric("MatchesUpToTrivialManipulations", "5"), "2+3"));
    assert!(!is_correct(&ctx, &numeric("MatchesUpToTrivialManipulations", "(1-2)-3"), "1-(2-3)"));
}

#[test]
fn test_is_equivalent_to() {
    let ctx = TestContext::new();
    let equivalent = algebraic("IsEquivalentTo", "4*x");
    assert!(is_correct(&ctx, &equivalent, "2*x+2*x"));
    assert!(is_correct(&ctx, &equivalent, "x*4"));
    assert!(is_correct(&ctx, &equivalent, "8x/2"));
    assert!(!is_correct(&ctx, &equivalent, "4*y"));

    let expanded = algebraic("IsEquivalentTo", "(x+1)^2");
    assert!(is_correct(&ctx, &expanded, "x^2+2x+1"));

    let numeric_equivalent = numeric("IsEquivalentTo", "5");
    assert!(is_correct(&ctx, &numeric_equivalent, "2+3"));
    assert!(is_correct(&ctx, &numeric_equivalent, "√25"));
}

#[test]
fn test_unparseable_answers_fall_through_to_default() {
    let ctx = TestContext::new();
    let equivalent = algebraic("IsEquivalentTo", "2x");
    for answer in ["2w", "2x+", "(2x", "x2"] {
        assert!(!is_correct(&ctx, &equivalent, answer), "{answer}");
    }
    let reports = ctx.diagnostics.reports();
    assert_eq!(reports.len(), 4);
    assert!(reports
        .iter()
        .all(|(tag, _)| tag == "AlgebraicExpressionInput.IsEquivalentTo"));
}

#[test]
fn test_variables_rejected_in_numeric_expressions() {
    let ctx = TestContext::new();
    let equivalent = numeric("IsEquivalentTo", "2");
    assert!(!is_correct(&ctx, &equivalent, "x"));
    let reports = ctx.diagnostics.reports();
    assert!(reports[0].1.contains("variables are not allowed"));
}

#[test]
fn test_equations() {
    let ctx = TestContext::new();
    let exact = equation("MatchesExactlyWith", "y=2x");
    assert!(is_correct(&ctx, &exact, "y=2x"));
    assert!(!is_correct(&ctx, &exact, "2x=y"));

    let trivial = equation("MatchesUpToTrivialManipulations", "y=2x");
    assert!(is_correct(&ctx, &trivial, "2x=y"));
    assert!(is_correct(&ctx, &trivial, "y=x*2"));
    assert!(!is_correct(&ctx, &trivial, "y-2x=0"));

    let equivalent = equation("IsEquivalentTo", "y=2x");
    assert!(is_correct(&ctx, &equivalent, "y-2x=0"));
    assert!(is_correct(&ctx, &equivalent, "2y=4x"));
    assert!(is_correct(&ctx, &equivalent, "2x=y"));
    assert!(!is_correct(&ctx, &equivalent, "y=x"));
    assert!(!is_correct(&ctx, &equivalent, "y+2x"));
}

#[test]
fn test_unary_signs_after_operators() {
    let ctx = TestContext::new();
    let scientific = "3 * 10^-5";
    assert!(is_correct(&ctx, &numeric("MatchesUpToTrivialManipulations", scientific), "3*10^-5"));
    assert!(is_correct(&ctx, &algebraic("MatchesUpToTrivialManipulations", scientific), "3*10^-5"));
    assert!(is_correct(&ctx, &numeric("MatchesExactlyWith", scientific), "3 * 10^-5"));

    assert!(is_correct(&ctx, &algebraic("MatchesExactlyWith", "x^-1"), "x^-1"));
    assert!(is_correct(&ctx, &numeric("IsEquivalentTo", "5"), "2++3"));
    assert!(is_correct(&ctx, &numeric("IsEquivalentTo", "-6"), "2*-3"));
    assert!(ctx.diagnostics.reports().is_empty());
}

#[test]
fn test_empty_variable_list_allows_no_variables() {
    let ctx = TestContext::new();
    let expression = interaction(
        "AlgebraicExpressionInput",
        vec![answer_group(vec![rule("MatchesExactlyWith", math_input("y"))], "correct")],
    );
    assert!(!is_correct(&ctx, &expression, "y"));

    let exact = interaction(
        "MathEquationInput",
        vec![answer_group(vec![rule("MatchesExactlyWith", math_input("y=1"))], "correct")],
    );
    assert!(!is_correct(&ctx, &exact, "y=1"));
    assert!(!is_correct(&ctx, &exact, "1=y"));

    let reports = ctx.diagnostics.reports();
    assert!(!reports.is_empty());
    assert!(reports
        .iter()
        .all(|(_, message)| message.contains("variables not allowed here: y")));
}
