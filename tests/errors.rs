//! Failure modes: parse errors and each runtime error kind.

mod common;

use common::run_error;
use egglet::interpreter::{InterpreterError, RunError};

fn expect_parse_error(source: &str) -> String {
    match run_error(source) {
        RunError::Parse(err) => err.message,
        other => panic!("expected a parse failure, got {:?}", other),
    }
}

fn expect_eval_error(source: &str) -> InterpreterError {
    match run_error(source) {
        RunError::Eval(err) => err,
        other => panic!("expected an evaluation failure, got {:?}", other),
    }
}

// Parse failures

#[test]
fn test_missing_close_paren() {
    let message = expect_parse_error("foo(1, 2");
    assert!(message.contains("unclosed"));
}

#[test]
fn test_missing_comma() {
    let message = expect_parse_error("foo(1 2)");
    assert!(message.contains("expected `,` or `)`"));
}

#[test]
fn test_trailing_text_after_the_program() {
    let message = expect_parse_error("+(1, 2) 3");
    assert!(message.contains("trailing"));
}

#[test]
fn test_empty_program() {
    expect_parse_error("");
    expect_parse_error("   \n  ");
}

#[test]
fn test_unterminated_string() {
    expect_parse_error(r#"print("oops"#);
}

#[test]
fn test_lone_delimiter() {
    expect_parse_error(")");
    expect_parse_error(",");
}

// Runtime failures

#[test]
fn test_unbound_name_reports_the_identifier() {
    match expect_eval_error("undefinedName") {
        InterpreterError::UnboundName { name, .. } => assert_eq!(name, "undefinedName"),
        other => panic!("expected an unbound-name failure, got {:?}", other),
    }
}

#[test]
fn test_unbound_name_inside_a_call() {
    match expect_eval_error("+(1, mystery)") {
        InterpreterError::UnboundName { name, .. } => assert_eq!(name, "mystery"),
        other => panic!("expected an unbound-name failure, got {:?}", other),
    }
}

#[test]
fn test_applying_a_number_fails() {
    assert!(matches!(
        expect_eval_error("1(2)"),
        InterpreterError::NotCallable { .. }
    ));
}

#[test]
fn test_operator_is_vetted_before_arguments_run() {
    // The unbound argument never gets evaluated.
    assert!(matches!(
        expect_eval_error("1(mystery)"),
        InterpreterError::NotCallable { .. }
    ));
}

#[test]
fn test_applying_a_text_fails() {
    assert!(matches!(
        expect_eval_error(r#""f"(1)"#),
        InterpreterError::NotCallable { .. }
    ));
}

#[test]
fn test_applying_a_defined_non_function_fails() {
    assert!(matches!(
        expect_eval_error("do(define(x, 5), x(1))"),
        InterpreterError::NotCallable { .. }
    ));
}

// Malformed special forms

#[test]
fn test_define_target_must_be_a_name() {
    assert!(matches!(
        expect_eval_error("define(1, 2)"),
        InterpreterError::MalformedForm { .. }
    ));
}

#[test]
fn test_define_takes_exactly_two_arguments() {
    assert!(matches!(
        expect_eval_error("define(x)"),
        InterpreterError::MalformedForm { .. }
    ));
    assert!(matches!(
        expect_eval_error("define(x, 1, 2)"),
        InterpreterError::MalformedForm { .. }
    ));
}

#[test]
fn test_if_takes_exactly_three_arguments() {
    assert!(matches!(
        expect_eval_error("if(true, 1)"),
        InterpreterError::MalformedForm { .. }
    ));
}

#[test]
fn test_while_takes_exactly_two_arguments() {
    assert!(matches!(
        expect_eval_error("while(true)"),
        InterpreterError::MalformedForm { .. }
    ));
}

#[test]
fn test_fun_needs_a_body() {
    assert!(matches!(
        expect_eval_error("fun()"),
        InterpreterError::MalformedForm { .. }
    ));
}

#[test]
fn test_fun_parameters_must_be_words() {
    assert!(matches!(
        expect_eval_error("fun(1, x)"),
        InterpreterError::MalformedForm { .. }
    ));
    assert!(matches!(
        expect_eval_error(r#"fun("a", x)"#),
        InterpreterError::MalformedForm { .. }
    ));
}

// Operand type failures

#[test]
fn test_arithmetic_rejects_mixed_operands() {
    assert!(matches!(
        expect_eval_error(r#"+(1, "a")"#),
        InterpreterError::TypeMismatch { .. }
    ));
    assert!(matches!(
        expect_eval_error("-(true, 1)"),
        InterpreterError::TypeMismatch { .. }
    ));
}

#[test]
fn test_ordering_rejects_booleans() {
    assert!(matches!(
        expect_eval_error("<(true, false)"),
        InterpreterError::TypeMismatch { .. }
    ));
}

#[test]
fn test_errors_abort_evaluation_immediately() {
    // The loop would never finish if evaluation continued past the failure.
    assert!(matches!(
        expect_eval_error("do(+(1, \"a\"), while(true, 1))"),
        InterpreterError::TypeMismatch { .. }
    ));
}
