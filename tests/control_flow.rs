//! The special forms: `if`, `while`, `do`, `define`.

mod common;

use common::{run_number, run_program};
use egglet::Value;

#[test]
fn test_if_picks_the_else_branch_on_false() {
    assert_eq!(run_number("if(false, 1, 2)"), 2.0);
}

#[test]
fn test_if_picks_the_then_branch_on_true() {
    assert_eq!(run_number("if(true, 1, 2)"), 1.0);
}

#[test]
fn test_only_false_is_falsy() {
    // 0 and the empty text both count as true.
    assert_eq!(run_number("if(0, 1, 2)"), 1.0);
    assert_eq!(run_number(r#"if("", 1, 2)"#), 1.0);
    assert_eq!(run_number(r#"if("false", 1, 2)"#), 1.0);
}

#[test]
fn test_if_does_not_evaluate_the_untaken_branch() {
    // The unbound name in the else branch would fail if it were evaluated.
    assert_eq!(run_number("if(true, 1, thisIsNotDefined)"), 1.0);
}

#[test]
fn test_condition_result_drives_the_branch() {
    assert_eq!(run_number("if(<(3, 2), 1, 2)"), 2.0);
}

#[test]
fn test_do_returns_the_last_value() {
    assert_eq!(run_number("do(1, 2, 3)"), 3.0);
}

#[test]
fn test_empty_do_returns_false() {
    assert_eq!(run_program("do()"), Value::Bool(false));
}

#[test]
fn test_define_returns_the_bound_value() {
    assert_eq!(run_number("define(x, 21)"), 21.0);
}

#[test]
fn test_define_is_visible_to_later_siblings() {
    assert_eq!(run_number("do(define(x, 4), *(x, x))"), 16.0);
}

#[test]
fn test_redefinition_replaces_the_binding() {
    assert_eq!(run_number("do(define(x, 1), define(x, 2), x)"), 2.0);
}

#[test]
fn test_while_returns_false() {
    assert_eq!(run_program("while(false, 1)"), Value::Bool(false));
}

#[test]
fn test_while_with_false_condition_skips_the_body() {
    // The body would fail if the loop entered it.
    assert_eq!(
        run_program("while(false, thisIsNotDefined)"),
        Value::Bool(false)
    );
}

#[test]
fn test_summation_loop() {
    let source = "do(define(total, 0),
                     define(count, 1),
                     while(<(count, 11),
                           do(define(total, +(total, count)),
                              define(count, +(count, 1)))),
                     total)";
    assert_eq!(run_number(source), 55.0);
}

#[test]
fn test_loop_condition_sees_body_definitions() {
    let source = "do(define(n, 0),
                     while(<(n, 5), define(n, +(n, 1))),
                     n)";
    assert_eq!(run_number(source), 5.0);
}
