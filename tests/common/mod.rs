use egglet::interpreter::{parse_and_run, RunError};
use egglet::Value;

pub fn run_program(source: &str) -> Value {
    parse_and_run(source).expect("program should evaluate")
}

pub fn run_error(source: &str) -> RunError {
    parse_and_run(source).expect_err("program should fail")
}

pub fn run_number(source: &str) -> f64 {
    run_program(source)
        .as_number()
        .expect("expected a number result")
}
