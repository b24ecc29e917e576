//! The global seed: bindings every program starts from.
//!
//! The seed holds the boolean names, the arity-2 operators `+ - * / == < >`,
//! and `print`. Programs run in a fresh child frame of this environment, so
//! nothing they define ever lands here.

use std::io::Write;
use std::rc::Rc;

use crate::diagnostic::Span;
use crate::format;
use crate::value::{Builtin, Value};

use super::environment::Environment;
use super::error::InterpreterError;

macro_rules! numeric_binary {
    ($fn_name:ident, $name:literal, $op:tt) => {
        fn $fn_name(args: &[Value], span: Span) -> Result<Value, InterpreterError> {
            match (&args[0], &args[1]) {
                (Value::Number(left), Value::Number(right)) => Ok(Value::Number(left $op right)),
                (left, right) => Err(InterpreterError::type_mismatch(
                    format!(
                        concat!("`", $name, "` expects numbers, got {} and {}"),
                        left.type_name(),
                        right.type_name()
                    ),
                    span,
                )),
            }
        }
    };
}

macro_rules! ordering_binary {
    ($fn_name:ident, $name:literal, $op:tt) => {
        fn $fn_name(args: &[Value], span: Span) -> Result<Value, InterpreterError> {
            match (&args[0], &args[1]) {
                (Value::Number(left), Value::Number(right)) => Ok(Value::Bool(left $op right)),
                (Value::Text(left), Value::Text(right)) => Ok(Value::Bool(left $op right)),
                (left, right) => Err(InterpreterError::type_mismatch(
                    format!(
                        concat!("`", $name, "` expects two numbers or two texts, got {} and {}"),
                        left.type_name(),
                        right.type_name()
                    ),
                    span,
                )),
            }
        }
    };
}

numeric_binary!(builtin_sub, "-", -);
numeric_binary!(builtin_mul, "*", *);
numeric_binary!(builtin_div, "/", /);
ordering_binary!(builtin_lt, "<", <);
ordering_binary!(builtin_gt, ">", >);

fn builtin_add(args: &[Value], span: Span) -> Result<Value, InterpreterError> {
    match (&args[0], &args[1]) {
        (Value::Number(left), Value::Number(right)) => Ok(Value::Number(left + right)),
        (Value::Text(left), Value::Text(right)) => {
            Ok(Value::Text(Rc::from(format!("{}{}", left, right))))
        }
        (left, right) => Err(InterpreterError::type_mismatch(
            format!(
                "`+` expects two numbers or two texts, got {} and {}",
                left.type_name(),
                right.type_name()
            ),
            span,
        )),
    }
}

fn builtin_eq(args: &[Value], _span: Span) -> Result<Value, InterpreterError> {
    Ok(Value::Bool(args[0] == args[1]))
}

/// Writes the value's textual form to stdout as one line and hands the value
/// back, so `print` composes inside larger expressions.
fn builtin_print(args: &[Value], _span: Span) -> Result<Value, InterpreterError> {
    println!("{}", format::display_value(&args[0]));
    std::io::stdout().flush().ok();
    Ok(args[0].clone())
}

static ADD: Builtin = Builtin { name: "+", arity: 2, run: builtin_add };
static SUB: Builtin = Builtin { name: "-", arity: 2, run: builtin_sub };
static MUL: Builtin = Builtin { name: "*", arity: 2, run: builtin_mul };
static DIV: Builtin = Builtin { name: "/", arity: 2, run: builtin_div };
static EQ: Builtin = Builtin { name: "==", arity: 2, run: builtin_eq };
static LT: Builtin = Builtin { name: "<", arity: 2, run: builtin_lt };
static GT: Builtin = Builtin { name: ">", arity: 2, run: builtin_gt };
static PRINT: Builtin = Builtin { name: "print", arity: 1, run: builtin_print };

/// Builds the root environment every run chains from.
pub fn global_environment() -> Rc<Environment> {
    let env = Environment::new();

    env.define("true", Value::Bool(true));
    env.define("false", Value::Bool(false));

    for builtin in [&ADD, &SUB, &MUL, &DIV, &EQ, &LT, &GT, &PRINT] {
        env.define(builtin.name, Value::Builtin(builtin));
    }

    Rc::new(env)
}
