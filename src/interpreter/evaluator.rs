use std::rc::Rc;

use crate::ast::{Expr, ExprKind};
use crate::diagnostic::{Diagnostic, Span};
use crate::value::Value;

use super::builtins;
use super::environment::Environment;
use super::error::InterpreterError;
use super::parser::{self, ParseError};
use super::special_forms::SpecialForm;

/// Tree-walking evaluator. Holds the seeded global environment; each `run`
/// evaluates one program in a fresh child frame of it, so consecutive runs
/// never see each other's definitions.
pub struct Interpreter {
    globals: Rc<Environment>,
}

impl Interpreter {
    pub fn new() -> Self {
        Self {
            globals: builtins::global_environment(),
        }
    }

    /// Parse `source` as one expression and evaluate it.
    pub fn run(&self, source: &str) -> Result<Value, RunError> {
        let program = parser::parse(source)?;
        let env = Rc::new(Environment::with_parent(Rc::clone(&self.globals)));
        Ok(self.evaluate(&program, &env)?)
    }

    /// Join `lines` with newlines and run the result, a convenience for
    /// programs authored as separate lines.
    pub fn run_lines<'a>(
        &self,
        lines: impl IntoIterator<Item = &'a str>,
    ) -> Result<Value, RunError> {
        let source = lines.into_iter().collect::<Vec<_>>().join("\n");
        self.run(&source)
    }

    pub fn evaluate(
        &self,
        expr: &Expr,
        env: &Rc<Environment>,
    ) -> Result<Value, InterpreterError> {
        match &expr.kind {
            ExprKind::Literal(value) => Ok(value.clone()),
            ExprKind::Word(name) => env
                .get(name)
                .ok_or_else(|| InterpreterError::unbound_name(name.as_ref(), expr.span)),
            ExprKind::Apply { operator, args } => {
                // A word in operator position is checked against the special
                // forms before it is evaluated; that is what lets `if` and
                // friends control the order their arguments run in.
                if let Some(name) = operator.as_word() {
                    if let Some(form) = SpecialForm::lookup(name) {
                        return form.apply(self, args, env, expr.span);
                    }
                }

                let callee = self.evaluate(operator, env)?;
                // The operator is vetted before any argument runs.
                if !callee.is_callable() {
                    return Err(InterpreterError::not_callable(
                        callee.type_name(),
                        expr.span,
                    ));
                }
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(self.evaluate(arg, env)?);
                }
                self.call(&callee, &values, expr.span)
            }
        }
    }

    /// Invoke a callable with already-evaluated arguments.
    pub fn call(
        &self,
        callee: &Value,
        args: &[Value],
        span: Span,
    ) -> Result<Value, InterpreterError> {
        match callee {
            Value::Function(function) => {
                if args.len() != function.params.len() {
                    return Err(InterpreterError::arity_mismatch(
                        function.params.len(),
                        args.len(),
                        span,
                    ));
                }
                // The new frame chains to the closure's captured
                // environment, not the caller's.
                let frame = Rc::new(Environment::with_parent(Rc::clone(&function.env)));
                for (param, value) in function.params.iter().zip(args) {
                    frame.define(param.to_string(), value.clone());
                }
                self.evaluate(&function.body, &frame)
            }
            Value::Builtin(builtin) => {
                if args.len() != builtin.arity {
                    return Err(InterpreterError::arity_mismatch(
                        builtin.arity,
                        args.len(),
                        span,
                    ));
                }
                (builtin.run)(args, span)
            }
            other => Err(InterpreterError::not_callable(other.type_name(), span)),
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Either phase's failure, as surfaced to the embedding caller.
#[derive(Debug)]
pub enum RunError {
    Parse(ParseError),
    Eval(InterpreterError),
}

impl RunError {
    pub fn span(&self) -> Span {
        match self {
            Self::Parse(err) => err.span,
            Self::Eval(err) => err.span(),
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Self::Parse(err) => err.to_diagnostic(),
            Self::Eval(err) => err.to_diagnostic(),
        }
    }
}

impl From<ParseError> for RunError {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

impl From<InterpreterError> for RunError {
    fn from(err: InterpreterError) -> Self {
        Self::Eval(err)
    }
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "{}", err),
            Self::Eval(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for RunError {}

/// One-shot convenience: a fresh interpreter, one program.
pub fn parse_and_run(source: &str) -> Result<Value, RunError> {
    Interpreter::new().run(source)
}
