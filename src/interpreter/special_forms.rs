use std::rc::Rc;

use crate::ast::{Expr, ExprKind};
use crate::diagnostic::Span;
use crate::value::{Function, Value};

use super::environment::Environment;
use super::error::InterpreterError;
use super::evaluator::Interpreter;

/// The closed set of operators that receive their arguments unevaluated.
///
/// Special forms are recognized by name in operator position only; the same
/// name used anywhere else is an ordinary word and resolves through the
/// environment like any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialForm {
    If,
    While,
    Do,
    Define,
    Fun,
}

impl SpecialForm {
    pub fn lookup(name: &str) -> Option<Self> {
        match name {
            "if" => Some(Self::If),
            "while" => Some(Self::While),
            "do" => Some(Self::Do),
            "define" => Some(Self::Define),
            "fun" => Some(Self::Fun),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::If => "if",
            Self::While => "while",
            Self::Do => "do",
            Self::Define => "define",
            Self::Fun => "fun",
        }
    }

    /// Run the form against its unevaluated argument nodes. `span` is the
    /// span of the whole call, used for shape errors.
    pub fn apply(
        self,
        interpreter: &Interpreter,
        args: &[Expr],
        env: &Rc<Environment>,
        span: Span,
    ) -> Result<Value, InterpreterError> {
        match self {
            Self::If => {
                let [condition, then_branch, else_branch] = args else {
                    return Err(self.wrong_shape(3, args.len(), span));
                };
                // Only the boolean `false` selects the else branch; 0 and
                // the empty text are truthy.
                if interpreter.evaluate(condition, env)?.is_truthy() {
                    interpreter.evaluate(then_branch, env)
                } else {
                    interpreter.evaluate(else_branch, env)
                }
            }
            Self::While => {
                let [condition, body] = args else {
                    return Err(self.wrong_shape(2, args.len(), span));
                };
                while interpreter.evaluate(condition, env)?.is_truthy() {
                    interpreter.evaluate(body, env)?;
                }
                // A finished loop always settles to `false`.
                Ok(Value::Bool(false))
            }
            Self::Do => {
                let mut value = Value::Bool(false);
                for arg in args {
                    value = interpreter.evaluate(arg, env)?;
                }
                Ok(value)
            }
            Self::Define => {
                let [target, value_expr] = args else {
                    return Err(self.wrong_shape(2, args.len(), span));
                };
                let ExprKind::Word(name) = &target.kind else {
                    return Err(InterpreterError::malformed_form(
                        "the first argument of `define` must be a name",
                        target.span,
                    ));
                };
                let value = interpreter.evaluate(value_expr, env)?;
                env.define(name.to_string(), value.clone());
                Ok(value)
            }
            Self::Fun => {
                let Some((body, param_exprs)) = args.split_last() else {
                    return Err(InterpreterError::malformed_form("`fun` needs a body", span));
                };

                let mut params = Vec::with_capacity(param_exprs.len());
                for param in param_exprs {
                    match &param.kind {
                        ExprKind::Word(name) => params.push(Rc::clone(name)),
                        _ => {
                            return Err(InterpreterError::malformed_form(
                                "parameter names must be plain words",
                                param.span,
                            ))
                        }
                    }
                }

                Ok(Value::Function(Rc::new(Function {
                    params,
                    body: body.clone(),
                    env: Rc::clone(env),
                })))
            }
        }
    }

    fn wrong_shape(self, expected: usize, got: usize, span: Span) -> InterpreterError {
        InterpreterError::malformed_form(
            format!(
                "`{}` takes {} argument{}, got {}",
                self.name(),
                expected,
                if expected == 1 { "" } else { "s" },
                got
            ),
            span,
        )
    }
}
