use crate::diagnostic::{Diagnostic, Label, Span};

/// A failure raised while walking the tree. Evaluation stops at the first
/// one; nothing is retried or recovered inside the core.
#[derive(Debug, Clone, PartialEq)]
pub enum InterpreterError {
    /// A word was not bound anywhere in the environment chain.
    UnboundName { name: String, span: Span },
    /// The operator of a call evaluated to something that cannot be called.
    NotCallable { found: String, span: Span },
    /// A callable was invoked with the wrong number of arguments.
    ArityMismatch {
        expected: usize,
        got: usize,
        span: Span,
    },
    /// A special form was written with an argument shape it does not accept.
    MalformedForm { message: String, span: Span },
    /// A builtin received operands of a type it does not work on.
    TypeMismatch { message: String, span: Span },
}

impl InterpreterError {
    pub fn unbound_name(name: impl Into<String>, span: Span) -> Self {
        Self::UnboundName {
            name: name.into(),
            span,
        }
    }

    pub fn not_callable(found: impl Into<String>, span: Span) -> Self {
        Self::NotCallable {
            found: found.into(),
            span,
        }
    }

    pub fn arity_mismatch(expected: usize, got: usize, span: Span) -> Self {
        Self::ArityMismatch {
            expected,
            got,
            span,
        }
    }

    pub fn malformed_form(message: impl Into<String>, span: Span) -> Self {
        Self::MalformedForm {
            message: message.into(),
            span,
        }
    }

    pub fn type_mismatch(message: impl Into<String>, span: Span) -> Self {
        Self::TypeMismatch {
            message: message.into(),
            span,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::UnboundName { span, .. } => *span,
            Self::NotCallable { span, .. } => *span,
            Self::ArityMismatch { span, .. } => *span,
            Self::MalformedForm { span, .. } => *span,
            Self::TypeMismatch { span, .. } => *span,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Self::UnboundName { name, span } => {
                Diagnostic::error(format!("unbound name `{}`", name))
                    .with_code("E0201")
                    .with_label(Label::primary(*span, "not defined in any enclosing scope"))
            }
            Self::NotCallable { found, span } => {
                Diagnostic::error(format!("cannot call {}", found))
                    .with_code("E0202")
                    .with_label(Label::primary(*span, "this is not a function"))
            }
            Self::ArityMismatch {
                expected,
                got,
                span,
            } => Diagnostic::error(format!(
                "this call supplies {} argument{} but the function takes {}",
                got,
                if *got == 1 { "" } else { "s" },
                expected
            ))
            .with_code("E0203")
            .with_label(Label::primary(*span, "wrong number of arguments")),
            Self::MalformedForm { message, span } => Diagnostic::error(message.clone())
                .with_code("E0204")
                .with_label(Label::primary(*span, "")),
            Self::TypeMismatch { message, span } => Diagnostic::error(message.clone())
                .with_code("E0205")
                .with_label(Label::primary(*span, "")),
        }
    }
}

impl std::fmt::Display for InterpreterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnboundName { name, .. } => write!(f, "unbound name `{}`", name),
            Self::NotCallable { found, .. } => write!(f, "cannot call {}", found),
            Self::ArityMismatch { expected, got, .. } => {
                write!(f, "expected {} argument(s), got {}", expected, got)
            }
            Self::MalformedForm { message, .. } => write!(f, "{}", message),
            Self::TypeMismatch { message, .. } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for InterpreterError {}
