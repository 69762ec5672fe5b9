use crate::lexer::Span;
use crate::parser::expression::{InfixOperator, PrefixOperator};
use crate::string::IdentName;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeErrorKind {
    #[error("identifier not found: {0}")]
    IdentifierNotFound(IdentName),
    #[error("unknown operator: {operator}{operand}")]
    UnknownPrefixOperator {
        operator: PrefixOperator,
        operand: &'static str,
    },
    #[error("unknown operator: {left} {operator} {right}")]
    UnknownInfixOperator {
        operator: InfixOperator,
        left: &'static str,
        right: &'static str,
    },
    #[error("type mismatch: {left} {operator} {right}")]
    TypeMismatch {
        operator: InfixOperator,
        left: &'static str,
        right: &'static str,
    },
    #[error("not a function: {0}")]
    NotCallable(&'static str),
    #[error("division by zero")]
    DivisionByZero,
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{kind}")]
pub struct RuntimeError {
    #[source]
    pub kind: RuntimeErrorKind,
    pub span: Span,
}

impl RuntimeError {
    pub fn code(&self) -> &'static str {
        match self.kind {
            RuntimeErrorKind::IdentifierNotFound(_) => "RT001",
            RuntimeErrorKind::UnknownPrefixOperator { .. } => "RT002",
            RuntimeErrorKind::UnknownInfixOperator { .. } => "RT003",
            RuntimeErrorKind::TypeMismatch { .. } => "RT004",
            RuntimeErrorKind::NotCallable(_) => "RT005",
            RuntimeErrorKind::DivisionByZero => "RT006",
        }
    }
}
