use super::environment::Environment;
use super::error::RuntimeErrorKind;
use crate::parser::expression::PrefixOperator;
use crate::parser::statement::Block;
use crate::string::Ident;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Function {
    pub parameters: Vec<Ident>,
    pub body: Block,
    pub closure: Environment,
}

#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Int(i64),
    Bool(bool),
    Function(Arc<Function>),
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "Null"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Function(function) => {
                write!(f, "fn(")?;
                for (i, parameter) in function.parameters.iter().enumerate() {
                    if i != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{parameter}")?;
                }
                write!(f, ") {{\n{}\n}}", function.body)
            }
        }
    }
}

impl Value {
    /// The uppercase tag used in runtime error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Int(_) => "INTEGER",
            Value::Bool(_) => "BOOLEAN",
            Value::Function(_) => "FUNCTION",
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Int(_) => true,
            Value::Bool(v) => *v,
            Value::Function(_) => false,
        }
    }

    /// The `!` operator. Not `!is_truthy`: a function is falsey under
    /// truthiness yet still negates to `false`.
    pub fn logical_not(&self) -> Value {
        match self {
            Value::Null => Value::Bool(true),
            Value::Int(_) => Value::Bool(false),
            Value::Bool(v) => Value::Bool(!v),
            _ => Value::Bool(false),
        }
    }

    pub fn numeric_negate(&self) -> Result<Value, RuntimeErrorKind> {
        match self {
            Value::Int(v) => Ok(Value::Int(v.wrapping_neg())),
            v => Err(RuntimeErrorKind::UnknownPrefixOperator {
                operator: PrefixOperator::Minus,
                operand: v.type_name(),
            }),
        }
    }

    /// Equality by variant and payload. Functions compare unequal to
    /// everything, themselves included.
    pub fn is_equal(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Int(lhs), Value::Int(rhs)) => lhs == rhs,
            (Value::Bool(lhs), Value::Bool(rhs)) => lhs == rhs,
            _ => false,
        }
    }
}
