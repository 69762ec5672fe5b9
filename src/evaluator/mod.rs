pub mod environment;
pub mod error;
pub mod formatter;
pub mod value;

pub use environment::Environment;
pub use error::{RuntimeError, RuntimeErrorKind};
pub use value::{Function, Value};

use crate::lexer::Span;
use crate::parser::expression::{
    Expression, ExpressionAtom, ExpressionAtomKind, ExpressionNode, ExpressionNodeRef,
    InfixOperator, PrefixOperator,
};
use crate::parser::statement::{Block, Statement};
use crate::parser::Program;
use std::sync::Arc;

/// How a statement or expression finished: with an ordinary value, or
/// with a `return` signal that must propagate to the nearest function
/// boundary (or the top level) before unwrapping.
#[derive(Debug)]
enum Flow {
    Value(Value),
    Return(Value),
}

impl Flow {
    fn into_value(self) -> Value {
        match self {
            Flow::Value(value) | Flow::Return(value) => value,
        }
    }
}

/// Unwraps a `Flow` into its value, propagating `return` signals to the
/// caller untouched.
macro_rules! try_value {
    ($flow:expr) => {
        match $flow {
            Flow::Value(value) => value,
            ret @ Flow::Return(_) => return Ok(ret),
        }
    };
}

/// Evaluates a program against the given root environment. The result is
/// the last statement's value, or the value of the first `return` that
/// reaches the top level.
pub fn eval(program: &Program, environment: &mut Environment) -> Result<Value, RuntimeError> {
    let mut result = Value::Null;
    for statement in program.statements() {
        match eval_statement(statement, environment)? {
            Flow::Value(value) => result = value,
            Flow::Return(value) => return Ok(value),
        }
    }
    Ok(result)
}

fn eval_statement(statement: &Statement, environment: &mut Environment) -> Result<Flow, RuntimeError> {
    match statement {
        Statement::Let(stmt) => {
            let value = try_value!(eval_expression(&stmt.value, environment)?);
            environment.set(&stmt.name.name, value);
            Ok(Flow::Value(Value::Null))
        }
        Statement::Return(stmt) => {
            let value = eval_expression(&stmt.value, environment)?.into_value();
            Ok(Flow::Return(value))
        }
        Statement::Expression(stmt) => eval_expression(&stmt.expr, environment),
    }
}

fn eval_block(block: &Block, environment: &mut Environment) -> Result<Flow, RuntimeError> {
    let mut result = Flow::Value(Value::Null);
    for statement in block.statements.iter() {
        match eval_statement(statement, environment)? {
            Flow::Value(value) => result = Flow::Value(value),
            ret @ Flow::Return(_) => return Ok(ret),
        }
    }
    Ok(result)
}

fn eval_expression(expr: &Expression, environment: &mut Environment) -> Result<Flow, RuntimeError> {
    eval_node(expr, expr.get_root_ref(), environment)
}

fn eval_node(
    expr: &Expression,
    node: ExpressionNodeRef,
    environment: &mut Environment,
) -> Result<Flow, RuntimeError> {
    let current_node = expr
        .get_node(node)
        .expect("Node refs held by the tree are valid.");

    match current_node {
        ExpressionNode::Atom(atom) => eval_atom(atom, environment),
        ExpressionNode::Prefix { operator, rhs } => {
            let rhs_value = try_value!(eval_node(expr, *rhs, environment)?);
            evaluate_prefix(*operator, &rhs_value)
                .map(Flow::Value)
                .map_err(|kind| RuntimeError {
                    kind,
                    span: span_of(expr, node),
                })
        }
        ExpressionNode::Infix { operator, lhs, rhs } => {
            let lhs_value = try_value!(eval_node(expr, *lhs, environment)?);
            let rhs_value = try_value!(eval_node(expr, *rhs, environment)?);
            evaluate_infix(*operator, &lhs_value, &rhs_value)
                .map(Flow::Value)
                .map_err(|kind| RuntimeError {
                    kind,
                    span: span_of(expr, node),
                })
        }
        ExpressionNode::If {
            condition,
            consequence,
            alternative,
            ..
        } => {
            let condition_value = try_value!(eval_node(expr, *condition, environment)?);
            if condition_value.is_truthy() {
                eval_block(consequence, environment)
            } else if let Some(alternative) = alternative {
                eval_block(alternative, environment)
            } else {
                Ok(Flow::Value(Value::Null))
            }
        }
        ExpressionNode::Function {
            parameters, body, ..
        } => Ok(Flow::Value(Value::Function(Arc::new(Function {
            parameters: parameters.clone(),
            body: body.clone(),
            closure: environment.clone(),
        })))),
        ExpressionNode::Call { callee, arguments } => {
            let callee_value = try_value!(eval_node(expr, *callee, environment)?);
            let function = match callee_value {
                Value::Function(function) => function,
                value => {
                    return Err(RuntimeError {
                        kind: RuntimeErrorKind::NotCallable(value.type_name()),
                        span: span_of(expr, *callee),
                    })
                }
            };
            let mut argument_values = Vec::with_capacity(arguments.len());
            for argument in arguments.iter() {
                argument_values.push(try_value!(eval_node(expr, *argument, environment)?));
            }
            apply_function(&function, argument_values)
        }
    }
}

fn eval_atom(atom: &ExpressionAtom, environment: &Environment) -> Result<Flow, RuntimeError> {
    let result = match &atom.kind {
        ExpressionAtomKind::Integer(value) => Value::Int(*value),
        ExpressionAtomKind::Bool(value) => Value::Bool(*value),
        ExpressionAtomKind::Identifier(name) => {
            environment.get(name).ok_or(RuntimeError {
                kind: RuntimeErrorKind::IdentifierNotFound(name.clone()),
                span: atom.span,
            })?
        }
    };
    Ok(Flow::Value(result))
}

/// Binds arguments positionally in a fresh scope over the captured
/// environment, then runs the body. Arity is not checked: extra
/// arguments are dropped and missing parameters stay unbound.
fn apply_function(function: &Function, arguments: Vec<Value>) -> Result<Flow, RuntimeError> {
    let mut scope = function.closure.new_scope();
    for (parameter, argument) in function.parameters.iter().zip(arguments) {
        scope.set(&parameter.name, argument);
    }
    let result = eval_block(&function.body, &mut scope)?;
    Ok(Flow::Value(result.into_value()))
}

fn evaluate_prefix(operator: PrefixOperator, rhs: &Value) -> Result<Value, RuntimeErrorKind> {
    match operator {
        PrefixOperator::Bang => Ok(rhs.logical_not()),
        PrefixOperator::Minus => rhs.numeric_negate(),
    }
}

fn evaluate_infix(
    operator: InfixOperator,
    lhs: &Value,
    rhs: &Value,
) -> Result<Value, RuntimeErrorKind> {
    if lhs.type_name() != rhs.type_name() {
        return Err(RuntimeErrorKind::TypeMismatch {
            operator,
            left: lhs.type_name(),
            right: rhs.type_name(),
        });
    }
    if let (Value::Int(lhs), Value::Int(rhs)) = (lhs, rhs) {
        return evaluate_integer_infix(operator, *lhs, *rhs);
    }
    match operator {
        InfixOperator::Equal => Ok(Value::Bool(lhs.is_equal(rhs))),
        InfixOperator::NotEqual => Ok(Value::Bool(!lhs.is_equal(rhs))),
        _ => Err(RuntimeErrorKind::UnknownInfixOperator {
            operator,
            left: lhs.type_name(),
            right: rhs.type_name(),
        }),
    }
}

fn evaluate_integer_infix(
    operator: InfixOperator,
    lhs: i64,
    rhs: i64,
) -> Result<Value, RuntimeErrorKind> {
    let result = match operator {
        InfixOperator::Add => Value::Int(lhs.wrapping_add(rhs)),
        InfixOperator::Subtract => Value::Int(lhs.wrapping_sub(rhs)),
        InfixOperator::Multiply => Value::Int(lhs.wrapping_mul(rhs)),
        InfixOperator::Divide => {
            if rhs == 0 {
                return Err(RuntimeErrorKind::DivisionByZero);
            }
            Value::Int(lhs.wrapping_div(rhs))
        }
        InfixOperator::LessThan => Value::Bool(lhs < rhs),
        InfixOperator::GreaterThan => Value::Bool(lhs > rhs),
        InfixOperator::Equal => Value::Bool(lhs == rhs),
        InfixOperator::NotEqual => Value::Bool(lhs != rhs),
    };
    Ok(result)
}

fn span_of(expr: &Expression, node: ExpressionNodeRef) -> Span {
    expr.get_span(node)
        .expect("Node refs held by the tree are valid.")
}
