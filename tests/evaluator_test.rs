use proptest::prelude::*;

use capuchin::evaluator::{eval, Environment, RuntimeError, Value};
use capuchin::parser::Parser;

fn test_eval(input: &str) -> Result<Value, RuntimeError> {
    let mut parser = Parser::new(input);
    let program = parser.parse();
    assert!(
        parser.errors().is_empty(),
        "unexpected parse errors for {input:?}: {:?}",
        parser.errors()
    );
    let mut environment = Environment::new();
    eval(&program, &mut environment)
}

fn check_int(input: &str, expected: i64) {
    match test_eval(input) {
        Ok(Value::Int(value)) => assert_eq!(value, expected, "failed on {input:?}"),
        other => panic!("expected Int({expected}) for {input:?}, got {other:?}"),
    }
}

fn check_bool(input: &str, expected: bool) {
    match test_eval(input) {
        Ok(Value::Bool(value)) => assert_eq!(value, expected, "failed on {input:?}"),
        other => panic!("expected Bool({expected}) for {input:?}, got {other:?}"),
    }
}

fn check_null(input: &str) {
    match test_eval(input) {
        Ok(Value::Null) => {}
        other => panic!("expected Null for {input:?}, got {other:?}"),
    }
}

fn check_error(input: &str, expected: &str) {
    match test_eval(input) {
        Err(error) => assert_eq!(error.to_string(), expected, "failed on {input:?}"),
        other => panic!("expected error {expected:?} for {input:?}, got {other:?}"),
    }
}

#[test]
fn integer_expressions() {
    let tests = [
        ("5", 5),
        ("10", 10),
        ("-5", -5),
        ("-10", -10),
        ("5 + 5 + 5 + 5 - 10", 10),
        ("2 * 2 * 2 * 2 * 2", 32),
        ("-50 + 100 + -50", 0),
        ("5 * 2 + 10", 20),
        ("5 + 2 * 10", 25),
        ("20 + 2 * -10", 0),
        ("50 / 2 * 2 + 10", 60),
        ("2 * (5 + 10)", 30),
        ("3 * 3 * 3 + 10", 37),
        ("3 * (3 * 3) + 10", 37),
        ("(5 + 10 * 2 + 15 / 3) * 2 + -10", 50),
    ];
    for (input, expected) in tests {
        check_int(input, expected);
    }
}

#[test]
fn boolean_expressions() {
    let tests = [
        ("true", true),
        ("false", false),
        ("1 < 2", true),
        ("1 > 2", false),
        ("1 < 1", false),
        ("1 > 1", false),
        ("1 == 1", true),
        ("1 != 1", false),
        ("1 == 2", false),
        ("1 != 2", true),
        ("true == true", true),
        ("false == false", true),
        ("true == false", false),
        ("true != false", true),
        ("false != true", true),
        ("(1 < 2) == true", true),
        ("(1 < 2) == false", false),
        ("(1 > 2) == true", false),
        ("(1 > 2) == false", true),
    ];
    for (input, expected) in tests {
        check_bool(input, expected);
    }
}

#[test]
fn bang_operator() {
    let tests = [
        ("!true", false),
        ("!false", true),
        ("!5", false),
        ("!!true", true),
        ("!!false", false),
        ("!!5", true),
        ("!0", false),
        ("!fn(x) { x }", false),
    ];
    for (input, expected) in tests {
        check_bool(input, expected);
    }
}

#[test]
fn if_else_expressions() {
    let tests = [
        ("if (true) { 10 }", Some(10)),
        ("if (false) { 10 }", None),
        ("if (1) { 10 }", Some(10)),
        // Zero is truthy: only false and Null are falsey.
        ("if (0) { 10 }", Some(10)),
        ("if (1 < 2) { 10 }", Some(10)),
        ("if (1 > 2) { 10 }", None),
        ("if (1 > 2) { 10 } else { 20 }", Some(20)),
        ("if (1 < 2) { 10 } else { 20 }", Some(10)),
    ];
    for (input, expected) in tests {
        match expected {
            Some(value) => check_int(input, value),
            None => check_null(input),
        }
    }
}

#[test]
fn return_statements() {
    let tests = [
        ("return 10;", 10),
        ("return 10; 9;", 10),
        ("return 2 * 5; 9;", 10),
        ("9; return 2 * 5; 9;", 10),
        ("if (10 > 1) { return 10; }", 10),
        (
            "if (10 > 1) { if (10 > 1) { return 10; } return 1; }",
            10,
        ),
    ];
    for (input, expected) in tests {
        check_int(input, expected);
    }
}

#[test]
fn let_statements() {
    let tests = [
        ("let a = 5; a;", 5),
        ("let a = 5 * 5; a;", 25),
        ("let a = 5; let b = a; b;", 5),
        ("let a = 5; let b = a; let c = a + b + 5; c;", 15),
    ];
    for (input, expected) in tests {
        check_int(input, expected);
    }
}

#[test]
fn let_produces_null() {
    check_null("let a = 5;");
}

#[test]
fn function_application() {
    let tests = [
        ("let identity = fn(x) { x; }; identity(5);", 5),
        ("let identity = fn(x) { return x; }; identity(5);", 5),
        ("let double = fn(x) { x * 2; }; double(5);", 10),
        ("let add = fn(x, y) { x + y; }; add(5, 5);", 10),
        ("let add = fn(x, y) { x + y; }; add(5 + 5, add(5, 5));", 20),
        ("fn(x) { x; }(5)", 5),
    ];
    for (input, expected) in tests {
        check_int(input, expected);
    }
}

#[test]
fn closures() {
    check_int(
        "let newAdder = fn(x) { fn(y) { x + y }; }; let addTwo = newAdder(2); addTwo(2);",
        4,
    );
}

#[test]
fn closures_see_later_bindings_in_their_scope() {
    // The captured environment is shared, not copied: a binding made
    // after the closure was built is still visible through it.
    check_int(
        "let delayed = fn() { late }; let late = 7; delayed();",
        7,
    );
}

#[test]
fn recursion() {
    check_bool(
        "let counter = fn(x) { if (x > 100) { return true; } else { counter(x + 1); } }; counter(0);",
        true,
    );
    check_int(
        "let fib = fn(n) { if (n < 2) { n } else { fib(n - 1) + fib(n - 2) } }; fib(10);",
        55,
    );
}

#[test]
fn arity_is_not_checked() {
    // Extra arguments are silently dropped.
    check_int("fn(x) { x; }(1, 2)", 1);
    // Missing arguments surface as unbound parameters.
    check_error(
        "fn(x, y) { x + y; }(1)",
        "identifier not found: y",
    );
}

#[test]
fn error_handling() {
    let tests = [
        ("5 + true;", "type mismatch: INTEGER + BOOLEAN"),
        ("5 + true; 5;", "type mismatch: INTEGER + BOOLEAN"),
        ("-true", "unknown operator: -BOOLEAN"),
        ("true + false;", "unknown operator: BOOLEAN + BOOLEAN"),
        ("5; true + false; 5", "unknown operator: BOOLEAN + BOOLEAN"),
        (
            "if (10 > 1) { true + false; }",
            "unknown operator: BOOLEAN + BOOLEAN",
        ),
        (
            "if (10 > 1) { if (10 > 1) { return true + false; } return 1; }",
            "unknown operator: BOOLEAN + BOOLEAN",
        ),
        ("foobar", "identifier not found: foobar"),
        ("5 / 0", "division by zero"),
        ("5(3)", "not a function: INTEGER"),
        ("true > false", "unknown operator: BOOLEAN > BOOLEAN"),
    ];
    for (input, expected) in tests {
        check_error(input, expected);
    }
}

#[test]
fn equality_on_non_integers_is_by_payload() {
    // Nulls are equal to each other; functions are never equal, even to
    // themselves.
    check_bool("let a = if (false) { 1 }; let b = if (false) { 1 }; a == b", true);
    check_bool("let f = fn(x) { x }; f == f", false);
    check_bool("let f = fn(x) { x }; f != f", true);
}

#[test]
fn errors_propagate_through_let_and_calls() {
    check_error("let a = 5 + true; a;", "type mismatch: INTEGER + BOOLEAN");
    check_error(
        "let f = fn(x) { x }; f(5 + true)",
        "type mismatch: INTEGER + BOOLEAN",
    );
    check_error(
        "let f = fn() { -true }; f()",
        "unknown operator: -BOOLEAN",
    );
}

#[test]
fn value_inspection() {
    let tests = [
        ("5", "5"),
        ("true", "true"),
        ("false", "false"),
        ("if (false) { 10 }", "Null"),
        ("fn(x) { x + 2; }", "fn(x) {\n(x + 2)\n}"),
        ("fn(x, y) { x + y; }", "fn(x, y) {\n(x + y)\n}"),
    ];
    for (input, expected) in tests {
        let value = test_eval(input).expect("evaluation should succeed");
        assert_eq!(value.to_string(), expected, "failed on {input:?}");
    }
}

#[test]
fn error_inspection() {
    let error = test_eval("foobar").expect_err("evaluation should fail");
    assert_eq!(
        format!("Error: {error}"),
        "Error: identifier not found: foobar"
    );
}

#[test]
fn truthiness_is_total() {
    for input in ["0", "5", "true", "false", "if (false) { 1 }", "fn() { 1 }"] {
        let value = test_eval(input).expect("evaluation should succeed");
        // Every value kind answers the question.
        let _ = value.is_truthy();
    }
}

// Property-based tests

proptest! {
    #[test]
    fn closure_capture_adds(a in -1_000_000i64..1_000_000, b in -1_000_000i64..1_000_000) {
        let input = format!("fn(x) {{ fn(y) {{ x + y }} }}({a})({b})");
        match test_eval(&input) {
            Ok(Value::Int(value)) => prop_assert_eq!(value, a + b),
            other => prop_assert!(false, "unexpected result {:?}", other),
        }
    }

    #[test]
    fn comparison_matches_host(a in -1000i64..1000, b in -1000i64..1000) {
        let input = format!("{a} < {b}");
        match test_eval(&input) {
            Ok(Value::Bool(value)) => prop_assert_eq!(value, a < b),
            other => prop_assert!(false, "unexpected result {:?}", other),
        }
    }
}
