use proptest::prelude::*;

use capuchin::lexer::{Lexer, TokenKind};

fn check(input: &str, expected: &[(TokenKind, &str)]) {
    let mut scanner = Lexer::new(input);
    for (i, (kind, lexeme)) in expected.iter().enumerate() {
        let token = scanner.next_token();
        assert_eq!(token.kind, *kind, "kind mismatch at token {i} of {input:?}");
        assert_eq!(
            scanner.get_lexeme(&token.span).unwrap_or(""),
            *lexeme,
            "lexeme mismatch at token {i} of {input:?}"
        );
    }
    let token = scanner.next_token();
    assert_eq!(token.kind, TokenKind::Eof, "expected EOF after {input:?}");
}

#[test]
fn smoke_test() {
    check("", &[]);
}

#[test]
fn lexes_symbols() {
    check(
        "=+(){},;",
        &[
            (TokenKind::Assign, "="),
            (TokenKind::Plus, "+"),
            (TokenKind::LeftParen, "("),
            (TokenKind::RightParen, ")"),
            (TokenKind::LeftBrace, "{"),
            (TokenKind::RightBrace, "}"),
            (TokenKind::Comma, ","),
            (TokenKind::Semicolon, ";"),
        ],
    );
}

#[test]
fn lexes_operators() {
    check(
        "! - / * < > == != =",
        &[
            (TokenKind::Bang, "!"),
            (TokenKind::Minus, "-"),
            (TokenKind::Slash, "/"),
            (TokenKind::Asterisk, "*"),
            (TokenKind::LessThan, "<"),
            (TokenKind::GreaterThan, ">"),
            (TokenKind::Equal, "=="),
            (TokenKind::NotEqual, "!="),
            (TokenKind::Assign, "="),
        ],
    );
}

#[test]
fn lexes_adjacent_two_char_operators() {
    check(
        "10 == 10;10 != 9;",
        &[
            (TokenKind::Int, "10"),
            (TokenKind::Equal, "=="),
            (TokenKind::Int, "10"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::Int, "10"),
            (TokenKind::NotEqual, "!="),
            (TokenKind::Int, "9"),
            (TokenKind::Semicolon, ";"),
        ],
    );
}

#[test]
fn lexes_a_program() {
    let input = "let five = 5;\n\
                 let ten = 10;\n\
                 let add = fn(x, y) {\n\
                 x + y;\n\
                 };\n\
                 let result = add(five, ten);\n\
                 if (5 < 10) { return true; } else { return false; }";
    check(
        input,
        &[
            (TokenKind::KeywordLet, "let"),
            (TokenKind::Ident, "five"),
            (TokenKind::Assign, "="),
            (TokenKind::Int, "5"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::KeywordLet, "let"),
            (TokenKind::Ident, "ten"),
            (TokenKind::Assign, "="),
            (TokenKind::Int, "10"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::KeywordLet, "let"),
            (TokenKind::Ident, "add"),
            (TokenKind::Assign, "="),
            (TokenKind::KeywordFunction, "fn"),
            (TokenKind::LeftParen, "("),
            (TokenKind::Ident, "x"),
            (TokenKind::Comma, ","),
            (TokenKind::Ident, "y"),
            (TokenKind::RightParen, ")"),
            (TokenKind::LeftBrace, "{"),
            (TokenKind::Ident, "x"),
            (TokenKind::Plus, "+"),
            (TokenKind::Ident, "y"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::RightBrace, "}"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::KeywordLet, "let"),
            (TokenKind::Ident, "result"),
            (TokenKind::Assign, "="),
            (TokenKind::Ident, "add"),
            (TokenKind::LeftParen, "("),
            (TokenKind::Ident, "five"),
            (TokenKind::Comma, ","),
            (TokenKind::Ident, "ten"),
            (TokenKind::RightParen, ")"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::KeywordIf, "if"),
            (TokenKind::LeftParen, "("),
            (TokenKind::Int, "5"),
            (TokenKind::LessThan, "<"),
            (TokenKind::Int, "10"),
            (TokenKind::RightParen, ")"),
            (TokenKind::LeftBrace, "{"),
            (TokenKind::KeywordReturn, "return"),
            (TokenKind::KeywordTrue, "true"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::RightBrace, "}"),
            (TokenKind::KeywordElse, "else"),
            (TokenKind::LeftBrace, "{"),
            (TokenKind::KeywordReturn, "return"),
            (TokenKind::KeywordFalse, "false"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::RightBrace, "}"),
        ],
    );
}

#[test]
fn digits_terminate_identifiers() {
    check(
        "foo123",
        &[(TokenKind::Ident, "foo"), (TokenKind::Int, "123")],
    );
}

#[test]
fn unknown_characters_become_illegal_tokens() {
    check(
        "5 @ 6",
        &[
            (TokenKind::Int, "5"),
            (TokenKind::Illegal, "@"),
            (TokenKind::Int, "6"),
        ],
    );
}

#[test]
fn eof_repeats() {
    let mut scanner = Lexer::new("5");
    assert_eq!(scanner.next_token().kind, TokenKind::Int);
    for _ in 0..3 {
        assert_eq!(scanner.next_token().kind, TokenKind::Eof);
    }
}

// Property-based tests

fn symbol_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("(".to_string()),
        Just(")".to_string()),
        Just("{".to_string()),
        Just("}".to_string()),
        Just(",".to_string()),
        Just(";".to_string()),
        Just("+".to_string()),
        Just("-".to_string()),
        Just("*".to_string()),
        Just("/".to_string()),
        Just("!".to_string()),
        Just("!=".to_string()),
        Just("=".to_string()),
        Just("==".to_string()),
        Just("<".to_string()),
        Just(">".to_string()),
    ]
}

fn integer_literal_strategy() -> impl Strategy<Value = String> {
    "[0-9]{1,18}".prop_map(|s| s)
}

fn identifier_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z_]{0,10}".prop_map(|s: String| s)
}

fn keyword_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("fn".to_string()),
        Just("let".to_string()),
        Just("if".to_string()),
        Just("else".to_string()),
        Just("return".to_string()),
        Just("true".to_string()),
        Just("false".to_string()),
    ]
}

fn token_sequence_strategy() -> impl Strategy<Value = Vec<String>> {
    const MIN_TOKEN_COUNT: usize = 1;
    const MAX_TOKEN_COUNT: usize = 100;
    prop::collection::vec(
        prop_oneof![
            symbol_strategy(),
            integer_literal_strategy(),
            identifier_strategy(),
            keyword_strategy(),
        ],
        MIN_TOKEN_COUNT..MAX_TOKEN_COUNT,
    )
}

proptest! {
    #[test]
    fn lexer_is_total_and_counts_tokens(input in token_sequence_strategy()) {
        // Add 1 to include the EOF token
        let expected_num_tokens = input.len() + 1;
        let input = input.join(" ");
        let mut scanner = Lexer::new(&input);
        let mut num_tokens = 0;
        loop {
            num_tokens += 1;
            let token = scanner.next_token();
            prop_assert_ne!(token.kind, TokenKind::Illegal);
            if token.kind == TokenKind::Eof {
                break;
            }
        }
        prop_assert_eq!(num_tokens, expected_num_tokens);
    }

    #[test]
    fn lexer_never_stalls_on_arbitrary_input(input in "[ -~\n\t]{0,200}") {
        let mut scanner = Lexer::new(&input);
        let mut num_tokens = 0usize;
        loop {
            let token = scanner.next_token();
            num_tokens += 1;
            // Every byte yields at most one token.
            prop_assert!(num_tokens <= input.len() + 1);
            if token.kind == TokenKind::Eof {
                break;
            }
        }
    }
}
