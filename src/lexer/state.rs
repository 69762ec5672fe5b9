use super::cursor::SourceChar;
use super::span::{Span, SpanIndex};
use super::token::{Token, TokenKind, KEYWORD_HASHMAP};

#[derive(Debug)]
pub enum LexerStateTransition {
    Stay,
    ChangeState(LexerState),
    ChangeStateAndEmit {
        new_state: LexerState,
        token: Token,
    },
    ChangeStateAndEmitAndPutBack {
        new_state: LexerState,
        token: Token,
        put_back: SourceChar,
    },
}

pub trait LexerStateExecutor {
    fn execute(&self, source: &str, next_char: &Option<SourceChar>) -> LexerStateTransition;
}

#[derive(Debug)]
pub enum LexerState {
    Normal(NormalState),
    Ident(IdentState),
    Integer(IntegerState),
    // Pending `=`, resolved into `=` or `==` by one char of lookahead
    Equals(EqualsState),
    // Pending `!`, resolved into `!` or `!=`
    Bang(BangState),
}

impl LexerState {
    pub fn execute(&self, source: &str, next_char: &Option<SourceChar>) -> LexerStateTransition {
        match self {
            LexerState::Normal(s) => s.execute(source, next_char),
            LexerState::Ident(s) => s.execute(source, next_char),
            LexerState::Integer(s) => s.execute(source, next_char),
            LexerState::Equals(s) => s.execute(source, next_char),
            LexerState::Bang(s) => s.execute(source, next_char),
        }
    }
}

impl std::default::Default for LexerState {
    fn default() -> Self {
        Self::Normal(NormalState {
            location: SpanIndex::new(0),
        })
    }
}

fn is_ident_char(c: char) -> bool {
    // Digits are deliberately not identifier characters: they terminate the run.
    c.is_ascii_alphabetic() || c == '_'
}

#[derive(Debug)]
pub struct NormalState {
    location: SpanIndex,
}

impl LexerStateExecutor for NormalState {
    fn execute(&self, source: &str, next_char: &Option<SourceChar>) -> LexerStateTransition {
        let _ = source;
        let Some(c) = next_char else {
            return LexerStateTransition::ChangeStateAndEmit {
                new_state: LexerState::Normal(NormalState {
                    location: self.location,
                }),
                token: Token {
                    kind: TokenKind::Eof,
                    span: Span {
                        start: self.location,
                        length: 0.into(),
                    },
                },
            };
        };

        let just = move |kind: TokenKind| LexerStateTransition::ChangeStateAndEmit {
            new_state: LexerState::Normal(NormalState {
                location: c.next_offset(),
            }),
            token: Token {
                kind,
                span: Span {
                    start: c.offset,
                    length: c.value.len_utf8().into(),
                },
            },
        };

        match c.value {
            '(' => just(TokenKind::LeftParen),
            ')' => just(TokenKind::RightParen),
            '{' => just(TokenKind::LeftBrace),
            '}' => just(TokenKind::RightBrace),
            ',' => just(TokenKind::Comma),
            ';' => just(TokenKind::Semicolon),
            '+' => just(TokenKind::Plus),
            '-' => just(TokenKind::Minus),
            '*' => just(TokenKind::Asterisk),
            '/' => just(TokenKind::Slash),
            '<' => just(TokenKind::LessThan),
            '>' => just(TokenKind::GreaterThan),
            '=' => LexerStateTransition::ChangeState(LexerState::Equals(EqualsState {
                start: c.offset,
            })),
            '!' => {
                LexerStateTransition::ChangeState(LexerState::Bang(BangState { start: c.offset }))
            }
            _ if is_ident_char(c.value) => {
                LexerStateTransition::ChangeState(LexerState::Ident(IdentState {
                    start: c.offset,
                }))
            }
            '0'..='9' => LexerStateTransition::ChangeState(LexerState::Integer(IntegerState {
                start: c.offset,
            })),
            _ if c.value.is_ascii_whitespace() => {
                LexerStateTransition::ChangeState(LexerState::Normal(NormalState {
                    location: c.next_offset(),
                }))
            }
            _ => just(TokenKind::Illegal),
        }
    }
}

#[derive(Debug)]
pub struct IdentState {
    start: SpanIndex,
}

impl IdentState {
    fn lex_ident_or_keyword(&self, source: &str, end: SpanIndex) -> Token {
        let span = Span {
            start: self.start,
            length: end - self.start,
        };
        let lexeme = &source[span.range()];
        Token {
            kind: KEYWORD_HASHMAP
                .get(lexeme)
                .copied()
                .unwrap_or(TokenKind::Ident),
            span,
        }
    }
}

impl LexerStateExecutor for IdentState {
    fn execute(&self, source: &str, next_char: &Option<SourceChar>) -> LexerStateTransition {
        let Some(c) = next_char else {
            return LexerStateTransition::ChangeStateAndEmit {
                new_state: LexerState::Normal(NormalState {
                    location: source.len().into(),
                }),
                token: self.lex_ident_or_keyword(source, source.len().into()),
            };
        };

        if is_ident_char(c.value) {
            LexerStateTransition::Stay
        } else {
            LexerStateTransition::ChangeStateAndEmitAndPutBack {
                new_state: LexerState::Normal(NormalState { location: c.offset }),
                token: self.lex_ident_or_keyword(source, c.offset),
                put_back: *c,
            }
        }
    }
}

#[derive(Debug)]
pub struct IntegerState {
    start: SpanIndex,
}

impl IntegerState {
    fn lex_integer(&self, end: SpanIndex) -> Token {
        Token {
            kind: TokenKind::Int,
            span: Span {
                start: self.start,
                length: end - self.start,
            },
        }
    }
}

impl LexerStateExecutor for IntegerState {
    fn execute(&self, source: &str, next_char: &Option<SourceChar>) -> LexerStateTransition {
        let Some(c) = next_char else {
            return LexerStateTransition::ChangeStateAndEmit {
                new_state: LexerState::Normal(NormalState {
                    location: source.len().into(),
                }),
                token: self.lex_integer(source.len().into()),
            };
        };

        if c.value.is_ascii_digit() {
            LexerStateTransition::Stay
        } else {
            LexerStateTransition::ChangeStateAndEmitAndPutBack {
                new_state: LexerState::Normal(NormalState { location: c.offset }),
                token: self.lex_integer(c.offset),
                put_back: *c,
            }
        }
    }
}

#[derive(Debug)]
pub struct EqualsState {
    start: SpanIndex,
}

impl LexerStateExecutor for EqualsState {
    fn execute(&self, source: &str, next_char: &Option<SourceChar>) -> LexerStateTransition {
        let single = Token {
            kind: TokenKind::Assign,
            span: Span {
                start: self.start,
                length: 1.into(),
            },
        };
        let Some(c) = next_char else {
            return LexerStateTransition::ChangeStateAndEmit {
                new_state: LexerState::Normal(NormalState {
                    location: source.len().into(),
                }),
                token: single,
            };
        };

        if c.value == '=' {
            LexerStateTransition::ChangeStateAndEmit {
                new_state: LexerState::Normal(NormalState {
                    location: c.next_offset(),
                }),
                token: Token {
                    kind: TokenKind::Equal,
                    span: Span {
                        start: self.start,
                        length: 2.into(),
                    },
                },
            }
        } else {
            LexerStateTransition::ChangeStateAndEmitAndPutBack {
                new_state: LexerState::Normal(NormalState { location: c.offset }),
                token: single,
                put_back: *c,
            }
        }
    }
}

#[derive(Debug)]
pub struct BangState {
    start: SpanIndex,
}

impl LexerStateExecutor for BangState {
    fn execute(&self, source: &str, next_char: &Option<SourceChar>) -> LexerStateTransition {
        let single = Token {
            kind: TokenKind::Bang,
            span: Span {
                start: self.start,
                length: 1.into(),
            },
        };
        let Some(c) = next_char else {
            return LexerStateTransition::ChangeStateAndEmit {
                new_state: LexerState::Normal(NormalState {
                    location: source.len().into(),
                }),
                token: single,
            };
        };

        if c.value == '=' {
            LexerStateTransition::ChangeStateAndEmit {
                new_state: LexerState::Normal(NormalState {
                    location: c.next_offset(),
                }),
                token: Token {
                    kind: TokenKind::NotEqual,
                    span: Span {
                        start: self.start,
                        length: 2.into(),
                    },
                },
            }
        } else {
            LexerStateTransition::ChangeStateAndEmitAndPutBack {
                new_state: LexerState::Normal(NormalState { location: c.offset }),
                token: single,
                put_back: *c,
            }
        }
    }
}
