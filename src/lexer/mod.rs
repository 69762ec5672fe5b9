mod cursor;
pub mod formatter;
mod span;
mod state;
mod token;

use cursor::SourceChar;
pub use span::{Span, SpanIndex, SpanLength};
use state::{LexerState, LexerStateTransition};
use std::{rc::Rc, str::Chars};
pub use token::{Token, TokenKind, KEYWORD_HASHMAP};

/// Maps byte offsets to 1-based line numbers.
#[derive(Debug, Clone)]
pub struct LineBreaks {
    starts: Rc<[SpanIndex]>,
}

impl LineBreaks {
    fn new(text: &str) -> Self {
        let mut starts = vec![SpanIndex::new(0)];
        for (offset, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                starts.push((offset + 1).into());
            }
        }
        Self {
            starts: starts.into(),
        }
    }

    pub fn get_line(&self, offset: SpanIndex) -> u32 {
        self.starts.partition_point(|start| *start <= offset) as u32
    }

    pub fn get_line_from_span(&self, span: Span) -> u32 {
        self.get_line(span.start)
    }
}

#[derive(Debug)]
pub struct Lexer<'src> {
    source: &'src str,
    chars: Chars<'src>,
    state: LexerState,
    offset: SpanIndex,
    lookahead: Option<SourceChar>,
    line_breaks: LineBreaks,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            chars: source.chars(),
            state: LexerState::default(),
            offset: 0.into(),
            lookahead: None,
            line_breaks: LineBreaks::new(source),
        }
    }

    pub fn get_source(&self) -> &'src str {
        self.source
    }

    pub fn get_line_breaks(&self) -> LineBreaks {
        self.line_breaks.clone()
    }

    pub fn get_lexeme(&self, span: &Span) -> Option<&'src str> {
        self.source.get(span.range())
    }
}

impl<'src> Lexer<'src> {
    fn next_char(&mut self) -> Option<SourceChar> {
        match self.lookahead.take() {
            Some(c) => Some(c),
            None => {
                let c = self.chars.next()?;
                let old_offset = self.offset;
                self.offset = self.offset + c.len_utf8();
                Some(SourceChar {
                    value: c,
                    offset: old_offset,
                })
            }
        }
    }

    fn put_back_char(&mut self, c: SourceChar) {
        self.lookahead = Some(c);
    }

    /// Scans the next token. Total: unknown characters come out as
    /// `Illegal` tokens and the end of input yields `Eof` forever.
    pub fn next_token(&mut self) -> Token {
        loop {
            let next_char = self.next_char();
            let transition = self.state.execute(self.source, &next_char);

            match transition {
                LexerStateTransition::Stay => {}
                LexerStateTransition::ChangeState(new_state) => {
                    self.state = new_state;
                }
                LexerStateTransition::ChangeStateAndEmit { new_state, token } => {
                    self.state = new_state;
                    return token;
                }
                LexerStateTransition::ChangeStateAndEmitAndPutBack {
                    new_state,
                    token,
                    put_back,
                } => {
                    self.state = new_state;
                    self.put_back_char(put_back);
                    return token;
                }
            }
        }
    }
}
