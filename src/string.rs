use crate::lexer::Span;
use std::rc::Rc;

pub type IdentName = Rc<str>;

/// An identifier together with the span it was lexed from.
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub name: IdentName,
    pub span: Span,
}

impl std::fmt::Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
