pub mod error;
pub mod expression;
pub mod formatter;
pub mod statement;

use crate::lexer::{Lexer, LineBreaks, Span, Token, TokenKind};
use crate::string::Ident;
pub use error::{ParserError, ParserErrorKind};
use expression::{
    Expression, ExpressionAtom, ExpressionAtomKind, ExpressionNode, ExpressionNodeRef,
    IncompleteExpression, InfixOperator, PostfixOperator, PrefixOperator,
};
use statement::{Block, ExpressionStatement, LetStatement, ReturnStatement, Statement};

#[derive(Debug, Clone)]
pub struct Program {
    statements: Vec<Statement>,
}

impl Program {
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn get_statement(&self, index: usize) -> Option<&Statement> {
        self.statements.get(index)
    }
}

impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for statement in self.statements.iter() {
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}

pub struct Parser<'src> {
    lexer: Lexer<'src>,
    cur: Token,
    peek: Token,
    line_breaks: LineBreaks,
    errors: Vec<ParserError>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        let mut lexer = Lexer::new(source);
        let line_breaks = lexer.get_line_breaks();
        let cur = lexer.next_token();
        let peek = lexer.next_token();
        Self {
            lexer,
            cur,
            peek,
            line_breaks,
            errors: Vec::new(),
        }
    }

    /// Parses until `Eof`. Malformed statements are recorded in `errors`
    /// and skipped; the returned program holds everything that parsed.
    pub fn parse(&mut self) -> Program {
        let mut statements = Vec::new();
        while !self.cur_is(TokenKind::Eof) {
            match self.parse_statement() {
                Ok(statement) => statements.push(statement),
                Err(error) => self.errors.push(error),
            }
            self.advance();
        }
        Program { statements }
    }

    pub fn errors(&self) -> &[ParserError] {
        &self.errors
    }
}

// Token window
impl<'src> Parser<'src> {
    fn advance(&mut self) {
        self.cur = self.peek;
        self.peek = self.lexer.next_token();
    }

    fn cur_is(&self, kind: TokenKind) -> bool {
        self.cur.kind == kind
    }

    fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.kind == kind
    }

    fn expect_peek(&mut self, expected: TokenKind) -> Result<Token, ParserError> {
        if self.peek.kind == expected {
            self.advance();
            Ok(self.cur)
        } else {
            Err(self.error_at(
                self.peek.span,
                ParserErrorKind::UnexpectedToken {
                    expected,
                    actual: self.peek.kind,
                },
            ))
        }
    }

    fn error_at(&self, span: Span, kind: ParserErrorKind) -> ParserError {
        ParserError {
            kind,
            line: self.line_breaks.get_line_from_span(span),
            span,
        }
    }

    fn cur_lexeme(&self) -> &'src str {
        self.lexer
            .get_lexeme(&self.cur.span)
            .expect("Lexed token spans are valid.")
    }

    fn cur_ident(&self) -> Result<Ident, ParserError> {
        if self.cur_is(TokenKind::Ident) {
            Ok(Ident {
                name: self.cur_lexeme().into(),
                span: self.cur.span,
            })
        } else {
            Err(self.error_at(
                self.cur.span,
                ParserErrorKind::UnexpectedToken {
                    expected: TokenKind::Ident,
                    actual: self.cur.kind,
                },
            ))
        }
    }
}

// Statement grammar
impl<'src> Parser<'src> {
    fn parse_statement(&mut self) -> Result<Statement, ParserError> {
        match self.cur.kind {
            TokenKind::KeywordLet => self.parse_let_statement(),
            TokenKind::KeywordReturn => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_let_statement(&mut self) -> Result<Statement, ParserError> {
        self.expect_peek(TokenKind::Ident)?;
        let name = self.cur_ident()?;
        self.expect_peek(TokenKind::Assign)?;
        self.advance();
        let value = self.parse_expression()?;
        if self.peek_is(TokenKind::Semicolon) {
            self.advance();
        }
        Ok(Statement::Let(LetStatement { name, value }))
    }

    fn parse_return_statement(&mut self) -> Result<Statement, ParserError> {
        self.advance();
        let value = self.parse_expression()?;
        if self.peek_is(TokenKind::Semicolon) {
            self.advance();
        }
        Ok(Statement::Return(ReturnStatement { value }))
    }

    fn parse_expression_statement(&mut self) -> Result<Statement, ParserError> {
        let expr = self.parse_expression()?;
        if self.peek_is(TokenKind::Semicolon) {
            self.advance();
        }
        Ok(Statement::Expression(ExpressionStatement { expr }))
    }

    fn parse_block(&mut self) -> Result<Block, ParserError> {
        let mut statements = Vec::new();
        self.advance();
        while !self.cur_is(TokenKind::RightBrace) && !self.cur_is(TokenKind::Eof) {
            match self.parse_statement() {
                Ok(statement) => statements.push(statement),
                Err(error) => self.errors.push(error),
            }
            self.advance();
        }
        Ok(Block { statements })
    }
}

// Pratt parser for expressions
impl<'src> Parser<'src> {
    pub fn parse_expression(&mut self) -> Result<Expression, ParserError> {
        let mut tree = IncompleteExpression::new();
        let root = self.parse_expression_pratt(0, &mut tree)?;

        Ok(Expression::new(tree, root)
            .expect("Root was obtained from the tree itself so it must be valid."))
    }

    fn peek_binary_operator(&self) -> Option<InfixOperator> {
        match self.peek.kind {
            TokenKind::Plus => Some(InfixOperator::Add),
            TokenKind::Minus => Some(InfixOperator::Subtract),
            TokenKind::Asterisk => Some(InfixOperator::Multiply),
            TokenKind::Slash => Some(InfixOperator::Divide),
            TokenKind::LessThan => Some(InfixOperator::LessThan),
            TokenKind::GreaterThan => Some(InfixOperator::GreaterThan),
            TokenKind::Equal => Some(InfixOperator::Equal),
            TokenKind::NotEqual => Some(InfixOperator::NotEqual),
            _ => None,
        }
    }

    fn parse_expression_pratt(
        &mut self,
        min_bp: u8,
        tree: &mut IncompleteExpression,
    ) -> Result<ExpressionNodeRef, ParserError> {
        let mut lhs = self.parse_prefix(tree)?;

        loop {
            if self.peek_is(TokenKind::Semicolon) {
                break;
            }
            if let Some(operator) = self.peek_binary_operator() {
                let (lbp, rbp) = operator.binding_power();
                if lbp < min_bp {
                    break;
                }
                self.advance();
                self.advance();
                let rhs = self.parse_expression_pratt(rbp, tree)?;
                lhs = tree.push(ExpressionNode::Infix { operator, lhs, rhs });
                continue;
            }
            if self.peek_is(TokenKind::LeftParen) {
                if PostfixOperator::Call.binding_power() < min_bp {
                    break;
                }
                self.advance();
                let arguments = self.parse_call_arguments(tree)?;
                lhs = tree.push(ExpressionNode::Call {
                    callee: lhs,
                    arguments,
                });
                continue;
            }
            break;
        }
        Ok(lhs)
    }

    fn parse_prefix(
        &mut self,
        tree: &mut IncompleteExpression,
    ) -> Result<ExpressionNodeRef, ParserError> {
        let token = self.cur;
        let node = match token.kind {
            TokenKind::Ident => tree.push(ExpressionNode::Atom(ExpressionAtom {
                kind: ExpressionAtomKind::Identifier(self.cur_lexeme().into()),
                span: token.span,
            })),
            TokenKind::Int => {
                let lexeme = self.cur_lexeme();
                let value: i64 = lexeme.parse().map_err(|_| {
                    self.error_at(
                        token.span,
                        ParserErrorKind::IntegerOutOfRange(lexeme.into()),
                    )
                })?;
                tree.push(ExpressionNode::Atom(ExpressionAtom {
                    kind: ExpressionAtomKind::Integer(value),
                    span: token.span,
                }))
            }
            TokenKind::KeywordTrue | TokenKind::KeywordFalse => {
                tree.push(ExpressionNode::Atom(ExpressionAtom {
                    kind: ExpressionAtomKind::Bool(token.kind == TokenKind::KeywordTrue),
                    span: token.span,
                }))
            }
            TokenKind::Bang => self.parse_prefix_operator(PrefixOperator::Bang, tree)?,
            TokenKind::Minus => self.parse_prefix_operator(PrefixOperator::Minus, tree)?,
            TokenKind::LeftParen => {
                self.advance();
                let inner = self.parse_expression_pratt(0, tree)?;
                self.expect_peek(TokenKind::RightParen)?;
                inner
            }
            TokenKind::KeywordIf => self.parse_if(tree)?,
            TokenKind::KeywordFunction => self.parse_function(tree)?,
            kind => {
                return Err(self.error_at(token.span, ParserErrorKind::NoPrefixParseFunction(kind)))
            }
        };
        Ok(node)
    }

    fn parse_prefix_operator(
        &mut self,
        operator: PrefixOperator,
        tree: &mut IncompleteExpression,
    ) -> Result<ExpressionNodeRef, ParserError> {
        let rbp = operator.binding_power();
        self.advance();
        let rhs = self.parse_expression_pratt(rbp, tree)?;
        Ok(tree.push(ExpressionNode::Prefix { operator, rhs }))
    }

    fn parse_if(
        &mut self,
        tree: &mut IncompleteExpression,
    ) -> Result<ExpressionNodeRef, ParserError> {
        let span = self.cur.span;
        self.expect_peek(TokenKind::LeftParen)?;
        self.advance();
        let condition = self.parse_expression_pratt(0, tree)?;
        self.expect_peek(TokenKind::RightParen)?;
        self.expect_peek(TokenKind::LeftBrace)?;
        let consequence = self.parse_block()?;
        let alternative = if self.peek_is(TokenKind::KeywordElse) {
            self.advance();
            self.expect_peek(TokenKind::LeftBrace)?;
            Some(self.parse_block()?)
        } else {
            None
        };
        Ok(tree.push(ExpressionNode::If {
            condition,
            consequence,
            alternative,
            span,
        }))
    }

    fn parse_function(
        &mut self,
        tree: &mut IncompleteExpression,
    ) -> Result<ExpressionNodeRef, ParserError> {
        let span = self.cur.span;
        self.expect_peek(TokenKind::LeftParen)?;
        let parameters = self.parse_function_parameters()?;
        self.expect_peek(TokenKind::LeftBrace)?;
        let body = self.parse_block()?;
        Ok(tree.push(ExpressionNode::Function {
            parameters,
            body,
            span,
        }))
    }

    fn parse_function_parameters(&mut self) -> Result<Vec<Ident>, ParserError> {
        let mut parameters = Vec::new();
        if self.peek_is(TokenKind::RightParen) {
            self.advance();
            return Ok(parameters);
        }
        self.advance();
        parameters.push(self.cur_ident()?);
        while self.peek_is(TokenKind::Comma) {
            self.advance();
            self.advance();
            parameters.push(self.cur_ident()?);
        }
        self.expect_peek(TokenKind::RightParen)?;
        Ok(parameters)
    }

    fn parse_call_arguments(
        &mut self,
        tree: &mut IncompleteExpression,
    ) -> Result<Vec<ExpressionNodeRef>, ParserError> {
        let mut arguments = Vec::new();
        if self.peek_is(TokenKind::RightParen) {
            self.advance();
            return Ok(arguments);
        }
        self.advance();
        arguments.push(self.parse_expression_pratt(0, tree)?);
        while self.peek_is(TokenKind::Comma) {
            self.advance();
            self.advance();
            arguments.push(self.parse_expression_pratt(0, tree)?);
        }
        self.expect_peek(TokenKind::RightParen)?;
        Ok(arguments)
    }
}
