use super::statement::Block;
use crate::lexer::Span;
use crate::string::{Ident, IdentName};

#[derive(Debug, Clone)]
pub enum ExpressionAtomKind {
    Integer(i64),
    Bool(bool),
    Identifier(IdentName),
}

#[derive(Debug, Clone)]
pub struct ExpressionAtom {
    pub kind: ExpressionAtomKind,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpressionNodeRef(pub u32);

#[derive(Debug, Clone)]
pub enum ExpressionNode {
    Atom(ExpressionAtom),
    Prefix {
        operator: PrefixOperator,
        rhs: ExpressionNodeRef,
    },
    Infix {
        operator: InfixOperator,
        lhs: ExpressionNodeRef,
        rhs: ExpressionNodeRef,
    },
    If {
        condition: ExpressionNodeRef,
        consequence: Block,
        alternative: Option<Block>,
        span: Span,
    },
    Function {
        parameters: Vec<Ident>,
        body: Block,
        span: Span,
    },
    Call {
        callee: ExpressionNodeRef,
        arguments: Vec<ExpressionNodeRef>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOperator {
    Bang,
    Minus,
}

impl PrefixOperator {
    pub fn binding_power(&self) -> u8 {
        match self {
            PrefixOperator::Bang | PrefixOperator::Minus => 11,
        }
    }
}

impl std::fmt::Display for PrefixOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrefixOperator::Bang => write!(f, "!"),
            PrefixOperator::Minus => write!(f, "-"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    LessThan,
    GreaterThan,
    Equal,
    NotEqual,
}

impl InfixOperator {
    pub fn binding_power(&self) -> (u8, u8) {
        match self {
            // Equality operators
            Self::Equal | Self::NotEqual => (3, 4),
            // Comparison operators
            Self::LessThan | Self::GreaterThan => (5, 6),
            // Additive operators
            Self::Add | Self::Subtract => (7, 8),
            // Multiplicative operators
            Self::Multiply | Self::Divide => (9, 10),
        }
    }
}

impl std::fmt::Display for InfixOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InfixOperator::Add => write!(f, "+"),
            InfixOperator::Subtract => write!(f, "-"),
            InfixOperator::Multiply => write!(f, "*"),
            InfixOperator::Divide => write!(f, "/"),
            InfixOperator::LessThan => write!(f, "<"),
            InfixOperator::GreaterThan => write!(f, ">"),
            InfixOperator::Equal => write!(f, "=="),
            InfixOperator::NotEqual => write!(f, "!="),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum PostfixOperator {
    Call,
}

impl PostfixOperator {
    pub fn binding_power(&self) -> u8 {
        match self {
            Self::Call => 13,
        }
    }
}

/// An expression tree under construction. Nodes are pushed in post-order;
/// the root is only known once parsing the production finishes.
#[derive(Debug, Clone)]
pub struct IncompleteExpression {
    nodes: Vec<ExpressionNode>,
}

impl IncompleteExpression {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn push(&mut self, node: ExpressionNode) -> ExpressionNodeRef {
        self.nodes.push(node);
        ExpressionNodeRef(self.nodes.len() as u32 - 1)
    }
}

impl Default for IncompleteExpression {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct Expression {
    nodes: Vec<ExpressionNode>,
    root: ExpressionNodeRef,
}

impl Expression {
    pub fn new(tree: IncompleteExpression, root: ExpressionNodeRef) -> Option<Self> {
        if (root.0 as usize) < tree.nodes.len() {
            Some(Self {
                nodes: tree.nodes,
                root,
            })
        } else {
            None
        }
    }

    pub fn get_root_ref(&self) -> ExpressionNodeRef {
        self.root
    }

    pub fn get_root(&self) -> &ExpressionNode {
        self.get_node(self.root)
            .expect("The root exists within the tree.")
    }

    pub fn get_node(&self, node: ExpressionNodeRef) -> Option<&ExpressionNode> {
        self.nodes.get(node.0 as usize)
    }

    /// The source span of a node, descending leftward through compound
    /// nodes until an anchoring token is found.
    pub fn get_span(&self, node: ExpressionNodeRef) -> Option<Span> {
        let node = self.nodes.get(node.0 as usize)?;
        match node {
            ExpressionNode::Atom(ExpressionAtom { span, .. }) => Some(*span),
            ExpressionNode::Prefix { rhs, .. } => self.get_span(*rhs),
            ExpressionNode::Infix { lhs, .. } => self.get_span(*lhs),
            ExpressionNode::If { span, .. } => Some(*span),
            ExpressionNode::Function { span, .. } => Some(*span),
            ExpressionNode::Call { callee, .. } => self.get_span(*callee),
        }
    }

    fn fmt_node(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        node: ExpressionNodeRef,
    ) -> std::fmt::Result {
        let current_node = self
            .get_node(node)
            .expect("Node refs held by the tree are valid.");

        match current_node {
            ExpressionNode::Atom(atom) => match &atom.kind {
                ExpressionAtomKind::Integer(value) => write!(f, "{value}"),
                ExpressionAtomKind::Bool(value) => write!(f, "{value}"),
                ExpressionAtomKind::Identifier(name) => write!(f, "{name}"),
            },
            ExpressionNode::Prefix { operator, rhs } => {
                write!(f, "({operator}")?;
                self.fmt_node(f, *rhs)?;
                write!(f, ")")
            }
            ExpressionNode::Infix { operator, lhs, rhs } => {
                write!(f, "(")?;
                self.fmt_node(f, *lhs)?;
                write!(f, " {operator} ")?;
                self.fmt_node(f, *rhs)?;
                write!(f, ")")
            }
            ExpressionNode::If {
                condition,
                consequence,
                alternative,
                ..
            } => {
                write!(f, "if (")?;
                self.fmt_node(f, *condition)?;
                write!(f, ") {{{consequence}}}")?;
                if let Some(alternative) = alternative {
                    write!(f, " else {{{alternative}}}")?;
                }
                Ok(())
            }
            ExpressionNode::Function {
                parameters, body, ..
            } => {
                write!(f, "fn(")?;
                for (i, parameter) in parameters.iter().enumerate() {
                    if i != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{parameter}")?;
                }
                write!(f, ") {{{body}}}")
            }
            ExpressionNode::Call { callee, arguments } => {
                self.fmt_node(f, *callee)?;
                write!(f, "(")?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i != 0 {
                        write!(f, ", ")?;
                    }
                    self.fmt_node(f, *argument)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.fmt_node(f, self.root)
    }
}
