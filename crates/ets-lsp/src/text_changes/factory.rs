//! Syntax built by code fixes for insertion.
//!
//! The parse tree is never edited, so new syntax is described by `SynthNode`
//! values and rendered to text by a `NodePrinter` at finalization. Existing
//! tree nodes are carried over as `SynthNode::Reuse`, which captures the
//! node's kind and its source text with the first line's indentation
//! removed from the following lines.

use ets_common::comments::is_white_space_single_line;
use ets_parser::{NodeIndex, syntax_kind_ext};
use ets_scanner::SyntaxKind;

use crate::project::ProjectFile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthNode {
    /// An existing node, copied from source text.
    Reuse { kind: u16, text: String },
    Token(SyntaxKind),
    Identifier(String),
    StringLiteral(String),
    PropertyAccess {
        expression: Box<SynthNode>,
        name: String,
    },
    Call {
        expression: Box<SynthNode>,
        arguments: Vec<SynthNode>,
    },
    New {
        expression: Box<SynthNode>,
        arguments: Vec<SynthNode>,
    },
    PrefixUnary {
        operator: SyntaxKind,
        operand: Box<SynthNode>,
    },
    ExpressionStatement(Box<SynthNode>),
    Throw(Box<SynthNode>),
    Block {
        statements: Vec<SynthNode>,
        multi_line: bool,
    },
    PropertyDeclaration {
        modifiers: Vec<SyntaxKind>,
        name: String,
        question: bool,
        type_node: Option<Box<SynthNode>>,
        initializer: Option<Box<SynthNode>>,
    },
    MethodDeclaration {
        modifiers: Vec<SyntaxKind>,
        name: String,
        question: bool,
        parameters: Vec<SynthNode>,
        return_type: Option<Box<SynthNode>>,
        body: Option<Box<SynthNode>>,
    },
    PropertySignature {
        name: String,
        question: bool,
        type_node: Option<Box<SynthNode>>,
    },
    PropertyAssignment {
        name: String,
        initializer: Box<SynthNode>,
    },
    Parameter {
        name: String,
        question: bool,
        type_node: Option<Box<SynthNode>>,
    },
    TypeParameter {
        name: String,
        constraint: Option<Box<SynthNode>>,
    },
    TypeReference(String),
    ImportSpecifier {
        property_name: Option<String>,
        name: String,
    },
    /// Literal text standing in for a node of the given kind.
    Raw { kind: u16, text: String },
}

impl SynthNode {
    /// Copy an existing node out of `file`.
    ///
    /// Returns `None` when the node is not in the file's arena.
    pub fn reuse(file: &ProjectFile, node: NodeIndex) -> Option<SynthNode> {
        let arena = file.arena();
        let data = arena.get(node)?;
        let source = file.source_text();
        let text = source.get(data.pos as usize..data.end as usize)?;
        let line_start = file.line_map().line_start_for_offset(data.pos) as usize;
        let indent = source
            .get(line_start..data.pos as usize)
            .filter(|prefix| prefix.bytes().all(is_white_space_single_line))
            .unwrap_or("");
        Some(SynthNode::Reuse {
            kind: data.kind,
            text: dedent_following_lines(text, indent),
        })
    }

    pub fn token(kind: SyntaxKind) -> SynthNode {
        SynthNode::Token(kind)
    }

    pub fn identifier(name: impl Into<String>) -> SynthNode {
        SynthNode::Identifier(name.into())
    }

    pub fn string_literal(value: impl Into<String>) -> SynthNode {
        SynthNode::StringLiteral(value.into())
    }

    pub fn property_access(expression: SynthNode, name: impl Into<String>) -> SynthNode {
        SynthNode::PropertyAccess {
            expression: Box::new(expression),
            name: name.into(),
        }
    }

    pub fn call(expression: SynthNode, arguments: Vec<SynthNode>) -> SynthNode {
        SynthNode::Call {
            expression: Box::new(expression),
            arguments,
        }
    }

    pub fn new_expression(expression: SynthNode, arguments: Vec<SynthNode>) -> SynthNode {
        SynthNode::New {
            expression: Box::new(expression),
            arguments,
        }
    }

    pub fn prefix_unary(operator: SyntaxKind, operand: SynthNode) -> SynthNode {
        SynthNode::PrefixUnary {
            operator,
            operand: Box::new(operand),
        }
    }

    pub fn expression_statement(expression: SynthNode) -> SynthNode {
        SynthNode::ExpressionStatement(Box::new(expression))
    }

    pub fn throw(expression: SynthNode) -> SynthNode {
        SynthNode::Throw(Box::new(expression))
    }

    pub fn block(statements: Vec<SynthNode>, multi_line: bool) -> SynthNode {
        SynthNode::Block {
            statements,
            multi_line,
        }
    }

    pub fn type_reference(text: impl Into<String>) -> SynthNode {
        SynthNode::TypeReference(text.into())
    }

    pub fn raw(kind: u16, text: impl Into<String>) -> SynthNode {
        SynthNode::Raw {
            kind,
            text: text.into(),
        }
    }

    /// `throw new Error("<message>");`
    pub fn throw_error(message: &str) -> SynthNode {
        SynthNode::throw(SynthNode::new_expression(
            SynthNode::identifier("Error"),
            vec![SynthNode::string_literal(message)],
        ))
    }

    /// Syntax kind of the node, as stored in `Node::kind`.
    pub fn kind(&self) -> u16 {
        use syntax_kind_ext::*;
        match self {
            SynthNode::Reuse { kind, .. } | SynthNode::Raw { kind, .. } => *kind,
            SynthNode::Token(kind) => *kind as u16,
            SynthNode::Identifier(_) => SyntaxKind::Identifier as u16,
            SynthNode::StringLiteral(_) => SyntaxKind::StringLiteral as u16,
            SynthNode::PropertyAccess { .. } => PROPERTY_ACCESS_EXPRESSION,
            SynthNode::Call { .. } => CALL_EXPRESSION,
            SynthNode::New { .. } => NEW_EXPRESSION,
            SynthNode::PrefixUnary { .. } => PREFIX_UNARY_EXPRESSION,
            SynthNode::ExpressionStatement(_) => EXPRESSION_STATEMENT,
            SynthNode::Throw(_) => THROW_STATEMENT,
            SynthNode::Block { .. } => BLOCK,
            SynthNode::PropertyDeclaration { .. } => PROPERTY_DECLARATION,
            SynthNode::MethodDeclaration { .. } => METHOD_DECLARATION,
            SynthNode::PropertySignature { .. } => PROPERTY_SIGNATURE,
            SynthNode::PropertyAssignment { .. } => PROPERTY_ASSIGNMENT,
            SynthNode::Parameter { .. } => PARAMETER,
            SynthNode::TypeParameter { .. } => TYPE_PARAMETER,
            SynthNode::TypeReference(_) => TYPE_REFERENCE,
            SynthNode::ImportSpecifier { .. } => IMPORT_SPECIFIER,
        }
    }
}

/// Remove `indent` from the start of every line after the first.
fn dedent_following_lines(text: &str, indent: &str) -> String {
    if indent.is_empty() || !text.contains('\n') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
            out.push_str(line.strip_prefix(indent).unwrap_or(line));
        } else {
            out.push_str(line);
        }
    }
    out
}
