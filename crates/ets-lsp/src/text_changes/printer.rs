//! Rendering `SynthNode`s to source text.

use ets_scanner::{SyntaxKind, token_to_string};

use super::factory::SynthNode;
use crate::config::{FormatCodeSettings, UserPreferences};

/// Renders a node under the given settings.
///
/// The tracker calls the printer once per node-carrying change during
/// finalization. Output starts at column 0; lines after the first carry
/// their indentation relative to the node's first line.
pub trait NodePrinter {
    fn print(&self, node: &SynthNode, settings: &FormatCodeSettings, preferences: &UserPreferences) -> String;
}

/// Plain text printer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextPrinter;

impl NodePrinter for TextPrinter {
    fn print(&self, node: &SynthNode, settings: &FormatCodeSettings, preferences: &UserPreferences) -> String {
        let mut writer = Writer {
            settings,
            preferences,
            out: String::new(),
        };
        writer.node(node);
        writer.out
    }
}

struct Writer<'a> {
    settings: &'a FormatCodeSettings,
    preferences: &'a UserPreferences,
    out: String,
}

impl Writer<'_> {
    fn node(&mut self, node: &SynthNode) {
        match node {
            SynthNode::Reuse { text, .. } | SynthNode::Raw { text, .. } => self.out.push_str(text),
            SynthNode::Token(kind) => self.token(*kind),
            SynthNode::Identifier(name) | SynthNode::TypeReference(name) => self.out.push_str(name),
            SynthNode::StringLiteral(value) => self.string_literal(value),
            SynthNode::PropertyAccess { expression, name } => {
                self.node(expression);
                self.out.push('.');
                self.out.push_str(name);
            }
            SynthNode::Call {
                expression,
                arguments,
            } => {
                self.node(expression);
                self.arguments(arguments);
            }
            SynthNode::New {
                expression,
                arguments,
            } => {
                self.out.push_str("new ");
                self.node(expression);
                self.arguments(arguments);
            }
            SynthNode::PrefixUnary { operator, operand } => {
                self.token(*operator);
                self.node(operand);
            }
            SynthNode::ExpressionStatement(expression) => {
                self.node(expression);
                self.terminator();
            }
            SynthNode::Throw(expression) => {
                self.out.push_str("throw ");
                self.node(expression);
                self.terminator();
            }
            SynthNode::Block {
                statements,
                multi_line,
            } => self.block(statements, *multi_line),
            SynthNode::PropertyDeclaration {
                modifiers,
                name,
                question,
                type_node,
                initializer,
            } => {
                self.modifiers(modifiers);
                self.out.push_str(name);
                if *question {
                    self.out.push('?');
                }
                self.type_annotation(type_node.as_deref());
                if let Some(initializer) = initializer {
                    self.out.push_str(" = ");
                    self.node(initializer);
                }
                self.terminator();
            }
            SynthNode::MethodDeclaration {
                modifiers,
                name,
                question,
                parameters,
                return_type,
                body,
            } => {
                self.modifiers(modifiers);
                self.out.push_str(name);
                if *question {
                    self.out.push('?');
                }
                self.arguments(parameters);
                self.type_annotation(return_type.as_deref());
                match body {
                    Some(body) => {
                        self.out.push(' ');
                        self.node(body);
                    }
                    None => self.terminator(),
                }
            }
            SynthNode::PropertySignature {
                name,
                question,
                type_node,
            } => {
                self.out.push_str(name);
                if *question {
                    self.out.push('?');
                }
                self.type_annotation(type_node.as_deref());
                self.out.push(';');
            }
            SynthNode::PropertyAssignment { name, initializer } => {
                self.out.push_str(name);
                self.out.push_str(": ");
                self.node(initializer);
            }
            SynthNode::Parameter {
                name,
                question,
                type_node,
            } => {
                self.out.push_str(name);
                if *question {
                    self.out.push('?');
                }
                self.type_annotation(type_node.as_deref());
            }
            SynthNode::TypeParameter { name, constraint } => {
                self.out.push_str(name);
                if let Some(constraint) = constraint {
                    self.out.push_str(" extends ");
                    self.node(constraint);
                }
            }
            SynthNode::ImportSpecifier {
                property_name,
                name,
            } => {
                if let Some(property_name) = property_name {
                    self.out.push_str(property_name);
                    self.out.push_str(" as ");
                }
                self.out.push_str(name);
            }
        }
    }

    fn token(&mut self, kind: SyntaxKind) {
        self.out.push_str(token_to_string(kind).unwrap_or(""));
    }

    fn terminator(&mut self) {
        self.out.push_str(self.settings.statement_terminator());
    }

    fn string_literal(&mut self, value: &str) {
        let quote = self.preferences.quote_char();
        self.out.push(quote);
        for ch in value.chars() {
            match ch {
                '\\' => self.out.push_str("\\\\"),
                '\n' => self.out.push_str("\\n"),
                c if c == quote => {
                    self.out.push('\\');
                    self.out.push(c);
                }
                c => self.out.push(c),
            }
        }
        self.out.push(quote);
    }

    fn arguments(&mut self, items: &[SynthNode]) {
        self.out.push('(');
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.out.push_str(self.settings.comma_separator());
            }
            self.node(item);
        }
        self.out.push(')');
    }

    fn modifiers(&mut self, modifiers: &[SyntaxKind]) {
        for &modifier in modifiers {
            self.token(modifier);
            self.out.push(' ');
        }
    }

    fn type_annotation(&mut self, type_node: Option<&SynthNode>) {
        if let Some(type_node) = type_node {
            self.out.push_str(": ");
            self.node(type_node);
        }
    }

    fn block(&mut self, statements: &[SynthNode], multi_line: bool) {
        if !multi_line {
            if statements.is_empty() {
                self.out.push_str("{ }");
                return;
            }
            self.out.push_str("{ ");
            for (i, statement) in statements.iter().enumerate() {
                if i > 0 {
                    self.out.push(' ');
                }
                self.node(statement);
            }
            self.out.push_str(" }");
            return;
        }

        let new_line = self.settings.new_line_character.clone();
        let indent = self.settings.indent_string(self.settings.indent_size);
        self.out.push('{');
        for statement in statements {
            let mut inner = Writer {
                settings: self.settings,
                preferences: self.preferences,
                out: String::new(),
            };
            inner.node(statement);
            for line in inner.out.split('\n') {
                let line = line.strip_suffix('\r').unwrap_or(line);
                self.out.push_str(&new_line);
                if !line.is_empty() {
                    self.out.push_str(&indent);
                    self.out.push_str(line);
                }
            }
        }
        self.out.push_str(&new_line);
        self.out.push('}');
    }
}
