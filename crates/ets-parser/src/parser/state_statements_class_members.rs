//! Parser state - class, struct and interface declarations and their members.

use super::base::{NodeIndex, NodeList};
use super::node::*;
use super::state::ParserState;
use super::syntax_kind_ext;
use ets_common::diagnostics::diagnostic_codes;
use ets_scanner::SyntaxKind;
use tracing::trace;

impl ParserState {
    /// `class Name<T> extends Base implements I { members }`, also used for `struct`.
    pub(crate) fn parse_class_like_declaration(
        &mut self,
        start_pos: u32,
        modifiers: Option<NodeList>,
        kind: u16,
    ) -> NodeIndex {
        trace!(pos = start_pos, kind, "parse_class_like_declaration");
        self.next_token(); // class | struct

        let name = if self.is_identifier() && !self.is_token(SyntaxKind::ImplementsKeyword) {
            self.parse_identifier()
        } else {
            NodeIndex::NONE
        };
        let type_parameters = self.parse_type_parameters_opt();
        let heritage_clauses = self.parse_heritage_clauses();

        let members = if self.parse_expected(SyntaxKind::OpenBraceToken) {
            let members = self.parse_class_members();
            self.parse_expected(SyntaxKind::CloseBraceToken);
            members
        } else {
            NodeList::empty(self.token_pos())
        };

        self.arena.add_class(
            kind,
            start_pos,
            self.last_token_end(),
            ClassData {
                modifiers,
                name,
                type_parameters,
                heritage_clauses,
                members,
            },
        )
    }

    pub(crate) fn parse_interface_declaration(
        &mut self,
        start_pos: u32,
        modifiers: Option<NodeList>,
    ) -> NodeIndex {
        trace!(pos = start_pos, "parse_interface_declaration");
        self.parse_expected(SyntaxKind::InterfaceKeyword);
        let name = self.parse_identifier();
        let type_parameters = self.parse_type_parameters_opt();
        let heritage_clauses = self.parse_heritage_clauses();
        let members = self.parse_object_type_members();

        self.arena.add_interface(
            syntax_kind_ext::INTERFACE_DECLARATION,
            start_pos,
            self.last_token_end(),
            InterfaceData {
                modifiers,
                name,
                type_parameters,
                heritage_clauses,
                members,
            },
        )
    }

    /// Zero or more `extends A, B` / `implements C` clauses.
    fn parse_heritage_clauses(&mut self) -> Option<NodeList> {
        let list_pos = self.token_pos();
        let mut clauses = Vec::new();
        while matches!(
            self.token(),
            SyntaxKind::ExtendsKeyword | SyntaxKind::ImplementsKeyword
        ) {
            let start_pos = self.token_pos();
            let token = self.token() as u16;
            self.next_token();
            let types_pos = self.token_pos();
            let mut types = Vec::new();
            loop {
                types.push(self.parse_expression_with_type_arguments());
                if !self.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
            let end_pos = self.last_token_end();
            clauses.push(self.arena.add_heritage_clause(
                syntax_kind_ext::HERITAGE_CLAUSE,
                start_pos,
                end_pos,
                HeritageData {
                    token,
                    types: NodeList::new(types, types_pos, end_pos),
                },
            ));
        }
        (!clauses.is_empty()).then(|| NodeList::new(clauses, list_pos, self.last_token_end()))
    }

    /// `Base` or `ns.Base<T>` inside a heritage clause.
    fn parse_expression_with_type_arguments(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let mut expression = self.parse_identifier();
        while self.is_token(SyntaxKind::DotToken) {
            self.next_token();
            let name = self.parse_identifier_name();
            expression = self.arena.add_access_expr(
                syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION,
                start_pos,
                self.last_token_end(),
                AccessExprData {
                    expression,
                    name_or_argument: name,
                    question_dot_token: false,
                },
            );
        }
        let type_arguments = self.parse_type_arguments_opt();
        self.arena.add_expr_with_type_args(
            syntax_kind_ext::EXPRESSION_WITH_TYPE_ARGUMENTS,
            start_pos,
            self.last_token_end(),
            ExprWithTypeArgsData {
                expression,
                type_arguments,
            },
        )
    }

    /// `<T extends U = V, ...>` if present.
    pub(crate) fn parse_type_parameters_opt(&mut self) -> Option<NodeList> {
        if !self.is_token(SyntaxKind::LessThanToken) {
            return None;
        }
        self.next_token();
        let list = self.parse_delimited_list(
            |parser| parser.is_token(SyntaxKind::GreaterThanToken),
            |parser| {
                let start_pos = parser.token_pos();
                let name = parser.parse_identifier();
                let constraint = if parser.parse_optional(SyntaxKind::ExtendsKeyword) {
                    parser.parse_type()
                } else {
                    NodeIndex::NONE
                };
                let default = if parser.parse_optional(SyntaxKind::EqualsToken) {
                    parser.parse_type()
                } else {
                    NodeIndex::NONE
                };
                parser.arena.add_type_parameter(
                    syntax_kind_ext::TYPE_PARAMETER,
                    start_pos,
                    parser.last_token_end(),
                    TypeParameterData {
                        name,
                        constraint,
                        default,
                    },
                )
            },
        );
        self.parse_expected(SyntaxKind::GreaterThanToken);
        Some(list)
    }

    // =========================================================================
    // Class members
    // =========================================================================

    fn parse_class_members(&mut self) -> NodeList {
        let pos = self.token_pos();
        let mut members = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken) && !self.is_token(SyntaxKind::EndOfFileToken) {
            if self.parse_optional(SyntaxKind::SemicolonToken) {
                continue;
            }
            let before = self.token_pos();
            let member = self.parse_class_member();
            if member.is_some() {
                members.push(member);
            }
            if self.token_pos() == before {
                self.parse_error_at_current_token(
                    "Unexpected token. A constructor, method, accessor, or property was expected.",
                    diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED,
                );
                self.next_token();
            }
        }
        let end = if members.is_empty() { pos } else { self.last_token_end() };
        NodeList::new(members, pos, end)
    }

    fn parse_class_member(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let modifiers = self.parse_modifiers();

        if self.is_token(SyntaxKind::ConstructorKeyword)
            && self.look_ahead(|parser| {
                parser.next_token();
                parser.is_token(SyntaxKind::OpenParenToken)
            })
        {
            return self.parse_constructor(start_pos, modifiers);
        }

        if matches!(self.token(), SyntaxKind::GetKeyword | SyntaxKind::SetKeyword)
            && self.look_ahead(|parser| {
                parser.next_token();
                !parser.has_preceding_line_break() && parser.is_start_of_property_name()
            })
        {
            return self.parse_accessor(start_pos, modifiers);
        }

        if self.is_token(SyntaxKind::OpenBracketToken) && self.is_index_signature() {
            return self.parse_index_signature(start_pos, modifiers);
        }

        let asterisk_token = self.parse_optional(SyntaxKind::AsteriskToken);
        if !self.is_start_of_property_name() {
            if modifiers.is_some() {
                self.parse_error_at_current_token(
                    "Identifier expected.",
                    diagnostic_codes::IDENTIFIER_EXPECTED,
                );
            }
            return NodeIndex::NONE;
        }
        let name = self.parse_property_name();
        let question_token = self.parse_optional(SyntaxKind::QuestionToken);

        if asterisk_token
            || matches!(
                self.token(),
                SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
            )
        {
            let type_parameters = self.parse_type_parameters_opt();
            let parameters = self.parse_parameter_list();
            let type_annotation = self.parse_type_annotation();
            let body = self.parse_function_body_or_semicolon();
            return self.arena.add_method_decl(
                syntax_kind_ext::METHOD_DECLARATION,
                start_pos,
                self.last_token_end(),
                MethodDeclData {
                    modifiers,
                    asterisk_token,
                    name,
                    question_token,
                    type_parameters,
                    parameters,
                    type_annotation,
                    body,
                },
            );
        }

        let exclamation_token = self.parse_optional(SyntaxKind::ExclamationToken);
        let type_annotation = self.parse_type_annotation();
        let initializer = self.parse_initializer();
        self.parse_semicolon();
        self.arena.add_property_decl(
            syntax_kind_ext::PROPERTY_DECLARATION,
            start_pos,
            self.last_token_end(),
            PropertyDeclData {
                modifiers,
                name,
                question_token,
                exclamation_token,
                type_annotation,
                initializer,
            },
        )
    }

    fn parse_constructor(&mut self, start_pos: u32, modifiers: Option<NodeList>) -> NodeIndex {
        self.parse_expected(SyntaxKind::ConstructorKeyword);
        let type_parameters = self.parse_type_parameters_opt();
        let parameters = self.parse_parameter_list();
        let body = self.parse_function_body_or_semicolon();
        self.arena.add_constructor(
            syntax_kind_ext::CONSTRUCTOR,
            start_pos,
            self.last_token_end(),
            ConstructorData {
                modifiers,
                type_parameters,
                parameters,
                body,
            },
        )
    }

    /// `get name() {}` / `set name(v) {}`, in classes and object literals.
    pub(crate) fn parse_accessor(&mut self, start_pos: u32, modifiers: Option<NodeList>) -> NodeIndex {
        let kind = if self.is_token(SyntaxKind::GetKeyword) {
            syntax_kind_ext::GET_ACCESSOR
        } else {
            syntax_kind_ext::SET_ACCESSOR
        };
        self.next_token();
        let name = self.parse_property_name();
        let type_parameters = self.parse_type_parameters_opt();
        let parameters = self.parse_parameter_list();
        let type_annotation = self.parse_type_annotation();
        let body = self.parse_function_body_or_semicolon();
        self.arena.add_accessor(
            kind,
            start_pos,
            self.last_token_end(),
            AccessorData {
                modifiers,
                name,
                type_parameters,
                parameters,
                type_annotation,
                body,
            },
        )
    }

    /// `[key: string]: T` as opposed to a computed property name.
    fn is_index_signature(&mut self) -> bool {
        self.look_ahead(|parser| {
            parser.next_token();
            if !parser.is_identifier() {
                return false;
            }
            parser.next_token();
            parser.is_token(SyntaxKind::ColonToken)
        })
    }

    fn parse_index_signature(&mut self, start_pos: u32, modifiers: Option<NodeList>) -> NodeIndex {
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let parameters = self.parse_delimited_list(
            |parser| parser.is_token(SyntaxKind::CloseBracketToken),
            |parser| {
                let param_pos = parser.token_pos();
                let name = parser.parse_identifier();
                let type_annotation = parser.parse_type_annotation();
                parser.arena.add_parameter(
                    syntax_kind_ext::PARAMETER,
                    param_pos,
                    parser.last_token_end(),
                    ParameterData {
                        modifiers: None,
                        dot_dot_dot_token: false,
                        name,
                        question_token: false,
                        type_annotation,
                        initializer: NodeIndex::NONE,
                    },
                )
            },
        );
        self.parse_expected(SyntaxKind::CloseBracketToken);
        let type_annotation = self.parse_type_annotation();
        self.parse_type_member_separator();
        self.arena.add_index_signature(
            syntax_kind_ext::INDEX_SIGNATURE,
            start_pos,
            self.last_token_end(),
            IndexSignatureData {
                modifiers,
                parameters,
                type_annotation,
            },
        )
    }

    // =========================================================================
    // Property names
    // =========================================================================

    pub(crate) fn is_start_of_property_name(&self) -> bool {
        self.is_identifier_or_keyword()
            || matches!(
                self.token(),
                SyntaxKind::StringLiteral
                    | SyntaxKind::NumericLiteral
                    | SyntaxKind::PrivateIdentifier
                    | SyntaxKind::OpenBracketToken
            )
    }

    /// Identifier, keyword, string, number, `#private` or `[computed]`.
    pub(crate) fn parse_property_name(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral => self.parse_literal(),
            SyntaxKind::OpenBracketToken => {
                let start_pos = self.token_pos();
                self.next_token();
                let expression = self.parse_assignment_expression();
                self.parse_expected(SyntaxKind::CloseBracketToken);
                self.arena.add_computed_property(
                    syntax_kind_ext::COMPUTED_PROPERTY_NAME,
                    start_pos,
                    self.last_token_end(),
                    ComputedPropertyData { expression },
                )
            }
            _ => self.parse_identifier_name(),
        }
    }

    // =========================================================================
    // Interface and type literal members
    // =========================================================================

    /// `{ member; member, ... }` for interfaces and type literals.
    pub(crate) fn parse_object_type_members(&mut self) -> NodeList {
        if !self.parse_expected(SyntaxKind::OpenBraceToken) {
            return NodeList::empty(self.token_pos());
        }
        let pos = self.token_pos();
        let mut members = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken) && !self.is_token(SyntaxKind::EndOfFileToken) {
            let before = self.token_pos();
            let member = self.parse_type_member();
            if member.is_some() {
                members.push(member);
            }
            if self.token_pos() == before {
                self.parse_error_at_current_token(
                    "Property or signature expected.",
                    diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED,
                );
                self.next_token();
            }
        }
        let end = if members.is_empty() { pos } else { self.last_token_end() };
        self.parse_expected(SyntaxKind::CloseBraceToken);
        NodeList::new(members, pos, end)
    }

    fn parse_type_member(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let modifiers = self.parse_modifiers();

        if self.is_token(SyntaxKind::OpenBracketToken) && self.is_index_signature() {
            return self.parse_index_signature(start_pos, modifiers);
        }
        if !self.is_start_of_property_name() {
            return NodeIndex::NONE;
        }

        let name = self.parse_property_name();
        let question_token = self.parse_optional(SyntaxKind::QuestionToken);
        let (kind, type_parameters, parameters) = if matches!(
            self.token(),
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
        ) {
            let type_parameters = self.parse_type_parameters_opt();
            let parameters = self.parse_parameter_list();
            (syntax_kind_ext::METHOD_SIGNATURE, type_parameters, Some(parameters))
        } else {
            (syntax_kind_ext::PROPERTY_SIGNATURE, None, None)
        };
        let type_annotation = self.parse_type_annotation();
        self.parse_type_member_separator();

        self.arena.add_signature(
            kind,
            start_pos,
            self.last_token_end(),
            SignatureData {
                modifiers,
                name,
                question_token,
                type_parameters,
                parameters,
                type_annotation,
            },
        )
    }

    /// Members end with `;`, `,`, a line break, or the closing brace.
    fn parse_type_member_separator(&mut self) {
        if self.parse_optional(SyntaxKind::SemicolonToken) || self.parse_optional(SyntaxKind::CommaToken) {
            return;
        }
        if !self.can_parse_semicolon() {
            self.parse_expected(SyntaxKind::SemicolonToken);
        }
    }
}
