//! Parser state - statements and top-level declarations.

use super::base::{NodeIndex, NodeList};
use super::node::*;
use super::node_flags;
use super::state::ParserState;
use super::syntax_kind_ext;
use ets_common::diagnostics::diagnostic_codes;
use ets_scanner::SyntaxKind;
use tracing::trace;

impl ParserState {
    pub(crate) fn parse_statement(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::OpenBraceToken => self.parse_block(),
            SyntaxKind::SemicolonToken => {
                let start_pos = self.token_pos();
                self.next_token();
                self.arena
                    .add_token(syntax_kind_ext::EMPTY_STATEMENT, start_pos, self.last_token_end())
            }
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::ForKeyword => self.parse_for_statement(),
            SyntaxKind::ReturnKeyword | SyntaxKind::ThrowKeyword => self.parse_return_or_throw(),
            SyntaxKind::BreakKeyword | SyntaxKind::ContinueKeyword => self.parse_break_or_continue(),
            SyntaxKind::ImportKeyword => {
                if matches!(
                    self.peek_token(),
                    SyntaxKind::OpenParenToken | SyntaxKind::DotToken
                ) {
                    self.parse_expression_statement()
                } else {
                    self.parse_declaration()
                }
            }
            _ if self.is_start_of_declaration() => self.parse_declaration(),
            _ => self.parse_expression_statement(),
        }
    }

    /// Whether the current token starts a declaration (possibly after modifiers).
    pub(crate) fn is_start_of_declaration(&mut self) -> bool {
        match self.token() {
            SyntaxKind::VarKeyword
            | SyntaxKind::LetKeyword
            | SyntaxKind::ConstKeyword
            | SyntaxKind::FunctionKeyword
            | SyntaxKind::ClassKeyword
            | SyntaxKind::EnumKeyword
            | SyntaxKind::ExportKeyword
            | SyntaxKind::AtToken => true,
            SyntaxKind::InterfaceKeyword
            | SyntaxKind::TypeKeyword
            | SyntaxKind::StructKeyword => self.look_ahead(|parser| {
                parser.next_token();
                parser.is_identifier() && !parser.has_preceding_line_break()
            }),
            SyntaxKind::NamespaceKeyword | SyntaxKind::ModuleKeyword => self.look_ahead(|parser| {
                parser.next_token();
                (parser.is_identifier() || parser.is_token(SyntaxKind::StringLiteral))
                    && !parser.has_preceding_line_break()
            }),
            SyntaxKind::DeclareKeyword | SyntaxKind::AbstractKeyword | SyntaxKind::AsyncKeyword => {
                self.look_ahead(|parser| {
                    parser.next_token();
                    !parser.has_preceding_line_break() && parser.is_start_of_declaration()
                })
            }
            _ => false,
        }
    }

    /// A modifier keyword followed by something that can carry it.
    fn next_token_can_follow_modifier(&mut self, modifier: SyntaxKind) -> bool {
        self.look_ahead(|parser| {
            parser.next_token();
            match modifier {
                SyntaxKind::ExportKeyword => true,
                SyntaxKind::ConstKeyword => parser.is_token(SyntaxKind::EnumKeyword),
                SyntaxKind::DefaultKeyword => !parser.has_preceding_line_break(),
                _ => {
                    !parser.has_preceding_line_break()
                        && (parser.is_identifier_or_keyword()
                            || matches!(
                                parser.token(),
                                SyntaxKind::OpenBracketToken
                                    | SyntaxKind::OpenBraceToken
                                    | SyntaxKind::AsteriskToken
                                    | SyntaxKind::StringLiteral
                                    | SyntaxKind::NumericLiteral
                                    | SyntaxKind::PrivateIdentifier
                                    | SyntaxKind::AtToken
                            ))
                }
            }
        })
    }

    /// Parse decorators and modifier keywords into one list.
    pub(crate) fn parse_modifiers(&mut self) -> Option<NodeList> {
        let list_pos = self.token_pos();
        let mut modifiers = Vec::new();
        loop {
            if self.is_token(SyntaxKind::AtToken) {
                modifiers.push(self.parse_decorator());
                continue;
            }
            let kind = self.token();
            if !kind.is_modifier() || !self.next_token_can_follow_modifier(kind) {
                break;
            }
            let start_pos = self.token_pos();
            let end_pos = self.token_end();
            self.next_token();
            modifiers.push(self.arena.add_token(kind as u16, start_pos, end_pos));
        }
        (!modifiers.is_empty())
            .then(|| NodeList::new(modifiers, list_pos, self.last_token_end()))
    }

    fn parse_decorator(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.parse_expected(SyntaxKind::AtToken);
        let expression = self.parse_left_hand_side_expression();
        self.arena.add_decorator(
            syntax_kind_ext::DECORATOR,
            start_pos,
            self.last_token_end(),
            DecoratorData { expression },
        )
    }

    pub(crate) fn parse_declaration(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let modifiers = self.parse_modifiers();
        let exported = modifiers
            .as_ref()
            .is_some_and(|mods| mods.iter().any(|m| self.arena.is_kind(m, SyntaxKind::ExportKeyword as u16)));
        let is_default = modifiers
            .as_ref()
            .is_some_and(|mods| mods.iter().any(|m| self.arena.is_kind(m, SyntaxKind::DefaultKeyword as u16)));

        match self.token() {
            SyntaxKind::ClassKeyword => {
                self.parse_class_like_declaration(start_pos, modifiers, syntax_kind_ext::CLASS_DECLARATION)
            }
            SyntaxKind::StructKeyword => {
                self.parse_class_like_declaration(start_pos, modifiers, syntax_kind_ext::STRUCT_DECLARATION)
            }
            SyntaxKind::InterfaceKeyword => self.parse_interface_declaration(start_pos, modifiers),
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(start_pos, modifiers),
            SyntaxKind::VarKeyword | SyntaxKind::LetKeyword | SyntaxKind::ConstKeyword => {
                self.parse_variable_statement(start_pos, modifiers)
            }
            SyntaxKind::TypeKeyword if !is_default => self.parse_type_alias_declaration(start_pos, modifiers),
            SyntaxKind::EnumKeyword => self.parse_enum_declaration(start_pos, modifiers),
            SyntaxKind::NamespaceKeyword | SyntaxKind::ModuleKeyword => {
                self.parse_module_declaration(start_pos, modifiers)
            }
            SyntaxKind::ImportKeyword => self.parse_import_declaration(start_pos, modifiers),
            SyntaxKind::OpenBraceToken | SyntaxKind::AsteriskToken if exported => {
                self.parse_export_declaration(start_pos, modifiers)
            }
            SyntaxKind::EqualsToken if exported => {
                self.next_token();
                self.parse_export_assignment(start_pos, modifiers, true)
            }
            _ if is_default => self.parse_export_assignment(start_pos, modifiers, false),
            _ => {
                self.parse_error_at_current_token(
                    "Declaration expected.",
                    diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED,
                );
                NodeIndex::NONE
            }
        }
    }

    pub(crate) fn parse_block(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let statements = self.parse_statement_list(|parser| parser.is_token(SyntaxKind::CloseBraceToken));
        self.parse_expected(SyntaxKind::CloseBraceToken);
        let end_pos = self.last_token_end();
        let multi_line = self.spans_line_break(start_pos, end_pos);
        self.arena.add_block(
            syntax_kind_ext::BLOCK,
            start_pos,
            end_pos,
            BlockData {
                statements,
                multi_line,
            },
        )
    }

    /// Whether the source text between two offsets contains a line break.
    pub(crate) fn spans_line_break(&self, start: u32, end: u32) -> bool {
        self.scanner
            .text()
            .get(start as usize..end as usize)
            .is_some_and(|text| text.contains(['\n', '\r']))
    }

    fn parse_expression_statement(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let expression = self.parse_expression();
        self.parse_semicolon();
        self.arena.add_expr_statement(
            syntax_kind_ext::EXPRESSION_STATEMENT,
            start_pos,
            self.last_token_end(),
            ExprStatementData { expression },
        )
    }

    fn parse_if_statement(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.parse_expected(SyntaxKind::IfKeyword);
        self.parse_expected(SyntaxKind::OpenParenToken);
        let expression = self.parse_expression();
        self.parse_expected(SyntaxKind::CloseParenToken);
        let then_statement = self.parse_statement();
        let else_statement = if self.parse_optional(SyntaxKind::ElseKeyword) {
            self.parse_statement()
        } else {
            NodeIndex::NONE
        };
        self.arena.add_if_statement(
            syntax_kind_ext::IF_STATEMENT,
            start_pos,
            self.last_token_end(),
            IfStatementData {
                expression,
                then_statement,
                else_statement,
            },
        )
    }

    fn parse_while_statement(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.parse_expected(SyntaxKind::WhileKeyword);
        self.parse_expected(SyntaxKind::OpenParenToken);
        let condition = self.parse_expression();
        self.parse_expected(SyntaxKind::CloseParenToken);
        let statement = self.parse_statement();
        self.arena.add_loop(
            syntax_kind_ext::WHILE_STATEMENT,
            start_pos,
            self.last_token_end(),
            LoopData {
                initializer: NodeIndex::NONE,
                condition,
                incrementor: NodeIndex::NONE,
                statement,
            },
        )
    }

    fn parse_for_statement(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.parse_expected(SyntaxKind::ForKeyword);
        self.parse_expected(SyntaxKind::OpenParenToken);

        let initializer = match self.token() {
            SyntaxKind::SemicolonToken => NodeIndex::NONE,
            SyntaxKind::VarKeyword | SyntaxKind::LetKeyword | SyntaxKind::ConstKeyword => {
                self.parse_variable_declaration_list()
            }
            _ => self.parse_expression_no_in(),
        };

        if matches!(self.token(), SyntaxKind::OfKeyword | SyntaxKind::InKeyword) {
            let kind = if self.is_token(SyntaxKind::OfKeyword) {
                syntax_kind_ext::FOR_OF_STATEMENT
            } else {
                syntax_kind_ext::FOR_IN_STATEMENT
            };
            self.next_token();
            let expression = self.parse_assignment_expression();
            self.parse_expected(SyntaxKind::CloseParenToken);
            let statement = self.parse_statement();
            return self.arena.add_for_in_of(
                kind,
                start_pos,
                self.last_token_end(),
                ForInOfData {
                    initializer,
                    expression,
                    statement,
                },
            );
        }

        self.parse_expected(SyntaxKind::SemicolonToken);
        let condition = if self.is_token(SyntaxKind::SemicolonToken) {
            NodeIndex::NONE
        } else {
            self.parse_expression()
        };
        self.parse_expected(SyntaxKind::SemicolonToken);
        let incrementor = if self.is_token(SyntaxKind::CloseParenToken) {
            NodeIndex::NONE
        } else {
            self.parse_expression()
        };
        self.parse_expected(SyntaxKind::CloseParenToken);
        let statement = self.parse_statement();
        self.arena.add_loop(
            syntax_kind_ext::FOR_STATEMENT,
            start_pos,
            self.last_token_end(),
            LoopData {
                initializer,
                condition,
                incrementor,
                statement,
            },
        )
    }

    fn parse_return_or_throw(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let kind = if self.is_token(SyntaxKind::ReturnKeyword) {
            syntax_kind_ext::RETURN_STATEMENT
        } else {
            syntax_kind_ext::THROW_STATEMENT
        };
        self.next_token();
        let expression = if self.can_parse_semicolon() {
            NodeIndex::NONE
        } else {
            self.parse_expression()
        };
        self.parse_semicolon();
        self.arena
            .add_return(kind, start_pos, self.last_token_end(), ReturnData { expression })
    }

    fn parse_break_or_continue(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let kind = if self.is_token(SyntaxKind::BreakKeyword) {
            syntax_kind_ext::BREAK_STATEMENT
        } else {
            syntax_kind_ext::CONTINUE_STATEMENT
        };
        self.next_token();
        let label = if !self.can_parse_semicolon() && self.is_identifier() {
            self.parse_identifier()
        } else {
            NodeIndex::NONE
        };
        self.parse_semicolon();
        self.arena
            .add_jump(kind, start_pos, self.last_token_end(), JumpData { label })
    }

    // =========================================================================
    // Variables and functions
    // =========================================================================

    pub(crate) fn parse_variable_statement(
        &mut self,
        start_pos: u32,
        modifiers: Option<NodeList>,
    ) -> NodeIndex {
        trace!(pos = start_pos, "parse_variable_statement");
        let list = self.parse_variable_declaration_list();
        self.parse_semicolon();
        let list_pos = self.arena.get(list).map_or(start_pos, |n| n.pos);
        let list_end = self.arena.get(list).map_or(start_pos, |n| n.end);
        self.arena.add_variable(
            syntax_kind_ext::VARIABLE_STATEMENT,
            start_pos,
            self.last_token_end(),
            VariableData {
                modifiers,
                declarations: NodeList::new(vec![list], list_pos, list_end),
            },
        )
    }

    pub(crate) fn parse_variable_declaration_list(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let flags = match self.token() {
            SyntaxKind::LetKeyword => node_flags::LET,
            SyntaxKind::ConstKeyword => node_flags::CONST,
            _ => node_flags::NONE,
        };
        self.next_token();

        let decls_pos = self.token_pos();
        let mut declarations = Vec::new();
        loop {
            declarations.push(self.parse_variable_declaration());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        let end_pos = self.last_token_end();
        let list = self.arena.add_variable(
            syntax_kind_ext::VARIABLE_DECLARATION_LIST,
            start_pos,
            end_pos,
            VariableData {
                modifiers: None,
                declarations: NodeList::new(declarations, decls_pos, end_pos),
            },
        );
        self.arena.set_flags(list, flags);
        list
    }

    fn parse_variable_declaration(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let name = self.parse_identifier();
        let exclamation_token = self.parse_optional(SyntaxKind::ExclamationToken);
        let type_annotation = self.parse_type_annotation();
        let initializer = self.parse_initializer();
        self.arena.add_variable_declaration(
            syntax_kind_ext::VARIABLE_DECLARATION,
            start_pos,
            self.last_token_end(),
            VariableDeclarationData {
                name,
                exclamation_token,
                type_annotation,
                initializer,
            },
        )
    }

    /// `: Type`, or `NodeIndex::NONE` when there is no annotation.
    pub(crate) fn parse_type_annotation(&mut self) -> NodeIndex {
        if self.parse_optional(SyntaxKind::ColonToken) {
            self.parse_type()
        } else {
            NodeIndex::NONE
        }
    }

    /// `= expr`, or `NodeIndex::NONE` when there is no initializer.
    pub(crate) fn parse_initializer(&mut self) -> NodeIndex {
        if self.parse_optional(SyntaxKind::EqualsToken) {
            self.parse_assignment_expression()
        } else {
            NodeIndex::NONE
        }
    }

    pub(crate) fn parse_function_declaration(
        &mut self,
        start_pos: u32,
        modifiers: Option<NodeList>,
    ) -> NodeIndex {
        trace!(pos = start_pos, "parse_function_declaration");
        self.parse_expected(SyntaxKind::FunctionKeyword);
        let asterisk_token = self.parse_optional(SyntaxKind::AsteriskToken);
        let name = if self.is_identifier() {
            self.parse_identifier()
        } else {
            NodeIndex::NONE
        };
        let type_parameters = self.parse_type_parameters_opt();
        let parameters = self.parse_parameter_list();
        let type_annotation = self.parse_type_annotation();
        let body = self.parse_function_body_or_semicolon();
        let is_async = modifiers.as_ref().is_some_and(|mods| {
            mods.iter()
                .any(|m| self.arena.is_kind(m, SyntaxKind::AsyncKeyword as u16))
        });
        self.arena.add_function(
            syntax_kind_ext::FUNCTION_DECLARATION,
            start_pos,
            self.last_token_end(),
            FunctionData {
                modifiers,
                is_async,
                asterisk_token,
                name,
                type_parameters,
                parameters,
                type_annotation,
                body,
                equals_greater_than_token: false,
            },
        )
    }

    /// A `{ ... }` body, or nothing for overloads and ambient declarations.
    pub(crate) fn parse_function_body_or_semicolon(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::OpenBraceToken) {
            self.parse_block()
        } else {
            self.parse_semicolon();
            NodeIndex::NONE
        }
    }

    /// `( param, ... )`
    pub(crate) fn parse_parameter_list(&mut self) -> NodeList {
        if !self.parse_expected(SyntaxKind::OpenParenToken) {
            return NodeList::empty(self.token_pos());
        }
        let list = self.parse_delimited_list(
            |parser| parser.is_token(SyntaxKind::CloseParenToken),
            |parser| parser.parse_parameter(),
        );
        self.parse_expected(SyntaxKind::CloseParenToken);
        list
    }

    fn parse_parameter(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let modifiers = self.parse_modifiers();
        let dot_dot_dot_token = self.parse_optional(SyntaxKind::DotDotDotToken);
        let name = if self.is_token(SyntaxKind::ThisKeyword) {
            self.parse_identifier_name()
        } else {
            self.parse_identifier()
        };
        let question_token = self.parse_optional(SyntaxKind::QuestionToken);
        let type_annotation = self.parse_type_annotation();
        let initializer = self.parse_initializer();
        self.arena.add_parameter(
            syntax_kind_ext::PARAMETER,
            start_pos,
            self.last_token_end(),
            ParameterData {
                modifiers,
                dot_dot_dot_token,
                name,
                question_token,
                type_annotation,
                initializer,
            },
        )
    }

    // =========================================================================
    // Types, enums, namespaces
    // =========================================================================

    fn parse_type_alias_declaration(&mut self, start_pos: u32, modifiers: Option<NodeList>) -> NodeIndex {
        self.parse_expected(SyntaxKind::TypeKeyword);
        let name = self.parse_identifier();
        let type_parameters = self.parse_type_parameters_opt();
        self.parse_expected(SyntaxKind::EqualsToken);
        let type_node = self.parse_type();
        self.parse_semicolon();
        self.arena.add_type_alias(
            syntax_kind_ext::TYPE_ALIAS_DECLARATION,
            start_pos,
            self.last_token_end(),
            TypeAliasData {
                modifiers,
                name,
                type_parameters,
                type_node,
            },
        )
    }

    fn parse_enum_declaration(&mut self, start_pos: u32, modifiers: Option<NodeList>) -> NodeIndex {
        self.parse_expected(SyntaxKind::EnumKeyword);
        let name = self.parse_identifier();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let members = self.parse_delimited_list(
            |parser| parser.is_token(SyntaxKind::CloseBraceToken),
            |parser| {
                let member_pos = parser.token_pos();
                let name = parser.parse_property_name();
                let initializer = parser.parse_initializer();
                parser.arena.add_enum_member(
                    syntax_kind_ext::ENUM_MEMBER,
                    member_pos,
                    parser.last_token_end(),
                    EnumMemberData { name, initializer },
                )
            },
        );
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.arena.add_enum(
            syntax_kind_ext::ENUM_DECLARATION,
            start_pos,
            self.last_token_end(),
            EnumData {
                modifiers,
                name,
                members,
            },
        )
    }

    fn parse_module_declaration(&mut self, start_pos: u32, modifiers: Option<NodeList>) -> NodeIndex {
        self.next_token(); // namespace | module
        let name = if self.is_token(SyntaxKind::StringLiteral) {
            self.parse_literal()
        } else {
            self.parse_identifier()
        };
        let body = if self.is_token(SyntaxKind::OpenBraceToken) {
            let body_pos = self.token_pos();
            self.next_token();
            let statements =
                self.parse_statement_list(|parser| parser.is_token(SyntaxKind::CloseBraceToken));
            self.parse_expected(SyntaxKind::CloseBraceToken);
            self.arena.add_module_block(
                syntax_kind_ext::MODULE_BLOCK,
                body_pos,
                self.last_token_end(),
                ModuleBlockData { statements },
            )
        } else {
            self.parse_semicolon();
            NodeIndex::NONE
        };
        self.arena.add_module(
            syntax_kind_ext::MODULE_DECLARATION,
            start_pos,
            self.last_token_end(),
            ModuleData {
                modifiers,
                name,
                body,
            },
        )
    }

    // =========================================================================
    // Imports and exports
    // =========================================================================

    fn parse_import_declaration(&mut self, start_pos: u32, modifiers: Option<NodeList>) -> NodeIndex {
        trace!(pos = start_pos, "parse_import_declaration");
        self.parse_expected(SyntaxKind::ImportKeyword);

        let import_clause = if self.is_token(SyntaxKind::StringLiteral) {
            NodeIndex::NONE
        } else {
            let clause = self.parse_import_clause();
            self.parse_expected(SyntaxKind::FromKeyword);
            clause
        };
        let module_specifier = if self.is_token(SyntaxKind::StringLiteral) {
            self.parse_literal()
        } else {
            self.parse_error_at_current_token(
                "String literal expected.",
                diagnostic_codes::EXPECTED,
            );
            NodeIndex::NONE
        };
        self.parse_semicolon();
        self.arena.add_import_decl(
            syntax_kind_ext::IMPORT_DECLARATION,
            start_pos,
            self.last_token_end(),
            ImportDeclData {
                modifiers,
                import_clause,
                module_specifier,
            },
        )
    }

    fn parse_import_clause(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let is_type_only = self.is_token(SyntaxKind::TypeKeyword)
            && self.look_ahead(|parser| {
                parser.next_token();
                (parser.is_identifier() && !parser.is_token(SyntaxKind::FromKeyword))
                    || matches!(
                        parser.token(),
                        SyntaxKind::OpenBraceToken | SyntaxKind::AsteriskToken
                    )
            });
        if is_type_only {
            self.next_token();
        }

        let name = if self.is_identifier() {
            self.parse_identifier()
        } else {
            NodeIndex::NONE
        };
        let named_bindings = if name.is_none() || self.parse_optional(SyntaxKind::CommaToken) {
            match self.token() {
                SyntaxKind::AsteriskToken => self.parse_namespace_import(),
                SyntaxKind::OpenBraceToken => self.parse_named_imports_or_exports(syntax_kind_ext::NAMED_IMPORTS),
                _ => {
                    self.parse_expected(SyntaxKind::OpenBraceToken);
                    NodeIndex::NONE
                }
            }
        } else {
            NodeIndex::NONE
        };
        self.arena.add_import_clause(
            syntax_kind_ext::IMPORT_CLAUSE,
            start_pos,
            self.last_token_end(),
            ImportClauseData {
                is_type_only,
                name,
                named_bindings,
            },
        )
    }

    fn parse_namespace_import(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.parse_expected(SyntaxKind::AsteriskToken);
        self.parse_expected(SyntaxKind::AsKeyword);
        let name = self.parse_identifier();
        self.arena.add_named_imports(
            syntax_kind_ext::NAMESPACE_IMPORT,
            start_pos,
            self.last_token_end(),
            NamedImportsData {
                name,
                elements: NodeList::empty(start_pos),
            },
        )
    }

    fn parse_named_imports_or_exports(&mut self, kind: u16) -> NodeIndex {
        let start_pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let specifier_kind = if kind == syntax_kind_ext::NAMED_IMPORTS {
            syntax_kind_ext::IMPORT_SPECIFIER
        } else {
            syntax_kind_ext::EXPORT_SPECIFIER
        };
        let elements = self.parse_delimited_list(
            |parser| parser.is_token(SyntaxKind::CloseBraceToken),
            |parser| parser.parse_specifier(specifier_kind),
        );
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.arena.add_named_imports(
            kind,
            start_pos,
            self.last_token_end(),
            NamedImportsData {
                name: NodeIndex::NONE,
                elements,
            },
        )
    }

    /// `name`, `name as alias`, `type name`
    fn parse_specifier(&mut self, kind: u16) -> NodeIndex {
        let start_pos = self.token_pos();
        let is_type_only = self.is_token(SyntaxKind::TypeKeyword)
            && self.look_ahead(|parser| {
                parser.next_token();
                parser.is_identifier_or_keyword() && !parser.is_token(SyntaxKind::AsKeyword)
            });
        if is_type_only {
            self.next_token();
        }
        let first = self.parse_identifier_name();
        let (property_name, name) = if self.parse_optional(SyntaxKind::AsKeyword) {
            (first, self.parse_identifier_name())
        } else {
            (NodeIndex::NONE, first)
        };
        self.arena.add_specifier(
            kind,
            start_pos,
            self.last_token_end(),
            SpecifierData {
                is_type_only,
                property_name,
                name,
            },
        )
    }

    fn parse_export_declaration(&mut self, start_pos: u32, modifiers: Option<NodeList>) -> NodeIndex {
        let export_clause = if self.parse_optional(SyntaxKind::AsteriskToken) {
            if self.parse_optional(SyntaxKind::AsKeyword) {
                let ns_pos = self.token_pos();
                let name = self.parse_identifier_name();
                self.arena.add_named_imports(
                    syntax_kind_ext::NAMESPACE_IMPORT,
                    ns_pos,
                    self.last_token_end(),
                    NamedImportsData {
                        name,
                        elements: NodeList::empty(ns_pos),
                    },
                )
            } else {
                NodeIndex::NONE
            }
        } else {
            self.parse_named_imports_or_exports(syntax_kind_ext::NAMED_EXPORTS)
        };
        let module_specifier = if self.parse_optional(SyntaxKind::FromKeyword) {
            self.parse_literal()
        } else {
            NodeIndex::NONE
        };
        self.parse_semicolon();
        // the `export` keyword is part of this node's syntax, not a modifier
        let modifiers = modifiers.and_then(|mods| {
            let rest: Vec<NodeIndex> = mods
                .iter()
                .filter(|&m| !self.arena.is_kind(m, SyntaxKind::ExportKeyword as u16))
                .collect();
            (!rest.is_empty()).then(|| NodeList::new(rest, mods.pos, mods.end))
        });
        self.arena.add_export_decl(
            syntax_kind_ext::EXPORT_DECLARATION,
            start_pos,
            self.last_token_end(),
            ExportDeclData {
                modifiers,
                is_type_only: false,
                export_clause,
                module_specifier,
            },
        )
    }

    fn parse_export_assignment(
        &mut self,
        start_pos: u32,
        modifiers: Option<NodeList>,
        is_export_equals: bool,
    ) -> NodeIndex {
        let expression = self.parse_assignment_expression();
        self.parse_semicolon();
        self.arena.add_export_assignment(
            syntax_kind_ext::EXPORT_ASSIGNMENT,
            start_pos,
            self.last_token_end(),
            ExportAssignmentData {
                modifiers,
                is_export_equals,
                expression,
            },
        )
    }
}
