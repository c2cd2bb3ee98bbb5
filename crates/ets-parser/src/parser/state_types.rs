//! Parser state - type nodes.

use super::base::{NodeIndex, NodeList};
use super::node::*;
use super::state::ParserState;
use super::syntax_kind_ext;
use ets_common::diagnostics::diagnostic_codes;
use ets_scanner::SyntaxKind;

impl ParserState {
    pub(crate) fn parse_type(&mut self) -> NodeIndex {
        if self.is_start_of_function_type() {
            return self.parse_function_type();
        }
        self.parse_union_type()
    }

    /// `(` that opens a parameter list rather than a parenthesized type, or `<T>(`.
    fn is_start_of_function_type(&mut self) -> bool {
        match self.token() {
            SyntaxKind::LessThanToken => true,
            SyntaxKind::OpenParenToken => self.look_ahead(|parser| {
                parser.next_token();
                match parser.token() {
                    SyntaxKind::CloseParenToken | SyntaxKind::DotDotDotToken => true,
                    _ if parser.is_identifier() || parser.is_token(SyntaxKind::ThisKeyword) => {
                        parser.next_token();
                        matches!(
                            parser.token(),
                            SyntaxKind::ColonToken
                                | SyntaxKind::CommaToken
                                | SyntaxKind::QuestionToken
                                | SyntaxKind::EqualsToken
                        ) || (parser.is_token(SyntaxKind::CloseParenToken) && {
                            parser.next_token();
                            parser.is_token(SyntaxKind::EqualsGreaterThanToken)
                        })
                    }
                    _ => false,
                }
            }),
            _ => false,
        }
    }

    fn parse_function_type(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let type_parameters = self.parse_type_parameters_opt();
        let parameters = self.parse_parameter_list();
        self.parse_expected(SyntaxKind::EqualsGreaterThanToken);
        let type_annotation = self.parse_type();
        self.arena.add_function_type(
            syntax_kind_ext::FUNCTION_TYPE,
            start_pos,
            self.last_token_end(),
            FunctionTypeData {
                type_parameters,
                parameters,
                type_annotation,
            },
        )
    }

    fn parse_union_type(&mut self) -> NodeIndex {
        self.parse_composite_type(SyntaxKind::BarToken, syntax_kind_ext::UNION_TYPE, |parser| {
            parser.parse_intersection_type()
        })
    }

    fn parse_intersection_type(&mut self) -> NodeIndex {
        self.parse_composite_type(
            SyntaxKind::AmpersandToken,
            syntax_kind_ext::INTERSECTION_TYPE,
            |parser| parser.parse_array_type_or_higher(),
        )
    }

    /// `A | B | C` or `A & B`, with an optional leading operator.
    fn parse_composite_type(
        &mut self,
        operator: SyntaxKind,
        kind: u16,
        mut parse_constituent: impl FnMut(&mut ParserState) -> NodeIndex,
    ) -> NodeIndex {
        let start_pos = self.token_pos();
        let has_leading_operator = self.parse_optional(operator);
        let types_pos = self.token_pos();
        let first = parse_constituent(self);
        if !self.is_token(operator) && !has_leading_operator {
            return first;
        }
        let mut types = vec![first];
        while self.parse_optional(operator) {
            types.push(parse_constituent(self));
        }
        let end_pos = self.last_token_end();
        self.arena.add_composite_type(
            kind,
            start_pos,
            end_pos,
            CompositeTypeData {
                types: NodeList::new(types, types_pos, end_pos),
            },
        )
    }

    fn parse_array_type_or_higher(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let mut type_node = self.parse_non_array_type();
        while self.is_token(SyntaxKind::OpenBracketToken) && !self.has_preceding_line_break() {
            self.next_token();
            self.parse_expected(SyntaxKind::CloseBracketToken);
            type_node = self.arena.add_array_type(
                syntax_kind_ext::ARRAY_TYPE,
                start_pos,
                self.last_token_end(),
                ArrayTypeData {
                    element_type: type_node,
                },
            );
        }
        type_node
    }

    fn parse_non_array_type(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        match self.token() {
            kind if kind.is_type_keyword() || kind == SyntaxKind::ThisKeyword => {
                if kind != SyntaxKind::ThisKeyword
                    && self.look_ahead(|parser| {
                        parser.next_token();
                        parser.is_token(SyntaxKind::DotToken)
                    })
                {
                    return self.parse_type_reference();
                }
                let end_pos = self.token_end();
                self.next_token();
                self.arena.add_token(kind as u16, start_pos, end_pos)
            }
            SyntaxKind::StringLiteral
            | SyntaxKind::NumericLiteral
            | SyntaxKind::NoSubstitutionTemplateLiteral => {
                let literal = self.parse_literal();
                self.add_literal_type(start_pos, literal)
            }
            SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword => {
                let kind = self.token() as u16;
                let end_pos = self.token_end();
                self.next_token();
                let literal = self.arena.add_token(kind, start_pos, end_pos);
                self.add_literal_type(start_pos, literal)
            }
            SyntaxKind::MinusToken
                if self.look_ahead(|parser| {
                    parser.next_token();
                    parser.is_token(SyntaxKind::NumericLiteral)
                }) =>
            {
                self.next_token();
                let operand = self.parse_literal();
                let literal = self.arena.add_unary_expr(
                    syntax_kind_ext::PREFIX_UNARY_EXPRESSION,
                    start_pos,
                    self.last_token_end(),
                    UnaryExprData {
                        operator: SyntaxKind::MinusToken as u16,
                        operand,
                    },
                );
                self.add_literal_type(start_pos, literal)
            }
            SyntaxKind::OpenBraceToken => {
                let members = self.parse_object_type_members();
                self.arena.add_type_literal(
                    syntax_kind_ext::TYPE_LITERAL,
                    start_pos,
                    self.last_token_end(),
                    TypeLiteralData { members },
                )
            }
            SyntaxKind::OpenBracketToken => {
                self.next_token();
                let types = self.parse_delimited_list(
                    |parser| parser.is_token(SyntaxKind::CloseBracketToken),
                    |parser| parser.parse_type(),
                );
                self.parse_expected(SyntaxKind::CloseBracketToken);
                self.arena.add_composite_type(
                    syntax_kind_ext::TUPLE_TYPE,
                    start_pos,
                    self.last_token_end(),
                    CompositeTypeData { types },
                )
            }
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let type_node = self.parse_type();
                self.parse_expected(SyntaxKind::CloseParenToken);
                self.arena.add_wrapped_type(
                    syntax_kind_ext::PARENTHESIZED_TYPE,
                    start_pos,
                    self.last_token_end(),
                    WrappedTypeData { type_node },
                )
            }
            _ if self.is_identifier() => self.parse_type_reference(),
            _ => {
                self.parse_error_at_current_token("Type expected.", diagnostic_codes::TYPE_EXPECTED);
                self.create_missing_identifier()
            }
        }
    }

    fn add_literal_type(&mut self, start_pos: u32, literal: NodeIndex) -> NodeIndex {
        self.arena.add_literal_type(
            syntax_kind_ext::LITERAL_TYPE,
            start_pos,
            self.last_token_end(),
            LiteralTypeData { literal },
        )
    }

    /// `Name`, `ns.Name`, `Name<T, U>`
    fn parse_type_reference(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let mut type_name = self.parse_identifier_name();
        while self.is_token(SyntaxKind::DotToken) {
            self.next_token();
            let right = self.parse_identifier_name();
            type_name = self.arena.add_qualified_name(
                syntax_kind_ext::QUALIFIED_NAME,
                start_pos,
                self.last_token_end(),
                QualifiedNameData {
                    left: type_name,
                    right,
                },
            );
        }
        let type_arguments = if self.has_preceding_line_break() {
            None
        } else {
            self.parse_type_arguments_opt()
        };
        self.arena.add_type_ref(
            syntax_kind_ext::TYPE_REFERENCE,
            start_pos,
            self.last_token_end(),
            TypeRefData {
                type_name,
                type_arguments,
            },
        )
    }

    /// `<A, B>` if present.
    pub(crate) fn parse_type_arguments_opt(&mut self) -> Option<NodeList> {
        if !self.is_token(SyntaxKind::LessThanToken) {
            return None;
        }
        self.next_token();
        let list = self.parse_delimited_list(
            |parser| parser.is_token(SyntaxKind::GreaterThanToken),
            |parser| parser.parse_type(),
        );
        self.parse_expected(SyntaxKind::GreaterThanToken);
        Some(list)
    }
}
