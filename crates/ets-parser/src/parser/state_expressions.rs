//! Parser state - expressions.
//!
//! Binary operators use precedence climbing: `parse_binary_expression_rest`
//! keeps consuming operators that bind tighter than the caller's precedence.

use super::base::{NodeIndex, NodeList};
use super::node::*;
use super::state::ParserState;
use super::syntax_kind_ext;
use ets_common::diagnostics::diagnostic_codes;
use ets_scanner::SyntaxKind;

/// Precedence of `as`, shared with the relational operators.
const RELATIONAL_PRECEDENCE: u8 = 11;

fn binary_operator_precedence(kind: SyntaxKind, disallow_in: bool) -> u8 {
    match kind {
        SyntaxKind::QuestionQuestionToken => 4,
        SyntaxKind::BarBarToken => 5,
        SyntaxKind::AmpersandAmpersandToken => 6,
        SyntaxKind::BarToken => 7,
        SyntaxKind::CaretToken => 8,
        SyntaxKind::AmpersandToken => 9,
        SyntaxKind::EqualsEqualsToken
        | SyntaxKind::ExclamationEqualsToken
        | SyntaxKind::EqualsEqualsEqualsToken
        | SyntaxKind::ExclamationEqualsEqualsToken => 10,
        SyntaxKind::InKeyword if disallow_in => 0,
        SyntaxKind::LessThanToken
        | SyntaxKind::GreaterThanToken
        | SyntaxKind::LessThanEqualsToken
        | SyntaxKind::GreaterThanEqualsToken
        | SyntaxKind::InstanceOfKeyword
        | SyntaxKind::InKeyword => RELATIONAL_PRECEDENCE,
        SyntaxKind::PlusToken | SyntaxKind::MinusToken => 13,
        SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => 14,
        _ => 0,
    }
}

fn is_assignment_operator(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::EqualsToken
            | SyntaxKind::PlusEqualsToken
            | SyntaxKind::MinusEqualsToken
            | SyntaxKind::AsteriskEqualsToken
            | SyntaxKind::SlashEqualsToken
    )
}

impl ParserState {
    /// Expression including the comma operator.
    pub(crate) fn parse_expression(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let mut expr = self.parse_assignment_expression();
        while self.is_token(SyntaxKind::CommaToken) {
            self.next_token();
            let right = self.parse_assignment_expression();
            expr = self.arena.add_binary_expr(
                syntax_kind_ext::BINARY_EXPRESSION,
                start_pos,
                self.last_token_end(),
                BinaryExprData {
                    left: expr,
                    operator_token: SyntaxKind::CommaToken as u16,
                    right,
                },
            );
        }
        expr
    }

    /// Expression where a bare `in` ends the expression (`for (x in y)` heads).
    pub(crate) fn parse_expression_no_in(&mut self) -> NodeIndex {
        let saved = self.disallow_in;
        self.disallow_in = true;
        let expr = self.parse_expression();
        self.disallow_in = saved;
        expr
    }

    pub(crate) fn parse_assignment_expression(&mut self) -> NodeIndex {
        if self.is_start_of_arrow_function() {
            return self.parse_arrow_function();
        }

        let start_pos = self.token_pos();
        let expr = self.parse_conditional_expression();
        if is_assignment_operator(self.token()) {
            let operator_token = self.token() as u16;
            self.next_token();
            let right = self.parse_assignment_expression();
            return self.arena.add_binary_expr(
                syntax_kind_ext::BINARY_EXPRESSION,
                start_pos,
                self.last_token_end(),
                BinaryExprData {
                    left: expr,
                    operator_token,
                    right,
                },
            );
        }
        expr
    }

    fn parse_conditional_expression(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let condition = self.parse_binary_expression(0);
        if !self.is_token(SyntaxKind::QuestionToken) {
            return condition;
        }
        self.next_token();
        let saved = self.disallow_in;
        self.disallow_in = false;
        let when_true = self.parse_assignment_expression();
        self.disallow_in = saved;
        self.parse_expected(SyntaxKind::ColonToken);
        let when_false = self.parse_assignment_expression();
        self.arena.add_conditional_expr(
            syntax_kind_ext::CONDITIONAL_EXPRESSION,
            start_pos,
            self.last_token_end(),
            ConditionalExprData {
                condition,
                when_true,
                when_false,
            },
        )
    }

    fn parse_binary_expression(&mut self, precedence: u8) -> NodeIndex {
        let start_pos = self.token_pos();
        let left = self.parse_unary_expression();
        self.parse_binary_expression_rest(precedence, left, start_pos)
    }

    fn parse_binary_expression_rest(&mut self, precedence: u8, mut left: NodeIndex, start_pos: u32) -> NodeIndex {
        loop {
            if self.is_token(SyntaxKind::AsKeyword) && !self.has_preceding_line_break() {
                if RELATIONAL_PRECEDENCE <= precedence {
                    break;
                }
                self.next_token();
                let type_node = self.parse_type();
                left = self.arena.add_type_assertion(
                    syntax_kind_ext::AS_EXPRESSION,
                    start_pos,
                    self.last_token_end(),
                    TypeAssertionData {
                        expression: left,
                        type_node,
                    },
                );
                continue;
            }

            let operator = self.token();
            let new_precedence = binary_operator_precedence(operator, self.disallow_in);
            if new_precedence == 0 || new_precedence <= precedence {
                break;
            }
            self.next_token();
            let right = self.parse_binary_expression(new_precedence);
            left = self.arena.add_binary_expr(
                syntax_kind_ext::BINARY_EXPRESSION,
                start_pos,
                self.last_token_end(),
                BinaryExprData {
                    left,
                    operator_token: operator as u16,
                    right,
                },
            );
        }
        left
    }

    fn parse_unary_expression(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        match self.token() {
            SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::TildeToken
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::DeleteKeyword => {
                let operator = self.token() as u16;
                self.next_token();
                let operand = self.parse_unary_expression();
                self.arena.add_unary_expr(
                    syntax_kind_ext::PREFIX_UNARY_EXPRESSION,
                    start_pos,
                    self.last_token_end(),
                    UnaryExprData { operator, operand },
                )
            }
            SyntaxKind::AwaitKeyword
                if self.look_ahead(|parser| {
                    parser.next_token();
                    !parser.has_preceding_line_break() && parser.is_start_of_expression()
                }) =>
            {
                self.next_token();
                let operand = self.parse_unary_expression();
                self.arena.add_unary_expr(
                    syntax_kind_ext::PREFIX_UNARY_EXPRESSION,
                    start_pos,
                    self.last_token_end(),
                    UnaryExprData {
                        operator: SyntaxKind::AwaitKeyword as u16,
                        operand,
                    },
                )
            }
            _ => self.parse_postfix_expression(),
        }
    }

    fn parse_postfix_expression(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let expression = self.parse_left_hand_side_expression();
        if matches!(self.token(), SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken)
            && !self.has_preceding_line_break()
        {
            let operator = self.token() as u16;
            self.next_token();
            return self.arena.add_unary_expr(
                syntax_kind_ext::POSTFIX_UNARY_EXPRESSION,
                start_pos,
                self.last_token_end(),
                UnaryExprData {
                    operator,
                    operand: expression,
                },
            );
        }
        expression
    }

    pub(crate) fn is_start_of_expression(&self) -> bool {
        match self.token() {
            SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::TildeToken
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken
            | SyntaxKind::OpenParenToken
            | SyntaxKind::OpenBracketToken
            | SyntaxKind::OpenBraceToken
            | SyntaxKind::NumericLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::NoSubstitutionTemplateLiteral
            | SyntaxKind::PrivateIdentifier
            | SyntaxKind::ThisKeyword
            | SyntaxKind::SuperKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::NewKeyword
            | SyntaxKind::FunctionKeyword
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::DeleteKeyword => true,
            _ => self.is_identifier(),
        }
    }

    // =========================================================================
    // Member access and calls
    // =========================================================================

    /// Member access, element access, calls and non-null assertions.
    pub(crate) fn parse_left_hand_side_expression(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let expression = if self.is_token(SyntaxKind::NewKeyword) {
            self.parse_new_expression()
        } else {
            self.parse_primary_expression()
        };
        self.parse_call_expression_rest(start_pos, expression)
    }

    fn parse_call_expression_rest(&mut self, start_pos: u32, mut expression: NodeIndex) -> NodeIndex {
        loop {
            expression = self.parse_member_expression_rest(start_pos, expression);
            if self.is_token(SyntaxKind::LessThanToken) {
                let Some(type_arguments) = self.try_parse_type_arguments_in_expression() else {
                    break;
                };
                let arguments = self.parse_argument_list();
                expression = self.arena.add_call_expr(
                    syntax_kind_ext::CALL_EXPRESSION,
                    start_pos,
                    self.last_token_end(),
                    CallExprData {
                        expression,
                        type_arguments: Some(type_arguments),
                        arguments: Some(arguments),
                    },
                );
                continue;
            }
            if self.is_token(SyntaxKind::OpenParenToken) {
                let arguments = self.parse_argument_list();
                expression = self.arena.add_call_expr(
                    syntax_kind_ext::CALL_EXPRESSION,
                    start_pos,
                    self.last_token_end(),
                    CallExprData {
                        expression,
                        type_arguments: None,
                        arguments: Some(arguments),
                    },
                );
                continue;
            }
            break;
        }
        expression
    }

    /// `.name`, `?.name`, `[index]` and postfix `!`.
    fn parse_member_expression_rest(&mut self, start_pos: u32, mut expression: NodeIndex) -> NodeIndex {
        loop {
            match self.token() {
                SyntaxKind::DotToken | SyntaxKind::QuestionDotToken => {
                    let question_dot_token = self.is_token(SyntaxKind::QuestionDotToken);
                    self.next_token();
                    if question_dot_token && self.is_token(SyntaxKind::OpenBracketToken) {
                        expression = self.parse_element_access(start_pos, expression, true);
                        continue;
                    }
                    let name = self.parse_identifier_name();
                    expression = self.arena.add_access_expr(
                        syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION,
                        start_pos,
                        self.last_token_end(),
                        AccessExprData {
                            expression,
                            name_or_argument: name,
                            question_dot_token,
                        },
                    );
                }
                SyntaxKind::OpenBracketToken => {
                    expression = self.parse_element_access(start_pos, expression, false);
                }
                SyntaxKind::ExclamationToken if !self.has_preceding_line_break() => {
                    self.next_token();
                    expression = self.arena.add_unary_expr_ex(
                        syntax_kind_ext::NON_NULL_EXPRESSION,
                        start_pos,
                        self.last_token_end(),
                        UnaryExprDataEx { expression },
                    );
                }
                _ => return expression,
            }
        }
    }

    fn parse_element_access(&mut self, start_pos: u32, expression: NodeIndex, question_dot_token: bool) -> NodeIndex {
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let argument = self.parse_expression();
        self.parse_expected(SyntaxKind::CloseBracketToken);
        self.arena.add_access_expr(
            syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION,
            start_pos,
            self.last_token_end(),
            AccessExprData {
                expression,
                name_or_argument: argument,
                question_dot_token,
            },
        )
    }

    /// `<T>` followed by `(`; rewinds and returns `None` if it is a comparison.
    fn try_parse_type_arguments_in_expression(&mut self) -> Option<NodeList> {
        let snapshot = self.save_state();
        let diagnostics_before = self.diagnostics.len();
        let type_arguments = self.parse_type_arguments_opt();
        if type_arguments.is_some()
            && self.diagnostics.len() == diagnostics_before
            && self.is_token(SyntaxKind::OpenParenToken)
        {
            return type_arguments;
        }
        self.restore_state(snapshot);
        None
    }

    /// `( arg, ...arg )`
    fn parse_argument_list(&mut self) -> NodeList {
        self.parse_expected(SyntaxKind::OpenParenToken);
        let list = self.parse_delimited_list(
            |parser| parser.is_token(SyntaxKind::CloseParenToken),
            |parser| parser.parse_argument_or_array_element(),
        );
        self.parse_expected(SyntaxKind::CloseParenToken);
        list
    }

    fn parse_argument_or_array_element(&mut self) -> NodeIndex {
        if !self.is_token(SyntaxKind::DotDotDotToken) {
            return self.parse_assignment_expression();
        }
        let start_pos = self.token_pos();
        self.next_token();
        let expression = self.parse_assignment_expression();
        self.arena.add_unary_expr_ex(
            syntax_kind_ext::SPREAD_ELEMENT,
            start_pos,
            self.last_token_end(),
            UnaryExprDataEx { expression },
        )
    }

    fn parse_new_expression(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.parse_expected(SyntaxKind::NewKeyword);
        let callee_pos = self.token_pos();
        let callee = if self.is_token(SyntaxKind::NewKeyword) {
            self.parse_new_expression()
        } else {
            self.parse_primary_expression()
        };
        let expression = self.parse_member_expression_rest(callee_pos, callee);
        let type_arguments = if self.is_token(SyntaxKind::LessThanToken) {
            self.try_parse_type_arguments_in_expression()
        } else {
            None
        };
        let arguments = self
            .is_token(SyntaxKind::OpenParenToken)
            .then(|| self.parse_argument_list());
        self.arena.add_call_expr(
            syntax_kind_ext::NEW_EXPRESSION,
            start_pos,
            self.last_token_end(),
            CallExprData {
                expression,
                type_arguments,
                arguments,
            },
        )
    }

    // =========================================================================
    // Primary expressions
    // =========================================================================

    fn parse_primary_expression(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::NumericLiteral | SyntaxKind::StringLiteral | SyntaxKind::NoSubstitutionTemplateLiteral => {
                self.parse_literal()
            }
            SyntaxKind::ThisKeyword
            | SyntaxKind::SuperKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NullKeyword => {
                let kind = self.token() as u16;
                let start_pos = self.token_pos();
                let end_pos = self.token_end();
                self.next_token();
                self.arena.add_token(kind, start_pos, end_pos)
            }
            SyntaxKind::OpenParenToken => {
                let start_pos = self.token_pos();
                self.next_token();
                let saved = self.disallow_in;
                self.disallow_in = false;
                let expression = self.parse_expression();
                self.disallow_in = saved;
                self.parse_expected(SyntaxKind::CloseParenToken);
                self.arena.add_parenthesized(
                    syntax_kind_ext::PARENTHESIZED_EXPRESSION,
                    start_pos,
                    self.last_token_end(),
                    ParenthesizedData { expression },
                )
            }
            SyntaxKind::OpenBracketToken => self.parse_array_literal(),
            SyntaxKind::OpenBraceToken => self.parse_object_literal(),
            SyntaxKind::FunctionKeyword => {
                let start_pos = self.token_pos();
                self.parse_function_expression(start_pos, None)
            }
            SyntaxKind::AsyncKeyword
                if self.look_ahead(|parser| {
                    parser.next_token();
                    parser.is_token(SyntaxKind::FunctionKeyword) && !parser.has_preceding_line_break()
                }) =>
            {
                let start_pos = self.token_pos();
                let modifiers = self.parse_modifiers();
                self.parse_function_expression(start_pos, modifiers)
            }
            SyntaxKind::PrivateIdentifier => self.parse_identifier_name(),
            _ if self.is_identifier() => self.parse_identifier(),
            _ => {
                self.parse_error_at_current_token("Expression expected.", diagnostic_codes::EXPRESSION_EXPECTED);
                self.create_missing_identifier()
            }
        }
    }

    /// String, numeric or template literal at the current token.
    pub(crate) fn parse_literal(&mut self) -> NodeIndex {
        let kind = self.token() as u16;
        let start_pos = self.token_pos();
        let end_pos = self.token_end();
        let text = self.scanner.token_value().to_string();
        self.next_token();
        self.arena.add_literal(kind, start_pos, end_pos, LiteralData { text })
    }

    fn parse_array_literal(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let elements = self.parse_delimited_list(
            |parser| parser.is_token(SyntaxKind::CloseBracketToken),
            |parser| parser.parse_argument_or_array_element(),
        );
        self.parse_expected(SyntaxKind::CloseBracketToken);
        let end_pos = self.last_token_end();
        let multi_line = self.spans_line_break(start_pos, end_pos);
        self.arena.add_literal_expr(
            syntax_kind_ext::ARRAY_LITERAL_EXPRESSION,
            start_pos,
            end_pos,
            LiteralExprData { elements, multi_line },
        )
    }

    fn parse_object_literal(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let elements = self.parse_delimited_list(
            |parser| parser.is_token(SyntaxKind::CloseBraceToken),
            |parser| parser.parse_object_literal_element(),
        );
        self.parse_expected(SyntaxKind::CloseBraceToken);
        let end_pos = self.last_token_end();
        let multi_line = self.spans_line_break(start_pos, end_pos);
        self.arena.add_literal_expr(
            syntax_kind_ext::OBJECT_LITERAL_EXPRESSION,
            start_pos,
            end_pos,
            LiteralExprData { elements, multi_line },
        )
    }

    fn parse_object_literal_element(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();

        if self.parse_optional(SyntaxKind::DotDotDotToken) {
            let expression = self.parse_assignment_expression();
            return self.arena.add_spread(
                syntax_kind_ext::SPREAD_ASSIGNMENT,
                start_pos,
                self.last_token_end(),
                SpreadData { expression },
            );
        }

        let modifiers = self.parse_modifiers();
        if matches!(self.token(), SyntaxKind::GetKeyword | SyntaxKind::SetKeyword)
            && self.look_ahead(|parser| {
                parser.next_token();
                parser.is_start_of_property_name()
            })
        {
            return self.parse_accessor(start_pos, modifiers);
        }

        let asterisk_token = self.parse_optional(SyntaxKind::AsteriskToken);
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
            let body = self.parse_block();
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

        if self.parse_optional(SyntaxKind::ColonToken) {
            let initializer = self.parse_assignment_expression();
            return self.arena.add_property_assignment(
                syntax_kind_ext::PROPERTY_ASSIGNMENT,
                start_pos,
                self.last_token_end(),
                PropertyAssignmentData { name, initializer },
            );
        }

        let object_assignment_initializer = self.parse_initializer();
        self.arena.add_shorthand_property(
            syntax_kind_ext::SHORTHAND_PROPERTY_ASSIGNMENT,
            start_pos,
            self.last_token_end(),
            ShorthandPropertyData {
                name,
                object_assignment_initializer,
            },
        )
    }

    fn parse_function_expression(&mut self, start_pos: u32, modifiers: Option<NodeList>) -> NodeIndex {
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
        let body = self.parse_block();
        let is_async = modifiers.is_some();
        self.arena.add_function(
            syntax_kind_ext::FUNCTION_EXPRESSION,
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

    // =========================================================================
    // Arrow functions
    // =========================================================================

    fn is_start_of_arrow_function(&mut self) -> bool {
        match self.token() {
            SyntaxKind::AsyncKeyword => self.look_ahead(|parser| {
                parser.next_token();
                if parser.has_preceding_line_break() {
                    return false;
                }
                parser.is_parenthesized_arrow_head() || parser.is_simple_arrow_head()
            }),
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken => {
                self.look_ahead(|parser| parser.is_parenthesized_arrow_head())
            }
            _ => self.look_ahead(|parser| parser.is_simple_arrow_head()),
        }
    }

    /// `x =>`
    fn is_simple_arrow_head(&mut self) -> bool {
        if !self.is_identifier() {
            return false;
        }
        self.next_token();
        self.is_token(SyntaxKind::EqualsGreaterThanToken) && !self.has_preceding_line_break()
    }

    /// `<T>(...) =>` or `(...): Type =>`, checked by a speculative parse.
    fn is_parenthesized_arrow_head(&mut self) -> bool {
        if !matches!(
            self.token(),
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
        ) {
            return false;
        }
        let diagnostics_before = self.diagnostics.len();
        self.parse_type_parameters_opt();
        if !self.is_token(SyntaxKind::OpenParenToken) {
            return false;
        }
        self.parse_parameter_list();
        if self.diagnostics.len() != diagnostics_before {
            return false;
        }
        if self.is_token(SyntaxKind::ColonToken) {
            self.next_token();
            self.parse_type();
            if self.diagnostics.len() != diagnostics_before {
                return false;
            }
        }
        self.is_token(SyntaxKind::EqualsGreaterThanToken) && !self.has_preceding_line_break()
    }

    fn parse_arrow_function(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let modifiers = if self.is_token(SyntaxKind::AsyncKeyword) {
            let async_end = self.token_end();
            self.next_token();
            Some(NodeList::new(
                vec![self.arena.add_token(SyntaxKind::AsyncKeyword as u16, start_pos, async_end)],
                start_pos,
                async_end,
            ))
        } else {
            None
        };
        let is_async = modifiers.is_some();

        let (type_parameters, parameters) = if self.is_identifier() {
            let param_pos = self.token_pos();
            let name = self.parse_identifier();
            let param = self.arena.add_parameter(
                syntax_kind_ext::PARAMETER,
                param_pos,
                self.last_token_end(),
                ParameterData {
                    modifiers: None,
                    dot_dot_dot_token: false,
                    name,
                    question_token: false,
                    type_annotation: NodeIndex::NONE,
                    initializer: NodeIndex::NONE,
                },
            );
            (None, NodeList::new(vec![param], param_pos, self.last_token_end()))
        } else {
            let type_parameters = self.parse_type_parameters_opt();
            (type_parameters, self.parse_parameter_list())
        };
        let type_annotation = self.parse_type_annotation();
        self.parse_expected(SyntaxKind::EqualsGreaterThanToken);
        let body = if self.is_token(SyntaxKind::OpenBraceToken) {
            self.parse_block()
        } else {
            self.parse_assignment_expression()
        };
        self.arena.add_function(
            syntax_kind_ext::ARROW_FUNCTION,
            start_pos,
            self.last_token_end(),
            FunctionData {
                modifiers,
                is_async,
                asterisk_token: false,
                name: NodeIndex::NONE,
                type_parameters,
                parameters,
                type_annotation,
                body,
                equals_greater_than_token: true,
            },
        )
    }
}
