//! NodeArena access methods.
//!
//! Typed accessors check the node kind before indexing into a pool, so a
//! caller holding the wrong kind of node gets `None` instead of unrelated
//! data.

use super::base::{NodeIndex, NodeList};
use super::node::*;
use super::syntax_kind_ext::*;
use ets_scanner::SyntaxKind;

const IDENTIFIER: u16 = SyntaxKind::Identifier as u16;
const PRIVATE_IDENTIFIER: u16 = SyntaxKind::PrivateIdentifier as u16;
const STRING_LITERAL: u16 = SyntaxKind::StringLiteral as u16;
const NUMERIC_LITERAL: u16 = SyntaxKind::NumericLiteral as u16;
const TEMPLATE_LITERAL: u16 = SyntaxKind::NoSubstitutionTemplateLiteral as u16;

impl NodeArena {
    /// Get a thin node by index
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    #[inline]
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get_mut(index.0 as usize)
        }
    }

    #[inline]
    pub fn get_extended(&self, index: NodeIndex) -> Option<&ExtendedNodeInfo> {
        if index.is_none() {
            None
        } else {
            self.extended_info.get(index.0 as usize)
        }
    }

    #[inline]
    pub fn get_extended_mut(&mut self, index: NodeIndex) -> Option<&mut ExtendedNodeInfo> {
        if index.is_none() {
            None
        } else {
            self.extended_info.get_mut(index.0 as usize)
        }
    }

    /// Parent of a node, `NodeIndex::NONE` for the root or unknown nodes.
    #[inline]
    pub fn parent_of(&self, index: NodeIndex) -> NodeIndex {
        self.get_extended(index)
            .map_or(NodeIndex::NONE, |info| info.parent)
    }

    /// Start of a node's leading trivia.
    #[inline]
    pub fn full_start_of(&self, index: NodeIndex) -> u32 {
        match (self.get(index), self.get_extended(index)) {
            (Some(node), Some(info)) => info.full_start.min(node.pos),
            _ => 0,
        }
    }

    #[inline]
    pub fn kind_of(&self, index: NodeIndex) -> Option<u16> {
        self.get(index).map(|node| node.kind)
    }

    #[inline]
    pub fn is_kind(&self, index: NodeIndex, kind: u16) -> bool {
        self.kind_of(index) == Some(kind)
    }

    /// Text of the file this arena was parsed from.
    pub fn source_text(&self) -> &str {
        self.source_files.first().map_or("", |sf| &sf.text)
    }

    /// Source text covered by a node (trivia excluded).
    pub fn get_node_text(&self, index: NodeIndex) -> &str {
        let Some(node) = self.get(index) else {
            return "";
        };
        self.source_text()
            .get(node.pos as usize..node.end as usize)
            .unwrap_or("")
    }

    /// Root `SOURCE_FILE` node of this arena.
    pub fn source_file_root(&self) -> NodeIndex {
        self.nodes
            .iter()
            .rposition(|node| node.kind == SOURCE_FILE)
            .map_or(NodeIndex::NONE, |i| NodeIndex(i as u32))
    }

    pub fn get_source_file_at(&self, index: NodeIndex) -> Option<&SourceFileData> {
        self.get(index).and_then(|node| self.get_source_file(node))
    }

    /// Text of an identifier node.
    pub fn get_identifier_text(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        self.get_identifier(node)
            .map(|data| data.escaped_text.as_str())
    }

    /// Text of a property name: identifier, string literal or numeric literal.
    pub fn get_name_text(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        if let Some(ident) = self.get_identifier(node) {
            return Some(ident.escaped_text.as_str());
        }
        match node.kind {
            STRING_LITERAL | NUMERIC_LITERAL => self.get_literal(node).map(|lit| lit.text.as_str()),
            _ => None,
        }
    }

    /// The `name` child of a declaration, if the kind has one.
    pub fn get_declaration_name(&self, index: NodeIndex) -> NodeIndex {
        let Some(node) = self.get(index) else {
            return NodeIndex::NONE;
        };
        let name = match node.kind {
            CLASS_DECLARATION | STRUCT_DECLARATION => self.get_class(node).map(|d| d.name),
            INTERFACE_DECLARATION => self.get_interface(node).map(|d| d.name),
            TYPE_ALIAS_DECLARATION => self.get_type_alias(node).map(|d| d.name),
            ENUM_DECLARATION => self.get_enum(node).map(|d| d.name),
            ENUM_MEMBER => self.get_enum_member(node).map(|d| d.name),
            MODULE_DECLARATION => self.get_module(node).map(|d| d.name),
            FUNCTION_DECLARATION | FUNCTION_EXPRESSION => self.get_function(node).map(|d| d.name),
            PROPERTY_SIGNATURE | METHOD_SIGNATURE => self.get_signature(node).map(|d| d.name),
            PROPERTY_DECLARATION => self.get_property_decl(node).map(|d| d.name),
            METHOD_DECLARATION => self.get_method_decl(node).map(|d| d.name),
            GET_ACCESSOR | SET_ACCESSOR => self.get_accessor(node).map(|d| d.name),
            PARAMETER => self.get_parameter(node).map(|d| d.name),
            TYPE_PARAMETER => self.get_type_parameter(node).map(|d| d.name),
            VARIABLE_DECLARATION => self.get_variable_declaration(node).map(|d| d.name),
            PROPERTY_ASSIGNMENT => self.get_property_assignment(node).map(|d| d.name),
            SHORTHAND_PROPERTY_ASSIGNMENT => self.get_shorthand_property(node).map(|d| d.name),
            IMPORT_SPECIFIER | EXPORT_SPECIFIER => self.get_specifier(node).map(|d| d.name),
            IMPORT_CLAUSE => self.get_import_clause(node).map(|d| d.name),
            NAMESPACE_IMPORT => self.get_named_imports(node).map(|d| d.name),
            _ => None,
        };
        name.unwrap_or(NodeIndex::NONE)
    }

    /// Name text of a declaration (`class Foo` -> `Foo`).
    pub fn get_declaration_name_text(&self, index: NodeIndex) -> Option<&str> {
        self.get_name_text(self.get_declaration_name(index))
    }

    /// Modifier list of a declaration.
    pub fn get_modifiers(&self, index: NodeIndex) -> Option<&NodeList> {
        let node = self.get(index)?;
        let modifiers = match node.kind {
            CLASS_DECLARATION | STRUCT_DECLARATION => &self.get_class(node)?.modifiers,
            INTERFACE_DECLARATION => &self.get_interface(node)?.modifiers,
            TYPE_ALIAS_DECLARATION => &self.get_type_alias(node)?.modifiers,
            ENUM_DECLARATION => &self.get_enum(node)?.modifiers,
            MODULE_DECLARATION => &self.get_module(node)?.modifiers,
            FUNCTION_DECLARATION | FUNCTION_EXPRESSION | ARROW_FUNCTION => {
                &self.get_function(node)?.modifiers
            }
            PROPERTY_SIGNATURE | METHOD_SIGNATURE => &self.get_signature(node)?.modifiers,
            INDEX_SIGNATURE => &self.get_index_signature(node)?.modifiers,
            PROPERTY_DECLARATION => &self.get_property_decl(node)?.modifiers,
            METHOD_DECLARATION => &self.get_method_decl(node)?.modifiers,
            CONSTRUCTOR => &self.get_constructor(node)?.modifiers,
            GET_ACCESSOR | SET_ACCESSOR => &self.get_accessor(node)?.modifiers,
            PARAMETER => &self.get_parameter(node)?.modifiers,
            VARIABLE_STATEMENT => &self.get_variable(node)?.modifiers,
            IMPORT_DECLARATION => &self.get_import_decl(node)?.modifiers,
            EXPORT_DECLARATION => &self.get_export_decl(node)?.modifiers,
            EXPORT_ASSIGNMENT => &self.get_export_assignment(node)?.modifiers,
            _ => return None,
        };
        modifiers.as_ref()
    }

    /// The modifier token of `kind` on a declaration, if present.
    pub fn find_modifier(&self, index: NodeIndex, kind: SyntaxKind) -> NodeIndex {
        self.get_modifiers(index)
            .and_then(|mods| mods.iter().find(|&m| self.is_kind(m, kind as u16)))
            .unwrap_or(NodeIndex::NONE)
    }

    pub fn has_modifier(&self, index: NodeIndex, kind: SyntaxKind) -> bool {
        self.find_modifier(index, kind).is_some()
    }

    /// Members of a class, struct, interface, type literal or object literal.
    pub fn get_members(&self, index: NodeIndex) -> Option<&NodeList> {
        let node = self.get(index)?;
        match node.kind {
            CLASS_DECLARATION | STRUCT_DECLARATION => Some(&self.get_class(node)?.members),
            INTERFACE_DECLARATION => Some(&self.get_interface(node)?.members),
            TYPE_LITERAL => Some(&self.get_type_literal(node)?.members),
            OBJECT_LITERAL_EXPRESSION => Some(&self.get_literal_expr(node)?.elements),
            ENUM_DECLARATION => Some(&self.get_enum(node)?.members),
            _ => None,
        }
    }

    /// Heritage clauses of a class, struct or interface.
    pub fn get_heritage_clauses(&self, index: NodeIndex) -> Option<&NodeList> {
        let node = self.get(index)?;
        match node.kind {
            CLASS_DECLARATION | STRUCT_DECLARATION => self.get_class(node)?.heritage_clauses.as_ref(),
            INTERFACE_DECLARATION => self.get_interface(node)?.heritage_clauses.as_ref(),
            _ => None,
        }
    }

    /// Ancestors of a node, nearest first.
    pub fn ancestors(&self, index: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        std::iter::successors(Some(self.parent_of(index)), move |&current| {
            Some(self.parent_of(current))
        })
        .take_while(|idx| idx.is_some())
    }

    /// Nearest ancestor (or the node itself) whose kind matches.
    pub fn find_ancestor(&self, index: NodeIndex, pred: impl Fn(u16) -> bool) -> NodeIndex {
        std::iter::once(index)
            .chain(self.ancestors(index))
            .find(|&idx| self.kind_of(idx).is_some_and(&pred))
            .unwrap_or(NodeIndex::NONE)
    }

    /// Direct children in source order.
    pub fn get_children(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut out = Vec::new();
        let Some(node) = self.get(index) else {
            return out;
        };
        self.collect_children(node, &mut out);
        out.retain(|idx| idx.is_some());
        out
    }

    fn collect_children(&self, node: &Node, out: &mut Vec<NodeIndex>) {
        fn list(out: &mut Vec<NodeIndex>, list: &NodeList) {
            out.extend(list.iter());
        }
        fn opt_list(out: &mut Vec<NodeIndex>, l: &Option<NodeList>) {
            if let Some(l) = l {
                list(out, l);
            }
        }

        match node.kind {
            QUALIFIED_NAME => {
                if let Some(d) = self.get_qualified_name(node) {
                    out.extend([d.left, d.right]);
                }
            }
            COMPUTED_PROPERTY_NAME => {
                if let Some(d) = self.get_computed_property(node) {
                    out.push(d.expression);
                }
            }
            TYPE_PARAMETER => {
                if let Some(d) = self.get_type_parameter(node) {
                    out.extend([d.name, d.constraint, d.default]);
                }
            }
            PARAMETER => {
                if let Some(d) = self.get_parameter(node) {
                    opt_list(out, &d.modifiers);
                    out.extend([d.name, d.type_annotation, d.initializer]);
                }
            }
            DECORATOR => {
                if let Some(d) = self.get_decorator(node) {
                    out.push(d.expression);
                }
            }
            PROPERTY_SIGNATURE | METHOD_SIGNATURE => {
                if let Some(d) = self.get_signature(node) {
                    opt_list(out, &d.modifiers);
                    out.push(d.name);
                    opt_list(out, &d.type_parameters);
                    opt_list(out, &d.parameters);
                    out.push(d.type_annotation);
                }
            }
            INDEX_SIGNATURE => {
                if let Some(d) = self.get_index_signature(node) {
                    opt_list(out, &d.modifiers);
                    list(out, &d.parameters);
                    out.push(d.type_annotation);
                }
            }
            PROPERTY_DECLARATION => {
                if let Some(d) = self.get_property_decl(node) {
                    opt_list(out, &d.modifiers);
                    out.extend([d.name, d.type_annotation, d.initializer]);
                }
            }
            METHOD_DECLARATION => {
                if let Some(d) = self.get_method_decl(node) {
                    opt_list(out, &d.modifiers);
                    out.push(d.name);
                    opt_list(out, &d.type_parameters);
                    list(out, &d.parameters);
                    out.extend([d.type_annotation, d.body]);
                }
            }
            CONSTRUCTOR => {
                if let Some(d) = self.get_constructor(node) {
                    opt_list(out, &d.modifiers);
                    opt_list(out, &d.type_parameters);
                    list(out, &d.parameters);
                    out.push(d.body);
                }
            }
            GET_ACCESSOR | SET_ACCESSOR => {
                if let Some(d) = self.get_accessor(node) {
                    opt_list(out, &d.modifiers);
                    out.push(d.name);
                    opt_list(out, &d.type_parameters);
                    list(out, &d.parameters);
                    out.extend([d.type_annotation, d.body]);
                }
            }
            TYPE_REFERENCE => {
                if let Some(d) = self.get_type_ref(node) {
                    out.push(d.type_name);
                    opt_list(out, &d.type_arguments);
                }
            }
            FUNCTION_TYPE => {
                if let Some(d) = self.get_function_type(node) {
                    opt_list(out, &d.type_parameters);
                    list(out, &d.parameters);
                    out.push(d.type_annotation);
                }
            }
            TYPE_LITERAL => {
                if let Some(d) = self.get_type_literal(node) {
                    list(out, &d.members);
                }
            }
            ARRAY_TYPE => {
                if let Some(d) = self.get_array_type(node) {
                    out.push(d.element_type);
                }
            }
            TUPLE_TYPE | UNION_TYPE | INTERSECTION_TYPE => {
                if let Some(d) = self.get_composite_type(node) {
                    list(out, &d.types);
                }
            }
            PARENTHESIZED_TYPE => {
                if let Some(d) = self.get_wrapped_type(node) {
                    out.push(d.type_node);
                }
            }
            LITERAL_TYPE => {
                if let Some(d) = self.get_literal_type(node) {
                    out.push(d.literal);
                }
            }
            ARRAY_LITERAL_EXPRESSION | OBJECT_LITERAL_EXPRESSION => {
                if let Some(d) = self.get_literal_expr(node) {
                    list(out, &d.elements);
                }
            }
            PROPERTY_ACCESS_EXPRESSION | ELEMENT_ACCESS_EXPRESSION => {
                if let Some(d) = self.get_access_expr(node) {
                    out.extend([d.expression, d.name_or_argument]);
                }
            }
            CALL_EXPRESSION | NEW_EXPRESSION => {
                if let Some(d) = self.get_call_expr(node) {
                    out.push(d.expression);
                    opt_list(out, &d.type_arguments);
                    opt_list(out, &d.arguments);
                }
            }
            PARENTHESIZED_EXPRESSION => {
                if let Some(d) = self.get_parenthesized(node) {
                    out.push(d.expression);
                }
            }
            FUNCTION_EXPRESSION | ARROW_FUNCTION | FUNCTION_DECLARATION => {
                if let Some(d) = self.get_function(node) {
                    opt_list(out, &d.modifiers);
                    out.push(d.name);
                    opt_list(out, &d.type_parameters);
                    list(out, &d.parameters);
                    out.extend([d.type_annotation, d.body]);
                }
            }
            PREFIX_UNARY_EXPRESSION | POSTFIX_UNARY_EXPRESSION => {
                if let Some(d) = self.get_unary_expr(node) {
                    out.push(d.operand);
                }
            }
            BINARY_EXPRESSION => {
                if let Some(d) = self.get_binary_expr(node) {
                    out.extend([d.left, d.right]);
                }
            }
            CONDITIONAL_EXPRESSION => {
                if let Some(d) = self.get_conditional_expr(node) {
                    out.extend([d.condition, d.when_true, d.when_false]);
                }
            }
            SPREAD_ELEMENT | NON_NULL_EXPRESSION => {
                if let Some(d) = self.get_unary_expr_ex(node) {
                    out.push(d.expression);
                }
            }
            AS_EXPRESSION => {
                if let Some(d) = self.get_type_assertion(node) {
                    out.extend([d.expression, d.type_node]);
                }
            }
            EXPRESSION_WITH_TYPE_ARGUMENTS => {
                if let Some(d) = self.get_expr_type_args(node) {
                    out.push(d.expression);
                    opt_list(out, &d.type_arguments);
                }
            }
            BLOCK => {
                if let Some(d) = self.get_block(node) {
                    list(out, &d.statements);
                }
            }
            VARIABLE_STATEMENT | VARIABLE_DECLARATION_LIST => {
                if let Some(d) = self.get_variable(node) {
                    opt_list(out, &d.modifiers);
                    list(out, &d.declarations);
                }
            }
            EXPRESSION_STATEMENT => {
                if let Some(d) = self.get_expr_statement(node) {
                    out.push(d.expression);
                }
            }
            IF_STATEMENT => {
                if let Some(d) = self.get_if_statement(node) {
                    out.extend([d.expression, d.then_statement, d.else_statement]);
                }
            }
            WHILE_STATEMENT | FOR_STATEMENT => {
                if let Some(d) = self.get_loop(node) {
                    out.extend([d.initializer, d.condition, d.incrementor, d.statement]);
                }
            }
            FOR_IN_STATEMENT | FOR_OF_STATEMENT => {
                if let Some(d) = self.get_for_in_of(node) {
                    out.extend([d.initializer, d.expression, d.statement]);
                }
            }
            CONTINUE_STATEMENT | BREAK_STATEMENT => {
                if let Some(d) = self.get_jump(node) {
                    out.push(d.label);
                }
            }
            RETURN_STATEMENT | THROW_STATEMENT => {
                if let Some(d) = self.get_return(node) {
                    out.push(d.expression);
                }
            }
            VARIABLE_DECLARATION => {
                if let Some(d) = self.get_variable_declaration(node) {
                    out.extend([d.name, d.type_annotation, d.initializer]);
                }
            }
            CLASS_DECLARATION | STRUCT_DECLARATION => {
                if let Some(d) = self.get_class(node) {
                    opt_list(out, &d.modifiers);
                    out.push(d.name);
                    opt_list(out, &d.type_parameters);
                    opt_list(out, &d.heritage_clauses);
                    list(out, &d.members);
                }
            }
            INTERFACE_DECLARATION => {
                if let Some(d) = self.get_interface(node) {
                    opt_list(out, &d.modifiers);
                    out.push(d.name);
                    opt_list(out, &d.type_parameters);
                    opt_list(out, &d.heritage_clauses);
                    list(out, &d.members);
                }
            }
            TYPE_ALIAS_DECLARATION => {
                if let Some(d) = self.get_type_alias(node) {
                    opt_list(out, &d.modifiers);
                    out.push(d.name);
                    opt_list(out, &d.type_parameters);
                    out.push(d.type_node);
                }
            }
            ENUM_DECLARATION => {
                if let Some(d) = self.get_enum(node) {
                    opt_list(out, &d.modifiers);
                    out.push(d.name);
                    list(out, &d.members);
                }
            }
            ENUM_MEMBER => {
                if let Some(d) = self.get_enum_member(node) {
                    out.extend([d.name, d.initializer]);
                }
            }
            MODULE_DECLARATION => {
                if let Some(d) = self.get_module(node) {
                    opt_list(out, &d.modifiers);
                    out.extend([d.name, d.body]);
                }
            }
            MODULE_BLOCK => {
                if let Some(d) = self.get_module_block(node) {
                    list(out, &d.statements);
                }
            }
            IMPORT_DECLARATION => {
                if let Some(d) = self.get_import_decl(node) {
                    opt_list(out, &d.modifiers);
                    out.extend([d.import_clause, d.module_specifier]);
                }
            }
            IMPORT_CLAUSE => {
                if let Some(d) = self.get_import_clause(node) {
                    out.extend([d.name, d.named_bindings]);
                }
            }
            NAMESPACE_IMPORT | NAMED_IMPORTS | NAMED_EXPORTS => {
                if let Some(d) = self.get_named_imports(node) {
                    out.push(d.name);
                    list(out, &d.elements);
                }
            }
            IMPORT_SPECIFIER | EXPORT_SPECIFIER => {
                if let Some(d) = self.get_specifier(node) {
                    out.extend([d.property_name, d.name]);
                }
            }
            EXPORT_DECLARATION => {
                if let Some(d) = self.get_export_decl(node) {
                    opt_list(out, &d.modifiers);
                    out.extend([d.export_clause, d.module_specifier]);
                }
            }
            EXPORT_ASSIGNMENT => {
                if let Some(d) = self.get_export_assignment(node) {
                    opt_list(out, &d.modifiers);
                    out.push(d.expression);
                }
            }
            HERITAGE_CLAUSE => {
                if let Some(d) = self.get_heritage_clause(node) {
                    list(out, &d.types);
                }
            }
            PROPERTY_ASSIGNMENT => {
                if let Some(d) = self.get_property_assignment(node) {
                    out.extend([d.name, d.initializer]);
                }
            }
            SHORTHAND_PROPERTY_ASSIGNMENT => {
                if let Some(d) = self.get_shorthand_property(node) {
                    out.extend([d.name, d.object_assignment_initializer]);
                }
            }
            SPREAD_ASSIGNMENT => {
                if let Some(d) = self.get_spread(node) {
                    out.push(d.expression);
                }
            }
            SOURCE_FILE => {
                if let Some(d) = self.get_source_file(node) {
                    list(out, &d.statements);
                    out.push(d.end_of_file_token);
                }
            }
            _ => {}
        }
    }
}

macro_rules! data_getters {
    ($($(#[$meta:meta])* $fn_name:ident => $pool:ident : $data:ty [$($kind:expr),+ $(,)?];)+) => {
        impl NodeArena {
            $(
                $(#[$meta])*
                #[inline]
                pub fn $fn_name(&self, node: &Node) -> Option<&$data> {
                    if node.has_data() && ($(node.kind == $kind)||+) {
                        self.$pool.get(node.data_index as usize)
                    } else {
                        None
                    }
                }
            )+
        }
    };
}

data_getters! {
    get_identifier => identifiers: IdentifierData [IDENTIFIER, PRIVATE_IDENTIFIER];
    get_literal => literals: LiteralData [STRING_LITERAL, NUMERIC_LITERAL, TEMPLATE_LITERAL];
    get_qualified_name => qualified_names: QualifiedNameData [QUALIFIED_NAME];
    get_computed_property => computed_properties: ComputedPropertyData [COMPUTED_PROPERTY_NAME];
    get_binary_expr => binary_exprs: BinaryExprData [BINARY_EXPRESSION];
    get_unary_expr => unary_exprs: UnaryExprData [PREFIX_UNARY_EXPRESSION, POSTFIX_UNARY_EXPRESSION];
    get_unary_expr_ex => unary_exprs_ex: UnaryExprDataEx [SPREAD_ELEMENT, NON_NULL_EXPRESSION];
    get_call_expr => call_exprs: CallExprData [CALL_EXPRESSION, NEW_EXPRESSION];
    get_access_expr => access_exprs: AccessExprData [PROPERTY_ACCESS_EXPRESSION, ELEMENT_ACCESS_EXPRESSION];
    get_conditional_expr => conditional_exprs: ConditionalExprData [CONDITIONAL_EXPRESSION];
    /// Array or object literal
    get_literal_expr => literal_exprs: LiteralExprData [ARRAY_LITERAL_EXPRESSION, OBJECT_LITERAL_EXPRESSION];
    get_parenthesized => parenthesized: ParenthesizedData [PARENTHESIZED_EXPRESSION];
    get_type_assertion => type_assertions: TypeAssertionData [AS_EXPRESSION];
    get_function => functions: FunctionData [FUNCTION_DECLARATION, FUNCTION_EXPRESSION, ARROW_FUNCTION];
    /// Class or struct declaration
    get_class => classes: ClassData [CLASS_DECLARATION, STRUCT_DECLARATION];
    get_interface => interfaces: InterfaceData [INTERFACE_DECLARATION];
    get_type_alias => type_aliases: TypeAliasData [TYPE_ALIAS_DECLARATION];
    get_enum => enums: EnumData [ENUM_DECLARATION];
    get_enum_member => enum_members: EnumMemberData [ENUM_MEMBER];
    get_module => modules: ModuleData [MODULE_DECLARATION];
    get_module_block => module_blocks: ModuleBlockData [MODULE_BLOCK];
    /// Property or method signature
    get_signature => signatures: SignatureData [PROPERTY_SIGNATURE, METHOD_SIGNATURE];
    get_index_signature => index_signatures: IndexSignatureData [INDEX_SIGNATURE];
    get_property_decl => property_decls: PropertyDeclData [PROPERTY_DECLARATION];
    get_method_decl => method_decls: MethodDeclData [METHOD_DECLARATION];
    get_constructor => constructors: ConstructorData [CONSTRUCTOR];
    get_accessor => accessors: AccessorData [GET_ACCESSOR, SET_ACCESSOR];
    get_parameter => parameters: ParameterData [PARAMETER];
    get_type_parameter => type_parameters: TypeParameterData [TYPE_PARAMETER];
    get_decorator => decorators: DecoratorData [DECORATOR];
    get_heritage_clause => heritage_clauses: HeritageData [HERITAGE_CLAUSE];
    get_expr_type_args => expr_with_type_args: ExprWithTypeArgsData [EXPRESSION_WITH_TYPE_ARGUMENTS];
    get_if_statement => if_statements: IfStatementData [IF_STATEMENT];
    get_loop => loops: LoopData [WHILE_STATEMENT, FOR_STATEMENT];
    get_for_in_of => for_in_of: ForInOfData [FOR_IN_STATEMENT, FOR_OF_STATEMENT];
    get_block => blocks: BlockData [BLOCK];
    /// Variable statement or declaration list
    get_variable => variables: VariableData [VARIABLE_STATEMENT, VARIABLE_DECLARATION_LIST];
    get_variable_declaration => variable_declarations: VariableDeclarationData [VARIABLE_DECLARATION];
    /// Return or throw statement
    get_return => return_data: ReturnData [RETURN_STATEMENT, THROW_STATEMENT];
    get_expr_statement => expr_statements: ExprStatementData [EXPRESSION_STATEMENT];
    get_jump => jump_data: JumpData [BREAK_STATEMENT, CONTINUE_STATEMENT];
    get_type_ref => type_refs: TypeRefData [TYPE_REFERENCE];
    get_composite_type => composite_types: CompositeTypeData [UNION_TYPE, INTERSECTION_TYPE, TUPLE_TYPE];
    get_function_type => function_types: FunctionTypeData [FUNCTION_TYPE];
    get_type_literal => type_literals: TypeLiteralData [TYPE_LITERAL];
    get_array_type => array_types: ArrayTypeData [ARRAY_TYPE];
    get_wrapped_type => wrapped_types: WrappedTypeData [PARENTHESIZED_TYPE];
    get_literal_type => literal_types: LiteralTypeData [LITERAL_TYPE];
    get_import_decl => import_decls: ImportDeclData [IMPORT_DECLARATION];
    get_import_clause => import_clauses: ImportClauseData [IMPORT_CLAUSE];
    /// Namespace import, named imports or named exports
    get_named_imports => named_imports: NamedImportsData [NAMESPACE_IMPORT, NAMED_IMPORTS, NAMED_EXPORTS];
    /// Import or export specifier
    get_specifier => specifiers: SpecifierData [IMPORT_SPECIFIER, EXPORT_SPECIFIER];
    get_export_decl => export_decls: ExportDeclData [EXPORT_DECLARATION];
    get_export_assignment => export_assignments: ExportAssignmentData [EXPORT_ASSIGNMENT];
    get_property_assignment => property_assignments: PropertyAssignmentData [PROPERTY_ASSIGNMENT];
    get_shorthand_property => shorthand_properties: ShorthandPropertyData [SHORTHAND_PROPERTY_ASSIGNMENT];
    get_spread => spread_data: SpreadData [SPREAD_ASSIGNMENT];
    get_source_file => source_files: SourceFileData [SOURCE_FILE];
}
