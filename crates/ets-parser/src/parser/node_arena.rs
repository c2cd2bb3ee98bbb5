//! NodeArena creation methods (add_* methods).

use super::base::NodeIndex;
use super::node::*;

impl NodeArena {
    /// Maximum pre-allocation to avoid capacity overflow in huge files.
    const MAX_NODE_PREALLOC: usize = 5_000_000;

    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    /// Create an arena sized for roughly `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> NodeArena {
        let safe_capacity = capacity.min(Self::MAX_NODE_PREALLOC);
        let mut arena = NodeArena::default();
        arena.nodes = Vec::with_capacity(safe_capacity);
        arena.extended_info = Vec::with_capacity(safe_capacity);
        arena.identifiers = Vec::with_capacity(safe_capacity / 4); // ~25% identifiers
        arena.literals = Vec::with_capacity(safe_capacity / 8);
        arena.source_files = Vec::with_capacity(1);
        arena
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    fn push_node(&mut self, node: Node) -> NodeIndex {
        let index = self.nodes.len() as u32;
        self.nodes.push(node);
        self.extended_info.push(ExtendedNodeInfo::default());
        NodeIndex(index)
    }

    /// Point every child of `parent` back at it.
    fn link_children(&mut self, parent: NodeIndex) {
        for child in self.get_children(parent) {
            if let Some(info) = self.get_extended_mut(child) {
                info.parent = parent;
            }
        }
    }

    /// Add a token node (keyword, modifier) with no data.
    pub fn add_token(&mut self, kind: u16, pos: u32, end: u32) -> NodeIndex {
        self.push_node(Node::new(kind, pos, end))
    }

    /// Set flags on an existing node.
    pub fn set_flags(&mut self, index: NodeIndex, flags: u16) {
        if let Some(node) = self.get_mut(index) {
            node.flags |= flags;
        }
    }

    /// Fill in `full_start` for every node from the sorted list of token ends
    /// the scanner produced. A node's trivia starts where the last token
    /// before it ends.
    pub fn set_full_starts(&mut self, token_ends: &[u32]) {
        for (node, info) in self.nodes.iter().zip(self.extended_info.iter_mut()) {
            let preceding = token_ends.partition_point(|&end| end <= node.pos);
            info.full_start = if preceding == 0 {
                0
            } else {
                token_ends[preceding - 1]
            };
        }
    }
}

macro_rules! add_methods {
    ($($(#[$meta:meta])* $fn_name:ident => $pool:ident : $data:ty;)+) => {
        impl NodeArena {
            $(
                $(#[$meta])*
                pub fn $fn_name(&mut self, kind: u16, pos: u32, end: u32, data: $data) -> NodeIndex {
                    let data_index = self.$pool.len() as u32;
                    self.$pool.push(data);
                    let index = self.push_node(Node::with_data(kind, pos, end, data_index));
                    self.link_children(index);
                    index
                }
            )+
        }
    };
}

add_methods! {
    /// Identifier or private identifier
    add_identifier => identifiers: IdentifierData;
    /// String, numeric or template literal
    add_literal => literals: LiteralData;
    add_qualified_name => qualified_names: QualifiedNameData;
    add_computed_property => computed_properties: ComputedPropertyData;
    add_binary_expr => binary_exprs: BinaryExprData;
    /// Prefix or postfix unary expression
    add_unary_expr => unary_exprs: UnaryExprData;
    /// Non-null or spread element
    add_unary_expr_ex => unary_exprs_ex: UnaryExprDataEx;
    /// Call or new expression
    add_call_expr => call_exprs: CallExprData;
    add_access_expr => access_exprs: AccessExprData;
    add_conditional_expr => conditional_exprs: ConditionalExprData;
    /// Array or object literal
    add_literal_expr => literal_exprs: LiteralExprData;
    add_parenthesized => parenthesized: ParenthesizedData;
    add_type_assertion => type_assertions: TypeAssertionData;
    add_function => functions: FunctionData;
    /// Class or struct declaration
    add_class => classes: ClassData;
    add_interface => interfaces: InterfaceData;
    add_type_alias => type_aliases: TypeAliasData;
    add_enum => enums: EnumData;
    add_enum_member => enum_members: EnumMemberData;
    add_module => modules: ModuleData;
    add_module_block => module_blocks: ModuleBlockData;
    /// Property or method signature
    add_signature => signatures: SignatureData;
    add_index_signature => index_signatures: IndexSignatureData;
    add_property_decl => property_decls: PropertyDeclData;
    add_method_decl => method_decls: MethodDeclData;
    add_constructor => constructors: ConstructorData;
    add_accessor => accessors: AccessorData;
    add_parameter => parameters: ParameterData;
    add_type_parameter => type_parameters: TypeParameterData;
    add_decorator => decorators: DecoratorData;
    add_heritage_clause => heritage_clauses: HeritageData;
    add_expr_with_type_args => expr_with_type_args: ExprWithTypeArgsData;
    add_if_statement => if_statements: IfStatementData;
    add_loop => loops: LoopData;
    add_for_in_of => for_in_of: ForInOfData;
    add_block => blocks: BlockData;
    /// Variable statement or declaration list
    add_variable => variables: VariableData;
    add_variable_declaration => variable_declarations: VariableDeclarationData;
    /// Return or throw statement
    add_return => return_data: ReturnData;
    add_expr_statement => expr_statements: ExprStatementData;
    add_jump => jump_data: JumpData;
    add_type_ref => type_refs: TypeRefData;
    add_composite_type => composite_types: CompositeTypeData;
    add_function_type => function_types: FunctionTypeData;
    add_type_literal => type_literals: TypeLiteralData;
    add_array_type => array_types: ArrayTypeData;
    add_wrapped_type => wrapped_types: WrappedTypeData;
    add_literal_type => literal_types: LiteralTypeData;
    add_import_decl => import_decls: ImportDeclData;
    add_import_clause => import_clauses: ImportClauseData;
    /// Namespace import, named imports or named exports
    add_named_imports => named_imports: NamedImportsData;
    /// Import or export specifier
    add_specifier => specifiers: SpecifierData;
    add_export_decl => export_decls: ExportDeclData;
    add_export_assignment => export_assignments: ExportAssignmentData;
    add_property_assignment => property_assignments: PropertyAssignmentData;
    add_shorthand_property => shorthand_properties: ShorthandPropertyData;
    add_spread => spread_data: SpreadData;
    add_source_file => source_files: SourceFileData;
}
