//! Node kinds beyond the scanner's token kinds.
//!
//! Stored in `Node::kind` next to token kinds, so the values start right
//! after `SyntaxKind::LAST_TOKEN`.

use ets_scanner::SyntaxKind;

pub const FIRST_NODE: u16 = SyntaxKind::LAST_TOKEN as u16 + 1;

pub const QUALIFIED_NAME: u16 = FIRST_NODE;
pub const COMPUTED_PROPERTY_NAME: u16 = FIRST_NODE + 1;
pub const TYPE_PARAMETER: u16 = FIRST_NODE + 2;
pub const PARAMETER: u16 = FIRST_NODE + 3;
pub const DECORATOR: u16 = FIRST_NODE + 4;
pub const PROPERTY_SIGNATURE: u16 = FIRST_NODE + 5;
pub const PROPERTY_DECLARATION: u16 = FIRST_NODE + 6;
pub const METHOD_SIGNATURE: u16 = FIRST_NODE + 7;
pub const METHOD_DECLARATION: u16 = FIRST_NODE + 8;
pub const CONSTRUCTOR: u16 = FIRST_NODE + 9;
pub const GET_ACCESSOR: u16 = FIRST_NODE + 10;
pub const SET_ACCESSOR: u16 = FIRST_NODE + 11;
pub const INDEX_SIGNATURE: u16 = FIRST_NODE + 12;
pub const TYPE_REFERENCE: u16 = FIRST_NODE + 13;
pub const FUNCTION_TYPE: u16 = FIRST_NODE + 14;
pub const TYPE_LITERAL: u16 = FIRST_NODE + 15;
pub const ARRAY_TYPE: u16 = FIRST_NODE + 16;
pub const TUPLE_TYPE: u16 = FIRST_NODE + 17;
pub const UNION_TYPE: u16 = FIRST_NODE + 18;
pub const INTERSECTION_TYPE: u16 = FIRST_NODE + 19;
pub const PARENTHESIZED_TYPE: u16 = FIRST_NODE + 20;
pub const LITERAL_TYPE: u16 = FIRST_NODE + 21;
pub const ARRAY_LITERAL_EXPRESSION: u16 = FIRST_NODE + 22;
pub const OBJECT_LITERAL_EXPRESSION: u16 = FIRST_NODE + 23;
pub const PROPERTY_ACCESS_EXPRESSION: u16 = FIRST_NODE + 24;
pub const ELEMENT_ACCESS_EXPRESSION: u16 = FIRST_NODE + 25;
pub const CALL_EXPRESSION: u16 = FIRST_NODE + 26;
pub const NEW_EXPRESSION: u16 = FIRST_NODE + 27;
pub const PARENTHESIZED_EXPRESSION: u16 = FIRST_NODE + 28;
pub const FUNCTION_EXPRESSION: u16 = FIRST_NODE + 29;
pub const ARROW_FUNCTION: u16 = FIRST_NODE + 30;
pub const PREFIX_UNARY_EXPRESSION: u16 = FIRST_NODE + 31;
pub const POSTFIX_UNARY_EXPRESSION: u16 = FIRST_NODE + 32;
pub const BINARY_EXPRESSION: u16 = FIRST_NODE + 33;
pub const CONDITIONAL_EXPRESSION: u16 = FIRST_NODE + 34;
pub const SPREAD_ELEMENT: u16 = FIRST_NODE + 35;
pub const AS_EXPRESSION: u16 = FIRST_NODE + 36;
pub const NON_NULL_EXPRESSION: u16 = FIRST_NODE + 37;
pub const EXPRESSION_WITH_TYPE_ARGUMENTS: u16 = FIRST_NODE + 38;
pub const BLOCK: u16 = FIRST_NODE + 39;
pub const EMPTY_STATEMENT: u16 = FIRST_NODE + 40;
pub const VARIABLE_STATEMENT: u16 = FIRST_NODE + 41;
pub const EXPRESSION_STATEMENT: u16 = FIRST_NODE + 42;
pub const IF_STATEMENT: u16 = FIRST_NODE + 43;
pub const WHILE_STATEMENT: u16 = FIRST_NODE + 44;
pub const FOR_STATEMENT: u16 = FIRST_NODE + 45;
pub const FOR_IN_STATEMENT: u16 = FIRST_NODE + 46;
pub const FOR_OF_STATEMENT: u16 = FIRST_NODE + 47;
pub const CONTINUE_STATEMENT: u16 = FIRST_NODE + 48;
pub const BREAK_STATEMENT: u16 = FIRST_NODE + 49;
pub const RETURN_STATEMENT: u16 = FIRST_NODE + 50;
pub const THROW_STATEMENT: u16 = FIRST_NODE + 51;
pub const VARIABLE_DECLARATION: u16 = FIRST_NODE + 52;
pub const VARIABLE_DECLARATION_LIST: u16 = FIRST_NODE + 53;
pub const FUNCTION_DECLARATION: u16 = FIRST_NODE + 54;
pub const CLASS_DECLARATION: u16 = FIRST_NODE + 55;
pub const STRUCT_DECLARATION: u16 = FIRST_NODE + 56;
pub const INTERFACE_DECLARATION: u16 = FIRST_NODE + 57;
pub const TYPE_ALIAS_DECLARATION: u16 = FIRST_NODE + 58;
pub const ENUM_DECLARATION: u16 = FIRST_NODE + 59;
pub const MODULE_DECLARATION: u16 = FIRST_NODE + 60;
pub const MODULE_BLOCK: u16 = FIRST_NODE + 61;
pub const IMPORT_DECLARATION: u16 = FIRST_NODE + 62;
pub const IMPORT_CLAUSE: u16 = FIRST_NODE + 63;
pub const NAMESPACE_IMPORT: u16 = FIRST_NODE + 64;
pub const NAMED_IMPORTS: u16 = FIRST_NODE + 65;
pub const IMPORT_SPECIFIER: u16 = FIRST_NODE + 66;
pub const EXPORT_ASSIGNMENT: u16 = FIRST_NODE + 67;
pub const EXPORT_DECLARATION: u16 = FIRST_NODE + 68;
pub const NAMED_EXPORTS: u16 = FIRST_NODE + 69;
pub const EXPORT_SPECIFIER: u16 = FIRST_NODE + 70;
pub const HERITAGE_CLAUSE: u16 = FIRST_NODE + 71;
pub const PROPERTY_ASSIGNMENT: u16 = FIRST_NODE + 72;
pub const SHORTHAND_PROPERTY_ASSIGNMENT: u16 = FIRST_NODE + 73;
pub const SPREAD_ASSIGNMENT: u16 = FIRST_NODE + 74;
pub const ENUM_MEMBER: u16 = FIRST_NODE + 75;
pub const SOURCE_FILE: u16 = FIRST_NODE + 76;
pub const LAST_NODE: u16 = SOURCE_FILE;

/// Debug name of a node or token kind.
pub fn kind_name(kind: u16) -> &'static str {
    if kind < FIRST_NODE {
        return SyntaxKind::from_u16(kind).map_or("Unknown", token_kind_name);
    }
    match kind {
        QUALIFIED_NAME => "QualifiedName",
        COMPUTED_PROPERTY_NAME => "ComputedPropertyName",
        TYPE_PARAMETER => "TypeParameter",
        PARAMETER => "Parameter",
        DECORATOR => "Decorator",
        PROPERTY_SIGNATURE => "PropertySignature",
        PROPERTY_DECLARATION => "PropertyDeclaration",
        METHOD_SIGNATURE => "MethodSignature",
        METHOD_DECLARATION => "MethodDeclaration",
        CONSTRUCTOR => "Constructor",
        GET_ACCESSOR => "GetAccessor",
        SET_ACCESSOR => "SetAccessor",
        INDEX_SIGNATURE => "IndexSignature",
        TYPE_REFERENCE => "TypeReference",
        FUNCTION_TYPE => "FunctionType",
        TYPE_LITERAL => "TypeLiteral",
        ARRAY_TYPE => "ArrayType",
        TUPLE_TYPE => "TupleType",
        UNION_TYPE => "UnionType",
        INTERSECTION_TYPE => "IntersectionType",
        PARENTHESIZED_TYPE => "ParenthesizedType",
        LITERAL_TYPE => "LiteralType",
        ARRAY_LITERAL_EXPRESSION => "ArrayLiteralExpression",
        OBJECT_LITERAL_EXPRESSION => "ObjectLiteralExpression",
        PROPERTY_ACCESS_EXPRESSION => "PropertyAccessExpression",
        ELEMENT_ACCESS_EXPRESSION => "ElementAccessExpression",
        CALL_EXPRESSION => "CallExpression",
        NEW_EXPRESSION => "NewExpression",
        PARENTHESIZED_EXPRESSION => "ParenthesizedExpression",
        FUNCTION_EXPRESSION => "FunctionExpression",
        ARROW_FUNCTION => "ArrowFunction",
        PREFIX_UNARY_EXPRESSION => "PrefixUnaryExpression",
        POSTFIX_UNARY_EXPRESSION => "PostfixUnaryExpression",
        BINARY_EXPRESSION => "BinaryExpression",
        CONDITIONAL_EXPRESSION => "ConditionalExpression",
        SPREAD_ELEMENT => "SpreadElement",
        AS_EXPRESSION => "AsExpression",
        NON_NULL_EXPRESSION => "NonNullExpression",
        EXPRESSION_WITH_TYPE_ARGUMENTS => "ExpressionWithTypeArguments",
        BLOCK => "Block",
        EMPTY_STATEMENT => "EmptyStatement",
        VARIABLE_STATEMENT => "VariableStatement",
        EXPRESSION_STATEMENT => "ExpressionStatement",
        IF_STATEMENT => "IfStatement",
        WHILE_STATEMENT => "WhileStatement",
        FOR_STATEMENT => "ForStatement",
        FOR_IN_STATEMENT => "ForInStatement",
        FOR_OF_STATEMENT => "ForOfStatement",
        CONTINUE_STATEMENT => "ContinueStatement",
        BREAK_STATEMENT => "BreakStatement",
        RETURN_STATEMENT => "ReturnStatement",
        THROW_STATEMENT => "ThrowStatement",
        VARIABLE_DECLARATION => "VariableDeclaration",
        VARIABLE_DECLARATION_LIST => "VariableDeclarationList",
        FUNCTION_DECLARATION => "FunctionDeclaration",
        CLASS_DECLARATION => "ClassDeclaration",
        STRUCT_DECLARATION => "StructDeclaration",
        INTERFACE_DECLARATION => "InterfaceDeclaration",
        TYPE_ALIAS_DECLARATION => "TypeAliasDeclaration",
        ENUM_DECLARATION => "EnumDeclaration",
        MODULE_DECLARATION => "ModuleDeclaration",
        MODULE_BLOCK => "ModuleBlock",
        IMPORT_DECLARATION => "ImportDeclaration",
        IMPORT_CLAUSE => "ImportClause",
        NAMESPACE_IMPORT => "NamespaceImport",
        NAMED_IMPORTS => "NamedImports",
        IMPORT_SPECIFIER => "ImportSpecifier",
        EXPORT_ASSIGNMENT => "ExportAssignment",
        EXPORT_DECLARATION => "ExportDeclaration",
        NAMED_EXPORTS => "NamedExports",
        EXPORT_SPECIFIER => "ExportSpecifier",
        HERITAGE_CLAUSE => "HeritageClause",
        PROPERTY_ASSIGNMENT => "PropertyAssignment",
        SHORTHAND_PROPERTY_ASSIGNMENT => "ShorthandPropertyAssignment",
        SPREAD_ASSIGNMENT => "SpreadAssignment",
        ENUM_MEMBER => "EnumMember",
        SOURCE_FILE => "SourceFile",
        _ => "Unknown",
    }
}

fn token_kind_name(kind: SyntaxKind) -> &'static str {
    match kind {
        SyntaxKind::Identifier => "Identifier",
        SyntaxKind::PrivateIdentifier => "PrivateIdentifier",
        SyntaxKind::StringLiteral => "StringLiteral",
        SyntaxKind::NumericLiteral => "NumericLiteral",
        SyntaxKind::NoSubstitutionTemplateLiteral => "NoSubstitutionTemplateLiteral",
        _ if kind.is_keyword() => "Keyword",
        _ => "Token",
    }
}

/// Statement-level kinds (including declarations).
pub fn is_statement(kind: u16) -> bool {
    matches!(
        kind,
        BLOCK
            | EMPTY_STATEMENT
            | VARIABLE_STATEMENT
            | EXPRESSION_STATEMENT
            | IF_STATEMENT
            | WHILE_STATEMENT
            | FOR_STATEMENT
            | FOR_IN_STATEMENT
            | FOR_OF_STATEMENT
            | CONTINUE_STATEMENT
            | BREAK_STATEMENT
            | RETURN_STATEMENT
            | THROW_STATEMENT
            | FUNCTION_DECLARATION
            | CLASS_DECLARATION
            | STRUCT_DECLARATION
            | INTERFACE_DECLARATION
            | TYPE_ALIAS_DECLARATION
            | ENUM_DECLARATION
            | MODULE_DECLARATION
            | IMPORT_DECLARATION
            | EXPORT_DECLARATION
            | EXPORT_ASSIGNMENT
    )
}

/// Members of a class or struct body.
pub fn is_class_element(kind: u16) -> bool {
    matches!(
        kind,
        PROPERTY_DECLARATION
            | METHOD_DECLARATION
            | CONSTRUCTOR
            | GET_ACCESSOR
            | SET_ACCESSOR
            | INDEX_SIGNATURE
    )
}

/// Members of an interface body or a type literal.
pub fn is_type_element(kind: u16) -> bool {
    matches!(kind, PROPERTY_SIGNATURE | METHOD_SIGNATURE | INDEX_SIGNATURE)
}

pub fn is_object_literal_element(kind: u16) -> bool {
    matches!(
        kind,
        PROPERTY_ASSIGNMENT
            | SHORTHAND_PROPERTY_ASSIGNMENT
            | SPREAD_ASSIGNMENT
            | METHOD_DECLARATION
            | GET_ACCESSOR
            | SET_ACCESSOR
    )
}

pub fn is_class_like(kind: u16) -> bool {
    matches!(kind, CLASS_DECLARATION | STRUCT_DECLARATION)
}

pub fn is_function_like(kind: u16) -> bool {
    matches!(
        kind,
        FUNCTION_DECLARATION
            | FUNCTION_EXPRESSION
            | ARROW_FUNCTION
            | METHOD_DECLARATION
            | CONSTRUCTOR
            | GET_ACCESSOR
            | SET_ACCESSOR
    )
}
