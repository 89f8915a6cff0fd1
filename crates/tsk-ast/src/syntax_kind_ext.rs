//! Node kinds that are not tokens.
//!
//! Stored in `Node::kind` next to `SyntaxKind` token values, so every
//! constant here is above the last token kind.

// Declarations and signatures
pub const TYPE_PARAMETER: u16 = 168;
pub const PARAMETER: u16 = 169;
pub const PROPERTY_SIGNATURE: u16 = 171;
pub const METHOD_SIGNATURE: u16 = 173;
pub const INDEX_SIGNATURE: u16 = 181;

// Type nodes
pub const TYPE_REFERENCE: u16 = 183;
pub const FUNCTION_TYPE: u16 = 184;
pub const TYPE_LITERAL: u16 = 187;
pub const ARRAY_TYPE: u16 = 188;
pub const UNION_TYPE: u16 = 192;
pub const MAPPED_TYPE: u16 = 200;
pub const LITERAL_TYPE: u16 = 201;

// Expressions
pub const ARRAY_LITERAL_EXPRESSION: u16 = 209;
pub const OBJECT_LITERAL_EXPRESSION: u16 = 210;
pub const PROPERTY_ACCESS_EXPRESSION: u16 = 211;
pub const CALL_EXPRESSION: u16 = 213;
pub const PARENTHESIZED_EXPRESSION: u16 = 217;
pub const ARROW_FUNCTION: u16 = 219;
pub const BINARY_EXPRESSION: u16 = 226;

// Statements
pub const BLOCK: u16 = 241;
pub const VARIABLE_STATEMENT: u16 = 243;
pub const EXPRESSION_STATEMENT: u16 = 244;
pub const IF_STATEMENT: u16 = 245;
pub const RETURN_STATEMENT: u16 = 253;
pub const VARIABLE_DECLARATION: u16 = 260;
pub const FUNCTION_DECLARATION: u16 = 262;
pub const INTERFACE_DECLARATION: u16 = 264;
pub const TYPE_ALIAS_DECLARATION: u16 = 265;

// Modules
pub const IMPORT_DECLARATION: u16 = 272;
pub const IMPORT_CLAUSE: u16 = 273;
pub const NAMESPACE_IMPORT: u16 = 274;
pub const NAMED_IMPORTS: u16 = 275;
pub const IMPORT_SPECIFIER: u16 = 276;

// Object literal members
pub const PROPERTY_ASSIGNMENT: u16 = 303;
pub const SHORTHAND_PROPERTY_ASSIGNMENT: u16 = 304;

pub const SOURCE_FILE: u16 = 312;

/// Human-readable kind name, used in trace output and panics in tests.
pub fn kind_name(kind: u16) -> &'static str {
    match kind {
        TYPE_PARAMETER => "TypeParameter",
        PARAMETER => "Parameter",
        PROPERTY_SIGNATURE => "PropertySignature",
        METHOD_SIGNATURE => "MethodSignature",
        INDEX_SIGNATURE => "IndexSignature",
        TYPE_REFERENCE => "TypeReference",
        FUNCTION_TYPE => "FunctionType",
        TYPE_LITERAL => "TypeLiteral",
        ARRAY_TYPE => "ArrayType",
        UNION_TYPE => "UnionType",
        MAPPED_TYPE => "MappedType",
        LITERAL_TYPE => "LiteralType",
        ARRAY_LITERAL_EXPRESSION => "ArrayLiteralExpression",
        OBJECT_LITERAL_EXPRESSION => "ObjectLiteralExpression",
        PROPERTY_ACCESS_EXPRESSION => "PropertyAccessExpression",
        CALL_EXPRESSION => "CallExpression",
        PARENTHESIZED_EXPRESSION => "ParenthesizedExpression",
        ARROW_FUNCTION => "ArrowFunction",
        BINARY_EXPRESSION => "BinaryExpression",
        BLOCK => "Block",
        VARIABLE_STATEMENT => "VariableStatement",
        EXPRESSION_STATEMENT => "ExpressionStatement",
        IF_STATEMENT => "IfStatement",
        RETURN_STATEMENT => "ReturnStatement",
        VARIABLE_DECLARATION => "VariableDeclaration",
        FUNCTION_DECLARATION => "FunctionDeclaration",
        INTERFACE_DECLARATION => "InterfaceDeclaration",
        TYPE_ALIAS_DECLARATION => "TypeAliasDeclaration",
        IMPORT_DECLARATION => "ImportDeclaration",
        IMPORT_CLAUSE => "ImportClause",
        NAMESPACE_IMPORT => "NamespaceImport",
        NAMED_IMPORTS => "NamedImports",
        IMPORT_SPECIFIER => "ImportSpecifier",
        PROPERTY_ASSIGNMENT => "PropertyAssignment",
        SHORTHAND_PROPERTY_ASSIGNMENT => "ShorthandPropertyAssignment",
        SOURCE_FILE => "SourceFile",
        _ => "Token",
    }
}
