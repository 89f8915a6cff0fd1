//! Token kinds.
//!
//! Nodes whose kind is a token carry no pool data (keywords used as types,
//! `true`/`false`/`null`) or carry text (identifiers, literals). Compound
//! node kinds live in `syntax_kind_ext` and start above every token value.

use serde::{Deserialize, Serialize};

#[repr(u16)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SyntaxKind {
    Unknown = 0,
    NumericLiteral = 9,
    StringLiteral = 11,

    // Operators
    LessThanToken = 30,
    GreaterThanToken = 32,
    LessThanEqualsToken = 33,
    GreaterThanEqualsToken = 34,
    EqualsEqualsEqualsToken = 37,
    ExclamationEqualsEqualsToken = 38,
    PlusToken = 40,
    MinusToken = 41,
    AsteriskToken = 42,
    SlashToken = 44,
    AmpersandAmpersandToken = 56,
    BarBarToken = 57,
    QuestionQuestionToken = 61,
    EqualsToken = 64,

    Identifier = 80,

    // Keywords
    FalseKeyword = 97,
    NullKeyword = 106,
    TrueKeyword = 112,
    VoidKeyword = 116,
    AnyKeyword = 133,
    BooleanKeyword = 136,
    NeverKeyword = 146,
    NumberKeyword = 150,
    ObjectKeyword = 151,
    StringKeyword = 154,
    SymbolKeyword = 155,
    UndefinedKeyword = 157,
    UnknownKeyword = 159,
    BigIntKeyword = 163,
}

impl SyntaxKind {
    /// Every keyword that is valid in type position.
    pub const TYPE_KEYWORDS: [SyntaxKind; 12] = [
        SyntaxKind::AnyKeyword,
        SyntaxKind::UnknownKeyword,
        SyntaxKind::NumberKeyword,
        SyntaxKind::BigIntKeyword,
        SyntaxKind::BooleanKeyword,
        SyntaxKind::StringKeyword,
        SyntaxKind::SymbolKeyword,
        SyntaxKind::VoidKeyword,
        SyntaxKind::UndefinedKeyword,
        SyntaxKind::NeverKeyword,
        SyntaxKind::ObjectKeyword,
        SyntaxKind::NullKeyword,
    ];

    pub fn from_u16(kind: u16) -> Option<SyntaxKind> {
        use SyntaxKind::*;
        const ALL: [SyntaxKind; 32] = [
            Unknown,
            NumericLiteral,
            StringLiteral,
            LessThanToken,
            GreaterThanToken,
            LessThanEqualsToken,
            GreaterThanEqualsToken,
            EqualsEqualsEqualsToken,
            ExclamationEqualsEqualsToken,
            PlusToken,
            MinusToken,
            AsteriskToken,
            SlashToken,
            AmpersandAmpersandToken,
            BarBarToken,
            QuestionQuestionToken,
            EqualsToken,
            Identifier,
            FalseKeyword,
            NullKeyword,
            TrueKeyword,
            VoidKeyword,
            AnyKeyword,
            BooleanKeyword,
            NeverKeyword,
            NumberKeyword,
            ObjectKeyword,
            StringKeyword,
            SymbolKeyword,
            UndefinedKeyword,
            UnknownKeyword,
            BigIntKeyword,
        ];
        ALL.into_iter().find(|candidate| *candidate as u16 == kind)
    }

    pub fn is_type_keyword(kind: u16) -> bool {
        Self::TYPE_KEYWORDS.iter().any(|k| *k as u16 == kind)
    }

    /// Source text of keyword and operator tokens.
    pub fn token_text(self) -> Option<&'static str> {
        use SyntaxKind::*;
        Some(match self {
            LessThanToken => "<",
            GreaterThanToken => ">",
            LessThanEqualsToken => "<=",
            GreaterThanEqualsToken => ">=",
            EqualsEqualsEqualsToken => "===",
            ExclamationEqualsEqualsToken => "!==",
            PlusToken => "+",
            MinusToken => "-",
            AsteriskToken => "*",
            SlashToken => "/",
            AmpersandAmpersandToken => "&&",
            BarBarToken => "||",
            QuestionQuestionToken => "??",
            EqualsToken => "=",
            FalseKeyword => "false",
            NullKeyword => "null",
            TrueKeyword => "true",
            VoidKeyword => "void",
            AnyKeyword => "any",
            BooleanKeyword => "boolean",
            NeverKeyword => "never",
            NumberKeyword => "number",
            ObjectKeyword => "object",
            StringKeyword => "string",
            SymbolKeyword => "symbol",
            UndefinedKeyword => "undefined",
            UnknownKeyword => "unknown",
            BigIntKeyword => "bigint",
            Unknown | NumericLiteral | StringLiteral | Identifier => return None,
        })
    }
}

/// Whether `text` can be written as a bare identifier (property names
/// included, so reserved words count).
pub fn is_identifier_text(text: &str) -> bool {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    is_identifier_start(first) && chars.all(is_identifier_part)
}

fn is_identifier_start(ch: char) -> bool {
    ch == '$' || ch == '_' || ch.is_alphabetic()
}

fn is_identifier_part(ch: char) -> bool {
    is_identifier_start(ch) || ch.is_numeric() || ch == '\u{200c}' || ch == '\u{200d}'
}
