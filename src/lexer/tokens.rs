use serde::Serialize;
use std::fmt::Display;

use crate::Span;

/// Lexical categories of pikchr source.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
pub enum TokenKind {
    Whitespace,
    Comment,

    Keyword,    // ordinals, places, path keywords
    Meta,       // define, print, assert
    Definition, // name following `define`

    Operator,
    Bracket,
    Punctuation,

    Attribute,  // dashed, same as, ->, above ...
    Qualifier,  // .n, north, right, start ...
    Direction,  // up, down
    Property,   // width, radius ...
    Builtin,    // boxwid, linerad, margin ...

    Color,
    String,
    Number,

    ObjectClass,
    Variable,
    Label,

    Unknown,
}

impl TokenKind {
    /// The CodeMirror style used to display this kind, if any.
    pub fn style(&self) -> Option<&'static str> {
        match self {
            TokenKind::Whitespace | TokenKind::Unknown => None,
            TokenKind::Comment => Some("comment"),
            TokenKind::Keyword => Some("keyword"),
            TokenKind::Meta => Some("meta"),
            TokenKind::Definition => Some("def"),
            TokenKind::Operator => Some("operator"),
            TokenKind::Bracket => Some("bracket"),
            TokenKind::Punctuation => Some("punctuation"),
            TokenKind::Attribute | TokenKind::Qualifier => Some("attribute"),
            TokenKind::Direction | TokenKind::Builtin => Some("builtin"),
            TokenKind::Property => Some("property"),
            TokenKind::Color | TokenKind::Number => Some("number"),
            TokenKind::String => Some("string"),
            TokenKind::ObjectClass => Some("atom"),
            TokenKind::Variable => Some("variable-2"),
            TokenKind::Label => Some("def"),
        }
    }

    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Comment)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}-{} {} {:?}",
            self.span.start.line() + 1,
            self.span.start.offset(),
            self.span.end.offset(),
            self.kind,
            self.value
        )
    }
}
