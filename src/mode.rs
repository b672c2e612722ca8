//! Static editor-mode declaration for pikchr.
//!
//! Hosts register these values to associate `.pikchr` files and fenced
//! code blocks with the lexer.

use serde::Serialize;
use std::path::Path;

use crate::lexer::TokenKind;

pub const MODE_NAME: &str = "pikchr";
pub const MODE_LABEL: &str = "Pikchr";
pub const MIME_TYPE: &str = "text/x-pikchr";
pub const DEFAULT_EXTENSION: &str = "pikchr";
pub const EXTENSIONS: &[&str] = &[DEFAULT_EXTENSION];
pub const LINE_COMMENT: &str = "#";

/// Info-string languages rendered as pikchr in fenced code blocks.
pub const FENCE_LANGUAGES: &[&str] = &["pikchr", "{pikchr}"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModeInfo {
    pub name: &'static str,
    pub label: &'static str,
    pub mime: &'static str,
    pub extensions: Vec<&'static str>,
    pub line_comment: &'static str,
    pub fence_languages: Vec<&'static str>,
    pub styles: Vec<StyleEntry>,
}

/// Display style of one token kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleEntry {
    pub kind: TokenKind,
    pub style: Option<&'static str>,
}

const STYLED_KINDS: &[TokenKind] = &[
    TokenKind::Whitespace,
    TokenKind::Comment,
    TokenKind::Keyword,
    TokenKind::Meta,
    TokenKind::Definition,
    TokenKind::Operator,
    TokenKind::Bracket,
    TokenKind::Punctuation,
    TokenKind::Attribute,
    TokenKind::Qualifier,
    TokenKind::Direction,
    TokenKind::Property,
    TokenKind::Builtin,
    TokenKind::Color,
    TokenKind::String,
    TokenKind::Number,
    TokenKind::ObjectClass,
    TokenKind::Variable,
    TokenKind::Label,
    TokenKind::Unknown,
];

pub fn mode_info() -> ModeInfo {
    ModeInfo {
        name: MODE_NAME,
        label: MODE_LABEL,
        mime: MIME_TYPE,
        extensions: EXTENSIONS.to_vec(),
        line_comment: LINE_COMMENT,
        fence_languages: FENCE_LANGUAGES.to_vec(),
        styles: STYLED_KINDS
            .iter()
            .map(|kind| StyleEntry {
                kind: *kind,
                style: kind.style(),
            })
            .collect(),
    }
}

/// Whether a fence info string (e.g. "pikchr toggle") names pikchr.
pub fn is_pikchr_fence(info: &str) -> bool {
    info.split_whitespace()
        .next()
        .is_some_and(|lang| FENCE_LANGUAGES.contains(&lang))
}

pub fn is_pikchr_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| EXTENSIONS.contains(&ext))
}
