//! Lexical analysis of pikchr source for syntax highlighting.
//!
//! - Ordered regex rule tables per lexer state (`rules`)
//! - A first-match-wins engine that never fails and covers its input
//!   exactly, emitting `Unknown` for text no rule accepts (`lexer`)
//! - Sessions that lex one line at a time and carry the lexer state
//!   between lines (`session`)

pub mod lexer;
pub mod rules;
pub mod session;
pub mod tokens;

pub use lexer::tokenize;
pub use rules::{Grammar, LexState, PIKCHR};
pub use session::{tokenize_document, Session};
pub use tokens::{Token, TokenKind};

#[cfg(test)]
mod tests;
