//! Utility macros for the lexer.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_RULE!` - Compiles a single-kind rule, optionally boundary checked
//!
//! These keep the grammar table in `lexer::rules` readable as data.

/// Creates a Token instance.
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, "42".to_string(), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $span,
        }
    };
}

/// Compiles a rule that classifies its whole match as one kind.
///
/// A leading `bounded` makes the rule require a token boundary after the
/// match. Must be used inside a function returning `Result<_, Error>`.
///
/// # Example
///
/// ```ignore
/// MK_RULE!(bounded "object", "box|circle", TokenKind::ObjectClass),
/// MK_RULE!("bracket", r"[\[\]()]", TokenKind::Bracket),
/// ```
#[macro_export]
macro_rules! MK_RULE {
    (bounded $name:literal, $body:expr, $kind:expr) => {
        Rule::new($name, &$body, Classify::Whole($kind), true)?
    };
    ($name:literal, $body:expr, $kind:expr) => {
        Rule::new($name, &$body, Classify::Whole($kind), false)?
    };
}
