use crate::{Position, Span, MK_TOKEN};

use super::{
    rules::{Grammar, LexState, Rule},
    tokens::{Token, TokenKind},
};

#[derive(Clone)]
pub struct Lexer<'a> {
    grammar: &'a Grammar,
    tokens: Vec<Token>,
    source: &'a str,
    pos: usize,
    line: usize,
    state: LexState,
}

impl<'a> Lexer<'a> {
    pub fn new(grammar: &'a Grammar, source: &'a str, state: LexState) -> Lexer<'a> {
        Lexer {
            grammar,
            tokens: vec![],
            source,
            pos: 0,
            line: 0,
            state,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        let consumed = &self.source[self.pos..self.pos + n];
        self.line += consumed.matches('\n').count();
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn remainder(&self) -> &'a str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn state(&self) -> LexState {
        self.state
    }

    fn span(&self, start: usize, end: usize) -> Span {
        let lines_before = |at: usize| self.line + self.remainder()[..at].matches('\n').count();

        Span {
            start: Position(lines_before(start), self.pos + start),
            end: Position(lines_before(end), self.pos + end),
        }
    }

    fn push_piece(&mut self, kind: TokenKind, start: usize, end: usize) {
        let value = String::from(&self.remainder()[start..end]);
        let span = self.span(start, end);
        self.push(MK_TOKEN!(kind, value, span));
    }

    /// Tries the current state's rules in order and commits to the first match.
    fn lex_rule(&mut self) -> bool {
        let rules: &'a [Rule] = self.grammar.rules(self.state);

        for rule in rules {
            let Some((len, pieces)) = rule.match_at(self.remainder()) else {
                continue;
            };

            let mut cursor = 0;
            for (kind, start, end) in pieces {
                if start > cursor {
                    self.push_piece(TokenKind::Unknown, cursor, start);
                }
                self.push_piece(kind, start, end);
                cursor = end;
            }
            if cursor < len {
                self.push_piece(TokenKind::Unknown, cursor, len);
            }

            self.advance_n(len);

            if let Some(next) = rule.next_state() {
                log::trace!("rule {} moves lexer to {:?}", rule.name(), next);
                self.state = next;
            }

            return true;
        }

        false
    }

    /// Consumes one character no rule accepts, joining it to a preceding
    /// unknown token when they touch.
    fn lex_unknown(&mut self) {
        let Some(ch) = self.at() else {
            return;
        };
        let len = ch.len_utf8();

        if let Some(last) = self.tokens.last_mut() {
            let touching = last.kind == TokenKind::Unknown && last.span.end.1 == self.pos;
            if touching && ch != '\n' && !last.value.ends_with('\n') {
                last.value.push(ch);
                last.span.end.1 += len;
                self.advance_n(len);
                return;
            }
        }

        self.push_piece(TokenKind::Unknown, 0, len);
        self.advance_n(len);
    }
}

/// Lexes `source` starting in `state`.
///
/// Returns the tokens, which cover `source` exactly, and the state to resume
/// from. Never fails: text no rule accepts becomes `TokenKind::Unknown`.
pub fn tokenize(grammar: &Grammar, source: &str, state: LexState) -> (Vec<Token>, LexState) {
    let mut lex = Lexer::new(grammar, source, state);

    while !lex.at_eof() {
        if !lex.lex_rule() {
            lex.lex_unknown();
        }
    }

    let state = lex.state();
    (lex.tokens, state)
}
