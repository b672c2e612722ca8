use super::{
    lexer::tokenize,
    rules::{Grammar, LexState, PIKCHR},
    tokens::Token,
};

/// Line-by-line lexing with the lexer state carried between lines.
///
/// One session per open document. The grammar is shared; the only mutable
/// data is the current state, so re-lexing a line after an edit only needs
/// the state saved for the line before it.
#[derive(Debug, Clone)]
pub struct Session<'g> {
    grammar: &'g Grammar,
    state: LexState,
}

impl Session<'static> {
    pub fn pikchr() -> Self {
        Session::new(&PIKCHR)
    }
}

impl<'g> Session<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Session {
            grammar,
            state: LexState::Start,
        }
    }

    pub fn state(&self) -> LexState {
        self.state
    }

    pub fn reset(&mut self) {
        self.state = LexState::Start;
    }

    /// Resumes from a previously saved state.
    pub fn restore(&mut self, state: LexState) {
        self.state = state;
    }

    /// Lexes one line from the current state and stores the next state.
    ///
    /// Spans are relative to `line` and carry line number 0.
    pub fn step(&mut self, line: &str) -> Vec<Token> {
        let (tokens, next) = tokenize(self.grammar, line, self.state);
        self.state = next;
        tokens
    }
}

/// Lexes a whole document in one pass with the shared pikchr grammar.
///
/// Spans hold absolute byte offsets and zero-based line numbers; newlines
/// are part of `Whitespace` tokens.
pub fn tokenize_document(source: &str) -> Vec<Token> {
    tokenize(&PIKCHR, source, LexState::Start).0
}
