//! Unit tests for the lexer module.
//!
//! - Rule priority and the trailing boundary check
//! - Case sensitivity of labels, variables and colors
//! - Numbers, units, strings, comments and phrases
//! - Total coverage, determinism and line-by-line equivalence
//! - Reserved states and state transitions

use super::{
    rules::{Classify, Grammar, LexState, Rule},
    session::{tokenize_document, Session},
    tokens::{Token, TokenKind},
};
use crate::errors::errors::ErrorImpl;

fn lex(line: &str) -> Vec<Token> {
    Session::pikchr().step(line)
}

fn significant(line: &str) -> Vec<(TokenKind, String)> {
    lex(line)
        .into_iter()
        .filter(|token| token.kind != TokenKind::Whitespace)
        .map(|token| (token.kind, token.value))
        .collect()
}

fn pairs(expected: &[(TokenKind, &str)]) -> Vec<(TokenKind, String)> {
    expected
        .iter()
        .map(|(kind, value)| (*kind, value.to_string()))
        .collect()
}

fn assert_covers(line: &str, tokens: &[Token]) {
    let joined: String = tokens.iter().map(|token| token.value.as_str()).collect();
    assert_eq!(joined, line);

    let mut offset = 0;
    for token in tokens {
        assert!(!token.value.is_empty());
        assert_eq!(token.span.start.1, offset, "gap before {:?}", token);
        assert_eq!(token.span.len(), token.value.len());
        offset = token.span.end.1;
    }
    assert_eq!(offset, line.len());
}

#[test]
fn test_tokenize_object_classes() {
    let tokens = significant("box circle arrow line text cylinder");

    assert_eq!(tokens.len(), 6);
    assert!(tokens.iter().all(|(kind, _)| *kind == TokenKind::ObjectClass));
}

#[test]
fn test_keyword_shadows_identifier() {
    assert_eq!(significant("box"), pairs(&[(TokenKind::ObjectClass, "box")]));
    assert_eq!(significant("Box"), pairs(&[(TokenKind::Label, "Box")]));
    assert_eq!(significant("boxes"), pairs(&[(TokenKind::Variable, "boxes")]));
    assert_eq!(significant("boxwid"), pairs(&[(TokenKind::Builtin, "boxwid")]));
}

#[test]
fn test_labels_and_variables_are_case_sensitive() {
    assert_eq!(
        significant("Foo foo $bar @baz"),
        pairs(&[
            (TokenKind::Label, "Foo"),
            (TokenKind::Variable, "foo"),
            (TokenKind::Variable, "$bar"),
            (TokenKind::Variable, "@baz"),
        ])
    );
}

#[test]
fn test_colors_are_case_insensitive() {
    assert_eq!(
        significant("RED red Red LightSteelBlue"),
        pairs(&[
            (TokenKind::Color, "RED"),
            (TokenKind::Color, "red"),
            (TokenKind::Color, "Red"),
            (TokenKind::Color, "LightSteelBlue"),
        ])
    );
}

#[test]
fn test_boundary_lookahead() {
    assert_eq!(significant("colorado"), pairs(&[(TokenKind::Variable, "colorado")]));

    let tokens = lex("color ");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, TokenKind::Attribute);
    assert_eq!(tokens[0].value, "color");
    assert_eq!(tokens[1].kind, TokenKind::Whitespace);

    assert_eq!(
        significant("color;"),
        pairs(&[(TokenKind::Attribute, "color"), (TokenKind::Punctuation, ";")])
    );
}

#[test]
fn test_boundary_backtracks_within_alternatives() {
    // `n` is tried before `north` but fails the boundary check
    assert_eq!(significant("north"), pairs(&[(TokenKind::Qualifier, "north")]));
    assert_eq!(significant("ne of"), pairs(&[(TokenKind::Attribute, "ne of")]));
}

#[test]
fn test_similar_words() {
    assert_eq!(
        significant("dot dotted thick thickness line linen linewid"),
        pairs(&[
            (TokenKind::ObjectClass, "dot"),
            (TokenKind::Attribute, "dotted"),
            (TokenKind::Attribute, "thick"),
            (TokenKind::Property, "thickness"),
            (TokenKind::ObjectClass, "line"),
            (TokenKind::Color, "linen"),
            (TokenKind::Builtin, "linewid"),
        ])
    );
}

#[test]
fn test_number_units() {
    assert_eq!(significant("3.5cm"), pairs(&[(TokenKind::Number, "3.5cm")]));
    assert_eq!(
        significant("3.5xyz"),
        pairs(&[(TokenKind::Number, "3.5"), (TokenKind::Variable, "xyz")])
    );
    assert_eq!(
        significant("1in 2px 42 0.25"),
        pairs(&[
            (TokenKind::Number, "1in"),
            (TokenKind::Number, "2px"),
            (TokenKind::Number, "42"),
            (TokenKind::Number, "0.25"),
        ])
    );
}

#[test]
fn test_hex_colors() {
    assert_eq!(
        significant("fill 0xff8000"),
        pairs(&[(TokenKind::Attribute, "fill"), (TokenKind::Color, "0xff8000")])
    );
    assert_eq!(
        significant("0x12345"),
        pairs(&[(TokenKind::Number, "0"), (TokenKind::Variable, "x12345")])
    );
}

#[test]
fn test_tokenize_comments() {
    let tokens = lex("box # a comment with \"quotes\"");

    assert_eq!(tokens[0].kind, TokenKind::ObjectClass);
    assert_eq!(tokens[2].kind, TokenKind::Comment);
    assert_eq!(tokens[2].value, "# a comment with \"quotes\"");
    assert_eq!(tokens.len(), 3);
}

#[test]
fn test_tokenize_strings() {
    assert_eq!(
        significant(r#"text "hello \"world\"" at A"#),
        pairs(&[
            (TokenKind::ObjectClass, "text"),
            (TokenKind::String, r#""hello \"world\"""#),
            (TokenKind::Keyword, "at"),
            (TokenKind::Label, "A"),
        ])
    );
}

#[test]
fn test_unterminated_string_is_covered() {
    let line = "\"open";
    let tokens = lex(line);

    assert_covers(line, &tokens);
    assert_eq!(tokens[0].kind, TokenKind::Unknown);
    assert_eq!(tokens[1].kind, TokenKind::Variable);
}

#[test]
fn test_compound_phrases() {
    assert_eq!(
        significant("same as A"),
        pairs(&[(TokenKind::Attribute, "same as"), (TokenKind::Label, "A")])
    );
    assert_eq!(
        significant("1/3 of the way between A and B"),
        pairs(&[
            (TokenKind::Number, "1"),
            (TokenKind::Operator, "/"),
            (TokenKind::Number, "3"),
            (TokenKind::Attribute, "of the way between"),
            (TokenKind::Label, "A"),
            (TokenKind::Attribute, "and"),
            (TokenKind::Label, "B"),
        ])
    );
    assert_eq!(
        significant("until even with B"),
        pairs(&[(TokenKind::Attribute, "until even with"), (TokenKind::Label, "B")])
    );
}

#[test]
fn test_phrases_require_spaces() {
    // a tab is not one of the spaces a phrase accepts
    assert_eq!(
        significant("same\tas"),
        pairs(&[(TokenKind::Attribute, "same"), (TokenKind::Variable, "as")])
    );
}

#[test]
fn test_right_and_left_are_edge_names() {
    assert_eq!(
        significant("move right; arrow from A.right down"),
        pairs(&[
            (TokenKind::ObjectClass, "move"),
            (TokenKind::Qualifier, "right"),
            (TokenKind::Punctuation, ";"),
            (TokenKind::ObjectClass, "arrow"),
            (TokenKind::Keyword, "from"),
            (TokenKind::Label, "A"),
            (TokenKind::Qualifier, ".right"),
            (TokenKind::Direction, "down"),
        ])
    );
    assert_eq!(
        significant("left up"),
        pairs(&[(TokenKind::Qualifier, "left"), (TokenKind::Direction, "up")])
    );
}

#[test]
fn test_directions_and_edges() {
    assert_eq!(
        significant("arrow right 2cm from B.ne to C.start"),
        pairs(&[
            (TokenKind::ObjectClass, "arrow"),
            (TokenKind::Qualifier, "right"),
            (TokenKind::Number, "2cm"),
            (TokenKind::Keyword, "from"),
            (TokenKind::Label, "B"),
            (TokenKind::Qualifier, ".ne"),
            (TokenKind::Keyword, "to"),
            (TokenKind::Label, "C"),
            (TokenKind::Qualifier, ".start"),
        ])
    );
    assert_eq!(
        significant("circle at 1cm right of B"),
        pairs(&[
            (TokenKind::ObjectClass, "circle"),
            (TokenKind::Keyword, "at"),
            (TokenKind::Number, "1cm"),
            (TokenKind::Attribute, "right of"),
            (TokenKind::Label, "B"),
        ])
    );
}

#[test]
fn test_property_access() {
    assert_eq!(
        significant("B1.wid"),
        pairs(&[
            (TokenKind::Label, "B1"),
            (TokenKind::Punctuation, "."),
            (TokenKind::Property, "wid"),
        ])
    );
}

#[test]
fn test_operators_and_functions() {
    assert_eq!(
        significant("x += 2 * abs(y)"),
        pairs(&[
            (TokenKind::Variable, "x"),
            (TokenKind::Operator, "+="),
            (TokenKind::Number, "2"),
            (TokenKind::Operator, "*"),
            (TokenKind::Operator, "abs"),
            (TokenKind::Bracket, "("),
            (TokenKind::Variable, "y"),
            (TokenKind::Bracket, ")"),
        ])
    );
    assert_eq!(significant("absolute"), pairs(&[(TokenKind::Variable, "absolute")]));
}

#[test]
fn test_arrows() {
    assert_eq!(
        significant("line <-> -> <-"),
        pairs(&[
            (TokenKind::ObjectClass, "line"),
            (TokenKind::Attribute, "<->"),
            (TokenKind::Attribute, "->"),
            (TokenKind::Attribute, "<-"),
        ])
    );
}

#[test]
fn test_define_names_its_macro() {
    let tokens = lex("define thing { box }");

    assert_eq!(tokens[0].kind, TokenKind::Meta);
    assert_eq!(tokens[1].kind, TokenKind::Whitespace);
    assert_eq!(tokens[2].kind, TokenKind::Definition);
    assert_eq!(tokens[2].value, "thing");
    assert_eq!(tokens[4].kind, TokenKind::Bracket);
    assert_covers("define thing { box }", &tokens);

    assert_eq!(significant("define"), pairs(&[(TokenKind::Meta, "define")]));
    assert_eq!(
        significant("print x"),
        pairs(&[(TokenKind::Meta, "print"), (TokenKind::Variable, "x")])
    );
}

#[test]
fn test_ordinals() {
    assert_eq!(
        significant("2nd box; last circle; firstly"),
        pairs(&[
            (TokenKind::Keyword, "2nd"),
            (TokenKind::ObjectClass, "box"),
            (TokenKind::Punctuation, ";"),
            (TokenKind::Keyword, "last"),
            (TokenKind::ObjectClass, "circle"),
            (TokenKind::Punctuation, ";"),
            (TokenKind::Variable, "firstly"),
        ])
    );
}

#[test]
fn test_unknown_characters_are_covered() {
    let line = "box ~~ ! ☃";
    let tokens = lex(line);

    assert_covers(line, &tokens);
    assert_eq!(tokens[2].kind, TokenKind::Unknown);
    assert_eq!(tokens[2].value, "~~");
    assert_eq!(tokens[4].kind, TokenKind::Unknown);
    assert_eq!(tokens[4].value, "!");
    assert_eq!(tokens[6].value, "☃");
    assert_eq!(tokens[6].span.start.1, 9);
    assert_eq!(tokens[6].span.end.1, 12);
}

#[test]
fn test_total_coverage() {
    let lines = [
        "",
        "   ",
        "A: box \"one\" width 2cm fill 0x00ff00 color Red",
        "arrow from A.s down 1in then right until even with B",
        "$x = (1+2)*3.5/4 % 2; print $x",
        "}{ ][ )( \\ ,",
        "@@@ ??? ~ `",
        "Ünïcödé → ← ↔",
        "box\ttext\t\"tab\"",
    ];

    for line in lines {
        assert_covers(line, &lex(line));
    }
}

#[test]
fn test_empty_line_keeps_state() {
    let mut session = Session::pikchr();

    assert!(session.step("").is_empty());
    assert_eq!(session.state(), LexState::Start);
}

#[test]
fn test_step_is_deterministic() {
    let line = "B: box \"two\" at 1/2 of the way between A and C";
    let mut session = Session::pikchr();

    let first = session.step(line);
    let state = session.state();
    let second = session.step(line);

    assert_eq!(first, second);
    assert_eq!(state, session.state());
}

#[test]
fn test_line_by_line_matches_document() {
    let document = "# flow\nA: box \"start\" fit\narrow right 2cm\nB: circle rad 0.5 at A.e + (1, 0)\n\ndefine thing { box }\ncolor = Red\n";

    let whole: Vec<Token> = tokenize_document(document)
        .into_iter()
        .filter(|token| token.kind != TokenKind::Whitespace)
        .collect();

    let mut session = Session::pikchr();
    let mut by_line = vec![];
    let mut line_start = 0;

    for (number, line) in document.split('\n').enumerate() {
        for mut token in session.step(line) {
            if token.kind == TokenKind::Whitespace {
                continue;
            }
            token.span.start.0 = number;
            token.span.start.1 += line_start;
            token.span.end.0 = number;
            token.span.end.1 += line_start;
            by_line.push(token);
        }
        line_start += line.len() + 1;
    }

    assert_eq!(whole, by_line);
}

#[test]
fn test_token_display_uses_one_based_line() {
    let tokens = tokenize_document("box\ncircle");

    assert_eq!(tokens[2].span.start.line(), 1);
    assert_eq!(tokens[2].to_string(), "2:4-10 ObjectClass \"circle\"");
}

#[test]
fn test_document_tracks_lines() {
    let tokens = tokenize_document("box\n  circle\n");

    assert_eq!(tokens[0].span.start.0, 0);
    assert_eq!(tokens[1].kind, TokenKind::Whitespace);
    assert_eq!(tokens[1].span.start.0, 0);
    assert_eq!(tokens[1].span.end.0, 1);
    assert_eq!(tokens[2].value, "circle");
    assert_eq!(tokens[2].span.start.0, 1);
    assert_eq!(tokens[2].span.start.1, 6);
}

#[test]
fn test_reserved_states_have_no_rules() {
    let mut session = Session::pikchr();

    for state in LexState::ALL.into_iter().filter(|state| *state != LexState::Start) {
        session.restore(state);
        let tokens = session.step("box");

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Unknown);
        assert_eq!(session.state(), state);
    }

    session.reset();
    assert_eq!(session.state(), LexState::Start);
    assert_eq!(session.step("box")[0].kind, TokenKind::ObjectClass);
}

#[test]
fn test_rules_can_switch_state() {
    let grammar = Grammar::new()
        .with_state(
            LexState::Start,
            vec![Rule::new("open", "<<", Classify::Whole(TokenKind::Bracket), false)
                .unwrap()
                .then(LexState::Expr)],
        )
        .with_state(
            LexState::Expr,
            vec![
                Rule::new("close", ">>", Classify::Whole(TokenKind::Bracket), false)
                    .unwrap()
                    .then(LexState::Start),
                Rule::new("body", "[^>]+", Classify::Whole(TokenKind::String), false).unwrap(),
            ],
        );

    let mut session = Session::new(&grammar);

    let first = session.step("<<abc");
    assert_eq!(first[0].kind, TokenKind::Bracket);
    assert_eq!(first[1].kind, TokenKind::String);
    assert_eq!(first[1].value, "abc");
    assert_eq!(session.state(), LexState::Expr);

    let second = session.step("def>>x");
    assert_eq!(second[0].value, "def");
    assert_eq!(second[1].kind, TokenKind::Bracket);
    assert_eq!(second[2].kind, TokenKind::Unknown);
    assert_eq!(session.state(), LexState::Start);
}

#[test]
fn test_invalid_rule_pattern() {
    let error = Rule::new("broken", "(box", Classify::Whole(TokenKind::ObjectClass), false).unwrap_err();

    assert_eq!(error.get_error_name(), "InvalidPattern");
    assert!(matches!(error.kind(), ErrorImpl::InvalidPattern { rule: "broken", .. }));
}

#[test]
fn test_group_count_must_match_kinds() {
    let error = Rule::new(
        "pair",
        "(a)(b)",
        Classify::Groups(&[TokenKind::Variable]),
        false,
    )
    .unwrap_err();

    assert!(matches!(
        error.kind(),
        ErrorImpl::GroupMismatch { groups: 2, kinds: 1, .. }
    ));
}

#[test]
fn test_styles() {
    assert_eq!(TokenKind::ObjectClass.style(), Some("atom"));
    assert_eq!(TokenKind::Color.style(), Some("number"));
    assert_eq!(TokenKind::Variable.style(), Some("variable-2"));
    assert_eq!(TokenKind::Unknown.style(), None);
}
