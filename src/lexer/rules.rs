use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;

use crate::{
    errors::errors::{Error, ErrorImpl},
    MK_RULE,
};

use super::tokens::TokenKind;

lazy_static! {
    /// The pikchr grammar, compiled once and shared by every session.
    pub static ref PIKCHR: Grammar = Grammar::pikchr().expect("built-in pikchr grammar compiles");
}

/// Characters that may follow a bounded keyword. They are never consumed.
pub const BOUNDARY: &str = r"[\s.,;:\\()\[\]{}]";

pub const UNITS: &str = "in|cm|px|pt|pc|mm";

/// CSS extended color names plus pikchr's `None` and `Off`.
pub const COLOR_NAMES: &[&str] = &[
    "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black",
    "blanchedalmond", "blue", "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse",
    "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson", "cyan", "darkblue",
    "darkcyan", "darkgoldenrod", "darkgray", "darkgreen", "darkgrey", "darkkhaki",
    "darkmagenta", "darkolivegreen", "darkorange", "darkorchid", "darkred", "darksalmon",
    "darkseagreen", "darkslateblue", "darkslategray", "darkslategrey", "darkturquoise",
    "darkviolet", "deeppink", "deepskyblue", "dimgray", "dimgrey", "dodgerblue", "firebrick",
    "floralwhite", "forestgreen", "fuchsia", "gainsboro", "ghostwhite", "gold", "goldenrod",
    "gray", "green", "greenyellow", "grey", "honeydew", "hotpink", "indianred", "indigo",
    "ivory", "khaki", "lavender", "lavenderblush", "lawngreen", "lemonchiffon", "lightblue",
    "lightcoral", "lightcyan", "lightgoldenrodyellow", "lightgray", "lightgreen", "lightgrey",
    "lightpink", "lightsalmon", "lightseagreen", "lightskyblue", "lightslategray",
    "lightslategrey", "lightsteelblue", "lightyellow", "lime", "limegreen", "linen", "magenta",
    "maroon", "mediumaquamarine", "mediumblue", "mediumorchid", "mediumpurple",
    "mediumseagreen", "mediumslateblue", "mediumspringgreen", "mediumturquoise",
    "mediumvioletred", "midnightblue", "mintcream", "mistyrose", "moccasin", "navajowhite",
    "navy", "none", "off", "oldlace", "olive", "olivedrab", "orange", "orangered", "orchid",
    "palegoldenrod", "palegreen", "paleturquoise", "palevioletred", "papayawhip", "peachpuff",
    "peru", "pink", "plum", "powderblue", "purple", "rebeccapurple", "red", "rosybrown",
    "royalblue", "saddlebrown", "salmon", "sandybrown", "seagreen", "seashell", "sienna",
    "silver", "skyblue", "slateblue", "slategray", "slategrey", "snow", "springgreen",
    "steelblue", "tan", "teal", "thistle", "tomato", "turquoise", "violet", "wheat", "white",
    "whitesmoke", "yellow", "yellowgreen",
];

/// Named numeric settings of the pikchr runtime.
pub const BUILTIN_NAMES: &[&str] = &[
    "arcrad", "arrowhead", "arrowht", "arrowwid", "boxht", "boxrad", "boxwid", "charht",
    "charwid", "circlerad", "cylht", "cylrad", "cylwid", "dashwid", "diamondht", "diamondwid",
    "dotrad", "ellipseht", "ellipsewid", "fileht", "filerad", "filewid", "fontscale", "layer",
    "lineht", "linerad", "linewid", "margin", "leftmargin", "rightmargin", "topmargin",
    "bottommargin", "movewid", "ovalht", "ovalwid", "scale", "textht", "textwid",
];

/// Lexer states. Only `Start` carries rules; the rest are reserved.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Default, Serialize)]
pub enum LexState {
    #[default]
    Start,
    Comment,
    Attribute,
    Expr,
    Object,
    Place,
    Position,
    Statement,
}

impl LexState {
    pub const ALL: [LexState; 8] = [
        LexState::Start,
        LexState::Comment,
        LexState::Attribute,
        LexState::Expr,
        LexState::Object,
        LexState::Place,
        LexState::Position,
        LexState::Statement,
    ];
}

/// How a rule's match is turned into tokens.
#[derive(Debug, Clone, Copy)]
pub enum Classify {
    /// The whole match is one token.
    Whole(TokenKind),
    /// One token per capture group of the rule body, in order.
    Groups(&'static [TokenKind]),
}

/// A piece of a rule match: kind plus byte range relative to the match start.
pub type Piece = (TokenKind, usize, usize);

#[derive(Debug, Clone)]
pub struct Rule {
    name: &'static str,
    regex: Regex,
    classify: Classify,
    next: Option<LexState>,
}

impl Rule {
    /// Compiles `body` anchored at the lexer position.
    ///
    /// The body is wrapped as group 1. A bounded rule additionally requires
    /// end of input or a `BOUNDARY` character after group 1; that character
    /// is matched but the token ends at group 1.
    pub fn new(name: &'static str, body: &str, classify: Classify, bounded: bool) -> Result<Rule, Error> {
        let pattern = if bounded {
            format!("^({})(?:$|{})", body, BOUNDARY)
        } else {
            format!("^({})", body)
        };

        let regex = Regex::new(&pattern)
            .map_err(|source| Error::new(ErrorImpl::InvalidPattern { rule: name, source }))?;

        if let Classify::Groups(kinds) = classify {
            let groups = regex.captures_len() - 2;
            if groups != kinds.len() {
                return Err(Error::new(ErrorImpl::GroupMismatch {
                    rule: name,
                    groups,
                    kinds: kinds.len(),
                }));
            }
        }

        Ok(Rule {
            name,
            regex,
            classify,
            next: None,
        })
    }

    /// Switches the lexer to `state` after this rule matches.
    pub fn then(mut self, state: LexState) -> Rule {
        self.next = Some(state);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn next_state(&self) -> Option<LexState> {
        self.next
    }

    /// Matches at the start of `text`.
    ///
    /// Returns the consumed length and the classified pieces, or `None` if
    /// the rule does not match or would consume nothing.
    pub fn match_at(&self, text: &str) -> Option<(usize, Vec<Piece>)> {
        let captures = self.regex.captures(text)?;
        let body = captures.get(1)?;

        if body.end() == 0 {
            return None;
        }

        let pieces = match self.classify {
            Classify::Whole(kind) => vec![(kind, 0, body.end())],
            Classify::Groups(kinds) => kinds
                .iter()
                .enumerate()
                .filter_map(|(index, kind)| {
                    captures
                        .get(index + 2)
                        .filter(|group| !group.is_empty())
                        .map(|group| (*kind, group.start(), group.end()))
                })
                .collect(),
        };

        Some((body.end(), pieces))
    }
}

/// Ordered rule lists per lexer state.
#[derive(Debug, Clone, Default)]
pub struct Grammar {
    states: HashMap<LexState, Vec<Rule>>,
}

impl Grammar {
    pub fn new() -> Self {
        Grammar::default()
    }

    pub fn with_state(mut self, state: LexState, rules: Vec<Rule>) -> Self {
        self.states.insert(state, rules);
        self
    }

    /// Rules for `state`, empty for reserved states.
    pub fn rules(&self, state: LexState) -> &[Rule] {
        self.states.get(&state).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn pikchr() -> Result<Grammar, Error> {
        Ok(Grammar::new().with_state(LexState::Start, start_rules()?))
    }
}

fn start_rules() -> Result<Vec<Rule>, Error> {
    let colors = format!("(?i:{})", COLOR_NAMES.join("|"));
    let builtins = BUILTIN_NAMES.join("|");
    let number = format!(r"\d+(?:\.\d*)?(?:{})?", UNITS);

    Ok(vec![
        MK_RULE!("whitespace", r"\s+", TokenKind::Whitespace),
        MK_RULE!("comment", r"#.*", TokenKind::Comment),
        // multi-word phrases before any of their single words
        MK_RULE!(
            bounded "phrase",
            "same +as|until +even +with|even +with|of +the +way +between",
            TokenKind::Attribute
        ),
        MK_RULE!("arrow", "<->|->|<-|↔|→|←", TokenKind::Attribute),
        MK_RULE!("operator", r"\+=|-=|\*=|/=|=|\+|-|\*|/|%", TokenKind::Operator),
        MK_RULE!(bounded "function", "abs|cos|dist|int|max|min|sin|sqrt", TokenKind::Operator),
        MK_RULE!("bracket", r"[\[\](){}]", TokenKind::Bracket),
        Rule::new(
            "define",
            r"(define)([ \t]+)([$@A-Za-z_][A-Za-z0-9_]*)",
            Classify::Groups(&[TokenKind::Meta, TokenKind::Whitespace, TokenKind::Definition]),
            true,
        )?,
        MK_RULE!(bounded "meta", "define|print|assert", TokenKind::Meta),
        MK_RULE!(bounded "ordinal", r"first|last|previous|\d+(?:st|nd|rd|th)", TokenKind::Keyword),
        MK_RULE!(
            bounded "which_way",
            "above|below|heading|(?:right|left|n|north|ne|e|east|se|s|south|sw|w|west|nw) +of",
            TokenKind::Attribute
        ),
        MK_RULE!(bounded "place", "vertex|of|in", TokenKind::Keyword),
        MK_RULE!(bounded "connective", "way +between|between|and", TokenKind::Attribute),
        MK_RULE!(
            bounded "edge",
            r"\.?(?:n|north|t|top|ne|e|east|right|se|s|south|bot|bottom|sw|w|west|left|nw|c|center|start|end)",
            TokenKind::Qualifier
        ),
        // bare right/left are edge names, so only up/down remain
        MK_RULE!(bounded "direction", "up|down", TokenKind::Direction),
        MK_RULE!("punctuation", r"[;,\\.:]", TokenKind::Punctuation),
        MK_RULE!(
            bounded "style",
            "same|dashed|dotted|color|fill|behind|cw|ccw|invis|invisible|thick|thin|solid|chop|fit",
            TokenKind::Attribute
        ),
        MK_RULE!(bounded "color", colors, TokenKind::Color),
        MK_RULE!(
            bounded "numeric_property",
            "diameter|ht|height|rad|radius|thickness|width|wid",
            TokenKind::Property
        ),
        MK_RULE!(
            bounded "text_attribute",
            "aligned|big|bold|center|italic|ljust|rjust|small|mono|monospace",
            TokenKind::Attribute
        ),
        MK_RULE!(bounded "path", "from|to|then|go|close|at|with|until", TokenKind::Keyword),
        MK_RULE!("string", r#""(?:[^"\\\n]|\\.)*""#, TokenKind::String),
        MK_RULE!(bounded "hex_color", "0x[0-9A-Fa-f]{6}", TokenKind::Color),
        MK_RULE!("number", number, TokenKind::Number),
        MK_RULE!(
            bounded "object_class",
            "arc|arrow|box|circle|cylinder|diamond|dot|ellipse|file|line|move|oval|spline|text",
            TokenKind::ObjectClass
        ),
        MK_RULE!(bounded "builtin", builtins, TokenKind::Builtin),
        MK_RULE!("variable", "[$@a-z][A-Za-z0-9_]*", TokenKind::Variable),
        MK_RULE!("label", "[A-Z][A-Za-z0-9_]*", TokenKind::Label),
    ])
}
