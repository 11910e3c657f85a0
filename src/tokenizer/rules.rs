use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"^%%[^%]+%%").unwrap();
    static ref CAPITALIZED_WORD: Regex = Regex::new(r"^[A-Z][a-z]+").unwrap();
    static ref UPPERCASE_RUN: Regex = Regex::new(r"^[A-Z]+").unwrap();
    static ref DIGITS: Regex = Regex::new(r"^[0-9]+").unwrap();
    static ref UNDERSCORES: Regex = Regex::new(r"^_+").unwrap();
    static ref LOWER_WORD: Regex = Regex::new(r"^[A-Z]?[a-z]+").unwrap();
    static ref SINGLE_CAPITAL: Regex = Regex::new(r"^[A-Z]").unwrap();
}

const BOOL_KEYWORD: &str = "bool";

/// One alternative of the segmentation cascade.
///
/// At every position of the input the rules are tried in order and the
/// first one that matches consumes its segment. Casing rules only consider
/// ASCII letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SegmentRule {
    /// An escaped special case, `%%NaN%%`.
    Placeholder,
    /// `bool` as a whole word directly followed by `_` or a digit.
    BoolKeyword,
    /// `Foo`
    CapitalizedWord,
    /// `ID`, `URL`; gives back capitals until the run is not followed by a
    /// lowercase letter, so `HTTPServer` yields `HTTP`.
    Acronym,
    Digits,
    /// Consumed and dropped.
    Underscores,
    /// `foo` or `Foo`
    LowerWord,
    SingleCapital,
}

impl SegmentRule {
    /// Rule order of the current cascade.
    pub const CASCADE: [SegmentRule; 8] = [
        SegmentRule::Placeholder,
        SegmentRule::BoolKeyword,
        SegmentRule::CapitalizedWord,
        SegmentRule::Acronym,
        SegmentRule::Digits,
        SegmentRule::Underscores,
        SegmentRule::LowerWord,
        SegmentRule::SingleCapital,
    ];

    /// Rule order of the earlier word/acronym/digit policy. Used together
    /// with the acronym merge pass.
    pub const MERGE_ACRONYMS: [SegmentRule; 5] = [
        SegmentRule::Placeholder,
        SegmentRule::LowerWord,
        SegmentRule::Acronym,
        SegmentRule::Digits,
        SegmentRule::Underscores,
    ];

    /// Byte length of the segment this rule matches at `at`, if any.
    ///
    /// `at` must lie on a char boundary of `text`.
    pub fn match_len(&self, text: &str, at: usize) -> Option<usize> {
        let rest = &text[at..];
        match self {
            SegmentRule::Placeholder => leading(&PLACEHOLDER, rest),
            SegmentRule::BoolKeyword => bool_keyword(text, at),
            SegmentRule::CapitalizedWord => leading(&CAPITALIZED_WORD, rest),
            SegmentRule::Acronym => acronym(rest),
            SegmentRule::Digits => leading(&DIGITS, rest),
            SegmentRule::Underscores => leading(&UNDERSCORES, rest),
            SegmentRule::LowerWord => leading(&LOWER_WORD, rest),
            SegmentRule::SingleCapital => leading(&SINGLE_CAPITAL, rest),
        }
    }
}

fn leading(pattern: &Regex, rest: &str) -> Option<usize> {
    pattern.find(rest).map(|m| m.end())
}

fn acronym(rest: &str) -> Option<usize> {
    let greedy = leading(&UPPERCASE_RUN, rest)?;
    (1..=greedy)
        .rev()
        .find(|&len| !rest[len..].starts_with(|c: char| c.is_ascii_lowercase()))
}

fn bool_keyword(text: &str, at: usize) -> Option<usize> {
    let rest = &text[at..];
    if !rest.starts_with(BOOL_KEYWORD) {
        return None;
    }

    let starts_word = text[..at]
        .chars()
        .next_back()
        .map_or(true, |c| !c.is_ascii_alphabetic());
    let followed_by_suffix = rest[BOOL_KEYWORD.len()..]
        .starts_with(|c: char| c == '_' || c.is_ascii_digit());

    (starts_word && followed_by_suffix).then_some(BOOL_KEYWORD.len())
}
