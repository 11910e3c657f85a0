//! Word segmentation of ProtoFlux display names.
//!
//! A display name such as `ValueEquals<T>`, `HTTPServer` or `IsNaN` is split
//! into the words a person would read: generic markup is dropped, special
//! case literals survive whole, and the remainder is cut by an ordered
//! cascade of [`SegmentRule`]s.

pub mod rules;
pub mod special_cases;

pub use rules::SegmentRule;
pub use special_cases::SpecialCases;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Splits a display name into words. Implementations must be deterministic.
pub trait Tokenizer {
    fn words(&self, display_name: &str) -> Vec<String>;
}

/// Selects one of the built-in segmentation policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenizerPolicy {
    /// Full rule cascade, acronyms kept as separate words.
    #[default]
    Cascade,
    /// Smaller rule set; an all-uppercase word is glued onto the word before it.
    MergeAcronyms,
}

impl FromStr for TokenizerPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cascade" => Ok(TokenizerPolicy::Cascade),
            "merge-acronyms" => Ok(TokenizerPolicy::MergeAcronyms),
            _ => Err(format!("Unknown tokenizer policy: {}", s)),
        }
    }
}

impl fmt::Display for TokenizerPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenizerPolicy::Cascade => write!(f, "cascade"),
            TokenizerPolicy::MergeAcronyms => write!(f, "merge-acronyms"),
        }
    }
}

/// Rule-table driven tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleCascade {
    special_cases: SpecialCases,
    rules: Vec<SegmentRule>,
    merge_acronyms: bool,
}

impl Default for RuleCascade {
    fn default() -> Self {
        Self::new(SpecialCases::default(), SegmentRule::CASCADE.to_vec())
    }
}

impl RuleCascade {
    pub fn new(special_cases: SpecialCases, rules: Vec<SegmentRule>) -> Self {
        Self {
            special_cases,
            rules,
            merge_acronyms: false,
        }
    }

    /// The earlier policy: fewer rules plus the acronym merge pass.
    pub fn merge_acronyms() -> Self {
        Self::for_policy(TokenizerPolicy::MergeAcronyms, SpecialCases::default())
    }

    pub fn for_policy(policy: TokenizerPolicy, special_cases: SpecialCases) -> Self {
        match policy {
            TokenizerPolicy::Cascade => Self::new(special_cases, SegmentRule::CASCADE.to_vec()),
            TokenizerPolicy::MergeAcronyms => {
                Self::new(special_cases, SegmentRule::MERGE_ACRONYMS.to_vec())
                    .with_acronym_merge(true)
            }
        }
    }

    /// Swap the rule order, keeping special cases and the merge pass.
    pub fn with_rules(mut self, rules: Vec<SegmentRule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_acronym_merge(mut self, enabled: bool) -> Self {
        self.merge_acronyms = enabled;
        self
    }

    pub fn rules(&self) -> &[SegmentRule] {
        &self.rules
    }

    pub fn special_cases(&self) -> &SpecialCases {
        &self.special_cases
    }

    /// Raw segments of an already escaped name, underscores included.
    /// Characters no rule accepts are skipped.
    pub fn segments<'a>(&self, escaped: &'a str) -> Vec<&'a str> {
        let mut segments = Vec::new();
        let mut pos = 0;

        while pos < escaped.len() {
            let matched = self
                .rules
                .iter()
                .find_map(|rule| rule.match_len(escaped, pos))
                .filter(|&len| len > 0);

            match matched {
                Some(len) => {
                    segments.push(&escaped[pos..pos + len]);
                    pos += len;
                }
                None => {
                    pos += escaped[pos..].chars().next().map_or(1, char::len_utf8);
                }
            }
        }

        segments
    }
}

impl Tokenizer for RuleCascade {
    fn words(&self, display_name: &str) -> Vec<String> {
        let escaped = self.special_cases.escape(strip_generic_markup(display_name));

        let words: Vec<String> = self
            .segments(&escaped)
            .into_iter()
            .map(|segment| self.special_cases.restore(&segment.replace('_', "")))
            .filter(|word| !word.is_empty())
            .collect();

        if self.merge_acronyms {
            merge_acronym_words(words)
        } else {
            words
        }
    }
}

/// Everything before the first `<`.
pub fn strip_generic_markup(display_name: &str) -> &str {
    display_name
        .split_once('<')
        .map_or(display_name, |(name, _)| name)
}

fn merge_acronym_words(words: Vec<String>) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(words.len());

    for word in words {
        if word.chars().all(|c| c.is_ascii_uppercase()) {
            let previous = merged
                .last_mut()
                .filter(|previous| previous.chars().all(|c| c.is_ascii_alphabetic()));
            if let Some(previous) = previous {
                previous.push_str(&word);
                continue;
            }
        }
        merged.push(word);
    }

    merged
}
