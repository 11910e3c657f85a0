use aho_corasick::{AhoCorasick, MatchKind};

/// Literals that must come out of the tokenizer as single words even though
/// they break the casing rules.
pub const DEFAULT_SPECIAL_CASES: [&str; 2] = ["NaN", "OwO"];

const DELIMITER: &str = "%%";

/// Escape table for special-case literals.
///
/// Each literal is swapped for `%%literal%%` before segmentation and swapped
/// back afterwards. Escaping is a single leftmost-longest pass, so one
/// literal never rewrites the placeholder of another: with `OwO` and `O` in
/// the table, `OwOify` escapes `OwO` as a whole.
#[derive(Debug, Clone)]
pub struct SpecialCases {
    literals: Vec<String>,
    matcher: Option<AhoCorasick>,
}

impl PartialEq for SpecialCases {
    fn eq(&self, other: &Self) -> bool {
        self.literals == other.literals
    }
}

impl Eq for SpecialCases {}

impl Default for SpecialCases {
    fn default() -> Self {
        Self::new(DEFAULT_SPECIAL_CASES)
    }
}

impl SpecialCases {
    /// Build a table, dropping literals that could not round-trip through
    /// a placeholder.
    pub fn new<I, S>(literals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut kept: Vec<String> = Vec::new();
        for literal in literals {
            let literal: String = literal.into();
            if literal.is_empty() || literal.contains('%') || literal.contains('_') {
                tracing::warn!(literal = %literal, "ignoring unusable special case");
            } else if !kept.contains(&literal) {
                kept.push(literal);
            }
        }

        let matcher = if kept.is_empty() {
            None
        } else {
            match AhoCorasick::builder()
                .match_kind(MatchKind::LeftmostLongest)
                .build(&kept)
            {
                Ok(matcher) => Some(matcher),
                Err(err) => {
                    tracing::warn!(error = %err, "special cases disabled");
                    kept.clear();
                    None
                }
            }
        };

        Self {
            literals: kept,
            matcher,
        }
    }

    pub fn none() -> Self {
        Self {
            literals: Vec::new(),
            matcher: None,
        }
    }

    pub fn literals(&self) -> &[String] {
        &self.literals
    }

    pub fn escape(&self, name: &str) -> String {
        let Some(matcher) = &self.matcher else {
            return name.to_string();
        };

        let mut escaped = String::with_capacity(name.len());
        let mut last = 0;
        for found in matcher.find_iter(name) {
            escaped.push_str(&name[last..found.start()]);
            escaped.push_str(&placeholder(&self.literals[found.pattern().as_usize()]));
            last = found.end();
        }
        escaped.push_str(&name[last..]);
        escaped
    }

    /// The literal behind a placeholder word; any other word is returned as is.
    pub fn restore(&self, word: &str) -> String {
        word.strip_prefix(DELIMITER)
            .and_then(|inner| inner.strip_suffix(DELIMITER))
            .and_then(|inner| self.literals.iter().find(|literal| literal.as_str() == inner))
            .cloned()
            .unwrap_or_else(|| word.to_string())
    }
}

fn placeholder(literal: &str) -> String {
    format!("{DELIMITER}{literal}{DELIMITER}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_and_restore() {
        let cases = SpecialCases::default();
        let escaped = cases.escape("IsNaN");
        assert_eq!(escaped, "Is%%NaN%%");
        assert_eq!(cases.restore("%%NaN%%"), "NaN");
        assert_eq!(cases.restore("Is"), "Is");
        assert_eq!(cases.restore("%%Unknown%%"), "%%Unknown%%");
    }

    #[test]
    fn test_every_occurrence_is_escaped() {
        let cases = SpecialCases::default();
        assert_eq!(cases.escape("NaNOwONaN"), "%%NaN%%%%OwO%%%%NaN%%");
    }

    #[test]
    fn test_overlapping_literals_do_not_rewrite_placeholders() {
        let cases = SpecialCases::new(["NaN", "a"]);
        assert_eq!(cases.escape("IsNaN"), "Is%%NaN%%");
        assert_eq!(cases.escape("Lerp"), "Lerp");
        assert_eq!(cases.escape("Max"), "M%%a%%x");

        let cases = SpecialCases::new(["O", "OwO"]);
        assert_eq!(cases.escape("OwOify"), "%%OwO%%ify");
        assert_eq!(cases.escape("ToOwO"), "To%%OwO%%");
        assert_eq!(cases.escape("OO"), "%%O%%%%O%%");
    }

    #[test]
    fn test_unusable_literals_are_dropped() {
        let cases = SpecialCases::new(["", "50%", "snake_case", "iOS", "iOS"]);
        assert_eq!(cases.literals(), &["iOS".to_string()]);
        assert_eq!(SpecialCases::new(Vec::<String>::new()).escape("NaN"), "NaN");
    }
}
