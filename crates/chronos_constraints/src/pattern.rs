//! Port-name patterns used by path exceptions.
//!
//! A pattern is an exact port name, a glob (`*` matches any run of
//! characters, `?` exactly one), or either of those followed by a bit-select
//! (`dout[*]`, `dout[3]`). A bit-select only matches vectored ports, and an
//! index only matches when it is below the port width.

use crate::error::ConstraintError;
use crate::model::{name_problem, Port};
use regex_lite::Regex;

/// A parsed, ready-to-match port pattern.
#[derive(Debug, Clone)]
pub struct PortPattern {
    text: String,
    name: NameMatcher,
    bits: Option<BitSelect>,
}

#[derive(Debug, Clone)]
enum NameMatcher {
    Exact(String),
    Glob(Regex),
}

/// The bit-select suffix of a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitSelect {
    /// `[*]`: every bit of a vectored port.
    All,
    /// `[i]`: a single bit.
    Index(u32),
}

impl PortPattern {
    /// Parses a pattern.
    pub fn parse(text: &str) -> Result<Self, ConstraintError> {
        let invalid = |reason: &str| ConstraintError::InvalidPattern {
            pattern: text.to_string(),
            reason: reason.to_string(),
        };

        if text.is_empty() {
            return Err(invalid("pattern is empty"));
        }
        if text.chars().any(char::is_whitespace) {
            return Err(invalid("pattern contains whitespace"));
        }

        let (base, bits) = match text.find('[') {
            Some(open) => {
                let Some(inner) = text[open + 1..].strip_suffix(']') else {
                    return Err(invalid("bit-select must end with `]`"));
                };
                let bits = match inner {
                    "*" => BitSelect::All,
                    digits => digits
                        .parse::<u32>()
                        .map(BitSelect::Index)
                        .map_err(|_| invalid("bit-select must be `*` or a bit index"))?,
                };
                (&text[..open], Some(bits))
            }
            None => (text, None),
        };

        if base.is_empty() {
            return Err(invalid("pattern has no port name"));
        }
        if base.contains(']') {
            return Err(invalid("unbalanced `]`"));
        }
        if let Some(reason) = name_problem(base) {
            return Err(invalid(&reason));
        }

        let name = if base.contains(['*', '?']) {
            NameMatcher::Glob(compile_glob(base).map_err(|e| invalid(&e.to_string()))?)
        } else {
            NameMatcher::Exact(base.to_string())
        };

        Ok(Self {
            text: text.to_string(),
            name,
            bits,
        })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns `true` if the name part contains wildcards.
    pub fn is_wildcard(&self) -> bool {
        matches!(self.name, NameMatcher::Glob(_))
    }

    /// The bit-select suffix, if any.
    pub fn bit_select(&self) -> Option<BitSelect> {
        self.bits
    }

    /// Tests the pattern against a port and its resolved name.
    pub fn matches(&self, port: &Port, name: &str) -> bool {
        let name_matches = match &self.name {
            NameMatcher::Exact(exact) => exact == name,
            NameMatcher::Glob(re) => re.is_match(name),
        };
        name_matches
            && match self.bits {
                None => true,
                Some(BitSelect::All) => port.width.is_some(),
                Some(BitSelect::Index(bit)) => port.width.is_some_and(|w| bit < w),
            }
    }
}

impl std::fmt::Display for PortPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Translates a glob into an anchored regex, escaping everything else.
fn compile_glob(glob: &str) -> Result<Regex, regex_lite::Error> {
    let mut re = String::with_capacity(glob.len() + 8);
    re.push('^');
    let mut literal = String::new();
    for ch in glob.chars() {
        match ch {
            '*' | '?' => {
                re.push_str(&regex_lite::escape(&literal));
                literal.clear();
                re.push_str(if ch == '*' { ".*" } else { "." });
            }
            _ => literal.push(ch),
        }
    }
    re.push_str(&regex_lite::escape(&literal));
    re.push('$');
    Regex::new(&re)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Direction;
    use chronos_common::Ident;

    fn port(width: Option<u32>) -> Port {
        Port {
            name: Ident::from_raw(0),
            direction: Direction::Output,
            width,
        }
    }

    #[test]
    fn exact_name() {
        let p = PortPattern::parse("dout").unwrap();
        assert!(!p.is_wildcard());
        assert!(p.matches(&port(Some(16)), "dout"));
        assert!(!p.matches(&port(None), "dout_valid"));
    }

    #[test]
    fn trailing_star_matches_prefix_family() {
        let p = PortPattern::parse("dout*").unwrap();
        assert!(p.is_wildcard());
        assert!(p.matches(&port(Some(16)), "dout"));
        assert!(p.matches(&port(None), "dout_valid"));
        assert!(!p.matches(&port(None), "en"));
    }

    #[test]
    fn question_mark_matches_one_char() {
        let p = PortPattern::parse("P???_REG").unwrap();
        assert!(p.matches(&port(Some(32)), "PINC_REG"));
        assert!(p.matches(&port(Some(32)), "POFF_REG"));
        assert!(!p.matches(&port(Some(32)), "PHASE_REG"));
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let p = PortPattern::parse("a.b*").unwrap();
        assert!(p.matches(&port(None), "a.b_x"));
        assert!(!p.matches(&port(None), "axb_x"));
    }

    #[test]
    fn bit_select_all_needs_vectored_port() {
        let p = PortPattern::parse("dout[*]").unwrap();
        assert_eq!(p.bit_select(), Some(BitSelect::All));
        assert!(p.matches(&port(Some(16)), "dout"));
        assert!(!p.matches(&port(None), "dout"));
    }

    #[test]
    fn bit_index_respects_width() {
        let p = PortPattern::parse("dout[15]").unwrap();
        assert!(p.matches(&port(Some(16)), "dout"));
        assert!(!p.matches(&port(Some(8)), "dout"));
    }

    #[test]
    fn malformed_patterns() {
        let texts = [
            "", "dout[", "dout[x]", "[3]", "dout]", "a b", "dout[1]x", "{dout}*", "d$*", "x;y",
        ];
        for text in texts {
            let err = PortPattern::parse(text).unwrap_err();
            assert!(
                matches!(err, ConstraintError::InvalidPattern { .. }),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn display_is_original_text() {
        let p = PortPattern::parse("dout[*]").unwrap();
        assert_eq!(p.to_string(), "dout[*]");
        assert_eq!(p.as_str(), "dout[*]");
    }
}
