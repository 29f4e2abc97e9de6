//! Path patterns for subscriptions and request routing.
//!
//! Paths are `/`-separated. A pattern segment may be:
//! - a literal (`feed`, `card`)
//! - `+`, matching exactly one segment
//! - `#`, only as the last segment, matching zero or more remaining segments
//!
//! `feed/+/card` matches `feed/f1/card`; `header/#` matches `header/state`
//! and `header/search/result`; `#` matches every path.

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    One,
    Rest,
}

/// A parsed path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    raw: String,
    segments: Vec<Segment>,
}

impl Pattern {
    /// Parse a pattern. A `#` that is not the last segment is treated
    /// as a literal.
    pub fn parse(pattern: &str) -> Self {
        let parts: Vec<&str> = pattern.split('/').collect();
        let last = parts.len().saturating_sub(1);
        let segments = parts
            .iter()
            .enumerate()
            .map(|(i, part)| match *part {
                "+" => Segment::One,
                "#" if i == last => Segment::Rest,
                lit => Segment::Literal(lit.to_string()),
            })
            .collect();
        Self {
            raw: pattern.to_string(),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// True when the pattern contains no wildcards.
    pub fn is_exact(&self) -> bool {
        self.segments
            .iter()
            .all(|s| matches!(s, Segment::Literal(_)))
    }

    /// Check a concrete path against this pattern.
    pub fn matches(&self, path: &str) -> bool {
        let mut parts = path.split('/');
        for segment in &self.segments {
            match segment {
                Segment::Rest => return true,
                Segment::One => {
                    if parts.next().is_none() {
                        return false;
                    }
                }
                Segment::Literal(lit) => match parts.next() {
                    Some(part) if part == lit => {}
                    _ => return false,
                },
            }
        }
        parts.next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match() {
        let p = Pattern::parse("header/state");
        assert!(p.is_exact());
        assert!(p.matches("header/state"));
        assert!(!p.matches("header/state/extra"));
        assert!(!p.matches("header"));
        assert!(!p.matches("header/search"));
    }

    #[test]
    fn single_level_wildcard() {
        let p = Pattern::parse("feed/+/card");
        assert!(!p.is_exact());
        assert!(p.matches("feed/f1/card"));
        assert!(p.matches("feed/f2/card"));
        assert!(!p.matches("feed/f1/comments"));
        assert!(!p.matches("feed/card"));
        assert!(!p.matches("feed/a/b/card"));
    }

    #[test]
    fn trailing_wildcard() {
        let p = Pattern::parse("header/#");
        assert!(p.matches("header/state"));
        assert!(p.matches("header/search/result"));
        // `#` also matches zero remaining levels.
        assert!(p.matches("header"));
        assert!(!p.matches("headers/state"));
    }

    #[test]
    fn root_wildcard_matches_everything() {
        let p = Pattern::parse("#");
        assert!(p.matches("app/route"));
        assert!(p.matches("feed/f1/card"));
        assert!(p.matches("toast"));
    }

    #[test]
    fn hash_in_middle_is_literal() {
        let p = Pattern::parse("a/#/b");
        assert!(p.matches("a/#/b"));
        assert!(!p.matches("a/x/b"));
    }

    #[test]
    fn keeps_raw_text() {
        assert_eq!(Pattern::parse("feed/+/card").as_str(), "feed/+/card");
    }
}
