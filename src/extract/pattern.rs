use regex::Regex;

/// Where a tag expression is allowed to match within a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// The match must begin at the first byte of the line.
    LineStart,
    /// The match may occur anywhere in the line.
    Anywhere,
}

/// A rule's start/end tag pair. Both expressions and the anchoring mode are
/// fixed when the rule is built and cannot be changed afterwards.
#[derive(Debug, Clone)]
pub struct Pattern {
    start: Regex,
    end: Option<Regex>,
    anchor: Anchor,
}

impl Pattern {
    /// A region bounded by a start tag line and an end tag line. Tags are
    /// anchored to the beginning of the line; see [`Pattern::anywhere`].
    pub fn delimited(start: &str, end: &str) -> Pattern {
        Pattern {
            start: compile(start),
            end: Some(compile(end)),
            anchor: Anchor::LineStart,
        }
    }

    /// A region that is exactly the one line matching the start tag.
    pub fn single(start: &str) -> Pattern {
        Pattern {
            start: compile(start),
            end: None,
            anchor: Anchor::LineStart,
        }
    }

    /// Allow the tags to match anywhere in a line instead of only at its
    /// beginning.
    pub fn anywhere(mut self) -> Pattern {
        self.anchor = Anchor::Anywhere;
        self
    }

    pub fn matches_start(&self, line: &str) -> bool {
        hit(&self.start, self.anchor, line)
    }

    /// Whether the line closes the region. Panics if this pattern has no
    /// end tag: a one-line region has no notion of ending, and asking is a
    /// programming error, not an input condition.
    pub fn matches_end(&self, line: &str) -> bool {
        let end = self
            .end
            .as_ref()
            .expect("end tag tested on a single-line pattern");
        hit(end, self.anchor, line)
    }

    pub fn has_end(&self) -> bool {
        self.end
            .is_some()
    }
}

fn hit(regex: &Regex, anchor: Anchor, line: &str) -> bool {
    match anchor {
        // The leftmost match starts at offset 0 exactly when a match
        // anchored to the beginning of the line exists.
        Anchor::LineStart => regex
            .find(line)
            .is_some_and(|m| m.start() == 0),
        Anchor::Anywhere => regex.is_match(line),
    }
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid tag pattern {:?}: {}", pattern, e))
}
