use std::mem;
use std::rc::Rc;

use serde_json::Value;
use tracing::debug;

use super::cursor::CursorHandle;
use super::error::ExtractError;
use super::pattern::Pattern;

/// One pull from a rule's bounded iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// A line belonging to the region.
    Line(String),
    /// The end tag matched and the region is over. The end line itself was
    /// consumed, handed to [`Rule::on_end`], and is never yielded.
    End,
}

/// A restartable unit that recognizes one tag-delimited region of lines
/// and extracts data from it.
///
/// A rule's life over one parse: constructed, attached to the shared
/// cursor, entered once a caller has seen its start tag, then reset. Reset
/// returns the accumulated result, clears state, and detaches the cursor,
/// so the same instance can serve a later region or a later parse. A rule
/// must never be attached to two cursors at once; trees are meant to be
/// used by one parse at a time.
pub trait Rule {
    /// Identifier used in trace output and error messages.
    fn name(&self) -> &str;

    fn pattern(&self) -> &Pattern;

    /// The cursor this rule is currently attached to, if any.
    fn cursor(&self) -> Option<&CursorHandle>;

    /// Attach the shared cursor for one parse, replacing any previous
    /// attachment. Composite rules propagate the handle to every child, in
    /// declaration order.
    fn attach(&mut self, cursor: &CursorHandle);

    /// Consume this rule's region. Callers must already have checked that
    /// `start_line` matches the start tag, and must pass that line in.
    fn enter(&mut self, start_line: &str) -> Result<(), ExtractError>;

    /// Return the accumulated result and restore the rule to idle. Calling
    /// this again without an intervening region yields the empty or
    /// default shape, never an error.
    fn reset(&mut self) -> Value;

    /// Called once with the line that matched the end tag, before `step`
    /// reports the region as over. For data that is only visible on the
    /// end line.
    fn on_end(&mut self, _end_line: &str) {}

    fn matches_start(&self, line: &str) -> bool {
        let hit = self
            .pattern()
            .matches_start(line);
        if hit {
            debug!(rule = self.name(), line, "start tag matched");
        }
        hit
    }

    fn matches_end(&self, line: &str) -> bool {
        let hit = self
            .pattern()
            .matches_end(line);
        if hit {
            debug!(rule = self.name(), line, "end tag matched");
        }
        hit
    }

    /// Pull the next line of this rule's region. Three outcomes: the line
    /// itself, `End` once the end tag is seen, or the exhaustion error if
    /// the input ran out before the region was closed. The verdict is
    /// decided on the line just pulled; there is no lookahead.
    fn step(&mut self) -> Result<Step, ExtractError> {
        let handle = Rc::clone(
            self.cursor()
                .expect("rule used before being attached to a cursor"),
        );
        let line = handle
            .borrow_mut()
            .next_line();
        match line {
            None => Err(ExtractError::UnexpectedEndOfInput {
                rule: self
                    .name()
                    .to_owned(),
                line: handle
                    .borrow()
                    .position(),
            }),
            Some(line) => {
                if self.matches_end(&line) {
                    self.on_end(&line);
                    Ok(Step::End)
                } else {
                    Ok(Step::Line(line))
                }
            }
        }
    }

    /// Advance past n lines of the region without inspecting them. Fails
    /// with the exhaustion error, leaving the cursor where it was, if
    /// fewer than n lines remain.
    fn skip(&mut self, n: usize) -> Result<(), ExtractError> {
        let handle = Rc::clone(
            self.cursor()
                .expect("rule used before being attached to a cursor"),
        );
        let mut cursor = handle.borrow_mut();
        if cursor.advance(n) {
            Ok(())
        } else {
            Err(ExtractError::UnexpectedEndOfInput {
                rule: self
                    .name()
                    .to_owned(),
                line: cursor.position(),
            })
        }
    }

    /// A [`ExtractError::Malformed`] carrying this rule's name.
    fn malformed(&self, details: String) -> ExtractError {
        ExtractError::malformed(self.name(), details)
    }
}

/// Extraction function applied by a [`SingleLineRule`] to each line it
/// matches. The error side is the human-readable detail; the rule wraps it
/// with its own name.
pub type Extract = fn(&str) -> Result<Value, String>;

/// A rule whose region is exactly the one line that matched its start tag.
/// Results accumulate in an ordered list across repeated matches within
/// the parent's region.
#[derive(Debug)]
pub struct SingleLineRule {
    name: &'static str,
    pattern: Pattern,
    cursor: Option<CursorHandle>,
    extract: Extract,
    values: Vec<Value>,
}

impl SingleLineRule {
    pub fn new(name: &'static str, pattern: Pattern, extract: Extract) -> SingleLineRule {
        assert!(
            !pattern.has_end(),
            "single-line rules take a pattern with no end tag"
        );
        SingleLineRule {
            name,
            pattern,
            cursor: None,
            extract,
            values: Vec::new(),
        }
    }
}

impl Rule for SingleLineRule {
    fn name(&self) -> &str {
        self.name
    }

    fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    fn cursor(&self) -> Option<&CursorHandle> {
        self.cursor
            .as_ref()
    }

    fn attach(&mut self, cursor: &CursorHandle) {
        self.cursor = Some(Rc::clone(cursor));
    }

    fn enter(&mut self, start_line: &str) -> Result<(), ExtractError> {
        let value =
            (self.extract)(start_line).map_err(|details| self.malformed(details))?;
        self.values
            .push(value);
        Ok(())
    }

    fn reset(&mut self) -> Value {
        self.cursor = None;
        Value::Array(mem::take(&mut self.values))
    }
}
