use serde_json::Value;
use tracing::debug;

use super::cursor::LineCursor;
use super::error::ExtractError;
use super::rule::Rule;

/// Drives a root rule over raw text.
///
/// The parser owns its root rule between feeds. Feeding the same parser
/// again is fine: attaching replaces the previous cursor and the reset at
/// the end of each feed leaves every rule idle. What is not supported is
/// sharing one rule tree between two in-flight parses; the tree holds the
/// state of exactly one region at a time.
pub struct Parser<R: Rule> {
    root: R,
}

impl<R: Rule> Parser<R> {
    pub fn new(root: R) -> Parser<R> {
        Parser { root }
    }

    /// Feed newline-separated text through the root rule.
    pub fn feed(&mut self, text: &str) -> Result<Option<Value>, ExtractError> {
        self.feed_delimited(text, "\n")
    }

    /// Split the text on an arbitrary delimiter and scan forward for the
    /// first line matching the root rule's start tag. That region is
    /// delegated to the root and its result returned; the scan does not
    /// resume afterwards, so only the first completed region is reported.
    /// If no line matches the start tag at all the outcome is `Ok(None)`:
    /// absence of the target region is an answer, not an error.
    pub fn feed_delimited(
        &mut self,
        text: &str,
        delimiter: &str,
    ) -> Result<Option<Value>, ExtractError> {
        let cursor = LineCursor::shared(text, delimiter);
        self.root
            .attach(&cursor);

        loop {
            let line = cursor
                .borrow_mut()
                .next_line();
            match line {
                None => {
                    debug!(
                        rule = self
                            .root
                            .name(),
                        "input exhausted before any start tag"
                    );
                    return Ok(None);
                }
                Some(line) => {
                    if self
                        .root
                        .matches_start(&line)
                    {
                        self.root
                            .enter(&line)?;
                        return Ok(Some(
                            self.root
                                .reset(),
                        ));
                    }
                }
            }
        }
    }
}
