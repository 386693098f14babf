use std::rc::Rc;

use serde_json::Value;

use super::cursor::CursorHandle;
use super::error::ExtractError;
use super::pattern::Pattern;
use super::rule::{Rule, Step};

/// A rule whose region is subdivided among an ordered list of children.
///
/// Each line of the region is offered to the children in declaration
/// order; the first child whose start tag matches takes the line and
/// consumes its whole nested region before the loop resumes. While a child
/// is inside its region the composite's own end tag is not consulted; the
/// child's end-tag handling takes precedence. Lines no child recognizes
/// are banner noise and fall through silently.
pub struct CompositeRule {
    name: String,
    pattern: Pattern,
    cursor: Option<CursorHandle>,
    children: Vec<Box<dyn Rule>>,
}

impl CompositeRule {
    pub fn new(
        name: impl Into<String>,
        pattern: Pattern,
        children: Vec<Box<dyn Rule>>,
    ) -> CompositeRule {
        assert!(
            pattern.has_end(),
            "composite rules take a delimited pattern"
        );
        CompositeRule {
            name: name.into(),
            pattern,
            cursor: None,
            children,
        }
    }
}

impl Rule for CompositeRule {
    fn name(&self) -> &str {
        &self.name
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
        for child in &mut self.children {
            child.attach(cursor);
        }
    }

    fn enter(&mut self, _start_line: &str) -> Result<(), ExtractError> {
        loop {
            match self.step()? {
                Step::End => return Ok(()),
                Step::Line(line) => {
                    for child in &mut self.children {
                        if child.matches_start(&line) {
                            child.enter(&line)?;
                            break;
                        }
                    }
                }
            }
        }
    }

    /// The children's results in declaration order. Wrappers that want a
    /// keyed or merged shape reset the composite and rework this array.
    fn reset(&mut self) -> Value {
        self.cursor = None;
        Value::Array(
            self.children
                .iter_mut()
                .map(|child| child.reset())
                .collect(),
        )
    }
}
