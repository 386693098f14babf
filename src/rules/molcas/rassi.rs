// Rules for the RASSI module region.

use std::mem;
use std::rc::Rc;

use serde_json::{json, Value};

use crate::extract::{
    CompositeRule, CursorHandle, ExtractError, Pattern, Rule, Step,
};
use crate::rules::{float_field, int_field, into_array};

use super::log;

/// The dipole transition strengths table: one row per state pair, below
/// five lines of headers and rulers.
pub struct TransitionStrengths {
    pattern: Pattern,
    cursor: Option<CursorHandle>,
    state: Vec<Value>,
}

impl TransitionStrengths {
    pub fn new() -> TransitionStrengths {
        TransitionStrengths {
            pattern: Pattern::delimited(r"\+\+ Dipole transition strengths", r"\s+-+$"),
            cursor: None,
            state: Vec::new(),
        }
    }
}

impl Rule for TransitionStrengths {
    fn name(&self) -> &str {
        "rassi transition strengths"
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

    fn enter(&mut self, _start_line: &str) -> Result<(), ExtractError> {
        self.skip(5)?;
        loop {
            match self.step()? {
                Step::End => return Ok(()),
                Step::Line(line) => {
                    let err = |d| self.malformed(d);
                    let row = json!({
                        "from": int_field(&line, 0).map_err(err)?,
                        "to": int_field(&line, 1).map_err(err)?,
                        "osc_strength": float_field(&line, 2).map_err(err)?,
                    });
                    self.state
                        .push(row);
                }
            }
        }
    }

    fn reset(&mut self) -> Value {
        self.cursor = None;
        Value::Array(mem::take(&mut self.state))
    }
}

/// The whole RASSI module region.
pub struct RassiModule {
    inner: CompositeRule,
}

impl RassiModule {
    pub fn new() -> RassiModule {
        RassiModule {
            inner: log::module_rule("rassi", vec![Box::new(TransitionStrengths::new())]),
        }
    }
}

impl Rule for RassiModule {
    fn name(&self) -> &str {
        self.inner
            .name()
    }

    fn pattern(&self) -> &Pattern {
        self.inner
            .pattern()
    }

    fn cursor(&self) -> Option<&CursorHandle> {
        self.inner
            .cursor()
    }

    fn attach(&mut self, cursor: &CursorHandle) {
        self.inner
            .attach(cursor);
    }

    fn enter(&mut self, start_line: &str) -> Result<(), ExtractError> {
        self.inner
            .enter(start_line)
    }

    fn reset(&mut self) -> Value {
        let parts: [Value; 1] = into_array(
            self.inner
                .reset(),
        )
        .try_into()
        .expect("rassi module has one child");
        let [strengths] = parts;

        json!({
            "module": "rassi",
            "data": strengths,
        })
    }
}
