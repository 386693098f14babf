// Rules that apply to multiple Gaussian calculation types.

use std::mem;
use std::rc::Rc;

use serde_json::{json, Value};

use crate::extract::{CursorHandle, ExtractError, Pattern, Rule, Step};
use crate::rules::float_field;

/// The dipole moment block. The values sit on the terminating "X=" line
/// itself, so extraction happens in the end-of-region callback.
pub struct DipoleMoment {
    pattern: Pattern,
    cursor: Option<CursorHandle>,
    dipole: Value,
}

fn empty_dipole() -> Value {
    json!({
        "x": null,
        "y": null,
        "z": null,
        "total": null,
    })
}

impl DipoleMoment {
    pub fn new() -> DipoleMoment {
        DipoleMoment {
            pattern: Pattern::delimited(" Dipole moment", r"\s+X="),
            cursor: None,
            dipole: empty_dipole(),
        }
    }
}

impl Rule for DipoleMoment {
    fn name(&self) -> &str {
        "gaussian dipole moment"
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
        // iterate until the end tag fires on_end with the values line
        loop {
            match self.step()? {
                Step::End => return Ok(()),
                Step::Line(_) => continue,
            }
        }
    }

    fn on_end(&mut self, end_line: &str) {
        self.dipole = json!({
            "x": float_field(end_line, 1).ok(),
            "y": float_field(end_line, 3).ok(),
            "z": float_field(end_line, 5).ok(),
            "total": float_field(end_line, 7).ok(),
        });
    }

    fn reset(&mut self) -> Value {
        self.cursor = None;
        mem::replace(&mut self.dipole, empty_dipole())
    }
}
