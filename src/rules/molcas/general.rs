// Rules that apply across OpenMolcas modules rather than to one of them.

use std::rc::Rc;

use serde_json::{json, Value};

use crate::extract::{CursorHandle, ExtractError, Pattern, Rule, Step};
use crate::rules::float_field;

/// The molecular-properties block several modules print. The dipole vector
/// sits two lines below each "Dipole Moment" banner inside the block.
pub struct MolProps {
    pattern: Pattern,
    cursor: Option<CursorHandle>,
    state: Vec<Value>,
}

impl MolProps {
    pub fn new() -> MolProps {
        MolProps {
            pattern: Pattern::delimited(r"\+\+    Molecular properties:", "--"),
            cursor: None,
            state: Vec::new(),
        }
    }
}

impl Rule for MolProps {
    fn name(&self) -> &str {
        "molecular properties"
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
        loop {
            match self.step()? {
                Step::End => return Ok(()),
                Step::Line(line) => {
                    if !line.contains("Dipole Moment") {
                        continue;
                    }
                    self.skip(1)?;
                    let values = match self.step()? {
                        Step::Line(values) => values,
                        Step::End => return Ok(()),
                    };
                    let props = json!({
                        "dipole": {
                            "x": float_field(&values, 1).map_err(|d| self.malformed(d))?,
                            "y": float_field(&values, 3).map_err(|d| self.malformed(d))?,
                            "z": float_field(&values, 5).map_err(|d| self.malformed(d))?,
                            "total": float_field(&values, 7).map_err(|d| self.malformed(d))?,
                        }
                    });
                    self.state
                        .push(props);
                }
            }
        }
    }

    fn reset(&mut self) -> Value {
        self.cursor = None;
        Value::Array(std::mem::take(&mut self.state))
    }
}
