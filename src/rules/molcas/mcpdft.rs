// Rules for the MC-PDFT module region.

use serde_json::{json, Value};

use crate::extract::{
    CompositeRule, CursorHandle, ExtractError, Pattern, Rule, SingleLineRule,
};
use crate::rules::{float_field, into_array};

use super::log;

/// Per-state MC-PDFT total energy line.
pub fn energy() -> SingleLineRule {
    SingleLineRule::new(
        "mcpdft energy",
        Pattern::single(r"\s+Total MC-PDFT energy for state"),
        |line| {
            let energy = float_field(line, 6)?;
            Ok(json!(energy))
        },
    )
}

/// The MCSCF reference energy printed for each state.
pub fn reference_energy() -> SingleLineRule {
    SingleLineRule::new(
        "mcscf reference energy",
        Pattern::single(r"\s+MCSCF reference energy"),
        |line| {
            let energy = float_field(line, 3)?;
            Ok(json!(energy))
        },
    )
}

/// The whole MC-PDFT module region, reshaped so each root pairs its total
/// energy with the reference energy it started from.
pub struct McpdftModule {
    inner: CompositeRule,
}

impl McpdftModule {
    pub fn new() -> McpdftModule {
        McpdftModule {
            inner: log::module_rule(
                "mcpdft",
                vec![Box::new(reference_energy()), Box::new(energy())],
            ),
        }
    }
}

impl Rule for McpdftModule {
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
        let parts: [Value; 2] = into_array(
            self.inner
                .reset(),
        )
        .try_into()
        .expect("mcpdft module has two children");
        let [references, totals] = parts;

        let references = into_array(references);

        let mut data = Vec::new();
        for (i, total) in into_array(totals)
            .into_iter()
            .enumerate()
        {
            data.push(json!({
                "total_energy": total,
                "mcscf_ref_energy": references
                    .get(i)
                    .cloned()
                    .unwrap_or(Value::Null),
            }));
        }

        json!({
            "module": "mcpdft",
            "roots": references.len(),
            "data": data,
        })
    }
}
