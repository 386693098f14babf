// Rules for the RASSCF module region.

use std::mem;
use std::rc::Rc;

use serde_json::{json, Map, Value};

use crate::extract::{
    CompositeRule, CursorHandle, ExtractError, Pattern, Rule, SingleLineRule, Step,
};
use crate::rules::{field, float_field, int_field, into_array, last_field};

use super::log;

/// Per-root total energy summary line.
pub fn energy() -> SingleLineRule {
    SingleLineRule::new(
        "rasscf energy",
        Pattern::single("::    RASSCF root number"),
        |line| {
            let energy = float_field(line, 7)?;
            Ok(json!(energy))
        },
    )
}

/// Natural-orbital occupation numbers, one table per root. The table runs
/// to a blank line, but a Warning! can be printed where the blank was
/// expected, and rows for further symmetries continue with a "sym" label.
pub struct Occupation {
    pattern: Pattern,
    cursor: Option<CursorHandle>,
    state: Vec<Vec<f64>>,
}

impl Occupation {
    pub fn new() -> Occupation {
        Occupation {
            pattern: Pattern::delimited(r"\s+Natural orbitals and occupation numbers", r"^\s*$"),
            cursor: None,
            state: Vec::new(),
        }
    }
}

impl Rule for Occupation {
    fn name(&self) -> &str {
        "rasscf occupation"
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
        let mut occupation = Vec::new();
        loop {
            match self.step()? {
                Step::End => break,
                Step::Line(line) => {
                    let line = line.trim();
                    if line.starts_with("Warning!") {
                        continue;
                    }
                    // continuation rows for further symmetries lead with
                    // a "sym N:" label pair
                    let labels = if line.starts_with("sym") { 2 } else { 0 };
                    for raw in line
                        .split_whitespace()
                        .skip(labels)
                    {
                        let parsed = raw
                            .parse::<f64>()
                            .map_err(|_| {
                                self.malformed(format!("{:?} is not an occupation number", raw))
                            })?;
                        occupation.push(parsed);
                    }
                }
            }
        }
        self.state
            .push(occupation);
        Ok(())
    }

    fn reset(&mut self) -> Value {
        self.cursor = None;
        json!(mem::take(&mut self.state))
    }
}

/// CI coefficients larger than the print threshold, one table per root.
/// Rows are [configuration, occupation string, coefficient, weight].
pub struct CiCoefficients {
    pattern: Pattern,
    cursor: Option<CursorHandle>,
    state: Vec<Value>,
}

impl CiCoefficients {
    pub fn new() -> CiCoefficients {
        CiCoefficients {
            pattern: Pattern::delimited(r"\s+ printout of CI-coefficients larger than", r"^\s*$"),
            cursor: None,
            state: Vec::new(),
        }
    }
}

impl Rule for CiCoefficients {
    fn name(&self) -> &str {
        "rasscf ci coefficients"
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
        // two column-header lines carry nothing
        self.skip(2)?;

        let mut coefficients = Vec::new();
        loop {
            match self.step()? {
                Step::End => break,
                Step::Line(line) => {
                    let err = |d| self.malformed(d);
                    let row = json!([
                        int_field(&line, 0).map_err(err)?,
                        field(&line, 1).map_err(err)?,
                        float_field(&line, 2).map_err(err)?,
                        float_field(&line, 3).map_err(err)?,
                    ]);
                    coefficients.push(row);
                }
            }
        }
        self.state
            .push(Value::Array(coefficients));
        Ok(())
    }

    fn reset(&mut self) -> Value {
        self.cursor = None;
        Value::Array(mem::take(&mut self.state))
    }
}

/// Orbital specifications table: active orbitals and basis function counts.
pub struct OrbitalSpec {
    pattern: Pattern,
    cursor: Option<CursorHandle>,
    active_orbs: Option<i64>,
    num_basis_funcs: Option<i64>,
}

impl OrbitalSpec {
    pub fn new() -> OrbitalSpec {
        OrbitalSpec {
            pattern: Pattern::delimited(r"\+\+    Orbital specifications:", "--"),
            cursor: None,
            active_orbs: None,
            num_basis_funcs: None,
        }
    }
}

impl Rule for OrbitalSpec {
    fn name(&self) -> &str {
        "rasscf orbital specifications"
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
        self.skip(2)?;
        loop {
            match self.step()? {
                Step::End => return Ok(()),
                Step::Line(line) => {
                    let active = line.contains("Active orbitals");
                    if !active && !line.contains("Number of basis functions") {
                        continue;
                    }
                    let last = last_field(&line)
                        .and_then(|raw| {
                            raw.parse::<i64>()
                                .map_err(|_| format!("{:?} is not a count", raw))
                        })
                        .map_err(|d| self.malformed(d))?;
                    if active {
                        self.active_orbs = Some(last);
                    } else {
                        self.num_basis_funcs = Some(last);
                    }
                }
            }
        }
    }

    fn reset(&mut self) -> Value {
        self.cursor = None;
        json!({
            "active_orbs": self.active_orbs.take(),
            "num_basis_funcs": self.num_basis_funcs.take(),
        })
    }
}

/// CI expansion specifications table: how many roots were requested.
pub struct ExpansionSpec {
    pattern: Pattern,
    cursor: Option<CursorHandle>,
    roots: Option<i64>,
}

impl ExpansionSpec {
    pub fn new() -> ExpansionSpec {
        ExpansionSpec {
            pattern: Pattern::delimited(r"\+\+    CI expansion specifications:", "--"),
            cursor: None,
            roots: None,
        }
    }
}

impl Rule for ExpansionSpec {
    fn name(&self) -> &str {
        "rasscf ci expansion specifications"
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
        self.skip(2)?;
        loop {
            match self.step()? {
                Step::End => return Ok(()),
                Step::Line(line) => {
                    if line.contains("Number of root(s) required") {
                        let last = last_field(&line)
                            .and_then(|raw| {
                                raw.parse::<i64>()
                                    .map_err(|_| format!("{:?} is not a count", raw))
                            })
                            .map_err(|d| self.malformed(d))?;
                        self.roots = Some(last);
                    }
                }
            }
        }
    }

    fn reset(&mut self) -> Value {
        self.cursor = None;
        json!({
            "roots": self.roots.take(),
        })
    }
}

/// The whole RASSCF module region, reshaped into one keyed object with a
/// per-root data array.
pub struct RasscfModule {
    inner: CompositeRule,
}

impl RasscfModule {
    pub fn new() -> RasscfModule {
        RasscfModule {
            inner: log::module_rule(
                "rasscf",
                vec![
                    Box::new(energy()),
                    Box::new(CiCoefficients::new()),
                    Box::new(Occupation::new()),
                    Box::new(OrbitalSpec::new()),
                    Box::new(ExpansionSpec::new()),
                ],
            ),
        }
    }
}

impl Rule for RasscfModule {
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
        let parts: [Value; 5] = into_array(
            self.inner
                .reset(),
        )
        .try_into()
        .expect("rasscf module has five children");
        let [energies, coefficients, occupations, orbitals, expansion] = parts;

        let coefficients = into_array(coefficients);
        let occupations = into_array(occupations);

        let mut data = Vec::new();
        for (i, energy) in into_array(energies)
            .into_iter()
            .enumerate()
        {
            data.push(json!({
                "root": i + 1,
                "total_energy": energy,
                "ci_coeff": coefficients
                    .get(i)
                    .cloned()
                    .unwrap_or(Value::Null),
                "occupation": occupations
                    .get(i)
                    .cloned()
                    .unwrap_or(Value::Null),
            }));
        }

        let mut out = Map::new();
        if let Value::Object(map) = orbitals {
            out.extend(map);
        }
        if let Value::Object(map) = expansion {
            out.extend(map);
        }
        out.insert("module".to_owned(), json!("rasscf"));
        out.insert("data".to_owned(), Value::Array(data));
        Value::Object(out)
    }
}
