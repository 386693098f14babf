// Rules for TD-DFT output.

use serde::Serialize;

use crate::extract::{Pattern, SingleLineRule};
use crate::rules::{field, float_field};

#[derive(Debug, Serialize)]
struct ExcitedState {
    #[serde(rename = "eV")]
    ev: f64,
    nm: f64,
    f: f64,
}

/// Excited state summary lines, one record per state: excitation energy,
/// wavelength, and oscillator strength (printed as "f=0.0267").
pub fn excited_states() -> SingleLineRule {
    SingleLineRule::new(
        "excited state",
        Pattern::single(" Excited State"),
        |line| {
            let strength = field(line, 8)?;
            let strength = strength
                .strip_prefix("f=")
                .ok_or_else(|| format!("{:?} is not an f= oscillator strength", strength))?;
            let state = ExcitedState {
                ev: float_field(line, 4)?,
                nm: float_field(line, 6)?,
                f: strength
                    .parse()
                    .map_err(|_| format!("{:?} is not a number in line {:?}", strength, line))?,
            };
            serde_json::to_value(state).map_err(|e| e.to_string())
        },
    )
}
