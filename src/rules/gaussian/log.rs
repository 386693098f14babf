use crate::extract::{CompositeRule, Pattern, Rule};

/// The region covering one Gaussian run, from the entry banner to normal
/// termination. A run that died never prints the end banner, which the
/// engine reports as an unexpected end of input rather than returning
/// whatever had accumulated.
pub fn log_rule(children: Vec<Box<dyn Rule>>) -> CompositeRule {
    CompositeRule::new(
        "gaussian log",
        Pattern::delimited(" Entering Gaussian System", " Normal termination"),
        children,
    )
}
