use crate::extract::{CompositeRule, Pattern, Rule};

/// The region covering one executed OpenMolcas module, bounded by the
/// driver's Start/Stop banners for that module name.
pub fn module_rule(name: &str, children: Vec<Box<dyn Rule>>) -> CompositeRule {
    CompositeRule::new(
        format!("{} module", name),
        Pattern::delimited(
            &format!("--- Start Module: {}", name),
            &format!("--- Stop Module: {}", name),
        ),
        children,
    )
}

/// The region covering the whole of one OpenMolcas run.
pub fn log_rule(children: Vec<Box<dyn Rule>>) -> CompositeRule {
    CompositeRule::new(
        "molcas log",
        Pattern::delimited(r"\s+This run of MOLCAS", r"\s+Timing:"),
        children,
    )
}
