// Rules for the regions a Gaussian log is made of.

pub mod general;
pub mod log;
pub mod tddft;
