// Rules for the regions an OpenMolcas log is made of.

pub mod general;
pub mod log;
pub mod mcpdft;
pub mod rasscf;
pub mod rassi;
