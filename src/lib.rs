//! Extraction of structured results from computational chemistry logs.
//!
//! The `extract` module is the tag-delimited region engine: rules recognize
//! a region of lines between a start tag and an end tag, consume exactly
//! that region from a shared cursor, and accumulate a JSON-representable
//! result. The `rules` module carries the OpenMolcas and Gaussian log
//! vocabularies built on top of it.

pub mod extract;
pub mod problem;
pub mod rules;
