// The tag-delimited region engine.

mod composite;
mod cursor;
mod error;
mod parser;
mod pattern;
mod rule;

// Re-export all public symbols
pub use composite::*;
pub use cursor::*;
pub use error::*;
pub use parser::*;
pub use pattern::*;
pub use rule::*;
