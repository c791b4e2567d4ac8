//! Unit rules loaded from TOML

mod loader;
pub mod ruleset;

pub use loader::{builtin_ruleset, load_ruleset, parse_ruleset, LoadError, BUILTIN_UNITS};
pub use ruleset::{Ruleset, UnitDefinition};
