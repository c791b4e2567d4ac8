//! Units: combat class, movement domain, rule modifiers

pub mod unit;
pub mod unit_type;
pub mod uniques;

pub use unit::{MapUnit, MAX_HEALTH};
pub use unit_type::{UnitClass, UnitDomain};
pub use uniques::{Unique, UniqueSet, UniqueType};
