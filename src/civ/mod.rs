//! Civilizations, diplomacy, and cities

pub mod city;
pub mod civilization;

pub use city::{City, CITY_MAX_HEALTH};
pub use civilization::{Civilization, Diplomacy};
