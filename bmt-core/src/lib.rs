//! Core types for the Burning Man 2019 temperature logs: the source registry,
//! temperature units, loaded series and the CSV loader.

pub mod error;
pub mod loader;
pub mod series;
pub mod site;
pub mod source;
pub mod temperature;
