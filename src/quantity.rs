#[macro_use]
pub mod macros;

pub mod currency;
pub mod ratios;
pub mod time;
