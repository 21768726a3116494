//! API request handlers

mod forecast;
mod health;

pub use forecast::*;
pub use health::*;
