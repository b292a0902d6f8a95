pub mod cli;
pub mod error;
pub mod io;
pub mod math;

#[cfg(test)]
mod test_utils;

pub use error::{Error, Result};
