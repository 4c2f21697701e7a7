// Library exports for testing
// Both binaries import these as well

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod startup;

#[cfg(test)]
mod tests;
