pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod omdb;
pub mod poster;

#[cfg(test)]
mod test_support;

pub use error::{Error, Result};
