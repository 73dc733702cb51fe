//! Filter and sort CSV tables by header-named columns.

pub mod cli;
pub mod data;
pub mod error;
pub mod pipeline;

pub use cli::Options;
pub use error::{Result, SiftError};
