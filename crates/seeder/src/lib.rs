pub mod cli;
pub mod config;
pub mod error;
pub mod hasher;
pub mod report;
pub mod sql;

pub use config::Config;
pub use error::{SeederError, SeederResult};
