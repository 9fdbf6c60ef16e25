pub mod chain;
pub mod config;
pub mod contracts;
pub mod error;
pub mod types;
pub mod utils;
pub mod wallet;
pub mod workflow;
