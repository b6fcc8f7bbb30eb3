pub mod character;
pub mod cli;
pub mod config;
pub mod daily_log;
pub mod engine;
pub mod fallback;
pub mod generator;
pub mod interpreter;
pub mod learning;
pub mod memory;
pub mod prompt;
pub mod relationship;
pub mod store;
