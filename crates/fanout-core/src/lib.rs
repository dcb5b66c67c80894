pub mod config;
pub mod logging;

pub mod analyzer;
pub mod checksum;
pub mod limiter;
pub mod runner;
pub mod sorter;
