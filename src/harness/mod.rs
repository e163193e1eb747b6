pub mod config;
pub mod log;
pub mod runner;
pub mod selection;
pub mod session;
pub mod suites;
