//! Library side of the `cps` command line tool.
//!
//! The binary parses arguments and prints; everything it runs lives here so
//! the commands can be tested without spawning a process.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
