//! CLI subcommands.

pub mod check;
pub mod debug;
pub mod dump;
pub mod run;
