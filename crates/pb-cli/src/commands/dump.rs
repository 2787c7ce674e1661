//! `pb dump` command - Print the bytecode of a program.

use std::path::Path;

use crate::output::{compile_or_report, load_source};

pub fn run(path: &Path) -> anyhow::Result<()> {
    let file = load_source(path)?;
    let compiled = compile_or_report(&file)?;
    print!("{}", compiled.disassemble());
    Ok(())
}
