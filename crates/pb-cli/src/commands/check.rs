//! `pb check` command - Type-check a program.

use std::path::Path;

use crate::output::{compile_or_report, load_source};

pub fn run(path: &Path) -> anyhow::Result<()> {
    let file = load_source(path)?;
    let compiled = compile_or_report(&file)?;
    println!(
        "{}: ok ({} functions, {} records)",
        file.name(),
        compiled.functions.len() - 1,
        compiled.ast.records.len()
    );
    Ok(())
}
