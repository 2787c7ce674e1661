//! Loading, compiling, and reporting shared by the commands.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use pb_common::{diagnostics, SourceFile};
use pb_engine::{compile_file, std_externals, Compiled};
use pb_vm::{FrameView, Vm};

use crate::host::ConsoleHost;

pub fn load_source(path: &Path) -> anyhow::Result<SourceFile> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(SourceFile::new(path.display().to_string(), text))
}

/// Compiles `file`, rendering any error against the source on stderr.
pub fn compile_or_report(file: &SourceFile) -> anyhow::Result<Compiled<ConsoleHost>> {
    match compile_file(file, std_externals()) {
        Ok(compiled) => Ok(compiled),
        Err(e) => {
            if diagnostics::emit_to_stderr(&e, file).is_err() {
                eprintln!("{}", e);
            }
            bail!("compilation of {} failed", file.name())
        }
    }
}

/// `  12 | source text` for the line the VM is about to execute.
pub fn format_current_line(vm: &Vm<ConsoleHost>, file: &SourceFile) -> String {
    match vm.line_number() {
        Some(line) => format!("{:>4} | {}", line, file.line_text(line).unwrap_or("").trim_end()),
        None => "program completed".to_string(),
    }
}

pub fn format_locals(frame: &FrameView<'_>) -> Vec<String> {
    frame
        .locals()
        .map(|(local, value)| match value {
            Some(value) => format!("{} = {}", local.name, value),
            None => format!("{} = <unset>", local.name),
        })
        .collect()
}

pub fn format_frame(frame: &FrameView<'_>) -> String {
    match frame.line_info() {
        Some(info) => format!("{} at line {}", frame.code.signature, info.line),
        None => frame.code.signature.clone(),
    }
}
