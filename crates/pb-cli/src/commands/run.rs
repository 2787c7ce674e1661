//! `pb run` command - Compile and run a program.

use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::bail;
use pb_vm::RunOutcome;

use crate::host::ConsoleHost;
use crate::output::{compile_or_report, format_frame, format_locals, load_source};

/// Instructions executed per `Vm::run` call.
const SLICE: usize = 1000;

/// How long to yield while an async external is outstanding.
pub const POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Runs the program to completion.
///
/// `max_steps` bounds the instructions executed in full slices; breakpoints
/// only report the VM state and execution continues.
pub fn run(path: &Path, max_steps: Option<u64>, breakpoints: &[u32]) -> anyhow::Result<()> {
    let file = load_source(path)?;
    let compiled = compile_or_report(&file)?;
    let mut vm = compiled.vm(ConsoleHost);
    for &line in breakpoints {
        vm.set_breakpoint(line);
    }

    let mut remaining = max_steps;
    loop {
        let slice = match remaining {
            Some(0) => bail!("step budget of {} instructions exhausted", max_steps.unwrap_or(0)),
            Some(n) => n.min(SLICE as u64) as usize,
            None => SLICE,
        };
        match vm.run(slice)? {
            RunOutcome::Completed => break,
            RunOutcome::BudgetExhausted => {
                if let Some(n) = remaining.as_mut() {
                    *n -= slice as u64;
                }
            }
            RunOutcome::Suspended => thread::sleep(POLL_INTERVAL),
            RunOutcome::Breakpoint => {
                if let Some(frame) = vm.frames().last() {
                    eprintln!("breakpoint: {}", format_frame(&frame));
                    for local in format_locals(&frame) {
                        eprintln!("    {}", local);
                    }
                }
            }
        }
    }
    tracing::debug!("program completed");
    Ok(())
}
