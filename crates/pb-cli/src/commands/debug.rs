//! `pb debug` command - Line-oriented debugger on stdin.
//!
//! ```text
//! s        step into
//! n        step over
//! c        continue to the next breakpoint
//! b LINE   toggle a breakpoint
//! l        locals of the innermost frame
//! bt       call stack
//! r        restart
//! q        quit
//! ```

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::thread;

use pb_common::SourceFile;
use pb_vm::{RunOutcome, StepOutcome, Vm, VmError};

use super::run::POLL_INTERVAL;
use crate::host::ConsoleHost;
use crate::output::{compile_or_report, format_current_line, format_frame, format_locals, load_source};

const SLICE: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    StepInto,
    StepOver,
    Continue,
    Breakpoint(u32),
    Locals,
    Backtrace,
    Restart,
    Quit,
}

fn parse_command(input: &str) -> Result<Command, String> {
    let mut parts = input.split_whitespace();
    let Some(head) = parts.next() else {
        // Empty input repeats a step over.
        return Ok(Command::StepOver);
    };
    let command = match head {
        "s" | "step" => Command::StepInto,
        "n" | "next" => Command::StepOver,
        "c" | "continue" => Command::Continue,
        "l" | "locals" => Command::Locals,
        "bt" | "backtrace" => Command::Backtrace,
        "r" | "restart" => Command::Restart,
        "q" | "quit" => Command::Quit,
        "b" | "break" => {
            let line = parts
                .next()
                .ok_or_else(|| "usage: b LINE".to_string())?
                .parse::<u32>()
                .map_err(|e| format!("invalid line: {}", e))?;
            Command::Breakpoint(line)
        }
        other => return Err(format!("unknown command '{}'", other)),
    };
    match parts.next() {
        Some(extra) => Err(format!("unexpected argument '{}'", extra)),
        None => Ok(command),
    }
}

pub fn run(path: &Path) -> anyhow::Result<()> {
    let file = load_source(path)?;
    let compiled = compile_or_report(&file)?;
    let mut vm = compiled.vm(ConsoleHost);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        println!("{}", format_current_line(&vm, &file));
        print!("(pb) ");
        io::stdout().flush()?;

        let Some(input) = lines.next() else {
            break;
        };
        let command = match parse_command(&input?) {
            Ok(command) => command,
            Err(message) => {
                eprintln!("{}", message);
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        execute(command, &mut vm, &file)?;
    }
    Ok(())
}

fn execute(command: Command, vm: &mut Vm<ConsoleHost>, file: &SourceFile) -> Result<(), VmError> {
    match command {
        Command::StepInto => report_step(drive_step(vm, Vm::step_into)?),
        Command::StepOver => report_step(drive_step(vm, Vm::step_over)?),
        Command::Continue => loop {
            match vm.run(SLICE)? {
                RunOutcome::Completed => break,
                RunOutcome::Breakpoint => {
                    println!("breakpoint");
                    break;
                }
                RunOutcome::Suspended => thread::sleep(POLL_INTERVAL),
                RunOutcome::BudgetExhausted => {}
            }
        },
        Command::Breakpoint(line) => {
            if vm.breakpoints().any(|b| b == line) {
                vm.clear_breakpoint(line);
                println!("cleared breakpoint at line {}", line);
            } else {
                vm.set_breakpoint(line);
                match file.line_text(line) {
                    Some(text) => println!("breakpoint at line {}: {}", line, text.trim()),
                    None => println!("breakpoint at line {} (past end of file)", line),
                }
            }
        }
        Command::Locals => match vm.frames().last() {
            Some(frame) => {
                for local in format_locals(&frame) {
                    println!("    {}", local);
                }
            }
            None => println!("no frame"),
        },
        Command::Backtrace => {
            for (depth, frame) in vm.frames().rev().enumerate() {
                println!("#{} {}", depth, format_frame(&frame));
            }
        }
        Command::Restart => vm.restart(),
        Command::Quit => {}
    }
    Ok(())
}

/// Repeats a step while it is interrupted by an async call or its budget.
fn drive_step(
    vm: &mut Vm<ConsoleHost>,
    step: fn(&mut Vm<ConsoleHost>) -> Result<StepOutcome, VmError>,
) -> Result<StepOutcome, VmError> {
    loop {
        match step(vm)? {
            StepOutcome::Suspended => thread::sleep(POLL_INTERVAL),
            StepOutcome::BudgetExhausted => {}
            outcome => return Ok(outcome),
        }
    }
}

fn report_step(outcome: StepOutcome) {
    match outcome {
        StepOutcome::Breakpoint => println!("breakpoint"),
        StepOutcome::Completed => println!("program completed"),
        _ => {}
    }
}
