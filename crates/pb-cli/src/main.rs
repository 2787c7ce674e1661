//! Paperbots CLI.
//!
//! Commands:
//! - `pb run <file>` - Compile and run a program
//! - `pb check <file>` - Type-check without running
//! - `pb dump <file>` - Print the bytecode of every function
//! - `pb debug <file>` - Step through a program interactively

mod commands;
mod host;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pb")]
#[command(about = "Paperbots compiler and virtual machine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile and run a program
    Run {
        file: PathBuf,

        /// Abort after executing this many instructions
        #[arg(long)]
        max_steps: Option<u64>,

        /// Report the VM state whenever this line is reached
        #[arg(long = "breakpoint", value_name = "LINE")]
        breakpoints: Vec<u32>,
    },

    /// Type-check a program without running it
    Check { file: PathBuf },

    /// Print the disassembled bytecode
    Dump { file: PathBuf },

    /// Run a program under the line debugger
    Debug { file: PathBuf },
}

fn main() -> ExitCode {
    // Initialize tracing if PB_LOG is set
    if let Ok(filter) = EnvFilter::try_from_env("PB_LOG") {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
        tracing::debug!("tracing initialized");
    }

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run {
            file,
            max_steps,
            breakpoints,
        } => commands::run::run(&file, max_steps, &breakpoints),
        Commands::Check { file } => commands::check::run(&file),
        Commands::Dump { file } => commands::dump::run(&file),
        Commands::Debug { file } => commands::debug::run(&file),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
