//! # pb-vm
//!
//! Bytecode and the stack virtual machine that runs it.
//!
//! The VM executes one `FunctionCode` per activation, keeps a single value
//! stack shared by all frames, and exposes the debugger operations
//! (`step_over`, `step_into`, breakpoints) on top of single-instruction
//! stepping. Async externals suspend the VM until their `Pending` completes.

pub mod bytecode;
pub mod frame;
pub mod instruction;
pub mod vm;

pub use bytecode::{FunctionCode, LineInfo, Local};
pub use frame::{CallFrame, FrameView};
pub use instruction::Instruction;
pub use vm::{RunOutcome, StepOutcome, Vm, VmError, VmState, STEP_OVER_BUDGET};
