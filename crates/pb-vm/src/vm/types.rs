//! VM types and state definitions.

use thiserror::Error;

use pb_common::BinaryOp;

/// Instruction budget of a single `step_over()` call before it yields back
/// to the host with its target kept.
pub const STEP_OVER_BUDGET: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VmState {
    Running,
    /// Terminal: the frame stack is empty.
    Completed,
}

/// Why `run()` returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    /// Waiting on an async external.
    Suspended,
    /// The next instruction starts a step on a breakpoint line.
    Breakpoint,
    /// `max_steps` instructions executed.
    BudgetExhausted,
}

/// Why `step_over()` / `step_into()` returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Reached the next step.
    Stepped,
    Completed,
    /// Waiting on an async external. For `step_over()` the target is kept.
    Suspended,
    /// Ran out of `STEP_OVER_BUDGET`; the target is kept.
    BudgetExhausted,
    Breakpoint,
}

/// Internal faults. Well-typed emitted code never produces these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VmError {
    #[error("stack underflow")]
    StackUnderflow,
    #[error("invalid function index {0}")]
    InvalidFunction(u32),
    #[error("invalid external function index {0}")]
    InvalidExternal(u32),
    #[error("invalid slot {0}")]
    InvalidSlot(u16),
    #[error("slot {0} read before it was written")]
    UninitializedSlot(u16),
    #[error("program counter {pc} out of range in function {func_id}")]
    InvalidPc { func_id: u32, pc: usize },
    #[error("operator '{0}' can not be executed by the VM")]
    InvalidOperator(BinaryOp),
    #[error("expected a '{expected}' on the stack, but found a '{found}'")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}
