//! Virtual machine.

mod debug;
mod exec;
mod types;

pub use types::{RunOutcome, StepOutcome, VmError, VmState, STEP_OVER_BUDGET};

use std::sync::Arc;

use hashbrown::HashSet;

use pb_runtime::{Callback, ExternalRegistry, Pending, Value};

use crate::bytecode::FunctionCode;
use crate::frame::CallFrame;
use crate::instruction::Instruction;

/// An outstanding async external call.
#[derive(Debug)]
struct PendingCall {
    pending: Pending,
    returns_value: bool,
}

/// Where an interrupted `step_over()` is heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StepTarget {
    depth: usize,
    step: u32,
}

/// A stack machine executing one program for one host.
///
/// The function table and the external registry are shared and read-only;
/// frames, the value stack, and the host context belong to this VM.
pub struct Vm<H> {
    functions: Arc<[FunctionCode]>,
    externals: Arc<ExternalRegistry<H>>,
    host: H,
    frames: Vec<CallFrame>,
    stack: Vec<Value>,
    state: VmState,
    pending: Option<PendingCall>,
    breakpoints: HashSet<u32>,
    step_over_target: Option<StepTarget>,
}

impl<H> Vm<H> {
    /// Creates a VM positioned at the first instruction of `$main`
    /// (function 0).
    pub fn new(functions: Arc<[FunctionCode]>, externals: Arc<ExternalRegistry<H>>, host: H) -> Self {
        let mut vm = Self {
            functions,
            externals,
            host,
            frames: Vec::new(),
            stack: Vec::new(),
            state: VmState::Running,
            pending: None,
            breakpoints: HashSet::new(),
            step_over_target: None,
        };
        vm.restart();
        vm
    }

    /// Drops all execution state and re-enters `$main`. Breakpoints survive.
    pub fn restart(&mut self) {
        self.frames.clear();
        self.stack.clear();
        self.pending = None;
        self.step_over_target = None;
        match self.functions.first() {
            Some(main) => {
                self.frames.push(CallFrame::new(main, 0));
                self.state = VmState::Running;
            }
            None => self.state = VmState::Completed,
        }
        tracing::debug!(functions = self.functions.len(), "vm restarted");
    }

    // === Accessors ===

    #[inline]
    pub fn state(&self) -> VmState {
        self.state
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        self.state == VmState::Completed
    }

    /// Whether an async external is outstanding.
    #[inline]
    pub fn is_suspended(&self) -> bool {
        self.pending.is_some()
    }

    pub fn functions(&self) -> &[FunctionCode] {
        &self.functions
    }

    pub fn stack(&self) -> &[Value] {
        &self.stack
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    // === Execution ===

    /// Executes up to `max_steps` instructions. Stops early when the program
    /// completes, an async call is outstanding, or a breakpoint is reached.
    pub fn run(&mut self, max_steps: usize) -> Result<RunOutcome, VmError> {
        self.step_over_target = None;
        if self.sync_state() == VmState::Completed {
            return Ok(RunOutcome::Completed);
        }
        self.resume_pending();

        let mut remaining = max_steps;
        while self.pending.is_none() && remaining > 0 {
            remaining -= 1;
            self.step()?;
            if self.sync_state() == VmState::Completed {
                return Ok(RunOutcome::Completed);
            }
            if self.at_breakpoint() {
                return Ok(RunOutcome::Breakpoint);
            }
        }
        if self.pending.is_some() {
            Ok(RunOutcome::Suspended)
        } else {
            Ok(RunOutcome::BudgetExhausted)
        }
    }

    /// Marks the VM completed once the last frame is gone.
    fn sync_state(&mut self) -> VmState {
        if self.frames.is_empty() {
            self.state = VmState::Completed;
        }
        self.state
    }

    /// Pushes the result of a finished async call and clears it.
    fn resume_pending(&mut self) {
        let Some(call) = &self.pending else {
            return;
        };
        if let Some(value) = call.pending.try_take() {
            if call.returns_value {
                self.stack.push(value);
            }
            self.pending = None;
            tracing::trace!("async call resumed");
        }
    }

    fn pop(&mut self) -> Result<Value, VmError> {
        self.stack.pop().ok_or(VmError::StackUnderflow)
    }

    fn peek(&self) -> Result<&Value, VmError> {
        self.stack.last().ok_or(VmError::StackUnderflow)
    }

    fn pop_args(&mut self, count: usize) -> Result<Vec<Value>, VmError> {
        let start = self.stack.len().checked_sub(count).ok_or(VmError::StackUnderflow)?;
        Ok(self.stack.split_off(start))
    }

    /// Fetches, advances, and interprets one instruction of the top frame.
    fn step(&mut self) -> Result<(), VmError> {
        let functions = Arc::clone(&self.functions);
        let Some(frame) = self.frames.last_mut() else {
            self.state = VmState::Completed;
            return Ok(());
        };
        let func_id = frame.func_id;
        let code = functions.get(func_id as usize).ok_or(VmError::InvalidFunction(func_id))?;
        let pc = frame.pc;
        let stack_base = frame.stack_base;
        let ins = code.instructions.get(pc).ok_or(VmError::InvalidPc { func_id, pc })?;
        frame.pc += 1;

        match ins {
            Instruction::Push(value) => self.stack.push(value.clone()),
            Instruction::Pop => {
                self.pop()?;
            }
            Instruction::Dup => {
                let value = self.peek()?.clone();
                self.stack.push(value);
            }
            Instruction::Load(slot) => {
                let value = self.current_slot(*slot)?.clone().ok_or(VmError::UninitializedSlot(*slot))?;
                self.stack.push(value);
            }
            Instruction::Store(slot) => {
                let value = self.pop()?;
                *self.current_slot(*slot)? = Some(value);
            }
            Instruction::Jump(target) => self.jump(*target),
            Instruction::JumpIfTrue(target) => {
                if exec::expect_bool(&self.pop()?)? {
                    self.jump(*target);
                }
            }
            Instruction::JumpIfFalse(target) => {
                if !exec::expect_bool(&self.pop()?)? {
                    self.jump(*target);
                }
            }
            Instruction::Call(index) => {
                let callee = functions.get(*index as usize).ok_or(VmError::InvalidFunction(*index))?;
                let args = self.pop_args(callee.num_parameters)?;
                let mut frame = CallFrame::new(callee, self.stack.len());
                for (slot, arg) in frame.slots.iter_mut().zip(args) {
                    *slot = Some(arg);
                }
                tracing::trace!(function = %callee.signature, depth = self.frames.len() + 1, "call");
                self.frames.push(frame);
            }
            Instruction::CallExt(index) => self.call_external(*index)?,
            Instruction::Return => {
                self.frames.pop();
                let result = if code.returns_value() && self.stack.len() > stack_base {
                    self.stack.pop()
                } else {
                    None
                };
                self.stack.truncate(stack_base);
                self.stack.extend(result);
                tracing::trace!(function = %code.signature, depth = self.frames.len(), "return");
            }
            Instruction::UnaryOp(op) => {
                let value = self.pop()?;
                self.stack.push(exec::unary(*op, &value)?);
            }
            Instruction::BinaryOp(op) => {
                let right = self.pop()?;
                let left = self.pop()?;
                self.stack.push(exec::binary(*op, &left, &right)?);
            }
            Instruction::StringConcat => {
                let right = self.pop()?;
                let left = self.pop()?;
                self.stack.push(exec::concat(&left, &right)?);
            }
        }
        Ok(())
    }

    fn jump(&mut self, target: u32) {
        if let Some(frame) = self.frames.last_mut() {
            frame.pc = target as usize;
        }
    }

    fn current_slot(&mut self, slot: u16) -> Result<&mut Option<Value>, VmError> {
        self.frames
            .last_mut()
            .and_then(|frame| frame.slots.get_mut(slot as usize))
            .ok_or(VmError::InvalidSlot(slot))
    }

    fn call_external(&mut self, index: u32) -> Result<(), VmError> {
        let externals = Arc::clone(&self.externals);
        let external = externals.get(index).ok_or(VmError::InvalidExternal(index))?;
        let args = self.pop_args(external.params.len())?;
        tracing::trace!(function = %external.signature(), "call external");
        match &external.callback {
            Callback::Sync(f) => {
                let result = f(&mut self.host, &args);
                if external.returns_value() {
                    self.stack.push(result);
                }
            }
            Callback::Async(f) => {
                let pending = f(&mut self.host, &args);
                self.pending = Some(PendingCall {
                    pending,
                    returns_value: external.returns_value(),
                });
                self.resume_pending();
            }
        }
        Ok(())
    }
}
