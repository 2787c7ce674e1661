//! Debugger operations: stepping, breakpoints, inspection.

use super::{StepOutcome, StepTarget, Vm, VmError, VmState, STEP_OVER_BUDGET};
use crate::bytecode::LineInfo;
use crate::frame::FrameView;

impl<H> Vm<H> {
    /// Line info of the next instruction of the innermost frame.
    fn current_line_info(&self) -> Result<LineInfo, VmError> {
        let frame = self.frames.last().ok_or(VmError::StackUnderflow)?;
        let code = self
            .functions
            .get(frame.func_id as usize)
            .ok_or(VmError::InvalidFunction(frame.func_id))?;
        code.line_info(frame.pc).ok_or(VmError::InvalidPc {
            func_id: frame.func_id,
            pc: frame.pc,
        })
    }

    /// Source line of the next instruction, `None` once completed.
    pub fn line_number(&self) -> Option<u32> {
        if self.frames.is_empty() {
            return None;
        }
        self.current_line_info().ok().map(|info| info.line)
    }

    /// Runs until control reaches a different step in the same frame, or the
    /// frame returns. Calls made by the current step run to completion.
    ///
    /// Returns `Suspended` or `BudgetExhausted` when interrupted; the target
    /// is then kept and the next call continues towards it.
    pub fn step_over(&mut self) -> Result<StepOutcome, VmError> {
        if self.sync_state() == VmState::Completed {
            self.step_over_target = None;
            return Ok(StepOutcome::Completed);
        }
        self.resume_pending();

        let target = match self.step_over_target.take() {
            Some(target) => target,
            None => StepTarget {
                depth: self.frames.len() - 1,
                step: self.current_line_info()?.step,
            },
        };

        let mut executed = 0;
        loop {
            if self.pending.is_some() {
                self.step_over_target = Some(target);
                return Ok(StepOutcome::Suspended);
            }
            if self.sync_state() == VmState::Completed {
                return Ok(StepOutcome::Completed);
            }
            if executed >= STEP_OVER_BUDGET {
                self.step_over_target = Some(target);
                return Ok(StepOutcome::BudgetExhausted);
            }
            executed += 1;

            let depth = self.frames.len() - 1;
            if depth < target.depth {
                return Ok(StepOutcome::Stepped);
            }
            if depth == target.depth && self.current_line_info()?.step != target.step {
                return Ok(StepOutcome::Stepped);
            }

            self.step()?;
            if self.at_breakpoint() {
                return Ok(StepOutcome::Breakpoint);
            }
        }
    }

    /// Runs until the frame depth, the function, or the step changes; a call
    /// therefore stops at the callee's first step.
    pub fn step_into(&mut self) -> Result<StepOutcome, VmError> {
        self.step_over_target = None;
        if self.sync_state() == VmState::Completed {
            return Ok(StepOutcome::Completed);
        }
        self.resume_pending();

        let start = self.position()?;
        loop {
            if self.pending.is_some() {
                return Ok(StepOutcome::Suspended);
            }
            if self.sync_state() == VmState::Completed {
                return Ok(StepOutcome::Completed);
            }
            if self.position()? != start {
                return Ok(StepOutcome::Stepped);
            }
            self.step()?;
            if self.at_breakpoint() {
                return Ok(StepOutcome::Breakpoint);
            }
        }
    }

    /// (depth, function, step) of the next instruction.
    fn position(&self) -> Result<(usize, u32, u32), VmError> {
        let func_id = self.frames.last().map_or(0, |f| f.func_id);
        let step = self.current_line_info()?.step;
        Ok((self.frames.len(), func_id, step))
    }

    // === Breakpoints ===

    pub fn set_breakpoint(&mut self, line: u32) {
        self.breakpoints.insert(line);
    }

    pub fn clear_breakpoint(&mut self, line: u32) {
        self.breakpoints.remove(&line);
    }

    pub fn breakpoints(&self) -> impl Iterator<Item = u32> + '_ {
        self.breakpoints.iter().copied()
    }

    /// Whether the next instruction starts a step on a breakpoint line.
    pub(super) fn at_breakpoint(&self) -> bool {
        if self.breakpoints.is_empty() {
            return false;
        }
        let Some(frame) = self.frames.last() else {
            return false;
        };
        let Some(code) = self.functions.get(frame.func_id as usize) else {
            return false;
        };
        code.line_info(frame.pc)
            .is_some_and(|info| self.breakpoints.contains(&info.line))
            && code.is_step_start(frame.pc)
    }

    // === Inspection ===

    /// Frames from outermost (`$main`) to innermost.
    pub fn frames(&self) -> impl DoubleEndedIterator<Item = FrameView<'_>> + '_ {
        self.frames.iter().filter_map(move |frame| {
            self.functions
                .get(frame.func_id as usize)
                .map(|code| FrameView { code, frame })
        })
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}
