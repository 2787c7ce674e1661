//! Call frames.

use pb_runtime::Value;

use crate::bytecode::{FunctionCode, LineInfo, Local};

/// One function activation.
#[derive(Debug, Clone)]
pub struct CallFrame {
    pub func_id: u32,
    pub pc: usize,
    /// Parallel to the function's `locals`; `None` until first stored.
    pub slots: Vec<Option<Value>>,
    /// Operand stack height once the arguments were taken. `Return` cuts the
    /// stack back to it, so loop counters never leak into the caller.
    pub stack_base: usize,
}

impl CallFrame {
    pub fn new(code: &FunctionCode, stack_base: usize) -> Self {
        Self {
            func_id: code.index,
            pc: 0,
            slots: vec![None; code.locals.len()],
            stack_base,
        }
    }
}

/// Read-only view of a frame for debuggers.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub code: &'a FunctionCode,
    pub frame: &'a CallFrame,
}

impl<'a> FrameView<'a> {
    #[inline]
    pub fn pc(&self) -> usize {
        self.frame.pc
    }

    pub fn line_info(&self) -> Option<LineInfo> {
        self.code.line_info(self.frame.pc)
    }

    /// Named locals with their current values.
    pub fn locals(&self) -> impl Iterator<Item = (&'a Local, Option<&'a Value>)> + 'a {
        let frame = self.frame;
        self.code
            .locals
            .iter()
            .enumerate()
            .map(move |(slot, local)| (local, frame.slots.get(slot).and_then(Option::as_ref)))
    }
}
