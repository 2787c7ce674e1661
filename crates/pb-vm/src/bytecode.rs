//! Compiled functions and their debug line map.

use std::fmt;

use pb_common::{Location, TypeId};

use crate::instruction::Instruction;

/// Debug info for one instruction. Consecutive instructions that share a
/// `step` form one debugger step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineInfo {
    pub step: u32,
    /// 1-based source line.
    pub line: u32,
}

/// A parameter or variable of a function, in slot order.
#[derive(Debug, Clone, PartialEq)]
pub struct Local {
    pub name: String,
    pub ty: TypeId,
    pub location: Location,
    pub is_param: bool,
}

/// The emitted code of one function. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCode {
    pub name: String,
    pub signature: String,
    pub location: Location,
    pub return_type: TypeId,
    pub instructions: Vec<Instruction>,
    /// Parallel to `instructions`.
    pub line_infos: Vec<LineInfo>,
    /// Parameters first, then variables in declaration order.
    pub locals: Vec<Local>,
    pub num_parameters: usize,
    pub index: u32,
}

impl FunctionCode {
    #[inline]
    pub fn line_info(&self, pc: usize) -> Option<LineInfo> {
        self.line_infos.get(pc).copied()
    }

    /// Whether `pc` is the first instruction of a debugger step. Loop
    /// trailers reuse their header's step but never start it.
    pub fn is_step_start(&self, pc: usize) -> bool {
        match self.line_infos.get(pc) {
            Some(info) => self.line_infos[..pc].iter().all(|earlier| earlier.step != info.step),
            None => false,
        }
    }

    pub fn returns_value(&self) -> bool {
        !self.return_type.is_nothing()
    }
}

impl fmt::Display for FunctionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "fun {} (#{})", self.signature, self.index)?;
        for (slot, local) in self.locals.iter().enumerate() {
            let kind = if local.is_param { "param" } else { "var" };
            writeln!(f, "  ; {} {} {}", kind, slot, local.name)?;
        }
        for (pc, ins) in self.instructions.iter().enumerate() {
            match self.line_infos.get(pc) {
                Some(info) => writeln!(f, "  {:>4}  {:>4}:{:<4} {}", pc, info.line, info.step, ins)?,
                None => writeln!(f, "  {:>4}  {:>9} {}", pc, "", ins)?,
            }
        }
        Ok(())
    }
}
