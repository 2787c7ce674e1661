//! Function builder - instructions, line map, locals, and loop fixups for
//! one function under construction.

use pb_analysis::Scopes;
use pb_common::{CompilerError, Location, TypeId};
use pb_syntax::ast::{FunctionDecl, Identifier};
use pb_vm::{FunctionCode, Instruction, LineInfo, Local};

/// Pending jumps of one open `while`/`repeat`.
#[derive(Debug, Default)]
pub struct LoopContext {
    pub breaks: Vec<usize>,
    pub continues: Vec<usize>,
}

pub struct FuncBuilder {
    name: String,
    signature: String,
    location: Location,
    return_type: TypeId,
    index: u32,
    num_parameters: usize,
    instructions: Vec<Instruction>,
    line_infos: Vec<LineInfo>,
    locals: Vec<Local>,
    scopes: Scopes,
    loops: Vec<LoopContext>,
    /// Line info stamped on emitted instructions.
    current: LineInfo,
    next_step: u32,
}

impl FuncBuilder {
    pub fn new(decl: &FunctionDecl, index: u32) -> Self {
        Self {
            name: decl.name.name.clone(),
            signature: decl.signature(),
            location: decl.location,
            return_type: decl.return_type.unwrap_or(TypeId::NOTHING),
            index,
            num_parameters: decl.params.len(),
            instructions: Vec::new(),
            line_infos: Vec::new(),
            locals: Vec::new(),
            scopes: Scopes::new(),
            loops: Vec::new(),
            current: LineInfo {
                step: 0,
                line: decl.location.line(),
            },
            next_step: 0,
        }
    }

    // === Steps ===

    /// Opens a new debugger step on `line`; everything emitted until the
    /// next call belongs to it.
    pub fn begin_step(&mut self, line: u32) -> LineInfo {
        self.current = LineInfo {
            step: self.next_step,
            line,
        };
        self.next_step += 1;
        self.current
    }

    /// Makes subsequent instructions part of an earlier step.
    pub fn resume_step(&mut self, info: LineInfo) {
        self.current = info;
    }

    /// Line info of the last emitted instruction.
    pub fn last_line_info(&self) -> Option<LineInfo> {
        self.line_infos.last().copied()
    }

    // === Emission ===

    pub fn emit(&mut self, ins: Instruction) -> usize {
        let pc = self.instructions.len();
        self.instructions.push(ins);
        self.line_infos.push(self.current);
        pc
    }

    /// Emits `ins` as part of the previous instruction's step.
    pub fn emit_continuing(&mut self, ins: Instruction) -> usize {
        if let Some(info) = self.last_line_info() {
            self.current = info;
        }
        self.emit(ins)
    }

    #[inline]
    pub fn current_pc(&self) -> usize {
        self.instructions.len()
    }

    /// Emits a jump whose target is filled in by `patch_jump`.
    pub fn emit_jump(&mut self, ins: fn(u32) -> Instruction) -> usize {
        self.emit(ins(0))
    }

    pub fn emit_jump_to(&mut self, ins: fn(u32) -> Instruction, target: usize) -> usize {
        self.emit(ins(target as u32))
    }

    pub fn patch_jump(&mut self, pc: usize, target: usize) {
        let target = target as u32;
        if let Some(ins) = self.instructions.get_mut(pc) {
            match ins {
                Instruction::Jump(t) | Instruction::JumpIfTrue(t) | Instruction::JumpIfFalse(t) => *t = target,
                other => debug_assert!(false, "patching non-jump {}", other),
            }
        }
    }

    // === Loops ===

    pub fn enter_loop(&mut self) {
        self.loops.push(LoopContext::default());
    }

    pub fn exit_loop(&mut self) -> LoopContext {
        self.loops.pop().unwrap_or_default()
    }

    /// Emits a placeholder jump for `break`. Returns `false` outside a loop.
    pub fn emit_break(&mut self) -> bool {
        let pc = self.emit_jump(Instruction::Jump);
        match self.loops.last_mut() {
            Some(ctx) => {
                ctx.breaks.push(pc);
                true
            }
            None => false,
        }
    }

    pub fn emit_continue(&mut self) -> bool {
        let pc = self.emit_jump(Instruction::Jump);
        match self.loops.last_mut() {
            Some(ctx) => {
                ctx.continues.push(pc);
                true
            }
            None => false,
        }
    }

    // === Locals ===

    pub fn enter_scope(&mut self) {
        self.scopes.push();
    }

    pub fn exit_scope(&mut self) {
        self.scopes.pop();
    }

    pub fn define_param(&mut self, name: &Identifier, ty: TypeId, checked_slot: Option<u16>) -> Result<u16, CompilerError> {
        self.define(name, ty, checked_slot, true)
    }

    pub fn define_local(&mut self, name: &Identifier, ty: TypeId, checked_slot: Option<u16>) -> Result<u16, CompilerError> {
        self.define(name, ty, checked_slot, false)
    }

    fn define(&mut self, name: &Identifier, ty: TypeId, checked_slot: Option<u16>, is_param: bool) -> Result<u16, CompilerError> {
        let slot = self.scopes.add(&name.name, name.location, ty)?;
        debug_assert_eq!(Some(slot), checked_slot, "slot of '{}' diverged from the checker", name.name);
        debug_assert_eq!(slot as usize, self.locals.len());
        self.locals.push(Local {
            name: name.name.clone(),
            ty,
            location: name.location,
            is_param,
        });
        Ok(slot)
    }

    pub fn lookup_local(&self, name: &Identifier) -> Result<u16, CompilerError> {
        self.scopes.find(&name.name).map(|s| s.slot).ok_or_else(|| {
            CompilerError::new(
                format!("Can not find variable or parameter with name '{}'.", name.name),
                name.location,
            )
        })
    }

    // === Finish ===

    /// Whether execution can run past the last instruction.
    fn falls_off_end(&self) -> bool {
        let end = self.instructions.len();
        let last_returns = self.instructions.last().is_some_and(Instruction::is_return);
        !last_returns
            || self
                .instructions
                .iter()
                .any(|ins| ins.jump_target() == Some(end as u32))
    }

    pub fn finish(mut self) -> FunctionCode {
        if self.falls_off_end() {
            match self.last_line_info() {
                Some(info) => self.resume_step(info),
                None => {
                    self.begin_step(self.location.line());
                }
            }
            self.emit(Instruction::Return);
        }
        debug_assert_eq!(self.instructions.len(), self.line_infos.len());
        FunctionCode {
            name: self.name,
            signature: self.signature,
            location: self.location,
            return_type: self.return_type,
            instructions: self.instructions,
            line_infos: self.line_infos,
            locals: self.locals,
            num_parameters: self.num_parameters,
            index: self.index,
        }
    }
}
