//! Statement compilation.

use pb_common::{BinaryOp, CompilerError, Location, TypeId};
use pb_runtime::Value;
use pb_syntax::ast::{IfStmt, RepeatStmt, Stmt, StmtKind, WhileStmt};
use pb_vm::Instruction;

use crate::context::CodegenContext;
use crate::expr::compile_expr;
use crate::func::FuncBuilder;

/// Compile a statement list in a new lexical scope.
pub fn compile_block(stmts: &[Stmt], ctx: &CodegenContext, func: &mut FuncBuilder) -> Result<(), CompilerError> {
    func.enter_scope();
    for stmt in stmts {
        compile_stmt(stmt, ctx, func)?;
    }
    func.exit_scope();
    Ok(())
}

/// Compile a statement. Each statement opens its own debugger step.
pub fn compile_stmt(stmt: &Stmt, ctx: &CodegenContext, func: &mut FuncBuilder) -> Result<(), CompilerError> {
    let line = stmt.location.line();
    match &stmt.kind {
        StmtKind::Comment(_) => {}

        StmtKind::Expr(expr) => {
            func.begin_step(line);
            compile_expr(expr, ctx, func)?;
            // Discard whatever the expression left behind.
            let ty = expr.ty.ok_or_else(|| ctx.unchecked("expression", expr.location))?;
            if !ty.is_nothing() {
                func.emit(Instruction::Pop);
            }
        }

        StmtKind::Var(var) => {
            func.begin_step(line);
            compile_expr(&var.value, ctx, func)?;
            let ty = var.ty.ok_or_else(|| ctx.unchecked("variable", var.name.location))?;
            let slot = func.define_local(&var.name, ty, var.slot)?;
            func.emit(Instruction::Store(slot));
        }

        StmtKind::Assign(assign) => {
            func.begin_step(line);
            compile_expr(&assign.value, ctx, func)?;
            let slot = func.lookup_local(&assign.target)?;
            func.emit(Instruction::Store(slot));
        }

        StmtKind::If(if_stmt) => compile_if(if_stmt, line, ctx, func)?,
        StmtKind::While(while_stmt) => compile_while(while_stmt, line, ctx, func)?,
        StmtKind::Repeat(repeat) => compile_repeat(repeat, line, ctx, func)?,

        StmtKind::Return(value) => {
            func.begin_step(line);
            if let Some(value) = value {
                compile_expr(value, ctx, func)?;
            }
            func.emit(Instruction::Return);
        }

        StmtKind::Break => {
            func.begin_step(line);
            if !func.emit_break() {
                return Err(outside_loop("break", stmt.location));
            }
        }

        StmtKind::Continue => {
            func.begin_step(line);
            if !func.emit_continue() {
                return Err(outside_loop("continue", stmt.location));
            }
        }
    }
    Ok(())
}

fn outside_loop(keyword: &str, location: Location) -> CompilerError {
    CompilerError::new(
        format!("'{}' can only be used inside a 'while' or 'repeat' loop.", keyword),
        location,
    )
}

// ═══════════════════════════════════════════════════════════════════════════
// Control flow
// ═══════════════════════════════════════════════════════════════════════════

fn compile_if(stmt: &IfStmt, line: u32, ctx: &CodegenContext, func: &mut FuncBuilder) -> Result<(), CompilerError> {
    func.begin_step(line);
    compile_expr(&stmt.condition, ctx, func)?;
    let else_jump = func.emit_jump(Instruction::JumpIfFalse);

    compile_block(&stmt.then_block, ctx, func)?;
    let end_jump = func.emit_continuing(Instruction::Jump(0));

    func.patch_jump(else_jump, func.current_pc());
    compile_block(&stmt.else_block, ctx, func)?;
    func.patch_jump(end_jump, func.current_pc());
    Ok(())
}

fn compile_while(stmt: &WhileStmt, line: u32, ctx: &CodegenContext, func: &mut FuncBuilder) -> Result<(), CompilerError> {
    let header = func.begin_step(line);
    let loop_start = func.current_pc();
    compile_expr(&stmt.condition, ctx, func)?;
    let exit_jump = func.emit_jump(Instruction::JumpIfFalse);

    func.enter_loop();
    compile_block(&stmt.body, ctx, func)?;

    // Back-edge belongs to the header step.
    func.resume_step(header);
    func.emit_jump_to(Instruction::Jump, loop_start);

    let loop_end = func.current_pc();
    func.patch_jump(exit_jump, loop_end);
    let fixups = func.exit_loop();
    for pc in fixups.continues {
        func.patch_jump(pc, loop_start);
    }
    for pc in fixups.breaks {
        func.patch_jump(pc, loop_end);
    }
    Ok(())
}

/// The counter lives on the operand stack for the whole loop:
///
/// ```text
///         <count>
/// head:   dup; push 0; binaryOp >; jumpIfFalse exit
///         <body>
/// next:   push 1; binaryOp -; jump head
/// exit:   pop
/// ```
fn compile_repeat(stmt: &RepeatStmt, line: u32, ctx: &CodegenContext, func: &mut FuncBuilder) -> Result<(), CompilerError> {
    let header = func.begin_step(line);
    compile_expr(&stmt.count, ctx, func)?;
    debug_assert_eq!(stmt.count.ty, Some(TypeId::NUMBER));

    let loop_start = func.current_pc();
    func.emit(Instruction::Dup);
    func.emit(Instruction::Push(Value::Number(0.0)));
    func.emit(Instruction::BinaryOp(BinaryOp::Greater));
    let exit_jump = func.emit_jump(Instruction::JumpIfFalse);

    func.enter_loop();
    compile_block(&stmt.body, ctx, func)?;

    func.resume_step(header);
    let next = func.current_pc();
    func.emit(Instruction::Push(Value::Number(1.0)));
    func.emit(Instruction::BinaryOp(BinaryOp::Sub));
    func.emit_jump_to(Instruction::Jump, loop_start);

    let loop_end = func.current_pc();
    func.emit(Instruction::Pop);
    func.patch_jump(exit_jump, loop_end);
    let fixups = func.exit_loop();
    for pc in fixups.continues {
        func.patch_jump(pc, next);
    }
    for pc in fixups.breaks {
        func.patch_jump(pc, loop_end);
    }
    Ok(())
}
