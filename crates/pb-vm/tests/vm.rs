//! VM tests over hand-assembled bytecode.

use std::sync::Arc;

use pb_common::{BinaryOp, Location, TypeId};
use pb_runtime::{Completer, ExternalRegistry, Pending, Value};
use pb_vm::{FunctionCode, Instruction, LineInfo, Local, RunOutcome, StepOutcome, Vm, VmError, VmState};
use pretty_assertions::assert_eq;

#[derive(Default)]
struct Host {
    printed: Vec<String>,
    completers: Vec<Completer>,
}

fn externals() -> Arc<ExternalRegistry<Host>> {
    let mut registry = ExternalRegistry::new();
    // 0
    registry.add_sync("print", &[("value", "number")], None, |host: &mut Host, args| {
        host.printed.push(args[0].to_string());
        Value::Nothing
    });
    // 1
    registry.add_async("wait", &[("ms", "number")], Some("number"), |host: &mut Host, _| {
        let (pending, completer) = Pending::channel();
        host.completers.push(completer);
        pending
    });
    Arc::new(registry)
}

/// Assembles a function from `(step, line, instruction)` triples.
fn function(index: u32, name: &str, params: usize, locals: usize, body: Vec<(u32, u32, Instruction)>) -> FunctionCode {
    let (line_infos, instructions) = body
        .into_iter()
        .map(|(step, line, ins)| (LineInfo { step, line }, ins))
        .unzip();
    FunctionCode {
        name: name.to_string(),
        signature: format!("{}()", name),
        location: Location::unknown(),
        return_type: TypeId::NOTHING,
        instructions,
        line_infos,
        locals: (0..locals)
            .map(|i| Local {
                name: format!("v{}", i),
                ty: TypeId::NUMBER,
                location: Location::unknown(),
                is_param: i < params,
            })
            .collect(),
        num_parameters: params,
        index,
    }
}

fn num(n: f64) -> Instruction {
    Instruction::Push(Value::from(n))
}

/// `$main`: print(f(2)) ; print(7)     `f(a)`: return a * 10
fn call_program() -> Arc<[FunctionCode]> {
    let main = function(
        0,
        "$main",
        0,
        0,
        vec![
            (0, 1, num(2.0)),
            (0, 1, Instruction::Call(1)),
            (0, 1, Instruction::CallExt(0)),
            (1, 2, num(7.0)),
            (1, 2, Instruction::CallExt(0)),
            (2, 2, Instruction::Return),
        ],
    );
    let mut f = function(
        1,
        "f",
        1,
        1,
        vec![
            (0, 5, Instruction::Load(0)),
            (0, 5, num(10.0)),
            (0, 5, Instruction::BinaryOp(BinaryOp::Mul)),
            (0, 5, Instruction::Return),
        ],
    );
    f.return_type = TypeId::NUMBER;
    Arc::from(vec![main, f])
}

#[test]
fn test_run_to_completion() {
    let mut vm = Vm::new(call_program(), externals(), Host::default());
    assert_eq!(vm.state(), VmState::Running);
    assert_eq!(vm.run(1000), Ok(RunOutcome::Completed));
    assert_eq!(vm.state(), VmState::Completed);
    assert_eq!(vm.host().printed, vec!["20", "7"]);
    assert!(vm.stack().is_empty());
    assert_eq!(vm.line_number(), None);
}

#[test]
fn test_run_respects_budget() {
    let mut vm = Vm::new(call_program(), externals(), Host::default());
    assert_eq!(vm.run(2), Ok(RunOutcome::BudgetExhausted));
    assert_eq!(vm.depth(), 2);
    assert_eq!(vm.line_number(), Some(5));
}

#[test]
fn test_step_over_skips_callee() {
    let mut vm = Vm::new(call_program(), externals(), Host::default());
    assert_eq!(vm.line_number(), Some(1));
    assert_eq!(vm.step_over(), Ok(StepOutcome::Stepped));
    assert_eq!(vm.depth(), 1);
    assert_eq!(vm.line_number(), Some(2));
    assert_eq!(vm.host().printed, vec!["20"]);
}

#[test]
fn test_step_into_stops_in_callee() {
    let mut vm = Vm::new(call_program(), externals(), Host::default());
    assert_eq!(vm.step_into(), Ok(StepOutcome::Stepped));
    assert_eq!(vm.depth(), 2);
    assert_eq!(vm.line_number(), Some(5));
    let frames: Vec<_> = vm.frames().map(|f| f.code.name.clone()).collect();
    assert_eq!(frames, vec!["$main", "f"]);
    let innermost = vm.frames().last().unwrap();
    let locals: Vec<_> = innermost.locals().map(|(l, v)| (l.name.clone(), v.cloned())).collect();
    assert_eq!(locals, vec![("v0".to_string(), Some(Value::from(2.0)))]);

    // Leaving the callee is a step change too.
    assert_eq!(vm.step_into(), Ok(StepOutcome::Stepped));
    assert_eq!(vm.depth(), 1);
}

#[test]
fn test_async_suspends_until_completed() {
    // var v0 = wait(10) ; print(v0)
    let main = function(
        0,
        "$main",
        0,
        1,
        vec![
            (0, 1, num(10.0)),
            (0, 1, Instruction::CallExt(1)),
            (0, 1, Instruction::Store(0)),
            (1, 2, Instruction::Load(0)),
            (1, 2, Instruction::CallExt(0)),
            (2, 2, Instruction::Return),
        ],
    );
    let mut vm = Vm::new(Arc::from(vec![main]), externals(), Host::default());
    assert_eq!(vm.run(100), Ok(RunOutcome::Suspended));
    assert!(vm.is_suspended());
    assert_eq!(vm.run(100), Ok(RunOutcome::Suspended));
    assert_eq!(vm.state(), VmState::Running);

    let completer = vm.host_mut().completers.pop().unwrap();
    completer.complete(Value::from(10.0));
    assert_eq!(vm.run(100), Ok(RunOutcome::Completed));
    assert_eq!(vm.host().printed, vec!["10"]);
}

#[test]
fn test_step_over_resumes_after_suspension() {
    let main = function(
        0,
        "$main",
        0,
        0,
        vec![
            (0, 1, num(10.0)),
            (0, 1, Instruction::CallExt(1)),
            (0, 1, Instruction::Pop),
            (1, 2, Instruction::Return),
        ],
    );
    let mut vm = Vm::new(Arc::from(vec![main]), externals(), Host::default());
    assert_eq!(vm.step_over(), Ok(StepOutcome::Suspended));
    assert_eq!(vm.step_over(), Ok(StepOutcome::Suspended));
    vm.host_mut().completers.pop().unwrap().complete(Value::from(1.0));
    assert_eq!(vm.step_over(), Ok(StepOutcome::Stepped));
    assert_eq!(vm.line_number(), Some(2));
    assert!(vm.stack().is_empty());
}

#[test]
fn test_step_over_budget_keeps_target() {
    // f() loops 600 times before returning; main calls f in one step.
    let main = function(
        0,
        "$main",
        0,
        0,
        vec![(0, 1, Instruction::Call(1)), (1, 2, Instruction::Return)],
    );
    let f = function(
        1,
        "f",
        0,
        0,
        vec![
            (0, 4, num(600.0)),
            (1, 5, Instruction::Dup),
            (1, 5, num(0.0)),
            (1, 5, Instruction::BinaryOp(BinaryOp::Greater)),
            (1, 5, Instruction::JumpIfFalse(9)),
            (1, 5, num(1.0)),
            (1, 5, Instruction::BinaryOp(BinaryOp::Sub)),
            (1, 5, Instruction::Jump(1)),
            (1, 5, Instruction::Pop),
            (1, 5, Instruction::Pop),
            (2, 6, Instruction::Return),
        ],
    );
    let mut vm = Vm::new(Arc::from(vec![main, f]), externals(), Host::default());
    assert_eq!(vm.step_over(), Ok(StepOutcome::BudgetExhausted));
    assert_eq!(vm.depth(), 2);
    let mut rounds = 0;
    loop {
        match vm.step_over() {
            Ok(StepOutcome::BudgetExhausted) => rounds += 1,
            Ok(StepOutcome::Stepped) => break,
            other => panic!("unexpected {:?}", other),
        }
    }
    assert!(rounds >= 1);
    assert_eq!(vm.depth(), 1);
    assert_eq!(vm.line_number(), Some(2));
}

#[test]
fn test_breakpoints_and_restart() {
    let mut vm = Vm::new(call_program(), externals(), Host::default());
    vm.set_breakpoint(2);
    assert_eq!(vm.run(1000), Ok(RunOutcome::Breakpoint));
    assert_eq!(vm.line_number(), Some(2));
    assert_eq!(vm.host().printed, vec!["20"]);

    vm.clear_breakpoint(2);
    vm.set_breakpoint(5);
    assert_eq!(vm.run(1000), Ok(RunOutcome::Completed));

    vm.restart();
    assert_eq!(vm.state(), VmState::Running);
    assert_eq!(vm.run(1000), Ok(RunOutcome::Breakpoint));
    assert_eq!(vm.line_number(), Some(5));
    assert_eq!(vm.breakpoints().collect::<Vec<_>>(), vec![5]);
}

#[test]
fn test_internal_errors() {
    let main = function(
        0,
        "$main",
        0,
        0,
        vec![
            (0, 1, Instruction::Push(Value::from("a"))),
            (0, 1, Instruction::Push(Value::from("b"))),
            (0, 1, Instruction::BinaryOp(BinaryOp::Concat)),
            (1, 1, Instruction::Return),
        ],
    );
    let mut vm = Vm::new(Arc::from(vec![main]), externals(), Host::default());
    assert_eq!(vm.run(10), Err(VmError::InvalidOperator(BinaryOp::Concat)));

    let underflow = function(0, "$main", 0, 0, vec![(0, 1, Instruction::Pop)]);
    let mut vm = Vm::new(Arc::from(vec![underflow]), externals(), Host::default());
    assert_eq!(vm.run(10), Err(VmError::StackUnderflow));
}

#[test]
fn test_xor_and_concat_instructions() {
    let main = function(
        0,
        "$main",
        0,
        2,
        vec![
            (0, 1, Instruction::Push(Value::from(true))),
            (0, 1, Instruction::Push(Value::from(true))),
            (0, 1, Instruction::BinaryOp(BinaryOp::Xor)),
            (0, 1, Instruction::Store(0)),
            (1, 2, Instruction::Push(Value::from("ab"))),
            (1, 2, Instruction::Push(Value::from("cd"))),
            (1, 2, Instruction::StringConcat),
            (1, 2, Instruction::Store(1)),
            (2, 3, Instruction::Load(0)),
            (2, 3, Instruction::Load(1)),
        ],
    );
    let mut vm = Vm::new(Arc::from(vec![main]), externals(), Host::default());
    assert_eq!(vm.run(10), Ok(RunOutcome::BudgetExhausted));
    assert_eq!(vm.stack(), &[Value::from(false), Value::from("abcd")]);
}

#[test]
fn test_return_drops_callee_operands() {
    // `$main`: print(f()) ; print(f())     `f`: leaves a counter under its result
    let main = function(
        0,
        "$main",
        0,
        0,
        vec![
            (0, 1, Instruction::Call(1)),
            (0, 1, Instruction::CallExt(0)),
            (1, 2, Instruction::Call(1)),
            (1, 2, Instruction::CallExt(0)),
            (2, 2, Instruction::Return),
        ],
    );
    let mut f = function(
        1,
        "f",
        0,
        0,
        vec![
            (0, 5, num(3.0)),
            (1, 6, num(1.0)),
            (1, 6, Instruction::Return),
        ],
    );
    f.return_type = TypeId::NUMBER;
    let mut vm = Vm::new(Arc::from(vec![main, f]), externals(), Host::default());
    assert_eq!(vm.run(100), Ok(RunOutcome::Completed));
    assert_eq!(vm.host().printed, vec!["1", "1"]);
    assert!(vm.stack().is_empty());
}

#[test]
fn test_line_number_through_shared_reference() {
    let mut vm = Vm::new(call_program(), externals(), Host::default());
    let shared = &vm;
    assert_eq!(shared.line_number(), Some(1));
    assert_eq!(vm.run(1000), Ok(RunOutcome::Completed));
    let shared = &vm;
    assert_eq!(shared.line_number(), None);
    assert_eq!(shared.state(), VmState::Completed);
}
