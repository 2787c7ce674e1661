//! Instruction set.

use std::fmt;

use pb_common::{BinaryOp, UnaryOp};
use pb_runtime::Value;

/// One VM instruction. Jump targets are absolute instruction indices within
/// the enclosing function.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    Push(Value),
    Pop,
    Dup,
    Load(u16),
    Store(u16),
    Jump(u32),
    JumpIfTrue(u32),
    JumpIfFalse(u32),
    /// Call a user function by index.
    Call(u32),
    /// Call an external function by registry index.
    CallExt(u32),
    Return,
    UnaryOp(UnaryOp),
    BinaryOp(BinaryOp),
    StringConcat,
}

impl Instruction {
    #[inline]
    pub fn is_return(&self) -> bool {
        matches!(self, Instruction::Return)
    }

    /// The jump target, if this is a jump.
    #[inline]
    pub fn jump_target(&self) -> Option<u32> {
        match self {
            Instruction::Jump(t) | Instruction::JumpIfTrue(t) | Instruction::JumpIfFalse(t) => Some(*t),
            _ => None,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Push(Value::String(s)) => write!(f, "push {:?}", s),
            Instruction::Push(v) => write!(f, "push {}", v),
            Instruction::Pop => f.write_str("pop"),
            Instruction::Dup => f.write_str("dup"),
            Instruction::Load(slot) => write!(f, "load {}", slot),
            Instruction::Store(slot) => write!(f, "store {}", slot),
            Instruction::Jump(t) => write!(f, "jump {}", t),
            Instruction::JumpIfTrue(t) => write!(f, "jumpIfTrue {}", t),
            Instruction::JumpIfFalse(t) => write!(f, "jumpIfFalse {}", t),
            Instruction::Call(i) => write!(f, "call {}", i),
            Instruction::CallExt(i) => write!(f, "callExt {}", i),
            Instruction::Return => f.write_str("return"),
            Instruction::UnaryOp(op) => write!(f, "unaryOp {}", op),
            Instruction::BinaryOp(op) => write!(f, "binaryOp {}", op),
            Instruction::StringConcat => f.write_str("stringConcat"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Instruction::Push(Value::from(1.0)).to_string(), "push 1");
        assert_eq!(Instruction::Push(Value::from("a\"b")).to_string(), "push \"a\\\"b\"");
        assert_eq!(Instruction::BinaryOp(BinaryOp::Greater).to_string(), "binaryOp >");
        assert_eq!(Instruction::JumpIfFalse(7).to_string(), "jumpIfFalse 7");
    }

    #[test]
    fn test_jump_target() {
        assert_eq!(Instruction::Jump(3).jump_target(), Some(3));
        assert_eq!(Instruction::Return.jump_target(), None);
    }
}
