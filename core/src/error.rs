use std::io;

use thiserror::Error;

/// Process exit status used when assembly fails.
pub const FATAL_EXIT_STATUS: i32 = 100;

/// A required token was missing or malformed while assembling.
///
/// Every variant is fatal: no partial program is handed back.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AsmError {
    #[error("expected a register name")]
    ExpectedRegister,
    #[error("expected an integer literal")]
    ExpectedInteger,
    #[error("integer literal {0} does not fit in a 32-bit cell")]
    IntegerOutOfRange(i64),
    #[error("label id {0} is out of range")]
    LabelOutOfRange(i32),
    #[error("program exceeds {0} bytecode cells")]
    ProgramTooLarge(usize),
}

#[derive(Debug, Error)]
pub enum VmError {
    #[error("invalid opcode {value} at {ip}")]
    InvalidOpcode { ip: usize, value: i32 },
    #[error("invalid register operand {value} at {ip}")]
    InvalidOperand { ip: usize, value: i32 },
    #[error("jump to undefined label {0}")]
    UndefinedLabel(i32),
    #[error("instruction at {ip} runs past the end of the bytecode")]
    TruncatedInstruction { ip: usize },
    #[error("text output failed: {0}")]
    Output(#[from] io::Error),
}
