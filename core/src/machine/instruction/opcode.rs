#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Opcode {
    // Text output
    PUTI,
    PUTC,

    // Register increments
    INC,
    DEC,
    INCEQ,
    DECEQ,

    // ALU on I0/I1 into O0
    ADD,
    SUB,
    MUL,

    // Display
    PIXEL,
    SYNC,

    // Data movement
    STORE,
    MOVE,

    // Control
    HALT,
    SLEEP,
    LABEL,
    JMP,
    JMPEQ,
    JMPNE,
    JMPGT,
    JMPLT,

    CMPI,
    CMPF,
    XOR,
    BUTTON,
    RESTART,
    CLS,
}

/// Operand layout that follows an opcode in the bytecode.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Shape {
    None,
    Register,
    RegisterImm,
    RegisterRegister,
    Label,
}

use self::Opcode::*;

pub const OPS_COUNT: usize = 27;

/// Indexed by opcode value. Mnemonic matching walks this in order.
pub const OPCODE_TABLE: [Opcode; OPS_COUNT] = [
    PUTI, PUTC, INC, DEC,
    INCEQ, DECEQ,
    ADD, SUB, MUL, PIXEL, SYNC, STORE, MOVE, HALT, SLEEP,
    LABEL, JMP, JMPEQ, JMPNE, JMPGT, JMPLT,
    CMPI, CMPF, XOR, BUTTON, RESTART, CLS,
];

impl Opcode {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn decode(value: i32) -> Option<Opcode> {
        usize::try_from(value).ok().and_then(|idx| OPCODE_TABLE.get(idx).copied())
    }

    /// Exact, case-sensitive lookup. A prefix or superset of a mnemonic
    /// does not match.
    pub fn from_mnemonic(token: &[u8]) -> Option<Opcode> {
        OPCODE_TABLE
            .iter()
            .copied()
            .find(|op| op.mnemonic().as_bytes() == token)
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            PUTI => "PUTI",
            PUTC => "PUTC",
            INC => "INC",
            DEC => "DEC",
            INCEQ => "INCEQ",
            DECEQ => "DECEQ",
            ADD => "ADD",
            SUB => "SUB",
            MUL => "MUL",
            PIXEL => "PIXEL",
            SYNC => "SYNC",
            STORE => "STORE",
            MOVE => "MOVE",
            HALT => "HALT",
            SLEEP => "SLEEP",
            LABEL => "LABEL",
            JMP => "JMP",
            JMPEQ => "JMPEQ",
            JMPNE => "JMPNE",
            JMPGT => "JMPGT",
            JMPLT => "JMPLT",
            CMPI => "CMPI",
            CMPF => "CMPF",
            XOR => "XOR",
            BUTTON => "BUTTON",
            RESTART => "RESTART",
            CLS => "CLS",
        }
    }

    pub fn shape(self) -> Shape {
        match self {
            STORE => Shape::RegisterImm,
            MOVE => Shape::RegisterRegister,
            INC | DEC | INCEQ | DECEQ => Shape::Register,
            LABEL | JMP | JMPEQ | JMPNE | JMPGT | JMPLT => Shape::Label,
            _ => Shape::None,
        }
    }

    /// Number of bytecode cells taken by the opcode and its operands.
    pub fn width(self) -> usize {
        match self.shape() {
            Shape::None => 1,
            Shape::Register | Shape::Label => 2,
            Shape::RegisterImm | Shape::RegisterRegister => 3,
        }
    }
}
