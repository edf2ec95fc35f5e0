mod opcode;

pub use self::opcode::*;
