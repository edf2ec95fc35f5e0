use std::fmt;

use crate::machine::instruction::{Opcode, Shape};
use crate::machine::register::Register;

/// Assembled program: the source it came from, the flat bytecode and the
/// label table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    source: String,
    bytecode: Vec<i32>,
    labels: Vec<Option<usize>>,
}

impl Program {
    pub(crate) fn new(source: &str, label_slots: usize) -> Program {
        Program {
            source: source.to_owned(),
            bytecode: Vec::new(),
            labels: vec![None; label_slots],
        }
    }

    /// Builds a program from raw cells, bypassing the assembler.
    pub fn from_bytecode(bytecode: Vec<i32>, labels: Vec<Option<usize>>) -> Program {
        Program {
            source: String::new(),
            bytecode,
            labels,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn bytecode(&self) -> &[i32] {
        &self.bytecode
    }

    pub fn labels(&self) -> &[Option<usize>] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.bytecode.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytecode.is_empty()
    }

    /// Offset of the id cell written after `LABEL id`, if that id was defined.
    pub fn label(&self, id: i32) -> Option<usize> {
        let slot = usize::try_from(id).ok()?;
        self.labels.get(slot).copied().flatten()
    }

    pub(crate) fn push(&mut self, cell: i32) {
        self.bytecode.push(cell);
    }

    /// Later definitions overwrite earlier ones.
    pub(crate) fn define_label(&mut self, slot: usize, offset: usize) {
        self.labels[slot] = Some(offset);
    }
}

/// One instruction per line: offset, mnemonic, decoded operands.
impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = &self.bytecode;
        let mut ip = 0;
        while ip < code.len() {
            let op = match Opcode::decode(code[ip]) {
                Some(op) => op,
                None => {
                    writeln!(f, "{:04}  .cell {}", ip, code[ip])?;
                    ip += 1;
                    continue;
                }
            };

            let operand = |n: usize| code.get(ip + n).copied();
            let reg = |n: usize| match operand(n).and_then(Register::from_id) {
                Some(reg) => reg.to_string(),
                None => String::from("?"),
            };
            let imm = |n: usize| operand(n).map_or(String::from("?"), |v| v.to_string());

            match op.shape() {
                Shape::None => writeln!(f, "{:04}  {}", ip, op.mnemonic())?,
                Shape::Register => writeln!(f, "{:04}  {} {}", ip, op.mnemonic(), reg(1))?,
                Shape::Label => writeln!(f, "{:04}  {} {}", ip, op.mnemonic(), imm(1))?,
                Shape::RegisterImm => {
                    writeln!(f, "{:04}  {} {}, {}", ip, op.mnemonic(), reg(1), imm(2))?
                }
                Shape::RegisterRegister => {
                    writeln!(f, "{:04}  {} {}, {}", ip, op.mnemonic(), reg(1), reg(2))?
                }
            }
            ip += op.width();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_lookup_ignores_unset_and_out_of_range_slots() {
        let mut program = Program::new("", 10);
        program.define_label(3, 7);
        assert_eq!(program.label(3), Some(7));
        assert_eq!(program.label(4), None);
        assert_eq!(program.label(10), None);
        assert_eq!(program.label(-1), None);
    }

    #[test]
    fn later_label_definition_wins() {
        let mut program = Program::new("", 10);
        program.define_label(0, 1);
        program.define_label(0, 9);
        assert_eq!(program.label(0), Some(9));
    }

    #[test]
    #[rustfmt::skip]
    fn listing_decodes_operands() {
        let program = Program::from_bytecode(
            vec![
                Opcode::STORE.code(), Register::R0.id(), 5,
                Opcode::MOVE.code(), Register::R1.id(), Register::R0.id(),
                Opcode::JMP.code(), 2,
                Opcode::HALT.code(),
                99,
            ],
            vec![None; 10],
        );
        let listing = program.to_string();
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(
            lines,
            vec![
                "0000  STORE R0, 5",
                "0003  MOVE R1, R0",
                "0006  JMP 2",
                "0008  HALT",
                "0009  .cell 99",
            ]
        );
    }
}
