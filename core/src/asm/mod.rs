//! Text to bytecode.
//!
//! ```text
//! STORE I0, 10     ; register, optional comma, integer literal
//! MOVE R1, I0      ; destination, source
//! LABEL 0          ; label ids are 0..label_slots
//! INC R1
//! JMPNE 0
//! HALT
//! ```
//!
//! Each cycle skips whitespace, then matches the next token exactly against
//! the mnemonic table. A token that is not a mnemonic ends assembly
//! successfully with whatever was produced so far; trailing prose after
//! the last instruction is therefore ignored. Operands are read from the
//! rest of the line and anything after them on that line is skipped. A
//! missing or malformed operand is a fatal [`AsmError`].

pub mod scanner;

use crate::config::AsmConfig;
use crate::error::AsmError;
use crate::machine::instruction::{Opcode, Shape};
use crate::machine::register::{Register, REGISTER_TABLE};
use crate::program::Program;

use self::scanner::*;

pub fn assemble(source: &str, config: &AsmConfig) -> Result<Program, AsmError> {
    let mut asm = Assembler {
        src: source.as_bytes(),
        config: *config,
        program: Program::new(source, config.label_slots),
    };
    asm.run()?;

    log::debug!(
        "assembled {} cells, {} labels defined",
        asm.program.len(),
        asm.program.labels().iter().flatten().count()
    );
    Ok(asm.program)
}

struct Assembler<'a> {
    src: &'a [u8],
    config: AsmConfig,
    program: Program,
}

impl<'a> Assembler<'a> {
    fn run(&mut self) -> Result<(), AsmError> {
        let src = self.src;
        let mut p = 0;

        loop {
            let t = match skip_space(src, p) {
                Some(t) => t,
                None => break,
            };

            let word = token(src, t);
            let opcode = match Opcode::from_mnemonic(word) {
                Some(opcode) => opcode,
                None => {
                    log::info!(
                        "stopped at offset {}: {:?} is not an instruction",
                        t,
                        String::from_utf8_lossy(word)
                    );
                    break;
                }
            };

            self.emit(opcode.code())?;
            let t = t + opcode.mnemonic().len();

            p = match opcode.shape() {
                Shape::None => t,
                Shape::Register => {
                    let (reg, t) = self.register(t)?;
                    self.emit(reg.id())?;
                    next_eol(src, t)
                }
                Shape::RegisterImm => {
                    let (reg, t) = self.register(t)?;
                    self.emit(reg.id())?;

                    let t = self.second_operand(t).ok_or(AsmError::ExpectedInteger)?;
                    let eol = next_eol(src, t);
                    let value = literal(&src[t..eol])?;
                    self.emit(value)?;
                    eol
                }
                Shape::RegisterRegister => {
                    let (dst, t) = self.register(t)?;
                    self.emit(dst.id())?;

                    let t = self.second_operand(t).ok_or(AsmError::ExpectedRegister)?;
                    let (from, _) = self.register(t)?;
                    self.emit(from.id())?;
                    next_eol(src, t)
                }
                Shape::Label => {
                    let t = skip_space(src, t).ok_or(AsmError::ExpectedInteger)?;
                    let eol = next_eol(src, t);
                    let id = literal(&src[t..eol])?;
                    let slot = usize::try_from(id)
                        .ok()
                        .filter(|&slot| slot < self.config.label_slots)
                        .ok_or(AsmError::LabelOutOfRange(id))?;
                    self.emit(id)?;

                    if opcode == Opcode::LABEL {
                        let offset = self.program.len() - 1;
                        self.program.define_label(slot, offset);
                    }
                    eol
                }
            };
        }

        Ok(())
    }

    fn emit(&mut self, cell: i32) -> Result<(), AsmError> {
        if self.program.len() >= self.config.program_capacity {
            return Err(AsmError::ProgramTooLarge(self.config.program_capacity));
        }
        self.program.push(cell);
        Ok(())
    }

    /// Reads a register name after optional whitespace. Names are matched
    /// as a prefix of the remaining text, first table entry wins.
    fn register(&self, p: usize) -> Result<(Register, usize), AsmError> {
        let t = skip_space(self.src, p).ok_or(AsmError::ExpectedRegister)?;
        let rest = &self.src[t..];
        let reg = REGISTER_TABLE
            .iter()
            .copied()
            .find(|reg| rest.starts_with(reg.name().as_bytes()))
            .ok_or(AsmError::ExpectedRegister)?;

        Ok((reg, t + reg.name().len()))
    }

    /// Skips the separator between the first and second operand.
    fn second_operand(&self, p: usize) -> Option<usize> {
        let t = skip_space(self.src, p)?;
        let t = skip_comma(self.src, t)?;
        skip_space(self.src, t)
    }
}

/// Integer literal in a 32-bit cell. Values above `i32::MAX` up to
/// `u32::MAX` are kept as their two's complement bit pattern.
fn literal(text: &[u8]) -> Result<i32, AsmError> {
    let value = integer(text).ok_or(AsmError::ExpectedInteger)?;
    if value < i64::from(i32::MIN) || value > i64::from(u32::MAX) {
        return Err(AsmError::IntegerOutOfRange(value));
    }
    Ok(value as i32)
}
