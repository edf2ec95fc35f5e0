use std::io::Write;
use std::time::Duration;

use super::execution::{self, AluOp};
use super::instruction::{Opcode, OPS_COUNT};
use super::register::Register::{self, *};
use super::register::RegisterFile;
use super::screen::FrameBuffer;
use super::timer::FramePacer;
use crate::asm;
use crate::config::MachineConfig;
use crate::error::{AsmError, VmError};
use crate::host::Host;
use crate::program::Program;

/// Why a run stopped.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Exit {
    /// `HALT` executed.
    Halted,
    /// The instruction pointer ran off the end of the bytecode.
    Finished,
    /// The host asked to stop.
    Cancelled,
}

/// What the handler wants done with the instruction pointer.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Flow {
    Next,
    Jump(usize),
    Halt,
    Cancel,
}

type Handler = fn(&mut Machine, &mut dyn Host) -> Result<Flow, VmError>;

/// Indexed by opcode value.
const DECODE_TABLE: [Handler; OPS_COUNT] = [
    Machine::puti,
    Machine::putc,
    Machine::inc,
    Machine::dec,
    Machine::inceq,
    Machine::deceq,
    Machine::add,
    Machine::sub,
    Machine::mul,
    Machine::pixel,
    Machine::sync,
    Machine::store,
    Machine::mov,
    Machine::halt,
    Machine::sleep,
    Machine::label,
    Machine::jmp,
    Machine::jmpeq,
    Machine::jmpne,
    Machine::jmpgt,
    Machine::jmplt,
    Machine::cmpi,
    Machine::cmpf,
    Machine::xor,
    Machine::button,
    Machine::restart,
    Machine::cls,
];

/// The whole VM context: program, registers, flags, frame buffer and pacing
/// state. Nothing here is shared; a fresh machine is a fresh console.
pub struct Machine {
    pub reg: RegisterFile,
    pub screen: FrameBuffer,
    pub timer: FramePacer,
    program: Program,
    config: MachineConfig,
    ip: usize,
}

impl Machine {
    pub fn new(program: Program, config: MachineConfig) -> Machine {
        Machine {
            reg: RegisterFile::new(),
            screen: FrameBuffer::new(),
            timer: FramePacer::new(config.frame_interval, config.pace_poll),
            program,
            config,
            ip: 0,
        }
    }

    pub fn new_with_source(source: &str, config: MachineConfig) -> Result<Machine, AsmError> {
        let program = asm::assemble(source, &config.asm)?;
        Ok(Machine::new(program, config))
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn ip(&self) -> usize {
        self.ip
    }

    /// Runs until `HALT`, the end of the bytecode, or a cancel request. The
    /// host is asked about cancellation before every instruction.
    pub fn run(&mut self, host: &mut dyn Host) -> Result<Exit, VmError> {
        loop {
            if self.ip >= self.program.len() {
                log::info!("program finished after {} frames", self.timer.frames);
                return Ok(Exit::Finished);
            }
            if host.cancel_requested() {
                log::info!("cancelled at {:04} after {} frames", self.ip, self.timer.frames);
                return Ok(Exit::Cancelled);
            }
            if let Some(exit) = self.step(host)? {
                log::info!("{:?} at {:04} after {} frames", exit, self.ip, self.timer.frames);
                return Ok(exit);
            }
        }
    }

    /// Executes the instruction under the pointer. Returns `Some` once the
    /// machine has stopped. A host that must get control back after every
    /// instruction drives the machine through this directly.
    pub fn step(&mut self, host: &mut dyn Host) -> Result<Option<Exit>, VmError> {
        let code = self.program.bytecode();
        let value = match code.get(self.ip) {
            Some(&value) => value,
            None => return Ok(Some(Exit::Finished)),
        };
        let opcode = Opcode::decode(value).ok_or(VmError::InvalidOpcode { ip: self.ip, value })?;
        if self.ip + opcode.width() > code.len() {
            return Err(VmError::TruncatedInstruction { ip: self.ip });
        }

        log::debug!("ip: {:04}, op: {}, {}", self.ip, opcode.mnemonic(), &self.reg);

        let instruction = DECODE_TABLE[opcode.code() as usize];
        match instruction(self, host)? {
            Flow::Next => self.ip += opcode.width(),
            Flow::Jump(target) => self.ip = target,
            Flow::Halt => {
                self.ip = self.program.len();
                return Ok(Some(Exit::Halted));
            }
            Flow::Cancel => {
                self.ip += opcode.width();
                return Ok(Some(Exit::Cancelled));
            }
        }

        Ok(None)
    }

    fn operand(&self, n: usize) -> i32 {
        self.program.bytecode()[self.ip + n]
    }

    fn reg_operand(&self, n: usize) -> Result<Register, VmError> {
        let value = self.operand(n);
        Register::from_id(value).ok_or(VmError::InvalidOperand { ip: self.ip + n, value })
    }

    fn puti(&mut self, host: &mut dyn Host) -> Result<Flow, VmError> {
        let out = host.text_out();
        write!(out, "{}", self.reg.read(I0))?;
        out.flush()?;

        Ok(Flow::Next)
    }

    fn putc(&mut self, host: &mut dyn Host) -> Result<Flow, VmError> {
        let out = host.text_out();
        out.write_all(&[self.reg.read(I0) as u8])?;
        out.flush()?;

        Ok(Flow::Next)
    }

    fn inc_dec(&mut self, op: fn(i32) -> i32, gated: bool) -> Result<Flow, VmError> {
        let reg = self.reg_operand(1)?;
        if !gated || self.reg.flags.equal() {
            self.reg.update(reg, op);
        }

        Ok(Flow::Next)
    }

    fn inc(&mut self, _host: &mut dyn Host) -> Result<Flow, VmError> {
        self.inc_dec(execution::inc, false)
    }

    fn dec(&mut self, _host: &mut dyn Host) -> Result<Flow, VmError> {
        self.inc_dec(execution::dec, false)
    }

    fn inceq(&mut self, _host: &mut dyn Host) -> Result<Flow, VmError> {
        self.inc_dec(execution::inc, true)
    }

    fn deceq(&mut self, _host: &mut dyn Host) -> Result<Flow, VmError> {
        self.inc_dec(execution::dec, true)
    }

    fn alu_command(&mut self, op: AluOp) -> Result<Flow, VmError> {
        let res = op(self.reg.read(I0), self.reg.read(I1));
        self.reg.write(O0, res);

        Ok(Flow::Next)
    }

    fn add(&mut self, _host: &mut dyn Host) -> Result<Flow, VmError> {
        self.alu_command(execution::add)
    }

    fn sub(&mut self, _host: &mut dyn Host) -> Result<Flow, VmError> {
        self.alu_command(execution::sub)
    }

    fn mul(&mut self, _host: &mut dyn Host) -> Result<Flow, VmError> {
        self.alu_command(execution::mul)
    }

    fn xor(&mut self, _host: &mut dyn Host) -> Result<Flow, VmError> {
        self.alu_command(execution::xor)
    }

    fn pixel(&mut self, _host: &mut dyn Host) -> Result<Flow, VmError> {
        let x = self.reg.read(I0);
        let y = self.reg.read(I1);
        let color = self.reg.read(I2) as u32;

        if !self.screen.set(x, y, color) {
            log::trace!("pixel ({}, {}) is off screen", x, y);
        }

        Ok(Flow::Next)
    }

    fn sync(&mut self, host: &mut dyn Host) -> Result<Flow, VmError> {
        let now = self.timer.wait(host);
        self.reg.write(T0, now as i32);
        host.present(&self.screen);

        if host.cancel_requested() {
            return Ok(Flow::Cancel);
        }
        Ok(Flow::Next)
    }

    fn store(&mut self, _host: &mut dyn Host) -> Result<Flow, VmError> {
        let reg = self.reg_operand(1)?;
        self.reg.write(reg, self.operand(2));

        Ok(Flow::Next)
    }

    fn mov(&mut self, _host: &mut dyn Host) -> Result<Flow, VmError> {
        let to = self.reg_operand(1)?;
        let from = self.reg_operand(2)?;
        self.reg.write(to, self.reg.read(from));

        Ok(Flow::Next)
    }

    fn halt(&mut self, _host: &mut dyn Host) -> Result<Flow, VmError> {
        Ok(Flow::Halt)
    }

    fn sleep(&mut self, host: &mut dyn Host) -> Result<Flow, VmError> {
        let ms = self.reg.read(I0).max(0) as u64;
        host.sleep(Duration::from_millis(ms));

        Ok(Flow::Next)
    }

    fn label(&mut self, _host: &mut dyn Host) -> Result<Flow, VmError> {
        Ok(Flow::Next)
    }

    /// Taken jumps land on the instruction after `LABEL id`.
    fn branch(&mut self, cond: bool) -> Result<Flow, VmError> {
        if !cond {
            return Ok(Flow::Next);
        }

        let id = self.operand(1);
        let target = self
            .program
            .label(id)
            .and_then(|offset| offset.checked_add(1))
            .ok_or(VmError::UndefinedLabel(id))?;
        Ok(Flow::Jump(target))
    }

    fn jmp(&mut self, _host: &mut dyn Host) -> Result<Flow, VmError> {
        self.branch(true)
    }

    fn jmpeq(&mut self, _host: &mut dyn Host) -> Result<Flow, VmError> {
        self.branch(self.reg.flags.equal())
    }

    fn jmpne(&mut self, _host: &mut dyn Host) -> Result<Flow, VmError> {
        self.branch(!self.reg.flags.equal())
    }

    fn jmpgt(&mut self, _host: &mut dyn Host) -> Result<Flow, VmError> {
        self.branch(self.reg.flags.greater())
    }

    fn jmplt(&mut self, _host: &mut dyn Host) -> Result<Flow, VmError> {
        self.branch(self.reg.flags.less())
    }

    fn cmpi(&mut self, _host: &mut dyn Host) -> Result<Flow, VmError> {
        let a = self.reg.read(I0);
        let b = self.reg.read(I1);
        execution::cmpi(&mut self.reg.flags, a, b);

        Ok(Flow::Next)
    }

    // Reserved: assembles but has no effect.
    fn cmpf(&mut self, _host: &mut dyn Host) -> Result<Flow, VmError> {
        Ok(Flow::Next)
    }

    fn button(&mut self, host: &mut dyn Host) -> Result<Flow, VmError> {
        let held = host.button_held(self.reg.read(I0));
        self.reg.write(O0, held as i32);

        Ok(Flow::Next)
    }

    fn restart(&mut self, _host: &mut dyn Host) -> Result<Flow, VmError> {
        Ok(Flow::Jump(0))
    }

    fn cls(&mut self, _host: &mut dyn Host) -> Result<Flow, VmError> {
        self.screen.clear(self.config.background);

        Ok(Flow::Next)
    }
}
