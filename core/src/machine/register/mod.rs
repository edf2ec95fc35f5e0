mod flags;

use std::fmt;

pub use self::flags::Flags;

pub const REGISTERS_COUNT: usize = 15;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Register {
    R0,
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,

    I0,
    I1,
    I2,
    I3,

    O0,
    O1,

    T0,
}

use self::Register::*;

/// Table order is the register id order used in bytecode.
pub const REGISTER_TABLE: [Register; REGISTERS_COUNT] = [
    R0, R1, R2, R3, R4, R5, R6, R7,
    I0, I1, I2, I3,
    O0, O1,
    T0,
];

impl Register {
    pub fn id(self) -> i32 {
        self as i32
    }

    pub fn from_id(id: i32) -> Option<Register> {
        usize::try_from(id).ok().and_then(|idx| REGISTER_TABLE.get(idx).copied())
    }

    pub fn name(self) -> &'static str {
        match self {
            R0 => "R0",
            R1 => "R1",
            R2 => "R2",
            R3 => "R3",
            R4 => "R4",
            R5 => "R5",
            R6 => "R6",
            R7 => "R7",
            I0 => "I0",
            I1 => "I1",
            I2 => "I2",
            I3 => "I3",
            O0 => "O0",
            O1 => "O1",
            T0 => "T0",
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub struct RegisterFile {
    slots: [i32; REGISTERS_COUNT],
    pub flags: Flags,
}

impl RegisterFile {
    pub fn new() -> RegisterFile {
        RegisterFile {
            slots: [0; REGISTERS_COUNT],
            flags: Flags::new(),
        }
    }

    pub fn read(&self, reg: Register) -> i32 {
        self.slots[reg as usize]
    }

    pub fn write(&mut self, reg: Register, value: i32) {
        self.slots[reg as usize] = value;
    }

    pub fn update(&mut self, reg: Register, op: impl FnOnce(i32) -> i32) {
        let slot = &mut self.slots[reg as usize];
        *slot = op(*slot);
    }
}

impl Default for RegisterFile {
    fn default() -> RegisterFile {
        RegisterFile::new()
    }
}

impl fmt::Display for RegisterFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for reg in REGISTER_TABLE.iter() {
            write!(f, "{}={} ", reg, self.read(*reg))?;
        }
        write!(f, "flags={:04b}", self.flags.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_table_order() {
        for (idx, reg) in REGISTER_TABLE.iter().enumerate() {
            assert_eq!(reg.id(), idx as i32);
            assert_eq!(Register::from_id(idx as i32), Some(*reg));
        }
        assert_eq!(Register::from_id(-1), None);
        assert_eq!(Register::from_id(REGISTERS_COUNT as i32), None);
    }

    #[test]
    fn starts_zeroed() {
        let file = RegisterFile::new();
        assert!(REGISTER_TABLE.iter().all(|reg| file.read(*reg) == 0));
    }

    #[test]
    fn update_wraps_like_native_arithmetic() {
        let mut file = RegisterFile::new();
        file.write(R3, i32::MAX);
        file.update(R3, |v| v.wrapping_add(1));
        assert_eq!(file.read(R3), i32::MIN);
    }

    #[test]
    fn display_lists_every_register() {
        let mut file = RegisterFile::new();
        file.write(O0, 7);
        let dump = file.to_string();
        assert!(dump.starts_with("R0=0 "));
        assert!(dump.contains("O0=7 "));
        assert!(dump.ends_with("flags=0000"));
    }
}
