use std::time::Duration;

pub const PROGRAM_LIMIT: usize = 500;
pub const LABEL_SLOTS: usize = 10;
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);
pub const PACE_POLL: Duration = Duration::from_millis(2);

/// Byte pattern `0x33` spread across every channel of a cell.
pub const BACKGROUND: u32 = 0x3333_3333;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AsmConfig {
    /// Maximum number of bytecode cells a program may occupy.
    pub program_capacity: usize,
    /// Number of label ids, valid ids are `0..label_slots`.
    pub label_slots: usize,
}

impl Default for AsmConfig {
    fn default() -> AsmConfig {
        AsmConfig {
            program_capacity: PROGRAM_LIMIT,
            label_slots: LABEL_SLOTS,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MachineConfig {
    pub asm: AsmConfig,
    /// Minimum wall time between two sync points.
    pub frame_interval: Duration,
    /// How long to sleep between clock polls while pacing a sync point.
    pub pace_poll: Duration,
    /// Value written to every frame buffer cell by `CLS`.
    pub background: u32,
}

impl Default for MachineConfig {
    fn default() -> MachineConfig {
        MachineConfig {
            asm: AsmConfig::default(),
            frame_interval: FRAME_INTERVAL,
            pace_poll: PACE_POLL,
            background: BACKGROUND,
        }
    }
}
