//! Register machine for a 128×128 pixel console.
//!
//! Source text goes through [`asm::assemble`] into a [`Program`], which a
//! [`Machine`] executes against a [`Host`] that owns the clock, the buttons
//! and the screen.
//!
//! The machine runs a plain fetch/decode loop over a table of handler
//! functions. A host that must regain control after every instruction can
//! call [`Machine::step`] from its own tick instead of [`Machine::run`];
//! both execute the same handlers, so behaviour does not depend on the
//! driver.

pub mod asm;
pub mod config;
pub mod error;
pub mod host;
pub mod machine;
pub mod program;

pub use config::{AsmConfig, MachineConfig};
pub use error::{AsmError, VmError, FATAL_EXIT_STATUS};
pub use host::{Clock, Host, Input, Presenter, SystemClock};
pub use machine::core::{Exit, Machine};
pub use machine::screen::FrameBuffer;
pub use program::Program;
