mod alu;
mod compare;
mod inclement;

pub use self::alu::*;
pub use self::compare::*;
pub use self::inclement::*;
