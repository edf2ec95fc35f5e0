pub mod core;
pub mod execution;
pub mod instruction;
pub mod register;
pub mod screen;
pub mod timer;

#[cfg(test)]
mod testing;
