//! CLI library components for the DSR assembler.

pub mod inputs;
pub mod logging;
