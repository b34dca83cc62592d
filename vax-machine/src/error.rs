//! Machine error types

use thiserror::Error;
use vax_spec::SpecError;

#[derive(Debug, Error)]
pub enum MachineError {
    #[error("Spec error: {0}")]
    SpecError(#[from] SpecError),

    #[error("Memory out of bounds: {size}-byte access at address {address:#x}")]
    OutOfBounds { address: u64, size: usize },

    #[error("Load overflow: {len} bytes at offset {offset:#x} exceed memory size {capacity:#x}")]
    LoadOverflow {
        offset: usize,
        len: usize,
        capacity: usize,
    },

    #[error("Invalid read size: {0} (expected 1, 2, 4, 8 or 16)")]
    InvalidReadSize(usize),
}

pub type Result<T> = std::result::Result<T, MachineError>;
