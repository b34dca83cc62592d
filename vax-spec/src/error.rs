//! # Error Types for the VAX architecture definitions

use crate::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpecError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("Invalid header size: expected {expected} bytes, found {found} bytes")]
    InvalidHeaderSize { expected: usize, found: usize },

    #[error("Unknown opcode: {0:#x}")]
    UnknownOpcode(u16),
}

impl SpecError {
    /// Check if this error must abort a disassembly run
    ///
    /// An unknown opcode is rendered as a data word and decoding continues.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, SpecError::UnknownOpcode(_))
    }
}

pub type Result<T> = std::result::Result<T, SpecError>;
