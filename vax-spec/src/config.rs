//! # Configuration
//!
//! Sizing of the flat address space and of the image header that precedes
//! the loadable payload.

use crate::image::ImageHeader;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Disassembler configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Config {
    /// Size of the address space in bytes
    pub memory_size: usize,
    /// Bytes skipped at the start of an image before the payload
    pub header_size: usize,
}

impl Config {
    /// Default configuration
    /// - Memory: 64 KB
    /// - Header: 32 bytes (a.out exec header)
    pub const DEFAULT: Self = Self {
        memory_size: 1 << 16,
        header_size: 0x20,
    };

    /// Payload may not start inside the exec header
    pub const MIN_HEADER_SIZE: usize = ImageHeader::SIZE;

    /// Create a new configuration with validation
    pub const fn new(memory_size: usize, header_size: usize) -> Result<Self, ConfigError> {
        let config = Self {
            memory_size,
            header_size,
        };
        if memory_size == 0 {
            return Err(ConfigError::ZeroMemory);
        }
        if header_size < Self::MIN_HEADER_SIZE {
            return Err(ConfigError::HeaderTooSmall);
        }
        Ok(config)
    }

    /// Builder-style override of the address space size
    pub fn with_memory_size(self, memory_size: usize) -> Self {
        Self {
            memory_size,
            ..self
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::new(self.memory_size, self.header_size).map(|_| ())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ memory: {} bytes ({} KB), header: {} bytes }}",
            self.memory_size,
            self.memory_size / 1024,
            self.header_size,
        )
    }
}

/// Configuration error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Address space must hold at least one byte
    ZeroMemory,
    /// Header must cover the whole exec header
    HeaderTooSmall,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroMemory => write!(f, "memory_size must be non-zero"),
            ConfigError::HeaderTooSmall => write!(
                f,
                "header_size must be at least {} bytes",
                Config::MIN_HEADER_SIZE
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
