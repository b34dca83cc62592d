//! # Image Header
//!
//! Executable images start with an a.out-style exec header. The header is
//! followed by the payload, which is loaded at address 0.
//!
//! Binary format:
//! ```text
//! Offset  Size  Field
//! ──────────────────────────────────
//! 0x00    4     magic / machine id
//! 0x04    4     text_size (code segment)
//! 0x08    4     data_size
//! 0x0C    4     bss_size
//! 0x10    4     syms_size
//! 0x14    4     entry_point
//! 0x18    4     text_reloc_size
//! 0x1C    4     data_reloc_size
//! ```
//!
//! Only `text_size` drives disassembly; the other fields are informational.

use crate::error::{Result, SpecError};
use std::fmt;

/// Parsed exec header
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImageHeader {
    pub magic: u32,
    /// Code segment size in bytes
    pub text_size: u32,
    pub data_size: u32,
    pub bss_size: u32,
    pub syms_size: u32,
    pub entry_point: u32,
    pub text_reloc_size: u32,
    pub data_reloc_size: u32,
}

impl ImageHeader {
    /// Header size in bytes
    pub const SIZE: usize = 32;

    pub fn with_text_size(text_size: u32) -> Self {
        Self {
            text_size,
            ..Self::default()
        }
    }

    /// Serialize to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let fields = [
            self.magic,
            self.text_size,
            self.data_size,
            self.bss_size,
            self.syms_size,
            self.entry_point,
            self.text_reloc_size,
            self.data_reloc_size,
        ];
        let mut bytes = [0u8; Self::SIZE];
        for (chunk, field) in bytes.chunks_exact_mut(4).zip(fields) {
            chunk.copy_from_slice(&field.to_le_bytes());
        }
        bytes
    }

    /// Deserialize from the start of an image
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(SpecError::InvalidHeaderSize {
                expected: Self::SIZE,
                found: bytes.len(),
            });
        }

        let field = |offset: usize| {
            u32::from_le_bytes([
                bytes[offset],
                bytes[offset + 1],
                bytes[offset + 2],
                bytes[offset + 3],
            ])
        };

        Ok(Self {
            magic: field(0x00),
            text_size: field(0x04),
            data_size: field(0x08),
            bss_size: field(0x0C),
            syms_size: field(0x10),
            entry_point: field(0x14),
            text_reloc_size: field(0x18),
            data_reloc_size: field(0x1C),
        })
    }
}

impl fmt::Display for ImageHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Image Header")?;
        writeln!(f, "  Magic:        {:#010x}", self.magic)?;
        writeln!(f, "  Text size:    {} bytes", self.text_size)?;
        writeln!(f, "  Data size:    {} bytes", self.data_size)?;
        writeln!(f, "  BSS size:     {} bytes", self.bss_size)?;
        writeln!(f, "  Symbols:      {} bytes", self.syms_size)?;
        writeln!(f, "  Entry:        {:#010x}", self.entry_point)?;
        writeln!(f, "  Text relocs:  {} bytes", self.text_reloc_size)?;
        writeln!(f, "  Data relocs:  {} bytes", self.data_reloc_size)?;
        Ok(())
    }
}
