//! Flat byte-addressable memory

use crate::error::{MachineError, Result};
use vax_spec::Address;

/// Fixed-size, zero-initialized address space starting at address 0
///
/// ## Invariants
///
/// - Every read lies entirely inside the buffer
/// - Reads never mutate; writes happen only through [`AddressSpace::load`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressSpace {
    data: Vec<u8>,
}

impl AddressSpace {
    /// Allocate a zeroed address space of `size` bytes
    pub fn new(size: usize) -> Self {
        AddressSpace {
            data: vec![0; size],
        }
    }

    /// Allocate an address space holding exactly `bytes`
    pub fn from_bytes(bytes: &[u8]) -> Self {
        AddressSpace {
            data: bytes.to_vec(),
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Copy `bytes` into memory starting at `offset`
    pub fn load(&mut self, bytes: &[u8], offset: usize) -> Result<()> {
        let end = offset
            .checked_add(bytes.len())
            .filter(|end| *end <= self.data.len())
            .ok_or(MachineError::LoadOverflow {
                offset,
                len: bytes.len(),
                capacity: self.data.len(),
            })?;
        self.data[offset..end].copy_from_slice(bytes);
        Ok(())
    }

    /// Read `size` bytes at `address` as a little-endian unsigned value
    ///
    /// `size` must be 1, 2, 4, 8 or 16. Sixteen-byte reads keep the full
    /// bit pattern in the `u128`.
    pub fn read(&self, address: Address, size: usize) -> Result<u128> {
        if !matches!(size, 1 | 2 | 4 | 8 | 16) {
            return Err(MachineError::InvalidReadSize(size));
        }
        let bytes = self.slice(address, size)?;
        Ok(bytes
            .iter()
            .rev()
            .fold(0u128, |value, &byte| (value << 8) | byte as u128))
    }

    pub fn read_byte(&self, address: Address) -> Result<u8> {
        Ok(self.slice(address, 1)?[0])
    }

    /// Borrow `len` raw bytes starting at `address`
    pub fn slice(&self, address: Address, len: usize) -> Result<&[u8]> {
        let start = address as usize;
        start
            .checked_add(len)
            .filter(|end| *end <= self.data.len())
            .map(|end| &self.data[start..end])
            .ok_or(MachineError::OutOfBounds {
                address: address as u64,
                size: len,
            })
    }
}
