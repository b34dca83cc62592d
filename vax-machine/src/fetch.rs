//! Instruction stream fetch unit
//!
//! All bytes of an instruction are consumed through [`Fetcher`], which reads
//! at the program counter and advances it by exactly the number of bytes
//! read. The counter never moves backwards.

use crate::error::Result;
use crate::memory::AddressSpace;
use crate::registers::RegisterFile;
use vax_spec::Address;

#[derive(Debug, Clone)]
pub struct Fetcher<'a> {
    memory: &'a AddressSpace,
    registers: RegisterFile,
}

impl<'a> Fetcher<'a> {
    /// Start fetching at address 0
    pub fn new(memory: &'a AddressSpace) -> Self {
        Self::at(memory, 0)
    }

    /// Start fetching at `pc`
    pub fn at(memory: &'a AddressSpace, pc: Address) -> Self {
        let mut registers = RegisterFile::new();
        registers.set_pc(pc);
        Self { memory, registers }
    }

    #[inline]
    pub fn pc(&self) -> Address {
        self.registers.pc()
    }

    pub fn memory(&self) -> &'a AddressSpace {
        self.memory
    }

    /// Read `size` bytes at the program counter and step past them
    pub fn fetch(&mut self, size: usize) -> Result<u128> {
        let value = self.memory.read(self.pc(), size)?;
        self.registers.advance_pc(size);
        Ok(value)
    }

    pub fn fetch_byte(&mut self) -> Result<u8> {
        Ok(self.fetch(1)? as u8)
    }

    /// Fetch a 1-, 2- or 4-byte displacement, sign-extended to 32 bits
    pub fn fetch_displacement(&mut self, width: usize) -> Result<u32> {
        let raw = self.fetch(width)?;
        Ok(match width {
            1 => raw as u8 as i8 as i32 as u32,
            2 => raw as u16 as i16 as i32 as u32,
            _ => raw as u32,
        })
    }
}
