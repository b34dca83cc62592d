//! General register file

use vax_spec::{Address, Register, NUM_REGISTERS};

/// Sixteen 32-bit general registers
///
/// Only the program counter is driven during disassembly; the remaining
/// registers stay zero but are kept so the register numbering of the
/// architecture is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterFile {
    regs: [u32; NUM_REGISTERS],
}

impl RegisterFile {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, reg: Register) -> u32 {
        self.regs[reg.index()]
    }

    #[inline]
    pub fn set(&mut self, reg: Register, value: u32) {
        self.regs[reg.index()] = value;
    }

    #[inline]
    pub fn pc(&self) -> Address {
        self.get(Register::PC)
    }

    #[inline]
    pub fn set_pc(&mut self, pc: Address) {
        self.set(Register::PC, pc);
    }

    /// Move the program counter forward, wrapping at 2^32
    #[inline]
    pub fn advance_pc(&mut self, bytes: usize) {
        let pc = self.pc().wrapping_add(bytes as u32);
        self.set_pc(pc);
    }
}
