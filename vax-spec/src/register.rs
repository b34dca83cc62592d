//! Register definitions for the VAX general register file

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of general registers
pub const NUM_REGISTERS: usize = 16;

/// General register (r0-r15)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Register {
    R0 = 0,
    R1 = 1,
    R2 = 2,
    R3 = 3,
    R4 = 4,
    R5 = 5,
    R6 = 6,
    R7 = 7,
    R8 = 8,
    R9 = 9,
    R10 = 10,
    R11 = 11,
    R12 = 12, // ap - argument pointer
    R13 = 13, // fp - frame pointer
    R14 = 14, // sp - stack pointer
    R15 = 15, // pc - program counter
}

impl Register {
    pub const AP: Self = Self::R12;
    pub const FP: Self = Self::R13;
    pub const SP: Self = Self::R14;
    pub const PC: Self = Self::R15;

    const ALL: [Register; NUM_REGISTERS] = [
        Self::R0,
        Self::R1,
        Self::R2,
        Self::R3,
        Self::R4,
        Self::R5,
        Self::R6,
        Self::R7,
        Self::R8,
        Self::R9,
        Self::R10,
        Self::R11,
        Self::R12,
        Self::R13,
        Self::R14,
        Self::R15,
    ];

    #[inline]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Register selected by the low nibble of a mode byte
    #[inline]
    pub fn from_nibble(byte: u8) -> Self {
        Self::ALL[(byte & 0x0F) as usize]
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn is_pc(self) -> bool {
        self == Self::PC
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::R0 => "r0",
            Self::R1 => "r1",
            Self::R2 => "r2",
            Self::R3 => "r3",
            Self::R4 => "r4",
            Self::R5 => "r5",
            Self::R6 => "r6",
            Self::R7 => "r7",
            Self::R8 => "r8",
            Self::R9 => "r9",
            Self::R10 => "r10",
            Self::R11 => "r11",
            Self::R12 => "ap",
            Self::R13 => "fp",
            Self::R14 => "sp",
            Self::R15 => "pc",
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
