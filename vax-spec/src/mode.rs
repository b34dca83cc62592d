//! # Addressing Modes
//!
//! A general operand starts with a mode byte. The high nibble selects the
//! addressing mode and the low nibble selects a register (or, for short
//! literals, the whole byte is the literal value).
//!
//! ```text
//! Mode byte   Mode
//! ──────────────────────────────────────
//! 0x00-0x3F   short literal
//! 0x40-0x4F   indexed            Rx[...]
//! 0x50-0x5F   register           Rn
//! 0x60-0x6F   register deferred  (Rn)
//! 0x70-0x7F   autodecrement      -(Rn)
//! 0x80-0x8E   autoincrement      (Rn)+
//! 0x8F        immediate          (PC)+
//! 0x90-0x9E   autoincrement def. @(Rn)+
//! 0x9F        absolute           @(PC)+
//! 0xA0-0xAF   byte displacement
//! 0xB0-0xBF   byte disp. deferred
//! 0xC0-0xCF   word displacement
//! 0xD0-0xDF   word disp. deferred
//! 0xE0-0xEF   long displacement
//! 0xF0-0xFF   long disp. deferred
//! ```

use crate::register::Register;

/// Decoded addressing mode of a general operand
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressingMode {
    /// 6-bit literal stored in the mode byte itself
    ShortLiteral(u8),
    /// Base operand follows, indexed by the given register
    Indexed(Register),
    Register(Register),
    RegisterDeferred(Register),
    Autodecrement(Register),
    Autoincrement(Register),
    /// Literal of the operand's size follows
    Immediate,
    AutoincrementDeferred(Register),
    /// 32-bit address follows
    Absolute,
    /// Signed displacement of `width` bytes (1, 2 or 4) follows
    Displacement {
        width: usize,
        register: Register,
        deferred: bool,
    },
}

impl AddressingMode {
    /// Classify a mode byte. Every byte value maps to exactly one mode.
    pub fn classify(mode: u8) -> Self {
        let register = Register::from_nibble(mode);
        match mode {
            0x00..=0x3F => Self::ShortLiteral(mode),
            0x40..=0x4F => Self::Indexed(register),
            0x50..=0x5F => Self::Register(register),
            0x60..=0x6F => Self::RegisterDeferred(register),
            0x70..=0x7F => Self::Autodecrement(register),
            0x8F => Self::Immediate,
            0x80..=0x8E => Self::Autoincrement(register),
            0x9F => Self::Absolute,
            0x90..=0x9E => Self::AutoincrementDeferred(register),
            0xA0..=0xFF => Self::Displacement {
                width: match mode >> 5 {
                    0b101 => 1,
                    0b110 => 2,
                    _ => 4,
                },
                register,
                deferred: mode & 0x10 != 0,
            },
        }
    }

    /// Number of bytes following the mode byte, excluding any base operand
    /// of an indexed specifier
    pub fn extension_size(self, operand_size: usize) -> usize {
        match self {
            Self::Immediate => operand_size,
            Self::Absolute => 4,
            Self::Displacement { width, .. } => width,
            _ => 0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::ShortLiteral(_) => "short literal",
            Self::Indexed(_) => "indexed",
            Self::Register(_) => "register",
            Self::RegisterDeferred(_) => "register deferred",
            Self::Autodecrement(_) => "autodecrement",
            Self::Autoincrement(_) => "autoincrement",
            Self::Immediate => "immediate",
            Self::AutoincrementDeferred(_) => "autoincrement deferred",
            Self::Absolute => "absolute",
            Self::Displacement { deferred: false, .. } => "displacement",
            Self::Displacement { deferred: true, .. } => "displacement deferred",
        }
    }
}
