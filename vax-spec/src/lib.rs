//! # VAX Architecture Definitions
//!
//! Static description of the VAX instruction set as needed for disassembly.
//!
//! ## Key Features
//! - 16 general registers, r12-r15 named ap, fp, sp, pc
//! - Variable-length instructions: 1- or 2-byte opcode followed by operand
//!   specifiers
//! - General operands selected by a mode byte (literal, register, deferred,
//!   autoincrement/decrement, displacement, indexed)
//! - Integer data types from byte to octaword, four floating formats
//! - 32-bit little-endian address space

pub mod config;
pub mod error;
pub mod image;
pub mod mode;
pub mod opcode;
pub mod operand;
pub mod register;

pub use config::{Config, ConfigError};
pub use error::{Result, SpecError};
pub use image::ImageHeader;
pub use mode::AddressingMode;
pub use opcode::{
    is_escape, opcode_width, InstructionDescriptor, OpcodeTable, BUGCHECK_ESCAPE,
    EXTENDED_ESCAPE,
};
pub use operand::OperandType;
pub use register::{Register, NUM_REGISTERS};

/// Address type (32-bit virtual address)
pub type Address = u32;

/// Opcode of the no-operation instruction
pub const NOP: u8 = 0x01;
