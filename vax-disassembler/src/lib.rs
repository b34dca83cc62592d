//! # VAX Disassembler
//!
//! Turn a VAX address space into a listing: one row per four instruction
//! bytes, with the address, the raw bytes and the decoded instruction.
//!
//! Decoding runs from address 0 until the program counter reaches the size
//! of the code segment. Opcodes missing from the table are listed as
//! `.word` directives; a read past the end of memory aborts the run.
//!
//! ## Example
//!
//! ```rust
//! use vax_machine::AddressSpace;
//! use vax_disassembler::disassemble;
//!
//! // nop; movl r0,r1
//! let memory = AddressSpace::from_bytes(&[0x01, 0xD0, 0x50, 0x51]);
//! let lines = disassemble(&memory, 4).unwrap();
//! assert_eq!(lines[0], "   0:\t01          \tnop");
//! assert_eq!(lines[1], "   1:\td0 50 51    \tmovl r0,r1");
//! ```

pub mod decoder;
pub mod disassembler;
pub mod error;
pub mod formatter;
pub mod operand;

pub use decoder::{DecodedInstruction, InstructionDecoder};
pub use disassembler::{disassemble, disassemble_image, disassemble_to, Disassembler};
pub use error::{DisassemblerError, Result};
pub use formatter::{format, format_rows};
pub use operand::{decode_operand, DecodedOperand};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disassembler_error_display() {
        let err: DisassemblerError = vax_machine::MachineError::OutOfBounds {
            address: 0x10,
            size: 4,
        }
        .into();
        assert!(err.to_string().starts_with("Machine error: "));

        let err: DisassemblerError = vax_spec::SpecError::UnknownOpcode(0x57).into();
        assert_eq!(err.to_string(), "Spec error: Unknown opcode: 0x57");
    }

    #[test]
    fn test_result_type() {
        let ok: Result<i32> = Ok(42);
        assert!(ok.is_ok());

        let err: Result<i32> = Err(vax_spec::SpecError::UnknownOpcode(0x57).into());
        assert!(err.is_err());
    }
}
