//! Main disassembler loop

use crate::decoder::{DecodedInstruction, InstructionDecoder};
use crate::error::Result;
use crate::formatter::format;
use std::io::Write;
use vax_machine::{AddressSpace, LoadedImage};
use vax_spec::Address;

/// Decodes instructions from address 0 until the program counter reaches
/// the end of the code segment
///
/// The last instruction may extend past `code_size`. Iteration stops after
/// the first error.
#[derive(Debug, Clone)]
pub struct Disassembler<'a> {
    decoder: InstructionDecoder<'a>,
    code_size: Address,
    failed: bool,
}

impl<'a> Disassembler<'a> {
    pub fn new(memory: &'a AddressSpace, code_size: Address) -> Self {
        Self {
            decoder: InstructionDecoder::new(memory),
            code_size,
            failed: false,
        }
    }

    pub fn pc(&self) -> Address {
        self.decoder.pc()
    }
}

impl Iterator for Disassembler<'_> {
    type Item = Result<DecodedInstruction>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.decoder.pc() >= self.code_size {
            return None;
        }
        let result = self.decoder.decode_next();
        match &result {
            Ok(instr) => {
                tracing::debug!("{:#x}: {}", instr.start, instr.text);
            }
            Err(err) => {
                tracing::debug!("Decoding stopped at {:#x}: {}", self.decoder.pc(), err);
                self.failed = true;
            }
        }
        Some(result)
    }
}

/// Disassemble the code segment into listing lines
pub fn disassemble(memory: &AddressSpace, code_size: Address) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for instr in Disassembler::new(memory, code_size) {
        lines.extend(format(&instr?));
    }
    Ok(lines)
}

/// Disassemble a loaded image's code segment into listing lines
pub fn disassemble_image(image: &LoadedImage) -> Result<Vec<String>> {
    disassemble(&image.memory, image.code_size())
}

/// Disassemble the code segment, writing each instruction's lines to `out`
/// before decoding the next one
///
/// Returns the number of instructions written.
pub fn disassemble_to<W: Write>(
    memory: &AddressSpace,
    code_size: Address,
    out: &mut W,
) -> Result<usize> {
    let mut count = 0;
    for instr in Disassembler::new(memory, code_size) {
        for line in format(&instr?) {
            writeln!(out, "{}", line)?;
        }
        count += 1;
    }
    Ok(count)
}
