//! Instruction decoder
//!
//! Decodes one instruction at a time: the opcode (one byte, or two after an
//! escape byte), then each operand named by the opcode's descriptor.

use crate::error::Result;
use crate::operand::decode_operand;
use vax_machine::{AddressSpace, Fetcher};
use vax_spec::{is_escape, Address, InstructionDescriptor, OpcodeTable};

/// A decoded instruction and the bytes it occupies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedInstruction {
    /// Address of the first opcode byte
    pub start: Address,
    /// Address after the last operand byte
    pub end: Address,
    /// Raw bytes in `start..end`
    pub bytes: Vec<u8>,
    /// Mnemonic and operands, or a `.word` directive for unknown opcodes
    pub text: String,
    /// Table entry, `None` for unknown opcodes
    pub descriptor: Option<&'static InstructionDescriptor>,
}

impl DecodedInstruction {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_unknown(&self) -> bool {
        self.descriptor.is_none()
    }

    pub fn mnemonic(&self) -> Option<&'static str> {
        self.descriptor.map(|desc| desc.mnemonic)
    }
}

/// Sequential decoder over an address space
#[derive(Debug, Clone)]
pub struct InstructionDecoder<'a> {
    fetcher: Fetcher<'a>,
    table: &'a OpcodeTable,
}

impl<'a> InstructionDecoder<'a> {
    /// Decoder over the VAX opcode table, starting at address 0
    pub fn new(memory: &'a AddressSpace) -> Self {
        Self::with_table(memory, OpcodeTable::vax())
    }

    pub fn with_table(memory: &'a AddressSpace, table: &'a OpcodeTable) -> Self {
        Self {
            fetcher: Fetcher::new(memory),
            table,
        }
    }

    /// Start decoding at `pc` instead of 0
    pub fn starting_at(mut self, pc: Address) -> Self {
        self.fetcher = Fetcher::at(self.fetcher.memory(), pc);
        self
    }

    #[inline]
    pub fn pc(&self) -> Address {
        self.fetcher.pc()
    }

    /// Decode the instruction at the program counter
    pub fn decode_next(&mut self) -> Result<DecodedInstruction> {
        let start = self.pc();
        let code = self.fetch_opcode()?;

        // A missing entry is the only lookup failure and never aborts the run
        let (text, descriptor) = match self.table.lookup(code) {
            Ok(desc) => (self.decode_operands(desc)?, Some(desc)),
            Err(err) => {
                tracing::debug!("{} at {:#x}", err, start);
                (format!(".word {:#x}", code), None)
            }
        };

        let end = self.pc();
        let bytes = self
            .fetcher
            .memory()
            .slice(start, end.wrapping_sub(start) as usize)?
            .to_vec();

        Ok(DecodedInstruction {
            start,
            end,
            bytes,
            text,
            descriptor,
        })
    }

    fn fetch_opcode(&mut self) -> Result<u16> {
        let first = self.fetcher.fetch_byte()?;
        if is_escape(first) {
            let second = self.fetcher.fetch_byte()?;
            Ok(u16::from_be_bytes([first, second]))
        } else {
            Ok(first as u16)
        }
    }

    fn decode_operands(&mut self, desc: &InstructionDescriptor) -> Result<String> {
        let mut text = String::from(desc.mnemonic);
        for (i, ty) in desc.operands.iter().enumerate() {
            text.push(if i == 0 { ' ' } else { ',' });
            text.push_str(&decode_operand(&mut self.fetcher, *ty)?.text);
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DisassemblerError;

    fn decode_one(bytes: &[u8]) -> DecodedInstruction {
        let mem = AddressSpace::from_bytes(bytes);
        InstructionDecoder::new(&mem).decode_next().unwrap()
    }

    #[test]
    fn test_decode_nop() {
        let instr = decode_one(&[0x01]);
        assert_eq!(instr.text, "nop");
        assert_eq!(instr.mnemonic(), Some("nop"));
        assert_eq!((instr.start, instr.end), (0, 1));
        assert_eq!(instr.bytes, vec![0x01]);
    }

    #[test]
    fn test_decode_movl() {
        // movl $0x5,r0
        let instr = decode_one(&[0xD0, 0x05, 0x50]);
        assert_eq!(instr.text, "movl $0x5,r0");
        assert_eq!(instr.len(), 3);
    }

    #[test]
    fn test_decode_three_operands() {
        // addl3 4(r1),(r2)+,-(sp)
        let instr = decode_one(&[0xC1, 0xA1, 0x04, 0x82, 0x7E]);
        assert_eq!(instr.text, "addl3 0x4(r1),(r2)+,-(sp)");
        assert_eq!(instr.end, 5);
    }

    #[test]
    fn test_decode_branch() {
        // brb .+2+0x10
        let instr = decode_one(&[0x11, 0x10]);
        assert_eq!(instr.text, "brb 0x12");
    }

    #[test]
    fn test_decode_escaped_opcode() {
        // addg2 $0x1 [g-float],r4
        let instr = decode_one(&[0xFD, 0x40, 0x01, 0x54]);
        assert_eq!(instr.text, "addg2 $0x1 [g-float],r4");
        assert_eq!(instr.descriptor.unwrap().code, 0xFD40);
        assert_eq!(instr.len(), 4);
    }

    #[test]
    fn test_decode_bugcheck_opcode() {
        let instr = decode_one(&[0xFF, 0xFE, 0x00]);
        assert_eq!(instr.text, "bugw $0x0");
    }

    #[test]
    fn test_unknown_single_byte() {
        let instr = decode_one(&[0x57, 0x50]);
        assert!(instr.is_unknown());
        assert_eq!(instr.text, ".word 0x57");
        assert_eq!(instr.end, 1);
    }

    #[test]
    fn test_unknown_escaped() {
        let instr = decode_one(&[0xFD, 0x00, 0x50]);
        assert!(instr.is_unknown());
        assert_eq!(instr.text, ".word 0xfd00");
        assert_eq!(instr.bytes, vec![0xFD, 0x00]);
    }

    #[test]
    fn test_unknown_opcode_resumes_at_next_byte() {
        let mem = AddressSpace::from_bytes(&[0xFD, 0x00, 0xFF, 0x00, 0x01]);
        let mut decoder = InstructionDecoder::new(&mem);
        assert_eq!(decoder.decode_next().unwrap().text, ".word 0xfd00");
        assert_eq!(decoder.decode_next().unwrap().text, ".word 0xff00");
        assert_eq!(decoder.decode_next().unwrap().text, "nop");
        assert_eq!(decoder.pc(), 5);
    }

    #[test]
    fn test_sequential_decoding_shares_pc() {
        let mem = AddressSpace::from_bytes(&[0x01, 0xD4, 0x50, 0x04]);
        let mut decoder = InstructionDecoder::new(&mem);
        assert_eq!(decoder.decode_next().unwrap().text, "nop");
        assert_eq!(decoder.pc(), 1);
        assert_eq!(decoder.decode_next().unwrap().text, "clrf r0");
        assert_eq!(decoder.decode_next().unwrap().text, "ret");
        assert_eq!(decoder.pc(), 4);
    }

    #[test]
    fn test_starting_at() {
        let mem = AddressSpace::from_bytes(&[0x00, 0x00, 0x05]);
        let mut decoder = InstructionDecoder::new(&mem).starting_at(2);
        let instr = decoder.decode_next().unwrap();
        assert_eq!(instr.text, "rsb");
        assert_eq!(instr.start, 2);
    }

    #[test]
    fn test_truncated_instruction_is_fatal() {
        let mem = AddressSpace::from_bytes(&[0xD0, 0x50]);
        let mut decoder = InstructionDecoder::new(&mem);
        assert!(matches!(
            decoder.decode_next(),
            Err(DisassemblerError::Machine(_))
        ));
    }
}
