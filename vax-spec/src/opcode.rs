//! # VAX Opcode Table
//!
//! Maps opcode codepoints to instruction descriptors.
//!
//! ## Opcode Encoding
//!
//! Most opcodes are a single byte. Two prefix bytes escape into a second
//! opcode page, giving a 16-bit codepoint with the escape in the high byte:
//! - 0xFD: G_floating, H_floating and octaword instructions
//! - 0xFF: bug check instructions (BUGL, BUGW)
//!
//! Codepoints without a descriptor are legal input; the decoder renders them
//! as data words.

use crate::error::{Result, SpecError};
use crate::operand::OperandType;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Escape byte for the extended floating-point page
pub const EXTENDED_ESCAPE: u8 = 0xFD;

/// Escape byte for the bug check page
pub const BUGCHECK_ESCAPE: u8 = 0xFF;

/// Check if an opcode byte selects a second opcode page
#[inline]
pub const fn is_escape(byte: u8) -> bool {
    byte == EXTENDED_ESCAPE || byte == BUGCHECK_ESCAPE
}

/// Number of opcode bytes occupied by a codepoint
#[inline]
pub const fn opcode_width(code: u16) -> usize {
    if code > 0xFF {
        2
    } else {
        1
    }
}

/// Static description of one instruction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstructionDescriptor {
    /// Opcode codepoint (escaped opcodes carry the escape byte in bits 8-15)
    pub code: u16,
    /// Lowercase mnemonic
    pub mnemonic: &'static str,
    /// Operand specifiers, in encoding order
    pub operands: &'static [OperandType],
}

impl InstructionDescriptor {
    #[inline]
    pub fn opcode_width(&self) -> usize {
        opcode_width(self.code)
    }

    /// Shortest possible encoding: opcode, one mode byte per general operand
    /// (a short literal) and the inline displacement of each branch operand
    pub fn min_length(&self) -> usize {
        self.opcode_width()
            + self
                .operands
                .iter()
                .map(|ty| if ty.is_branch() { ty.size() } else { 1 })
                .sum::<usize>()
    }

    /// Operand signature in reference-table notation, e.g. `"bll"`
    pub fn signature(&self) -> String {
        self.operands.iter().map(|ty| ty.code()).collect()
    }
}

impl fmt::Display for InstructionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x} {} {}", self.code, self.mnemonic, self.signature())
    }
}

/// Immutable codepoint -> descriptor mapping
#[derive(Debug)]
pub struct OpcodeTable {
    entries: HashMap<u16, &'static InstructionDescriptor>,
}

impl OpcodeTable {
    fn build(descriptors: &'static [InstructionDescriptor]) -> Self {
        let entries = descriptors.iter().map(|desc| (desc.code, desc)).collect();
        Self { entries }
    }

    /// The VAX instruction set, built on first use
    pub fn vax() -> &'static OpcodeTable {
        static TABLE: OnceLock<OpcodeTable> = OnceLock::new();
        TABLE.get_or_init(|| Self::build(DESCRIPTORS))
    }

    #[inline]
    pub fn get(&self, code: u16) -> Option<&'static InstructionDescriptor> {
        self.entries.get(&code).copied()
    }

    /// Look up a codepoint, reporting a missing entry as a non-fatal error
    ///
    /// `SpecError::UnknownOpcode` is the only error returned.
    pub fn lookup(&self, code: u16) -> Result<&'static InstructionDescriptor> {
        self.get(code).ok_or(SpecError::UnknownOpcode(code))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All descriptors in codepoint order
    pub fn iter(&self) -> impl Iterator<Item = &'static InstructionDescriptor> {
        let mut all: Vec<_> = self.entries.values().copied().collect();
        all.sort_by_key(|desc| desc.code);
        all.into_iter()
    }
}

const fn op(
    code: u16,
    mnemonic: &'static str,
    operands: &'static [OperandType],
) -> InstructionDescriptor {
    InstructionDescriptor {
        code,
        mnemonic,
        operands,
    }
}

const B: OperandType = OperandType::Byte;
const W: OperandType = OperandType::Word;
const L: OperandType = OperandType::Long;
const Q: OperandType = OperandType::Quad;
const O: OperandType = OperandType::Octa;
const F: OperandType = OperandType::FFloat;
const D: OperandType = OperandType::DFloat;
const G: OperandType = OperandType::GFloat;
const H: OperandType = OperandType::HFloat;
const BB: OperandType = OperandType::Branch8;
const BW: OperandType = OperandType::Branch16;

#[rustfmt::skip]
static DESCRIPTORS: &[InstructionDescriptor] = &[
    // ========== Control and procedure (0x00-0x1F) ==========
    op(0x00, "halt", &[]),
    op(0x01, "nop", &[]),
    op(0x02, "rei", &[]),
    op(0x03, "bpt", &[]),
    op(0x04, "ret", &[]),
    op(0x05, "rsb", &[]),
    op(0x06, "ldpctx", &[]),
    op(0x07, "svpctx", &[]),
    op(0x08, "cvtps", &[W, B, W, B]),
    op(0x09, "cvtsp", &[W, B, W, B]),
    op(0x0A, "index", &[L, L, L, L, L, L]),
    op(0x0B, "crc", &[B, L, W, B]),
    op(0x0C, "prober", &[B, W, B]),
    op(0x0D, "probew", &[B, W, B]),
    op(0x0E, "insque", &[B, B]),
    op(0x0F, "remque", &[B, L]),
    op(0x10, "bsbb", &[BB]),
    op(0x11, "brb", &[BB]),
    op(0x12, "bneq", &[BB]),
    op(0x13, "beql", &[BB]),
    op(0x14, "bgtr", &[BB]),
    op(0x15, "bleq", &[BB]),
    op(0x16, "jsb", &[B]),
    op(0x17, "jmp", &[B]),
    op(0x18, "bgeq", &[BB]),
    op(0x19, "blss", &[BB]),
    op(0x1A, "bgtru", &[BB]),
    op(0x1B, "blequ", &[BB]),
    op(0x1C, "bvc", &[BB]),
    op(0x1D, "bvs", &[BB]),
    op(0x1E, "bcc", &[BB]),
    op(0x1F, "blssu", &[BB]),

    // ========== Packed decimal and character string (0x20-0x3F) ==========
    op(0x20, "addp4", &[W, B, W, B]),
    op(0x21, "addp6", &[W, B, W, B, W, B]),
    op(0x22, "subp4", &[W, B, W, B]),
    op(0x23, "subp6", &[W, B, W, B, W, B]),
    op(0x24, "cvtpt", &[W, B, B, W, B]),
    op(0x25, "mulp", &[W, B, W, B, W, B]),
    op(0x26, "cvttp", &[W, B, B, W, B]),
    op(0x27, "divp", &[W, B, W, B, W, B]),
    op(0x28, "movc3", &[W, B, B]),
    op(0x29, "cmpc3", &[W, B, B]),
    op(0x2A, "scanc", &[W, B, B, B]),
    op(0x2B, "spanc", &[W, B, B, B]),
    op(0x2C, "movc5", &[W, B, B, W, B]),
    op(0x2D, "cmpc5", &[W, B, B, W, B]),
    op(0x2E, "movtc", &[W, B, B, B, W, B]),
    op(0x2F, "movtuc", &[W, B, B, B, W, B]),
    op(0x30, "bsbw", &[BW]),
    op(0x31, "brw", &[BW]),
    op(0x32, "cvtwl", &[W, L]),
    op(0x33, "cvtwb", &[W, B]),
    op(0x34, "movp", &[W, B, B]),
    op(0x35, "cmpp3", &[W, B, B]),
    op(0x36, "cvtpl", &[W, B, L]),
    op(0x37, "cmpp4", &[W, B, W, B]),
    op(0x38, "editpc", &[W, B, B, B]),
    op(0x39, "matchc", &[W, B, W, B]),
    op(0x3A, "locc", &[B, W, B]),
    op(0x3B, "skpc", &[B, W, B]),
    op(0x3C, "movzwl", &[W, L]),
    op(0x3D, "acbw", &[W, W, W, BW]),
    op(0x3E, "movaw", &[W, L]),
    op(0x3F, "pushaw", &[W]),

    // ========== F_floating (0x40-0x5F) ==========
    op(0x40, "addf2", &[F, F]),
    op(0x41, "addf3", &[F, F, F]),
    op(0x42, "subf2", &[F, F]),
    op(0x43, "subf3", &[F, F, F]),
    op(0x44, "mulf2", &[F, F]),
    op(0x45, "mulf3", &[F, F, F]),
    op(0x46, "divf2", &[F, F]),
    op(0x47, "divf3", &[F, F, F]),
    op(0x48, "cvtfb", &[F, B]),
    op(0x49, "cvtfw", &[F, W]),
    op(0x4A, "cvtfl", &[F, L]),
    op(0x4B, "cvtrfl", &[F, L]),
    op(0x4C, "cvtbf", &[B, F]),
    op(0x4D, "cvtwf", &[W, F]),
    op(0x4E, "cvtlf", &[L, F]),
    op(0x4F, "acbf", &[F, F, F, BW]),
    op(0x50, "movf", &[F, F]),
    op(0x51, "cmpf", &[F, F]),
    op(0x52, "mnegf", &[F, F]),
    op(0x53, "tstf", &[F]),
    op(0x54, "emodf", &[F, B, F, L, F]),
    op(0x55, "polyf", &[F, W, B]),
    op(0x56, "cvtfd", &[F, D]),
    op(0x58, "adawi", &[W, W]),
    op(0x5C, "insqhi", &[B, Q]),
    op(0x5D, "insqti", &[B, Q]),
    op(0x5E, "remqhi", &[Q, L]),
    op(0x5F, "remqti", &[Q, L]),

    // ========== D_floating, quadword and shifts (0x60-0x7F) ==========
    op(0x60, "addd2", &[D, D]),
    op(0x61, "addd3", &[D, D, D]),
    op(0x62, "subd2", &[D, D]),
    op(0x63, "subd3", &[D, D, D]),
    op(0x64, "muld2", &[D, D]),
    op(0x65, "muld3", &[D, D, D]),
    op(0x66, "divd2", &[D, D]),
    op(0x67, "divd3", &[D, D, D]),
    op(0x68, "cvtdb", &[D, B]),
    op(0x69, "cvtdw", &[D, W]),
    op(0x6A, "cvtdl", &[D, L]),
    op(0x6B, "cvtrdl", &[D, L]),
    op(0x6C, "cvtbd", &[B, D]),
    op(0x6D, "cvtwd", &[W, D]),
    op(0x6E, "cvtld", &[L, D]),
    op(0x6F, "acbd", &[D, D, D, BW]),
    op(0x70, "movd", &[D, D]),
    op(0x71, "cmpd", &[D, D]),
    op(0x72, "mnegd", &[D, D]),
    op(0x73, "tstd", &[D]),
    op(0x74, "emodd", &[D, B, D, L, D]),
    op(0x75, "polyd", &[D, W, B]),
    op(0x76, "cvtdf", &[D, F]),
    op(0x78, "ashl", &[B, L, L]),
    op(0x79, "ashq", &[B, Q, Q]),
    op(0x7A, "emul", &[L, L, L, Q]),
    op(0x7B, "ediv", &[L, Q, L, L]),
    op(0x7C, "clrd", &[D]),
    op(0x7D, "movq", &[Q, Q]),
    op(0x7E, "movaq", &[Q, L]),
    op(0x7F, "pushaq", &[Q]),

    // ========== Byte integer (0x80-0x9F) ==========
    op(0x80, "addb2", &[B, B]),
    op(0x81, "addb3", &[B, B, B]),
    op(0x82, "subb2", &[B, B]),
    op(0x83, "subb3", &[B, B, B]),
    op(0x84, "mulb2", &[B, B]),
    op(0x85, "mulb3", &[B, B, B]),
    op(0x86, "divb2", &[B, B]),
    op(0x87, "divb3", &[B, B, B]),
    op(0x88, "bisb2", &[B, B]),
    op(0x89, "bisb3", &[B, B, B]),
    op(0x8A, "bicb2", &[B, B]),
    op(0x8B, "bicb3", &[B, B, B]),
    op(0x8C, "xorb2", &[B, B]),
    op(0x8D, "xorb3", &[B, B, B]),
    op(0x8E, "mnegb", &[B, B]),
    op(0x8F, "caseb", &[B, B, B]),
    op(0x90, "movb", &[B, B]),
    op(0x91, "cmpb", &[B, B]),
    op(0x92, "mcomb", &[B, B]),
    op(0x93, "bitb", &[B, B]),
    op(0x94, "clrb", &[B]),
    op(0x95, "tstb", &[B]),
    op(0x96, "incb", &[B]),
    op(0x97, "decb", &[B]),
    op(0x98, "cvtbl", &[B, L]),
    op(0x99, "cvtbw", &[B, W]),
    op(0x9A, "movzbl", &[B, L]),
    op(0x9B, "movzbw", &[B, W]),
    op(0x9C, "rotl", &[B, L, L]),
    op(0x9D, "acbb", &[B, B, B, BW]),
    op(0x9E, "movab", &[B, L]),
    op(0x9F, "pushab", &[B]),

    // ========== Word integer and PSW (0xA0-0xBF) ==========
    op(0xA0, "addw2", &[W, W]),
    op(0xA1, "addw3", &[W, W, W]),
    op(0xA2, "subw2", &[W, W]),
    op(0xA3, "subw3", &[W, W, W]),
    op(0xA4, "mulw2", &[W, W]),
    op(0xA5, "mulw3", &[W, W, W]),
    op(0xA6, "divw2", &[W, W]),
    op(0xA7, "divw3", &[W, W, W]),
    op(0xA8, "bisw2", &[W, W]),
    op(0xA9, "bisw3", &[W, W, W]),
    op(0xAA, "bicw2", &[W, W]),
    op(0xAB, "bicw3", &[W, W, W]),
    op(0xAC, "xorw2", &[W, W]),
    op(0xAD, "xorw3", &[W, W, W]),
    op(0xAE, "mnegw", &[W, W]),
    op(0xAF, "casew", &[W, W, W]),
    op(0xB0, "movw", &[W, W]),
    op(0xB1, "cmpw", &[W, W]),
    op(0xB2, "mcomw", &[W, W]),
    op(0xB3, "bitw", &[W, W]),
    op(0xB4, "clrw", &[W]),
    op(0xB5, "tstw", &[W]),
    op(0xB6, "incw", &[W]),
    op(0xB7, "decw", &[W]),
    op(0xB8, "bispsw", &[W]),
    op(0xB9, "bicpsw", &[W]),
    op(0xBA, "popr", &[W]),
    op(0xBB, "pushr", &[W]),
    op(0xBC, "chmk", &[W]),
    op(0xBD, "chme", &[W]),
    op(0xBE, "chms", &[W]),
    op(0xBF, "chmu", &[W]),

    // ========== Longword integer (0xC0-0xDF) ==========
    op(0xC0, "addl2", &[L, L]),
    op(0xC1, "addl3", &[L, L, L]),
    op(0xC2, "subl2", &[L, L]),
    op(0xC3, "subl3", &[L, L, L]),
    op(0xC4, "mull2", &[L, L]),
    op(0xC5, "mull3", &[L, L, L]),
    op(0xC6, "divl2", &[L, L]),
    op(0xC7, "divl3", &[L, L, L]),
    op(0xC8, "bisl2", &[L, L]),
    op(0xC9, "bisl3", &[L, L, L]),
    op(0xCA, "bicl2", &[L, L]),
    op(0xCB, "bicl3", &[L, L, L]),
    op(0xCC, "xorl2", &[L, L]),
    op(0xCD, "xorl3", &[L, L, L]),
    op(0xCE, "mnegl", &[L, L]),
    op(0xCF, "casel", &[L, L, L]),
    op(0xD0, "movl", &[L, L]),
    op(0xD1, "cmpl", &[L, L]),
    op(0xD2, "mcoml", &[L, L]),
    op(0xD3, "bitl", &[L, L]),
    op(0xD4, "clrf", &[F]),
    op(0xD5, "tstl", &[L]),
    op(0xD6, "incl", &[L]),
    op(0xD7, "decl", &[L]),
    op(0xD8, "adwc", &[L, L]),
    op(0xD9, "sbwc", &[L, L]),
    op(0xDA, "mtpr", &[L, L]),
    op(0xDB, "mfpr", &[L, L]),
    op(0xDC, "movpsl", &[L]),
    op(0xDD, "pushl", &[L]),
    op(0xDE, "moval", &[L, L]),
    op(0xDF, "pushal", &[L]),

    // ========== Bit branch, field and loop (0xE0-0xFC) ==========
    op(0xE0, "bbs", &[L, B, BB]),
    op(0xE1, "bbc", &[L, B, BB]),
    op(0xE2, "bbss", &[L, B, BB]),
    op(0xE3, "bbcs", &[L, B, BB]),
    op(0xE4, "bbsc", &[L, B, BB]),
    op(0xE5, "bbcc", &[L, B, BB]),
    op(0xE6, "bbssi", &[L, B, BB]),
    op(0xE7, "bbcci", &[L, B, BB]),
    op(0xE8, "blbs", &[L, BB]),
    op(0xE9, "blbc", &[L, BB]),
    op(0xEA, "ffs", &[L, B, B, L]),
    op(0xEB, "ffc", &[L, B, B, L]),
    op(0xEC, "cmpv", &[L, B, B, L]),
    op(0xED, "cmpzv", &[L, B, B, L]),
    op(0xEE, "extv", &[L, B, B, L]),
    op(0xEF, "extzv", &[L, B, B, L]),
    op(0xF0, "insv", &[L, L, B, B]),
    op(0xF1, "acbl", &[L, L, L, BW]),
    op(0xF2, "aoblss", &[L, L, BB]),
    op(0xF3, "aobleq", &[L, L, BB]),
    op(0xF4, "sobgeq", &[L, BB]),
    op(0xF5, "sobgtr", &[L, BB]),
    op(0xF6, "cvtlb", &[L, B]),
    op(0xF7, "cvtlw", &[L, W]),
    op(0xF8, "ashp", &[B, W, B, B, W, B]),
    op(0xF9, "cvtlp", &[L, W, B]),
    op(0xFA, "callg", &[B, B]),
    op(0xFB, "calls", &[L, B]),
    op(0xFC, "xfc", &[]),

    // ========== Extended: G/H_floating and octaword (0xFDxx) ==========
    op(0xFD32, "cvtdh", &[D, H]),
    op(0xFD33, "cvtgf", &[G, F]),
    op(0xFD40, "addg2", &[G, G]),
    op(0xFD41, "addg3", &[G, G, G]),
    op(0xFD42, "subg2", &[G, G]),
    op(0xFD43, "subg3", &[G, G, G]),
    op(0xFD44, "mulg2", &[G, G]),
    op(0xFD45, "mulg3", &[G, G, G]),
    op(0xFD46, "divg2", &[G, G]),
    op(0xFD47, "divg3", &[G, G, G]),
    op(0xFD48, "cvtgb", &[G, B]),
    op(0xFD49, "cvtgw", &[G, W]),
    op(0xFD4A, "cvtgl", &[G, L]),
    op(0xFD4B, "cvtrgl", &[G, L]),
    op(0xFD4C, "cvtbg", &[B, G]),
    op(0xFD4D, "cvtwg", &[W, G]),
    op(0xFD4E, "cvtlg", &[L, G]),
    op(0xFD4F, "acbg", &[G, G, G, BW]),
    op(0xFD50, "movg", &[G, G]),
    op(0xFD51, "cmpg", &[G, G]),
    op(0xFD52, "mnegg", &[G, G]),
    op(0xFD53, "tstg", &[G]),
    op(0xFD54, "emodg", &[G, W, G, L, G]),
    op(0xFD55, "polyg", &[G, W, B]),
    op(0xFD56, "cvtgh", &[G, H]),
    op(0xFD60, "addh2", &[H, H]),
    op(0xFD61, "addh3", &[H, H, H]),
    op(0xFD62, "subh2", &[H, H]),
    op(0xFD63, "subh3", &[H, H, H]),
    op(0xFD64, "mulh2", &[H, H]),
    op(0xFD65, "mulh3", &[H, H, H]),
    op(0xFD66, "divh2", &[H, H]),
    op(0xFD67, "divh3", &[H, H, H]),
    op(0xFD68, "cvthb", &[H, B]),
    op(0xFD69, "cvthw", &[H, W]),
    op(0xFD6A, "cvthl", &[H, L]),
    op(0xFD6B, "cvtrhl", &[H, L]),
    op(0xFD6C, "cvtbh", &[B, H]),
    op(0xFD6D, "cvtwh", &[W, H]),
    op(0xFD6E, "cvtlh", &[L, H]),
    op(0xFD6F, "acbh", &[H, H, H, BW]),
    op(0xFD70, "movh", &[H, H]),
    op(0xFD71, "cmph", &[H, H]),
    op(0xFD72, "mnegh", &[H, H]),
    op(0xFD73, "tsth", &[H]),
    op(0xFD74, "emodh", &[H, W, H, L, H]),
    op(0xFD75, "polyh", &[H, W, B]),
    op(0xFD76, "cvthg", &[H, G]),
    op(0xFD7C, "clrh", &[H]),
    op(0xFD7D, "movo", &[O, O]),
    op(0xFD7E, "movah", &[H, L]),
    op(0xFD7F, "pushah", &[H]),
    op(0xFD98, "cvtfh", &[F, H]),
    op(0xFD99, "cvtfg", &[F, G]),
    op(0xFDF6, "cvthf", &[H, F]),
    op(0xFDF7, "cvthd", &[H, D]),

    // ========== Bug check (0xFFxx) ==========
    op(0xFFFD, "bugl", &[L]),
    op(0xFFFE, "bugw", &[W]),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codepoints_unique() {
        let mut seen = HashSet::new();
        for desc in DESCRIPTORS {
            assert!(seen.insert(desc.code), "duplicate codepoint {:#x}", desc.code);
        }
        assert_eq!(OpcodeTable::vax().len(), DESCRIPTORS.len());
    }

    #[test]
    fn test_escaped_codepoints_use_escape_bytes() {
        for desc in OpcodeTable::vax().iter() {
            if desc.code > 0xFF {
                assert!(is_escape((desc.code >> 8) as u8), "{}", desc);
            } else {
                assert!(!is_escape(desc.code as u8), "{}", desc);
            }
        }
    }

    #[test]
    fn test_lookup() {
        let table = OpcodeTable::vax();
        assert_eq!(table.lookup(0x01).unwrap().mnemonic, "nop");
        assert_eq!(table.lookup(0xD0).unwrap().signature(), "ll");
        assert_eq!(table.lookup(0xFD7D).unwrap().mnemonic, "movo");
        assert_eq!(table.lookup(0xFFFE).unwrap().mnemonic, "bugw");
        assert!(matches!(table.lookup(0x57), Err(SpecError::UnknownOpcode(0x57))));
        assert!(table.get(0xFD00).is_none());
    }

    #[test]
    fn test_branch_operands_are_last_or_standalone() {
        for desc in OpcodeTable::vax().iter() {
            let branches = desc.operands.iter().filter(|ty| ty.is_branch()).count();
            assert!(branches <= 1, "{}", desc);
            if branches == 1 {
                assert!(desc.operands.last().unwrap().is_branch(), "{}", desc);
            }
        }
    }

    #[test]
    fn test_min_length() {
        let table = OpcodeTable::vax();
        assert_eq!(table.lookup(0x00).unwrap().min_length(), 1);
        assert_eq!(table.lookup(0x11).unwrap().min_length(), 2); // brb
        assert_eq!(table.lookup(0x31).unwrap().min_length(), 3); // brw
        assert_eq!(table.lookup(0xE0).unwrap().min_length(), 4); // bbs
        assert_eq!(table.lookup(0xFD41).unwrap().min_length(), 5); // addg3
    }

    #[test]
    fn test_descriptor_display() {
        let desc = OpcodeTable::vax().lookup(0x0A).unwrap();
        assert_eq!(desc.to_string(), "0x000a index llllll");
    }
}
