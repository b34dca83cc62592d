//! Listing formatter
//!
//! Lays out an instruction as rows of up to four bytes:
//!
//! ```text
//!    0:	d0 8f 00 10 	movl $0x00001000,r0
//!    4:	00 00 50 
//!    7:	01          	nop
//! ```
//!
//! The text goes on the first row only, after the fourth byte column.

use crate::decoder::DecodedInstruction;
use vax_spec::Address;

/// Byte columns per listing row
pub const BYTES_PER_ROW: usize = 4;

/// Format a decoded instruction as listing rows
pub fn format(instr: &DecodedInstruction) -> Vec<String> {
    format_rows(instr.start, &instr.bytes, &instr.text)
}

/// Format `bytes` starting at `start`, annotating the first row with `text`
pub fn format_rows(start: Address, bytes: &[u8], text: &str) -> Vec<String> {
    let mut rows: Vec<String> = bytes
        .chunks(BYTES_PER_ROW)
        .enumerate()
        .map(|(i, chunk)| {
            let address = start.wrapping_add((i * BYTES_PER_ROW) as u32);
            let mut row = format_address(address);
            for byte in chunk {
                row.push_str(&format!("{:02x} ", byte));
            }
            row
        })
        .collect();

    if rows.is_empty() {
        rows.push(format_address(start));
    }

    let used = bytes.len().min(BYTES_PER_ROW);
    let first = &mut rows[0];
    first.push_str(&"   ".repeat(BYTES_PER_ROW - used));
    first.push('\t');
    first.push_str(text);

    rows
}

fn format_address(address: Address) -> String {
    format!("{:4x}:\t", address)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_byte_padded() {
        assert_eq!(
            format_rows(0, &[0x01], "nop"),
            vec!["   0:\t01          \tnop".to_string()]
        );
    }

    #[test]
    fn test_exact_row() {
        assert_eq!(
            format_rows(0x10, &[0xC1, 0x01, 0x02, 0x53], "addl3 $0x1,$0x2,r3"),
            vec!["  10:\tc1 01 02 53 \taddl3 $0x1,$0x2,r3".to_string()]
        );
    }

    #[test]
    fn test_continuation_rows_have_no_text() {
        let rows = format_rows(
            0x1ffe,
            &[0xD0, 0x8F, 0x00, 0x10, 0x00, 0x00, 0x50],
            "movl $0x00001000,r0",
        );
        assert_eq!(
            rows,
            vec![
                "1ffe:\td0 8f 00 10 \tmovl $0x00001000,r0".to_string(),
                "2002:\t00 00 50 ".to_string(),
            ]
        );
    }

    #[test]
    fn test_wide_address() {
        let rows = format_rows(0x12345, &[0x04, 0x05], "ret");
        assert_eq!(rows, vec!["12345:\t04 05       \tret".to_string()]);
    }

    #[test]
    fn test_format_decoded_instruction() {
        let instr = DecodedInstruction {
            start: 4,
            end: 6,
            bytes: vec![0x11, 0xFE],
            text: "brb 0x4".to_string(),
            descriptor: None,
        };
        assert_eq!(format(&instr), vec!["   4:\t11 fe       \tbrb 0x4".to_string()]);
    }
}
