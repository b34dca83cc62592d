//! End-to-end tests for the disassembly pipeline
//!
//! These tests verify the complete workflow:
//! 1. Build an image (exec header + payload)
//! 2. Load it into an address space
//! 3. Disassemble the code segment
//! 4. Check the listing text

use proptest::prelude::*;
use vax_disassembler::{disassemble_image, disassemble_to, DisassemblerError};
use vax_machine::{load_image, MachineError};
use vax_spec::{Config, ImageHeader, SpecError, NOP};

fn build_image(text_size: u32, payload: &[u8]) -> Vec<u8> {
    let header = ImageHeader {
        magic: 0x0108,
        text_size,
        data_size: 0,
        ..ImageHeader::default()
    };
    let mut bytes = header.to_bytes().to_vec();
    bytes.extend_from_slice(payload);
    bytes
}

fn listing(image: &[u8]) -> Result<String, DisassemblerError> {
    let loaded = load_image(image, &Config::DEFAULT)?;
    let mut out = Vec::new();
    disassemble_to(&loaded.memory, loaded.code_size(), &mut out)?;
    Ok(String::from_utf8(out).expect("listing is ASCII"))
}

// ============================================================================
// Image -> Listing
// ============================================================================

#[test]
fn test_single_nop() {
    let text = listing(&build_image(1, &[NOP])).unwrap();
    assert_eq!(text, "   0:\t01          \tnop\n");
}

#[test]
fn test_code_size_bounds_the_run() {
    // Only the first two instructions are inside the code segment; the data
    // after them is never decoded
    let payload = [0x01, 0xD4, 0x50, 0xFF, 0xFF, 0xFF];
    let loaded = load_image(&build_image(3, &payload), &Config::DEFAULT).unwrap();
    let lines = disassemble_image(&loaded).unwrap();
    assert_eq!(lines, vec!["   0:\t01          \tnop", "   1:\td4 50       \tclrf r0"]);
}

#[test]
fn test_procedure_prologue() {
    let payload = [
        0x00, 0x00, // entry mask (decodes as halt; halt)
        0xC2, 0x08, 0x5E, // subl2 $0x8,sp
        0xDD, 0xAC, 0x04, // pushl 0x4(ap)
        0xFB, 0x01, 0xEF, 0x00, 0x00, 0x00, 0x00, // calls $0x1,<next>
        0x04, // ret
    ];
    let text = listing(&build_image(payload.len() as u32, &payload)).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "   0:\t00          \thalt",
            "   1:\t00          \thalt",
            "   2:\tc2 08 5e    \tsubl2 $0x8,sp",
            "   5:\tdd ac 04    \tpushl 0x4(ap)",
            "   8:\tfb 01 ef 00 \tcalls $0x1,0xf",
            "   c:\t00 00 00 ",
            "   f:\t04          \tret",
        ]
    );
}

#[test]
fn test_empty_code_segment_produces_no_output() {
    assert_eq!(listing(&build_image(0, &[0x01, 0x01])).unwrap(), "");
}

#[test]
fn test_truncated_image_is_a_load_error() {
    let err = listing(&[0u8; 16]).unwrap_err();
    assert!(matches!(
        err,
        DisassemblerError::Machine(MachineError::SpecError(SpecError::InvalidHeaderSize { .. }))
    ));
}

#[test]
fn test_code_size_past_memory_is_fatal() {
    let config = Config::new(4, ImageHeader::SIZE).unwrap();
    let loaded = load_image(&build_image(8, &[0x01; 4]), &config).unwrap();
    let err = disassemble_image(&loaded).unwrap_err();
    assert!(matches!(
        err,
        DisassemblerError::Machine(MachineError::OutOfBounds { address: 4, .. })
    ));
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_same_image_same_listing(payload in proptest::collection::vec(any::<u8>(), 0..128)) {
        let image = build_image(payload.len() as u32, &payload);
        let first = listing(&image).map_err(|e| e.to_string());
        let second = listing(&image).map_err(|e| e.to_string());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_nop_sled(count in 1usize..64) {
        let payload = vec![NOP; count];
        let text = listing(&build_image(count as u32, &payload)).unwrap();
        prop_assert_eq!(text.lines().count(), count);
        prop_assert!(text.lines().all(|line| line.ends_with("\tnop")));
    }
}
