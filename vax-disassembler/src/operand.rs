//! Operand specifier decoding
//!
//! General operands start with a mode byte (see [`AddressingMode`]); branch
//! operands are a bare displacement relative to the updated program counter.

use crate::error::Result;
use vax_machine::Fetcher;
use vax_spec::{AddressingMode, OperandType, Register};

/// One rendered operand
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedOperand {
    pub text: String,
    /// Addressing mode of a general operand, `None` for branch displacements
    pub mode: Option<AddressingMode>,
}

/// Decode one operand of type `ty` at the program counter
pub fn decode_operand(fetcher: &mut Fetcher<'_>, ty: OperandType) -> Result<DecodedOperand> {
    let (text, mode) = if ty.is_branch() {
        (decode_branch(fetcher, ty)?, None)
    } else {
        let (text, mode) = decode_general(fetcher, ty)?;
        (text, Some(mode))
    };
    Ok(DecodedOperand { text, mode })
}

fn decode_branch(fetcher: &mut Fetcher<'_>, ty: OperandType) -> Result<String> {
    let displacement = fetcher.fetch_displacement(ty.size())?;
    let target = fetcher.pc().wrapping_add(displacement);
    Ok(format!("{:#x}", target))
}

/// Decode a general operand, returning its text and outermost mode
///
/// Index-mode bytes prefix their base specifier, which may itself be indexed.
/// The chain is collected first and the index annotations are appended
/// innermost first, so `41 42 50` renders `r0[r2][r1]`.
fn decode_general(fetcher: &mut Fetcher<'_>, ty: OperandType) -> Result<(String, AddressingMode)> {
    let mut indices: Vec<Register> = Vec::new();
    loop {
        let address = fetcher.pc();
        let byte = fetcher.fetch_byte()?;
        let mode = AddressingMode::classify(byte);
        tracing::trace!("operand {:#04x} at {:#x}: {}", byte, address, mode.name());

        match mode {
            AddressingMode::Indexed(index) => indices.push(index),
            base => {
                let mut text = decode_base(fetcher, ty, base)?;
                for index in indices.iter().rev() {
                    text.push_str(&format!("[{}]", index));
                }
                let outer = indices.first().map_or(base, |&index| AddressingMode::Indexed(index));
                return Ok((text, outer));
            }
        }
    }
}

fn decode_base(fetcher: &mut Fetcher<'_>, ty: OperandType, mode: AddressingMode) -> Result<String> {
    let text = match mode {
        AddressingMode::ShortLiteral(value) => format!("${:#x}{}", value, ty.suffix()),
        // Consumed by the caller
        AddressingMode::Indexed(index) => format!("[{}]", index),
        AddressingMode::Register(reg) => reg.to_string(),
        AddressingMode::RegisterDeferred(reg) => format!("({})", reg),
        AddressingMode::Autodecrement(reg) => format!("-({})", reg),
        AddressingMode::Autoincrement(reg) => format!("({})+", reg),
        AddressingMode::Immediate => {
            let size = ty.size();
            let value = fetcher.fetch(size)?;
            format!(
                "${:#0width$x}{}",
                value,
                ty.suffix(),
                width = size * 2 + 2
            )
        }
        AddressingMode::AutoincrementDeferred(reg) => format!("@({})+", reg),
        AddressingMode::Absolute => format!("*{:#x}", fetcher.fetch(4)?),
        AddressingMode::Displacement {
            width,
            register,
            deferred,
        } => {
            let displacement = fetcher.fetch_displacement(width)?;
            let prefix = if deferred { "*" } else { "" };
            if register.is_pc() {
                // Relative to the PC after the whole specifier
                let target = fetcher.pc().wrapping_add(displacement);
                format!("{}{:#x}", prefix, target)
            } else {
                format!("{}{:#x}({})", prefix, displacement, register)
            }
        }
    };

    Ok(text)
}
