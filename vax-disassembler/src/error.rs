//! Disassembler errors

use thiserror::Error;
use vax_machine::MachineError;
use vax_spec::SpecError;

#[derive(Debug, Error)]
pub enum DisassemblerError {
    #[error("Machine error: {0}")]
    Machine(#[from] MachineError),

    #[error("Spec error: {0}")]
    Spec(#[from] SpecError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DisassemblerError>;
