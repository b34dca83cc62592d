//! Image loader
//!
//! Splits an executable image into its exec header and payload and places
//! the payload at address 0 of a fresh address space.

use crate::error::Result;
use crate::memory::AddressSpace;
use vax_spec::{Config, ImageHeader, SpecError};

/// Address space populated from an image, plus its header
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub header: ImageHeader,
    pub memory: AddressSpace,
}

impl LoadedImage {
    /// Size of the code segment, i.e. where disassembly stops
    pub fn code_size(&self) -> u32 {
        self.header.text_size
    }
}

/// Load an image using `config` for the address space and header sizes
pub fn load_image(bytes: &[u8], config: &Config) -> Result<LoadedImage> {
    config.validate().map_err(SpecError::InvalidConfig)?;

    let header = ImageHeader::from_bytes(bytes)?;
    if bytes.len() < config.header_size {
        return Err(SpecError::InvalidHeaderSize {
            expected: config.header_size,
            found: bytes.len(),
        }
        .into());
    }

    let payload = &bytes[config.header_size..];
    let mut memory = AddressSpace::new(config.memory_size);
    memory.load(payload, 0)?;

    tracing::info!(
        "Loaded {} payload bytes, code segment {} bytes, data segment {} bytes",
        payload.len(),
        header.text_size,
        header.data_size
    );
    if header.text_size as usize > payload.len() {
        tracing::warn!(
            "Code segment size {} exceeds payload size {}",
            header.text_size,
            payload.len()
        );
    }

    Ok(LoadedImage { header, memory })
}
