//! # VAX Machine State
//!
//! The pieces of machine state a disassembler needs: a flat address space,
//! the general register file and a fetch unit that walks the instruction
//! stream through the program counter.
//!
//! ## Example
//!
//! ```rust
//! use vax_machine::{AddressSpace, Fetcher};
//!
//! let memory = AddressSpace::from_bytes(&[0xD0, 0x50, 0x51]);
//! let mut fetcher = Fetcher::new(&memory);
//! assert_eq!(fetcher.fetch_byte().unwrap(), 0xD0);
//! assert_eq!(fetcher.pc(), 1);
//! ```

pub mod error;
pub mod fetch;
pub mod loader;
pub mod memory;
pub mod registers;

pub use error::{MachineError, Result};
pub use fetch::Fetcher;
pub use loader::{load_image, LoadedImage};
pub use memory::AddressSpace;
pub use registers::RegisterFile;
