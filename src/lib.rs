//! Workspace-level end-to-end tests for the VAX disassembler live in `tests/`.
