//! # Operand Types
//!
//! Every operand specifier of an instruction is tagged with the data type it
//! accesses. The type fixes the width of immediate literals and, for the
//! floating formats, the suffix shown after literal operands.
//!
//! Branch displacements are a separate class: they are not preceded by a mode
//! byte and always render as an absolute branch target.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operand type tag
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperandType {
    /// 8-bit integer
    Byte,
    /// 16-bit integer
    Word,
    /// 32-bit integer
    Long,
    /// 64-bit integer
    Quad,
    /// 128-bit integer
    Octa,
    /// 32-bit F_floating
    FFloat,
    /// 64-bit D_floating
    DFloat,
    /// 64-bit G_floating
    GFloat,
    /// 128-bit H_floating
    HFloat,
    /// 8-bit signed branch displacement
    Branch8,
    /// 16-bit signed branch displacement
    Branch16,
}

impl OperandType {
    /// Width in bytes of a value of this type
    ///
    /// For branch tags this is the width of the inline displacement.
    pub const fn size(self) -> usize {
        match self {
            Self::Byte | Self::Branch8 => 1,
            Self::Word | Self::Branch16 => 2,
            Self::Long | Self::FFloat => 4,
            Self::Quad | Self::DFloat | Self::GFloat => 8,
            Self::Octa | Self::HFloat => 16,
        }
    }

    #[inline]
    pub const fn is_branch(self) -> bool {
        matches!(self, Self::Branch8 | Self::Branch16)
    }

    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(
            self,
            Self::FFloat | Self::DFloat | Self::GFloat | Self::HFloat
        )
    }

    /// Annotation appended to literal and immediate operands
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::FFloat => " [f-float]",
            Self::DFloat => " [d-float]",
            Self::GFloat => " [g-float]",
            Self::HFloat => " [h-float]",
            _ => "",
        }
    }

    /// Single-letter code used in architecture reference tables
    pub const fn code(self) -> char {
        match self {
            Self::Byte => 'b',
            Self::Word => 'w',
            Self::Long => 'l',
            Self::Quad => 'q',
            Self::Octa => 'o',
            Self::FFloat => 'f',
            Self::DFloat => 'd',
            Self::GFloat => 'g',
            Self::HFloat => 'h',
            Self::Branch8 => '1',
            Self::Branch16 => '2',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'b' => Some(Self::Byte),
            'w' => Some(Self::Word),
            'l' => Some(Self::Long),
            'q' => Some(Self::Quad),
            'o' => Some(Self::Octa),
            'f' => Some(Self::FFloat),
            'd' => Some(Self::DFloat),
            'g' => Some(Self::GFloat),
            'h' => Some(Self::HFloat),
            '1' => Some(Self::Branch8),
            '2' => Some(Self::Branch16),
            _ => None,
        }
    }
}

impl fmt::Display for OperandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [OperandType; 11] = [
        OperandType::Byte,
        OperandType::Word,
        OperandType::Long,
        OperandType::Quad,
        OperandType::Octa,
        OperandType::FFloat,
        OperandType::DFloat,
        OperandType::GFloat,
        OperandType::HFloat,
        OperandType::Branch8,
        OperandType::Branch16,
    ];

    #[test]
    fn test_sizes() {
        let sizes: Vec<usize> = ALL.iter().map(|t| t.size()).collect();
        assert_eq!(sizes, vec![1, 2, 4, 8, 16, 4, 8, 8, 16, 1, 2]);
    }

    #[test]
    fn test_suffix_only_for_floats() {
        for ty in ALL {
            assert_eq!(ty.is_float(), !ty.suffix().is_empty(), "{:?}", ty);
        }
        assert_eq!(OperandType::GFloat.suffix(), " [g-float]");
    }

    #[test]
    fn test_code_lookup() {
        for ty in ALL {
            assert_eq!(OperandType::from_code(ty.code()), Some(ty));
        }
        assert_eq!(OperandType::from_code('x'), None);
    }

    #[test]
    fn test_branch_classification() {
        assert!(OperandType::Branch8.is_branch());
        assert!(OperandType::Branch16.is_branch());
        assert!(!OperandType::Long.is_branch());
    }
}
