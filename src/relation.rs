// SPDX-License-Identifier: MPL-2.0

//! Relations: versioned dependencies and boolean combinations of
//! dependencies.

use bitflags::bitflags;

use crate::{Id, PoolError};

bitflags! {
    /// Version comparison operator, as a set of the orderings it accepts.
    ///
    /// `GT | EQ` is `>=`, `LT | GT` is `<>`, all three together accept any
    /// version.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
    pub struct CmpFlags: u8 {
        /// Greater than.
        const GT = 1;
        /// Equal.
        const EQ = 2;
        /// Less than.
        const LT = 4;
    }
}

impl CmpFlags {
    /// The operator as written in dependency strings, surrounded by spaces.
    pub fn as_str(self) -> &'static str {
        const OPS: [&str; 8] = [" ! ", " > ", " = ", " >= ", " < ", " <> ", " <= ", " <=> "];
        OPS[usize::from(self.bits() & 7)]
    }
}

/// What a relation expresses about its two operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RelOp {
    /// `name <op> evr`: a versioned dependency.
    Cmp(CmpFlags),
    /// Both operands.
    And,
    /// Either operand.
    Or,
    /// Both operands, satisfied by the same package.
    With,
    /// `name(evr)`, resolved by the namespace callback.
    Namespace,
    /// `name.evr`: packages called `name` built for architecture `evr`.
    Arch,
    /// A conflict on a file (`name`) with content digest `evr`.
    FileConflict,
    /// `name` if `evr` is installed.
    Cond,
    /// `name` is a version, `evr` the oldest version it is compatible with.
    Compat,
}

impl RelOp {
    /// Decode the numeric flags used by repository formats.
    pub fn from_raw(flags: u8) -> Result<Self, PoolError> {
        Ok(match flags {
            0..=7 => Self::Cmp(CmpFlags::from_bits_truncate(flags)),
            16 => Self::And,
            17 => Self::Or,
            18 => Self::With,
            19 => Self::Namespace,
            20 => Self::Arch,
            21 => Self::FileConflict,
            22 => Self::Cond,
            23 => Self::Compat,
            _ => return Err(PoolError::UnsupportedRelationKind(flags)),
        })
    }

    /// The numeric flags used by repository formats.
    pub fn to_raw(self) -> u8 {
        match self {
            Self::Cmp(flags) => flags.bits(),
            Self::And => 16,
            Self::Or => 17,
            Self::With => 18,
            Self::Namespace => 19,
            Self::Arch => 20,
            Self::FileConflict => 21,
            Self::Cond => 22,
            Self::Compat => 23,
        }
    }

    /// Whether the operands are themselves dependencies combined by a
    /// boolean operator.
    pub fn is_boolean(self) -> bool {
        matches!(self, Self::And | Self::Or | Self::With | Self::Cond)
    }

    /// Operator text between the two operands when printing.
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Cmp(flags) => flags.as_str(),
            Self::And => " & ",
            Self::Or => " | ",
            Self::With => " + ",
            Self::Namespace => " NAMESPACE ",
            Self::Arch => ".",
            Self::FileConflict => " FILECONFLICT ",
            Self::Cond => " IF ",
            Self::Compat => " compat >= ",
        }
    }
}

impl From<CmpFlags> for RelOp {
    fn from(flags: CmpFlags) -> Self {
        Self::Cmp(flags)
    }
}

/// An interned `(name, evr, op)` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Relation {
    /// Left operand, usually a capability name.
    pub name: Id,
    /// Right operand, a version for comparisons.
    pub evr: Id,
    /// Operator.
    pub op: RelOp,
}
