// SPDX-License-Identifier: MPL-2.0

//! Dense handles for interned strings, relations, solvables and repositories.

use std::fmt;

/// Handle to an interned string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[repr(transparent)]
pub struct StringId(pub u32);

/// Strings every pool knows, interned in this order when the pool is created.
pub(crate) const WELL_KNOWN: [&str; 16] = [
    "<NULL>",
    "",
    "solvable:prereqmarker",
    "solvable:filemarker",
    "system:system",
    "namespace:installed",
    "namespace:modalias",
    "namespace:splitprovides",
    "namespace:language",
    "namespace:filesystem",
    "namespace:otherproviders",
    "src",
    "nosrc",
    "noarch",
    "all",
    "any",
];

impl StringId {
    /// No string at all.
    pub const NULL: Self = Self(0);
    /// The empty string.
    pub const EMPTY: Self = Self(1);
    /// Separates declared requires from pre-requires.
    pub const PREREQMARKER: Self = Self(2);
    /// Separates declared provides from file provides.
    pub const FILEMARKER: Self = Self(3);
    /// Name of the system solvable.
    pub const SYSTEM_SYSTEM: Self = Self(4);
    /// `namespace:installed(x)`: `x` is installed.
    pub const NAMESPACE_INSTALLED: Self = Self(5);
    /// `namespace:modalias(x)`: hardware matching a kernel module alias.
    pub const NAMESPACE_MODALIAS: Self = Self(6);
    /// `namespace:splitprovides(x)`: a package split off another.
    pub const NAMESPACE_SPLITPROVIDES: Self = Self(7);
    /// `namespace:language(x)`: a requested locale.
    pub const NAMESPACE_LANGUAGE: Self = Self(8);
    /// `namespace:filesystem(x)`: a mounted filesystem type.
    pub const NAMESPACE_FILESYSTEM: Self = Self(9);
    /// `namespace:otherproviders(x)` is provided by whatever provides `x`.
    pub const NAMESPACE_OTHERPROVIDERS: Self = Self(10);
    /// Source package architecture.
    pub const SRC: Self = Self(11);
    /// Source package that cannot be built.
    pub const NOSRC: Self = Self(12);
    /// Architecture independent packages on rpm.
    pub const NOARCH: Self = Self(13);
    /// Architecture independent packages on Debian.
    pub const ALL: Self = Self(14);
    /// Architecture independent packages on Arch and Haiku.
    pub const ANY: Self = Self(15);

    /// Whether this is the null string.
    pub fn is_null(self) -> bool {
        self == Self::NULL
    }

    /// Whether this is one of the markers found inside dependency lists.
    pub fn is_marker(self) -> bool {
        self == Self::PREREQMARKER || self == Self::FILEMARKER
    }
}

/// Handle to an interned relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[repr(transparent)]
pub struct RelId(pub u32);

/// A dependency: either a plain name or a relation over other ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Id {
    /// Interned string, usually a capability name.
    Plain(StringId),
    /// Interned relation.
    Relation(RelId),
}

impl Id {
    /// The null id, terminating dependency lists.
    pub const NULL: Self = Self::Plain(StringId::NULL);

    /// Whether this is the null id.
    pub fn is_null(self) -> bool {
        self == Self::NULL
    }

    /// Whether this is one of the dependency list markers.
    pub fn is_marker(self) -> bool {
        matches!(self, Self::Plain(s) if s.is_marker())
    }

    /// The string id, if this is a plain id.
    pub fn as_plain(self) -> Option<StringId> {
        match self {
            Self::Plain(s) => Some(s),
            Self::Relation(_) => None,
        }
    }

    /// The relation id, if this is a relation.
    pub fn as_relation(self) -> Option<RelId> {
        match self {
            Self::Plain(_) => None,
            Self::Relation(r) => Some(r),
        }
    }
}

impl Default for Id {
    fn default() -> Self {
        Self::NULL
    }
}

impl From<StringId> for Id {
    fn from(s: StringId) -> Self {
        Self::Plain(s)
    }
}

impl From<RelId> for Id {
    fn from(r: RelId) -> Self {
        Self::Relation(r)
    }
}

/// Handle to a solvable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[repr(transparent)]
pub struct SolvableId(pub u32);

impl SolvableId {
    /// Never a provider, terminates provider lists.
    pub const NULL: Self = Self(0);
    /// The system solvable, standing for everything the running system
    /// provides implicitly.
    pub const SYSTEM: Self = Self(1);

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SolvableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle to a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[repr(transparent)]
pub struct RepoId(pub u32);

/// Offset of a dependency list in its repository's id array. Zero is the
/// empty list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct DepOffset(pub u32);

impl DepOffset {
    /// No list.
    pub const EMPTY: Self = Self(0);

    /// Whether there is no list.
    pub fn is_empty(self) -> bool {
        self == Self::EMPTY
    }
}
