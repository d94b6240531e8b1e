// SPDX-License-Identifier: MPL-2.0

//! Version ordering for the package formats of the common Linux and BSD-like
//! distributions.
//!
//! Two layers are provided:
//!
//! - a plain version comparator per [Dialect] ([Dialect::vercmp]), ordering
//!   strings such as `1.0~rc1` and `1.0a` the way rpm, dpkg, pacman or the
//!   Haiku package kit do;
//! - an `epoch:version-release` comparator ([EvrComparator::evrcmp]) that
//!   splits compound version strings and orders them piecewise. Its result is
//!   an [EvrOrdering], which distinguishes a plain ordering from one where
//!   only the presence of an epoch or release tipped the balance.
//!
//! ```
//! use evr_cmp::{Dialect, EvrComparator, EvrMode, EvrOrdering};
//!
//! let rpm = EvrComparator::new(Dialect::Rpm);
//! assert_eq!(rpm.evrcmp("1.0-1", "1.0~rc1-3", EvrMode::Compare), EvrOrdering::Greater);
//!
//! let deb: Dialect = "debian".parse().unwrap();
//! assert!(deb.vercmp("1.0+dfsg", "1.0").is_gt());
//! ```

#![warn(missing_docs)]

mod deb;
mod evr;
mod haiku;
mod rpm;

#[cfg(any(test, feature = "proptest"))]
pub mod testing;

use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::str::FromStr;

use thiserror::Error;

pub use evr::{EvrComparator, EvrMode, EvrOrdering, EvrPolicy};

/// A versioning convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Dialect {
    /// rpm based distributions.
    #[default]
    Rpm,
    /// dpkg based distributions.
    #[cfg_attr(feature = "serde", serde(alias = "deb"))]
    Debian,
    /// pacman based distributions.
    Arch,
    /// The Haiku package kit.
    Haiku,
}

impl Dialect {
    /// Compare two plain version strings, without any epoch or release
    /// handling.
    pub fn vercmp(self, a: &str, b: &str) -> Ordering {
        match self {
            Self::Rpm => rpm::vercmp(a, b),
            Self::Debian => deb::vercmp(a, b),
            Self::Arch => rpm::vercmp_pacman(a, b),
            Self::Haiku => haiku::vercmp(a, b),
        }
    }

    /// The mode dependency versions are compared in.
    ///
    /// Debian orders releases strictly, the others let a requirement
    /// without a release match any release.
    pub fn dependency_mode(self) -> EvrMode {
        match self {
            Self::Debian => EvrMode::Compare,
            Self::Rpm | Self::Arch | Self::Haiku => EvrMode::MatchRelease,
        }
    }

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Rpm => "rpm",
            Self::Debian => "debian",
            Self::Arch => "arch",
            Self::Haiku => "haiku",
        }
    }
}

impl Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A dialect name that is not recognized.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown version dialect `{0}`")]
pub struct UnknownDialect(pub String);

impl FromStr for Dialect {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rpm" => Ok(Self::Rpm),
            "deb" | "debian" => Ok(Self::Debian),
            "arch" => Ok(Self::Arch),
            "haiku" => Ok(Self::Haiku),
            _ => Err(UnknownDialect(s.to_string())),
        }
    }
}
