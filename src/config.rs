// SPDX-License-Identifier: MPL-2.0

//! Pool configuration: the versioning dialect and evr policy knobs.

use evr_cmp::{Dialect, EvrComparator, EvrPolicy};

use crate::{PoolError, StringId};

/// Settings fixed when a pool is created.
///
/// The two policy flags can be flipped later with
/// [Pool::set_flag](crate::Pool::set_flag).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PoolConfig {
    /// Versioning convention of every evr in the pool.
    pub dialect: Dialect,
    /// Treat a missing epoch as epoch zero.
    pub promote_epoch: bool,
    /// Releases may carry a `:`-separated distribution epoch.
    pub dist_epoch: bool,
}

impl PoolConfig {
    /// Default settings for a dialect.
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            ..Self::default()
        }
    }

    /// Default settings for a dialect given by name, such as `rpm` or `deb`.
    pub fn from_dialect_name(name: &str) -> Result<Self, PoolError> {
        Ok(Self::new(name.parse()?))
    }

    /// The evr comparator these settings describe.
    pub fn evr_comparator(&self) -> EvrComparator {
        EvrComparator::new(self.dialect).with_policy(EvrPolicy {
            promote_epoch: self.promote_epoch,
            dist_epoch: self.dist_epoch,
        })
    }

    /// Architecture of architecture independent packages.
    pub fn noarch(&self) -> StringId {
        match self.dialect {
            Dialect::Rpm => StringId::NOARCH,
            Dialect::Debian => StringId::ALL,
            Dialect::Arch | Dialect::Haiku => StringId::ANY,
        }
    }
}

/// Policy flags that may change after the pool is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoolFlag {
    /// See [PoolConfig::promote_epoch].
    PromoteEpoch,
    /// See [PoolConfig::dist_epoch].
    HaveDistEpoch,
}
