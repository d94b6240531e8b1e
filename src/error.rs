// SPDX-License-Identifier: MPL-2.0

//! Handling pool errors.

use std::collections::TryReserveError;

use thiserror::Error;

/// There are only a handful of ways a pool operation can fail. Matching and
/// comparing versions never fails: malformed version strings simply lack an
/// epoch or a release.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// Growing the index storage failed.
    #[error("out of memory while building the whatprovides index")]
    OutOfMemory(#[from] TryReserveError),

    /// A raw relation flags value that is neither a comparison (0 to 7) nor
    /// one of the known combinators (16 to 23).
    #[error("unsupported relation kind {0}")]
    UnsupportedRelationKind(u8),

    /// A dialect name that is not recognized.
    #[error("unknown version dialect `{0}`")]
    UnknownDialect(String),

    /// The index was built from an older state of the pool.
    #[error("the whatprovides index is stale, the pool changed since it was built")]
    StaleIndex,

    /// A lookup was made before the index was built.
    #[error("the whatprovides index has not been built")]
    IndexNotBuilt,
}

impl From<evr_cmp::UnknownDialect> for PoolError {
    fn from(err: evr_cmp::UnknownDialect) -> Self {
        Self::UnknownDialect(err.0)
    }
}
