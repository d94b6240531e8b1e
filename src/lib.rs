// SPDX-License-Identifier: MPL-2.0

//! Package pool and dependency index.
//!
//! A [Pool] interns the strings and relations of a package universe and
//! holds its repositories and solvables (packages). From it a
//! [WhatProvides] index is built, answering which solvables provide a
//! dependency:
//!
//! - plain names map to the solvables whose name or provides carry them;
//! - versioned dependencies such as `a >= 1.2` keep the providers of `a`
//!   whose provided version satisfies the requirement;
//! - boolean combinations, architecture qualifiers (`a.x86_64`, `a.src`),
//!   namespaces and file conflicts are resolved from the providers of their
//!   operands.
//!
//! Versions are compared according to the [Dialect] the pool was created
//! with, see the [evr_cmp] crate.
//!
//! # Basic example
//!
//! ```
//! use solvpool::{DepKind, Pool, PoolError};
//!
//! # fn try_main() -> Result<(), PoolError> {
//! let mut pool = Pool::new();
//! let repo = pool.add_repo("available");
//!
//! let pkg = pool.add_solvable(repo);
//! let name = pool.str2id("foo");
//! let evr = pool.str2id("1.2-3");
//! let solvable = pool.solvable_mut(pkg);
//! solvable.name = name;
//! solvable.evr = evr;
//! pool.add_self_provide(pkg);
//!
//! pool.create_whatprovides()?;
//! let dep = pool.parse_dep("foo >= 1.0");
//! assert_eq!(&*pool.whatprovides(dep)?, &[pkg]);
//! let dep = pool.parse_dep("foo > 2");
//! assert!(pool.whatprovides(dep)?.is_empty());
//! # Ok(())
//! # }
//! # try_main().unwrap();
//! ```
//!
//! # Invalidation
//!
//! Changing solvables, repositories or the pool policy drops the index held
//! by the pool. Call [Pool::create_whatprovides] again before the next
//! lookup, or [Pool::whatprovides] fails with [PoolError::IndexNotBuilt].

#![warn(missing_docs)]

mod config;
mod dep;
mod error;
mod id;
mod matcher;
mod pool;
mod rel_providers;
mod relation;
mod solvable;
mod type_aliases;
mod whatprovides;

mod internal;

pub use config::{PoolConfig, PoolFlag};
pub use error::PoolError;
pub use id::{DepOffset, Id, RelId, RepoId, SolvableId, StringId};
pub use pool::{FileConflict, NamespaceProvider, NamespaceProviders, Pool};
pub use relation::{CmpFlags, RelOp, Relation};
pub use solvable::{DepKind, Repo, Solvable};
pub use type_aliases::{Map, Set};
pub use whatprovides::{Providers, WhatProvides};

pub use evr_cmp::{Dialect, EvrComparator, EvrMode, EvrOrdering, EvrPolicy};
