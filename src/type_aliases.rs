// SPDX-License-Identifier: MPL-2.0

//! Publicly exported type aliases.

/// Map implementation used by the library.
pub type Map<K, V> = rustc_hash::FxHashMap<K, V>;

/// Set implementation used by the library.
pub type Set<V> = rustc_hash::FxHashSet<V>;

/// Insertion ordered set, used to intern values into dense ids.
pub(crate) type FnvIndexSet<V> = indexmap::IndexSet<V, rustc_hash::FxBuildHasher>;
