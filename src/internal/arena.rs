// SPDX-License-Identifier: MPL-2.0

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::ops::Index;

use crate::type_aliases::FnvIndexSet;

/// Interns values into dense `u32` ids.
///
/// Ids are handed out in insertion order and stay valid for the life of the
/// arena. Inserting a value twice returns the first id.
#[derive(Clone)]
pub(crate) struct HashArena<T: Hash + Eq> {
    data: FnvIndexSet<T>,
}

impl<T: Hash + Eq + fmt::Debug> fmt::Debug for HashArena<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashArena")
            .field("len", &self.data.len())
            .field("data", &self.data)
            .finish()
    }
}

impl<T: Hash + Eq> HashArena<T> {
    pub(crate) fn new() -> Self {
        Self {
            data: FnvIndexSet::default(),
        }
    }

    pub(crate) fn alloc(&mut self, value: T) -> u32 {
        let (raw, _) = self.data.insert_full(value);
        raw as u32
    }

    pub(crate) fn lookup<Q>(&self, value: &Q) -> Option<u32>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.data.get_index_of(value).map(|raw| raw as u32)
    }

    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }
}

impl<T: Hash + Eq> Index<u32> for HashArena<T> {
    type Output = T;

    fn index(&self, id: u32) -> &T {
        &self.data[id as usize]
    }
}
