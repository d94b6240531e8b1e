// SPDX-License-Identifier: MPL-2.0

//! The whatprovides index: which solvables provide a capability.
//!
//! Plain names are indexed eagerly when the index is built. Every provider
//! list lives in one flat array of solvable ids, each list terminated by
//! [SolvableId::NULL], so that a name maps to a single offset. Lists are
//! ascending and duplicate free, and names with identical lists share one
//! copy.
//!
//! Relations are resolved lazily on their first lookup and cached. A cached
//! entry may point at the list of one of the relation's operands instead of
//! holding its own copy.

use std::ops::Deref;
use std::sync::{Arc, PoisonError, RwLock};

use log::debug;

use crate::{DepKind, Id, Map, Pool, PoolError, RelId, SolvableId, StringId};

/// Offset of the shared empty list.
pub(crate) const EMPTY_LIST: u32 = 1;
/// Offset of the `[system]` list.
pub(crate) const SYSTEM_LIST: u32 = 2;
/// Offset of the first list built from the pool.
const FIRST_LIST: u32 = 4;

/// A cached provider list.
#[derive(Debug, Clone)]
pub(crate) enum Entry {
    /// A list inside the flat array of the index.
    Slot(u32),
    /// A list computed for a relation.
    List(Arc<[SolvableId]>),
}

impl Entry {
    /// Shares the fixed lists where possible.
    pub(crate) fn from_list(list: Vec<SolvableId>) -> Self {
        match list.as_slice() {
            [] => Self::Slot(EMPTY_LIST),
            [SolvableId::SYSTEM] => Self::Slot(SYSTEM_LIST),
            _ => Self::List(list.into()),
        }
    }
}

/// Solvables providing a dependency, in ascending order.
#[derive(Debug, Clone)]
pub enum Providers<'a> {
    /// Borrowed from the index.
    Indexed(&'a [SolvableId]),
    /// Computed for a relation and shared with the cache.
    Computed(Arc<[SolvableId]>),
}

impl Deref for Providers<'_> {
    type Target = [SolvableId];

    fn deref(&self) -> &[SolvableId] {
        match self {
            Self::Indexed(list) => list,
            Self::Computed(list) => list,
        }
    }
}

impl PartialEq for Providers<'_> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl Eq for Providers<'_> {}

/// Index from dependencies to the solvables providing them.
///
/// Built from a [Pool] by [WhatProvides::build], and only valid for the
/// state of the pool it was built from.
#[derive(Debug)]
pub struct WhatProvides {
    generation: u64,
    /// Offset of the provider list of every string id known at build time.
    offsets: Vec<u32>,
    data: Vec<SolvableId>,
    relations: RwLock<Map<RelId, Entry>>,
}

/// Provides of an indexed solvable, including its own name, reduced to
/// their plain names.
fn provided_names<'a>(pool: &'a Pool, id: SolvableId) -> impl Iterator<Item = StringId> + 'a {
    let name = pool.solvable(id).name;
    std::iter::once(name)
        .chain(
            pool.deps(id, DepKind::Provides)
                .iter()
                .filter(|dep| !dep.is_marker())
                .map(|&dep| pool.dep_name(dep)),
        )
        .filter(|name| !name.is_null())
}

/// The list at `offset`, without its terminator.
fn list_at(data: &[SolvableId], offset: u32) -> &[SolvableId] {
    let tail = data.get(offset as usize..).unwrap_or_default();
    let len = tail
        .iter()
        .position(|p| *p == SolvableId::NULL)
        .unwrap_or(tail.len());
    &tail[..len]
}

impl WhatProvides {
    /// Index every solvable the pool considers indexable.
    pub fn build(pool: &Pool) -> Result<Self, PoolError> {
        let nstrings = pool.nstrings();
        debug!(
            "number of solvables: {}, number of ids: {} + {}",
            pool.nsolvables(),
            nstrings,
            pool.nrels()
        );

        let indexed: Vec<SolvableId> = (1..pool.nsolvables() as u32)
            .map(SolvableId)
            .filter(|&p| pool.is_indexed(pool.solvable(p)))
            .collect();

        // Count the providers of every name.
        let mut offsets: Vec<u32> = Vec::new();
        offsets.try_reserve_exact(nstrings)?;
        offsets.resize(nstrings, 0);
        for &p in &indexed {
            for name in provided_names(pool, p) {
                offsets[name.0 as usize] += 1;
            }
        }

        // Turn counts into offsets pointing at each list's terminator.
        let mut len = FIRST_LIST;
        let mut names = 0;
        for slot in offsets.iter_mut() {
            if *slot == 0 {
                continue;
            }
            len += *slot;
            *slot = len;
            len += 1;
            names += 1;
        }
        debug!("provide ids: {names}, provide space needed: {len}");

        let mut data: Vec<SolvableId> = Vec::new();
        data.try_reserve_exact(len as usize)?;
        data.resize(len as usize, SolvableId::NULL);
        data[SYSTEM_LIST as usize] = SolvableId::SYSTEM;

        // Fill back to front so that lists come out ascending.
        for &p in indexed.iter().rev() {
            for name in provided_names(pool, p) {
                let slot = &mut offsets[name.0 as usize];
                if data[*slot as usize] != p {
                    data[*slot as usize - 1] = p;
                    *slot -= 1;
                }
            }
        }

        let mut index = Self {
            generation: pool.generation(),
            offsets,
            data,
            relations: RwLock::new(Map::default()),
        };
        index.shrink();
        let system = &mut index.offsets[StringId::SYSTEM_SYSTEM.0 as usize];
        if *system == 0 {
            *system = SYSTEM_LIST;
        }
        Ok(index)
    }

    /// Share identical lists and drop the slack left by duplicate provides.
    fn shrink(&mut self) {
        let data = &self.data;
        let mut sorted: Vec<u32> = (0..self.offsets.len() as u32)
            .filter(|&id| self.offsets[id as usize] >= FIRST_LIST)
            .collect();
        sorted.sort_unstable_by(|&a, &b| {
            let la = list_at(data, self.offsets[a as usize]);
            let lb = list_at(data, self.offsets[b as usize]);
            la.cmp(lb).then(a.cmp(&b))
        });

        // Names whose list equals the one of a smaller name.
        let mut aliases: Map<u32, u32> = Map::default();
        let mut last: Option<u32> = None;
        for &id in &sorted {
            if let Some(prev) = last {
                let same = list_at(data, self.offsets[prev as usize])
                    == list_at(data, self.offsets[id as usize]);
                if same {
                    aliases.insert(id, prev);
                    continue;
                }
            }
            last = Some(id);
        }

        let before = self.data.len();
        let mut write = FIRST_LIST as usize;
        for id in 0..self.offsets.len() {
            let offset = self.offsets[id];
            if let Some(&target) = aliases.get(&(id as u32)) {
                self.offsets[id] = self.offsets[target as usize];
                continue;
            }
            if offset < FIRST_LIST {
                continue;
            }
            let len = list_at(&self.data, offset).len();
            let read = offset as usize;
            self.data.copy_within(read..read + len, write);
            self.data[write + len] = SolvableId::NULL;
            self.offsets[id] = write as u32;
            write += len + 1;
        }
        self.data.truncate(write);
        self.data.shrink_to_fit();
        debug!("shrunk whatprovides data from {before} to {write}");
    }

    /// Generation of the pool this index was built from.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Solvables providing `dep`.
    ///
    /// Plain names interned after the index was built have no providers.
    /// Relations are resolved and cached on first use.
    pub fn lookup<'a>(&'a self, pool: &Pool, dep: Id) -> Result<Providers<'a>, PoolError> {
        if pool.generation() != self.generation {
            return Err(PoolError::StaleIndex);
        }
        let entry = self.entry(pool, dep)?;
        Ok(self.providers(entry))
    }

    pub(crate) fn providers(&self, entry: Entry) -> Providers<'_> {
        match entry {
            Entry::Slot(offset) => Providers::Indexed(list_at(&self.data, offset)),
            Entry::List(list) => Providers::Computed(list),
        }
    }

    pub(crate) fn entry(&self, pool: &Pool, dep: Id) -> Result<Entry, PoolError> {
        match dep {
            Id::Plain(name) => Ok(Entry::Slot(self.plain_offset(name))),
            Id::Relation(rel) => {
                if let Some(entry) = self.read_cache().get(&rel) {
                    return Ok(entry.clone());
                }
                // Computing may look up the operands, the lock is not held.
                let entry = self.relation_providers(pool, rel)?;
                let mut cache = self
                    .relations
                    .write()
                    .unwrap_or_else(PoisonError::into_inner);
                debug!("cached providers of relation {}", rel.0);
                Ok(cache.entry(rel).or_insert(entry).clone())
            }
        }
    }

    fn plain_offset(&self, name: StringId) -> u32 {
        match self.offsets.get(name.0 as usize) {
            Some(&offset) if offset != 0 => offset,
            _ => EMPTY_LIST,
        }
    }

    fn read_cache(&self) -> std::sync::RwLockReadGuard<'_, Map<RelId, Entry>> {
        self.relations.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of relations resolved so far.
    pub fn cached_relations(&self) -> usize {
        self.read_cache().len()
    }

    /// Size of the flat provider array, terminators included.
    pub fn data_len(&self) -> usize {
        self.data.len()
    }
}
