// SPDX-License-Identifier: MPL-2.0

//! Providers of relations, computed on demand from the providers of their
//! operands.

use log::trace;

use crate::whatprovides::{Entry, SYSTEM_LIST};
use crate::{
    CmpFlags, DepKind, Dialect, Id, NamespaceProviders, Pool, PoolError, RelId, RelOp, Relation,
    SolvableId, StringId, WhatProvides,
};

/// Merge of two ascending lists.
fn union(a: &[SolvableId], b: &[SolvableId]) -> Vec<SolvableId> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => {
                out.push(a[i]);
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                out.push(b[j]);
                j += 1;
            }
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
    out
}

impl WhatProvides {
    /// Resolve a relation, reusing an operand's entry when the result is
    /// the same list.
    pub(crate) fn relation_providers(&self, pool: &Pool, id: RelId) -> Result<Entry, PoolError> {
        let rel = *pool.relation(id);
        trace!("computing providers of {}", pool.dep2str(Id::Relation(id)));
        let list = match rel.op {
            RelOp::Cmp(flags) if flags.is_empty() => Vec::new(),
            RelOp::Cmp(flags) => self.versioned_providers(pool, &rel, flags)?,
            RelOp::And | RelOp::With => {
                let first = self.entry(pool, rel.name)?;
                let second = self.entry(pool, rel.evr)?;
                let a = self.providers(first.clone());
                let b = self.providers(second);
                let both: Vec<SolvableId> = a
                    .iter()
                    .copied()
                    .filter(|p| b.binary_search(p).is_ok())
                    .collect();
                if both.len() == a.len() {
                    return Ok(first);
                }
                both
            }
            RelOp::Or => {
                let first = self.entry(pool, rel.name)?;
                let a = self.providers(first.clone());
                if a.is_empty() {
                    return self.entry(pool, rel.evr);
                }
                let b = self.providers(self.entry(pool, rel.evr)?);
                let either = union(&a, &b);
                if either.len() == a.len() {
                    return Ok(first);
                }
                either
            }
            RelOp::Namespace => {
                if rel.name == Id::Plain(StringId::NAMESPACE_OTHERPROVIDERS) {
                    return self.entry(pool, rel.evr);
                }
                match pool.namespace_providers(rel.name, rel.evr) {
                    NamespaceProviders::None => Vec::new(),
                    NamespaceProviders::System => return Ok(Entry::Slot(SYSTEM_LIST)),
                    NamespaceProviders::Solvables(mut list) => {
                        list.sort_unstable();
                        list.dedup();
                        list.retain(|p| *p != SolvableId::NULL);
                        list
                    }
                }
            }
            RelOp::Arch => {
                if rel.evr == Id::Plain(StringId::SRC) || rel.evr == Id::Plain(StringId::NOSRC) {
                    // Source packages provide nothing, so they are not in
                    // the index: scan the whole pool.
                    pool.solvable_ids()
                        .filter(|&p| {
                            let s = pool.solvable(p);
                            (Id::Plain(s.arch) == rel.evr || s.arch == StringId::NOSRC)
                                && !pool.is_disabled_solvable(s)
                                && pool.match_nevr(p, rel.name)
                        })
                        .collect()
                } else {
                    let entry = self.entry(pool, rel.name)?;
                    let all = self.providers(entry.clone());
                    let matching: Vec<SolvableId> = all
                        .iter()
                        .copied()
                        .filter(|&p| Id::Plain(pool.solvable(p).arch) == rel.evr)
                        .collect();
                    if matching.len() == all.len() {
                        return Ok(entry);
                    }
                    matching
                }
            }
            RelOp::FileConflict => {
                let dep = Id::Relation(id);
                self.providers(self.entry(pool, rel.name)?)
                    .iter()
                    .copied()
                    .filter(|&p| pool.deps(p, DepKind::Provides).contains(&dep))
                    .collect()
            }
            RelOp::Cond | RelOp::Compat => Vec::new(),
        };
        Ok(Entry::from_list(list))
    }

    /// Providers of `name <op> evr`: providers of the name whose provides
    /// satisfy the version constraint.
    fn versioned_providers(
        &self,
        pool: &Pool,
        rel: &Relation,
        flags: CmpFlags,
    ) -> Result<Vec<SolvableId>, PoolError> {
        let candidates = self.providers(self.entry(pool, rel.name)?);
        let name = pool.dep_name(rel.name);
        let unversioned_matches = pool.dialect() != Dialect::Debian;
        let mut found = Vec::new();
        for &p in candidates.iter() {
            let provides = pool.deps(p, DepKind::Provides);
            let hit = if provides.is_empty() {
                pool.match_nevr_rel(pool.solvable(p), rel)
            } else {
                provides.iter().any(|&dep| match dep {
                    Id::Plain(plain) => plain == name && unversioned_matches,
                    Id::Relation(r) => {
                        let provided = pool.relation(r);
                        match provided.op {
                            RelOp::Cmp(pflags) if provided.name == Id::Plain(name) => {
                                pool.match_flags_evr(pflags, provided.evr, flags, rel.evr)
                            }
                            _ => false,
                        }
                    }
                })
            };
            if hit {
                found.push(p);
            }
        }
        // The system provides every rpmlib() feature it is asked for.
        if found.is_empty() && pool.id2str(name).starts_with("rpmlib(") {
            found.push(SolvableId::SYSTEM);
        }
        Ok(found)
    }
}
