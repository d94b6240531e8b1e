// SPDX-License-Identifier: MPL-2.0

//! Matching versioned dependencies against provides and against package
//! identities.

use std::borrow::Cow;

use evr_cmp::{EvrMode, EvrOrdering};

use crate::{CmpFlags, Id, Pool, RelOp, Relation, Solvable, SolvableId, StringId};

impl Pool {
    /// Text of a version operand. Relations, such as compat ranges, compare
    /// by their printed form.
    fn evr_str(&self, evr: Id) -> Cow<'_, str> {
        match evr {
            Id::Plain(s) => Cow::Borrowed(self.id2str(s)),
            Id::Relation(_) => Cow::Owned(self.dep2str(evr)),
        }
    }

    /// Compare two version ids.
    pub fn evrcmp(&self, a: Id, b: Id, mode: EvrMode) -> EvrOrdering {
        if a == b {
            return EvrOrdering::Equal;
        }
        self.evr_comparator()
            .evrcmp(&self.evr_str(a), &self.evr_str(b), mode)
    }

    /// Compare two version strings.
    pub fn evrcmp_str(&self, a: &str, b: &str, mode: EvrMode) -> EvrOrdering {
        self.evr_comparator().evrcmp(a, b, mode)
    }

    /// Whether a provide `<pflags> pevr` satisfies a requirement
    /// `<flags> evr` on the same name.
    pub fn match_flags_evr(&self, pflags: CmpFlags, pevr: Id, flags: CmpFlags, evr: Id) -> bool {
        if pflags.is_empty() || flags.is_empty() {
            return false;
        }
        if pflags.is_all() || flags.is_all() {
            return true;
        }
        if pflags.intersects(flags & (CmpFlags::LT | CmpFlags::GT)) {
            return true;
        }
        if pevr == evr {
            return pflags.contains(CmpFlags::EQ) && flags.contains(CmpFlags::EQ);
        }
        if let Id::Relation(r) = pevr {
            let range = self.relation(r);
            if range.op == RelOp::Compat {
                return self.match_compat(range, flags, evr);
            }
        }
        match self.evrcmp(pevr, evr, self.dialect().dependency_mode()) {
            EvrOrdering::StrictLess => pflags.contains(CmpFlags::EQ),
            EvrOrdering::Less => flags.contains(CmpFlags::LT) || pflags.contains(CmpFlags::GT),
            EvrOrdering::Equal => pflags.contains(CmpFlags::EQ) && flags.contains(CmpFlags::EQ),
            EvrOrdering::Greater => flags.contains(CmpFlags::GT) || pflags.contains(CmpFlags::LT),
            EvrOrdering::StrictGreater => flags.contains(CmpFlags::EQ),
        }
    }

    /// A provided `actual compat >= oldest` version. Requirements pointing
    /// upwards also have to be met by the oldest compatible version.
    fn match_compat(&self, range: &Relation, flags: CmpFlags, evr: Id) -> bool {
        if !flags.contains(CmpFlags::GT) || flags.contains(CmpFlags::LT) {
            return self.match_flags_evr(CmpFlags::EQ, range.name, flags, evr);
        }
        self.match_flags_evr(CmpFlags::LT | CmpFlags::EQ, range.name, flags, evr)
            && self.match_flags_evr(CmpFlags::GT | CmpFlags::EQ, range.evr, CmpFlags::EQ, evr)
    }

    /// Whether the name, version and architecture of a solvable satisfy a
    /// dependency, ignoring its provides.
    pub fn match_nevr(&self, id: SolvableId, dep: Id) -> bool {
        self.match_solvable(self.solvable(id), dep)
    }

    fn match_solvable(&self, s: &Solvable, dep: Id) -> bool {
        match dep {
            Id::Plain(name) => name == s.name,
            Id::Relation(r) => self.match_nevr_rel(s, self.relation(r)),
        }
    }

    pub(crate) fn match_nevr_rel(&self, s: &Solvable, rel: &Relation) -> bool {
        let flags = match rel.op {
            RelOp::Arch => {
                let arch_matches = Id::Plain(s.arch) == rel.evr
                    || (rel.evr == Id::Plain(StringId::SRC) && s.arch == StringId::NOSRC);
                return arch_matches && self.match_solvable(s, rel.name);
            }
            RelOp::Or => {
                return self.match_solvable(s, rel.name) || self.match_solvable(s, rel.evr);
            }
            RelOp::And | RelOp::With => {
                return self.match_solvable(s, rel.name) && self.match_solvable(s, rel.evr);
            }
            RelOp::Cmp(flags) => flags,
            _ => return false,
        };
        if !self.match_solvable(s, rel.name) {
            return false;
        }
        if Id::Plain(s.evr) == rel.evr {
            return flags.contains(CmpFlags::EQ);
        }
        if flags.is_empty() {
            return false;
        }
        if flags.is_all() {
            return true;
        }
        match self.evrcmp(Id::Plain(s.evr), rel.evr, self.dialect().dependency_mode()) {
            EvrOrdering::StrictLess => true,
            EvrOrdering::Less => flags.contains(CmpFlags::LT),
            EvrOrdering::Equal | EvrOrdering::StrictGreater => flags.contains(CmpFlags::EQ),
            EvrOrdering::Greater => flags.contains(CmpFlags::GT),
        }
    }

    /// Whether the provided dependency `provider` matches the requirement
    /// `required`.
    pub fn match_dep(&self, provider: Id, required: Id) -> bool {
        if provider == required {
            return true;
        }
        match (provider, required) {
            (Id::Plain(_), Id::Plain(_)) => false,
            (Id::Plain(_), Id::Relation(r)) => self.match_dep(provider, self.relation(r).name),
            (Id::Relation(p), Id::Plain(_)) => self.match_dep(self.relation(p).name, required),
            (Id::Relation(p), Id::Relation(r)) => {
                let (p, r) = (self.relation(p), self.relation(r));
                if !self.match_dep(p.name, r.name) {
                    return false;
                }
                match (p.op, r.op) {
                    (RelOp::Cmp(pflags), RelOp::Cmp(flags)) => {
                        self.match_flags_evr(pflags, p.evr, flags, r.evr)
                    }
                    _ => false,
                }
            }
        }
    }
}
