// SPDX-License-Identifier: MPL-2.0

//! Package records and the repositories owning them.

use crate::{DepOffset, Id, RepoId, StringId};

/// The kinds of dependency lists a solvable carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DepKind {
    /// Capabilities offered.
    Provides,
    /// Packages replaced.
    Obsoletes,
    /// Capabilities that must not be installed.
    Conflicts,
    /// Hard dependencies.
    Requires,
    /// Weak dependencies.
    Recommends,
    /// Weaker dependencies.
    Suggests,
    /// Reverse weak dependencies.
    Supplements,
    /// Reverse weaker dependencies.
    Enhances,
}

/// A package, or anything else that can be installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solvable {
    /// Package name.
    pub name: StringId,
    /// Architecture.
    pub arch: StringId,
    /// `epoch:version-release`.
    pub evr: StringId,
    /// Vendor.
    pub vendor: StringId,
    /// Owning repository, `None` for the system solvable and freed records.
    pub repo: Option<RepoId>,
    /// Disabled solvables are neither indexed nor matched by `name.src`.
    pub enabled: bool,
    /// What the solvable offers.
    pub provides: DepOffset,
    /// Packages replaced by this one.
    pub obsoletes: DepOffset,
    /// Capabilities that cannot be installed alongside.
    pub conflicts: DepOffset,
    /// Hard dependencies.
    pub requires: DepOffset,
    /// Weak dependencies.
    pub recommends: DepOffset,
    /// Weaker dependencies.
    pub suggests: DepOffset,
    /// Reverse weak dependencies.
    pub supplements: DepOffset,
    /// Reverse weaker dependencies.
    pub enhances: DepOffset,
}

impl Solvable {
    pub(crate) fn new(repo: Option<RepoId>) -> Self {
        Self {
            name: StringId::NULL,
            arch: StringId::NULL,
            evr: StringId::NULL,
            vendor: StringId::NULL,
            repo,
            enabled: true,
            provides: DepOffset::EMPTY,
            obsoletes: DepOffset::EMPTY,
            conflicts: DepOffset::EMPTY,
            requires: DepOffset::EMPTY,
            recommends: DepOffset::EMPTY,
            suggests: DepOffset::EMPTY,
            supplements: DepOffset::EMPTY,
            enhances: DepOffset::EMPTY,
        }
    }

    /// Offset of one of the dependency lists.
    pub fn dep_offset(&self, kind: DepKind) -> DepOffset {
        match kind {
            DepKind::Provides => self.provides,
            DepKind::Obsoletes => self.obsoletes,
            DepKind::Conflicts => self.conflicts,
            DepKind::Requires => self.requires,
            DepKind::Recommends => self.recommends,
            DepKind::Suggests => self.suggests,
            DepKind::Supplements => self.supplements,
            DepKind::Enhances => self.enhances,
        }
    }

    pub(crate) fn dep_offset_mut(&mut self, kind: DepKind) -> &mut DepOffset {
        match kind {
            DepKind::Provides => &mut self.provides,
            DepKind::Obsoletes => &mut self.obsoletes,
            DepKind::Conflicts => &mut self.conflicts,
            DepKind::Requires => &mut self.requires,
            DepKind::Recommends => &mut self.recommends,
            DepKind::Suggests => &mut self.suggests,
            DepKind::Supplements => &mut self.supplements,
            DepKind::Enhances => &mut self.enhances,
        }
    }
}

/// A set of solvables loaded from one source.
#[derive(Debug, Clone)]
pub struct Repo {
    /// Name given when the repository was added.
    pub name: String,
    /// Higher priorities are preferred by solvers.
    pub priority: i32,
    /// Solvables of disabled repositories are not indexed.
    pub(crate) disabled: bool,
    /// Null terminated dependency lists of all solvables of the repository.
    pub(crate) idarray: Vec<Id>,
}

impl Repo {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            priority: 0,
            disabled: false,
            idarray: vec![Id::NULL],
        }
    }

    /// Whether the repository is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// The list at `offset`, markers included, without its terminator.
    pub fn deps(&self, offset: DepOffset) -> &[Id] {
        let tail = self.idarray.get(offset.0 as usize..).unwrap_or_default();
        let len = tail.iter().position(|id| id.is_null()).unwrap_or(tail.len());
        &tail[..len]
    }

    /// Adds `id` to the list at `offset` and returns the list's new offset.
    ///
    /// With a `marker`, the id goes after it, and the marker is appended
    /// first if the list does not have one yet. Without one, the id goes
    /// before any marker. Ids already in the list are not added again.
    pub(crate) fn add_dep(&mut self, offset: DepOffset, id: Id, marker: Option<StringId>) -> DepOffset {
        let list = self.deps(offset);
        if list.contains(&id) {
            return offset;
        }
        let marker_pos = list.iter().position(|d| d.is_marker());
        let mut entries: Vec<Id> = list.to_vec();
        match (marker, marker_pos) {
            (Some(m), None) => {
                entries.push(Id::Plain(m));
                entries.push(id);
            }
            (Some(_), Some(_)) => entries.push(id),
            (None, Some(pos)) => entries.insert(pos, id),
            (None, None) => entries.push(id),
        }

        // The last list of the array grows in place.
        let start = offset.0 as usize;
        let in_place = !offset.is_empty() && start + list.len() + 1 == self.idarray.len();
        let new_offset = if in_place {
            self.idarray.truncate(start);
            offset
        } else {
            DepOffset(self.idarray.len() as u32)
        };
        self.idarray.extend(entries);
        self.idarray.push(Id::NULL);
        new_offset
    }
}
