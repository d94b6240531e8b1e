// SPDX-License-Identifier: MPL-2.0

//! The pool: interned strings and relations, repositories, solvables and the
//! whatprovides index built over them.
//!
//! Ids handed out by a pool are only meaningful for that pool. Strings and
//! relations are never removed, so interning does not disturb an existing
//! index. Any change to solvables, repositories or policy does: it drops the
//! index held by the pool and bumps the pool's generation, and a detached
//! [WhatProvides] built for an older generation refuses lookups with
//! [PoolError::StaleIndex].

use std::fmt;

use evr_cmp::{Dialect, EvrComparator};
use log::debug;

use crate::internal::HashArena;
use crate::{
    id::WELL_KNOWN, CmpFlags, DepKind, Id, PoolConfig, PoolError, PoolFlag, Providers, RelId,
    RelOp, Relation, Repo, RepoId, Set, Solvable, SolvableId, StringId, WhatProvides,
};

/// Answer of a [NamespaceProvider].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceProviders {
    /// Nothing provides the dependency.
    None,
    /// The system provides it, whatever gets installed.
    System,
    /// These solvables provide it.
    Solvables(Vec<SolvableId>),
}

/// Decides which solvables provide a `namespace(value)` dependency.
///
/// Implemented for closures taking the pool, the namespace id and the value
/// id.
pub trait NamespaceProvider: Send + Sync {
    /// Providers of `name(evr)`.
    fn providers(&self, pool: &Pool, name: Id, evr: Id) -> NamespaceProviders;
}

impl<F> NamespaceProvider for F
where
    F: Fn(&Pool, Id, Id) -> NamespaceProviders + Send + Sync,
{
    fn providers(&self, pool: &Pool, name: Id, evr: Id) -> NamespaceProviders {
        self(pool, name, evr)
    }
}

/// Two packages shipping different content for the same file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileConflict {
    /// Path of the file.
    pub path: StringId,
    /// Package whose version of the file wins.
    pub owner: SolvableId,
    /// Digest of the owner's content.
    pub digest: StringId,
    /// Package that cannot be installed alongside the owner.
    pub other: SolvableId,
}

/// Everything a dependency index needs to know about the universe of
/// packages.
pub struct Pool {
    config: PoolConfig,
    evr: EvrComparator,
    strings: HashArena<Box<str>>,
    rels: HashArena<Relation>,
    solvables: Vec<Solvable>,
    repos: Vec<Repo>,
    installed: Option<RepoId>,
    arch_policy: Option<Set<StringId>>,
    namespace_provider: Option<Box<dyn NamespaceProvider>>,
    whatprovides: Option<WhatProvides>,
    generation: u64,
}

impl fmt::Debug for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("config", &self.config)
            .field("strings", &self.strings.len())
            .field("rels", &self.rels.len())
            .field("solvables", &self.solvables.len())
            .field("repos", &self.repos)
            .field("installed", &self.installed)
            .field("arch_policy", &self.arch_policy)
            .field("namespace_provider", &self.namespace_provider.is_some())
            .field("whatprovides", &self.whatprovides.is_some())
            .field("generation", &self.generation)
            .finish()
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}

impl Pool {
    /// An rpm pool with the default policy.
    pub fn new() -> Self {
        Self::with_config(PoolConfig::default())
    }

    /// A pool for the given settings.
    pub fn with_config(config: PoolConfig) -> Self {
        let mut strings = HashArena::new();
        for s in WELL_KNOWN {
            strings.alloc(s.into());
        }
        let mut system = Solvable::new(None);
        system.name = StringId::SYSTEM_SYSTEM;
        system.arch = config.noarch();
        system.evr = StringId::EMPTY;
        let mut null = Solvable::new(None);
        null.enabled = false;
        Self {
            config,
            evr: config.evr_comparator(),
            strings,
            rels: HashArena::new(),
            solvables: vec![null, system],
            repos: Vec::new(),
            installed: None,
            arch_policy: None,
            namespace_provider: None,
            whatprovides: None,
            generation: 0,
        }
    }

    /// Current settings, including flag changes.
    pub fn config(&self) -> PoolConfig {
        self.config
    }

    /// The versioning dialect.
    pub fn dialect(&self) -> Dialect {
        self.config.dialect
    }

    /// Comparator for evr strings of this pool.
    pub fn evr_comparator(&self) -> &EvrComparator {
        &self.evr
    }

    /// Architecture of architecture independent packages.
    pub fn noarch(&self) -> StringId {
        self.config.noarch()
    }

    /// Read a policy flag.
    pub fn get_flag(&self, flag: PoolFlag) -> bool {
        match flag {
            PoolFlag::PromoteEpoch => self.config.promote_epoch,
            PoolFlag::HaveDistEpoch => self.config.dist_epoch,
        }
    }

    /// Set a policy flag and return its previous value.
    pub fn set_flag(&mut self, flag: PoolFlag, value: bool) -> bool {
        let slot = match flag {
            PoolFlag::PromoteEpoch => &mut self.config.promote_epoch,
            PoolFlag::HaveDistEpoch => &mut self.config.dist_epoch,
        };
        let old = std::mem::replace(slot, value);
        self.evr = self.config.evr_comparator();
        self.invalidate();
        old
    }

    // Strings.

    /// Intern a string.
    pub fn str2id(&mut self, s: &str) -> StringId {
        match self.strings.lookup(s) {
            Some(raw) => StringId(raw),
            None => StringId(self.strings.alloc(s.into())),
        }
    }

    /// Id of an already interned string.
    pub fn lookup_str(&self, s: &str) -> Option<StringId> {
        self.strings.lookup(s).map(StringId)
    }

    /// The string behind an id.
    ///
    /// # Panics
    ///
    /// If the id was not handed out by this pool.
    pub fn id2str(&self, id: StringId) -> &str {
        &self.strings[id.0]
    }

    /// Number of interned strings.
    pub fn nstrings(&self) -> usize {
        self.strings.len()
    }

    // Relations.

    /// Intern a relation.
    pub fn rel2id(&mut self, name: impl Into<Id>, evr: impl Into<Id>, op: impl Into<RelOp>) -> Id {
        let rel = Relation {
            name: name.into(),
            evr: evr.into(),
            op: op.into(),
        };
        Id::Relation(RelId(self.rels.alloc(rel)))
    }

    /// Intern a relation given the numeric flags of repository formats.
    pub fn rel2id_raw(&mut self, name: impl Into<Id>, evr: impl Into<Id>, flags: u8) -> Result<Id, PoolError> {
        let op = RelOp::from_raw(flags)?;
        Ok(self.rel2id(name, evr, op))
    }

    /// The relation behind an id.
    ///
    /// # Panics
    ///
    /// If the id was not handed out by this pool.
    pub fn relation(&self, id: RelId) -> &Relation {
        &self.rels[id.0]
    }

    /// Number of interned relations.
    pub fn nrels(&self) -> usize {
        self.rels.len()
    }

    /// The plain name at the bottom of a chain of relations.
    pub fn dep_name(&self, mut id: Id) -> StringId {
        loop {
            match id {
                Id::Plain(s) => return s,
                Id::Relation(r) => id = self.relation(r).name,
            }
        }
    }

    // Repositories.

    /// Add an empty repository.
    pub fn add_repo(&mut self, name: &str) -> RepoId {
        self.repos.push(Repo::new(name));
        RepoId(self.repos.len() as u32 - 1)
    }

    /// A repository.
    pub fn repo(&self, id: RepoId) -> &Repo {
        &self.repos[id.0 as usize]
    }

    /// All repositories with their ids.
    pub fn repos(&self) -> impl Iterator<Item = (RepoId, &Repo)> {
        self.repos
            .iter()
            .enumerate()
            .map(|(i, repo)| (RepoId(i as u32), repo))
    }

    /// Exclude or include the solvables of a repository.
    pub fn set_repo_disabled(&mut self, repo: RepoId, disabled: bool) {
        self.repos[repo.0 as usize].disabled = disabled;
        self.invalidate();
    }

    /// Set the priority of a repository.
    pub fn set_repo_priority(&mut self, repo: RepoId, priority: i32) {
        self.repos[repo.0 as usize].priority = priority;
    }

    /// Declare which repository holds the installed packages.
    pub fn set_installed(&mut self, repo: Option<RepoId>) {
        self.installed = repo;
        self.invalidate();
    }

    /// The repository of installed packages.
    pub fn installed(&self) -> Option<RepoId> {
        self.installed
    }

    // Solvables.

    /// Add a solvable to a repository.
    pub fn add_solvable(&mut self, repo: RepoId) -> SolvableId {
        self.add_solvable_block(repo, 1)
    }

    /// Add `count` consecutive solvables to a repository and return the
    /// first one.
    pub fn add_solvable_block(&mut self, repo: RepoId, count: usize) -> SolvableId {
        let first = SolvableId(self.solvables.len() as u32);
        self.solvables
            .extend(std::iter::repeat_with(|| Solvable::new(Some(repo))).take(count));
        self.invalidate();
        first
    }

    /// Remove `count` solvables starting at `start`.
    ///
    /// Freed ids at the end of the store are reused by later additions, the
    /// others stay as empty records without a repository.
    pub fn free_solvable_block(&mut self, start: SolvableId, count: usize) {
        let from = start.index().max(SolvableId::SYSTEM.index() + 1);
        let to = (start.index() + count).min(self.solvables.len());
        for s in self.solvables.iter_mut().take(to).skip(from) {
            *s = Solvable::new(None);
            s.enabled = false;
        }
        while self.solvables.len() > SolvableId::SYSTEM.index() + 1
            && self.solvables.last().is_some_and(|s| s.repo.is_none())
        {
            self.solvables.pop();
        }
        self.invalidate();
    }

    /// Number of solvable ids in use, including the null and system
    /// solvables.
    pub fn nsolvables(&self) -> usize {
        self.solvables.len()
    }

    /// A solvable.
    ///
    /// # Panics
    ///
    /// If the id was not handed out by this pool.
    pub fn solvable(&self, id: SolvableId) -> &Solvable {
        &self.solvables[id.index()]
    }

    /// A solvable, for editing. This drops the whatprovides index.
    pub fn solvable_mut(&mut self, id: SolvableId) -> &mut Solvable {
        self.invalidate();
        &mut self.solvables[id.index()]
    }

    /// Ids of all solvables owned by a repository.
    pub fn solvable_ids(&self) -> impl Iterator<Item = SolvableId> + '_ {
        self.solvables
            .iter()
            .enumerate()
            .filter(|(_, s)| s.repo.is_some())
            .map(|(i, _)| SolvableId(i as u32))
    }

    /// Add a dependency to one of a solvable's lists.
    ///
    /// Does nothing for solvables without a repository.
    pub fn add_dep(&mut self, id: SolvableId, kind: DepKind, dep: Id) {
        self.add_dep_inner(id, kind, dep, None);
    }

    /// Add a dependency after `marker` in one of a solvable's lists, such as
    /// a file provide after [StringId::FILEMARKER] or a pre-require after
    /// [StringId::PREREQMARKER].
    pub fn add_dep_with_marker(&mut self, id: SolvableId, kind: DepKind, dep: Id, marker: StringId) {
        self.add_dep_inner(id, kind, dep, Some(marker));
    }

    fn add_dep_inner(&mut self, id: SolvableId, kind: DepKind, dep: Id, marker: Option<StringId>) {
        let s = &mut self.solvables[id.index()];
        let Some(repo) = s.repo else {
            return;
        };
        let offset = s.dep_offset_mut(kind);
        *offset = self.repos[repo.0 as usize].add_dep(*offset, dep, marker);
        self.invalidate();
    }

    /// One of a solvable's dependency lists, markers included.
    pub fn deps(&self, id: SolvableId, kind: DepKind) -> &[Id] {
        let s = self.solvable(id);
        match s.repo {
            Some(repo) => self.repo(repo).deps(s.dep_offset(kind)),
            None => &[],
        }
    }

    /// Make a solvable provide its own name at its exact version.
    pub fn add_self_provide(&mut self, id: SolvableId) {
        let s = self.solvable(id);
        let (name, evr) = (s.name, s.evr);
        let dep = self.rel2id(name, evr, CmpFlags::EQ);
        self.add_dep(id, DepKind::Provides, dep);
    }

    /// Restrict installable solvables to the given architectures. The
    /// dialect's no-arch is always accepted. `None` accepts every
    /// architecture but the source ones.
    pub fn set_arch_policy(&mut self, arches: Option<&[StringId]>) {
        self.arch_policy = arches.map(|a| a.iter().copied().collect());
        self.invalidate();
    }

    /// Whether `name.arch` is read as an architecture qualifier.
    pub fn is_known_arch(&self, arch: StringId) -> bool {
        if arch.is_null() || arch == StringId::EMPTY {
            return false;
        }
        if arch == StringId::SRC || arch == StringId::NOSRC || arch == self.noarch() {
            return true;
        }
        self.arch_policy.as_ref().is_some_and(|set| set.contains(&arch))
    }

    /// Set the callback answering `namespace(value)` dependencies.
    pub fn set_namespace_callback(&mut self, provider: impl NamespaceProvider + 'static) {
        self.namespace_provider = Some(Box::new(provider));
        self.invalidate();
    }

    /// Remove the namespace callback.
    pub fn clear_namespace_callback(&mut self) {
        self.namespace_provider = None;
        self.invalidate();
    }

    pub(crate) fn namespace_providers(&self, name: Id, evr: Id) -> NamespaceProviders {
        match &self.namespace_provider {
            Some(provider) => provider.providers(self, name, evr),
            None => NamespaceProviders::None,
        }
    }

    /// Record file conflicts: the owner provides a `path FILECONFLICT digest`
    /// relation after its file marker and the other package conflicts with
    /// it.
    pub fn add_fileconflicts_deps(&mut self, conflicts: &[FileConflict]) {
        for conflict in conflicts {
            let dep = self.rel2id(conflict.path, conflict.digest, RelOp::FileConflict);
            if self.solvable(conflict.owner).repo.is_none() {
                continue;
            }
            self.add_dep_with_marker(conflict.owner, DepKind::Provides, dep, StringId::FILEMARKER);
            self.add_dep(conflict.other, DepKind::Conflicts, dep);
        }
        if !conflicts.is_empty() {
            self.invalidate();
        }
    }

    // Policy.

    /// Whether a solvable is excluded: freed, disabled or in a disabled
    /// repository.
    pub fn is_disabled_solvable(&self, s: &Solvable) -> bool {
        match s.repo {
            Some(repo) => !s.enabled || self.repo(repo).disabled,
            None => true,
        }
    }

    /// Whether a solvable could be installed on this system.
    pub fn is_installable(&self, s: &Solvable) -> bool {
        if s.arch == StringId::SRC || s.arch == StringId::NOSRC {
            return false;
        }
        match &self.arch_policy {
            Some(set) => s.arch == self.noarch() || set.contains(&s.arch),
            None => true,
        }
    }

    /// Whether a solvable goes into the whatprovides index. Installed
    /// solvables always do, so that conflicts and obsoletes on them work.
    pub fn is_indexed(&self, s: &Solvable) -> bool {
        !self.is_disabled_solvable(s) && (s.repo == self.installed || self.is_installable(s))
    }

    // Index.

    /// Build the whatprovides index, replacing any previous one.
    pub fn create_whatprovides(&mut self) -> Result<(), PoolError> {
        self.whatprovides = None;
        self.whatprovides = Some(WhatProvides::build(self)?);
        Ok(())
    }

    /// Drop the whatprovides index.
    pub fn free_whatprovides(&mut self) {
        self.invalidate();
    }

    /// The index, if it was built since the last change.
    pub fn whatprovides_index(&self) -> Option<&WhatProvides> {
        self.whatprovides.as_ref()
    }

    /// Solvables providing a dependency.
    pub fn whatprovides(&self, dep: Id) -> Result<Providers<'_>, PoolError> {
        self.whatprovides
            .as_ref()
            .ok_or(PoolError::IndexNotBuilt)?
            .lookup(self, dep)
    }

    /// Counter bumped by every change that invalidates an index.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn invalidate(&mut self) {
        if self.whatprovides.take().is_some() {
            debug!("pool changed, dropping the whatprovides index");
        }
        self.generation += 1;
    }
}
