// SPDX-License-Identifier: MPL-2.0

use solvpool::{
    CmpFlags, DepKind, Dialect, FileConflict, Id, NamespaceProviders, Pool, PoolConfig, PoolError,
    PoolFlag, RelOp, RepoId, SolvableId, StringId,
};

fn init_log() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Add a package with a self provide and the given extra provides.
fn add_package(
    pool: &mut Pool,
    repo: RepoId,
    name: &str,
    evr: &str,
    arch: &str,
    provides: &[&str],
) -> SolvableId {
    let s = pool.add_solvable(repo);
    let (name, evr, arch) = (pool.str2id(name), pool.str2id(evr), pool.str2id(arch));
    let solvable = pool.solvable_mut(s);
    solvable.name = name;
    solvable.evr = evr;
    solvable.arch = arch;
    if arch != StringId::SRC && arch != StringId::NOSRC {
        pool.add_self_provide(s);
    }
    for dep in provides {
        let dep = pool.parse_dep(dep);
        pool.add_dep(s, DepKind::Provides, dep);
    }
    s
}

fn providers(pool: &mut Pool, dep: &str) -> Vec<SolvableId> {
    let dep = pool.parse_dep(dep);
    if pool.whatprovides_index().is_none() {
        pool.create_whatprovides().unwrap();
    }
    pool.whatprovides(dep).unwrap().to_vec()
}

#[test]
fn same_result_on_repeated_builds() {
    init_log();
    let mut pool = Pool::new();
    let repo = pool.add_repo("available");
    for (name, evr) in [("a", "1-1"), ("b", "2-1"), ("a", "2-1"), ("c", "1-1")] {
        add_package(&mut pool, repo, name, evr, "noarch", &["common", "mta = 1"]);
    }
    let deps: Vec<Id> = ["a", "b", "common", "mta >= 1", "a > 1", "a | c"]
        .iter()
        .map(|dep| pool.parse_dep(dep))
        .collect();

    pool.create_whatprovides().unwrap();
    let first: Vec<Vec<SolvableId>> = deps
        .iter()
        .map(|&dep| pool.whatprovides(dep).unwrap().to_vec())
        .collect();
    for _ in 0..5 {
        pool.create_whatprovides().unwrap();
        for (&dep, expected) in deps.iter().zip(&first) {
            assert_eq!(&pool.whatprovides(dep).unwrap().to_vec(), expected);
        }
    }
}

#[test]
fn source_packages_only_match_by_arch() {
    init_log();
    let mut pool = Pool::new();
    let repo = pool.add_repo("available");
    let bin = add_package(&mut pool, repo, "pkg", "1.0-1", "noarch", &[]);
    let src = add_package(&mut pool, repo, "pkg", "1.0-1", "src", &[]);
    assert_eq!(providers(&mut pool, "pkg"), vec![bin]);
    assert_eq!(providers(&mut pool, "pkg.src"), vec![src]);
    assert_eq!(providers(&mut pool, "pkg.noarch"), vec![bin]);
}

#[test]
fn versioned_lookups() {
    init_log();
    let mut pool = Pool::new();
    let repo = pool.add_repo("available");
    let old = add_package(&mut pool, repo, "kernel", "5.14.0-1", "noarch", &[]);
    let new = add_package(&mut pool, repo, "kernel", "1:4.18.0-1", "noarch", &[]);
    let mid = add_package(&mut pool, repo, "kernel", "5.14.0-7", "noarch", &[]);

    assert_eq!(providers(&mut pool, "kernel"), vec![old, new, mid]);
    assert_eq!(providers(&mut pool, "kernel = 5.14.0"), vec![old, mid]);
    assert_eq!(providers(&mut pool, "kernel <=> 0"), vec![old, new, mid]);
    // Without promotion, an epoch on one side only is ignored unless the
    // rest is equal.
    assert_eq!(providers(&mut pool, "kernel > 5.14.0-1"), vec![mid]);
    assert_eq!(providers(&mut pool, "kernel <= 5.14.0-1"), vec![old, new]);

    assert!(!pool.set_flag(PoolFlag::PromoteEpoch, true));
    assert_eq!(providers(&mut pool, "kernel > 5.14.0-1"), vec![new, mid]);
    assert_eq!(providers(&mut pool, "kernel <= 5.14.0-1"), vec![old]);
}

#[test]
fn debian_versions() {
    init_log();
    let mut pool = Pool::with_config(PoolConfig::new(Dialect::Debian));
    let repo = pool.add_repo("main");
    let rc = add_package(&mut pool, repo, "libc6", "2.36~rc1-1", "amd64", &[]);
    let rel = add_package(&mut pool, repo, "libc6", "2.36-9", "amd64", &[]);
    let virt = add_package(&mut pool, repo, "musl", "1.2.3-1", "amd64", &["libc6"]);
    assert_eq!(providers(&mut pool, "libc6 >= 2.36"), vec![rel]);
    assert_eq!(providers(&mut pool, "libc6 << 2.36"), vec![rc]);
    assert_eq!(providers(&mut pool, "libc6"), vec![rc, rel, virt]);
}

#[test]
fn rebuild_after_changes() {
    init_log();
    let mut pool = Pool::new();
    let repo = pool.add_repo("available");
    let a = add_package(&mut pool, repo, "a", "1-1", "noarch", &[]);
    assert_eq!(providers(&mut pool, "a"), vec![a]);

    let b = add_package(&mut pool, repo, "b", "1-1", "noarch", &["a"]);
    let dep = pool.parse_dep("a");
    assert_eq!(pool.whatprovides(dep).err(), Some(PoolError::IndexNotBuilt));
    assert_eq!(providers(&mut pool, "a"), vec![a, b]);

    pool.set_repo_disabled(repo, true);
    assert_eq!(providers(&mut pool, "a"), vec![]);
    pool.set_repo_disabled(repo, false);
    pool.free_whatprovides();
    // Unversioned provides satisfy versioned requirements on rpm.
    assert_eq!(providers(&mut pool, "a >= 1"), vec![a, b]);
}

#[test]
fn language_support() {
    init_log();
    let mut pool = Pool::new();
    let repo = pool.add_repo("available");
    let de = add_package(&mut pool, repo, "langpack-de", "1-1", "noarch", &[]);
    add_package(&mut pool, repo, "langpack-fr", "1-1", "noarch", &[]);
    let requested = pool.str2id("de");
    pool.set_namespace_callback(move |pool: &Pool, name: Id, evr: Id| {
        if name != Id::Plain(StringId::NAMESPACE_LANGUAGE) || evr != Id::Plain(requested) {
            return NamespaceProviders::None;
        }
        NamespaceProviders::Solvables(
            pool.solvable_ids()
                .filter(|&s| pool.id2str(pool.solvable(s).name).ends_with("-de"))
                .collect(),
        )
    });

    let fr = pool.str2id("fr");
    let want_de = pool.rel2id(StringId::NAMESPACE_LANGUAGE, requested, RelOp::Namespace);
    let want_fr = pool.rel2id(StringId::NAMESPACE_LANGUAGE, fr, RelOp::Namespace);
    pool.create_whatprovides().unwrap();
    assert_eq!(&*pool.whatprovides(want_de).unwrap(), &[de]);
    assert!(pool.whatprovides(want_fr).unwrap().is_empty());
    assert_eq!(pool.dep2str(want_de), "namespace:language(de)");
}

#[test]
fn conflicting_files() {
    init_log();
    let mut pool = Pool::new();
    let repo = pool.add_repo("available");
    let owner = add_package(&mut pool, repo, "a", "1-1", "noarch", &[]);
    let other = add_package(&mut pool, repo, "b", "1-1", "noarch", &[]);
    let path = pool.str2id("/usr/share/doc/README");
    let digest = pool.str2id("5d41402abc4b2a76b9719d911017c592");
    pool.add_fileconflicts_deps(&[FileConflict {
        path,
        owner,
        digest,
        other,
    }]);

    let conflicts = pool.deps(other, DepKind::Conflicts).to_vec();
    assert_eq!(conflicts.len(), 1);
    pool.create_whatprovides().unwrap();
    assert_eq!(&*pool.whatprovides(conflicts[0]).unwrap(), &[owner]);
    assert_eq!(
        pool.dep2str(conflicts[0]),
        "/usr/share/doc/README FILECONFLICT 5d41402abc4b2a76b9719d911017c592"
    );
}

#[test]
fn boolean_dependencies_share_operand_lists() {
    init_log();
    let mut pool = Pool::new();
    let repo = pool.add_repo("available");
    let both = add_package(&mut pool, repo, "both", "1-1", "noarch", &["x", "y"]);
    let x_only = add_package(&mut pool, repo, "x-only", "1-1", "noarch", &["x"]);
    let x = pool.parse_dep("x");
    let y = pool.parse_dep("y");
    let x_and_y = pool.rel2id(x, y, RelOp::And);
    let y_and_x = pool.rel2id(y, x, RelOp::And);
    let y_or_x = pool.rel2id(y, x, RelOp::Or);

    pool.create_whatprovides().unwrap();
    assert_eq!(&*pool.whatprovides(x_and_y).unwrap(), &[both]);
    assert_eq!(&*pool.whatprovides(y_and_x).unwrap(), &[both]);
    assert_eq!(&*pool.whatprovides(y_or_x).unwrap(), &[both, x_only]);
    let index = pool.whatprovides_index().unwrap();
    assert_eq!(index.cached_relations(), 3);
}

#[test]
fn rpmlib_dependencies() {
    init_log();
    let mut pool = Pool::new();
    let repo = pool.add_repo("available");
    let fake = add_package(
        &mut pool,
        repo,
        "rpm",
        "4.18-1",
        "noarch",
        &["rpmlib(RichDependencies) = 4.12.0-1"],
    );
    assert_eq!(
        providers(&mut pool, "rpmlib(RichDependencies) <= 4.12.0-1"),
        vec![fake]
    );
    assert_eq!(
        providers(&mut pool, "rpmlib(PayloadIsXz) <= 5.2-1"),
        vec![SolvableId::SYSTEM]
    );
    assert_eq!(providers(&mut pool, "system:system"), vec![SolvableId::SYSTEM]);
}

#[test]
fn raw_relation_flags() {
    let mut pool = Pool::new();
    let a = pool.str2id("a");
    let one = pool.str2id("1");
    assert_eq!(
        pool.rel2id_raw(a, one, 6).unwrap(),
        pool.rel2id(a, one, CmpFlags::LT | CmpFlags::EQ)
    );
    assert_eq!(
        pool.rel2id_raw(a, one, 30),
        Err(PoolError::UnsupportedRelationKind(30))
    );
}
