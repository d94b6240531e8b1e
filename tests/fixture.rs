// SPDX-License-Identifier: MPL-2.0

#![cfg(feature = "serde")]

use serde::Deserialize;

use solvpool::{DepKind, Pool, PoolConfig, SolvableId};

#[derive(Deserialize)]
struct Fixture {
    config: PoolConfig,
    #[serde(default)]
    arch_policy: Option<Vec<String>>,
    repos: Vec<RepoFixture>,
    expect: Vec<Expectation>,
}

#[derive(Deserialize)]
struct RepoFixture {
    name: String,
    #[serde(default)]
    installed: bool,
    packages: Vec<Package>,
}

#[derive(Deserialize)]
struct Package {
    name: String,
    evr: String,
    arch: String,
    #[serde(default)]
    provides: Vec<String>,
    #[serde(default)]
    requires: Vec<String>,
    #[serde(default)]
    conflicts: Vec<String>,
}

#[derive(Deserialize)]
struct Expectation {
    dep: String,
    providers: Vec<String>,
}

fn load(fixture: &Fixture) -> Pool {
    let mut pool = Pool::with_config(fixture.config);
    if let Some(arches) = &fixture.arch_policy {
        let arches: Vec<_> = arches.iter().map(|arch| pool.str2id(arch)).collect();
        pool.set_arch_policy(Some(arches.as_slice()));
    }
    for repo_fixture in &fixture.repos {
        let repo = pool.add_repo(&repo_fixture.name);
        if repo_fixture.installed {
            pool.set_installed(Some(repo));
        }
        for package in &repo_fixture.packages {
            let s = pool.add_solvable(repo);
            let name = pool.str2id(&package.name);
            let evr = pool.str2id(&package.evr);
            let arch = pool.str2id(&package.arch);
            let solvable = pool.solvable_mut(s);
            solvable.name = name;
            solvable.evr = evr;
            solvable.arch = arch;
            if !matches!(package.arch.as_str(), "src" | "nosrc") {
                pool.add_self_provide(s);
            }
            let lists = [
                (DepKind::Provides, &package.provides),
                (DepKind::Requires, &package.requires),
                (DepKind::Conflicts, &package.conflicts),
            ];
            for (kind, deps) in lists {
                for dep in deps {
                    let dep = pool.parse_dep(dep);
                    pool.add_dep(s, kind, dep);
                }
            }
        }
    }
    pool
}

#[test]
fn mixed_repository() {
    let _ = env_logger::builder().is_test(true).try_init();
    let fixture: Fixture = ron::de::from_str(include_str!("fixtures/mixed.ron")).unwrap();
    let mut pool = load(&fixture);
    let deps: Vec<_> = fixture
        .expect
        .iter()
        .map(|expectation| pool.parse_dep(&expectation.dep))
        .collect();
    pool.create_whatprovides().unwrap();
    for (expectation, dep) in fixture.expect.iter().zip(deps) {
        let providers: Vec<String> = pool
            .whatprovides(dep)
            .unwrap()
            .iter()
            .map(|&s| pool.solvid2str(s))
            .collect();
        assert_eq!(providers, expectation.providers, "providers of {}", expectation.dep);
    }

    // Requirements of the fixture resolve against the same index.
    let postfix = SolvableId(6);
    assert_eq!(pool.solvid2str(postfix), "postfix-2:3.5.9-24.x86_64");
    for &dep in pool.deps(postfix, DepKind::Requires) {
        assert!(!pool.whatprovides(dep).unwrap().is_empty());
    }
}

#[test]
fn config_round_trip() {
    let config = PoolConfig {
        promote_epoch: true,
        ..PoolConfig::from_dialect_name("haiku").unwrap()
    };
    let text = ron::ser::to_string(&config).unwrap();
    let back: PoolConfig = ron::de::from_str(&text).unwrap();
    assert_eq!(back, config);
    let deb: PoolConfig = ron::de::from_str("(dialect: deb)").unwrap();
    assert_eq!(deb, PoolConfig::from_dialect_name("debian").unwrap());
}
