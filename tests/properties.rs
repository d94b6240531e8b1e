// SPDX-License-Identifier: MPL-2.0

use evr_cmp::testing::{dialect_strategy, evr_strategy};
use proptest::prelude::*;
use proptest::sample::Index;

use solvpool::{CmpFlags, DepKind, Dialect, EvrMode, EvrOrdering, Pool, PoolConfig, SolvableId};

/// A package: name index, evr and the name indices it provides.
type GeneratedPackage = (usize, String, Vec<usize>, bool);

const NAMES: [&str; 6] = ["a", "b", "c", "libfoo", "libbar", "mta"];

fn package_strategy() -> impl Strategy<Value = GeneratedPackage> {
    (
        0..NAMES.len(),
        evr_strategy(),
        prop::collection::vec(0..NAMES.len(), 0..4),
        prop::bool::weighted(0.9),
    )
}

fn build_pool(dialect: Dialect, packages: &[GeneratedPackage]) -> (Pool, Vec<SolvableId>) {
    let mut pool = Pool::with_config(PoolConfig::new(dialect));
    let repo = pool.add_repo("generated");
    let mut ids = Vec::new();
    for (name, evr, provides, enabled) in packages {
        let s = pool.add_solvable(repo);
        let name = pool.str2id(NAMES[*name]);
        let evr = pool.str2id(evr);
        let arch = pool.noarch();
        let solvable = pool.solvable_mut(s);
        solvable.name = name;
        solvable.evr = evr;
        solvable.arch = arch;
        solvable.enabled = *enabled;
        pool.add_self_provide(s);
        for &provide in provides {
            let provide = pool.str2id(NAMES[provide]);
            pool.add_dep(s, DepKind::Provides, provide.into());
        }
        ids.push(s);
    }
    (pool, ids)
}

fn all_flags() -> impl Strategy<Value = CmpFlags> {
    (0u8..8).prop_map(CmpFlags::from_bits_truncate)
}

proptest! {
    #[test]
    fn provider_lists_are_sorted_and_complete(
        dialect in dialect_strategy(),
        packages in prop::collection::vec(package_strategy(), 0..20),
    ) {
        let (mut pool, ids) = build_pool(dialect, &packages);
        pool.create_whatprovides().unwrap();
        for name in NAMES {
            let name = pool.lookup_str(name).unwrap_or_default();
            let list = pool.whatprovides(name.into()).unwrap();
            prop_assert!(list.windows(2).all(|w| w[0] < w[1]));
            for &s in list.iter() {
                prop_assert!(pool.solvable(s).enabled);
            }
        }
        for (&s, (_, _, provides, enabled)) in ids.iter().zip(&packages) {
            if !enabled {
                continue;
            }
            let solvable = pool.solvable(s);
            prop_assert!(pool.whatprovides(solvable.name.into()).unwrap().contains(&s));
            for &provide in provides {
                let provide = pool.lookup_str(NAMES[provide]).unwrap();
                prop_assert!(pool.whatprovides(provide.into()).unwrap().contains(&s));
            }
        }
    }

    #[test]
    fn rebuilding_is_deterministic(
        packages in prop::collection::vec(package_strategy(), 0..20),
        queries in prop::collection::vec((0..NAMES.len(), all_flags(), evr_strategy()), 1..8),
    ) {
        let (mut pool, _) = build_pool(Dialect::Rpm, &packages);
        let deps: Vec<_> = queries
            .iter()
            .map(|(name, flags, evr)| {
                let name = pool.str2id(NAMES[*name]);
                let evr = pool.str2id(evr);
                pool.rel2id(name, evr, *flags)
            })
            .collect();
        pool.create_whatprovides().unwrap();
        let first: Vec<Vec<SolvableId>> = deps
            .iter()
            .map(|&dep| pool.whatprovides(dep).unwrap().to_vec())
            .collect();
        pool.create_whatprovides().unwrap();
        for (&dep, expected) in deps.iter().zip(&first) {
            let list = pool.whatprovides(dep).unwrap();
            prop_assert_eq!(&list.to_vec(), expected);
            prop_assert!(list.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn versioned_providers_provide_the_name(
        packages in prop::collection::vec(package_strategy(), 1..20),
        pick in any::<Index>(),
        flags in all_flags(),
        evr in evr_strategy(),
    ) {
        let (mut pool, _) = build_pool(Dialect::Rpm, &packages);
        let name = pool.str2id(NAMES[pick.index(NAMES.len())]);
        let evr = pool.str2id(&evr);
        let dep = pool.rel2id(name, evr, flags);
        pool.create_whatprovides().unwrap();
        let all = pool.whatprovides(name.into()).unwrap().to_vec();
        for s in pool.whatprovides(dep).unwrap().iter() {
            prop_assert!(all.contains(s));
        }
    }

    #[test]
    fn any_version_satisfies_everything(
        dialect in dialect_strategy(),
        flags in all_flags(),
        a in evr_strategy(),
        b in evr_strategy(),
    ) {
        let mut pool = Pool::with_config(PoolConfig::new(dialect));
        let (a, b) = (pool.str2id(&a), pool.str2id(&b));
        prop_assume!(!flags.is_empty());
        prop_assert!(pool.match_flags_evr(CmpFlags::all(), a.into(), flags, b.into()));
        prop_assert!(pool.match_flags_evr(flags, a.into(), CmpFlags::all(), b.into()));
        prop_assert!(pool.match_flags_evr(CmpFlags::EQ, a.into(), CmpFlags::EQ, a.into()));
    }

    #[test]
    fn evrcmp_is_reflexive(dialect in dialect_strategy(), a in evr_strategy()) {
        let mut pool = Pool::with_config(PoolConfig::new(dialect));
        let id = pool.str2id(&a);
        for mode in [EvrMode::Compare, EvrMode::CompareEvOnly, EvrMode::Match, EvrMode::MatchRelease] {
            prop_assert_eq!(pool.evrcmp(id.into(), id.into(), mode), EvrOrdering::Equal);
            prop_assert_eq!(pool.evrcmp_str(&a, &a, mode), EvrOrdering::Equal);
        }
    }
}
