// SPDX-License-Identifier: MPL-2.0

//! Strategies for using version strings in proptests.

use proptest::prelude::*;

use crate::{Dialect, EvrMode};

/// A plain version: digit and letter runs, joined by separators and the
/// occasional tilde.
pub fn version_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        (
            prop_oneof!["[0-9]{1,3}", "[a-z]{1,3}"],
            prop_oneof![Just(""), Just("."), Just("~"), Just("+"), Just("_")],
        ),
        1..5,
    )
    .prop_map(|runs| {
        runs.into_iter()
            .map(|(run, sep)| format!("{run}{sep}"))
            .collect()
    })
}

/// An `epoch:version-release` string where epoch and release are optional.
pub fn evr_strategy() -> impl Strategy<Value = String> {
    (
        prop::option::of(0u32..4),
        version_strategy(),
        prop::option::of("[0-9]{1,2}(\\.[a-z0-9]{1,4})?"),
    )
        .prop_map(|(epoch, version, release)| {
            let mut evr = String::new();
            if let Some(epoch) = epoch {
                evr.push_str(&format!("{epoch}:"));
            }
            evr.push_str(&version);
            if let Some(release) = release {
                evr.push('-');
                evr.push_str(&release);
            }
            evr
        })
}

/// Any of the supported dialects.
pub fn dialect_strategy() -> impl Strategy<Value = Dialect> {
    prop_oneof![
        Just(Dialect::Rpm),
        Just(Dialect::Debian),
        Just(Dialect::Arch),
        Just(Dialect::Haiku),
    ]
}

/// Any comparison mode.
pub fn mode_strategy() -> impl Strategy<Value = EvrMode> {
    prop_oneof![
        Just(EvrMode::Compare),
        Just(EvrMode::CompareEvOnly),
        Just(EvrMode::Match),
        Just(EvrMode::MatchRelease),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EvrComparator, EvrOrdering, EvrPolicy};
    use std::cmp::Ordering;

    proptest! {
        #[test]
        fn vercmp_is_reflexive(dialect in dialect_strategy(), v in version_strategy()) {
            prop_assert_eq!(dialect.vercmp(&v, &v), Ordering::Equal);
        }

        #[test]
        fn vercmp_is_antisymmetric(
            dialect in dialect_strategy(),
            a in version_strategy(),
            b in version_strategy(),
        ) {
            prop_assert_eq!(dialect.vercmp(&a, &b), dialect.vercmp(&b, &a).reverse());
        }

        #[test]
        fn evrcmp_is_reflexive(
            dialect in dialect_strategy(),
            mode in mode_strategy(),
            promote_epoch in any::<bool>(),
            evr in evr_strategy(),
        ) {
            let cmp = EvrComparator::new(dialect).with_policy(EvrPolicy { promote_epoch, dist_epoch: false });
            prop_assert_eq!(cmp.evrcmp(&evr, &evr, mode), EvrOrdering::Equal);
        }

        #[test]
        fn evrcmp_compare_is_antisymmetric(
            dialect in dialect_strategy(),
            promote_epoch in any::<bool>(),
            a in evr_strategy(),
            b in evr_strategy(),
        ) {
            let cmp = EvrComparator::new(dialect).with_policy(EvrPolicy { promote_epoch, dist_epoch: false });
            prop_assert_eq!(
                cmp.evrcmp(&a, &b, EvrMode::Compare),
                cmp.evrcmp(&b, &a, EvrMode::Compare).reverse()
            );
        }
    }
}
