// SPDX-License-Identifier: MPL-2.0

//! Ordering of `epoch:version-release` strings.

use std::cmp::Ordering;

use crate::Dialect;

/// How two evr strings are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvrMode {
    /// Total ordering: a missing release sorts before any release.
    Compare,
    /// Only epoch and version are considered.
    CompareEvOnly,
    /// Matching: an empty epoch, version or release on either side
    /// matches anything.
    Match,
    /// Matching as rpm does for dependencies: a missing (or empty) release
    /// on one side is reported with a strict ordering.
    MatchRelease,
}

/// Result of an evr comparison.
///
/// The strict variants mean that the strings only differ in the presence of
/// an epoch or release on one side. Callers matching dependencies treat them
/// differently from a plain [Less](EvrOrdering::Less) or
/// [Greater](EvrOrdering::Greater).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(i8)]
pub enum EvrOrdering {
    /// Left only lacks what right carries.
    StrictLess = -2,
    /// Left is older.
    Less = -1,
    /// Same version.
    Equal = 0,
    /// Left is newer.
    Greater = 1,
    /// Right only lacks what left carries.
    StrictGreater = 2,
}

impl EvrOrdering {
    /// Swap the sides of the comparison.
    pub fn reverse(self) -> Self {
        match self {
            Self::StrictLess => Self::StrictGreater,
            Self::Less => Self::Greater,
            Self::Equal => Self::Equal,
            Self::Greater => Self::Less,
            Self::StrictGreater => Self::StrictLess,
        }
    }

    /// Collapse to a plain ordering.
    pub fn to_ordering(self) -> Ordering {
        match self {
            Self::StrictLess | Self::Less => Ordering::Less,
            Self::Equal => Ordering::Equal,
            Self::Greater | Self::StrictGreater => Ordering::Greater,
        }
    }

    /// The numeric value, from -2 to 2.
    pub fn as_i8(self) -> i8 {
        self as i8
    }
}

impl From<Ordering> for EvrOrdering {
    fn from(ord: Ordering) -> Self {
        match ord {
            Ordering::Less => Self::Less,
            Ordering::Equal => Self::Equal,
            Ordering::Greater => Self::Greater,
        }
    }
}

/// Knobs changing how epochs and releases are read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvrPolicy {
    /// A missing epoch is epoch zero. Otherwise an epoch present on only one
    /// side does not take part in the ordering, and only breaks a tie.
    pub promote_epoch: bool,
    /// Releases may carry a `:`-separated distribution epoch, compared only
    /// when the releases proper are equal.
    pub dist_epoch: bool,
}

/// Compares evr strings for a dialect under a policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvrComparator {
    /// Versioning convention of the version and release parts.
    pub dialect: Dialect,
    /// Epoch and release handling.
    pub policy: EvrPolicy,
}

/// Splits `s` into a leading epoch and the rest, if `s` starts with digits
/// followed by `:`.
fn split_epoch(s: &str) -> (Option<&str>, &str) {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0 && s.as_bytes().get(digits) == Some(&b':') {
        (Some(&s[..digits]), &s[digits + 1..])
    } else {
        (None, s)
    }
}

/// Strips a possibly empty epoch and its `:`.
fn drop_epoch(s: &str) -> &str {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    match s.as_bytes().get(digits) {
        Some(b':') => &s[digits + 1..],
        _ => s,
    }
}

/// Splits on the last `-` into version and release.
fn split_release(s: &str) -> (&str, Option<&str>) {
    match s.rfind('-') {
        Some(pos) => (&s[..pos], Some(&s[pos + 1..])),
        None => (s, None),
    }
}

fn trim_zeros(num: &str) -> &str {
    num.trim_start_matches('0')
}

fn cmp_numeric(a: &str, b: &str) -> Ordering {
    let (a, b) = (trim_zeros(a), trim_zeros(b));
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

impl EvrComparator {
    /// Comparator for `dialect` with the default policy.
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            policy: EvrPolicy::default(),
        }
    }

    /// Same comparator with another policy.
    pub fn with_policy(self, policy: EvrPolicy) -> Self {
        Self { policy, ..self }
    }

    /// Plain version comparison of the dialect.
    pub fn vercmp(&self, a: &str, b: &str) -> Ordering {
        self.dialect.vercmp(a, b)
    }

    /// Compare two `epoch:version-release` strings.
    pub fn evrcmp(&self, a: &str, b: &str, mode: EvrMode) -> EvrOrdering {
        if a == b {
            return EvrOrdering::Equal;
        }

        if mode == EvrMode::Match && (a.starts_with(':') || b.starts_with(':')) {
            // An empty epoch turns epoch handling off for both sides.
            return self.compare_version_release(drop_epoch(a), drop_epoch(b), mode);
        }

        match (split_epoch(a), split_epoch(b)) {
            ((Some(ea), ra), (Some(eb), rb)) => match cmp_numeric(ea, eb) {
                Ordering::Equal => self.compare_version_release(ra, rb, mode),
                ord => ord.into(),
            },
            ((Some(ea), ra), (None, rb)) => self.one_sided_epoch(ea, ra, rb, mode),
            ((None, ra), (Some(eb), rb)) => self.one_sided_epoch(eb, rb, ra, mode).reverse(),
            ((None, ra), (None, rb)) => self.compare_version_release(ra, rb, mode),
        }
    }

    /// `epoch:rest` against `other`, which carries no epoch.
    fn one_sided_epoch(&self, epoch: &str, rest: &str, other: &str, mode: EvrMode) -> EvrOrdering {
        if trim_zeros(epoch).is_empty() {
            return self.compare_version_release(rest, other, mode);
        }
        if self.policy.promote_epoch {
            return EvrOrdering::Greater;
        }
        match self.compare_version_release(rest, other, mode) {
            EvrOrdering::Equal => EvrOrdering::StrictGreater,
            ord => ord,
        }
    }

    fn compare_version_release(&self, a: &str, b: &str, mode: EvrMode) -> EvrOrdering {
        let (va, mut ra) = split_release(a);
        let (vb, mut rb) = split_release(b);

        if mode != EvrMode::Match || (!va.is_empty() && !vb.is_empty()) {
            let ord = self.vercmp(va, vb);
            if ord != Ordering::Equal {
                return ord.into();
            }
        }

        match mode {
            EvrMode::Compare => match (ra, rb) {
                (None, Some(_)) => return EvrOrdering::Less,
                (Some(_), None) => return EvrOrdering::Greater,
                _ => {}
            },
            EvrMode::CompareEvOnly => return EvrOrdering::Equal,
            EvrMode::MatchRelease => {
                ra = ra.filter(|r| !r.is_empty());
                rb = rb.filter(|r| !r.is_empty());
            }
            EvrMode::Match => {}
        }

        if let (Some(ra), Some(rb)) = (ra, rb) {
            if mode != EvrMode::Match || (!ra.is_empty() && !rb.is_empty()) {
                let ord = self.compare_release(ra, rb);
                if ord != Ordering::Equal {
                    return ord.into();
                }
            }
        }

        if mode == EvrMode::MatchRelease {
            match (ra, rb) {
                (None, Some(_)) => return EvrOrdering::StrictLess,
                (Some(_), None) => return EvrOrdering::StrictGreater,
                _ => {}
            }
        }
        EvrOrdering::Equal
    }

    fn compare_release(&self, a: &str, b: &str) -> Ordering {
        if !self.policy.dist_epoch {
            return self.vercmp(a, b);
        }
        let (ra, da) = a.split_once(':').map_or((a, None), |(r, d)| (r, Some(d)));
        let (rb, db) = b.split_once(':').map_or((b, None), |(r, d)| (r, Some(d)));
        self.vercmp(ra, rb).then_with(|| match (da, db) {
            (Some(da), Some(db)) => self.vercmp(da, db),
            _ => Ordering::Equal,
        })
    }
}
