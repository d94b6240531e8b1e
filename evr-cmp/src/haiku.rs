// SPDX-License-Identifier: MPL-2.0

//! Haiku package version ordering.
//!
//! A version is a main part optionally followed by `~` and a pre-release part.
//! Pre-releases sort before the release they precede.

use std::cmp::Ordering;

/// Compare two Haiku versions.
pub fn vercmp(a: &str, b: &str) -> Ordering {
    let (main_a, pre_a) = split_pre_release(a.as_bytes());
    let (main_b, pre_b) = split_pre_release(b.as_bytes());
    compare_part(main_a, main_b).then_with(|| match (pre_a, pre_b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(pa), Some(pb)) => compare_part(pa, pb),
    })
}

fn split_pre_release(s: &[u8]) -> (&[u8], Option<&[u8]>) {
    match s.iter().position(|&c| c == b'~') {
        Some(pos) => (&s[..pos], Some(&s[pos + 1..])),
        None => (s, None),
    }
}

/// Length of the leading run of `s` for which `pred` holds.
fn span(s: &[u8], pred: impl Fn(&u8) -> bool) -> usize {
    s.iter().position(|c| !pred(c)).unwrap_or(s.len())
}

/// Compare alternating non-digit and digit runs.
fn compare_part(mut a: &[u8], mut b: &[u8]) -> Ordering {
    while !a.is_empty() && !b.is_empty() {
        let (text_a, rest_a) = a.split_at(span(a, |c| !c.is_ascii_digit()));
        let (text_b, rest_b) = b.split_at(span(b, |c| !c.is_ascii_digit()));
        match (text_a.is_empty(), text_b.is_empty()) {
            (false, true) => return Ordering::Greater,
            (true, false) => return Ordering::Less,
            _ => {
                let ord = text_a.cmp(text_b);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }

        let (num_a, rest_a) = rest_a.split_at(span(rest_a, u8::is_ascii_digit));
        let (num_b, rest_b) = rest_b.split_at(span(rest_b, u8::is_ascii_digit));
        let num_a = strip_zeros(num_a);
        let num_b = strip_zeros(num_b);
        let ord = num_a.len().cmp(&num_b.len()).then_with(|| num_a.cmp(num_b));
        if ord != Ordering::Equal {
            return ord;
        }
        a = rest_a;
        b = rest_b;
    }
    (!a.is_empty()).cmp(&!b.is_empty())
}

/// Drop leading zeros, keeping at least one digit.
fn strip_zeros(num: &[u8]) -> &[u8] {
    let zeros = span(num, |&c| c == b'0');
    &num[zeros.min(num.len().saturating_sub(1))..]
}
