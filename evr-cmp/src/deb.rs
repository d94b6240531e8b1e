// SPDX-License-Identifier: MPL-2.0

//! dpkg version ordering.

use std::cmp::Ordering;

/// Sort weight of a non-digit byte, `None` standing for the end of the string.
///
/// A tilde sorts below the end of the string, letters come next and any other
/// byte sorts after every letter. Digits weigh nothing here: they only appear
/// when the other side still has a non-digit to compare.
fn weight(c: Option<u8>) -> i32 {
    match c {
        None => 0,
        Some(c) if c.is_ascii_digit() => 0,
        Some(c) if c.is_ascii_alphabetic() => i32::from(c),
        Some(b'~') => -1,
        Some(c) => i32::from(c) + 256,
    }
}

/// Compare two Debian version (or revision) strings.
pub fn vercmp(a: &str, b: &str) -> Ordering {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let (mut i, mut j) = (0, 0);
    let non_digit = |s: &[u8], k: usize| s.get(k).is_some_and(|c| !c.is_ascii_digit());
    let digit = |s: &[u8], k: usize| s.get(k).is_some_and(u8::is_ascii_digit);

    while i < a.len() || j < b.len() {
        while non_digit(a, i) || non_digit(b, j) {
            let ord = weight(a.get(i).copied()).cmp(&weight(b.get(j).copied()));
            if ord != Ordering::Equal {
                return ord;
            }
            i = (i + 1).min(a.len());
            j = (j + 1).min(b.len());
        }

        while a.get(i) == Some(&b'0') {
            i += 1;
        }
        while b.get(j) == Some(&b'0') {
            j += 1;
        }

        let mut first_diff = Ordering::Equal;
        while digit(a, i) && digit(b, j) {
            if first_diff == Ordering::Equal {
                first_diff = a[i].cmp(&b[j]);
            }
            i += 1;
            j += 1;
        }
        if digit(a, i) {
            return Ordering::Greater;
        }
        if digit(b, j) {
            return Ordering::Less;
        }
        if first_diff != Ordering::Equal {
            return first_diff;
        }
    }
    Ordering::Equal
}
