// SPDX-License-Identifier: MPL-2.0

//! rpmvercmp and its pacman flavour.
//!
//! Both split a version into alternating runs of digits and letters,
//! skipping every other byte as a separator. They only differ in how the
//! leftovers are ranked once one side runs out of runs.

use std::cmp::Ordering;

/// What happens when one side has no runs left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tail {
    /// Whatever is left wins.
    Rpm,
    /// A leftover letter run loses, a leftover digit run wins.
    Pacman,
}

/// Compare two versions the way rpm does.
pub fn vercmp(a: &str, b: &str) -> Ordering {
    compare_runs(a.as_bytes(), b.as_bytes(), Tail::Rpm)
}

/// Compare two versions the way pacman does.
pub fn vercmp_pacman(a: &str, b: &str) -> Ordering {
    compare_runs(a.as_bytes(), b.as_bytes(), Tail::Pacman)
}

fn is_run_start(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'~'
}

fn run_end(s: &[u8], start: usize, pred: impl Fn(u8) -> bool) -> usize {
    s[start..]
        .iter()
        .position(|&c| !pred(c))
        .map_or(s.len(), |n| start + n)
}

fn compare_runs(a: &[u8], b: &[u8], tail: Tail) -> Ordering {
    let (mut i, mut j) = (0, 0);
    loop {
        while i < a.len() && !is_run_start(a[i]) {
            i += 1;
        }
        while j < b.len() && !is_run_start(b[j]) {
            j += 1;
        }

        // A tilde sorts before anything, even the end of the string.
        let tilde_a = a.get(i) == Some(&b'~');
        let tilde_b = b.get(j) == Some(&b'~');
        if tilde_a || tilde_b {
            if !tilde_a {
                return Ordering::Greater;
            }
            if !tilde_b {
                return Ordering::Less;
            }
            i += 1;
            j += 1;
            continue;
        }

        if i >= a.len() || j >= b.len() {
            break;
        }

        let (end_a, end_b);
        if a[i].is_ascii_digit() || b[j].is_ascii_digit() {
            while a[i] == b'0' && a.get(i + 1).is_some_and(u8::is_ascii_digit) {
                i += 1;
            }
            while b[j] == b'0' && b.get(j + 1).is_some_and(u8::is_ascii_digit) {
                j += 1;
            }
            end_a = run_end(a, i, |c| c.is_ascii_digit());
            end_b = run_end(b, j, |c| c.is_ascii_digit());
            // A longer digit run is a bigger number; an empty one is a letter run,
            // which always loses against digits.
            let ord = (end_a - i)
                .cmp(&(end_b - j))
                .then_with(|| a[i..end_a].cmp(&b[j..end_b]));
            if ord != Ordering::Equal {
                return ord;
            }
        } else {
            end_a = run_end(a, i, |c| c.is_ascii_alphabetic());
            end_b = run_end(b, j, |c| c.is_ascii_alphabetic());
            let ord = a[i..end_a].cmp(&b[j..end_b]);
            if ord != Ordering::Equal {
                return ord;
            }
        }
        i = end_a;
        j = end_b;
    }

    match tail {
        Tail::Rpm => {
            if i < a.len() {
                Ordering::Greater
            } else if j < b.len() {
                Ordering::Less
            } else {
                Ordering::Equal
            }
        }
        Tail::Pacman => match (a.get(i), b.get(j)) {
            (None, None) => Ordering::Equal,
            (Some(c), _) if c.is_ascii_alphabetic() => Ordering::Less,
            (Some(_), _) => Ordering::Greater,
            (None, Some(c)) if c.is_ascii_alphabetic() => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
        },
    }
}
