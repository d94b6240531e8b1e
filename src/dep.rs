// SPDX-License-Identifier: MPL-2.0

//! Reading and printing dependencies.
//!
//! The text form is the one of test cases and debug output:
//! `name`, `name.arch`, `name <op> evr` and `a | b`, where the operator is
//! made of `<`, `=` and `>`.

use crate::{CmpFlags, Id, Pool, RelOp, SolvableId};

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn is_op(c: char) -> bool {
    matches!(c, '<' | '=' | '>')
}

/// Length of the name at the start of `s`. Parentheses are skipped as a
/// whole, so `rpmlib(a>b)` is a single name.
fn name_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b' ' | b'\t' | b'<' | b'=' | b'>' => break,
            b'(' => {
                while i < bytes.len() && bytes[i] != b')' {
                    i += 1;
                }
            }
            _ => i += 1,
        }
    }
    i
}

impl Pool {
    /// Parse and intern a dependency.
    ///
    /// `a | b` splits at the first `|`. `name.arch` becomes an
    /// [RelOp::Arch] relation when `arch` is a known architecture, see
    /// [Pool::is_known_arch]. Anything after the version is ignored.
    pub fn parse_dep(&mut self, s: &str) -> Id {
        if let Some((left, right)) = s.split_once('|') {
            let right = self.parse_dep(right);
            let left = self.parse_dep(left);
            return self.rel2id(left, right, RelOp::Or);
        }

        let s = s.trim_start_matches(is_blank);
        let end = name_len(s);
        let (name, rest) = s.split_at(end);
        let id = match s.find('.') {
            Some(dot) if dot + 1 < end && !name.ends_with(')') => {
                let arch = self
                    .lookup_str(&name[dot + 1..])
                    .filter(|&arch| self.is_known_arch(arch));
                match arch {
                    Some(arch) => {
                        let base = self.str2id(&name[..dot]);
                        self.rel2id(base, arch, RelOp::Arch)
                    }
                    None => self.str2id(name).into(),
                }
            }
            _ => self.str2id(name).into(),
        };

        let rest = rest.trim_start_matches(is_blank);
        let op_len = rest.find(|c| !is_op(c)).unwrap_or(rest.len());
        let (op, rest) = rest.split_at(op_len);
        let flags = op.chars().fold(CmpFlags::empty(), |flags, c| {
            flags
                | match c {
                    '<' => CmpFlags::LT,
                    '=' => CmpFlags::EQ,
                    _ => CmpFlags::GT,
                }
        });
        if flags.is_empty() {
            return id;
        }
        let rest = rest.trim_start_matches(is_blank);
        let evr = &rest[..rest.find(is_blank).unwrap_or(rest.len())];
        let evr = self.str2id(evr);
        self.rel2id(id, evr, flags)
    }

    /// Print a dependency.
    pub fn dep2str(&self, dep: Id) -> String {
        let mut out = String::new();
        self.write_dep(dep, &mut out);
        out
    }

    fn write_dep(&self, dep: Id, out: &mut String) {
        let rel = match dep {
            Id::Plain(s) => {
                out.push_str(self.id2str(s));
                return;
            }
            Id::Relation(r) => self.relation(r),
        };
        if rel.op == RelOp::Namespace {
            self.write_dep(rel.name, out);
            out.push('(');
            self.write_dep(rel.evr, out);
            out.push(')');
            return;
        }
        self.write_operand(rel.name, rel.op, out);
        out.push_str(rel.op.as_str());
        self.write_operand(rel.evr, rel.op, out);
    }

    /// Boolean operands are parenthesized unless they chain the parent's
    /// operator.
    fn write_operand(&self, operand: Id, parent: RelOp, out: &mut String) {
        let nested = match operand {
            Id::Relation(r) => self.relation(r).op,
            Id::Plain(_) => parent,
        };
        if nested.is_boolean() && nested != parent {
            out.push('(');
            self.write_dep(operand, out);
            out.push(')');
        } else {
            self.write_dep(operand, out);
        }
    }

    /// Print a solvable as `name-evr.arch`.
    pub fn solvid2str(&self, id: SolvableId) -> String {
        let s = self.solvable(id);
        let mut out = self.id2str(s.name).to_string();
        let evr = self.id2str(s.evr);
        if !evr.is_empty() {
            out.push('-');
            out.push_str(evr);
        }
        if !s.arch.is_null() {
            out.push('.');
            out.push_str(self.id2str(s.arch));
        }
        out
    }
}
