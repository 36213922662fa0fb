//! Delaney–Dress symbols (input side of the engine).
//!
//! A symbol is a finite set of flags (chambers) with three involutions
//! σ0, σ1, σ2 and branching numbers `m01`, `m12` that are constant on the
//! corresponding orbits; `m02` is always 2. Flags are 0-based internally and
//! 1-based in the textual form `<idx.sub:size[ dim]:σ0,σ1,σ2:m01,m12>`.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use crate::error::{FdError, Result};

const UNSET: usize = usize::MAX;

/// Two-dimensional Delaney–Dress symbol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DSymbol {
    ops: [Vec<usize>; 3],
    m01: Vec<u32>,
    m12: Vec<u32>,
}

impl DSymbol {
    /// Build a symbol from explicit involutions and per-flag branching numbers.
    pub fn new(ops: [Vec<usize>; 3], m01: Vec<u32>, m12: Vec<u32>) -> Result<Self> {
        let n = ops[0].len();
        if n == 0 {
            return Err(FdError::structural("symbol has no flags"));
        }
        for (i, op) in ops.iter().enumerate() {
            if op.len() != n {
                return Err(FdError::structural(format!(
                    "σ{i} has {} entries, expected {n}",
                    op.len()
                )));
            }
            for (d, &e) in op.iter().enumerate() {
                if e >= n || op[e] != d {
                    return Err(FdError::structural(format!(
                        "σ{i} is not an involution at flag {d}"
                    )));
                }
            }
        }
        if m01.len() != n || m12.len() != n {
            return Err(FdError::structural("branching arrays do not match flag count"));
        }
        let sym = Self { ops, m01, m12 };
        for d in 0..n {
            if sym.m01[d] == 0 || sym.m12[d] == 0 {
                return Err(FdError::structural(format!("zero branching at flag {d}")));
            }
            if sym.orbit(0, 1, d).iter().any(|&e| sym.m01[e] != sym.m01[d])
                || sym.orbit(1, 2, d).iter().any(|&e| sym.m12[e] != sym.m12[d])
            {
                return Err(FdError::structural(format!(
                    "branching not constant on the orbits of flag {d}"
                )));
            }
        }
        Ok(sym)
    }

    /// Symbol of a kaleidoscopic k-gon: one tile orbit of `2k` flags whose
    /// sides all lie on mirrors, with branching `m12` at every polygon vertex.
    pub fn reflection_polygon(k: usize, m12: u32) -> Self {
        let n = 2 * k;
        let s0 = (0..n).map(|d| d ^ 1).collect();
        let s1 = (0..n)
            .map(|d| if d % 2 == 1 { (d + 1) % n } else { (d + n - 1) % n })
            .collect();
        let s2 = (0..n).collect();
        Self {
            ops: [s0, s1, s2],
            m01: vec![k as u32; n],
            m12: vec![m12; n],
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.ops[0].len()
    }

    /// σi(d).
    #[inline]
    pub fn op(&self, i: usize, d: usize) -> usize {
        self.ops[i][d]
    }

    /// Branching number of the (i, j)-orbit through `d`.
    #[inline]
    pub fn m(&self, i: usize, j: usize, d: usize) -> u32 {
        match (i.min(j), i.max(j)) {
            (0, 1) => self.m01[d],
            (1, 2) => self.m12[d],
            _ => 2,
        }
    }

    /// Flags of the ⟨σi, σj⟩-orbit through `d`, sorted.
    pub fn orbit(&self, i: usize, j: usize, d: usize) -> Vec<usize> {
        orbit_of(&self.ops, i, j, d)
    }

    /// Combinatorial curvature Σ_D (1/m01 + 1/m12 + 1/m02 − 1).
    pub fn curvature(&self) -> f64 {
        (0..self.size())
            .map(|d| 1.0 / self.m01[d] as f64 + 1.0 / self.m12[d] as f64 + 0.5 - 1.0)
            .sum()
    }
}

fn orbit_of(ops: &[Vec<usize>; 3], i: usize, j: usize, d: usize) -> Vec<usize> {
    let mut seen = vec![false; ops[0].len()];
    let mut out = Vec::new();
    let mut queue = VecDeque::from([d]);
    seen[d] = true;
    while let Some(e) = queue.pop_front() {
        out.push(e);
        for g in [i, j] {
            let f = ops[g][e];
            if f != UNSET && !seen[f] {
                seen[f] = true;
                queue.push_back(f);
            }
        }
    }
    out.sort_unstable();
    out
}

fn parse_numbers(field: &str) -> Result<Vec<usize>> {
    field
        .split_whitespace()
        .map(|tok| {
            tok.parse::<usize>()
                .map_err(|_| FdError::Parse(format!("not a number: {tok:?}")))
        })
        .collect()
}

fn fill_orbit_values(ops: &[Vec<usize>; 3], i: usize, j: usize, field: &str) -> Result<Vec<u32>> {
    let n = ops[0].len();
    let mut vals = parse_numbers(field)?.into_iter();
    let mut out = vec![0u32; n];
    for d in 0..n {
        if out[d] != 0 {
            continue;
        }
        let v = vals
            .next()
            .ok_or_else(|| FdError::Parse(format!("missing m{i}{j} value for flag {}", d + 1)))?;
        let v = u32::try_from(v).map_err(|_| FdError::Parse(format!("m{i}{j} out of range")))?;
        if v == 0 {
            return Err(FdError::Parse(format!("m{i}{j} must be positive")));
        }
        for e in orbit_of(ops, i, j, d) {
            out[e] = v;
        }
    }
    if vals.next().is_some() {
        return Err(FdError::Parse(format!("trailing m{i}{j} values")));
    }
    Ok(out)
}

impl FromStr for DSymbol {
    type Err = FdError;

    fn from_str(s: &str) -> Result<Self> {
        let body = s
            .trim()
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .ok_or_else(|| FdError::Parse("symbol must be enclosed in <...>".into()))?;
        let parts: Vec<&str> = body.split(':').collect();
        if parts.len() != 4 {
            return Err(FdError::Parse(format!(
                "expected 4 ':'-separated sections, found {}",
                parts.len()
            )));
        }
        let head = parse_numbers(parts[1])?;
        let size = *head
            .first()
            .ok_or_else(|| FdError::Parse("missing size".into()))?;
        if let Some(&dim) = head.get(1) {
            if dim != 2 {
                return Err(FdError::Parse(format!("dimension {dim} not supported")));
            }
        }
        if size == 0 {
            return Err(FdError::Parse("size must be positive".into()));
        }

        let op_fields: Vec<&str> = parts[2].split(',').collect();
        if op_fields.len() != 3 {
            return Err(FdError::Parse("expected three involutions".into()));
        }
        let mut ops = [vec![UNSET; size], vec![UNSET; size], vec![UNSET; size]];
        for (i, field) in op_fields.iter().enumerate() {
            let mut nums = parse_numbers(field)?.into_iter();
            for d in 0..size {
                if ops[i][d] != UNSET {
                    continue;
                }
                let e = nums
                    .next()
                    .ok_or_else(|| FdError::Parse(format!("σ{i} undefined at flag {}", d + 1)))?;
                if e == 0 || e > size {
                    return Err(FdError::Parse(format!("σ{i} image {e} out of range")));
                }
                let e = e - 1;
                if ops[i][e] != UNSET {
                    return Err(FdError::Parse(format!("σ{i} assigns flag {} twice", e + 1)));
                }
                ops[i][d] = e;
                ops[i][e] = d;
            }
            if nums.next().is_some() {
                return Err(FdError::Parse(format!("trailing σ{i} entries")));
            }
        }

        let m_fields: Vec<&str> = parts[3].split(',').collect();
        if m_fields.len() != 2 {
            return Err(FdError::Parse("expected m01 and m12 sections".into()));
        }
        let m01 = fill_orbit_values(&ops, 0, 1, m_fields[0])?;
        let m12 = fill_orbit_values(&ops, 1, 2, m_fields[1])?;
        DSymbol::new(ops, m01, m12)
    }
}

impl fmt::Display for DSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.size();
        let ops: Vec<String> = self
            .ops
            .iter()
            .map(|op| {
                (0..n)
                    .filter(|&d| op[d] >= d)
                    .map(|d| (op[d] + 1).to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        let ms: Vec<String> = [(0, 1), (1, 2)]
            .iter()
            .map(|&(i, j)| {
                let mut seen = vec![false; n];
                let mut vals = Vec::new();
                for d in 0..n {
                    if seen[d] {
                        continue;
                    }
                    for e in self.orbit(i, j, d) {
                        seen[e] = true;
                    }
                    vals.push(self.m(i, j, d).to_string());
                }
                vals.join(" ")
            })
            .collect();
        write!(f, "<1.1:{n}:{}:{}>", ops.join(","), ms.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_single_flag_kaleidoscope() {
        let s: DSymbol = "<1.1:1:1,1,1:4,4>".parse().unwrap();
        assert_eq!(s.size(), 1);
        for i in 0..3 {
            assert_eq!(s.op(i, 0), 0);
        }
        assert_eq!(s.m(0, 1, 0), 4);
        assert_eq!(s.m(2, 1, 0), 4);
        assert_eq!(s.m(0, 2, 0), 2);
        assert!(s.curvature().abs() < 1e-12);
    }

    #[test]
    fn parse_matches_reflection_polygon() {
        let text = "<1.1:8 2:2 4 6 8,8 3 5 7,1 2 3 4 5 6 7 8:4,4 4 4 4>";
        let parsed: DSymbol = text.parse().unwrap();
        assert_eq!(parsed, DSymbol::reflection_polygon(4, 4));
        let again: DSymbol = parsed.to_string().parse().unwrap();
        assert_eq!(again, parsed);
    }

    #[test]
    fn curvature_sign_follows_polygon_size() {
        assert!(DSymbol::reflection_polygon(3, 4).curvature() > 0.0);
        assert!(DSymbol::reflection_polygon(4, 4).curvature().abs() < 1e-12);
        assert!(DSymbol::reflection_polygon(5, 4).curvature() < 0.0);
    }

    #[test]
    fn rejects_malformed_text() {
        for bad in [
            "1.1:1:1,1,1:4,4",
            "<1.1:1:1,1:4,4>",
            "<1.1:1:2,1,1:4,4>",
            "<1.1:2:2,2,2:4>",
            "<1.1:1:1,1,1:4 4,4>",
            "<1.1:1 3:1,1,1:4,4>",
        ] {
            assert!(matches!(bad.parse::<DSymbol>(), Err(FdError::Parse(_))), "{bad}");
        }
    }

    #[test]
    fn rejects_non_involution() {
        let ops = [vec![1, 2, 0], vec![0, 1, 2], vec![0, 1, 2]];
        let err = DSymbol::new(ops, vec![3; 3], vec![3; 3]).unwrap_err();
        assert!(matches!(err, FdError::Structural(_)));
    }

    #[test]
    fn rejects_branching_varying_on_orbit() {
        let ops = [vec![1, 0], vec![1, 0], vec![0, 1]];
        let err = DSymbol::new(ops, vec![2, 3], vec![4, 4]).unwrap_err();
        assert!(matches!(err, FdError::Structural(_)));
    }
}
