//! A candidate permutation and its bookkeeping (component C5).

use crate::instance::Instance;
use crate::rng::Rng;

/// Sentinel cost used by the elite pool while purging to mark a slot as
/// not-yet-compacted.
pub const PURGED_COST: i64 = -1;

/// A permutation `p` of `0..n`, its inverse `rev` (`rev[p[i]] == i`), and a
/// cached cost. `cost` is only meaningful once [`Solution::recompute_objective`]
/// (or an equivalent delta update at the call site) has run; it is left at
/// `0` by [`Solution::new`].
#[derive(Clone, Debug)]
pub struct Solution {
    n: usize,
    p: Vec<usize>,
    rev: Vec<usize>,
    pub cost: i64,
}

impl Solution {
    /// Creates a solution holding the identity permutation, cost `0`
    /// (undefined until recomputed).
    pub fn new(n: usize) -> Self {
        Solution {
            n,
            p: (0..n).collect(),
            rev: (0..n).collect(),
            cost: 0,
        }
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn p(&self, i: usize) -> usize {
        self.p[i]
    }

    #[inline]
    pub fn perm(&self) -> &[usize] {
        &self.p
    }

    #[inline]
    pub fn rev(&self, val: usize) -> usize {
        self.rev[val]
    }

    /// Exchanges the values held at positions `a` and `b`, keeping `rev`
    /// consistent. Does not touch `cost` — callers apply the matching delta
    /// themselves (or call [`Solution::recompute_objective`]).
    pub fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.rev[self.p[a]] = b;
        self.rev[self.p[b]] = a;
        self.p.swap(a, b);
    }

    /// Places `val` at position `pos`, preserving permutation-ness.
    pub fn assign(&mut self, pos: usize, val: usize) {
        let src = self.rev[val];
        self.swap(pos, src);
    }

    /// Shuffles the permutation uniformly at random (Fisher-Yates) and
    /// rebuilds `rev`. Kept for API completeness; the driver intentionally
    /// never calls this (see `SPEC_FULL.md` §9).
    pub fn randomize(&mut self, rng: &mut Rng) {
        for i in (1..self.n).rev() {
            let r = rng.next_below(i + 1);
            self.p.swap(i, r);
        }
        for (i, &val) in self.p.iter().enumerate() {
            self.rev[val] = i;
        }
    }

    /// Overwrites `self` with `src`'s permutation, inverse, cost, and `n`.
    pub fn copy_from(&mut self, src: &Solution) {
        self.p.clear();
        self.p.extend_from_slice(&src.p);
        self.rev.clear();
        self.rev.extend_from_slice(&src.rev);
        self.cost = src.cost;
        self.n = src.n;
    }

    /// Number of positions at which `self` and `other` disagree. `0` iff
    /// the permutations are equal.
    pub fn similarity(&self, other: &Solution) -> usize {
        self.p
            .iter()
            .zip(other.p.iter())
            .filter(|(a, b)| a != b)
            .count()
    }

    /// Recomputes `cost` from scratch as `sum(dist[i][j] * flow[p[i]][p[j]])`.
    pub fn recompute_objective(&mut self, instance: &Instance) {
        let n = self.n;
        let mut cost: i64 = 0;
        for i in 0..n {
            for j in 0..n {
                cost += instance.dist(i, j) * instance.flow(self.p[i], self.p[j]);
            }
        }
        self.cost = cost;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(n: usize) -> Solution {
        Solution::new(n)
    }

    #[test]
    fn new_is_identity_permutation() {
        let s = identity(5);
        for i in 0..5 {
            assert_eq!(s.p(i), i);
            assert_eq!(s.rev(i), i);
        }
    }

    fn check_inverse_invariant(s: &Solution) {
        for i in 0..s.n() {
            assert_eq!(s.rev(s.p(i)), i);
            assert!(s.p(i) < s.n());
        }
    }

    #[test]
    fn swap_preserves_inverse_invariant() {
        let mut s = identity(6);
        s.swap(1, 4);
        check_inverse_invariant(&s);
        s.swap(1, 4);
        assert_eq!(s.perm(), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn assign_places_value_and_preserves_invariant() {
        let mut s = identity(6);
        s.assign(0, 5);
        assert_eq!(s.p(0), 5);
        check_inverse_invariant(&s);
    }

    #[test]
    fn randomize_produces_valid_permutation() {
        let mut rng = Rng::new(7);
        let mut s = identity(8);
        s.randomize(&mut rng);
        check_inverse_invariant(&s);
        let mut sorted = s.perm().to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn copy_from_duplicates_state() {
        let mut rng = Rng::new(3);
        let mut src = identity(5);
        src.randomize(&mut rng);
        src.cost = 42;
        let mut dst = identity(5);
        dst.copy_from(&src);
        assert_eq!(dst.perm(), src.perm());
        assert_eq!(dst.cost, 42);
        check_inverse_invariant(&dst);
    }

    #[test]
    fn similarity_is_zero_iff_equal() {
        let a = identity(5);
        let b = identity(5);
        assert_eq!(a.similarity(&b), 0);

        let mut c = identity(5);
        c.swap(0, 1);
        assert!(a.similarity(&c) > 0);
        assert_eq!(a.similarity(&c), c.similarity(&a));
    }

    #[test]
    fn recompute_objective_matches_manual_sum() {
        let inst = Instance::new(3, vec![0, 1, 2, 1, 0, 3, 2, 3, 0], vec![0, 2, 1, 2, 0, 4, 1, 4, 0])
            .unwrap();
        let mut s = identity(3);
        s.recompute_objective(&inst);
        let mut expected = 0;
        for i in 0..3 {
            for j in 0..3 {
                expected += inst.dist(i, j) * inst.flow(s.p(i), s.p(j));
            }
        }
        assert_eq!(s.cost, expected);
    }
}
