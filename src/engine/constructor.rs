//! Greedy randomized adaptive constructor (component C6).

use log::trace;

use super::Engine;
use crate::sort::{heap_sort_by, heap_sortn_paired_by_key, Pair};

impl<'a> Engine<'a> {
    /// Builds a fresh candidate solution: phase 1 (RCL seed assignment),
    /// phase 2 (greedy-randomized completion, with a sparse fast path),
    /// then a full objective recompute.
    pub fn construct(&mut self) {
        self.phase1();
        self.phase2();
        self.s.recompute_objective(self.instance);
    }

    fn g_assign(&mut self, pos: usize, val: usize) {
        self.s.assign(pos, val);
        self.assigned[self.n_assigned] = pos;
        self.n_assigned += 1;
        self.done[pos] = true;
        self.ldone[val] = true;
    }

    /// Cost of tentatively placing value `val` at position `pos`, relative
    /// to the positions already fixed this construction.
    fn g_compute_cost(&self, pos: usize, val: usize) -> i64 {
        let mut cost = 0i64;
        for idx in 0..self.n_assigned {
            let a = self.assigned[idx];
            let b = self.s.p(a);
            cost += self.instance.flow(a, pos) * self.instance.dist(b, val);
        }
        cost
    }

    /// Phase 1: picks the two seed assignments from a restricted candidate
    /// list over flow-by-distance cross products.
    fn phase1(&mut self) {
        let n = self.instance.n();
        let m = n * n - n;

        self.f_scratch.clear();
        self.d_scratch.clear();
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    self.f_scratch.push(Pair::new(self.instance.flow(i, j), i, j));
                    self.d_scratch.push(Pair::new(self.instance.dist(i, j), i, j));
                }
            }
        }

        heap_sort_by(&mut self.d_scratch, |x, y| x.cost < y.cost); // ascending
        heap_sort_by(&mut self.f_scratch, |x, y| x.cost > y.cost); // descending

        let last = ((m as f64) * self.params.beta).floor() as usize;
        let mut rcl_size = ((last as f64) * self.params.alpha).floor() as usize;
        if rcl_size == 0 {
            rcl_size = 1;
        }
        let pos = self.rng.next_below(rcl_size) + 1; // uniform in {1, ..., rcl_size}

        // Lift the `pos` smallest flow*dist cross products to the tail,
        // descending there; the boundary element (the `pos`-th smallest
        // overall) is the RCL member we select.
        heap_sortn_paired_by_key(&mut self.f_scratch, &mut self.d_scratch, pos, |p, q| {
            p.cost * q.cost
        });
        let chosen = m - pos;
        let (fi, fj) = (self.f_scratch[chosen].i, self.f_scratch[chosen].j);
        let (di, dj) = (self.d_scratch[chosen].i, self.d_scratch[chosen].j);
        trace!(
            "phase1: rcl_size={} pos={} chosen facility-pair=({},{}) location-pair=({},{})",
            rcl_size,
            pos,
            fi,
            fj,
            di,
            dj
        );

        for x in self.done.iter_mut() {
            *x = false;
        }
        for x in self.ldone.iter_mut() {
            *x = false;
        }
        self.n_assigned = 0;

        self.g_assign(fi, di);
        self.g_assign(fj, dj);
    }

    /// Phase 2: completes the permutation with greedy-randomized choices,
    /// falling back to a sparse zero-cost fast path when the two seed
    /// assignments show no interaction cost.
    fn phase2(&mut self) {
        let n = self.instance.n();
        let i = self.assigned[0];
        let j = self.s.p(i);
        let k = self.assigned[1];
        let l = self.s.p(k);

        if self.instance.flow(i, k) * self.instance.dist(j, l) == 0 {
            self.sparse_phase2();
        }

        let max = n.saturating_sub(self.n_assigned).saturating_sub(1);
        for _ in 0..max {
            let mut candidates: Vec<Pair> = Vec::new();
            for p in 0..n {
                if self.done[p] {
                    continue;
                }
                for q in 0..n {
                    if self.ldone[q] {
                        continue;
                    }
                    candidates.push(Pair::new(self.g_compute_cost(p, q), p, q));
                }
            }
            heap_sort_by(&mut candidates, |x, y| x.cost < y.cost);

            let mut rcl = ((candidates.len() as f64) * self.params.alpha).floor() as usize;
            if rcl == 0 {
                rcl = 1;
            }
            let pick = self.rng.next_below(rcl);
            let chosen = candidates[pick];
            self.g_assign(chosen.i, chosen.j);
        }
    }

    /// Used only when the seed assignments reveal sparsity: greedily
    /// extends a zero-interaction-cost frontier for up to `n - 3` further
    /// assignments, stopping as soon as no zero-cost extension exists.
    fn sparse_phase2(&mut self) {
        let n = self.instance.n();

        let mut delta: Vec<Pair> = Vec::new();
        for p in 0..n {
            if self.done[p] {
                continue;
            }
            for q in 0..n {
                if self.ldone[q] {
                    continue;
                }
                if self.g_compute_cost(p, q) == 0 {
                    delta.push(Pair::new(0, p, q));
                }
            }
        }
        if delta.is_empty() {
            return;
        }
        let r = self.rng.next_below(delta.len());
        let mut last = delta[r];
        self.g_assign(last.i, last.j);

        for _ in 0..n.saturating_sub(3) {
            let mut ndelta: Vec<Pair> = Vec::new();
            for cand in &delta {
                if self.done[cand.i] || self.ldone[cand.j] {
                    continue;
                }
                if self.instance.flow(cand.i, last.i) * self.instance.dist(cand.j, last.j) == 0 {
                    ndelta.push(*cand);
                }
            }
            if ndelta.is_empty() {
                return;
            }
            let r = self.rng.next_below(ndelta.len());
            last = ndelta[r];
            self.g_assign(last.i, last.j);
            delta = ndelta;
        }
    }
}
