//! The elite pool (component C7): a bounded, no-duplicates set of
//! diverse high-quality solutions used as path-relinking guides.
//!
//! Holds no reference back to the engine (per the cyclic-back-reference
//! design note): every method that needs the current iteration count,
//! the current solution, or the RNG takes it as an explicit argument,
//! so the pool can be built and exercised on its own in tests.

use log::debug;

use crate::rng::Rng;
use crate::solution::Solution;

/// Minimum Hamming distance required between two pool members.
pub const MIN_DIFF: usize = 3;
/// Iterations without improvement before a stagnation purge runs.
pub const MAX_ITER_NO_IMPROV: u32 = 20;

pub struct Pool {
    capacity: usize,
    cur_size: usize,
    sol: Vec<Solution>,
    best: usize,
    worst: usize,
}

impl Pool {
    /// Builds an empty pool of the given `capacity`, preallocating
    /// `capacity` identity solutions of dimension `n` as backing storage.
    pub fn new(capacity: usize, n: usize) -> Self {
        Pool {
            capacity,
            cur_size: 0,
            sol: (0..capacity).map(|_| Solution::new(n)).collect(),
            best: 0,
            worst: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cur_size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cur_size == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.cur_size == self.capacity
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, i: usize) -> &Solution {
        &self.sol[i]
    }

    pub fn best(&self) -> &Solution {
        &self.sol[self.best]
    }

    pub fn worst(&self) -> &Solution {
        &self.sol[self.worst]
    }

    fn filled(&self) -> &[Solution] {
        &self.sol[..self.cur_size]
    }

    /// `true` if every filled slot is at least `MIN_DIFF` positions away
    /// from `s`.
    pub fn is_diverse_enough(&self, s: &Solution) -> bool {
        self.filled().iter().all(|p| p.similarity(s) >= MIN_DIFF)
    }

    /// `true` if some filled slot has the same cost as `s`, or is closer
    /// than `MIN_DIFF` positions to it.
    pub fn is_near_duplicate(&self, s: &Solution) -> bool {
        self.filled()
            .iter()
            .any(|p| p.cost == s.cost || p.similarity(s) < MIN_DIFF)
    }

    fn recompute_extremes(&mut self) {
        self.best = 0;
        self.worst = 0;
        for i in 1..self.cur_size {
            if self.sol[i].cost < self.sol[self.best].cost {
                self.best = i;
            }
            if self.sol[i].cost > self.sol[self.worst].cost {
                self.worst = i;
            }
        }
    }

    /// Samples a pool index, biased toward members most different from
    /// `current`: draws uniformly over the similarity-weighted prefix sum
    /// and returns the first index whose cumulative weight reaches the
    /// draw.
    pub fn guiding_index(&self, current: &Solution, rng: &mut Rng) -> usize {
        assert!(self.cur_size > 0, "guiding_index requires a non-empty pool");
        let mut prefix = vec![0usize; self.cur_size];
        let mut total = 0usize;
        for i in 0..self.cur_size {
            total += self.sol[i].similarity(current);
            prefix[i] = total;
        }
        if total == 0 {
            return 0;
        }
        let r = rng.next_below(total);
        let mut i = 0;
        while i < self.cur_size - 1 && r > prefix[i] {
            i += 1;
        }
        i
    }

    /// Appends `s` at the next free slot and refreshes `best`/`worst`.
    /// Panics if the pool is already full.
    pub fn insert(&mut self, s: &Solution) {
        assert!(!self.is_full(), "insert called on a full pool");
        let idx = self.cur_size;
        self.sol[idx].copy_from(s);
        if idx > 0 {
            if self.sol[idx].cost > self.sol[self.worst].cost {
                self.worst = idx;
            }
            if self.sol[idx].cost < self.sol[self.best].cost {
                self.best = idx;
            }
        }
        self.cur_size += 1;
    }

    /// Admission and stagnation policy, run once per iteration after both
    /// path-relinking calls. Returns `true` if `current` was admitted.
    ///
    /// No-op while the pool has free slots (forward `pr_run` handles
    /// growth on its own). Once full: replaces the pool member most
    /// similar to `current` among those no cheaper than it (ties broken
    /// by a coin flip) when `current` improves on the best, or on the
    /// worst member without already being a near-duplicate. Otherwise, if
    /// `curr_iter - *last_improv_iter >= MAX_ITER_NO_IMPROV`, purges the
    /// costlier half of the pool and resets `*last_improv_iter`.
    pub fn update(
        &mut self,
        current: &Solution,
        curr_iter: u32,
        last_improv_iter: &mut u32,
        rng: &mut Rng,
    ) -> bool {
        if !self.is_full() {
            return false;
        }
        let improves_best = current.cost < self.sol[self.best].cost;
        let improves_worst =
            current.cost < self.sol[self.worst].cost && !self.is_near_duplicate(current);
        if improves_best || improves_worst {
            let mut diff = current.n() + 1;
            let mut position = 0usize;
            for i in 0..self.capacity {
                if self.sol[i].cost >= current.cost {
                    let sim = self.sol[i].similarity(current);
                    if diff > sim {
                        diff = sim;
                        position = i;
                    }
                    if diff == sim && rng.coin_flip() {
                        position = i;
                    }
                }
            }
            self.sol[position].copy_from(current);
            if current.cost < self.sol[self.best].cost {
                self.best = position;
            }
            if current.cost > self.sol[self.worst].cost {
                self.worst = position;
            }
            debug!("elite pool admitted cost={} at slot={}", current.cost, position);
            true
        } else if curr_iter.wrapping_sub(*last_improv_iter) >= MAX_ITER_NO_IMPROV {
            self.purge();
            *last_improv_iter = curr_iter;
            false
        } else {
            false
        }
    }

    /// Marks the costlier half of the filled slots for deletion and
    /// compacts the remaining ones into `0..cur_size` with no holes.
    fn purge(&mut self) {
        let before = self.cur_size;
        let mut order: Vec<usize> = (0..self.cur_size).collect();
        order.sort_by(|&a, &b| self.sol[b].cost.cmp(&self.sol[a].cost));
        let to_remove = self.cur_size / 2;
        let mut removed = vec![false; self.cur_size];
        for &idx in order.iter().take(to_remove) {
            removed[idx] = true;
        }

        let mut write = 0usize;
        for read in 0..self.cur_size {
            if !removed[read] {
                if write != read {
                    self.sol.swap(write, read);
                }
                write += 1;
            }
        }
        self.cur_size = before - to_remove;
        self.recompute_extremes();
        debug!(
            "elite pool purged {} of {} members, {} remain",
            to_remove, before, self.cur_size
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Instance;

    fn solution_with_cost(n: usize, cost: i64, perm: &[usize]) -> Solution {
        let mut s = Solution::new(n);
        for (i, &v) in perm.iter().enumerate() {
            s.assign(i, v);
        }
        s.cost = cost;
        s
    }

    #[test]
    fn insert_tracks_best_and_worst() {
        let mut pool = Pool::new(4, 5);
        pool.insert(&solution_with_cost(5, 50, &[0, 1, 2, 3, 4]));
        pool.insert(&solution_with_cost(5, 10, &[4, 3, 2, 1, 0]));
        pool.insert(&solution_with_cost(5, 90, &[1, 0, 3, 2, 4]));
        assert_eq!(pool.best().cost, 10);
        assert_eq!(pool.worst().cost, 90);
        assert_eq!(pool.len(), 3);
        assert!(!pool.is_full());
    }

    #[test]
    fn is_near_duplicate_flags_same_cost_or_close_similarity() {
        let mut pool = Pool::new(4, 5);
        pool.insert(&solution_with_cost(5, 10, &[0, 1, 2, 3, 4]));
        let same_cost = solution_with_cost(5, 10, &[4, 3, 2, 1, 0]);
        assert!(pool.is_near_duplicate(&same_cost));

        let near = solution_with_cost(5, 999, &[1, 0, 2, 3, 4]); // differs at 2 positions
        assert!(pool.is_near_duplicate(&near));

        let far = solution_with_cost(5, 999, &[4, 3, 2, 1, 0]); // differs everywhere
        assert!(!pool.is_near_duplicate(&far));
    }

    #[test]
    fn update_is_noop_while_pool_has_free_slots() {
        let mut pool = Pool::new(4, 5);
        pool.insert(&solution_with_cost(5, 10, &[0, 1, 2, 3, 4]));
        let mut rng = Rng::new(1);
        let mut last_improv = 0u32;
        let admitted = pool.update(&solution_with_cost(5, 1, &[4, 3, 2, 1, 0]), 1, &mut last_improv, &mut rng);
        assert!(!admitted);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn update_admits_new_best_and_refreshes_extremes() {
        let mut pool = Pool::new(3, 5);
        pool.insert(&solution_with_cost(5, 50, &[0, 1, 2, 3, 4]));
        pool.insert(&solution_with_cost(5, 60, &[1, 0, 2, 3, 4]));
        pool.insert(&solution_with_cost(5, 70, &[2, 1, 0, 3, 4]));
        assert!(pool.is_full());

        let mut rng = Rng::new(1);
        let mut last_improv = 0u32;
        let candidate = solution_with_cost(5, 10, &[4, 3, 2, 1, 0]);
        let admitted = pool.update(&candidate, 1, &mut last_improv, &mut rng);
        assert!(admitted);
        assert_eq!(pool.best().cost, 10);
    }

    #[test]
    fn stagnation_purge_halves_pool_and_compacts_without_holes() {
        let mut pool = Pool::new(4, 5);
        pool.insert(&solution_with_cost(5, 10, &[0, 1, 2, 3, 4]));
        pool.insert(&solution_with_cost(5, 20, &[1, 0, 2, 3, 4]));
        pool.insert(&solution_with_cost(5, 30, &[2, 1, 0, 3, 4]));
        pool.insert(&solution_with_cost(5, 40, &[3, 1, 2, 0, 4]));
        assert!(pool.is_full());

        let mut rng = Rng::new(1);
        let mut last_improv = 0u32;
        // Neither improves best nor worst, and enough iterations have
        // passed without improvement, so this should purge.
        let stale = solution_with_cost(5, 25, &[0, 1, 2, 3, 4]);
        let admitted = pool.update(&stale, MAX_ITER_NO_IMPROV, &mut last_improv, &mut rng);
        assert!(!admitted);
        assert_eq!(pool.len(), 2);
        assert_eq!(last_improv, MAX_ITER_NO_IMPROV);
        // Survivors must be the two cheapest (10 and 20).
        let mut costs: Vec<i64> = (0..pool.len()).map(|i| pool.get(i).cost).collect();
        costs.sort_unstable();
        assert_eq!(costs, vec![10, 20]);
    }

    #[test]
    fn guiding_index_favors_more_different_solutions() {
        let inst = Instance::new(4, vec![0; 16], vec![0; 16]).unwrap();
        let _ = inst; // pool sampling does not need the instance directly
        let mut pool = Pool::new(3, 4);
        pool.insert(&solution_with_cost(4, 1, &[0, 1, 2, 3])); // identical to current
        pool.insert(&solution_with_cost(4, 2, &[1, 0, 3, 2])); // differs everywhere
        pool.insert(&solution_with_cost(4, 3, &[0, 1, 3, 2])); // differs at 2 positions

        let current = solution_with_cost(4, 0, &[0, 1, 2, 3]);
        let mut rng = Rng::new(42);
        let mut seen = [0usize; 3];
        for _ in 0..200 {
            let idx = pool.guiding_index(&current, &mut rng);
            seen[idx] += 1;
        }
        // Index 0 has zero similarity weight and should never be picked.
        assert_eq!(seen[0], 0);
        assert!(seen[1] > 0 && seen[2] > 0);
    }
}
