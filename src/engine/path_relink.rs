//! The path-relinking walk itself (component C7), kept on `Engine` since
//! it needs `pr_local_search` and the instance to evaluate deltas along
//! the way.

use super::{delta, Engine};
use crate::solution::{Solution, PURGED_COST};

impl<'a> Engine<'a> {
    /// Walks a copy of `start` toward `end` one swap at a time, tracking
    /// the cheapest solution seen (`sbest`, re-optimized locally whenever
    /// it improves) and the cheapest "intermediate local optimum" `lopt`
    /// (a visited state that was better than its predecessor and better
    /// than its successor). Returns `sbest` unless `lopt` exists and
    /// `sbest` does not already beat `end`.
    pub fn execute_pr(&mut self, start: &Solution, end: &Solution) -> Solution {
        let n = self.instance.n();
        let mut s = start.clone();
        let mut sbest = start.clone();
        let mut lopt = start.clone();
        lopt.cost = PURGED_COST;

        let mut prev = start.clone();
        let mut cpp: i64 = PURGED_COST;
        let mut cp: i64 = PURGED_COST;

        for i in 0..n {
            if s.p(i) == end.p(i) {
                continue;
            }
            cpp = cp;
            cp = s.cost;
            prev.copy_from(&s);

            let j = s.rev(end.p(i));
            let gain = delta(self.instance, &s, i, j);
            s.swap(i, j);
            s.cost -= gain;

            if s.cost < sbest.cost {
                self.s.copy_from(&s);
                self.pr_local_search();
                sbest.copy_from(&self.s);
            }

            if cpp != PURGED_COST
                && cp < cpp
                && cp < s.cost
                && (lopt.cost == PURGED_COST || cp < lopt.cost)
            {
                lopt.copy_from(&prev);
                lopt.cost = cp;
            }
        }

        if sbest.cost < end.cost {
            sbest
        } else if lopt.cost != PURGED_COST {
            lopt
        } else {
            sbest
        }
    }
}
