//! The GRASP engine (component C6): constructor, local searches, and
//! running-best tracking, all sharing one block of scratch state.

mod constructor;
mod local_search;
mod path_relink;

pub use local_search::delta;

use log::debug;

use crate::driver::Params;
use crate::instance::Instance;
use crate::rng::Rng;
use crate::solution::Solution;
use crate::sort::Pair;
use crate::timer::Timer;

/// Owns the current working solution, the running best, and every scratch
/// buffer the constructor and local searches need, so none of them
/// allocate per call. Holds its own [`Rng`] and [`Timer`] rather than
/// relying on any process-wide state.
pub struct Engine<'a> {
    pub(crate) instance: &'a Instance,
    pub(crate) s: Solution,
    pub(crate) best: Solution,
    pub(crate) rng: Rng,
    timer: Timer,
    pub(crate) params: Params,
    pub(crate) curr_iter: u32,
    pub(crate) last_improv_iter: u32,

    // constructor scratch
    pub(crate) assigned: Vec<usize>,
    pub(crate) n_assigned: usize,
    pub(crate) done: Vec<bool>,
    pub(crate) ldone: Vec<bool>,
    pub(crate) f_scratch: Vec<Pair>,
    pub(crate) d_scratch: Vec<Pair>,
}

impl<'a> Engine<'a> {
    pub fn new(instance: &'a Instance, params: Params) -> Self {
        let n = instance.n();
        let rng = Rng::new(params.seed);
        Engine {
            instance,
            s: Solution::new(n),
            best: Solution::new(n),
            rng,
            timer: Timer::start(),
            params,
            curr_iter: 0,
            last_improv_iter: 0,
            assigned: vec![0; n],
            n_assigned: 0,
            done: vec![false; n],
            ldone: vec![false; n],
            f_scratch: Vec::with_capacity(n * n - n + 1),
            d_scratch: Vec::with_capacity(n * n - n + 1),
        }
    }

    /// `true` once `max_time` (if nonzero) has elapsed.
    pub fn time_exceeded(&self) -> bool {
        self.params.max_time > 0 && self.timer.elapsed_secs() >= self.params.max_time
    }

    /// Copies `s` into `best` if it improves on it, and records the
    /// iteration at which the improvement happened.
    pub fn update_best(&mut self) {
        if self.s.cost < self.best.cost {
            self.best.copy_from(&self.s);
            self.last_improv_iter = self.curr_iter;
            debug!(
                "new best cost={} at iter={}",
                self.best.cost, self.curr_iter
            );
        }
    }
}
