// Copyright 2016 Martin Ankerl.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! GRASP with Path-Relinking solver for the Quadratic Assignment Problem.
//!
//! Given two non-negative integer n×n matrices `flow` and `dist`, searches
//! for a permutation `p` of `0..n` minimizing
//!
//! ```text
//! C(p) = sum over i, j of dist[i][j] * flow[p[i]][p[j]]
//! ```
//!
//! The search combines a greedy randomized adaptive constructor, a
//! multi-neighborhood local search, a bounded elite pool of diverse
//! high-quality solutions, and path-relinking between pool members.
//!
//! ## Usage
//!
//! ```no_run
//! use qap_grasp_pr::{solve, Instance, Params};
//!
//! let instance = Instance::new(4, vec![0; 16], vec![0; 16])?;
//! let outcome = solve(&instance, &Params::default())?;
//! println!("best cost: {}", outcome.best_cost);
//! # Ok::<(), qap_grasp_pr::QapError>(())
//! ```
//!
//! The solver is deterministic given the same instance, parameters, and
//! seed, as long as `max_time` is left at `0` (wall-clock-driven stopping
//! breaks bit-for-bit reproducibility by design). It performs no I/O and
//! no concurrency; nothing is logged unless the caller installs a `log`
//! implementation.

mod driver;
mod elite;
mod engine;
mod error;
mod instance;
mod rng;
mod solution;
mod sort;
mod timer;

pub use driver::{solve, Outcome, Params};
pub use error::QapError;
pub use instance::Instance;
pub use solution::Solution;
