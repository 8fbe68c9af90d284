//! Top-level driver (component C8): owns the engine and the elite pool,
//! runs the main GRASP loop, and exposes the crate's one public entry
//! point.

use log::debug;

use crate::elite::Pool;
use crate::engine::Engine;
use crate::error::QapError;
use crate::instance::Instance;
use crate::solution::Solution;

/// Tunable parameters for [`solve`]. `Default` matches the values used
/// throughout the concrete test scenarios: `alpha = 0.25`, `beta = 0.5`,
/// `max_itr = 100`, `look4 = -1` (disabled), `elite_size = 10`,
/// `max_time = 0` (disabled), `seed = 270001`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Params {
    pub alpha: f64,
    pub beta: f64,
    pub elite_size: usize,
    pub max_itr: u32,
    pub look4: i64,
    pub max_time: u64,
    pub seed: u64,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            alpha: 0.25,
            beta: 0.5,
            elite_size: 10,
            max_itr: 100,
            look4: -1,
            max_time: 0,
            seed: 270_001,
        }
    }
}

/// The result of a [`solve`] run.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub best_cost: i64,
    pub best_perm: Vec<usize>,
    pub iterations: u32,
}

/// Runs GRASP with path-relinking on `instance` and returns the best
/// permutation found.
///
/// Starts from the identity permutation (never a random one, so the
/// result is never worse than the caller's existing layout) and runs at
/// most `params.max_itr` iterations, stopping early if `params.look4` is
/// reached or `params.max_time` seconds elapse. Determinism holds for
/// identical inputs whenever `params.max_time == 0`.
pub fn solve(instance: &Instance, params: &Params) -> Result<Outcome, QapError> {
    if instance.n() < 2 {
        return Err(QapError::InvalidDimension { n: instance.n() });
    }

    let mut engine = Engine::new(instance, *params);
    let mut pool = Pool::new(params.elite_size, instance.n());

    engine.best.recompute_objective(instance);
    engine.s.recompute_objective(instance);

    while engine.curr_iter < params.max_itr {
        engine.curr_iter += 1;

        if params.look4 >= 0 && params.look4 < engine.best.cost {
            debug!("target cost {} reached at iter {}", params.look4, engine.curr_iter);
            break;
        }
        if engine.time_exceeded() {
            debug!("max_time exceeded at iter {}", engine.curr_iter);
            break;
        }

        engine.construct();
        engine.extra_ls();
        pr_run(&mut engine, &mut pool);
        pr_rev_run(&mut engine, &mut pool);
        pr_update(&mut engine, &mut pool);
        engine.update_best();
    }

    pr_post_optimization(&mut engine, &mut pool);
    engine.update_best();

    debug!(
        "solve finished: best_cost={} iterations={}",
        engine.best.cost, engine.curr_iter
    );

    Ok(Outcome {
        best_cost: engine.best.cost,
        best_perm: engine.best.perm().to_vec(),
        iterations: engine.curr_iter,
    })
}

/// Forward path-relinking: grows the pool while it has room (rejecting
/// near-duplicates), or relinks the current solution toward a sampled
/// guide once the pool is full.
fn pr_run(engine: &mut Engine, pool: &mut Pool) {
    if !pool.is_full() {
        if pool.is_diverse_enough(&engine.s) {
            pool.insert(&engine.s);
        }
        return;
    }
    let guide = pool.guiding_index(&engine.s, &mut engine.rng);
    let guide_sol = pool.get(guide).clone();
    let current = engine.s.clone();
    let result = engine.execute_pr(&current, &guide_sol);
    engine.s.copy_from(&result);
}

/// Reverse path-relinking: only runs once the pool is full, relinking
/// from a sampled guide toward the current solution.
fn pr_rev_run(engine: &mut Engine, pool: &mut Pool) {
    if !pool.is_full() {
        return;
    }
    let guide = pool.guiding_index(&engine.s, &mut engine.rng);
    let guide_sol = pool.get(guide).clone();
    let current = engine.s.clone();
    let result = engine.execute_pr(&guide_sol, &current);
    engine.s.copy_from(&result);
}

fn pr_update(engine: &mut Engine, pool: &mut Pool) {
    pool.update(
        &engine.s,
        engine.curr_iter,
        &mut engine.last_improv_iter,
        &mut engine.rng,
    );
}

/// Runs after the main loop to guarantee local optimality among the
/// elite pool's members: repeatedly relinks every ordered pair, feeding
/// the results back into the (emptied) pool, until a full sweep produces
/// no further improvement to `engine.best`.
fn pr_post_optimization(engine: &mut Engine, pool: &mut Pool) {
    if !pool.is_full() {
        return;
    }
    let capacity = pool.capacity();
    let mut changed = true;
    while changed {
        changed = false;
        let snapshot: Vec<_> = (0..capacity).map(|i| pool.get(i).clone()).collect();
        *pool = Pool::new(capacity, engine.instance.n());
        let cost_before = engine.best.cost;

        for i in 0..capacity {
            for j in 0..capacity {
                if i == j {
                    continue;
                }
                relink_and_admit(engine, pool, &snapshot[i], &snapshot[j]);
                relink_and_admit(engine, pool, &snapshot[j], &snapshot[i]);
            }
        }

        if engine.best.cost < cost_before {
            changed = true;
        }
    }
}

fn relink_and_admit(engine: &mut Engine, pool: &mut Pool, from: &Solution, to: &Solution) {
    let result = engine.execute_pr(from, to);
    if !pool.is_full() {
        pool.insert(&result);
    } else {
        pool.update(&result, engine.curr_iter, &mut engine.last_improv_iter, &mut engine.rng);
    }
    engine.s.copy_from(&result);
    engine.update_best();
}
