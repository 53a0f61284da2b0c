// src/analytics/fanout.rs
//! Fan-out of independent lookups with a join-then-merge union.
//!
//! Workers pull target indices from a shared injector and keep their own
//! outcome lists. Nothing is merged until every worker has joined, so no
//! accumulator is ever shared between threads.

use crate::constants::MAX_LOOKUP_WORKERS;
use crate::error::AppError;
use crossbeam::deque::{Injector, Steal};
use std::collections::BTreeSet;
use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

type Outcome<R> = (usize, Result<BTreeSet<R>, AppError>);

/// Treats a conflict (e.g. an empty repository) as an empty contribution.
fn absorb_conflict<T: Display, R>(
    target: &T,
    result: Result<BTreeSet<R>, AppError>,
) -> Result<BTreeSet<R>, AppError> {
    match result {
        Err(e) if e.is_conflict() => {
            log::info!("Skipping {}: {}", target, e);
            Ok(BTreeSet::new())
        }
        other => other,
    }
}

/// Runs `lookup` for every target and unions the results.
///
/// With `workers` unset or zero the lookups run sequentially in target order
/// and stop at the first fatal error. Otherwise up to
/// `min(workers, targets, MAX_LOOKUP_WORKERS)` threads share the targets;
/// once a fatal error is seen no new lookups start, the pool still joins,
/// and the first fatal error in target order is returned.
///
/// A lookup failing with a conflict contributes nothing. Any other failure
/// aborts the aggregation without a partial result.
pub fn aggregate<T, R, F>(
    targets: &[T],
    lookup: F,
    workers: Option<usize>,
) -> Result<BTreeSet<R>, AppError>
where
    T: Display + Sync,
    R: Ord + Send,
    F: Fn(&T) -> Result<BTreeSet<R>, AppError> + Sync,
{
    let pool_size = workers
        .unwrap_or(0)
        .min(targets.len())
        .min(MAX_LOOKUP_WORKERS);

    if pool_size == 0 {
        return aggregate_sequential(targets, lookup);
    }

    log::debug!("Fanning out {} lookups over {} workers", targets.len(), pool_size);

    let queue = Injector::new();
    for index in 0..targets.len() {
        queue.push(index);
    }
    let halted = AtomicBool::new(false);
    let (lookup, queue, halted) = (&lookup, &queue, &halted);

    // Every handle is joined before any panic is reported; an unjoined
    // panicked thread would make the scope itself panic.
    let joined: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..pool_size)
            .map(|_| scope.spawn(move || run_worker(targets, lookup, queue, halted)))
            .collect();
        handles.into_iter().map(|handle| handle.join()).collect()
    });

    let mut outcomes = Vec::with_capacity(targets.len());
    let mut panicked = 0;
    for worker in joined {
        match worker {
            Ok(mut found) => outcomes.append(&mut found),
            Err(_) => panicked += 1,
        }
    }
    if panicked > 0 {
        return Err(AppError::InternalError {
            message: format!("{} of {} lookup workers panicked", panicked, pool_size),
        });
    }

    merge(outcomes)
}

fn aggregate_sequential<T, R, F>(targets: &[T], lookup: F) -> Result<BTreeSet<R>, AppError>
where
    T: Display,
    R: Ord,
    F: Fn(&T) -> Result<BTreeSet<R>, AppError>,
{
    let mut merged = BTreeSet::new();
    for target in targets {
        let mut found = absorb_conflict(target, lookup(target))?;
        merged.append(&mut found);
    }
    Ok(merged)
}

fn run_worker<T, R, F>(
    targets: &[T],
    lookup: &F,
    queue: &Injector<usize>,
    halted: &AtomicBool,
) -> Vec<Outcome<R>>
where
    T: Display,
    F: Fn(&T) -> Result<BTreeSet<R>, AppError>,
{
    let mut outcomes = Vec::new();
    while !halted.load(Ordering::Acquire) {
        let index = match queue.steal() {
            Steal::Success(index) => index,
            Steal::Retry => continue,
            Steal::Empty => break,
        };
        let target = &targets[index];
        let result = absorb_conflict(target, lookup(target));
        if let Err(e) = &result {
            log::debug!("Lookup for {} failed, halting fan-out: {}", target, e);
            halted.store(true, Ordering::Release);
        }
        outcomes.push((index, result));
    }
    outcomes
}

/// Unions successful outcomes, or returns the lowest-index failure.
fn merge<R: Ord>(mut outcomes: Vec<Outcome<R>>) -> Result<BTreeSet<R>, AppError> {
    outcomes.sort_by_key(|(index, _)| *index);
    let mut merged = BTreeSet::new();
    for (_, result) in outcomes {
        let mut found = result?;
        merged.append(&mut found);
    }
    Ok(merged)
}
