//! Divide and conquer on a bounded rayon pool.
//!
//! The split tree is walked recursively. At every internal node the child
//! range is halved and the halves are forked with `rayon::join`: the calling
//! worker runs one half inline while the other can be stolen. Leaves compute
//! directly.

use std::ops::Range;
use std::thread;

use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

use crate::lifecycle::{Invocation, Phase};
use crate::partition::WorkerBudget;
use crate::split_tree::{NodeId, Span, SplitTree};
use crate::workload::{catch_worker_panic, ComputeError};

/// Build a work-stealing pool of `min(T, available parallelism)` threads.
pub fn build_pool(budget: WorkerBudget) -> Result<ThreadPool, ComputeError> {
    let cores = thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get);
    let threads = budget.get().min(cores);
    ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("chunkbench-fj-{i}"))
        .build()
        .map_err(|e| ComputeError::Spawn(format!("failed to create thread pool: {e}")))
}

/// Reduce every leaf of `tree` with `leaf` and merge with `combine`.
pub fn reduce<S, T, L, C>(
    tree: &SplitTree<S>,
    budget: WorkerBudget,
    invocation: &mut Invocation<'_>,
    leaf: L,
    combine: C,
) -> Result<T, ComputeError>
where
    S: Span,
    T: Send,
    L: Fn(&S) -> T + Sync,
    C: Fn(T, T) -> T + Sync,
{
    let pool = build_pool(budget)?;
    invocation.advance(Phase::Dispatched);
    debug!(
        nodes = tree.len(),
        leaves = tree.leaf_count(),
        threads = pool.current_num_threads(),
        "fork-join reduce"
    );

    invocation.advance(Phase::Running);
    let value = catch_worker_panic(|| {
        pool.install(|| reduce_node(tree, 0, &leaf, &combine))
    })?;
    invocation.advance(Phase::Joined);
    Ok(value)
}

fn reduce_node<S, T, L, C>(tree: &SplitTree<S>, id: NodeId, leaf: &L, combine: &C) -> T
where
    S: Span,
    T: Send,
    L: Fn(&S) -> T + Sync,
    C: Fn(T, T) -> T + Sync,
{
    let node = tree.node(id);
    if node.is_leaf() {
        leaf(node.span())
    } else {
        reduce_children(tree, node.children(), leaf, combine)
    }
}

fn reduce_children<S, T, L, C>(tree: &SplitTree<S>, ids: Range<NodeId>, leaf: &L, combine: &C) -> T
where
    S: Span,
    T: Send,
    L: Fn(&S) -> T + Sync,
    C: Fn(T, T) -> T + Sync,
{
    if ids.len() == 1 {
        return reduce_node(tree, ids.start, leaf, combine);
    }
    let mid = ids.start + ids.len() / 2;
    let (lo, hi) = rayon::join(
        || reduce_children(tree, ids.start..mid, leaf, combine),
        || reduce_children(tree, mid..ids.end, leaf, combine),
    );
    combine(lo, hi)
}

/// Run `leaf` on every leaf of `tree`, handing each one its own entry of
/// `state`. `state` is indexed by depth-first leaf number.
pub fn for_each_leaf<S, P, L>(
    tree: &SplitTree<S>,
    state: &mut [P],
    budget: WorkerBudget,
    invocation: &mut Invocation<'_>,
    leaf: L,
) -> Result<(), ComputeError>
where
    S: Span,
    P: Send,
    L: Fn(&S, &mut P) + Sync,
{
    debug_assert_eq!(state.len(), tree.leaf_count());
    let pool = build_pool(budget)?;
    invocation.advance(Phase::Dispatched);
    debug!(
        nodes = tree.len(),
        leaves = tree.leaf_count(),
        threads = pool.current_num_threads(),
        "fork-join fill"
    );

    invocation.advance(Phase::Running);
    catch_worker_panic(|| pool.install(|| visit_node(tree, 0, state, &leaf)))?;
    invocation.advance(Phase::Joined);
    Ok(())
}

fn visit_node<S, P, L>(tree: &SplitTree<S>, id: NodeId, state: &mut [P], leaf: &L)
where
    S: Span,
    P: Send,
    L: Fn(&S, &mut P) + Sync,
{
    let node = tree.node(id);
    if node.is_leaf() {
        if let Some(slot) = state.first_mut() {
            leaf(node.span(), slot);
        }
    } else {
        visit_children(tree, node.children(), state, leaf);
    }
}

fn visit_children<S, P, L>(tree: &SplitTree<S>, ids: Range<NodeId>, state: &mut [P], leaf: &L)
where
    S: Span,
    P: Send,
    L: Fn(&S, &mut P) + Sync,
{
    if ids.len() == 1 {
        visit_node(tree, ids.start, state, leaf);
        return;
    }
    let mid = ids.start + ids.len() / 2;
    let split = tree.node(mid).leaves().start - tree.node(ids.start).leaves().start;
    let (lo, hi) = state.split_at_mut(split);
    rayon::join(
        || visit_children(tree, ids.start..mid, lo, leaf),
        || visit_children(tree, mid..ids.end, hi, leaf),
    );
}
