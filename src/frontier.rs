use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use crate::maze::Cost;
use crate::maze::Position;
use crate::search::NodeId;

/// The working set of generated-but-not-yet-expanded nodes.
///
/// The discipline behind `pop` is the whole difference between the three
/// engines; everything else they share.
pub trait Frontier {
    /// Ordering key; `()` for the disciplines that only care about
    /// insertion order.
    type Rank;

    fn push(&mut self, node: NodeId, state: Position, rank: Self::Rank);
    fn pop(&mut self) -> Option<NodeId>;
    fn contains(&self, state: &Position) -> bool;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Occupancy counts backing `Frontier::contains`.
///
/// A plain set is not enough for the stack discipline, which may hold
/// several entries for one state at a time.
type StateCounts = FxHashMap<Position, u32>;

fn count_push(counts: &mut StateCounts, state: Position) {
    *counts.entry(state).or_insert(0) += 1;
}

fn count_pop(counts: &mut StateCounts, state: Position) {
    match counts.get_mut(&state) {
        Some(n) if *n > 1 => *n -= 1,
        Some(_) => {
            counts.remove(&state);
        }
        None => unreachable!("popped a state that was never pushed"),
    }
}

/// FIFO discipline: breadth-first expansion.
///
/// Under BFS's mark-at-push policy no state is ever queued twice.
#[derive(Debug, Default)]
pub struct FifoFrontier {
    queue: VecDeque<(NodeId, Position)>,
    counts: StateCounts,
}

impl FifoFrontier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for FifoFrontier {
    type Rank = ();

    fn push(&mut self, node: NodeId, state: Position, _rank: ()) {
        count_push(&mut self.counts, state);
        self.queue.push_back((node, state));
    }

    fn pop(&mut self) -> Option<NodeId> {
        let (node, state) = self.queue.pop_front()?;
        count_pop(&mut self.counts, state);
        Some(node)
    }

    fn contains(&self, state: &Position) -> bool {
        self.counts.contains_key(state)
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

/// LIFO discipline: depth-first expansion.
#[derive(Debug, Default)]
pub struct LifoFrontier {
    stack: Vec<(NodeId, Position)>,
    counts: StateCounts,
}

impl LifoFrontier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for LifoFrontier {
    type Rank = ();

    fn push(&mut self, node: NodeId, state: Position, _rank: ()) {
        count_push(&mut self.counts, state);
        self.stack.push((node, state));
    }

    fn pop(&mut self) -> Option<NodeId> {
        let (node, state) = self.stack.pop()?;
        count_pop(&mut self.counts, state);
        Some(node)
    }

    fn contains(&self, state: &Position) -> bool {
        self.counts.contains_key(state)
    }

    fn len(&self) -> usize {
        self.stack.len()
    }
}

/// The A* ranking tuple.
///
/// We prefer better f-values and tie-break for lower h. Keeping the raw h
/// around (rather than g) avoids recomputing it, and on f-ties it favours
/// the deeper node, which walks plateaus along a single shortest path.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct AStarRank {
    f: Cost,
    h: Cost,
}

impl AStarRank {
    #[must_use]
    pub fn new(g: Cost, h: Cost) -> Self {
        Self {
            f: g.saturating_add(h),
            h,
        }
    }

    pub fn f(&self) -> Cost {
        self.f
    }
}

/// `(rank, insertion sequence)`: equal ranks resolve to the earlier node,
/// never to object identity, so repeated runs pop in the same order.
#[derive(Debug)]
struct HeapEntry {
    rank: AStarRank,
    node: NodeId,
    state: Position,
}

impl HeapEntry {
    #[inline(always)]
    fn key(&self) -> (AStarRank, NodeId) {
        (self.rank, self.node)
    }
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}
impl Eq for HeapEntry {}
impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key().cmp(&other.key())
    }
}

/// Min-heap on `(f, h, insertion sequence)`.
///
/// There is no decrease-key: a better path to a queued state gets pushed as
/// a fresh entry and the stale one is skipped lazily when popped.
#[derive(Debug, Default)]
pub struct PriorityFrontier {
    heap: BinaryHeap<Reverse<HeapEntry>>,
    counts: StateCounts,
}

impl PriorityFrontier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for PriorityFrontier {
    type Rank = AStarRank;

    fn push(&mut self, node: NodeId, state: Position, rank: AStarRank) {
        count_push(&mut self.counts, state);
        self.heap.push(Reverse(HeapEntry { rank, node, state }));
    }

    fn pop(&mut self) -> Option<NodeId> {
        let Reverse(entry) = self.heap.pop()?;
        count_pop(&mut self.counts, entry.state);
        Some(entry.node)
    }

    fn contains(&self, state: &Position) -> bool {
        self.counts.contains_key(state)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchNode;
    use crate::search::SearchTree;

    fn ids(n: usize) -> Vec<NodeId> {
        let mut tree = SearchTree::new();
        (0..n)
            .map(|i| tree.push(SearchNode::root(Position::new(i as u32, 0))))
            .collect()
    }

    #[test]
    fn fifo_pops_in_insertion_order() {
        let ids = ids(3);
        let mut frontier = FifoFrontier::new();
        for (i, id) in ids.iter().enumerate() {
            frontier.push(*id, Position::new(i as u32, 0), ());
        }
        assert_eq!(frontier.len(), 3);
        assert_eq!(frontier.pop(), Some(ids[0]));
        assert_eq!(frontier.pop(), Some(ids[1]));
        assert_eq!(frontier.pop(), Some(ids[2]));
        assert_eq!(frontier.pop(), None);
        assert!(frontier.is_empty());
    }

    #[test]
    fn lifo_pops_in_reverse_insertion_order() {
        let ids = ids(3);
        let mut frontier = LifoFrontier::new();
        for (i, id) in ids.iter().enumerate() {
            frontier.push(*id, Position::new(i as u32, 0), ());
        }
        assert_eq!(frontier.pop(), Some(ids[2]));
        assert_eq!(frontier.pop(), Some(ids[1]));
        assert_eq!(frontier.pop(), Some(ids[0]));
        assert_eq!(frontier.pop(), None);
    }

    #[test]
    fn lifo_contains_survives_duplicate_entries() {
        let ids = ids(2);
        let dup = Position::new(7, 7);
        let mut frontier = LifoFrontier::new();
        frontier.push(ids[0], dup, ());
        frontier.push(ids[1], dup, ());

        assert!(frontier.contains(&dup));
        frontier.pop();
        assert!(frontier.contains(&dup));
        frontier.pop();
        assert!(!frontier.contains(&dup));
    }

    #[test]
    fn rank_orders_by_f_then_h() {
        // Same f, the lower h (deeper node) wins.
        let low = AStarRank::new(2, 0);
        let high = AStarRank::new(0, 2);
        assert_eq!(low.f(), high.f());
        assert!(low < high);

        assert!(AStarRank::new(1, 1) < AStarRank::new(2, 1));
        assert!(AStarRank::new(2, 1) == AStarRank::new(2, 1));
    }

    #[test]
    fn priority_pops_best_rank_first() {
        let ids = ids(3);
        let mut frontier = PriorityFrontier::new();
        frontier.push(ids[0], Position::new(0, 0), AStarRank::new(3, 2));
        frontier.push(ids[1], Position::new(1, 0), AStarRank::new(1, 1));
        frontier.push(ids[2], Position::new(2, 0), AStarRank::new(4, 0));

        // f-values are 5, 2, 4.
        assert_eq!(frontier.pop(), Some(ids[1]));
        assert_eq!(frontier.pop(), Some(ids[2]));
        assert_eq!(frontier.pop(), Some(ids[0]));
        assert_eq!(frontier.pop(), None);
    }

    #[test]
    fn priority_breaks_full_ties_by_insertion_sequence() {
        let ids = ids(3);
        let mut frontier = PriorityFrontier::new();
        // Push in scrambled order; identical ranks must pop by NodeId.
        frontier.push(ids[2], Position::new(2, 0), AStarRank::new(2, 3));
        frontier.push(ids[0], Position::new(0, 0), AStarRank::new(2, 3));
        frontier.push(ids[1], Position::new(1, 0), AStarRank::new(2, 3));

        assert_eq!(frontier.pop(), Some(ids[0]));
        assert_eq!(frontier.pop(), Some(ids[1]));
        assert_eq!(frontier.pop(), Some(ids[2]));
    }

    #[test]
    fn priority_tolerates_stale_entries() {
        // The same state queued twice, the improved entry first.
        let ids = ids(2);
        let state = Position::new(5, 5);
        let mut frontier = PriorityFrontier::new();
        frontier.push(ids[0], state, AStarRank::new(4, 2));
        frontier.push(ids[1], state, AStarRank::new(2, 2));

        assert_eq!(frontier.pop(), Some(ids[1]));
        assert!(frontier.contains(&state));
        assert_eq!(frontier.pop(), Some(ids[0]));
        assert!(!frontier.contains(&state));
    }
}
