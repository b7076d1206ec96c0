use crate::error::{Result, StateViolation};
use crate::graph::{BlockId, EdgeObserver};
use std::collections::HashMap;
use std::iter::once;
use tracing::trace;

/// Reverse-edge bookkeeping: for every registered block, how many edges each
/// predecessor has into it.
#[derive(Clone, Debug, Default)]
pub struct PredecessorLedger {
    in_edges: HashMap<BlockId, HashMap<BlockId, usize>>,
}

impl PredecessorLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wires `block` into the ledger. Registering twice is harmless.
    pub fn register(&mut self, block: BlockId) {
        self.in_edges.entry(block).or_default();
    }

    pub fn is_registered(&self, block: BlockId) -> bool {
        self.in_edges.contains_key(&block)
    }

    pub fn multiplicity(&self, target: BlockId, predecessor: BlockId) -> usize {
        self.in_edges
            .get(&target)
            .and_then(|preds| preds.get(&predecessor))
            .copied()
            .unwrap_or(0)
    }

    /// Predecessors of `target` with their edge counts, ordered by block.
    pub fn predecessors(&self, target: BlockId) -> Vec<(BlockId, usize)> {
        let mut preds: Vec<(BlockId, usize)> = self
            .in_edges
            .get(&target)
            .into_iter()
            .flat_map(|preds| preds.iter().map(|(&p, &n)| (p, n)))
            .collect();
        preds.sort_unstable();
        preds
    }

    pub fn in_degree(&self, target: BlockId) -> usize {
        self.in_edges
            .get(&target)
            .map_or(0, |preds| preds.values().sum())
    }

    /// Every recorded edge as `(from, to, multiplicity)`.
    pub fn edges(&self) -> impl Iterator<Item = (BlockId, BlockId, usize)> + '_ {
        self.in_edges
            .iter()
            .flat_map(|(&to, preds)| preds.iter().map(move |(&from, &n)| (from, to, n)))
    }

    fn ensure_registered(&self, block: BlockId) -> Result<()> {
        if self.is_registered(block) {
            Ok(())
        } else {
            Err(StateViolation::UnknownBlock(block).into())
        }
    }
}

impl EdgeObserver for PredecessorLedger {
    fn on_edge_changed(
        &mut self,
        owner: BlockId,
        old: Option<BlockId>,
        new: Option<BlockId>,
    ) -> Result<()> {
        for block in once(owner).chain(old).chain(new) {
            self.ensure_registered(block)?;
        }

        if let Some(old) = old {
            let preds = self.in_edges.entry(old).or_default();
            match preds.get(&owner).copied().unwrap_or(0) {
                0 => {
                    return Err(StateViolation::MissingEdge {
                        from: owner,
                        to: old,
                    }
                    .into())
                }
                1 => {
                    preds.remove(&owner);
                }
                n => {
                    preds.insert(owner, n - 1);
                }
            }
        }
        if let Some(new) = new {
            *self.in_edges.entry(new).or_default().entry(owner).or_default() += 1;
        }

        trace!(%owner, ?old, ?new, "edge changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EdgeError;

    fn ledger(blocks: usize) -> PredecessorLedger {
        let mut ledger = PredecessorLedger::new();
        for b in 0..blocks {
            ledger.register(BlockId(b));
        }
        ledger
    }

    #[test]
    fn test_counts_follow_changes() {
        let (a, b, c) = (BlockId(0), BlockId(1), BlockId(2));
        let mut ledger = ledger(3);

        ledger.on_edge_changed(a, None, Some(b)).unwrap();
        ledger.on_edge_changed(a, None, Some(b)).unwrap();
        ledger.on_edge_changed(c, None, Some(b)).unwrap();
        assert_eq!(ledger.multiplicity(b, a), 2);
        assert_eq!(ledger.predecessors(b), vec![(a, 2), (c, 1)]);
        assert_eq!(ledger.in_degree(b), 3);

        ledger.on_edge_changed(a, Some(b), Some(c)).unwrap();
        assert_eq!(ledger.multiplicity(b, a), 1);
        assert_eq!(ledger.multiplicity(c, a), 1);

        ledger.on_edge_changed(a, Some(b), None).unwrap();
        assert_eq!(ledger.predecessors(b), vec![(c, 1)]);
        assert_eq!(ledger.in_degree(a), 0);
    }

    #[test]
    fn test_replace_with_same_target() {
        let (a, b) = (BlockId(0), BlockId(1));
        let mut ledger = ledger(2);

        ledger.on_edge_changed(a, None, Some(b)).unwrap();
        ledger.on_edge_changed(a, Some(b), Some(b)).unwrap();
        assert_eq!(ledger.multiplicity(b, a), 1);
    }

    #[test]
    fn test_unknown_blocks_are_rejected_untouched() {
        let (a, b, stray) = (BlockId(0), BlockId(1), BlockId(9));
        let mut ledger = ledger(2);
        ledger.on_edge_changed(a, None, Some(b)).unwrap();

        assert_eq!(
            ledger.on_edge_changed(stray, None, Some(b)),
            Err(EdgeError::IllegalState(StateViolation::UnknownBlock(stray)))
        );
        assert_eq!(
            ledger.on_edge_changed(a, Some(b), Some(stray)),
            Err(EdgeError::IllegalState(StateViolation::UnknownBlock(stray)))
        );
        assert_eq!(ledger.multiplicity(b, a), 1);
    }

    #[test]
    fn test_missing_edge() {
        let (a, b) = (BlockId(0), BlockId(1));
        let mut ledger = ledger(2);

        assert_eq!(
            ledger.on_edge_changed(a, Some(b), Some(a)),
            Err(EdgeError::IllegalState(StateViolation::MissingEdge {
                from: a,
                to: b
            }))
        );
        assert_eq!(ledger.in_degree(a), 0);
    }
}
