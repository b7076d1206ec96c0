use crate::error::{Result, StateViolation};
use crate::graph::ledger::PredecessorLedger;
use crate::graph::target_list::TargetList;
use crate::graph::BlockId;
use std::collections::{BTreeMap, BTreeSet};

mod cfg_mut;
pub(crate) mod cfg_parsing;

pub use cfg_mut::TargetsMut;

#[derive(Debug)]
pub struct BasicBlock {
    id: BlockId,
    targets: Option<TargetList>,
}

impl BasicBlock {
    pub fn id(&self) -> BlockId {
        self.id
    }

    /// Switch targets, if this block ends in a multi-way branch.
    pub fn targets(&self) -> Option<&TargetList> {
        self.targets.as_ref()
    }

    pub fn is_switch(&self) -> bool {
        self.targets.is_some()
    }
}

/// Arena of blocks together with the predecessor ledger their switch target
/// lists report to.
#[derive(Debug, Default)]
pub struct FlowGraph {
    blocks: Vec<BasicBlock>,
    ledger: PredecessorLedger,
}

impl FlowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Graph with `count` plain blocks, numbered from zero.
    pub fn with_blocks(count: usize) -> Self {
        let mut graph = Self::new();
        for _ in 0..count {
            graph.add_block();
        }
        graph
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn block_ids(&self) -> impl Iterator<Item = BlockId> + '_ {
        self.blocks.iter().map(|b| b.id)
    }

    pub fn blocks(&self) -> &[BasicBlock] {
        &self.blocks
    }

    pub fn block(&self, id: BlockId) -> Result<&BasicBlock> {
        self.blocks
            .get(id.index())
            .ok_or_else(|| StateViolation::UnknownBlock(id).into())
    }

    pub fn targets(&self, id: BlockId) -> Result<&TargetList> {
        self.block(id)?
            .targets()
            .ok_or_else(|| StateViolation::NoTargetList(id).into())
    }

    pub fn ledger(&self) -> &PredecessorLedger {
        &self.ledger
    }

    pub fn predecessors(&self, id: BlockId) -> Result<Vec<(BlockId, usize)>> {
        self.block(id)?;
        Ok(self.ledger.predecessors(id))
    }

    /// Recounts every switch target list and compares the result with the
    /// ledger, reporting the first disagreement in block order.
    pub fn check_consistency(&self) -> Result<()> {
        let mut listed: BTreeMap<(BlockId, BlockId), usize> = BTreeMap::new();
        for block in &self.blocks {
            for &to in block.targets().into_iter().flatten() {
                *listed.entry((block.id, to)).or_default() += 1;
            }
        }
        let recorded: BTreeMap<(BlockId, BlockId), usize> = self
            .ledger
            .edges()
            .map(|(from, to, n)| ((from, to), n))
            .collect();

        let keys: BTreeSet<&(BlockId, BlockId)> = listed.keys().chain(recorded.keys()).collect();
        for &(from, to) in keys {
            let in_lists = listed.get(&(from, to)).copied().unwrap_or(0);
            let in_ledger = recorded.get(&(from, to)).copied().unwrap_or(0);
            if in_lists != in_ledger {
                return Err(StateViolation::Inconsistent {
                    from,
                    to,
                    listed: in_lists,
                    recorded: in_ledger,
                }
                .into());
            }
        }
        Ok(())
    }
}
