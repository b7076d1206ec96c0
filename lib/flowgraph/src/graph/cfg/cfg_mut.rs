use crate::error::{Result, StateViolation};
use crate::graph::cfg::{BasicBlock, FlowGraph};
use crate::graph::ledger::PredecessorLedger;
use crate::graph::target_list::TargetList;
use crate::graph::{BlockId, EdgeObserver};
use std::ops::Deref;

impl FlowGraph {
    pub fn add_block(&mut self) -> BlockId {
        let id = BlockId(self.blocks.len());
        self.blocks.push(BasicBlock { id, targets: None });
        self.ledger.register(id);
        id
    }

    /// Adds a block that ends in a switch over `targets`.
    pub fn add_switch(&mut self, targets: TargetList) -> Result<BlockId> {
        if let Some(owner) = targets.owner() {
            return Err(StateViolation::AlreadyAttached(owner).into());
        }
        let id = self.add_block();
        self.attach_switch(id, targets)?;
        Ok(id)
    }

    /// Completes block `id` with a switch over `targets`: the list is attached
    /// to the block and each target it already holds is recorded, in order.
    ///
    /// Every target has to be a block of this graph; nothing changes otherwise.
    pub fn attach_switch(&mut self, id: BlockId, mut targets: TargetList) -> Result<()> {
        let block = self.block(id)?;
        if block.is_switch() {
            return Err(StateViolation::AlreadyAttached(id).into());
        }
        if let Some(&stray) = targets.iter().find(|&&t| !self.ledger.is_registered(t)) {
            return Err(StateViolation::UnknownBlock(stray).into());
        }

        targets.attach(id)?;
        for &target in &targets {
            self.ledger.on_edge_changed(id, None, Some(target))?;
        }
        self.blocks[id.index()].targets = Some(targets);
        Ok(())
    }

    pub fn targets_mut(&mut self, id: BlockId) -> Result<TargetsMut<'_>> {
        let (list, ledger) = self.parts_mut(id)?;
        Ok(TargetsMut { list, ledger })
    }

    /// Splits out block `id`'s target list and the ledger it reports to.
    pub(crate) fn parts_mut(
        &mut self,
        id: BlockId,
    ) -> Result<(&mut TargetList, &mut PredecessorLedger)> {
        let block = self
            .blocks
            .get_mut(id.index())
            .ok_or(StateViolation::UnknownBlock(id))?;
        let list = block
            .targets
            .as_mut()
            .ok_or(StateViolation::NoTargetList(id))?;
        Ok((list, &mut self.ledger))
    }
}

/// Mutable view of one block's switch targets that reports every change to
/// the graph's ledger. Reads go through [`Deref`] to the [`TargetList`].
pub struct TargetsMut<'g> {
    list: &'g mut TargetList,
    ledger: &'g mut PredecessorLedger,
}

impl<'g> TargetsMut<'g> {
    pub fn set(&mut self, index: usize, target: BlockId) -> Result<BlockId> {
        self.list.set(self.ledger, index, target)
    }

    pub fn insert(&mut self, index: usize, target: BlockId) -> Result<()> {
        self.list.insert(self.ledger, index, target)
    }

    pub fn remove_at(&mut self, index: usize) -> Result<BlockId> {
        self.list.remove_at(self.ledger, index)
    }

    pub fn push(&mut self, target: BlockId) -> Result<()> {
        self.list.push(self.ledger, target)
    }

    pub fn extend<I: IntoIterator<Item = BlockId>>(&mut self, targets: I) -> Result<()> {
        self.list.extend(self.ledger, targets)
    }

    pub fn remove(&mut self, target: BlockId) -> Result<bool> {
        self.list.remove(self.ledger, target)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.list.clear(self.ledger)
    }
}

impl<'g> Deref for TargetsMut<'g> {
    type Target = TargetList;

    fn deref(&self) -> &Self::Target {
        self.list
    }
}
