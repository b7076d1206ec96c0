use crate::error::{EdgeError, Result, StateViolation};
use crate::graph::{BlockId, EdgeObserver};
use std::ops::Index;

/// Ordered successors of a multi-way branch.
///
/// Entries are block identities, never owned blocks, and the same target may
/// occur more than once. Order is the order in which cases are matched.
///
/// Every mutating operation validates the attachment state and the index
/// before touching storage, then reports the change to the observer. When the
/// observer refuses a change the storage change is undone, so the list and the
/// observer's accounting never disagree after a call returns.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TargetList {
    owner: Option<BlockId>,
    targets: Vec<BlockId>,
}

impl TargetList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            owner: None,
            targets: Vec::with_capacity(capacity),
        }
    }

    /// Builds an unattached list from `source`, keeping its order.
    pub fn from_source<I>(source: Option<I>) -> Result<Self>
    where
        I: IntoIterator<Item = BlockId>,
    {
        let source = source.ok_or(EdgeError::InvalidArgument)?;
        Ok(source.into_iter().collect())
    }

    pub fn owner(&self) -> Option<BlockId> {
        self.owner
    }

    pub(crate) fn attach(&mut self, owner: BlockId) -> Result<()> {
        if let Some(current) = self.owner {
            return Err(StateViolation::AlreadyAttached(current).into());
        }
        self.owner = Some(owner);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.targets.capacity()
    }

    pub fn get(&self, index: usize) -> Result<BlockId> {
        self.targets
            .get(index)
            .copied()
            .ok_or(EdgeError::IndexOutOfRange {
                index,
                len: self.len(),
            })
    }

    pub fn contains(&self, target: BlockId) -> bool {
        self.targets.contains(&target)
    }

    /// Position of the first occurrence of `target`.
    pub fn index_of(&self, target: BlockId) -> Option<usize> {
        self.targets.iter().position(|&t| t == target)
    }

    /// Copies the targets, in order, into `buffer` starting at `offset`.
    pub fn copy_into(&self, buffer: &mut [BlockId], offset: usize) -> Result<()> {
        let end = offset
            .checked_add(self.len())
            .filter(|&end| end <= buffer.len())
            .ok_or(EdgeError::IndexOutOfRange {
                index: offset,
                len: buffer.len(),
            })?;
        buffer[offset..end].copy_from_slice(&self.targets);
        Ok(())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BlockId> {
        self.targets.iter()
    }

    pub fn as_slice(&self) -> &[BlockId] {
        &self.targets
    }

    pub fn to_vec(&self) -> Vec<BlockId> {
        self.targets.clone()
    }

    /// Replaces the target at `index`, returning the one it displaced.
    pub fn set<O>(&mut self, observer: &mut O, index: usize, target: BlockId) -> Result<BlockId>
    where
        O: EdgeObserver + ?Sized,
    {
        let owner = self.checked_owner()?;
        self.check_index(index, self.len())?;

        let old = std::mem::replace(&mut self.targets[index], target);
        if let Err(err) = observer.on_edge_changed(owner, Some(old), Some(target)) {
            self.targets[index] = old;
            return Err(err);
        }
        Ok(old)
    }

    pub fn insert<O>(&mut self, observer: &mut O, index: usize, target: BlockId) -> Result<()>
    where
        O: EdgeObserver + ?Sized,
    {
        let owner = self.checked_owner()?;
        // inserting at `len` appends
        self.check_index(index, self.len() + 1)?;

        self.targets.insert(index, target);
        if let Err(err) = observer.on_edge_changed(owner, None, Some(target)) {
            self.targets.remove(index);
            return Err(err);
        }
        Ok(())
    }

    pub fn remove_at<O>(&mut self, observer: &mut O, index: usize) -> Result<BlockId>
    where
        O: EdgeObserver + ?Sized,
    {
        let owner = self.checked_owner()?;
        self.check_index(index, self.len())?;

        let old = self.targets.remove(index);
        if let Err(err) = observer.on_edge_changed(owner, Some(old), None) {
            self.targets.insert(index, old);
            return Err(err);
        }
        Ok(old)
    }

    pub fn push<O>(&mut self, observer: &mut O, target: BlockId) -> Result<()>
    where
        O: EdgeObserver + ?Sized,
    {
        let owner = self.checked_owner()?;

        self.targets.push(target);
        if let Err(err) = observer.on_edge_changed(owner, None, Some(target)) {
            self.targets.pop();
            return Err(err);
        }
        Ok(())
    }

    /// Appends every target in order. Each one is its own change: a refusal
    /// stops the walk but keeps the targets accepted before it.
    pub fn extend<O, I>(&mut self, observer: &mut O, targets: I) -> Result<()>
    where
        O: EdgeObserver + ?Sized,
        I: IntoIterator<Item = BlockId>,
    {
        for target in targets {
            self.push(observer, target)?;
        }
        Ok(())
    }

    /// Removes the first occurrence of `target`. Returns whether one was found;
    /// the observer only hears about it when it was.
    pub fn remove<O>(&mut self, observer: &mut O, target: BlockId) -> Result<bool>
    where
        O: EdgeObserver + ?Sized,
    {
        self.checked_owner()?;
        match self.index_of(target) {
            Some(index) => self.remove_at(observer, index).map(|_| true),
            None => Ok(false),
        }
    }

    /// Drops every target, reporting each removal in list order.
    pub fn clear<O>(&mut self, observer: &mut O) -> Result<()>
    where
        O: EdgeObserver + ?Sized,
    {
        let owner = self.checked_owner()?;

        for done in 0..self.targets.len() {
            let old = self.targets[done];
            if let Err(err) = observer.on_edge_changed(owner, Some(old), None) {
                // removals reported so far stand
                self.targets.drain(..done);
                return Err(err);
            }
        }
        self.targets.clear();
        Ok(())
    }

    fn checked_owner(&self) -> Result<BlockId> {
        self.owner
            .ok_or(EdgeError::IllegalState(StateViolation::Unattached))
    }

    fn check_index(&self, index: usize, bound: usize) -> Result<()> {
        if index < bound {
            Ok(())
        } else {
            Err(EdgeError::IndexOutOfRange {
                index,
                len: self.len(),
            })
        }
    }
}

impl Index<usize> for TargetList {
    type Output = BlockId;

    fn index(&self, index: usize) -> &Self::Output {
        &self.targets[index]
    }
}

impl<'a> IntoIterator for &'a TargetList {
    type Item = &'a BlockId;
    type IntoIter = std::slice::Iter<'a, BlockId>;

    fn into_iter(self) -> Self::IntoIter {
        self.targets.iter()
    }
}

impl FromIterator<BlockId> for TargetList {
    fn from_iter<T: IntoIterator<Item = BlockId>>(iter: T) -> Self {
        Self {
            owner: None,
            targets: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<BlockId>> for TargetList {
    fn from(targets: Vec<BlockId>) -> Self {
        Self {
            owner: None,
            targets,
        }
    }
}
