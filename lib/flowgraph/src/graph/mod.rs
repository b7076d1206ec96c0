use crate::error::Result;
use serde::Serialize;
use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;

pub mod cfg;
pub mod dot_debug;
pub mod ledger;
pub mod script;
pub mod target_list;

/// Stable index of a block inside a [`cfg::FlowGraph`].
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash, Serialize)]
#[serde(transparent)]
pub struct BlockId(pub usize);

impl BlockId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl Debug for BlockId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "N{}", self.0)
    }
}

impl Display for BlockId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BlockId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.parse::<usize>().map(BlockId)
    }
}

/// Receives every edge change made through a [`target_list::TargetList`].
///
/// `old` is the target that lost an edge from `owner`, `new` the one that
/// gained it; `None` stands for "no edge" on that side. Implementations fail
/// with [`crate::StateViolation`] when `owner` is not part of the structure
/// they track.
pub trait EdgeObserver {
    fn on_edge_changed(
        &mut self,
        owner: BlockId,
        old: Option<BlockId>,
        new: Option<BlockId>,
    ) -> Result<()>;
}

impl<O: EdgeObserver + ?Sized> EdgeObserver for &mut O {
    fn on_edge_changed(
        &mut self,
        owner: BlockId,
        old: Option<BlockId>,
        new: Option<BlockId>,
    ) -> Result<()> {
        (**self).on_edge_changed(owner, old, new)
    }
}

/// One synchronization call, as seen by an observer.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize)]
pub struct Notification {
    pub owner: BlockId,
    pub old: Option<BlockId>,
    pub new: Option<BlockId>,
}

impl Notification {
    pub fn new(owner: BlockId, old: Option<BlockId>, new: Option<BlockId>) -> Self {
        Self { owner, old, new }
    }
}

impl Display for Notification {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let side = |b: Option<BlockId>| b.map_or_else(|| "none".to_string(), |b| b.to_string());
        write!(f, "{}: ({}, {})", self.owner, side(self.old), side(self.new))
    }
}

/// Forwards to an inner observer and keeps every call that it accepted.
pub struct Recorder<O> {
    inner: O,
    log: Vec<Notification>,
}

impl<O: EdgeObserver> Recorder<O> {
    pub fn new(inner: O) -> Self {
        Self {
            inner,
            log: Vec::new(),
        }
    }

    pub fn into_log(self) -> Vec<Notification> {
        self.log
    }
}

impl<O: EdgeObserver> EdgeObserver for Recorder<O> {
    fn on_edge_changed(
        &mut self,
        owner: BlockId,
        old: Option<BlockId>,
        new: Option<BlockId>,
    ) -> Result<()> {
        self.inner.on_edge_changed(owner, old, new)?;
        self.log.push(Notification::new(owner, old, new));
        Ok(())
    }
}
