use crate::graph::BlockId;
use thiserror::Error;

pub type Result<T, E = EdgeError> = std::result::Result<T, E>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EdgeError {
    #[error("target source sequence is absent")]
    InvalidArgument,

    #[error("illegal state: {0}")]
    IllegalState(#[from] StateViolation),

    #[error("index {index} is out of range for {len} target(s)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// The ways a graph can be asked to do something its current state forbids.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateViolation {
    #[error("target list is not attached to an owning block")]
    Unattached,

    #[error("target list is already attached to block {0}")]
    AlreadyAttached(BlockId),

    #[error("block {0} is not wired into the graph")]
    UnknownBlock(BlockId),

    #[error("block {0} does not end in a switch")]
    NoTargetList(BlockId),

    #[error("no edge {from} -> {to} is recorded")]
    MissingEdge { from: BlockId, to: BlockId },

    #[error("edge {from} -> {to} occurs {listed} time(s) but {recorded} recorded")]
    Inconsistent {
        from: BlockId,
        to: BlockId,
        listed: usize,
        recorded: usize,
    },
}
