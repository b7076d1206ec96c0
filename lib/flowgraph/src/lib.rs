//! Switch target lists for control-flow graphs.
//!
//! A [`TargetList`] is the ordered, duplicate-permitting set of successors of a
//! multi-way branch. Every mutation reports the edge it changed to an
//! [`EdgeObserver`], which keeps the predecessor accounting of the graph in
//! step with the list contents.

pub mod error;
pub mod graph;

pub use crate::error::{EdgeError, Result, StateViolation};
pub use crate::graph::cfg::{BasicBlock, FlowGraph, TargetsMut};
pub use crate::graph::ledger::PredecessorLedger;
pub use crate::graph::script::{AppliedEdit, Edit, Script};
pub use crate::graph::target_list::TargetList;
pub use crate::graph::{BlockId, EdgeObserver, Notification};
