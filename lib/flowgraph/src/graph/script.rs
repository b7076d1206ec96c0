use crate::error::Result;
use crate::graph::cfg::cfg_parsing::{parse_label, significant_lines};
use crate::graph::cfg::FlowGraph;
use crate::graph::{BlockId, Notification, Recorder};
use anyhow::{bail, Context};
use serde::Serialize;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// One edit of a block's switch targets.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Edit {
    Push { owner: BlockId, target: BlockId },
    Insert { owner: BlockId, index: usize, target: BlockId },
    Set { owner: BlockId, index: usize, target: BlockId },
    RemoveAt { owner: BlockId, index: usize },
    Remove { owner: BlockId, target: BlockId },
    Clear { owner: BlockId },
}

impl Edit {
    pub fn owner(&self) -> BlockId {
        match *self {
            Edit::Push { owner, .. }
            | Edit::Insert { owner, .. }
            | Edit::Set { owner, .. }
            | Edit::RemoveAt { owner, .. }
            | Edit::Remove { owner, .. }
            | Edit::Clear { owner } => owner,
        }
    }

    /// Applies the edit to `graph`, returning the synchronization calls it
    /// produced. A failed edit leaves the graph consistent.
    pub fn apply(&self, graph: &mut FlowGraph) -> Result<Vec<Notification>> {
        let (list, ledger) = graph.parts_mut(self.owner())?;
        let mut recorder = Recorder::new(ledger);
        match *self {
            Edit::Push { target, .. } => list.push(&mut recorder, target)?,
            Edit::Insert { index, target, .. } => list.insert(&mut recorder, index, target)?,
            Edit::Set { index, target, .. } => {
                list.set(&mut recorder, index, target)?;
            }
            Edit::RemoveAt { index, .. } => {
                list.remove_at(&mut recorder, index)?;
            }
            Edit::Remove { target, .. } => {
                list.remove(&mut recorder, target)?;
            }
            Edit::Clear { .. } => list.clear(&mut recorder)?,
        }
        Ok(recorder.into_log())
    }
}

impl Display for Edit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Edit::Push { owner, target } => write!(f, "push {owner} {target}"),
            Edit::Insert {
                owner,
                index,
                target,
            } => write!(f, "insert {owner} {index} {target}"),
            Edit::Set {
                owner,
                index,
                target,
            } => write!(f, "set {owner} {index} {target}"),
            Edit::RemoveAt { owner, index } => write!(f, "remove-at {owner} {index}"),
            Edit::Remove { owner, target } => write!(f, "remove {owner} {target}"),
            Edit::Clear { owner } => write!(f, "clear {owner}"),
        }
    }
}

impl FromStr for Edit {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let index = |word: &str| {
            word.parse::<usize>()
                .with_context(|| format!("invalid index `{word}'"))
        };

        let edit = match words[..] {
            ["push", owner, target] => Edit::Push {
                owner: parse_label(owner)?,
                target: parse_label(target)?,
            },
            ["insert", owner, i, target] => Edit::Insert {
                owner: parse_label(owner)?,
                index: index(i)?,
                target: parse_label(target)?,
            },
            ["set", owner, i, target] => Edit::Set {
                owner: parse_label(owner)?,
                index: index(i)?,
                target: parse_label(target)?,
            },
            ["remove-at", owner, i] => Edit::RemoveAt {
                owner: parse_label(owner)?,
                index: index(i)?,
            },
            ["remove", owner, target] => Edit::Remove {
                owner: parse_label(owner)?,
                target: parse_label(target)?,
            },
            ["clear", owner] => Edit::Clear {
                owner: parse_label(owner)?,
            },
            _ => bail!("unrecognized edit `{line}'"),
        };
        Ok(edit)
    }
}

/// Edit together with what it did to the graph.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct AppliedEdit {
    pub edit: Edit,
    pub notifications: Vec<Notification>,
}

/// Sequence of edits, one per line; blank lines and `#` comments are skipped.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Script {
    edits: Vec<Edit>,
}

impl Script {
    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    /// Runs every edit in order and stops at the first failure. Edits before
    /// the failing one stay applied.
    pub fn run(&self, graph: &mut FlowGraph) -> anyhow::Result<Vec<AppliedEdit>> {
        let mut applied = Vec::with_capacity(self.edits.len());
        for &edit in &self.edits {
            let notifications = edit
                .apply(graph)
                .with_context(|| format!("edit `{edit}' failed"))?;
            applied.push(AppliedEdit {
                edit,
                notifications,
            });
        }
        Ok(applied)
    }
}

impl FromStr for Script {
    type Err = anyhow::Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let edits = significant_lines(input)
            .map(|(number, line)| Edit::from_str(line).with_context(|| format!("line {number}")))
            .collect::<anyhow::Result<Vec<Edit>>>()?;
        Ok(Script { edits })
    }
}
