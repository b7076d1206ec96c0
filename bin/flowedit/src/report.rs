// This is free and unencumbered software released into the public domain.

use flowgraph::{AppliedEdit, BlockId, FlowGraph};
use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct SwitchTargets {
    pub block: BlockId,
    pub targets: Vec<BlockId>,
}

#[derive(Serialize, Debug)]
pub struct Predecessors {
    pub block: BlockId,
    /// `(predecessor, edge count)` pairs
    pub predecessors: Vec<(BlockId, usize)>,
}

/// Everything a run did and where it left the graph.
#[derive(Serialize, Debug)]
pub struct Report<'a> {
    pub edits: &'a [AppliedEdit],
    pub switches: Vec<SwitchTargets>,
    pub predecessors: Vec<Predecessors>,
}

impl<'a> Report<'a> {
    pub fn new(graph: &FlowGraph, edits: &'a [AppliedEdit]) -> Self {
        let switches = graph
            .blocks()
            .iter()
            .filter_map(|b| {
                b.targets().map(|targets| SwitchTargets {
                    block: b.id(),
                    targets: targets.to_vec(),
                })
            })
            .collect();
        let predecessors = graph
            .block_ids()
            .map(|block| Predecessors {
                block,
                predecessors: graph.ledger().predecessors(block),
            })
            .filter(|p| !p.predecessors.is_empty())
            .collect();

        Report {
            edits,
            switches,
            predecessors,
        }
    }

    pub fn to_text(&self) -> String {
        let mut lines: Vec<String> = Vec::new();
        for applied in self.edits {
            lines.push(applied.edit.to_string());
            for note in &applied.notifications {
                lines.push(format!("  {note}"));
            }
        }
        if !self.edits.is_empty() {
            lines.push(String::new());
        }

        lines.push("switches:".to_string());
        for switch in &self.switches {
            let targets: Vec<String> = switch.targets.iter().map(|t| t.to_string()).collect();
            lines.push(format!("  {} -> [{}]", switch.block, targets.join(", ")));
        }

        lines.push("predecessors:".to_string());
        for entry in &self.predecessors {
            let preds: Vec<String> = entry
                .predecessors
                .iter()
                .map(|(p, n)| format!("{p}x{n}"))
                .collect();
            lines.push(format!("  {} <- {}", entry.block, preds.join(" ")));
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}
