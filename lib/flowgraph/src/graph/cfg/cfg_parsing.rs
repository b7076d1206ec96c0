use crate::graph::cfg::FlowGraph;
use crate::graph::target_list::TargetList;
use crate::graph::BlockId;
use anyhow::{bail, ensure, format_err, Context};
use std::str::FromStr;

/// Upper bound on the `blocks` count a description may declare.
pub const MAX_BLOCKS: usize = 1 << 20;

/// Yields the meaningful lines of `input` with their 1-based line numbers,
/// dropping blank lines and `#` comments.
pub(crate) fn significant_lines(input: &str) -> impl Iterator<Item = (usize, &str)> {
    input.lines().enumerate().filter_map(|(i, line)| {
        let line = line.split('#').next().unwrap_or_default().trim();
        (!line.is_empty()).then(|| (i + 1, line))
    })
}

pub(crate) fn parse_label(word: &str) -> anyhow::Result<BlockId> {
    BlockId::from_str(word).with_context(|| format!("invalid block label `{word}'"))
}

/// Parses a graph description:
///
/// ```text
/// blocks 4
/// switch 0 1 2 1
/// ```
///
/// `blocks` comes first and declares blocks `0..n`; each `switch` line ends
/// one of them in a switch over the listed targets.
impl FromStr for FlowGraph {
    type Err = anyhow::Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut lines = significant_lines(input);

        let (_, header) = lines
            .next()
            .ok_or_else(|| format_err!("graph description is empty"))?;
        let count = match header.split_whitespace().collect::<Vec<_>>()[..] {
            ["blocks", count] => count
                .parse::<usize>()
                .with_context(|| format!("invalid block count `{count}'"))?,
            _ => bail!("graph description should start with `blocks <count>'"),
        };
        ensure!(
            count <= MAX_BLOCKS,
            "block count {count} exceeds the limit of {MAX_BLOCKS}"
        );

        let mut graph = FlowGraph::with_blocks(count);
        for (number, line) in lines {
            let mut words = line.split_whitespace();
            let keyword = words.next().unwrap_or_default();
            ensure!(
                keyword == "switch",
                "line {number}: unknown directive `{keyword}'"
            );
            let owner = words
                .next()
                .ok_or_else(|| format_err!("line {number}: switch without a block"))
                .and_then(parse_label)?;
            let targets = words
                .map(parse_label)
                .collect::<anyhow::Result<TargetList>>()
                .with_context(|| format!("line {number}"))?;
            graph
                .attach_switch(owner, targets)
                .with_context(|| format!("line {number}"))?;
        }

        Ok(graph)
    }
}
