use crate::graph::cfg::FlowGraph;

impl FlowGraph {
    /// Renders the switch edges as a DOT `subgraph cluster_<name>`. Each edge
    /// is labelled with its case index; blocks without a switch get an edge to
    /// the cluster's end node.
    pub fn to_dot(&self, name: &str) -> String {
        let mut lines: Vec<String> = Vec::new();
        lines.push(format!("subgraph cluster_{name} {{ label=\"{name}\";"));
        lines.push(format!("{name}_nend[label=\"end\"]"));

        let mut edges: Vec<String> = Vec::new();
        for block in self.blocks() {
            let n = block.id();
            let preds = self.ledger().in_degree(n);
            lines.push(format!("{name}_n{n}[label=\"{n} ({preds})\"];"));
            match block.targets() {
                Some(targets) => {
                    for (case, t) in targets.iter().enumerate() {
                        edges.push(format!(
                            "{name}_n{n} -> {name}_n{t}[style=\"dashed\",label=\"{case}\"];"
                        ));
                    }
                }
                None => {
                    edges.push(format!("{name}_n{n} -> {name}_nend;"));
                }
            }
        }
        lines.extend(edges);
        lines.push("}".to_string());

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::cfg::FlowGraph;

    #[test]
    fn test_to_dot() {
        let graph: FlowGraph = "blocks 3\nswitch 0 1 2 1".parse().unwrap();
        let dot = graph.to_dot("cfg");
        let lines: Vec<&str> = dot.lines().collect();

        assert_eq!(lines[0], "subgraph cluster_cfg { label=\"cfg\";");
        assert!(lines.contains(&"cfg_n1[label=\"1 (2)\"];"));
        assert!(lines.contains(&"cfg_n0 -> cfg_n2[style=\"dashed\",label=\"1\"];"));
        assert!(lines.contains(&"cfg_n0 -> cfg_n1[style=\"dashed\",label=\"2\"];"));
        assert!(lines.contains(&"cfg_n2 -> cfg_nend;"));
        assert_eq!(lines.last(), Some(&"}"));
    }
}
