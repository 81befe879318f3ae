//! Logic levels and aggregate statistics.
//!
//! Inputs and latches sit at level 0; latches are treated as sequential boundaries and their feedback is not
//! unrolled. An AND gate is one level above its deepest fan-in, and an output simply reports the level of its
//! driver. Every AND gate references only smaller variables, so a single pass in variable order visits each
//! gate after all of its fan-ins and no recursion is needed, however deep the circuit.

use std::collections::BTreeMap;
use std::fmt;

use itertools::Itertools;

use crate::aig::{Aig, NodeId};

/// The level of every node of a graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Levels {
    nodes: Vec<u32>,
    outputs: Vec<u32>,
}

impl Levels {
    /// Level of a node, or `None` if no node owns `id`. The constant is at level 0.
    #[must_use]
    pub fn level(&self, id: NodeId) -> Option<u32> {
        self.nodes.get(id.index()).copied()
    }

    /// Level of the `index`-th output.
    #[must_use]
    pub fn output_level(&self, index: usize) -> Option<u32> {
        self.outputs.get(index).copied()
    }

    /// Deepest level reached by any node or output.
    #[must_use]
    pub fn max_level(&self) -> u32 {
        self.nodes.iter().chain(&self.outputs).copied().max().unwrap_or(0)
    }
}

/// Computes the level of every node and output of `aig`.
#[must_use]
pub fn compute_levels(aig: &Aig) -> Levels {
    let mut nodes = vec![0_u32; 1 + aig.inputs.len() + aig.latches.len() + aig.and_gates.len()];

    for gate in &aig.and_gates {
        let [x, y] = gate.fanin;
        nodes[gate.id.index()] = 1 + nodes[x.node.index()].max(nodes[y.node.index()]);
    }

    let outputs = aig.outputs.iter().map(|output| nodes[output.driver.node.index()]).collect::<Vec<_>>();

    Levels { nodes, outputs }
}

/// Counts and level profile of a graph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    /// Number of inputs.
    pub inputs: usize,
    /// Number of outputs.
    pub outputs: usize,
    /// Number of latches.
    pub latches: usize,
    /// Number of AND gates.
    pub and_gates: usize,
    /// Deepest level of any AND gate or output.
    pub max_level: u32,
    /// Number of nodes at each level.
    ///
    /// Level 0 holds the inputs and latches; every other level counts AND gates only, so the values sum to
    /// `inputs + latches + and_gates`.
    pub level_distribution: BTreeMap<u32, usize>,
}

/// Computes the statistics of a linked graph.
#[must_use]
pub fn compute_stats(aig: &Aig) -> Stats {
    let levels = compute_levels(aig);
    let mut level_distribution = BTreeMap::new();

    let sources = aig.inputs.len() + aig.latches.len();
    if sources > 0 {
        level_distribution.insert(0, sources);
    }

    let mut max_level = 0_u32;
    for gate in &aig.and_gates {
        let level = levels.nodes[gate.id.index()];
        *level_distribution.entry(level).or_insert(0) += 1;
        max_level = max_level.max(level);
    }
    for &level in &levels.outputs {
        max_level = max_level.max(level);
    }

    log::debug!("max level {} over {} AND gates", max_level, aig.and_gates.len());

    Stats {
        inputs: aig.inputs.len(),
        outputs: aig.outputs.len(),
        latches: aig.latches.len(),
        and_gates: aig.and_gates.len(),
        max_level,
        level_distribution,
    }
}

impl fmt::Display for Stats {
    /// The alternate form (`{:#}`) appends the level distribution.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "I / O      = {} / {}", self.inputs, self.outputs)?;
        writeln!(f, "Latches    = {}", self.latches)?;
        writeln!(f, "AND        = {}", self.and_gates)?;
        writeln!(f, "Level      = {}", self.max_level)?;

        if f.alternate() {
            let width = self.max_level.to_string().len();
            let rows = self
                .level_distribution
                .iter()
                .map(|(level, count)| format!("  {:>width$} : {}", level, count, width = width))
                .join("\n");
            writeln!(f, "Levels:")?;
            writeln!(f, "{}", rows)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{compute_levels, compute_stats};
    use crate::aig::NodeId;
    use crate::{decode, link};

    #[test]
    fn single_gate() {
        let aig = link(decode(&b"aig 3 2 0 1 1\n6\n\x02\x02"[..]).unwrap()).unwrap();
        let stats = compute_stats(&aig);

        assert_eq!(stats.max_level, 1);
        assert_eq!(stats.level_distribution.get(&0), Some(&2));
        assert_eq!(stats.level_distribution.get(&1), Some(&1));
        assert_eq!(stats.level_distribution.len(), 2);
    }

    #[test]
    fn shared_fanin_is_counted_once() {
        // 3 = 1 & 2, 4 = 3 & 1, 5 = 4 & 3
        let aig = link(decode(&b"aig 5 2 0 1 3\n10\n\x02\x02\x02\x04\x02\x02"[..]).unwrap()).unwrap();
        let levels = compute_levels(&aig);

        assert_eq!(levels.level(NodeId::new(3)), Some(1));
        assert_eq!(levels.level(NodeId::new(4)), Some(2));
        assert_eq!(levels.level(NodeId::new(5)), Some(3));
        assert_eq!(levels.output_level(0), Some(3));
        assert_eq!(levels.max_level(), 3);
        assert_eq!(levels.level(NodeId::new(6)), None);

        let stats = compute_stats(&aig);
        assert_eq!(stats.and_gates, 3);
        assert_eq!(stats.level_distribution.values().sum::<usize>(), 2 + 3);
    }

    #[test]
    fn latches_are_level_zero() {
        let aig = link(decode(&b"aig 3 1 1 1 1\n7\n6\n\x02\x02"[..]).unwrap()).unwrap();
        let levels = compute_levels(&aig);

        assert_eq!(levels.level(NodeId::new(2)), Some(0));
        assert_eq!(levels.level(NodeId::new(3)), Some(1));

        let stats = compute_stats(&aig);
        assert_eq!(stats.level_distribution.get(&0), Some(&2));
    }

    #[test]
    fn constant_outputs() {
        let aig = link(decode(&b"aig 1 1 0 2 0\n0\n1\n"[..]).unwrap()).unwrap();
        let stats = compute_stats(&aig);

        assert_eq!(stats.max_level, 0);
        assert_eq!(compute_levels(&aig).output_level(1), Some(0));
        assert_eq!(stats.level_distribution.get(&0), Some(&1));
    }

    #[test]
    fn empty_graph() {
        let aig = link(decode(&b"aig 0 0 0 0 0\n"[..]).unwrap()).unwrap();
        let stats = compute_stats(&aig);

        assert_eq!(stats.max_level, 0);
        assert!(stats.level_distribution.is_empty());
    }

    #[test]
    fn display() {
        let aig = link(decode(&b"aig 3 2 0 1 1\n6\n\x02\x02"[..]).unwrap()).unwrap();
        let stats = compute_stats(&aig);

        assert_eq!(
            stats.to_string(),
            "I / O      = 2 / 1\nLatches    = 0\nAND        = 1\nLevel      = 1\n"
        );
        assert_eq!(
            format!("{:#}", stats),
            "I / O      = 2 / 1\nLatches    = 0\nAND        = 1\nLevel      = 1\nLevels:\n  0 : 2\n  1 : 1\n"
        );
    }
}
