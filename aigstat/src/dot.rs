//! Graphviz export.

use std::io;

use petgraph::prelude::*;

use crate::aig::{Aig, Signal};

/// A node of the exported graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphNode {
    /// The constant false.
    Zero,
    /// An input, by position.
    Input(u32),
    /// A latch, by position.
    Latch(u32),
    /// An AND gate.
    And,
    /// An output, by position.
    Output(u32),
}

/// Builds a `petgraph` view of `aig`.
///
/// Node index `n` is variable `n`; outputs follow the last AND gate. Edges run from driver to consumer and are
/// weighted with their inversion.
#[must_use]
pub fn to_petgraph(aig: &Aig) -> StableGraph<GraphNode, bool> {
    let mut graph = StableGraph::with_capacity(1 + aig.max_var as usize + aig.outputs.len(), 0);

    graph.add_node(GraphNode::Zero);
    for position in 0..aig.inputs.len() {
        graph.add_node(GraphNode::Input(position as u32));
    }
    for position in 0..aig.latches.len() {
        graph.add_node(GraphNode::Latch(position as u32));
    }
    for _ in &aig.and_gates {
        graph.add_node(GraphNode::And);
    }

    fn connect(graph: &mut StableGraph<GraphNode, bool>, signal: Signal, sink: NodeIndex) {
        graph.add_edge(NodeIndex::new(signal.node.index()), sink, signal.inverted);
    }

    for gate in &aig.and_gates {
        let sink = NodeIndex::new(gate.id.index());
        connect(&mut graph, gate.fanin[0], sink);
        connect(&mut graph, gate.fanin[1], sink);
    }
    for latch in &aig.latches {
        connect(&mut graph, latch.next, NodeIndex::new(latch.id.index()));
    }
    for (position, output) in aig.outputs.iter().enumerate() {
        let sink = graph.add_node(GraphNode::Output(position as u32));
        connect(&mut graph, output.driver, sink);
    }

    graph
}

/// Writes `aig` as a Graphviz digraph.
///
/// Inverted edges get a hollow dot at their tail; references to the constant are drawn from a small point.
///
/// # Errors
///
/// Propagates failures of `writer`.
pub fn to_graphviz<W: io::Write>(aig: &Aig, mut writer: W) -> io::Result<()> {
    let graph = to_petgraph(aig);

    writeln!(writer, "strict digraph {{")?;

    for node in graph.node_indices() {
        match graph[node] {
            GraphNode::Input(position) => {
                writeln!(writer, "{} [shape=box,color=blue,label=\"Input {}\"];", node.index(), position)?;
            }
            GraphNode::Latch(position) => {
                writeln!(writer, "{} [shape=box,color=red,label=\"Latch {}\"];", node.index(), position)?;
            }
            GraphNode::Output(position) => {
                writeln!(writer, "{} [shape=box,color=green,label=\"Output {}\"];", node.index(), position)?;
            }
            GraphNode::And => {
                writeln!(writer, "{} [label=\"AND {0}\"];", node.index())?;
            }
            GraphNode::Zero => {}
        }
    }

    for edge in graph.edge_indices() {
        let (from, to) = match graph.edge_endpoints(edge) {
            Some(endpoints) => endpoints,
            None => continue,
        };

        if graph[from] == GraphNode::Zero {
            writeln!(writer, "z{} [label=\"\", shape=point];", to.index())?;
            write!(writer, "z{} -> {0}", to.index())?;
        } else {
            write!(writer, "{} -> {}", from.index(), to.index())?;
        }

        writeln!(writer, " {};", if graph[edge] { "[dir=both,arrowtail=odot]" } else { "" })?;
    }

    writeln!(writer, "}}")
}
