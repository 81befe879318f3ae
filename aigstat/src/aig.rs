//! The graph data model.
//!
//! Nodes live in per-category vectors, and every node's [`NodeId`] is its AIGER variable, so the category and
//! position of a node follow from its ID alone. Edges are generic: a freshly decoded graph carries raw
//! [`Literal`]s, and [`crate::link`] turns it into a graph of [`Signal`]s that are known to point at real nodes.

use std::collections::HashMap;
use std::fmt;

use crate::header::Header;

/// An encoded reference: `2 * variable + inverted`.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Literal(pub u64);

impl Literal {
    /// Constant false.
    pub const FALSE: Self = Self(0);
    /// Constant true.
    pub const TRUE: Self = Self(1);

    /// Builds the literal referencing `variable`, inverted or not.
    #[must_use]
    pub const fn new(variable: u64, inverted: bool) -> Self {
        Self(variable << 1 | inverted as u64)
    }

    /// The referenced variable.
    #[must_use]
    pub const fn variable(self) -> u64 {
        self.0 >> 1
    }

    /// Whether the reference is inverted at its point of use.
    #[must_use]
    pub const fn is_inverted(self) -> bool {
        self.0 & 1 == 1
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable handle of a node; equal to its AIGER variable.
///
/// ID 0 is the constant false, which has no backing node.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// The constant false.
    pub const FALSE: Self = Self(0);

    /// Wraps a variable index.
    #[must_use]
    pub const fn new(variable: u32) -> Self {
        Self(variable)
    }

    /// The variable index.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// The variable index, for indexing tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Whether this is the constant.
    #[must_use]
    pub const fn is_constant(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A resolved reference to an existing node, with the polarity of the edge.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Signal {
    /// Node being referenced.
    pub node: NodeId,
    /// Whether the value is negated at the point of use.
    pub inverted: bool,
}

impl Signal {
    /// Whether this references the constant rather than a node.
    #[must_use]
    pub const fn is_constant(&self) -> bool {
        self.node.is_constant()
    }

    /// Re-encodes the signal as a literal.
    #[must_use]
    pub const fn literal(&self) -> Literal {
        Literal::new(self.node.get() as u64, self.inverted)
    }
}

/// Category of a variable.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum NodeKind {
    /// Variable 0.
    Constant,
    /// A primary input.
    Input,
    /// A latch output.
    Latch,
    /// A two-input AND gate.
    AndGate,
}

/// A free variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Input {
    /// Variable of this input.
    pub id: NodeId,
}

/// A single-bit register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Latch<E = Signal> {
    /// Variable of the latch output.
    pub id: NodeId,
    /// Next-state expression.
    pub next: E,
}

/// A two-input AND gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AndGate<E = Signal> {
    /// Variable of the gate output.
    pub id: NodeId,
    /// Fan-ins, in the order they were encoded.
    pub fanin: [E; 2],
}

/// A primary output. Outputs have no variable of their own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Output<E = Signal> {
    /// The probed signal.
    pub driver: E,
}

/// Which table a symbol names an entry of.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum SymbolKind {
    /// `i` lines.
    Input,
    /// `l` lines.
    Latch,
    /// `o` lines.
    Output,
}

/// An and-inverter graph.
///
/// `E` is the edge type: [`Literal`] straight out of the decoder, [`Signal`] once linked.
#[derive(Clone, Debug, PartialEq)]
pub struct Aig<E = Signal> {
    pub(crate) max_var: u32,
    pub(crate) inputs: Vec<Input>,
    pub(crate) latches: Vec<Latch<E>>,
    pub(crate) outputs: Vec<Output<E>>,
    pub(crate) and_gates: Vec<AndGate<E>>,
    pub(crate) symbols: HashMap<(SymbolKind, usize), String>,
    pub(crate) comments: Vec<String>,
}

/// A graph whose edges have not been resolved yet.
pub type Decoded = Aig<Literal>;

impl Decoded {
    /// Creates a graph for `header` with its inputs already in place.
    ///
    /// Latches, outputs and AND gates start empty and grow as their records are read, so a header declaring more
    /// records than the stream holds fails on the missing record rather than on allocation.
    pub(crate) fn with_header(header: &Header) -> Self {
        Self {
            max_var: header.max_var,
            inputs: (1..=header.inputs).map(|id| Input { id: NodeId::new(id) }).collect(),
            latches: Vec::new(),
            outputs: Vec::new(),
            and_gates: Vec::new(),
            symbols: HashMap::new(),
            comments: Vec::new(),
        }
    }
}

impl<E> Aig<E> {
    /// The declared maximum variable, `M`.
    #[must_use]
    pub const fn max_var(&self) -> u32 {
        self.max_var
    }

    /// Inputs in declaration order.
    #[must_use]
    pub fn inputs(&self) -> &[Input] {
        &self.inputs
    }

    /// Latches in declaration order.
    #[must_use]
    pub fn latches(&self) -> &[Latch<E>] {
        &self.latches
    }

    /// Outputs in declaration order.
    #[must_use]
    pub fn outputs(&self) -> &[Output<E>] {
        &self.outputs
    }

    /// AND gates in declaration order, which is also increasing variable order.
    #[must_use]
    pub fn and_gates(&self) -> &[AndGate<E>] {
        &self.and_gates
    }

    /// Category of a variable, or `None` if no node owns it.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        let index = id.index();
        let inputs = self.inputs.len();
        let latches = self.latches.len();
        let ands = self.and_gates.len();

        if index == 0 {
            Some(NodeKind::Constant)
        } else if index <= inputs {
            Some(NodeKind::Input)
        } else if index <= inputs + latches {
            Some(NodeKind::Latch)
        } else if index <= inputs + latches + ands {
            Some(NodeKind::AndGate)
        } else {
            None
        }
    }

    /// The AND gate owning `id`, if `id` is an AND gate.
    #[must_use]
    pub fn and_gate(&self, id: NodeId) -> Option<&AndGate<E>> {
        let first = 1 + self.inputs.len() + self.latches.len();
        id.index().checked_sub(first).and_then(|index| self.and_gates.get(index))
    }

    /// The latch owning `id`, if `id` is a latch.
    #[must_use]
    pub fn latch(&self, id: NodeId) -> Option<&Latch<E>> {
        let first = 1 + self.inputs.len();
        id.index().checked_sub(first).and_then(|index| self.latches.get(index))
    }

    /// Name given to the `position`-th entry of a table, if any.
    #[must_use]
    pub fn symbol(&self, kind: SymbolKind, position: usize) -> Option<&str> {
        self.symbols.get(&(kind, position)).map(String::as_str)
    }

    /// Lines of the trailing comment section.
    #[must_use]
    pub fn comments(&self) -> &[String] {
        &self.comments
    }
}
