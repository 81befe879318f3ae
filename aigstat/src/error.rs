//! Errors produced while decoding and linking a graph.
//!
//! Every error is terminal for the call that produced it: no partially built graph is ever returned.

use std::fmt;
use std::io;
use std::num::ParseIntError;

use thiserror::Error;

/// Shorthand for results carrying this crate's [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Anything that can go wrong between a byte stream and a linked graph.
#[derive(Debug, Error)]
pub enum Error {
    /// The stream does not follow the AIGER grammar.
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// The stream ended where more data was structurally required.
    #[error("unexpected end of input while reading {context}")]
    UnexpectedEndOfInput {
        /// What was being read when the stream ran dry.
        context: String,
    },

    /// A reference names a variable that no node defines.
    #[error("{owner} references variable {target}, which is not defined")]
    DanglingReference {
        /// The node holding the reference.
        owner: Owner,
        /// The variable it points at.
        target: u64,
    },

    /// An AND gate references a variable that is not declared before it.
    #[error("AND gate {gate} references variable {target}, which is not declared before it")]
    ForwardReference {
        /// Variable of the offending gate.
        gate: u32,
        /// Variable it points at.
        target: u64,
    },

    /// The underlying reader failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn eof(context: impl Into<String>) -> Self {
        Self::UnexpectedEndOfInput { context: context.into() }
    }
}

/// Ways in which the stream can violate the AIGER grammar.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The stream is empty; there is no header line at all.
    #[error("missing header line")]
    MissingHeader,

    /// The header does not split into a tag and five counts.
    #[error("header has {found} fields, expected 6")]
    FieldCount {
        /// Number of space-separated fields found.
        found: usize,
    },

    /// The header tag is not the one being decoded.
    #[error("header tag is {found:?}, expected {expected:?}")]
    Tag {
        /// Tag that was required.
        expected: &'static str,
        /// Tag actually present.
        found: String,
    },

    /// One of the header counts is not a non-negative integer.
    #[error("header field {field} is {value:?}: {source}")]
    Field {
        /// Name of the field (`M`, `I`, `L`, `O` or `A`).
        field: &'static str,
        /// Raw text of the field.
        value: String,
        /// Parser complaint.
        source: ParseIntError,
    },

    /// `M` disagrees with `I + L + A`.
    #[error("M = {m} but I + L + A = {i} + {l} + {a}")]
    Inconsistent {
        /// Declared maximum variable.
        m: u32,
        /// Declared input count.
        i: u32,
        /// Declared latch count.
        l: u32,
        /// Declared AND gate count.
        a: u32,
    },

    /// A latch or output line is not a single literal.
    #[error("{section} {index}: invalid literal {line:?}")]
    Literal {
        /// Section the line belongs to.
        section: Section,
        /// Position within that section.
        index: usize,
        /// Raw text of the line.
        line: String,
    },

    /// The stream ended right where a latch or output line should start.
    #[error("{section} {index}: missing line")]
    MissingLine {
        /// Section the line belongs to.
        section: Section,
        /// Position within that section.
        index: usize,
    },

    /// An AND gate delta would move a literal below zero or onto the gate itself.
    #[error("AND gate {index}: delta {delta} is invalid for literal {literal}")]
    Delta {
        /// Position of the gate in the AND section.
        index: usize,
        /// Literal the delta is subtracted from.
        literal: u64,
        /// The offending delta.
        delta: u64,
    },

    /// A delta carries more significant bits than fit in 64 bits.
    #[error("delta does not fit in 64 bits")]
    DeltaOverflow,

    /// A line in the symbol table is malformed or names a missing position.
    #[error("invalid symbol table entry {line:?}")]
    Symbol {
        /// Raw text of the line.
        line: String,
    },

    /// An ASCII file does not number its variables in the canonical order.
    #[error("{kind} {index} defines variable {found}, expected {expected}")]
    NonCanonical {
        /// Kind of record.
        kind: &'static str,
        /// Position of the record within its section.
        index: usize,
        /// Variable the canonical layout assigns.
        expected: u64,
        /// Variable the file uses.
        found: u64,
    },

    /// An ASCII file holds a different number of records than its header declares.
    #[error("header declares {declared} {kind} records but {found} were read")]
    RecordCount {
        /// Kind of record.
        kind: &'static str,
        /// Count from the header.
        declared: u32,
        /// Count actually read.
        found: usize,
    },

    /// The ASCII reader rejected the file.
    #[error("ASCII reader: {0}")]
    Ascii(String),
}

/// The ASCII sections of the binary format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    /// Latch next-state lines.
    Latch,
    /// Output literal lines.
    Output,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latch => write!(f, "latch"),
            Self::Output => write!(f, "output"),
        }
    }
}

/// The node holding a reference that failed to resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Owner {
    /// An AND gate, by variable.
    AndGate(u32),
    /// A latch, by variable.
    Latch(u32),
    /// An output, by position.
    Output(usize),
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AndGate(id) => write!(f, "AND gate {}", id),
            Self::Latch(id) => write!(f, "latch {}", id),
            Self::Output(index) => write!(f, "output {}", index),
        }
    }
}
