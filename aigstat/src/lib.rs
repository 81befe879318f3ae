//! Structural statistics for and-inverter graphs.
//!
//! And-inverter graphs (AIGs) represent boolean logic as a network of two-input AND gates whose edges may be
//! inverted. Together with inversion, a two-input AND is universal, so any combinational function can be
//! expressed this way; adding latches (single-bit registers with a next-state expression) extends that to
//! sequential circuits.
//!
//! The AIGER format numbers every variable in one flat namespace: inputs take `1..=I`, latches `I+1..=I+L` and
//! AND gates the rest, up to `M`. A reference to a variable is a *literal*, `2 * variable + inverted`, so the
//! inversion belongs to the edge rather than to the node. Literal `0` is constant false and literal `1` is
//! constant true.
//!
//! Loading a graph is a three step pipeline:
//! - [`decode`] (or the format-sniffing [`read`]) turns a byte stream into a [`Decoded`] graph whose edges are
//!   still bare [`Literal`]s.
//! - [`link`] resolves every literal against the variables actually present, producing an [`Aig`] whose edges
//!   are [`Signal`]s pointing at existing nodes.
//! - [`compute_stats`] walks the linked graph and reports counts, the maximum logic level and the level
//!   histogram.
//!
//! ```
//! let bytes: &[u8] = b"aig 3 2 0 1 1\n6\n\x02\x02";
//! let aig = aigstat::link(aigstat::decode(bytes)?)?;
//! let stats = aigstat::compute_stats(&aig);
//!
//! assert_eq!(stats.and_gates, 1);
//! assert_eq!(stats.max_level, 1);
//! # Ok::<(), aigstat::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![warn(missing_docs)]

mod aag;
pub mod aig;
pub mod decode;
pub mod delta;
pub mod dot;
pub mod error;
pub mod header;
pub mod link;
pub mod stats;

pub use aig::{Aig, AndGate, Decoded, Input, Latch, Literal, NodeId, NodeKind, Output, Signal, SymbolKind};
pub use decode::{decode, read};
pub use dot::to_graphviz;
pub use error::{Error, FormatError, Result};
pub use header::Header;
pub use link::{link, unlink};
pub use stats::{compute_levels, compute_stats, Levels, Stats};

/// Reads, decodes and links a graph in one go.
///
/// The format is detected from the header tag, so both binary (`aig`) and ASCII (`aag`) streams are accepted.
///
/// # Errors
///
/// Returns whatever [`read`] or [`link`] reports.
pub fn load<R: std::io::BufRead>(reader: R) -> Result<Aig> {
    link(read(reader)?)
}
