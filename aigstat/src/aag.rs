//! ASCII AIGER (`aag`) frontend.
//!
//! Records are read with the `aiger` crate. The rest of the pipeline relies on the canonical variable layout of
//! the binary format, so ASCII files must number inputs, latches and AND gates consecutively, in that order.
//!
//! The `aiger` reader yields whole records and cannot tell a truncated stream from a short one, so a file that ends
//! before every declared record is reported as [`FormatError::RecordCount`], where the binary decoder would report
//! [`Error::UnexpectedEndOfInput`].

use std::io::{self, BufRead, Read};

use aiger::Literal as AigerLiteral;

use crate::aig::{AndGate, Decoded, Latch, Literal, NodeId, Output, SymbolKind};
use crate::error::{Error, FormatError, Result};
use crate::header::Header;

fn ascii_error<E: std::fmt::Debug>(error: E) -> Error {
    FormatError::Ascii(format!("{:?}", error)).into()
}

fn literal(AigerLiteral(literal): AigerLiteral) -> Literal {
    Literal(literal as u64)
}

/// Checks that the `index`-th record of a section defines the variable the canonical layout gives it.
fn canonical(kind: &'static str, index: usize, first: u32, declared: u32, defined: AigerLiteral) -> Result<NodeId> {
    if index >= declared as usize {
        return Err(FormatError::RecordCount {
            kind,
            declared,
            found: index + 1,
        }
        .into());
    }

    let expected = first + index as u32;
    let found = literal(defined);
    if found.is_inverted() || found.variable() != u64::from(expected) {
        return Err(FormatError::NonCanonical {
            kind,
            index,
            expected: u64::from(expected),
            found: found.variable(),
        }
        .into());
    }

    Ok(NodeId::new(expected))
}

fn check_count(kind: &'static str, declared: u32, found: usize) -> Result<()> {
    if found == declared as usize {
        Ok(())
    } else {
        Err(FormatError::RecordCount { kind, declared, found }.into())
    }
}

/// Decodes the remainder of an ASCII stream whose header line has already been consumed.
pub(crate) fn decode<R: BufRead>(header: &Header, header_line: &str, reader: R) -> Result<Decoded> {
    // The reader wants to see the header itself.
    let replay = io::Cursor::new(format!("{}\n", header_line)).chain(reader);
    let reader = aiger::Reader::from_reader(replay).map_err(ascii_error)?;

    let mut aig = Decoded::with_header(header);
    let mut input_count = 0;
    let first_latch = header.inputs.saturating_add(1);
    let first_and = header.inputs.saturating_add(header.latches).saturating_add(1);

    for record in reader.records() {
        match record.map_err(ascii_error)? {
            aiger::Aiger::Input(l) => {
                canonical("input", input_count, 1, header.inputs, l)?;
                input_count += 1;
            }
            aiger::Aiger::Latch { output, input } => {
                let id = canonical("latch", aig.latches.len(), first_latch, header.latches, output)?;
                aig.latches.push(Latch { id, next: literal(input) });
            }
            aiger::Aiger::Output(l) => {
                if aig.outputs.len() >= header.outputs as usize {
                    return Err(FormatError::RecordCount {
                        kind: "output",
                        declared: header.outputs,
                        found: aig.outputs.len() + 1,
                    }
                    .into());
                }
                aig.outputs.push(Output { driver: literal(l) });
            }
            aiger::Aiger::AndGate { output, inputs } => {
                let id = canonical("AND gate", aig.and_gates.len(), first_and, header.ands, output)?;
                aig.and_gates.push(AndGate {
                    id,
                    fanin: [literal(inputs[0]), literal(inputs[1])],
                });
            }
            aiger::Aiger::Symbol { type_spec, position, symbol } => {
                let (kind, limit) = match type_spec {
                    aiger::Symbol::Input => (SymbolKind::Input, header.inputs),
                    aiger::Symbol::Latch => (SymbolKind::Latch, header.latches),
                    aiger::Symbol::Output => (SymbolKind::Output, header.outputs),
                };
                if position >= limit as usize {
                    return Err(FormatError::Symbol {
                        line: format!("{:?} {} {}", kind, position, symbol),
                    }
                    .into());
                }
                aig.symbols.insert((kind, position), symbol);
            }
        }
    }

    check_count("input", header.inputs, input_count)?;
    check_count("latch", header.latches, aig.latches.len())?;
    check_count("output", header.outputs, aig.outputs.len())?;
    check_count("AND gate", header.ands, aig.and_gates.len())?;

    log::debug!(
        "decoded ASCII file: {} inputs, {} latches, {} outputs, {} AND gates",
        aig.inputs.len(),
        aig.latches.len(),
        aig.outputs.len(),
        aig.and_gates.len()
    );

    Ok(aig)
}
