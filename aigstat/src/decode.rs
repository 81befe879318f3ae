//! Decoding of binary AIGER (`aig`) streams.
//!
//! The stream is read strictly forward: the header line, one ASCII line per latch and per output, the binary AND
//! section, and finally the optional symbol table and comment section. The result is a [`Decoded`] graph whose
//! edges are still raw literals; see [`crate::link`].

use std::io::BufRead;

use crate::aag;
use crate::aig::{AndGate, Decoded, Latch, Literal, NodeId, Output, SymbolKind};
use crate::delta::decode_delta;
use crate::error::{Error, FormatError, Result, Section};
use crate::header::Header;

/// Decodes a binary AIGER stream.
///
/// # Errors
///
/// Returns a [`FormatError`] for malformed header, latch, output or symbol lines, and
/// [`Error::UnexpectedEndOfInput`] if the stream stops partway through a line or through the AND section.
pub fn decode<R: BufRead>(mut reader: R) -> Result<Decoded> {
    let line = header_line(&mut reader)?;
    let header = Header::parse(&line)?;
    decode_body(&header, &mut reader)
}

/// Decodes either a binary (`aig`) or an ASCII (`aag`) stream, choosing by the header tag.
///
/// # Errors
///
/// See [`decode`]; ASCII streams additionally fail if their variables are not numbered canonically.
pub fn read<R: BufRead>(mut reader: R) -> Result<Decoded> {
    let line = header_line(&mut reader)?;
    if line.split(' ').next() == Some(Header::ASCII_TAG) {
        let header = Header::parse_tagged(&line, Header::ASCII_TAG)?;
        aag::decode(&header, &line, reader)
    } else {
        let header = Header::parse(&line)?;
        decode_body(&header, &mut reader)
    }
}

fn header_line<R: BufRead + ?Sized>(reader: &mut R) -> Result<String> {
    match next_line(reader)? {
        Some((line, true)) => Ok(line),
        Some((_, false)) => Err(Error::eof("header line")),
        None => Err(FormatError::MissingHeader.into()),
    }
}

/// Reads one line, without its terminator.
///
/// Returns `None` at end of input, and flags whether the line was newline-terminated.
fn next_line<R: BufRead + ?Sized>(reader: &mut R) -> Result<Option<(String, bool)>> {
    let mut buf = Vec::new();
    if reader.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }

    let terminated = buf.last() == Some(&b'\n');
    if terminated {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }

    Ok(Some((String::from_utf8_lossy(&buf).into_owned(), terminated)))
}

fn literal_line<R: BufRead + ?Sized>(reader: &mut R, section: Section, index: usize) -> Result<Literal> {
    match next_line(reader)? {
        Some((line, true)) => match line.parse::<u64>() {
            Ok(literal) => Ok(Literal(literal)),
            Err(_) => Err(FormatError::Literal { section, index, line }.into()),
        },
        Some((_, false)) => Err(Error::eof(format!("{} {}", section, index))),
        None => Err(FormatError::MissingLine { section, index }.into()),
    }
}

pub(crate) fn decode_body<R: BufRead + ?Sized>(header: &Header, reader: &mut R) -> Result<Decoded> {
    let mut aig = Decoded::with_header(header);

    for index in 0..header.latches {
        let next = literal_line(reader, Section::Latch, index as usize)?;
        let id = NodeId::new(header.inputs + index + 1);
        log::trace!("latch {}: next state {}", id, next);
        aig.latches.push(Latch { id, next });
    }

    for index in 0..header.outputs as usize {
        let driver = literal_line(reader, Section::Output, index)?;
        log::trace!("output {}: {}", index, driver);
        aig.outputs.push(Output { driver });
    }

    for index in 0..header.ands {
        let id = header.inputs + header.latches + index + 1;
        let lhs = Literal::new(u64::from(id), false).0;

        let delta0 = decode_delta(reader)?;
        let delta1 = decode_delta(reader)?;

        // A zero first delta would make the gate feed itself.
        if delta0 == 0 || delta0 > lhs {
            return Err(FormatError::Delta {
                index: index as usize,
                literal: lhs,
                delta: delta0,
            }
            .into());
        }
        let rhs0 = lhs - delta0;
        let rhs1 = rhs0.checked_sub(delta1).ok_or(FormatError::Delta {
            index: index as usize,
            literal: rhs0,
            delta: delta1,
        })?;

        aig.and_gates.push(AndGate {
            id: NodeId::new(id),
            fanin: [Literal(rhs0), Literal(rhs1)],
        });
    }

    decode_trailer(header, &mut aig, reader)?;

    log::debug!(
        "decoded {} inputs, {} latches, {} outputs, {} AND gates",
        aig.inputs.len(),
        aig.latches.len(),
        aig.outputs.len(),
        aig.and_gates.len()
    );

    Ok(aig)
}

/// Reads the optional symbol table and comment section that may follow the AND gates.
fn decode_trailer<R: BufRead + ?Sized>(header: &Header, aig: &mut Decoded, reader: &mut R) -> Result<()> {
    while let Some((line, _)) = next_line(reader)? {
        if line == "c" {
            while let Some((comment, _)) = next_line(reader)? {
                aig.comments.push(comment);
            }
            break;
        }
        if line.is_empty() {
            log::warn!("skipping empty line in symbol table");
            continue;
        }

        let (kind, position, name) = parse_symbol(header, &line).ok_or_else(|| FormatError::Symbol { line: line.clone() })?;
        log::trace!("symbol {:?} {}: {}", kind, position, name);
        aig.symbols.insert((kind, position), name.to_string());
    }

    Ok(())
}

fn parse_symbol<'a>(header: &Header, line: &'a str) -> Option<(SymbolKind, usize, &'a str)> {
    let (kind, limit) = match line.as_bytes().first()? {
        b'i' => (SymbolKind::Input, header.inputs),
        b'l' => (SymbolKind::Latch, header.latches),
        b'o' => (SymbolKind::Output, header.outputs),
        _ => return None,
    };

    let (position, name) = line[1..].split_once(' ')?;
    let position = position.parse::<usize>().ok()?;
    if position >= limit as usize || name.is_empty() {
        return None;
    }

    Some((kind, position, name))
}
