//! The `aig M I L O A` header line.

use crate::error::FormatError;

/// The five structural counts of an AIGER file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Header {
    /// Maximum variable index, `M`.
    pub max_var: u32,
    /// Number of inputs, `I`.
    pub inputs: u32,
    /// Number of latches, `L`.
    pub latches: u32,
    /// Number of outputs, `O`.
    pub outputs: u32,
    /// Number of AND gates, `A`.
    pub ands: u32,
}

impl Header {
    /// Tag of the binary format.
    pub const BINARY_TAG: &'static str = "aig";
    /// Tag of the ASCII format.
    pub const ASCII_TAG: &'static str = "aag";

    /// Parses a binary-format header line (without its newline).
    ///
    /// # Errors
    ///
    /// Fails if the line does not hold exactly six single-space separated fields, if the tag is not `aig`, if a
    /// count is not a non-negative integer or if `M != I + L + A`.
    pub fn parse(line: &str) -> Result<Self, FormatError> {
        Self::parse_tagged(line, Self::BINARY_TAG)
    }

    /// Like [`Header::parse`], but requiring `tag` instead of `aig`.
    ///
    /// # Errors
    ///
    /// See [`Header::parse`].
    pub fn parse_tagged(line: &str, tag: &'static str) -> Result<Self, FormatError> {
        let fields = line.split(' ').collect::<Vec<_>>();
        if fields.len() != 6 {
            return Err(FormatError::FieldCount { found: fields.len() });
        }
        if fields[0] != tag {
            return Err(FormatError::Tag {
                expected: tag,
                found: fields[0].to_string(),
            });
        }

        let count = |field: &'static str, value: &str| {
            value.parse::<u32>().map_err(|source| FormatError::Field {
                field,
                value: value.to_string(),
                source,
            })
        };

        let header = Self {
            max_var: count("M", fields[1])?,
            inputs: count("I", fields[2])?,
            latches: count("L", fields[3])?,
            outputs: count("O", fields[4])?,
            ands: count("A", fields[5])?,
        };

        let sum = u64::from(header.inputs) + u64::from(header.latches) + u64::from(header.ands);
        if u64::from(header.max_var) != sum {
            return Err(FormatError::Inconsistent {
                m: header.max_var,
                i: header.inputs,
                l: header.latches,
                a: header.ands,
            });
        }

        log::debug!(
            "header: M={} I={} L={} O={} A={}",
            header.max_var,
            header.inputs,
            header.latches,
            header.outputs,
            header.ands
        );

        Ok(header)
    }
}
