use std::io::{BufReader, Read};

use log::debug;

use super::{Aiger, AigerFormat, AndGate, Latch, Symbol, SymbolKind};
use crate::error::{Error, Result};
use crate::node::FlopInit;

/// Byte cursor over the whole input, tracking the current line for error reports.
struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
    line: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0, line: 1 }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.data.len()
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::malformed(self.line, message)
    }

    /// Returns the next line without its terminator.
    fn line(&mut self, what: &str) -> Result<&'a str> {
        if self.at_end() {
            return Err(self.error(format!("unexpected end of input, expected {}", what)));
        }
        let rest = &self.data[self.pos..];
        let len = rest.iter().position(|&b| b == b'\n').unwrap_or(rest.len());
        let line = &rest[..len];
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        let line = std::str::from_utf8(line).map_err(|_| self.error(format!("{} is not valid UTF-8", what)))?;
        self.pos += (len + 1).min(rest.len());
        self.line += 1;
        Ok(line)
    }

    fn byte(&mut self) -> Result<u8> {
        let b = *self
            .data
            .get(self.pos)
            .ok_or_else(|| self.error("unexpected end of input in binary And gates"))?;
        self.pos += 1;
        Ok(b)
    }

    /// Decodes one 7-bit little-endian varint.
    fn varint(&mut self) -> Result<u32> {
        let mut value: u64 = 0;
        let mut shift = 0;
        loop {
            let b = self.byte()?;
            value |= u64::from(b & 0x7f) << shift;
            if value > u64::from(u32::MAX) {
                return Err(self.error("binary delta overflows 32 bits"));
            }
            if b & 0x80 == 0 {
                return Ok(value as u32);
            }
            shift += 7;
            if shift > 28 {
                return Err(self.error("binary delta is too long"));
            }
        }
    }

    /// Reads a line holding exactly `N` unsigned numbers, or between `N - optional` and `N`.
    fn numbers<const N: usize>(&mut self, what: &str, optional: usize) -> Result<([u32; N], usize)> {
        let line = self.line(what)?;
        let mut values = [0; N];
        let mut count = 0;
        for token in line.split_ascii_whitespace() {
            if count == N {
                return Err(self.error(format!("too many fields in {}: '{}'", what, line)));
            }
            values[count] = token
                .parse()
                .map_err(|_| self.error(format!("invalid number '{}' in {}", token, what)))?;
            count += 1;
        }
        if count + optional < N {
            return Err(self.error(format!("too few fields in {}: '{}'", what, line)));
        }
        Ok((values, count))
    }

    fn literal(&mut self, what: &str, max_lit: u32) -> Result<u32> {
        let ([lit], _) = self.numbers::<1>(what, 0)?;
        self.check_lit(lit, what, max_lit)?;
        Ok(lit)
    }

    fn check_lit(&self, lit: u32, what: &str, max_lit: u32) -> Result<()> {
        if lit > max_lit {
            return Err(self.error(format!("{} literal {} exceeds maximum variable index", what, lit)));
        }
        Ok(())
    }

    fn check_def(&self, lit: u32, what: &str, max_lit: u32) -> Result<()> {
        self.check_lit(lit, what, max_lit)?;
        if lit & 1 != 0 || lit < 2 {
            return Err(self.error(format!("{} literal {} must be a positive variable", what, lit)));
        }
        Ok(())
    }
}

struct Header {
    format: AigerFormat,
    max_var: u32,
    inputs: u32,
    latches: u32,
    outputs: u32,
    ands: u32,
    bad: u32,
    constraints: u32,
    justice: u32,
    fairness: u32,
}

fn parse_header(cursor: &mut Cursor) -> Result<Header> {
    let line = cursor.line("header")?;
    let mut tokens = line.split_ascii_whitespace();
    let format = match tokens.next() {
        Some("aag") => AigerFormat::Ascii,
        Some("aig") => AigerFormat::Binary,
        other => {
            return Err(Error::malformed(1, format!("expected 'aag' or 'aig', found {:?}", other.unwrap_or(""))));
        }
    };
    let counts = tokens
        .map(|t| t.parse::<u32>().map_err(|_| Error::malformed(1, format!("invalid header count '{}'", t))))
        .collect::<Result<Vec<_>>>()?;
    if counts.len() < 5 || counts.len() > 9 {
        return Err(Error::malformed(1, format!("header has {} counts, expected 5 to 9", counts.len())));
    }
    let count = |k: usize| counts.get(k).copied().unwrap_or(0);
    let header = Header {
        format,
        max_var: count(0),
        inputs: count(1),
        latches: count(2),
        outputs: count(3),
        ands: count(4),
        bad: count(5),
        constraints: count(6),
        justice: count(7),
        fairness: count(8),
    };

    let defined = u64::from(header.inputs) + u64::from(header.latches) + u64::from(header.ands);
    match format {
        AigerFormat::Ascii if defined > u64::from(header.max_var) => {
            return Err(Error::malformed(1, format!("M = {} is less than I + L + A = {}", header.max_var, defined)));
        }
        AigerFormat::Binary if defined != u64::from(header.max_var) => {
            return Err(Error::malformed(1, format!("M = {} differs from I + L + A = {}", header.max_var, defined)));
        }
        _ => {}
    }
    if header.max_var >= u32::MAX / 2 {
        return Err(Error::malformed(1, "maximum variable index is too large"));
    }
    Ok(header)
}

impl Aiger {
    /// Parses an AIGER file in either variant, detected from the header.
    pub fn parse(reader: impl Read) -> Result<Aiger> {
        let mut data = Vec::new();
        BufReader::new(reader).read_to_end(&mut data)?;
        Aiger::parse_bytes(&data)
    }

    pub fn parse_bytes(data: &[u8]) -> Result<Aiger> {
        let mut cursor = Cursor::new(data);
        let header = parse_header(&mut cursor)?;
        let binary = header.format == AigerFormat::Binary;
        let max_lit = 2 * header.max_var + 1;
        debug!(
            "parsing {} header: M={} I={} L={} O={} A={} B={} C={} J={} F={}",
            header.format.magic(),
            header.max_var,
            header.inputs,
            header.latches,
            header.outputs,
            header.ands,
            header.bad,
            header.constraints,
            header.justice,
            header.fairness
        );

        let mut aiger = Aiger {
            max_var: header.max_var,
            ..Aiger::default()
        };

        for k in 0..header.inputs {
            let lit = if binary {
                2 * (k + 1)
            } else {
                let lit = cursor.literal("input", max_lit)?;
                cursor.check_def(lit, "input", max_lit)?;
                lit
            };
            aiger.inputs.push(lit);
        }

        for k in 0..header.latches {
            let (lit, next, init) = if binary {
                let lit = 2 * (header.inputs + k + 1);
                let ([next, init], n) = cursor.numbers::<2>("latch", 1)?;
                (lit, next, (n == 2).then_some(init))
            } else {
                let ([lit, next, init], n) = cursor.numbers::<3>("latch", 1)?;
                cursor.check_def(lit, "latch", max_lit)?;
                (lit, next, (n == 3).then_some(init))
            };
            cursor.check_lit(next, "latch next-state", max_lit)?;
            let init = match init {
                None | Some(0) => FlopInit::Zero,
                Some(1) => FlopInit::One,
                Some(x) if x == lit => FlopInit::Undef,
                Some(x) => return Err(cursor.error(format!("invalid latch reset value {}", x))),
            };
            aiger.latches.push(Latch { lit, next, init });
        }

        for _ in 0..header.outputs {
            aiger.outputs.push(cursor.literal("output", max_lit)?);
        }
        for _ in 0..header.bad {
            aiger.bad.push(cursor.literal("bad state property", max_lit)?);
        }
        for _ in 0..header.constraints {
            aiger.constraints.push(cursor.literal("invariant constraint", max_lit)?);
        }
        let mut sizes = Vec::new();
        for _ in 0..header.justice {
            let ([size], _) = cursor.numbers::<1>("justice size", 0)?;
            sizes.push(size);
        }
        for size in sizes {
            let group = (0..size)
                .map(|_| cursor.literal("justice literal", max_lit))
                .collect::<Result<Vec<_>>>()?;
            aiger.justice.push(group);
        }
        for _ in 0..header.fairness {
            aiger.fairness.push(cursor.literal("fairness constraint", max_lit)?);
        }

        if binary {
            let line = cursor.line;
            for k in 0..header.ands {
                let lhs = 2 * (header.inputs + header.latches + k + 1);
                let delta0 = cursor.varint()?;
                let delta1 = cursor.varint()?;
                let rhs0 = lhs
                    .checked_sub(delta0)
                    .ok_or_else(|| Error::malformed(line, format!("And gate {} has an invalid first delta", lhs)))?;
                let rhs1 = rhs0
                    .checked_sub(delta1)
                    .ok_or_else(|| Error::malformed(line, format!("And gate {} has an invalid second delta", lhs)))?;
                if delta0 == 0 {
                    return Err(Error::malformed(line, format!("And gate {} refers to itself", lhs)));
                }
                aiger.ands.push(AndGate { lhs, rhs0, rhs1 });
            }
            // Line counting resumes after the binary section.
            cursor.line = line + 1;
        } else {
            for _ in 0..header.ands {
                let ([lhs, rhs0, rhs1], _) = cursor.numbers::<3>("And gate", 0)?;
                cursor.check_def(lhs, "And gate", max_lit)?;
                cursor.check_lit(rhs0, "And operand", max_lit)?;
                cursor.check_lit(rhs1, "And operand", max_lit)?;
                aiger.ands.push(AndGate { lhs, rhs0, rhs1 });
            }
        }

        parse_trailer(&mut cursor, &header, &mut aiger)?;

        debug!("parsed {} symbols", aiger.symbols.len());
        Ok(aiger)
    }
}

fn parse_trailer(cursor: &mut Cursor, header: &Header, aiger: &mut Aiger) -> Result<()> {
    while !cursor.at_end() {
        let line = cursor.line("symbol")?;
        if line.is_empty() {
            continue;
        }
        if line == "c" {
            let rest = &cursor.data[cursor.pos..];
            let rest = rest.strip_suffix(b"\n").unwrap_or(rest);
            aiger.comment = Some(String::from_utf8_lossy(rest).into_owned());
            cursor.pos = cursor.data.len();
            break;
        }

        let mut chars = line.chars();
        let kind = chars
            .next()
            .and_then(SymbolKind::from_char)
            .ok_or_else(|| cursor.error(format!("invalid symbol line '{}'", line)))?;
        let rest = chars.as_str();
        let (index, name) = rest
            .split_once(' ')
            .ok_or_else(|| cursor.error(format!("symbol line '{}' has no name", line)))?;
        let index: usize = index
            .parse()
            .map_err(|_| cursor.error(format!("invalid symbol index in '{}'", line)))?;
        let bound = match kind {
            SymbolKind::Input => header.inputs,
            SymbolKind::Latch => header.latches,
            SymbolKind::Output => header.outputs,
            SymbolKind::Bad => header.bad,
            SymbolKind::Constraint => header.constraints,
            SymbolKind::Justice => header.justice,
            SymbolKind::Fairness => header.fairness,
        };
        if index >= bound as usize {
            return Err(cursor.error(format!("symbol index out of range in '{}'", line)));
        }
        aiger.symbols.push(Symbol {
            kind,
            index,
            name: name.to_string(),
        });
    }
    Ok(())
}
