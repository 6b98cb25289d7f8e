use std::io::{BufWriter, Write};

use log::debug;

use super::{Aiger, AigerFormat};
use crate::error::{Error, Result};
use crate::node::FlopInit;

/// Appends `x` as a 7-bit little-endian varint.
fn write_varint(w: &mut impl Write, mut x: u32) -> std::io::Result<()> {
    while x >= 0x80 {
        w.write_all(&[(x & 0x7f) as u8 | 0x80])?;
        x >>= 7;
    }
    w.write_all(&[x as u8])
}

impl Aiger {
    /// Header counts `M I L O A B C J F`, with trailing zero extension counts dropped.
    fn header_counts(&self) -> Vec<usize> {
        let mut counts = vec![
            self.max_var as usize,
            self.inputs.len(),
            self.latches.len(),
            self.outputs.len(),
            self.ands.len(),
            self.bad.len(),
            self.constraints.len(),
            self.justice.len(),
            self.fairness.len(),
        ];
        while counts.len() > 5 && counts.last() == Some(&0) {
            counts.pop();
        }
        counts
    }

    /// Writes this model in the given variant.
    ///
    /// The binary variant requires [`is_binary_layout`](Aiger::is_binary_layout);
    /// models built by [`Netlist::to_aiger`](crate::netlist::Netlist::to_aiger) always satisfy it.
    pub fn write(&self, writer: impl Write, format: AigerFormat) -> Result<()> {
        let binary = format == AigerFormat::Binary;
        if binary && !self.is_binary_layout() {
            return Err(Error::InternalInvariantViolation(
                "variable numbering does not follow the binary AIGER layout".to_string(),
            ));
        }

        let mut w = BufWriter::new(writer);
        let counts: Vec<String> = self.header_counts().iter().map(|c| c.to_string()).collect();
        writeln!(w, "{} {}", format.magic(), counts.join(" "))?;

        if !binary {
            for lit in &self.inputs {
                writeln!(w, "{}", lit)?;
            }
        }
        for latch in &self.latches {
            if !binary {
                write!(w, "{} ", latch.lit)?;
            }
            match latch.init {
                FlopInit::Zero => writeln!(w, "{}", latch.next)?,
                FlopInit::One => writeln!(w, "{} 1", latch.next)?,
                FlopInit::Undef => writeln!(w, "{} {}", latch.next, latch.lit)?,
            }
        }
        for lit in self.outputs.iter().chain(&self.bad).chain(&self.constraints) {
            writeln!(w, "{}", lit)?;
        }
        for group in &self.justice {
            writeln!(w, "{}", group.len())?;
        }
        for lit in self.justice.iter().flatten().chain(&self.fairness) {
            writeln!(w, "{}", lit)?;
        }
        for and in &self.ands {
            if binary {
                write_varint(&mut w, and.lhs - and.rhs0)?;
                write_varint(&mut w, and.rhs0 - and.rhs1)?;
            } else {
                writeln!(w, "{} {} {}", and.lhs, and.rhs0, and.rhs1)?;
            }
        }

        for symbol in &self.symbols {
            writeln!(w, "{}", symbol)?;
        }
        if let Some(comment) = &self.comment {
            writeln!(w, "c")?;
            writeln!(w, "{}", comment)?;
        }

        w.flush()?;
        debug!(
            "wrote {} with {} gates and {} symbols",
            format.magic(),
            self.ands.len(),
            self.symbols.len()
        );
        Ok(())
    }
}
