//! AIGER reading and writing.
//!
//! The codec has two layers. [`Aiger`] is a literal-level model of an AIGER
//! 1.9 file, produced by [`Aiger::parse`] and consumed by [`Aiger::write`].
//! [`Netlist::from_aiger`] and [`Netlist::to_aiger`] translate between that
//! model and a [`Netlist`].
//!
//! # Layout
//!
//! Decoding lays nodes out as `const | PIs | flops | Ands | POs`, so the id of
//! every non-PO node equals its AIGER variable index. POs are created in the
//! order outputs, bad-state properties, invariant constraints, justice
//! properties (group by group) and fairness constraints.
//!
//! Encoding never touches the netlist. Bare POs (in no classification set) are
//! written as outputs, properties as bad-state properties, constraints as
//! invariant constraints, fair properties as justice properties and fair
//! constraints as fairness constraints. And gates are written in a topological
//! order, which is their creation order whenever that is already sorted.
//!
//! ```
//! use netlist_rs::aiger::AigerConfig;
//! use netlist_rs::netlist::Netlist;
//!
//! let mut n = Netlist::new();
//! let a = n.add_pi();
//! let b = n.add_pi();
//! let g = n.add_and(a, b).unwrap();
//! n.add_po(g).unwrap();
//!
//! let mut bytes = Vec::new();
//! n.write_aiger(&mut bytes, &AigerConfig::default()).unwrap();
//! assert_eq!(String::from_utf8(bytes.clone()).unwrap(), "aag 3 2 0 1 1\n2\n4\n6\n6 4 2\n");
//!
//! let m = Netlist::read_aiger(bytes.as_slice(), &AigerConfig::default()).unwrap();
//! assert_eq!(m, n);
//! ```

mod parse;
mod write;

use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use log::{debug, info};

use crate::error::{Error, Result};
use crate::netlist::Netlist;
use crate::node::{FlopInit, Node};
use crate::signal::Signal;

/// On-the-wire AIGER variant.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum AigerFormat {
    /// `aag`: decimal literals, one record per line.
    #[default]
    Ascii,
    /// `aig`: implicit inputs, delta-encoded And gates.
    Binary,
}

impl AigerFormat {
    pub fn magic(self) -> &'static str {
        match self {
            AigerFormat::Ascii => "aag",
            AigerFormat::Binary => "aig",
        }
    }

    /// Guesses the format from a file extension (`.aag` or `.aig`).
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        match path.as_ref().extension()?.to_str()? {
            "aag" => Some(AigerFormat::Ascii),
            "aig" => Some(AigerFormat::Binary),
            _ => None,
        }
    }
}

/// How to encode a flop whose next-state input was never connected.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum UnconnectedFlop {
    /// Treat the missing input as constant false.
    #[default]
    ConstFalse,
    /// Fail with [`Error::InvalidReference`].
    Reject,
}

/// Options for AIGER conversion.
///
/// ```
/// use netlist_rs::aiger::{AigerConfig, AigerFormat, UnconnectedFlop};
///
/// let config = AigerConfig::default()
///     .with_format(AigerFormat::Binary)
///     .with_unconnected_flops(UnconnectedFlop::Reject)
///     .with_comment("generated");
/// assert_eq!(config.format, AigerFormat::Binary);
/// ```
#[derive(Debug, Clone)]
pub struct AigerConfig {
    /// Variant used when writing (default: ASCII).
    pub format: AigerFormat,
    /// Policy for unconnected flops when writing (default: constant false).
    pub unconnected_flops: UnconnectedFlop,
    /// When reading a file without B/C/J/F sections, treat every output as a
    /// property, as in AIGER 1.0 model-checking benchmarks (default: false).
    pub outputs_as_properties: bool,
    /// Whether to write the symbol table (default: true).
    pub write_names: bool,
    /// Comment written after the symbol table (default: none).
    pub comment: Option<String>,
}

impl Default for AigerConfig {
    fn default() -> Self {
        Self {
            format: AigerFormat::Ascii,
            unconnected_flops: UnconnectedFlop::ConstFalse,
            outputs_as_properties: false,
            write_names: true,
            comment: None,
        }
    }
}

impl AigerConfig {
    pub fn with_format(mut self, format: AigerFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_unconnected_flops(mut self, policy: UnconnectedFlop) -> Self {
        self.unconnected_flops = policy;
        self
    }

    pub fn with_outputs_as_properties(mut self, enabled: bool) -> Self {
        self.outputs_as_properties = enabled;
        self
    }

    pub fn with_names(mut self, enabled: bool) -> Self {
        self.write_names = enabled;
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Latch {
    pub lit: u32,
    pub next: u32,
    pub init: FlopInit,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct AndGate {
    pub lhs: u32,
    pub rhs0: u32,
    pub rhs1: u32,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SymbolKind {
    Input,
    Latch,
    Output,
    Bad,
    Constraint,
    Justice,
    Fairness,
}

impl SymbolKind {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'i' => Some(SymbolKind::Input),
            'l' => Some(SymbolKind::Latch),
            'o' => Some(SymbolKind::Output),
            'b' => Some(SymbolKind::Bad),
            'c' => Some(SymbolKind::Constraint),
            'j' => Some(SymbolKind::Justice),
            'f' => Some(SymbolKind::Fairness),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            SymbolKind::Input => 'i',
            SymbolKind::Latch => 'l',
            SymbolKind::Output => 'o',
            SymbolKind::Bad => 'b',
            SymbolKind::Constraint => 'c',
            SymbolKind::Justice => 'j',
            SymbolKind::Fairness => 'f',
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Symbol {
    pub kind: SymbolKind,
    pub index: usize,
    pub name: String,
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{} {}", self.kind.to_char(), self.index, self.name)
    }
}

/// Literal-level contents of an AIGER file.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Aiger {
    pub max_var: u32,
    pub inputs: Vec<u32>,
    pub latches: Vec<Latch>,
    pub outputs: Vec<u32>,
    pub bad: Vec<u32>,
    pub constraints: Vec<u32>,
    pub justice: Vec<Vec<u32>>,
    pub fairness: Vec<u32>,
    pub ands: Vec<AndGate>,
    pub symbols: Vec<Symbol>,
    pub comment: Option<String>,
}

impl Aiger {
    /// Whether the variable numbering is the one the binary format implies:
    /// inputs, then latches, then And gates, each gate defined after its operands.
    pub fn is_binary_layout(&self) -> bool {
        let n_inputs = self.inputs.len() as u32;
        let n_latches = self.latches.len() as u32;
        self.max_var == n_inputs + n_latches + self.ands.len() as u32
            && self.inputs.iter().enumerate().all(|(k, &lit)| lit == 2 * (k as u32 + 1))
            && self
                .latches
                .iter()
                .enumerate()
                .all(|(k, latch)| latch.lit == 2 * (n_inputs + k as u32 + 1))
            && self.ands.iter().enumerate().all(|(k, and)| {
                and.lhs == 2 * (n_inputs + n_latches + k as u32 + 1) && and.lhs > and.rhs0 && and.rhs0 >= and.rhs1
            })
    }
}

// Netlist -> Aiger
impl Netlist {
    /// Builds the AIGER model of this netlist without modifying it.
    pub fn to_aiger(&self, config: &AigerConfig) -> Result<Aiger> {
        let sorted_ands = self.sorted_ands()?;

        // AIGER variable of each non-PO node.
        let mut var = vec![0u32; self.nodes.len()];
        let mut next_var = 0;
        for &s in self.pis.iter().chain(&self.flops).chain(&sorted_ands) {
            next_var += 1;
            var[s.index()] = next_var;
        }
        let lit = |s: Signal| 2 * var[s.index()] + s.is_inverted() as u32;

        let mut aiger = Aiger {
            max_var: next_var,
            inputs: self.pis.iter().map(|&pi| lit(pi)).collect(),
            comment: config.comment.clone(),
            ..Aiger::default()
        };

        for &ff in &self.flops {
            let init = self.flop_init(ff)?;
            let next = match (self.flop_next(ff)?, config.unconnected_flops) {
                (Some(next), _) => lit(next),
                (None, UnconnectedFlop::ConstFalse) => 0,
                (None, UnconnectedFlop::Reject) => {
                    return Err(Error::invalid(ff, "flop next-state input is not connected"));
                }
            };
            aiger.latches.push(Latch {
                lit: lit(ff),
                next,
                init,
            });
        }

        for &g in &sorted_ands {
            let (left, right) = self.and_fanins(g)?;
            let (rhs0, rhs1) = (lit(left), lit(right));
            aiger.ands.push(AndGate {
                lhs: lit(g),
                rhs0: rhs0.max(rhs1),
                rhs1: rhs0.min(rhs1),
            });
        }

        let driver = |po: Signal| -> Result<u32> { self.po_driver(po).map(lit) };
        let mut classified = vec![false; self.nodes.len()];
        for po in self
            .properties
            .iter()
            .chain(&self.constraints)
            .chain(self.fair_properties.iter().flatten())
            .chain(&self.fair_constraints)
        {
            classified[po.index()] = true;
        }
        let bare: Vec<Signal> = self.pos.iter().copied().filter(|po| !classified[po.index()]).collect();

        aiger.outputs = bare.iter().map(|&po| driver(po)).collect::<Result<_>>()?;
        aiger.bad = self.properties.iter().map(|&po| driver(po)).collect::<Result<_>>()?;
        aiger.constraints = self.constraints.iter().map(|&po| driver(po)).collect::<Result<_>>()?;
        aiger.justice = self
            .fair_properties
            .iter()
            .map(|group| group.iter().map(|&po| driver(po)).collect::<Result<Vec<_>>>())
            .collect::<Result<_>>()?;
        aiger.fairness = self.fair_constraints.iter().map(|&po| driver(po)).collect::<Result<_>>()?;

        if config.write_names && !self.names.is_empty() {
            // Justice symbols name the first PO of each group.
            let heads: Vec<Option<Signal>> = self.fair_properties.iter().map(|g| g.first().copied()).collect();
            let slots = |nodes: &[Signal]| nodes.iter().map(|&s| Some(s)).collect::<Vec<_>>();
            let sections = [
                (SymbolKind::Input, slots(&self.pis)),
                (SymbolKind::Latch, slots(&self.flops)),
                (SymbolKind::Output, slots(&bare)),
                (SymbolKind::Bad, slots(&self.properties)),
                (SymbolKind::Constraint, slots(&self.constraints)),
                (SymbolKind::Justice, heads),
                (SymbolKind::Fairness, slots(&self.fair_constraints)),
            ];
            for (kind, nodes) in sections {
                for (index, s) in nodes.into_iter().enumerate() {
                    if let Some(name) = s.and_then(|s| self.names.get(s.id())) {
                        aiger.symbols.push(Symbol {
                            kind,
                            index,
                            name: name.to_string(),
                        });
                    }
                }
            }
        }

        debug!(
            "to_aiger: M={} I={} L={} O={} A={}",
            aiger.max_var,
            aiger.inputs.len(),
            aiger.latches.len(),
            aiger.outputs.len(),
            aiger.ands.len()
        );
        Ok(aiger)
    }

    pub fn write_aiger(&self, writer: impl Write, config: &AigerConfig) -> Result<()> {
        self.to_aiger(config)?.write(writer, config.format)
    }

    /// Writes to `path`; the format comes from `config`, not from the extension.
    pub fn save_aiger(&self, path: impl AsRef<Path>, config: &AigerConfig) -> Result<()> {
        let path = path.as_ref();
        info!("writing {} AIGER to {}", config.format.magic(), path.display());
        let file = File::create(path)?;
        self.write_aiger(file, config)
    }

    /// The canonical renumbering of this netlist: `const | PIs | flops | Ands | POs`,
    /// And gates sorted topologically and POs grouped as AIGER writes them.
    ///
    /// Decoding any encoding of this netlist yields exactly the normalized netlist.
    pub fn normalized(&self) -> Result<Netlist> {
        let config = AigerConfig::default();
        Netlist::from_aiger(&self.to_aiger(&config)?, &config)
    }
}

// Aiger -> Netlist
impl Netlist {
    pub fn from_aiger(aiger: &Aiger, config: &AigerConfig) -> Result<Netlist> {
        let mut netlist = Netlist::new();
        // Keyed by variable; the header's maximum may be far above what the records define.
        let n_defs = aiger.inputs.len() + aiger.latches.len() + aiger.ands.len();
        let mut vars: HashMap<u32, Signal> = HashMap::with_capacity(n_defs);

        let mut define = |lit: u32, signal: Signal| -> Result<()> {
            let var = lit >> 1;
            if lit & 1 != 0 || var == 0 {
                return Err(Error::malformed(0, format!("invalid definition literal {}", lit)));
            }
            if var > aiger.max_var {
                return Err(Error::malformed(0, format!("literal {} exceeds maximum variable index", lit)));
            }
            if vars.insert(var, signal).is_some() {
                return Err(Error::malformed(0, format!("variable {} defined twice", var)));
            }
            Ok(())
        };

        for &lit in &aiger.inputs {
            define(lit, netlist.push(Node::Pi))?;
        }
        for latch in &aiger.latches {
            let flop = netlist.push(Node::Flop {
                next: None,
                init: latch.init,
            });
            define(latch.lit, flop)?;
        }
        for and in &aiger.ands {
            define(and.lhs, netlist.push(Node::And(Signal::FALSE, Signal::FALSE)))?;
        }

        let resolve = |lit: u32| -> Result<Signal> {
            let var = lit >> 1;
            if var == 0 {
                return Ok(Signal::FALSE ^ (lit & 1 != 0));
            }
            if var > aiger.max_var {
                return Err(Error::malformed(0, format!("literal {} exceeds maximum variable index", lit)));
            }
            match vars.get(&var) {
                None => Err(Error::malformed(0, format!("literal {} refers to an undefined variable", lit))),
                Some(&s) => Ok(s ^ (lit & 1 != 0)),
            }
        };

        for (latch, ff) in aiger.latches.iter().zip(netlist.flops.clone()) {
            let next = resolve(latch.next)?;
            netlist.set_flop_next(ff, next)?;
        }
        for (and, g) in aiger.ands.iter().zip(netlist.ands.clone()) {
            netlist.nodes[g.index()] = Node::and(resolve(and.rhs0)?, resolve(and.rhs1)?);
        }

        let legacy = config.outputs_as_properties
            && aiger.bad.is_empty()
            && aiger.constraints.is_empty()
            && aiger.justice.is_empty()
            && aiger.fairness.is_empty();

        let mut outputs = Vec::with_capacity(aiger.outputs.len());
        for &lit in &aiger.outputs {
            let po = netlist.push(Node::Po(resolve(lit)?));
            if legacy {
                netlist.properties.push(po);
            }
            outputs.push(po);
        }
        for &lit in &aiger.bad {
            let po = netlist.push(Node::Po(resolve(lit)?));
            netlist.properties.push(po);
        }
        for &lit in &aiger.constraints {
            let po = netlist.push(Node::Po(resolve(lit)?));
            netlist.constraints.push(po);
        }
        for group in &aiger.justice {
            let mut pos = Vec::with_capacity(group.len());
            for &lit in group {
                pos.push(netlist.push(Node::Po(resolve(lit)?)));
            }
            netlist.fair_properties.push(pos);
        }
        for &lit in &aiger.fairness {
            let po = netlist.push(Node::Po(resolve(lit)?));
            netlist.fair_constraints.push(po);
        }

        for symbol in &aiger.symbols {
            let target = match symbol.kind {
                SymbolKind::Input => netlist.pis.get(symbol.index).copied(),
                SymbolKind::Latch => netlist.flops.get(symbol.index).copied(),
                SymbolKind::Output => outputs.get(symbol.index).copied(),
                SymbolKind::Bad if !legacy => netlist.properties.get(symbol.index).copied(),
                SymbolKind::Bad => None,
                SymbolKind::Constraint => netlist.constraints.get(symbol.index).copied(),
                SymbolKind::Justice => netlist
                    .fair_properties
                    .get(symbol.index)
                    .and_then(|group| group.first().copied()),
                SymbolKind::Fairness => netlist.fair_constraints.get(symbol.index).copied(),
            };
            let target = target.ok_or_else(|| Error::malformed(0, format!("symbol '{}' has no target", symbol)))?;
            netlist.names.set(target.id(), symbol.name.as_str());
        }

        debug!("from_aiger: {:?}", netlist);
        Ok(netlist)
    }

    /// Reads either AIGER variant; the format is detected from the header.
    pub fn read_aiger(reader: impl Read, config: &AigerConfig) -> Result<Netlist> {
        let aiger = Aiger::parse(reader)?;
        Netlist::from_aiger(&aiger, config)
    }

    pub fn load_aiger(path: impl AsRef<Path>, config: &AigerConfig) -> Result<Netlist> {
        let path = path.as_ref();
        info!("reading AIGER from {}", path.display());
        let file = File::open(path)?;
        Netlist::read_aiger(file, config)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn encode(n: &Netlist, config: &AigerConfig) -> Vec<u8> {
        let mut bytes = Vec::new();
        n.write_aiger(&mut bytes, config).unwrap();
        bytes
    }

    fn decode(bytes: &[u8]) -> Netlist {
        Netlist::read_aiger(bytes, &AigerConfig::default()).unwrap()
    }

    /// A toggle flop gated by an enable input, with a property, a constraint,
    /// a fair property and a fair constraint.
    fn sample() -> Netlist {
        let mut n = Netlist::new();
        let en = n.add_pi();
        let rst = n.add_pi();
        let ff = n.add_flop(FlopInit::Zero);
        let dc = n.add_flop(FlopInit::Undef);
        let toggle = n.add_and(en, !ff).unwrap();
        let hold = n.add_and(!en, ff).unwrap();
        let next = n.add_and(!toggle, !hold).unwrap();
        let next = n.add_and(!next, !rst).unwrap();
        n.set_flop_next(ff, next).unwrap();
        n.set_flop_next(dc, !dc).unwrap();

        let out = n.add_po(ff).unwrap();
        let prop = n.add_po(!ff).unwrap();
        let cons = n.add_po(!rst).unwrap();
        let fp1 = n.add_po(en).unwrap();
        let fp2 = n.add_po(dc).unwrap();
        let fc = n.add_po(!dc).unwrap();
        n.add_property(prop).unwrap();
        n.add_constraint(cons).unwrap();
        n.add_fair_property(&[fp1, fp2]).unwrap();
        n.add_fair_constraint(fc).unwrap();

        n.set_name(en, "en").unwrap();
        n.set_name(ff, "state").unwrap();
        n.set_name(out, "q").unwrap();
        n.set_name(prop, "never_one").unwrap();
        n.set_name(fp1, "live").unwrap();
        n
    }

    #[test]
    fn test_scenario_header() {
        let mut n = Netlist::new();
        let a = n.add_pi();
        let b = n.add_pi();
        let g = n.add_and(a, b).unwrap();
        n.add_po(g).unwrap();

        let text = String::from_utf8(encode(&n, &AigerConfig::default())).unwrap();
        assert!(text.starts_with("aag 3 2 0 1 1\n"));

        let m = decode(text.as_bytes());
        assert_eq!(m.n_pis(), 2);
        assert_eq!(m.n_ands(), 1);
        assert_eq!(m.n_pos(), 1);
        assert_eq!(m.po_driver(m.pos()[0]).unwrap(), m.ands()[0]);
    }

    #[test]
    fn test_roundtrip_ascii() {
        let n = sample();
        let m = decode(&encode(&n, &AigerConfig::default()));
        assert_eq!(m, n);
    }

    #[test]
    fn test_roundtrip_binary() {
        let n = sample();
        let config = AigerConfig::default().with_format(AigerFormat::Binary);
        let m = decode(&encode(&n, &config));
        assert_eq!(m, n);
    }

    #[test]
    fn test_variants_agree() {
        let n = sample();
        let ascii = decode(&encode(&n, &AigerConfig::default()));
        let binary = decode(&encode(&n, &AigerConfig::default().with_format(AigerFormat::Binary)));
        assert_eq!(ascii, binary);
    }

    #[test]
    fn test_extension_sections() {
        let aiger = sample().to_aiger(&AigerConfig::default()).unwrap();
        assert_eq!(aiger.max_var, 8);
        assert_eq!(aiger.outputs.len(), 1);
        assert_eq!(aiger.bad.len(), 1);
        assert_eq!(aiger.constraints.len(), 1);
        assert_eq!(aiger.justice, vec![vec![2, 8]]);
        assert_eq!(aiger.fairness, vec![9]);
        assert_eq!(aiger.latches[1], Latch { lit: 8, next: 9, init: FlopInit::Undef });
    }

    #[test]
    fn test_non_canonical_netlist_is_renumbered() {
        let mut n = Netlist::new();
        let a = n.add_pi();
        let g = n.add_and(a, Signal::TRUE).unwrap();
        let out = n.add_po(!g).unwrap();
        // A PI added after a gate and a PO.
        let b = n.add_pi();
        let h = n.add_and(g, b).unwrap();
        n.add_po(h).unwrap();
        n.set_name(out, "out").unwrap();
        let snapshot = n.copy();

        let m = decode(&encode(&n, &AigerConfig::default()));
        assert_eq!(n, snapshot);
        assert_ne!(m, n);
        assert_eq!(m, n.normalized().unwrap());
        assert_eq!(m.n_pis(), 2);
        assert_eq!(m.n_ands(), 2);
        // Layout const | PIs | Ands | POs.
        assert_eq!(m.pis(), &[Signal::from_id(1), Signal::from_id(2)]);
        assert_eq!(m.ands(), &[Signal::from_id(3), Signal::from_id(4)]);
        assert_eq!(m.po_driver(m.pos()[0]).unwrap(), !Signal::from_id(3));
        assert_eq!(m.name(m.pos()[0]), Some("out"));
    }

    #[test]
    fn test_unconnected_flop_policy() {
        let mut n = Netlist::new();
        let ff = n.add_flop(FlopInit::One);
        n.add_po(ff).unwrap();

        let aiger = n.to_aiger(&AigerConfig::default()).unwrap();
        assert_eq!(aiger.latches[0].next, 0);

        let strict = AigerConfig::default().with_unconnected_flops(UnconnectedFlop::Reject);
        assert!(matches!(n.to_aiger(&strict), Err(Error::InvalidReference { .. })));
    }

    #[test]
    fn test_names_are_optional() {
        let mut n = sample();
        let text = String::from_utf8(encode(&n, &AigerConfig::default().with_names(false))).unwrap();
        assert!(!text.contains("en"));

        n.names = Default::default();
        let text = String::from_utf8(encode(&n, &AigerConfig::default())).unwrap();
        assert!(text.lines().all(|line| !line.starts_with('i') && !line.starts_with('o')));
    }

    #[test]
    fn test_legacy_outputs_as_properties() {
        let text = "aag 1 1 0 2 0\n2\n2\n3\no1 bad\n";
        let config = AigerConfig::default().with_outputs_as_properties(true);
        let n = Netlist::read_aiger(text.as_bytes(), &config).unwrap();
        assert_eq!(n.n_pos(), 2);
        assert_eq!(n.properties(), n.pos());
        assert_eq!(n.name(n.pos()[1]), Some("bad"));

        let plain = decode(text.as_bytes());
        assert_eq!(plain.n_properties(), 0);
    }

    #[test]
    fn test_undefined_variable() {
        let text = "aag 3 1 0 1 0\n2\n6\n";
        assert!(matches!(
            Netlist::read_aiger(text.as_bytes(), &AigerConfig::default()),
            Err(Error::MalformedInput { .. })
        ));
    }

    #[test]
    fn test_sparse_maximum_variable() {
        let config = AigerConfig::default();
        let n = Netlist::read_aiger("aag 2000000000 0 0 0 0\n".as_bytes(), &config).unwrap();
        assert_eq!(n.n_nodes(), 1);

        let n = Netlist::read_aiger("aag 2000000000 1 0 1 0\n4000000000\n4000000001\n".as_bytes(), &config).unwrap();
        assert_eq!(n.n_pis(), 1);
        assert_eq!(n.po_driver(n.pos()[0]).unwrap(), !n.pis()[0]);

        let undefined = Netlist::read_aiger("aag 2000000000 1 0 1 0\n2\n3999999998\n".as_bytes(), &config);
        assert!(matches!(undefined, Err(Error::MalformedInput { .. })));
    }

    #[test]
    fn test_duplicate_definition() {
        let text = "aag 2 2 0 0 0\n2\n2\n";
        assert!(matches!(
            Netlist::read_aiger(text.as_bytes(), &AigerConfig::default()),
            Err(Error::MalformedInput { .. })
        ));
    }

    #[test]
    fn test_unsorted_ascii_gates() {
        // Gate 4 uses gate 3, which is defined on the next line.
        let text = "aag 4 2 0 1 2\n2\n4\n9\n8 6 2\n6 4 2\n";
        let n = decode(text.as_bytes());
        assert_eq!(n.n_ands(), 2);
        let order = n.uporder().unwrap();
        assert_eq!(order.last(), Some(&n.pos()[0]));

        let binary = encode(&n, &AigerConfig::default().with_format(AigerFormat::Binary));
        let m = decode(&binary);
        assert_eq!(m, n.normalized().unwrap());
    }

    #[test]
    fn test_comment_is_written() {
        let n = sample();
        let text = String::from_utf8(encode(&n, &AigerConfig::default().with_comment("made by tests"))).unwrap();
        assert!(text.ends_with("c\nmade by tests\n"));
        let aiger = Aiger::parse(text.as_bytes()).unwrap();
        assert_eq!(aiger.comment.as_deref(), Some("made by tests"));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(AigerFormat::from_path("a/b.aag"), Some(AigerFormat::Ascii));
        assert_eq!(AigerFormat::from_path("b.aig"), Some(AigerFormat::Binary));
        assert_eq!(AigerFormat::from_path("b.blif"), None);
    }
}
