//! The node store.
//!
//! A [`Netlist`] owns the constant node, primary inputs, flops, And gates and
//! primary outputs, plus the four classification sets and the name table.
//! Nodes live in a single arena indexed by node id; [`Signal`]s are plain
//! indices into it, so copying a netlist needs no pointer fix-ups.
//!
//! ```
//! use netlist_rs::netlist::Netlist;
//! use netlist_rs::node::FlopInit;
//!
//! let mut n = Netlist::new();
//! let a = n.add_pi();
//! let b = n.add_pi();
//! let ff = n.add_flop(FlopInit::Zero);
//! let g = n.add_and(a, !b).unwrap();
//! n.set_flop_next(ff, g).unwrap();
//! let out = n.add_po(ff).unwrap();
//! n.add_property(out).unwrap();
//!
//! assert_eq!(n.n_pis(), 2);
//! assert_eq!(n.n_ands(), 1);
//! assert_eq!(n.properties(), &[out]);
//! ```

use std::fmt::{Debug, Display, Formatter};

use log::debug;

use crate::error::{Error, Result};
use crate::names::NameTable;
use crate::node::{FlopInit, Node, NodeKind};
use crate::signal::Signal;

#[derive(Clone, Eq, PartialEq)]
pub struct Netlist {
    pub(crate) nodes: Vec<Node>,
    pub(crate) pis: Vec<Signal>,
    pub(crate) flops: Vec<Signal>,
    pub(crate) ands: Vec<Signal>,
    pub(crate) pos: Vec<Signal>,
    pub(crate) properties: Vec<Signal>,
    pub(crate) constraints: Vec<Signal>,
    pub(crate) fair_properties: Vec<Vec<Signal>>,
    pub(crate) fair_constraints: Vec<Signal>,
    pub(crate) names: NameTable,
}

impl Netlist {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::Const],
            pis: Vec::new(),
            flops: Vec::new(),
            ands: Vec::new(),
            pos: Vec::new(),
            properties: Vec::new(),
            constraints: Vec::new(),
            fair_properties: Vec::new(),
            fair_constraints: Vec::new(),
            names: NameTable::new(),
        }
    }
}

impl Default for Netlist {
    fn default() -> Self {
        Netlist::new()
    }
}

impl Debug for Netlist {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Netlist")
            .field("pis", &self.pis.len())
            .field("flops", &self.flops.len())
            .field("ands", &self.ands.len())
            .field("pos", &self.pos.len())
            .field("properties", &self.properties.len())
            .field("constraints", &self.constraints.len())
            .field("fair_properties", &self.fair_properties.len())
            .field("fair_constraints", &self.fair_constraints.len())
            .field("names", &self.names.len())
            .finish()
    }
}

/// One line per node, e.g. `n4 = and(!n2, n1)`.
impl Display for Netlist {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (id, node) in self.nodes.iter().enumerate().skip(1) {
            write!(f, "n{} = ", id)?;
            match node {
                Node::Const => write!(f, "const")?,
                Node::Pi => write!(f, "pi")?,
                Node::Flop { next: Some(next), init } => write!(f, "flop({}, init={})", next, init)?,
                Node::Flop { next: None, init } => write!(f, "flop(#, init={})", init)?,
                Node::And(left, right) => write!(f, "and({}, {})", left, right)?,
                Node::Po(driver) => write!(f, "po({})", driver)?,
            }
            if let Some(name) = self.names.get(id as u32) {
                write!(f, " \"{}\"", name)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// Construction
impl Netlist {
    /// Appends a node without validating its fan-ins.
    pub(crate) fn push(&mut self, node: Node) -> Signal {
        let signal = Signal::from_id(self.nodes.len() as u32);
        match node.kind() {
            NodeKind::Const => unreachable!("the constant node is unique"),
            NodeKind::Pi => self.pis.push(signal),
            NodeKind::Flop => self.flops.push(signal),
            NodeKind::And => self.ands.push(signal),
            NodeKind::Po => self.pos.push(signal),
        }
        self.nodes.push(node);
        signal
    }

    pub fn add_pi(&mut self) -> Signal {
        let pi = self.push(Node::Pi);
        debug!("add_pi() -> {}", pi);
        pi
    }

    /// Appends a flop whose next-state input is not yet connected.
    pub fn add_flop(&mut self, init: FlopInit) -> Signal {
        let flop = self.push(Node::Flop { next: None, init });
        debug!("add_flop(init = {}) -> {}", init, flop);
        flop
    }

    pub fn add_and(&mut self, a: Signal, b: Signal) -> Result<Signal> {
        self.check_operand(a)?;
        self.check_operand(b)?;
        let and = self.push(Node::and(a, b));
        debug!("add_and({}, {}) -> {}", a, b, and);
        Ok(and)
    }

    pub fn add_po(&mut self, driver: Signal) -> Result<Signal> {
        self.check_operand(driver)?;
        let po = self.push(Node::Po(driver));
        debug!("add_po({}) -> {}", driver, po);
        Ok(po)
    }

    pub fn set_flop_next(&mut self, flop: Signal, next: Signal) -> Result<()> {
        self.check_kind(flop, NodeKind::Flop)?;
        self.check_operand(next)?;
        if let Node::Flop { next: slot, .. } = &mut self.nodes[flop.index()] {
            *slot = Some(next);
        }
        Ok(())
    }

    pub fn set_flop_init(&mut self, flop: Signal, init: FlopInit) -> Result<()> {
        self.check_kind(flop, NodeKind::Flop)?;
        if let Node::Flop { init: slot, .. } = &mut self.nodes[flop.index()] {
            *slot = init;
        }
        Ok(())
    }

    pub fn get_true(&self) -> Signal {
        Signal::TRUE
    }

    pub fn get_false(&self) -> Signal {
        Signal::FALSE
    }

    /// Returns an independent deep copy with identical node numbering.
    pub fn copy(&self) -> Netlist {
        debug!("copy {:?}", self);
        self.clone()
    }
}

// Validation
impl Netlist {
    pub(crate) fn check_operand(&self, signal: Signal) -> Result<()> {
        match self.nodes.get(signal.index()) {
            None => Err(Error::invalid(signal, "no such node")),
            Some(node) if !node.is_operand() => Err(Error::invalid(signal, "a PO cannot be used as an operand")),
            Some(_) => Ok(()),
        }
    }

    fn check_kind(&self, signal: Signal, kind: NodeKind) -> Result<()> {
        if signal.is_inverted() {
            return Err(Error::invalid(signal, format!("expected a non-inverted {:?} reference", kind)));
        }
        match self.nodes.get(signal.index()) {
            None => Err(Error::invalid(signal, "no such node")),
            Some(node) if node.kind() != kind => Err(Error::invalid(
                signal,
                format!("expected {:?}, found {:?}", kind, node.kind()),
            )),
            Some(_) => Ok(()),
        }
    }
}

// Counting and enumeration
impl Netlist {
    /// Number of nodes including the constant node.
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }
    pub fn n_pis(&self) -> usize {
        self.pis.len()
    }
    pub fn n_flops(&self) -> usize {
        self.flops.len()
    }
    pub fn n_ands(&self) -> usize {
        self.ands.len()
    }
    pub fn n_pos(&self) -> usize {
        self.pos.len()
    }

    pub fn pis(&self) -> &[Signal] {
        &self.pis
    }
    pub fn flops(&self) -> &[Signal] {
        &self.flops
    }
    pub fn ands(&self) -> &[Signal] {
        &self.ands
    }
    pub fn pos(&self) -> &[Signal] {
        &self.pos
    }

    pub fn node(&self, signal: Signal) -> Result<&Node> {
        self.nodes
            .get(signal.index())
            .ok_or_else(|| Error::invalid(signal, "no such node"))
    }

    pub fn kind(&self, signal: Signal) -> Result<NodeKind> {
        self.node(signal).map(Node::kind)
    }

    /// Operands of an And node, with the polarity of `signal` not applied.
    pub fn and_fanins(&self, signal: Signal) -> Result<(Signal, Signal)> {
        match self.node(signal)? {
            Node::And(left, right) => Ok((*left, *right)),
            node => Err(Error::invalid(signal, format!("expected And, found {:?}", node.kind()))),
        }
    }

    pub fn po_driver(&self, signal: Signal) -> Result<Signal> {
        match self.node(signal)? {
            Node::Po(driver) => Ok(*driver),
            node => Err(Error::invalid(signal, format!("expected Po, found {:?}", node.kind()))),
        }
    }

    /// Next-state input of a flop, `None` while unconnected.
    pub fn flop_next(&self, signal: Signal) -> Result<Option<Signal>> {
        match self.node(signal)? {
            Node::Flop { next, .. } => Ok(*next),
            node => Err(Error::invalid(signal, format!("expected Flop, found {:?}", node.kind()))),
        }
    }

    pub fn flop_init(&self, signal: Signal) -> Result<FlopInit> {
        match self.node(signal)? {
            Node::Flop { init, .. } => Ok(*init),
            node => Err(Error::invalid(signal, format!("expected Flop, found {:?}", node.kind()))),
        }
    }

    /// Initial values of all flops, in flop creation order.
    pub fn flop_inits(&self) -> Vec<FlopInit> {
        self.flops
            .iter()
            .map(|f| match self.nodes[f.index()] {
                Node::Flop { init, .. } => init,
                _ => unreachable!("flop list holds only flops"),
            })
            .collect()
    }
}

// Classification sets
impl Netlist {
    pub fn add_property(&mut self, po: Signal) -> Result<()> {
        self.check_kind(po, NodeKind::Po)?;
        self.properties.push(po);
        Ok(())
    }

    pub fn add_constraint(&mut self, po: Signal) -> Result<()> {
        self.check_kind(po, NodeKind::Po)?;
        self.constraints.push(po);
        Ok(())
    }

    /// Adds a fair property: a group of POs that must all hold infinitely often.
    pub fn add_fair_property(&mut self, group: &[Signal]) -> Result<()> {
        for &po in group {
            self.check_kind(po, NodeKind::Po)?;
        }
        self.fair_properties.push(group.to_vec());
        Ok(())
    }

    pub fn add_fair_constraint(&mut self, po: Signal) -> Result<()> {
        self.check_kind(po, NodeKind::Po)?;
        self.fair_constraints.push(po);
        Ok(())
    }

    pub fn n_properties(&self) -> usize {
        self.properties.len()
    }
    pub fn n_constraints(&self) -> usize {
        self.constraints.len()
    }
    pub fn n_fair_properties(&self) -> usize {
        self.fair_properties.len()
    }
    pub fn n_fair_constraints(&self) -> usize {
        self.fair_constraints.len()
    }

    pub fn properties(&self) -> &[Signal] {
        &self.properties
    }
    pub fn constraints(&self) -> &[Signal] {
        &self.constraints
    }
    pub fn fair_properties(&self) -> &[Vec<Signal>] {
        &self.fair_properties
    }
    pub fn fair_constraints(&self) -> &[Signal] {
        &self.fair_constraints
    }

    /// Whether `po` belongs to none of the classification sets.
    pub fn is_bare_po(&self, po: Signal) -> bool {
        let po = po.regular();
        !self.properties.contains(&po)
            && !self.constraints.contains(&po)
            && !self.fair_properties.iter().any(|g| g.contains(&po))
            && !self.fair_constraints.contains(&po)
    }
}

// Names
impl Netlist {
    /// Names a PI, flop or PO. An empty name removes the entry.
    pub fn set_name(&mut self, signal: Signal, name: impl Into<String>) -> Result<()> {
        match self.kind(signal)? {
            NodeKind::Pi | NodeKind::Flop | NodeKind::Po => {
                self.names.set(signal.id(), name);
                Ok(())
            }
            kind => Err(Error::invalid(signal, format!("{:?} nodes cannot be named", kind))),
        }
    }

    pub fn name(&self, signal: Signal) -> Option<&str> {
        self.names.get(signal.id())
    }

    /// All `(node, name)` pairs in increasing node order.
    pub fn names(&self) -> impl Iterator<Item = (Signal, &str)> {
        self.names.iter().map(|(id, name)| (Signal::from_id(id), name))
    }

    pub fn name_table(&self) -> &NameTable {
        &self.names
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_empty() {
        let n = Netlist::new();
        assert_eq!(n.n_nodes(), 1);
        assert_eq!(n.n_pis() + n.n_flops() + n.n_ands() + n.n_pos(), 0);
        assert_eq!(n.kind(Signal::FALSE).unwrap(), NodeKind::Const);
        assert_eq!(n.get_true(), !n.get_false());
    }

    #[test]
    fn test_add_nodes() {
        let mut n = Netlist::new();
        let a = n.add_pi();
        let b = n.add_pi();
        let g = n.add_and(a, !b).unwrap();
        let out = n.add_po(!g).unwrap();

        assert_eq!(a.id(), 1);
        assert_eq!(b.id(), 2);
        assert_eq!(g.id(), 3);
        assert_eq!(out.id(), 4);
        assert_eq!(n.pis(), &[a, b]);
        assert_eq!(n.ands(), &[g]);
        assert_eq!(n.pos(), &[out]);
        assert_eq!(n.and_fanins(g).unwrap(), (!b, a));
        assert_eq!(n.po_driver(out).unwrap(), !g);
    }

    #[test]
    fn test_invalid_operands() {
        let mut n = Netlist::new();
        let a = n.add_pi();
        let out = n.add_po(a).unwrap();

        assert!(matches!(
            n.add_and(a, Signal::from_id(42)),
            Err(Error::InvalidReference { .. })
        ));
        assert!(matches!(n.add_and(a, out), Err(Error::InvalidReference { .. })));
        assert!(matches!(n.add_po(!out), Err(Error::InvalidReference { .. })));
        assert_eq!(n.n_ands(), 0);
    }

    #[test]
    fn test_flops() {
        let mut n = Netlist::new();
        let a = n.add_pi();
        let ff = n.add_flop(FlopInit::Undef);
        assert_eq!(n.flop_next(ff).unwrap(), None);

        n.set_flop_next(ff, !a).unwrap();
        assert_eq!(n.flop_next(ff).unwrap(), Some(!a));

        n.set_flop_init(ff, FlopInit::One).unwrap();
        assert_eq!(n.flop_inits(), vec![FlopInit::One]);

        assert!(matches!(n.set_flop_next(a, ff), Err(Error::InvalidReference { .. })));
        assert!(matches!(n.set_flop_next(!ff, a), Err(Error::InvalidReference { .. })));
    }

    #[test]
    fn test_classification() {
        let mut n = Netlist::new();
        let a = n.add_pi();
        let p = n.add_po(a).unwrap();
        let c = n.add_po(!a).unwrap();
        let bare = n.add_po(a).unwrap();

        n.add_property(p).unwrap();
        n.add_constraint(c).unwrap();
        n.add_fair_property(&[p, c]).unwrap();
        n.add_fair_constraint(c).unwrap();

        assert_eq!(n.n_properties(), 1);
        assert_eq!(n.n_constraints(), 1);
        assert_eq!(n.fair_properties(), &[vec![p, c]]);
        assert_eq!(n.fair_constraints(), &[c]);
        assert!(!n.is_bare_po(p));
        assert!(n.is_bare_po(bare));

        assert!(n.add_property(a).is_err());
        assert!(n.add_property(!p).is_err());
    }

    #[test]
    fn test_names() {
        let mut n = Netlist::new();
        let a = n.add_pi();
        let b = n.add_pi();
        let g = n.add_and(a, b).unwrap();
        let out = n.add_po(g).unwrap();

        n.set_name(a, "a").unwrap();
        n.set_name(out, "out").unwrap();
        assert!(n.set_name(g, "g").is_err());
        assert!(n.set_name(Signal::FALSE, "zero").is_err());

        assert_eq!(n.name(a), Some("a"));
        assert_eq!(n.name(b), None);
        assert_eq!(n.names().collect::<Vec<_>>(), vec![(a, "a"), (out, "out")]);
    }

    #[test]
    fn test_copy_is_independent() {
        let mut n = Netlist::new();
        let a = n.add_pi();
        let ff = n.add_flop(FlopInit::Zero);
        n.set_flop_next(ff, a).unwrap();
        n.set_name(a, "a").unwrap();

        let mut m = n.copy();
        assert_eq!(m, n);

        let b = m.add_pi();
        m.set_flop_next(ff, b).unwrap();
        m.set_name(a, "renamed").unwrap();

        assert_eq!(n.n_pis(), 1);
        assert_eq!(n.flop_next(ff).unwrap(), Some(a));
        assert_eq!(n.name(a), Some("a"));
        assert_ne!(m, n);
    }

    #[test]
    fn test_display() {
        let mut n = Netlist::new();
        let a = n.add_pi();
        let ff = n.add_flop(FlopInit::Undef);
        let g = n.add_and(a, !ff).unwrap();
        let out = n.add_po(g).unwrap();
        n.set_name(out, "out").unwrap();

        let text = n.to_string();
        assert_eq!(text, "n1 = pi\nn2 = flop(#, init=x)\nn3 = and(!n2, n1)\nn4 = po(n3) \"out\"\n");
    }
}
