//! Topological ("up") ordering of the combinational logic.
//!
//! The traversal is an iterative depth-first post-order with three-colour
//! marking. Only [`Edge::Comb`](crate::node::Edge::Comb) edges are followed,
//! so a flop is always a leaf and sequential loops through flops never count
//! as cycles. The same [`Dfs`] drives the reachability pruner.

use log::{debug, info};

use crate::error::{Error, Result};
use crate::netlist::Netlist;
use crate::node::{Node, NodeKind};
use crate::signal::Signal;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Color {
    White,
    Gray,
    Black,
}

/// Resumable post-order DFS over combinational fan-ins.
///
/// Nodes finished by one [`visit`](Dfs::visit) stay finished for the next,
/// so each node is reported exactly once over the lifetime of a `Dfs`.
pub(crate) struct Dfs<'a> {
    nodes: &'a [Node],
    color: Vec<Color>,
    // (node id, number of fan-ins already explored)
    stack: Vec<(usize, usize)>,
}

impl<'a> Dfs<'a> {
    pub(crate) fn new(netlist: &'a Netlist) -> Self {
        Self {
            nodes: &netlist.nodes,
            color: vec![Color::White; netlist.nodes.len()],
            stack: Vec::new(),
        }
    }

    /// Visits the cone of `root`, calling `on_done` for every newly finished node
    /// after all of its fan-ins.
    pub(crate) fn visit(&mut self, root: Signal, mut on_done: impl FnMut(u32, &Node)) -> Result<()> {
        let nodes = self.nodes;
        let root = root.index();
        if self.color[root] != Color::White {
            return Ok(());
        }
        self.color[root] = Color::Gray;
        self.stack.push((root, 0));

        while let Some(top) = self.stack.last_mut() {
            let (id, explored) = *top;
            let node = &nodes[id];
            match node.comb_fanins().nth(explored) {
                Some(child) => {
                    top.1 += 1;
                    let child = child.index();
                    match self.color[child] {
                        Color::White => {
                            self.color[child] = Color::Gray;
                            self.stack.push((child, 0));
                        }
                        Color::Gray => {
                            self.stack.clear();
                            return Err(Error::CyclicGraph { node: child as u32 });
                        }
                        Color::Black => {}
                    }
                }
                None => {
                    self.stack.pop();
                    self.color[id] = Color::Black;
                    on_done(id as u32, node);
                }
            }
        }

        Ok(())
    }
}

impl Netlist {
    /// Orders the logic feeding all POs and all connected flop next-state inputs.
    ///
    /// Every And appears after both of its operands and every PO after its
    /// driver. Reached leaves (constant, PIs, flops) are included. The order is
    /// deterministic: POs are seeded first, then flop next-state inputs, both
    /// in creation order, and an And's left operand is explored before its right.
    pub fn uporder(&self) -> Result<Vec<Signal>> {
        let next_states = self.flops.iter().filter_map(|&ff| match self.nodes[ff.index()] {
            Node::Flop { next, .. } => next,
            _ => None,
        });
        let roots: Vec<Signal> = self.pos.iter().copied().chain(next_states).collect();
        self.uporder_from(&roots)
    }

    /// Orders the combinational cones of the given roots only.
    pub fn uporder_from(&self, roots: &[Signal]) -> Result<Vec<Signal>> {
        for &root in roots {
            self.node(root)?;
        }

        let mut dfs = Dfs::new(self);
        let mut order = Vec::new();
        for &root in roots {
            dfs.visit(root, |id, _| order.push(Signal::from_id(id)))?;
        }

        info!("uporder: {} roots, {} nodes ordered", roots.len(), order.len());
        Ok(order)
    }

    /// All And gates in a topological order.
    ///
    /// Gates are seeded in creation order, so a netlist whose gates are already
    /// sorted gets its creation order back.
    pub(crate) fn sorted_ands(&self) -> Result<Vec<Signal>> {
        let mut dfs = Dfs::new(self);
        let mut order = Vec::with_capacity(self.ands.len());
        for &and in &self.ands {
            dfs.visit(and, |id, node| {
                if node.kind() == NodeKind::And {
                    order.push(Signal::from_id(id));
                }
            })?;
        }
        debug!("sorted_ands: {} gates", order.len());
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::node::FlopInit;

    fn position(order: &[Signal], s: Signal) -> usize {
        order
            .iter()
            .position(|&x| x == s.regular())
            .unwrap_or_else(|| panic!("{} not in order", s))
    }

    #[test]
    fn test_uporder_simple() {
        let mut n = Netlist::new();
        let a = n.add_pi();
        let b = n.add_pi();
        let g = n.add_and(a, b).unwrap();
        let out = n.add_po(!g).unwrap();

        let order = n.uporder().unwrap();
        // Left operand (b, the larger literal) is explored first.
        assert_eq!(order, vec![b, a, g, out]);
    }

    #[test]
    fn test_uporder_shared_cone_visited_once() {
        let mut n = Netlist::new();
        let a = n.add_pi();
        let b = n.add_pi();
        let g = n.add_and(a, b).unwrap();
        let h = n.add_and(g, !a).unwrap();
        let o1 = n.add_po(g).unwrap();
        let o2 = n.add_po(h).unwrap();

        let order = n.uporder().unwrap();
        assert_eq!(order.len(), 6);
        assert!(position(&order, g) < position(&order, h));
        assert!(position(&order, a) < position(&order, g));
        assert!(position(&order, g) < position(&order, o1));
        assert!(position(&order, h) < position(&order, o2));
    }

    #[test]
    fn test_uporder_flop_loop_is_not_a_cycle() {
        let mut n = Netlist::new();
        let a = n.add_pi();
        let ff = n.add_flop(FlopInit::Zero);
        let g = n.add_and(a, !ff).unwrap();
        n.set_flop_next(ff, g).unwrap();

        // No POs: the gate is reached through the flop's next-state input.
        let order = n.uporder().unwrap();
        assert_eq!(order, vec![ff, a, g]);
    }

    #[test]
    fn test_uporder_detects_cycle() {
        let mut n = Netlist::new();
        let a = n.add_pi();
        let g = n.add_and(a, Signal::TRUE).unwrap();
        let h = n.add_and(g, a).unwrap();
        // Close a combinational loop behind the API's back.
        n.nodes[g.index()] = Node::and(a, h);
        n.add_po(h).unwrap();

        assert!(matches!(n.uporder(), Err(Error::CyclicGraph { .. })));
    }

    #[test]
    fn test_uporder_from_roots() {
        let mut n = Netlist::new();
        let a = n.add_pi();
        let b = n.add_pi();
        let g = n.add_and(a, b).unwrap();
        let h = n.add_and(!a, !b).unwrap();
        n.add_po(g).unwrap();

        let order = n.uporder_from(&[!h]).unwrap();
        assert_eq!(order, vec![b, a, h]);
        assert!(n.uporder_from(&[Signal::from_id(99)]).is_err());
    }

    #[test]
    fn test_sorted_ands_keeps_sorted_order() {
        let mut n = Netlist::new();
        let a = n.add_pi();
        let b = n.add_pi();
        let g1 = n.add_and(a, b).unwrap();
        let g2 = n.add_and(!a, b).unwrap();
        let g3 = n.add_and(g1, g2).unwrap();
        assert_eq!(n.sorted_ands().unwrap(), vec![g1, g2, g3]);
    }
}
