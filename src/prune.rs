//! Dead-logic elimination.

use log::{debug, info};

use crate::error::{Error, Result};
use crate::netlist::Netlist;
use crate::node::Node;
use crate::signal::Signal;
use crate::uporder::Dfs;

impl Netlist {
    /// Removes every PI, flop and And gate that does not influence a PO.
    ///
    /// Live roots are all PO drivers and all classification set members. Reaching
    /// a flop makes its next-state input live as well, so the result is the
    /// sequential cone of influence of the outputs. Survivors keep their relative
    /// order and are renumbered contiguously; every held reference (PO drivers,
    /// operands, next-state inputs, classification sets, names) is remapped.
    ///
    /// Returns the number of removed nodes. Signals obtained before the call are
    /// invalidated.
    pub fn remove_unreach(&mut self) -> Result<usize> {
        let live = self.live_nodes()?;
        let before = self.nodes.len();
        let rebuilt = self.rebuild(&live)?;
        let removed = before - rebuilt.nodes.len();

        info!(
            "remove_unreach: removed {} of {} nodes ({} pis, {} flops, {} ands left)",
            removed,
            before,
            rebuilt.n_pis(),
            rebuilt.n_flops(),
            rebuilt.n_ands()
        );

        *self = rebuilt;
        Ok(removed)
    }

    fn live_nodes(&self) -> Result<Vec<bool>> {
        let mut live = vec![false; self.nodes.len()];
        live[0] = true;

        let mut queue: Vec<Signal> = self.pos.clone();
        queue.extend_from_slice(&self.properties);
        queue.extend_from_slice(&self.constraints);
        queue.extend(self.fair_properties.iter().flatten().copied());
        queue.extend_from_slice(&self.fair_constraints);

        let mut dfs = Dfs::new(self);
        while let Some(root) = queue.pop() {
            dfs.visit(root, |id, node| {
                live[id as usize] = true;
                if let Node::Flop { next: Some(next), .. } = node {
                    debug!("live flop n{} pulls in {}", id, next);
                    queue.push(*next);
                }
            })?;
        }

        Ok(live)
    }

    fn rebuild(&self, live: &[bool]) -> Result<Netlist> {
        let mut map: Vec<Option<u32>> = vec![None; self.nodes.len()];
        let mut next_id = 0;
        for (id, &alive) in live.iter().enumerate() {
            if alive {
                map[id] = Some(next_id);
                next_id += 1;
            }
        }

        let remap = |s: Signal| -> Result<Signal> {
            map[s.index()]
                .map(|id| Signal::new(id, s.is_inverted()))
                .ok_or_else(|| Error::InternalInvariantViolation(format!("surviving reference to removed node {}", s)))
        };

        let mut rebuilt = Netlist::new();
        for (id, node) in self.nodes.iter().enumerate().skip(1) {
            if live[id] {
                rebuilt.push(node.map_fanins(remap)?);
            }
        }

        rebuilt.properties = self.properties.iter().map(|&po| remap(po)).collect::<Result<_>>()?;
        rebuilt.constraints = self.constraints.iter().map(|&po| remap(po)).collect::<Result<_>>()?;
        rebuilt.fair_properties = self
            .fair_properties
            .iter()
            .map(|group| group.iter().map(|&po| remap(po)).collect::<Result<Vec<_>>>())
            .collect::<Result<_>>()?;
        rebuilt.fair_constraints = self.fair_constraints.iter().map(|&po| remap(po)).collect::<Result<_>>()?;
        rebuilt.names = self.names.remap(|id| map[id as usize]);

        Ok(rebuilt)
    }
}
