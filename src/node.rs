use std::fmt::{Display, Formatter};

use crate::signal::Signal;

/// Initial value of a flop.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum FlopInit {
    #[default]
    Zero,
    One,
    /// Don't-care: the flop may start in either state.
    Undef,
}

impl Display for FlopInit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FlopInit::Zero => write!(f, "0"),
            FlopInit::One => write!(f, "1"),
            FlopInit::Undef => write!(f, "x"),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum NodeKind {
    Const,
    Pi,
    Flop,
    And,
    Po,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Node {
    Const,
    Pi,
    /// `next == None` until the next-state input is wired.
    Flop { next: Option<Signal>, init: FlopInit },
    And(Signal, Signal),
    Po(Signal),
}

/// A fan-in edge.
///
/// Only [`Edge::Comb`] edges take part in acyclicity checks. A flop's
/// next-state input is an [`Edge::Next`], which legally closes sequential loops.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Edge {
    Comb(Signal),
    Next(Signal),
}

impl Node {
    /// Builds an And node with operands in canonical order (larger raw value first).
    pub(crate) fn and(a: Signal, b: Signal) -> Self {
        if a.raw() >= b.raw() {
            Node::And(a, b)
        } else {
            Node::And(b, a)
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Const => NodeKind::Const,
            Node::Pi => NodeKind::Pi,
            Node::Flop { .. } => NodeKind::Flop,
            Node::And(..) => NodeKind::And,
            Node::Po(_) => NodeKind::Po,
        }
    }

    /// Whether a signal pointing at this node may be used as a fan-in.
    pub fn is_operand(&self) -> bool {
        !matches!(self, Node::Po(_))
    }

    /// Fan-in edges in visiting order (left operand before right).
    pub fn edges(&self) -> impl Iterator<Item = Edge> {
        let edges: [Option<Edge>; 2] = match *self {
            Node::Const | Node::Pi => [None, None],
            Node::Flop { next, .. } => [next.map(Edge::Next), None],
            Node::And(left, right) => [Some(Edge::Comb(left)), Some(Edge::Comb(right))],
            Node::Po(driver) => [Some(Edge::Comb(driver)), None],
        };
        edges.into_iter().flatten()
    }

    /// Combinational fan-ins only.
    pub fn comb_fanins(&self) -> impl Iterator<Item = Signal> {
        self.edges().filter_map(|e| match e {
            Edge::Comb(s) => Some(s),
            Edge::Next(_) => None,
        })
    }

    /// Returns a copy of this node with every fan-in passed through `f`.
    pub(crate) fn map_fanins<E>(&self, mut f: impl FnMut(Signal) -> Result<Signal, E>) -> Result<Self, E> {
        Ok(match *self {
            Node::Const => Node::Const,
            Node::Pi => Node::Pi,
            Node::Flop { next, init } => Node::Flop {
                next: next.map(&mut f).transpose()?,
                init,
            },
            Node::And(left, right) => Node::and(f(left)?, f(right)?),
            Node::Po(driver) => Node::Po(f(driver)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_and_canonical_order() {
        let a = Signal::from_id(1);
        let b = Signal::from_id(2);
        assert_eq!(Node::and(a, b), Node::And(b, a));
        assert_eq!(Node::and(b, a), Node::And(b, a));
        assert_eq!(Node::and(a, !a), Node::And(!a, a));
    }

    #[test]
    fn test_edges() {
        let a = Signal::from_id(1);
        let b = Signal::from_id(2);

        let and = Node::and(a, !b);
        assert_eq!(and.edges().collect::<Vec<_>>(), vec![Edge::Comb(!b), Edge::Comb(a)]);

        let flop = Node::Flop {
            next: Some(b),
            init: FlopInit::Undef,
        };
        assert_eq!(flop.edges().collect::<Vec<_>>(), vec![Edge::Next(b)]);
        assert_eq!(flop.comb_fanins().count(), 0);

        let dangling = Node::Flop {
            next: None,
            init: FlopInit::Zero,
        };
        assert_eq!(dangling.edges().count(), 0);

        assert_eq!(Node::Po(a).comb_fanins().collect::<Vec<_>>(), vec![a]);
        assert!(!Node::Po(a).is_operand());
        assert!(Node::Const.is_operand());
    }
}
